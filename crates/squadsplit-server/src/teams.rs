use axum::extract::State;
use axum::response::Json;
use serde::{Deserialize, Serialize};

use squadsplit_core::partition::PartitionMode;
use squadsplit_core::player::{Player, PlayerId};
use squadsplit_core::session::{SessionOutcome, SessionState, SwapPick};
use squadsplit_core::swap::{TeamSide, swap};
use squadsplit_core::team::Team;

use crate::error::AppError;
use crate::state::AppState;

/// A pair of teams as returned to clients.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchupView {
    pub team1: Team,
    pub team2: Team,
    pub skill_gap: u32,
}

impl MatchupView {
    fn new(team1: Team, team2: Team) -> Self {
        let skill_gap = team1.skill_gap(&team2);
        Self {
            team1,
            team2,
            skill_gap,
        }
    }
}

/// Snapshot of the team screen.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
    pub teams: Option<MatchupView>,
    pub pending: Option<SwapPick>,
}

impl From<&SessionState> for SessionView {
    fn from(session: &SessionState) -> Self {
        Self {
            teams: session
                .teams()
                .map(|(t1, t2)| MatchupView::new(t1.clone(), t2.clone())),
            pending: session.pending().cloned(),
        }
    }
}

/// Result of a session transition.
#[derive(Debug, Serialize)]
pub struct TransitionResponse {
    pub outcome: SessionOutcome,
    pub session: SessionView,
}

/// GET /api/v1/session
pub async fn get_session(State(state): State<AppState>) -> Json<SessionView> {
    let session = state.session.read().await;
    Json(SessionView::from(&*session))
}

/// POST /api/v1/session/teams: divide the selected players (or divide again).
pub async fn divide_teams(
    State(state): State<AppState>,
) -> Result<Json<TransitionResponse>, AppError> {
    let roster = state.roster.read().await;
    let selection = state.selection.read().await;
    let players = selection.resolve(roster.players());
    if players.is_empty() {
        return Err(AppError::BadRequest("no players selected".to_string()));
    }

    let mode = state.config.teams.mode;
    let mut session = state.session.write().await;
    let (next, outcome) = session.divide(&players, mode)?;
    *session = next;

    tracing::info!(players = players.len(), %mode, ?outcome, "Teams divided");
    Ok(Json(TransitionResponse {
        outcome,
        session: SessionView::from(&*session),
    }))
}

/// Request body for a click on a displayed player.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PickBody {
    pub player_id: PlayerId,
    pub team: TeamSide,
}

/// POST /api/v1/session/pick: click-to-swap.
pub async fn pick_player(
    State(state): State<AppState>,
    Json(body): Json<PickBody>,
) -> Result<Json<TransitionResponse>, AppError> {
    let mut session = state.session.write().await;
    let (next, outcome) = session.pick(&body.player_id, body.team)?;
    *session = next;

    if let SessionOutcome::Swapped { first, second } = &outcome {
        tracing::info!(%first, %second, "Players swapped");
    }
    Ok(Json(TransitionResponse {
        outcome,
        session: SessionView::from(&*session),
    }))
}

/// Request body for a direct swap on the current teams.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapBody {
    pub player1_id: PlayerId,
    pub player2_id: PlayerId,
}

/// POST /api/v1/session/swap: exchange a team-1 player with a team-2 player.
pub async fn swap_session_players(
    State(state): State<AppState>,
    Json(body): Json<SwapBody>,
) -> Result<Json<TransitionResponse>, AppError> {
    let mut session = state.session.write().await;
    let (next, outcome) = session.swap_players(&body.player1_id, &body.player2_id)?;
    *session = next;

    tracing::info!(
        player1 = %body.player1_id,
        player2 = %body.player2_id,
        "Players swapped"
    );
    Ok(Json(TransitionResponse {
        outcome,
        session: SessionView::from(&*session),
    }))
}

/// DELETE /api/v1/session: drop the teams and any pending pick.
pub async fn reset_session(State(state): State<AppState>) -> Json<TransitionResponse> {
    let mut session = state.session.write().await;
    let (next, outcome) = session.reset();
    *session = next;
    tracing::info!("Session reset");
    Json(TransitionResponse {
        outcome,
        session: SessionView::from(&*session),
    })
}

/// Request body for a one-off split.
#[derive(Debug, Deserialize)]
pub struct PartitionBody {
    pub players: Vec<Player>,
    #[serde(default)]
    pub mode: Option<PartitionMode>,
}

fn check_unique_ids(players: &[Player]) -> Result<(), AppError> {
    let mut seen = std::collections::HashSet::with_capacity(players.len());
    for player in players {
        if !seen.insert(&player.id) {
            return Err(AppError::BadRequest(format!(
                "duplicate player id {}",
                player.id
            )));
        }
    }
    Ok(())
}

/// POST /api/v1/partition: split the given players without touching the session.
pub async fn partition_players(
    State(state): State<AppState>,
    Json(body): Json<PartitionBody>,
) -> Result<Json<MatchupView>, AppError> {
    let limit = state.config.limits.max_partition_players;
    if body.players.len() > limit {
        return Err(AppError::BadRequest(format!(
            "Too many players: {} (max {limit})",
            body.players.len()
        )));
    }
    check_unique_ids(&body.players)?;

    let mode = body.mode.unwrap_or(state.config.teams.mode);
    let (team1, team2) = mode.partition(&body.players)?;
    Ok(Json(MatchupView::new(team1, team2)))
}

/// Request body for a one-off swap.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatelessSwapBody {
    pub team1: Team,
    pub team2: Team,
    pub player1_id: PlayerId,
    pub player2_id: PlayerId,
}

/// POST /api/v1/swap: swap within caller-supplied teams. Unknown ids leave
/// the teams as they were.
pub async fn swap_players(
    State(state): State<AppState>,
    Json(body): Json<StatelessSwapBody>,
) -> Result<Json<MatchupView>, AppError> {
    let limit = state.config.limits.max_partition_players;
    if body.team1.len() + body.team2.len() > limit {
        return Err(AppError::BadRequest(format!(
            "Too many players: {} (max {limit})",
            body.team1.len() + body.team2.len()
        )));
    }

    let (team1, team2) = swap(&body.team1, &body.team2, &body.player1_id, &body.player2_id);
    Ok(Json(MatchupView::new(team1, team2)))
}
