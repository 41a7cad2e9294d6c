use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde::{Deserialize, Serialize};

use squadsplit_core::player::{NewPlayer, Player, PlayerId};
use squadsplit_core::team::{Team, aggregate};

use crate::error::AppError;
use crate::state::AppState;

/// Query string for the roster listing.
#[derive(Debug, Default, Deserialize)]
pub struct ListPlayersQuery {
    #[serde(default)]
    pub q: Option<String>,
}

/// GET /api/v1/players: roster in registration order, optionally filtered by name.
pub async fn list_players(
    State(state): State<AppState>,
    Query(query): Query<ListPlayersQuery>,
) -> Json<Vec<Player>> {
    let roster = state.roster.read().await;
    let players = match query.q.as_deref() {
        Some(q) => roster.search(q),
        None => roster.players().to_vec(),
    };
    Json(players)
}

/// GET /api/v1/players/{player_id}
pub async fn get_player(
    State(state): State<AppState>,
    Path(player_id): Path<String>,
) -> Result<Json<Player>, AppError> {
    let roster = state.roster.read().await;
    roster
        .get(&PlayerId::from(player_id.as_str()))
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("player {player_id} not found")))
}

/// POST /api/v1/players: register a player.
pub async fn create_player(
    State(state): State<AppState>,
    Json(body): Json<NewPlayer>,
) -> Result<(StatusCode, Json<Player>), AppError> {
    let mut roster = state.roster.write().await;
    let player = roster.create(body)?;
    tracing::info!(id = %player.id, name = %player.name, "Player registered");
    Ok((StatusCode::CREATED, Json(player)))
}

/// PUT /api/v1/players/{player_id}: edit name, weapon and skill.
pub async fn update_player(
    State(state): State<AppState>,
    Path(player_id): Path<String>,
    Json(body): Json<NewPlayer>,
) -> Result<Json<Player>, AppError> {
    let mut roster = state.roster.write().await;
    let player = roster.update(&PlayerId::from(player_id), body)?;
    tracing::info!(id = %player.id, "Player updated");
    Ok(Json(player))
}

/// DELETE /api/v1/players/{player_id}: remove a player and deselect it.
pub async fn delete_player(
    State(state): State<AppState>,
    Path(player_id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = PlayerId::from(player_id);
    let mut roster = state.roster.write().await;
    let removed = roster.delete(&id)?;

    state.selection.write().await.remove(&id);
    let mut session = state.session.write().await;
    *session = session.forget_player(&id);

    tracing::info!(id = %removed.id, name = %removed.name, "Player deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// Current selection with a preview of the combined stats.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionResponse {
    pub ids: Vec<PlayerId>,
    pub players: Vec<Player>,
    pub summary: Team,
    /// Whether the selection can be divided with the configured mode.
    pub ready: bool,
}

fn selection_response(
    state: &AppState,
    ids: Vec<PlayerId>,
    players: Vec<Player>,
) -> SelectionResponse {
    let ready = state.config.teams.mode.accepts(players.len());
    SelectionResponse {
        ids,
        summary: aggregate(players.clone()),
        players,
        ready,
    }
}

/// GET /api/v1/selection
pub async fn get_selection(State(state): State<AppState>) -> Json<SelectionResponse> {
    let roster = state.roster.read().await;
    let selection = state.selection.read().await;
    let players = selection.resolve(roster.players());
    Json(selection_response(&state, selection.ids().to_vec(), players))
}

/// POST /api/v1/selection/{player_id}: toggle a roster player in or out.
pub async fn toggle_selection(
    State(state): State<AppState>,
    Path(player_id): Path<String>,
) -> Result<Json<SelectionResponse>, AppError> {
    let id = PlayerId::from(player_id);
    let roster = state.roster.read().await;
    if roster.get(&id).is_none() {
        return Err(AppError::NotFound(format!("player {id} not found")));
    }

    let mut selection = state.selection.write().await;
    let selected = selection.toggle(&id);
    tracing::debug!(%id, selected, count = selection.len(), "Selection toggled");

    let players = selection.resolve(roster.players());
    Ok(Json(selection_response(&state, selection.ids().to_vec(), players)))
}

/// DELETE /api/v1/selection
pub async fn clear_selection(State(state): State<AppState>) -> Json<SelectionResponse> {
    let mut selection = state.selection.write().await;
    selection.clear();
    Json(selection_response(&state, Vec::new(), Vec::new()))
}
