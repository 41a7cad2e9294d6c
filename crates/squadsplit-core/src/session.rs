//! Team-screen state kept by the calling layer.
//!
//! The partitioner and swap operator never hold on to anything. Whatever the
//! user is looking at (the current pair of teams and a half-finished swap) is
//! an explicit [`SessionState`] value: each transition borrows the current
//! state and returns the next one, which the caller stores in place of the old.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::partition::{PartitionError, PartitionMode};
use crate::player::{Player, PlayerId};
use crate::swap::{SwapError, TeamSide, swap, try_swap};
use crate::team::Team;

/// First half of a click-to-swap: a player marked on one side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapPick {
    pub player_id: PlayerId,
    pub team: TeamSide,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    teams: Option<(Team, Team)>,
    pending: Option<SwapPick>,
}

/// What a transition did, for logging and for the caller's notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SessionOutcome {
    TeamsDivided { skill_gap: u32 },
    PickStarted { pick: SwapPick },
    PickChanged { pick: SwapPick },
    PickCleared,
    Swapped { first: String, second: String },
    Reset,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// A pick or swap arrived before any teams were formed.
    NoTeams,
    Partition(PartitionError),
    Swap(SwapError),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoTeams => write!(f, "teams have not been divided yet"),
            Self::Partition(e) => write!(f, "{e}"),
            Self::Swap(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for SessionError {}

impl From<PartitionError> for SessionError {
    fn from(e: PartitionError) -> Self {
        Self::Partition(e)
    }
}

impl From<SwapError> for SessionError {
    fn from(e: SwapError) -> Self {
        Self::Swap(e)
    }
}

type Transition = Result<(SessionState, SessionOutcome), SessionError>;

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn teams(&self) -> Option<(&Team, &Team)> {
        self.teams.as_ref().map(|(t1, t2)| (t1, t2))
    }

    pub fn pending(&self) -> Option<&SwapPick> {
        self.pending.as_ref()
    }

    /// Split `players` into a fresh pair of teams, dropping any pending pick.
    /// Used both for the first split and for "divide again".
    pub fn divide(&self, players: &[Player], mode: PartitionMode) -> Transition {
        let (team1, team2) = mode.partition(players)?;
        let skill_gap = team1.skill_gap(&team2);
        let next = Self {
            teams: Some((team1, team2)),
            pending: None,
        };
        Ok((next, SessionOutcome::TeamsDivided { skill_gap }))
    }

    /// Handle a click on `player_id` shown on `team`.
    ///
    /// The first click marks the player. Clicking the marked player again
    /// unmarks it, clicking a teammate moves the mark, and clicking someone
    /// on the other side swaps the two.
    pub fn pick(&self, player_id: &PlayerId, team: TeamSide) -> Transition {
        let (team1, team2) = self.teams.as_ref().ok_or(SessionError::NoTeams)?;
        let side = match team {
            TeamSide::One => team1,
            TeamSide::Two => team2,
        };
        let Some(clicked) = side.find(player_id) else {
            return Err(SwapError::PlayerNotFound {
                id: player_id.clone(),
                team,
            }
            .into());
        };
        let pick = SwapPick {
            player_id: player_id.clone(),
            team,
        };

        let Some(pending) = &self.pending else {
            let next = self.with_pending(Some(pick.clone()));
            return Ok((next, SessionOutcome::PickStarted { pick }));
        };

        if pending == &pick {
            return Ok((self.with_pending(None), SessionOutcome::PickCleared));
        }
        if pending.team == team {
            let next = self.with_pending(Some(pick.clone()));
            return Ok((next, SessionOutcome::PickChanged { pick }));
        }

        let (id1, id2) = match pending.team {
            TeamSide::One => (&pending.player_id, player_id),
            TeamSide::Two => (player_id, &pending.player_id),
        };
        let first = match pending.team {
            TeamSide::One => team1.find(&pending.player_id),
            TeamSide::Two => team2.find(&pending.player_id),
        }
        .map(|p| p.name.clone())
        .unwrap_or_else(|| pending.player_id.to_string());
        let second = clicked.name.clone();

        let next = Self {
            teams: Some(swap(team1, team2, id1, id2)),
            pending: None,
        };
        Ok((next, SessionOutcome::Swapped { first, second }))
    }

    /// Swap two players directly, failing if either is not where expected.
    pub fn swap_players(&self, player1_id: &PlayerId, player2_id: &PlayerId) -> Transition {
        let (team1, team2) = self.teams.as_ref().ok_or(SessionError::NoTeams)?;
        let swapped = try_swap(team1, team2, player1_id, player2_id)?;
        let first = team1
            .find(player1_id)
            .map(|p| p.name.clone())
            .unwrap_or_default();
        let second = team2
            .find(player2_id)
            .map(|p| p.name.clone())
            .unwrap_or_default();
        let next = Self {
            teams: Some(swapped),
            pending: None,
        };
        Ok((next, SessionOutcome::Swapped { first, second }))
    }

    pub fn reset(&self) -> (SessionState, SessionOutcome) {
        (Self::default(), SessionOutcome::Reset)
    }

    /// Drop a pending pick on a player that has left the roster. Formed teams
    /// stay as they are until the next split or reset.
    pub fn forget_player(&self, player_id: &PlayerId) -> SessionState {
        match &self.pending {
            Some(pending) if &pending.player_id == player_id => self.with_pending(None),
            _ => self.clone(),
        }
    }

    fn with_pending(&self, pending: Option<SwapPick>) -> SessionState {
        Self {
            teams: self.teams.clone(),
            pending,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{ids, make_roster, scenario_roster};

    fn divided() -> SessionState {
        let (state, _) = SessionState::new()
            .divide(&scenario_roster(), PartitionMode::SnakeDraft)
            .unwrap();
        state
    }

    #[test]
    fn divide_forms_teams() {
        let (state, outcome) = SessionState::new()
            .divide(&scenario_roster(), PartitionMode::SnakeDraft)
            .unwrap();
        assert_eq!(outcome, SessionOutcome::TeamsDivided { skill_gap: 0 });
        let (t1, t2) = state.teams().unwrap();
        assert_eq!(ids(t1), vec!["p1", "p4", "p5", "p8"]);
        assert_eq!(ids(t2), vec!["p2", "p3", "p6", "p7"]);
        assert!(state.pending().is_none());
    }

    #[test]
    fn divide_rejects_bad_selection() {
        let state = SessionState::new();
        let err = state
            .divide(&make_roster(7), PartitionMode::SnakeDraft)
            .unwrap_err();
        assert!(matches!(err, SessionError::Partition(_)));
    }

    #[test]
    fn divide_again_clears_pending() {
        let (state, _) = divided().pick(&"p1".into(), TeamSide::One).unwrap();
        assert!(state.pending().is_some());
        let (state, _) = state
            .divide(&scenario_roster(), PartitionMode::SnakeDraft)
            .unwrap();
        assert!(state.pending().is_none());
    }

    #[test]
    fn pick_without_teams_fails() {
        let err = SessionState::new()
            .pick(&"p1".into(), TeamSide::One)
            .unwrap_err();
        assert_eq!(err, SessionError::NoTeams);
    }

    #[test]
    fn first_pick_marks_player() {
        let (state, outcome) = divided().pick(&"p4".into(), TeamSide::One).unwrap();
        let pick = SwapPick {
            player_id: "p4".into(),
            team: TeamSide::One,
        };
        assert_eq!(outcome, SessionOutcome::PickStarted { pick: pick.clone() });
        assert_eq!(state.pending(), Some(&pick));
    }

    #[test]
    fn same_pick_clears_mark() {
        let (state, _) = divided().pick(&"p4".into(), TeamSide::One).unwrap();
        let (state, outcome) = state.pick(&"p4".into(), TeamSide::One).unwrap();
        assert_eq!(outcome, SessionOutcome::PickCleared);
        assert!(state.pending().is_none());
    }

    #[test]
    fn teammate_pick_moves_mark() {
        let (state, _) = divided().pick(&"p4".into(), TeamSide::One).unwrap();
        let (state, outcome) = state.pick(&"p5".into(), TeamSide::One).unwrap();
        assert!(matches!(outcome, SessionOutcome::PickChanged { .. }));
        assert_eq!(state.pending().unwrap().player_id, "p5".into());
    }

    #[test]
    fn cross_team_pick_swaps() {
        let (state, _) = divided().pick(&"p2".into(), TeamSide::Two).unwrap();
        let (state, outcome) = state.pick(&"p1".into(), TeamSide::One).unwrap();
        assert_eq!(
            outcome,
            SessionOutcome::Swapped {
                first: "Player2".to_string(),
                second: "Player1".to_string(),
            }
        );
        let (t1, t2) = state.teams().unwrap();
        assert_eq!(t1.total_skill(), 25);
        assert_eq!(t2.total_skill(), 27);
        assert!(t2.contains(&"p1".into()));
        assert!(state.pending().is_none());
    }

    #[test]
    fn pick_on_wrong_side_is_rejected() {
        let err = divided().pick(&"p1".into(), TeamSide::Two).unwrap_err();
        assert!(matches!(err, SessionError::Swap(SwapError::PlayerNotFound { .. })));
    }

    #[test]
    fn swap_players_is_strict() {
        let state = divided();
        let (next, _) = state.swap_players(&"p1".into(), &"p2".into()).unwrap();
        assert_eq!(next.teams().unwrap().0.total_skill(), 25);

        let err = state
            .swap_players(&"p1".into(), &"ghost".into())
            .unwrap_err();
        assert!(matches!(err, SessionError::Swap(_)));
    }

    #[test]
    fn reset_clears_everything() {
        let (state, _) = divided().pick(&"p1".into(), TeamSide::One).unwrap();
        let (state, outcome) = state.reset();
        assert_eq!(outcome, SessionOutcome::Reset);
        assert_eq!(state, SessionState::default());
    }

    #[test]
    fn forget_player_drops_matching_pick() {
        let (state, _) = divided().pick(&"p1".into(), TeamSide::One).unwrap();
        assert!(state.forget_player(&"p2".into()).pending().is_some());
        let state = state.forget_player(&"p1".into());
        assert!(state.pending().is_none());
        assert!(state.teams().is_some());
    }

    #[test]
    fn outcome_serializes_with_kind_tag() {
        let json = serde_json::to_value(SessionOutcome::TeamsDivided { skill_gap: 2 }).unwrap();
        assert_eq!(json["kind"], "teams_divided");
        assert_eq!(json["skill_gap"], 2);
    }
}
