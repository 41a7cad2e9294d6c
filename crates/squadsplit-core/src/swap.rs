use std::fmt;

use serde::{Deserialize, Serialize};

use crate::player::PlayerId;
use crate::team::{Team, aggregate};

/// Which side of a matchup a player sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum TeamSide {
    One,
    Two,
}

impl TeamSide {
    pub fn other(self) -> Self {
        match self {
            Self::One => Self::Two,
            Self::Two => Self::One,
        }
    }
}

impl From<TeamSide> for u8 {
    fn from(side: TeamSide) -> Self {
        match side {
            TeamSide::One => 1,
            TeamSide::Two => 2,
        }
    }
}

impl TryFrom<u8> for TeamSide {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::One),
            2 => Ok(Self::Two),
            other => Err(format!("team must be 1 or 2, got {other}")),
        }
    }
}

impl fmt::Display for TeamSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "team {}", u8::from(*self))
    }
}

/// Raised by [`try_swap`] when an identifier is not on the expected side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SwapError {
    PlayerNotFound { id: PlayerId, team: TeamSide },
}

impl fmt::Display for SwapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PlayerNotFound { id, team } => write!(f, "player {id} is not on {team}"),
        }
    }
}

impl std::error::Error for SwapError {}

/// Exchange `player1_id` (on `team1`) with `player2_id` (on `team2`).
///
/// Both players take over each other's slot; everyone else keeps their
/// position. Stats for both teams are rebuilt from the new member lists.
pub fn try_swap(
    team1: &Team,
    team2: &Team,
    player1_id: &PlayerId,
    player2_id: &PlayerId,
) -> Result<(Team, Team), SwapError> {
    let index1 = team1
        .players()
        .iter()
        .position(|p| &p.id == player1_id)
        .ok_or_else(|| SwapError::PlayerNotFound {
            id: player1_id.clone(),
            team: TeamSide::One,
        })?;
    let index2 = team2
        .players()
        .iter()
        .position(|p| &p.id == player2_id)
        .ok_or_else(|| SwapError::PlayerNotFound {
            id: player2_id.clone(),
            team: TeamSide::Two,
        })?;

    let mut players1 = team1.players().to_vec();
    let mut players2 = team2.players().to_vec();
    std::mem::swap(&mut players1[index1], &mut players2[index2]);

    Ok((aggregate(players1), aggregate(players2)))
}

/// Like [`try_swap`], but an unknown identifier leaves membership unchanged
/// instead of failing.
pub fn swap(
    team1: &Team,
    team2: &Team,
    player1_id: &PlayerId,
    player2_id: &PlayerId,
) -> (Team, Team) {
    try_swap(team1, team2, player1_id, player2_id).unwrap_or_else(|e| {
        tracing::debug!(error = %e, "Swap ignored");
        (
            aggregate(team1.players().to_vec()),
            aggregate(team2.players().to_vec()),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::partition::partition;
    use crate::player::{Player, WeaponType};
    use crate::test_helpers::{ids, make_player, scenario_roster};
    use proptest::prelude::*;

    fn scenario_teams() -> (Team, Team) {
        partition(&scenario_roster()).unwrap()
    }

    #[test]
    fn swap_moves_players_across() {
        let (team1, team2) = scenario_teams();
        let (t1, t2) = swap(&team1, &team2, &"p1".into(), &"p2".into());
        assert_eq!(t1.total_skill(), 25);
        assert_eq!(t2.total_skill(), 27);
        assert!(!t1.contains(&"p1".into()));
        assert!(t2.contains(&"p1".into()));
        assert!(t1.contains(&"p2".into()));
    }

    #[test]
    fn swap_keeps_slot_positions() {
        let (team1, team2) = scenario_teams();
        let (t1, t2) = swap(&team1, &team2, &"p5".into(), &"p7".into());
        assert_eq!(ids(&t1), vec!["p1", "p4", "p7", "p8"]);
        assert_eq!(ids(&t2), vec!["p2", "p3", "p6", "p5"]);
    }

    #[test]
    fn swap_updates_weapon_counts() {
        // p1 is AR, p2 is SMG
        let (team1, team2) = scenario_teams();
        let ar1 = team1.ar_count();
        let (t1, t2) = swap(&team1, &team2, &"p1".into(), &"p2".into());
        assert_eq!(t1.ar_count(), ar1 - 1);
        assert_eq!(t1.smg_count(), team1.smg_count() + 1);
        assert_eq!(t2.ar_count(), team2.ar_count() + 1);
    }

    #[test]
    fn double_swap_restores_teams() {
        let (team1, team2) = scenario_teams();
        let (t1, t2) = swap(&team1, &team2, &"p1".into(), &"p2".into());
        let (b1, b2) = swap(&t1, &t2, &"p2".into(), &"p1".into());
        assert_eq!(b1, team1);
        assert_eq!(b2, team2);
    }

    #[test]
    fn unknown_id_is_a_no_op() {
        let (team1, team2) = scenario_teams();
        let (t1, t2) = swap(&team1, &team2, &"ghost".into(), &"p2".into());
        assert_eq!(t1, team1);
        assert_eq!(t2, team2);
    }

    #[test]
    fn ids_on_wrong_side_are_a_no_op() {
        let (team1, team2) = scenario_teams();
        // p2 is on team 2 and p1 on team 1, so the arguments are reversed
        let (t1, t2) = swap(&team1, &team2, &"p2".into(), &"p1".into());
        assert_eq!(t1, team1);
        assert_eq!(t2, team2);
    }

    #[test]
    fn try_swap_reports_missing_side() {
        let (team1, team2) = scenario_teams();
        let err = try_swap(&team1, &team2, &"p1".into(), &"ghost".into()).unwrap_err();
        assert_eq!(
            err,
            SwapError::PlayerNotFound {
                id: "ghost".into(),
                team: TeamSide::Two,
            }
        );
        assert_eq!(err.to_string(), "player ghost is not on team 2");
    }

    #[test]
    fn swap_on_empty_teams() {
        let empty = aggregate(Vec::new());
        let (t1, t2) = swap(&empty, &empty, &"a".into(), &"b".into());
        assert!(t1.is_empty());
        assert!(t2.is_empty());
    }

    #[test]
    fn team_side_serializes_as_number() {
        assert_eq!(serde_json::to_string(&TeamSide::Two).unwrap(), "2");
        let side: TeamSide = serde_json::from_str("1").unwrap();
        assert_eq!(side, TeamSide::One);
        assert!(serde_json::from_str::<TeamSide>("3").is_err());
        assert_eq!(TeamSide::One.other(), TeamSide::Two);
    }

    fn roster(skills: &[u8]) -> Vec<Player> {
        skills
            .iter()
            .enumerate()
            .map(|(i, &s)| {
                let weapon = if i % 3 == 0 { WeaponType::Smg } else { WeaponType::Ar };
                make_player(&format!("p{i}"), weapon, s)
            })
            .collect()
    }

    proptest! {
        #[test]
        fn any_double_swap_round_trips(
            skills in proptest::collection::vec(1u8..=10, 8),
            a in 0usize..4,
            b in 0usize..4,
        ) {
            let (team1, team2) = partition(&roster(&skills)).unwrap();
            let id1 = team1.players()[a].id.clone();
            let id2 = team2.players()[b].id.clone();

            let (t1, t2) = swap(&team1, &team2, &id1, &id2);
            prop_assert_eq!(t1.total_skill() + t2.total_skill(), team1.total_skill() + team2.total_skill());
            prop_assert_eq!(t1.ar_count() + t1.smg_count(), t1.len());

            let (b1, b2) = swap(&t1, &t2, &id2, &id1);
            prop_assert_eq!(b1, team1);
            prop_assert_eq!(b2, team2);
        }
    }
}
