use std::fmt;

use serde::{Deserialize, Serialize};

use crate::player::{Player, WeaponType};
use crate::team::{Team, aggregate};

/// Number of players a snake draft accepts (4v4).
pub const MATCH_SIZE: usize = 8;

/// Strategy used to split a selection into two teams.
///
/// The two modes produce different assignments for the same input and are
/// never combined.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartitionMode {
    /// Whole-roster snake draft over exactly [`MATCH_SIZE`] players.
    #[default]
    SnakeDraft,
    /// Per-weapon interleave over any positive even number of players.
    WeaponSplit,
}

impl PartitionMode {
    /// Whether `count` players satisfy this mode's precondition.
    pub fn accepts(self, count: usize) -> bool {
        match self {
            Self::SnakeDraft => count == MATCH_SIZE,
            Self::WeaponSplit => count > 0 && count % 2 == 0,
        }
    }

    pub fn partition(self, players: &[Player]) -> Result<(Team, Team), PartitionError> {
        if !self.accepts(players.len()) {
            return Err(PartitionError::NotPartitionable {
                count: players.len(),
                mode: self,
            });
        }

        let (team1, team2) = match self {
            Self::SnakeDraft => snake_draft(players),
            Self::WeaponSplit => weapon_split(players),
        };
        tracing::debug!(
            mode = ?self,
            team1_skill = team1.total_skill(),
            team2_skill = team2.total_skill(),
            gap = team1.skill_gap(&team2),
            "Partitioned players"
        );
        Ok((team1, team2))
    }
}

impl fmt::Display for PartitionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SnakeDraft => f.write_str("snake_draft"),
            Self::WeaponSplit => f.write_str("weapon_split"),
        }
    }
}

impl std::str::FromStr for PartitionMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "snake_draft" => Ok(Self::SnakeDraft),
            "weapon_split" => Ok(Self::WeaponSplit),
            other => Err(format!("unknown partition mode: {other}")),
        }
    }
}

/// Split a selection using the snake draft.
pub fn partition(players: &[Player]) -> Result<(Team, Team), PartitionError> {
    PartitionMode::SnakeDraft.partition(players)
}

/// Errors returned by the partitioner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PartitionError {
    /// The player count does not satisfy the mode's precondition.
    NotPartitionable { count: usize, mode: PartitionMode },
}

impl fmt::Display for PartitionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotPartitionable {
                count,
                mode: PartitionMode::SnakeDraft,
            } => write!(
                f,
                "cannot split {count} players: exactly {MATCH_SIZE} are required"
            ),
            Self::NotPartitionable {
                count,
                mode: PartitionMode::WeaponSplit,
            } => write!(
                f,
                "cannot split {count} players: a positive even count is required"
            ),
        }
    }
}

impl std::error::Error for PartitionError {}

/// Players sorted strongest first. `sort_by` is stable, so equal ratings keep
/// their input order.
fn by_skill_desc<'a>(players: impl IntoIterator<Item = &'a Player>) -> Vec<Player> {
    let mut sorted: Vec<Player> = players.into_iter().cloned().collect();
    sorted.sort_by(|a, b| b.skill_level.cmp(&a.skill_level));
    sorted
}

/// Picks go in pairs and the pair order flips every round:
/// T1 T2 | T2 T1 | T1 T2 | T2 T1.
fn snake_draft(players: &[Player]) -> (Team, Team) {
    let mut team1 = Vec::with_capacity(players.len() / 2);
    let mut team2 = Vec::with_capacity(players.len() / 2);

    for (index, player) in by_skill_desc(players).into_iter().enumerate() {
        let round = index / 2;
        let first_of_pair = index % 2 == 0;
        if (round % 2 == 0) == first_of_pair {
            team1.push(player);
        } else {
            team2.push(player);
        }
    }

    (aggregate(team1), aggregate(team2))
}

fn weapon_split(players: &[Player]) -> (Team, Team) {
    let ar = by_skill_desc(players.iter().filter(|p| p.weapon_type == WeaponType::Ar));
    let smg = by_skill_desc(players.iter().filter(|p| p.weapon_type == WeaponType::Smg));

    let mut team1 = Vec::with_capacity(players.len() / 2);
    let mut team2 = Vec::with_capacity(players.len() / 2);

    for (index, player) in ar.into_iter().enumerate() {
        if index % 2 == 0 {
            team1.push(player);
        } else {
            team2.push(player);
        }
    }

    // An odd AR count leaves Team 1 one player up, so the SMG interleave
    // opens on Team 2 to even the sizes out.
    let smg_offset = team1.len() - team2.len();
    for (index, player) in smg.into_iter().enumerate() {
        if (index + smg_offset) % 2 == 0 {
            team1.push(player);
        } else {
            team2.push(player);
        }
    }

    (aggregate(team1), aggregate(team2))
}
