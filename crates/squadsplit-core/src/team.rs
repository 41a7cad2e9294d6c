use serde::{Deserialize, Serialize};

use crate::player::{Player, PlayerId, WeaponType};

/// One side of a matchup together with its derived stats.
///
/// The stats are a pure function of `players`: the only way to build a `Team`
/// is [`aggregate`], and deserializing one recomputes the stats from the
/// player list rather than trusting the payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "TeamRepr")]
pub struct Team {
    players: Vec<Player>,
    total_skill: u32,
    ar_count: usize,
    smg_count: usize,
}

/// Wire shape accepted when reading a team back in. Only the roster matters.
#[derive(Deserialize)]
struct TeamRepr {
    players: Vec<Player>,
}

impl From<TeamRepr> for Team {
    fn from(repr: TeamRepr) -> Self {
        aggregate(repr.players)
    }
}

/// Build a team from its members, computing total skill and weapon tallies.
pub fn aggregate(players: Vec<Player>) -> Team {
    let total_skill = players.iter().map(|p| u32::from(p.skill_level)).sum();
    let ar_count = players
        .iter()
        .filter(|p| p.weapon_type == WeaponType::Ar)
        .count();
    let smg_count = players
        .iter()
        .filter(|p| p.weapon_type == WeaponType::Smg)
        .count();
    Team {
        players,
        total_skill,
        ar_count,
        smg_count,
    }
}

impl Team {
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn into_players(self) -> Vec<Player> {
        self.players
    }

    pub fn total_skill(&self) -> u32 {
        self.total_skill
    }

    pub fn ar_count(&self) -> usize {
        self.ar_count
    }

    pub fn smg_count(&self) -> usize {
        self.smg_count
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn contains(&self, id: &PlayerId) -> bool {
        self.players.iter().any(|p| &p.id == id)
    }

    pub fn find(&self, id: &PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| &p.id == id)
    }

    /// Absolute difference in total skill against another team.
    pub fn skill_gap(&self, other: &Team) -> u32 {
        self.total_skill.abs_diff(other.total_skill)
    }
}
