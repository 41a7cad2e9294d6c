pub mod partition;
pub mod player;
pub mod roster;
pub mod selection;
pub mod session;
pub mod swap;
pub mod team;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers {
    use crate::player::{Player, PlayerId, WeaponType};
    use crate::team::Team;

    /// Build a player whose display name is derived from its id.
    pub fn make_player(id: &str, weapon_type: WeaponType, skill_level: u8) -> Player {
        let name = match id.strip_prefix('p') {
            Some(n) => format!("Player{n}"),
            None => id.to_string(),
        };
        Player {
            id: PlayerId::new(id),
            name,
            weapon_type,
            skill_level,
        }
    }

    /// Create `n` players `p1..pn` with alternating AR/SMG and skills
    /// cycling down from 10.
    pub fn make_roster(n: usize) -> Vec<Player> {
        (0..n)
            .map(|i| {
                let weapon = if i % 2 == 0 { WeaponType::Ar } else { WeaponType::Smg };
                make_player(&format!("p{}", i + 1), weapon, 10 - (i % 10) as u8)
            })
            .collect()
    }

    /// Eight players `p1..p8` rated 10 down to 3, alternating AR/SMG starting
    /// with AR.
    pub fn scenario_roster() -> Vec<Player> {
        make_roster(8)
    }

    /// Member ids of a team, in order.
    pub fn ids(team: &Team) -> Vec<String> {
        team.players().iter().map(|p| p.id.to_string()).collect()
    }
}
