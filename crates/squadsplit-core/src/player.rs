use std::fmt;

use serde::{Deserialize, Serialize};

/// Lowest skill rating a roster entry may carry.
pub const MIN_SKILL: u8 = 1;

/// Highest skill rating a roster entry may carry.
pub const MAX_SKILL: u8 = 10;

/// Skill rating pre-filled for a freshly registered player.
pub const DEFAULT_SKILL: u8 = 5;

/// Upper bound on display name length (in characters).
pub const MAX_NAME_LEN: usize = 64;

/// Opaque, stable identifier of a roster entry.
///
/// Minted by the roster when a player is created; the partitioning code only
/// ever compares identifiers for equality.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(String);

impl PlayerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Mint a fresh random identifier.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PlayerId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for PlayerId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Weapon class a player runs with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeaponType {
    #[default]
    #[serde(rename = "AR")]
    Ar,
    #[serde(rename = "SMG")]
    Smg,
}

impl fmt::Display for WeaponType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ar => f.write_str("AR"),
            Self::Smg => f.write_str("SMG"),
        }
    }
}

/// A registered roster entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub weapon_type: WeaponType,
    pub skill_level: u8,
}

/// Player fields as submitted by the registration or edit form, before the
/// roster assigns an identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPlayer {
    pub name: String,
    #[serde(default)]
    pub weapon_type: WeaponType,
    #[serde(default = "default_skill")]
    pub skill_level: u8,
}

fn default_skill() -> u8 {
    DEFAULT_SKILL
}

impl NewPlayer {
    pub fn new(name: impl Into<String>, weapon_type: WeaponType, skill_level: u8) -> Self {
        Self {
            name: name.into(),
            weapon_type,
            skill_level,
        }
    }

    /// Copy with surrounding whitespace stripped from the name.
    pub fn normalized(&self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            ..self.clone()
        }
    }

    /// Check the fields the roster guarantees for every stored player.
    pub fn validate(&self) -> Result<(), PlayerError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(PlayerError::EmptyName);
        }
        let len = name.chars().count();
        if len > MAX_NAME_LEN {
            return Err(PlayerError::NameTooLong(len));
        }
        if !(MIN_SKILL..=MAX_SKILL).contains(&self.skill_level) {
            return Err(PlayerError::SkillOutOfRange(self.skill_level));
        }
        Ok(())
    }

    /// Attach an identifier, producing a stored player.
    pub fn into_player(self, id: PlayerId) -> Player {
        Player {
            id,
            name: self.name,
            weapon_type: self.weapon_type,
            skill_level: self.skill_level,
        }
    }
}

/// Errors raised by roster operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerError {
    EmptyName,
    NameTooLong(usize),
    SkillOutOfRange(u8),
    NotFound(PlayerId),
}

impl fmt::Display for PlayerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "player name must not be empty"),
            Self::NameTooLong(len) => {
                write!(f, "player name is {len} chars (max {MAX_NAME_LEN})")
            },
            Self::SkillOutOfRange(skill) => write!(
                f,
                "skill level {skill} outside {MIN_SKILL}..={MAX_SKILL}"
            ),
            Self::NotFound(id) => write!(f, "player {id} not found"),
        }
    }
}

impl std::error::Error for PlayerError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn player_json_uses_camel_case() {
        let player = NewPlayer::new("Ghost", WeaponType::Smg, 7).into_player("p1".into());
        let json = serde_json::to_value(&player).unwrap();
        assert_eq!(json["id"], "p1");
        assert_eq!(json["weaponType"], "SMG");
        assert_eq!(json["skillLevel"], 7);

        let back: Player = serde_json::from_value(json).unwrap();
        assert_eq!(back, player);
    }

    #[test]
    fn new_player_defaults() {
        let np: NewPlayer = serde_json::from_str(r#"{"name":"Soap"}"#).unwrap();
        assert_eq!(np.weapon_type, WeaponType::Ar);
        assert_eq!(np.skill_level, DEFAULT_SKILL);
    }

    #[test]
    fn validate_rejects_blank_name() {
        let np = NewPlayer::new("   ", WeaponType::Ar, 5);
        assert_eq!(np.validate(), Err(PlayerError::EmptyName));
    }

    #[test]
    fn validate_rejects_skill_bounds() {
        assert_eq!(
            NewPlayer::new("a", WeaponType::Ar, 0).validate(),
            Err(PlayerError::SkillOutOfRange(0))
        );
        assert_eq!(
            NewPlayer::new("a", WeaponType::Ar, 11).validate(),
            Err(PlayerError::SkillOutOfRange(11))
        );
        assert!(NewPlayer::new("a", WeaponType::Ar, MIN_SKILL).validate().is_ok());
        assert!(NewPlayer::new("a", WeaponType::Ar, MAX_SKILL).validate().is_ok());
    }

    #[test]
    fn validate_rejects_long_name() {
        let np = NewPlayer::new("x".repeat(MAX_NAME_LEN + 1), WeaponType::Ar, 5);
        assert_eq!(np.validate(), Err(PlayerError::NameTooLong(MAX_NAME_LEN + 1)));
    }

    #[test]
    fn normalized_trims_name() {
        let np = NewPlayer::new("  Price ", WeaponType::Ar, 9).normalized();
        assert_eq!(np.name, "Price");
    }

    #[test]
    fn generated_ids_are_unique() {
        assert_ne!(PlayerId::generate(), PlayerId::generate());
    }
}
