use std::path::{Path, PathBuf};

use squadsplit_core::player::{NewPlayer, Player, PlayerError, PlayerId};
use squadsplit_core::roster::{MemoryRoster, PlayerRepository};

use crate::config::RosterConfig;

/// Errors from roster mutations.
#[derive(Debug)]
pub enum StoreError {
    Player(PlayerError),
    /// The roster already holds the configured maximum.
    Full(usize),
    /// The change was applied in memory but the snapshot could not be written.
    Persist(String),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Player(e) => write!(f, "{e}"),
            Self::Full(max) => write!(f, "roster is full ({max} players)"),
            Self::Persist(e) => write!(f, "failed to save roster: {e}"),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<PlayerError> for StoreError {
    fn from(e: PlayerError) -> Self {
        Self::Player(e)
    }
}

/// In-memory roster with an optional JSON snapshot on disk.
pub struct RosterStore {
    roster: MemoryRoster,
    data_file: Option<PathBuf>,
    max_players: usize,
}

impl RosterStore {
    /// In-memory store with no snapshot file.
    pub fn new(max_players: usize) -> Self {
        Self {
            roster: MemoryRoster::new(),
            data_file: None,
            max_players,
        }
    }

    /// Open the store described by `config`, restoring the snapshot if one
    /// exists.
    ///
    /// A snapshot that cannot be read or parsed is left untouched on disk and
    /// the store runs in memory only, so a bad file is never overwritten.
    pub fn open(config: &RosterConfig) -> Self {
        let Some(path) = config.data_file.as_deref().map(PathBuf::from) else {
            return Self::new(config.max_players);
        };

        match load_snapshot(&path) {
            Ok(players) => {
                tracing::info!(
                    path = %path.display(),
                    players = players.len(),
                    "Loaded roster snapshot"
                );
                Self {
                    roster: MemoryRoster::from_players(players),
                    data_file: Some(path),
                    max_players: config.max_players,
                }
            },
            Err(e) => {
                tracing::error!(
                    path = %path.display(),
                    error = %e,
                    "Failed to load roster snapshot, running without persistence"
                );
                Self::new(config.max_players)
            },
        }
    }

    pub fn players(&self) -> &[Player] {
        self.roster.players()
    }

    pub fn len(&self) -> usize {
        self.roster.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roster.is_empty()
    }

    pub fn is_persistent(&self) -> bool {
        self.data_file.is_some()
    }

    pub fn search(&self, query: &str) -> Vec<Player> {
        self.roster.search(query)
    }

    pub fn get(&self, id: &PlayerId) -> Option<Player> {
        self.roster.get(id)
    }

    pub fn create(&mut self, player: NewPlayer) -> Result<Player, StoreError> {
        if self.roster.len() >= self.max_players {
            return Err(StoreError::Full(self.max_players));
        }
        let created = self.roster.create(player)?;
        self.persist()?;
        Ok(created)
    }

    pub fn update(&mut self, id: &PlayerId, player: NewPlayer) -> Result<Player, StoreError> {
        let updated = self.roster.update(id, player)?;
        self.persist()?;
        Ok(updated)
    }

    pub fn delete(&mut self, id: &PlayerId) -> Result<Player, StoreError> {
        let removed = self.roster.delete(id)?;
        self.persist()?;
        Ok(removed)
    }

    fn persist(&self) -> Result<(), StoreError> {
        let Some(path) = &self.data_file else {
            return Ok(());
        };
        let json = serde_json::to_string_pretty(self.roster.players())
            .map_err(|e| StoreError::Persist(e.to_string()))?;
        std::fs::write(path, json).map_err(|e| {
            tracing::error!(path = %path.display(), error = %e, "Failed to write roster snapshot");
            StoreError::Persist(e.to_string())
        })
    }
}

/// Read a snapshot; a missing file is an empty roster.
fn load_snapshot(path: &Path) -> Result<Vec<Player>, String> {
    match std::fs::read_to_string(path) {
        Ok(content) if content.trim().is_empty() => Ok(Vec::new()),
        Ok(content) => serde_json::from_str(&content).map_err(|e| e.to_string()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
        Err(e) => Err(e.to_string()),
    }
}
