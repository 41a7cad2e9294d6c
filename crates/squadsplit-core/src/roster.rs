use crate::player::{NewPlayer, Player, PlayerError, PlayerId};

/// Create/read/update/delete access to registered players.
///
/// Implementations own identifier assignment and field validation; the
/// partitioning code only ever sees the `Player` values they hand out.
pub trait PlayerRepository {
    /// All players in registration order.
    fn list(&self) -> Vec<Player>;

    fn get(&self, id: &PlayerId) -> Option<Player>;

    /// Validate and store a new player under a freshly minted identifier.
    fn create(&mut self, player: NewPlayer) -> Result<Player, PlayerError>;

    /// Replace the editable fields of an existing player.
    fn update(&mut self, id: &PlayerId, player: NewPlayer) -> Result<Player, PlayerError>;

    /// Remove a player, returning what was stored.
    fn delete(&mut self, id: &PlayerId) -> Result<Player, PlayerError>;
}

/// Vec-backed roster that keeps players in the order they were registered.
#[derive(Debug, Clone, Default)]
pub struct MemoryRoster {
    players: Vec<Player>,
}

impl MemoryRoster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restore a roster from a previously saved player list.
    pub fn from_players(players: Vec<Player>) -> Self {
        Self { players }
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Players whose name contains `query`, ignoring case. A blank query
    /// matches everyone.
    pub fn search(&self, query: &str) -> Vec<Player> {
        let needle = query.trim().to_lowercase();
        self.players
            .iter()
            .filter(|p| needle.is_empty() || p.name.to_lowercase().contains(&needle))
            .cloned()
            .collect()
    }

    fn position(&self, id: &PlayerId) -> Result<usize, PlayerError> {
        self.players
            .iter()
            .position(|p| &p.id == id)
            .ok_or_else(|| PlayerError::NotFound(id.clone()))
    }
}

impl PlayerRepository for MemoryRoster {
    fn list(&self) -> Vec<Player> {
        self.players.clone()
    }

    fn get(&self, id: &PlayerId) -> Option<Player> {
        self.players.iter().find(|p| &p.id == id).cloned()
    }

    fn create(&mut self, player: NewPlayer) -> Result<Player, PlayerError> {
        player.validate()?;
        let player = player.normalized().into_player(PlayerId::generate());
        tracing::debug!(id = %player.id, name = %player.name, "Player registered");
        self.players.push(player.clone());
        Ok(player)
    }

    fn update(&mut self, id: &PlayerId, player: NewPlayer) -> Result<Player, PlayerError> {
        let index = self.position(id)?;
        player.validate()?;
        let player = player.normalized().into_player(id.clone());
        self.players[index] = player.clone();
        Ok(player)
    }

    fn delete(&mut self, id: &PlayerId) -> Result<Player, PlayerError> {
        let index = self.position(id)?;
        Ok(self.players.remove(index))
    }
}
