use std::sync::Arc;
use tokio::sync::RwLock;

use squadsplit_core::selection::Selection;
use squadsplit_core::session::SessionState;

use crate::config::ServerConfig;
use crate::roster_store::RosterStore;

pub type SharedRosterStore = Arc<RwLock<RosterStore>>;
pub type SharedSelection = Arc<RwLock<Selection>>;
pub type SharedSession = Arc<RwLock<SessionState>>;

/// Shared handler state.
///
/// Handlers that touch more than one lock take them in field order
/// (roster, selection, session).
#[derive(Clone)]
pub struct AppState {
    pub roster: SharedRosterStore,
    pub selection: SharedSelection,
    pub session: SharedSession,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Self {
        let roster = RosterStore::open(&config.roster);
        Self {
            roster: Arc::new(RwLock::new(roster)),
            selection: Arc::new(RwLock::new(Selection::new())),
            session: Arc::new(RwLock::new(SessionState::new())),
            config: Arc::new(config),
        }
    }
}
