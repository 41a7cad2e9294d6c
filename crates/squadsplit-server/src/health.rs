use axum::Json;
use axum::extract::State;
use serde::Serialize;

use crate::state::AppState;

/// Structured health check response.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub roster: RosterInfo,
    pub session: SessionInfo,
}

#[derive(Serialize)]
pub struct RosterInfo {
    pub players: usize,
    pub selected: usize,
    pub persistent: bool,
}

#[derive(Serialize)]
pub struct SessionInfo {
    pub teams_formed: bool,
    pub pending_pick: bool,
}

/// Structured health check endpoint. Returns server status, roster size,
/// selection size and session state as JSON.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let roster = {
        let roster = state.roster.read().await;
        let selection = state.selection.read().await;
        RosterInfo {
            players: roster.len(),
            selected: selection.len(),
            persistent: roster.is_persistent(),
        }
    };
    let session = {
        let session = state.session.read().await;
        SessionInfo {
            teams_formed: session.teams().is_some(),
            pending_pick: session.pending().is_some(),
        }
    };

    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        roster,
        session,
    })
}

/// Readiness check.
pub async fn readiness_check(State(state): State<AppState>) -> &'static str {
    // A configured snapshot that failed to load leaves the store in memory only
    if state.config.roster.data_file.is_some() && !state.roster.read().await.is_persistent() {
        return "not ready: roster snapshot unavailable";
    }
    "ready"
}
