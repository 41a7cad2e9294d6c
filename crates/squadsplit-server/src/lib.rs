pub mod api;
pub mod config;
pub mod error;
pub mod health;
pub mod roster_store;
pub mod state;
pub mod teams;

use std::time::Duration;

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::timeout::TimeoutLayer;

use config::ServerConfig;
use state::AppState;

/// Build the Axum router and application state from a config.
pub fn build_app(config: ServerConfig) -> (Router<()>, AppState) {
    let web_root = config.web_root.clone();
    let timeout = Duration::from_secs(config.limits.request_timeout_secs);
    let state = AppState::new(config);

    let api_routes = Router::new()
        .route("/players", get(api::list_players).post(api::create_player))
        .route(
            "/players/{player_id}",
            get(api::get_player)
                .put(api::update_player)
                .delete(api::delete_player),
        )
        .route(
            "/selection",
            get(api::get_selection).delete(api::clear_selection),
        )
        .route("/selection/{player_id}", post(api::toggle_selection))
        .route(
            "/session",
            get(teams::get_session).delete(teams::reset_session),
        )
        .route("/session/teams", post(teams::divide_teams))
        .route("/session/pick", post(teams::pick_player))
        .route("/session/swap", post(teams::swap_session_players))
        .route("/partition", post(teams::partition_players))
        .route("/swap", post(teams::swap_players));

    let app = Router::new()
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        .nest("/api/v1", api_routes)
        .fallback_service(ServeDir::new(&web_root))
        .layer(TimeoutLayer::new(timeout))
        .layer(CorsLayer::permissive())
        .with_state(state.clone());

    (app, state)
}
