use tracing_subscriber::EnvFilter;

use squadsplit_server::build_app;
use squadsplit_server::config::ServerConfig;

#[tokio::main]
async fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if std::env::var("SQUADSPLIT_LOG_JSON").is_ok_and(|v| v == "1" || v == "true") {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    let config = ServerConfig::load();
    config.validate();

    let addr = config.listen_addr.clone();
    let mode = config.teams.mode;
    let (app, state) = build_app(config);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .unwrap_or_else(|e| panic!("Failed to bind to {addr}: {e}"));

    tracing::info!(
        players = state.roster.read().await.len(),
        %mode,
        "SquadSplit server listening on {addr}"
    );

    axum::serve(listener, app).await.expect("Server error");
}
