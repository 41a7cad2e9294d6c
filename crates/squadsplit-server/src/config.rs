use serde::Deserialize;

use squadsplit_core::partition::PartitionMode;

/// Top-level server configuration, loaded from `squadsplit.toml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub listen_addr: String,
    pub web_root: String,
    pub roster: RosterConfig,
    pub teams: TeamsConfig,
    pub limits: LimitsConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8080".to_string(),
            web_root: "web".to_string(),
            roster: RosterConfig::default(),
            teams: TeamsConfig::default(),
            limits: LimitsConfig::default(),
        }
    }
}

/// Where and how many players are kept.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RosterConfig {
    /// JSON snapshot of the roster, rewritten after every change.
    /// None = in-memory only.
    pub data_file: Option<String>,
    pub max_players: usize,
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            data_file: None,
            max_players: 200,
        }
    }
}

/// Team generation settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TeamsConfig {
    pub mode: PartitionMode,
}

/// Request handling limits.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    pub request_timeout_secs: u64,
    /// Largest player list accepted by the stateless endpoints.
    pub max_partition_players: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: 10,
            max_partition_players: 64,
        }
    }
}

impl ServerConfig {
    /// Validate configuration, logging warnings for issues.
    pub fn validate(&self) {
        if self.listen_addr.parse::<std::net::SocketAddr>().is_err() {
            tracing::error!(
                addr = %self.listen_addr,
                "listen_addr is not a valid socket address"
            );
            std::process::exit(1);
        }

        if self.roster.data_file.is_none() {
            tracing::warn!("roster.data_file is not set, players will be lost on restart");
        }

        if self.roster.max_players == 0 {
            tracing::error!("roster.max_players must be > 0");
            std::process::exit(1);
        }
        if self.limits.request_timeout_secs == 0 {
            tracing::error!("limits.request_timeout_secs must be > 0");
            std::process::exit(1);
        }
        if self.limits.max_partition_players == 0 {
            tracing::error!("limits.max_partition_players must be > 0");
            std::process::exit(1);
        }
    }

    /// Load config from `squadsplit.toml` if it exists, then apply env var overrides.
    pub fn load() -> Self {
        let mut config = match std::fs::read_to_string("squadsplit.toml") {
            Ok(content) => match toml::from_str::<ServerConfig>(&content) {
                Ok(cfg) => {
                    tracing::info!("Loaded configuration from squadsplit.toml");
                    cfg
                },
                Err(e) => {
                    tracing::warn!("Failed to parse squadsplit.toml: {e}, using defaults");
                    ServerConfig::default()
                },
            },
            Err(_) => {
                tracing::info!("No squadsplit.toml found, using defaults");
                ServerConfig::default()
            },
        };

        config.apply_env_overrides();
        config
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(addr) = std::env::var("SQUADSPLIT_LISTEN_ADDR")
            && !addr.is_empty()
        {
            self.listen_addr = addr;
        }
        if let Ok(root) = std::env::var("SQUADSPLIT_WEB_ROOT")
            && !root.is_empty()
        {
            self.web_root = root;
        }
        if let Ok(path) = std::env::var("SQUADSPLIT_DATA_FILE")
            && !path.is_empty()
        {
            self.roster.data_file = Some(path);
        }
        if let Ok(val) = std::env::var("SQUADSPLIT_MAX_PLAYERS")
            && let Ok(n) = val.parse::<usize>()
        {
            self.roster.max_players = n;
        }
        if let Ok(val) = std::env::var("SQUADSPLIT_TEAM_MODE") {
            match val.parse::<PartitionMode>() {
                Ok(mode) => self.teams.mode = mode,
                Err(e) => tracing::warn!("Ignoring SQUADSPLIT_TEAM_MODE: {e}"),
            }
        }
    }
}
