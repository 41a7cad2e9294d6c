use std::net::SocketAddr;
use std::time::Duration;

use serde_json::{Value, json};

use squadsplit_server::build_app;
use squadsplit_server::config::ServerConfig;

pub struct TestServer {
    pub addr: SocketAddr,
    pub client: reqwest::Client,
    _shutdown: tokio::task::JoinHandle<()>,
}

impl TestServer {
    /// Start a test server with an in-memory roster.
    pub async fn new() -> Self {
        Self::from_config(ServerConfig::default()).await
    }

    pub async fn from_config(config: ServerConfig) -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let (app, _state) = build_app(config);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        // Give the server a moment to start accepting
        tokio::time::sleep(Duration::from_millis(20)).await;

        Self {
            addr,
            client: reqwest::Client::new(),
            _shutdown: handle,
        }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn api(&self, path: &str) -> String {
        format!("http://{}/api/v1{path}", self.addr)
    }

    /// Register a player and return its assigned id.
    pub async fn register(&self, name: &str, weapon: &str, skill: u8) -> String {
        let resp = self
            .client
            .post(self.api("/players"))
            .json(&json!({ "name": name, "weaponType": weapon, "skillLevel": skill }))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 201);
        let body: Value = resp.json().await.unwrap();
        body["id"].as_str().unwrap().to_string()
    }

    pub async fn toggle(&self, id: &str) -> Value {
        let resp = self
            .client
            .post(self.api(&format!("/selection/{id}")))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 200);
        resp.json().await.unwrap()
    }

    /// Register eight players rated 10 down to 3, alternating AR/SMG, and
    /// select all of them. Returns ids in registration order.
    pub async fn seed_match(&self) -> Vec<String> {
        let mut ids = Vec::new();
        for i in 0..8u8 {
            let weapon = if i % 2 == 0 { "AR" } else { "SMG" };
            let id = self
                .register(&format!("Player{}", i + 1), weapon, 10 - i)
                .await;
            self.toggle(&id).await;
            ids.push(id);
        }
        ids
    }

    pub async fn post_json(&self, path: &str, body: Value) -> reqwest::Response {
        self.client
            .post(self.api(path))
            .json(&body)
            .send()
            .await
            .unwrap()
    }
}

/// Member ids of a serialized team.
pub fn member_ids(team: &Value) -> Vec<String> {
    team["players"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_str().unwrap().to_string())
        .collect()
}

/// Player JSON for the stateless endpoints.
pub fn player_json(id: &str, weapon: &str, skill: u8) -> Value {
    json!({ "id": id, "name": id, "weaponType": weapon, "skillLevel": skill })
}
