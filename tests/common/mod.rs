#![allow(dead_code)]

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::StatusCode;
use serde_json::{json, Value};

use job_tracker_api::config::{AppConfig, StoreBackend};
use job_tracker_api::database::MemoryStore;
use job_tracker_api::state::AppState;

pub const TEST_SECRET: &str = "test-secret";

pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    pub client: reqwest::Client,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let deadline = Instant::now() + timeout;
        loop {
            if Instant::now() > deadline {
                break;
            }
            if let Ok(resp) = self.client.get(self.url("/health")).send().await {
                if resp.status() == StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }

    /// Register a fresh account and return its token
    pub async fn register(&self, name: &str, username: &str, password: &str) -> Result<String> {
        let res = self
            .client
            .post(self.url("/api/v1/auth/register"))
            .json(&json!({ "name": name, "username": username, "password": password }))
            .send()
            .await?;
        anyhow::ensure!(res.status() == StatusCode::CREATED, "register failed: {}", res.status());

        let body: Value = res.json().await?;
        body["token"]
            .as_str()
            .map(str::to_string)
            .context("register response has no token")
    }

    pub async fn create_job(&self, token: &str, body: Value) -> Result<Value> {
        let res = self
            .client
            .post(self.url("/api/v1/jobs"))
            .bearer_auth(token)
            .json(&body)
            .send()
            .await?;
        anyhow::ensure!(res.status() == StatusCode::CREATED, "create failed: {}", res.status());

        let body: Value = res.json().await?;
        Ok(body["job"].clone())
    }
}

/// Start the router on a free port, backed by a fresh in-memory store.
///
/// Each test gets its own server and data; the server task ends with the
/// test's runtime.
pub async fn spawn_server() -> Result<TestServer> {
    let mut config = AppConfig::development();
    config.database.backend = StoreBackend::Memory;
    config.api.enable_request_logging = false;
    config.security.jwt_secret = TEST_SECRET.to_string();
    config.security.bcrypt_cost = 4;

    let port = portpicker::pick_unused_port().context("failed to pick free port")?;
    config.api.port = port;

    let state = AppState::from_config(Arc::new(MemoryStore::new()), &config);
    let app = job_tracker_api::app(state, &config.api);

    let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
        .await
        .context("failed to bind test listener")?;
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    let server = TestServer {
        port,
        base_url: format!("http://127.0.0.1:{}", port),
        client: reqwest::Client::new(),
    };
    server.wait_ready(Duration::from_secs(5)).await?;
    Ok(server)
}

pub async fn message(res: reqwest::Response) -> Result<String> {
    let body: Value = res.json().await?;
    body["message"]
        .as_str()
        .map(str::to_string)
        .context("response body has no message")
}
