#![allow(dead_code)]

use std::process::{Child, Command, Stdio};
use std::sync::OnceLock;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::StatusCode;
use serde_json::{json, Value};

static SERVER: OnceLock<TestServer> = OnceLock::new();

pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    child: Child,
}

impl TestServer {
    fn spawn() -> Result<Self> {
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        // Weather is pinned so todo creation never reaches the network
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_expert-todo-api"));
        cmd.env("EXPERT_API_PORT", port.to_string())
            .env("DATABASE_CONNECTION_TIMEOUT", "2")
            .env("WEATHER_FIXED", "Sunny")
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        let child = cmd.spawn().context("failed to spawn server binary")?;

        Ok(Self { port, base_url, child })
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let client = reqwest::Client::new();
        let deadline = Instant::now() + timeout;
        let url = format!("{}/health", self.base_url);
        while Instant::now() < deadline {
            if let Ok(resp) = client.get(&url).send().await {
                // 503 still means the listener is up; only the database is missing
                if resp.status() == StatusCode::OK || resp.status() == StatusCode::SERVICE_UNAVAILABLE {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(150)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

pub async fn ensure_server() -> Result<&'static TestServer> {
    let server = SERVER.get_or_init(|| TestServer::spawn().expect("failed to spawn server binary"));
    server.wait_ready(Duration::from_secs(30)).await?;
    Ok(server)
}

/// Database-backed flows only run when DATABASE_URL points at a live Postgres
pub fn has_database() -> bool {
    std::env::var("DATABASE_URL").map(|url| !url.is_empty()).unwrap_or(false)
}

/// Signs up a fresh user and returns (email, bearer token)
pub async fn signup_fresh_user(server: &TestServer, nickname: &str) -> Result<(String, String)> {
    let email = format!("{}-{}@example.com", nickname, uuid::Uuid::new_v4().simple());
    let res = reqwest::Client::new()
        .post(server.url("/auth/signup"))
        .json(&json!({"email": email, "password": "secret-pass1", "nickname": nickname}))
        .send()
        .await?;
    anyhow::ensure!(res.status() == StatusCode::CREATED, "signup failed: {}", res.status());

    let body: Value = res.json().await?;
    let token = body["data"]["bearer_token"]
        .as_str()
        .context("signup response missing bearer_token")?
        .to_string();
    Ok((email, token))
}
