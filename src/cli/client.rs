use std::time::Duration;

use reqwest::{Method, RequestBuilder, StatusCode};
use serde::Serialize;
use serde_json::Value;

use super::config::EnvironmentConfig;

/// Thin JSON client for the API; unwraps the `{success, data}` envelope
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: &str, token: Option<String>) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder().timeout(Duration::from_secs(30)).build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        })
    }

    pub fn from_env(env: &EnvironmentConfig) -> anyhow::Result<Self> {
        Self::new(&env.server_url, env.token.clone())
    }

    /// Fails early when no token is stored
    pub fn authenticated(env: &EnvironmentConfig) -> anyhow::Result<Self> {
        if env.token.is_none() {
            anyhow::bail!("Not signed in. Run `expert auth signin <email>` first");
        }
        Self::from_env(env)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.http.request(method, format!("{}{}", self.base_url, path));
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    pub async fn get(&self, path: &str) -> anyhow::Result<Value> {
        self.send(self.request(Method::GET, path)).await
    }

    pub async fn get_query<Q: Serialize + ?Sized>(&self, path: &str, query: &Q) -> anyhow::Result<Value> {
        self.send(self.request(Method::GET, path).query(query)).await
    }

    pub async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> anyhow::Result<Value> {
        self.send(self.request(Method::POST, path).json(body)).await
    }

    pub async fn delete(&self, path: &str) -> anyhow::Result<Value> {
        self.send(self.request(Method::DELETE, path)).await
    }

    async fn send(&self, builder: RequestBuilder) -> anyhow::Result<Value> {
        let response = builder.send().await?;
        let status = response.status();
        if status == StatusCode::NO_CONTENT {
            return Ok(Value::Null);
        }

        let body: Value = response.json().await?;
        unwrap_envelope(status, body)
    }
}

fn unwrap_envelope(status: StatusCode, body: Value) -> anyhow::Result<Value> {
    if status.is_success() && body["success"].as_bool().unwrap_or(false) {
        return Ok(body.get("data").cloned().unwrap_or(Value::Null));
    }

    let message = body["error"].as_str().unwrap_or("request failed");
    match body["code"].as_str() {
        Some(code) => anyhow::bail!("{} ({}, HTTP {})", message, code, status.as_u16()),
        None => anyhow::bail!("{} (HTTP {})", message, status.as_u16()),
    }
}
