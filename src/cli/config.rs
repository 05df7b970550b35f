use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const DEFAULT_SERVER_URL: &str = "http://localhost:3000";

/// CLI session persisted as `env.json` in the config directory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentConfig {
    pub server_url: String,
    pub token: Option<String>,
    pub email: Option<String>,
    pub signed_in_at: Option<DateTime<Utc>>,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            token: None,
            email: None,
            signed_in_at: None,
        }
    }
}

impl EnvironmentConfig {
    pub fn sign_in(&mut self, email: &str, token: String) {
        self.email = Some(email.to_string());
        self.token = Some(token);
        self.signed_in_at = Some(Utc::now());
    }

    pub fn sign_out(&mut self) {
        self.email = None;
        self.token = None;
        self.signed_in_at = None;
    }
}

/// `EXPERT_CLI_CONFIG_DIR`, else `~/.config/expert/cli`
pub fn get_config_dir() -> anyhow::Result<PathBuf> {
    let config_dir = if let Ok(custom_dir) = std::env::var("EXPERT_CLI_CONFIG_DIR") {
        PathBuf::from(custom_dir)
    } else {
        let home = std::env::var("HOME").map_err(|_| anyhow::anyhow!("HOME environment variable not set"))?;
        PathBuf::from(home).join(".config").join("expert").join("cli")
    };

    if !config_dir.exists() {
        fs::create_dir_all(&config_dir)?;
    }

    Ok(config_dir)
}

pub fn load_environment_config() -> anyhow::Result<EnvironmentConfig> {
    load_environment_config_from(&get_config_dir()?)
}

pub fn save_environment_config(config: &EnvironmentConfig) -> anyhow::Result<()> {
    save_environment_config_to(&get_config_dir()?, config)
}

pub fn load_environment_config_from(dir: &Path) -> anyhow::Result<EnvironmentConfig> {
    let env_file = dir.join("env.json");

    if !env_file.exists() {
        return Ok(EnvironmentConfig::default());
    }

    let content = fs::read_to_string(env_file)?;
    let config: EnvironmentConfig = serde_json::from_str(&content)?;
    Ok(config)
}

pub fn save_environment_config_to(dir: &Path, config: &EnvironmentConfig) -> anyhow::Result<()> {
    let content = serde_json::to_string_pretty(config)?;
    fs::write(dir.join("env.json"), content)?;
    Ok(())
}
