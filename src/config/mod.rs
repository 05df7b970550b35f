use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;

/// Runtime settings: an environment preset picked by `APP_ENV`, then
/// individual variables layered on top.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub filter: FilterConfig,
    pub database: DatabaseConfig,
    pub api: ApiConfig,
    pub security: SecurityConfig,
    pub weather: WeatherConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

impl Environment {
    fn from_name(name: Option<&str>) -> Self {
        match name {
            Some("production") | Some("prod") => Environment::Production,
            Some("staging") | Some("stage") => Environment::Staging,
            _ => Environment::Development,
        }
    }
}

/// Paging limits for todo listings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterConfig {
    pub default_page_size: i64,
    pub max_page_size: i64,
    /// Log every generated statement with its parameters
    pub debug_logging: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Overrides the database name in the path of `DATABASE_URL`
    pub database_name: Option<String>,
    pub max_connections: u32,
    /// Seconds to wait for a pooled connection
    pub connection_timeout: u64,
    pub run_migrations: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub port: u16,
    pub enable_request_logging: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    /// Empty or containing `*` means any origin
    pub cors_origins: Vec<String>,
    pub enable_audit_logging: bool,
    pub jwt_secret: String,
    pub jwt_expiry_hours: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    pub api_url: String,
    /// When set, every new todo gets this weather and no request is made
    pub fixed: Option<String>,
    pub timeout_secs: u64,
}

const DEFAULT_WEATHER_API_URL: &str = "https://f-api.github.io/f-api/weather.json";

/// Replace `slot` when `name` is set and parses; malformed values keep the preset
fn env_override<T: FromStr>(slot: &mut T, name: &str) {
    if let Some(parsed) = env::var(name).ok().and_then(|v| v.trim().parse().ok()) {
        *slot = parsed;
    }
}

/// Empty string clears the value
fn env_override_optional(slot: &mut Option<String>, name: &str) {
    if let Ok(v) = env::var(name) {
        *slot = Some(v).filter(|s| !s.is_empty());
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let mut config = Self::preset(Environment::from_name(env::var("APP_ENV").ok().as_deref()));
        config.apply_env_overrides();
        config
    }

    pub fn preset(environment: Environment) -> Self {
        let base = Self::development();
        match environment {
            Environment::Development => base,
            Environment::Staging => Self {
                environment,
                filter: FilterConfig {
                    max_page_size: 500,
                    debug_logging: false,
                    ..base.filter
                },
                database: DatabaseConfig {
                    max_connections: 20,
                    connection_timeout: 10,
                    ..base.database
                },
                security: SecurityConfig {
                    cors_origins: vec!["https://staging.example.com".to_string()],
                    jwt_secret: String::new(),
                    jwt_expiry_hours: 24,
                    ..base.security
                },
                ..base
            },
            Environment::Production => Self {
                environment,
                filter: FilterConfig {
                    max_page_size: 100,
                    debug_logging: false,
                    ..base.filter
                },
                database: DatabaseConfig {
                    max_connections: 50,
                    connection_timeout: 5,
                    run_migrations: false,
                    ..base.database
                },
                api: ApiConfig {
                    port: 8080,
                    enable_request_logging: false,
                },
                security: SecurityConfig {
                    cors_origins: vec!["https://app.example.com".to_string()],
                    jwt_secret: String::new(),
                    jwt_expiry_hours: 4,
                    ..base.security
                },
                weather: WeatherConfig {
                    timeout_secs: 3,
                    ..base.weather
                },
            },
        }
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            filter: FilterConfig {
                default_page_size: 10,
                max_page_size: 1000,
                debug_logging: true,
            },
            database: DatabaseConfig {
                database_name: None,
                max_connections: 10,
                connection_timeout: 30,
                run_migrations: true,
            },
            api: ApiConfig {
                port: 3000,
                enable_request_logging: true,
            },
            security: SecurityConfig {
                cors_origins: vec!["http://localhost:3000".to_string(), "http://localhost:5173".to_string()],
                enable_audit_logging: true,
                // Staging and production must set JWT_SECRET
                jwt_secret: "expert-development-secret-change-me".to_string(),
                jwt_expiry_hours: 24 * 7,
            },
            weather: WeatherConfig {
                api_url: DEFAULT_WEATHER_API_URL.to_string(),
                fixed: None,
                timeout_secs: 5,
            },
        }
    }

    fn apply_env_overrides(&mut self) {
        env_override(&mut self.filter.default_page_size, "FILTER_DEFAULT_PAGE_SIZE");
        env_override(&mut self.filter.max_page_size, "FILTER_MAX_PAGE_SIZE");
        env_override(&mut self.filter.debug_logging, "FILTER_DEBUG_LOGGING");

        env_override_optional(&mut self.database.database_name, "DATABASE_NAME");
        env_override(&mut self.database.max_connections, "DATABASE_MAX_CONNECTIONS");
        env_override(&mut self.database.connection_timeout, "DATABASE_CONNECTION_TIMEOUT");
        env_override(&mut self.database.run_migrations, "DATABASE_RUN_MIGRATIONS");

        // EXPERT_API_PORT wins over the generic PORT
        env_override(&mut self.api.port, "PORT");
        env_override(&mut self.api.port, "EXPERT_API_PORT");
        env_override(&mut self.api.enable_request_logging, "API_ENABLE_REQUEST_LOGGING");

        if let Ok(v) = env::var("SECURITY_CORS_ORIGINS") {
            self.security.cors_origins = v
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }
        env_override(&mut self.security.enable_audit_logging, "SECURITY_ENABLE_AUDIT_LOGGING");
        env_override(&mut self.security.jwt_secret, "JWT_SECRET");
        env_override(&mut self.security.jwt_expiry_hours, "SECURITY_JWT_EXPIRY_HOURS");

        env_override(&mut self.weather.api_url, "WEATHER_API_URL");
        env_override_optional(&mut self.weather.fixed, "WEATHER_FIXED");
        env_override(&mut self.weather.timeout_secs, "WEATHER_TIMEOUT_SECS");
    }
}

// Read once, on first access
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

pub fn config() -> &'static AppConfig {
    &CONFIG
}

#[macro_export]
macro_rules! is_development {
    () => {
        matches!($crate::config::CONFIG.environment, $crate::config::Environment::Development)
    };
}
