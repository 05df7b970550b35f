use std::sync::Arc;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use expert_todo_api::client::{FixedWeather, WeatherClient, WeatherProvider};
use expert_todo_api::config;
use expert_todo_api::database::{DatabaseManager, PgStore};
use expert_todo_api::routes::app;
use expert_todo_api::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = config::config();
    info!("Starting Expert Todo API in {:?} mode", config.environment);

    // Lazy pool: the server comes up without a database and /health reports 503
    let db = DatabaseManager::connect_lazy(&config.database)?;
    if config.database.run_migrations {
        if let Err(e) = db.migrate().await {
            warn!("Skipping migrations, database not ready: {}", e);
        }
    }

    let weather: Arc<dyn WeatherProvider> = match &config.weather.fixed {
        Some(fixed) => {
            info!("Using fixed weather {:?}", fixed);
            Arc::new(FixedWeather::new(fixed.clone()))
        }
        None => Arc::new(WeatherClient::new(&config.weather)?),
    };

    let store = Arc::new(PgStore::new(db.pool().clone()));
    let db = Arc::new(db);
    let state = AppState::new(store.clone(), store.clone(), store.clone(), store, db.clone(), weather);

    let bind_addr = format!("0.0.0.0:{}", config.api.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!("Expert Todo API listening on http://{}", bind_addr);

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db.close().await;
    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
    }
}
