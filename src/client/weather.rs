use std::time::Duration;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use thiserror::Error;

use crate::config::WeatherConfig;

#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("Weather request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Weather service returned no data")]
    Empty,
    #[error("No weather entry for {0}")]
    NoMatch(String),
}

/// Source of the weather tag stamped on new todos
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    async fn today(&self) -> Result<String, WeatherError>;
}

/// One entry of the forecast feed, keyed by `MM-dd`
#[derive(Debug, Clone, Deserialize)]
pub struct WeatherEntry {
    pub date: String,
    pub weather: String,
}

pub struct WeatherClient {
    http: reqwest::Client,
    url: String,
}

impl WeatherClient {
    pub fn new(config: &WeatherConfig) -> Result<Self, WeatherError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            http,
            url: config.api_url.clone(),
        })
    }

    async fn fetch(&self) -> Result<Vec<WeatherEntry>, WeatherError> {
        let entries = self
            .http
            .get(&self.url)
            .send()
            .await?
            .error_for_status()?
            .json::<Vec<WeatherEntry>>()
            .await?;
        Ok(entries)
    }
}

/// Picks the entry for `date`
pub fn weather_for(entries: &[WeatherEntry], date: NaiveDate) -> Result<String, WeatherError> {
    if entries.is_empty() {
        return Err(WeatherError::Empty);
    }
    let key = date.format("%m-%d").to_string();
    entries
        .iter()
        .find(|entry| entry.date == key)
        .map(|entry| entry.weather.clone())
        .ok_or(WeatherError::NoMatch(key))
}

#[async_trait]
impl WeatherProvider for WeatherClient {
    async fn today(&self) -> Result<String, WeatherError> {
        let entries = self.fetch().await?;
        let weather = weather_for(&entries, Utc::now().date_naive())?;
        tracing::debug!("Today's weather from {}: {}", self.url, weather);
        Ok(weather)
    }
}

/// Always answers the same weather
#[derive(Debug, Clone)]
pub struct FixedWeather(String);

impl FixedWeather {
    pub fn new(weather: impl Into<String>) -> Self {
        Self(weather.into())
    }
}

#[async_trait]
impl WeatherProvider for FixedWeather {
    async fn today(&self) -> Result<String, WeatherError> {
        Ok(self.0.clone())
    }
}
