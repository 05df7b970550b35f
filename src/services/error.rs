use thiserror::Error;

use crate::auth::{JwtError, PasswordError};
use crate::client::WeatherError;
use crate::database::DatabaseError;
use crate::filter::FilterError;

/// Failures surfaced by the service layer.
///
/// Rule violations carry a client-facing message; infrastructure failures
/// wrap their source and are reported to clients generically.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    InvalidRequest(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    NotFound(String),
    #[error(transparent)]
    Filter(#[from] FilterError),
    #[error(transparent)]
    Database(#[from] DatabaseError),
    #[error(transparent)]
    Weather(#[from] WeatherError),
    #[error(transparent)]
    Jwt(#[from] JwtError),
    #[error(transparent)]
    Password(#[from] PasswordError),
}

impl ServiceError {
    pub fn invalid(message: impl Into<String>) -> Self {
        ServiceError::InvalidRequest(message.into())
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;
