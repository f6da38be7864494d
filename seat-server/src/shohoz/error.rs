//! Shohoz client error types.

use std::fmt;

use crate::matrix::ProviderError;

use super::convert::ConversionError;

/// Errors from the Shohoz HTTP client.
#[derive(Debug)]
pub enum ShohozError {
    /// HTTP request failed (network error, timeout, etc.)
    Http(reqwest::Error),

    /// JSON deserialization failed
    Json {
        message: String,
        body: Option<String>,
    },

    /// API returned an error status code
    ApiError { status: u16, message: String },

    /// Rate limited by the API
    RateLimited,

    /// Response could not be converted to domain types
    Conversion(ConversionError),

    /// Offline fixture could not be loaded
    Fixture(String),
}

impl fmt::Display for ShohozError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShohozError::Http(e) => write!(f, "HTTP error: {e}"),
            ShohozError::Json { message, body } => {
                write!(f, "JSON parse error: {message}")?;
                if let Some(body) = body {
                    write!(f, " (body: {body})")?;
                }
                Ok(())
            }
            ShohozError::ApiError { status, message } => {
                write!(f, "API error {status}: {message}")
            }
            ShohozError::RateLimited => write!(f, "rate limited by Shohoz API"),
            ShohozError::Conversion(e) => write!(f, "conversion error: {e}"),
            ShohozError::Fixture(msg) => write!(f, "fixture error: {msg}"),
        }
    }
}

impl std::error::Error for ShohozError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ShohozError::Http(e) => Some(e),
            ShohozError::Conversion(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ShohozError {
    fn from(err: reqwest::Error) -> Self {
        ShohozError::Http(err)
    }
}

impl From<ConversionError> for ShohozError {
    fn from(err: ConversionError) -> Self {
        ShohozError::Conversion(err)
    }
}

impl From<ShohozError> for ProviderError {
    fn from(err: ShohozError) -> Self {
        ProviderError::new(err.to_string())
    }
}
