//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::AvailabilityMatrix;

/// Optional overrides for `/check`.
#[derive(Debug, Default, Deserialize)]
pub struct CheckParams {
    /// Train number, e.g. "798"
    pub train: Option<String>,

    /// Journey date as `YYYY-MM-DD`
    pub date: Option<String>,
}

/// Successful `/check` response.
#[derive(Debug, Serialize)]
pub struct CheckResponse {
    pub status: &'static str,
    pub data: AvailabilityMatrix,
}

impl CheckResponse {
    pub fn success(data: AvailabilityMatrix) -> Self {
        Self {
            status: "success",
            data,
        }
    }
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub status: &'static str,

    /// Error message
    pub message: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            status: "error",
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_response_shape() {
        let json = serde_json::to_value(ErrorResponse::new("No information found")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"status": "error", "message": "No information found"})
        );
    }

    #[test]
    fn check_params_optional() {
        let params: CheckParams = serde_json::from_str("{}").unwrap();
        assert!(params.train.is_none());
        assert!(params.date.is_none());
    }
}
