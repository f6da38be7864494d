//! Errors that abort matrix building.

use chrono::NaiveDate;

use crate::domain::{DomainError, InferenceError};

use super::provider::ProviderError;

/// Fatal input errors. Per-leg failures never surface here.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MatrixError {
    /// The schedule provider has no usable route for this train and date
    #[error(
        "No information found for train {train_model} on {date}. Please try another train or date."
    )]
    NoRoute {
        train_model: String,
        date: NaiveDate,
    },

    /// The route breaks a domain invariant
    #[error("invalid route: {0}")]
    InvalidRoute(#[from] DomainError),

    /// The schedule could not be fetched
    #[error("failed to fetch schedule: {0}")]
    Schedule(#[from] ProviderError),

    /// Station dates could not be inferred
    #[error("failed to infer station dates: {0}")]
    Inference(#[from] InferenceError),
}
