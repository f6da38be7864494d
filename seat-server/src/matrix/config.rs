//! Configuration for building an availability matrix.

use std::time::Duration;

use crate::domain::DateInferenceConfig;

/// Default number of leg queries in flight at once.
pub const DEFAULT_MAX_CONCURRENT: usize = 10;

/// Seat class sent with every search; the provider answers for all classes.
pub const DEFAULT_SEAT_CLASS_HINT: &str = "SHULOV";

/// Configuration parameters for matrix building.
#[derive(Debug, Clone)]
pub struct MatrixConfig {
    /// Maximum number of leg queries in flight.
    pub max_concurrent: usize,

    /// How long a single leg query may take before it counts as no data.
    pub leg_timeout: Duration,

    /// Seat class passed to the seat search.
    pub seat_class_hint: String,

    /// Date inference parameters.
    pub inference: DateInferenceConfig,
}

impl MatrixConfig {
    /// Set the number of concurrent leg queries.
    pub fn with_max_concurrent(mut self, n: usize) -> Self {
        self.max_concurrent = n;
        self
    }

    /// Set the per-leg timeout.
    pub fn with_leg_timeout(mut self, timeout: Duration) -> Self {
        self.leg_timeout = timeout;
        self
    }

    /// Set the seat class hint.
    pub fn with_seat_class_hint(mut self, hint: impl Into<String>) -> Self {
        self.seat_class_hint = hint.into();
        self
    }

    /// Set the date inference parameters.
    pub fn with_inference(mut self, inference: DateInferenceConfig) -> Self {
        self.inference = inference;
        self
    }
}

impl Default for MatrixConfig {
    fn default() -> Self {
        Self {
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            leg_timeout: Duration::from_secs(30),
            seat_class_hint: DEFAULT_SEAT_CLASS_HINT.to_string(),
            inference: DateInferenceConfig::default(),
        }
    }
}
