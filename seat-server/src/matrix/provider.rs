//! Seams to the schedule and seat-availability services.

use std::future::Future;

use chrono::NaiveDate;

use crate::domain::{SeatAvailability, SeatType, TrainSchedule};

/// Error from a provider call.
///
/// Carries only a message: the matrix either aborts (schedule) or degrades
/// the leg (seats), so the cause is never inspected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ProviderError {
    pub message: String,
}

impl ProviderError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Seat classes reported by the provider for one leg, fares uncorrected.
pub type SeatReport = Vec<(SeatType, SeatAvailability)>;

/// One origin/destination availability query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeatQuery {
    pub train_model: String,
    pub from: String,
    pub to: String,
    /// Date the train leaves `from`.
    pub date: NaiveDate,
    pub seat_class_hint: String,
}

/// Source of train schedules.
pub trait ScheduleProvider {
    /// Fetch the schedule of `train_model` for a journey starting on `date`.
    ///
    /// Returns `Ok(None)` when the provider has no schedule for that train
    /// and date.
    fn fetch_schedule(
        &self,
        train_model: &str,
        date: NaiveDate,
    ) -> impl Future<Output = Result<Option<TrainSchedule>, ProviderError>> + Send;
}

/// Source of per-leg seat availability.
pub trait SeatProvider {
    /// Query availability for one leg.
    ///
    /// Returns `Ok(None)` when the provider does not list the requested
    /// train for that leg and date.
    fn fetch_seats(
        &self,
        query: &SeatQuery,
    ) -> impl Future<Output = Result<Option<SeatReport>, ProviderError>> + Send;
}
