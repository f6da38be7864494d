//! Pairwise seat-availability aggregation.
//!
//! The booking service only answers point-to-point questions, so the matrix
//! is built by asking about every forward station pair of the route: n(n-1)/2
//! queries for n stations. Each query uses the date the train leaves its
//! origin, which differs from the journey date once the train has crossed
//! midnight.

use std::time::Duration;

use chrono::NaiveDate;
use futures::stream::{self, StreamExt};
use tracing::{debug, info};

use crate::domain::{
    AvailabilityMatrix, LegResult, Route, SeatTable, StationDates, TrainSchedule,
    infer_station_dates,
};

use super::config::MatrixConfig;
use super::error::MatrixError;
use super::provider::{ScheduleProvider, SeatProvider, SeatQuery};

/// Date format the booking service uses for journeys, e.g. `04-Jun-2025`.
pub const JOURNEY_DATE_FORMAT: &str = "%d-%b-%Y";

/// A train and the date its journey starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Journey {
    pub train_model: String,
    pub date: NaiveDate,
}

impl Journey {
    pub fn new(train_model: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            train_model: train_model.into(),
            date,
        }
    }

    /// The date as the booking service labels it, e.g. `04-Jun-2025`.
    pub fn date_label(&self) -> String {
        self.date.format(JOURNEY_DATE_FORMAT).to_string()
    }
}

/// Fetch the schedule, date every station and aggregate all legs.
///
/// Fails only when the schedule is unusable; individual legs degrade to
/// empty availability instead.
pub async fn build_matrix<S, P>(
    schedules: &S,
    seats: &P,
    journey: &Journey,
    config: &MatrixConfig,
) -> Result<AvailabilityMatrix, MatrixError>
where
    S: ScheduleProvider,
    P: SeatProvider,
{
    let TrainSchedule { train_name, stops } = schedules
        .fetch_schedule(&journey.train_model, journey.date)
        .await?
        .filter(|s| !s.train_name.trim().is_empty() && !s.stops.is_empty())
        .ok_or_else(|| MatrixError::NoRoute {
            train_model: journey.train_model.clone(),
            date: journey.date,
        })?;

    let route = Route::new(stops)?;
    let dates = infer_station_dates(&route, journey.date, &config.inference)?;

    debug!(
        train = %journey.train_model,
        stations = route.len(),
        "Inferred station dates"
    );

    Ok(aggregate(seats, journey, &train_name, &route, dates, config).await)
}

/// Query every forward pair of `route` and assemble the matrix.
///
/// At most `config.max_concurrent` queries are in flight. Legs are collected
/// in completion order.
pub async fn aggregate<P: SeatProvider>(
    provider: &P,
    journey: &Journey,
    train_name: &str,
    route: &Route,
    dates: StationDates,
    config: &MatrixConfig,
) -> AvailabilityMatrix {
    let queries: Vec<SeatQuery> = route
        .forward_pairs()
        .map(|(from, to)| SeatQuery {
            train_model: journey.train_model.clone(),
            from: from.to_string(),
            to: to.to_string(),
            date: dates.get(from).unwrap_or(journey.date),
            seat_class_hint: config.seat_class_hint.clone(),
        })
        .collect();

    let total = queries.len();
    let mut completed = stream::iter(queries)
        .map(|query| query_leg(provider, query, config.leg_timeout))
        .buffer_unordered(config.max_concurrent.max(1));

    let mut legs = Vec::with_capacity(total);
    while let Some(leg) = completed.next().await {
        legs.push(leg);
    }

    let stations = route.stations().into_iter().map(str::to_string).collect();
    let matrix = AvailabilityMatrix::new(train_name, journey.date_label(), stations, dates, legs);

    info!(
        train = %journey.train_model,
        legs = total,
        alerts = matrix.alerts.len(),
        "Built availability matrix"
    );

    matrix
}

/// Run one leg query, degrading every failure to an empty table.
async fn query_leg<P: SeatProvider>(provider: &P, query: SeatQuery, timeout: Duration) -> LegResult {
    let seats = match tokio::time::timeout(timeout, provider.fetch_seats(&query)).await {
        Ok(Ok(Some(report))) => SeatTable::from_reported(report),
        Ok(Ok(None)) => {
            debug!(
                from = %query.from,
                to = %query.to,
                date = %query.date,
                "Train not listed for leg, using empty"
            );
            SeatTable::new()
        }
        Ok(Err(e)) => {
            debug!(
                from = %query.from,
                to = %query.to,
                error = %e,
                "Failed to fetch seats, using empty"
            );
            SeatTable::new()
        }
        Err(_) => {
            debug!(
                from = %query.from,
                to = %query.to,
                timeout_ms = timeout.as_millis() as u64,
                "Seat query timed out, using empty"
            );
            SeatTable::new()
        }
    };

    LegResult {
        from: query.from,
        to: query.to,
        seats,
    }
}

#[cfg(test)]
#[path = "aggregate_tests.rs"]
mod aggregate_tests;
