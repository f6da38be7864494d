//! Seat-availability matrix building.
//!
//! This module implements the core of the service: given a train and a
//! journey date it fetches the schedule, infers the date at which every
//! station is reached, and queries seat availability for every forward
//! station pair concurrently.
//!
//! The schedule and seat services are reached through the
//! [`ScheduleProvider`] and [`SeatProvider`] traits so the aggregation can be
//! tested without network access.

mod aggregate;
mod config;
mod error;
mod provider;

pub use aggregate::{JOURNEY_DATE_FORMAT, Journey, aggregate, build_matrix};
pub use config::{DEFAULT_MAX_CONCURRENT, DEFAULT_SEAT_CLASS_HINT, MatrixConfig};
pub use error::MatrixError;
pub use provider::{ProviderError, ScheduleProvider, SeatProvider, SeatQuery, SeatReport};
