//! Domain types for the seat-availability matrix.
//!
//! This module contains the validated model: routes, the dates inferred for
//! each stop, seat classes and the matrix built from per-leg queries. Types
//! enforce their invariants at construction time, so code that receives them
//! can trust their validity.

mod error;
mod matrix;
mod route;
mod seat;
mod time;

pub use error::DomainError;
pub use matrix::{AvailabilityMatrix, CapacityFlags, LegResult, SeatAlert, extract_alerts};
pub use route::{Route, Stop, TrainSchedule};
pub use seat::{BERTH_FARE_SURCHARGE, SeatAvailability, SeatTable, SeatType, UnknownSeatType};
pub use time::{
    DEFAULT_ROLLOVER_THRESHOLD_HOURS, DEFAULT_TIMEZONE_MARKER, DateInferenceConfig,
    InferenceError, StationDate, StationDates, TimeError, infer_station_dates,
    parse_meridiem_time,
};
