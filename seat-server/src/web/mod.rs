//! Web layer for the seat availability checker.
//!
//! Provides a banner, a health check, and `/check`, which builds the
//! availability matrix and raises its alerts.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::{AppChecker, AppState};
