//! Shohoz railway booking API client.
//!
//! This module provides an HTTP client for the Bangladesh Railway booking
//! site run by Shohoz, and an offline stand-in backed by a JSON fixture.
//!
//! Key characteristics of the API:
//! - Every response wraps its payload in `data`, which is `null` or missing
//!   when the train or leg is unknown
//! - Route times are local clock strings such as `"11:50 pm BST"`
//! - The route call takes `YYYY-MM-DD`, the seat search `DD-Mon-YYYY`
//! - The seat search lists every train on the leg with every seat class,
//!   whatever `seat_class` is sent

mod backend;
mod client;
mod convert;
mod error;
mod mock;
mod types;

pub use backend::ShohozBackend;
pub use client::{DEFAULT_BASE_URL, ShohozClient, ShohozConfig};
pub use convert::{ConversionError, convert_train_routes, convert_trips};
pub use error::ShohozError;
pub use mock::{Fixture, LegFixture, MockShohozClient};
pub use types::{
    ApiEnvelope, NumberOrString, RouteStopDto, SearchTripsData, SeatCountsDto, SeatTypeDto,
    TrainRoutesData, TrainRoutesRequest, TripTrainDto,
};
