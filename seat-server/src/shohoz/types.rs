//! Shohoz railway API request and response DTOs.
//!
//! These types map directly to the JSON the booking API sends. Nearly every
//! field is optional: the API omits fields, sends `null`, or wraps an empty
//! `data` object when a train or leg is unknown.

use serde::{Deserialize, Serialize};

/// Every Shohoz response wraps its payload in a `data` field.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiEnvelope<T> {
    pub data: Option<T>,
}

/// Body of `POST /v1.0/web/train-routes`.
#[derive(Debug, Clone, Serialize)]
pub struct TrainRoutesRequest<'a> {
    /// Train number, e.g. "798".
    pub model: &'a str,

    /// Journey start date as `YYYY-MM-DD`.
    pub departure_date_time: String,
}

/// Payload of the train-routes response.
#[derive(Debug, Clone, Deserialize)]
pub struct TrainRoutesData {
    pub train_name: Option<String>,
    pub routes: Option<Vec<RouteStopDto>>,
}

/// One stop on a train's route.
#[derive(Debug, Clone, Deserialize)]
pub struct RouteStopDto {
    pub city: String,

    /// e.g. "11:50 pm BST". Absent at the terminus.
    pub departure_time: Option<String>,

    /// Absent at the origin.
    pub arrival_time: Option<String>,
}

/// Payload of the search-trips response.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchTripsData {
    pub trains: Option<Vec<TripTrainDto>>,
}

/// A train running between the searched stations.
#[derive(Debug, Clone, Deserialize)]
pub struct TripTrainDto {
    /// Sent as a string, occasionally as a bare number.
    pub train_model: Option<NumberOrString>,

    pub trip_number: Option<String>,

    pub seat_types: Option<Vec<SeatTypeDto>>,
}

/// Availability of one seat class.
#[derive(Debug, Clone, Deserialize)]
pub struct SeatTypeDto {
    #[serde(rename = "type")]
    pub seat_type: String,

    pub seat_counts: Option<SeatCountsDto>,

    pub fare: Option<NumberOrString>,

    pub vat_amount: Option<NumberOrString>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SeatCountsDto {
    #[serde(default)]
    pub online: u32,
    #[serde(default)]
    pub offline: u32,
}

/// A JSON value the API sends either as a number or as a numeric string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum NumberOrString {
    Number(serde_json::Number),
    String(String),
}

impl NumberOrString {
    /// The value as text, numbers rendered as JSON would.
    pub fn as_text(&self) -> String {
        match self {
            NumberOrString::Number(n) => n.to_string(),
            NumberOrString::String(s) => s.trim().to_string(),
        }
    }

    /// Parse the value as a float; `None` for non-numeric strings.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            NumberOrString::Number(n) => n.as_f64(),
            NumberOrString::String(s) => s.trim().parse().ok(),
        }
    }
}
