//! Conversion from Shohoz DTOs to domain types.

use tracing::trace;

use crate::domain::{SeatAvailability, SeatType, Stop, TrainSchedule};
use crate::matrix::SeatReport;

use super::types::{NumberOrString, SearchTripsData, SeatTypeDto, TrainRoutesData};

/// Error during DTO to domain conversion.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConversionError {
    /// A numeric field held something other than a number
    #[error("invalid number in {field}: {value}")]
    InvalidNumber { field: &'static str, value: String },
}

/// Convert a train-routes payload into an unvalidated schedule.
///
/// Each stop keeps its departure time, or its arrival time at the terminus.
/// Route validation happens later, in the matrix builder.
pub fn convert_train_routes(data: &TrainRoutesData) -> TrainSchedule {
    let stops = data
        .routes
        .as_deref()
        .unwrap_or(&[])
        .iter()
        .map(|stop| {
            Stop::new(
                stop.city.as_str(),
                stop.departure_time.as_deref(),
                stop.arrival_time.as_deref(),
            )
        })
        .collect();

    TrainSchedule {
        train_name: data.train_name.clone().unwrap_or_default(),
        stops,
    }
}

/// Pick `train_model` out of a search-trips payload and read its seats.
///
/// Returns `Ok(None)` when the train is not listed. Seat classes the
/// matrix does not track are skipped. Fares are returned as reported; the
/// berth surcharge is applied by the matrix.
pub fn convert_trips(
    data: &SearchTripsData,
    train_model: &str,
) -> Result<Option<SeatReport>, ConversionError> {
    let wanted = train_model.trim();
    let Some(train) = data.trains.as_deref().unwrap_or(&[]).iter().find(|t| {
        t.train_model
            .as_ref()
            .is_some_and(|model| model.as_text() == wanted)
    }) else {
        return Ok(None);
    };

    let mut report = Vec::new();
    for seat in train.seat_types.as_deref().unwrap_or(&[]) {
        let Ok(seat_type) = SeatType::parse(&seat.seat_type) else {
            trace!(seat_type = %seat.seat_type, "Skipping untracked seat class");
            continue;
        };
        report.push((seat_type, convert_seat(seat)?));
    }

    Ok(Some(report))
}

fn convert_seat(seat: &SeatTypeDto) -> Result<SeatAvailability, ConversionError> {
    let counts = seat.seat_counts.clone().unwrap_or_default();
    Ok(SeatAvailability {
        online: counts.online,
        offline: counts.offline,
        fare: parse_amount(seat.fare.as_ref(), "fare")?,
        vat_amount: parse_amount(seat.vat_amount.as_ref(), "vat_amount")?,
    })
}

/// A missing amount is zero; a present one must be numeric.
fn parse_amount(
    value: Option<&NumberOrString>,
    field: &'static str,
) -> Result<f64, ConversionError> {
    match value {
        None => Ok(0.0),
        Some(v) => v.as_f64().ok_or_else(|| ConversionError::InvalidNumber {
            field,
            value: v.as_text(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shohoz::types::ApiEnvelope;

    fn trips(json: &str) -> SearchTripsData {
        let envelope: ApiEnvelope<SearchTripsData> = serde_json::from_str(json).unwrap();
        envelope.data.unwrap()
    }

    #[test]
    fn routes_prefer_departure_time() {
        let data: TrainRoutesData = serde_json::from_str(
            r#"{
                "train_name": "PADMA EXPRESS",
                "routes": [
                    {"city": "Dhaka", "departure_time": "11:50 pm BST"},
                    {"city": "Natore", "departure_time": "04:05 am BST", "arrival_time": "04:00 am BST"},
                    {"city": "Rajshahi", "arrival_time": "05:45 am BST"}
                ]
            }"#,
        )
        .unwrap();

        let schedule = convert_train_routes(&data);
        assert_eq!(schedule.train_name, "PADMA EXPRESS");
        assert_eq!(schedule.stops.len(), 3);
        assert_eq!(schedule.stops[1].station, "Natore");
        assert_eq!(schedule.stops[1].raw_time.as_deref(), Some("04:05 am BST"));
        assert_eq!(schedule.stops[2].raw_time.as_deref(), Some("05:45 am BST"));
    }

    #[test]
    fn routes_without_fields_are_empty() {
        let data: TrainRoutesData = serde_json::from_str("{}").unwrap();
        let schedule = convert_train_routes(&data);
        assert!(schedule.train_name.is_empty());
        assert!(schedule.stops.is_empty());
    }

    #[test]
    fn trips_select_matching_train() {
        let data = trips(
            r#"{"data": {"trains": [
                {"train_model": "769", "seat_types": [
                    {"type": "SNIGDHA", "seat_counts": {"online": 9, "offline": 9}, "fare": "700", "vat_amount": "0"}
                ]},
                {"train_model": "798", "seat_types": [
                    {"type": "SNIGDHA", "seat_counts": {"online": 2, "offline": 0}, "fare": "505", "vat_amount": "25"},
                    {"type": "AC_B", "seat_counts": {"online": 1, "offline": 0}, "fare": 1200, "vat_amount": 60}
                ]}
            ]}}"#,
        );

        let report = convert_trips(&data, "798").unwrap().unwrap();
        assert_eq!(report.len(), 2);
        assert_eq!(report[0].0, SeatType::Snigdha);
        assert_eq!(report[0].1.online, 2);
        assert_eq!(report[0].1.fare, 505.0);
        assert_eq!(report[0].1.vat_amount, 25.0);
        // Surcharge is not applied here
        assert_eq!(report[1].0, SeatType::AcB);
        assert_eq!(report[1].1.fare, 1200.0);
    }

    #[test]
    fn trips_without_train_is_none() {
        let data = trips(r#"{"data": {"trains": [{"train_model": "769", "seat_types": []}]}}"#);
        assert_eq!(convert_trips(&data, "798").unwrap(), None);

        let data = trips(r#"{"data": {}}"#);
        assert_eq!(convert_trips(&data, "798").unwrap(), None);
    }

    #[test]
    fn numeric_model_matches() {
        let data = trips(r#"{"data": {"trains": [{"train_model": 798, "seat_types": []}]}}"#);
        assert_eq!(convert_trips(&data, "798").unwrap(), Some(vec![]));
    }

    #[test]
    fn untracked_seat_class_skipped() {
        let data = trips(
            r#"{"data": {"trains": [{"train_model": "798", "seat_types": [
                {"type": "SLEEPER_DELUXE", "seat_counts": {"online": 4, "offline": 0}, "fare": "9"},
                {"type": "SHOVAN", "seat_counts": {"online": 4, "offline": 0}, "fare": "90"}
            ]}]}}"#,
        );

        let report = convert_trips(&data, "798").unwrap().unwrap();
        assert_eq!(report.len(), 1);
        assert_eq!(report[0].0, SeatType::Shovan);
    }

    #[test]
    fn missing_amounts_are_zero() {
        let data = trips(
            r#"{"data": {"trains": [{"train_model": "798", "seat_types": [
                {"type": "SHULOV"}
            ]}]}}"#,
        );

        let report = convert_trips(&data, "798").unwrap().unwrap();
        assert_eq!(report[0].1, SeatAvailability::default());
    }

    #[test]
    fn bad_fare_fails_leg() {
        let data = trips(
            r#"{"data": {"trains": [{"train_model": "798", "seat_types": [
                {"type": "SHOVAN", "seat_counts": {"online": 4, "offline": 0}, "fare": "free"}
            ]}]}}"#,
        );

        assert_eq!(
            convert_trips(&data, "798").unwrap_err(),
            ConversionError::InvalidNumber {
                field: "fare",
                value: "free".into(),
            }
        );
    }
}
