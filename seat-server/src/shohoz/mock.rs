//! Mock Shohoz client for development without network access.
//!
//! Loads a single JSON fixture holding a train-routes payload and the
//! search-trips payload of each leg, and serves them as if they were live
//! API responses.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use chrono::NaiveDate;
use serde::Deserialize;

use crate::domain::TrainSchedule;
use crate::matrix::{ProviderError, ScheduleProvider, SeatProvider, SeatQuery, SeatReport};

use super::convert::{convert_train_routes, convert_trips};
use super::error::ShohozError;
use super::types::{SearchTripsData, TrainRoutesData};

/// On-disk fixture layout.
#[derive(Debug, Clone, Deserialize)]
pub struct Fixture {
    /// Payload of the train-routes call, as under its `data` field.
    pub schedule: Option<TrainRoutesData>,

    /// Search-trips payloads, one per leg.
    #[serde(default)]
    pub legs: Vec<LegFixture>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LegFixture {
    pub from: String,
    pub to: String,
    #[serde(flatten)]
    pub trips: SearchTripsData,
}

/// Mock Shohoz client that serves data from a JSON fixture.
///
/// Dates are ignored: the fixture answers the same for every journey.
#[derive(Debug, Clone)]
pub struct MockShohozClient {
    schedule: Option<Arc<TrainSchedule>>,
    legs: Arc<HashMap<(String, String), SearchTripsData>>,
}

impl MockShohozClient {
    /// Load a fixture file.
    pub fn new(path: impl AsRef<Path>) -> Result<Self, ShohozError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| ShohozError::Fixture(format!("Failed to read {path:?}: {e}")))?;

        let fixture: Fixture = serde_json::from_str(&json)
            .map_err(|e| ShohozError::Fixture(format!("Failed to parse {path:?}: {e}")))?;

        Ok(Self::from_fixture(fixture))
    }

    pub fn from_fixture(fixture: Fixture) -> Self {
        let legs = fixture
            .legs
            .into_iter()
            .map(|leg| ((leg.from, leg.to), leg.trips))
            .collect();

        Self {
            schedule: fixture
                .schedule
                .as_ref()
                .map(|data| Arc::new(convert_train_routes(data))),
            legs: Arc::new(legs),
        }
    }

    /// Mimics `ShohozClient::get_train_routes`.
    pub fn get_train_routes(&self) -> Option<TrainSchedule> {
        self.schedule.as_deref().cloned()
    }

    /// Mimics `ShohozClient::search_trips`. Legs missing from the fixture
    /// are reported as not listing the train.
    pub fn search_trips(&self, query: &SeatQuery) -> Result<Option<SeatReport>, ShohozError> {
        match self.legs.get(&(query.from.clone(), query.to.clone())) {
            Some(trips) => Ok(convert_trips(trips, &query.train_model)?),
            None => Ok(None),
        }
    }

    /// Number of legs in the fixture.
    pub fn leg_count(&self) -> usize {
        self.legs.len()
    }
}

impl ScheduleProvider for MockShohozClient {
    async fn fetch_schedule(
        &self,
        _train_model: &str,
        _date: NaiveDate,
    ) -> Result<Option<TrainSchedule>, ProviderError> {
        Ok(self.get_train_routes())
    }
}

impl SeatProvider for MockShohozClient {
    async fn fetch_seats(&self, query: &SeatQuery) -> Result<Option<SeatReport>, ProviderError> {
        Ok(self.search_trips(query)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{SeatAvailability, SeatType};
    use std::io::Write;

    const FIXTURE: &str = r#"{
        "schedule": {
            "train_name": "DHUMKETU EXPRESS",
            "routes": [
                {"city": "Dhaka", "departure_time": "06:00 am BST"},
                {"city": "Natore", "departure_time": "11:25 am BST"},
                {"city": "Rajshahi", "arrival_time": "12:45 pm BST"}
            ]
        },
        "legs": [
            {
                "from": "Dhaka",
                "to": "Natore",
                "trains": [{
                    "train_model": "798",
                    "seat_types": [
                        {"type": "SNIGDHA", "seat_counts": {"online": 3, "offline": 0}, "fare": "700", "vat_amount": "35"}
                    ]
                }]
            }
        ]
    }"#;

    fn fixture_file(json: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();
        file
    }

    fn query(from: &str, to: &str) -> SeatQuery {
        SeatQuery {
            train_model: "798".into(),
            from: from.into(),
            to: to.into(),
            date: NaiveDate::from_ymd_opt(2025, 6, 4).unwrap(),
            seat_class_hint: "SHULOV".into(),
        }
    }

    #[tokio::test]
    async fn load_fixture() {
        let file = fixture_file(FIXTURE);
        let client = MockShohozClient::new(file.path()).unwrap();

        assert_eq!(client.leg_count(), 1);

        let schedule = client
            .fetch_schedule("798", NaiveDate::from_ymd_opt(2025, 6, 4).unwrap())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(schedule.train_name, "DHUMKETU EXPRESS");
        assert_eq!(schedule.stops.len(), 3);
    }

    #[tokio::test]
    async fn listed_leg_reports_seats() {
        let file = fixture_file(FIXTURE);
        let client = MockShohozClient::new(file.path()).unwrap();

        let report = client.fetch_seats(&query("Dhaka", "Natore")).await.unwrap().unwrap();
        let expected = SeatAvailability {
            online: 3,
            offline: 0,
            fare: 700.0,
            vat_amount: 35.0,
        };
        assert_eq!(report, vec![(SeatType::Snigdha, expected)]);
    }

    #[tokio::test]
    async fn unlisted_leg_is_none() {
        let file = fixture_file(FIXTURE);
        let client = MockShohozClient::new(file.path()).unwrap();

        assert_eq!(client.fetch_seats(&query("Dhaka", "Rajshahi")).await.unwrap(), None);
    }

    #[tokio::test]
    async fn missing_schedule_is_none() {
        let file = fixture_file(r#"{"legs": []}"#);
        let client = MockShohozClient::new(file.path()).unwrap();

        let schedule = client
            .fetch_schedule("798", NaiveDate::from_ymd_opt(2025, 6, 4).unwrap())
            .await
            .unwrap();
        assert!(schedule.is_none());
    }

    #[tokio::test]
    async fn bundled_fixture_loads() {
        let client =
            MockShohozClient::new(concat!(env!("CARGO_MANIFEST_DIR"), "/data/mock_shohoz.json"))
                .unwrap();
        assert_eq!(client.leg_count(), 3);

        let schedule = client.get_train_routes().unwrap();
        assert_eq!(schedule.stops.len(), 5);

        // Listed, but for another train
        let report = client.fetch_seats(&query("Biman_Bandar", "Tangail")).await.unwrap();
        assert_eq!(report, None);
    }

    #[test]
    fn missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = MockShohozClient::new(dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, ShohozError::Fixture(_)));
    }

    #[test]
    fn malformed_file_is_error() {
        let file = fixture_file("{ not json");
        let err = MockShohozClient::new(file.path()).unwrap_err();
        assert!(err.to_string().starts_with("fixture error: Failed to parse"));
    }
}
