//! Choice between the live API and the offline fixture.

use chrono::NaiveDate;

use crate::domain::TrainSchedule;
use crate::matrix::{ProviderError, ScheduleProvider, SeatProvider, SeatQuery, SeatReport};

use super::client::ShohozClient;
use super::mock::MockShohozClient;

/// Either the live Shohoz client or the fixture-backed mock.
#[derive(Debug, Clone)]
pub enum ShohozBackend {
    Live(ShohozClient),
    Mock(MockShohozClient),
}

impl ShohozBackend {
    pub fn name(&self) -> &'static str {
        match self {
            ShohozBackend::Live(_) => "live",
            ShohozBackend::Mock(_) => "mock",
        }
    }
}

impl ScheduleProvider for ShohozBackend {
    async fn fetch_schedule(
        &self,
        train_model: &str,
        date: NaiveDate,
    ) -> Result<Option<TrainSchedule>, ProviderError> {
        match self {
            ShohozBackend::Live(client) => client.fetch_schedule(train_model, date).await,
            ShohozBackend::Mock(client) => client.fetch_schedule(train_model, date).await,
        }
    }
}

impl SeatProvider for ShohozBackend {
    async fn fetch_seats(&self, query: &SeatQuery) -> Result<Option<SeatReport>, ProviderError> {
        match self {
            ShohozBackend::Live(client) => client.fetch_seats(query).await,
            ShohozBackend::Mock(client) => client.fetch_seats(query).await,
        }
    }
}
