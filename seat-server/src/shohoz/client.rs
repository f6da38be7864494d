//! Shohoz railway HTTP client.
//!
//! Provides async methods for the two booking-site endpoints the matrix
//! needs: a train's route and the seats on offer between two stations.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use tokio::sync::Semaphore;
use tracing::trace;

use crate::domain::TrainSchedule;
use crate::matrix::{
    JOURNEY_DATE_FORMAT, ProviderError, ScheduleProvider, SeatProvider, SeatQuery, SeatReport,
};

use super::convert::{convert_train_routes, convert_trips};
use super::error::ShohozError;
use super::types::{ApiEnvelope, SearchTripsData, TrainRoutesData, TrainRoutesRequest};

/// Default base URL for the Shohoz railway API.
pub const DEFAULT_BASE_URL: &str = "https://railspaapi.shohoz.com";

/// Default maximum concurrent requests.
const DEFAULT_MAX_CONCURRENT: usize = 10;

/// Longest slice of an unparseable body kept in errors.
const ERROR_BODY_LIMIT: usize = 500;

/// Configuration for the Shohoz client.
#[derive(Debug, Clone)]
pub struct ShohozConfig {
    /// Base URL for the API (defaults to production Shohoz)
    pub base_url: String,
    /// Maximum concurrent requests
    pub max_concurrent: usize,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl ShohozConfig {
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            timeout_secs: 30,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set maximum concurrent requests.
    pub fn with_max_concurrent(mut self, n: usize) -> Self {
        self.max_concurrent = n;
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for ShohozConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Shohoz railway API client.
///
/// Uses a semaphore to limit concurrent requests; the booking site starts
/// refusing connections well before it starts answering 429.
#[derive(Debug, Clone)]
pub struct ShohozClient {
    http: reqwest::Client,
    base_url: String,
    semaphore: Arc<Semaphore>,
}

impl ShohozClient {
    /// Create a new Shohoz client with the given configuration.
    pub fn new(config: ShohozConfig) -> Result<Self, ShohozError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            semaphore: Arc::new(Semaphore::new(config.max_concurrent.max(1))),
        })
    }

    /// Get the route of `train_model` for a journey starting on `date`.
    ///
    /// Returns `Ok(None)` when the API has no data for that train and date.
    pub async fn get_train_routes(
        &self,
        train_model: &str,
        date: NaiveDate,
    ) -> Result<Option<TrainSchedule>, ShohozError> {
        let url = format!("{}/v1.0/web/train-routes", self.base_url);
        let request = self.http.post(&url).json(&TrainRoutesRequest {
            model: train_model,
            departure_date_time: date.format("%Y-%m-%d").to_string(),
        });

        let envelope: ApiEnvelope<TrainRoutesData> = self.send(request).await?;
        Ok(envelope.data.as_ref().map(convert_train_routes))
    }

    /// Search the seats on offer for one leg.
    ///
    /// Returns `Ok(None)` when the requested train is not among the trips
    /// listed for that leg and date.
    pub async fn search_trips(&self, query: &SeatQuery) -> Result<Option<SeatReport>, ShohozError> {
        let url = format!("{}/v1.0/web/bookings/search-trips-v2", self.base_url);
        let date = query.date.format(JOURNEY_DATE_FORMAT).to_string();
        let request = self.http.get(&url).query(&[
            ("from_city", query.from.as_str()),
            ("to_city", query.to.as_str()),
            ("date_of_journey", date.as_str()),
            ("seat_class", query.seat_class_hint.as_str()),
        ]);

        let envelope: ApiEnvelope<SearchTripsData> = self.send(request).await?;
        match envelope.data {
            Some(data) => Ok(convert_trips(&data, &query.train_model)?),
            None => Ok(None),
        }
    }

    /// Send a request under the semaphore and decode the JSON response.
    async fn send<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, ShohozError> {
        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|_| ShohozError::ApiError {
                status: 0,
                message: "Semaphore closed".to_string(),
            })?;

        let response = request.send().await?;
        let status = response.status();
        trace!(url = %response.url(), status = status.as_u16(), "Shohoz response");

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(ShohozError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ShohozError::ApiError {
                status: status.as_u16(),
                message: body.chars().take(ERROR_BODY_LIMIT).collect(),
            });
        }

        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|e| ShohozError::Json {
            message: e.to_string(),
            body: Some(body.chars().take(ERROR_BODY_LIMIT).collect()),
        })
    }
}

impl ScheduleProvider for ShohozClient {
    async fn fetch_schedule(
        &self,
        train_model: &str,
        date: NaiveDate,
    ) -> Result<Option<TrainSchedule>, ProviderError> {
        Ok(self.get_train_routes(train_model, date).await?)
    }
}

impl SeatProvider for ShohozClient {
    async fn fetch_seats(&self, query: &SeatQuery) -> Result<Option<SeatReport>, ProviderError> {
        Ok(self.search_trips(query).await?)
    }
}
