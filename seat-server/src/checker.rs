//! Availability checks: build a matrix, then raise its alerts.
//!
//! [`SeatChecker`] is shared by the `/check` endpoint and the optional
//! polling [`Watcher`].

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::domain::AvailabilityMatrix;
use crate::matrix::{
    Journey, MatrixConfig, MatrixError, ScheduleProvider, SeatProvider, build_matrix,
};
use crate::notify::{Notifier, send_alerts};

/// Builds availability matrices and pushes their alerts.
pub struct SeatChecker<P, N> {
    provider: P,
    notifier: N,
    config: MatrixConfig,
}

impl<P, N> SeatChecker<P, N>
where
    P: ScheduleProvider + SeatProvider + Sync,
    N: Notifier + Sync,
{
    pub fn new(provider: P, notifier: N, config: MatrixConfig) -> Self {
        Self {
            provider,
            notifier,
            config,
        }
    }

    /// Build the matrix for `journey` and push one notification per alert.
    ///
    /// Notification failures are logged and never fail the check.
    pub async fn check(&self, journey: &Journey) -> Result<AvailabilityMatrix, MatrixError> {
        let matrix = build_matrix(&self.provider, &self.provider, journey, &self.config).await?;

        if !matrix.alerts.is_empty() {
            let delivered = send_alerts(&self.notifier, &matrix.alerts).await;
            info!(
                train = %journey.train_model,
                alerts = matrix.alerts.len(),
                delivered,
                "Raised seat alerts"
            );
        }

        Ok(matrix)
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }
}

/// Re-checks one journey on a fixed interval.
#[derive(Debug, Clone)]
pub struct Watcher {
    pub journey: Journey,
    pub period: Duration,
}

impl Watcher {
    pub fn new(journey: Journey, period: Duration) -> Self {
        Self { journey, period }
    }

    /// Spawn the polling loop. The first check runs immediately.
    ///
    /// Failed checks are logged and the loop carries on.
    pub fn spawn<P, N>(self, checker: Arc<SeatChecker<P, N>>) -> JoinHandle<()>
    where
        P: ScheduleProvider + SeatProvider + Send + Sync + 'static,
        N: Notifier + Send + Sync + 'static,
    {
        tokio::spawn(async move {
            info!(
                train = %self.journey.train_model,
                date = %self.journey.date,
                period_secs = self.period.as_secs(),
                "Starting seat watcher"
            );

            let mut interval = tokio::time::interval(self.period);
            interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

            loop {
                interval.tick().await;
                match checker.check(&self.journey).await {
                    Ok(matrix) => info!(
                        train = %self.journey.train_model,
                        legs = matrix.legs.len(),
                        alerts = matrix.alerts.len(),
                        "Watcher check complete"
                    ),
                    Err(e) => warn!(
                        train = %self.journey.train_model,
                        error = %e,
                        "Watcher check failed"
                    ),
                }
            }
        })
    }
}
