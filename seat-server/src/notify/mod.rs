//! Alert delivery.
//!
//! Every [`SeatAlert`] in a matrix becomes one push message. Delivery is
//! best-effort: a failed push is logged and the remaining alerts are still
//! sent.

mod pushbullet;

use std::future::Future;

use tracing::{info, warn};

use crate::domain::SeatAlert;

pub use pushbullet::{DEFAULT_PUSHBULLET_URL, PushbulletNotifier};

/// Title of every alert push.
pub const ALERT_TITLE: &str = "Train Seat Availability";

/// Errors from delivering a notification.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The push service refused the message
    #[error("push rejected with status {status}: {message}")]
    Rejected { status: u16, message: String },

    /// The access token cannot be sent as a header
    #[error("invalid access token")]
    InvalidToken,
}

/// Something that can deliver a titled message.
pub trait Notifier {
    fn deliver(
        &self,
        title: &str,
        body: &str,
    ) -> impl Future<Output = Result<(), NotifyError>> + Send;
}

/// Notifier that only logs. Used when no push service is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    async fn deliver(&self, title: &str, body: &str) -> Result<(), NotifyError> {
        info!(%title, %body, "Notification (push disabled)");
        Ok(())
    }
}

/// The notifiers the server can be configured with.
#[derive(Debug, Clone)]
pub enum AnyNotifier {
    Pushbullet(PushbulletNotifier),
    Log(LogNotifier),
}

impl AnyNotifier {
    pub fn name(&self) -> &'static str {
        match self {
            AnyNotifier::Pushbullet(_) => "pushbullet",
            AnyNotifier::Log(_) => "log",
        }
    }
}

impl Notifier for AnyNotifier {
    async fn deliver(&self, title: &str, body: &str) -> Result<(), NotifyError> {
        match self {
            AnyNotifier::Pushbullet(n) => n.deliver(title, body).await,
            AnyNotifier::Log(n) => n.deliver(title, body).await,
        }
    }
}

/// Log and push every alert. Returns how many pushes succeeded.
pub async fn send_alerts<N: Notifier + Sync>(notifier: &N, alerts: &[SeatAlert]) -> usize {
    let mut delivered = 0;

    for alert in alerts {
        info!(
            from = %alert.from,
            to = %alert.to,
            seat_type = %alert.seat_type,
            online = alert.online,
            offline = alert.offline,
            "Seats available"
        );

        match notifier.deliver(ALERT_TITLE, &alert.to_string()).await {
            Ok(()) => delivered += 1,
            Err(e) => warn!(
                from = %alert.from,
                to = %alert.to,
                error = %e,
                "Failed to send notification"
            ),
        }
    }

    delivered
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SeatType;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingNotifier {
        sent: Mutex<Vec<(String, String)>>,
        fail_containing: Option<&'static str>,
    }

    impl Notifier for RecordingNotifier {
        async fn deliver(&self, title: &str, body: &str) -> Result<(), NotifyError> {
            if self.fail_containing.is_some_and(|s| body.contains(s)) {
                return Err(NotifyError::Rejected {
                    status: 401,
                    message: "invalid token".into(),
                });
            }
            self.sent
                .lock()
                .unwrap()
                .push((title.to_string(), body.to_string()));
            Ok(())
        }
    }

    fn alert(from: &str, to: &str) -> SeatAlert {
        SeatAlert {
            from: from.into(),
            to: to.into(),
            seat_type: SeatType::Snigdha,
            online: 2,
            offline: 0,
            fare: 100.0,
        }
    }

    #[test]
    fn error_display() {
        let err = NotifyError::Rejected {
            status: 403,
            message: "forbidden".into(),
        };
        assert_eq!(err.to_string(), "push rejected with status 403: forbidden");
        assert_eq!(NotifyError::InvalidToken.to_string(), "invalid access token");
    }

    #[tokio::test]
    async fn one_push_per_alert() {
        let notifier = RecordingNotifier::default();
        let alerts = vec![alert("A", "B"), alert("A", "C")];

        assert_eq!(send_alerts(&notifier, &alerts).await, 2);

        let sent = notifier.sent.lock().unwrap();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].0, "Train Seat Availability");
        assert_eq!(
            sent[0].1,
            "Seats available from A to B:\nSNIGDHA - Online: 2, Offline: 0, Fare: 100"
        );
    }

    #[tokio::test]
    async fn failed_push_does_not_stop_others() {
        let notifier = RecordingNotifier {
            fail_containing: Some("to B"),
            ..Default::default()
        };
        let alerts = vec![alert("A", "B"), alert("A", "C")];

        assert_eq!(send_alerts(&notifier, &alerts).await, 1);
        assert_eq!(notifier.sent.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn no_alerts_no_pushes() {
        let notifier = RecordingNotifier::default();
        assert_eq!(send_alerts(&notifier, &[]).await, 0);
        assert!(notifier.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn log_notifier_always_succeeds() {
        let notifier = AnyNotifier::Log(LogNotifier);
        assert_eq!(notifier.name(), "log");
        assert!(notifier.deliver(ALERT_TITLE, "body").await.is_ok());
    }
}
