//! Pushbullet push delivery.

use reqwest::header::{HeaderMap, HeaderValue};
use serde::Serialize;
use tracing::debug;

use super::{Notifier, NotifyError};

/// Default Pushbullet API base URL.
pub const DEFAULT_PUSHBULLET_URL: &str = "https://api.pushbullet.com";

/// Body of `POST /v2/pushes` for a note.
#[derive(Debug, Serialize)]
struct NotePush<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    title: &'a str,
    body: &'a str,
}

/// Sends each notification as a Pushbullet note.
#[derive(Debug, Clone)]
pub struct PushbulletNotifier {
    http: reqwest::Client,
    base_url: String,
}

impl PushbulletNotifier {
    /// Create a notifier authenticating with `access_token`.
    pub fn new(access_token: &str) -> Result<Self, NotifyError> {
        let mut headers = HeaderMap::new();
        let token = HeaderValue::from_str(access_token).map_err(|_| NotifyError::InvalidToken)?;
        headers.insert("Access-Token", token);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(10))
            .build()?;

        Ok(Self {
            http,
            base_url: DEFAULT_PUSHBULLET_URL.to_string(),
        })
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }
}

impl Notifier for PushbulletNotifier {
    async fn deliver(&self, title: &str, body: &str) -> Result<(), NotifyError> {
        let url = format!("{}/v2/pushes", self.base_url.trim_end_matches('/'));
        let response = self
            .http
            .post(&url)
            .json(&NotePush {
                kind: "note",
                title,
                body,
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(NotifyError::Rejected {
                status: status.as_u16(),
                message: message.chars().take(200).collect(),
            });
        }

        debug!(%title, "Pushbullet notification sent");
        Ok(())
    }
}
