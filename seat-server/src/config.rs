//! Server configuration from environment variables.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use chrono::NaiveDate;

use crate::matrix::Journey;

/// Train checked when `TRAIN_MODEL` is unset.
pub const DEFAULT_TRAIN_MODEL: &str = "798";

/// Journey date checked when `JOURNEY_DATE` is unset.
pub const DEFAULT_JOURNEY_DATE: &str = "2025-06-04";

pub const DEFAULT_PORT: u16 = 5000;

/// Error reading configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {var}={value:?}: {reason}")]
pub struct ConfigError {
    pub var: &'static str,
    pub value: String,
    pub reason: String,
}

/// Everything the server binary needs to start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub train_model: String,
    pub journey_date: NaiveDate,
    pub bind_addr: IpAddr,
    pub port: u16,
    /// Enables Pushbullet delivery when set.
    pub pushbullet_token: Option<String>,
    /// Enables the polling watcher when set.
    pub poll_interval: Option<Duration>,
    pub shohoz_base_url: Option<String>,
    /// Serve this fixture instead of calling Shohoz.
    pub mock_file: Option<PathBuf>,
}

impl AppConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read configuration through `lookup`. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());

        let train_model = get("TRAIN_MODEL")
            .map(|v| v.trim().to_string())
            .unwrap_or_else(|| DEFAULT_TRAIN_MODEL.to_string());

        let journey_date = match get("JOURNEY_DATE") {
            Some(v) => parse_date("JOURNEY_DATE", &v)?,
            None => parse_date("JOURNEY_DATE", DEFAULT_JOURNEY_DATE)?,
        };

        let bind_addr = match get("BIND_ADDR") {
            Some(v) => v.trim().parse().map_err(|e: std::net::AddrParseError| ConfigError {
                var: "BIND_ADDR",
                value: v.clone(),
                reason: e.to_string(),
            })?,
            None => IpAddr::V4(Ipv4Addr::UNSPECIFIED),
        };

        let port = match get("PORT") {
            Some(v) => v.trim().parse().map_err(|e: std::num::ParseIntError| ConfigError {
                var: "PORT",
                value: v.clone(),
                reason: e.to_string(),
            })?,
            None => DEFAULT_PORT,
        };

        let poll_interval = match get("POLL_INTERVAL_SECS") {
            Some(v) => Some(parse_interval(&v)?),
            None => None,
        };

        Ok(Self {
            train_model,
            journey_date,
            bind_addr,
            port,
            pushbullet_token: get("PUSHBULLET_TOKEN").map(|v| v.trim().to_string()),
            poll_interval,
            shohoz_base_url: get("SHOHOZ_BASE_URL"),
            mock_file: get("SHOHOZ_MOCK_FILE").map(PathBuf::from),
        })
    }

    /// The configured train and date.
    pub fn journey(&self) -> Journey {
        Journey::new(self.train_model.clone(), self.journey_date)
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_addr, self.port)
    }
}

/// Parse a `YYYY-MM-DD` date.
pub fn parse_date(var: &'static str, value: &str) -> Result<NaiveDate, ConfigError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|e| ConfigError {
        var,
        value: value.to_string(),
        reason: e.to_string(),
    })
}

fn parse_interval(value: &str) -> Result<Duration, ConfigError> {
    let secs: u64 = value.trim().parse().map_err(|e: std::num::ParseIntError| ConfigError {
        var: "POLL_INTERVAL_SECS",
        value: value.to_string(),
        reason: e.to_string(),
    })?;

    if secs == 0 {
        return Err(ConfigError {
            var: "POLL_INTERVAL_SECS",
            value: value.to_string(),
            reason: "must be at least 1".to_string(),
        });
    }

    Ok(Duration::from_secs(secs))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|var| vars.get(var).cloned())
    }

    #[test]
    fn defaults() {
        let config = config(&[]).unwrap();

        assert_eq!(config.train_model, "798");
        assert_eq!(config.journey_date, NaiveDate::from_ymd_opt(2025, 6, 4).unwrap());
        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:5000");
        assert_eq!(config.pushbullet_token, None);
        assert_eq!(config.poll_interval, None);
        assert_eq!(config.shohoz_base_url, None);
        assert_eq!(config.mock_file, None);
    }

    #[test]
    fn overrides() {
        let config = config(&[
            ("TRAIN_MODEL", " 769 "),
            ("JOURNEY_DATE", "2025-12-25"),
            ("BIND_ADDR", "127.0.0.1"),
            ("PORT", "8080"),
            ("PUSHBULLET_TOKEN", "o.abc"),
            ("POLL_INTERVAL_SECS", "300"),
            ("SHOHOZ_BASE_URL", "http://localhost:9000"),
            ("SHOHOZ_MOCK_FILE", "data/mock.json"),
        ])
        .unwrap();

        assert_eq!(config.journey().train_model, "769");
        assert_eq!(config.journey().date_label(), "25-Dec-2025");
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:8080");
        assert_eq!(config.pushbullet_token.as_deref(), Some("o.abc"));
        assert_eq!(config.poll_interval, Some(Duration::from_secs(300)));
        assert_eq!(config.shohoz_base_url.as_deref(), Some("http://localhost:9000"));
        assert_eq!(config.mock_file, Some(PathBuf::from("data/mock.json")));
    }

    #[test]
    fn blank_values_are_unset() {
        let config = config(&[("PUSHBULLET_TOKEN", "  "), ("PORT", "")]).unwrap();
        assert_eq!(config.pushbullet_token, None);
        assert_eq!(config.port, 5000);
    }

    #[test]
    fn invalid_values() {
        let err = config(&[("PORT", "http")]).unwrap_err();
        assert_eq!(err.var, "PORT");

        let err = config(&[("JOURNEY_DATE", "04-06-2025")]).unwrap_err();
        assert_eq!(err.var, "JOURNEY_DATE");
        assert!(err.to_string().starts_with("invalid JOURNEY_DATE=\"04-06-2025\""));

        let err = config(&[("POLL_INTERVAL_SECS", "0")]).unwrap_err();
        assert_eq!(err.reason, "must be at least 1");

        let err = config(&[("BIND_ADDR", "localhost")]).unwrap_err();
        assert_eq!(err.var, "BIND_ADDR");
    }
}
