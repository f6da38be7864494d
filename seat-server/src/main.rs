use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use seat_server::cache::{CacheConfig, CachedProvider};
use seat_server::checker::{SeatChecker, Watcher};
use seat_server::config::AppConfig;
use seat_server::matrix::MatrixConfig;
use seat_server::notify::{AnyNotifier, LogNotifier, PushbulletNotifier};
use seat_server::shohoz::{MockShohozClient, ShohozBackend, ShohozClient, ShohozConfig};
use seat_server::web::{AppState, create_router};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=info".into()),
        )
        .init();

    let config = AppConfig::from_env()?;

    let backend = match &config.mock_file {
        Some(path) => {
            let mock = MockShohozClient::new(path)?;
            tracing::warn!(
                path = %path.display(),
                legs = mock.leg_count(),
                "Serving Shohoz data from fixture"
            );
            ShohozBackend::Mock(mock)
        }
        None => {
            let mut shohoz_config = ShohozConfig::new();
            if let Some(url) = &config.shohoz_base_url {
                shohoz_config = shohoz_config.with_base_url(url);
            }
            ShohozBackend::Live(ShohozClient::new(shohoz_config)?)
        }
    };

    let notifier = match &config.pushbullet_token {
        Some(token) => AnyNotifier::Pushbullet(PushbulletNotifier::new(token)?),
        None => {
            tracing::warn!("PUSHBULLET_TOKEN not set, alerts will only be logged");
            AnyNotifier::Log(LogNotifier)
        }
    };

    tracing::info!(
        backend = backend.name(),
        notifier = notifier.name(),
        train = %config.train_model,
        date = %config.journey_date,
        "Loaded configuration"
    );

    let checker = Arc::new(SeatChecker::new(
        CachedProvider::new(backend, &CacheConfig::default()),
        notifier,
        MatrixConfig::default(),
    ));

    if let Some(period) = config.poll_interval {
        Watcher::new(config.journey(), period).spawn(checker.clone());
    }

    let state = AppState::new(checker, config.journey());
    let app = create_router(state);

    let addr = config.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "Seat availability server listening");

    axum::serve(listener, app).await?;
    Ok(())
}
