//! Application state for the web layer.

use std::sync::Arc;

use crate::cache::CachedProvider;
use crate::checker::SeatChecker;
use crate::matrix::Journey;
use crate::notify::AnyNotifier;
use crate::shohoz::ShohozBackend;

/// The checker the server runs: cached Shohoz access plus the configured
/// notifier.
pub type AppChecker = SeatChecker<CachedProvider<ShohozBackend>, AnyNotifier>;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Builds matrices and raises alerts
    pub checker: Arc<AppChecker>,

    /// Journey checked when a request names none
    pub default_journey: Arc<Journey>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(checker: Arc<AppChecker>, default_journey: Journey) -> Self {
        Self {
            checker,
            default_journey: Arc::new(default_journey),
        }
    }
}
