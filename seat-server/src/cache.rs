//! Caching layer for train schedules.
//!
//! A timetable changes rarely, but every matrix build starts by fetching
//! one. Schedules are cached per (train, date) so a polling loop does not
//! refetch an unchanged route on every tick. Seat availability is the thing
//! being watched and is never cached.

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use moka::future::Cache as MokaCache;
use tracing::trace;

use crate::domain::TrainSchedule;
use crate::matrix::{ProviderError, ScheduleProvider, SeatProvider, SeatQuery, SeatReport};

/// Cache key for schedules: (train model, journey date).
type ScheduleKey = (String, NaiveDate);

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(15 * 60),
            max_capacity: 100,
        }
    }
}

/// Cache for schedule responses.
pub struct ScheduleCache {
    schedules: MokaCache<ScheduleKey, Arc<TrainSchedule>>,
}

impl ScheduleCache {
    /// Create a new cache with the given configuration.
    pub fn new(config: &CacheConfig) -> Self {
        let schedules = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { schedules }
    }

    pub async fn get(&self, key: &ScheduleKey) -> Option<Arc<TrainSchedule>> {
        self.schedules.get(key).await
    }

    pub async fn insert(&self, key: ScheduleKey, schedule: Arc<TrainSchedule>) {
        self.schedules.insert(key, schedule).await;
    }

    /// Get cache statistics (for monitoring).
    pub fn entry_count(&self) -> u64 {
        self.schedules.entry_count()
    }

    /// Invalidate all cached entries.
    pub fn invalidate_all(&self) {
        self.schedules.invalidate_all();
    }
}

/// Provider with a schedule cache in front.
///
/// Wraps any provider; schedules go through the cache, seat queries go
/// straight to the wrapped provider. Missing schedules are not cached so a
/// newly published timetable is picked up on the next call.
pub struct CachedProvider<P> {
    inner: P,
    cache: ScheduleCache,
}

impl<P> CachedProvider<P> {
    /// Create a new cached provider.
    pub fn new(inner: P, cache_config: &CacheConfig) -> Self {
        Self {
            inner,
            cache: ScheduleCache::new(cache_config),
        }
    }

    /// Access the underlying provider for operations that bypass cache.
    pub fn inner(&self) -> &P {
        &self.inner
    }

    /// Get cache statistics.
    pub fn cache_entry_count(&self) -> u64 {
        self.cache.entry_count()
    }

    /// Invalidate all cached entries.
    pub fn invalidate_cache(&self) {
        self.cache.invalidate_all();
    }
}

impl<P: ScheduleProvider + Sync> ScheduleProvider for CachedProvider<P> {
    async fn fetch_schedule(
        &self,
        train_model: &str,
        date: NaiveDate,
    ) -> Result<Option<TrainSchedule>, ProviderError> {
        let key = (train_model.to_string(), date);

        if let Some(cached) = self.cache.get(&key).await {
            trace!(train = %train_model, %date, "Schedule cache hit");
            return Ok(Some((*cached).clone()));
        }

        let schedule = self.inner.fetch_schedule(train_model, date).await?;
        if let Some(schedule) = &schedule {
            self.cache.insert(key, Arc::new(schedule.clone())).await;
        }

        Ok(schedule)
    }
}

impl<P: SeatProvider + Sync> SeatProvider for CachedProvider<P> {
    async fn fetch_seats(&self, query: &SeatQuery) -> Result<Option<SeatReport>, ProviderError> {
        self.inner.fetch_seats(query).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Stop;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingProvider {
        schedule: Option<TrainSchedule>,
        schedule_calls: AtomicUsize,
        seat_calls: AtomicUsize,
    }

    impl CountingProvider {
        fn new(schedule: Option<TrainSchedule>) -> Self {
            Self {
                schedule,
                schedule_calls: AtomicUsize::new(0),
                seat_calls: AtomicUsize::new(0),
            }
        }
    }

    impl ScheduleProvider for CountingProvider {
        async fn fetch_schedule(
            &self,
            _train_model: &str,
            _date: NaiveDate,
        ) -> Result<Option<TrainSchedule>, ProviderError> {
            self.schedule_calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.schedule.clone())
        }
    }

    impl SeatProvider for CountingProvider {
        async fn fetch_seats(
            &self,
            _query: &SeatQuery,
        ) -> Result<Option<SeatReport>, ProviderError> {
            self.seat_calls.fetch_add(1, Ordering::SeqCst);
            Ok(None)
        }
    }

    fn schedule() -> TrainSchedule {
        TrainSchedule {
            train_name: "PADMA EXPRESS".into(),
            stops: vec![Stop::new("Dhaka", None, None), Stop::new("Rajshahi", None, None)],
        }
    }

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, d).unwrap()
    }

    #[test]
    fn default_config() {
        let config = CacheConfig::default();
        assert_eq!(config.ttl, Duration::from_secs(900));
        assert_eq!(config.max_capacity, 100);
    }

    #[tokio::test]
    async fn schedule_fetched_once_per_key() {
        let cached = CachedProvider::new(
            CountingProvider::new(Some(schedule())),
            &CacheConfig::default(),
        );

        for _ in 0..3 {
            let s = cached.fetch_schedule("798", date(4)).await.unwrap();
            assert_eq!(s, Some(schedule()));
        }
        assert_eq!(cached.inner().schedule_calls.load(Ordering::SeqCst), 1);

        cached.fetch_schedule("798", date(5)).await.unwrap();
        cached.fetch_schedule("769", date(4)).await.unwrap();
        assert_eq!(cached.inner().schedule_calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn missing_schedule_not_cached() {
        let cached = CachedProvider::new(CountingProvider::new(None), &CacheConfig::default());

        assert_eq!(cached.fetch_schedule("798", date(4)).await.unwrap(), None);
        assert_eq!(cached.fetch_schedule("798", date(4)).await.unwrap(), None);
        assert_eq!(cached.inner().schedule_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn invalidate_forces_refetch() {
        let cached = CachedProvider::new(
            CountingProvider::new(Some(schedule())),
            &CacheConfig::default(),
        );

        cached.fetch_schedule("798", date(4)).await.unwrap();
        cached.invalidate_cache();
        cached.fetch_schedule("798", date(4)).await.unwrap();
        assert_eq!(cached.inner().schedule_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn seats_never_cached() {
        let cached = CachedProvider::new(CountingProvider::new(None), &CacheConfig::default());
        let query = SeatQuery {
            train_model: "798".into(),
            from: "Dhaka".into(),
            to: "Rajshahi".into(),
            date: date(4),
            seat_class_hint: "SHULOV".into(),
        };

        cached.fetch_seats(&query).await.unwrap();
        cached.fetch_seats(&query).await.unwrap();
        assert_eq!(cached.inner().seat_calls.load(Ordering::SeqCst), 2);
    }
}
