//! Durable tour flags.
//!
//! Two string keys survive restarts: the first-visit timestamp and the
//! completion marker. Storage failures never reach the host; the gateway logs
//! a warning and keeps working from memory for the rest of the session.

use std::sync::Arc;

use chrono::Utc;
use learnova_util::{DurableStore, StoreError};
use serde::Serialize;
use tracing::{debug, info, warn};

/// Key holding the RFC 3339 timestamp of the first recorded visit.
pub const FIRST_VISIT_KEY: &str = "learnova_tc_first_visit";
/// Key holding `"true"` once the tour has been completed or skipped.
pub const TOUR_COMPLETED_KEY: &str = "learnova_tc_tour_completed";

const COMPLETED_VALUE: &str = "true";

/// Result of [`TourPersistence::initialize`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct InitOutcome {
    /// The host should open the tour after the auto-start delay.
    pub auto_start: bool,
}

/// Gateway between the tour and the durable store.
pub struct TourPersistence {
    store: Option<Arc<dyn DurableStore>>,
    degraded: bool,
    initialized: bool,
    first_visit: bool,
    completed: bool,
    first_visit_at: Option<String>,
}

impl std::fmt::Debug for TourPersistence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TourPersistence")
            .field("has_store", &self.store.is_some())
            .field("degraded", &self.degraded)
            .field("initialized", &self.initialized)
            .field("first_visit", &self.first_visit)
            .field("completed", &self.completed)
            .finish()
    }
}

impl TourPersistence {
    /// Create a gateway; `None` means storage is unavailable from the start.
    pub fn new(store: Option<Arc<dyn DurableStore>>) -> Self {
        Self {
            store,
            degraded: false,
            initialized: false,
            first_visit: false,
            completed: false,
            first_visit_at: None,
        }
    }

    /// Read both keys and decide whether the tour should auto-start.
    ///
    /// A visitor without a recorded first visit gets the timestamp written and
    /// `auto_start = true`. Anyone else reuses the stored completion flag.
    pub fn initialize(&mut self) -> InitOutcome {
        let visited = self.read(FIRST_VISIT_KEY);
        let outcome = match visited {
            Some(Some(timestamp)) => {
                let completed = self.read(TOUR_COMPLETED_KEY).flatten();
                self.first_visit = false;
                self.completed = completed.as_deref() == Some(COMPLETED_VALUE);
                self.first_visit_at = Some(timestamp);
                debug!(completed = self.completed, "returning visitor");
                InitOutcome { auto_start: false }
            }
            // Never recorded, or the store could not be read: treat as a first visit.
            Some(None) | None => {
                let timestamp = Utc::now().to_rfc3339();
                self.write(FIRST_VISIT_KEY, &timestamp);
                self.first_visit = true;
                self.completed = false;
                self.first_visit_at = Some(timestamp);
                info!(degraded = self.degraded, "first visit detected; tour will auto-start");
                InitOutcome { auto_start: true }
            }
        };
        self.initialized = true;
        outcome
    }

    /// Read both keys without recording a visit.
    ///
    /// Used for status reports, which must not turn a first visit into a
    /// returning one.
    pub fn load(&mut self) {
        let visited = self.read(FIRST_VISIT_KEY).flatten();
        let completed = self.read(TOUR_COMPLETED_KEY).flatten();
        self.first_visit = visited.is_none();
        self.completed = completed.as_deref() == Some(COMPLETED_VALUE);
        self.first_visit_at = visited;
        self.initialized = true;
    }

    /// Record completion; calling it repeatedly leaves the same state.
    pub fn mark_completed(&mut self) {
        self.completed = true;
        self.write(TOUR_COMPLETED_KEY, COMPLETED_VALUE);
    }

    /// Forget both flags so the next initialization counts as a first visit.
    pub fn reset(&mut self) {
        self.remove(TOUR_COMPLETED_KEY);
        self.remove(FIRST_VISIT_KEY);
        self.completed = false;
        self.first_visit = true;
        self.first_visit_at = None;
        info!("tour state reset");
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn is_first_visit(&self) -> bool {
        self.first_visit
    }

    pub fn has_completed(&self) -> bool {
        self.completed
    }

    /// Whether writes are being dropped because storage failed.
    pub fn is_degraded(&self) -> bool {
        self.degraded || self.store.is_none()
    }

    /// Recorded first-visit timestamp, if known.
    pub fn first_visit_at(&self) -> Option<&str> {
        self.first_visit_at.as_deref()
    }

    /// `Some(value)` on a successful read, `None` once storage is unusable.
    fn read(&mut self, key: &str) -> Option<Option<String>> {
        let store = self.usable_store()?;
        match store.get(key) {
            Ok(value) => Some(value),
            Err(error) => {
                self.degrade(key, &error);
                None
            }
        }
    }

    fn write(&mut self, key: &str, value: &str) {
        if let Some(store) = self.usable_store()
            && let Err(error) = store.set(key, value)
        {
            self.degrade(key, &error);
        }
    }

    fn remove(&mut self, key: &str) {
        if let Some(store) = self.usable_store()
            && let Err(error) = store.remove(key)
        {
            self.degrade(key, &error);
        }
    }

    fn usable_store(&mut self) -> Option<Arc<dyn DurableStore>> {
        if self.degraded {
            return None;
        }
        if self.store.is_none() {
            warn!("durable storage unavailable; tour state will not persist");
            self.degraded = true;
            return None;
        }
        self.store.clone()
    }

    fn degrade(&mut self, key: &str, error: &StoreError) {
        warn!(key, error = %error, "durable storage failed; tour state will not persist");
        self.degraded = true;
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use learnova_util::InMemoryStore;

    use super::*;

    /// Store that rejects every operation and counts the attempts.
    #[derive(Debug, Default)]
    pub(crate) struct FailingStore {
        pub(crate) attempts: AtomicUsize,
    }

    impl DurableStore for FailingStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
            self.attempts.fetch_add(1, Ordering::SeqCst);
            Err(StoreError::Unavailable("disabled".into()))
        }

        fn set(&self, _key: &str, _value: &str) -> Result<(), StoreError> {
            self.attempts.fetch_add(1, Ordering::SeqCst);
            Err(StoreError::Unavailable("disabled".into()))
        }

        fn remove(&self, _key: &str) -> Result<(), StoreError> {
            self.attempts.fetch_add(1, Ordering::SeqCst);
            Err(StoreError::Unavailable("disabled".into()))
        }
    }

    fn gateway() -> (Arc<InMemoryStore>, TourPersistence) {
        let store = Arc::new(InMemoryStore::new());
        let persistence = TourPersistence::new(Some(store.clone() as Arc<dyn DurableStore>));
        (store, persistence)
    }

    #[test]
    fn first_visit_records_timestamp_and_requests_auto_start() {
        let (store, mut persistence) = gateway();
        assert!(!persistence.is_initialized());

        let outcome = persistence.initialize();
        assert!(outcome.auto_start);
        assert!(persistence.is_initialized());
        assert!(persistence.is_first_visit());
        assert!(!persistence.has_completed());

        let stamp = store.get(FIRST_VISIT_KEY).unwrap().expect("timestamp written");
        assert!(chrono::DateTime::parse_from_rfc3339(&stamp).is_ok());
    }

    #[test]
    fn returning_visitor_reads_completion_flag() {
        let (store, mut persistence) = gateway();
        store.set(FIRST_VISIT_KEY, "2024-01-01T00:00:00Z").unwrap();

        let outcome = persistence.initialize();
        assert!(!outcome.auto_start);
        assert!(!persistence.is_first_visit());
        assert!(!persistence.has_completed());

        store.set(TOUR_COMPLETED_KEY, "true").unwrap();
        let mut second = TourPersistence::new(Some(store.clone() as Arc<dyn DurableStore>));
        second.initialize();
        assert!(second.has_completed());
        assert_eq!(second.first_visit_at(), Some("2024-01-01T00:00:00Z"));
    }

    #[test]
    fn only_the_literal_true_counts_as_completed() {
        let (store, mut persistence) = gateway();
        store.set(FIRST_VISIT_KEY, "2024-01-01T00:00:00Z").unwrap();
        store.set(TOUR_COMPLETED_KEY, "yes").unwrap();
        persistence.initialize();
        assert!(!persistence.has_completed());
    }

    #[test]
    fn mark_completed_is_idempotent() {
        let (store, mut persistence) = gateway();
        persistence.initialize();

        persistence.mark_completed();
        persistence.mark_completed();
        assert!(persistence.has_completed());
        assert_eq!(store.get(TOUR_COMPLETED_KEY).unwrap().as_deref(), Some("true"));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn load_reads_flags_without_recording_a_visit() {
        let (store, mut persistence) = gateway();
        persistence.load();
        assert!(persistence.is_initialized());
        assert!(persistence.is_first_visit());
        assert!(store.is_empty());

        store.set(FIRST_VISIT_KEY, "2026-01-01T00:00:00+00:00").unwrap();
        store.set(TOUR_COMPLETED_KEY, "true").unwrap();
        persistence.load();
        assert!(!persistence.is_first_visit());
        assert!(persistence.has_completed());
        assert_eq!(persistence.first_visit_at(), Some("2026-01-01T00:00:00+00:00"));
    }

    #[test]
    fn reset_clears_both_keys() {
        let (store, mut persistence) = gateway();
        persistence.initialize();
        persistence.mark_completed();

        persistence.reset();
        assert!(store.is_empty());
        assert!(persistence.is_first_visit());
        assert!(!persistence.has_completed());

        assert!(persistence.initialize().auto_start);
    }

    #[test]
    fn failing_store_degrades_without_erroring() {
        let store = Arc::new(FailingStore::default());
        let mut persistence = TourPersistence::new(Some(store.clone() as Arc<dyn DurableStore>));

        let outcome = persistence.initialize();
        assert!(outcome.auto_start, "unreadable storage behaves like a first visit");
        assert!(persistence.is_degraded());

        let attempts = store.attempts.load(Ordering::SeqCst);
        persistence.mark_completed();
        persistence.reset();
        assert_eq!(store.attempts.load(Ordering::SeqCst), attempts, "no further storage access once degraded");
    }

    #[test]
    fn missing_store_is_degraded_from_the_start() {
        let mut persistence = TourPersistence::new(None);
        assert!(persistence.initialize().auto_start);
        persistence.mark_completed();
        assert!(persistence.has_completed());
        assert!(persistence.is_degraded());
    }
}
