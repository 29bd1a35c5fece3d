//! Application-facing tour facade.
//!
//! [`TourContext`] is created once at the application root and handed to
//! whatever needs to start, drive or inspect the tour. It owns the catalog,
//! the navigator, the persistence gateway and the auto-start timer, and it is
//! torn down explicitly.

use std::sync::Arc;
use std::time::{Duration, Instant};

use learnova_types::{TourCommand, TourStep};
use learnova_util::DurableStore;
use serde::Serialize;
use tracing::{debug, info};

use crate::catalog::TourCatalog;
use crate::geometry::GeometryConfig;
use crate::layout::LayoutProvider;
use crate::navigation::{OpenTour, TourNavigator, Transition};
use crate::persistence::{InitOutcome, TourPersistence};
use crate::scheduler::{Clock, Scheduler, SystemClock, TourTimer};

/// Delays and geometry constants for a tour host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TourConfig {
    pub auto_start_delay: Duration,
    pub transition_delay: Duration,
    pub geometry: GeometryConfig,
}

impl Default for TourConfig {
    fn default() -> Self {
        Self {
            auto_start_delay: Duration::from_millis(2000),
            transition_delay: Duration::from_millis(300),
            geometry: GeometryConfig::default(),
        }
    }
}

impl TourConfig {
    /// Default delays with cell-based geometry.
    pub fn terminal() -> Self {
        Self {
            geometry: GeometryConfig::terminal(),
            ..Self::default()
        }
    }
}

/// Serializable snapshot of the tour flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TourStatus {
    pub is_initialized: bool,
    pub is_first_visit: bool,
    pub has_completed_tour: bool,
    pub is_active: bool,
    pub current_step: Option<String>,
    pub step_count: usize,
    pub first_visit_at: Option<String>,
    pub storage_degraded: bool,
}

pub struct TourContext {
    navigator: TourNavigator,
    persistence: TourPersistence,
    timers: Scheduler<TourTimer>,
    config: TourConfig,
}

impl std::fmt::Debug for TourContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TourContext")
            .field("navigator", &self.navigator)
            .field("persistence", &self.persistence)
            .field("config", &self.config)
            .finish()
    }
}

impl TourContext {
    pub fn new(
        catalog: TourCatalog,
        store: Option<Arc<dyn DurableStore>>,
        config: TourConfig,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            navigator: TourNavigator::new(catalog, clock.clone(), config.transition_delay, config.geometry),
            persistence: TourPersistence::new(store),
            timers: Scheduler::new(clock),
            config,
        }
    }

    /// Context driven by wall-clock time.
    pub fn with_system_clock(catalog: TourCatalog, store: Option<Arc<dyn DurableStore>>, config: TourConfig) -> Self {
        Self::new(catalog, store, config, Arc::new(SystemClock))
    }

    /// Read the durable flags and schedule the first-visit auto-start.
    pub fn initialize(&mut self) -> InitOutcome {
        let outcome = self.persistence.initialize();
        if outcome.auto_start {
            debug!(delay = ?self.config.auto_start_delay, "scheduling tour auto-start");
            self.timers.schedule(TourTimer::AutoStart, self.config.auto_start_delay);
        }
        outcome
    }

    /// Read the durable flags for reporting without recording a visit or scheduling anything.
    pub fn load(&mut self) {
        self.persistence.load();
    }

    /// Open the tour; an explicit start supersedes a pending auto-start.
    pub fn start_tour(&mut self, demo: bool) -> Transition {
        self.timers.cancel(TourTimer::AutoStart);
        self.navigator.start(demo)
    }

    pub fn next(&mut self) -> Transition {
        let transition = self.navigator.next();
        self.record(transition)
    }

    pub fn previous(&mut self) -> Transition {
        self.navigator.previous()
    }

    pub fn jump_to(&mut self, index: usize) -> Transition {
        self.navigator.jump_to(index)
    }

    pub fn close(&mut self) -> Transition {
        let transition = self.navigator.close();
        self.record(transition)
    }

    pub fn handle_command(&mut self, command: TourCommand) -> Transition {
        match command {
            TourCommand::Next => self.next(),
            TourCommand::Previous => self.previous(),
            TourCommand::JumpTo(index) => self.jump_to(index),
            TourCommand::Close => self.close(),
        }
    }

    pub fn handle_resize(&mut self, layout: &mut dyn LayoutProvider) -> Transition {
        let transition = self.navigator.handle_resize(layout);
        self.record(transition)
    }

    /// Fire due timers. Call on every host tick.
    pub fn tick(&mut self, layout: &mut dyn LayoutProvider) -> Transition {
        let mut outcome = Transition::Unchanged;
        for timer in self.timers.take_due() {
            if timer == TourTimer::AutoStart && !self.navigator.is_open() {
                info!("auto-starting tour");
                outcome = self.navigator.start(false);
            }
        }
        let transition = self.navigator.tick(layout);
        if transition != Transition::Unchanged {
            outcome = self.record(transition);
        }
        outcome
    }

    /// Clear both durable flags. An open tour stays open.
    pub fn reset_tour(&mut self) {
        self.persistence.reset();
    }

    /// Cancel every pending timer and close the tour without recording completion.
    pub fn teardown(&mut self) {
        self.timers.cancel_all();
        if self.navigator.is_open() {
            self.navigator.close();
        }
        debug!("tour context torn down");
    }

    pub fn is_active(&self) -> bool {
        self.navigator.is_open()
    }

    pub fn has_completed_tour(&self) -> bool {
        self.persistence.has_completed()
    }

    pub fn is_first_visit(&self) -> bool {
        self.persistence.is_first_visit()
    }

    pub fn is_initialized(&self) -> bool {
        self.persistence.is_initialized()
    }

    pub fn open_tour(&self) -> Option<&OpenTour> {
        self.navigator.open_tour()
    }

    pub fn current_step(&self) -> Option<&TourStep> {
        self.navigator.current_step()
    }

    pub fn catalog(&self) -> &TourCatalog {
        self.navigator.catalog()
    }

    pub fn config(&self) -> &TourConfig {
        &self.config
    }

    /// Earliest pending timer deadline.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.next_deadline()
    }

    /// Whether any timer is waiting; hosts tick faster while this holds.
    pub fn has_pending_timers(&self) -> bool {
        self.timers.has_pending() || self.navigator.has_pending_timer()
    }

    pub fn status(&self) -> TourStatus {
        TourStatus {
            is_initialized: self.is_initialized(),
            is_first_visit: self.is_first_visit(),
            has_completed_tour: self.has_completed_tour(),
            is_active: self.is_active(),
            current_step: self.current_step().map(|step| step.id.clone()),
            step_count: self.catalog().len(),
            first_visit_at: self.persistence.first_visit_at().map(str::to_string),
            storage_degraded: self.persistence.is_degraded(),
        }
    }

    fn record(&mut self, transition: Transition) -> Transition {
        if transition.is_completed() {
            self.persistence.mark_completed();
        }
        transition
    }
}
