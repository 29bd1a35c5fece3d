//! Cancellable one-shot timers.
//!
//! The tour waits on two fixed delays: the transition window after a step
//! change and the first-visit auto-start. Both are modelled as keyed tasks
//! with deadlines read from an injected [`Clock`]; the host's event loop
//! polls [`Scheduler::take_due`] on every tick. Scheduling a key replaces any
//! pending task with the same key, so a superseded callback can never fire.

use std::fmt::Debug;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use tracing::trace;

/// Source of monotonic time.
pub trait Clock: Send + Sync + Debug {
    fn now(&self) -> Instant;
}

/// Wall-clock time.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Manually advanced clock for deterministic tests and headless drivers.
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<Instant>,
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            now: Mutex::new(Instant::now()),
        }
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().expect("clock lock poisoned");
        *now += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        *self.now.lock().expect("clock lock poisoned")
    }
}

/// Timers used by the tour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TourTimer {
    /// Geometry recompute after a step change.
    Transition,
    /// First-visit auto-start.
    AutoStart,
}

#[derive(Debug, Clone)]
struct ScheduledTask<K> {
    key: K,
    deadline: Instant,
}

/// Keyed set of pending one-shot tasks.
#[derive(Debug)]
pub struct Scheduler<K> {
    clock: Arc<dyn Clock>,
    tasks: Vec<ScheduledTask<K>>,
}

impl<K: Copy + Eq + Debug> Scheduler<K> {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock, tasks: Vec::new() }
    }

    /// Schedule `key` to fire after `delay`, cancelling any pending task with the same key.
    pub fn schedule(&mut self, key: K, delay: Duration) {
        self.cancel(key);
        let deadline = self.clock.now() + delay;
        trace!(?key, ?delay, "scheduled task");
        self.tasks.push(ScheduledTask { key, deadline });
    }

    /// Cancel the pending task for `key`; returns whether one existed.
    pub fn cancel(&mut self, key: K) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|task| task.key != key);
        before != self.tasks.len()
    }

    pub fn cancel_all(&mut self) {
        self.tasks.clear();
    }

    pub fn is_pending(&self, key: K) -> bool {
        self.tasks.iter().any(|task| task.key == key)
    }

    pub fn has_pending(&self) -> bool {
        !self.tasks.is_empty()
    }

    /// Earliest pending deadline, if any.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.tasks.iter().map(|task| task.deadline).min()
    }

    /// Remove and return every task whose deadline has passed, earliest first.
    pub fn take_due(&mut self) -> Vec<K> {
        let now = self.clock.now();
        let mut due: Vec<ScheduledTask<K>> = Vec::new();
        self.tasks.retain(|task| {
            if task.deadline <= now {
                due.push(task.clone());
                false
            } else {
                true
            }
        });
        due.sort_by_key(|task| task.deadline);
        due.into_iter().map(|task| task.key).collect()
    }

    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }
}
