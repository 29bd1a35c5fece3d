//! Tour navigation state machine.
//!
//! The navigator owns the step index while the tour is open, the pending
//! transition timer, and the last computed spotlight geometry. Every entry
//! into a step marks the tour as transitioning and schedules a geometry
//! recompute; geometry for a step is only read once its index is committed
//! and the transition delay has elapsed.

use std::sync::Arc;
use std::time::Duration;

use learnova_types::{Point, Rect, TourStep};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::catalog::TourCatalog;
use crate::geometry::{GeometryConfig, GeometryError, SpotlightGeometry, compute_geometry};
use crate::layout::LayoutProvider;
use crate::scheduler::{Clock, Scheduler, TourTimer};

/// Runtime state of an open tour. Discarded on close.
#[derive(Debug, Clone, PartialEq)]
pub struct OpenTour {
    pub index: usize,
    /// Set between a step change and the geometry recompute that follows it.
    pub transitioning: bool,
    /// Last computed geometry; `None` until the first recompute lands.
    pub geometry: Option<SpotlightGeometry>,
    pub demo_mode: bool,
}

impl OpenTour {
    pub fn spotlight(&self) -> Option<Rect> {
        self.geometry.and_then(|geometry| geometry.spotlight)
    }

    pub fn anchor(&self) -> Option<Point> {
        self.geometry.map(|geometry| geometry.anchor)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum TourState {
    #[default]
    Closed,
    Open(OpenTour),
}

/// Observable outcome of a navigation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Transition {
    /// The tour opened at the first step.
    Opened,
    /// The current step changed.
    Moved { from: usize, to: usize },
    /// The tour closed, either by finishing or by skipping.
    Completed,
    /// Nothing observable changed.
    Unchanged,
}

impl Transition {
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed)
    }
}

#[derive(Debug)]
pub struct TourNavigator {
    catalog: TourCatalog,
    state: TourState,
    timers: Scheduler<TourTimer>,
    transition_delay: Duration,
    geometry: GeometryConfig,
}

impl TourNavigator {
    pub fn new(catalog: TourCatalog, clock: Arc<dyn Clock>, transition_delay: Duration, geometry: GeometryConfig) -> Self {
        Self {
            catalog,
            state: TourState::Closed,
            timers: Scheduler::new(clock),
            transition_delay,
            geometry,
        }
    }

    pub fn catalog(&self) -> &TourCatalog {
        &self.catalog
    }

    pub fn state(&self) -> &TourState {
        &self.state
    }

    pub fn open_tour(&self) -> Option<&OpenTour> {
        match &self.state {
            TourState::Open(open) => Some(open),
            TourState::Closed => None,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open_tour().is_some()
    }

    pub fn current_index(&self) -> Option<usize> {
        self.open_tour().map(|open| open.index)
    }

    pub fn current_step(&self) -> Option<&TourStep> {
        self.current_index().map(|index| self.catalog.step(index))
    }

    pub fn step_count(&self) -> usize {
        self.catalog.len()
    }

    /// Whether a transition timer is waiting to fire.
    pub fn has_pending_timer(&self) -> bool {
        self.timers.has_pending()
    }

    /// Open the tour at the first step.
    ///
    /// Starting an already open tour only updates the demo label.
    pub fn start(&mut self, demo: bool) -> Transition {
        if let TourState::Open(open) = &mut self.state {
            open.demo_mode = demo;
            return Transition::Unchanged;
        }
        info!(demo, steps = self.catalog.len(), "tour opened");
        self.state = TourState::Open(OpenTour {
            index: 0,
            transitioning: false,
            geometry: None,
            demo_mode: demo,
        });
        self.enter_step(0);
        Transition::Opened
    }

    /// Advance one step, completing the tour from the last one.
    pub fn next(&mut self) -> Transition {
        let Some(index) = self.current_index() else {
            return Transition::Unchanged;
        };
        if index >= self.catalog.last_index() {
            info!(step = index, "tour finished");
            return self.shut();
        }
        self.move_to(index, index + 1)
    }

    pub fn previous(&mut self) -> Transition {
        match self.current_index() {
            Some(index) if index > 0 => self.move_to(index, index - 1),
            _ => Transition::Unchanged,
        }
    }

    /// Jump to any valid step. Out-of-range targets and the current step are ignored.
    pub fn jump_to(&mut self, target: usize) -> Transition {
        match self.current_index() {
            Some(index) if target < self.catalog.len() && target != index => self.move_to(index, target),
            Some(_) => {
                debug!(target, "ignoring jump to invalid or current step");
                Transition::Unchanged
            }
            None => Transition::Unchanged,
        }
    }

    /// Close the tour. Skipping counts as completion.
    pub fn close(&mut self) -> Transition {
        match self.current_index() {
            Some(index) => {
                info!(step = index, "tour skipped");
                self.shut()
            }
            None => Transition::Unchanged,
        }
    }

    /// Recompute geometry for the current step right away.
    ///
    /// During a step transition nothing is measured; the pending transition
    /// timer recomputes once the delay has elapsed.
    pub fn handle_resize(&mut self, layout: &mut dyn LayoutProvider) -> Transition {
        let settled = matches!(&self.state, TourState::Open(open) if !open.transitioning);
        if !settled {
            return Transition::Unchanged;
        }
        self.refresh_geometry(layout)
    }

    /// Fire due timers against the live layout.
    pub fn tick(&mut self, layout: &mut dyn LayoutProvider) -> Transition {
        let mut outcome = Transition::Unchanged;
        for timer in self.timers.take_due() {
            if timer != TourTimer::Transition || !self.is_open() {
                continue;
            }
            if let TourState::Open(open) = &mut self.state {
                open.transitioning = false;
            }
            let transition = self.refresh_geometry(layout);
            if transition != Transition::Unchanged {
                outcome = transition;
            }
        }
        outcome
    }

    fn move_to(&mut self, from: usize, to: usize) -> Transition {
        debug!(from, to, "tour step changed");
        self.enter_step(to);
        Transition::Moved { from, to }
    }

    fn enter_step(&mut self, index: usize) {
        if let TourState::Open(open) = &mut self.state {
            open.index = index;
            open.transitioning = true;
        }
        self.timers.schedule(TourTimer::Transition, self.transition_delay);
    }

    fn shut(&mut self) -> Transition {
        self.timers.cancel_all();
        self.state = TourState::Closed;
        Transition::Completed
    }

    /// A missing target advances the tour instead of leaving a stale spotlight.
    fn refresh_geometry(&mut self, layout: &mut dyn LayoutProvider) -> Transition {
        let Some(index) = self.current_index() else {
            return Transition::Unchanged;
        };
        let step = self.catalog.step(index);
        match compute_geometry(step, layout, &self.geometry) {
            Ok(geometry) => {
                if let TourState::Open(open) = &mut self.state {
                    open.geometry = Some(geometry);
                }
                Transition::Unchanged
            }
            Err(GeometryError::TargetNotFound(locator)) => {
                warn!(step = %step.id, target = %locator, "tour target not found; skipping step");
                self.next()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use learnova_types::{AnchorSide, Size};

    use super::*;
    use crate::layout::StaticLayout;
    use crate::scheduler::ManualClock;

    const DELAY: Duration = Duration::from_millis(300);

    fn three_steps() -> TourCatalog {
        TourCatalog::new(vec![
            TourStep::new("a", "body", "A", "first", AnchorSide::Center),
            TourStep::new("b", "#panel", "B", "second", AnchorSide::Bottom),
            TourStep::new("c", "body", "C", "third", AnchorSide::Center),
        ])
        .unwrap()
    }

    fn navigator(catalog: TourCatalog) -> (Arc<ManualClock>, TourNavigator) {
        let clock = Arc::new(ManualClock::new());
        let navigator = TourNavigator::new(catalog, clock.clone(), DELAY, GeometryConfig::default());
        (clock, navigator)
    }

    fn layout() -> StaticLayout {
        StaticLayout::new(Size::new(1280.0, 800.0)).with_element("panel", Rect::new(100.0, 100.0, 200.0, 100.0))
    }

    #[test]
    fn three_step_scenario() {
        let (clock, mut nav) = navigator(three_steps());
        let mut layout = layout();

        assert_eq!(nav.start(false), Transition::Opened);
        assert!(nav.open_tour().unwrap().transitioning);
        clock.advance(DELAY);
        nav.tick(&mut layout);
        let open = nav.open_tour().unwrap();
        assert!(!open.transitioning);
        assert_eq!(open.spotlight(), None);
        assert_eq!(open.anchor(), Some(Point::new(260.0, 420.0)));

        assert_eq!(nav.next(), Transition::Moved { from: 0, to: 1 });
        clock.advance(DELAY);
        nav.tick(&mut layout);
        let open = nav.open_tour().unwrap();
        assert_eq!(open.spotlight(), Some(Rect::new(92.0, 92.0, 216.0, 116.0)));
        assert_eq!(open.anchor(), Some(Point::new(224.0, 24.0)));

        assert_eq!(nav.next(), Transition::Moved { from: 1, to: 2 });
        assert_eq!(nav.next(), Transition::Completed);
        assert!(!nav.is_open());
        assert!(!nav.has_pending_timer());
    }

    #[test]
    fn previous_at_first_step_is_a_no_op() {
        let (_, mut nav) = navigator(three_steps());
        nav.start(false);
        assert_eq!(nav.previous(), Transition::Unchanged);
        assert_eq!(nav.current_index(), Some(0));

        nav.next();
        assert_eq!(nav.previous(), Transition::Moved { from: 1, to: 0 });
    }

    #[test]
    fn jump_ignores_out_of_range_and_current_targets() {
        let (_, mut nav) = navigator(three_steps());
        assert_eq!(nav.jump_to(1), Transition::Unchanged, "closed tour ignores jumps");

        nav.start(false);
        assert_eq!(nav.jump_to(3), Transition::Unchanged);
        assert_eq!(nav.jump_to(0), Transition::Unchanged);
        assert_eq!(nav.jump_to(2), Transition::Moved { from: 0, to: 2 });
        assert_eq!(nav.current_index(), Some(2));
    }

    #[test]
    fn missing_target_advances_automatically() {
        let (clock, mut nav) = navigator(three_steps());
        let mut empty = StaticLayout::new(Size::new(1280.0, 800.0));

        nav.start(false);
        nav.next();
        clock.advance(DELAY);
        assert_eq!(nav.tick(&mut empty), Transition::Moved { from: 1, to: 2 });
        assert!(nav.open_tour().unwrap().transitioning);
    }

    #[test]
    fn step_change_during_transition_supersedes_pending_recompute() {
        let (clock, mut nav) = navigator(three_steps());
        let mut layout = layout();

        nav.start(false);
        clock.advance(Duration::from_millis(200));
        nav.next();
        clock.advance(Duration::from_millis(200));
        nav.tick(&mut layout);
        assert!(nav.open_tour().unwrap().transitioning, "first timer was cancelled");
        assert_eq!(nav.open_tour().unwrap().geometry, None);

        clock.advance(Duration::from_millis(100));
        nav.tick(&mut layout);
        let open = nav.open_tour().unwrap();
        assert!(!open.transitioning);
        assert!(open.spotlight().is_some(), "geometry belongs to the current step");
    }

    #[test]
    fn close_cancels_timers_and_counts_as_completion() {
        let (clock, mut nav) = navigator(three_steps());
        nav.start(true);
        assert_eq!(nav.close(), Transition::Completed);
        assert_eq!(nav.close(), Transition::Unchanged);

        clock.advance(DELAY);
        assert_eq!(nav.tick(&mut layout()), Transition::Unchanged);
        assert!(!nav.is_open());
    }

    #[test]
    fn start_while_open_only_updates_demo_label() {
        let (_, mut nav) = navigator(three_steps());
        nav.start(false);
        nav.next();
        assert_eq!(nav.start(true), Transition::Unchanged);
        let open = nav.open_tour().unwrap();
        assert_eq!(open.index, 1);
        assert!(open.demo_mode);
    }

    #[test]
    fn resize_recomputes_without_changing_index() {
        let (clock, mut nav) = navigator(three_steps());
        let mut layout = layout();
        nav.start(false);
        nav.next();
        clock.advance(DELAY);
        nav.tick(&mut layout);

        layout.insert("panel", Rect::new(500.0, 300.0, 200.0, 100.0));
        assert_eq!(nav.handle_resize(&mut layout), Transition::Unchanged);
        let open = nav.open_tour().unwrap();
        assert_eq!(open.index, 1);
        assert_eq!(open.spotlight(), Some(Rect::new(492.0, 292.0, 216.0, 116.0)));
    }

    #[test]
    fn resize_during_transition_waits_for_the_delay() {
        let (clock, mut nav) = navigator(three_steps());
        let mut layout = layout();
        nav.start(false);
        clock.advance(DELAY);
        nav.tick(&mut layout);

        nav.next();
        assert_eq!(nav.handle_resize(&mut layout), Transition::Unchanged);
        assert!(layout.scroll_requests().is_empty());
        let open = nav.open_tour().unwrap();
        assert!(open.transitioning);
        assert_eq!(open.spotlight(), None);

        clock.advance(DELAY);
        nav.tick(&mut layout);
        assert_eq!(layout.scroll_requests().len(), 1);
        assert_eq!(nav.open_tour().unwrap().spotlight(), Some(Rect::new(92.0, 92.0, 216.0, 116.0)));
    }
}
