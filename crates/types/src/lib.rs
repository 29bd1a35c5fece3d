//! Shared types for the Learnova coordinator dashboard and its onboarding tour.

pub mod geometry;
pub mod tour;

pub use geometry::{Point, Rect, Size};
pub use tour::{AnchorSide, MascotMood, TargetLocator, TourStep};

/// Navigation requests understood by the tour while it is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TourCommand {
    /// Advance to the next step, completing the tour from the last one.
    Next,
    /// Go back one step.
    Previous,
    /// Jump to the step at the given index.
    JumpTo(usize),
    /// Skip or dismiss the tour.
    Close,
}

/// Messages that can be sent to update the application state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Periodic UI tick; drives scheduled tour timers.
    Tick,
    /// Terminal resized
    Resize(u16, u16),
    /// Tour navigation request
    Tour(TourCommand),
    /// Scroll the dashboard canvas by the given number of rows
    Scroll(i32),
}

/// Side effects requested by components.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Open the onboarding tour; `demo` only changes the footer label
    StartTour { demo: bool },
    /// Clear the persisted tour flags
    ResetTour,
    /// Leave the application
    Quit,
}
