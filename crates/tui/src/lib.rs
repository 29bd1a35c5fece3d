//! # Learnova Dashboard TUI
//!
//! Terminal host for the coordinator dashboard and its onboarding tour. It
//! renders the dashboard panels from sample data, registers every panel's
//! marker and rectangle so the tour engine can locate it, and draws the tour
//! overlay (dimmed backdrop, spotlight border and tooltip) while the tour is
//! open.
//!
//! ## Architecture
//!
//! `App` owns the [`TourContext`] and the dashboard layout registry. The root
//! `MainView` routes input to the dashboard or, while the tour is open, to the
//! tour overlay, which it mounts and unmounts as the tour state changes.

mod app;
mod ui;

use anyhow::Result;
use learnova_engine::TourContext;

pub use ui::runtime::RunOptions;
pub use ui::theme::THEME_ENV;

/// Runs the dashboard until the user quits.
///
/// The tour context is initialized here, so a first visit schedules the
/// auto-start. With `options.demo` set the tour opens immediately in demo
/// mode.
///
/// # Errors
///
/// Returns an error when the terminal cannot be put into raw mode, resized
/// or drawn to.
///
/// # Example
///
/// ```no_run
/// use learnova_engine::{TourCatalog, TourConfig, TourContext};
/// use learnova_tui::{RunOptions, run};
///
/// #[tokio::main]
/// async fn main() -> anyhow::Result<()> {
///     let tour = TourContext::with_system_clock(TourCatalog::coordinator(), None, TourConfig::terminal());
///     run(tour, RunOptions::default()).await
/// }
/// ```
pub async fn run(tour: TourContext, options: RunOptions) -> Result<()> {
    ui::runtime::run_app(tour, options).await
}
