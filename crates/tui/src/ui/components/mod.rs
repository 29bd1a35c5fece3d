//! UI components: dashboard canvas and the tour overlay.

pub mod common;
pub mod component;
pub mod dashboard;
pub mod tour;

pub use component::*;
pub use dashboard::DashboardComponent;
pub use tour::TourOverlayComponent;
