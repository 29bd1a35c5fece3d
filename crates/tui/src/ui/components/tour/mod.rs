//! The onboarding tour overlay and its mascot.

pub mod mascot;
pub mod overlay_component;

pub use mascot::mascot_line;
pub use overlay_component::TourOverlayComponent;
