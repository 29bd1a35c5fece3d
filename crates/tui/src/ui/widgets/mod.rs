//! Small, stateless UI widgets used across components.

pub mod hints;

pub use hints::{DASHBOARD_HINTS, TOUR_HINTS, draw_hints};
