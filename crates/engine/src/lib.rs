//! # Learnova Engine
//!
//! The onboarding tour engine for the Learnova coordinator dashboard. It walks
//! a coordinator through the dashboard one panel at a time: a spotlight frames
//! the panel, a tooltip explains it, and durable flags remember whether the
//! tour was already seen.
//!
//! ## Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! use learnova_engine::{ManualClock, StaticLayout, TourCatalog, TourConfig, TourContext, Transition};
//! use learnova_types::{Rect, Size};
//! use learnova_util::{DurableStore, InMemoryStore};
//!
//! let clock = Arc::new(ManualClock::new());
//! let store: Arc<dyn DurableStore> = Arc::new(InMemoryStore::new());
//! let mut tour = TourContext::new(TourCatalog::coordinator(), Some(store), TourConfig::default(), clock.clone());
//! let mut layout = StaticLayout::new(Size::new(1280.0, 800.0))
//!     .with_element("quick-actions", Rect::new(32.0, 96.0, 1216.0, 120.0));
//!
//! assert!(tour.initialize().auto_start);
//! clock.advance(Duration::from_secs(2));
//! assert_eq!(tour.tick(&mut layout), Transition::Opened);
//! assert_eq!(tour.next(), Transition::Moved { from: 0, to: 1 });
//! ```
//!
//! ## Architecture
//!
//! - **`catalog`**: Ordered, validated list of tour steps, embedded or loaded from JSON/YAML
//! - **`layout`**: The `LayoutProvider` seam hosts implement over their rendered panels
//! - **`geometry`**: Spotlight rectangle and clamped tooltip anchor computation
//! - **`scheduler`**: Cancellable one-shot timers over an injectable clock
//! - **`navigation`**: The step state machine
//! - **`persistence`**: First-visit and completion flags over a `DurableStore`
//! - **`context`**: `TourContext`, the facade the application root owns

pub mod catalog;
pub mod context;
pub mod geometry;
pub mod layout;
pub mod navigation;
pub mod persistence;
pub mod scheduler;

pub use catalog::{CatalogError, TourCatalog};
pub use context::{TourConfig, TourContext, TourStatus};
pub use geometry::{GeometryConfig, GeometryError, SpotlightGeometry, centered_anchor, compute_geometry};
pub use layout::{ElementHandle, LayoutError, LayoutProvider, StaticLayout};
pub use navigation::{OpenTour, TourNavigator, TourState, Transition};
pub use persistence::{FIRST_VISIT_KEY, InitOutcome, TOUR_COMPLETED_KEY, TourPersistence};
pub use scheduler::{Clock, ManualClock, Scheduler, SystemClock, TourTimer};
