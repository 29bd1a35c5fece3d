//! The coordinator dashboard: sample data, panel placement and rendering.

pub mod dashboard_component;
pub mod data;
pub mod layout;
pub mod panels;

pub use dashboard_component::DashboardComponent;
pub use data::DashboardData;
pub use layout::DashboardLayout;
