//! UI rendering module for the dashboard host.
//!
//! This module provides the screen layout, the dashboard and tour overlay
//! components, themes, widgets and the runtime that drives them.

pub mod components;
pub mod layout;
pub mod main_component;
pub mod runtime;
pub mod theme;
pub mod widgets;
