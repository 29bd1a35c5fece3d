//! Tour step descriptors.
//!
//! A [`TourStep`] is authored content: it names the dashboard region to
//! highlight, the text to show, and where the tooltip prefers to sit. Steps
//! are immutable once a catalog is built.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Matches the marker attribute syntax used by the dashboard, e.g. `[data-tour="alerts-panel"]`.
static MARKER_SELECTOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^\[\s*data-tour\s*=\s*["']?([^"'\]]+?)["']?\s*\]$"#).expect("marker selector regex"));

/// Identifies the region a tour step points at.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TargetLocator {
    /// The whole viewport; the step frames the tour instead of pointing at a panel.
    Viewport,
    /// A panel carrying the given `data-tour` marker.
    Marker(String),
}

impl TargetLocator {
    /// Parse a locator string.
    ///
    /// `body`, `viewport` and `*` map to [`TargetLocator::Viewport`].
    /// `[data-tour="name"]`, `#name` and a bare `name` map to a marker.
    pub fn parse(input: &str) -> Self {
        let trimmed = input.trim();
        match trimmed {
            "" | "body" | "viewport" | "*" => Self::Viewport,
            _ => match MARKER_SELECTOR.captures(trimmed) {
                Some(captures) => Self::Marker(captures[1].trim().to_string()),
                None => Self::Marker(trimmed.strip_prefix('#').unwrap_or(trimmed).to_string()),
            },
        }
    }

    /// Convenience constructor for a marker locator.
    pub fn marker(name: impl Into<String>) -> Self {
        Self::Marker(name.into())
    }

    pub fn is_viewport(&self) -> bool {
        matches!(self, Self::Viewport)
    }

    /// Marker name, if this locator names a panel.
    pub fn marker_name(&self) -> Option<&str> {
        match self {
            Self::Viewport => None,
            Self::Marker(name) => Some(name),
        }
    }
}

impl From<String> for TargetLocator {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<&str> for TargetLocator {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}

impl From<TargetLocator> for String {
    fn from(value: TargetLocator) -> Self {
        value.to_string()
    }
}

impl fmt::Display for TargetLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Viewport => f.write_str("body"),
            Self::Marker(name) => write!(f, "[data-tour=\"{name}\"]"),
        }
    }
}

/// Preferred side of the spotlight on which the tooltip is anchored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnchorSide {
    Top,
    Bottom,
    Left,
    Right,
    #[default]
    Center,
}

impl fmt::Display for AnchorSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Top => "top",
            Self::Bottom => "bottom",
            Self::Left => "left",
            Self::Right => "right",
            Self::Center => "center",
        };
        f.write_str(label)
    }
}

/// Cosmetic mood of the tour mascot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MascotMood {
    Wave,
    Point,
    Celebrate,
    Think,
    #[default]
    Happy,
}

impl MascotMood {
    /// Short glyph used by text hosts to render the mascot.
    pub fn glyph(&self) -> &'static str {
        match self {
            Self::Wave => "(^o^)/",
            Self::Point => "(o_o)>",
            Self::Celebrate => "\\(^O^)/",
            Self::Think => "(o.o)?",
            Self::Happy => "(^_^)",
        }
    }
}

/// One step of the onboarding tour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TourStep {
    /// Unique identifier within a catalog.
    pub id: String,
    /// Region to highlight.
    pub target: TargetLocator,
    pub title: String,
    /// Body text shown in the tooltip.
    pub content: String,
    /// Preferred tooltip side.
    #[serde(default)]
    pub position: AnchorSide,
    /// Extra padding around the highlighted region; the geometry default applies when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spotlight_padding: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mascot_mood: Option<MascotMood>,
    /// Cosmetic grouping shown as a badge.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl TourStep {
    /// Build a step with the required fields; optional fields start empty.
    pub fn new(
        id: impl Into<String>,
        target: impl Into<TargetLocator>,
        title: impl Into<String>,
        content: impl Into<String>,
        position: AnchorSide,
    ) -> Self {
        Self {
            id: id.into(),
            target: target.into(),
            title: title.into(),
            content: content.into(),
            position,
            spotlight_padding: None,
            mascot_mood: None,
            category: None,
        }
    }

    pub fn with_padding(mut self, padding: f64) -> Self {
        self.spotlight_padding = Some(padding);
        self
    }

    pub fn with_mood(mut self, mood: MascotMood) -> Self {
        self.mascot_mood = Some(mood);
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Mood to display, falling back to [`MascotMood::Happy`].
    pub fn mood(&self) -> MascotMood {
        self.mascot_mood.unwrap_or_default()
    }

    /// Whether this step frames the tour rather than pointing at a panel.
    pub fn targets_viewport(&self) -> bool {
        self.target.is_viewport() || self.position == AnchorSide::Center
    }
}
