//! Spotlight geometry.
//!
//! Translates a [`TourStep`] plus the live layout into the padded spotlight
//! rectangle and the tooltip anchor. Layout is read at call time and never
//! cached, because the dashboard reflows as its panels change.

use learnova_types::{AnchorSide, Point, Rect, Size, TargetLocator, TourStep};
use thiserror::Error;
use tracing::trace;

use crate::layout::{LayoutError, LayoutProvider};

/// Sizing constants used when placing the tooltip.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeometryConfig {
    /// Assumed tooltip extent.
    pub tooltip: Size,
    /// Gap between the highlighted element and the tooltip, and the minimum
    /// distance kept from the viewport edges.
    pub margin: f64,
    /// Spotlight padding for steps that do not specify one.
    pub default_padding: f64,
}

impl Default for GeometryConfig {
    /// Pixel-based values for browser-like hosts.
    fn default() -> Self {
        Self {
            tooltip: Size::new(440.0, 280.0),
            margin: 24.0,
            default_padding: 8.0,
        }
    }
}

impl GeometryConfig {
    /// Cell-based values for the terminal host.
    pub fn terminal() -> Self {
        Self {
            tooltip: Size::new(48.0, 16.0),
            margin: 2.0,
            default_padding: 1.0,
        }
    }
}

/// Result of a geometry computation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpotlightGeometry {
    /// Padded highlight rectangle; `None` when the step frames the whole viewport.
    pub spotlight: Option<Rect>,
    /// Tooltip top/left in viewport coordinates.
    pub anchor: Point,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeometryError {
    #[error("tour target {0} is not rendered")]
    TargetNotFound(TargetLocator),
}

impl From<LayoutError> for GeometryError {
    fn from(error: LayoutError) -> Self {
        match error {
            LayoutError::NotFound(locator) => Self::TargetNotFound(locator),
        }
    }
}

/// Compute the spotlight and tooltip anchor for `step`.
///
/// Viewport-targeted and center-anchored steps produce no spotlight and a
/// centered tooltip. Other steps resolve their target, ask the host to scroll
/// it into view, then read its box and place the tooltip on the preferred
/// side, clamped inside the viewport.
pub fn compute_geometry(
    step: &TourStep,
    layout: &mut dyn LayoutProvider,
    config: &GeometryConfig,
) -> Result<SpotlightGeometry, GeometryError> {
    let viewport = layout.viewport();
    if step.targets_viewport() {
        return Ok(SpotlightGeometry {
            spotlight: None,
            anchor: centered_anchor(viewport, config),
        });
    }

    let element = layout.resolve(&step.target)?;
    layout.scroll_into_view(&element);
    let bounds = layout
        .bounding_box(&element)
        .ok_or_else(|| GeometryError::TargetNotFound(step.target.clone()))?;

    let padding = step.spotlight_padding.unwrap_or(config.default_padding);
    let spotlight = bounds.expand(padding);
    let anchor = clamp_to_viewport(preferred_anchor(step.position, &bounds, config), viewport, config);
    trace!(step = %step.id, ?spotlight, ?anchor, "computed tour geometry");

    Ok(SpotlightGeometry {
        spotlight: Some(spotlight),
        anchor,
    })
}

/// Anchor that centers the tooltip in the viewport.
pub fn centered_anchor(viewport: Size, config: &GeometryConfig) -> Point {
    Point::new(
        viewport.height / 2.0 - config.tooltip.height / 2.0,
        viewport.width / 2.0 - config.tooltip.width / 2.0,
    )
}

/// Unclamped anchor on the preferred side of `bounds`.
fn preferred_anchor(side: AnchorSide, bounds: &Rect, config: &GeometryConfig) -> Point {
    let Size { width, height } = config.tooltip;
    let margin = config.margin;
    match side {
        AnchorSide::Top => Point::new(bounds.top() - height - margin, bounds.center_x() - width / 2.0),
        AnchorSide::Bottom => Point::new(bounds.bottom() + margin, bounds.center_x() - width / 2.0),
        AnchorSide::Left => Point::new(bounds.center_y() - height / 2.0, bounds.left() - width - margin),
        AnchorSide::Right => Point::new(bounds.center_y() - height / 2.0, bounds.right() + margin),
        AnchorSide::Center => Point::new(bounds.center_y() - height / 2.0, bounds.center_x() - width / 2.0),
    }
}

fn clamp_to_viewport(anchor: Point, viewport: Size, config: &GeometryConfig) -> Point {
    Point::new(
        clamp_axis(anchor.top, viewport.height, config.tooltip.height, config.margin),
        clamp_axis(anchor.left, viewport.width, config.tooltip.width, config.margin),
    )
}

/// Clamp into `[margin, extent - tooltip - margin]`.
///
/// When the viewport is smaller than the tooltip the upper bound drops below
/// the lower one; the lower bound wins.
fn clamp_axis(value: f64, extent: f64, tooltip: f64, margin: f64) -> f64 {
    value.min(extent - tooltip - margin).max(margin)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::StaticLayout;

    const VIEWPORT: Size = Size::new(1280.0, 800.0);

    fn step(position: AnchorSide) -> TourStep {
        TourStep::new("panel", "#panel", "Panel", "Look here", position)
    }

    #[test]
    fn center_steps_have_no_spotlight_and_center_the_tooltip() {
        let mut layout = StaticLayout::new(VIEWPORT);
        let welcome = TourStep::new("welcome", "body", "Hi", "Welcome", AnchorSide::Center);

        let geometry = compute_geometry(&welcome, &mut layout, &GeometryConfig::default()).unwrap();
        assert_eq!(geometry.spotlight, None);
        assert_eq!(geometry.anchor, Point::new(400.0 - 140.0, 640.0 - 220.0));
        assert!(layout.scroll_requests().is_empty());
    }

    #[test]
    fn bottom_anchor_sits_below_and_centers_horizontally() {
        let mut layout = StaticLayout::new(VIEWPORT).with_element("panel", Rect::new(300.0, 100.0, 400.0, 120.0));

        let geometry = compute_geometry(&step(AnchorSide::Bottom), &mut layout, &GeometryConfig::default()).unwrap();
        assert_eq!(geometry.spotlight, Some(Rect::new(292.0, 92.0, 416.0, 136.0)));
        assert_eq!(geometry.anchor, Point::new(220.0 + 24.0, 500.0 - 220.0));
        assert_eq!(layout.scroll_requests().len(), 1);
    }

    #[test]
    fn explicit_padding_overrides_default() {
        let mut layout = StaticLayout::new(VIEWPORT).with_element("panel", Rect::new(300.0, 400.0, 100.0, 100.0));
        let padded = step(AnchorSide::Top).with_padding(15.0);

        let geometry = compute_geometry(&padded, &mut layout, &GeometryConfig::default()).unwrap();
        assert_eq!(geometry.spotlight, Some(Rect::new(285.0, 385.0, 130.0, 130.0)));
        // Anchor is measured from the unpadded box.
        assert_eq!(geometry.anchor.top, 400.0 - 280.0 - 24.0);
    }

    #[test]
    fn left_and_right_anchors_center_vertically() {
        let bounds = Rect::new(600.0, 300.0, 100.0, 200.0);
        let mut layout = StaticLayout::new(VIEWPORT).with_element("panel", bounds);
        let config = GeometryConfig::default();

        let left = compute_geometry(&step(AnchorSide::Left), &mut layout, &config).unwrap();
        assert_eq!(left.anchor, Point::new(400.0 - 140.0, 600.0 - 440.0 - 24.0));

        let right = compute_geometry(&step(AnchorSide::Right), &mut layout, &config).unwrap();
        assert_eq!(right.anchor, Point::new(400.0 - 140.0, 700.0 + 24.0));
    }

    #[test]
    fn right_anchor_flush_against_right_edge_is_clamped() {
        let mut layout = StaticLayout::new(VIEWPORT).with_element("panel", Rect::new(1180.0, 10.0, 100.0, 40.0));

        let geometry = compute_geometry(&step(AnchorSide::Right), &mut layout, &GeometryConfig::default()).unwrap();
        assert_eq!(geometry.anchor.left, 1280.0 - 440.0 - 24.0);
        // Vertical placement would start above the viewport; it clamps to the margin.
        assert_eq!(geometry.anchor.top, 24.0);
    }

    #[test]
    fn tiny_viewport_clamps_to_margin_instead_of_panicking() {
        let mut layout = StaticLayout::new(Size::new(300.0, 200.0)).with_element("panel", Rect::new(10.0, 10.0, 50.0, 50.0));

        let geometry = compute_geometry(&step(AnchorSide::Bottom), &mut layout, &GeometryConfig::default()).unwrap();
        assert_eq!(geometry.anchor, Point::new(24.0, 24.0));
    }

    #[test]
    fn missing_target_is_reported() {
        let mut layout = StaticLayout::new(VIEWPORT);
        let result = compute_geometry(&step(AnchorSide::Bottom), &mut layout, &GeometryConfig::default());
        assert_eq!(result, Err(GeometryError::TargetNotFound(TargetLocator::marker("panel"))));
    }
}
