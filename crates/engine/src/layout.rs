//! Layout provider seam.
//!
//! The geometry engine never touches a rendered document directly. Hosts
//! implement [`LayoutProvider`] over whatever they render (the TUI registers
//! panel rectangles each frame); tests use [`StaticLayout`] with canned
//! rectangles.

use indexmap::IndexMap;
use learnova_types::{Rect, Size, TargetLocator};
use thiserror::Error;

/// Errors raised while resolving a locator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    /// No rendered element carries the requested marker.
    #[error("no element matches {0}")]
    NotFound(TargetLocator),
}

/// Opaque reference to a resolved element.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ElementHandle(String);

impl ElementHandle {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn id(&self) -> &str {
        &self.0
    }
}

/// Read access to the live layout of the host document.
pub trait LayoutProvider {
    /// Current viewport extent.
    fn viewport(&self) -> Size;

    /// Resolve a locator to exactly one element.
    fn resolve(&self, locator: &TargetLocator) -> Result<ElementHandle, LayoutError>;

    /// Bounding box of a resolved element in viewport coordinates.
    ///
    /// Returns `None` when the element disappeared since it was resolved.
    fn bounding_box(&self, element: &ElementHandle) -> Option<Rect>;

    /// Ask the host to bring the element to the vertical center of the viewport.
    ///
    /// Fire-and-forget: hosts may animate or ignore the request.
    fn scroll_into_view(&mut self, element: &ElementHandle);
}

/// In-memory layout with fixed rectangles.
#[derive(Debug, Clone, Default)]
pub struct StaticLayout {
    viewport: Size,
    elements: IndexMap<String, Rect>,
    scroll_requests: Vec<ElementHandle>,
}

impl StaticLayout {
    pub fn new(viewport: Size) -> Self {
        Self {
            viewport,
            elements: IndexMap::new(),
            scroll_requests: Vec::new(),
        }
    }

    /// Register an element under its marker name.
    pub fn with_element(mut self, marker: impl Into<String>, rect: Rect) -> Self {
        self.insert(marker, rect);
        self
    }

    pub fn insert(&mut self, marker: impl Into<String>, rect: Rect) {
        self.elements.insert(marker.into(), rect);
    }

    pub fn remove(&mut self, marker: &str) {
        self.elements.shift_remove(marker);
    }

    pub fn set_viewport(&mut self, viewport: Size) {
        self.viewport = viewport;
    }

    /// Scroll requests received so far, oldest first.
    pub fn scroll_requests(&self) -> &[ElementHandle] {
        &self.scroll_requests
    }
}

impl LayoutProvider for StaticLayout {
    fn viewport(&self) -> Size {
        self.viewport
    }

    fn resolve(&self, locator: &TargetLocator) -> Result<ElementHandle, LayoutError> {
        locator
            .marker_name()
            .filter(|name| self.elements.contains_key(*name))
            .map(ElementHandle::new)
            .ok_or_else(|| LayoutError::NotFound(locator.clone()))
    }

    fn bounding_box(&self, element: &ElementHandle) -> Option<Rect> {
        self.elements.get(element.id()).copied()
    }

    fn scroll_into_view(&mut self, element: &ElementHandle) {
        self.scroll_requests.push(element.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn static_layout_resolves_registered_markers_only() {
        let layout = StaticLayout::new(Size::new(100.0, 50.0)).with_element("panel", Rect::new(1.0, 2.0, 3.0, 4.0));

        let handle = layout.resolve(&TargetLocator::marker("panel")).unwrap();
        assert_eq!(layout.bounding_box(&handle), Some(Rect::new(1.0, 2.0, 3.0, 4.0)));

        let missing = TargetLocator::marker("ghost");
        assert_eq!(layout.resolve(&missing), Err(LayoutError::NotFound(missing.clone())));
        assert!(layout.resolve(&TargetLocator::Viewport).is_err());
    }
}
