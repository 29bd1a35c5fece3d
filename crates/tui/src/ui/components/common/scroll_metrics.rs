//! Vertical scroll bookkeeping for the dashboard canvas.
//!
//! Tracks content height, viewport height and the current offset in terminal
//! rows, and keeps the offset inside `[0, content - viewport]` whatever the
//! caller asks for.

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScrollMetrics {
    offset: u16,
    content_height: u16,
    viewport_height: u16,
}

impl ScrollMetrics {
    pub const fn offset(&self) -> u16 {
        self.offset
    }

    pub const fn content_height(&self) -> u16 {
        self.content_height
    }

    /// Returns the maximum valid scroll offset.
    pub fn max_offset(&self) -> u16 {
        self.content_height.saturating_sub(self.viewport_height)
    }

    pub fn is_scrollable(&self) -> bool {
        self.content_height > self.viewport_height && self.viewport_height > 0
    }

    /// Updates both extents and clamps the current offset.
    pub fn update_extents(&mut self, content_height: u16, viewport_height: u16) {
        self.content_height = content_height;
        self.viewport_height = viewport_height;
        self.clamp_offset();
    }

    /// Scrolls by relative line count (`+` down, `-` up).
    pub fn scroll_lines(&mut self, delta: i32) {
        if delta == 0 || !self.is_scrollable() {
            return;
        }
        let next = (i32::from(self.offset) + delta).clamp(0, i32::from(self.max_offset()));
        self.offset = next as u16;
    }

    /// Scroll so the band `[top, top + height)` sits in the vertical center of the viewport.
    pub fn center_on(&mut self, top: u16, height: u16) {
        let band_center = i32::from(top) + i32::from(height) / 2;
        let target = band_center - i32::from(self.viewport_height) / 2;
        self.offset = target.clamp(0, i32::from(self.max_offset())) as u16;
    }

    fn clamp_offset(&mut self) {
        self.offset = self.offset.min(self.max_offset());
    }
}

#[cfg(test)]
mod tests {
    use super::ScrollMetrics;

    #[test]
    fn scrolling_clamps_to_bounds() {
        let mut metrics = ScrollMetrics::default();
        metrics.update_extents(20, 5);

        metrics.scroll_lines(3);
        assert_eq!(metrics.offset(), 3);

        metrics.scroll_lines(-10);
        assert_eq!(metrics.offset(), 0);

        metrics.scroll_lines(100);
        assert_eq!(metrics.offset(), 15);
    }

    #[test]
    fn content_shorter_than_viewport_does_not_scroll() {
        let mut metrics = ScrollMetrics::default();
        metrics.update_extents(4, 10);
        metrics.scroll_lines(3);
        assert_eq!(metrics.offset(), 0);
        assert!(!metrics.is_scrollable());
    }

    #[test]
    fn center_on_clamps_at_both_ends() {
        let mut metrics = ScrollMetrics::default();
        metrics.update_extents(60, 20);

        metrics.center_on(30, 10);
        assert_eq!(metrics.offset(), 25);

        metrics.center_on(0, 4);
        assert_eq!(metrics.offset(), 0);

        metrics.center_on(55, 5);
        assert_eq!(metrics.offset(), 40);
    }

    #[test]
    fn shrinking_content_clamps_offset() {
        let mut metrics = ScrollMetrics::default();
        metrics.update_extents(60, 20);
        metrics.scroll_lines(40);
        metrics.update_extents(30, 20);
        assert_eq!(metrics.offset(), 10);
    }
}
