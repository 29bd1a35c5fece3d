//! Panel placement and the tour's view of it.
//!
//! Panels are laid out on a virtual canvas as tall as their content needs;
//! the screen shows a window of that canvas at the current scroll offset.
//! [`DashboardLayout`] is the registry of marker → canvas rectangle that the
//! tour engine queries through [`LayoutProvider`]. Bounding boxes are
//! reported relative to the visible window, so a panel scrolled above the
//! viewport has a negative `y`.

use indexmap::IndexMap;
use learnova_engine::{ElementHandle, LayoutError, LayoutProvider};
use learnova_types::{Rect as LayoutRect, Size, TargetLocator};
use ratatui::layout::{Constraint, Layout, Rect};
use tracing::trace;

use super::data::DashboardData;
use crate::ui::components::common::ScrollMetrics;

/// Terminal width at which panels start sharing rows.
pub const WIDE_LAYOUT_MIN_WIDTH: u16 = 100;
const ROW_GAP: u16 = 1;
const SIDE_MARGIN: u16 = 1;
const STAT_CARD_MIN_WIDTH: u16 = 14;
const STAT_CARD_HEIGHT: u16 = 3;

/// Dashboard regions carrying a tour marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Panel {
    QuickActions,
    StatsOverview,
    AlertsPanel,
    AtRiskLearners,
    DeadlinesWidget,
    ScheduleWidget,
    BatchOverview,
    AiInsights,
    LearnerList,
    SupportSection,
}

impl Panel {
    pub const ALL: [Panel; 10] = [
        Panel::QuickActions,
        Panel::StatsOverview,
        Panel::AlertsPanel,
        Panel::AtRiskLearners,
        Panel::DeadlinesWidget,
        Panel::ScheduleWidget,
        Panel::BatchOverview,
        Panel::AiInsights,
        Panel::LearnerList,
        Panel::SupportSection,
    ];

    /// The `data-tour` marker the panel registers under.
    pub fn marker(&self) -> &'static str {
        match self {
            Panel::QuickActions => "quick-actions",
            Panel::StatsOverview => "stats-overview",
            Panel::AlertsPanel => "alerts-panel",
            Panel::AtRiskLearners => "at-risk-learners",
            Panel::DeadlinesWidget => "deadlines-widget",
            Panel::ScheduleWidget => "schedule-widget",
            Panel::BatchOverview => "batch-overview",
            Panel::AiInsights => "ai-insights",
            Panel::LearnerList => "learner-list",
            Panel::SupportSection => "support-section",
        }
    }

    pub fn from_marker(marker: &str) -> Option<Panel> {
        Panel::ALL.into_iter().find(|panel| panel.marker() == marker)
    }

    pub fn title(&self) -> &'static str {
        match self {
            Panel::QuickActions => "Quick Actions",
            Panel::StatsOverview => "Overview",
            Panel::AlertsPanel => "Alerts",
            Panel::AtRiskLearners => "At-Risk Learners",
            Panel::DeadlinesWidget => "Upcoming Deadlines",
            Panel::ScheduleWidget => "Today's Schedule",
            Panel::BatchOverview => "Batch Overview",
            Panel::AiInsights => "AI Insights",
            Panel::LearnerList => "Learners",
            Panel::SupportSection => "Support & Resources",
        }
    }

    /// Rows of content inside the border.
    fn content_rows(&self, data: &DashboardData, width: u16) -> u16 {
        let rows = match self {
            Panel::QuickActions => 1,
            Panel::StatsOverview => stat_rows(data.stats.len(), width.saturating_sub(2)) * STAT_CARD_HEIGHT as usize,
            Panel::AlertsPanel => data.alerts.len(),
            Panel::AtRiskLearners => data.at_risk_learners().count() * 2,
            Panel::DeadlinesWidget => data.deadlines.len(),
            Panel::ScheduleWidget => data.sessions.len() * 2,
            Panel::BatchOverview => data.batches.len() * 2,
            Panel::AiInsights => data.insights.len() * 2,
            Panel::LearnerList => data.learners.len() + 1,
            Panel::SupportSection => data.contacts.len(),
        };
        rows.max(1) as u16
    }

    fn height(&self, data: &DashboardData, width: u16) -> u16 {
        self.content_rows(data, width) + 2
    }
}

/// Number of card rows the stats grid needs at the given inner width.
pub fn stat_rows(cards: usize, inner_width: u16) -> usize {
    let per_row = stat_cards_per_row(cards, inner_width);
    cards.div_ceil(per_row)
}

/// Cards per row: all of them when they fit, otherwise halve until they do.
pub fn stat_cards_per_row(cards: usize, inner_width: u16) -> usize {
    let mut per_row = cards.max(1);
    while per_row > 1 && (per_row as u16).saturating_mul(STAT_CARD_MIN_WIDTH) > inner_width {
        per_row = per_row.div_ceil(2);
    }
    per_row
}

/// Place every panel on a canvas of the given width. Returns the placements and the canvas height.
pub fn plan_panels(width: u16, data: &DashboardData) -> (IndexMap<Panel, Rect>, u16) {
    let inner_width = width.saturating_sub(SIDE_MARGIN * 2);
    let rows: Vec<Vec<Panel>> = if width >= WIDE_LAYOUT_MIN_WIDTH {
        vec![
            vec![Panel::QuickActions],
            vec![Panel::StatsOverview],
            vec![Panel::AlertsPanel, Panel::AtRiskLearners, Panel::DeadlinesWidget],
            vec![Panel::ScheduleWidget, Panel::BatchOverview],
            vec![Panel::AiInsights],
            vec![Panel::LearnerList],
            vec![Panel::SupportSection],
        ]
    } else {
        Panel::ALL.iter().map(|panel| vec![*panel]).collect()
    };

    let mut placements = IndexMap::new();
    let mut y: u16 = 0;
    for row in rows {
        let band = Rect::new(SIDE_MARGIN, 0, inner_width, 1);
        let columns = Layout::horizontal(vec![Constraint::Ratio(1, row.len() as u32); row.len()])
            .spacing(1)
            .split(band);
        let row_height = row
            .iter()
            .zip(columns.iter())
            .map(|(panel, column)| panel.height(data, column.width))
            .max()
            .unwrap_or(0);
        for (panel, column) in row.iter().zip(columns.iter()) {
            placements.insert(*panel, Rect::new(column.x, y, column.width, row_height));
        }
        y = y.saturating_add(row_height + ROW_GAP);
    }
    (placements, y.saturating_sub(ROW_GAP))
}

/// Registry of rendered panels, scrolled through the visible canvas window.
#[derive(Debug, Clone, Default)]
pub struct DashboardLayout {
    area: Rect,
    panels: IndexMap<Panel, Rect>,
    scroll: ScrollMetrics,
}

impl DashboardLayout {
    /// Re-plan the canvas for a new visible area. The scroll offset is kept when still valid.
    pub fn relayout(&mut self, area: Rect, data: &DashboardData) {
        let (panels, content_height) = plan_panels(area.width, data);
        self.area = area;
        self.panels = panels;
        self.scroll.update_extents(content_height, area.height);
        trace!(?area, content_height, offset = self.scroll.offset(), "dashboard relayout");
    }

    /// Visible canvas area in screen coordinates.
    pub fn area(&self) -> Rect {
        self.area
    }

    pub fn offset(&self) -> u16 {
        self.scroll.offset()
    }

    pub fn content_height(&self) -> u16 {
        self.scroll.content_height()
    }

    pub fn scroll_by(&mut self, delta: i32) {
        self.scroll.scroll_lines(delta);
    }

    /// Canvas rectangle of a panel.
    pub fn panel(&self, panel: Panel) -> Option<Rect> {
        self.panels.get(&panel).copied()
    }

    pub fn panels(&self) -> impl Iterator<Item = (Panel, Rect)> + '_ {
        self.panels.iter().map(|(panel, rect)| (*panel, *rect))
    }

    /// Translate a rectangle in viewport units to screen cells, clipped to the visible area.
    pub fn viewport_to_screen(&self, rect: &LayoutRect) -> Option<Rect> {
        let left = i32::from(self.area.x) + rect.x.round() as i32;
        let top = i32::from(self.area.y) + rect.y.round() as i32;
        let right = left + rect.width.round() as i32;
        let bottom = top + rect.height.round() as i32;

        let clip_left = left.max(i32::from(self.area.left()));
        let clip_top = top.max(i32::from(self.area.top()));
        let clip_right = right.min(i32::from(self.area.right()));
        let clip_bottom = bottom.min(i32::from(self.area.bottom()));
        if clip_right <= clip_left || clip_bottom <= clip_top {
            return None;
        }
        Some(Rect::new(
            clip_left as u16,
            clip_top as u16,
            (clip_right - clip_left) as u16,
            (clip_bottom - clip_top) as u16,
        ))
    }
}

impl LayoutProvider for DashboardLayout {
    fn viewport(&self) -> Size {
        Size::new(f64::from(self.area.width), f64::from(self.area.height))
    }

    fn resolve(&self, locator: &TargetLocator) -> Result<ElementHandle, LayoutError> {
        locator
            .marker_name()
            .and_then(Panel::from_marker)
            .filter(|panel| self.panels.contains_key(panel))
            .map(|panel| ElementHandle::new(panel.marker()))
            .ok_or_else(|| LayoutError::NotFound(locator.clone()))
    }

    fn bounding_box(&self, element: &ElementHandle) -> Option<LayoutRect> {
        let rect = Panel::from_marker(element.id()).and_then(|panel| self.panel(panel))?;
        let top = i32::from(rect.y) - i32::from(self.scroll.offset());
        Some(LayoutRect::new(
            f64::from(rect.x),
            f64::from(top),
            f64::from(rect.width),
            f64::from(rect.height),
        ))
    }

    fn scroll_into_view(&mut self, element: &ElementHandle) {
        if let Some(rect) = Panel::from_marker(element.id()).and_then(|panel| self.panel(panel)) {
            self.scroll.center_on(rect.y, rect.height);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout(width: u16, height: u16) -> DashboardLayout {
        let mut layout = DashboardLayout::default();
        layout.relayout(Rect::new(0, 3, width, height), &DashboardData::sample());
        layout
    }

    #[test]
    fn every_panel_is_placed_without_overlap() {
        for width in [60, 140] {
            let layout = layout(width, 30);
            let placed: Vec<_> = layout.panels().collect();
            assert_eq!(placed.len(), Panel::ALL.len());
            for (i, (_, a)) in placed.iter().enumerate() {
                for (_, b) in placed.iter().skip(i + 1) {
                    assert!(!a.intersects(*b), "{a:?} overlaps {b:?} at width {width}");
                }
            }
        }
    }

    #[test]
    fn wide_layout_shares_rows() {
        let layout = layout(140, 30);
        let alerts = layout.panel(Panel::AlertsPanel).unwrap();
        let deadlines = layout.panel(Panel::DeadlinesWidget).unwrap();
        assert_eq!(alerts.y, deadlines.y);
        assert!(alerts.x < deadlines.x);

        let narrow = self::layout(80, 30);
        let alerts = narrow.panel(Panel::AlertsPanel).unwrap();
        let deadlines = narrow.panel(Panel::DeadlinesWidget).unwrap();
        assert!(deadlines.y > alerts.y);
    }

    #[test]
    fn resolves_markers_and_rejects_unknown_ones() {
        let layout = layout(140, 30);
        let handle = layout.resolve(&TargetLocator::parse(r#"[data-tour="ai-insights"]"#)).unwrap();
        assert_eq!(handle.id(), "ai-insights");

        let ghost = TargetLocator::marker("ghost");
        assert_eq!(layout.resolve(&ghost), Err(LayoutError::NotFound(ghost.clone())));
        assert!(layout.resolve(&TargetLocator::Viewport).is_err());
    }

    #[test]
    fn scroll_into_view_centers_and_boxes_follow_the_offset() {
        let mut layout = layout(140, 20);
        let handle = layout.resolve(&TargetLocator::marker("learner-list")).unwrap();
        let canvas = layout.panel(Panel::LearnerList).unwrap();

        layout.scroll_into_view(&handle);
        assert!(layout.offset() > 0);
        let bounds = layout.bounding_box(&handle).unwrap();
        assert_eq!(bounds.y, f64::from(canvas.y) - f64::from(layout.offset()));
        assert_eq!(layout.viewport(), Size::new(140.0, 20.0));
    }

    #[test]
    fn viewport_rects_are_clipped_to_the_visible_area() {
        let layout = layout(100, 20);
        let clipped = layout.viewport_to_screen(&LayoutRect::new(-1.0, -2.0, 10.0, 5.0)).unwrap();
        assert_eq!(clipped, Rect::new(0, 3, 9, 3));
        assert_eq!(layout.viewport_to_screen(&LayoutRect::new(0.0, 25.0, 10.0, 5.0)), None);
    }

    #[test]
    fn stat_grid_halves_until_cards_fit() {
        assert_eq!(stat_cards_per_row(8, 120), 8);
        assert_eq!(stat_cards_per_row(8, 100), 4);
        assert_eq!(stat_cards_per_row(8, 40), 2);
        assert_eq!(stat_rows(8, 40), 4);
    }
}
