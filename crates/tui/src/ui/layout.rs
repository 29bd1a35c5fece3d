//! Screen layout for the dashboard host.
//!
//! The screen splits into a fixed header, the scrollable dashboard canvas and
//! a two-row footer (key hints plus the status or mascot line). Both the
//! renderer and the resize handler use [`MainLayout::split`] so the tour
//! measures panels against the same viewport that is drawn.
use ratatui::prelude::*;

pub const HEADER_HEIGHT: u16 = 3;
pub const FOOTER_HEIGHT: u16 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenAreas {
    pub header: Rect,
    pub content: Rect,
    pub footer: Rect,
}

pub struct MainLayout;

impl MainLayout {
    pub fn split(screen: Rect) -> ScreenAreas {
        let [header, content, footer] = Layout::vertical([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Min(0),
            Constraint::Length(FOOTER_HEIGHT),
        ])
        .areas(screen);
        ScreenAreas { header, content, footer }
    }

    /// Canvas area for a terminal of the given size.
    pub fn content_area(width: u16, height: u16) -> Rect {
        Self::split(Rect::new(0, 0, width, height)).content
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_takes_everything_between_header_and_footer() {
        let areas = MainLayout::split(Rect::new(0, 0, 120, 40));
        assert_eq!(areas.header, Rect::new(0, 0, 120, 3));
        assert_eq!(areas.content, Rect::new(0, 3, 120, 35));
        assert_eq!(areas.footer, Rect::new(0, 38, 120, 2));
        assert_eq!(MainLayout::content_area(120, 40), areas.content);
    }
}
