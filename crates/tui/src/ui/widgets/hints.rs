//! Hints widget for displaying keyboard shortcuts.

use ratatui::{prelude::*, widgets::Paragraph};

use crate::ui::theme::Theme;

/// Shortcuts shown while the dashboard has input.
pub const DASHBOARD_HINTS: &[(&str, &str)] = &[
    ("t", "take tour"),
    ("d", "demo tour"),
    ("R", "reset tour"),
    ("↑/↓ PgUp/PgDn", "scroll"),
    ("q", "quit"),
];

/// Shortcuts shown while the tour overlay is mounted.
pub const TOUR_HINTS: &[(&str, &str)] = &[
    ("→/Enter", "next"),
    ("←", "back"),
    ("1-9", "jump"),
    ("Esc", "skip tour"),
];

/// Build a single line of `key label` pairs: keys in the accent color, labels muted.
pub fn hint_line<'a, T: Theme + ?Sized>(theme: &T, hints: &[(&'a str, &'a str)]) -> Line<'a> {
    let mut spans = Vec::with_capacity(hints.len() * 2 + 1);
    spans.push(Span::styled(" ", theme.text_muted_style()));
    for (key, label) in hints {
        spans.push(Span::styled(*key, theme.accent_emphasis_style()));
        spans.push(Span::styled(format!(" {label}   "), theme.text_muted_style()));
    }
    Line::from(spans)
}

/// Renders the hints strip.
pub fn draw_hints<T: Theme + ?Sized>(frame: &mut Frame, area: Rect, theme: &T, hints: &[(&str, &str)]) {
    frame.render_widget(Paragraph::new(hint_line(theme, hints)), area);
}
