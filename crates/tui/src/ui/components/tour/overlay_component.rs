//! Tour overlay: the dimmed backdrop, the spotlight border and the tooltip.
//!
//! The overlay is mounted by the main view only while the tour is open and
//! owns input during that time. Geometry comes from the engine in viewport
//! units, which for this host are content-area cells; the dashboard layout
//! translates them to screen coordinates.

use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use learnova_engine::{LayoutProvider, OpenTour, centered_anchor};
use learnova_types::{Effect, Msg, TourCommand, TourStep};
use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use super::mascot::mood_remark;
use crate::app::App;
use crate::ui::components::component::Component;
use crate::ui::theme::{Theme, theme_helpers as th};

const CLOSE_LABEL: &str = " ✕ ";
const WHEEL_STEP: i32 = 3;

/// Clickable region recorded during render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct HitArea {
    area: Rect,
    command: TourCommand,
}

#[derive(Debug, Default)]
pub struct TourOverlayComponent {
    hit_areas: Vec<HitArea>,
}

impl TourOverlayComponent {
    fn command_at(&self, column: u16, row: u16) -> Option<TourCommand> {
        let position = Position::new(column, row);
        self.hit_areas
            .iter()
            .find(|hit| hit.area.contains(position))
            .map(|hit| hit.command)
    }

    fn push_hit(&mut self, area: Rect, command: TourCommand) {
        if !area.is_empty() {
            self.hit_areas.push(HitArea { area, command });
        }
    }

    /// Screen rectangle of the tooltip, clamped into the content area.
    fn tooltip_rect(app: &App, open: &OpenTour) -> Rect {
        let area = app.layout.area();
        let config = &app.tour.config().geometry;
        let anchor = open
            .anchor()
            .unwrap_or_else(|| centered_anchor(app.layout.viewport(), config));
        let left = (f64::from(area.x) + anchor.left.round()).max(f64::from(area.x)) as u16;
        let top = (f64::from(area.y) + anchor.top.round()).max(f64::from(area.y)) as u16;
        Rect::new(left, top, config.tooltip.width as u16, config.tooltip.height as u16).intersection(area)
    }

    fn render_backdrop(frame: &mut Frame, rect: Rect, spotlight: Option<Rect>, theme: &dyn Theme) {
        let style = theme.overlay_style();
        let buf = frame.buffer_mut();
        for y in rect.top()..rect.bottom() {
            for x in rect.left()..rect.right() {
                if spotlight.is_some_and(|lit| lit.contains(Position::new(x, y))) {
                    continue;
                }
                buf[(x, y)].set_style(style);
            }
        }
        if let Some(lit) = spotlight {
            let border = Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(theme.spotlight_border_style());
            frame.render_widget(border, lit);
        }
    }

    fn render_tooltip(&mut self, frame: &mut Frame, area: Rect, app: &App, open: &OpenTour, step: &TourStep) {
        let theme = &*app.theme;
        let total = app.tour.catalog().len();
        let index = open.index;

        frame.render_widget(Clear, area);
        let block = th::block(theme, None, true);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let [progress, _, badge, title, _, body, dots, nav, hint] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(inner);

        let percent = (((index + 1) * 100) / total) as u8;
        frame.render_widget(
            Paragraph::new(Line::from(th::progress_bar(theme, percent, usize::from(progress.width)))),
            progress,
        );

        let mood = step.mood();
        let mut badge_spans = Vec::new();
        if let Some(category) = step.category.as_deref() {
            badge_spans.push(Span::styled(format!(" ● {} ", category.to_uppercase()), th::badge_style(theme)));
            badge_spans.push(Span::raw(" "));
        }
        badge_spans.push(Span::styled(mood.glyph(), theme.accent_primary_style()));
        badge_spans.push(Span::styled(format!(" {}", mood_remark(mood)), theme.text_muted_style()));
        frame.render_widget(Paragraph::new(Line::from(badge_spans)), badge);

        frame.render_widget(
            Paragraph::new(Span::styled(
                step.title.as_str(),
                theme.text_primary_style().add_modifier(Modifier::BOLD),
            )),
            title,
        );

        let wrapped: Vec<Line> = textwrap::wrap(&step.content, usize::from(body.width.max(1)))
            .into_iter()
            .map(|line| Line::styled(line.into_owned(), theme.text_secondary_style()))
            .collect();
        frame.render_widget(Paragraph::new(wrapped), body);

        self.render_dots(frame, dots, theme, index, total);
        self.render_nav(frame, nav, theme, index, total);

        frame.render_widget(
            Paragraph::new(Span::styled("Use ← → to navigate • Esc to close", theme.text_muted_style())).centered(),
            hint,
        );

        if open.transitioning {
            frame.buffer_mut().set_style(area, Style::default().add_modifier(Modifier::DIM));
        }
    }

    /// Step dots, centered; each dot jumps to its step.
    fn render_dots(&mut self, frame: &mut Frame, area: Rect, theme: &dyn Theme, index: usize, total: usize) {
        let dot_width = |i: usize| if i == index { 3u16 } else { 1 };
        let full: u16 = (0..total).map(dot_width).sum::<u16>() + total.saturating_sub(1) as u16;
        let mut x = area.x + area.width.saturating_sub(full) / 2;
        for i in 0..total {
            let width = dot_width(i);
            if x + width > area.right() {
                break;
            }
            let (symbol, style) = match i.cmp(&index) {
                std::cmp::Ordering::Equal => ("━━━", theme.accent_emphasis_style()),
                std::cmp::Ordering::Less => ("●", theme.status_info()),
                std::cmp::Ordering::Greater => ("●", Style::default().fg(theme.roles().divider)),
            };
            let dot = Rect::new(x, area.y, width, 1);
            frame.render_widget(Paragraph::new(Span::styled(symbol, style)), dot);
            self.push_hit(dot, TourCommand::JumpTo(i));
            x += width + 1;
        }
    }

    /// "n of N" and Skip on the left, Back and Next on the right.
    fn render_nav(&mut self, frame: &mut Frame, area: Rect, theme: &dyn Theme, index: usize, total: usize) {
        let counter = format!("{} of {}  ", index + 1, total);
        let counter_width = counter.chars().count() as u16;
        frame.render_widget(Paragraph::new(Span::styled(counter, theme.text_muted_style())), area);

        let skip_label = "Skip tour";
        let skip = Rect::new(area.x + counter_width, area.y, skip_label.len() as u16, 1).intersection(area);
        frame.render_widget(
            Paragraph::new(Span::styled(skip_label, theme.text_muted_style().add_modifier(Modifier::UNDERLINED))),
            skip,
        );
        self.push_hit(skip, TourCommand::Close);

        let is_last = index + 1 >= total;
        let next_label = if is_last { " Let's Go! ✓ " } else { " Next → " };
        let next_width = next_label.chars().count() as u16;
        let next = Rect::new(area.right().saturating_sub(next_width), area.y, next_width, 1).intersection(area);
        frame.render_widget(Paragraph::new(Span::styled(next_label, th::button_primary_style(theme, true))), next);
        self.push_hit(next, TourCommand::Next);

        if index > 0 {
            let back_label = "← Back";
            let back_width = back_label.chars().count() as u16;
            let back = Rect::new(next.x.saturating_sub(back_width + 2), area.y, back_width, 1).intersection(area);
            frame.render_widget(
                Paragraph::new(Span::styled(back_label, th::button_secondary_style(theme, true))),
                back,
            );
            self.push_hit(back, TourCommand::Previous);
        }
    }
}

impl Component for TourOverlayComponent {
    fn handle_key_events(&mut self, app: &mut App, key: KeyEvent) -> Vec<Effect> {
        let command = match key.code {
            KeyCode::Right | KeyCode::Enter => TourCommand::Next,
            KeyCode::Left => TourCommand::Previous,
            KeyCode::Esc => TourCommand::Close,
            KeyCode::Char(c) => match c.to_digit(10) {
                Some(digit @ 1..=9) => TourCommand::JumpTo(digit as usize - 1),
                _ => return Vec::new(),
            },
            _ => return Vec::new(),
        };
        app.update(&Msg::Tour(command))
    }

    fn handle_mouse_events(&mut self, app: &mut App, mouse: MouseEvent) -> Vec<Effect> {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => match self.command_at(mouse.column, mouse.row) {
                Some(command) => app.update(&Msg::Tour(command)),
                None => Vec::new(),
            },
            MouseEventKind::ScrollUp => app.update(&Msg::Scroll(-WHEEL_STEP)),
            MouseEventKind::ScrollDown => app.update(&Msg::Scroll(WHEEL_STEP)),
            _ => Vec::new(),
        }
    }

    fn render(&mut self, frame: &mut Frame, rect: Rect, app: &mut App) {
        self.hit_areas.clear();
        let (Some(open), Some(step)) = (app.tour.open_tour().cloned(), app.tour.current_step().cloned()) else {
            return;
        };

        let spotlight = open.spotlight().and_then(|lit| app.layout.viewport_to_screen(&lit));
        Self::render_backdrop(frame, rect, spotlight, &*app.theme);

        let close = Rect::new(
            rect.right().saturating_sub(CLOSE_LABEL.chars().count() as u16 + 1),
            rect.y,
            CLOSE_LABEL.chars().count() as u16,
            1,
        )
        .intersection(rect);
        frame.render_widget(
            Paragraph::new(Span::styled(CLOSE_LABEL, th::button_secondary_style(&*app.theme, true))),
            close,
        );
        self.push_hit(close, TourCommand::Close);

        let tooltip = Self::tooltip_rect(app, &open);
        if !tooltip.is_empty() {
            self.render_tooltip(frame, tooltip, app, &open, &step);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::tests::test_app_with_clock;
    use crossterm::event::{KeyEventKind, KeyEventState, KeyModifiers};
    use ratatui::{Terminal, backend::TestBackend};
    use std::time::Duration;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn keys_drive_the_tour() {
        let (mut app, clock) = test_app_with_clock(120, 40);
        let mut overlay = TourOverlayComponent::default();
        app.start_tour(false);

        overlay.handle_key_events(&mut app, key(KeyCode::Right));
        assert_eq!(app.tour.open_tour().map(|open| open.index), Some(1));
        overlay.handle_key_events(&mut app, key(KeyCode::Char('4')));
        assert_eq!(app.tour.open_tour().map(|open| open.index), Some(3));
        overlay.handle_key_events(&mut app, key(KeyCode::Left));
        assert_eq!(app.tour.open_tour().map(|open| open.index), Some(2));
        overlay.handle_key_events(&mut app, key(KeyCode::Enter));
        assert_eq!(app.tour.open_tour().map(|open| open.index), Some(3));

        clock.advance(Duration::from_millis(300));
        overlay.handle_key_events(&mut app, key(KeyCode::Esc));
        assert!(!app.tour.is_active());
        assert!(app.tour.has_completed_tour());
    }

    #[test]
    fn renders_tooltip_and_clicks_map_to_commands() {
        let (mut app, clock) = test_app_with_clock(120, 40);
        let mut overlay = TourOverlayComponent::default();
        let area = app.layout.area();
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();

        app.start_tour(false);
        clock.advance(Duration::from_millis(300));
        app.update(&Msg::Tick);
        terminal.draw(|frame| overlay.render(frame, area, &mut app)).unwrap();

        let text = screen_text(&terminal);
        assert!(text.contains("Welcome to Training"));
        assert!(text.contains("1 of 12"));
        assert!(text.contains("Next →"));

        let next = overlay
            .hit_areas
            .iter()
            .find(|hit| hit.command == TourCommand::Next)
            .map(|hit| hit.area)
            .unwrap();
        let click = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: next.x,
            row: next.y,
            modifiers: KeyModifiers::NONE,
        };
        overlay.handle_mouse_events(&mut app, click);
        assert_eq!(app.tour.open_tour().map(|open| open.index), Some(1));
    }

    #[test]
    fn backdrop_leaves_the_spotlight_undimmed() {
        let (mut app, clock) = test_app_with_clock(120, 40);
        let mut overlay = TourOverlayComponent::default();
        let area = app.layout.area();
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();

        app.start_tour(false);
        app.update(&Msg::Tour(TourCommand::Next));
        clock.advance(Duration::from_millis(300));
        app.update(&Msg::Tick);
        let lit = app
            .tour
            .open_tour()
            .and_then(|open| open.spotlight())
            .and_then(|rect| app.layout.viewport_to_screen(&rect))
            .unwrap();
        terminal.draw(|frame| overlay.render(frame, area, &mut app)).unwrap();

        let buffer = terminal.backend().buffer();
        let overlay_bg = app.theme.overlay_style().bg;
        assert_ne!(buffer[(lit.x + 2, lit.y + 1)].style().bg, overlay_bg);
        assert_eq!(buffer[(area.x, area.bottom() - 1)].style().bg, overlay_bg);
    }
}
