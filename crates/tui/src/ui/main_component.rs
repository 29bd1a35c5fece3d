use crossterm::event::{KeyEvent, MouseEvent};
use learnova_types::{Effect, Msg};
use ratatui::{
    prelude::*,
    style::Style,
    widgets::{Block, Borders, Paragraph},
};
use tracing::debug;

use super::components::tour::mascot_line;
use super::components::{Component, DashboardComponent, TourOverlayComponent};
use super::layout::MainLayout;
use super::widgets::{DASHBOARD_HINTS, TOUR_HINTS, draw_hints};
use crate::app::App;

/// Root view: header, dashboard canvas, footer and, while the tour is open,
/// the tour overlay on top.
#[derive(Default, Debug)]
pub struct MainView {
    dashboard: DashboardComponent,
    /// Mounted only while the tour is active
    tour_overlay: Option<TourOverlayComponent>,
}

impl MainView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_overlay_mounted(&self) -> bool {
        self.tour_overlay.is_some()
    }

    /// Mount or unmount the tour overlay to follow the tour state.
    pub fn sync_overlay(&mut self, app: &App) {
        match (app.tour.is_active(), self.tour_overlay.is_some()) {
            (true, false) => {
                debug!("mounting tour overlay");
                self.tour_overlay = Some(TourOverlayComponent::default());
            }
            (false, true) => {
                debug!("unmounting tour overlay");
                self.tour_overlay = None;
            }
            _ => {}
        }
    }

    fn render_header(&self, frame: &mut Frame, area: Rect, app: &App) {
        let theme = &*app.theme;
        let tour_state = if app.tour.is_active() {
            Span::styled("tour in progress", theme.status_info())
        } else if app.tour.has_completed_tour() {
            Span::styled("tour completed", theme.status_success())
        } else {
            Span::styled("new here? press t for a tour", theme.status_warning())
        };
        let lines = vec![
            Line::from(vec![
                Span::styled(" Learnova ", theme.accent_emphasis_style()),
                Span::styled("Training Coordinator Dashboard", theme.text_primary_style().add_modifier(Modifier::BOLD)),
            ]),
            Line::from(vec![
                Span::styled(" Welcome back! ", theme.text_muted_style()),
                tour_state,
            ]),
        ];
        let header = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(theme.roles().divider)),
        );
        frame.render_widget(header, area);
    }

    fn render_footer(&self, frame: &mut Frame, area: Rect, app: &App) {
        let theme = &*app.theme;
        let [hints, message] = Layout::vertical([Constraint::Length(1), Constraint::Length(1)]).areas(area);
        match app.tour.open_tour() {
            Some(open) if self.is_overlay_mounted() => {
                draw_hints(frame, hints, theme, TOUR_HINTS);
                frame.render_widget(Paragraph::new(mascot_line(theme, open.demo_mode)), message);
            }
            _ => {
                draw_hints(frame, hints, theme, DASHBOARD_HINTS);
                if let Some(status) = app.status.as_deref() {
                    frame.render_widget(Paragraph::new(Span::styled(format!(" {status}"), theme.status_info())), message);
                }
            }
        }
    }
}

impl Component for MainView {
    fn handle_message(&mut self, app: &mut App, msg: Msg) -> Vec<Effect> {
        let effects = app.update(&msg);
        self.sync_overlay(app);
        effects
    }

    fn handle_key_events(&mut self, app: &mut App, key: KeyEvent) -> Vec<Effect> {
        let effects = match self.tour_overlay.as_mut() {
            Some(overlay) => overlay.handle_key_events(app, key),
            None => self.dashboard.handle_key_events(app, key),
        };
        self.sync_overlay(app);
        effects
    }

    fn handle_mouse_events(&mut self, app: &mut App, mouse: MouseEvent) -> Vec<Effect> {
        let effects = match self.tour_overlay.as_mut() {
            Some(overlay) => overlay.handle_mouse_events(app, mouse),
            None => self.dashboard.handle_mouse_events(app, mouse),
        };
        self.sync_overlay(app);
        effects
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, app: &mut App) {
        self.sync_overlay(app);
        let bg_fill = Paragraph::new("").style(Style::default().bg(app.theme.roles().background));
        frame.render_widget(bg_fill, area);

        let areas = MainLayout::split(area);
        self.render_header(frame, areas.header, app);
        self.dashboard.render(frame, areas.content, app);
        if let Some(overlay) = self.tour_overlay.as_mut() {
            overlay.render(frame, areas.header.union(areas.content), app);
        }
        self.render_footer(frame, areas.footer, app);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::tests::test_app_with_clock;
    use crossterm::event::{KeyCode, KeyEventKind, KeyEventState, KeyModifiers};
    use learnova_types::TourCommand;
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

    fn footer_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        let y = buffer.area.bottom() - 1;
        (0..buffer.area.width).map(|x| buffer[(x, y)].symbol()).collect()
    }

    #[test]
    fn overlay_mounts_with_the_tour_and_unmounts_on_close() {
        let (mut app, clock) = test_app_with_clock(120, 40);
        let mut view = MainView::new();
        app.tour.initialize();

        view.handle_message(&mut app, Msg::Tick);
        assert!(!view.is_overlay_mounted());

        clock.advance(Duration::from_millis(2000));
        view.handle_message(&mut app, Msg::Tick);
        assert!(view.is_overlay_mounted());

        view.handle_key_events(&mut app, key(KeyCode::Esc));
        assert!(!view.is_overlay_mounted());
        assert!(app.tour.has_completed_tour());
    }

    #[test]
    fn dashboard_keys_are_ignored_while_the_overlay_owns_input() {
        let (mut app, _clock) = test_app_with_clock(120, 40);
        let mut view = MainView::new();
        app.start_tour(false);
        view.sync_overlay(&app);

        assert!(view.handle_key_events(&mut app, key(KeyCode::Char('q'))).is_empty());
        view.handle_message(&mut app, Msg::Tour(TourCommand::JumpTo(2)));
        assert_eq!(app.tour.open_tour().map(|open| open.index), Some(2));
    }

    #[test]
    fn footer_shows_the_mascot_in_demo_mode() {
        let (mut app, clock) = test_app_with_clock(120, 40);
        let mut view = MainView::new();
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();

        terminal.draw(|frame| view.render(frame, frame.area(), &mut app)).unwrap();
        assert!(!footer_text(&terminal).contains("Demo Mode"));

        app.start_tour(true);
        clock.advance(Duration::from_millis(300));
        view.handle_message(&mut app, Msg::Tick);
        terminal.draw(|frame| view.render(frame, frame.area(), &mut app)).unwrap();
        assert!(footer_text(&terminal).contains("Demo Mode"));
    }
}
