//! Dashboard component: draws the panel canvas and turns keys into tour
//! effects and scroll messages.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};
use learnova_types::{Effect, Msg};
use ratatui::{Frame, buffer::Buffer, layout::Rect};

use super::panels::render_panel;
use crate::app::App;
use crate::ui::components::component::Component;
use crate::ui::theme::theme_helpers as th;

const WHEEL_STEP: i32 = 3;

#[derive(Debug, Default)]
pub struct DashboardComponent;

impl DashboardComponent {
    /// Paint every panel onto an off-screen buffer as tall as the canvas.
    fn paint_canvas(app: &App) -> Buffer {
        let area = app.layout.area();
        let canvas_area = Rect::new(0, 0, area.width, app.layout.content_height().max(1));
        let mut canvas = Buffer::empty(canvas_area);
        canvas.set_style(canvas_area, th::panel_style(&*app.theme).bg(app.theme.roles().background));
        for (panel, rect) in app.layout.panels() {
            let rect = rect.intersection(canvas_area);
            if rect.is_empty() {
                continue;
            }
            render_panel(panel, &app.data, &*app.theme, rect, &mut canvas);
        }
        canvas
    }
}

impl Component for DashboardComponent {
    fn handle_key_events(&mut self, app: &mut App, key: KeyEvent) -> Vec<Effect> {
        let page = i32::from(app.layout.area().height.max(1));
        match key.code {
            KeyCode::Char('t') => vec![Effect::StartTour { demo: false }],
            KeyCode::Char('d') => vec![Effect::StartTour { demo: true }],
            KeyCode::Char('R') => vec![Effect::ResetTour],
            KeyCode::Char('q') if !key.modifiers.contains(KeyModifiers::CONTROL) => vec![Effect::Quit],
            KeyCode::Up | KeyCode::Char('k') => app.update(&Msg::Scroll(-1)),
            KeyCode::Down | KeyCode::Char('j') => app.update(&Msg::Scroll(1)),
            KeyCode::PageUp => app.update(&Msg::Scroll(-page)),
            KeyCode::PageDown => app.update(&Msg::Scroll(page)),
            KeyCode::Home => app.update(&Msg::Scroll(-i32::from(app.layout.offset()))),
            _ => Vec::new(),
        }
    }

    fn handle_mouse_events(&mut self, app: &mut App, mouse: MouseEvent) -> Vec<Effect> {
        match mouse.kind {
            MouseEventKind::ScrollUp => app.update(&Msg::Scroll(-WHEEL_STEP)),
            MouseEventKind::ScrollDown => app.update(&Msg::Scroll(WHEEL_STEP)),
            _ => Vec::new(),
        }
    }

    fn render(&mut self, frame: &mut Frame, rect: Rect, app: &mut App) {
        let canvas = Self::paint_canvas(app);
        let offset = app.layout.offset();
        let width = rect.width.min(canvas.area.width);
        let rows = rect.height.min(canvas.area.height.saturating_sub(offset));

        let buf = frame.buffer_mut();
        for row in 0..rows {
            for col in 0..width {
                buf[(rect.x + col, rect.y + row)] = canvas[(col, offset + row)].clone();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::tests::test_app;
    use crossterm::event::KeyEventState;
    use crossterm::event::KeyEventKind;
    use ratatui::{Terminal, backend::TestBackend};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn tour_keys_become_effects() {
        let mut app = test_app(120, 40);
        let mut dashboard = DashboardComponent;
        assert_eq!(
            dashboard.handle_key_events(&mut app, key(KeyCode::Char('t'))),
            vec![Effect::StartTour { demo: false }]
        );
        assert_eq!(
            dashboard.handle_key_events(&mut app, key(KeyCode::Char('d'))),
            vec![Effect::StartTour { demo: true }]
        );
        assert_eq!(dashboard.handle_key_events(&mut app, key(KeyCode::Char('R'))), vec![Effect::ResetTour]);
        assert_eq!(dashboard.handle_key_events(&mut app, key(KeyCode::Char('q'))), vec![Effect::Quit]);
    }

    #[test]
    fn arrows_and_home_move_the_canvas() {
        let mut app = test_app(120, 20);
        let mut dashboard = DashboardComponent;
        dashboard.handle_key_events(&mut app, key(KeyCode::Down));
        dashboard.handle_key_events(&mut app, key(KeyCode::Down));
        assert_eq!(app.layout.offset(), 2);
        dashboard.handle_key_events(&mut app, key(KeyCode::Home));
        assert_eq!(app.layout.offset(), 0);
    }

    #[test]
    fn renders_the_scrolled_window_of_the_canvas() {
        let mut app = test_app(120, 30);
        let mut dashboard = DashboardComponent;
        let area = app.layout.area();
        let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();

        terminal.draw(|frame| dashboard.render(frame, area, &mut app)).unwrap();
        let first_row: String = (0..120u16).map(|x| terminal.backend().buffer()[(x, area.y)].symbol().to_string()).collect();
        assert!(first_row.contains("Quick Actions"));

        app.update(&Msg::Scroll(3));
        terminal.draw(|frame| dashboard.render(frame, area, &mut app)).unwrap();
        let first_row: String = (0..120u16).map(|x| terminal.backend().buffer()[(x, area.y)].symbol().to_string()).collect();
        assert!(!first_row.contains("Quick Actions"));
    }
}
