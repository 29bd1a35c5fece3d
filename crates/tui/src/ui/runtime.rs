//! Runtime: event loop and input routing for the dashboard.
//!
//! Responsibilities
//! - Own the terminal lifecycle (enter/leave alternate screen, raw mode).
//! - Drive a single event loop over terminal input, a ticker and Ctrl+C.
//! - Route input to the main view and execute the returned `Effect`s.
//!
//! Ticking strategy
//! - A dedicated input thread blocks on `crossterm::event::read()` and
//!   forwards events over a channel.
//! - The ticker runs fast (50 ms) while a tour timer is pending so auto-start
//!   and step transitions fire close to their deadlines, and idles at 5 s
//!   otherwise.
use std::io::Stdout;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use learnova_engine::TourContext;
use learnova_types::{Effect, Msg};
use ratatui::{Terminal, prelude::*};
use tokio::{
    signal,
    sync::mpsc,
    time::{self, MissedTickBehavior},
};
use tracing::{debug, info, warn};

use crate::app::App;
use crate::ui::components::component::Component;
use crate::ui::main_component::MainView;
use crate::ui::theme;

const FAST_TICK: Duration = Duration::from_millis(50);
const IDLE_TICK: Duration = Duration::from_millis(5000);

/// Options for a dashboard session.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// Open the tour immediately, labelled as a demo.
    pub demo: bool,
}

/// Spawn a dedicated input thread that blocks on terminal input and forwards
/// `crossterm` events over a Tokio channel.
fn spawn_input_thread() -> mpsc::Receiver<Event> {
    let (sender, receiver) = mpsc::channel(500);
    thread::spawn(move || {
        loop {
            match event::read() {
                Ok(event) => {
                    if let Err(e) = sender.blocking_send(event) {
                        debug!("input channel closed: {}", e);
                        break;
                    }
                }
                Err(e) => {
                    warn!("Failed to read event: {}", e);
                    break;
                }
            }
        }
    });
    receiver
}

/// Put the terminal into raw mode and enter the alternate screen.
fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore terminal settings and leave the alternate screen.
fn cleanup_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;
    Ok(())
}

fn render(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App, main_view: &mut MainView) -> Result<()> {
    terminal.draw(|frame| main_view.render(frame, frame.area(), app))?;
    Ok(())
}

/// Route a raw crossterm event to the main view.
fn handle_input_event(app: &mut App, main_view: &mut MainView, input_event: Event) -> Vec<Effect> {
    match input_event {
        Event::Key(key_event) => main_view.handle_key_events(app, key_event),
        Event::Mouse(mouse_event) => main_view.handle_mouse_events(app, mouse_event),
        Event::Resize(width, height) => main_view.handle_message(app, Msg::Resize(width, height)),
        Event::FocusGained | Event::FocusLost | Event::Paste(_) => Vec::new(),
    }
}

/// Apply effects. Returns `false` when the session should end.
fn process_effects(app: &mut App, main_view: &mut MainView, effects: Vec<Effect>) -> bool {
    for effect in effects {
        match effect {
            Effect::StartTour { demo } => app.start_tour(demo),
            Effect::ResetTour => app.reset_tour(),
            Effect::Quit => return false,
        }
        main_view.sync_overlay(app);
    }
    true
}

fn ticker_for(interval: Duration) -> time::Interval {
    let mut ticker = time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    ticker
}

/// Entry point for the dashboard runtime: sets up the terminal, runs the
/// event loop and tears everything down on exit.
pub async fn run_app(tour: TourContext, options: RunOptions) -> Result<()> {
    let mut app = App::new(tour, theme::load_from_env());
    let init = app.tour.initialize();
    info!(auto_start = init.auto_start, demo = options.demo, "dashboard session starting");

    let mut main_view = MainView::new();
    let mut terminal = setup_terminal()?;
    let (width, height) = crossterm::terminal::size().context("read terminal size")?;
    main_view.handle_message(&mut app, Msg::Resize(width, height));
    if options.demo {
        app.start_tour(true);
        main_view.sync_overlay(&app);
    }

    let result = event_loop(&mut terminal, &mut app, &mut main_view).await;

    app.tour.teardown();
    cleanup_terminal(&mut terminal)?;
    info!("dashboard session ended");
    result
}

async fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
    main_view: &mut MainView,
) -> Result<()> {
    let mut input_receiver = spawn_input_thread();
    let mut current_interval = IDLE_TICK;
    let mut ticker = ticker_for(current_interval);
    let mut last_size = crossterm::terminal::size().ok();

    render(terminal, app, main_view)?;

    loop {
        let target_interval = if app.tour.has_pending_timers() { FAST_TICK } else { IDLE_TICK };
        if target_interval != current_interval {
            current_interval = target_interval;
            ticker = ticker_for(current_interval);
        }

        let effects = tokio::select! {
            maybe_event = input_receiver.recv() => {
                let Some(event) = maybe_event else {
                    // Input channel closed; shut down cleanly.
                    break;
                };
                if let Event::Key(key_event) = event
                    && key_event.code == KeyCode::Char('c')
                    && key_event.modifiers.contains(KeyModifiers::CONTROL)
                {
                    break;
                }
                handle_input_event(app, main_view, event)
            }
            _ = ticker.tick() => main_view.handle_message(app, Msg::Tick),
            _ = signal::ctrl_c() => break,
        };

        if !process_effects(app, main_view, effects) {
            break;
        }

        // Some terminals drop resize notifications; compare sizes directly.
        if let Ok(size) = crossterm::terminal::size()
            && last_size != Some(size)
        {
            last_size = Some(size);
            main_view.handle_message(app, Msg::Resize(size.0, size.1));
        }

        render(terminal, app, main_view)?;
    }
    Ok(())
}
