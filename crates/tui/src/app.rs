//! Application state for the coordinator dashboard.
//!
//! [`App`] owns the tour context, the theme, the dashboard data and the
//! layout registry the tour measures against. Components mutate it through
//! [`App::update`] so the tour sees every scroll and resize.

use learnova_engine::{TourContext, Transition};
use learnova_types::{Effect, Msg};
use tracing::{debug, info};

use crate::ui::components::dashboard::{DashboardData, DashboardLayout};
use crate::ui::layout::MainLayout;
use crate::ui::theme::Theme;

#[derive(Debug)]
pub struct App {
    /// Onboarding tour state and its timers
    pub tour: TourContext,
    pub theme: Box<dyn Theme>,
    pub data: DashboardData,
    /// Panel registry, also the tour's layout provider
    pub layout: DashboardLayout,
    /// One-line message shown in the footer until the next tour action
    pub status: Option<String>,
}

impl App {
    pub fn new(tour: TourContext, theme: Box<dyn Theme>) -> Self {
        Self {
            tour,
            theme,
            data: DashboardData::default(),
            layout: DashboardLayout::default(),
            status: None,
        }
    }

    /// Apply a message to the application state.
    pub fn update(&mut self, msg: &Msg) -> Vec<Effect> {
        match msg {
            Msg::Tick => {
                let transition = self.tour.tick(&mut self.layout);
                self.note(transition);
            }
            Msg::Resize(width, height) => {
                self.layout.relayout(MainLayout::content_area(*width, *height), &self.data);
                let transition = self.tour.handle_resize(&mut self.layout);
                self.note(transition);
            }
            Msg::Tour(command) => {
                let transition = self.tour.handle_command(*command);
                self.note(transition);
            }
            Msg::Scroll(delta) => {
                self.layout.scroll_by(*delta);
                if self.tour.is_active() {
                    let transition = self.tour.handle_resize(&mut self.layout);
                    self.note(transition);
                }
            }
        }
        Vec::new()
    }

    pub fn start_tour(&mut self, demo: bool) {
        self.status = None;
        let transition = self.tour.start_tour(demo);
        self.note(transition);
    }

    pub fn reset_tour(&mut self) {
        self.tour.reset_tour();
        self.status = Some("Tour progress cleared; it will start automatically on the next visit.".to_string());
        info!("tour flags reset from the dashboard");
    }

    fn note(&mut self, transition: Transition) {
        match transition {
            Transition::Unchanged => {}
            Transition::Completed => {
                self.status = Some("Tour finished. Press t to take it again.".to_string());
            }
            other => {
                self.status = None;
                debug!(?other, "tour transition");
            }
        }
    }
}
