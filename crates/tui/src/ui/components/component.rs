//! Component system for the dashboard host.
//!
//! Components are self-contained UI elements that handle their own events
//! and rendering while integrating with the application through a consistent
//! interface.

use crossterm::event::{KeyEvent, MouseEvent};
use learnova_types::{Effect, Msg};
use ratatui::Frame;
use ratatui::layout::Rect;

use crate::app::App;

/// A UI element with its own state and behavior.
///
/// Components handle localized events, update their internal state, and
/// render themselves into a provided `Rect`, reporting side effects back to
/// the runtime as [`Effect`]s.
///
/// # Component Lifecycle
///
/// 1. **Event Handling**: input arrives through `handle_key_events()` and `handle_mouse_events()`
/// 2. **Messages**: `handle_message()` processes application messages such as ticks and resizes
/// 3. **Rendering**: `render()` draws the component into the provided frame area
pub(crate) trait Component {
    /// Handle an application-level message the component cares about.
    fn handle_message(&mut self, _app: &mut App, _msg: Msg) -> Vec<Effect> {
        Vec::new()
    }

    /// Handle key events while this component receives input.
    ///
    /// Components should only handle keys that are meaningful to them and
    /// ignore the rest.
    fn handle_key_events(&mut self, _app: &mut App, _key: KeyEvent) -> Vec<Effect> {
        Vec::new()
    }

    /// Handle mouse events (clicks, wheel) while this component receives input.
    fn handle_mouse_events(&mut self, _app: &mut App, _mouse: MouseEvent) -> Vec<Effect> {
        Vec::new()
    }

    /// Render the component into the given area.
    ///
    /// Implementations should be side-effect free except for frame drawing
    /// and remembering hit areas for later mouse handling. State changes
    /// belong in the event handlers.
    fn render(&mut self, frame: &mut Frame, rect: Rect, app: &mut App);
}
