//! Koey, the tour mascot.

use learnova_types::MascotMood;
use ratatui::text::{Line, Span};

use crate::ui::theme::Theme;

const GREETING: &str = "Hi! I'm Koey, your training guide!";
const DEMO_LABEL: &str = "Demo Mode - Showing TC features";

/// Footer line shown while the tour is open.
pub fn mascot_line<T: Theme + ?Sized>(theme: &T, demo_mode: bool) -> Line<'static> {
    let caption = if demo_mode { DEMO_LABEL } else { GREETING };
    Line::from(vec![
        Span::styled(format!(" {} ", MascotMood::Happy.glyph()), theme.accent_emphasis_style()),
        Span::styled(caption, theme.text_secondary_style()),
    ])
    .centered()
}

/// Short remark matching the step's mood, shown next to the mascot in the tooltip.
pub fn mood_remark(mood: MascotMood) -> &'static str {
    match mood {
        MascotMood::Wave => "hello!",
        MascotMood::Point => "over here",
        MascotMood::Celebrate => "nice!",
        MascotMood::Think => "hmm...",
        MascotMood::Happy => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::theme::DraculaTheme;

    #[test]
    fn demo_mode_swaps_the_caption() {
        let theme = DraculaTheme::new();
        let text = |demo| mascot_line(&theme, demo).spans.iter().map(|span| span.content.to_string()).collect::<String>();
        assert!(text(false).contains("Koey"));
        assert!(text(true).contains("Demo Mode"));
    }
}
