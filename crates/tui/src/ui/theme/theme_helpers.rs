use ratatui::{
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Block, BorderType, Borders},
};

use super::roles::{Theme, ThemeRoles};

/// Build a standard Block with theme surfaces and borders.
pub fn block<'a, T: Theme + ?Sized>(theme: &'a T, title: Option<&'a str>, focused: bool) -> Block<'a> {
    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme.border_style(focused))
        .style(panel_style(theme));
    if let Some(t) = title {
        block = block.title(Span::styled(
            format!(" {t} "),
            theme.text_secondary_style().add_modifier(Modifier::BOLD),
        ));
    }
    block
}

/// Style for panel-like containers (set background on widget using `.style`).
pub fn panel_style<T: Theme + ?Sized>(theme: &T) -> Style {
    let ThemeRoles { surface, text, .. } = *theme.roles();
    Style::default().bg(surface).fg(text)
}

/// Darken an RGB color by a multiplicative factor (0.0..=1.0).
/// If the color is not RGB, returns it unchanged.
pub fn darken_rgb(color: Color, factor: f32) -> Color {
    match color {
        Color::Rgb(r, g, b) => {
            let f = factor.clamp(0.0, 1.0);
            let dr = (r as f32 * f).round().clamp(0.0, 255.0) as u8;
            let dg = (g as f32 * f).round().clamp(0.0, 255.0) as u8;
            let db = (b as f32 * f).round().clamp(0.0, 255.0) as u8;
            Color::Rgb(dr, dg, db)
        }
        other => other,
    }
}

/// Primary button style (filled accent background).
pub fn button_primary_style<T: Theme + ?Sized>(theme: &T, enabled: bool) -> Style {
    if enabled {
        let ThemeRoles {
            accent_primary, background, ..
        } = *theme.roles();
        Style::default().bg(accent_primary).fg(background).add_modifier(Modifier::BOLD)
    } else {
        let ThemeRoles {
            surface_muted, text_muted, ..
        } = *theme.roles();
        Style::default().bg(surface_muted).fg(text_muted)
    }
}

/// Secondary button style (text-only accent).
pub fn button_secondary_style<T: Theme + ?Sized>(theme: &T, enabled: bool) -> Style {
    if enabled {
        Style::default().fg(theme.roles().accent_secondary)
    } else {
        theme.text_muted_style()
    }
}

/// Badge/tag style (filled accent, readable text).
pub fn badge_style<T: Theme + ?Sized>(theme: &T) -> Style {
    let ThemeRoles {
        accent_secondary, background, ..
    } = *theme.roles();
    Style::default().bg(accent_secondary).fg(background).add_modifier(Modifier::BOLD)
}

/// Style for a progress value: green when healthy, amber when lagging, red when critical.
pub fn progress_style<T: Theme + ?Sized>(theme: &T, percent: u8) -> Style {
    match percent {
        70..=u8::MAX => theme.status_success(),
        40..70 => theme.status_warning(),
        _ => theme.status_error(),
    }
}

/// Fixed-width textual progress bar built from full and light block glyphs.
pub fn progress_bar<'a, T: Theme + ?Sized>(theme: &T, percent: u8, width: usize) -> Vec<Span<'a>> {
    let filled = (usize::from(percent.min(100)) * width).div_ceil(100);
    vec![
        Span::styled("━".repeat(filled), progress_style(theme, percent)),
        Span::styled("─".repeat(width - filled), Style::default().fg(theme.roles().divider)),
    ]
}
