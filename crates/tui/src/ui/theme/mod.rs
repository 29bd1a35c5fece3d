//! Theme styling module for the TUI UI layer.
//!
//! Two palettes (Dracula, Nord) map onto the semantic roles in [`roles`].
//! Components style themselves through those roles and the builders in
//! [`theme_helpers`] instead of hard-coding colors.

use std::env;

use tracing::debug;

pub mod dracula;
pub mod nord;
pub mod roles;
pub mod theme_helpers;

pub use dracula::DraculaTheme;
pub use nord::NordTheme;
pub use roles::Theme;

/// Environment variable selecting the palette (`dracula` or `nord`).
pub const THEME_ENV: &str = "LEARNOVA_THEME";

/// Select a theme from [`THEME_ENV`], falling back to Dracula.
pub fn load_from_env() -> Box<dyn Theme> {
    let requested = env::var(THEME_ENV).ok();
    match requested.as_deref().map(|name| name.trim().to_ascii_lowercase()) {
        Some(name) if name == "nord" => Box::new(NordTheme::new()),
        Some(name) if name == "dracula" || name.is_empty() => Box::new(DraculaTheme::new()),
        Some(name) => {
            debug!(theme = %name, "unknown theme requested; using dracula");
            Box::new(DraculaTheme::new())
        }
        None => Box::new(DraculaTheme::new()),
    }
}
