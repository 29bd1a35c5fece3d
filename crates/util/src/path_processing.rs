use std::env;
use std::path::PathBuf;

use dirs_next::{config_dir, home_dir};

/// Environment variable allowing callers to override the log file path.
pub const LOG_PATH_ENV: &str = "LEARNOVA_LOG_PATH";

/// Default filename for the log written while the dashboard owns the terminal.
const LOG_FILE_NAME: &str = "learnova.log";

pub fn expand_tilde(path: &str) -> PathBuf {
    let p = path.trim();
    if p == "~" {
        return home_dir().unwrap_or_else(|| PathBuf::from("~"));
    }
    if let Some(rest) = p.strip_prefix("~/") {
        return home_dir().unwrap_or_else(|| PathBuf::from("~")).join(rest);
    }
    if let Some(rest) = p.strip_prefix("~\\") {
        // Windows-style
        return home_dir().unwrap_or_else(|| PathBuf::from("~")).join(rest);
    }
    PathBuf::from(p)
}

/// Directory holding Learnova's local state (`~/.config/learnova` on most platforms).
pub fn app_config_dir() -> PathBuf {
    config_dir().unwrap_or_else(|| PathBuf::from(".")).join("learnova")
}

/// Log file location, honoring [`LOG_PATH_ENV`].
pub fn default_log_path() -> PathBuf {
    if let Ok(path) = env::var(LOG_PATH_ENV)
        && !path.trim().is_empty()
    {
        return expand_tilde(&path);
    }
    app_config_dir().join(LOG_FILE_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expand_tilde_leaves_plain_paths_alone() {
        assert_eq!(expand_tilde(" /tmp/state.json "), PathBuf::from("/tmp/state.json"));
    }

    #[test]
    fn log_path_honors_env_override() {
        temp_env::with_var(LOG_PATH_ENV, Some("/tmp/learnova-test.log"), || {
            assert_eq!(default_log_path(), PathBuf::from("/tmp/learnova-test.log"));
        });
    }
}
