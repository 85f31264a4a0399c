//! Configuration, log and export directory resolution.

use std::env;
use std::path::{Path, PathBuf};

/// Environment variable that overrides the configuration directory.
pub const CONFIG_DIR_ENV: &str = "MENUBOARD_CONFIG_DIR";

/// Resolve an XDG base directory from environment or default to `$HOME` + segments.
///
/// Inputs:
/// - `var`: Environment variable to check (e.g., `XDG_CONFIG_HOME`).
/// - `home_default`: Fallback path segments relative to `$HOME` if `var` is unset/empty.
///
/// Output: Resolved base directory path.
fn xdg_base_dir(var: &str, home_default: &[&str]) -> PathBuf {
    if let Ok(p) = env::var(var)
        && !p.trim().is_empty()
    {
        return PathBuf::from(p);
    }
    let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
    let mut base = PathBuf::from(home);
    for seg in home_default {
        base = base.join(seg);
    }
    base
}

/// What: Locate the configuration directory without creating it.
///
/// Output:
/// - `$MENUBOARD_CONFIG_DIR` when set, else `$XDG_CONFIG_HOME/menuboard`,
///   else `$HOME/.config/menuboard`
#[must_use]
pub fn config_dir_path() -> PathBuf {
    if let Ok(p) = env::var(CONFIG_DIR_ENV)
        && !p.trim().is_empty()
    {
        return PathBuf::from(p);
    }
    xdg_base_dir("XDG_CONFIG_HOME", &[".config"]).join("menuboard")
}

/// Configuration directory (ensured to exist).
pub fn config_dir() -> PathBuf {
    let dir = config_dir_path();
    if let Err(e) = std::fs::create_dir_all(&dir) {
        tracing::warn!(path = %dir.display(), error = %e, "failed to create config directory");
    }
    dir
}

/// Logs directory under config: "<config>/logs" (ensured to exist)
pub fn logs_dir() -> PathBuf {
    let dir = config_dir().join("logs");
    let _ = std::fs::create_dir_all(&dir);
    dir
}

/// File holding the persisted locale preference.
#[must_use]
pub fn locale_preference_file() -> PathBuf {
    config_dir().join("locale")
}

/// What: Find a bundled config file in development and installed locations.
///
/// Inputs:
/// - `relative_path`: Relative path from the config directory (e.g., "i18n.yml")
///
/// Output:
/// - `Some(PathBuf)` pointing to the first existing file found, or `None` if not found
///
/// Details:
/// - Tries the user config dir first, then `CARGO_MANIFEST_DIR/config/`,
///   then `/usr/share/menuboard/config/`
#[must_use]
pub fn find_config_file(relative_path: &str) -> Option<PathBuf> {
    let candidates = [
        config_dir_path().join(relative_path),
        Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("config")
            .join(relative_path),
        PathBuf::from("/usr/share/menuboard/config").join(relative_path),
    ];
    candidates.into_iter().find(|p| p.is_file())
}

/// Serializes tests that mutate process environment variables.
#[cfg(test)]
pub(crate) fn test_env_mutex() -> &'static std::sync::Mutex<()> {
    static MUTEX: std::sync::OnceLock<std::sync::Mutex<()>> = std::sync::OnceLock::new();
    MUTEX.get_or_init(|| std::sync::Mutex::new(()))
}
