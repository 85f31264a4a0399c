//! Initial locale resolution: stored preference, else the configured default.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::i18n::locale::Locale;

/// Bundled `config/i18n.yml`.
const BUNDLED_CONFIG: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config/i18n.yml"));

/// Locale configuration loaded from `i18n.yml`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct I18nConfig {
    /// Locale used when no usable preference is stored.
    #[serde(default)]
    pub default_locale: Locale,
}

impl I18nConfig {
    /// What: Parse configuration YAML.
    ///
    /// # Errors
    /// - Returns `Err` when the YAML is malformed or names an unsupported locale
    pub fn parse(contents: &str) -> Result<Self, String> {
        serde_norway::from_str(contents).map_err(|e| format!("Failed to parse i18n config: {e}"))
    }

    /// What: Load configuration, degrading to the bundled copy.
    ///
    /// Inputs:
    /// - `path`: Optional override (e.g., found via `paths::find_config_file`)
    ///
    /// Output:
    /// - Parsed override, else bundled config, else built-in defaults
    ///
    /// Details:
    /// - Every failure is logged and never fatal
    #[must_use]
    pub fn load(path: Option<&Path>) -> Self {
        if let Some(path) = path {
            match fs::read_to_string(path).map_err(|e| e.to_string()).and_then(|c| Self::parse(&c)) {
                Ok(cfg) => {
                    tracing::debug!(path = %path.display(), "Loaded i18n config");
                    return cfg;
                }
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Failed to load i18n config, using bundled copy");
                }
            }
        }
        Self::bundled()
    }

    /// Configuration compiled into the binary.
    #[must_use]
    pub fn bundled() -> Self {
        Self::parse(BUNDLED_CONFIG).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Bundled i18n config is invalid, using defaults");
            Self::default()
        })
    }
}

/// What: Resolve the locale the store starts with.
///
/// Inputs:
/// - `stored`: Persisted preference (already validated)
/// - `config`: Locale configuration
///
/// Output:
/// - Stored preference, else `config.default_locale`
///
/// Details:
/// - The host environment (`LANG`, `LC_ALL`) is never consulted
#[must_use]
pub fn resolve_locale(stored: Option<Locale>, config: &I18nConfig) -> Locale {
    stored.unwrap_or_else(|| {
        tracing::debug!(
            "No usable stored locale, using default: {}",
            config.default_locale
        );
        config.default_locale
    })
}
