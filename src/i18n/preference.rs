//! Persisted locale preference.
//!
//! A single plain-text file holding `en` or `es`. Reading is a best-effort
//! hint: anything unreadable or unsupported is treated as absent.

use std::fs;
use std::path::{Path, PathBuf};

use crate::i18n::locale::Locale;

/// Durable storage for the last selected locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalePreference {
    path: PathBuf,
}

impl LocalePreference {
    /// What: Create a preference backed by `path`.
    #[must_use]
    pub const fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Preference stored in the user config directory.
    #[must_use]
    pub fn in_config_dir() -> Self {
        Self::new(crate::paths::locale_preference_file())
    }

    /// File backing this preference.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// What: Read the stored locale.
    ///
    /// Output:
    /// - `Some(Locale)` when the file holds a supported tag, `None` otherwise
    ///
    /// Details:
    /// - Missing file is silent; unreadable files and unsupported values are
    ///   logged and ignored
    #[must_use]
    pub fn load(&self) -> Option<Locale> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "[Preference] Failed to read stored locale"
                );
                return None;
            }
        };
        let locale = Locale::from_tag(&contents);
        if locale.is_none() {
            tracing::warn!(
                path = %self.path.display(),
                value = %contents.trim(),
                "[Preference] Ignoring unsupported stored locale"
            );
        }
        locale
    }

    /// What: Persist `locale`.
    ///
    /// # Errors
    /// - Returns `Err` when the parent directory cannot be created or the file
    ///   cannot be written
    pub fn store(&self, locale: Locale) -> Result<(), String> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create {}: {e}", parent.display()))?;
        }
        fs::write(&self.path, locale.tag())
            .map_err(|e| format!("Failed to write {}: {e}", self.path.display()))?;
        tracing::debug!(
            path = %self.path.display(),
            locale = %locale,
            "[Preference] Locale persisted"
        );
        Ok(())
    }
}
