//! Internationalization (i18n) for menuboard.
//!
//! This module provides locale parsing, resolution, table loading, the shared
//! [`LocaleStore`] and the persisted locale preference.
//!
//! # Overview
//!
//! - **Locales**: a closed set (`en`, `es`), see [`Locale`]
//! - **Tables**: nested YAML/JSON documents addressed with dot-notation keys
//!   (`contact.form.email`), see [`MessageTable`]
//! - **Store**: caches one table per locale, tracks the active locale and a
//!   "switching" indicator, and publishes immutable snapshots to subscribers
//! - **Preference**: the last chosen locale survives restarts as a plain-text
//!   file in the config directory
//!
//! # Locale Files
//!
//! Bundled tables live in `config/locales/{tag}.yml` and are compiled in. A
//! directory or HTTP endpoint can be used instead (see [`DirSource`],
//! [`RemoteSource`]):
//!
//! ```yaml
//! en:
//!   contact:
//!     messages:
//!       success: "Thanks, {name}! Your message was sent."
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use menuboard::i18n::{EmbeddedSource, I18nConfig, LocaleStore, Locale, Params};
//!
//! # async fn demo() {
//! let store = LocaleStore::init(Arc::new(EmbeddedSource), None, &I18nConfig::bundled()).await;
//! let title = store.t("menu.title");
//! let thanks = store.translate("contact.messages.success", Some(&Params::new().with("name", "Ana")));
//! store.set_active(Locale::Es).await;
//! # }
//! ```
//!
//! # Error Handling
//!
//! - Missing keys and non-string leaves return the key itself (and log at debug)
//! - Failed loads are logged; the previous locale stays active
//! - Invalid stored preferences are ignored in favour of the configured default

mod loader;
mod locale;
mod preference;
mod resolver;
mod store;
pub mod translations;

pub use loader::{DirSource, EmbeddedSource, MessageSource, RemoteSource, TableFormat, parse_table};
pub use locale::Locale;
pub use preference::LocalePreference;
pub use resolver::{I18nConfig, resolve_locale};
pub use store::{LocaleSnapshot, LocaleStore, SwitchOutcome};
pub use translations::{MessageTable, Params, interpolate};

use std::path::PathBuf;
use std::sync::Arc;

/// What: Pick the table source from an optional override.
///
/// Inputs:
/// - `locales`: `None` for the bundled tables, an `http(s)://` URL for a remote
///   source, anything else is treated as a directory
///
/// Output:
/// - Shared [`MessageSource`]
#[must_use]
pub fn source_from_override(locales: Option<&str>) -> Arc<dyn MessageSource> {
    match locales {
        None => Arc::new(EmbeddedSource),
        Some(url) if url.starts_with("http://") || url.starts_with("https://") => {
            Arc::new(RemoteSource::new(url))
        }
        Some(dir) => Arc::new(DirSource::new(PathBuf::from(dir))),
    }
}
