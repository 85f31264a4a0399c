//! Supported locales and tag parsing.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Locale tag selecting which message table is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum Locale {
    /// English (`en`).
    #[default]
    En,
    /// Spanish (`es`).
    Es,
}

impl Locale {
    /// Every supported locale, in preload order.
    pub const ALL: [Self; 2] = [Self::En, Self::Es];

    /// What: Return the canonical tag for this locale.
    ///
    /// Output:
    /// - `"en"` or `"es"`
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Es => "es",
        }
    }

    /// Position of this locale inside [`Locale::ALL`].
    #[must_use]
    pub(crate) const fn index(self) -> usize {
        match self {
            Self::En => 0,
            Self::Es => 1,
        }
    }

    /// What: Parse an exact canonical tag.
    ///
    /// Inputs:
    /// - `tag`: Stored or configured tag (surrounding whitespace ignored)
    ///
    /// Output:
    /// - `Some(Locale)` for `"en"`/`"es"`, `None` otherwise
    ///
    /// Details:
    /// - Strict on purpose: persisted values must be exactly one of the canonical tags.
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim() {
            "en" => Some(Self::En),
            "es" => Some(Self::Es),
            _ => None,
        }
    }

    /// What: Parse a loosely formatted locale string.
    ///
    /// Inputs:
    /// - `raw`: Strings like `"es-MX"`, `"en_US.UTF-8"`, `"ES"`
    ///
    /// Output:
    /// - Supported locale whose language matches, or `None`
    ///
    /// Details:
    /// - Drops encoding suffixes, accepts `_` or `-` region separators
    /// - Only the language subtag is considered
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let normalized = normalize_locale_string(raw)?;
        let language = normalized.split('-').next()?;
        Self::from_tag(language)
    }

    /// The other supported locale (what a language toggle switches to).
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::En => Self::Es,
            Self::Es => Self::En,
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl std::str::FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| {
            format!("Unsupported locale '{s}'. Supported locales: en, es")
        })
    }
}

impl Serialize for Locale {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.tag())
    }
}

impl<'de> Deserialize<'de> for Locale {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// What: Normalize a locale string into `language[-REGION]` form.
///
/// Inputs:
/// - `locale_str`: Locale string like "de_DE.UTF-8", "de-DE", "en_US.utf8"
///
/// Output:
/// - Normalized string (e.g., "de-DE") or `None` if empty or malformed
fn normalize_locale_string(locale_str: &str) -> Option<String> {
    let trimmed = locale_str.trim();
    if trimmed.is_empty() {
        return None;
    }

    // "de_DE.UTF-8@euro" -> "de_DE"
    let locale_part = trimmed.split(['.', '@']).next()?;
    let normalized = locale_part.replace('_', "-");
    let parts: Vec<&str> = normalized.split('-').collect();

    if parts.iter().any(|p| p.is_empty() || !p.chars().all(char::is_alphanumeric)) {
        return None;
    }

    match parts.as_slice() {
        [language] => Some(language.to_lowercase()),
        [language, region] => Some(format!(
            "{}-{}",
            language.to_lowercase(),
            region.to_uppercase()
        )),
        [language, script, region] => Some(format!(
            "{}-{}-{}",
            language.to_lowercase(),
            script,
            region.to_uppercase()
        )),
        _ => None,
    }
}
