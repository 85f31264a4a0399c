//! Message tables and key lookup.

use std::collections::BTreeMap;
use std::fmt::Display;
use std::sync::LazyLock;

use regex::{Captures, Regex};
use serde_json::Value;

/// `{name}` placeholder with an ASCII word name.
static PLACEHOLDER: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"\{([A-Za-z0-9_]+)\}").ok());

/// Nested translation data for one locale.
///
/// Keys are addressed with dot notation (`contact.form.email`). Tables are
/// immutable once built and shared behind `Arc` by the store.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MessageTable {
    root: serde_json::Map<String, Value>,
}

impl MessageTable {
    /// What: Build a table from a parsed document.
    ///
    /// Inputs:
    /// - `value`: Parsed JSON/YAML document
    ///
    /// Output:
    /// - `Ok(MessageTable)` when the document root is a mapping
    ///
    /// # Errors
    /// - Returns `Err` when the root is not a mapping (e.g., a bare string or list)
    pub fn from_value(value: Value) -> Result<Self, String> {
        match value {
            Value::Object(root) => Ok(Self { root }),
            other => Err(format!(
                "Message table root must be a mapping, found {}",
                value_kind(&other)
            )),
        }
    }

    /// What: Look up the leaf string for a dot-notation key.
    ///
    /// Inputs:
    /// - `key`: Dot-notation key (e.g., "menu.catering.title")
    ///
    /// Output:
    /// - `Some(&str)` when every segment exists and the terminal value is a string
    ///
    /// Details:
    /// - Intermediate non-mapping values and non-string leaves yield `None`
    #[must_use]
    pub fn lookup(&self, key: &str) -> Option<&str> {
        let mut segments = key.split('.');
        let first = segments.next()?;
        let mut current = self.root.get(first)?;
        for segment in segments {
            current = current.as_object()?.get(segment)?;
        }
        current.as_str()
    }

    /// What: Translate a key, falling back to the key itself.
    ///
    /// Inputs:
    /// - `key`: Dot-notation key
    /// - `params`: Optional interpolation parameters
    ///
    /// Output:
    /// - The leaf string with `{name}` placeholders substituted, or `key` unchanged
    ///   when the lookup fails
    #[must_use]
    pub fn translate(&self, key: &str, params: Option<&Params>) -> String {
        let Some(template) = self.lookup(key) else {
            tracing::debug!(
                "Missing translation key: '{}'. Returning key as-is. Please add this key to locale files.",
                key
            );
            return key.to_string();
        };
        match params {
            Some(params) => interpolate(template, params),
            None => template.to_string(),
        }
    }

    /// Number of string leaves in the table.
    #[must_use]
    pub fn key_count(&self) -> usize {
        fn count(value: &Value) -> usize {
            match value {
                Value::String(_) => 1,
                Value::Object(map) => map.values().map(count).sum(),
                _ => 0,
            }
        }
        self.root.values().map(count).sum()
    }

    /// Whether the table holds no entries at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }
}

/// Interpolation parameters, stringified on insertion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    values: BTreeMap<String, String>,
}

impl Params {
    /// Create an empty parameter set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a parameter (builder style).
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Display) -> Self {
        self.insert(name, value);
        self
    }

    /// Add or replace a parameter.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Display) {
        self.values.insert(name.into(), value.to_string());
    }

    /// Stringified value for `name`, if supplied.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Whether no parameters were supplied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: Into<String>, V: Display> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (name, value) in iter {
            params.insert(name, value);
        }
        params
    }
}

/// What: Replace `{name}` placeholders in a template.
///
/// Inputs:
/// - `template`: Translation string
/// - `params`: Parameter values
///
/// Output:
/// - Template with every matching placeholder substituted
///
/// Details:
/// - A placeholder is `{` + one or more `[A-Za-z0-9_]` + `}`
/// - Placeholders without a matching parameter are kept verbatim
/// - Single pass: substituted values are never re-scanned
#[must_use]
pub fn interpolate(template: &str, params: &Params) -> String {
    let Some(placeholder) = PLACEHOLDER.as_ref() else {
        return template.to_string();
    };
    placeholder
        .replace_all(template, |caps: &Captures<'_>| {
            params
                .get(&caps[1])
                .map_or_else(|| caps[0].to_string(), str::to_string)
        })
        .into_owned()
}

/// Short description of a JSON value's type for error messages.
const fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "a mapping",
    }
}
