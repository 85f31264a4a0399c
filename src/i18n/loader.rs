//! Message table loading: parsing plus the sources tables are fetched from.

use std::path::{Path, PathBuf};

use futures::future::BoxFuture;

use crate::i18n::locale::Locale;
use crate::i18n::translations::MessageTable;

/// On-disk format of a message table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    /// YAML (`.yml` / `.yaml`).
    Yaml,
    /// JSON (`.json`).
    Json,
}

impl TableFormat {
    /// What: Pick the format from a file extension.
    ///
    /// Inputs:
    /// - `path`: File path
    ///
    /// Output:
    /// - `Some(TableFormat)` for known extensions, `None` otherwise
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "yml" | "yaml" => Some(Self::Yaml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// What: Parse message table content.
///
/// Inputs:
/// - `locale`: Locale the content belongs to
/// - `contents`: Raw file content
/// - `format`: YAML or JSON
///
/// Output:
/// - `Result<MessageTable, String>` with the parsed table
///
/// # Errors
/// - Returns `Err` when the content is empty or whitespace only
/// - Returns `Err` when the content cannot be parsed
/// - Returns `Err` when the document root is not a mapping
///
/// Details:
/// - A single top-level key equal to the locale tag (`en:`) is unwrapped, so both
///   wrapped and bare tables are accepted
pub fn parse_table(
    locale: Locale,
    contents: &str,
    format: TableFormat,
) -> Result<MessageTable, String> {
    if contents.trim().is_empty() {
        return Err(format!("Message table for '{locale}' is empty"));
    }

    let mut doc: serde_json::Value = match format {
        TableFormat::Yaml => serde_norway::from_str(contents)
            .map_err(|e| format!("Failed to parse YAML for '{locale}': {e}"))?,
        TableFormat::Json => serde_json::from_str(contents)
            .map_err(|e| format!("Failed to parse JSON for '{locale}': {e}"))?,
    };

    if let Some(map) = doc.as_object_mut()
        && map.len() == 1
        && let Some(inner) = map.remove(locale.tag())
    {
        doc = inner;
    }

    MessageTable::from_value(doc).map_err(|e| format!("Invalid message table for '{locale}': {e}"))
}

/// Source of message tables.
///
/// Implementations fetch a fresh table on every call; caching and
/// de-duplication of concurrent requests live in the store.
pub trait MessageSource: Send + Sync {
    /// What: Fetch the table for a locale.
    ///
    /// Inputs:
    /// - `locale`: Locale to fetch
    ///
    /// Output:
    /// - Future resolving to the parsed table or an error message
    fn fetch(&self, locale: Locale) -> BoxFuture<'_, Result<MessageTable, String>>;

    /// Human-readable description used in log lines.
    fn describe(&self) -> String;
}

/// Tables compiled into the binary from `config/locales/`.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedSource;

impl EmbeddedSource {
    /// Raw YAML of the bundled table for `locale`.
    #[must_use]
    pub const fn raw(locale: Locale) -> &'static str {
        match locale {
            Locale::En => include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config/locales/en.yml")),
            Locale::Es => include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config/locales/es.yml")),
        }
    }
}

impl MessageSource for EmbeddedSource {
    fn fetch(&self, locale: Locale) -> BoxFuture<'_, Result<MessageTable, String>> {
        Box::pin(async move { parse_table(locale, Self::raw(locale), TableFormat::Yaml) })
    }

    fn describe(&self) -> String {
        "embedded tables".to_string()
    }
}

/// Tables read from a directory of `<tag>.yml` / `<tag>.yaml` / `<tag>.json` files.
#[derive(Debug, Clone)]
pub struct DirSource {
    locales_dir: PathBuf,
}

impl DirSource {
    /// What: Create a directory-backed source.
    ///
    /// Inputs:
    /// - `locales_dir`: Directory holding one file per locale
    #[must_use]
    pub const fn new(locales_dir: PathBuf) -> Self {
        Self { locales_dir }
    }

    /// Directory this source reads from.
    #[must_use]
    pub fn locales_dir(&self) -> &Path {
        &self.locales_dir
    }

    /// What: Find the file holding the table for `locale`.
    ///
    /// Output:
    /// - First existing candidate among `.yml`, `.yaml`, `.json`
    fn locate(&self, locale: Locale) -> Option<PathBuf> {
        ["yml", "yaml", "json"]
            .iter()
            .map(|ext| self.locales_dir.join(format!("{}.{ext}", locale.tag())))
            .find(|p| p.is_file())
    }
}

impl MessageSource for DirSource {
    fn fetch(&self, locale: Locale) -> BoxFuture<'_, Result<MessageTable, String>> {
        Box::pin(async move {
            let file_path = self.locate(locale).ok_or_else(|| {
                format!(
                    "Locale file not found for '{locale}' in {}",
                    self.locales_dir.display()
                )
            })?;
            let format = TableFormat::from_path(&file_path)
                .ok_or_else(|| format!("Unknown table format: {}", file_path.display()))?;
            let contents = tokio::fs::read_to_string(&file_path)
                .await
                .map_err(|e| format!("Failed to read locale file {}: {e}", file_path.display()))?;
            parse_table(locale, &contents, format)
                .map_err(|e| format!("{e} ({})", file_path.display()))
        })
    }

    fn describe(&self) -> String {
        format!("directory {}", self.locales_dir.display())
    }
}

/// Tables fetched over HTTP as `<base_url>/<tag>.json`.
#[derive(Debug, Clone)]
pub struct RemoteSource {
    base_url: String,
    client: reqwest::Client,
}

impl RemoteSource {
    /// What: Create an HTTP-backed source.
    ///
    /// Inputs:
    /// - `base_url`: URL prefix; a trailing slash is tolerated
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client: reqwest::Client::new(),
        }
    }

    /// URL the table for `locale` is fetched from.
    #[must_use]
    pub fn url_for(&self, locale: Locale) -> String {
        format!("{}/{}.json", self.base_url.trim_end_matches('/'), locale.tag())
    }
}

impl MessageSource for RemoteSource {
    fn fetch(&self, locale: Locale) -> BoxFuture<'_, Result<MessageTable, String>> {
        Box::pin(async move {
            let url = self.url_for(locale);
            tracing::debug!(url = %url, "Fetching remote message table");
            let response = self
                .client
                .get(&url)
                .send()
                .await
                .and_then(reqwest::Response::error_for_status)
                .map_err(|e| format!("Request for {url} failed: {e}"))?;
            let body = response
                .text()
                .await
                .map_err(|e| format!("Failed to read body of {url}: {e}"))?;
            parse_table(locale, &body, TableFormat::Json)
        })
    }

    fn describe(&self) -> String {
        format!("remote {}", self.base_url)
    }
}
