//! Shared utilities for argument processing.

use std::sync::Arc;

use menuboard::content::SiteContent;
use menuboard::i18n::{self, I18nConfig, LocalePreference, LocaleStore, Params};

/// What: Determine the log level based on command-line arguments and environment variables.
///
/// Inputs:
/// - `args`: Parsed command-line arguments.
///
/// Output:
/// - Log level string (trace, debug, info, warn, error).
///
/// Details:
/// - Verbose flag overrides `log_level` argument.
/// - `MENUBOARD_TRACE=1` enables TRACE level.
#[must_use]
pub fn determine_log_level(args: &crate::args::Args) -> String {
    if args.verbose {
        "debug".to_string()
    } else if std::env::var("MENUBOARD_TRACE").ok().as_deref() == Some("1") {
        "trace".to_string()
    } else {
        args.log_level.clone()
    }
}

/// What: Build the locale store used by CLI commands.
///
/// Inputs:
/// - `locales`: Optional directory or URL overriding the bundled tables
///
/// Output:
/// - Initialized store persisting to the config directory
///
/// Details:
/// - `i18n.yml` is looked up in the config directory first; the bundled copy
///   is used when absent
pub async fn init_store(locales: Option<&str>) -> Arc<LocaleStore> {
    let config_path = menuboard::paths::find_config_file("i18n.yml");
    let config = I18nConfig::load(config_path.as_deref());
    let source = i18n::source_from_override(locales);
    LocaleStore::init(source, Some(LocalePreference::in_config_dir()), &config).await
}

/// What: Load the site content bundle.
///
/// Inputs:
/// - `path`: Optional override file
///
/// # Errors
/// - Returns `Err` when the override (or the bundled file) cannot be parsed
pub fn load_content(path: Option<&std::path::Path>) -> Result<SiteContent, String> {
    path.map_or_else(SiteContent::bundled, SiteContent::load)
}

/// What: Parse `name=value` interpolation parameters.
///
/// Inputs:
/// - `raw`: Values as given on the command line
///
/// Output:
/// - Parameter set
///
/// # Errors
/// - Returns `Err` for entries without `=` or with an empty name
pub fn parse_params(raw: &[String]) -> Result<Params, String> {
    let mut params = Params::new();
    for entry in raw {
        let Some((name, value)) = entry.split_once('=') else {
            return Err(format!("Invalid parameter '{entry}': expected name=value"));
        };
        let name = name.trim();
        if name.is_empty() {
            return Err(format!("Invalid parameter '{entry}': empty name"));
        }
        params.insert(name, value);
    }
    Ok(params)
}
