//! Command-line translation lookup.

use menuboard::i18n::{Locale, LocaleStore};

use crate::args::utils::parse_params;

/// What: Print the translation for `key`.
///
/// Inputs:
/// - `store`: Initialized locale store
/// - `key`: Dot-notation key
/// - `raw_params`: `name=value` interpolation parameters
/// - `locale`: Locale to use instead of the active one
///
/// # Errors
/// - Returns `Err` when a parameter is malformed
///
/// Details:
/// - Unknown keys print the key itself, matching in-app behavior
pub fn handle_translate(
    store: &LocaleStore,
    key: &str,
    raw_params: &[String],
    locale: Option<Locale>,
) -> Result<(), String> {
    let params = parse_params(raw_params)?;
    let params = (!params.is_empty()).then_some(&params);
    let text = match locale {
        Some(locale) => store.translate_in(locale, key, params),
        None => store.translate(key, params),
    };
    tracing::debug!(key, locale = ?locale, "Translation requested from CLI");
    println!("{text}");
    Ok(())
}
