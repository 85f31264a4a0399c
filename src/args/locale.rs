//! Command-line locale preference handling.

use menuboard::i18n::{LocaleStore, SwitchOutcome};

use crate::args::definition::LocaleAction;

/// What: Show or change the active locale.
///
/// Inputs:
/// - `store`: Initialized locale store (persists the preference on switch)
/// - `action`: `get` or `set <locale>`
///
/// # Errors
/// - Returns `Err` when the requested locale's table cannot be loaded
pub async fn handle_locale(store: &LocaleStore, action: LocaleAction) -> Result<(), String> {
    match action {
        LocaleAction::Get => {
            println!("{}", store.active_locale());
            Ok(())
        }
        LocaleAction::Set { locale } => match store.set_active(locale).await {
            SwitchOutcome::Unchanged => {
                println!("{locale} (unchanged)");
                Ok(())
            }
            SwitchOutcome::Swapped | SwitchOutcome::Loaded => {
                tracing::info!(locale = %locale, "Locale changed from CLI");
                println!("{locale}");
                Ok(())
            }
            SwitchOutcome::Failed(e) => Err(format!("Failed to switch to {locale}: {e}")),
        },
    }
}
