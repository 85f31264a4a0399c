//! Command-line contact form submission.

use menuboard::contact::{self, ContactForm, ToastKind};
use menuboard::i18n::LocaleStore;

/// What: Validate and submit a contact message.
///
/// Inputs:
/// - `store`: Locale store used for messages
/// - `form`: Form values from the command line
///
/// # Errors
/// - Returns `Err` listing the translated validation messages, or the error
///   toast when delivery failed
pub async fn handle_contact(store: &LocaleStore, form: &ContactForm) -> Result<(), String> {
    match contact::submit(form, store).await {
        Ok(toast) if toast.kind == ToastKind::Success => {
            println!("{}", toast.message);
            Ok(())
        }
        Ok(toast) => Err(toast.message),
        Err(errors) => Err(errors
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message(store)))
            .collect::<Vec<_>>()
            .join("\n")),
    }
}
