//! Contact form validation and (simulated) submission.
//!
//! Validation failures are reported as translation keys under
//! `contact.validation.*` so the caller can show them in the active locale.
//! Submission goes through an [`Outbox`]; the default one only waits, since no
//! delivery backend is wired up.

use std::fmt;
use std::sync::LazyLock;
use std::time::Duration;

use futures::future::BoxFuture;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::i18n::{LocaleStore, Params};

/// Delay of the simulated delivery.
pub const SIMULATED_DELIVERY: Duration = Duration::from_millis(400);

const NAME_MIN: usize = 2;
const NAME_MAX: usize = 60;
const PHONE_MIN: usize = 7;
const PHONE_MAX: usize = 20;
const MESSAGE_MIN: usize = 5;
const MESSAGE_MAX: usize = 500;

/// `local@domain.tld`: no whitespace or second `@`, hyphen-safe labels,
/// alphabetic TLD of at least two letters.
static EMAIL: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@(?:[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?\.)+[A-Za-z]{2,}$").ok()
});
static PHONE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[0-9()+\-\s]+$").ok());

/// Submitted form values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactForm {
    /// Sender name.
    pub full_name: String,
    /// Reply address.
    pub email: String,
    /// Optional phone number.
    #[serde(default)]
    pub phone: Option<String>,
    /// Message body.
    pub message: String,
}

/// Form field an error belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ContactField {
    /// Sender name.
    FullName,
    /// Reply address.
    Email,
    /// Phone number.
    Phone,
    /// Message body.
    Message,
}

impl fmt::Display for ContactField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::FullName => "fullName",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Message => "message",
        })
    }
}

/// Validation failure for one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldError {
    /// Offending field.
    pub field: ContactField,
    /// Translation key of the message (`contact.validation.*`).
    pub key: &'static str,
}

impl FieldError {
    /// Message in the store's active locale.
    #[must_use]
    pub fn message(&self, store: &LocaleStore) -> String {
        store.t(self.key)
    }
}

/// What: Validate a contact form.
///
/// Inputs:
/// - `form`: Submitted values
///
/// Output:
/// - One error per failing field, in form order; empty when valid
///
/// Details:
/// - Lengths count characters
/// - Phone may be absent or empty; otherwise 7-20 characters of digits,
///   spaces and `()+-`
#[must_use]
pub fn validate(form: &ContactForm) -> Vec<FieldError> {
    let mut errors = Vec::new();
    let name_len = form.full_name.chars().count();
    if name_len < NAME_MIN {
        errors.push(FieldError {
            field: ContactField::FullName,
            key: "contact.validation.fullNameMin",
        });
    } else if name_len > NAME_MAX {
        errors.push(FieldError {
            field: ContactField::FullName,
            key: "contact.validation.fullNameMax",
        });
    }
    if !is_valid_email(&form.email) {
        errors.push(FieldError {
            field: ContactField::Email,
            key: "contact.validation.emailInvalid",
        });
    }
    if let Some(phone) = form.phone.as_deref()
        && !phone.is_empty()
        && !is_valid_phone(phone)
    {
        errors.push(FieldError {
            field: ContactField::Phone,
            key: "contact.validation.phoneInvalid",
        });
    }
    let message_len = form.message.chars().count();
    if message_len < MESSAGE_MIN {
        errors.push(FieldError {
            field: ContactField::Message,
            key: "contact.validation.messageMin",
        });
    } else if message_len > MESSAGE_MAX {
        errors.push(FieldError {
            field: ContactField::Message,
            key: "contact.validation.messageMax",
        });
    }
    errors
}

/// Basic `local@domain.tld` shape check.
fn is_valid_email(email: &str) -> bool {
    EMAIL.as_ref().is_some_and(|re| re.is_match(email))
}

fn is_valid_phone(phone: &str) -> bool {
    let len = phone.chars().count();
    (PHONE_MIN..=PHONE_MAX).contains(&len) && PHONE.as_ref().is_some_and(|re| re.is_match(phone))
}

/// Notification severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastKind {
    /// Submission went through.
    Success,
    /// Submission failed.
    Error,
}

/// Notification shown after a submission attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Toast {
    /// Severity.
    pub kind: ToastKind,
    /// Translated text.
    pub message: String,
}

/// Delivery backend for contact messages.
pub trait Outbox: Send + Sync {
    /// What: Deliver a validated form.
    ///
    /// # Errors
    /// - Returns `Err` with a reason when delivery fails
    fn deliver<'a>(&'a self, form: &'a ContactForm) -> BoxFuture<'a, Result<(), String>>;
}

/// Outbox that only waits, standing in for a real backend.
#[derive(Debug, Clone, Copy)]
pub struct SimulatedOutbox {
    /// Time spent "sending".
    pub delay: Duration,
}

impl Default for SimulatedOutbox {
    fn default() -> Self {
        Self {
            delay: SIMULATED_DELIVERY,
        }
    }
}

impl Outbox for SimulatedOutbox {
    fn deliver<'a>(&'a self, form: &'a ContactForm) -> BoxFuture<'a, Result<(), String>> {
        Box::pin(async move {
            tracing::warn!(
                sender = %form.full_name,
                "Contact delivery is not configured; simulating submission"
            );
            tokio::time::sleep(self.delay).await;
            Ok(())
        })
    }
}

/// What: Validate and submit a form through the simulated outbox.
///
/// # Errors
/// - Returns the validation errors when the form is invalid; nothing is sent
pub async fn submit(form: &ContactForm, store: &LocaleStore) -> Result<Toast, Vec<FieldError>> {
    submit_with(form, store, &SimulatedOutbox::default()).await
}

/// What: Validate and submit a form through `outbox`.
///
/// Output:
/// - Success toast (`contact.messages.success` with the sender name) or error
///   toast (`contact.messages.error`) when delivery fails
///
/// # Errors
/// - Returns the validation errors when the form is invalid; nothing is sent
///
/// Details:
/// - Failed deliveries are logged and not retried
pub async fn submit_with(
    form: &ContactForm,
    store: &LocaleStore,
    outbox: &dyn Outbox,
) -> Result<Toast, Vec<FieldError>> {
    let errors = validate(form);
    if !errors.is_empty() {
        tracing::debug!(errors = errors.len(), "Contact form rejected");
        return Err(errors);
    }
    let toast = match outbox.deliver(form).await {
        Ok(()) => {
            tracing::info!("Contact form submitted");
            let params = Params::new().with("name", form.full_name.trim());
            Toast {
                kind: ToastKind::Success,
                message: store.translate("contact.messages.success", Some(&params)),
            }
        }
        Err(e) => {
            tracing::error!(error = %e, "Contact form submission failed");
            Toast {
                kind: ToastKind::Error,
                message: store.t("contact.messages.error"),
            }
        }
    };
    Ok(toast)
}
