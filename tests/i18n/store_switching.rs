//! Switching behavior observed through the public store API.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use futures::future::BoxFuture;
use menuboard::i18n::{
    EmbeddedSource, I18nConfig, Locale, LocalePreference, LocaleStore, MessageSource,
    MessageTable, SwitchOutcome,
};
use tokio::sync::Semaphore;

/// Bundled tables, with Spanish held back until the gate opens.
struct HeldSpanish {
    gate: Semaphore,
    fetches: AtomicUsize,
}

impl HeldSpanish {
    fn new() -> Self {
        Self {
            gate: Semaphore::new(0),
            fetches: AtomicUsize::new(0),
        }
    }
}

impl MessageSource for HeldSpanish {
    fn fetch(&self, locale: Locale) -> BoxFuture<'_, Result<MessageTable, String>> {
        Box::pin(async move {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            if locale == Locale::Es {
                let permit = self.gate.acquire().await.map_err(|e| e.to_string())?;
                permit.forget();
            }
            EmbeddedSource.fetch(locale).await
        })
    }

    fn describe(&self) -> String {
        "held spanish".to_string()
    }
}

#[tokio::test]
async fn uncached_switch_raises_and_lowers_switching() {
    let source = Arc::new(HeldSpanish::new());
    let store = Arc::new(LocaleStore::new(source.clone(), None, Locale::En));
    store.load(Locale::En).await.expect("en loads");
    assert_eq!(store.set_active(Locale::En).await, SwitchOutcome::Swapped);

    let mut rx = store.subscribe();
    let switch = tokio::spawn({
        let store = store.clone();
        async move { store.set_active(Locale::Es).await }
    });

    rx.changed().await.expect("store alive");
    assert!(rx.borrow_and_update().switching);
    assert!(store.is_switching());
    assert_eq!(store.active_locale(), Locale::En);
    assert_eq!(store.t("nav.menu"), "Menu");

    source.gate.add_permits(1);
    assert_eq!(switch.await.expect("switch task"), SwitchOutcome::Loaded);
    let snapshot = store.snapshot();
    assert!(!snapshot.switching);
    assert_eq!(snapshot.locale, Locale::Es);
    assert_eq!(snapshot.translate("nav.menu", None), "Menú");
}

#[tokio::test]
async fn cached_switch_never_raises_switching() {
    let source = Arc::new(HeldSpanish::new());
    source.gate.add_permits(1);
    let store = LocaleStore::new(source.clone(), None, Locale::En);
    assert!(store.preload_all().await.is_empty());
    assert_eq!(store.loaded_locales(), vec![Locale::En, Locale::Es]);

    let rx = store.subscribe();
    assert_eq!(store.set_active(Locale::Es).await, SwitchOutcome::Swapped);
    assert!(!rx.borrow().switching);
    assert_eq!(store.set_active(Locale::Es).await, SwitchOutcome::Unchanged);
    assert_eq!(store.set_active(Locale::En).await, SwitchOutcome::Swapped);
    assert!(!store.is_switching());
    assert_eq!(source.fetches.load(Ordering::SeqCst), 2, "tables are fetched once");
}

#[tokio::test]
async fn chosen_locale_survives_restart() {
    let temp_dir = tempfile::TempDir::new().expect("Failed to create temp directory for test");
    let preference = LocalePreference::new(temp_dir.path().join("locale"));
    let config = I18nConfig::bundled();

    let store = LocaleStore::init(Arc::new(EmbeddedSource), Some(preference.clone()), &config).await;
    assert_eq!(store.active_locale(), Locale::En);
    assert_eq!(store.set_active(Locale::Es).await, SwitchOutcome::Swapped);
    assert_eq!(preference.load(), Some(Locale::Es));

    let restarted = LocaleStore::init(Arc::new(EmbeddedSource), Some(preference), &config).await;
    assert_eq!(restarted.active_locale(), Locale::Es);
    assert_eq!(restarted.t("contact.form.email"), "Correo electrónico");
}

#[tokio::test]
async fn missing_or_invalid_preference_starts_on_configured_default() {
    // A Spanish host locale must not leak into the starting locale.
    unsafe {
        std::env::set_var("LC_ALL", "es_MX.UTF-8");
        std::env::set_var("LANG", "es_MX.UTF-8");
    }
    let temp_dir = tempfile::TempDir::new().expect("Failed to create temp directory for test");
    let preference = LocalePreference::new(temp_dir.path().join("locale"));
    let config = I18nConfig::bundled();

    let fresh = LocaleStore::init(Arc::new(EmbeddedSource), Some(preference.clone()), &config).await;
    assert_eq!(fresh.active_locale(), Locale::En);
    assert_eq!(fresh.t("contact.form.email"), "Email");

    std::fs::write(preference.path(), "fr\n").expect("write unsupported preference");
    let invalid = LocaleStore::init(Arc::new(EmbeddedSource), Some(preference.clone()), &config).await;
    assert_eq!(invalid.active_locale(), Locale::En);

    let spanish_default = I18nConfig {
        default_locale: Locale::Es,
    };
    std::fs::write(preference.path(), "de\n").expect("write unsupported preference");
    let configured = LocaleStore::init(Arc::new(EmbeddedSource), Some(preference), &spanish_default).await;
    assert_eq!(configured.active_locale(), Locale::Es);
}
