//! Lookups against the bundled tables.

use std::sync::Arc;

use menuboard::i18n::{EmbeddedSource, Locale, LocaleStore, MessageSource, Params};

async fn ready_store(locale: Locale) -> LocaleStore {
    let store = LocaleStore::new(Arc::new(EmbeddedSource), None, locale);
    let failures = store.preload_all().await;
    assert!(failures.is_empty(), "bundled tables must load: {failures:?}");
    store.set_active(locale).await;
    store
}

#[tokio::test]
async fn bundled_tables_share_the_same_keys() {
    let en = EmbeddedSource.fetch(Locale::En).await.expect("en table");
    let es = EmbeddedSource.fetch(Locale::Es).await.expect("es table");
    assert!(!en.is_empty());
    assert_eq!(en.key_count(), es.key_count());
    for key in ["nav.menu", "contact.form.email", "contact.validation.messageMax", "footer.copyright"] {
        assert!(en.lookup(key).is_some(), "en is missing {key}");
        assert!(es.lookup(key).is_some(), "es is missing {key}");
    }
}

#[tokio::test]
async fn present_and_absent_keys() {
    let store = ready_store(Locale::En).await;
    assert_eq!(store.t("contact.form.email"), "Email");
    assert_eq!(store.t("nonexistent.key"), "nonexistent.key");
    // Non-leaf keys fall back to the key as well
    assert_eq!(store.t("contact.form"), "contact.form");
    assert_eq!(store.t(""), "");
}

#[tokio::test]
async fn placeholders_are_substituted() {
    let store = ready_store(Locale::En).await;
    let params = Params::new().with("year", 2024).with("vendor", "Joe's Tacos");
    assert_eq!(
        store.translate("footer.copyright", Some(&params)),
        "(c) 2024 Joe's Tacos. All rights reserved."
    );
    let partial = Params::new().with("year", 2024);
    assert_eq!(
        store.translate("footer.copyright", Some(&partial)),
        "(c) 2024 {vendor}. All rights reserved."
    );
}

#[tokio::test]
async fn translate_in_uses_requested_locale() {
    let store = ready_store(Locale::En).await;
    assert_eq!(store.translate_in(Locale::Es, "nav.menu", None), "Menú");
    assert_eq!(store.translate_in(Locale::En, "nav.menu", None), "Menu");
    assert_eq!(store.active_locale(), Locale::En);
}
