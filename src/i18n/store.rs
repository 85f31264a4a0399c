//! Process-wide locale store.
//!
//! Holds one lazily loaded [`MessageTable`] per [`Locale`], the active locale,
//! and a "switching" indicator. Every state change publishes a fresh immutable
//! [`LocaleSnapshot`] on a watch channel so consumers can re-render.
//!
//! # Invariants
//!
//! - At most one table is resident per locale; tables are never evicted, so
//!   switching back to a loaded locale is synchronous.
//! - Concurrent `load` calls for the same locale share one in-flight fetch.
//! - `switching` is raised only while an uncached locale is loading and is
//!   lowered again whether the load succeeds, fails, or the future is dropped.

use std::sync::Arc;

use futures::future::join_all;
use tokio::sync::{OnceCell, watch};

use crate::i18n::loader::MessageSource;
use crate::i18n::locale::Locale;
use crate::i18n::preference::LocalePreference;
use crate::i18n::translations::{MessageTable, Params};

/// Immutable view of the store published to subscribers.
#[derive(Debug, Clone)]
pub struct LocaleSnapshot {
    /// Active locale.
    pub locale: Locale,
    /// Active table; `None` until the first successful load of `locale`.
    pub table: Option<Arc<MessageTable>>,
    /// Whether a switch to an uncached locale is in progress.
    pub switching: bool,
    /// Number of switches currently loading.
    pending_switches: usize,
}

impl LocaleSnapshot {
    /// Whether locale-dependent UI should show a loading indicator.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.switching || self.table.is_none()
    }

    /// Translate against this snapshot (key fallback when no table is active).
    #[must_use]
    pub fn translate(&self, key: &str, params: Option<&Params>) -> String {
        self.table
            .as_ref()
            .map_or_else(|| key.to_string(), |t| t.translate(key, params))
    }
}

/// Result of [`LocaleStore::set_active`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SwitchOutcome {
    /// Locale was already active; nothing changed.
    Unchanged,
    /// Table was cached; swapped synchronously.
    Swapped,
    /// Table had to be loaded first, then swapped.
    Loaded,
    /// Loading failed; the previous locale stays active.
    Failed(String),
}

/// Lowers the switching indicator when dropped.
struct SwitchGuard<'a> {
    state: &'a watch::Sender<LocaleSnapshot>,
}

impl<'a> SwitchGuard<'a> {
    fn raise(state: &'a watch::Sender<LocaleSnapshot>) -> Self {
        state.send_modify(|s| {
            s.pending_switches += 1;
            s.switching = true;
        });
        Self { state }
    }
}

impl Drop for SwitchGuard<'_> {
    fn drop(&mut self) {
        self.state.send_modify(|s| {
            s.pending_switches = s.pending_switches.saturating_sub(1);
            s.switching = s.pending_switches > 0;
        });
    }
}

/// Cache of message tables plus the active-locale state.
pub struct LocaleStore {
    source: Arc<dyn MessageSource>,
    slots: [OnceCell<Arc<MessageTable>>; Locale::ALL.len()],
    state: watch::Sender<LocaleSnapshot>,
    preference: Option<LocalePreference>,
}

impl std::fmt::Debug for LocaleStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocaleStore")
            .field("source", &self.source.describe())
            .field("active", &self.active_locale())
            .field("loaded", &self.loaded_locales())
            .finish_non_exhaustive()
    }
}

impl LocaleStore {
    /// What: Create an empty store.
    ///
    /// Inputs:
    /// - `source`: Where tables are fetched from
    /// - `preference`: Where the chosen locale is persisted (`None` disables persistence)
    /// - `initial`: Locale marked active before anything is loaded
    ///
    /// Output:
    /// - Store with no resident tables; lookups return keys until a table loads
    #[must_use]
    pub fn new(
        source: Arc<dyn MessageSource>,
        preference: Option<LocalePreference>,
        initial: Locale,
    ) -> Self {
        let snapshot = LocaleSnapshot {
            locale: initial,
            table: None,
            switching: false,
            pending_switches: 0,
        };
        Self {
            source,
            slots: std::array::from_fn(|_| OnceCell::new()),
            state: watch::Sender::new(snapshot),
            preference,
        }
    }

    /// What: Build the store the application runs with.
    ///
    /// Inputs:
    /// - `source`: Table source
    /// - `preference`: Persisted preference (read as a best-effort hint)
    /// - `config`: Locale configuration supplying the default
    ///
    /// Output:
    /// - Shared store with every locale preloaded (failures logged) and the
    ///   resolved locale active when its table loaded
    pub async fn init(
        source: Arc<dyn MessageSource>,
        preference: Option<LocalePreference>,
        config: &crate::i18n::I18nConfig,
    ) -> Arc<Self> {
        let stored = preference.as_ref().and_then(LocalePreference::load);
        let initial = crate::i18n::resolve_locale(stored, config);
        tracing::info!(
            locale = %initial,
            source = %source.describe(),
            "Initializing locale store"
        );

        let store = Arc::new(Self::new(source, preference, initial));
        store.preload_all().await;

        if let Some(table) = store.cached(initial) {
            store.state.send_modify(|s| s.table = Some(table));
        } else {
            tracing::warn!(locale = %initial, "Initial locale unavailable; showing keys");
        }
        store
    }

    /// Slot for `locale`.
    const fn slot(&self, locale: Locale) -> &OnceCell<Arc<MessageTable>> {
        &self.slots[locale.index()]
    }

    /// Cached table for `locale`, if already loaded.
    #[must_use]
    pub fn cached(&self, locale: Locale) -> Option<Arc<MessageTable>> {
        self.slot(locale).get().cloned()
    }

    /// Locales whose tables are resident.
    #[must_use]
    pub fn loaded_locales(&self) -> Vec<Locale> {
        Locale::ALL
            .into_iter()
            .filter(|l| self.slot(*l).initialized())
            .collect()
    }

    /// What: Load and cache the table for `locale`.
    ///
    /// Output:
    /// - Shared table, or the fetch error
    ///
    /// # Errors
    /// - Returns `Err` when the source fails; the slot stays empty so a later
    ///   call retries
    ///
    /// Details:
    /// - Idempotent; concurrent callers wait on the same in-flight fetch
    pub async fn load(&self, locale: Locale) -> Result<Arc<MessageTable>, String> {
        let result = self
            .slot(locale)
            .get_or_try_init(|| async {
                tracing::debug!(locale = %locale, source = %self.source.describe(), "Loading message table");
                let table = self.source.fetch(locale).await?;
                tracing::debug!(
                    locale = %locale,
                    keys = table.key_count(),
                    "Loaded message table"
                );
                Ok::<_, String>(Arc::new(table))
            })
            .await;

        match result {
            Ok(table) => Ok(Arc::clone(table)),
            Err(e) => {
                tracing::error!(locale = %locale, error = %e, "Failed to load messages for locale");
                Err(e)
            }
        }
    }

    /// What: Load every supported locale concurrently.
    ///
    /// Output:
    /// - Locales that failed to load, with their errors
    ///
    /// Details:
    /// - Failures are logged and not retried; a later `load`/`set_active` retries
    pub async fn preload_all(&self) -> Vec<(Locale, String)> {
        let results = join_all(Locale::ALL.into_iter().map(|locale| async move {
            (locale, self.load(locale).await)
        }))
        .await;

        results
            .into_iter()
            .filter_map(|(locale, r)| r.err().map(|e| (locale, e)))
            .collect()
    }

    /// Currently active locale.
    #[must_use]
    pub fn active_locale(&self) -> Locale {
        self.state.borrow().locale
    }

    /// Whether a switch to an uncached locale is in progress.
    #[must_use]
    pub fn is_switching(&self) -> bool {
        self.state.borrow().switching
    }

    /// Current immutable snapshot.
    #[must_use]
    pub fn snapshot(&self) -> LocaleSnapshot {
        self.state.borrow().clone()
    }

    /// Subscribe to snapshot changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<LocaleSnapshot> {
        self.state.subscribe()
    }

    /// What: Translate `key` in the active locale.
    ///
    /// Inputs:
    /// - `key`: Dot-notation key
    /// - `params`: Optional `{name}` substitutions
    ///
    /// Output:
    /// - Translated string, or `key` unchanged when missing
    #[must_use]
    pub fn translate(&self, key: &str, params: Option<&Params>) -> String {
        self.state.borrow().translate(key, params)
    }

    /// Shorthand for [`LocaleStore::translate`] without parameters.
    #[must_use]
    pub fn t(&self, key: &str) -> String {
        self.translate(key, None)
    }

    /// What: Translate `key` in a specific cached locale.
    ///
    /// Output:
    /// - Translation from `locale`'s table, or `key` when that table is not resident
    #[must_use]
    pub fn translate_in(&self, locale: Locale, key: &str, params: Option<&Params>) -> String {
        self.cached(locale)
            .map_or_else(|| key.to_string(), |t| t.translate(key, params))
    }

    /// What: Make `locale` the active locale.
    ///
    /// Output:
    /// - [`SwitchOutcome`] describing what happened
    ///
    /// Details:
    /// - No-op when `locale` is already active with its table resident
    /// - Cached tables swap synchronously without raising `switching`
    /// - Uncached tables raise `switching`, load, swap; on failure the previous
    ///   locale stays active and the error is logged
    /// - Overlapping switches are not cancelled; the last to finish wins
    /// - Successful switches persist the locale
    pub async fn set_active(&self, locale: Locale) -> SwitchOutcome {
        {
            let current = self.state.borrow();
            if current.locale == locale && current.table.is_some() {
                return SwitchOutcome::Unchanged;
            }
        }

        if let Some(table) = self.cached(locale) {
            self.activate(locale, table);
            return SwitchOutcome::Swapped;
        }

        let guard = SwitchGuard::raise(&self.state);
        let outcome = match self.load(locale).await {
            Ok(table) => {
                self.activate(locale, table);
                SwitchOutcome::Loaded
            }
            Err(e) => {
                tracing::error!(
                    locale = %locale,
                    kept = %self.active_locale(),
                    "Locale switch failed; keeping previous locale"
                );
                SwitchOutcome::Failed(e)
            }
        };
        drop(guard);
        outcome
    }

    /// Swap the active table and persist the choice.
    fn activate(&self, locale: Locale, table: Arc<MessageTable>) {
        let mut previous = locale;
        self.state.send_modify(|s| {
            previous = s.locale;
            s.locale = locale;
            s.table = Some(table);
        });
        tracing::info!(from = %previous, to = %locale, "Active locale changed");
        if let Some(pref) = &self.preference
            && let Err(e) = pref.store(locale)
        {
            tracing::warn!(error = %e, "Failed to persist locale preference");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::loader::EmbeddedSource;
    use futures::future::BoxFuture;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::Semaphore;

    /// Source whose fetches block until the test releases a permit.
    struct GatedSource {
        gate: Semaphore,
        calls: AtomicUsize,
        fail: Option<Locale>,
    }

    impl GatedSource {
        fn new(fail: Option<Locale>) -> Arc<Self> {
            Arc::new(Self {
                gate: Semaphore::new(0),
                calls: AtomicUsize::new(0),
                fail,
            })
        }
    }

    impl MessageSource for GatedSource {
        fn fetch(&self, locale: Locale) -> BoxFuture<'_, Result<MessageTable, String>> {
            Box::pin(async move {
                self.calls.fetch_add(1, Ordering::SeqCst);
                let permit = self.gate.acquire().await.map_err(|e| e.to_string())?;
                permit.forget();
                if self.fail == Some(locale) {
                    return Err(format!("boom for {locale}"));
                }
                MessageTable::from_value(json!({ "greeting": format!("hello {{name}} from {locale}") }))
            })
        }

        fn describe(&self) -> String {
            "gated".to_string()
        }
    }

    async fn embedded_store() -> Arc<LocaleStore> {
        let store = Arc::new(LocaleStore::new(Arc::new(EmbeddedSource), None, Locale::En));
        assert!(store.preload_all().await.is_empty());
        assert_eq!(store.set_active(Locale::En).await, SwitchOutcome::Swapped);
        store
    }

    #[tokio::test]
    async fn translate_returns_leaf_and_substitutes_params() {
        let store = embedded_store().await;
        assert_eq!(store.t("contact.form.email"), "Email");
        let params = Params::new().with("name", "Ana");
        assert_eq!(
            store.translate("contact.messages.success", Some(&params)),
            "Thanks, Ana! Your message was sent."
        );
        assert_eq!(store.t("nonexistent.key"), "nonexistent.key");
    }

    #[tokio::test]
    async fn translate_before_any_load_returns_key() {
        let store = LocaleStore::new(Arc::new(EmbeddedSource), None, Locale::Es);
        assert_eq!(store.t("menu.title"), "menu.title");
        assert!(store.snapshot().is_loading());
    }

    #[tokio::test]
    async fn switching_to_cached_locale_never_raises_flag() {
        let store = embedded_store().await;
        let mut rx = store.subscribe();
        rx.mark_unchanged();

        assert_eq!(store.set_active(Locale::Es).await, SwitchOutcome::Swapped);
        assert!(rx.has_changed().expect("sender alive"));
        let snap = rx.borrow_and_update().clone();
        assert_eq!(snap.locale, Locale::Es);
        assert!(!snap.switching);
        assert_eq!(store.t("nav.menu"), "Menú");

        assert_eq!(store.set_active(Locale::Es).await, SwitchOutcome::Unchanged);
        assert!(!rx.has_changed().expect("sender alive"));
    }

    #[tokio::test]
    async fn switching_to_uncached_locale_shows_loading_until_resolved() {
        let source = GatedSource::new(None);
        let store = Arc::new(LocaleStore::new(source.clone(), None, Locale::En));

        let task = {
            let store = Arc::clone(&store);
            tokio::spawn(async move { store.set_active(Locale::Es).await })
        };
        let mut rx = store.subscribe();
        rx.wait_for(|s| s.switching).await.expect("switching raised");
        assert_eq!(store.active_locale(), Locale::En);

        source.gate.add_permits(1);
        let outcome = task.await.expect("switch task panicked");
        assert_eq!(outcome, SwitchOutcome::Loaded);

        let snap = store.snapshot();
        assert!(!snap.switching);
        assert_eq!(snap.locale, Locale::Es);
        let params = Params::new().with("name", "Luis");
        assert_eq!(store.translate("greeting", Some(&params)), "hello Luis from es");
    }

    #[tokio::test]
    async fn failed_switch_keeps_previous_locale_and_clears_flag() {
        let source = GatedSource::new(Some(Locale::Es));
        source.gate.add_permits(2);
        let store = LocaleStore::new(source.clone(), None, Locale::En);
        assert_eq!(store.set_active(Locale::En).await, SwitchOutcome::Loaded);

        let outcome = store.set_active(Locale::Es).await;
        assert!(matches!(outcome, SwitchOutcome::Failed(ref e) if e.contains("boom")));
        let snap = store.snapshot();
        assert_eq!(snap.locale, Locale::En);
        assert!(!snap.switching);
        assert_eq!(store.loaded_locales(), vec![Locale::En]);
    }

    #[tokio::test]
    async fn concurrent_loads_share_one_fetch() {
        let source = GatedSource::new(None);
        let store = Arc::new(LocaleStore::new(source.clone(), None, Locale::En));

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let store = Arc::clone(&store);
                tokio::spawn(async move { store.load(Locale::Es).await })
            })
            .collect();
        tokio::task::yield_now().await;
        source.gate.add_permits(1);

        let mut tables = Vec::new();
        for h in handles {
            tables.push(h.await.expect("load task panicked").expect("load succeeded"));
        }
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
        assert!(tables.windows(2).all(|w| Arc::ptr_eq(&w[0], &w[1])));
    }

    #[tokio::test]
    async fn failed_load_is_retried_later() {
        let source = GatedSource::new(Some(Locale::Es));
        source.gate.add_permits(3);
        let store = LocaleStore::new(source.clone(), None, Locale::En);

        let failures = store.preload_all().await;
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].0, Locale::Es);
        assert!(store.load(Locale::Es).await.is_err());
        assert_eq!(source.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn dropped_switch_future_clears_flag() {
        let source = GatedSource::new(None);
        let store = LocaleStore::new(source, None, Locale::En);
        {
            let fut = store.set_active(Locale::Es);
            tokio::pin!(fut);
            let polled = futures::poll!(fut.as_mut());
            assert!(polled.is_pending());
            assert!(store.is_switching());
        }
        assert!(!store.is_switching());
        assert_eq!(store.active_locale(), Locale::En);
    }

    #[tokio::test]
    async fn successful_switch_persists_preference() {
        let temp_dir = tempfile::TempDir::new().expect("Failed to create temp directory for test");
        let pref = LocalePreference::new(temp_dir.path().join("locale"));
        let store = LocaleStore::new(Arc::new(EmbeddedSource), Some(pref.clone()), Locale::En);

        assert_eq!(store.set_active(Locale::Es).await, SwitchOutcome::Loaded);
        assert_eq!(pref.load(), Some(Locale::Es));
    }

    #[tokio::test]
    async fn init_uses_stored_preference() {
        let temp_dir = tempfile::TempDir::new().expect("Failed to create temp directory for test");
        let pref = LocalePreference::new(temp_dir.path().join("locale"));
        pref.store(Locale::Es).expect("seed preference");

        let store = LocaleStore::init(
            Arc::new(EmbeddedSource),
            Some(pref),
            &crate::i18n::I18nConfig::bundled(),
        )
        .await;
        assert_eq!(store.active_locale(), Locale::Es);
        assert_eq!(store.loaded_locales(), Locale::ALL.to_vec());
        assert!(!store.snapshot().is_loading());
        assert_eq!(store.translate_in(Locale::En, "nav.menu", None), "Menu");
    }
}
