//! The theme provider and the context it exposes.
//!
//! A [`ThemeProvider`] owns a [`ThemeStore`], keeps a [`Document`] in sync
//! with it, and hands out [`ThemeContext`] values (`mode`, `set_mode`,
//! `theme`) to consumers.
//!
//! Contexts can be passed down explicitly via [`ThemeProvider::context`], or
//! made ambient for a block of code with [`ThemeProvider::scope`], inside
//! which [`use_theme`] finds them. Outside any scope, [`use_theme`] panics
//! and [`try_use_theme`] returns [`ContextError::MissingProvider`].
//!
//! # Example
//!
//! ```rust
//! use shade::{
//!     use_theme, ColorMode, DocumentNode, MemoryDocument, MemoryStore, SignalHub, ThemeMode,
//!     ThemeProvider, ThemeStore,
//! };
//!
//! let store = ThemeStore::new(MemoryStore::with_value("themeMode", "dark"), SignalHub::new(false));
//! let provider = ThemeProvider::new(store, MemoryDocument::new());
//! provider.mount();
//!
//! provider.scope(|| {
//!     let ctx = use_theme();
//!     assert_eq!(ctx.mode(), ThemeMode::Dark);
//!     ctx.set_mode(ThemeMode::Light);
//! });
//!
//! assert_eq!(provider.resolved(), ColorMode::Light);
//! assert!(!provider.document().has_class(DocumentNode::Root, "dark"));
//! ```

use std::cell::{Cell, Ref, RefCell};
use std::fmt;
use std::rc::Rc;

use crate::document::{apply_with, Document};
use crate::error::ContextError;
use crate::store::{ThemeSnapshot, ThemeStore, WeakThemeStore};
use crate::theme::{ColorMode, StyleConfig, ThemeMode};

thread_local! {
    static CONTEXT_STACK: RefCell<Vec<ThemeContext>> = const { RefCell::new(Vec::new()) };
}

/// The value exposed to consumers of a provider.
///
/// A context is a snapshot taken when it was handed out: `mode`,
/// `resolved` and `theme` do not change afterwards. Ask the provider (or
/// call [`use_theme`] again) for a fresh one after a change.
#[derive(Clone)]
pub struct ThemeContext {
    snapshot: ThemeSnapshot,
    store: WeakThemeStore,
}

impl ThemeContext {
    pub fn mode(&self) -> ThemeMode {
        self.snapshot.mode
    }

    pub fn resolved(&self) -> ColorMode {
        self.snapshot.resolved
    }

    pub fn theme(&self) -> Rc<StyleConfig> {
        Rc::clone(&self.snapshot.theme)
    }

    /// Changes the provider's mode.
    ///
    /// Does nothing once the provider has been dropped.
    pub fn set_mode(&self, mode: ThemeMode) {
        match self.store.upgrade() {
            Some(store) => store.set_mode(mode),
            None => tracing::debug!(mode = %mode, "set_mode on an unmounted theme provider"),
        }
    }
}

impl fmt::Debug for ThemeContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThemeContext")
            .field("mode", &self.snapshot.mode)
            .field("resolved", &self.snapshot.resolved)
            .finish()
    }
}

/// Composes a [`ThemeStore`] with document sync and exposes a [`ThemeContext`].
///
/// Dropping the provider drops the store and with it any OS signal
/// subscription.
pub struct ThemeProvider<D: Document + 'static> {
    store: ThemeStore,
    sync: Rc<DocumentSync<D>>,
}

/// Applies resolved modes to the provider's document.
///
/// A mode that arrives while the document is borrowed is kept and applied on
/// the next access through the provider.
struct DocumentSync<D> {
    document: RefCell<D>,
    dark_class: String,
    pending: Cell<Option<ColorMode>>,
}

impl<D: Document> DocumentSync<D> {
    fn apply(&self, resolved: ColorMode) {
        match self.document.try_borrow_mut() {
            Ok(mut document) => {
                self.pending.set(None);
                apply_with(&mut *document, resolved, &self.dark_class);
            }
            Err(_) => {
                tracing::warn!(resolved = %resolved, "document is borrowed, deferring theme sync");
                self.pending.set(Some(resolved));
            }
        }
    }

    fn flush(&self) {
        if let Some(resolved) = self.pending.take() {
            self.apply(resolved);
        }
    }
}

impl<D: Document + 'static> ThemeProvider<D> {
    /// Wraps a store, applying every resolved mode to `document`.
    ///
    /// A store that is already hydrated is applied right away.
    pub fn new(store: ThemeStore, document: D) -> Self {
        let sync = Rc::new(DocumentSync {
            document: RefCell::new(document),
            dark_class: store.config().dark_class,
            pending: Cell::new(None),
        });

        let target = Rc::clone(&sync);
        store.on_change(move |snapshot| target.apply(snapshot.resolved));
        if store.is_hydrated() {
            sync.apply(store.resolved());
        }

        Self { store, sync }
    }

    /// Hydrates the store on first client render.
    pub fn mount(&self) {
        self.sync.flush();
        self.store.hydrate();
    }

    /// Tears the provider down, releasing the OS signal subscription.
    pub fn unmount(self) {
        tracing::debug!("theme provider unmounted");
    }

    pub fn context(&self) -> ThemeContext {
        ThemeContext {
            snapshot: self.store.snapshot(),
            store: self.store.downgrade(),
        }
    }

    pub fn mode(&self) -> ThemeMode {
        self.store.mode()
    }

    pub fn resolved(&self) -> ColorMode {
        self.store.resolved()
    }

    pub fn theme(&self) -> Rc<StyleConfig> {
        self.store.theme()
    }

    pub fn set_mode(&self, mode: ThemeMode) {
        self.sync.flush();
        self.store.set_mode(mode);
    }

    pub fn store(&self) -> &ThemeStore {
        &self.store
    }

    /// Borrows the document, first applying any deferred sync.
    pub fn document(&self) -> Ref<'_, D> {
        self.sync.flush();
        self.sync.document.borrow()
    }

    /// Runs `f` with this provider's context available to [`use_theme`].
    ///
    /// Scopes nest; the innermost provider wins. The context is removed
    /// again when `f` returns or unwinds.
    pub fn scope<R>(&self, f: impl FnOnce() -> R) -> R {
        CONTEXT_STACK.with(|stack| stack.borrow_mut().push(self.context()));
        let _guard = ScopeGuard;
        f()
    }
}

impl<D: Document + fmt::Debug + 'static> fmt::Debug for ThemeProvider<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThemeProvider")
            .field("store", &self.store)
            .field("document", &self.sync.document.borrow())
            .finish()
    }
}

struct ScopeGuard;

impl Drop for ScopeGuard {
    fn drop(&mut self) {
        CONTEXT_STACK.with(|stack| {
            stack.borrow_mut().pop();
        });
    }
}

/// Returns the context of the innermost enclosing provider scope.
pub fn try_use_theme() -> Result<ThemeContext, ContextError> {
    let ctx = CONTEXT_STACK.with(|stack| stack.borrow().last().cloned());
    let ctx = ctx.ok_or(ContextError::MissingProvider)?;
    // Refresh the snapshot so reads after a set_mode inside the scope see it.
    Ok(match ctx.store.upgrade() {
        Some(store) => ThemeContext {
            snapshot: store.snapshot(),
            store: ctx.store,
        },
        None => ctx,
    })
}

/// Returns the context of the innermost enclosing provider scope.
///
/// # Panics
///
/// Panics with "use_theme must be used within a ThemeProvider" when called
/// outside [`ThemeProvider::scope`].
pub fn use_theme() -> ThemeContext {
    match try_use_theme() {
        Ok(ctx) => ctx,
        Err(e) => panic!("{e}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{DocumentNode, MemoryDocument};
    use crate::signal::SignalHub;
    use crate::storage::MemoryStore;
    use crate::theme::palette;

    fn provider(stored: Option<&str>, prefers_dark: bool) -> (ThemeProvider<MemoryDocument>, SignalHub) {
        let hub = SignalHub::new(prefers_dark);
        let storage = match stored {
            Some(value) => MemoryStore::with_value("themeMode", value),
            None => MemoryStore::new(),
        };
        let store = ThemeStore::new(storage, hub.clone());
        (ThemeProvider::new(store, MemoryDocument::new()), hub)
    }

    #[test]
    fn test_mount_syncs_document() {
        let (provider, _) = provider(Some("dark"), false);
        provider.mount();
        let doc = provider.document();
        assert!(doc.has_class(DocumentNode::Root, "dark"));
        assert!(doc.has_class(DocumentNode::Body, "dark"));
        assert_eq!(doc.style(DocumentNode::Body, "color"), Some("#ffffff"));
    }

    #[test]
    fn test_mount_syncs_prehydrated_store() {
        let hub = SignalHub::new(false);
        let store = ThemeStore::new(MemoryStore::with_value("themeMode", "dark"), hub);
        store.hydrate();

        let provider = ThemeProvider::new(store, MemoryDocument::new());
        provider.mount();
        let doc = provider.document();
        assert!(doc.has_class(DocumentNode::Root, "dark"));
        assert_eq!(doc.style(DocumentNode::Body, "color"), Some("#ffffff"));
    }

    #[test]
    fn test_set_mode_while_document_borrowed() {
        let (provider, _) = provider(Some("light"), false);
        provider.mount();

        {
            let held = provider.document();
            provider.set_mode(ThemeMode::Dark);
            assert!(!held.has_class(DocumentNode::Root, "dark"));
        }
        assert!(provider.document().has_class(DocumentNode::Root, "dark"));

        provider.set_mode(ThemeMode::Light);
        assert!(!provider.document().has_class(DocumentNode::Root, "dark"));
        provider.set_mode(ThemeMode::Dark);
        assert!(provider.document().has_class(DocumentNode::Body, "dark"));
    }

    #[test]
    fn test_context_exposes_mode_and_theme() {
        let (provider, _) = provider(Some("system"), true);
        provider.mount();
        let ctx = provider.context();
        assert_eq!(ctx.mode(), ThemeMode::System);
        assert_eq!(ctx.resolved(), ColorMode::Dark);
        assert_eq!(ctx.theme().palette, *palette(ColorMode::Dark));
    }

    #[test]
    fn test_context_set_mode_updates_provider() {
        let (provider, _) = provider(None, false);
        provider.mount();
        provider.context().set_mode(ThemeMode::Dark);
        assert_eq!(provider.mode(), ThemeMode::Dark);
        assert!(provider.document().has_class(DocumentNode::Body, "dark"));
    }

    #[test]
    fn test_use_theme_outside_scope_fails() {
        assert_eq!(
            try_use_theme().unwrap_err(),
            ContextError::MissingProvider
        );
    }

    #[test]
    #[should_panic(expected = "use_theme must be used within a ThemeProvider")]
    fn test_use_theme_outside_scope_panics() {
        let _ = use_theme();
    }

    #[test]
    fn test_scope_is_popped_after_panic() {
        let (provider, _) = provider(None, false);
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            provider.scope(|| panic!("boom"))
        }));
        assert!(result.is_err());
        assert!(try_use_theme().is_err());
    }

    #[test]
    fn test_nested_scopes_use_innermost() {
        let (outer, _) = provider(Some("dark"), false);
        let (inner, _) = provider(Some("light"), false);
        outer.mount();
        inner.mount();

        outer.scope(|| {
            assert_eq!(use_theme().mode(), ThemeMode::Dark);
            inner.scope(|| assert_eq!(use_theme().mode(), ThemeMode::Light));
            assert_eq!(use_theme().mode(), ThemeMode::Dark);
        });
    }

    #[test]
    fn test_use_theme_sees_changes_within_scope() {
        let (provider, _) = provider(None, false);
        provider.mount();
        provider.scope(|| {
            use_theme().set_mode(ThemeMode::Dark);
            assert_eq!(use_theme().resolved(), ColorMode::Dark);
        });
    }

    #[test]
    fn test_context_outliving_provider() {
        let (provider, hub) = provider(Some("system"), false);
        provider.mount();
        let ctx = provider.context();
        provider.unmount();

        assert_eq!(hub.listener_count(), 0);
        ctx.set_mode(ThemeMode::Dark);
        assert_eq!(ctx.mode(), ThemeMode::System);
    }

    #[test]
    fn test_custom_dark_class() {
        let hub = SignalHub::new(true);
        let config = crate::config::ThemeConfig::default().with_dark_class("theme-dark");
        let store = ThemeStore::with_config(config, MemoryStore::new(), hub);
        let provider = ThemeProvider::new(store, MemoryDocument::new());
        provider.mount();
        assert!(provider.document().has_class(DocumentNode::Root, "theme-dark"));
    }
}
