//! The theme state machine.
//!
//! A [`ThemeStore`] holds the user's [`ThemeMode`] preference, the
//! [`ColorMode`] it resolves to, and the [`StyleConfig`] built for that
//! mode. It moves between states on three events:
//!
//! - **hydrate**: the stored preference is read once (falling back to the OS
//!   signal when nothing valid is stored)
//! - **set_mode**: the user picks a mode, which is persisted
//! - **OS signal change**: only while the preference is `system`
//!
//! The OS signal subscription exists exactly while the preference is
//! `system`. It is a [`Subscription`] guard owned by the store, so it is
//! released when the preference changes away from `system` and when the
//! store is dropped.
//!
//! Every transition rebuilds the style configuration from scratch and then
//! notifies the observers registered with [`ThemeStore::on_change`].

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use crate::config::{FirstRunPolicy, ThemeConfig};
use crate::signal::{ColorSchemeSource, Subscription};
use crate::storage::PreferenceStore;
use crate::theme::{build_with, ColorMode, StyleConfig, ThemeMode};

/// The observable state after a transition.
#[derive(Debug, Clone, PartialEq)]
pub struct ThemeSnapshot {
    pub mode: ThemeMode,
    pub resolved: ColorMode,
    pub theme: Rc<StyleConfig>,
}

type Observer = Box<dyn FnMut(&ThemeSnapshot)>;

struct StoreState {
    mode: ThemeMode,
    resolved: ColorMode,
    theme: Rc<StyleConfig>,
    hydrated: bool,
    builds: u64,
    config: ThemeConfig,
    storage: Box<dyn PreferenceStore>,
    scheme: Rc<dyn ColorSchemeSource>,
    subscription: Option<Subscription>,
}

impl StoreState {
    fn resolve(&self, mode: ThemeMode) -> ColorMode {
        mode.fixed()
            .unwrap_or_else(|| ColorMode::from_prefers_dark(self.scheme.prefers_dark()))
    }

    fn rebuild(&mut self, resolved: ColorMode) {
        self.resolved = resolved;
        self.theme = Rc::new(build_with(resolved, &self.config.overrides));
        self.builds += 1;
    }

    fn snapshot(&self) -> ThemeSnapshot {
        ThemeSnapshot {
            mode: self.mode,
            resolved: self.resolved,
            theme: Rc::clone(&self.theme),
        }
    }

    fn stored_mode(&self) -> Option<ThemeMode> {
        let key = self.config.storage_key.as_str();
        match self.storage.load(key) {
            Ok(Some(raw)) => match raw.parse() {
                Ok(mode) => Some(mode),
                Err(e) => {
                    tracing::warn!(key, error = %e, "ignoring stored theme mode");
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                tracing::warn!(key, error = %e, "failed to read theme preference");
                None
            }
        }
    }

    fn persist(&mut self) {
        let value = self.mode.as_str();
        if let Err(e) = self.storage.save(&self.config.storage_key, value) {
            tracing::warn!(key = %self.config.storage_key, value, error = %e, "failed to persist theme preference");
        }
    }
}

#[derive(Default)]
struct Observers {
    list: RefCell<Vec<Observer>>,
    notifying: Cell<bool>,
    pending: Cell<bool>,
}

/// Light/dark/system theme state.
///
/// # Example
///
/// ```rust
/// use shade::{ColorMode, MemoryStore, SignalHub, ThemeMode, ThemeStore};
///
/// let os = SignalHub::new(false);
/// let store = ThemeStore::new(MemoryStore::new(), os.clone());
/// store.hydrate();
/// assert_eq!(store.resolved(), ColorMode::Light);
///
/// store.set_mode(ThemeMode::System);
/// os.set_prefers_dark(true);
/// assert_eq!(store.mode(), ThemeMode::System);
/// assert_eq!(store.resolved(), ColorMode::Dark);
/// ```
pub struct ThemeStore {
    state: Rc<RefCell<StoreState>>,
    observers: Rc<Observers>,
}

impl ThemeStore {
    /// Creates a store with the default [`ThemeConfig`].
    pub fn new(
        storage: impl PreferenceStore + 'static,
        scheme: impl ColorSchemeSource + 'static,
    ) -> Self {
        Self::with_config(ThemeConfig::default(), storage, scheme)
    }

    /// Creates a store in its pre-hydration state: light preference,
    /// light resolved mode, light style configuration.
    pub fn with_config(
        config: ThemeConfig,
        storage: impl PreferenceStore + 'static,
        scheme: impl ColorSchemeSource + 'static,
    ) -> Self {
        let theme = Rc::new(build_with(ColorMode::Light, &config.overrides));
        Self {
            state: Rc::new(RefCell::new(StoreState {
                mode: ThemeMode::Light,
                resolved: ColorMode::Light,
                theme,
                hydrated: false,
                builds: 1,
                config,
                storage: Box::new(storage),
                scheme: Rc::new(scheme),
                subscription: None,
            })),
            observers: Rc::new(Observers::default()),
        }
    }

    pub fn mode(&self) -> ThemeMode {
        self.state.borrow().mode
    }

    pub fn resolved(&self) -> ColorMode {
        self.state.borrow().resolved
    }

    pub fn theme(&self) -> Rc<StyleConfig> {
        Rc::clone(&self.state.borrow().theme)
    }

    pub fn snapshot(&self) -> ThemeSnapshot {
        self.state.borrow().snapshot()
    }

    pub fn config(&self) -> ThemeConfig {
        self.state.borrow().config.clone()
    }

    pub fn is_hydrated(&self) -> bool {
        self.state.borrow().hydrated
    }

    /// Whether the store currently holds an OS signal subscription.
    pub fn is_tracking_system(&self) -> bool {
        self.state.borrow().subscription.is_some()
    }

    /// How many style configurations have been built, the initial one included.
    pub fn build_count(&self) -> u64 {
        self.state.borrow().builds
    }

    /// Registers an observer called after every transition.
    ///
    /// Observers may call back into the store; a transition triggered from
    /// inside an observer is delivered to all observers once the current
    /// round finishes.
    pub fn on_change(&self, observer: impl FnMut(&ThemeSnapshot) + 'static) {
        self.observers.list.borrow_mut().push(Box::new(observer));
    }

    /// Reads the stored preference and resolves it. Only the first call
    /// has any effect.
    ///
    /// A missing, unreadable or invalid stored value counts as unset; the
    /// resolved mode then comes from the OS signal and the preference
    /// follows [`FirstRunPolicy`]. Hydration never writes storage.
    pub fn hydrate(&self) {
        {
            let mut state = self.state.borrow_mut();
            if state.hydrated {
                return;
            }

            let (mode, resolved) = match state.stored_mode() {
                Some(mode) => (mode, state.resolve(mode)),
                None => {
                    let resolved = ColorMode::from_prefers_dark(state.scheme.prefers_dark());
                    let mode = match state.config.first_run {
                        FirstRunPolicy::AdoptResolved => ThemeMode::from(resolved),
                        FirstRunPolicy::FollowSystem => ThemeMode::System,
                    };
                    (mode, resolved)
                }
            };

            tracing::debug!(mode = %mode, resolved = %resolved, "hydrated theme state");
            state.mode = mode;
            state.hydrated = true;
            state.rebuild(resolved);
        }
        self.reconcile_subscription();
        self.notify();
    }

    /// Sets the user's preference, rebuilds, and persists it.
    ///
    /// Calling this before [`hydrate`](Self::hydrate) marks the store as
    /// hydrated; the explicit choice wins over whatever was stored.
    pub fn set_mode(&self, mode: ThemeMode) {
        {
            let mut state = self.state.borrow_mut();
            state.mode = mode;
            state.hydrated = true;
            let resolved = state.resolve(mode);
            tracing::debug!(mode = %mode, resolved = %resolved, "theme mode set");
            state.rebuild(resolved);
            state.persist();
        }
        self.reconcile_subscription();
        self.notify();
    }

    pub(crate) fn downgrade(&self) -> WeakThemeStore {
        WeakThemeStore {
            state: Rc::downgrade(&self.state),
            observers: Rc::downgrade(&self.observers),
        }
    }

    fn handle_signal(&self, prefers_dark: bool) {
        {
            let mut state = self.state.borrow_mut();
            if !state.mode.is_system() {
                return;
            }
            let resolved = ColorMode::from_prefers_dark(prefers_dark);
            tracing::debug!(resolved = %resolved, "following OS color scheme");
            state.rebuild(resolved);
        }
        self.notify();
    }

    fn reconcile_subscription(&self) {
        let (wants, has, scheme) = {
            let state = self.state.borrow();
            (
                state.mode.is_system(),
                state.subscription.is_some(),
                Rc::clone(&state.scheme),
            )
        };

        if wants && !has {
            let weak = self.downgrade();
            let subscription = scheme.subscribe(Box::new(move |prefers_dark: bool| {
                if let Some(store) = weak.upgrade() {
                    store.handle_signal(prefers_dark);
                }
            }));
            self.state.borrow_mut().subscription = Some(subscription);
            tracing::debug!("subscribed to OS color scheme");
        } else if !wants && has {
            let released = self.state.borrow_mut().subscription.take();
            drop(released);
            tracing::debug!("released OS color scheme subscription");
        }
    }

    fn notify(&self) {
        let observers = &*self.observers;
        if observers.notifying.replace(true) {
            observers.pending.set(true);
            return;
        }
        let _notifying = NotifyingGuard(observers);

        loop {
            observers.pending.set(false);
            let snapshot = self.snapshot();
            let mut round = Round {
                observers,
                current: std::mem::take(&mut *observers.list.borrow_mut()),
            };
            for observer in round.current.iter_mut() {
                observer(&snapshot);
            }
            drop(round);

            if !observers.pending.get() {
                break;
            }
        }
    }
}

/// Observers taken out of the list for one notification round. Dropping it
/// puts them back ahead of any registered during the round, also when an
/// observer panics.
struct Round<'a> {
    observers: &'a Observers,
    current: Vec<Observer>,
}

impl Drop for Round<'_> {
    fn drop(&mut self) {
        let mut list = self.observers.list.borrow_mut();
        let mut current = std::mem::take(&mut self.current);
        current.append(&mut *list);
        *list = current;
    }
}

struct NotifyingGuard<'a>(&'a Observers);

impl Drop for NotifyingGuard<'_> {
    fn drop(&mut self) {
        self.0.notifying.set(false);
        self.0.pending.set(false);
    }
}

impl fmt::Debug for ThemeStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("ThemeStore")
            .field("mode", &state.mode)
            .field("resolved", &state.resolved)
            .field("hydrated", &state.hydrated)
            .field("tracking_system", &state.subscription.is_some())
            .finish()
    }
}

/// A non-owning handle to a [`ThemeStore`].
#[derive(Clone)]
pub(crate) struct WeakThemeStore {
    state: Weak<RefCell<StoreState>>,
    observers: Weak<Observers>,
}

impl WeakThemeStore {
    pub(crate) fn upgrade(&self) -> Option<ThemeStore> {
        Some(ThemeStore {
            state: self.state.upgrade()?,
            observers: self.observers.upgrade()?,
        })
    }
}
