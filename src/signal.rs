//! The operating system's "prefers dark" signal and its subscriptions.
//!
//! A [`ColorSchemeSource`] answers "does the OS prefer dark right now?" and
//! delivers change notifications to subscribers. Subscribing hands back a
//! [`Subscription`] guard; dropping the guard deregisters the listener.
//!
//! [`SignalHub`] is the in-process implementation: hosts (or tests) push
//! new values into it and it fans them out. [`OsColorScheme`] wraps a hub
//! and feeds it from OS detection each time it is polled.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use crate::theme::{detect_color_mode, ColorMode};

/// Callback invoked with the new "prefers dark" value.
pub type Listener = Box<dyn FnMut(bool)>;

/// A source of the OS color-scheme signal.
pub trait ColorSchemeSource {
    /// Whether the OS currently prefers a dark color scheme.
    fn prefers_dark(&self) -> bool;

    /// Registers a listener for changes of the signal.
    ///
    /// The listener stays registered until the returned guard is dropped.
    fn subscribe(&self, listener: Listener) -> Subscription;
}

/// Guard for a registered listener.
///
/// Dropping it (or calling [`cancel`](Self::cancel)) deregisters the
/// listener exactly once.
#[must_use = "dropping a Subscription immediately deregisters the listener"]
pub struct Subscription {
    release: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    /// Creates a guard that runs `release` when dropped.
    pub fn new(release: impl FnOnce() + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }

    /// Deregisters now.
    pub fn cancel(mut self) {
        self.release_now();
    }

    fn release_now(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release_now();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.release.is_some())
            .finish()
    }
}

struct HubInner {
    prefers_dark: bool,
    delivering: bool,
    next_id: u64,
    listeners: Vec<(u64, Rc<RefCell<Listener>>)>,
}

/// In-process broadcaster for the color-scheme signal.
///
/// Cloning yields another handle to the same hub.
///
/// # Example
///
/// ```rust
/// use std::cell::Cell;
/// use std::rc::Rc;
/// use shade::{ColorSchemeSource, SignalHub};
///
/// let hub = SignalHub::new(false);
/// let seen = Rc::new(Cell::new(0));
/// let counter = seen.clone();
/// let subscription = hub.subscribe(Box::new(move |_: bool| counter.set(counter.get() + 1)));
///
/// hub.set_prefers_dark(true);
/// hub.set_prefers_dark(true); // unchanged, not delivered
/// drop(subscription);
/// hub.set_prefers_dark(false); // nobody listening
///
/// assert_eq!(seen.get(), 1);
/// ```
#[derive(Clone)]
pub struct SignalHub {
    inner: Rc<RefCell<HubInner>>,
}

impl SignalHub {
    pub fn new(prefers_dark: bool) -> Self {
        Self {
            inner: Rc::new(RefCell::new(HubInner {
                prefers_dark,
                delivering: false,
                next_id: 0,
                listeners: Vec::new(),
            })),
        }
    }

    /// Publishes a new signal value.
    ///
    /// Listeners are called in subscription order, and only when the value
    /// actually changed. Returns whether it changed.
    ///
    /// A change published from inside a listener is not delivered
    /// re-entrantly: the current round finishes first, then every listener
    /// receives the latest value. Intermediate values may be coalesced.
    pub fn set_prefers_dark(&self, prefers_dark: bool) -> bool {
        {
            let mut inner = self.inner.borrow_mut();
            if inner.prefers_dark == prefers_dark {
                return false;
            }
            inner.prefers_dark = prefers_dark;
            if inner.delivering {
                return true;
            }
            inner.delivering = true;
        }
        let _delivering = DeliveryGuard(&*self.inner);

        let mut delivered = None;
        loop {
            let (value, listeners): (bool, Vec<Rc<RefCell<Listener>>>) = {
                let inner = self.inner.borrow();
                if delivered == Some(inner.prefers_dark) {
                    break;
                }
                let listeners = inner.listeners.iter().map(|(_, l)| Rc::clone(l)).collect();
                (inner.prefers_dark, listeners)
            };

            tracing::debug!(prefers_dark = value, listeners = listeners.len(), "color scheme changed");
            for listener in listeners {
                (&mut **listener.borrow_mut())(value);
            }
            delivered = Some(value);
        }
        true
    }

    pub fn listener_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }
}

struct DeliveryGuard<'a>(&'a RefCell<HubInner>);

impl Drop for DeliveryGuard<'_> {
    fn drop(&mut self) {
        if let Ok(mut inner) = self.0.try_borrow_mut() {
            inner.delivering = false;
        }
    }
}

impl ColorSchemeSource for SignalHub {
    fn prefers_dark(&self) -> bool {
        self.inner.borrow().prefers_dark
    }

    fn subscribe(&self, listener: Listener) -> Subscription {
        let id = {
            let mut inner = self.inner.borrow_mut();
            let id = inner.next_id;
            inner.next_id += 1;
            inner.listeners.push((id, Rc::new(RefCell::new(listener))));
            id
        };

        let weak: Weak<RefCell<HubInner>> = Rc::downgrade(&self.inner);
        Subscription::new(move || {
            if let Some(inner) = weak.upgrade() {
                inner.borrow_mut().listeners.retain(|(lid, _)| *lid != id);
            }
        })
    }
}

impl fmt::Debug for SignalHub {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("SignalHub")
            .field("prefers_dark", &inner.prefers_dark)
            .field("listeners", &inner.listeners.len())
            .finish()
    }
}

/// The real OS signal, sampled through [`detect_color_mode`].
///
/// OS detection has no push notifications here, so the host calls
/// [`poll`](Self::poll) from its event loop (on focus, on a timer) and
/// changes are published to subscribers from there.
#[derive(Debug, Clone)]
pub struct OsColorScheme {
    hub: SignalHub,
    polls: Rc<Cell<u64>>,
}

impl OsColorScheme {
    pub fn new() -> Self {
        Self {
            hub: SignalHub::new(detect_color_mode().is_dark()),
            polls: Rc::new(Cell::new(0)),
        }
    }

    /// Re-detects the OS color scheme and publishes it if it changed.
    pub fn poll(&self) -> bool {
        self.polls.set(self.polls.get() + 1);
        self.hub
            .set_prefers_dark(detect_color_mode() == ColorMode::Dark)
    }

    pub fn poll_count(&self) -> u64 {
        self.polls.get()
    }
}

impl Default for OsColorScheme {
    fn default() -> Self {
        Self::new()
    }
}

impl ColorSchemeSource for OsColorScheme {
    fn prefers_dark(&self) -> bool {
        self.hub.prefers_dark()
    }

    fn subscribe(&self, listener: Listener) -> Subscription {
        self.hub.subscribe(listener)
    }
}
