//! # Shade - light/dark/system theming
//!
//! Shade keeps a user's theme preference (`light`, `dark` or `system`) in
//! sync with persistent storage, the operating system's color scheme and a
//! document, and builds the style configuration for the resolved mode.
//!
//! ## Core Concepts
//!
//! - [`ThemeMode`]: The stored preference, which may defer to the OS
//! - [`ColorMode`]: The resolved light or dark mode
//! - [`palette`] / [`build`]: Static palettes and the [`StyleConfig`] built from them
//! - [`ThemeStore`]: The state machine (hydrate, set mode, follow the OS)
//! - [`ThemeProvider`]: Composes a store with document sync and exposes a [`ThemeContext`]
//!
//! ## Quick Start
//!
//! ```rust
//! use shade::{
//!     ColorMode, DocumentNode, MemoryDocument, MemoryStore, SignalHub, ThemeMode,
//!     ThemeProvider, ThemeStore,
//! };
//!
//! let os = SignalHub::new(true);
//! let provider = ThemeProvider::new(
//!     ThemeStore::new(MemoryStore::new(), os.clone()),
//!     MemoryDocument::new(),
//! );
//! provider.mount();
//!
//! // Nothing stored: the OS preference is adopted.
//! assert_eq!(provider.mode(), ThemeMode::Dark);
//! assert!(provider.document().has_class(DocumentNode::Root, "dark"));
//!
//! // Follow the OS live.
//! provider.set_mode(ThemeMode::System);
//! os.set_prefers_dark(false);
//! assert_eq!(provider.resolved(), ColorMode::Light);
//! ```
//!
//! ## Seams
//!
//! Storage, the OS signal and the document are traits
//! ([`PreferenceStore`], [`ColorSchemeSource`], [`Document`]) so hosts can
//! bind them to their platform. In-process implementations ship with the
//! crate: [`MemoryStore`], [`FileStore`], [`SignalHub`], [`OsColorScheme`]
//! and [`MemoryDocument`].
//!
//! Everything here is single-threaded: state lives in `Rc<RefCell<_>>` and
//! all transitions run to completion on the calling thread.

mod config;
mod document;
mod error;
mod export;
mod provider;
mod signal;
mod storage;
mod store;
mod theme;
mod util;

pub use config::{FirstRunPolicy, ThemeConfig};
pub use document::{apply, apply_with, Document, DocumentNode, MemoryDocument, DEFAULT_DARK_CLASS};
pub use error::{ConfigError, ContextError, ExportError, ParseModeError, StorageError};
pub use export::{to_json, to_yaml, Exporter, CSS_PREFIX};
pub use provider::{try_use_theme, use_theme, ThemeContext, ThemeProvider};
pub use signal::{ColorSchemeSource, Listener, OsColorScheme, SignalHub, Subscription};
pub use storage::{
    default_preferences_path, FileStore, MemoryStore, PreferenceStore, DEFAULT_STORAGE_KEY,
};
pub use store::{ThemeSnapshot, ThemeStore};
pub use theme::{
    build, build_with, detect_color_mode, palette, reset_theme_detector, set_theme_detector,
    ActionColors, BackgroundColors, ButtonStyle, ColorMode, ColorRole, Components, FieldStyle,
    Overrides, Palette, Shape, StyleConfig, TextColors, TextTransform, ThemeMode, Typography,
    DARK_PALETTE, INHERIT_FONT, LIGHT_PALETTE, PILL_RADIUS,
};
pub use util::{luminance, parse_hex, rgb_to_ansi256};
