//! Palettes, style building and color-mode types.
//!
//! This module provides:
//!
//! - [`ThemeMode`]: The stored light/dark/system preference
//! - [`ColorMode`]: The resolved light or dark mode
//! - [`palette`]: Lookup into the two static [`Palette`] tables
//! - [`build`]: Merges a palette with the structural [`Overrides`] into a [`StyleConfig`]
//! - [`detect_color_mode`]: OS color-scheme detection with an overridable detector

mod adaptive;
mod builder;
mod mode;
mod palette;

pub use adaptive::{detect_color_mode, reset_theme_detector, set_theme_detector};
pub use builder::{
    build, build_with, ButtonStyle, Components, FieldStyle, Overrides, Shape, StyleConfig,
    TextTransform, Typography, INHERIT_FONT, PILL_RADIUS,
};
pub use mode::{ColorMode, ThemeMode};
pub use palette::{
    palette, ActionColors, BackgroundColors, ColorRole, Palette, TextColors, DARK_PALETTE,
    LIGHT_PALETTE,
};
