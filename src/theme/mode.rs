//! Theme preference and resolved color mode.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ParseModeError;

/// The resolved color mode: what actually gets rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    #[default]
    Light,
    Dark,
}

impl ColorMode {
    /// Maps the OS "prefers dark" signal to a color mode.
    pub fn from_prefers_dark(prefers_dark: bool) -> Self {
        if prefers_dark {
            ColorMode::Dark
        } else {
            ColorMode::Light
        }
    }

    pub fn is_dark(self) -> bool {
        self == ColorMode::Dark
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ColorMode::Light => "light",
            ColorMode::Dark => "dark",
        }
    }
}

impl fmt::Display for ColorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The user's stored preference.
///
/// Unlike [`ColorMode`], this can defer to the operating system. A
/// `System` preference has to be resolved against the current OS signal
/// before anything can be built from it.
///
/// # Example
///
/// ```rust
/// use shade::{ColorMode, ThemeMode};
///
/// let mode: ThemeMode = "system".parse().unwrap();
/// assert_eq!(mode.resolve(true), ColorMode::Dark);
/// assert_eq!(ThemeMode::Light.resolve(true), ColorMode::Light);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
    System,
}

impl ThemeMode {
    pub const ALL: [ThemeMode; 3] = [ThemeMode::Light, ThemeMode::Dark, ThemeMode::System];

    /// Resolves to a concrete color mode.
    ///
    /// Fixed preferences ignore the signal; `System` follows it.
    pub fn resolve(self, prefers_dark: bool) -> ColorMode {
        self.fixed()
            .unwrap_or_else(|| ColorMode::from_prefers_dark(prefers_dark))
    }

    /// The color mode of a fixed preference; `None` for `System`.
    pub fn fixed(self) -> Option<ColorMode> {
        match self {
            ThemeMode::Light => Some(ColorMode::Light),
            ThemeMode::Dark => Some(ColorMode::Dark),
            ThemeMode::System => None,
        }
    }

    pub fn is_system(self) -> bool {
        self == ThemeMode::System
    }

    /// The literal persisted in storage.
    pub fn as_str(self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
            ThemeMode::System => "system",
        }
    }
}

impl From<ColorMode> for ThemeMode {
    fn from(mode: ColorMode) -> Self {
        match mode {
            ColorMode::Light => ThemeMode::Light,
            ColorMode::Dark => ThemeMode::Dark,
        }
    }
}

impl FromStr for ThemeMode {
    type Err = ParseModeError;

    /// Accepts exactly the persisted literals; anything else is rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(ThemeMode::Light),
            "dark" => Ok(ThemeMode::Dark),
            "system" => Ok(ThemeMode::System),
            other => Err(ParseModeError {
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
