//! Static light and dark palettes.

use serde::Serialize;

use super::mode::ColorMode;

/// A main color with its lighter, darker and contrast variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorRole {
    pub main: &'static str,
    pub light: &'static str,
    pub dark: &'static str,
    pub contrast_text: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BackgroundColors {
    pub default: &'static str,
    pub paper: &'static str,
    pub secondary: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TextColors {
    pub primary: &'static str,
    pub secondary: &'static str,
    pub disabled: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ActionColors {
    pub hover: &'static str,
    pub selected: &'static str,
    pub disabled: &'static str,
}

/// The color tokens for one color mode.
///
/// Both palettes share this one type, so they always have the same shape.
/// Every color is a `#rrggbb` string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Palette {
    pub mode: ColorMode,
    pub primary: ColorRole,
    pub secondary: ColorRole,
    pub background: BackgroundColors,
    pub text: TextColors,
    pub divider: &'static str,
    pub border: &'static str,
    pub action: ActionColors,
}

impl Palette {
    /// Every color token as a `(path, hex)` pair, in declaration order.
    ///
    /// Paths are dot-separated, e.g. `background.paper`.
    pub fn tokens(&self) -> Vec<(&'static str, &'static str)> {
        vec![
            ("primary.main", self.primary.main),
            ("primary.light", self.primary.light),
            ("primary.dark", self.primary.dark),
            ("primary.contrastText", self.primary.contrast_text),
            ("secondary.main", self.secondary.main),
            ("secondary.light", self.secondary.light),
            ("secondary.dark", self.secondary.dark),
            ("secondary.contrastText", self.secondary.contrast_text),
            ("background.default", self.background.default),
            ("background.paper", self.background.paper),
            ("background.secondary", self.background.secondary),
            ("text.primary", self.text.primary),
            ("text.secondary", self.text.secondary),
            ("text.disabled", self.text.disabled),
            ("divider", self.divider),
            ("border", self.border),
            ("action.hover", self.action.hover),
            ("action.selected", self.action.selected),
            ("action.disabled", self.action.disabled),
        ]
    }
}

pub static LIGHT_PALETTE: Palette = Palette {
    mode: ColorMode::Light,
    primary: ColorRole {
        main: "#1976d2",
        light: "#42a5f5",
        dark: "#1565c0",
        contrast_text: "#ffffff",
    },
    secondary: ColorRole {
        main: "#9c27b0",
        light: "#ba68c8",
        dark: "#7b1fa2",
        contrast_text: "#ffffff",
    },
    background: BackgroundColors {
        default: "#ffffff",
        paper: "#ffffff",
        secondary: "#f5f5f5",
    },
    text: TextColors {
        primary: "#1a1a1a",
        secondary: "#5f6368",
        disabled: "#9e9e9e",
    },
    divider: "#e0e0e0",
    border: "#d0d0d0",
    action: ActionColors {
        hover: "#f5f5f5",
        selected: "#ebebeb",
        disabled: "#bdbdbd",
    },
};

pub static DARK_PALETTE: Palette = Palette {
    mode: ColorMode::Dark,
    primary: ColorRole {
        main: "#90caf9",
        light: "#e3f2fd",
        dark: "#42a5f5",
        contrast_text: "#0a0a0a",
    },
    secondary: ColorRole {
        main: "#ce93d8",
        light: "#f3e5f5",
        dark: "#ab47bc",
        contrast_text: "#0a0a0a",
    },
    background: BackgroundColors {
        default: "#121212",
        paper: "#1e1e1e",
        secondary: "#2a2a2a",
    },
    text: TextColors {
        primary: "#ffffff",
        secondary: "#b0b0b0",
        disabled: "#6b6b6b",
    },
    divider: "#2f2f2f",
    border: "#3a3a3a",
    action: ActionColors {
        hover: "#2a2a2a",
        selected: "#333333",
        disabled: "#4a4a4a",
    },
};

/// Looks up the palette for a color mode.
pub fn palette(mode: ColorMode) -> &'static Palette {
    match mode {
        ColorMode::Light => &LIGHT_PALETTE,
        ColorMode::Dark => &DARK_PALETTE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::parse_hex;

    #[test]
    fn test_palette_lookup_matches_mode() {
        assert_eq!(palette(ColorMode::Light).mode, ColorMode::Light);
        assert_eq!(palette(ColorMode::Dark).mode, ColorMode::Dark);
    }

    #[test]
    fn test_every_token_is_hex() {
        for mode in [ColorMode::Light, ColorMode::Dark] {
            for (path, hex) in palette(mode).tokens() {
                assert!(parse_hex(hex).is_some(), "{mode} {path} = {hex}");
            }
        }
    }

    #[test]
    fn test_palettes_share_token_paths() {
        let light: Vec<_> = LIGHT_PALETTE.tokens().into_iter().map(|(p, _)| p).collect();
        let dark: Vec<_> = DARK_PALETTE.tokens().into_iter().map(|(p, _)| p).collect();
        assert_eq!(light, dark);
    }

    #[test]
    fn test_dark_background_is_darker() {
        let (lr, lg, lb) = parse_hex(LIGHT_PALETTE.background.default).unwrap();
        let (dr, dg, db) = parse_hex(DARK_PALETTE.background.default).unwrap();
        let light = lr as u32 + lg as u32 + lb as u32;
        let dark = dr as u32 + dg as u32 + db as u32;
        assert!(dark < light);
    }

    #[test]
    fn test_light_palette_snapshot() {
        let value = serde_json::to_value(LIGHT_PALETTE).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "mode": "light",
                "primary": {
                    "main": "#1976d2",
                    "light": "#42a5f5",
                    "dark": "#1565c0",
                    "contrastText": "#ffffff"
                },
                "secondary": {
                    "main": "#9c27b0",
                    "light": "#ba68c8",
                    "dark": "#7b1fa2",
                    "contrastText": "#ffffff"
                },
                "background": {
                    "default": "#ffffff",
                    "paper": "#ffffff",
                    "secondary": "#f5f5f5"
                },
                "text": {
                    "primary": "#1a1a1a",
                    "secondary": "#5f6368",
                    "disabled": "#9e9e9e"
                },
                "divider": "#e0e0e0",
                "border": "#d0d0d0",
                "action": {
                    "hover": "#f5f5f5",
                    "selected": "#ebebeb",
                    "disabled": "#bdbdbd"
                }
            })
        );
    }

    #[test]
    fn test_dark_palette_snapshot() {
        let value = serde_json::to_value(DARK_PALETTE).unwrap();
        assert_eq!(value["mode"], "dark");
        assert_eq!(value["background"]["default"], "#121212");
        assert_eq!(value["background"]["paper"], "#1e1e1e");
        assert_eq!(value["text"]["primary"], "#ffffff");
        assert_eq!(value["primary"]["main"], "#90caf9");
        assert_eq!(value["action"]["selected"], "#333333");
    }
}
