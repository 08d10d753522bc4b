//! Style configuration built from a palette and a fixed override block.

use serde::{Deserialize, Serialize};

use super::mode::ColorMode;
use super::palette::{palette, Palette};

/// Radius used for fully rounded ("pill") buttons.
pub const PILL_RADIUS: u32 = 9999;

/// Font family that defers to the host page's font stack.
pub const INHERIT_FONT: &str = "inherit";

/// Text casing policy for button labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextTransform {
    /// Labels render as written.
    #[default]
    None,
    Uppercase,
}

/// The structural overrides merged into every style configuration.
///
/// `Overrides::default()` is the stock block: 8px radii for inputs,
/// selects and the global default, pill-shaped buttons without automatic
/// uppercasing, and an inherited font family.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Overrides {
    pub border_radius: u32,
    pub input_radius: u32,
    pub select_radius: u32,
    pub button_radius: u32,
    pub button_text_transform: TextTransform,
    pub font_family: String,
}

impl Default for Overrides {
    fn default() -> Self {
        Self {
            border_radius: 8,
            input_radius: 8,
            select_radius: 8,
            button_radius: PILL_RADIUS,
            button_text_transform: TextTransform::None,
            font_family: INHERIT_FONT.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Shape {
    pub border_radius: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Typography {
    pub font_family: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldStyle {
    pub border_radius: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ButtonStyle {
    pub border_radius: u32,
    pub text_transform: TextTransform,
}

/// Component-level style rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Components {
    pub input: FieldStyle,
    pub select: FieldStyle,
    pub button: ButtonStyle,
}

/// The full style configuration consumed by a rendering layer.
///
/// Built fresh for every resolved mode and never patched in place.
/// Serializes with camelCase keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StyleConfig {
    pub palette: Palette,
    pub shape: Shape,
    pub components: Components,
    pub typography: Typography,
}

impl StyleConfig {
    pub fn mode(&self) -> ColorMode {
        self.palette.mode
    }
}

/// Builds the style configuration for a color mode with the stock overrides.
///
/// # Example
///
/// ```rust
/// use shade::{build, palette, ColorMode};
///
/// let config = build(ColorMode::Dark);
/// assert_eq!(config.palette, *palette(ColorMode::Dark));
/// assert_eq!(config.typography.font_family, "inherit");
/// ```
pub fn build(mode: ColorMode) -> StyleConfig {
    build_with(mode, &Overrides::default())
}

/// Builds the style configuration for a color mode with explicit overrides.
pub fn build_with(mode: ColorMode, overrides: &Overrides) -> StyleConfig {
    StyleConfig {
        palette: *palette(mode),
        shape: Shape {
            border_radius: overrides.border_radius,
        },
        components: Components {
            input: FieldStyle {
                border_radius: overrides.input_radius,
            },
            select: FieldStyle {
                border_radius: overrides.select_radius,
            },
            button: ButtonStyle {
                border_radius: overrides.button_radius,
                text_transform: overrides.button_text_transform,
            },
        },
        typography: Typography {
            font_family: overrides.font_family.clone(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_preserves_palette() {
        for mode in [ColorMode::Light, ColorMode::Dark] {
            assert_eq!(build(mode).palette, *palette(mode));
        }
    }

    #[test]
    fn test_build_is_deterministic_and_independent() {
        let a = build(ColorMode::Light);
        let mut b = build(ColorMode::Light);
        assert_eq!(a, b);

        b.typography.font_family.push_str(", serif");
        assert_eq!(a.typography.font_family, INHERIT_FONT);
        assert_ne!(a, b);
    }

    #[test]
    fn test_build_attaches_stock_overrides() {
        let config = build(ColorMode::Dark);
        assert_eq!(config.shape.border_radius, 8);
        assert_eq!(config.components.input.border_radius, 8);
        assert_eq!(config.components.select.border_radius, 8);
        assert_eq!(config.components.button.border_radius, PILL_RADIUS);
        assert_eq!(config.components.button.text_transform, TextTransform::None);
        assert_eq!(config.typography.font_family, "inherit");
    }

    #[test]
    fn test_build_with_custom_overrides() {
        let overrides = Overrides {
            border_radius: 4,
            button_text_transform: TextTransform::Uppercase,
            ..Overrides::default()
        };
        let config = build_with(ColorMode::Light, &overrides);
        assert_eq!(config.shape.border_radius, 4);
        assert_eq!(config.components.input.border_radius, 8);
        assert_eq!(
            config.components.button.text_transform,
            TextTransform::Uppercase
        );
        assert_eq!(config.palette, *palette(ColorMode::Light));
    }

    #[test]
    fn test_serialized_keys_are_camel_case() {
        let value = serde_json::to_value(build(ColorMode::Light)).unwrap();
        assert_eq!(value["shape"]["borderRadius"], 8);
        assert_eq!(value["components"]["button"]["borderRadius"], PILL_RADIUS);
        assert_eq!(value["components"]["button"]["textTransform"], "none");
        assert_eq!(value["typography"]["fontFamily"], "inherit");
        assert_eq!(value["palette"]["primary"]["contrastText"], "#ffffff");
    }

    #[test]
    fn test_overrides_deserialize_partially() {
        let overrides: Overrides = serde_yaml::from_str("input_radius: 2\n").unwrap();
        assert_eq!(overrides.input_radius, 2);
        assert_eq!(overrides.button_radius, PILL_RADIUS);
        assert_eq!(overrides.font_family, INHERIT_FONT);
    }
}
