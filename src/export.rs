//! Exporting style configurations for a web page.
//!
//! - [`to_json`] / [`to_yaml`]: the configuration as data
//! - [`Exporter::css_variables`]: a CSS custom-property block for one mode
//! - [`Exporter::stylesheet`]: light variables on `:root`, dark ones on `:root.<dark class>`
//! - [`Exporter::bootstrap_script`]: an inline script a server emits so the
//!   page carries the right marker class before the client hydrates

use minijinja::{context, Environment, Value};
use serde::Serialize;

use crate::config::ThemeConfig;
use crate::error::ExportError;
use crate::theme::{build_with, palette, ColorMode, Overrides, StyleConfig};

/// Prefix of every generated CSS custom property.
pub const CSS_PREFIX: &str = "shade";

const CSS_TEMPLATE: &str = r#"{{ selector }} {
{% for var in vars %}
  --{{ prefix }}-{{ var.name | css_name }}: {{ var.value }};
{% endfor %}
}"#;

const BOOTSTRAP_TEMPLATE: &str = r#"(function () {
  try {
    var stored = window.localStorage.getItem({{ storage_key }});
    var mode = stored === "light" || stored === "dark" || stored === "system" ? stored : null;
    var prefersDark = window.matchMedia("(prefers-color-scheme: dark)").matches;
    var dark = mode === "dark" || (mode !== "light" && prefersDark);
    document.documentElement.classList.toggle({{ dark_class }}, dark);
    if (document.body) {
      document.body.classList.toggle({{ dark_class }}, dark);
      document.body.style.color = dark ? {{ dark_text }} : {{ light_text }};
    }
  } catch (e) {}
})();"#;

#[derive(Serialize)]
struct CssVar {
    name: String,
    value: String,
}

/// Serializes a style configuration as pretty-printed JSON.
pub fn to_json(config: &StyleConfig) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(config)?)
}

pub fn to_yaml(config: &StyleConfig) -> Result<String, ExportError> {
    Ok(serde_yaml::to_string(config)?)
}

/// Renders style configurations into CSS and script snippets.
pub struct Exporter {
    env: Environment<'static>,
}

impl Exporter {
    pub fn new() -> Result<Self, ExportError> {
        let mut env = Environment::new();
        env.set_trim_blocks(true);
        register_filters(&mut env);
        env.add_template("css_variables", CSS_TEMPLATE)?;
        env.add_template("bootstrap", BOOTSTRAP_TEMPLATE)?;
        Ok(Self { env })
    }

    /// Renders every palette token and structural override of `config` as
    /// CSS custom properties under `selector`.
    pub fn css_variables(&self, config: &StyleConfig, selector: &str) -> Result<String, ExportError> {
        let mut vars: Vec<CssVar> = config
            .palette
            .tokens()
            .into_iter()
            .map(|(path, hex)| CssVar {
                name: path.to_string(),
                value: hex.to_string(),
            })
            .collect();

        let button = &config.components.button;
        let text_transform = serde_json::to_value(button.text_transform)?;
        for (name, value) in [
            ("radius", format!("{}px", config.shape.border_radius)),
            ("input.radius", format!("{}px", config.components.input.border_radius)),
            ("select.radius", format!("{}px", config.components.select.border_radius)),
            ("button.radius", format!("{}px", button.border_radius)),
            (
                "button.textTransform",
                text_transform.as_str().unwrap_or("none").to_string(),
            ),
            ("fontFamily", config.typography.font_family.clone()),
        ] {
            vars.push(CssVar {
                name: name.to_string(),
                value,
            });
        }

        let tmpl = self.env.get_template("css_variables")?;
        Ok(tmpl.render(context! {
            selector => selector,
            prefix => CSS_PREFIX,
            vars => vars,
        })?)
    }

    /// Light variables on `:root` followed by dark variables on
    /// `:root.<dark_class>`.
    pub fn stylesheet(&self, overrides: &Overrides, dark_class: &str) -> Result<String, ExportError> {
        let light = self.css_variables(&build_with(ColorMode::Light, overrides), ":root")?;
        let dark = self.css_variables(
            &build_with(ColorMode::Dark, overrides),
            &format!(":root.{dark_class}"),
        )?;
        Ok(format!("{light}\n\n{dark}\n"))
    }

    /// An inline script resolving the stored preference (or the OS signal)
    /// and applying the marker class and text color before hydration.
    pub fn bootstrap_script(&self, config: &ThemeConfig) -> Result<String, ExportError> {
        let tmpl = self.env.get_template("bootstrap")?;
        Ok(tmpl.render(context! {
            storage_key => script_string(&config.storage_key)?,
            dark_class => script_string(&config.dark_class)?,
            light_text => script_string(palette(ColorMode::Light).text.primary)?,
            dark_text => script_string(palette(ColorMode::Dark).text.primary)?,
        })?)
    }
}

/// A JSON string literal that is safe inside an inline `<script>` element.
fn script_string(value: &str) -> Result<String, ExportError> {
    Ok(serde_json::to_string(value)?
        .replace('<', "\\u003c")
        .replace('>', "\\u003e")
        .replace('&', "\\u0026"))
}

fn register_filters(env: &mut Environment<'static>) {
    // `background.default` -> `background-default`, `contrastText` -> `contrast-text`
    env.add_filter("css_name", |value: Value| -> String {
        let mut name = String::new();
        for c in value.to_string().chars() {
            match c {
                '.' => name.push('-'),
                c if c.is_ascii_uppercase() => {
                    name.push('-');
                    name.push(c.to_ascii_lowercase());
                }
                c => name.push(c),
            }
        }
        name
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::build;

    #[test]
    fn test_json_round_trips_palette() {
        let json = to_json(&build(ColorMode::Dark)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["palette"]["mode"], "dark");
        assert_eq!(value["palette"]["background"]["default"], "#121212");
    }

    #[test]
    fn test_yaml_contains_overrides() {
        let yaml = to_yaml(&build(ColorMode::Light)).unwrap();
        assert!(yaml.contains("fontFamily: inherit"));
        assert!(yaml.contains("textTransform: none"));
    }

    #[test]
    fn test_css_variables_block() {
        let exporter = Exporter::new().unwrap();
        let css = exporter
            .css_variables(&build(ColorMode::Light), ":root")
            .unwrap();

        assert!(css.starts_with(":root {\n"));
        assert!(css.ends_with("\n}"));
        assert!(css.contains("  --shade-primary-main: #1976d2;\n"));
        assert!(css.contains("  --shade-primary-contrast-text: #ffffff;\n"));
        assert!(css.contains("  --shade-background-default: #ffffff;\n"));
        assert!(css.contains("  --shade-button-radius: 9999px;\n"));
        assert!(css.contains("  --shade-button-text-transform: none;\n"));
        assert!(css.contains("  --shade-font-family: inherit;\n"));
    }

    #[test]
    fn test_css_variable_count() {
        let exporter = Exporter::new().unwrap();
        let css = exporter
            .css_variables(&build(ColorMode::Dark), ":root")
            .unwrap();
        let declarations = css.lines().filter(|l| l.trim_start().starts_with("--")).count();
        assert_eq!(declarations, build(ColorMode::Dark).palette.tokens().len() + 6);
    }

    #[test]
    fn test_stylesheet_scopes_dark_block() {
        let exporter = Exporter::new().unwrap();
        let css = exporter.stylesheet(&Overrides::default(), "dark").unwrap();
        let dark_at = css.find(":root.dark {").unwrap();
        assert!(css[..dark_at].contains("--shade-background-default: #ffffff;"));
        assert!(css[dark_at..].contains("--shade-background-default: #121212;"));
    }

    #[test]
    fn test_bootstrap_script_quotes_config() {
        let exporter = Exporter::new().unwrap();
        let config = ThemeConfig::default()
            .with_storage_key("app\"Theme")
            .with_dark_class("is-dark");
        let script = exporter.bootstrap_script(&config).unwrap();

        assert!(script.contains(r#"getItem("app\"Theme")"#));
        assert!(script.contains(r#"classList.toggle("is-dark", dark)"#));
        assert!(script.contains(r##"dark ? "#ffffff" : "#1a1a1a""##));
    }

    #[test]
    fn test_bootstrap_script_cannot_close_its_element() {
        let exporter = Exporter::new().unwrap();
        let config = ThemeConfig::default()
            .with_storage_key("</script><script>alert(1)</script>")
            .with_dark_class("a&b");
        let script = exporter.bootstrap_script(&config).unwrap();

        assert!(!script.contains("</script>"));
        assert!(!script.contains("<script>"));
        assert!(script.contains(r#"getItem("\u003c/script\u003e\u003cscript\u003ealert(1)\u003c/script\u003e")"#));
        assert!(script.contains(r#"classList.toggle("a\u0026b", dark)"#));
    }
}
