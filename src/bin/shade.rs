//! `shade` - inspect palettes and manage the stored theme preference.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use console::Style;
use shade::{
    build_with, detect_color_mode, luminance, palette, parse_hex, rgb_to_ansi256, to_json,
    to_yaml, ColorMode, Exporter, FileStore, PreferenceStore, ThemeConfig, ThemeMode,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "shade", version, about = "Light/dark/system theme tool")]
struct Cli {
    /// Theme config file (.yaml, .yml or .json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the style configuration for a mode
    Show {
        #[arg(long, default_value = "system")]
        mode: ThemeMode,
        #[arg(long, value_enum, default_value_t = Format::Json)]
        format: Format,
    },
    /// Print the palette as colored swatches
    Preview {
        #[arg(long, default_value = "system")]
        mode: ThemeMode,
    },
    /// Print the stored preference
    Get {
        /// Preference file (defaults to the user config directory)
        #[arg(long)]
        store: Option<PathBuf>,
    },
    /// Store a preference
    Set {
        mode: ThemeMode,
        #[arg(long)]
        store: Option<PathBuf>,
    },
    /// Print the pre-hydration bootstrap script
    Script,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Json,
    Yaml,
    Css,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("SHADE_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => ThemeConfig::load(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => ThemeConfig::default(),
    };

    match cli.command {
        Command::Show { mode, format } => {
            let theme = build_with(resolve(mode), &config.overrides);
            let output = match format {
                Format::Json => to_json(&theme)?,
                Format::Yaml => to_yaml(&theme)?,
                Format::Css => Exporter::new()?.css_variables(&theme, ":root")?,
            };
            println!("{}", output.trim_end());
        }
        Command::Preview { mode } => preview(resolve(mode)),
        Command::Get { store } => {
            let store = open_store(store)?;
            let value = store
                .load(&config.storage_key)
                .with_context(|| format!("reading {}", store.path().display()))?;
            match value.as_deref().map(str::parse::<ThemeMode>) {
                Some(Ok(mode)) => println!("{mode}"),
                Some(Err(e)) => println!("unset ({e})"),
                None => println!("unset"),
            }
        }
        Command::Set { mode, store } => {
            let mut store = open_store(store)?;
            store
                .save(&config.storage_key, mode.as_str())
                .with_context(|| format!("writing {}", store.path().display()))?;
            println!("{mode}");
        }
        Command::Script => {
            println!("{}", Exporter::new()?.bootstrap_script(&config)?);
        }
    }

    Ok(())
}

fn resolve(mode: ThemeMode) -> ColorMode {
    mode.fixed().unwrap_or_else(detect_color_mode)
}

fn open_store(path: Option<PathBuf>) -> Result<FileStore> {
    match path {
        Some(path) => Ok(FileStore::new(path)),
        None => FileStore::at_default_location().context("no user config directory available"),
    }
}

fn preview(mode: ColorMode) {
    let palette = palette(mode);
    let width = palette
        .tokens()
        .iter()
        .map(|(path, _)| path.len())
        .max()
        .unwrap_or(0);

    println!("{} palette", Style::new().bold().apply_to(mode));
    for (path, hex) in palette.tokens() {
        let Some(rgb) = parse_hex(hex) else {
            continue;
        };
        let fg = if luminance(rgb) > 0.5 { 16 } else { 231 };
        let swatch = Style::new()
            .on_color256(rgb_to_ansi256(rgb))
            .color256(fg)
            .apply_to(format!(" {hex} "));
        println!("  {path:<width$}  {swatch}");
    }
}
