//! Error types.

use std::path::PathBuf;

/// A string that is not one of the persisted mode literals.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid theme mode '{value}' (expected light, dark or system)")]
pub struct ParseModeError {
    pub value: String,
}

/// Failure reading or writing persisted preferences.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("failed to access preference file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed preference file {path}: {source}")]
    Format {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Failure loading a [`ThemeConfig`](crate::ThemeConfig).
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid YAML config: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid JSON config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unsupported config extension for {path} (expected .yaml, .yml or .json)")]
    UnknownFormat { path: PathBuf },
}

/// The theme context was requested outside of a provider scope.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContextError {
    #[error("use_theme must be used within a ThemeProvider")]
    MissingProvider,
}

/// Failure exporting a style configuration.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("template error: {0}")]
    Template(#[from] minijinja::Error),
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("YAML serialization failed: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_provider_names_provider() {
        let msg = ContextError::MissingProvider.to_string();
        assert!(msg.contains("ThemeProvider"));
        assert!(msg.contains("use_theme"));
    }

    #[test]
    fn test_storage_error_display_includes_path() {
        let err = StorageError::Io {
            path: PathBuf::from("/tmp/prefs.yaml"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        let msg = err.to_string();
        assert!(msg.contains("/tmp/prefs.yaml"));
        assert!(msg.contains("denied"));
    }

    #[test]
    fn test_unknown_format_display() {
        let err = ConfigError::UnknownFormat {
            path: PathBuf::from("theme.toml"),
        };
        assert!(err.to_string().contains("theme.toml"));
    }
}
