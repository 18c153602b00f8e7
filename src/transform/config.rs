//! Configuration for the transform pipeline

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when loading a configuration file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Options recognized by the transformer
#[derive(Debug, Clone)]
pub struct TransformConfig {
    /// Prefer CSS grid output: do not force children into row containers
    pub grid: bool,
    /// Merge near-identical grid columns (reserved; currently a no-op hook)
    pub fix_small_columns: bool,
    /// Collapse containers holding exactly one label into a single element
    pub remove_single_labels: bool,
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self {
            grid: false,
            fix_small_columns: false,
            remove_single_labels: true,
        }
    }
}

impl TransformConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Prefer CSS grid output over forced row containers
    pub fn with_grid(mut self, grid: bool) -> Self {
        self.grid = grid;
        self
    }

    /// Enable the reserved small-column merge hook
    pub fn with_fix_small_columns(mut self, fix: bool) -> Self {
        self.fix_small_columns = fix;
        self
    }

    /// Enable or disable single-label merging
    pub fn with_remove_single_labels(mut self, remove: bool) -> Self {
        self.remove_single_labels = remove;
        self
    }

    /// Whether row containers are synthesized
    pub(crate) fn has_rows(&self) -> bool {
        !self.grid
    }

    /// Load options from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Load options from a TOML string
    ///
    /// ```toml
    /// removeSingleLabels = true
    ///
    /// [css]
    /// grid = false
    /// fixSmallColumns = false
    /// ```
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let parsed: TomlConfig = toml::from_str(content)?;
        Ok(Self {
            grid: parsed.css.grid,
            fix_small_columns: parsed.css.fix_small_columns,
            remove_single_labels: parsed.remove_single_labels.unwrap_or(true),
        })
    }
}

#[derive(Debug, Default, Deserialize)]
struct TomlConfig {
    #[serde(default)]
    css: TomlCss,
    #[serde(default, rename = "removeSingleLabels")]
    remove_single_labels: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct TomlCss {
    grid: bool,
    fix_small_columns: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TransformConfig::default();
        assert!(!config.grid);
        assert!(!config.fix_small_columns);
        assert!(config.remove_single_labels);
        assert!(config.has_rows());
    }

    #[test]
    fn test_builder_pattern() {
        let config = TransformConfig::new()
            .with_grid(true)
            .with_remove_single_labels(false);
        assert!(config.grid);
        assert!(!config.has_rows());
        assert!(!config.remove_single_labels);
    }

    #[test]
    fn test_parse_toml() {
        let config = TransformConfig::from_toml_str(
            r#"
            removeSingleLabels = false

            [css]
            grid = true
            fixSmallColumns = true
            "#,
        )
        .expect("config should parse");
        assert!(config.grid);
        assert!(config.fix_small_columns);
        assert!(!config.remove_single_labels);
    }

    #[test]
    fn test_parse_empty_toml() {
        let config = TransformConfig::from_toml_str("").expect("empty config is valid");
        assert!(!config.grid);
        assert!(config.remove_single_labels);
    }

    #[test]
    fn test_invalid_toml_error() {
        assert!(TransformConfig::from_toml_str("css = {{{{").is_err());
    }
}
