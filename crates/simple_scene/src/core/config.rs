//! # Unified Configuration System
//!
//! Configuration for asset archives and application-level settings such as
//! the default log level. Every type here is serializable to TOML and RON
//! through the [`Config`] trait.

use serde::{Serialize, Deserialize};

pub use crate::config::{Config, ConfigError};

/// # Asset Configuration
///
/// Archive roots are registered with the resolver in the order listed here,
/// so earlier roots shadow later ones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetConfig {
    /// Filesystem directories to mount as archives, highest priority first
    pub archive_roots: Vec<String>,
}

impl AssetConfig {
    /// Create a new asset configuration with the default `assets` root
    pub fn new() -> Self {
        Self {
            archive_roots: vec!["assets".to_string()],
        }
    }

    /// Replace the archive roots
    pub fn with_archive_roots<I, S>(mut self, roots: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.archive_roots = roots.into_iter().map(Into::into).collect();
        self
    }

    /// Append an archive root with the lowest priority so far
    pub fn with_archive_root(mut self, root: impl Into<String>) -> Self {
        self.archive_roots.push(root.into());
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.archive_roots.is_empty() {
            return Err("At least one archive root must be configured".to_string());
        }
        if let Some(root) = self.archive_roots.iter().find(|root| root.trim().is_empty()) {
            return Err(format!("Archive root cannot be blank: {root:?}"));
        }
        Ok(())
    }
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// # Complete Application Configuration
///
/// Top-level configuration loaded by binaries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApplicationConfig {
    /// Log level used when `RUST_LOG` is not set
    pub log_level: String,
    /// Asset system configuration
    pub assets: AssetConfig,
}

impl ApplicationConfig {
    /// Create a new application configuration with defaults
    pub fn new() -> Self {
        Self {
            log_level: "info".to_string(),
            assets: AssetConfig::default(),
        }
    }

    /// Set log level
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Set asset configuration
    pub fn with_assets(mut self, assets: AssetConfig) -> Self {
        self.assets = assets;
        self
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), String> {
        const LEVELS: [&str; 6] = ["off", "error", "warn", "info", "debug", "trace"];
        if !LEVELS.contains(&self.log_level.to_ascii_lowercase().as_str()) {
            return Err(format!("Unknown log level: {}", self.log_level));
        }
        self.assets.validate()
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl Config for ApplicationConfig {}
impl Config for AssetConfig {}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_dir(name: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join(format!("simple_scene_config_test_{name}"));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = ApplicationConfig::default();
        assert_eq!(config.log_level, "info");
        assert_eq!(config.assets.archive_roots, vec!["assets".to_string()]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_roots() {
        let config = AssetConfig::new().with_archive_roots(Vec::<String>::new());
        assert!(config.validate().is_err());

        let config = AssetConfig::new().with_archive_root("  ");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_unknown_log_level() {
        let config = ApplicationConfig::new().with_log_level("loud");
        assert!(config.validate().is_err());

        let config = ApplicationConfig::new().with_log_level("DEBUG");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_toml() {
        let config = ApplicationConfig::from_toml_str(
            r#"
log_level = "debug"

[assets]
archive_roots = ["mods/override", "assets"]
"#,
        )
        .unwrap();

        assert_eq!(config.log_level, "debug");
        assert_eq!(config.assets.archive_roots, vec!["mods/override", "assets"]);
    }

    #[test]
    fn test_parse_ron_with_missing_fields_uses_defaults() {
        let config = ApplicationConfig::from_ron_str(r#"(log_level: "warn")"#).unwrap();
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.assets, AssetConfig::default());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = temp_dir("round_trip");
        let config = ApplicationConfig::new()
            .with_log_level("trace")
            .with_assets(AssetConfig::new().with_archive_roots(["a", "b"]));

        for file in ["app.toml", "app.ron"] {
            let path = dir.join(file);
            config.save_to_file(&path).unwrap();
            let loaded = ApplicationConfig::load_from_file(&path).unwrap();
            assert_eq!(loaded, config, "round trip through {file}");
        }

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_unsupported_extension() {
        let result = ApplicationConfig::default().save_to_file("config.json");
        assert!(matches!(result, Err(ConfigError::UnsupportedFormat(_))));
    }
}
