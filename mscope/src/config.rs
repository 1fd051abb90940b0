//! Configuration module for the mscope CLI.
//!
//! Settings are read from `mscope.toml`. Every field has a default, so an
//! empty file (or no file at all) is a valid configuration.

use dirs::{config_dir, home_dir};
use memscope_view::InspectorConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{MscopeError, Result};

/// Default configuration file name.
pub const CONFIG_FILE_NAME: &str = "mscope.toml";

/// Application configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// Selection policy and row rendering.
    #[serde(default)]
    pub inspector: InspectorConfig,

    /// How numbers are printed.
    #[serde(default)]
    pub output: OutputConfig,
}

/// Output formatting options.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct OutputConfig {
    #[serde(default)]
    pub size_unit: SizeUnit,
}

/// Unit for shallow and retained sizes.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SizeUnit {
    #[default]
    Bytes,
    Kib,
}

impl SizeUnit {
    pub fn format(self, bytes: u64) -> String {
        match self {
            SizeUnit::Bytes => bytes.to_string(),
            SizeUnit::Kib => format!("{:.1} KiB", bytes as f64 / 1024.0),
        }
    }
}

impl Config {
    /// Load configuration from the default location.
    ///
    /// Searches for configuration in the following order:
    /// 1. Current directory
    /// 2. `~/.config/mscope/`
    /// 3. System configuration directory
    ///
    /// Returns the default configuration if no config file is found.
    pub fn load() -> Result<Self> {
        match Self::find_config_file() {
            Some(path) => Self::load_from_path(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load configuration from a specific path.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(MscopeError::Config(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| MscopeError::Config(format!("Failed to parse configuration: {}", e)))?;

        tracing::debug!("loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Save configuration to a specific path.
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self).map_err(|e| {
            MscopeError::Config(format!("Failed to serialize configuration: {}", e))
        })?;

        std::fs::write(path, content)?;
        Ok(())
    }

    fn check_current_dir_config() -> Option<PathBuf> {
        let path = PathBuf::from(CONFIG_FILE_NAME);
        path.exists().then_some(path)
    }

    fn check_home_config() -> Option<PathBuf> {
        home_dir()
            .map(|dir| dir.join(".config").join("mscope").join(CONFIG_FILE_NAME))
            .filter(|path| path.exists())
    }

    fn check_system_config() -> Option<PathBuf> {
        config_dir()
            .map(|dir| dir.join("mscope").join(CONFIG_FILE_NAME))
            .filter(|path| path.exists())
    }

    fn find_config_file() -> Option<PathBuf> {
        Self::check_current_dir_config()
            .or_else(Self::check_home_config)
            .or_else(Self::check_system_config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use memscope_view::InvalidSelectionPolicy;
    use tempfile::TempDir;

    fn create_test_config() -> Config {
        Config {
            inspector: InspectorConfig {
                invalid_selection: InvalidSelectionPolicy::Clamp,
                show_to_string: false,
            },
            output: OutputConfig {
                size_unit: SizeUnit::Kib,
            },
        }
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.inspector.show_to_string);
        assert_eq!(config.output.size_unit, SizeUnit::Bytes);
    }

    #[test]
    fn test_config_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("nested").join("mscope.toml");

        let original_config = create_test_config();
        original_config.save_to_path(&config_path).unwrap();

        let loaded_config = Config::load_from_path(&config_path).unwrap();
        assert_eq!(original_config, loaded_config);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("mscope.toml");
        std::fs::write(&config_path, "[inspector]\ninvalid_selection = \"clamp\"\n").unwrap();

        let config = Config::load_from_path(&config_path).unwrap();
        assert_eq!(config.inspector.invalid_selection, InvalidSelectionPolicy::Clamp);
        assert!(config.inspector.show_to_string);
        assert_eq!(config.output, OutputConfig::default());
    }

    #[test]
    fn test_malformed_file_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("mscope.toml");
        std::fs::write(&config_path, "[output]\nsize_unit = \"parsecs\"\n").unwrap();
        assert!(matches!(
            Config::load_from_path(&config_path),
            Err(MscopeError::Config(_))
        ));
    }

    #[test]
    fn test_load_from_nonexistent_path() {
        let result = Config::load_from_path(Path::new("/nonexistent/path/mscope.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn test_size_units() {
        assert_eq!(SizeUnit::Bytes.format(2048), "2048");
        assert_eq!(SizeUnit::Kib.format(1536), "1.5 KiB");
    }
}
