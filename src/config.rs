//! Configuration system using TOML files.
//!
//! Config is stored in the OS-standard config directory:
//! - Windows: %APPDATA%\track-shelf\config.toml
//! - macOS: ~/Library/Application Support/track-shelf/config.toml
//! - Linux: ~/.config/track-shelf/config.toml
//!
//! The config file is human-readable and editable. Missing sections and
//! keys fall back to defaults.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Library file settings
    pub library: LibraryConfig,

    /// Catalog search settings
    pub catalog: CatalogConfig,

    /// Query view settings
    pub query: QueryConfig,

    /// Demo track generation
    pub generator: GeneratorConfig,
}

/// Library file settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LibraryConfig {
    /// Library JSON file (None = data directory default)
    pub file: Option<PathBuf>,
}

impl LibraryConfig {
    /// Configured library file, or the default location.
    pub fn resolved_file(&self) -> PathBuf {
        self.file.clone().unwrap_or_else(default_library_path)
    }
}

/// Catalog search settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Search API root, without the `/search` path
    pub base_url: String,

    /// Maximum results per search
    pub result_limit: u32,

    /// Request ceiling in seconds
    pub timeout_secs: u64,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: "https://itunes.apple.com".to_string(),
            result_limit: 25,
            timeout_secs: 15,
        }
    }
}

/// Query view settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryConfig {
    /// Tracks strictly shorter than this count as short
    pub short_threshold_minutes: f64,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            short_threshold_minutes: 3.0,
        }
    }
}

/// Demo track generation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Number of tracks `generate` creates
    pub count: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            count: crate::library::generator::DEFAULT_COUNT,
        }
    }
}

// ============================================================================
// Config File Operations
// ============================================================================

/// Get the config directory path
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("track-shelf"))
}

/// Get the full path to the config file
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Default library file in the user data directory.
pub fn default_library_path() -> PathBuf {
    dirs::data_dir()
        .map(|d| d.join("track-shelf"))
        .unwrap_or_else(|| PathBuf::from("."))
        .join("library.json")
}

/// Load configuration from disk
///
/// Returns default config if file doesn't exist or can't be parsed.
/// Logs warnings but doesn't fail - we always return a usable config.
pub fn load() -> Config {
    let Some(path) = config_path() else {
        tracing::warn!("Could not determine config directory, using defaults");
        return Config::default();
    };
    load_from(&path)
}

/// Load configuration from a specific file, with the same fallbacks as [`load`].
pub fn load_from(path: &std::path::Path) -> Config {
    if !path.exists() {
        tracing::debug!("No config file found at {:?}, using defaults", path);
        return Config::default();
    }

    match std::fs::read_to_string(path) {
        Ok(contents) => match toml::from_str(&contents) {
            Ok(config) => {
                tracing::info!("Loaded config from {:?}", path);
                config
            }
            Err(e) => {
                tracing::error!("Failed to parse config file {:?}: {}", path, e);
                tracing::warn!("Using default configuration");
                Config::default()
            }
        },
        Err(e) => {
            tracing::error!("Failed to read config file {:?}: {}", path, e);
            Config::default()
        }
    }
}

/// Save configuration to disk
///
/// Creates the config directory if it doesn't exist.
pub fn save(config: &Config) -> Result<PathBuf, ConfigError> {
    let dir = config_dir().ok_or(ConfigError::NoConfigDir)?;
    save_to(config, &dir.join("config.toml"))?;
    Ok(dir.join("config.toml"))
}

/// Save configuration to a specific file.
pub fn save_to(config: &Config, path: &std::path::Path) -> Result<(), ConfigError> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(|e| ConfigError::CreateDir(dir.to_path_buf(), e))?;
    }

    // Serialize to pretty TOML
    let contents = toml::to_string_pretty(config).map_err(ConfigError::Serialize)?;

    // Write atomically (write to temp, then rename)
    let temp_path = path.with_extension("toml.tmp");
    std::fs::write(&temp_path, &contents).map_err(|e| ConfigError::Write(temp_path.clone(), e))?;
    std::fs::rename(&temp_path, path)
        .map_err(|e| ConfigError::Rename(temp_path, path.to_path_buf(), e))?;

    tracing::info!("Saved config to {:?}", path);
    Ok(())
}

// ============================================================================
// Error Types
// ============================================================================

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to create config directory {0}: {1}")]
    CreateDir(PathBuf, std::io::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(toml::ser::Error),

    #[error("Failed to write config to {0}: {1}")]
    Write(PathBuf, std::io::Error),

    #[error("Failed to rename temp file {0} to {1}: {2}")]
    Rename(PathBuf, PathBuf, std::io::Error),
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_serializes() {
        let config = Config::default();
        let toml = toml::to_string_pretty(&config).unwrap();
        assert!(toml.contains("[catalog]"));
        assert!(toml.contains("[query]"));
        assert!(toml.contains("[generator]"));
    }

    #[test]
    fn test_catalog_defaults() {
        let catalog = CatalogConfig::default();
        assert_eq!(catalog.result_limit, 25);
        assert_eq!(catalog.timeout_secs, 15);
        assert!(catalog.base_url.starts_with("https://"));
    }

    #[test]
    fn test_config_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.library.file = Some(PathBuf::from("/music/library.json"));
        config.catalog.result_limit = 10;
        config.query.short_threshold_minutes = 2.5;

        save_to(&config, &path).unwrap();
        let parsed = load_from(&path);

        assert_eq!(parsed.library.file, Some(PathBuf::from("/music/library.json")));
        assert_eq!(parsed.catalog.result_limit, 10);
        assert_eq!(parsed.query.short_threshold_minutes, 2.5);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        // Config with only some fields
        let toml = r#"
[catalog]
timeout_secs = 5
"#;
        let config: Config = toml::from_str(toml).unwrap();

        // Specified field is set
        assert_eq!(config.catalog.timeout_secs, 5);

        // Other fields use defaults
        assert_eq!(config.catalog.result_limit, 25);
        assert_eq!(config.query.short_threshold_minutes, 3.0);
        assert_eq!(config.generator.count, 50);
        assert!(config.library.file.is_none());
    }

    #[test]
    fn test_unparseable_config_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "catalog = [[[").unwrap();
        assert_eq!(load_from(&path).catalog.result_limit, 25);
    }

    #[test]
    fn test_resolved_library_file() {
        let explicit = LibraryConfig {
            file: Some(PathBuf::from("/tmp/lib.json")),
        };
        assert_eq!(explicit.resolved_file(), PathBuf::from("/tmp/lib.json"));
        assert!(LibraryConfig::default().resolved_file().ends_with("library.json"));
    }
}
