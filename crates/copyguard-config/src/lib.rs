use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Runtime configuration for copyguard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub scan: ScanConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Partition decision memory per document.
    #[serde(default = "default_namespaced")]
    pub namespaced: bool,

    /// Override for the decision-store directory; defaults to the
    /// platform data dir.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Delay between announcing a scan and starting it.
    #[serde(default = "default_scan_start_delay_ms")]
    pub scan_start_delay_ms: u64,

    /// Per-unit delay while the viewport follows a tracked full scan.
    #[serde(default = "default_track_delay_ms")]
    pub track_delay_ms: u64,

    /// Initial viewport-tracking state for a session.
    #[serde(default = "default_tracking")]
    pub tracking: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage: StorageConfig::default(),
            scan: ScanConfig::default(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            namespaced: default_namespaced(),
            dir: None,
        }
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            scan_start_delay_ms: default_scan_start_delay_ms(),
            track_delay_ms: default_track_delay_ms(),
            tracking: default_tracking(),
        }
    }
}

fn default_namespaced() -> bool {
    true
}

fn default_scan_start_delay_ms() -> u64 {
    100
}

fn default_track_delay_ms() -> u64 {
    1000
}

fn default_tracking() -> bool {
    true
}

impl Config {
    /// Load config from the default location or create a default file if
    /// not found
    pub fn load() -> anyhow::Result<Self> {
        let path = Self::config_path();

        if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            let config = Config::default();
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let content = toml::to_string_pretty(&config)?;
            std::fs::write(&path, content)?;
            Ok(config)
        }
    }

    /// Get config file path
    pub fn config_path() -> PathBuf {
        if let Some(dirs) = directories::ProjectDirs::from("com", "copyguard", "copyguard") {
            dirs.config_dir().join("config.toml")
        } else {
            PathBuf::from("~/.copyguard/config.toml")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.storage.namespaced);
        assert_eq!(config.scan.scan_start_delay_ms, 100);
        assert_eq!(config.scan.track_delay_ms, 1000);
        assert!(config.scan.tracking);
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml_str = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.scan.track_delay_ms, config.scan.track_delay_ms);
        assert_eq!(parsed.storage.namespaced, config.storage.namespaced);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let parsed: Config = toml::from_str("[scan]\ntracking = false\n").unwrap();
        assert!(!parsed.scan.tracking);
        assert_eq!(parsed.scan.scan_start_delay_ms, 100);
        assert!(parsed.storage.namespaced);
    }
}
