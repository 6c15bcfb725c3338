use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration loaded from a YAML file.
///
/// Every field has a default so a partial file is valid; `--config`
/// values take precedence over the CLI defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Directory for snapshots and run records
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Port for the web API server
    #[serde(default = "default_port")]
    pub port: u16,

    /// Threshold recorded on runs when the caller supplies none
    #[serde(default)]
    pub default_threshold: Option<f64>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            port: default_port(),
            default_threshold: None,
        }
    }
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./bench-data")
}

fn default_port() -> u16 {
    8080
}

impl AppConfig {
    /// Load configuration from a YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .context(format!("Failed to read config file: {:?}", path.as_ref()))?;

        let config: AppConfig =
            serde_yaml::from_str(&content).context("Failed to parse config file")?;

        Ok(config)
    }

    /// Save configuration to a YAML file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_yaml::to_string(self).context("Failed to serialize config")?;
        std::fs::write(path.as_ref(), content)
            .context(format!("Failed to write config file: {:?}", path.as_ref()))?;
        Ok(())
    }

    /// Generate a sample configuration
    pub fn sample() -> Self {
        Self {
            data_dir: default_data_dir(),
            port: default_port(),
            default_threshold: Some(0.8),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_config_round_trips() {
        let config = AppConfig::sample();
        let yaml = serde_yaml::to_string(&config).unwrap();
        let parsed: AppConfig = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed.port, config.port);
        assert_eq!(parsed.default_threshold, Some(0.8));
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let parsed: AppConfig = serde_yaml::from_str("port: 9000\n").unwrap();
        assert_eq!(parsed.port, 9000);
        assert_eq!(parsed.data_dir, default_data_dir());
        assert_eq!(parsed.default_threshold, None);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bench-sim.yaml");
        AppConfig::sample().save(&path).unwrap();
        let loaded = AppConfig::load(&path).unwrap();
        assert_eq!(loaded.default_threshold, Some(0.8));
    }
}
