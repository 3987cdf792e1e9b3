//! Engine configuration
//!
//! Read from `~/.p2p/config.toml`, or `~/.p2p/config.<profile>.toml` when a
//! profile is given. A missing file yields the defaults.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("cannot serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("cannot find home directory")]
    NoHomeDir,
}

/// Values every new ad is created with
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdDefaults {
    pub account_currency: String,
    pub payment_currency: String,
    pub exchange_rate_type: String,
    pub is_active: bool,
    /// Minutes
    pub order_expiry_period: u32,
}

impl Default for AdDefaults {
    fn default() -> Self {
        Self {
            account_currency: "USD".to_string(),
            payment_currency: "IDR".to_string(),
            exchange_rate_type: "fixed".to_string(),
            is_active: true,
            order_expiry_period: 15,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormsConfig {
    /// `tracing` filter used when `RUST_LOG` is unset
    pub log_level: String,
    pub ads: AdDefaults,
}

impl Default for FormsConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            ads: AdDefaults::default(),
        }
    }
}

impl FormsConfig {
    pub fn load(profile: Option<&str>) -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path(profile)?)
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let io_err = |source: std::io::Error| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content).map_err(io_err)
    }

    pub fn config_path(profile: Option<&str>) -> Result<PathBuf, ConfigError> {
        let home = dirs::home_dir().ok_or(ConfigError::NoHomeDir)?;
        let filename = match profile {
            Some(p) => format!("config.{}.toml", p),
            None => "config.toml".to_string(),
        };
        Ok(home.join(".p2p").join(filename))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("p2p-forms-{}", uuid::Uuid::new_v4()))
            .join(name)
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let config = FormsConfig::load_from(&scratch_path("absent.toml")).unwrap();
        assert_eq!(config, FormsConfig::default());
        assert_eq!(config.ads.order_expiry_period, 15);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let config: FormsConfig = toml::from_str(
            r#"
            log_level = "debug"

            [ads]
            payment_currency = "MYR"
            "#,
        )
        .unwrap();
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.ads.payment_currency, "MYR");
        assert_eq!(config.ads.account_currency, "USD");
    }

    #[test]
    fn test_save_and_reload() {
        let path = scratch_path("config.toml");
        let mut config = FormsConfig::default();
        config.ads.order_expiry_period = 30;
        config.save_to(&path).unwrap();

        assert_eq!(FormsConfig::load_from(&path).unwrap(), config);
        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_invalid_toml() {
        let path = scratch_path("broken.toml");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "log_level = [").unwrap();
        assert!(matches!(FormsConfig::load_from(&path), Err(ConfigError::Parse { .. })));
        let _ = fs::remove_dir_all(path.parent().unwrap());
    }
}
