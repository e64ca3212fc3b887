//! Driver configuration
//!
//! Read from `~/.config/nari/driver.toml` when present. Every field is
//! optional in the file; command-line flags override what it sets.

use std::path::{Path, PathBuf};
use std::time::Duration;

use nari_transport::protocol::control;
use nari_transport::Backend;
use serde::{Deserialize, Serialize};

/// Persistent driver settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriverConfig {
    /// `usb` (libusb control transfers) or `hid` (hidraw feature reports)
    pub backend: Backend,
    /// Control transfer timeout in milliseconds
    pub timeout_ms: u64,
    /// Default log filter when `RUST_LOG` is unset
    pub log_level: String,
    /// Preferred product id when several headsets are attached
    pub product_id: Option<u16>,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            backend: Backend::default(),
            timeout_ms: control::DEFAULT_TIMEOUT_MS,
            log_level: "info".to_string(),
            product_id: None,
        }
    }
}

impl DriverConfig {
    /// Get the default config file path
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("nari")
            .join("driver.toml")
    }

    /// Load config from a file, or return default if not found
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Ok(toml::from_str(&content)?)
        } else {
            Ok(Self::default())
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DriverConfig::default();
        assert_eq!(config.backend, Backend::Usb);
        assert_eq!(config.timeout(), Duration::from_millis(5000));
        assert_eq!(config.product_id, None);
    }

    #[test]
    fn test_partial_file() {
        let config: DriverConfig = toml::from_str("backend = \"hid\"\nproduct_id = 0x051C\n").unwrap();
        assert_eq!(config.backend, Backend::Hid);
        assert_eq!(config.product_id, Some(0x051C));
        assert_eq!(config.timeout_ms, 5000);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_unknown_backend_rejected() {
        assert!(toml::from_str::<DriverConfig>("backend = \"bluetooth\"").is_err());
    }

    #[test]
    fn test_roundtrip() {
        let config = DriverConfig {
            timeout_ms: 1000,
            ..Default::default()
        };
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("backend = \"usb\""));
        let parsed: DriverConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let path = std::env::temp_dir().join("nari-driver-missing").join("driver.toml");
        assert_eq!(DriverConfig::load(&path).unwrap(), DriverConfig::default());
    }

    #[test]
    fn test_default_path() {
        assert!(DriverConfig::default_path().ends_with("nari/driver.toml"));
    }
}
