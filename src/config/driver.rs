//! Driver configuration.
//!
//! Read once from the JSON file named by `D3D9_DXGI_CONFIG` when the host
//! creates its first factory. Without the variable every setting keeps its
//! default.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use lazy_static::lazy_static;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::error::{ShimError, ShimResult};

/// Environment variable holding the config file path.
pub const CONFIG_ENV_VAR: &str = "D3D9_DXGI_CONFIG";

const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DriverConfig {
    /// `error`, `warn`, `info`, `debug` or `trace`.
    pub log_level: String,

    /// Directory for daily log files. None = console only.
    pub log_directory: Option<PathBuf>,

    /// Replaces the adapter's PCI vendor id in identifier records.
    pub custom_vendor_id: Option<u32>,

    /// Replaces the adapter's PCI device id in identifier records.
    pub custom_device_id: Option<u32>,

    /// Replaces the adapter's name in identifier records.
    pub custom_device_desc: Option<String>,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            log_directory: None,
            custom_vendor_id: None,
            custom_device_id: None,
            custom_device_desc: None,
        }
    }
}

impl DriverConfig {
    /// Normalize settings. Blank strings count as unset.
    pub fn validate(&mut self) {
        self.log_level = self.log_level.trim().to_ascii_lowercase();
        if self.log_level.is_empty() {
            self.log_level = DEFAULT_LOG_LEVEL.to_string();
        }

        if self
            .log_directory
            .as_ref()
            .is_some_and(|dir| dir.as_os_str().is_empty())
        {
            self.log_directory = None;
        }

        if self
            .custom_device_desc
            .as_ref()
            .is_some_and(|desc| desc.trim().is_empty())
        {
            self.custom_device_desc = None;
        }
    }

    /// Reset all settings to defaults.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

lazy_static! {
    /// Global driver configuration.
    pub static ref DRIVER_CONFIG: RwLock<DriverConfig> = RwLock::new(DriverConfig::default());
}

/// Reads and validates a config file.
pub fn load_from_path(path: &Path) -> ShimResult<DriverConfig> {
    let text = fs::read_to_string(path)
        .map_err(|e| ShimError::Config(format!("{}: {}", path.display(), e)))?;

    let mut config: DriverConfig = serde_json::from_str(&text)?;
    config.validate();
    Ok(config)
}

/// Loads the config named by [`CONFIG_ENV_VAR`] into [`DRIVER_CONFIG`].
///
/// On error the global config is left untouched.
pub fn load() -> ShimResult<DriverConfig> {
    let config = match env::var_os(CONFIG_ENV_VAR) {
        Some(path) => load_from_path(Path::new(&path))?,
        None => DriverConfig::default(),
    };

    set_config(config.clone());
    Ok(config)
}

/// Snapshot of the current configuration.
pub fn current() -> DriverConfig {
    DRIVER_CONFIG.read().clone()
}

/// Replace the configuration (validated first).
pub fn set_config(config: DriverConfig) {
    let mut current = DRIVER_CONFIG.write();
    *current = config;
    current.validate();
    log::debug!("[CONFIG] Driver config updated: {:?}", *current);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_file(name: &str, contents: &str) -> PathBuf {
        let path = env::temp_dir().join(format!("d3d9-dxgi-{}-{}", std::process::id(), name));
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_defaults() {
        let config = DriverConfig::default();
        assert_eq!(config.log_level, "info");
        assert!(config.log_directory.is_none());
        assert!(config.custom_vendor_id.is_none());
    }

    #[test]
    fn test_validate_blank_strings() {
        let mut config = DriverConfig {
            log_level: "  ".to_string(),
            log_directory: Some(PathBuf::new()),
            custom_device_desc: Some(" ".to_string()),
            ..Default::default()
        };
        config.validate();

        assert_eq!(config, DriverConfig::default());
    }

    #[test]
    fn test_validate_lowercases_level() {
        let mut config = DriverConfig {
            log_level: "DEBUG".to_string(),
            ..Default::default()
        };
        config.validate();
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_load_from_path_camel_case() {
        let path = temp_file(
            "camel.json",
            r#"{ "logLevel": "Warn", "customVendorId": 4318, "customDeviceDesc": "Test GPU" }"#,
        );
        let config = load_from_path(&path).unwrap();
        let _ = fs::remove_file(&path);

        assert_eq!(config.log_level, "warn");
        assert_eq!(config.custom_vendor_id, Some(0x10DE));
        assert_eq!(config.custom_device_desc.as_deref(), Some("Test GPU"));
        assert!(config.custom_device_id.is_none());
    }

    #[test]
    fn test_load_from_path_errors() {
        let missing = env::temp_dir().join("d3d9-dxgi-does-not-exist.json");
        assert!(matches!(load_from_path(&missing), Err(ShimError::Config(_))));

        let path = temp_file("invalid.json", "{ not json");
        let result = load_from_path(&path);
        let _ = fs::remove_file(&path);
        assert!(matches!(result, Err(ShimError::Config(_))));
    }

    #[test]
    fn test_set_config_validates() {
        set_config(DriverConfig {
            log_level: "TRACE".to_string(),
            ..Default::default()
        });
        assert_eq!(current().log_level, "trace");
        DRIVER_CONFIG.write().reset();
    }
}
