//! File-based discovery of the base bundler configuration.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::config::BundlerConfig;
use crate::error::{ConfigError, Result};

pub const JSON_CONFIG: &str = "devpack.config.json";
pub const TOML_CONFIG: &str = "devpack.toml";
const PACKAGE_FIELD: &str = "devpack";

/// Finds and loads the base configuration for a project root.
///
/// # Example
///
/// ```no_run
/// use devpack_config::ConfigDiscovery;
///
/// let base = ConfigDiscovery::new(".").load().unwrap();
/// ```
pub struct ConfigDiscovery {
    root: PathBuf,
}

impl ConfigDiscovery {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Find a config file in the root directory
    ///
    /// Searches in this order:
    /// 1. devpack.config.json
    /// 2. devpack.toml
    /// 3. package.json (devpack field)
    pub fn find(&self) -> Option<PathBuf> {
        for name in [JSON_CONFIG, TOML_CONFIG] {
            let path = self.root.join(name);
            if path.exists() {
                return Some(path);
            }
        }

        let pkg_path = self.root.join("package.json");
        let content = fs::read_to_string(&pkg_path).ok()?;
        let parsed: Value = serde_json::from_str(&content).ok()?;
        match parsed.get(PACKAGE_FIELD) {
            Some(field) if !field.is_null() => Some(pkg_path),
            _ => None,
        }
    }

    /// Load the discovered base config.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` if no config file is found.
    pub fn load(&self) -> Result<BundlerConfig> {
        let path = self
            .find()
            .ok_or_else(|| ConfigError::NotFound(self.root.clone()))?;
        Self::load_from(&path)
    }

    /// Load a base config from an explicit path.
    pub fn load_from(path: &Path) -> Result<BundlerConfig> {
        tracing::debug!(path = %path.display(), "loading base config");

        let file_name = path.file_name().and_then(|n| n.to_str()).unwrap_or_default();
        if file_name == "package.json" {
            return Self::load_from_package_json(path);
        }

        let content = fs::read_to_string(path)?;
        let value = match path.extension().and_then(|e| e.to_str()) {
            Some("json") => serde_json::from_str(&content).map_err(|e| ConfigError::InvalidValue {
                field: "json".to_string(),
                hint: Some(format!("Invalid JSON syntax: {}", e)),
            })?,
            Some("toml") => {
                let toml_val: toml::Value =
                    toml::from_str(&content).map_err(|e| ConfigError::InvalidValue {
                        field: "toml".to_string(),
                        hint: Some(format!("Invalid TOML syntax: {}", e)),
                    })?;
                serde_json::to_value(toml_val).map_err(|e| ConfigError::InvalidValue {
                    field: "toml".to_string(),
                    hint: Some(format!("TOML to JSON conversion failed: {}", e)),
                })?
            }
            other => {
                return Err(ConfigError::UnsupportedFormat(
                    other.unwrap_or(file_name).to_string(),
                ))
            }
        };

        BundlerConfig::from_value(value)
    }

    fn load_from_package_json(path: &Path) -> Result<BundlerConfig> {
        let content = fs::read_to_string(path)?;

        let mut parsed: Value =
            serde_json::from_str(&content).map_err(|e| ConfigError::InvalidValue {
                field: "package.json".to_string(),
                hint: Some(format!("Invalid JSON: {}", e)),
            })?;

        match parsed.get_mut(PACKAGE_FIELD).map(Value::take) {
            Some(Value::Null) | None => Err(ConfigError::InvalidValue {
                field: PACKAGE_FIELD.to_string(),
                hint: Some("Add a 'devpack' field to your package.json".to_string()),
            }),
            Some(value) => BundlerConfig::from_value(value),
        }
    }
}
