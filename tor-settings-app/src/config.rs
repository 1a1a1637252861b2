//! Application configuration

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tor_settings_core::error::{CoreError, CoreResult};

/// Default location of the preference document, relative to the working directory
pub const DEFAULT_PREFERENCES_PATH: &str = "tor-settings.json";

/// Transports bundled with the browser when the config does not list any
pub const DEFAULT_BUILTIN_BRIDGE_TYPES: &[&str] = &["obfs4", "meek-azure", "snowflake"];

const DEFAULT_BRIDGE_REQUEST_TIMEOUT_SECS: u64 = 60;

/// Application configuration
///
/// Every field has a default, so a partial or missing file is fine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppConfig {
    /// File backing `FilePreferenceStore`
    pub preferences_path: PathBuf,
    /// Catalog for the builtin bridge list
    pub builtin_bridge_types: Vec<String>,
    /// Whether this host launched the Tor daemon (otherwise the pane is hidden)
    pub owns_tor_daemon: bool,
    /// Upper bound on one bridge request round trip
    pub bridge_request_timeout_secs: u64,
    /// Log file written by the Tor daemon, shown by "View Tor logs"
    pub tor_log_path: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            preferences_path: PathBuf::from(DEFAULT_PREFERENCES_PATH),
            builtin_bridge_types: DEFAULT_BUILTIN_BRIDGE_TYPES
                .iter()
                .map(ToString::to_string)
                .collect(),
            owns_tor_daemon: true,
            bridge_request_timeout_secs: DEFAULT_BRIDGE_REQUEST_TIMEOUT_SECS,
            tor_log_path: None,
        }
    }
}

impl AppConfig {
    /// Load configuration from `path`, falling back to defaults when the file does not exist.
    pub fn load(path: &Path) -> CoreResult<Self> {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No config at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(e) => return Err(CoreError::StorageError(e.to_string())),
        };

        let value: serde_json::Value = serde_json::from_str(&json)
            .map_err(|e| CoreError::SerializationError(e.to_string()))?;
        if !value.is_object() {
            return Err(CoreError::SerializationError(format!(
                "config at {} must be a JSON object",
                path.display()
            )));
        }
        let config: Self = serde_json::from_value(value)
            .map_err(|e| CoreError::SerializationError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to `path`
    pub fn save(&self, path: &Path) -> CoreResult<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| CoreError::SerializationError(e.to_string()))?;
        std::fs::write(path, json).map_err(|e| CoreError::StorageError(e.to_string()))
    }

    fn validate(&self) -> CoreResult<()> {
        if self.builtin_bridge_types.is_empty() {
            return Err(CoreError::ValidationError(
                "builtinBridgeTypes cannot be empty".to_string(),
            ));
        }
        if self.builtin_bridge_types.iter().any(|t| t.trim().is_empty()) {
            return Err(CoreError::ValidationError(
                "builtinBridgeTypes cannot contain empty entries".to_string(),
            ));
        }
        if self.bridge_request_timeout_secs == 0 {
            return Err(CoreError::ValidationError(
                "bridgeRequestTimeoutSecs must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    #[must_use]
    pub fn bridge_request_timeout(&self) -> Duration {
        Duration::from_secs(self.bridge_request_timeout_secs)
    }
}
