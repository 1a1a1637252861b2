//! JSON file backed preference store.
//!
//! Holds the three network settings in one in-memory document. Writes update
//! the document immediately; the file on disk is only rewritten when the host
//! calls `flush_settings` (the pane losing focus), mirroring how the Tor
//! daemon's own settings are flushed.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{PoisonError, RwLock};

use serde::de::DeserializeOwned;
use serde::Serialize;

use tor_settings_core::error::{CoreError, CoreResult};
use tor_settings_core::traits::{
    BridgeSettingsStore, FirewallSettingsStore, ProtocolService, ProxySettingsStore,
};
use tor_settings_core::types::{BridgeConfiguration, FirewallConfiguration, ProxyConfiguration};

use crate::config::AppConfig;

/// On-disk format. Loaded domain by domain, see `load_domain`
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
struct PreferenceDocument {
    bridges: BridgeConfiguration,
    proxy: ProxyConfiguration,
    firewall: FirewallConfiguration,
}

/// File-backed store for all three network settings domains.
pub struct FilePreferenceStore {
    path: PathBuf,
    builtin_bridge_types: Vec<String>,
    owns_tor_daemon: bool,
    tor_log_path: Option<PathBuf>,
    document: RwLock<PreferenceDocument>,
    dirty: AtomicBool,
}

impl FilePreferenceStore {
    /// Open the store at `path`.
    ///
    /// Never fails: a missing file starts empty, an unreadable or corrupt one
    /// is reported and replaced by defaults on the next flush.
    pub fn open(path: impl Into<PathBuf>, builtin_bridge_types: Vec<String>) -> Self {
        let path = path.into();
        let document = Self::load_document(&path);
        Self {
            path,
            builtin_bridge_types,
            owns_tor_daemon: true,
            tor_log_path: None,
            document: RwLock::new(document),
            dirty: AtomicBool::new(false),
        }
    }

    /// Open the store described by `config`
    pub fn from_config(config: &AppConfig) -> Self {
        let mut store = Self::open(
            config.preferences_path.clone(),
            config.builtin_bridge_types.clone(),
        );
        store.owns_tor_daemon = config.owns_tor_daemon;
        store.tor_log_path.clone_from(&config.tor_log_path);
        store
    }

    /// Serve `tor_logs` from the daemon log file at `path`
    #[must_use]
    pub fn with_tor_log_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.tor_log_path = Some(path.into());
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether there are writes not yet flushed to disk
    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::SeqCst)
    }

    fn load_document(path: &Path) -> PreferenceDocument {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("No preferences at {}, starting empty", path.display());
                return PreferenceDocument::default();
            }
            Err(e) => {
                log::warn!(
                    "Failed to read preferences at {}: {e}, using defaults",
                    path.display()
                );
                return PreferenceDocument::default();
            }
        };

        let value: serde_json::Value = match serde_json::from_str(&json) {
            Ok(value) => value,
            Err(e) => {
                log::warn!(
                    "Corrupt preferences at {}: {e}, using defaults",
                    path.display()
                );
                return PreferenceDocument::default();
            }
        };
        let Some(object) = value.as_object() else {
            log::warn!(
                "Preferences at {} are not a JSON object, using defaults",
                path.display()
            );
            return PreferenceDocument::default();
        };

        // Each domain falls back on its own so one bad entry cannot wipe the others
        PreferenceDocument {
            bridges: Self::load_domain(object, "bridges"),
            proxy: Self::load_domain(object, "proxy"),
            firewall: Self::load_domain(object, "firewall"),
        }
    }

    fn load_domain<T>(object: &serde_json::Map<String, serde_json::Value>, key: &str) -> T
    where
        T: DeserializeOwned + Default,
    {
        let Some(value) = object.get(key) else {
            return T::default();
        };
        serde_json::from_value(value.clone()).unwrap_or_else(|e| {
            log::warn!("Invalid {key} preferences: {e}, using defaults");
            T::default()
        })
    }

    fn read_with<T>(&self, f: impl FnOnce(&PreferenceDocument) -> T) -> T {
        let document = self.document.read().unwrap_or_else(PoisonError::into_inner);
        f(&document)
    }

    fn update(&self, f: impl FnOnce(&mut PreferenceDocument)) {
        let mut document = self
            .document
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        f(&mut document);
        self.dirty.store(true, Ordering::SeqCst);
    }

    /// Serialize the document and atomically replace the file (temp file + rename).
    fn write_to_disk(&self) -> CoreResult<()> {
        let json = self
            .read_with(|d| serde_json::to_string_pretty(d))
            .map_err(|e| CoreError::SerializationError(e.to_string()))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| CoreError::StorageError(e.to_string()))?;
        }

        let mut tmp_name = self.path.as_os_str().to_owned();
        tmp_name.push(".tmp");
        let tmp_path = PathBuf::from(tmp_name);

        std::fs::write(&tmp_path, json).map_err(|e| CoreError::StorageError(e.to_string()))?;
        std::fs::rename(&tmp_path, &self.path).map_err(|e| {
            let _ = std::fs::remove_file(&tmp_path);
            CoreError::StorageError(e.to_string())
        })
    }
}

impl BridgeSettingsStore for FilePreferenceStore {
    fn read(&self) -> BridgeConfiguration {
        self.read_with(|d| d.bridges.clone())
    }

    fn write(&self, config: &BridgeConfiguration) -> CoreResult<()> {
        self.update(|d| d.bridges = config.clone());
        Ok(())
    }

    fn default_bridge_types(&self) -> Vec<String> {
        self.builtin_bridge_types.clone()
    }
}

impl ProxySettingsStore for FilePreferenceStore {
    fn read(&self) -> ProxyConfiguration {
        self.read_with(|d| d.proxy.clone())
    }

    fn write(&self, config: &ProxyConfiguration) -> CoreResult<()> {
        self.update(|d| d.proxy = config.clone());
        Ok(())
    }
}

impl FirewallSettingsStore for FilePreferenceStore {
    fn read(&self) -> FirewallConfiguration {
        self.read_with(|d| d.firewall.clone())
    }

    fn write(&self, config: &FirewallConfiguration) -> CoreResult<()> {
        self.update(|d| d.firewall = config.clone());
        Ok(())
    }
}

impl ProtocolService for FilePreferenceStore {
    fn owns_tor_daemon(&self) -> bool {
        self.owns_tor_daemon
    }

    fn flush_settings(&self) -> CoreResult<()> {
        if !self.dirty.swap(false, Ordering::SeqCst) {
            return Ok(());
        }
        if let Err(e) = self.write_to_disk() {
            self.dirty.store(true, Ordering::SeqCst);
            return Err(e);
        }
        log::info!("Tor settings flushed to {}", self.path.display());
        Ok(())
    }

    fn tor_logs(&self) -> CoreResult<String> {
        let Some(path) = &self.tor_log_path else {
            return Ok(String::new());
        };
        match std::fs::read_to_string(path) {
            Ok(logs) => Ok(logs),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(String::new()),
            Err(e) => Err(CoreError::StorageError(e.to_string())),
        }
    }
}
