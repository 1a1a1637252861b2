//! Host-agnostic bootstrap for the Tor network settings pane.
//!
//! Provides `AppState` (controller plus collaborators), `AppStateBuilder`
//! (adapter injection) and a file-backed preference store for hosts that do
//! not bring their own.

pub mod adapters;
pub mod config;

use std::sync::Arc;
use std::time::Duration;

use tor_settings_core::error::{CoreError, CoreResult};
use tor_settings_core::services::{NetworkSettingsService, ServiceContext};
use tor_settings_core::traits::{
    BridgeProvider, BridgeSettingsStore, FirewallSettingsStore, ProtocolService,
    ProxySettingsStore,
};
use tor_settings_core::types::{BridgeConfiguration, PaneEnablement};

use crate::adapters::FilePreferenceStore;
use crate::config::AppConfig;

const DEFAULT_BRIDGE_REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Application state behind one settings pane.
///
/// Every host constructs this once via `AppStateBuilder`.
pub struct AppState {
    /// Service context (holds all storage adapters)
    pub ctx: Arc<ServiceContext>,
    settings: NetworkSettingsService,
    bridge_provider: Option<Arc<dyn BridgeProvider>>,
    bridge_request_timeout: Duration,
}

impl AppState {
    /// Open the pane: load persisted settings and return the initial enablement.
    ///
    /// # Errors
    /// `CoreError::PaneUnavailable` when the Tor daemon is not ours to configure.
    pub fn open_pane(&mut self) -> CoreResult<PaneEnablement> {
        if !self.settings.is_pane_enabled() {
            log::warn!("Tor daemon is managed externally, network settings pane disabled");
            return Err(CoreError::PaneUnavailable);
        }
        Ok(self.settings.initialize())
    }

    pub fn settings(&self) -> &NetworkSettingsService {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut NetworkSettingsService {
        &mut self.settings
    }

    /// Whether a bridge provider was configured for this host
    pub fn can_request_bridges(&self) -> bool {
        self.bridge_provider.is_some()
    }

    /// Ask the bridge provider for bridges and store what it hands out.
    ///
    /// The request goes through the configured proxy, if any. Returns
    /// `Ok(None)` when the provider had nothing to give; the persisted
    /// configuration is then left as it was.
    pub async fn request_bridges(&mut self) -> CoreResult<Option<BridgeConfiguration>> {
        let provider = self.bridge_provider.clone().ok_or_else(|| {
            CoreError::ValidationError("bridge_provider is not configured".to_string())
        })?;
        let proxy_uri = self.settings.proxy_uri();

        log::info!(
            "Requesting bridges{}",
            if proxy_uri.is_some() { " through proxy" } else { "" }
        );

        let lines = match tokio::time::timeout(
            self.bridge_request_timeout,
            provider.request_bridges(proxy_uri.as_deref()),
        )
        .await
        {
            Ok(Ok(lines)) => lines,
            Ok(Err(e)) => {
                log::error!("Bridge request failed: {e}");
                return Err(match e {
                    CoreError::BridgeRequestFailed(_) => e,
                    other => CoreError::BridgeRequestFailed(other.to_string()),
                });
            }
            Err(_) => {
                log::error!(
                    "Bridge request timed out after {}s",
                    self.bridge_request_timeout.as_secs()
                );
                return Err(CoreError::BridgeRequestFailed(format!(
                    "timed out after {}s",
                    self.bridge_request_timeout.as_secs()
                )));
            }
        };

        self.settings.apply_requested_bridges(lines)
    }

    /// The pane lost focus: flush settings to disk
    pub fn on_focus_lost(&self) -> CoreResult<()> {
        self.settings.on_focus_lost()
    }

    /// Contents for the "View Tor logs" dialog
    pub fn tor_logs(&self) -> CoreResult<String> {
        self.settings.tor_logs()
    }
}

/// Builder for constructing `AppState` with host-specific adapters.
///
/// # Required adapters
/// - `bridge_store`, `proxy_store`, `firewall_store`: where each domain is persisted
/// - `protocol_service`: daemon ownership and flushing
///
/// # Optional
/// - `bridge_provider`: without one, `request_bridges` is rejected
/// - `bridge_request_timeout`: defaults to 60 seconds
pub struct AppStateBuilder {
    bridge_store: Option<Arc<dyn BridgeSettingsStore>>,
    proxy_store: Option<Arc<dyn ProxySettingsStore>>,
    firewall_store: Option<Arc<dyn FirewallSettingsStore>>,
    protocol_service: Option<Arc<dyn ProtocolService>>,
    bridge_provider: Option<Arc<dyn BridgeProvider>>,
    bridge_request_timeout: Duration,
}

impl AppStateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            bridge_store: None,
            proxy_store: None,
            firewall_store: None,
            protocol_service: None,
            bridge_provider: None,
            bridge_request_timeout: DEFAULT_BRIDGE_REQUEST_TIMEOUT,
        }
    }

    /// Builder backed by a `FilePreferenceStore` opened from `config`
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new()
            .preference_store(Arc::new(FilePreferenceStore::from_config(config)))
            .bridge_request_timeout(config.bridge_request_timeout())
    }

    #[must_use]
    pub fn bridge_store(mut self, store: Arc<dyn BridgeSettingsStore>) -> Self {
        self.bridge_store = Some(store);
        self
    }

    #[must_use]
    pub fn proxy_store(mut self, store: Arc<dyn ProxySettingsStore>) -> Self {
        self.proxy_store = Some(store);
        self
    }

    #[must_use]
    pub fn firewall_store(mut self, store: Arc<dyn FirewallSettingsStore>) -> Self {
        self.firewall_store = Some(store);
        self
    }

    #[must_use]
    pub fn protocol_service(mut self, service: Arc<dyn ProtocolService>) -> Self {
        self.protocol_service = Some(service);
        self
    }

    /// Use one `FilePreferenceStore` for all three domains and for flushing
    #[must_use]
    pub fn preference_store(self, store: Arc<FilePreferenceStore>) -> Self {
        self.bridge_store(store.clone())
            .proxy_store(store.clone())
            .firewall_store(store.clone())
            .protocol_service(store)
    }

    #[must_use]
    pub fn bridge_provider(mut self, provider: Arc<dyn BridgeProvider>) -> Self {
        self.bridge_provider = Some(provider);
        self
    }

    #[must_use]
    pub fn bridge_request_timeout(mut self, timeout: Duration) -> Self {
        self.bridge_request_timeout = timeout;
        self
    }

    /// Build the `AppState`.
    ///
    /// # Errors
    /// Returns `CoreError::ValidationError` if required adapters are missing.
    pub fn build(self) -> CoreResult<AppState> {
        let bridge_store = self
            .bridge_store
            .ok_or_else(|| CoreError::ValidationError("bridge_store is required".to_string()))?;
        let proxy_store = self
            .proxy_store
            .ok_or_else(|| CoreError::ValidationError("proxy_store is required".to_string()))?;
        let firewall_store = self.firewall_store.ok_or_else(|| {
            CoreError::ValidationError("firewall_store is required".to_string())
        })?;
        let protocol_service = self.protocol_service.ok_or_else(|| {
            CoreError::ValidationError("protocol_service is required".to_string())
        })?;
        if self.bridge_request_timeout.is_zero() {
            return Err(CoreError::ValidationError(
                "bridge_request_timeout must be greater than 0".to_string(),
            ));
        }

        let ctx = Arc::new(ServiceContext::new(
            bridge_store,
            proxy_store,
            firewall_store,
            protocol_service,
        ));
        let settings = NetworkSettingsService::new(Arc::clone(&ctx));

        Ok(AppState {
            ctx,
            settings,
            bridge_provider: self.bridge_provider,
            bridge_request_timeout: self.bridge_request_timeout,
        })
    }
}

impl Default for AppStateBuilder {
    fn default() -> Self {
        Self::new()
    }
}
