//! Network settings persistence abstract Trait
//!
//! Reads never fail: an implementation that cannot read or decode its backing
//! preference returns the defaulted value (`None` variant) and reports the
//! problem itself.

use crate::error::CoreResult;
use crate::types::{BridgeConfiguration, FirewallConfiguration, ProxyConfiguration};

/// Bridge settings store
///
/// Platform implementation:
/// - `FilePreferenceStore` (tor-settings-app, JSON document)
pub trait BridgeSettingsStore: Send + Sync {
    /// Read the persisted bridge configuration
    fn read(&self) -> BridgeConfiguration;

    /// Persist a bridge configuration
    ///
    /// # Arguments
    /// * `config` - Configuration to store, replacing the previous one
    fn write(&self, config: &BridgeConfiguration) -> CoreResult<()>;

    /// Identifiers of the transports bundled with the browser
    fn default_bridge_types(&self) -> Vec<String>;
}

/// Local proxy settings store
pub trait ProxySettingsStore: Send + Sync {
    /// Read the persisted proxy configuration
    fn read(&self) -> ProxyConfiguration;

    /// Persist a proxy configuration
    fn write(&self, config: &ProxyConfiguration) -> CoreResult<()>;
}

/// Local firewall settings store
pub trait FirewallSettingsStore: Send + Sync {
    /// Read the persisted firewall configuration
    fn read(&self) -> FirewallConfiguration;

    /// Persist a firewall configuration
    fn write(&self, config: &FirewallConfiguration) -> CoreResult<()>;
}
