//! 业务逻辑服务层

mod network_settings_service;

pub use network_settings_service::NetworkSettingsService;

use std::sync::Arc;

use crate::traits::{
    BridgeSettingsStore, FirewallSettingsStore, ProtocolService, ProxySettingsStore,
};

/// 服务上下文 - 持有所有依赖
///
/// The host creates this context and injects its own persistence collaborators.
pub struct ServiceContext {
    bridge_store: Arc<dyn BridgeSettingsStore>,
    proxy_store: Arc<dyn ProxySettingsStore>,
    firewall_store: Arc<dyn FirewallSettingsStore>,
    protocol_service: Arc<dyn ProtocolService>,
}

impl ServiceContext {
    /// 创建服务上下文
    #[must_use]
    pub fn new(
        bridge_store: Arc<dyn BridgeSettingsStore>,
        proxy_store: Arc<dyn ProxySettingsStore>,
        firewall_store: Arc<dyn FirewallSettingsStore>,
        protocol_service: Arc<dyn ProtocolService>,
    ) -> Self {
        Self {
            bridge_store,
            proxy_store,
            firewall_store,
            protocol_service,
        }
    }

    #[must_use]
    pub fn bridge_store(&self) -> &Arc<dyn BridgeSettingsStore> {
        &self.bridge_store
    }

    #[must_use]
    pub fn proxy_store(&self) -> &Arc<dyn ProxySettingsStore> {
        &self.proxy_store
    }

    #[must_use]
    pub fn firewall_store(&self) -> &Arc<dyn FirewallSettingsStore> {
        &self.firewall_store
    }

    #[must_use]
    pub fn protocol_service(&self) -> &Arc<dyn ProtocolService> {
        &self.protocol_service
    }
}
