//! Snapshots of the network settings form
//!
//! The presentation layer reads these from its widgets when the user commits a
//! section, and the controller hands them back pre-filled when the pane opens.

use serde::{Deserialize, Serialize};

use super::{BridgeConfiguration, BridgeSource, FirewallConfiguration, ProxyConfiguration, ProxyType};

/// Bridges section of the form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BridgeForm {
    /// "Use a bridge" checkbox
    pub use_bridges: bool,
    /// Selected radio option
    pub source: BridgeSource,
    /// Selected entry of the builtin list (empty when nothing is selected)
    pub builtin_type: String,
    /// Textarea holding bridges obtained from the provider
    pub requested_bridges: String,
    /// Textarea holding bridges typed by the user
    pub user_bridges: String,
}

impl BridgeForm {
    /// Form contents reflecting `config`, with `source` as the radio selection
    #[must_use]
    pub fn from_configuration(config: &BridgeConfiguration, source: BridgeSource) -> Self {
        let mut form = Self {
            use_bridges: !config.is_none(),
            source,
            ..Self::default()
        };
        match config {
            BridgeConfiguration::None => {}
            BridgeConfiguration::Builtin { bridge_type } => {
                form.builtin_type.clone_from(bridge_type);
            }
            BridgeConfiguration::RequestedFromProvider { .. } => {
                form.requested_bridges = config.bridge_strings();
            }
            BridgeConfiguration::UserProvided { .. } => {
                form.user_bridges = config.bridge_strings();
            }
        }
        form
    }
}

/// Local proxy section of the form
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProxyForm {
    /// "I use a proxy" checkbox
    pub use_proxy: bool,
    pub proxy_type: ProxyType,
    pub address: String,
    pub port: String,
    pub username: String,
    pub password: String,
}

impl ProxyForm {
    #[must_use]
    pub fn from_configuration(config: &ProxyConfiguration) -> Self {
        let (username, password) = config.credentials().unwrap_or_default();
        Self {
            use_proxy: !config.is_none(),
            proxy_type: config.proxy_type(),
            address: config.host().unwrap_or_default().to_string(),
            port: config.port().map(|p| p.to_string()).unwrap_or_default(),
            username: username.to_string(),
            password: password.to_string(),
        }
    }
}

impl std::fmt::Debug for ProxyForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProxyForm")
            .field("use_proxy", &self.use_proxy)
            .field("proxy_type", &self.proxy_type)
            .field("address", &self.address)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Local firewall section of the form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FirewallForm {
    /// "My firewall only allows certain ports" checkbox
    pub use_firewall: bool,
    /// Allowed ports text
    pub allowed_ports: String,
}

impl FirewallForm {
    #[must_use]
    pub fn from_configuration(config: &FirewallConfiguration) -> Self {
        Self {
            use_firewall: config.has_ports(),
            allowed_ports: config.comma_separated(),
        }
    }
}
