//! Which form controls should be enabled
//!
//! Pure descriptions derived by the controller; a presentation adapter applies
//! them to whatever widget toolkit hosts the pane.

use serde::{Deserialize, Serialize};

use super::{BridgeSource, ProxyType};

/// Controls that belong to one bridge source radio option
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BridgeControlGroup {
    /// Builtin transport list
    BuiltinList,
    /// "Request a bridge" button and its textarea
    RequestBridge,
    /// User provided bridges textarea
    UserProvided,
}

impl BridgeControlGroup {
    /// Group owned by `source`, `None` for [`BridgeSource::None`]
    #[must_use]
    pub fn for_source(source: BridgeSource) -> Option<Self> {
        match source {
            BridgeSource::None => None,
            BridgeSource::Builtin => Some(Self::BuiltinList),
            BridgeSource::RequestedFromProvider => Some(Self::RequestBridge),
            BridgeSource::UserProvided => Some(Self::UserProvided),
        }
    }
}

/// Enablement of the bridges section
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BridgeEnablement {
    /// The source radio options themselves
    pub source_options: bool,
    /// The single enabled control group, if any
    pub active_group: Option<BridgeControlGroup>,
}

impl BridgeEnablement {
    #[must_use]
    pub fn new(source_options: bool, source: BridgeSource) -> Self {
        Self {
            source_options,
            active_group: BridgeControlGroup::for_source(source),
        }
    }

    #[must_use]
    pub fn is_enabled(&self, group: BridgeControlGroup) -> bool {
        self.active_group == Some(group)
    }
}

/// Enablement of the local proxy section
///
/// `clear_*` flags ask the presentation layer to blank fields that no longer
/// apply. Blanking affects the live form only, never the stored configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProxyEnablement {
    pub type_list: bool,
    pub address: bool,
    pub port: bool,
    pub username: bool,
    pub password: bool,
    pub clear_address_and_port: bool,
    pub clear_credentials: bool,
}

impl ProxyEnablement {
    /// Everything disabled and blanked
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            clear_address_and_port: true,
            clear_credentials: true,
            ..Self::default()
        }
    }

    /// Detail fields for `proxy_type`
    #[must_use]
    pub fn for_type(proxy_type: ProxyType, type_list: bool) -> Self {
        match proxy_type {
            ProxyType::None => Self {
                type_list,
                ..Self::disabled()
            },
            ProxyType::Socks4 => Self {
                type_list,
                address: true,
                port: true,
                clear_credentials: true,
                ..Self::default()
            },
            ProxyType::Socks5 | ProxyType::Https => Self {
                type_list,
                address: true,
                port: true,
                username: true,
                password: true,
                ..Self::default()
            },
        }
    }
}

/// Enablement of the local firewall section
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FirewallEnablement {
    pub allowed_ports: bool,
}

/// Enablement of the whole pane, derived when it opens
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaneEnablement {
    pub bridges: BridgeEnablement,
    pub proxy: ProxyEnablement,
    pub firewall: FirewallEnablement,
}

/// Lifecycle state of one configuration domain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DomainState {
    /// The section's checkbox is off
    Disabled,
    /// Checkbox on, but nothing usable is stored
    EnabledUnconfigured,
    /// Checkbox on and a configuration is stored
    EnabledConfigured,
}

impl DomainState {
    #[must_use]
    pub fn derive(use_enabled: bool, configured: bool) -> Self {
        match (use_enabled, configured) {
            (false, _) => Self::Disabled,
            (true, false) => Self::EnabledUnconfigured,
            (true, true) => Self::EnabledConfigured,
        }
    }
}
