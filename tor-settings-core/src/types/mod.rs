//! 类型定义模块

mod bridge;
mod enablement;
mod firewall;
mod form;
mod proxy;

pub use bridge::{BridgeConfiguration, BridgeSource};
pub use enablement::{
    BridgeControlGroup, BridgeEnablement, DomainState, FirewallEnablement, PaneEnablement,
    ProxyEnablement,
};
pub use firewall::FirewallConfiguration;
pub use form::{BridgeForm, FirewallForm, ProxyForm};
pub use proxy::{ProxyConfiguration, ProxyType};
