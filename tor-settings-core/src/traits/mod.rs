//! Storage layer abstraction trait definition

mod bridge_provider;
mod protocol_service;
mod settings_store;

pub use bridge_provider::BridgeProvider;
pub use protocol_service::ProtocolService;
pub use settings_store::{BridgeSettingsStore, FirewallSettingsStore, ProxySettingsStore};
