//! Tor Network Settings Core Library
//!
//! Provides the platform-independent logic behind the Tor network settings pane:
//! - Configuration model for bridges, local proxy and local firewall (`types`)
//! - Parsers for the free-text form fields (`parse`)
//! - The settings controller (`NetworkSettingsService`)
//!
//! Persistence is abstracted through traits, so the same controller runs
//! against any preference store the host provides.

pub mod error;
pub mod parse;
pub mod services;
pub mod traits;
pub mod types;

#[cfg(test)]
mod test_utils;

// Re-export common types
pub use error::{CoreError, CoreResult, ParseError};
pub use services::{NetworkSettingsService, ServiceContext};
pub use traits::{
    BridgeProvider, BridgeSettingsStore, FirewallSettingsStore, ProtocolService,
    ProxySettingsStore,
};
