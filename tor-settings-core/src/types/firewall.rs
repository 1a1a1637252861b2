//! Local firewall configuration types

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Local firewall policy: which outbound ports Tor may use
///
/// Build `Custom` through [`FirewallConfiguration::custom`]; a hand-built
/// value is re-checked by [`FirewallConfiguration::normalized`] on serialization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    tag = "policy",
    rename_all = "camelCase",
    rename_all_fields = "camelCase",
    from = "StoredFirewallConfiguration",
    into = "StoredFirewallConfiguration"
)]
pub enum FirewallConfiguration {
    /// All ports reachable
    #[default]
    None,
    /// Only the listed ports are reachable
    Custom { allowed_ports: Vec<u16> },
}

impl FirewallConfiguration {
    #[must_use]
    pub fn none() -> Self {
        Self::None
    }

    /// Restrict Tor to `ports`.
    ///
    /// Duplicates and port 0 are dropped, first-seen order is kept. An empty
    /// result collapses to `None`.
    #[must_use]
    pub fn custom(ports: impl IntoIterator<Item = u16>) -> Self {
        let mut seen = HashSet::new();
        let allowed_ports: Vec<u16> = ports
            .into_iter()
            .filter(|port| *port != 0 && seen.insert(*port))
            .collect();

        if allowed_ports.is_empty() {
            return Self::None;
        }
        Self::Custom { allowed_ports }
    }

    /// Re-run the `custom` checks on a hand-built value
    #[must_use]
    pub fn normalized(self) -> Self {
        match self {
            Self::None => Self::none(),
            Self::Custom { allowed_ports } => Self::custom(allowed_ports),
        }
    }

    #[must_use]
    pub fn allowed_ports(&self) -> &[u16] {
        match self {
            Self::None => &[],
            Self::Custom { allowed_ports } => allowed_ports,
        }
    }

    #[must_use]
    pub fn has_ports(&self) -> bool {
        !self.allowed_ports().is_empty()
    }

    /// Ports joined with `,` for the allowed ports field
    #[must_use]
    pub fn comma_separated(&self) -> String {
        self.allowed_ports()
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",")
    }

    #[must_use]
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

#[derive(Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "camelCase", rename_all_fields = "camelCase")]
enum StoredFirewallConfiguration {
    None,
    Custom {
        #[serde(default)]
        allowed_ports: Vec<u16>,
    },
}

impl From<StoredFirewallConfiguration> for FirewallConfiguration {
    fn from(stored: StoredFirewallConfiguration) -> Self {
        match stored {
            StoredFirewallConfiguration::None => Self::none(),
            StoredFirewallConfiguration::Custom { allowed_ports } => Self::custom(allowed_ports),
        }
    }
}

impl From<FirewallConfiguration> for StoredFirewallConfiguration {
    fn from(config: FirewallConfiguration) -> Self {
        match config.normalized() {
            FirewallConfiguration::None => Self::None,
            FirewallConfiguration::Custom { allowed_ports } => Self::Custom { allowed_ports },
        }
    }
}
