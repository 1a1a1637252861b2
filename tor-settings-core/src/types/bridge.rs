//! Bridge configuration types

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Where the bridges in use come from
///
/// Also the value of the bridge source radio group.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BridgeSource {
    /// No bridges, connect to Tor directly
    #[default]
    None,
    /// A transport bundled with the browser
    Builtin,
    /// Bridge lines obtained from the bridge distribution service
    RequestedFromProvider,
    /// Bridge lines typed or pasted by the user
    UserProvided,
}

impl BridgeSource {
    /// Stable string form used by the form widgets
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Builtin => "builtin",
            Self::RequestedFromProvider => "requested",
            Self::UserProvided => "userProvided",
        }
    }
}

impl fmt::Display for BridgeSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BridgeSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" | "none" => Ok(Self::None),
            "builtin" => Ok(Self::Builtin),
            "requested" => Ok(Self::RequestedFromProvider),
            "userProvided" => Ok(Self::UserProvided),
            other => Err(format!("Unknown bridge source: '{other}'")),
        }
    }
}

/// Bridge configuration
///
/// Build values through the factory functions: they collapse an empty
/// builtin type or an empty bridge line list to [`BridgeConfiguration::None`].
/// Variants built by hand skip those checks; [`BridgeConfiguration::normalized`]
/// re-applies them, and serialization always goes through it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    tag = "source",
    rename_all = "camelCase",
    rename_all_fields = "camelCase",
    from = "StoredBridgeConfiguration",
    into = "StoredBridgeConfiguration"
)]
pub enum BridgeConfiguration {
    #[default]
    None,
    Builtin {
        bridge_type: String,
    },
    RequestedFromProvider {
        bridge_lines: Vec<String>,
    },
    UserProvided {
        bridge_lines: Vec<String>,
    },
}

impl BridgeConfiguration {
    /// No bridges
    #[must_use]
    pub fn none() -> Self {
        Self::None
    }

    /// Use the builtin transport `bridge_type`
    #[must_use]
    pub fn builtin(bridge_type: impl Into<String>) -> Self {
        let bridge_type = bridge_type.into();
        if bridge_type.trim().is_empty() {
            return Self::None;
        }
        Self::Builtin { bridge_type }
    }

    /// Use bridge lines handed out by the bridge distribution service
    #[must_use]
    pub fn requested_from_provider(bridge_lines: Vec<String>) -> Self {
        if bridge_lines.is_empty() {
            return Self::None;
        }
        Self::RequestedFromProvider { bridge_lines }
    }

    /// Use bridge lines entered by the user
    #[must_use]
    pub fn user_provided(bridge_lines: Vec<String>) -> Self {
        if bridge_lines.is_empty() {
            return Self::None;
        }
        Self::UserProvided { bridge_lines }
    }

    /// Re-run the factory checks, collapsing invalid values to `None`
    #[must_use]
    pub fn normalized(self) -> Self {
        match self {
            Self::None => Self::none(),
            Self::Builtin { bridge_type } => Self::builtin(bridge_type),
            Self::RequestedFromProvider { bridge_lines } => {
                Self::requested_from_provider(bridge_lines)
            }
            Self::UserProvided { bridge_lines } => Self::user_provided(bridge_lines),
        }
    }

    /// The source tag of this configuration
    #[must_use]
    pub fn source(&self) -> BridgeSource {
        match self {
            Self::None => BridgeSource::None,
            Self::Builtin { .. } => BridgeSource::Builtin,
            Self::RequestedFromProvider { .. } => BridgeSource::RequestedFromProvider,
            Self::UserProvided { .. } => BridgeSource::UserProvided,
        }
    }

    /// Selected builtin transport, if any
    #[must_use]
    pub fn builtin_type(&self) -> Option<&str> {
        match self {
            Self::Builtin { bridge_type } => Some(bridge_type),
            _ => None,
        }
    }

    /// Literal bridge lines (empty for `None` and `Builtin`)
    #[must_use]
    pub fn bridge_lines(&self) -> &[String] {
        match self {
            Self::RequestedFromProvider { bridge_lines } | Self::UserProvided { bridge_lines } => {
                bridge_lines
            }
            Self::None | Self::Builtin { .. } => &[],
        }
    }

    /// Bridge lines joined for display in a textarea
    #[must_use]
    pub fn bridge_strings(&self) -> String {
        self.bridge_lines().join("\n")
    }

    #[must_use]
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

/// Wire shape of [`BridgeConfiguration`], validated through the factories both ways
#[derive(Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "camelCase", rename_all_fields = "camelCase")]
enum StoredBridgeConfiguration {
    None,
    Builtin { bridge_type: String },
    RequestedFromProvider { bridge_lines: Vec<String> },
    UserProvided { bridge_lines: Vec<String> },
}

impl From<StoredBridgeConfiguration> for BridgeConfiguration {
    fn from(stored: StoredBridgeConfiguration) -> Self {
        match stored {
            StoredBridgeConfiguration::None => Self::none(),
            StoredBridgeConfiguration::Builtin { bridge_type } => Self::builtin(bridge_type),
            StoredBridgeConfiguration::RequestedFromProvider { bridge_lines } => {
                Self::requested_from_provider(bridge_lines)
            }
            StoredBridgeConfiguration::UserProvided { bridge_lines } => {
                Self::user_provided(bridge_lines)
            }
        }
    }
}

impl From<BridgeConfiguration> for StoredBridgeConfiguration {
    fn from(config: BridgeConfiguration) -> Self {
        match config.normalized() {
            BridgeConfiguration::None => Self::None,
            BridgeConfiguration::Builtin { bridge_type } => Self::Builtin { bridge_type },
            BridgeConfiguration::RequestedFromProvider { bridge_lines } => {
                Self::RequestedFromProvider { bridge_lines }
            }
            BridgeConfiguration::UserProvided { bridge_lines } => {
                Self::UserProvided { bridge_lines }
            }
        }
    }
}
