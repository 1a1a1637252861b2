//! Unified error type definition

use serde::Serialize;
use thiserror::Error;

/// Free-text parse failure
///
/// Parse failures are local to the commit that triggered them: the previously
/// persisted configuration stays untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ParseError {
    /// Port text is empty, non-numeric or outside 1..=65535
    #[error("Invalid port: '{input}'")]
    InvalidPort { input: String },

    /// One token of a port list is not a valid port
    #[error("Invalid port '{token}' at position {position} of port list")]
    InvalidPortList { token: String, position: usize },
}

/// Core layer error type
#[derive(Error, Debug, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum CoreError {
    /// User input could not be parsed
    #[error("{0}")]
    Parse(#[from] ParseError),

    /// Storage layer error
    #[error("Storage error: {0}")]
    StorageError(String),

    /// serialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// The bridge provider could not deliver bridges
    #[error("Bridge request failed: {0}")]
    BridgeRequestFailed(String),

    /// Validation error
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// The host does not own the Tor daemon, so its network settings are not ours to edit
    #[error("Tor network settings are unavailable: the Tor daemon is managed externally")]
    PaneUnavailable,
}

impl CoreError {
    /// Whether it is expected behavior (user input, unavailable pane) is used for log classification.
    ///
    /// Level `warn` should be used when returning `true` and level `error` when returning `false`.
    /// **Please update this method simultaneously when new variants are added.**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::Parse(_) | Self::ValidationError(_) | Self::PaneUnavailable => true,
            Self::StorageError(_) | Self::SerializationError(_) | Self::BridgeRequestFailed(_) => {
                false
            }
        }
    }
}

/// Core layer Result type alias
pub type CoreResult<T> = std::result::Result<T, CoreError>;
