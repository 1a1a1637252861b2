//! Tor protocol service abstract Trait

use crate::error::CoreResult;

/// Handle on the Tor daemon controller owned by the host
pub trait ProtocolService: Send + Sync {
    /// Whether the host launched and controls the Tor daemon.
    ///
    /// When it does not, its network settings are managed elsewhere and the
    /// pane must not be shown.
    fn owns_tor_daemon(&self) -> bool;

    /// Flush the daemon's settings to disk
    fn flush_settings(&self) -> CoreResult<()>;

    /// Recent daemon log output, for the "View Tor logs" dialog
    fn tor_logs(&self) -> CoreResult<String>;
}
