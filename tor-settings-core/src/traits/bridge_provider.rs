//! Bridge distribution abstract Trait

use async_trait::async_trait;

use crate::error::CoreResult;

/// Source of fresh bridge lines (the bridge distribution service)
///
/// This is a network round trip, so unlike the settings stores it is async.
#[async_trait]
pub trait BridgeProvider: Send + Sync {
    /// Request bridges
    ///
    /// # Arguments
    /// * `proxy_uri` - Outbound proxy to reach the service through, if the user configured one
    ///
    /// # Returns
    /// Bridge lines, possibly empty when the service had nothing to hand out
    async fn request_bridges(&self, proxy_uri: Option<&str>) -> CoreResult<Vec<String>>;
}
