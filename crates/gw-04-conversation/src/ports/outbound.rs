//! # Outbound Ports (Driven Ports)

use async_trait::async_trait;
use shared_types::RequesterRef;

use crate::domain::errors::ChannelError;
use crate::domain::reply::Reply;

/// Delivers replies back to requesters.
#[async_trait]
pub trait ReplyChannel: Send + Sync {
    /// Send one reply to `requester`.
    async fn send(&self, requester: &RequesterRef, reply: &Reply) -> Result<(), ChannelError>;
}
