//! In-memory reply channel that keeps everything it was asked to send.

use async_trait::async_trait;
use parking_lot::Mutex;
use shared_types::RequesterRef;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::domain::errors::ChannelError;
use crate::domain::reply::Reply;
use crate::ports::outbound::ReplyChannel;

/// Reply channel backed by a vector.
#[derive(Debug, Default)]
pub struct RecordingReplyChannel {
    sent: Mutex<Vec<(RequesterRef, Reply)>>,
    closed: AtomicBool,
}

impl RecordingReplyChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything sent so far, in order.
    pub fn sent(&self) -> Vec<(RequesterRef, Reply)> {
        self.sent.lock().clone()
    }

    /// Replies sent to one requester, in order.
    pub fn replies_to(&self, requester: &RequesterRef) -> Vec<Reply> {
        self.sent
            .lock()
            .iter()
            .filter(|(to, _)| to == requester)
            .map(|(_, reply)| reply.clone())
            .collect()
    }

    /// Make every further `send` fail with `Closed`.
    pub fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl ReplyChannel for RecordingReplyChannel {
    async fn send(&self, requester: &RequesterRef, reply: &Reply) -> Result<(), ChannelError> {
        if self.closed.load(Ordering::SeqCst) {
            return Err(ChannelError::Closed);
        }
        self.sent.lock().push((requester.clone(), reply.clone()));
        Ok(())
    }
}
