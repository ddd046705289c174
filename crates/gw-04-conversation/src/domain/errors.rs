//! Reply channel errors.

use thiserror::Error;

/// Failure to hand a reply to the requester.
#[derive(Debug, Error)]
pub enum ChannelError {
    /// The channel no longer accepts replies.
    #[error("Reply channel closed")]
    Closed,

    /// Writing the reply failed.
    #[error("Reply channel I/O error: {message}")]
    Io { message: String },
}

impl From<std::io::Error> for ChannelError {
    fn from(err: std::io::Error) -> Self {
        ChannelError::Io {
            message: err.to_string(),
        }
    }
}
