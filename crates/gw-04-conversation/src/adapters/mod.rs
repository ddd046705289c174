//! # Adapters

pub mod recording;

pub use recording::RecordingReplyChannel;
