//! # Ports
//!
//! - `inbound` - `ConversationApi`, driven by a channel adapter
//! - `outbound` - `ReplyChannel`, implemented by a channel adapter

pub mod inbound;
pub mod outbound;
