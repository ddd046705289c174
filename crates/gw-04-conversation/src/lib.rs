//! # Conversation Controller (gw-04)
//!
//! Drives one credential request per requester through a small state
//! machine and turns every outcome into exactly one reply.
//!
//! ```text
//!            /wifi                    device ok                 document
//!  (none) ──────────→ AwaitingDeviceChoice ──────→ AwaitingDocument ──────→ (none)
//!    ↑   begin failed        │ bad choice: re-prompt      │ invalid: re-prompt
//!    └── reply, no session   └─────────────┘              └──────────┘
//!
//!  /cancelar from any state → (none)      /wifi from any state → restart
//! ```
//!
//! ## Domain Invariants
//!
//! | ID | Invariant | Enforcement Location |
//! |----|-----------|---------------------|
//! | 1 | One Session Per Requester | `domain/session.rs` - table keyed by `RequesterRef` |
//! | 2 | No Lock Across I/O | `service.rs` - sessions are taken out before calling the engine |
//! | 3 | One Reply Per Event | `service.rs` - `handle` returns a single `Reply` |
//! | 4 | Only A Bad Document Retries | `service.rs` - session restored only for recoverable errors |
//!
//! ## Crate Structure (Hexagonal Architecture)
//!
//! - `domain/` - Commands, replies, sessions
//! - `ports/` - `ConversationApi` (inbound), `ReplyChannel` (outbound)
//! - `adapters/` - Recording reply channel
//! - `service.rs` - `ConversationController`

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

pub use adapters::RecordingReplyChannel;
pub use domain::command::{Command, InboundEvent};
pub use domain::errors::ChannelError;
pub use domain::reply::Reply;
pub use domain::session::{Session, SessionState, SessionTable};
pub use ports::inbound::ConversationApi;
pub use ports::outbound::ReplyChannel;
pub use service::ConversationController;
