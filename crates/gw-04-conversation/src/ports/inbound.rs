//! # Inbound Ports (Driving Ports)

use shared_types::RequesterRef;

use crate::domain::command::{Command, InboundEvent};
use crate::domain::reply::Reply;

/// Primary API for the Conversation subsystem.
///
/// Blocking: handling a command may reach the credential store.
pub trait ConversationApi: Send + Sync {
    /// Process one event and produce its reply.
    fn handle(&self, event: &InboundEvent) -> Reply;

    /// Interpret free text according to the requester's session state.
    ///
    /// Returns `None` when no request is in progress.
    fn interpret_text(&self, requester: &RequesterRef, text: &str) -> Option<Command>;

    /// Interpret and handle free text in one step.
    fn handle_text(
        &self,
        requester: &RequesterRef,
        display_name: Option<&str>,
        text: &str,
    ) -> Reply {
        match self.interpret_text(requester, text) {
            Some(command) => {
                let mut event = InboundEvent::new(requester.clone(), command);
                if let Some(name) = display_name {
                    event = event.with_display_name(name);
                }
                self.handle(&event)
            }
            None => Reply::NoActiveRequest,
        }
    }
}
