//! # Commands

use shared_types::RequesterRef;

/// Everything a requester can ask the controller to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Show the welcome text.
    Start,
    /// Start (or restart) a credential request.
    RequestCredential,
    /// Pick a device class, as typed.
    SubmitDeviceChoice(String),
    /// Identity document, as typed.
    SubmitDocument(String),
    /// Drop the active request, if any.
    Cancel,
    /// List credentials already delivered to the requester.
    ListMyCredentials,
}

impl Command {
    /// Short name for logs. Never includes the payload.
    pub fn name(&self) -> &'static str {
        match self {
            Command::Start => "start",
            Command::RequestCredential => "request_credential",
            Command::SubmitDeviceChoice(_) => "submit_device_choice",
            Command::SubmitDocument(_) => "submit_document",
            Command::Cancel => "cancel",
            Command::ListMyCredentials => "list_my_credentials",
        }
    }
}

/// A command together with who sent it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundEvent {
    pub requester: RequesterRef,
    /// Human-readable name from the channel, stored with the assignment.
    pub display_name: Option<String>,
    pub command: Command,
}

impl InboundEvent {
    pub fn new(requester: RequesterRef, command: Command) -> Self {
        Self {
            requester,
            display_name: None,
            command,
        }
    }

    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        let display_name = display_name.into();
        self.display_name = (!display_name.trim().is_empty()).then_some(display_name);
        self
    }
}
