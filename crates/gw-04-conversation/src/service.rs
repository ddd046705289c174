//! # Conversation Controller
//!
//! Implements `ConversationApi` over any `AllocationApi`.
//!
//! Every handler runs with the session taken out of the table, so two
//! events from the same requester never act on one session twice.

use gw_03_allocation::{AllocationApi, CompletionRequest};
use shared_types::{DeviceClass, RequesterRef};
use tracing::{debug, info, instrument, warn};

use crate::domain::command::{Command, InboundEvent};
use crate::domain::reply::Reply;
use crate::domain::session::{Session, SessionState, SessionTable};
use crate::ports::inbound::ConversationApi;

/// The Conversation Controller.
pub struct ConversationController<A: AllocationApi> {
    engine: A,
    sessions: SessionTable,
}

impl<A: AllocationApi> ConversationController<A> {
    pub fn new(engine: A) -> Self {
        Self {
            engine,
            sessions: SessionTable::new(),
        }
    }

    /// The underlying allocation engine.
    pub fn engine(&self) -> &A {
        &self.engine
    }

    pub fn sessions(&self) -> &SessionTable {
        &self.sessions
    }

    fn request_credential(&self, requester: &RequesterRef) -> Reply {
        if let Some(previous) = self.sessions.take(requester) {
            info!(session_id = %previous.id, "Restarting request, previous session dropped");
        }

        match self.engine.begin_request(requester) {
            Ok(reservation) => {
                let network_name = reservation.network_name.clone();
                let session = Session::start(reservation);
                debug!(session_id = %session.id, "Session started");
                self.sessions.insert(requester.clone(), session);
                Reply::DevicePrompt { network_name }
            }
            Err(err) => {
                info!(error = %err, "Request refused before a session started");
                Reply::from(&err)
            }
        }
    }

    fn submit_device_choice(&self, requester: &RequesterRef, choice: &str) -> Reply {
        let Some(session) = self.sessions.take(requester) else {
            return Reply::NoActiveRequest;
        };

        let network_name = session.state.reservation().network_name.clone();
        let (session, reply) = match (&session.state, DeviceClass::parse(choice)) {
            (SessionState::AwaitingDocument { .. }, _) => (session, Reply::DocumentPrompt),
            (SessionState::AwaitingDeviceChoice { .. }, Some(device)) => {
                debug!(session_id = %session.id, %device, "Device chosen");
                (session.choose_device(device), Reply::DocumentPrompt)
            }
            (SessionState::AwaitingDeviceChoice { .. }, None) => {
                debug!(session_id = %session.id, "Unrecognized device choice");
                (session, Reply::DevicePrompt { network_name })
            }
        };

        self.sessions.restore(requester.clone(), session);
        reply
    }

    fn submit_document(
        &self,
        requester: &RequesterRef,
        display_name: Option<&str>,
        document: &str,
    ) -> Reply {
        let Some(session) = self.sessions.take(requester) else {
            return Reply::NoActiveRequest;
        };

        let (reservation, device) = match &session.state {
            SessionState::AwaitingDocument {
                reservation,
                device,
            } => (reservation.clone(), *device),
            SessionState::AwaitingDeviceChoice { reservation } => {
                let network_name = reservation.network_name.clone();
                self.sessions.restore(requester.clone(), session);
                return Reply::DevicePrompt { network_name };
            }
        };

        let request = CompletionRequest {
            pool_id: reservation.pool_id,
            requester: requester.clone(),
            raw_document: document.to_string(),
            device_class: device,
            display_name: display_name.map(str::to_string),
        };

        match self.engine.complete_request(&request) {
            Ok(delivered) => {
                info!(session_id = %session.id, pool_id = %delivered.pool_id, "Session completed");
                Reply::Delivered(delivered)
            }
            Err(err) if !err.is_terminal() => {
                debug!(session_id = %session.id, error = %err, "Document rejected, awaiting retry");
                let id = session.id;
                if !self.sessions.restore(requester.clone(), session) {
                    debug!(session_id = %id, "Session superseded while validating");
                }
                Reply::from(&err)
            }
            Err(err) => {
                warn!(session_id = %session.id, error = %err, "Session ended without delivery");
                Reply::from(&err)
            }
        }
    }

    fn cancel(&self, requester: &RequesterRef) -> Reply {
        if let Some(session) = self.sessions.take(requester) {
            debug!(session_id = %session.id, "Session cancelled");
        }
        Reply::Cancelled
    }

    fn list_credentials(&self, requester: &RequesterRef) -> Reply {
        match self.engine.issued_credentials(requester) {
            Ok(credentials) => Reply::CredentialList(credentials),
            Err(err) => Reply::from(&err),
        }
    }
}

impl<A: AllocationApi> ConversationApi for ConversationController<A> {
    #[instrument(
        skip_all,
        fields(requester = %event.requester, command = event.command.name())
    )]
    fn handle(&self, event: &InboundEvent) -> Reply {
        let requester = &event.requester;
        match &event.command {
            Command::Start => Reply::Welcome,
            Command::RequestCredential => self.request_credential(requester),
            Command::SubmitDeviceChoice(choice) => self.submit_device_choice(requester, choice),
            Command::SubmitDocument(document) => {
                self.submit_document(requester, event.display_name.as_deref(), document)
            }
            Command::Cancel => self.cancel(requester),
            Command::ListMyCredentials => self.list_credentials(requester),
        }
    }

    fn interpret_text(&self, requester: &RequesterRef, text: &str) -> Option<Command> {
        match self.sessions.state_of(requester)? {
            SessionState::AwaitingDeviceChoice { .. } => {
                Some(Command::SubmitDeviceChoice(text.to_string()))
            }
            SessionState::AwaitingDocument { .. } => Some(Command::SubmitDocument(text.to_string())),
        }
    }
}
