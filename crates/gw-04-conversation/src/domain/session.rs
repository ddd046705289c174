//! # Sessions
//!
//! A session is the state of one in-flight credential request. Sessions
//! live in a `SessionTable` keyed by requester; a requester has at most one.

use gw_03_allocation::Reservation;
use parking_lot::Mutex;
use shared_types::{DeviceClass, RequesterRef};
use std::collections::HashMap;
use uuid::Uuid;

/// Where a request currently stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// Slot reserved; waiting for the device class.
    AwaitingDeviceChoice { reservation: Reservation },
    /// Device chosen; waiting for the identity document.
    AwaitingDocument {
        reservation: Reservation,
        device: DeviceClass,
    },
}

impl SessionState {
    pub fn reservation(&self) -> &Reservation {
        match self {
            SessionState::AwaitingDeviceChoice { reservation }
            | SessionState::AwaitingDocument { reservation, .. } => reservation,
        }
    }
}

/// One in-flight request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Correlates log lines of one request.
    pub id: Uuid,
    pub state: SessionState,
}

impl Session {
    /// Fresh session right after a slot was reserved.
    pub fn start(reservation: Reservation) -> Self {
        Self {
            id: Uuid::new_v4(),
            state: SessionState::AwaitingDeviceChoice { reservation },
        }
    }

    /// Move to `AwaitingDocument`. A session already past the device
    /// choice keeps its state.
    pub fn choose_device(self, device: DeviceClass) -> Self {
        match self.state {
            SessionState::AwaitingDeviceChoice { reservation } => Self {
                id: self.id,
                state: SessionState::AwaitingDocument {
                    reservation,
                    device,
                },
            },
            state @ SessionState::AwaitingDocument { .. } => Self { id: self.id, state },
        }
    }
}

/// Active sessions by requester.
///
/// The lock is held only for map operations; callers take a session out
/// before doing any I/O and put it back afterwards.
#[derive(Debug, Default)]
pub struct SessionTable {
    sessions: Mutex<HashMap<RequesterRef, Session>>,
}

impl SessionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a session, returning the one it replaced.
    pub fn insert(&self, requester: RequesterRef, session: Session) -> Option<Session> {
        self.sessions.lock().insert(requester, session)
    }

    /// Put a session back unless a newer one was started meanwhile.
    ///
    /// Returns `false` if the session was dropped.
    pub fn restore(&self, requester: RequesterRef, session: Session) -> bool {
        let mut sessions = self.sessions.lock();
        if sessions.contains_key(&requester) {
            return false;
        }
        sessions.insert(requester, session);
        true
    }

    /// Remove and return the requester's session.
    pub fn take(&self, requester: &RequesterRef) -> Option<Session> {
        self.sessions.lock().remove(requester)
    }

    /// Current state of the requester's session, if any.
    pub fn state_of(&self, requester: &RequesterRef) -> Option<SessionState> {
        self.sessions
            .lock()
            .get(requester)
            .map(|session| session.state.clone())
    }

    pub fn len(&self) -> usize {
        self.sessions.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.lock().is_empty()
    }
}
