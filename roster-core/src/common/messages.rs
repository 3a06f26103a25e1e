use roster_model::{LoginRequest, RegisterRequest, UpdateUserRequest, UserId};

use crate::domains::auth;
use crate::domains::navigation::Route;
use crate::domains::ui::messages::UiMessage;
use crate::domains::users;
use crate::domains::users::store::FetchTicket;

/// The main domain message router
#[derive(Debug, Clone)]
pub enum DomainMessage {
    Auth(auth::messages::Message),
    Users(users::messages::Message),
    Ui(UiMessage),
    Navigate(Route),
}

impl DomainMessage {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Auth(msg) => msg.name(),
            Self::Users(msg) => msg.name(),
            Self::Ui(msg) => msg.name(),
            Self::Navigate(_) => "Navigate",
        }
    }
}

impl From<auth::messages::Message> for DomainMessage {
    fn from(msg: auth::messages::Message) -> Self {
        Self::Auth(msg)
    }
}

impl From<users::messages::Message> for DomainMessage {
    fn from(msg: users::messages::Message) -> Self {
        Self::Users(msg)
    }
}

impl From<UiMessage> for DomainMessage {
    fn from(msg: UiMessage) -> Self {
        Self::Ui(msg)
    }
}

/// Network work requested by an update. The console performs each on a task
/// and feeds the resulting message back in.
#[derive(Debug, Clone)]
pub enum Effect {
    Login(LoginRequest),
    Logout,
    FetchUsers(FetchTicket),
    CreateUser(RegisterRequest),
    UpdateUser(UserId, UpdateUserRequest),
    DeleteUser(UserId),
}

/// Broadcast to every domain after the update that raised it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrossDomainEvent {
    Authenticated,
    LoggedOut,
}

/// Result of a domain update
#[derive(Debug, Default)]
pub struct DomainUpdate {
    pub effects: Vec<Effect>,
    pub events: Vec<CrossDomainEvent>,
}

impl DomainUpdate {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn effect(effect: Effect) -> Self {
        Self {
            effects: vec![effect],
            events: Vec::new(),
        }
    }

    pub fn event(event: CrossDomainEvent) -> Self {
        Self {
            effects: Vec::new(),
            events: vec![event],
        }
    }

    pub fn add_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }

    pub fn add_event(mut self, event: CrossDomainEvent) -> Self {
        self.events.push(event);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty() && self.events.is_empty()
    }
}
