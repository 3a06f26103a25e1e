//! Application state and the single update entry point.
//!
//! [`App`] owns every store. Input arrives as [`DomainMessage`]s; each
//! update returns the [`Effect`]s the caller must perform, whose results come
//! back as further messages. Nothing here touches the network directly.

pub mod effects;

use tracing::{debug, info};

use crate::common::messages::{CrossDomainEvent, DomainMessage, DomainUpdate, Effect};
use crate::domains::auth::SessionStore;
use crate::domains::auth::update::update_auth;
use crate::domains::navigation::{AccessState, Route, guard};
use crate::domains::ui::update::update_ui;
use crate::domains::ui::{LoginView, Toaster, UsersView};
use crate::domains::users::store::{RefreshPolicy, UserCollectionStore};
use crate::domains::users::update::update_users;

pub use effects::Services;

#[derive(Debug)]
pub struct App {
    pub route: Route,
    pub session: SessionStore,
    pub users: UserCollectionStore,
    pub login: LoginView,
    pub view: UsersView,
    pub toasts: Toaster,
    /// Host shown in the top bar.
    pub api_host: String,
}

impl App {
    pub fn new(session: SessionStore, policy: RefreshPolicy) -> Self {
        Self {
            route: Route::Login,
            session,
            users: UserCollectionStore::new(policy),
            login: LoginView::default(),
            view: UsersView::default(),
            toasts: Toaster::new(),
            api_host: String::new(),
        }
    }

    pub fn with_api_host(mut self, host: impl Into<String>) -> Self {
        self.api_host = host.into();
        self
    }

    /// Open the default route; returns the initial fetch when a session was
    /// restored.
    pub fn start(&mut self) -> Vec<Effect> {
        self.navigate(Route::Users)
    }

    pub fn access(&self) -> AccessState {
        if self.session.is_authenticated() {
            AccessState::Authenticated
        } else {
            AccessState::Unauthenticated
        }
    }

    pub fn update(&mut self, message: impl Into<DomainMessage>) -> Vec<Effect> {
        let message = message.into();
        debug!(message = message.name(), "dispatch");

        let update = match message {
            DomainMessage::Auth(msg) => update_auth(self, msg),
            DomainMessage::Users(msg) => update_users(self, msg),
            DomainMessage::Ui(msg) => update_ui(self, msg),
            DomainMessage::Navigate(route) => DomainUpdate {
                effects: self.navigate(route),
                events: Vec::new(),
            },
        };

        let mut effects = update.effects;
        for event in update.events {
            effects.extend(self.handle_event(event));
        }
        // Re-check access after every update.
        effects.extend(self.navigate(self.route));
        effects
    }

    /// Move to `requested`, subject to the guard. Entering the users page
    /// fetches its current page.
    pub fn navigate(&mut self, requested: Route) -> Vec<Effect> {
        let target = guard(requested, self.access());
        if target != requested {
            debug!(from = requested.path(), to = target.path(), "route redirected");
        }
        let entering_users = target == Route::Users && self.route != Route::Users;
        self.route = target;

        if entering_users {
            let ticket = self.users.begin_fetch(self.users.current_page());
            vec![Effect::FetchUsers(ticket)]
        } else {
            Vec::new()
        }
    }

    fn handle_event(&mut self, event: CrossDomainEvent) -> Vec<Effect> {
        match event {
            CrossDomainEvent::Authenticated => {
                info!("session started");
                self.navigate(Route::Users)
            }
            CrossDomainEvent::LoggedOut => {
                self.users.reset();
                self.view = UsersView::default();
                self.navigate(Route::Login)
            }
        }
    }
}
