use std::sync::Arc;

use tracing::debug;

use crate::app::App;
use crate::common::messages::{DomainMessage, Effect};
use crate::domains::{auth, users};
use crate::infrastructure::ApiClient;
use crate::infrastructure::services::{
    AuthApiAdapter, AuthService, UserAdminApiAdapter, UserAdminService,
};

/// The service implementations effects run against.
#[derive(Clone)]
pub struct Services {
    pub auth: Arc<dyn AuthService>,
    pub users: Arc<dyn UserAdminService>,
}

impl std::fmt::Debug for Services {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Services").finish_non_exhaustive()
    }
}

impl Services {
    pub fn new(
        auth: Arc<dyn AuthService>,
        users: Arc<dyn UserAdminService>,
    ) -> Self {
        Self { auth, users }
    }

    pub fn from_client(client: ApiClient) -> Self {
        let client = Arc::new(client);
        Self {
            auth: Arc::new(AuthApiAdapter::new(client.clone())),
            users: Arc::new(UserAdminApiAdapter::new(client)),
        }
    }

    /// Run one effect and wrap its outcome as the message that resolves it.
    pub async fn perform(&self, effect: Effect) -> DomainMessage {
        match effect {
            Effect::Login(credentials) => {
                let outcome = self.auth.login(&credentials).await;
                auth::messages::Message::LoginCompleted(outcome).into()
            }
            Effect::Logout => {
                let outcome = self.auth.logout().await;
                auth::messages::Message::LogoutCompleted(outcome).into()
            }
            Effect::FetchUsers(ticket) => {
                let outcome = self.users.list_users(ticket.page).await;
                users::messages::Message::PageLoaded(ticket, outcome).into()
            }
            Effect::CreateUser(request) => {
                let outcome = self.users.create_user(&request).await;
                users::messages::Message::UserCreated(outcome).into()
            }
            Effect::UpdateUser(user_id, request) => {
                let outcome = self.users.update_user(user_id, &request).await;
                users::messages::Message::UserUpdated(user_id, outcome).into()
            }
            Effect::DeleteUser(user_id) => {
                let outcome = self.users.delete_user(user_id).await;
                users::messages::Message::UserDeleted(user_id, outcome).into()
            }
        }
    }

    /// Perform `effects` one at a time, feeding results back into `app`
    /// until nothing is left to do. Used by one-shot commands and tests.
    pub async fn drain(&self, app: &mut App, effects: Vec<Effect>) {
        let mut queue: std::collections::VecDeque<Effect> = effects.into();
        while let Some(effect) = queue.pop_front() {
            let message = self.perform(effect).await;
            debug!(message = message.name(), "effect resolved");
            queue.extend(app.update(message));
        }
    }
}
