use tracing::debug;

use crate::app::App;
use crate::common::messages::{DomainUpdate, Effect};
use crate::domains::users::messages::Message;
use crate::domains::users::store::{FetchOutcome, FetchTicket, MutationKind};

pub const CREATED_TOAST: &str = "User created successfully!";
pub const UPDATED_TOAST: &str = "User updated successfully!";
pub const SAVE_FAILED_TOAST: &str = "Failed to save user.";
pub const DELETED_TOAST: &str = "User deleted successfully!";
pub const DELETE_FAILED_TOAST: &str = "Failed to delete user.";

fn fetch(app: &mut App, page: u32) -> DomainUpdate {
    let ticket = app.users.begin_fetch(page);
    DomainUpdate::effect(Effect::FetchUsers(ticket))
}

fn refetch(ticket: Option<FetchTicket>) -> DomainUpdate {
    match ticket {
        Some(ticket) => DomainUpdate::effect(Effect::FetchUsers(ticket)),
        None => DomainUpdate::none(),
    }
}

/// Handle user collection messages
pub fn update_users(app: &mut App, message: Message) -> DomainUpdate {
    debug!(message = message.name(), "users update");

    let completion = matches!(
        message,
        Message::PageLoaded(..)
            | Message::UserCreated(_)
            | Message::UserUpdated(..)
            | Message::UserDeleted(..)
    );
    if completion && !app.session.is_authenticated() {
        debug!(message = message.name(), "dropping response for ended session");
        app.users.abandon();
        return DomainUpdate::none();
    }

    match message {
        Message::Refresh => {
            let page = app.users.current_page();
            fetch(app, page)
        }
        Message::GoToPage(page) => {
            let total_pages = app.users.total_pages();
            if total_pages > 0 && page > total_pages {
                return DomainUpdate::none();
            }
            app.view.selected = 0;
            fetch(app, page)
        }
        Message::NextPage => {
            if !app.users.has_next() {
                return DomainUpdate::none();
            }
            app.view.selected = 0;
            let page = app.users.current_page() + 1;
            fetch(app, page)
        }
        Message::PreviousPage => {
            if !app.users.has_previous() {
                return DomainUpdate::none();
            }
            app.view.selected = 0;
            let page = app.users.current_page() - 1;
            fetch(app, page)
        }
        Message::PageLoaded(ticket, outcome) => {
            match app.users.finish_fetch(ticket, outcome) {
                FetchOutcome::Applied => {
                    app.view.clamp_selection(app.users.users());
                }
                FetchOutcome::Stale => {}
                FetchOutcome::Failed(message) => {
                    app.toasts.error(message);
                }
            }
            DomainUpdate::none()
        }
        Message::UserCreated(outcome) => {
            match app.users.finish_mutation(MutationKind::Create, outcome) {
                Ok(ticket) => {
                    app.view.editor = None;
                    app.toasts.success(CREATED_TOAST);
                    refetch(ticket)
                }
                Err(_) => {
                    app.toasts.error(SAVE_FAILED_TOAST);
                    DomainUpdate::none()
                }
            }
        }
        Message::UserUpdated(user_id, outcome) => {
            match app.users.finish_mutation(MutationKind::Update, outcome) {
                Ok(ticket) => {
                    debug!(%user_id, "user updated");
                    app.view.editor = None;
                    app.toasts.success(UPDATED_TOAST);
                    refetch(ticket)
                }
                Err(_) => {
                    app.toasts.error(SAVE_FAILED_TOAST);
                    DomainUpdate::none()
                }
            }
        }
        Message::UserDeleted(user_id, outcome) => {
            app.view.delete.cancel();
            match app.users.finish_mutation(MutationKind::Delete, outcome) {
                Ok(ticket) => {
                    debug!(%user_id, "user deleted");
                    app.toasts.success(DELETED_TOAST);
                    refetch(ticket)
                }
                Err(_) => {
                    app.toasts.error(DELETE_FAILED_TOAST);
                    DomainUpdate::none()
                }
            }
        }
    }
}
