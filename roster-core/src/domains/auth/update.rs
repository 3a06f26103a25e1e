use std::time::Duration;

use tracing::debug;

use crate::app::App;
use crate::common::messages::{CrossDomainEvent, DomainUpdate, Effect};
use crate::domains::auth::messages::Message;
use crate::domains::ui::FormField;
use crate::domains::ui::feedback::ToastKind;

pub const LOGIN_SUCCESS_TOAST: &str = "Login successful! Welcome back.";
pub const LOGOUT_SUCCESS_TOAST: &str = "Logged out successfully!";
pub const LOGOUT_FAILURE_TOAST: &str = "Logout failed.";

const LOGIN_SUCCESS_TTL: Duration = Duration::from_secs(2);
const LOGIN_FAILURE_TTL: Duration = Duration::from_secs(3);

/// Handle authentication domain messages
pub fn update_auth(app: &mut App, message: Message) -> DomainUpdate {
    debug!(message = message.name(), "auth update");

    match message {
        Message::EmailChanged(email) => {
            app.login.form.email = email;
            app.login.errors.errors.remove(&FormField::Email);
            DomainUpdate::none()
        }
        Message::PasswordChanged(password) => {
            app.login.form.password = password;
            app.login.errors.errors.remove(&FormField::Password);
            DomainUpdate::none()
        }
        Message::ToggleField => {
            app.login.toggle_focus();
            DomainUpdate::none()
        }
        Message::Submit => {
            if app.session.is_loading() {
                return DomainUpdate::none();
            }
            match app.login.form.validate() {
                Ok(credentials) => {
                    app.login.errors = Default::default();
                    app.session.begin_login();
                    DomainUpdate::effect(Effect::Login(credentials))
                }
                Err(errors) => {
                    app.login.errors = errors;
                    DomainUpdate::none()
                }
            }
        }
        Message::LoginCompleted(outcome) => {
            match app.session.finish_login(outcome) {
                Ok(()) => {
                    app.toasts.push(
                        ToastKind::Success,
                        LOGIN_SUCCESS_TOAST,
                        LOGIN_SUCCESS_TTL,
                    );
                    DomainUpdate::event(CrossDomainEvent::Authenticated)
                }
                Err(message) => {
                    app.toasts.push(ToastKind::Error, message, LOGIN_FAILURE_TTL);
                    DomainUpdate::none()
                }
            }
        }
        Message::Logout => {
            if !app.session.is_authenticated() || app.session.is_loading() {
                return DomainUpdate::none();
            }
            app.session.begin_logout();
            DomainUpdate::effect(Effect::Logout)
        }
        Message::LogoutCompleted(outcome) => {
            match app.session.finish_logout(outcome) {
                Ok(()) => app.toasts.success(LOGOUT_SUCCESS_TOAST),
                Err(_) => app.toasts.error(LOGOUT_FAILURE_TOAST),
            };
            DomainUpdate::event(CrossDomainEvent::LoggedOut)
        }
    }
}
