use std::time::Instant;

use tracing::{debug, warn};

use crate::app::App;
use crate::common::messages::{DomainUpdate, Effect};
use crate::domains::ui::messages::UiMessage;
use crate::domains::ui::view::{EditorMode, UserEditor};
use crate::domains::users::store::MutationKind;

/// Handle view-layer messages
pub fn update_ui(app: &mut App, message: UiMessage) -> DomainUpdate {
    debug!(message = message.name(), "ui update");

    match message {
        UiMessage::ToggleViewMode => {
            app.view.mode = app.view.mode.toggled();
            DomainUpdate::none()
        }
        UiMessage::SearchChanged(query) => {
            app.view.search = query;
            app.view.clamp_selection(app.users.users());
            DomainUpdate::none()
        }
        UiMessage::SelectNext => {
            app.view.move_selection(app.users.users(), 1);
            DomainUpdate::none()
        }
        UiMessage::SelectPrevious => {
            app.view.move_selection(app.users.users(), -1);
            DomainUpdate::none()
        }
        UiMessage::OpenCreate => {
            app.view.editor = Some(UserEditor::create());
            DomainUpdate::none()
        }
        UiMessage::OpenEdit(user_id) => {
            match app.users.user(user_id) {
                Some(user) => app.view.editor = Some(UserEditor::edit(user)),
                None => warn!(%user_id, "edit requested for a user not on this page"),
            }
            DomainUpdate::none()
        }
        UiMessage::EditorFieldChanged(field, value) => {
            if let Some(editor) = app.view.editor.as_mut()
                && let Some(slot) = editor.form.value_mut(field)
            {
                *slot = value;
                editor.errors.errors.remove(&field);
            }
            DomainUpdate::none()
        }
        UiMessage::EditorFocusNext => {
            if let Some(editor) = app.view.editor.as_mut() {
                editor.focus_next();
            }
            DomainUpdate::none()
        }
        UiMessage::EditorFocusPrevious => {
            if let Some(editor) = app.view.editor.as_mut() {
                editor.focus_previous();
            }
            DomainUpdate::none()
        }
        UiMessage::EditorSubmit => submit_editor(app),
        UiMessage::EditorCancel => {
            app.view.editor = None;
            DomainUpdate::none()
        }
        UiMessage::DeleteRequested(user_id) => {
            app.view.delete.request(user_id);
            DomainUpdate::none()
        }
        UiMessage::DeleteConfirmed => {
            // The dialog stays up until the delete resolves.
            if app.users.is_loading() || !app.view.delete.show {
                return DomainUpdate::none();
            }
            match app.view.delete.target_id {
                Some(user_id) => {
                    app.users.begin_mutation(MutationKind::Delete);
                    DomainUpdate::effect(Effect::DeleteUser(user_id))
                }
                None => {
                    app.view.delete.cancel();
                    DomainUpdate::none()
                }
            }
        }
        UiMessage::DeleteCancelled => {
            app.view.delete.cancel();
            DomainUpdate::none()
        }
        UiMessage::DismissToast(id) => {
            app.toasts.dismiss(id);
            DomainUpdate::none()
        }
        UiMessage::Tick => {
            app.toasts.prune(Instant::now());
            DomainUpdate::none()
        }
    }
}

fn submit_editor(app: &mut App) -> DomainUpdate {
    if app.users.is_loading() {
        return DomainUpdate::none();
    }
    let Some(editor) = app.view.editor.as_mut() else {
        return DomainUpdate::none();
    };

    let effect = match editor.mode {
        EditorMode::Create => editor
            .form
            .register_request(&mut rand::rng())
            .map(Effect::CreateUser),
        EditorMode::Edit(user_id) => editor
            .form
            .update_request()
            .map(|request| Effect::UpdateUser(user_id, request)),
    };

    match effect {
        Ok(effect) => {
            editor.errors = Default::default();
            let kind = match editor.mode {
                EditorMode::Create => MutationKind::Create,
                EditorMode::Edit(_) => MutationKind::Update,
            };
            app.users.begin_mutation(kind);
            DomainUpdate::effect(effect)
        }
        Err(errors) => {
            editor.errors = errors;
            DomainUpdate::none()
        }
    }
}
