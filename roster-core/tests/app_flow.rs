//! End-to-end update loop against the scripted services.

use std::sync::Arc;

use roster_core::common::messages::Effect;
use roster_core::domains::auth::messages::Message as AuthMessage;
use roster_core::domains::ui::FormField;
use roster_core::domains::ui::messages::UiMessage;
use roster_core::domains::users::messages::Message as UsersMessage;
use roster_core::infrastructure::testing::{
    RecordedCall, StubAuthService, StubUserAdminService, demo_page,
};
use roster_core::{
    ApiError, App, MemoryTokenStorage, RefreshPolicy, Route, Services,
    SessionStore,
};
use roster_model::{AuthToken, UserId};

struct Harness {
    app: App,
    services: Services,
    auth: StubAuthService,
    users: StubUserAdminService,
    storage: Arc<MemoryTokenStorage>,
}

impl Harness {
    fn new(storage: MemoryTokenStorage, policy: RefreshPolicy) -> Self {
        let storage = Arc::new(storage);
        let auth = StubAuthService::default();
        let users = StubUserAdminService::new();
        let services =
            Services::new(Arc::new(auth.clone()), Arc::new(users.clone()));
        let app = App::new(SessionStore::restore(storage.clone()), policy);
        Self {
            app,
            services,
            auth,
            users,
            storage,
        }
    }

    fn logged_out() -> Self {
        Self::new(MemoryTokenStorage::new(), RefreshPolicy::default())
    }

    async fn logged_in() -> Self {
        let mut h = Self::new(
            MemoryTokenStorage::with_token(AuthToken::new("QpwL5tke4Pnpja7X4")),
            RefreshPolicy::default(),
        );
        let effects = h.app.start();
        h.services.drain(&mut h.app, effects).await;
        h.users.clear_calls();
        h
    }

    async fn send(&mut self, message: impl Into<roster_core::DomainMessage>) {
        let effects = self.app.update(message);
        self.services.drain(&mut self.app, effects).await;
    }

    fn latest_toast(&self) -> Option<String> {
        self.app.toasts.latest().map(|t| t.message.clone())
    }
}

#[tokio::test]
async fn anonymous_start_stays_on_login_without_network() {
    let mut h = Harness::logged_out();
    let effects = h.app.start();
    assert!(effects.is_empty());
    assert_eq!(h.app.route, Route::Login);
    assert!(h.users.calls().is_empty());
}

#[tokio::test]
async fn login_stores_token_and_loads_first_page() {
    let mut h = Harness::logged_out();
    h.app.start();

    h.send(AuthMessage::Submit).await;

    let session = h.app.session.session();
    assert_eq!(session.token.unwrap().expose(), "QpwL5tke4Pnpja7X4");
    assert!(!session.loading);
    assert_eq!(h.app.route, Route::Users);
    assert_eq!(h.app.users.users(), demo_page(1).data.as_slice());
    assert_eq!(h.latest_toast().as_deref(), Some("Login successful! Welcome back."));
    assert_eq!(h.storage.current().unwrap().expose(), "QpwL5tke4Pnpja7X4");
    assert_eq!(
        h.auth.calls(),
        vec![RecordedCall::Login {
            email: "eve.holt@reqres.in".into()
        }]
    );
}

#[tokio::test]
async fn rejected_credentials_keep_user_on_login() {
    let mut h = Harness::logged_out();
    h.app.start();
    h.app.update(AuthMessage::PasswordChanged("wrong".into()));

    h.send(AuthMessage::Submit).await;

    let session = h.app.session.session();
    assert!(session.token.is_none());
    assert!(!session.loading);
    assert_eq!(session.error.as_deref(), Some("user not found"));
    assert_eq!(h.app.route, Route::Login);
    assert_eq!(h.latest_toast().as_deref(), Some("user not found"));
    assert!(h.users.calls().is_empty());
}

#[tokio::test]
async fn invalid_login_form_never_reaches_the_network() {
    let mut h = Harness::logged_out();
    h.app.update(AuthMessage::EmailChanged("not-an-email".into()));

    let effects = h.app.update(AuthMessage::Submit);

    assert!(effects.is_empty());
    assert_eq!(h.app.login.errors.field(FormField::Email), Some("Invalid email"));
    assert!(h.auth.calls().is_empty());
}

#[tokio::test]
async fn restored_session_fetches_on_start() {
    let h = Harness::logged_in().await;
    assert_eq!(h.app.route, Route::Users);
    assert_eq!(h.app.users.current_page(), 1);
    assert_eq!(h.app.users.users().len(), 6);
    assert!(!h.app.users.is_loading());
}

#[tokio::test]
async fn delete_waits_for_confirmation_then_refetches() {
    let mut h = Harness::logged_in().await;

    let effects = h.app.update(UiMessage::DeleteRequested(UserId(4)));
    assert!(effects.is_empty());
    assert!(h.app.view.delete.show);
    assert_eq!(h.app.view.delete.target_id, Some(UserId(4)));
    assert!(h.users.calls().is_empty());

    h.send(UiMessage::DeleteConfirmed).await;

    assert_eq!(
        h.users.calls(),
        vec![
            RecordedCall::DeleteUser { id: UserId(4) },
            RecordedCall::ListUsers { page: 1 },
        ]
    );
    assert!(!h.app.view.delete.show);
    assert_eq!(h.app.view.delete.target_id, None);
    assert_eq!(h.latest_toast().as_deref(), Some("User deleted successfully!"));
}

#[tokio::test]
async fn cancelled_delete_sends_nothing() {
    let mut h = Harness::logged_in().await;
    h.app.update(UiMessage::DeleteRequested(UserId(2)));
    h.send(UiMessage::DeleteCancelled).await;
    h.send(UiMessage::DeleteConfirmed).await;
    assert!(h.users.calls().is_empty());
}

#[tokio::test]
async fn failed_delete_reports_and_skips_refetch() {
    let mut h = Harness::logged_in().await;
    h.users.fail_delete_with(Some(ApiError::Status {
        status: 404,
        message: None,
    }));

    h.app.update(UiMessage::DeleteRequested(UserId(9)));
    h.send(UiMessage::DeleteConfirmed).await;

    assert_eq!(h.users.calls(), vec![RecordedCall::DeleteUser { id: UserId(9) }]);
    assert_eq!(h.latest_toast().as_deref(), Some("Failed to delete user."));
    assert_eq!(h.app.users.last_error(), Some("Failed to delete user"));
}

#[tokio::test]
async fn create_validates_then_submits_and_refetches() {
    let mut h = Harness::logged_in().await;
    h.app.update(UiMessage::OpenCreate);

    let effects = h.app.update(UiMessage::EditorSubmit);
    assert!(effects.is_empty());
    let editor = h.app.view.editor.as_ref().unwrap();
    assert_eq!(editor.title(), "Create New User");
    assert_eq!(editor.errors.errors.len(), 4);

    for (field, value) in [
        (FormField::FirstName, "Tobias"),
        (FormField::LastName, "Funke"),
        (FormField::Email, "tobias.funke@reqres.in"),
        (FormField::Avatar, "https://reqres.in/img/faces/9-image.jpg"),
    ] {
        h.app.update(UiMessage::EditorFieldChanged(field, value.into()));
    }
    h.send(UiMessage::EditorSubmit).await;

    assert_eq!(
        h.users.calls(),
        vec![
            RecordedCall::CreateUser {
                email: "tobias.funke@reqres.in".into()
            },
            RecordedCall::ListUsers { page: 1 },
        ]
    );
    assert!(h.app.view.editor.is_none());
    assert_eq!(h.latest_toast().as_deref(), Some("User created successfully!"));
}

#[tokio::test]
async fn edit_sends_full_name_and_keeps_modal_on_failure() {
    let mut h = Harness::logged_in().await;
    h.users.fail_update_with(Some(ApiError::Transport("reset".into())));

    h.app.update(UiMessage::OpenEdit(UserId(2)));
    h.app.update(UiMessage::EditorFieldChanged(FormField::LastName, "Smith".into()));
    h.send(UiMessage::EditorSubmit).await;

    assert_eq!(
        h.users.calls(),
        vec![RecordedCall::UpdateUser {
            id: UserId(2),
            name: "Janet Smith".into()
        }]
    );
    assert!(h.app.view.editor.is_some());
    assert_eq!(h.latest_toast().as_deref(), Some("Failed to save user."));
}

#[tokio::test]
async fn manual_policy_does_not_refetch_after_update() {
    let mut h = Harness::new(
        MemoryTokenStorage::with_token(AuthToken::new("abc")),
        RefreshPolicy::Manual,
    );
    let effects = h.app.start();
    h.services.drain(&mut h.app, effects).await;
    h.users.clear_calls();

    h.app.update(UiMessage::OpenEdit(UserId(1)));
    h.send(UiMessage::EditorSubmit).await;

    assert_eq!(h.users.calls().len(), 1);
    assert_eq!(h.latest_toast().as_deref(), Some("User updated successfully!"));
}

#[tokio::test]
async fn out_of_order_pages_keep_the_latest_request() {
    let mut h = Harness::logged_in().await;

    let to_two = h.app.update(UsersMessage::GoToPage(2));
    let to_one = h.app.update(UsersMessage::GoToPage(1));
    let (Some(Effect::FetchUsers(first)), Some(Effect::FetchUsers(second))) =
        (to_two.first().cloned(), to_one.first().cloned())
    else {
        panic!("expected fetch effects");
    };

    // newest response lands first, the older one straggles in afterwards
    h.app.update(UsersMessage::PageLoaded(second, Ok(demo_page(1))));
    h.app.update(UsersMessage::PageLoaded(first, Ok(demo_page(2))));

    assert_eq!(h.app.users.current_page(), 1);
    assert_eq!(h.app.users.users(), demo_page(1).data.as_slice());
    assert!(!h.app.users.is_loading());
}

#[tokio::test]
async fn search_filters_loaded_page_only() {
    let mut h = Harness::logged_in().await;
    h.app.update(UiMessage::SearchChanged("HOL".into()));
    let visible = h.app.view.visible(h.app.users.users());
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].full_name(), "Eve Holt");
    assert!(h.users.calls().is_empty());
}

#[tokio::test]
async fn logout_is_fail_open() {
    let mut h = Harness::logged_in().await;
    h.auth.fail_logout_with(ApiError::Status {
        status: 500,
        message: None,
    });

    h.send(AuthMessage::Logout).await;

    assert!(h.app.session.token().is_none());
    assert!(h.storage.current().is_none());
    assert_eq!(h.app.route, Route::Login);
    assert!(h.app.users.users().is_empty());
    assert_eq!(h.latest_toast().as_deref(), Some("Logout failed."));
}

#[tokio::test]
async fn logout_success_toasts_and_redirects() {
    let mut h = Harness::logged_in().await;
    h.send(AuthMessage::Logout).await;
    assert_eq!(h.app.route, Route::Login);
    assert_eq!(h.latest_toast().as_deref(), Some("Logged out successfully!"));
    assert!(h.app.session.error().is_none());
}

#[tokio::test]
async fn fetch_failure_surfaces_normalized_message() {
    let mut h = Harness::logged_in().await;
    h.users.fail_list_with(Some(ApiError::Status {
        status: 503,
        message: Some("Service unavailable".into()),
    }));

    h.send(UsersMessage::Refresh).await;

    assert_eq!(h.latest_toast().as_deref(), Some("Service unavailable"));
    // previous page still shown
    assert_eq!(h.app.users.users().len(), 6);
}

#[tokio::test]
async fn fetch_pending_across_logout_and_login_stays_stale() {
    let mut h = Harness::logged_in().await;
    h.send(UsersMessage::NextPage).await;
    assert_eq!(h.app.users.current_page(), 2);

    let pending = h.app.update(UsersMessage::Refresh);
    let [Effect::FetchUsers(ticket)] = pending.as_slice() else {
        panic!("expected a single fetch, got {pending:?}");
    };
    let ticket = *ticket;

    h.send(AuthMessage::Logout).await;
    assert_eq!(h.app.route, Route::Login);
    assert!(h.app.users.is_loading());

    h.send(AuthMessage::Submit).await;
    assert_eq!(h.app.route, Route::Users);
    assert_eq!(h.app.users.current_page(), 1);

    h.send(UsersMessage::PageLoaded(ticket, Ok(demo_page(2)))).await;

    assert_eq!(h.app.users.current_page(), 1);
    assert_eq!(h.app.users.users(), demo_page(1).data.as_slice());
    assert!(!h.app.users.is_loading());
}

#[tokio::test]
async fn mutation_finishing_after_logout_does_not_refetch() {
    let mut h = Harness::logged_in().await;
    h.app.update(UiMessage::DeleteRequested(UserId(4)));
    let pending = h.app.update(UiMessage::DeleteConfirmed);
    assert!(matches!(pending.as_slice(), [Effect::DeleteUser(_)]));

    h.send(AuthMessage::Logout).await;
    h.send(UsersMessage::UserDeleted(UserId(4), Ok(()))).await;

    assert_eq!(h.app.route, Route::Login);
    assert!(h.users.calls().is_empty());
    assert!(!h.app.users.is_loading());
    assert_eq!(h.latest_toast().as_deref(), Some("Logged out successfully!"));
}
