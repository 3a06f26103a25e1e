use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use roster_model::{
    AuthToken, LoginRequest, RegisterRequest, RegisterResponse,
    UpdateUserRequest, UpdateUserResponse, User, UserId, UserPage,
};

use crate::error::{ApiError, ApiResult};
use crate::infrastructure::services::{AuthService, UserAdminService};

pub const DEMO_PER_PAGE: u32 = 6;

/// Every call the stubs receive, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedCall {
    Login { email: String },
    Logout,
    ListUsers { page: u32 },
    CreateUser { email: String },
    UpdateUser { id: UserId, name: String },
    DeleteUser { id: UserId },
}

fn demo_user(id: u64, first: &str, last: &str) -> User {
    User {
        id: UserId(id),
        email: format!(
            "{}.{}@reqres.in",
            first.to_lowercase(),
            last.to_lowercase()
        ),
        first_name: first.to_string(),
        last_name: last.to_string(),
        avatar: format!("https://reqres.in/img/faces/{id}-image.jpg"),
    }
}

/// The twelve users the demo API serves, in server order.
pub fn demo_users() -> Vec<User> {
    vec![
        demo_user(1, "George", "Bluth"),
        demo_user(2, "Janet", "Weaver"),
        demo_user(3, "Emma", "Wong"),
        demo_user(4, "Eve", "Holt"),
        demo_user(5, "Charles", "Morris"),
        demo_user(6, "Tracey", "Ramos"),
        demo_user(7, "Michael", "Lawson"),
        demo_user(8, "Lindsay", "Ferguson"),
        demo_user(9, "Tobias", "Funke"),
        demo_user(10, "Byron", "Fields"),
        demo_user(11, "George", "Edwards"),
        demo_user(12, "Rachel", "Howell"),
    ]
}

/// Slice `demo_users()` the way the server paginates it.
pub fn demo_page(page: u32) -> UserPage {
    let users = demo_users();
    let total = users.len() as u32;
    let total_pages = total.div_ceil(DEMO_PER_PAGE);
    let start = (page.saturating_sub(1) * DEMO_PER_PAGE) as usize;
    let data = users
        .into_iter()
        .skip(start)
        .take(DEMO_PER_PAGE as usize)
        .collect();
    UserPage {
        data,
        page,
        per_page: DEMO_PER_PAGE,
        total,
        total_pages,
    }
}

fn rejected(status: u16, message: &str) -> ApiError {
    ApiError::Status {
        status,
        message: Some(message.to_string()),
    }
}

#[derive(Debug)]
struct AuthScript {
    accepted: HashMap<String, String>,
    token: String,
    logout_failure: Option<ApiError>,
}

/// Auth stub mirroring the demo API: only known email/password pairs log in.
#[derive(Debug, Clone)]
pub struct StubAuthService {
    script: Arc<Mutex<AuthScript>>,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl Default for StubAuthService {
    fn default() -> Self {
        Self::new("QpwL5tke4Pnpja7X4")
    }
}

impl StubAuthService {
    pub fn new(token: impl Into<String>) -> Self {
        let mut accepted = HashMap::new();
        accepted.insert("eve.holt@reqres.in".to_string(), "cityslicka".to_string());
        Self {
            script: Arc::new(Mutex::new(AuthScript {
                accepted,
                token: token.into(),
                logout_failure: None,
            })),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn fail_logout_with(&self, error: ApiError) {
        if let Ok(mut script) = self.script.lock() {
            script.logout_failure = Some(error);
        }
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    fn record(&self, call: RecordedCall) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call);
        }
    }
}

#[async_trait]
impl AuthService for StubAuthService {
    async fn login(&self, credentials: &LoginRequest) -> ApiResult<AuthToken> {
        self.record(RecordedCall::Login {
            email: credentials.email.clone(),
        });
        let script = self
            .script
            .lock()
            .map_err(|_| ApiError::Transport("stub poisoned".into()))?;
        if credentials.password.is_empty() {
            return Err(rejected(400, "Missing password"));
        }
        match script.accepted.get(&credentials.email) {
            Some(password) if *password == credentials.password => {
                Ok(AuthToken::new(script.token.clone()))
            }
            _ => Err(rejected(400, "user not found")),
        }
    }

    async fn logout(&self) -> ApiResult<()> {
        self.record(RecordedCall::Logout);
        let script = self
            .script
            .lock()
            .map_err(|_| ApiError::Transport("stub poisoned".into()))?;
        match &script.logout_failure {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }
}

#[derive(Debug, Default)]
struct UsersScript {
    list_failure: Option<ApiError>,
    create_failure: Option<ApiError>,
    update_failure: Option<ApiError>,
    delete_failure: Option<ApiError>,
}

/// User-collection stub serving [`demo_page`]s. Like the real service it
/// never persists mutations.
#[derive(Debug, Clone, Default)]
pub struct StubUserAdminService {
    script: Arc<Mutex<UsersScript>>,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl StubUserAdminService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_list_with(&self, error: Option<ApiError>) {
        if let Ok(mut script) = self.script.lock() {
            script.list_failure = error;
        }
    }

    pub fn fail_create_with(&self, error: Option<ApiError>) {
        if let Ok(mut script) = self.script.lock() {
            script.create_failure = error;
        }
    }

    pub fn fail_update_with(&self, error: Option<ApiError>) {
        if let Ok(mut script) = self.script.lock() {
            script.update_failure = error;
        }
    }

    pub fn fail_delete_with(&self, error: Option<ApiError>) {
        if let Ok(mut script) = self.script.lock() {
            script.delete_failure = error;
        }
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    pub fn clear_calls(&self) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.clear();
        }
    }

    fn record(&self, call: RecordedCall) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call);
        }
    }

    fn scripted_failure(
        &self,
        pick: impl Fn(&UsersScript) -> Option<ApiError>,
    ) -> Option<ApiError> {
        self.script.lock().ok().and_then(|script| pick(&script))
    }
}

#[async_trait]
impl UserAdminService for StubUserAdminService {
    async fn list_users(&self, page: u32) -> ApiResult<UserPage> {
        self.record(RecordedCall::ListUsers { page });
        match self.scripted_failure(|s| s.list_failure.clone()) {
            Some(error) => Err(error),
            None => Ok(demo_page(page)),
        }
    }

    async fn create_user(
        &self,
        request: &RegisterRequest,
    ) -> ApiResult<RegisterResponse> {
        self.record(RecordedCall::CreateUser {
            email: request.email.clone(),
        });
        match self.scripted_failure(|s| s.create_failure.clone()) {
            Some(error) => Err(error),
            None => Ok(RegisterResponse {
                id: Some(UserId(4)),
                token: Some("QpwL5tke4Pnpja7X4".into()),
            }),
        }
    }

    async fn update_user(
        &self,
        user_id: UserId,
        request: &UpdateUserRequest,
    ) -> ApiResult<UpdateUserResponse> {
        self.record(RecordedCall::UpdateUser {
            id: user_id,
            name: request.name.clone(),
        });
        match self.scripted_failure(|s| s.update_failure.clone()) {
            Some(error) => Err(error),
            None => Ok(UpdateUserResponse {
                name: Some(request.name.clone()),
                job: Some(request.job.clone()),
                updated_at: Some(chrono::Utc::now()),
            }),
        }
    }

    async fn delete_user(&self, user_id: UserId) -> ApiResult<()> {
        self.record(RecordedCall::DeleteUser { id: user_id });
        match self.scripted_failure(|s| s.delete_failure.clone()) {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}
