use std::sync::Arc;

use async_trait::async_trait;
use roster_model::{AuthToken, LoginRequest, LoginResponse};
use tracing::debug;

use crate::api::v1;
use crate::error::{ApiError, ApiResult};
use crate::infrastructure::api_client::ApiClient;

#[async_trait]
pub trait AuthService: Send + Sync {
    /// Exchange credentials for a session token.
    async fn login(&self, credentials: &LoginRequest) -> ApiResult<AuthToken>;

    /// End the session on the server side.
    async fn logout(&self) -> ApiResult<()>;
}

#[derive(Debug, Clone)]
pub struct AuthApiAdapter {
    client: Arc<ApiClient>,
}

impl AuthApiAdapter {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AuthService for AuthApiAdapter {
    async fn login(&self, credentials: &LoginRequest) -> ApiResult<AuthToken> {
        debug!(email = %credentials.email, "posting login");
        let response: LoginResponse =
            self.client.post(v1::auth::LOGIN, credentials).await?;
        if response.token.is_blank() {
            return Err(ApiError::Decode("login response carried an empty token".into()));
        }
        Ok(response.token)
    }

    async fn logout(&self) -> ApiResult<()> {
        self.client
            .post_discarding(v1::auth::LOGOUT, &serde_json::json!({}))
            .await
    }
}
