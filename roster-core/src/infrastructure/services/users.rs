use std::sync::Arc;

use async_trait::async_trait;
use roster_model::{
    RegisterRequest, RegisterResponse, UpdateUserRequest, UpdateUserResponse,
    UserId, UserPage,
};

use crate::api::{routes::utils, v1};
use crate::error::ApiResult;
use crate::infrastructure::api_client::ApiClient;

#[async_trait]
pub trait UserAdminService: Send + Sync {
    async fn list_users(&self, page: u32) -> ApiResult<UserPage>;
    async fn create_user(
        &self,
        request: &RegisterRequest,
    ) -> ApiResult<RegisterResponse>;
    async fn update_user(
        &self,
        user_id: UserId,
        request: &UpdateUserRequest,
    ) -> ApiResult<UpdateUserResponse>;
    async fn delete_user(&self, user_id: UserId) -> ApiResult<()>;
}

#[derive(Debug, Clone)]
pub struct UserAdminApiAdapter {
    client: Arc<ApiClient>,
}

impl UserAdminApiAdapter {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    fn item_path(user_id: UserId) -> String {
        utils::replace_param(v1::users::ITEM, "{id}", user_id.to_string())
    }
}

#[async_trait]
impl UserAdminService for UserAdminApiAdapter {
    async fn list_users(&self, page: u32) -> ApiResult<UserPage> {
        self.client
            .get(v1::users::COLLECTION, &[("page", page.to_string())])
            .await
    }

    async fn create_user(
        &self,
        request: &RegisterRequest,
    ) -> ApiResult<RegisterResponse> {
        self.client.post(v1::auth::REGISTER, request).await
    }

    async fn update_user(
        &self,
        user_id: UserId,
        request: &UpdateUserRequest,
    ) -> ApiResult<UpdateUserResponse> {
        self.client.put(&Self::item_path(user_id), request).await
    }

    async fn delete_user(&self, user_id: UserId) -> ApiResult<()> {
        self.client.delete(&Self::item_path(user_id)).await
    }
}
