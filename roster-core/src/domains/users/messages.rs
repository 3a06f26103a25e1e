use roster_model::{RegisterResponse, UpdateUserResponse, UserId, UserPage};

use crate::error::ApiResult;

use super::store::FetchTicket;

#[derive(Debug, Clone)]
pub enum Message {
    Refresh,
    GoToPage(u32),
    NextPage,
    PreviousPage,
    PageLoaded(FetchTicket, ApiResult<UserPage>),
    UserCreated(ApiResult<RegisterResponse>),
    UserUpdated(UserId, ApiResult<UpdateUserResponse>),
    UserDeleted(UserId, ApiResult<()>),
}

impl Message {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Refresh => "Users::Refresh",
            Self::GoToPage(_) => "Users::GoToPage",
            Self::NextPage => "Users::NextPage",
            Self::PreviousPage => "Users::PreviousPage",
            Self::PageLoaded(..) => "Users::PageLoaded",
            Self::UserCreated(_) => "Users::UserCreated",
            Self::UserUpdated(..) => "Users::UserUpdated",
            Self::UserDeleted(..) => "Users::UserDeleted",
        }
    }
}
