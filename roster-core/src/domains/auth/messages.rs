use roster_model::AuthToken;

use crate::error::ApiResult;

#[derive(Clone)]
pub enum Message {
    EmailChanged(String),
    PasswordChanged(String),
    ToggleField,
    Submit,
    LoginCompleted(ApiResult<AuthToken>),
    Logout,
    LogoutCompleted(ApiResult<()>),
}

impl Message {
    pub fn name(&self) -> &'static str {
        match self {
            Self::EmailChanged(_) => "Auth::EmailChanged",
            Self::PasswordChanged(_) => "Auth::PasswordChanged",
            Self::ToggleField => "Auth::ToggleField",
            Self::Submit => "Auth::Submit",
            Self::LoginCompleted(_) => "Auth::LoginCompleted",
            Self::Logout => "Auth::Logout",
            Self::LogoutCompleted(_) => "Auth::LogoutCompleted",
        }
    }
}

// Credentials never show up in logs.
impl std::fmt::Debug for Message {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmailChanged(email) => write!(f, "Auth::EmailChanged({email})"),
            Self::PasswordChanged(_) => write!(f, "Auth::PasswordChanged(***)"),
            Self::LoginCompleted(Ok(_)) => write!(f, "Auth::LoginCompleted(Ok(***))"),
            Self::LoginCompleted(Err(err)) => {
                write!(f, "Auth::LoginCompleted(Err({err:?}))")
            }
            Self::LogoutCompleted(result) => {
                write!(f, "Auth::LogoutCompleted({result:?})")
            }
            other => f.write_str(other.name()),
        }
    }
}
