//! Mutation payloads and the echoes the demo API sends back for them.
//!
//! The remote service never persists writes, so none of the response types
//! here are treated as the new truth for the collection.

use crate::ids::UserId;
use chrono::{DateTime, Utc};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// `POST /api/register` body used to create a user.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
pub struct RegisterResponse {
    #[cfg_attr(feature = "serde", serde(default))]
    pub id: Option<UserId>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub token: Option<String>,
}

/// `PUT /api/users/{id}` body.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct UpdateUserRequest {
    pub name: String,
    pub job: String,
    #[cfg_attr(
        feature = "serde",
        serde(skip_serializing_if = "Option::is_none")
    )]
    pub email: Option<String>,
    #[cfg_attr(
        feature = "serde",
        serde(skip_serializing_if = "Option::is_none")
    )]
    pub avatar: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
pub struct UpdateUserResponse {
    #[cfg_attr(feature = "serde", serde(default))]
    pub name: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub job: Option<String>,
    #[cfg_attr(
        feature = "serde",
        serde(default, rename = "updatedAt")
    )]
    pub updated_at: Option<DateTime<Utc>>,
}

#[cfg(all(test, feature = "serde"))]
mod tests {
    use super::*;

    #[test]
    fn update_request_omits_unset_optionals() {
        let body = UpdateUserRequest {
            name: "Eve Holt".into(),
            job: "Developer".into(),
            email: None,
            avatar: None,
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            serde_json::json!({"name": "Eve Holt", "job": "Developer"})
        );
    }

    #[test]
    fn update_echo_parses_timestamp() {
        let echo: UpdateUserResponse = serde_json::from_str(
            r#"{"name":"morpheus","job":"zion resident","updatedAt":"2025-10-16T09:12:51.127Z"}"#,
        )
        .unwrap();
        assert_eq!(echo.job.as_deref(), Some("zion resident"));
        assert!(echo.updated_at.is_some());
    }

    #[test]
    fn register_echo_tolerates_missing_fields() {
        let echo: RegisterResponse =
            serde_json::from_str(r#"{"id":4,"token":"QpwL5tke4Pnpja7X4"}"#)
                .unwrap();
        assert_eq!(echo.id, Some(UserId(4)));
        let empty: RegisterResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(empty.id, None);
    }
}
