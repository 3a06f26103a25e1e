use zeroize::{Zeroize, ZeroizeOnDrop};

/// Bearer of an authenticated session as issued by `POST /api/login`.
///
/// `Debug` is redacted; use [`AuthToken::expose`] when the raw value is
/// genuinely needed (persisting it, sending it).
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct AuthToken(String);

impl AuthToken {
    pub fn new(raw: impl Into<String>) -> Self {
        AuthToken(raw.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl std::fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("AuthToken").field(&"<redacted>").finish()
    }
}

/// Credentials posted to the login endpoint.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// `POST /api/login` success body.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
pub struct LoginResponse {
    pub token: AuthToken,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_output_never_contains_secrets() {
        let token = AuthToken::new("QpwL5tke4Pnpja7X4");
        let creds = LoginRequest::new("eve.holt@reqres.in", "cityslicka");
        assert!(!format!("{token:?}").contains("QpwL5tke4Pnpja7X4"));
        let rendered = format!("{creds:?}");
        assert!(rendered.contains("eve.holt@reqres.in"));
        assert!(!rendered.contains("cityslicka"));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn token_round_trips_as_plain_string() {
        let body: LoginResponse =
            serde_json::from_str(r#"{"token":"QpwL5tke4Pnpja7X4"}"#).unwrap();
        assert_eq!(body.token.expose(), "QpwL5tke4Pnpja7X4");
        assert_eq!(
            serde_json::to_string(&body.token).unwrap(),
            r#""QpwL5tke4Pnpja7X4""#
        );
    }
}
