//! Routes and the access guard.
//!
//! Access is derived from token presence alone; the token is never
//! re-validated against the server.

use crate::domains::auth::Session;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    Users,
}

impl Route {
    /// Map a path to a route. `/` lands on the users page (and from there,
    /// through the guard, on login when there is no session).
    pub fn from_path(path: &str) -> Option<Self> {
        match path.trim_end_matches('/') {
            "" | "/users" => Some(Self::Users),
            "/login" => Some(Self::Login),
            _ => None,
        }
    }

    pub fn path(self) -> &'static str {
        match self {
            Self::Login => "/login",
            Self::Users => "/users",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessState {
    Authenticated,
    Unauthenticated,
}

impl AccessState {
    pub fn of(session: &Session) -> Self {
        if session.is_authenticated() {
            Self::Authenticated
        } else {
            Self::Unauthenticated
        }
    }
}

/// Where a request for `requested` actually lands.
pub fn guard(requested: Route, access: AccessState) -> Route {
    match (requested, access) {
        (Route::Users, AccessState::Unauthenticated) => Route::Login,
        (Route::Login, AccessState::Authenticated) => Route::Users,
        (route, _) => route,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roster_model::AuthToken;

    #[test]
    fn users_requires_a_token() {
        let anonymous = AccessState::of(&Session::default());
        assert_eq!(guard(Route::Users, anonymous), Route::Login);
        assert_eq!(guard(Route::Login, anonymous), Route::Login);
    }

    #[test]
    fn login_redirects_once_authenticated() {
        let session = Session {
            token: Some(AuthToken::new("abc")),
            ..Default::default()
        };
        let access = AccessState::of(&session);
        assert_eq!(access, AccessState::Authenticated);
        assert_eq!(guard(Route::Login, access), Route::Users);
        assert_eq!(guard(Route::Users, access), Route::Users);
    }

    #[test]
    fn paths_map_to_routes() {
        assert_eq!(Route::from_path("/"), Some(Route::Users));
        assert_eq!(Route::from_path("/users"), Some(Route::Users));
        assert_eq!(Route::from_path("/login/"), Some(Route::Login));
        assert_eq!(Route::from_path("/admin"), None);
        assert_eq!(Route::Users.path(), "/users");
    }
}
