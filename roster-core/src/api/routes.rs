macro_rules! api_path {
    ($path:literal) => {
        concat!("/api", $path)
    };
}

/// Route definitions of the remote demo API
pub mod v1 {
    pub const ROOT: &str = "/api";

    /// Header carrying the fixed API key on every request.
    pub const API_KEY_HEADER: &str = "x-api-key";

    pub mod auth {
        pub const LOGIN: &str = api_path!("/login");
        pub const LOGOUT: &str = api_path!("/logout");
        pub const REGISTER: &str = api_path!("/register");
    }

    pub mod users {
        pub const COLLECTION: &str = api_path!("/users");
        pub const ITEM: &str = api_path!("/users/{id}");
    }
}

pub mod utils {
    /// Substitute a `{name}` placeholder in a route template.
    pub fn replace_param(
        template: &str,
        placeholder: &str,
        value: impl AsRef<str>,
    ) -> String {
        template.replace(placeholder, value.as_ref())
    }
}
