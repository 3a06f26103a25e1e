//! Login and user forms with client-side validation.
//!
//! Validation failures are reported per field and block submission; they
//! never reach the network layer.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use rand::Rng;
use regex::Regex;
use roster_model::{LoginRequest, RegisterRequest, UpdateUserRequest, User};
use thiserror::Error;
use url::Url;

pub const DEMO_EMAIL: &str = "eve.holt@reqres.in";
pub const DEMO_PASSWORD: &str = "cityslicka";

/// Job title sent with every update; the console has no field for it.
pub const DEFAULT_JOB: &str = "Developer";

pub const GENERATED_PASSWORD_LEN: usize = 12;
const PASSWORD_CHARSET: &[u8] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789!@#$%^&*";

static EMAIL_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").ok());

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FormField {
    FirstName,
    LastName,
    Email,
    Avatar,
    Password,
}

impl FormField {
    pub fn label(self) -> &'static str {
        match self {
            Self::FirstName => "First Name",
            Self::LastName => "Last Name",
            Self::Email => "Email",
            Self::Avatar => "Profile Image Link",
            Self::Password => "Password",
        }
    }
}

/// Per-field validation messages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Error)]
#[error("{} field(s) failed validation", .errors.len())]
pub struct ValidationError {
    pub errors: BTreeMap<FormField, String>,
}

impl ValidationError {
    pub fn field(&self, field: FormField) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    fn into_result(self) -> Result<(), ValidationError> {
        if self.errors.is_empty() { Ok(()) } else { Err(self) }
    }
}

pub fn is_valid_email(value: &str) -> bool {
    EMAIL_PATTERN
        .as_ref()
        .is_some_and(|re| re.is_match(value.trim()))
}

pub fn is_valid_url(value: &str) -> bool {
    Url::parse(value.trim())
        .map(|url| url.has_host() && matches!(url.scheme(), "http" | "https"))
        .unwrap_or(false)
}

fn check_email(errors: &mut BTreeMap<FormField, String>, value: &str) {
    if value.trim().is_empty() {
        errors.insert(FormField::Email, "Email is required".into());
    } else if !is_valid_email(value) {
        errors.insert(FormField::Email, "Invalid email".into());
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for LoginForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginForm")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl Default for LoginForm {
    /// Prefilled with the demo API's known account.
    fn default() -> Self {
        Self {
            email: DEMO_EMAIL.to_string(),
            password: DEMO_PASSWORD.to_string(),
        }
    }
}

impl LoginForm {
    pub fn validate(&self) -> Result<LoginRequest, ValidationError> {
        let mut errors = BTreeMap::new();
        check_email(&mut errors, &self.email);
        if self.password.is_empty() {
            errors.insert(FormField::Password, "Password is required".into());
        }
        ValidationError { errors }.into_result()?;
        Ok(LoginRequest::new(self.email.trim(), self.password.clone()))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub avatar: String,
}

impl UserForm {
    pub fn from_user(user: &User) -> Self {
        Self {
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            email: user.email.clone(),
            avatar: user.avatar.clone(),
        }
    }

    pub fn value(&self, field: FormField) -> &str {
        match field {
            FormField::FirstName => &self.first_name,
            FormField::LastName => &self.last_name,
            FormField::Email => &self.email,
            FormField::Avatar => &self.avatar,
            FormField::Password => "",
        }
    }

    pub fn value_mut(&mut self, field: FormField) -> Option<&mut String> {
        match field {
            FormField::FirstName => Some(&mut self.first_name),
            FormField::LastName => Some(&mut self.last_name),
            FormField::Email => Some(&mut self.email),
            FormField::Avatar => Some(&mut self.avatar),
            FormField::Password => None,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut errors = BTreeMap::new();
        if self.first_name.trim().is_empty() {
            errors.insert(FormField::FirstName, "First name is required".into());
        }
        if self.last_name.trim().is_empty() {
            errors.insert(FormField::LastName, "Last name is required".into());
        }
        check_email(&mut errors, &self.email);
        if self.avatar.trim().is_empty() {
            errors.insert(FormField::Avatar, "Profile image link is required".into());
        } else if !is_valid_url(&self.avatar) {
            errors.insert(FormField::Avatar, "Must be a valid URL".into());
        }
        ValidationError { errors }.into_result()
    }

    /// `PUT /api/users/{id}` body; the name is sent as "first last".
    pub fn update_request(&self) -> Result<UpdateUserRequest, ValidationError> {
        self.validate()?;
        Ok(UpdateUserRequest {
            name: format!("{} {}", self.first_name.trim(), self.last_name.trim()),
            job: DEFAULT_JOB.to_string(),
            email: Some(self.email.trim().to_string()),
            avatar: Some(self.avatar.trim().to_string()),
        })
    }

    /// `POST /api/register` body with a freshly generated password.
    pub fn register_request(
        &self,
        rng: &mut impl Rng,
    ) -> Result<RegisterRequest, ValidationError> {
        self.validate()?;
        Ok(RegisterRequest {
            email: self.email.trim().to_string(),
            password: generate_password(rng),
        })
    }
}

pub fn generate_password(rng: &mut impl Rng) -> String {
    (0..GENERATED_PASSWORD_LEN)
        .map(|_| PASSWORD_CHARSET[rng.random_range(0..PASSWORD_CHARSET.len())] as char)
        .collect()
}
