//! Client configuration resolved from the environment and CLI overrides.
//!
//! Precedence: explicit overrides, then process environment (after loading a
//! `.env` file when present), then built-in defaults.

use std::path::PathBuf;

use tracing::debug;
use url::Url;

use crate::domains::auth::storage::default_session_file;
use crate::error::{ConfigError, StorageError};

pub const DEFAULT_BASE_URL: &str = "https://reqres.in";
pub const DEFAULT_API_KEY: &str = "reqres-free-v1";

pub const ENV_API_URL: &str = "ROSTER_API_URL";
pub const ENV_API_KEY: &str = "ROSTER_API_KEY";
pub const ENV_SESSION_FILE: &str = "ROSTER_SESSION_FILE";

/// Values supplied on the command line. `None` defers to the environment.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub api_url: Option<String>,
    pub api_key: Option<String>,
    pub session_file: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: Url,
    pub api_key: String,
    /// Explicit session file; `None` means the platform data directory.
    pub session_file: Option<PathBuf>,
}

impl ClientConfig {
    /// Load `.env` (if any) and resolve against the process environment.
    pub fn from_env(overrides: ConfigOverrides) -> Result<Self, ConfigError> {
        if let Ok(path) = dotenvy::dotenv() {
            debug!(path = %path.display(), "loaded .env");
        }
        Self::resolve(overrides, |name| std::env::var(name).ok())
    }

    /// Resolve with an arbitrary variable lookup.
    pub fn resolve(
        overrides: ConfigOverrides,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let non_blank = |name: &str| {
            lookup(name).filter(|value| !value.trim().is_empty())
        };

        let raw_url = overrides
            .api_url
            .or_else(|| non_blank(ENV_API_URL))
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let base_url = parse_base_url(&raw_url)?;

        let api_key = match overrides.api_key {
            Some(key) => key,
            None => non_blank(ENV_API_KEY)
                .unwrap_or_else(|| DEFAULT_API_KEY.to_string()),
        };
        if api_key.trim().is_empty() {
            return Err(ConfigError::MissingApiKey);
        }

        let session_file = overrides
            .session_file
            .or_else(|| non_blank(ENV_SESSION_FILE).map(PathBuf::from));

        Ok(Self {
            base_url,
            api_key: api_key.trim().to_string(),
            session_file,
        })
    }

    /// Session file to use, falling back to the platform data directory.
    pub fn session_path(&self) -> Result<PathBuf, StorageError> {
        match &self.session_file {
            Some(path) => Ok(path.clone()),
            None => default_session_file(),
        }
    }

    /// Host (and port, if non-default) shown in the console's top bar.
    pub fn api_host(&self) -> String {
        match (self.base_url.host_str(), self.base_url.port()) {
            (Some(host), Some(port)) => format!("{host}:{port}"),
            (Some(host), None) => host.to_string(),
            _ => self.base_url.to_string(),
        }
    }
}

fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw.trim()).map_err(|source| ConfigError::InvalidUrl {
        value: raw.to_string(),
        source,
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ConfigError::UnsupportedScheme(other.to_string())),
    }
}
