pub mod commands;
pub mod output;
pub mod theme;
pub mod tui;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context as _, Result};
use directories::ProjectDirs;
use roster_core::{
    ApiClient, App, ClientConfig, ConfigOverrides, FileTokenStorage,
    RefreshPolicy, Services, SessionStore, TokenStorage,
};

const LOG_FILE: &str = "rosterctl.log";

/// Log file location when `--log-file` is not given.
pub fn default_log_file() -> PathBuf {
    ProjectDirs::from("", "roster", "rosterctl")
        .map(|dirs| dirs.data_dir().join(LOG_FILE))
        .unwrap_or_else(|| std::env::temp_dir().join(LOG_FILE))
}

/// Everything a command needs: resolved configuration, the persisted
/// session and the live services.
pub struct Context {
    pub config: ClientConfig,
    pub session_path: PathBuf,
    pub storage: Arc<dyn TokenStorage>,
    pub services: Services,
    pub policy: RefreshPolicy,
}

impl Context {
    pub fn load(overrides: ConfigOverrides, policy: RefreshPolicy) -> Result<Self> {
        let config =
            ClientConfig::from_env(overrides).context("invalid configuration")?;
        let session_path = config
            .session_path()
            .context("unable to locate the session file")?;
        let storage: Arc<dyn TokenStorage> = Arc::new(FileTokenStorage::new(
            session_path.clone(),
            config.base_url.as_str(),
        ));
        let client =
            ApiClient::from_config(&config).context("failed to build HTTP client")?;

        Ok(Self {
            config,
            session_path,
            storage,
            services: Services::from_client(client),
            policy,
        })
    }

    pub fn session(&self) -> SessionStore {
        SessionStore::restore(self.storage.clone())
    }

    pub fn app(&self) -> App {
        App::new(self.session(), self.policy).with_api_host(self.config.api_host())
    }
}
