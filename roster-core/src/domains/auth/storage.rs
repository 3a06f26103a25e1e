//! Session token persistence.
//!
//! The file store keeps a single JSON document next to the other
//! per-user application data. Tokens saved for a different API base URL are
//! treated as absent.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};
use directories::ProjectDirs;
use roster_model::AuthToken;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::StorageError;

pub(crate) const SESSION_FILE: &str = "session.json";

/// Platform data directory location of the session file.
pub fn default_session_file() -> Result<PathBuf, StorageError> {
    let dirs = ProjectDirs::from("", "roster", "rosterctl")
        .ok_or(StorageError::NoDataDir)?;
    Ok(dirs.data_dir().join(SESSION_FILE))
}

pub trait TokenStorage: Send + Sync + std::fmt::Debug {
    fn load(&self) -> Result<Option<AuthToken>, StorageError>;
    fn save(&self, token: &AuthToken) -> Result<(), StorageError>;
    fn clear(&self) -> Result<(), StorageError>;
}

#[derive(Debug, Serialize, Deserialize)]
struct StoredSession {
    token: AuthToken,
    server_url: String,
    stored_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct FileTokenStorage {
    path: PathBuf,
    server_url: String,
}

impl FileTokenStorage {
    pub fn new(path: impl Into<PathBuf>, server_url: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            server_url: server_url.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_atomically(&self, bytes: &[u8]) -> Result<(), StorageError> {
        let write_err = |source| StorageError::Write {
            path: self.path.clone(),
            source,
        };
        let dir = self
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(dir).map_err(write_err)?;

        let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(write_err)?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(tmp.path(), fs::Permissions::from_mode(0o600))
                .map_err(write_err)?;
        }
        tmp.write_all(bytes).map_err(write_err)?;
        tmp.as_file().sync_all().map_err(write_err)?;
        tmp.persist(&self.path)
            .map_err(|err| write_err(err.error))?;
        Ok(())
    }
}

impl TokenStorage for FileTokenStorage {
    fn load(&self) -> Result<Option<AuthToken>, StorageError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(None);
            }
            Err(source) => {
                return Err(StorageError::Read {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        let stored: StoredSession =
            serde_json::from_str(&raw).map_err(|source| {
                StorageError::Corrupted {
                    path: self.path.clone(),
                    source,
                }
            })?;

        if stored.server_url != self.server_url {
            warn!(
                stored = %stored.server_url,
                current = %self.server_url,
                "ignoring session saved for a different server"
            );
            return Ok(None);
        }
        if stored.token.is_blank() {
            return Ok(None);
        }

        debug!(stored_at = %stored.stored_at, "restored session token");
        Ok(Some(stored.token))
    }

    fn save(&self, token: &AuthToken) -> Result<(), StorageError> {
        let stored = StoredSession {
            token: token.clone(),
            server_url: self.server_url.clone(),
            stored_at: Utc::now(),
        };
        let json = serde_json::to_vec_pretty(&stored).map_err(|source| {
            StorageError::Corrupted {
                path: self.path.clone(),
                source,
            }
        })?;
        self.write_atomically(&json)
    }

    fn clear(&self) -> Result<(), StorageError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StorageError::Write {
                path: self.path.clone(),
                source,
            }),
        }
    }
}

/// In-process storage for tests.
#[derive(Debug, Default)]
pub struct MemoryTokenStorage {
    token: Mutex<Option<AuthToken>>,
}

impl MemoryTokenStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: AuthToken) -> Self {
        Self {
            token: Mutex::new(Some(token)),
        }
    }

    pub fn current(&self) -> Option<AuthToken> {
        self.slot().clone()
    }

    // A panic elsewhere while holding the lock leaves the value intact.
    fn slot(&self) -> MutexGuard<'_, Option<AuthToken>> {
        self.token.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl TokenStorage for MemoryTokenStorage {
    fn load(&self) -> Result<Option<AuthToken>, StorageError> {
        Ok(self.current())
    }

    fn save(&self, token: &AuthToken) -> Result<(), StorageError> {
        *self.slot() = Some(token.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        *self.slot() = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SERVER: &str = "https://reqres.in/";

    #[test]
    fn memory_storage_survives_poisoned_lock() {
        let storage = std::sync::Arc::new(MemoryTokenStorage::new());
        let poisoner = storage.clone();
        let _ = std::thread::spawn(move || {
            let _guard = poisoner.token.lock().unwrap();
            panic!("poison the lock");
        })
        .join();
        assert!(storage.token.is_poisoned());

        storage.save(&AuthToken::new("after-panic")).unwrap();
        assert_eq!(storage.load().unwrap().unwrap().expose(), "after-panic");
        storage.clear().unwrap();
        assert!(storage.current().is_none());
    }

    #[test]
    fn file_storage_round_trip_and_clear() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileTokenStorage::new(dir.path().join("nested/session.json"), SERVER);

        assert!(storage.load().unwrap().is_none());
        storage.save(&AuthToken::new("QpwL5tke4Pnpja7X4")).unwrap();
        assert_eq!(
            storage.load().unwrap().map(|t| t.expose().to_string()),
            Some("QpwL5tke4Pnpja7X4".to_string())
        );

        storage.clear().unwrap();
        assert!(storage.load().unwrap().is_none());
        // clearing twice is fine
        storage.clear().unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn session_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let storage = FileTokenStorage::new(dir.path().join("session.json"), SERVER);
        storage.save(&AuthToken::new("abc")).unwrap();
        let mode = fs::metadata(storage.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn token_for_other_server_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        FileTokenStorage::new(&path, "http://127.0.0.1:9000/")
            .save(&AuthToken::new("abc"))
            .unwrap();

        let storage = FileTokenStorage::new(&path, SERVER);
        assert!(storage.load().unwrap().is_none());
    }

    #[test]
    fn corrupted_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, "{not json").unwrap();
        let storage = FileTokenStorage::new(&path, SERVER);
        assert!(matches!(
            storage.load(),
            Err(StorageError::Corrupted { .. })
        ));
    }

    #[test]
    fn memory_storage_tracks_latest_token() {
        let storage = MemoryTokenStorage::new();
        storage.save(&AuthToken::new("one")).unwrap();
        storage.save(&AuthToken::new("two")).unwrap();
        assert_eq!(storage.current().unwrap().expose(), "two");
        storage.clear().unwrap();
        assert!(storage.load().unwrap().is_none());
    }
}
