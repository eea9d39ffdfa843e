//! Persisted bearer token and user profile.
//!
//! The store is read once when it is opened and then served from memory;
//! writes go to both memory and disk. Only login, register, logout, and a
//! failed profile restore ever write.

use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use bikeshop_core::User;
use serde::{Deserialize, Serialize};

use crate::error::ClientError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredSession {
    pub token: String,
    #[serde(default)]
    pub user: Option<User>,
}

/// Durable storage for the session token.
pub trait TokenStore: Send + Sync {
    fn load(&self) -> Option<StoredSession>;

    /// # Errors
    ///
    /// Returns [`ClientError::Storage`] or [`ClientError::SessionEncode`] if
    /// the session cannot be persisted.
    fn save(&self, session: &StoredSession) -> Result<(), ClientError>;

    /// # Errors
    ///
    /// Returns [`ClientError::Storage`] if the persisted session cannot be removed.
    fn clear(&self) -> Result<(), ClientError>;

    fn token(&self) -> Option<String> {
        self.load().map(|session| session.token)
    }
}

/// JSON file on disk, e.g. `./.bikeshop/session.json`.
#[derive(Debug)]
pub struct FileTokenStore {
    path: PathBuf,
    cached: Mutex<Option<StoredSession>>,
}

impl FileTokenStore {
    /// Opens the store and reads any session already on disk.
    ///
    /// A missing file means "no session". An unreadable or corrupt file is
    /// logged and also treated as no session.
    #[must_use]
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let cached = read_session(&path);
        Self {
            path,
            cached: Mutex::new(cached),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn read_session(path: &Path) -> Option<StoredSession> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "could not read session file; continuing anonymously");
            return None;
        }
    };
    serde_json::from_str(&content)
        .map_err(|e| {
            tracing::warn!(path = %path.display(), error = %e, "ignoring malformed session file");
        })
        .ok()
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Option<StoredSession> {
        self.cached
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn save(&self, session: &StoredSession) -> Result<(), ClientError> {
        let path_display = self.path.display().to_string();
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| ClientError::Storage {
                path: parent.display().to_string(),
                source: e,
            })?;
        }
        let json = serde_json::to_vec_pretty(session).map_err(|e| ClientError::SessionEncode {
            path: path_display.clone(),
            source: e,
        })?;
        std::fs::write(&self.path, json).map_err(|e| ClientError::Storage {
            path: path_display,
            source: e,
        })?;

        *self.cached.lock().unwrap_or_else(PoisonError::into_inner) = Some(session.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), ClientError> {
        *self.cached.lock().unwrap_or_else(PoisonError::into_inner) = None;
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(ClientError::Storage {
                path: self.path.display().to_string(),
                source: e,
            }),
        }
    }
}

/// In-process store for tests and throwaway sessions.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    session: Mutex<Option<StoredSession>>,
}

impl MemoryTokenStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_token(token: &str) -> Self {
        Self {
            session: Mutex::new(Some(StoredSession {
                token: token.to_owned(),
                user: None,
            })),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Option<StoredSession> {
        self.session
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn save(&self, session: &StoredSession) -> Result<(), ClientError> {
        *self.session.lock().unwrap_or_else(PoisonError::into_inner) = Some(session.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), ClientError> {
        *self.session.lock().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }
}
