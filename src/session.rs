//! Session Token Storage
//!
//! The bearer token returned at login is kept in a small client-local
//! key-value file and reused across runs. Storage sits behind [`TokenStore`]
//! so the API client gets it injected and tests can use [`MemoryTokenStore`].

use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use std::sync::RwLock;
use thiserror::Error;

/// Key the bearer token is stored under
pub const TOKEN_KEY: &str = "token";

/// Provides and persists the bearer credential
pub trait TokenStore: Send + Sync {
    /// Current token, if one was stored
    fn load(&self) -> Result<Option<String>, SessionError>;

    /// Replace the stored token
    fn save(&self, token: &str) -> Result<(), SessionError>;

    /// Forget the stored token
    fn clear(&self) -> Result<(), SessionError>;
}

/// Token kept in process memory only
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: RwLock<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: RwLock::new(Some(token.into())),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Result<Option<String>, SessionError> {
        let guard = self
            .token
            .read()
            .map_err(|e| SessionError::Lock(e.to_string()))?;
        Ok(guard.clone())
    }

    fn save(&self, token: &str) -> Result<(), SessionError> {
        let mut guard = self
            .token
            .write()
            .map_err(|e| SessionError::Lock(e.to_string()))?;
        *guard = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        let mut guard = self
            .token
            .write()
            .map_err(|e| SessionError::Lock(e.to_string()))?;
        *guard = None;
        Ok(())
    }
}

/// Token persisted in a JSON object file under [`TOKEN_KEY`]
///
/// Other keys in the file are left untouched.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> Result<Map<String, Value>, SessionError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => return Err(SessionError::Io(e)),
        };

        if content.trim().is_empty() {
            return Ok(Map::new());
        }

        match serde_json::from_str::<Value>(&content) {
            Ok(Value::Object(entries)) => Ok(entries),
            Ok(_) => Err(SessionError::Corrupt(self.path.clone())),
            Err(e) => {
                tracing::warn!("Session file {:?} is not valid JSON: {}", self.path, e);
                Err(SessionError::Corrupt(self.path.clone()))
            }
        }
    }

    /// Entries to update on write; a corrupt file is replaced, other errors propagate
    fn entries_for_update(&self) -> Result<Map<String, Value>, SessionError> {
        match self.read_entries() {
            Err(SessionError::Corrupt(_)) => Ok(Map::new()),
            other => other,
        }
    }

    fn write_entries(&self, entries: &Map<String, Value>) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let content = serde_json::to_string_pretty(entries)?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Result<Option<String>, SessionError> {
        let entries = self.read_entries()?;
        Ok(entries
            .get(TOKEN_KEY)
            .and_then(Value::as_str)
            .filter(|t| !t.is_empty())
            .map(str::to_string))
    }

    fn save(&self, token: &str) -> Result<(), SessionError> {
        let mut entries = self.entries_for_update()?;
        entries.insert(TOKEN_KEY.to_string(), Value::String(token.to_string()));
        self.write_entries(&entries)?;
        tracing::debug!("Stored session token in {:?}", self.path);
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        let mut entries = self.entries_for_update()?;
        if entries.remove(TOKEN_KEY).is_some() {
            self.write_entries(&entries)?;
            tracing::debug!("Cleared session token in {:?}", self.path);
        }
        Ok(())
    }
}

/// Errors from reading or writing the token store
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Session file {0:?} is corrupt")]
    Corrupt(PathBuf),

    #[error("Lock error: {0}")]
    Lock(String),
}
