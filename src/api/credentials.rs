//! Bearer credential lookup.
//!
//! Requests ask a `CredentialProvider` for the token at call time, so a
//! token written after the client was built is picked up on the next call.

use parking_lot::Mutex;
use serde_json::{Map, Value};
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Key under which the bearer token is kept in the store
pub const TOKEN_KEY: &str = "token";

/// Wrapper for sensitive strings that keeps them out of logs.
#[derive(Clone, PartialEq, Eq)]
pub struct SecureString(String);

impl SecureString {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Expose the inner value. Only for building request headers.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SecureString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SecureString(••••••••)")
    }
}

impl fmt::Display for SecureString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "••••••••")
    }
}

#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("Failed to read token store '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Token store '{path}' is not a JSON object: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to write token store '{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Source of the bearer token attached to each request
pub trait CredentialProvider: Send + Sync {
    /// `Ok(None)` means nobody is signed in.
    fn bearer_token(&self) -> Result<Option<SecureString>, CredentialError>;
}

/// A fixed token, or none
#[derive(Debug, Clone, Default)]
pub struct StaticToken(Option<SecureString>);

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(Some(SecureString::new(token)))
    }

    pub fn none() -> Self {
        Self(None)
    }
}

impl CredentialProvider for StaticToken {
    fn bearer_token(&self) -> Result<Option<SecureString>, CredentialError> {
        Ok(self.0.clone())
    }
}

/// Client-side key-value store persisted as a flat JSON object.
///
/// The file is re-read on every lookup; a missing file is an empty store.
#[derive(Debug)]
pub struct FileTokenStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get(&self, key: &str) -> Result<Option<String>, CredentialError> {
        let entries = self.load()?;
        Ok(entries
            .get(key)
            .and_then(Value::as_str)
            .map(str::to_string))
    }

    pub fn set(&self, key: &str, value: &str) -> Result<(), CredentialError> {
        let _guard = self.write_lock.lock();
        let mut entries = self.load()?;
        entries.insert(key.to_string(), Value::String(value.to_string()));
        self.save(&entries)
    }

    pub fn remove(&self, key: &str) -> Result<bool, CredentialError> {
        let _guard = self.write_lock.lock();
        let mut entries = self.load()?;
        let removed = entries.remove(key).is_some();
        if removed {
            self.save(&entries)?;
        }
        Ok(removed)
    }

    fn load(&self) -> Result<Map<String, Value>, CredentialError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => {
                return Err(CredentialError::Read {
                    path: self.path.clone(),
                    source: e,
                })
            }
        };
        if content.trim().is_empty() {
            return Ok(Map::new());
        }
        serde_json::from_str(&content).map_err(|e| CredentialError::Parse {
            path: self.path.clone(),
            source: e,
        })
    }

    fn save(&self, entries: &Map<String, Value>) -> Result<(), CredentialError> {
        let write_err = |source| CredentialError::Write {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(write_err)?;
        }
        // Serializing a Map of plain values cannot fail.
        let json = serde_json::to_string_pretty(entries).unwrap_or_else(|_| "{}".to_string());
        std::fs::write(&self.path, json).map_err(write_err)
    }
}

impl CredentialProvider for FileTokenStore {
    fn bearer_token(&self) -> Result<Option<SecureString>, CredentialError> {
        Ok(self
            .get(TOKEN_KEY)?
            .filter(|t| !t.is_empty())
            .map(SecureString::new))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn secure_string_is_redacted() {
        let secret = SecureString::new("hunter2");
        assert!(!format!("{:?}", secret).contains("hunter2"));
        assert!(!format!("{}", secret).contains("hunter2"));
        assert_eq!(secret.expose(), "hunter2");
    }

    #[test]
    fn static_token_provider() {
        let token = StaticToken::new("abc").bearer_token().unwrap().unwrap();
        assert_eq!(token.expose(), "abc");
        assert!(StaticToken::none().bearer_token().unwrap().is_none());
    }

    #[test]
    fn missing_store_has_no_token() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileTokenStore::new(dir.path().join("storage.json"));
        assert!(store.bearer_token().unwrap().is_none());
    }

    #[test]
    fn token_is_read_at_call_time() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("storage.json");
        let store = FileTokenStore::new(&path);

        store.set("theme", "dark").unwrap();
        assert!(store.bearer_token().unwrap().is_none());

        std::fs::write(&path, r#"{"theme":"dark","token":"t-1"}"#).unwrap();
        assert_eq!(store.bearer_token().unwrap().unwrap().expose(), "t-1");

        store.set(TOKEN_KEY, "t-2").unwrap();
        assert_eq!(store.bearer_token().unwrap().unwrap().expose(), "t-2");
        assert_eq!(store.get("theme").unwrap().as_deref(), Some("dark"));

        assert!(store.remove(TOKEN_KEY).unwrap());
        assert!(!store.remove(TOKEN_KEY).unwrap());
        assert!(store.bearer_token().unwrap().is_none());
    }

    #[test]
    fn empty_token_counts_as_signed_out() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        std::fs::write(&path, r#"{"token":""}"#).unwrap();
        assert!(FileTokenStore::new(&path).bearer_token().unwrap().is_none());
    }

    #[test]
    fn corrupt_store_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        std::fs::write(&path, "[1,2").unwrap();
        let err = FileTokenStore::new(&path).bearer_token().unwrap_err();
        assert!(matches!(err, CredentialError::Parse { .. }));
    }
}
