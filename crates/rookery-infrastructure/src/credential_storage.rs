//! Durable credential storage.
//!
//! Persists the two bearer credentials (access token, refresh token) as
//! JSON under ~/.config/rookery/credentials.json. The file is read once
//! at startup to hydrate the session and rewritten on every credential
//! change; logout removes it.

use crate::paths::RookeryPaths;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Errors that can occur during credential storage operations.
#[derive(Debug)]
pub enum CredentialStorageError {
    /// File I/O error.
    IoError(std::io::Error),
    /// JSON parsing error.
    ParseError(serde_json::Error),
    /// Config directory not found.
    ConfigDirNotFound,
}

impl std::fmt::Display for CredentialStorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CredentialStorageError::IoError(e) => write!(f, "I/O error: {}", e),
            CredentialStorageError::ParseError(e) => write!(f, "JSON parse error: {}", e),
            CredentialStorageError::ConfigDirNotFound => {
                write!(f, "Could not determine home directory")
            }
        }
    }
}

impl std::error::Error for CredentialStorageError {}

impl From<std::io::Error> for CredentialStorageError {
    fn from(e: std::io::Error) -> Self {
        CredentialStorageError::IoError(e)
    }
}

impl From<serde_json::Error> for CredentialStorageError {
    fn from(e: serde_json::Error) -> Self {
        CredentialStorageError::ParseError(e)
    }
}

impl From<CredentialStorageError> for rookery_core::RookeryError {
    fn from(e: CredentialStorageError) -> Self {
        rookery_core::RookeryError::storage(e.to_string())
    }
}

/// The persisted shape. Both fields are optional so a partial write
/// (access token rotated without a refresh token) stays representable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct StoredCredentials {
    pub token: Option<String>,
    pub refresh_token: Option<String>,
}

impl StoredCredentials {
    pub fn is_empty(&self) -> bool {
        self.token.is_none() && self.refresh_token.is_none()
    }
}

/// Storage for the persisted bearer credentials.
///
/// Responsibilities:
/// - Load credentials.json from ~/.config/rookery/
/// - Rewrite it on credential changes
/// - Remove it on logout
///
/// Does NOT:
/// - Validate or refresh tokens
/// - Handle encryption (plaintext JSON storage)
///
/// # Security Note
///
/// This storage reads and writes plaintext JSON. The credentials file
/// should have appropriate permissions (e.g., 600) to prevent
/// unauthorized access.
#[derive(Debug, Clone)]
pub struct CredentialStorage {
    path: PathBuf,
}

impl CredentialStorage {
    /// Creates storage at the default path (~/.config/rookery/credentials.json).
    pub fn new() -> Result<Self, CredentialStorageError> {
        let path = RookeryPaths::credentials_file()
            .map_err(|_| CredentialStorageError::ConfigDirNotFound)?;
        Ok(Self { path })
    }

    /// Creates storage at a custom path (for testing).
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    /// Loads the stored credentials.
    ///
    /// A missing file is not an error: it means nobody has logged in on
    /// this machine, so empty credentials are returned.
    pub fn load(&self) -> Result<StoredCredentials, CredentialStorageError> {
        if !self.path.exists() {
            return Ok(StoredCredentials::default());
        }
        let contents = fs::read_to_string(&self.path)?;
        let credentials = serde_json::from_str(&contents)?;
        Ok(credentials)
    }

    /// Writes the credentials, creating the config directory if needed.
    pub fn save(&self, credentials: &StoredCredentials) -> Result<(), CredentialStorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(credentials)?;
        fs::write(&self.path, contents)?;
        tracing::debug!(path = %self.path.display(), "persisted credentials");
        Ok(())
    }

    /// Removes the stored credentials. Missing file is a no-op.
    pub fn clear(&self) -> Result<(), CredentialStorageError> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
            tracing::debug!(path = %self.path.display(), "cleared credentials");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_load_missing_file_returns_empty() {
        let dir = tempdir().unwrap();
        let storage = CredentialStorage::with_path(dir.path().join("credentials.json"));
        let loaded = storage.load().unwrap();
        assert!(loaded.is_empty());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempdir().unwrap();
        let storage = CredentialStorage::with_path(dir.path().join("nested/credentials.json"));
        let credentials = StoredCredentials {
            token: Some("t1".to_string()),
            refresh_token: Some("r1".to_string()),
        };

        storage.save(&credentials).unwrap();

        assert_eq!(storage.load().unwrap(), credentials);
    }

    #[test]
    fn test_clear_removes_file_and_is_idempotent() {
        let dir = tempdir().unwrap();
        let storage = CredentialStorage::with_path(dir.path().join("credentials.json"));
        storage
            .save(&StoredCredentials {
                token: Some("t".to_string()),
                refresh_token: None,
            })
            .unwrap();

        storage.clear().unwrap();
        storage.clear().unwrap();

        assert!(storage.load().unwrap().is_empty());
    }
}
