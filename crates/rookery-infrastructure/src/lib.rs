//! Infrastructure layer: durable storage and configuration.

pub mod config_service;
pub mod credential_storage;
pub mod paths;

pub use config_service::ConfigService;
pub use credential_storage::{CredentialStorage, CredentialStorageError, StoredCredentials};
pub use paths::RookeryPaths;
