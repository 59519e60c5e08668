//! Shared fixtures for service tests: a scripted transport and store
//! builders. No network is involved anywhere in the test suite.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rookery_api::{ApiGateway, Transport};
use rookery_core::{Result, RookeryError};
use serde_json::Value;
use tempfile::TempDir;

use crate::session_store::SessionStore;
use crate::store::AppStore;
use rookery_infrastructure::CredentialStorage;

/// Transport that replays scripted responses and records every call.
#[derive(Default)]
pub struct ScriptedTransport {
    responses: Mutex<VecDeque<Result<Value>>>,
    calls: Mutex<Vec<(String, Option<String>)>>,
}

impl ScriptedTransport {
    pub fn new(responses: Vec<Result<Value>>) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(responses.into()),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn execute(
        &self,
        document: &str,
        _variables: Value,
        token: Option<&str>,
    ) -> Result<Value> {
        self.calls
            .lock()
            .unwrap()
            .push((document.to_string(), token.map(String::from)));
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(RookeryError::internal("no scripted response")))
    }
}

/// A store backed by a temporary credentials file plus a gateway over
/// the scripted transport. The TempDir must outlive the store.
pub fn store_and_gateway(
    transport: Arc<ScriptedTransport>,
) -> (TempDir, Arc<AppStore>, ApiGateway) {
    let dir = tempfile::tempdir().unwrap();
    let storage = CredentialStorage::with_path(dir.path().join("credentials.json"));
    let session = SessionStore::hydrate(storage).unwrap();
    let gateway = ApiGateway::new(transport, Arc::new(session.clone()));
    let store = Arc::new(AppStore::new(session));
    (dir, store, gateway)
}
