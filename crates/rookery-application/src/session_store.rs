//! Session store: in-memory session state paired with durable storage.
//!
//! Every credential transition goes through here so the in-memory
//! session and the persisted credentials file never disagree. The store
//! is an explicitly constructed handle passed to whoever needs it; there
//! is no ambient singleton.

use std::sync::{Arc, RwLock};

use rookery_api::TokenProvider;
use rookery_core::identity::UserProfile;
use rookery_core::session::Session;
use rookery_core::Result;
use rookery_infrastructure::{CredentialStorage, StoredCredentials};

/// Shared handle over the session state and its durable storage.
#[derive(Clone)]
pub struct SessionStore {
    session: Arc<RwLock<Session>>,
    storage: Arc<CredentialStorage>,
}

impl SessionStore {
    /// Creates a store hydrated from durable storage.
    ///
    /// Authentication is the presence of a stored access token; no
    /// expiry check or automatic refresh is performed.
    pub fn hydrate(storage: CredentialStorage) -> Result<Self> {
        let stored = storage.load()?;
        let session = Session::hydrated(stored.token, stored.refresh_token);
        if session.is_authenticated {
            tracing::debug!("session hydrated from stored credentials");
        }
        Ok(Self {
            session: Arc::new(RwLock::new(session)),
            storage: Arc::new(storage),
        })
    }

    /// Stores credentials after a successful login or registration and
    /// persists both tokens.
    pub fn set_credentials(
        &self,
        token: String,
        refresh_token: String,
        user: Option<UserProfile>,
    ) -> Result<()> {
        {
            let mut session = self.session.write().unwrap();
            session.set_credentials(token.clone(), refresh_token.clone(), user);
        }
        self.storage.save(&StoredCredentials {
            token: Some(token),
            refresh_token: Some(refresh_token),
        })?;
        Ok(())
    }

    /// Replaces the identity without touching the credentials.
    pub fn set_user(&self, user: UserProfile) {
        let mut session = self.session.write().unwrap();
        session.set_user(user);
    }

    /// Rotates the access credential only, persisting the new value.
    pub fn update_token(&self, token: String) -> Result<()> {
        let refresh_token = {
            let mut session = self.session.write().unwrap();
            session.update_token(token.clone());
            session.refresh_token.clone()
        };
        self.storage.save(&StoredCredentials {
            token: Some(token),
            refresh_token,
        })?;
        Ok(())
    }

    /// Clears the session and removes both persisted credentials,
    /// regardless of prior state.
    pub fn logout(&self) -> Result<()> {
        {
            let mut session = self.session.write().unwrap();
            session.logout();
        }
        self.storage.clear()?;
        Ok(())
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.read().unwrap().is_authenticated
    }

    pub fn current_user(&self) -> Option<UserProfile> {
        self.session.read().unwrap().user.clone()
    }

    /// Snapshot of the full session state, for rendering.
    pub fn snapshot(&self) -> Session {
        self.session.read().unwrap().clone()
    }
}

impl TokenProvider for SessionStore {
    fn token(&self) -> Option<String> {
        self.session.read().unwrap().token.clone()
    }
}
