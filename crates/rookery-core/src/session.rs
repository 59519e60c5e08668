//! Session state and its transitions.
//!
//! The session is plain data with pure transition methods; pairing the
//! credential transitions with durable storage writes is the application
//! layer's job. Invariant held by every transition:
//! `is_authenticated == token.is_some()`.

use serde::{Deserialize, Serialize};

use crate::identity::UserProfile;

/// The authenticated identity and bearer credentials.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub token: Option<String>,
    pub refresh_token: Option<String>,
    pub user: Option<UserProfile>,
    pub is_authenticated: bool,
    pub loading: bool,
    pub error: Option<String>,
}

impl Session {
    /// Creates an unauthenticated session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a session hydrated from previously stored credentials.
    ///
    /// Authentication is the presence of a stored access token; no expiry
    /// check is performed.
    pub fn hydrated(token: Option<String>, refresh_token: Option<String>) -> Self {
        let is_authenticated = token.is_some();
        Self {
            token,
            refresh_token,
            user: None,
            is_authenticated,
            loading: false,
            error: None,
        }
    }

    /// Stores both credentials and the identity after a successful login
    /// or registration. Marks the session authenticated and clears any
    /// previous error.
    pub fn set_credentials(
        &mut self,
        token: String,
        refresh_token: String,
        user: Option<UserProfile>,
    ) {
        self.token = Some(token);
        self.refresh_token = Some(refresh_token);
        self.user = user;
        self.is_authenticated = true;
        self.error = None;
    }

    /// Replaces the identity without touching the credentials.
    pub fn set_user(&mut self, user: UserProfile) {
        self.user = Some(user);
    }

    /// Rotates the access credential only.
    pub fn update_token(&mut self, token: String) {
        self.token = Some(token);
        self.is_authenticated = true;
    }

    /// Clears every session field.
    pub fn logout(&mut self) {
        self.user = None;
        self.token = None;
        self.refresh_token = None;
        self.is_authenticated = false;
        self.error = None;
    }

    pub fn set_error(&mut self, error: impl Into<String>) {
        self.error = Some(error.into());
        self.loading = false;
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn current_user(&self) -> Option<&UserProfile> {
        self.user.as_ref()
    }
}
