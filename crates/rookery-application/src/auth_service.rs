//! Authentication use cases: login, registration, logout, and the
//! session-user refresh.

use std::sync::Arc;

use rookery_api::ApiGateway;
use rookery_core::identity::UserProfile;
use rookery_core::{Result, RookeryError};

use crate::store::AppStore;

/// Input of the registration form.
#[derive(Debug, Clone, Default)]
pub struct RegisterForm {
    pub username: String,
    pub email: String,
    pub display_name: String,
    pub password: String,
    pub confirm_password: String,
}

impl RegisterForm {
    /// Client-side validation, performed before any request. The first
    /// failing rule wins, matching the form's inline error order.
    pub fn validate(&self) -> Result<()> {
        if self.password != self.confirm_password {
            return Err(RookeryError::validation("Passwords do not match"));
        }
        if self.password.len() < 8 {
            return Err(RookeryError::validation(
                "Password must be at least 8 characters long",
            ));
        }
        if self.username.len() < 3 {
            return Err(RookeryError::validation(
                "Username must be at least 3 characters long",
            ));
        }
        if self.display_name.len() < 2 {
            return Err(RookeryError::validation(
                "Display name must be at least 2 characters long",
            ));
        }
        Ok(())
    }
}

/// Login, registration and logout flows.
#[derive(Clone)]
pub struct AuthService {
    store: Arc<AppStore>,
    gateway: ApiGateway,
}

impl AuthService {
    pub fn new(store: Arc<AppStore>, gateway: ApiGateway) -> Self {
        Self { store, gateway }
    }

    /// Authenticates and stores the returned credentials. On success the
    /// caller navigates to the feed.
    pub async fn login(&self, username: &str, password: &str) -> Result<()> {
        let credentials = self.gateway.login(username, password).await?;
        self.store.session.set_credentials(
            credentials.token,
            credentials.refresh_token,
            credentials.user,
        )?;
        tracing::debug!(username, "logged in");
        Ok(())
    }

    /// Validates the form client-side, creates the account, and stores
    /// the returned credentials (auto-login).
    pub async fn register(&self, form: &RegisterForm) -> Result<()> {
        form.validate()?;
        let credentials = self
            .gateway
            .create_user(
                &form.username,
                &form.password,
                &form.email,
                &form.display_name,
            )
            .await?;
        self.store.session.set_credentials(
            credentials.token,
            credentials.refresh_token,
            credentials.user,
        )?;
        tracing::debug!(username = %form.username, "registered");
        Ok(())
    }

    /// Refreshes the session identity from the server. A null `me`
    /// payload leaves the current identity untouched.
    pub async fn fetch_me(&self) -> Result<Option<UserProfile>> {
        let me = self.gateway.get_me().await?;
        if let Some(user) = me.clone() {
            self.store.session.set_user(user);
        }
        Ok(me)
    }

    /// Clears the session, both persisted credentials, and the response
    /// cache, so nothing fetched under the old session survives it.
    pub async fn logout(&self) -> Result<()> {
        self.gateway.clear_cache().await;
        self.store.session.logout()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{store_and_gateway, ScriptedTransport};
    use serde_json::json;

    fn register_form() -> RegisterForm {
        RegisterForm {
            username: "alice".to_string(),
            email: "alice@example.net".to_string(),
            display_name: "Alice".to_string(),
            password: "secret123".to_string(),
            confirm_password: "secret123".to_string(),
        }
    }

    #[tokio::test]
    async fn test_login_scenario_stores_credentials() {
        let transport = ScriptedTransport::new(vec![Ok(json!({
            "tokenAuth": {
                "token": "t1",
                "refreshToken": "r1",
                "user": {"id": "1", "user": {"username": "alice"}, "displayName": "Alice"}
            }
        }))]);
        let (_dir, store, gateway) = store_and_gateway(transport);
        let service = AuthService::new(store.clone(), gateway);

        service.login("alice", "secret123").await.unwrap();

        let session = store.session.snapshot();
        assert!(session.is_authenticated);
        assert_eq!(session.token.as_deref(), Some("t1"));
        assert_eq!(session.refresh_token.as_deref(), Some("r1"));
        assert_eq!(session.user.unwrap().id, "1");
    }

    #[tokio::test]
    async fn test_mismatched_passwords_never_reach_the_network() {
        let transport = ScriptedTransport::new(vec![]);
        let (_dir, store, gateway) = store_and_gateway(transport.clone());
        let service = AuthService::new(store, gateway);

        let mut form = register_form();
        form.confirm_password = "different".to_string();

        let err = service.register(&form).await.unwrap_err();

        assert_eq!(err.display_message("fallback"), "Passwords do not match");
        assert_eq!(transport.call_count(), 0);
    }

    #[tokio::test]
    async fn test_short_password_is_rejected_client_side() {
        let transport = ScriptedTransport::new(vec![]);
        let (_dir, store, gateway) = store_and_gateway(transport.clone());
        let service = AuthService::new(store, gateway);

        let mut form = register_form();
        form.password = "short".to_string();
        form.confirm_password = "short".to_string();

        let err = service.register(&form).await.unwrap_err();

        assert!(err.is_validation());
        assert_eq!(transport.call_count(), 0);
    }

    #[tokio::test]
    async fn test_register_auto_logs_in() {
        let transport = ScriptedTransport::new(vec![Ok(json!({
            "createUser": {
                "token": "t2",
                "refreshToken": "r2",
                "user": {"id": "5", "displayName": "Alice"}
            }
        }))]);
        let (_dir, store, gateway) = store_and_gateway(transport);
        let service = AuthService::new(store.clone(), gateway);

        service.register(&register_form()).await.unwrap();

        assert!(store.session.is_authenticated());
    }

    #[tokio::test]
    async fn test_logout_clears_session_and_response_cache() {
        let transport = ScriptedTransport::new(vec![
            Ok(json!({"allPosts": []})),
            Ok(json!({"allPosts": []})),
        ]);
        let (_dir, store, gateway) = store_and_gateway(transport.clone());
        let service = AuthService::new(store.clone(), gateway.clone());
        store
            .session
            .set_credentials("t".to_string(), "r".to_string(), None)
            .unwrap();
        gateway.get_all_posts().await.unwrap();

        service.logout().await.unwrap();

        assert!(!store.session.is_authenticated());
        // the cached posts query is gone, so the next read refetches
        gateway.get_all_posts().await.unwrap();
        assert_eq!(transport.call_count(), 2);
    }

    #[tokio::test]
    async fn test_failed_login_surfaces_first_server_message() {
        let transport = ScriptedTransport::new(vec![Err(
            rookery_core::RookeryError::server(vec!["Please enter valid credentials".to_string()]),
        )]);
        let (_dir, store, gateway) = store_and_gateway(transport);
        let service = AuthService::new(store.clone(), gateway);

        let err = service.login("alice", "wrong").await.unwrap_err();

        assert_eq!(
            err.display_message("Login failed. Please check your credentials."),
            "Please enter valid credentials"
        );
        assert!(!store.session.is_authenticated());
    }
}
