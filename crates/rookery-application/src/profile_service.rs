//! Profile use cases: loading a profile by username and the
//! follow/unfollow actions.
//!
//! The backend never reports the follow relationship from the viewer's
//! perspective, so "am I following" exists only as transient local UI
//! state, reset to false on every profile load.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use rookery_api::ApiGateway;
use rookery_core::identity::UserProfile;
use rookery_core::{Result, RookeryError};

use crate::store::AppStore;

/// Profile operations over the profile slice and the gateway.
#[derive(Clone)]
pub struct ProfileService {
    store: Arc<AppStore>,
    gateway: ApiGateway,
    is_following: Arc<AtomicBool>,
}

impl ProfileService {
    pub fn new(store: Arc<AppStore>, gateway: ApiGateway) -> Self {
        Self {
            store,
            gateway,
            is_following: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Fetches a profile and mirrors it (and its posts) into the slice.
    ///
    /// A successful payload with a null profile is a not-found state,
    /// surfaced as an error for the view to render as an explicit
    /// empty page. The transient follow flag resets on every load.
    pub async fn load(&self, username: &str) -> Result<UserProfile> {
        self.is_following.store(false, Ordering::Relaxed);
        self.store.profile_mut().set_loading(true);
        match self.gateway.get_profile_by_username(username).await {
            Ok(Some(profile)) => {
                self.store
                    .profile_mut()
                    .set_user_posts(profile.posts.clone());
                self.store
                    .profile_mut()
                    .set_current_profile(Some(profile.clone()));
                Ok(profile)
            }
            Ok(None) => {
                self.store.profile_mut().set_current_profile(None);
                Err(RookeryError::not_found("profile", username))
            }
            Err(err) => {
                self.store
                    .profile_mut()
                    .set_error(err.display_message("Error loading profile"));
                Err(err)
            }
        }
    }

    /// Whether the viewer believes they follow the loaded profile.
    /// Local guesswork only; the server is never consulted.
    pub fn is_following(&self) -> bool {
        self.is_following.load(Ordering::Relaxed)
    }

    /// Follows the loaded profile's user: mutation plus an optimistic
    /// +1 on the follower count.
    pub async fn follow(&self, user_id: &str) -> Result<()> {
        self.gateway.follow_user(user_id).await?;
        self.is_following.store(true, Ordering::Relaxed);
        if let Some(viewer) = self.store.session.current_user() {
            self.store.profile_mut().add_follower(viewer);
        } else {
            self.store.profile_mut().add_follower(UserProfile::default());
        }
        Ok(())
    }

    /// Unfollows: mutation plus an optimistic -1 on the follower count.
    pub async fn unfollow(&self, user_id: &str) -> Result<()> {
        self.gateway.unfollow_user(user_id).await?;
        self.is_following.store(false, Ordering::Relaxed);
        let viewer_id = self
            .store
            .session
            .current_user()
            .map(|u| u.id)
            .unwrap_or_default();
        self.store.profile_mut().remove_follower(&viewer_id);
        Ok(())
    }

    /// Flips the follow state for the loaded profile.
    pub async fn toggle_follow(&self, user_id: &str) -> Result<()> {
        if self.is_following() {
            self.unfollow(user_id).await
        } else {
            self.follow(user_id).await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{store_and_gateway, ScriptedTransport};
    use serde_json::json;

    fn profile_payload() -> serde_json::Value {
        json!({"profileByUsername": {
            "id": "2",
            "displayName": "Bob",
            "bio": "hi",
            "createdAt": "2024-01-01T00:00:00Z",
            "avatarUrl": null,
            "followerCount": 10,
            "followingCount": 3,
            "posts": [{
                "id": "1", "content": "post", "likeCount": 0, "commentCount": 0,
                "createdAt": "2024-02-01T00:00:00Z",
                "author": {"id": "2", "displayName": "Bob"}
            }]
        }})
    }

    #[tokio::test]
    async fn test_load_mirrors_profile_and_posts() {
        let transport = ScriptedTransport::new(vec![Ok(profile_payload())]);
        let (_dir, store, gateway) = store_and_gateway(transport);
        let service = ProfileService::new(store.clone(), gateway);

        let profile = service.load("bob").await.unwrap();

        assert_eq!(profile.display_name, "Bob");
        assert_eq!(store.profile().user_posts.len(), 1);
        assert!(!service.is_following());
    }

    #[tokio::test]
    async fn test_null_profile_is_not_found() {
        let transport = ScriptedTransport::new(vec![Ok(json!({"profileByUsername": null}))]);
        let (_dir, store, gateway) = store_and_gateway(transport);
        let service = ProfileService::new(store.clone(), gateway);

        let err = service.load("ghost").await.unwrap_err();

        assert!(err.is_not_found());
        assert!(store.profile().current_profile.is_none());
    }

    #[tokio::test]
    async fn test_follow_bumps_count_and_flag() {
        let transport = ScriptedTransport::new(vec![
            Ok(profile_payload()),
            Ok(json!({"followUser": {"ok": true}})),
        ]);
        let (_dir, store, gateway) = store_and_gateway(transport);
        let service = ProfileService::new(store.clone(), gateway);
        service.load("bob").await.unwrap();

        service.toggle_follow("2").await.unwrap();

        assert!(service.is_following());
        assert_eq!(
            store.profile().current_profile.as_ref().unwrap().follower_count,
            11
        );
    }

    #[tokio::test]
    async fn test_unfollow_reverses_flag_and_count() {
        let transport = ScriptedTransport::new(vec![
            Ok(profile_payload()),
            Ok(json!({"followUser": {"ok": true}})),
            Ok(json!({"unfollowUser": {"ok": true}})),
        ]);
        let (_dir, store, gateway) = store_and_gateway(transport);
        let service = ProfileService::new(store.clone(), gateway);
        service.load("bob").await.unwrap();
        service.toggle_follow("2").await.unwrap();

        service.toggle_follow("2").await.unwrap();

        assert!(!service.is_following());
        assert_eq!(
            store.profile().current_profile.as_ref().unwrap().follower_count,
            10
        );
    }

    #[tokio::test]
    async fn test_reload_resets_the_transient_follow_flag() {
        let transport = ScriptedTransport::new(vec![
            Ok(profile_payload()),
            Ok(json!({"followUser": {"ok": true}})),
            Ok(profile_payload()),
        ]);
        let (_dir, store, gateway) = store_and_gateway(transport);
        let service = ProfileService::new(store, gateway);
        service.load("bob").await.unwrap();
        service.toggle_follow("2").await.unwrap();
        assert!(service.is_following());

        service.load("bob").await.unwrap();

        assert!(!service.is_following());
    }
}
