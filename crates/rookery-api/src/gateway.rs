//! The API gateway.
//!
//! One typed method per registered operation. Queries consult the
//! tag-indexed response cache before touching the network; mutations
//! always go to the network and evict the tags they declare on success.
//! The gateway never retries and never distinguishes transient from
//! permanent failures; every error is terminal for that call.
//!
//! Single-flight deduplication is deliberately absent: two concurrent
//! identical queries may both reach the network.

use std::sync::Arc;

use rookery_core::id::numeric_id;
use rookery_core::identity::UserProfile;
use rookery_core::notification::Notification;
use rookery_core::post::{Comment, Post, Visibility};
use rookery_core::{Result, RookeryError};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::cache::ResponseCache;
use crate::operation::{self, cache_key, Operation, Tag};
use crate::transport::Transport;

/// Read access to the current bearer credential.
///
/// The session store implements this; passing it explicitly keeps the
/// gateway free of ambient state and makes credential attachment
/// testable in isolation.
pub trait TokenProvider: Send + Sync {
    fn token(&self) -> Option<String>;
}

/// Result of the login and createUser mutations.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthCredentials {
    pub token: String,
    pub refresh_token: String,
    #[serde(default)]
    pub user: Option<UserProfile>,
}

#[derive(Debug, Deserialize)]
struct OkPayload {
    #[serde(default)]
    ok: bool,
}

#[derive(Debug, Deserialize)]
struct PostEnvelope {
    post: Post,
}

#[derive(Debug, Deserialize)]
struct CommentEnvelope {
    comment: Comment,
}

/// Gateway over the GraphQL transport with a tag-indexed response cache.
#[derive(Clone)]
pub struct ApiGateway {
    transport: Arc<dyn Transport>,
    cache: ResponseCache,
    tokens: Arc<dyn TokenProvider>,
}

impl ApiGateway {
    pub fn new(transport: Arc<dyn Transport>, tokens: Arc<dyn TokenProvider>) -> Self {
        Self {
            transport,
            cache: ResponseCache::new(),
            tokens,
        }
    }

    /// Evicts cached entries by tag, forcing the next bound query to
    /// refetch. Used by explicit refresh actions.
    pub async fn invalidate(&self, tags: &[Tag]) {
        self.cache.invalidate(tags).await;
    }

    /// Drops the whole response cache, outdating in-flight fetches.
    /// Used on logout so no response outlives the session it belongs to.
    pub async fn clear_cache(&self) {
        self.cache.clear().await;
    }

    /// Serves a cached result when present; otherwise fetches, stores
    /// under the declared tags, and returns. A response that completes
    /// after an invalidation of its key is returned to the caller but
    /// not stored.
    async fn run_query(&self, op: &Operation, variables: Value, tags: Vec<Tag>) -> Result<Value> {
        let key = cache_key(op, &variables);
        if let Some(hit) = self.cache.get(&key).await {
            tracing::debug!(operation = op.name, "cache hit");
            return Ok(hit);
        }
        let generation = self.cache.begin_fetch(&key, &tags).await;
        let token = self.tokens.token();
        tracing::debug!(operation = op.name, "cache miss, fetching");
        let data = self
            .transport
            .execute(op.document, variables, token.as_deref())
            .await?;
        self.cache
            .store_if_current(&key, generation, data.clone())
            .await;
        Ok(data)
    }

    /// Executes a mutation and, on success, evicts every cached entry
    /// whose tags intersect the invalidation set.
    async fn run_mutation(
        &self,
        op: &Operation,
        variables: Value,
        invalidates: Vec<Tag>,
    ) -> Result<Value> {
        let token = self.tokens.token();
        let data = self
            .transport
            .execute(op.document, variables, token.as_deref())
            .await?;
        if !invalidates.is_empty() {
            self.cache.invalidate(&invalidates).await;
        }
        Ok(data)
    }

    fn field(data: &Value, name: &'static str) -> Result<Value> {
        data.get(name)
            .cloned()
            .ok_or_else(|| RookeryError::internal(format!("response missing field '{}'", name)))
    }

    /// The backend takes several ids as `Int!`; ids stay strings in the
    /// client, so a non-numeric id is a validation error raised before
    /// any request.
    fn int_id(kind: &'static str, id: &str) -> Result<i64> {
        numeric_id(id)
            .ok_or_else(|| RookeryError::validation(format!("{} id '{}' is not numeric", kind, id)))
    }

    // Auth

    pub async fn login(&self, username: &str, password: &str) -> Result<AuthCredentials> {
        let data = self
            .run_mutation(
                &operation::LOGIN,
                json!({"username": username, "password": password}),
                vec![],
            )
            .await?;
        Ok(serde_json::from_value(Self::field(&data, "tokenAuth")?)?)
    }

    pub async fn create_user(
        &self,
        username: &str,
        password: &str,
        email: &str,
        display_name: &str,
    ) -> Result<AuthCredentials> {
        let data = self
            .run_mutation(
                &operation::CREATE_USER,
                json!({
                    "username": username,
                    "password": password,
                    "email": email,
                    "displayName": display_name,
                }),
                vec![],
            )
            .await?;
        Ok(serde_json::from_value(Self::field(&data, "createUser")?)?)
    }

    // Profiles

    pub async fn get_me(&self) -> Result<Option<UserProfile>> {
        let data = self
            .run_query(&operation::GET_ME, json!({}), vec![Tag::Profile])
            .await?;
        Ok(serde_json::from_value(Self::field(&data, "me")?)?)
    }

    /// A successful payload with a null profile means the username is
    /// unknown; the caller renders that as an explicit not-found view.
    pub async fn get_profile_by_username(&self, username: &str) -> Result<Option<UserProfile>> {
        let data = self
            .run_query(
                &operation::GET_PROFILE_BY_USERNAME,
                json!({"username": username}),
                vec![Tag::Profile],
            )
            .await?;
        Ok(serde_json::from_value(Self::field(
            &data,
            "profileByUsername",
        )?)?)
    }

    // Posts

    pub async fn get_all_posts(&self) -> Result<Vec<Post>> {
        let data = self
            .run_query(&operation::GET_ALL_POSTS, json!({}), vec![Tag::Post])
            .await?;
        Ok(serde_json::from_value(Self::field(&data, "allPosts")?)?)
    }

    pub async fn get_following_feed(&self) -> Result<Vec<Post>> {
        let data = self
            .run_query(&operation::GET_FOLLOWING_FEED, json!({}), vec![Tag::Post])
            .await?;
        Ok(serde_json::from_value(Self::field(
            &data,
            "followingFeed",
        )?)?)
    }

    pub async fn get_trending_feed(&self) -> Result<Vec<Post>> {
        let data = self
            .run_query(&operation::GET_TRENDING_FEED, json!({}), vec![Tag::Post])
            .await?;
        Ok(serde_json::from_value(Self::field(&data, "trendingFeed")?)?)
    }

    pub async fn get_post(&self, id: &str) -> Result<Option<Post>> {
        let numeric = Self::int_id("post", id)?;
        let data = self
            .run_query(
                &operation::GET_POST,
                json!({"id": numeric}),
                vec![Tag::PostId(id.to_string())],
            )
            .await?;
        Ok(serde_json::from_value(Self::field(&data, "post")?)?)
    }

    pub async fn create_post(&self, content: &str, visibility: Visibility) -> Result<Post> {
        let data = self
            .run_mutation(
                &operation::CREATE_POST,
                json!({"content": content, "visibility": visibility.as_str()}),
                vec![Tag::Post],
            )
            .await?;
        let envelope: PostEnvelope = serde_json::from_value(Self::field(&data, "createPost")?)?;
        Ok(envelope.post)
    }

    pub async fn create_comment(&self, post_id: &str, content: &str) -> Result<Comment> {
        let numeric = Self::int_id("post", post_id)?;
        let data = self
            .run_mutation(
                &operation::CREATE_COMMENT,
                json!({"postId": numeric, "content": content}),
                vec![Tag::PostId(post_id.to_string()), Tag::Comment],
            )
            .await?;
        let envelope: CommentEnvelope =
            serde_json::from_value(Self::field(&data, "createComment")?)?;
        Ok(envelope.comment)
    }

    /// Likes (or otherwise reacts to) a post.
    ///
    /// Declares no invalidation tags: the cached like counters stay
    /// stale until a manual refresh, which the surrounding views expect.
    pub async fn react_to_post(&self, post_id: &str, reaction_type: &str) -> Result<bool> {
        let data = self
            .run_mutation(
                &operation::REACT_TO_POST,
                json!({"postId": post_id, "reactionType": reaction_type}),
                vec![],
            )
            .await?;
        let payload: OkPayload = serde_json::from_value(Self::field(&data, "reactToPost")?)?;
        Ok(payload.ok)
    }

    // Follow graph

    pub async fn follow_user(&self, user_id: &str) -> Result<bool> {
        let numeric = Self::int_id("user", user_id)?;
        let data = self
            .run_mutation(
                &operation::FOLLOW_USER,
                json!({"userId": numeric}),
                vec![Tag::Profile],
            )
            .await?;
        let payload: OkPayload = serde_json::from_value(Self::field(&data, "followUser")?)?;
        Ok(payload.ok)
    }

    pub async fn unfollow_user(&self, user_id: &str) -> Result<bool> {
        let numeric = Self::int_id("user", user_id)?;
        let data = self
            .run_mutation(
                &operation::UNFOLLOW_USER,
                json!({"userId": numeric}),
                vec![Tag::Profile],
            )
            .await?;
        let payload: OkPayload = serde_json::from_value(Self::field(&data, "unfollowUser")?)?;
        Ok(payload.ok)
    }

    // Notifications

    pub async fn get_my_notifications(&self, unread_only: bool) -> Result<Vec<Notification>> {
        let data = self
            .run_query(
                &operation::GET_MY_NOTIFICATIONS,
                json!({"unreadOnly": unread_only}),
                vec![Tag::Notification],
            )
            .await?;
        Ok(serde_json::from_value(Self::field(
            &data,
            "myNotifications",
        )?)?)
    }

    pub async fn mark_notification_read(&self, notification_id: &str) -> Result<bool> {
        let numeric = Self::int_id("notification", notification_id)?;
        let data = self
            .run_mutation(
                &operation::MARK_NOTIFICATION_READ,
                json!({"notificationId": numeric}),
                vec![Tag::Notification],
            )
            .await?;
        let payload: OkPayload =
            serde_json::from_value(Self::field(&data, "markNotificationRead")?)?;
        Ok(payload.ok)
    }
}
