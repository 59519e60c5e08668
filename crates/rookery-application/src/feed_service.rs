//! Feed use cases: loading posts, the local-only filter and search,
//! creating posts, and the optimistic like/comment actions.

use std::sync::Arc;

use rookery_api::{ApiGateway, Tag};
use rookery_core::post::{Post, Visibility};
use rookery_core::{Result, RookeryError};

use crate::store::AppStore;

/// Local-only ordering applied over the already-fetched posts. Nothing
/// here goes back to the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FeedFilter {
    /// Server order, untouched.
    #[default]
    All,
    /// Engagement (likes + comments), descending.
    Trending,
    /// Creation time, newest first.
    Recent,
}

impl FeedFilter {
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "all" => Some(FeedFilter::All),
            "trending" => Some(FeedFilter::Trending),
            "recent" => Some(FeedFilter::Recent),
            _ => None,
        }
    }
}

/// Applies the search filter then the ordering, both client-side.
///
/// An empty or whitespace-only query returns the unfiltered set. The
/// sorts are stable: ties keep their original relative order.
pub fn visible_posts(posts: &[Post], filter: FeedFilter, search: &str) -> Vec<Post> {
    let query = search.trim().to_lowercase();
    let mut selected: Vec<Post> = posts
        .iter()
        .filter(|post| query.is_empty() || post.matches(&query))
        .cloned()
        .collect();

    match filter {
        FeedFilter::All => {}
        FeedFilter::Trending => {
            selected.sort_by(|a, b| b.engagement().cmp(&a.engagement()));
        }
        FeedFilter::Recent => {
            selected.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        }
    }
    selected
}

/// Case-insensitive substring search over content and author name,
/// capped at the first five matches. Used by the navbar-style preview.
pub fn search_preview<'a>(posts: &'a [Post], query: &str) -> Vec<&'a Post> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return Vec::new();
    }
    posts.iter().filter(|p| p.matches(&query)).take(5).collect()
}

/// Feed operations over the posts slice and the gateway.
#[derive(Clone)]
pub struct FeedService {
    store: Arc<AppStore>,
    gateway: ApiGateway,
}

impl FeedService {
    pub fn new(store: Arc<AppStore>, gateway: ApiGateway) -> Self {
        Self { store, gateway }
    }

    /// Fetches all posts and mirrors them into the posts slice.
    pub async fn load_posts(&self) -> Result<()> {
        self.store.posts_mut().set_loading(true);
        match self.gateway.get_all_posts().await {
            Ok(posts) => {
                self.store.posts_mut().set_posts(posts);
                Ok(())
            }
            Err(err) => {
                self.store
                    .posts_mut()
                    .set_error(err.display_message("Error loading posts"));
                Err(err)
            }
        }
    }

    /// Evicts the cached post queries and reloads ("Try Again").
    pub async fn refresh(&self) -> Result<()> {
        self.gateway.invalidate(&[Tag::Post]).await;
        self.load_posts().await
    }

    /// Fetches one post with its comments into `current_post`. A null
    /// payload clears it.
    pub async fn load_post(&self, id: &str) -> Result<Option<Post>> {
        let post = self.gateway.get_post(id).await?;
        self.store.posts_mut().set_current_post(post.clone());
        Ok(post)
    }

    /// Fetches the posts of followed users into the feed array.
    pub async fn load_following_feed(&self) -> Result<Vec<Post>> {
        let posts = self.gateway.get_following_feed().await?;
        self.store.posts_mut().set_feed(posts.clone());
        Ok(posts)
    }

    /// Fetches the server-ranked trending posts.
    pub async fn load_trending_feed(&self) -> Result<Vec<Post>> {
        let posts = self.gateway.get_trending_feed().await?;
        self.store.posts_mut().set_trending(posts.clone());
        Ok(posts)
    }

    /// Creates a post; the server-returned post lands at the head of the
    /// posts slice. Empty content is ignored without a request.
    pub async fn create_post(&self, content: &str, visibility: Visibility) -> Result<()> {
        if content.trim().is_empty() {
            return Ok(());
        }
        let post = self.gateway.create_post(content, visibility).await?;
        self.store.posts_mut().add_post(post);
        Ok(())
    }

    /// Likes a post. The local counter is incremented immediately, as a
    /// pure projection of the expected outcome; the mutation follows,
    /// and a failure is logged but never rolled back. The next
    /// authoritative refetch overwrites the projection.
    pub async fn like_post(&self, post_id: &str) {
        self.store.posts_mut().increment_like_count(post_id);
        if let Err(err) = self.gateway.react_to_post(post_id, "like").await {
            tracing::warn!(post_id, error = %err, "like mutation failed; local count left ahead");
        }
    }

    /// Comments on a post: client-side empty check, the mutation, then
    /// the optimistic comment-count increment.
    pub async fn comment_on_post(&self, post_id: &str, content: &str) -> Result<()> {
        let content = content.trim();
        if content.is_empty() {
            return Err(RookeryError::validation("Comment cannot be empty"));
        }
        self.gateway.create_comment(post_id, content).await?;
        self.store.posts_mut().increment_comment_count(post_id);
        Ok(())
    }

    /// The posts currently visible under a filter and search query.
    pub fn visible(&self, filter: FeedFilter, search: &str) -> Vec<Post> {
        visible_posts(&self.store.posts().posts, filter, search)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{store_and_gateway, ScriptedTransport};
    use chrono::{TimeZone, Utc};
    use rookery_core::identity::Author;
    use serde_json::json;

    fn post(id: &str, content: &str, author: &str, likes: u32, comments: u32, hour: u32) -> Post {
        Post {
            id: id.to_string(),
            content: content.to_string(),
            like_count: likes,
            comment_count: comments,
            created_at: Utc.with_ymd_and_hms(2024, 5, 1, hour, 0, 0).unwrap(),
            author: Author {
                id: "a".to_string(),
                display_name: author.to_string(),
                avatar_url: None,
                user: None,
            },
            visibility: None,
            comments: Vec::new(),
        }
    }

    #[test]
    fn test_trending_orders_by_engagement_descending() {
        let posts = vec![
            post("1", "low", "A", 1, 0, 1),
            post("2", "high", "A", 5, 4, 2),
            post("3", "mid", "A", 2, 2, 3),
        ];
        let visible = visible_posts(&posts, FeedFilter::Trending, "");
        let engagements: Vec<u32> = visible.iter().map(|p| p.engagement()).collect();
        for pair in engagements.windows(2) {
            assert!(pair[0] >= pair[1]);
        }
        assert_eq!(visible[0].id, "2");
    }

    #[test]
    fn test_trending_ties_keep_original_order() {
        let posts = vec![
            post("1", "first", "A", 2, 1, 1),
            post("2", "second", "A", 1, 2, 2),
        ];
        let visible = visible_posts(&posts, FeedFilter::Trending, "");
        assert_eq!(visible[0].id, "1");
        assert_eq!(visible[1].id, "2");
    }

    #[test]
    fn test_recent_sorts_newest_first_stably() {
        let posts = vec![
            post("1", "older", "A", 0, 0, 1),
            post("2", "tie-a", "A", 0, 0, 5),
            post("3", "tie-b", "A", 0, 0, 5),
        ];
        let visible = visible_posts(&posts, FeedFilter::Recent, "");
        assert_eq!(visible[0].id, "2");
        assert_eq!(visible[1].id, "3");
        assert_eq!(visible[2].id, "1");
    }

    #[test]
    fn test_search_matches_content_and_author_case_insensitively() {
        let posts = vec![
            post("1", "Hello world", "Alice", 0, 0, 1),
            post("2", "unrelated", "Bob", 0, 0, 2),
            post("3", "something", "alicia", 0, 0, 3),
        ];
        let visible = visible_posts(&posts, FeedFilter::All, "ALIC");
        let ids: Vec<&str> = visible.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "3"]);
    }

    #[test]
    fn test_empty_search_returns_unfiltered_set() {
        let posts = vec![post("1", "a", "A", 0, 0, 1), post("2", "b", "B", 0, 0, 2)];
        assert_eq!(visible_posts(&posts, FeedFilter::All, "  ").len(), 2);
    }

    #[test]
    fn test_search_preview_caps_at_five() {
        let posts: Vec<Post> = (0..8)
            .map(|i| post(&i.to_string(), "match me", "A", 0, 0, 1))
            .collect();
        assert_eq!(search_preview(&posts, "match").len(), 5);
        assert!(search_preview(&posts, "").is_empty());
    }

    #[tokio::test]
    async fn test_created_post_lands_at_the_head() {
        let transport = ScriptedTransport::new(vec![
            Ok(json!({"allPosts": [{
                "id": "1", "content": "old", "likeCount": 0, "commentCount": 0,
                "createdAt": "2024-05-01T10:00:00Z",
                "author": {"id": "a", "displayName": "Alice"}
            }]})),
            Ok(json!({"createPost": {"post": {
                "id": "2", "content": "fresh", "likeCount": 0, "commentCount": 0,
                "createdAt": "2024-05-01T11:00:00Z",
                "author": {"id": "a", "displayName": "Alice"}
            }}})),
        ]);
        let (_dir, store, gateway) = store_and_gateway(transport);
        let service = FeedService::new(store.clone(), gateway);

        service.load_posts().await.unwrap();
        service.create_post("fresh", Visibility::Public).await.unwrap();

        let posts = store.posts();
        assert_eq!(posts.posts[0].id, "2");
        assert_eq!(posts.posts[0].content, "fresh");
    }

    #[tokio::test]
    async fn test_like_increments_immediately_even_when_mutation_fails() {
        let transport = ScriptedTransport::new(vec![
            Ok(json!({"allPosts": [{
                "id": "42", "content": "x", "likeCount": 3, "commentCount": 0,
                "createdAt": "2024-05-01T10:00:00Z",
                "author": {"id": "a", "displayName": "Alice"}
            }]})),
            Err(rookery_core::RookeryError::transport("connection refused")),
        ]);
        let (_dir, store, gateway) = store_and_gateway(transport);
        let service = FeedService::new(store.clone(), gateway);
        service.load_posts().await.unwrap();

        service.like_post("42").await;

        // no rollback: the optimistic projection stands until a refetch
        assert_eq!(store.posts().find("42").unwrap().like_count, 4);
    }

    #[tokio::test]
    async fn test_empty_comment_is_rejected_without_a_request() {
        let transport = ScriptedTransport::new(vec![]);
        let (_dir, store, gateway) = store_and_gateway(transport.clone());
        let service = FeedService::new(store, gateway);

        let err = service.comment_on_post("42", "   ").await.unwrap_err();

        assert_eq!(err.display_message("x"), "Comment cannot be empty");
        assert_eq!(transport.call_count(), 0);
    }

    #[tokio::test]
    async fn test_comment_bumps_the_counter_after_the_mutation() {
        let transport = ScriptedTransport::new(vec![
            Ok(json!({"allPosts": [{
                "id": "42", "content": "x", "likeCount": 0, "commentCount": 1,
                "createdAt": "2024-05-01T10:00:00Z",
                "author": {"id": "a", "displayName": "Alice"}
            }]})),
            Ok(json!({"createComment": {"comment": {
                "id": "7", "content": "hi", "createdAt": "2024-05-01T11:00:00Z",
                "author": {"id": "b", "displayName": "Bob"}
            }}})),
        ]);
        let (_dir, store, gateway) = store_and_gateway(transport);
        let service = FeedService::new(store.clone(), gateway);
        service.load_posts().await.unwrap();

        service.comment_on_post("42", "hi").await.unwrap();

        assert_eq!(store.posts().find("42").unwrap().comment_count, 2);
    }

    #[tokio::test]
    async fn test_load_failure_records_error_on_the_slice() {
        let transport = ScriptedTransport::new(vec![Err(rookery_core::RookeryError::server(
            vec!["backend down".to_string()],
        ))]);
        let (_dir, store, gateway) = store_and_gateway(transport);
        let service = FeedService::new(store.clone(), gateway);

        assert!(service.load_posts().await.is_err());
        assert_eq!(store.posts().error.as_deref(), Some("backend down"));
        assert!(!store.posts().loading);
    }
}
