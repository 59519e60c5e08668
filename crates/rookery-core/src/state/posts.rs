//! Posts slice.

use crate::post::Post;

/// In-memory cache of posts, mutated by explicit actions.
///
/// `posts` mirrors the all-posts query; `feed` and `trending` hold the
/// narrower feed variants when a view requests them. The optimistic
/// counter increments touch both `posts` and `feed` so a post visible in
/// either list stays consistent with the user's action.
#[derive(Debug, Clone, Default)]
pub struct PostsState {
    pub posts: Vec<Post>,
    pub current_post: Option<Post>,
    pub feed: Vec<Post>,
    pub trending: Vec<Post>,
    pub loading: bool,
    pub error: Option<String>,
    pub has_more: bool,
}

impl PostsState {
    pub fn new() -> Self {
        Self {
            has_more: true,
            ..Self::default()
        }
    }

    /// Replaces the whole posts array and clears the loading flag.
    pub fn set_posts(&mut self, posts: Vec<Post>) {
        self.posts = posts;
        self.loading = false;
    }

    /// Inserts a freshly created post at the head.
    pub fn add_post(&mut self, post: Post) {
        self.posts.insert(0, post);
    }

    /// Replaces the first post with a matching id, if any.
    pub fn update_post(&mut self, post: Post) {
        if let Some(existing) = self.posts.iter_mut().find(|p| p.id == post.id) {
            *existing = post;
        }
    }

    /// Removes every post with the given id. Defined for completeness;
    /// no view currently dispatches it.
    pub fn delete_post(&mut self, id: &str) {
        self.posts.retain(|p| p.id != id);
    }

    pub fn set_current_post(&mut self, post: Option<Post>) {
        self.current_post = post;
    }

    pub fn set_feed(&mut self, feed: Vec<Post>) {
        self.feed = feed;
    }

    pub fn append_to_feed(&mut self, posts: Vec<Post>) {
        self.feed.extend(posts);
    }

    pub fn set_trending(&mut self, posts: Vec<Post>) {
        self.trending = posts;
    }

    /// Optimistic like. Bumps the counter wherever the post appears.
    pub fn increment_like_count(&mut self, id: &str) {
        if let Some(post) = self.posts.iter_mut().find(|p| p.id == id) {
            post.like_count += 1;
        }
        if let Some(post) = self.feed.iter_mut().find(|p| p.id == id) {
            post.like_count += 1;
        }
    }

    /// Optimistic comment count. Bumps the counter wherever the post appears.
    pub fn increment_comment_count(&mut self, id: &str) {
        if let Some(post) = self.posts.iter_mut().find(|p| p.id == id) {
            post.comment_count += 1;
        }
        if let Some(post) = self.feed.iter_mut().find(|p| p.id == id) {
            post.comment_count += 1;
        }
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    pub fn set_error(&mut self, error: impl Into<String>) {
        self.error = Some(error.into());
        self.loading = false;
    }

    pub fn set_has_more(&mut self, has_more: bool) {
        self.has_more = has_more;
    }

    /// Finds a post by id in the main array.
    pub fn find(&self, id: &str) -> Option<&Post> {
        self.posts.iter().find(|p| p.id == id)
    }
}
