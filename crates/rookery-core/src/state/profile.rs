//! Profile slice.

use crate::identity::UserProfile;
use crate::post::Post;

/// State for the profile currently being viewed.
#[derive(Debug, Clone, Default)]
pub struct ProfileState {
    pub current_profile: Option<UserProfile>,
    pub followers: Vec<UserProfile>,
    pub following: Vec<UserProfile>,
    pub user_posts: Vec<Post>,
    pub loading: bool,
    pub error: Option<String>,
}

impl ProfileState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the viewed profile and clears the loading flag.
    pub fn set_current_profile(&mut self, profile: Option<UserProfile>) {
        self.current_profile = profile;
        self.loading = false;
    }

    /// Replaces the viewed profile when the ids match, e.g. after an
    /// authoritative refetch.
    pub fn update_profile(&mut self, profile: UserProfile) {
        if self
            .current_profile
            .as_ref()
            .is_some_and(|p| p.id == profile.id)
        {
            self.current_profile = Some(profile);
        }
    }

    pub fn set_followers(&mut self, followers: Vec<UserProfile>) {
        self.followers = followers;
    }

    pub fn set_following(&mut self, following: Vec<UserProfile>) {
        self.following = following;
    }

    /// Optimistic follow received: +1 on the viewed profile's follower count.
    pub fn add_follower(&mut self, follower: UserProfile) {
        self.followers.push(follower);
        if let Some(profile) = self.current_profile.as_mut() {
            profile.follower_count += 1;
        }
    }

    /// Optimistic unfollow received: -1 on the viewed profile's follower count.
    pub fn remove_follower(&mut self, id: &str) {
        self.followers.retain(|f| f.id != id);
        if let Some(profile) = self.current_profile.as_mut() {
            profile.follower_count = profile.follower_count.saturating_sub(1);
        }
    }

    pub fn add_following(&mut self, followed: UserProfile) {
        self.following.push(followed);
        if let Some(profile) = self.current_profile.as_mut() {
            profile.following_count += 1;
        }
    }

    pub fn remove_following(&mut self, id: &str) {
        self.following.retain(|f| f.id != id);
        if let Some(profile) = self.current_profile.as_mut() {
            profile.following_count = profile.following_count.saturating_sub(1);
        }
    }

    pub fn set_user_posts(&mut self, posts: Vec<Post>) {
        self.user_posts = posts;
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    pub fn set_error(&mut self, error: impl Into<String>) {
        self.error = Some(error.into());
        self.loading = false;
    }
}
