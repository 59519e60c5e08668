//! Identity domain models.
//!
//! The backend exposes identities at two granularities: the full profile
//! (`UserProfile`) and the embedded author subset attached to posts,
//! comments, and notifications (`Author`). Counts are server-reported;
//! the client only adjusts them optimistically on explicit follow and
//! unfollow actions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::post::Post;

/// Nested account reference carrying the login username.
///
/// The backend nests the username one level down (`user { username }`)
/// on both profiles and authors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountRef {
    pub username: String,
}

/// Embedded identity subset attached to posts, comments and notifications.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    pub id: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
    /// Present only where the operation's field selection includes it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<AccountRef>,
}

impl Author {
    /// Returns the login username when the payload carried it.
    pub fn username(&self) -> Option<&str> {
        self.user.as_ref().map(|u| u.username.as_str())
    }
}

/// A full profile as returned by `me` and `profileByUsername`.
///
/// Not every operation selects every field, so everything beyond the id
/// is defaulted when absent from the payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub follower_count: u32,
    #[serde(default)]
    pub following_count: u32,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<AccountRef>,
    /// The profile's posts, populated by `profileByUsername` only.
    #[serde(default)]
    pub posts: Vec<Post>,
}

impl UserProfile {
    /// Returns the login username when the payload carried it.
    pub fn username(&self) -> Option<&str> {
        self.user.as_ref().map(|u| u.username.as_str())
    }

    /// Display name with the original client's placeholder fallback.
    pub fn display_name_or_placeholder(&self) -> &str {
        if self.display_name.is_empty() {
            "User"
        } else {
            &self.display_name
        }
    }
}
