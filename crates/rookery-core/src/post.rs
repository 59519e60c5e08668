//! Post and comment domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::identity::Author;

/// Who may see a post. Sent on creation; the feed queries do not select it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    #[default]
    Public,
    Followers,
    Private,
}

impl Visibility {
    /// The wire string the backend expects as the `visibility` variable.
    pub fn as_str(&self) -> &'static str {
        match self {
            Visibility::Public => "public",
            Visibility::Followers => "followers",
            Visibility::Private => "private",
        }
    }

    /// Parses a user-supplied visibility name, case-insensitively.
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "public" => Some(Visibility::Public),
            "followers" => Some(Visibility::Followers),
            "private" => Some(Visibility::Private),
            _ => None,
        }
    }
}

/// A single post as rendered in feeds and profiles.
///
/// The like and comment counters are server-reported. Local mutation of
/// either happens only through the optimistic increment actions on
/// [`crate::state::PostsState`], paired with a server mutation; a failed
/// mutation is never rolled back, the counter stays ahead until the next
/// full refetch overwrites it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    pub content: String,
    #[serde(default)]
    pub like_count: u32,
    #[serde(default)]
    pub comment_count: u32,
    pub created_at: DateTime<Utc>,
    pub author: Author,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility: Option<Visibility>,
    /// Populated by the single-post query only.
    #[serde(default)]
    pub comments: Vec<Comment>,
}

impl Post {
    /// Engagement score used by the trending feed filter.
    pub fn engagement(&self) -> u32 {
        self.like_count + self.comment_count
    }

    /// Case-insensitive substring match over content and author name.
    pub fn matches(&self, query_lower: &str) -> bool {
        self.content.to_lowercase().contains(query_lower)
            || self.author.display_name.to_lowercase().contains(query_lower)
    }
}

/// A comment on a post.
///
/// Comments are never held in a slice of their own; creating one only
/// bumps the parent post's comment counter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub author: Author,
}
