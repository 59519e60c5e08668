//! Notification domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::identity::Author;

/// Minimal post reference embedded in a notification payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationPostRef {
    pub id: String,
    #[serde(default)]
    pub content: String,
}

/// A single notification.
///
/// The list is replaced wholesale on every fetch; only the mark-read
/// actions mutate entries in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: String,
    /// Server-defined kind string (follow, like, comment, ...). Kept
    /// opaque; the client only renders it.
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
    pub actor: Author,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post: Option<NotificationPostRef>,
}
