//! Id helpers.
//!
//! Ids are opaque strings throughout the client, but several backend
//! mutations take `Int!` variables. Relay-style global ids arrive as
//! `"Type:42"`, so the numeric part is the trailing segment.

/// Extracts the numeric part of an id.
///
/// Accepts plain integers (`"42"`) and colon-separated global ids
/// (`"Post:42"`), taking the last segment. Returns `None` for anything
/// else.
pub fn numeric_id(id: &str) -> Option<i64> {
    if id.is_empty() {
        return None;
    }

    if let Ok(n) = id.parse::<i64>() {
        return Some(n);
    }

    if id.contains(':') {
        let last = id.rsplit(':').next()?;
        return last.parse::<i64>().ok();
    }

    None
}
