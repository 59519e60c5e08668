//! Entity slices.
//!
//! Each slice exclusively owns its arrays of entities and mutates them
//! through a small set of named, pure transitions. Lookups are linear
//! scans by id and duplicate ids are tolerated; no relational integrity
//! is enforced beyond that.

mod notifications;
mod posts;
mod profile;

pub use notifications::NotificationsState;
pub use posts::PostsState;
pub use profile::ProfileState;
