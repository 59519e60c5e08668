//! Application layer: the app store and the use-case services that sit
//! between the views and the API gateway.

pub mod auth_service;
pub mod feed_service;
pub mod notification_service;
pub mod profile_service;
pub mod session_store;
pub mod store;

#[cfg(test)]
mod test_support;

pub use auth_service::{AuthService, RegisterForm};
pub use feed_service::{search_preview, visible_posts, FeedFilter, FeedService};
pub use notification_service::NotificationService;
pub use profile_service::ProfileService;
pub use session_store::SessionStore;
pub use store::AppStore;
