//! GraphQL API layer: transport, operation registry, response cache,
//! and the gateway the application services talk to.

pub mod cache;
pub mod gateway;
pub mod operation;
pub mod transport;

pub use cache::ResponseCache;
pub use gateway::{ApiGateway, AuthCredentials, TokenProvider};
pub use operation::Tag;
pub use transport::{HttpTransport, Transport};
