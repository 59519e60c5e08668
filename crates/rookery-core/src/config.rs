//! Client configuration domain model.

use serde::{Deserialize, Serialize};

/// Compiled-in default GraphQL endpoint, matching the backend's local
/// development server.
pub const DEFAULT_GRAPHQL_URL: &str = "http://localhost:8000/graphql/";

/// Root configuration loaded from ~/.config/rookery/config.toml.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ClientConfig {
    /// GraphQL endpoint URL. Falls back to [`DEFAULT_GRAPHQL_URL`].
    pub graphql_url: Option<String>,
}

impl ClientConfig {
    /// The endpoint to use, applying the compiled default.
    pub fn graphql_url(&self) -> &str {
        self.graphql_url.as_deref().unwrap_or(DEFAULT_GRAPHQL_URL)
    }
}
