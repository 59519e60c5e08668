//! GraphQL transport over HTTP.
//!
//! Every request is a POST carrying `{"query": ..., "variables": ...}`;
//! every response either carries a `data` object or a list of
//! `{message}` error entries. The bearer credential is attached as
//! `Authorization: JWT <token>` when present; its absence never blocks a
//! request, the server is expected to reject unauthenticated calls.

use async_trait::async_trait;
use reqwest::Client;
use rookery_core::{Result, RookeryError};
use serde::Deserialize;
use serde_json::Value;

/// Seam between the gateway and the wire.
///
/// Production uses [`HttpTransport`]; tests substitute an in-memory
/// implementation so no network is involved.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Executes one GraphQL operation and returns its `data` object.
    ///
    /// # Arguments
    ///
    /// * `document` - The operation document.
    /// * `variables` - The variables mapping (a JSON object).
    /// * `token` - The current bearer credential, when one exists.
    async fn execute(&self, document: &str, variables: Value, token: Option<&str>)
        -> Result<Value>;
}

#[derive(Debug, Deserialize)]
struct GraphQlErrorEntry {
    message: String,
}

#[derive(Debug, Deserialize)]
struct GraphQlEnvelope {
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    errors: Option<Vec<GraphQlErrorEntry>>,
}

/// Transport implementation that talks to the configured HTTP endpoint.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    endpoint: String,
}

impl HttpTransport {
    /// Creates a transport for the given endpoint.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(
        &self,
        document: &str,
        variables: Value,
        token: Option<&str>,
    ) -> Result<Value> {
        let body = serde_json::json!({
            "query": document,
            "variables": variables,
        });

        let mut request = self
            .client
            .post(&self.endpoint)
            .header("content-type", "application/json")
            .json(&body);

        if let Some(token) = token {
            request = request.header("Authorization", format!("JWT {}", token));
        }

        tracing::debug!(endpoint = %self.endpoint, "dispatching GraphQL request");
        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        let envelope: GraphQlEnvelope = serde_json::from_str(&text).map_err(|_| {
            RookeryError::transport(format!(
                "unexpected response from server (status {})",
                status
            ))
        })?;

        if let Some(errors) = envelope.errors {
            if !errors.is_empty() {
                return Err(RookeryError::server(
                    errors.into_iter().map(|e| e.message).collect(),
                ));
            }
        }

        match envelope.data {
            Some(data) => Ok(data),
            None if !status.is_success() => Err(RookeryError::transport(format!(
                "server responded with status {}",
                status
            ))),
            None => Err(RookeryError::transport(
                "response carried neither data nor errors".to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_parses_errors() {
        let envelope: GraphQlEnvelope =
            serde_json::from_str(r#"{"errors":[{"message":"Invalid credentials"}]}"#).unwrap();
        let errors = envelope.errors.unwrap();
        assert_eq!(errors[0].message, "Invalid credentials");
        assert!(envelope.data.is_none());
    }

    #[test]
    fn test_envelope_parses_data() {
        let envelope: GraphQlEnvelope =
            serde_json::from_str(r#"{"data":{"allPosts":[]}}"#).unwrap();
        assert!(envelope.data.is_some());
        assert!(envelope.errors.is_none());
    }
}
