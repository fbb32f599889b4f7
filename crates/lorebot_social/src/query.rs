//! Query execution against the remote lore store.
//!
//! The store speaks GraphQL over HTTP. A transport failure and a response
//! carrying an `errors` list both come back as a [`QueryError`], so callers
//! handle them the same way.

use async_trait::async_trait;
use lorebot_error::{LorebotResult, QueryError, QueryErrorKind};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use tracing::{debug, error, instrument};

/// Executes a query document with variables and returns the result's `data`.
#[async_trait]
pub trait QueryExecutor: Send + Sync {
    /// Run `document` with `variables`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the endpoint answers with a
    /// non-success status, or the result carries an error list.
    async fn execute(&self, document: &str, variables: JsonValue) -> LorebotResult<JsonValue>;
}

#[derive(Debug, Serialize)]
struct GraphQlRequest<'a> {
    query: &'a str,
    variables: JsonValue,
}

#[derive(Debug, Deserialize)]
struct GraphQlResponse {
    #[serde(default)]
    data: Option<JsonValue>,
    #[serde(default)]
    errors: Vec<GraphQlErrorEntry>,
}

#[derive(Debug, Deserialize)]
struct GraphQlErrorEntry {
    #[serde(default)]
    message: String,
}

/// Pull `data` out of a raw GraphQL response body.
///
/// # Errors
///
/// Fails when the body carries a non-empty `errors` list, has no `data`, or
/// is not a GraphQL response at all.
///
/// # Examples
///
/// ```
/// use lorebot_social::extract_data;
/// use serde_json::json;
///
/// let data = extract_data(json!({"data": {"ok": true}})).unwrap();
/// assert_eq!(data["ok"], true);
///
/// assert!(extract_data(json!({"data": null, "errors": [{"message": "denied"}]})).is_err());
/// ```
pub fn extract_data(body: JsonValue) -> LorebotResult<JsonValue> {
    let response: GraphQlResponse = serde_json::from_value(body)
        .map_err(|e| QueryError::new(QueryErrorKind::Decode(e.to_string())))?;

    if !response.errors.is_empty() {
        let messages: Vec<String> = response.errors.into_iter().map(|e| e.message).collect();
        error!(errors = ?messages, "Query returned errors");
        return Err(QueryError::new(QueryErrorKind::GraphQl(messages)).into());
    }

    match response.data {
        Some(data) if !data.is_null() => Ok(data),
        _ => Err(QueryError::new(QueryErrorKind::MissingData("data".to_string())).into()),
    }
}

/// GraphQL-over-HTTP client for the lore store.
#[derive(Clone)]
pub struct GraphQlClient {
    client: Client,
    endpoint: String,
    token: Option<String>,
}

impl GraphQlClient {
    /// Create a client for `endpoint`, sending `token` as a bearer token when
    /// given.
    pub fn new(endpoint: impl Into<String>, token: Option<String>) -> Self {
        let endpoint = endpoint.into();
        debug!(endpoint = %endpoint, authenticated = token.is_some(), "Creating GraphQL client");
        Self {
            client: Client::new(),
            endpoint,
            token,
        }
    }

    /// Endpoint queries are posted to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl QueryExecutor for GraphQlClient {
    #[instrument(skip(self, document, variables), fields(endpoint = %self.endpoint))]
    async fn execute(&self, document: &str, variables: JsonValue) -> LorebotResult<JsonValue> {
        debug!(variables = %variables, "Sending query");

        let mut request = self.client.post(&self.endpoint).json(&GraphQlRequest {
            query: document,
            variables,
        });
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|e| {
            error!(error = ?e, "Failed to reach query endpoint");
            QueryError::new(QueryErrorKind::Transport(e.to_string()))
        })?;

        if !response.status().is_success() {
            let status = response.status();
            error!(status = %status, "Query endpoint returned error status");
            return Err(QueryError::new(QueryErrorKind::Status(status.as_u16())).into());
        }

        let body: JsonValue = response.json().await.map_err(|e| {
            error!(error = ?e, "Failed to decode query response");
            QueryError::new(QueryErrorKind::Decode(e.to_string()))
        })?;

        extract_data(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lorebot_error::LorebotErrorKind;
    use serde_json::json;

    fn query_kind(body: JsonValue) -> QueryErrorKind {
        match extract_data(body).unwrap_err().kind() {
            LorebotErrorKind::Query(e) => e.kind().clone(),
            other => panic!("unexpected {other}"),
        }
    }

    #[test]
    fn test_error_list_wins_over_data() {
        let kind = query_kind(json!({
            "data": {"addOrUpdateLore": null},
            "errors": [{"message": "bad input"}, {"message": "try again"}]
        }));
        assert_eq!(
            kind,
            QueryErrorKind::GraphQl(vec!["bad input".into(), "try again".into()])
        );
    }

    #[test]
    fn test_missing_data() {
        assert_eq!(
            query_kind(json!({})),
            QueryErrorKind::MissingData("data".into())
        );
    }

    #[test]
    fn test_not_a_response() {
        assert!(matches!(query_kind(json!([1, 2])), QueryErrorKind::Decode(_)));
    }
}
