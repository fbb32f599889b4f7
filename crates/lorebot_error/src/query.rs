//! Errors from the remote query-execution collaborator.
//!
//! A transport failure and a result that carries a GraphQL `errors` list are
//! both represented here, so callers treat them the same way: the operation
//! failed.

/// Specific query failure conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum QueryErrorKind {
    /// The request never produced a response.
    #[display("Transport failure: {}", _0)]
    Transport(String),

    /// The endpoint answered with a non-success HTTP status.
    #[display("Endpoint returned HTTP status {}", _0)]
    Status(u16),

    /// The result carried a non-empty error list.
    #[display("GraphQL errors: {}", _0.join("; "))]
    GraphQl(Vec<String>),

    /// An expected field was absent or null in the result.
    #[display("Missing data at '{}'", _0)]
    MissingData(String),

    /// The result could not be decoded into the expected shape.
    #[display("Could not decode result: {}", _0)]
    Decode(String),
}

/// Query error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Query Error: {} at line {} in {}", kind, line, file)]
pub struct QueryError {
    kind: QueryErrorKind,
    line: u32,
    file: &'static str,
}

impl QueryError {
    /// Create a new query error with caller location tracking.
    ///
    /// # Examples
    ///
    /// ```
    /// use lorebot_error::{QueryError, QueryErrorKind};
    ///
    /// let err = QueryError::new(QueryErrorKind::GraphQl(vec!["bad input".into()]));
    /// assert!(err.to_string().contains("bad input"));
    /// ```
    #[track_caller]
    pub fn new(kind: QueryErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &QueryErrorKind {
        &self.kind
    }
}
