//! Top-level error wrapper types.

use crate::{
    BuilderError, ConfigError, HttpError, IngestError, JsonError, PagingError, QueryError,
};

/// Every error condition lorebot can raise.
///
/// # Examples
///
/// ```
/// use lorebot_error::{HttpError, HttpTarget, LorebotError};
///
/// let http_err = HttpError::new(HttpTarget::TextReply, "Unknown interaction");
/// let err: LorebotError = http_err.into();
/// assert!(format!("{}", err).contains("HTTP Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum LorebotErrorKind {
    /// Discord rejected a reply edit
    #[from(HttpError)]
    Http(HttpError),
    /// Mutation input could not be encoded
    #[from(JsonError)]
    Json(JsonError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Builder error
    #[from(BuilderError)]
    Builder(BuilderError),
    /// Remote query failed
    #[from(QueryError)]
    Query(QueryError),
    /// Paste could not be ingested
    #[from(IngestError)]
    Ingest(IngestError),
    /// Pagination failure
    #[from(PagingError)]
    Paging(PagingError),
}

/// Lorebot error with kind discrimination.
///
/// # Examples
///
/// ```
/// use lorebot_error::{ConfigError, ConfigErrorKind, LorebotResult};
///
/// fn might_fail() -> LorebotResult<()> {
///     Err(ConfigError::new(ConfigErrorKind::Invalid("missing graphql.endpoint".into())))?
/// }
///
/// assert!(might_fail().is_err());
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Lorebot Error: {}", _0)]
pub struct LorebotError(Box<LorebotErrorKind>);

impl LorebotError {
    /// Create a new error from a kind.
    pub fn new(kind: LorebotErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &LorebotErrorKind {
        &self.0
    }
}

// Generic From implementation for any type that converts to LorebotErrorKind
impl<T> From<T> for LorebotError
where
    T: Into<LorebotErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for lorebot operations.
pub type LorebotResult<T> = std::result::Result<T, LorebotError>;
