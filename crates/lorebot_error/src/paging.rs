//! Pagination errors.

/// Specific pagination failure conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum PagingErrorKind {
    /// The page fetch callback failed or produced nothing.
    #[display("Page fetch failed: {}", _0)]
    FetchFailed(String),

    /// A fetched page did not have the expected connection shape.
    #[display("Invalid page: {}", _0)]
    InvalidPage(String),
}

/// Pagination error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Paging Error: {} at line {} in {}", kind, line, file)]
pub struct PagingError {
    kind: PagingErrorKind,
    line: u32,
    file: &'static str,
}

impl PagingError {
    /// Create a new pagination error with caller location tracking.
    #[track_caller]
    pub fn new(kind: PagingErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &PagingErrorKind {
        &self.kind
    }
}
