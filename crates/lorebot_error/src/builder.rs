//! Errors from assembling paging sessions and other built values.

/// Specific builder error conditions.
///
/// Each variant names the type being built so a log line says which
/// builder was left incomplete.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum BuilderErrorKind {
    /// A required setter was never called.
    #[display("{} is missing '{}'", builder, field)]
    MissingField {
        /// Type being built.
        builder: &'static str,
        /// Setter that was skipped.
        field: String,
    },

    /// Every field was set but the combination was rejected.
    #[display("{} rejected its settings: {}", builder, reason)]
    Invalid {
        /// Type being built.
        builder: &'static str,
        /// Why the settings were rejected.
        reason: String,
    },
}

/// Builder error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Builder Error: {} at line {} in {}", kind, line, file)]
pub struct BuilderError {
    kind: BuilderErrorKind,
    line: u32,
    file: &'static str,
}

impl BuilderError {
    /// Create a new builder error with caller location tracking.
    ///
    /// # Examples
    ///
    /// ```
    /// use lorebot_error::{BuilderError, BuilderErrorKind};
    ///
    /// let err = BuilderError::new(BuilderErrorKind::MissingField {
    ///     builder: "CursorPaginationSession",
    ///     field: "fetcher".into(),
    /// });
    /// assert!(err.to_string().contains("CursorPaginationSession is missing 'fetcher'"));
    /// ```
    #[track_caller]
    pub fn new(kind: BuilderErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &BuilderErrorKind {
        &self.kind
    }
}
