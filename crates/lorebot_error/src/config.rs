//! Errors from layering and decoding `lorebot.toml`.

/// Which stage of configuration loading failed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ConfigErrorKind {
    /// A layer could not be read or merged.
    #[display("Could not load layers: {}", _0)]
    Load(String),

    /// The merged layers did not fit the settings shape.
    #[display("Invalid settings: {}", _0)]
    Invalid(String),
}

/// Configuration error with source location.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Configuration Error: {} at line {} in {}", kind, line, file)]
pub struct ConfigError {
    kind: ConfigErrorKind,
    line: u32,
    file: &'static str,
}

impl ConfigError {
    /// Create a new configuration error at the current location.
    ///
    /// # Examples
    ///
    /// ```
    /// use lorebot_error::{ConfigError, ConfigErrorKind};
    ///
    /// let err = ConfigError::new(ConfigErrorKind::Invalid(
    ///     "paging.page_size: expected u32".into(),
    /// ));
    /// assert!(matches!(err.kind(), ConfigErrorKind::Invalid(_)));
    /// assert!(err.to_string().contains("page_size"));
    /// ```
    #[track_caller]
    pub fn new(kind: ConfigErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &ConfigErrorKind {
        &self.kind
    }
}
