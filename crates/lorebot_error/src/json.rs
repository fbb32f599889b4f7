//! Failures encoding a record for a store mutation.

/// A record that could not be turned into mutation variables.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("JSON Error encoding {} input: {} at line {} in {}", mutation, message, line, file)]
pub struct JsonError {
    mutation: String,
    message: String,
    line: u32,
    file: &'static str,
}

impl JsonError {
    /// Record a failure to encode the input of `mutation`.
    ///
    /// # Examples
    ///
    /// ```
    /// use lorebot_error::JsonError;
    ///
    /// let err = JsonError::new("addOrUpdateLore", "key must be a string");
    /// assert_eq!(err.mutation(), "addOrUpdateLore");
    /// assert!(err.to_string().contains("encoding addOrUpdateLore input"));
    /// ```
    #[track_caller]
    pub fn new(mutation: impl Into<String>, message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            mutation: mutation.into(),
            message: message.into(),
            line: location.line(),
            file: location.file(),
        }
    }

    /// Name of the mutation whose input failed to encode.
    pub fn mutation(&self) -> &str {
        &self.mutation
    }

    /// The encoder's message.
    pub fn message(&self) -> &str {
        &self.message
    }
}
