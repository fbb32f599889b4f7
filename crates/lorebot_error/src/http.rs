//! Failures of the Discord calls that draw replies.

/// The reply edit that was being attempted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum HttpTarget {
    /// Replacing a deferred command reply with plain text.
    #[display("text reply")]
    TextReply,

    /// Replacing a deferred command reply with a page and its buttons.
    #[display("paged reply")]
    PagedReply,
}

/// A reply edit rejected by Discord.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("HTTP Error editing {}: {} at line {} in {}", target, message, line, file)]
pub struct HttpError {
    target: HttpTarget,
    message: String,
    line: u32,
    file: &'static str,
}

impl HttpError {
    /// Record a failed edit of `target`.
    ///
    /// # Examples
    ///
    /// ```
    /// use lorebot_error::{HttpError, HttpTarget};
    ///
    /// let err = HttpError::new(HttpTarget::PagedReply, "Unknown interaction");
    /// assert_eq!(*err.target(), HttpTarget::PagedReply);
    /// assert!(err.to_string().contains("editing paged reply: Unknown interaction"));
    /// ```
    #[track_caller]
    pub fn new(target: HttpTarget, message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            target,
            message: message.into(),
            line: location.line(),
            file: location.file(),
        }
    }

    /// The edit that failed.
    pub fn target(&self) -> &HttpTarget {
        &self.target
    }

    /// Discord's description of the failure.
    pub fn message(&self) -> &str {
        &self.message
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_points_at_caller() {
        let err = HttpError::new(HttpTarget::TextReply, "Missing Access");
        assert!(err.to_string().ends_with(&format!("in {}", file!())));
        assert_eq!(err.message(), "Missing Access");
    }
}
