//! Paste ingestion errors.

/// Specific ingestion failure conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum IngestErrorKind {
    /// A block header matched but nothing usable followed it.
    #[display("Malformed {} block: {}", kind, reason)]
    MalformedBlock {
        /// Block grammar that matched ("lore" or "equipment")
        kind: String,
        /// Why the block was rejected
        reason: String,
    },
}

/// Ingestion error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Ingest Error: {} at line {} in {}", kind, line, file)]
pub struct IngestError {
    kind: IngestErrorKind,
    line: u32,
    file: &'static str,
}

impl IngestError {
    /// Create a new ingestion error with caller location tracking.
    #[track_caller]
    pub fn new(kind: IngestErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &IngestErrorKind {
        &self.kind
    }
}
