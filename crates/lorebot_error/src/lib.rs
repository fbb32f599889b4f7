//! Error types for lorebot.
//!
//! Every error follows the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum names the specific condition
//! - `*Error` struct wraps the kind with the source location it was raised at
//! - constructors use `#[track_caller]` so the location is captured automatically
//!
//! # Examples
//!
//! ```
//! use lorebot_error::{LorebotResult, QueryError, QueryErrorKind};
//!
//! fn fetch_page() -> LorebotResult<String> {
//!     Err(QueryError::new(QueryErrorKind::Status(502)))?
//! }
//!
//! assert!(fetch_page().is_err());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod builder;
mod config;
mod error;
mod http;
mod ingest;
mod json;
mod paging;
mod query;

pub use builder::{BuilderError, BuilderErrorKind};
pub use config::{ConfigError, ConfigErrorKind};
pub use error::{LorebotError, LorebotErrorKind, LorebotResult};
pub use http::{HttpError, HttpTarget};
pub use ingest::{IngestError, IngestErrorKind};
pub use json::JsonError;
pub use paging::{PagingError, PagingErrorKind};
pub use query::{QueryError, QueryErrorKind};
