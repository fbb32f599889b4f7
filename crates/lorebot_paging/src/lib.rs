//! Pagination sessions for query results rendered into chat.
//!
//! The remote query API only hands out forward cursors. A
//! [`CursorPaginationSession`] keeps a stack of the pages it has already shown
//! so "previous" can be answered from memory, while
//! [`OffsetPaginationSession`] pages over a list it already holds. Both
//! implement [`PageNavigator`], which is what a [`SessionRegistry`] stores
//! against the rendered reply and its owner.
//!
//! # Example
//!
//! ```
//! use lorebot_paging::{NavigationOutcome, OffsetPaginationSession, PageNavigator};
//! use serde_json::json;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let items = (1..=25).map(|n| json!(n)).collect();
//! let mut session = OffsetPaginationSession::new(items, 10);
//!
//! assert_eq!(session.view().footer(), "Page 1 of 3");
//! assert_eq!(session.next().await.unwrap(), NavigationOutcome::Moved);
//! assert_eq!(session.view().footer(), "Page 2 of 3");
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod controls;
mod cursor;
mod navigator;
mod offset;
mod page;
mod registry;

pub use controls::{NavigationAction, NavigationControls};
pub use cursor::{CursorPaginationSession, CursorPaginationSessionBuilder, PageFetcher};
pub use navigator::{NavigationOutcome, PageNavigator};
pub use offset::OffsetPaginationSession;
pub use page::{Page, PageFormatter, PageView, join_lines, truncate_content};
pub use registry::{
    ActorId, InteractionOutcome, ReplyId, SessionRegistry, SessionRegistryConfig,
    SessionRegistryConfigBuilder, SharedSession,
};
