//! Navigation contract shared by every pagination variant.

use crate::PageView;
use async_trait::async_trait;
use lorebot_error::LorebotResult;

/// Result of a navigation step that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationOutcome {
    /// The session now shows a different page.
    Moved,
    /// The step's precondition did not hold; nothing changed.
    AtBoundary,
}

/// A paged result a viewer can step through.
///
/// A failed step returns an error and must leave the session exactly as it
/// was, so the viewer can retry the same action.
#[async_trait]
pub trait PageNavigator: Send + Sync {
    /// Advance one page.
    async fn next(&mut self) -> LorebotResult<NavigationOutcome>;

    /// Go back one page.
    async fn previous(&mut self) -> LorebotResult<NavigationOutcome>;

    /// Render the current page.
    fn view(&self) -> PageView;
}
