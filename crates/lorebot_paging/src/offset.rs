//! Offset pagination over an item list held in memory.

use crate::{NavigationOutcome, PageFormatter, PageNavigator, PageView, join_lines};
use async_trait::async_trait;
use lorebot_error::{LorebotResult, PagingError, PagingErrorKind};
use serde_json::Value as JsonValue;
use tracing::{debug, instrument};

/// Pages over a fixed list. Unlike the cursor session it can jump to any page.
pub struct OffsetPaginationSession {
    items: Vec<JsonValue>,
    items_per_page: usize,
    current: usize,
    formatter: PageFormatter,
    title: Option<String>,
}

impl OffsetPaginationSession {
    /// Page over `items`, `items_per_page` at a time (at least one).
    pub fn new(items: Vec<JsonValue>, items_per_page: usize) -> Self {
        Self {
            items,
            items_per_page: items_per_page.max(1),
            current: 0,
            formatter: join_lines(),
            title: None,
        }
    }

    /// Replace the item formatter.
    pub fn with_formatter(mut self, formatter: PageFormatter) -> Self {
        self.formatter = formatter;
        self
    }

    /// Set the heading shown above every page.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Number of pages; an empty list still has one (empty) page.
    pub fn page_count(&self) -> usize {
        self.items.len().div_ceil(self.items_per_page).max(1)
    }

    /// Zero-based index of the current page.
    pub fn current_page(&self) -> usize {
        self.current
    }

    /// Jump to page `page` (1-based).
    ///
    /// # Errors
    ///
    /// Returns an error if the page does not exist.
    #[instrument(skip(self), fields(pages = self.page_count()))]
    pub fn go_to_page(&mut self, page: usize) -> LorebotResult<NavigationOutcome> {
        if page == 0 || page > self.page_count() {
            return Err(PagingError::new(PagingErrorKind::InvalidPage(format!(
                "page {page} of {}",
                self.page_count()
            )))
            .into());
        }
        if page - 1 == self.current {
            return Ok(NavigationOutcome::AtBoundary);
        }
        self.current = page - 1;
        debug!(page, "Jumped to page");
        Ok(NavigationOutcome::Moved)
    }

    fn page_items(&self) -> &[JsonValue] {
        let start = (self.current * self.items_per_page).min(self.items.len());
        let end = (start + self.items_per_page).min(self.items.len());
        &self.items[start..end]
    }
}

#[async_trait]
impl PageNavigator for OffsetPaginationSession {
    async fn next(&mut self) -> LorebotResult<NavigationOutcome> {
        if self.current + 1 >= self.page_count() {
            return Ok(NavigationOutcome::AtBoundary);
        }
        self.current += 1;
        Ok(NavigationOutcome::Moved)
    }

    async fn previous(&mut self) -> LorebotResult<NavigationOutcome> {
        if self.current == 0 {
            return Ok(NavigationOutcome::AtBoundary);
        }
        self.current -= 1;
        Ok(NavigationOutcome::Moved)
    }

    fn view(&self) -> PageView {
        PageView::new(
            (self.formatter)(self.page_items()),
            format!("Page {} of {}", self.current + 1, self.page_count()),
            self.current + 1 < self.page_count(),
            self.current > 0,
        )
        .with_title(self.title.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn numbers(n: usize) -> Vec<JsonValue> {
        (1..=n).map(|i| json!(i)).collect()
    }

    #[test]
    fn test_page_count_rounds_up() {
        assert_eq!(OffsetPaginationSession::new(numbers(21), 10).page_count(), 3);
        assert_eq!(OffsetPaginationSession::new(numbers(20), 10).page_count(), 2);
        assert_eq!(OffsetPaginationSession::new(Vec::new(), 10).page_count(), 1);
    }

    #[test]
    fn test_go_to_page_bounds() {
        let mut session = OffsetPaginationSession::new(numbers(21), 10);
        assert!(session.go_to_page(0).is_err());
        assert!(session.go_to_page(4).is_err());
        assert_eq!(session.go_to_page(3).unwrap(), NavigationOutcome::Moved);
        assert_eq!(session.view().content(), "21");
        assert!(!session.view().has_next());
    }

    #[tokio::test]
    async fn test_step_through_and_back() {
        let mut session = OffsetPaginationSession::new(numbers(12), 5);
        assert_eq!(session.previous().await.unwrap(), NavigationOutcome::AtBoundary);
        session.next().await.unwrap();
        session.next().await.unwrap();
        assert_eq!(session.next().await.unwrap(), NavigationOutcome::AtBoundary);
        assert_eq!(session.view().content(), "11\n12");
        session.previous().await.unwrap();
        assert_eq!(session.current_page(), 1);
    }
}
