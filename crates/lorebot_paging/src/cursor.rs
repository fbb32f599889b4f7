//! Cursor-backed pagination with client-side history.

use crate::{NavigationOutcome, Page, PageFormatter, PageNavigator, PageView, join_lines};
use async_trait::async_trait;
use lorebot_error::{
    BuilderError, BuilderErrorKind, LorebotResult, PagingError, PagingErrorKind,
};
use std::sync::Arc;
use tracing::{debug, instrument, warn};

/// Largest page size a session accepts.
const MAX_PAGE_SIZE: usize = 50;

/// Fetches the page that follows a cursor.
///
/// Implementations re-run the original query with `after = cursor`. Returning
/// `Ok(None)` means the remote side answered but produced no page, which the
/// session treats as a failed fetch.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch the page after `cursor`.
    async fn fetch_after(&self, cursor: &str) -> LorebotResult<Option<Page>>;
}

/// Pagination over a forward-only cursor API.
///
/// Going forward fetches; going back pops the page stack and restores the
/// earlier page exactly as it was shown, without asking the remote side for a
/// backward cursor. There is deliberately no jump-to-page.
///
/// # Example
///
/// ```
/// use async_trait::async_trait;
/// use lorebot_error::LorebotResult;
/// use lorebot_paging::{CursorPaginationSession, Page, PageFetcher, PageNavigator};
/// use serde_json::json;
/// use std::sync::Arc;
///
/// struct SecondPage;
///
/// #[async_trait]
/// impl PageFetcher for SecondPage {
///     async fn fetch_after(&self, _cursor: &str) -> LorebotResult<Option<Page>> {
///         Ok(Some(Page::new(vec![json!("b")], None, false, true)))
///     }
/// }
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let mut session = CursorPaginationSession::builder()
///     .fetcher(Arc::new(SecondPage))
///     .first_page(Page::new(vec![json!("a")], Some("c1".into()), true, false))
///     .build()
///     .unwrap();
///
/// session.next().await.unwrap();
/// assert_eq!(session.view().content(), "b");
/// assert_eq!(session.view().footer(), "Page 2");
/// # }
/// ```
#[derive(derive_builder::Builder)]
#[builder(
    pattern = "owned",
    build_fn(private, name = "build_internal", validate = "Self::validate")
)]
pub struct CursorPaginationSession {
    /// Source of following pages.
    fetcher: Arc<dyn PageFetcher>,
    /// Page currently shown.
    #[builder(setter(name = "first_page"))]
    page: Page,
    /// Renders the current items.
    #[builder(default = "join_lines()")]
    formatter: PageFormatter,
    /// Heading shown above every page.
    #[builder(default, setter(into, strip_option))]
    title: Option<String>,
    /// Items per page, used to turn a total count into a page count.
    #[builder(default = "10")]
    page_size: usize,
    /// Pages already shown, most recent last.
    #[builder(setter(skip))]
    history: Vec<Page>,
}

impl CursorPaginationSessionBuilder {
    fn validate(&self) -> Result<(), String> {
        match self.page_size {
            Some(size) if !(1..=MAX_PAGE_SIZE).contains(&size) => Err(format!(
                "page_size must be between 1 and {MAX_PAGE_SIZE}, got {size}"
            )),
            _ => Ok(()),
        }
    }

    /// Build the session.
    ///
    /// # Errors
    ///
    /// Returns an error if the fetcher or first page is missing, or the page
    /// size is out of range.
    pub fn build(self) -> LorebotResult<CursorPaginationSession> {
        self.build_internal().map_err(|e| {
            let kind = match e {
                CursorPaginationSessionBuilderError::UninitializedField(field) => {
                    BuilderErrorKind::MissingField {
                        builder: "CursorPaginationSession",
                        field: field.to_string(),
                    }
                }
                CursorPaginationSessionBuilderError::ValidationError(msg) => {
                    BuilderErrorKind::Invalid {
                        builder: "CursorPaginationSession",
                        reason: msg,
                    }
                }
            };
            BuilderError::new(kind).into()
        })
    }
}

impl CursorPaginationSession {
    /// Start building a session.
    pub fn builder() -> CursorPaginationSessionBuilder {
        CursorPaginationSessionBuilder::default()
    }

    /// Page currently shown.
    pub fn page(&self) -> &Page {
        &self.page
    }

    /// Number of pages on the history stack.
    pub fn depth(&self) -> usize {
        self.history.len()
    }

    fn footer(&self) -> String {
        let number = self.depth() + 1;
        match self.page.total_count() {
            Some(total) => {
                let pages = total.div_ceil(self.page_size as u64).max(1);
                format!("Page {number} of {pages}")
            }
            None => format!("Page {number}"),
        }
    }
}

#[async_trait]
impl PageNavigator for CursorPaginationSession {
    #[instrument(skip(self), fields(depth = self.history.len()))]
    async fn next(&mut self) -> LorebotResult<NavigationOutcome> {
        let cursor = match (self.page.has_next(), self.page.cursor()) {
            (true, Some(cursor)) => cursor.clone(),
            _ => {
                debug!("No next page to fetch");
                return Ok(NavigationOutcome::AtBoundary);
            }
        };

        let fetched = self.fetcher.fetch_after(&cursor).await.map_err(|e| {
            warn!(error = %e, "Page fetch failed");
            PagingError::new(PagingErrorKind::FetchFailed(e.to_string()))
        })?;

        let Some(mut page) = fetched else {
            warn!(cursor = %cursor, "Page fetch returned nothing");
            return Err(PagingError::new(PagingErrorKind::FetchFailed(format!(
                "no page after cursor {cursor}"
            )))
            .into());
        };

        if page.total_count().is_none()
            && let Some(total) = *self.page.total_count()
        {
            page = page.with_total_count(total);
        }

        let shown = std::mem::replace(&mut self.page, page);
        self.history.push(shown);
        debug!(depth = self.history.len(), "Advanced to next page");
        Ok(NavigationOutcome::Moved)
    }

    #[instrument(skip(self), fields(depth = self.history.len()))]
    async fn previous(&mut self) -> LorebotResult<NavigationOutcome> {
        if !self.page.has_previous() {
            debug!("Remote reports no previous page");
            return Ok(NavigationOutcome::AtBoundary);
        }
        let Some(earlier) = self.history.pop() else {
            debug!("History is empty");
            return Ok(NavigationOutcome::AtBoundary);
        };

        self.page = earlier;
        debug!(depth = self.history.len(), "Restored previous page");
        Ok(NavigationOutcome::Moved)
    }

    fn view(&self) -> PageView {
        PageView::new(
            (self.formatter)(self.page.items()),
            self.footer(),
            *self.page.has_next(),
            *self.page.has_previous(),
        )
        .with_title(self.title.clone())
    }
}
