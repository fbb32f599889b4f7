//! Presenting paged query results and routing navigation clicks.

use crate::{ConnectionQuery, QueryExecutor};
use async_trait::async_trait;
use lorebot_error::LorebotResult;
use lorebot_paging::{
    ActorId, InteractionOutcome, NavigationAction, NavigationControls, PageNavigator, ReplyId,
    SessionRegistry,
};
use std::sync::Arc;
use tracing::{error, instrument};

const NO_MORE_PAGES: &str = "No more pages available!";

/// Where replies to a command are drawn.
#[async_trait]
pub trait ReplyRenderer: Send + Sync {
    /// Show plain text with no controls.
    async fn render_text(&self, content: &str) -> LorebotResult<()>;

    /// Show a page with navigation controls and return the reply's identity.
    async fn render_page(
        &self,
        content: &str,
        controls: NavigationControls,
    ) -> LorebotResult<ReplyId>;
}

/// How to answer a navigation click.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickReply {
    /// Replace the reply's content and controls.
    Update {
        /// New message body.
        content: String,
        /// New control state.
        controls: NavigationControls,
    },
    /// Tell only the clicking user something; the reply stays as it is.
    Notice(&'static str),
}

/// Wrap `text` in a code block.
pub fn code_block(text: &str) -> String {
    format!("```{text}```")
}

/// Runs list commands and keeps their sessions navigable.
#[derive(Clone)]
pub struct QueryPresenter {
    executor: Arc<dyn QueryExecutor>,
    registry: Arc<SessionRegistry>,
    max_content_len: usize,
}

impl QueryPresenter {
    /// Present through `executor`, registering sessions in `registry`.
    pub fn new(
        executor: Arc<dyn QueryExecutor>,
        registry: Arc<SessionRegistry>,
        max_content_len: usize,
    ) -> Self {
        Self {
            executor,
            registry,
            max_content_len,
        }
    }

    /// Registry holding the live sessions.
    pub fn registry(&self) -> &Arc<SessionRegistry> {
        &self.registry
    }

    /// Run `query` for `owner` and render its first page.
    ///
    /// An empty result or a failed query is rendered as text and leaves no
    /// session behind.
    ///
    /// # Errors
    ///
    /// Fails only if the renderer fails.
    #[instrument(skip(self, query, renderer), fields(command = query.name, owner_id = %owner))]
    pub async fn present(
        &self,
        query: ConnectionQuery,
        owner: ActorId,
        renderer: &dyn ReplyRenderer,
    ) -> LorebotResult<()> {
        let empty_text = query.empty_text().clone();
        let error_text = query.error_text().clone();

        match query.open(Arc::clone(&self.executor)).await {
            Ok(None) => renderer.render_text(&code_block(&empty_text)).await,
            Ok(Some(session)) => {
                let view = session.view();
                let reply_id = renderer
                    .render_page(
                        &view.render(self.max_content_len),
                        NavigationControls::for_view(&view),
                    )
                    .await?;
                self.registry.register(reply_id, Box::new(session), owner);
                Ok(())
            }
            Err(e) => {
                error!(error = %e, "List query failed");
                renderer.render_text(&code_block(&error_text)).await
            }
        }
    }

    /// Apply a click on `action` by `actor` to the reply `reply_id`.
    pub async fn click(
        &self,
        reply_id: ReplyId,
        actor: ActorId,
        action: NavigationAction,
    ) -> ClickReply {
        match self.registry.interact(reply_id, actor, action).await {
            InteractionOutcome::Updated(view) => ClickReply::Update {
                content: view.render(self.max_content_len),
                controls: NavigationControls::for_view(&view),
            },
            other => ClickReply::Notice(other.notice().unwrap_or(NO_MORE_PAGES)),
        }
    }
}
