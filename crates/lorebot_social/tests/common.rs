//! Shared test doubles for the remote store and reply surface.

#![allow(dead_code)]

use async_trait::async_trait;
use lorebot_error::{LorebotResult, QueryError, QueryErrorKind};
use lorebot_paging::{NavigationControls, ReplyId};
use lorebot_social::{QueryExecutor, ReplyRenderer, extract_data};
use parking_lot::Mutex;
use serde_json::Value as JsonValue;
use std::collections::VecDeque;

/// One recorded `execute` call.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub document: String,
    pub variables: JsonValue,
}

/// Answers queries with scripted raw response bodies, in order.
#[derive(Default)]
pub struct ScriptedExecutor {
    responses: Mutex<VecDeque<JsonValue>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl ScriptedExecutor {
    pub fn new(responses: impl IntoIterator<Item = JsonValue>) -> Self {
        Self {
            responses: Mutex::new(responses.into_iter().collect()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().clone()
    }
}

#[async_trait]
impl QueryExecutor for ScriptedExecutor {
    async fn execute(&self, document: &str, variables: JsonValue) -> LorebotResult<JsonValue> {
        self.calls.lock().push(RecordedCall {
            document: document.to_string(),
            variables,
        });
        let body = self
            .responses
            .lock()
            .pop_front()
            .ok_or_else(|| {
                QueryError::new(QueryErrorKind::Transport("no scripted response left".into()))
            })?;
        extract_data(body)
    }
}

/// What a [`RecordingRenderer`] was asked to draw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rendered {
    Text(String),
    Page(String, NavigationControls),
}

/// Remembers every render and hands out a fixed reply id.
pub struct RecordingRenderer {
    reply_id: ReplyId,
    rendered: Mutex<Vec<Rendered>>,
}

impl RecordingRenderer {
    pub fn new(reply_id: ReplyId) -> Self {
        Self {
            reply_id,
            rendered: Mutex::new(Vec::new()),
        }
    }

    pub fn rendered(&self) -> Vec<Rendered> {
        self.rendered.lock().clone()
    }
}

#[async_trait]
impl ReplyRenderer for RecordingRenderer {
    async fn render_text(&self, content: &str) -> LorebotResult<()> {
        self.rendered.lock().push(Rendered::Text(content.to_string()));
        Ok(())
    }

    async fn render_page(
        &self,
        content: &str,
        controls: NavigationControls,
    ) -> LorebotResult<ReplyId> {
        self.rendered
            .lock()
            .push(Rendered::Page(content.to_string(), controls));
        Ok(self.reply_id)
    }
}
