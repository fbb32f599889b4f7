//! Command replies and navigation buttons.

use crate::ReplyRenderer;
use async_trait::async_trait;
use lorebot_error::{HttpError, HttpTarget, LorebotResult};
use lorebot_paging::{NavigationAction, NavigationControls, ReplyId};
use serenity::all::{
    ButtonStyle, CommandInteraction, Context, CreateActionRow, CreateButton,
    EditInteractionResponse,
};
use strum::IntoEnumIterator;

/// Previous/Next buttons, disabled where the page has no neighbour.
pub fn navigation_row(controls: NavigationControls) -> CreateActionRow {
    CreateActionRow::Buttons(
        NavigationAction::iter()
            .map(|action| {
                CreateButton::new(action.as_ref())
                    .label(action.label())
                    .style(ButtonStyle::Primary)
                    .disabled(!controls.is_enabled(action))
            })
            .collect(),
    )
}

/// Draws into the deferred response of a slash command.
///
/// The response must already be deferred; its visibility is fixed then.
pub struct CommandReplyRenderer<'a> {
    ctx: &'a Context,
    command: &'a CommandInteraction,
}

impl<'a> CommandReplyRenderer<'a> {
    /// Render replies to `command`.
    pub fn new(ctx: &'a Context, command: &'a CommandInteraction) -> Self {
        Self { ctx, command }
    }
}

#[async_trait]
impl ReplyRenderer for CommandReplyRenderer<'_> {
    async fn render_text(&self, content: &str) -> LorebotResult<()> {
        self.command
            .edit_response(self.ctx, EditInteractionResponse::new().content(content))
            .await
            .map_err(|e| HttpError::new(HttpTarget::TextReply, e.to_string()))?;
        Ok(())
    }

    async fn render_page(
        &self,
        content: &str,
        controls: NavigationControls,
    ) -> LorebotResult<ReplyId> {
        let message = self
            .command
            .edit_response(
                self.ctx,
                EditInteractionResponse::new()
                    .content(content)
                    .components(vec![navigation_row(controls)]),
            )
            .await
            .map_err(|e| HttpError::new(HttpTarget::PagedReply, e.to_string()))?;
        Ok(ReplyId(message.id.get()))
    }
}
