//! Gateway event handling.

use super::{CommandReplyRenderer, navigation_row};
use crate::{ClickReply, ConnectionQuery, PasteHandler, QueryPresenter, help_text};
use async_trait::async_trait;
use lorebot_paging::{ActorId, NavigationAction, ReplyId};
use serenity::all::{
    Command, CommandInteraction, CommandOptionType, ComponentInteraction, Context,
    CreateCommand, CreateCommandOption, CreateInteractionResponse,
    CreateInteractionResponseMessage, EventHandler, GatewayIntents, GuildId, Interaction,
    Message, Ready,
};
use std::str::FromStr;
use tracing::{debug, error, info, instrument, warn};

/// Slash commands the bot registers on startup.
pub fn slash_commands() -> Vec<CreateCommand> {
    vec![
        CreateCommand::new("help").description("Shows available commands and their usage"),
        CreateCommand::new("brief")
            .description("Shows brief list of lore items matching the search term")
            .add_option(
                CreateCommandOption::new(
                    CommandOptionType::String,
                    "item",
                    "Item to search for (e.g., ring, mithril.rapier, large.bronze.shield)",
                )
                .required(true),
            )
            .add_option(
                CreateCommandOption::new(
                    CommandOptionType::Integer,
                    "limit",
                    "Number of items to show per page (default: 10)",
                )
                .min_int_value(1)
                .max_int_value(25),
            ),
        CreateCommand::new("who")
            .description("Shows character information")
            .add_option(
                CreateCommandOption::new(
                    CommandOptionType::String,
                    "character",
                    "Character name to search for (e.g., Drunoob)",
                )
                .required(true),
            )
            .add_option(
                CreateCommandOption::new(
                    CommandOptionType::Integer,
                    "limit",
                    "Number of items to show per page (default: 10)",
                )
                .min_int_value(1)
                .max_int_value(25),
            ),
        CreateCommand::new("whoall")
            .description("Shows all characters")
            .add_option(
                CreateCommandOption::new(
                    CommandOptionType::Integer,
                    "limit",
                    "Number of items to show per page (default: 39)",
                )
                .min_int_value(1)
                .max_int_value(42),
            ),
    ]
}

fn string_option(command: &CommandInteraction, name: &str) -> Option<String> {
    command
        .data
        .options
        .iter()
        .find(|option| option.name == name)
        .and_then(|option| option.value.as_str())
        .map(str::to_string)
}

fn integer_option(command: &CommandInteraction, name: &str) -> Option<i64> {
    command
        .data
        .options
        .iter()
        .find(|option| option.name == name)
        .and_then(|option| option.value.as_i64())
}

/// Serenity event handler for lorebot.
pub struct LorebotHandler {
    pastes: PasteHandler,
    presenter: QueryPresenter,
    guild_id: Option<GuildId>,
    default_limit: Option<i64>,
}

impl LorebotHandler {
    /// Handle pastes with `pastes` and list commands with `presenter`.
    ///
    /// Commands are registered in `guild_id` when given, globally otherwise.
    pub fn new(pastes: PasteHandler, presenter: QueryPresenter, guild_id: Option<u64>) -> Self {
        Self {
            pastes,
            presenter,
            guild_id: guild_id.map(GuildId::new),
            default_limit: None,
        }
    }

    /// Page size for `brief` and `who` when the user gives no limit.
    pub fn with_default_limit(mut self, limit: usize) -> Self {
        self.default_limit = i64::try_from(limit).ok();
        self
    }

    fn limit(&self, command: &CommandInteraction) -> Option<i64> {
        integer_option(command, "limit").or(self.default_limit)
    }

    /// Gateway intents the handler needs.
    pub fn intents() -> GatewayIntents {
        GatewayIntents::GUILDS
            | GatewayIntents::GUILD_MESSAGES
            | GatewayIntents::DIRECT_MESSAGES
            | GatewayIntents::MESSAGE_CONTENT
    }

    #[instrument(skip_all, fields(command = %command.data.name, user_id = %command.user.id))]
    async fn on_command(&self, ctx: &Context, command: &CommandInteraction) {
        let query = match command.data.name.as_str() {
            "help" => {
                let response = CreateInteractionResponse::Message(
                    CreateInteractionResponseMessage::new()
                        .content(help_text())
                        .ephemeral(true),
                );
                if let Err(e) = command.create_response(ctx, response).await {
                    warn!(error = %e, "Failed to send help");
                }
                return;
            }
            "brief" => string_option(command, "item")
                .map(|item| ConnectionQuery::brief(item, self.limit(command))),
            "who" => string_option(command, "character")
                .map(|name| ConnectionQuery::who(name, self.limit(command))),
            "whoall" => Some(ConnectionQuery::whoall(integer_option(command, "limit"))),
            other => {
                warn!(command = other, "Unknown slash command");
                None
            }
        };
        let Some(query) = query else {
            return;
        };

        let defer = CreateInteractionResponse::Defer(
            CreateInteractionResponseMessage::new().ephemeral(*query.private()),
        );
        if let Err(e) = command.create_response(ctx, defer).await {
            warn!(error = %e, "Failed to defer command reply");
            return;
        }

        let owner = ActorId(command.user.id.get());
        let renderer = CommandReplyRenderer::new(ctx, command);
        if let Err(e) = self.presenter.present(query, owner, &renderer).await {
            error!(error = %e, "Failed to render command reply");
        }
    }

    #[instrument(skip_all, fields(reply_id = %component.message.id, user_id = %component.user.id))]
    async fn on_component(&self, ctx: &Context, component: &ComponentInteraction) {
        let Ok(action) = NavigationAction::from_str(&component.data.custom_id) else {
            debug!(custom_id = %component.data.custom_id, "Ignoring unknown component");
            return;
        };

        let reply = self
            .presenter
            .click(
                ReplyId(component.message.id.get()),
                ActorId(component.user.id.get()),
                action,
            )
            .await;

        let response = match reply {
            ClickReply::Update { content, controls } => CreateInteractionResponse::UpdateMessage(
                CreateInteractionResponseMessage::new()
                    .content(content)
                    .components(vec![navigation_row(controls)]),
            ),
            ClickReply::Notice(text) => CreateInteractionResponse::Message(
                CreateInteractionResponseMessage::new()
                    .content(text)
                    .ephemeral(true),
            ),
        };
        if let Err(e) = component.create_response(ctx, response).await {
            warn!(error = %e, "Failed to answer navigation click");
        }
    }
}

#[async_trait]
impl EventHandler for LorebotHandler {
    async fn ready(&self, ctx: Context, ready: Ready) {
        info!(user = %ready.user.name, guilds = ready.guilds.len(), "Connected to Discord");

        let registered = match self.guild_id {
            Some(guild_id) => guild_id.set_commands(&ctx, slash_commands()).await,
            None => Command::set_global_commands(&ctx, slash_commands()).await,
        };
        match registered {
            Ok(commands) => info!(count = commands.len(), "Registered slash commands"),
            Err(e) => error!(error = %e, "Failed to register slash commands"),
        }
    }

    async fn message(&self, ctx: Context, msg: Message) {
        if msg.author.bot {
            return;
        }

        let outcomes = self.pastes.handle(&msg.content, &msg.author.tag()).await;
        for outcome in outcomes {
            if let Err(e) = msg.reply(&ctx, outcome.reply_text()).await {
                warn!(error = %e, "Failed to reply to paste");
            }
        }
    }

    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        match interaction {
            Interaction::Command(command) => self.on_command(&ctx, &command).await,
            Interaction::Component(component) => self.on_component(&ctx, &component).await,
            _ => {}
        }
    }
}
