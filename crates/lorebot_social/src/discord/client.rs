//! Discord bot client setup and lifecycle management.

use super::{DiscordError, DiscordErrorKind, LorebotHandler};
use serenity::Client;
use tracing::{info, instrument};

/// Discord bot client for lorebot.
pub struct LorebotBot {
    client: Client,
}

impl LorebotBot {
    /// Build the serenity client with `handler` attached.
    ///
    /// # Errors
    ///
    /// Returns an error if the client fails to initialize.
    #[instrument(skip(token, handler), fields(token_len = token.len()))]
    pub async fn new(token: &str, handler: LorebotHandler) -> Result<Self, DiscordError> {
        let intents = LorebotHandler::intents();
        info!(?intents, "Building Serenity client");

        let client = Client::builder(token, intents)
            .event_handler(handler)
            .await
            .map_err(|e| {
                DiscordError::new(DiscordErrorKind::ConnectionFailed(format!(
                    "Failed to build client: {e}"
                )))
            })?;

        Ok(Self { client })
    }

    /// Run the bot until the connection ends.
    ///
    /// # Errors
    ///
    /// Returns an error if the client fails to start or hits a fatal error.
    #[instrument(skip(self))]
    pub async fn start(&mut self) -> Result<(), DiscordError> {
        info!("Starting Discord bot");
        self.client.start().await.map_err(|e| {
            DiscordError::new(DiscordErrorKind::ConnectionFailed(format!(
                "Client error: {e}"
            )))
        })
    }
}
