//! Lorebot CLI binary.
//!
//! - `run` connects to Discord (requires the `discord` feature)
//! - `parse <file>` runs the paste parser offline and prints JSON

use clap::Parser;
use lorebot::{Cli, Commands, LorebotConfig, init_logging, parse_paste};
use std::path::Path;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    init_logging(cli.verbose, cli.json_logs);

    match cli.command {
        Commands::Run => {
            let config = LorebotConfig::load(cli.config.as_deref())?;
            run_bot(config).await?;
        }
        Commands::Parse { file, submitter } => {
            parse_file(&file, &submitter)?;
        }
    }

    Ok(())
}

fn parse_file(file: &Path, submitter: &str) -> Result<(), Box<dyn std::error::Error>> {
    let text = std::fs::read_to_string(file)?;
    let parsed = parse_paste(&text, submitter);
    info!(file = %file.display(), blocks = parsed.len(), "Parsed paste file");
    println!("{}", serde_json::to_string_pretty(&parsed)?);
    Ok(())
}

#[cfg(feature = "discord")]
async fn run_bot(config: LorebotConfig) -> Result<(), Box<dyn std::error::Error>> {
    use lorebot_paging::SessionRegistry;
    use lorebot_social::{
        DiscordError, DiscordErrorKind, GraphQlClient, LorebotBot, LorebotHandler, PasteHandler,
        QueryExecutor, QueryPresenter,
    };
    use std::sync::Arc;
    use tracing::debug;

    let token = config.discord().token().ok_or_else(|| {
        DiscordError::new(DiscordErrorKind::MissingToken(
            config.discord().token_env().clone(),
        ))
    })?;

    info!(endpoint = %config.graphql().endpoint(), "Using lore store");
    let executor: Arc<dyn QueryExecutor> = Arc::new(GraphQlClient::new(
        config.graphql().endpoint(),
        config.graphql().token(),
    ));

    let registry = Arc::new(SessionRegistry::new(config.paging().registry_config()));
    let (_sweeper, mut expired) = registry.spawn_expiry();
    tokio::spawn(async move {
        while let Some(reply_id) = expired.recv().await {
            debug!(%reply_id, "Paged reply expired");
        }
    });

    let handler = LorebotHandler::new(
        PasteHandler::new(Arc::clone(&executor)),
        QueryPresenter::new(executor, registry, *config.paging().max_content_len()),
        *config.discord().guild_id(),
    )
    .with_default_limit(config.paging().page_size());

    let mut bot = LorebotBot::new(&token, handler).await?;
    bot.start().await?;
    Ok(())
}

#[cfg(not(feature = "discord"))]
async fn run_bot(_config: LorebotConfig) -> Result<(), Box<dyn std::error::Error>> {
    Err("lorebot was built without the `discord` feature".into())
}
