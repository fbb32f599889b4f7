//! Layered configuration for the lorebot binary.
//!
//! Sources, later ones overriding earlier ones:
//! 1. Bundled defaults (`lorebot.toml` at the workspace root)
//! 2. `~/.config/lorebot/lorebot.toml`
//! 3. `./lorebot.toml`
//! 4. A file passed with `--config`
//! 5. `LOREBOT__<SECTION>__<KEY>` environment variables

use config::{Config, ConfigBuilder, Environment, File, FileFormat, builder::DefaultState};
use derive_getters::Getters;
use lorebot_error::{ConfigError, ConfigErrorKind, LorebotError, LorebotResult};
use lorebot_paging::SessionRegistryConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, instrument};

const DEFAULT_CONFIG: &str = include_str!("../../../lorebot.toml");

/// Largest page size `brief` and `who` accept.
const MAX_PAGE_SIZE: usize = 25;

/// Remote lore store settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, derive_setters::Setters)]
#[setters(prefix = "with_", into)]
pub struct GraphQlConfig {
    /// URL queries are posted to
    endpoint: String,
    /// Environment variable holding the bearer token
    #[serde(default = "default_graphql_token_env")]
    token_env: String,
}

fn default_graphql_token_env() -> String {
    "GRAPHQL_TOKEN".to_string()
}

impl GraphQlConfig {
    /// Bearer token from the environment, if set and non-empty.
    pub fn token(&self) -> Option<String> {
        std::env::var(&self.token_env)
            .ok()
            .filter(|token| !token.trim().is_empty())
    }
}

/// Discord connection settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, derive_setters::Setters)]
#[setters(prefix = "with_")]
pub struct DiscordConfig {
    /// Environment variable holding the bot token
    #[serde(default = "default_discord_token_env")]
    #[setters(into)]
    token_env: String,
    /// Guild to register slash commands in; global when unset
    #[serde(default)]
    guild_id: Option<u64>,
}

fn default_discord_token_env() -> String {
    "DISCORD_TOKEN".to_string()
}

impl Default for DiscordConfig {
    fn default() -> Self {
        Self {
            token_env: default_discord_token_env(),
            guild_id: None,
        }
    }
}

impl DiscordConfig {
    /// Bot token from the environment, if set and non-empty.
    pub fn token(&self) -> Option<String> {
        std::env::var(&self.token_env)
            .ok()
            .filter(|token| !token.trim().is_empty())
    }
}

/// Paged reply settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, derive_setters::Setters)]
#[setters(prefix = "with_")]
pub struct PagingConfig {
    /// Seconds a paged reply stays navigable after it is posted
    #[serde(default = "default_idle_timeout_secs")]
    idle_timeout_secs: u64,
    /// Items per page when the user gives no limit
    #[serde(default = "default_page_size")]
    #[getter(skip)]
    page_size: usize,
    /// Longest page body sent to chat
    #[serde(default = "default_max_content_len")]
    max_content_len: usize,
}

fn default_idle_timeout_secs() -> u64 {
    300
}

fn default_page_size() -> usize {
    10
}

fn default_max_content_len() -> usize {
    1900
}

impl Default for PagingConfig {
    fn default() -> Self {
        Self {
            idle_timeout_secs: default_idle_timeout_secs(),
            page_size: default_page_size(),
            max_content_len: default_max_content_len(),
        }
    }
}

impl PagingConfig {
    /// Items per page, clamped to `1..=25`.
    pub fn page_size(&self) -> usize {
        self.page_size.clamp(1, MAX_PAGE_SIZE)
    }

    /// Registry settings derived from these values.
    pub fn registry_config(&self) -> SessionRegistryConfig {
        SessionRegistryConfig::default().with_idle_timeout_secs(self.idle_timeout_secs)
    }
}

/// Top-level lorebot configuration.
///
/// # Example
///
/// ```no_run
/// use lorebot::LorebotConfig;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = LorebotConfig::load(None)?;
/// println!("Posting queries to {}", config.graphql().endpoint());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct LorebotConfig {
    /// Remote store
    graphql: GraphQlConfig,
    /// Discord connection
    #[serde(default)]
    discord: DiscordConfig,
    /// Paged replies
    #[serde(default)]
    paging: PagingConfig,
}

impl LorebotConfig {
    fn defaults() -> ConfigBuilder<DefaultState> {
        Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
    }

    fn finish(builder: ConfigBuilder<DefaultState>) -> LorebotResult<Self> {
        builder
            .build()
            .map_err(|e| {
                LorebotError::from(ConfigError::new(ConfigErrorKind::Load(e.to_string())))
            })?
            .try_deserialize()
            .map_err(|e| {
                LorebotError::from(ConfigError::new(ConfigErrorKind::Invalid(e.to_string())))
            })
    }

    /// Load every configuration layer.
    ///
    /// User files are optional and skipped when absent; `explicit` must exist.
    ///
    /// # Errors
    ///
    /// Returns an error if a file cannot be read or the merged values do not
    /// form a valid configuration.
    #[instrument(skip_all, fields(explicit = ?explicit))]
    pub fn load(explicit: Option<&Path>) -> LorebotResult<Self> {
        let mut builder = Self::defaults();

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/lorebot/lorebot.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder.add_source(File::with_name("lorebot").required(false));

        if let Some(path) = explicit {
            debug!(path = %path.display(), "Adding explicit configuration file");
            builder = builder.add_source(File::from(path));
        }

        builder = builder.add_source(
            Environment::with_prefix("LOREBOT")
                .separator("__")
                .try_parsing(true),
        );

        Self::finish(builder)
    }

    /// Bundled defaults with `overrides` (TOML) applied on top.
    ///
    /// # Errors
    ///
    /// Returns an error if `overrides` is not valid TOML or produces an
    /// invalid configuration.
    pub fn from_toml(overrides: &str) -> LorebotResult<Self> {
        Self::finish(Self::defaults().add_source(File::from_str(overrides, FileFormat::Toml)))
    }
}

impl Default for LorebotConfig {
    fn default() -> Self {
        Self {
            graphql: GraphQlConfig {
                endpoint: "http://localhost:4000/graphql".to_string(),
                token_env: default_graphql_token_env(),
            },
            discord: DiscordConfig::default(),
            paging: PagingConfig::default(),
        }
    }
}
