//! Remote plumbing and chat front end for lorebot.
//!
//! # Paste submission
//!
//! - [`QueryExecutor`] - the query-execution contract; [`GraphQlClient`] speaks it over HTTP
//! - [`RecordSubmitter`] - upserts lore and look records through the store's mutations
//! - [`PasteHandler`] - message in, one [`PasteOutcome`] per block out
//!
//! # Paged list commands
//!
//! - [`ConnectionQuery`] - the `brief`, `who` and `whoall` queries and their formatting
//! - [`QueryPresenter`] - renders the first page through a [`ReplyRenderer`] and
//!   routes navigation clicks to the session registry
//!
//! # Platform support
//!
//! - `discord` - serenity bot wiring (requires the `discord` feature)

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod connection;
mod help;
mod paste;
mod present;
mod query;
mod submit;

#[cfg(feature = "discord")]
mod discord;

pub use connection::{ConnectionFetcher, ConnectionQuery, parse_connection};
pub use help::help_text;
pub use paste::{PasteHandler, PasteOutcome};
pub use present::{ClickReply, QueryPresenter, ReplyRenderer, code_block};
pub use query::{GraphQlClient, QueryExecutor, extract_data};
pub use submit::{ADD_OR_UPDATE_LOOK, ADD_OR_UPDATE_LORE, RecordSubmitter};

#[cfg(feature = "discord")]
pub use discord::{
    CommandReplyRenderer, DiscordError, DiscordErrorKind, DiscordResult, LorebotBot,
    LorebotHandler, navigation_row, slash_commands,
};
