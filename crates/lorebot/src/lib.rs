//! Lorebot binary support: configuration, logging and offline parsing.
//!
//! The chat front end itself lives in `lorebot_social`; this crate wires it
//! to configuration and a command line.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod cli;
mod config;
mod logging;
mod parse;

pub use cli::{Cli, Commands};
pub use config::{DiscordConfig, GraphQlConfig, LorebotConfig, PagingConfig};
pub use logging::init_logging;
pub use parse::{ParsedPaste, parse_paste};
