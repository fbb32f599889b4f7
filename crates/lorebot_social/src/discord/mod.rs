//! Discord front end built on serenity.
//!
//! - **client**: serenity client setup and lifecycle
//! - **handler**: event handler for pastes, slash commands and button clicks
//! - **render**: drawing command replies and navigation buttons
//! - **error**: Discord-specific error types

mod client;
mod error;
mod handler;
mod render;

pub use client::LorebotBot;
pub use error::{DiscordError, DiscordErrorKind, DiscordResult};
pub use handler::{LorebotHandler, slash_commands};
pub use render::{CommandReplyRenderer, navigation_row};
