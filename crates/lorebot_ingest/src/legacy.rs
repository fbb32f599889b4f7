//! Recognition of retired `!command` prefixes.

use regex::Regex;
use std::str::FromStr;
use std::sync::LazyLock;

/// `!<command>` at the start of a message. `whoall` precedes `who` so the
/// longer name wins.
static LEGACY_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^!(roll|stat|query|brief|mark|recent|whoall|who|help)")
        .expect("Valid legacy prefix regex")
});

/// Commands that used to be typed with a `!` prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[strum(serialize_all = "lowercase")]
#[allow(missing_docs)]
pub enum LegacyCommand {
    Roll,
    Stat,
    Query,
    Brief,
    Mark,
    Recent,
    Whoall,
    Who,
    Help,
}

impl LegacyCommand {
    /// Name of the slash command that replaced this one.
    pub fn slash_command(self) -> String {
        self.to_string()
    }

    /// Notice telling the user which slash command to use instead.
    ///
    /// # Examples
    ///
    /// ```
    /// use lorebot_ingest::LegacyCommand;
    ///
    /// assert_eq!(
    ///     LegacyCommand::Stat.migration_notice(),
    ///     "`!stat` is deprecated. Please use `/stat` instead."
    /// );
    /// ```
    pub fn migration_notice(self) -> String {
        format!(
            "`!{}` is deprecated. Please use `/{}` instead.",
            self,
            self.slash_command()
        )
    }
}

/// Recognise a retired `!command` on the first line of a message.
///
/// # Examples
///
/// ```
/// use lorebot_ingest::{LegacyCommand, recognize_legacy_command};
///
/// assert_eq!(recognize_legacy_command("!whoall please"), Some(LegacyCommand::Whoall));
/// assert_eq!(recognize_legacy_command("who is online?"), None);
/// ```
pub fn recognize_legacy_command(message: &str) -> Option<LegacyCommand> {
    let first_line = message.trim().lines().next()?;
    let caps = LEGACY_PREFIX.captures(first_line)?;
    LegacyCommand::from_str(&caps[1]).ok()
}
