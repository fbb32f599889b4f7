//! Separation of back-to-back look pastes.

use regex::Regex;
use std::sync::LazyLock;
use tracing::{debug, instrument};

/// A capitalized name immediately followed by ` is using:`, anywhere in a line.
static INLINE_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([A-Z][a-z]+) is using:").expect("Valid inline header regex"));

static NAME_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z][a-z]+$").expect("Valid name token regex"));

/// Split `text` around every inline header, keeping the captured names.
///
/// Produces `[before, name, body, name, body, ...]`.
fn tokenize(text: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut last = 0;
    for caps in INLINE_HEADER.captures_iter(text) {
        let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        tokens.push(&text[last..whole.start()]);
        tokens.push(name.as_str());
        last = whole.end();
    }
    tokens.push(&text[last..]);
    tokens
}

/// Split a message holding one or more look pastes into one block per
/// character.
///
/// Each returned block is `"<Name> is using:\n<slot lines>"`. A name is only
/// paired with the body token directly after it, and only when that body
/// starts with `<`; any other token clears the pending name, so a garbled
/// paste never borrows slot lines from a neighbour.
///
/// # Examples
///
/// ```
/// use lorebot_ingest::split_equipment_blocks;
///
/// let msg = "Bob is using:\n<held> a torch\nAnn is using:\n<worn on head> a cap";
/// let blocks = split_equipment_blocks(msg);
/// assert_eq!(blocks, vec![
///     "Bob is using:\n<held> a torch".to_string(),
///     "Ann is using:\n<worn on head> a cap".to_string(),
/// ]);
/// ```
#[instrument(skip(message), fields(message_len = message.len()))]
pub fn split_equipment_blocks(message: &str) -> Vec<String> {
    let mut blocks = Vec::new();
    let mut pending: Option<&str> = None;

    for token in tokenize(message.trim()) {
        let token = token.trim();
        if NAME_TOKEN.is_match(token) {
            pending = Some(token);
        } else if let Some(name) = pending.take().filter(|_| token.starts_with('<')) {
            blocks.push(format!("{name} is using:\n{token}"));
        }
    }

    debug!(count = blocks.len(), "Split look pastes");
    blocks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_interleaves_names_and_bodies() {
        let tokens = tokenize("hi Bob is using:\n<held> x");
        assert_eq!(tokens, vec!["hi ", "Bob", "\n<held> x"]);
    }

    #[test]
    fn test_header_without_slots_is_dropped() {
        assert!(split_equipment_blocks("Bob is using:\nnothing here").is_empty());
    }
}
