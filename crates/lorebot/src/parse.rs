//! Offline paste parsing for `lorebot parse`.

use lorebot_ingest::{
    BlockKind, LookInput, LoreRecord, ParsedBlock, SlotFamily, extract_blocks, parse_block,
    recognize_legacy_command,
};
use serde::Serialize;
use tracing::{debug, instrument};

/// What one block of a paste would become if it were submitted.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ParsedPaste {
    /// An item lore record.
    Lore {
        /// Record as the store would receive it.
        record: LoreRecord,
    },
    /// A character equipment record.
    Look {
        /// Record as the store would receive it.
        record: LookInput,
        /// Values that did not fit their slot family.
        overflow: Vec<(SlotFamily, String)>,
    },
    /// A header matched but nothing usable followed.
    Malformed {
        /// Grammar the block was read under.
        block: BlockKind,
        /// Why it was rejected.
        reason: String,
    },
    /// A retired `!command`.
    Deprecated {
        /// Reply the bot would send.
        notice: String,
    },
}

/// Run the ingestion pipeline over `message` without submitting anything.
///
/// # Examples
///
/// ```
/// use lorebot::{ParsedPaste, parse_paste};
///
/// let parsed = parse_paste("Object 'a ring'\nWeight: 1", "cli");
/// assert!(matches!(parsed.as_slice(), [ParsedPaste::Lore { .. }]));
/// assert!(parse_paste("just chatting", "cli").is_empty());
/// ```
#[instrument(skip(message), fields(message_len = message.len()))]
pub fn parse_paste(message: &str, submitter: &str) -> Vec<ParsedPaste> {
    let blocks = extract_blocks(message, submitter);
    if blocks.is_empty() {
        return recognize_legacy_command(message)
            .map(|command| ParsedPaste::Deprecated {
                notice: command.migration_notice(),
            })
            .into_iter()
            .collect();
    }

    let parsed: Vec<ParsedPaste> = blocks
        .iter()
        .map(|block| match parse_block(block) {
            ParsedBlock::Lore(record) => ParsedPaste::Lore { record },
            ParsedBlock::Equipment(record) => ParsedPaste::Look {
                record: LookInput::from(&record),
                overflow: record.overflow().clone(),
            },
            ParsedBlock::Malformed(e) => ParsedPaste::Malformed {
                block: *block.kind(),
                reason: e.to_string(),
            },
        })
        .collect();
    debug!(count = parsed.len(), "Parsed paste");
    parsed
}
