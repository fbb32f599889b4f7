//! Block extraction from raw chat messages.

use crate::{EquipmentRecord, EquipmentRecordBuilder, LoreRecord, LoreRecordBuilder};
use crate::splitter::split_equipment_blocks;
use chrono::{DateTime, Utc};
use derive_getters::Getters;
use lorebot_error::{IngestError, IngestErrorKind};
use regex::Regex;
use std::sync::LazyLock;
use tracing::{debug, instrument};

/// Literal that marks the start of a lore paste anywhere in a message.
pub(crate) const LORE_TRIGGER: &str = "Object '";

/// Literal that marks a look paste anywhere in a message.
pub(crate) const EQUIPMENT_TRIGGER: &str = " is using:";

/// `Object '<name>'` on a line of its own.
pub(crate) static LORE_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*Object\s'([A-Za-z'\s]+)'\s*$").expect("Valid lore header regex")
});

/// Which paste grammar a block was isolated under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, strum::Display)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum BlockKind {
    /// `Object '<name>'` item lore.
    Lore,
    /// `<Name> is using:` character equipment.
    Equipment,
}

/// The slice of a message believed to hold one parseable unit.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct RawBlock {
    kind: BlockKind,
    text: String,
    submitter: String,
    captured_at: DateTime<Utc>,
}

impl RawBlock {
    /// Create a block captured now.
    pub fn new(kind: BlockKind, text: impl Into<String>, submitter: impl Into<String>) -> Self {
        Self::captured(kind, text, submitter, Utc::now())
    }

    /// Create a block with an explicit capture time.
    pub fn captured(
        kind: BlockKind,
        text: impl Into<String>,
        submitter: impl Into<String>,
        captured_at: DateTime<Utc>,
    ) -> Self {
        Self {
            kind,
            text: text.into(),
            submitter: submitter.into(),
            captured_at,
        }
    }
}

/// Isolate every lore or look block contained in `message`.
///
/// Lore wins when both triggers are present. Text before the first
/// `Object '` is discarded, and every further `Object '` line starts a new
/// block. Look pastes are separated per character by
/// [`split_equipment_blocks`]. An empty result means the message is not a
/// paste at all.
///
/// # Examples
///
/// ```
/// use lorebot_ingest::{BlockKind, extract_blocks};
///
/// let msg = "check this out Object 'a ring'\nWeight: 2";
/// let blocks = extract_blocks(msg, "someone");
/// assert_eq!(blocks.len(), 1);
/// assert_eq!(blocks[0].kind(), &BlockKind::Lore);
///
/// assert!(extract_blocks("hello there", "someone").is_empty());
/// ```
#[instrument(skip(message), fields(message_len = message.len()))]
pub fn extract_blocks(message: &str, submitter: &str) -> Vec<RawBlock> {
    let message = message.trim();
    let captured_at = Utc::now();

    if let Some(start) = message.find(LORE_TRIGGER) {
        let blocks: Vec<RawBlock> = split_lore_blocks(&message[start..])
            .into_iter()
            .map(|text| RawBlock::captured(BlockKind::Lore, text, submitter, captured_at))
            .collect();
        debug!(count = blocks.len(), "Extracted lore blocks");
        return blocks;
    }

    if message.find(EQUIPMENT_TRIGGER).is_some_and(|idx| idx > 0) {
        let blocks: Vec<RawBlock> = split_equipment_blocks(message)
            .into_iter()
            .map(|text| RawBlock::captured(BlockKind::Equipment, text, submitter, captured_at))
            .collect();
        debug!(count = blocks.len(), "Extracted equipment blocks");
        return blocks;
    }

    Vec::new()
}

/// Cut a lore paste at every `Object '` line.
///
/// A header whose name breaks the name grammar closes the current block and
/// opens nothing, so its attribute lines are dropped rather than attributed
/// to the previous object.
fn split_lore_blocks(text: &str) -> Vec<String> {
    let mut blocks = Vec::new();
    let mut current: Option<Vec<&str>> = None;

    for line in text.lines() {
        if line.trim_start().starts_with(LORE_TRIGGER) {
            if let Some(lines) = current.take() {
                blocks.push(lines.join("\n"));
            }
            if LORE_HEADER.is_match(line) {
                current = Some(vec![line.trim()]);
            } else {
                debug!(line, "Object line does not match header grammar");
            }
        } else if let Some(lines) = current.as_mut() {
            lines.push(line);
        }
    }

    if let Some(lines) = current {
        blocks.push(lines.join("\n"));
    }
    blocks
}

/// Outcome of building a record from one block.
#[derive(Debug, Clone)]
pub enum ParsedBlock {
    /// A valid item lore record.
    Lore(LoreRecord),
    /// A valid character equipment record.
    Equipment(EquipmentRecord),
    /// The header matched but no usable attribute or slot followed.
    Malformed(IngestError),
}

/// Build the record for a block, dispatching on its grammar.
pub fn parse_block(block: &RawBlock) -> ParsedBlock {
    match block.kind() {
        BlockKind::Lore => match LoreRecordBuilder::from_block(block) {
            Some(record) => ParsedBlock::Lore(record),
            None => ParsedBlock::Malformed(IngestError::new(IngestErrorKind::MalformedBlock {
                kind: BlockKind::Lore.to_string(),
                reason: "no recognised attribute lines".to_string(),
            })),
        },
        BlockKind::Equipment => match EquipmentRecordBuilder::from_block(block) {
            Some(record) => ParsedBlock::Equipment(record),
            None => ParsedBlock::Malformed(IngestError::new(IngestErrorKind::MalformedBlock {
                kind: BlockKind::Equipment.to_string(),
                reason: "no recognised equipment slots".to_string(),
            })),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_lore_blocks_on_each_header() {
        let blocks = split_lore_blocks("Object 'a ring'\nWeight: 2\nObject 'a hat'\nWeight: 1");
        assert_eq!(blocks, vec!["Object 'a ring'\nWeight: 2", "Object 'a hat'\nWeight: 1"]);
    }

    #[test]
    fn test_bad_header_drops_following_lines() {
        let blocks = split_lore_blocks("Object 'a ring'\nWeight: 2\nObject 'x99'\nWeight: 1");
        assert_eq!(blocks, vec!["Object 'a ring'\nWeight: 2"]);
    }
}
