//! The paste pipeline: message in, one reply per block out.

use crate::{QueryExecutor, RecordSubmitter};
use lorebot_ingest::{
    BlockKind, LegacyCommand, ParsedBlock, RawBlock, extract_blocks, parse_block,
    recognize_legacy_command,
};
use std::sync::Arc;
use tracing::{debug, error, info, instrument};

/// What happened to one block of a pasted message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PasteOutcome {
    /// A lore record for this object was stored.
    LoreUpdated(String),
    /// An equipment record for this character was stored.
    LookUpdated(String),
    /// A header matched but nothing usable followed it.
    Malformed(BlockKind),
    /// The record was valid but the store did not accept it.
    SubmissionFailed(BlockKind),
    /// The message used a retired `!command`.
    Deprecated(LegacyCommand),
}

impl PasteOutcome {
    /// Reply text shown to the submitter.
    ///
    /// # Examples
    ///
    /// ```
    /// use lorebot_social::PasteOutcome;
    ///
    /// let outcome = PasteOutcome::LoreUpdated("a ring".into());
    /// assert_eq!(outcome.reply_text(), "Object 'a ring' updated.");
    /// ```
    pub fn reply_text(&self) -> String {
        match self {
            Self::LoreUpdated(name) => format!("Object '{name}' updated."),
            Self::LookUpdated(name) => format!("Look data updated successfully for {name}"),
            Self::Malformed(BlockKind::Lore) => {
                "Unable to parse lore message data. Please check the format.".to_string()
            }
            Self::Malformed(BlockKind::Equipment) => {
                "Unable to parse look message data. Please check the format.".to_string()
            }
            Self::SubmissionFailed(BlockKind::Lore) => {
                "Failed to update lore data on the backend.".to_string()
            }
            Self::SubmissionFailed(BlockKind::Equipment) => {
                "Failed to update look data on the backend.".to_string()
            }
            Self::Deprecated(command) => command.migration_notice(),
        }
    }
}

/// Turns chat messages into stored records.
///
/// Every block is parsed with fresh state and submitted on its own; a failure
/// in one block never affects another. Nothing is retried.
#[derive(Clone)]
pub struct PasteHandler {
    submitter: RecordSubmitter,
}

impl PasteHandler {
    /// Submit records through `executor`.
    pub fn new(executor: Arc<dyn QueryExecutor>) -> Self {
        Self {
            submitter: RecordSubmitter::new(executor),
        }
    }

    /// Handle one chat message from `submitter`.
    ///
    /// Pastes take precedence over a retired `!command` prefix. An empty
    /// result means the message was ordinary chat and gets no reply.
    #[instrument(skip(self, message), fields(message_len = message.len()))]
    pub async fn handle(&self, message: &str, submitter: &str) -> Vec<PasteOutcome> {
        let blocks = extract_blocks(message, submitter);
        if blocks.is_empty() {
            return match recognize_legacy_command(message) {
                Some(command) => {
                    info!(command = %command, "Legacy command prefix used");
                    vec![PasteOutcome::Deprecated(command)]
                }
                None => Vec::new(),
            };
        }

        let mut outcomes = Vec::with_capacity(blocks.len());
        for block in &blocks {
            outcomes.push(self.handle_block(block).await);
        }
        outcomes
    }

    async fn handle_block(&self, block: &RawBlock) -> PasteOutcome {
        match parse_block(block) {
            ParsedBlock::Lore(record) => match self.submitter.submit_lore(&record).await {
                Ok(_) => {
                    info!(object = %record.object_name(), "Lore updated");
                    PasteOutcome::LoreUpdated(record.object_name().clone())
                }
                Err(e) => {
                    error!(object = %record.object_name(), error = %e, "Lore submission failed");
                    PasteOutcome::SubmissionFailed(BlockKind::Lore)
                }
            },
            ParsedBlock::Equipment(record) => match self.submitter.submit_look(&record).await {
                Ok(_) => {
                    info!(character = %record.character_name(), "Look updated");
                    PasteOutcome::LookUpdated(record.character_name().clone())
                }
                Err(e) => {
                    error!(
                        character = %record.character_name(),
                        error = %e,
                        "Look submission failed"
                    );
                    PasteOutcome::SubmissionFailed(BlockKind::Equipment)
                }
            },
            ParsedBlock::Malformed(e) => {
                debug!(error = %e, "Block not submitted");
                PasteOutcome::Malformed(*block.kind())
            }
        }
    }
}
