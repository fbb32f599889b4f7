//! Free-text ingestion for pasted game-client output.
//!
//! Players paste two kinds of text into chat:
//! - **lore** blocks, starting with `Object '<name>'` and followed by
//!   `Name: value` attribute lines
//! - **look** blocks, starting with `<Name> is using:` and followed by
//!   `<slot phrase> value` lines
//!
//! The pipeline runs leaf-first:
//! - [`extract_blocks`] isolates zero or more [`RawBlock`]s from a noisy message
//! - [`parse_attribute_line`] splits a lore line into one or two [`AttributePair`]s
//! - [`LoreRecordBuilder`] folds attribute pairs into a [`LoreRecord`]
//! - [`split_equipment_blocks`] separates back-to-back look pastes
//! - [`EquipmentRecordBuilder`] folds slot lines into an [`EquipmentRecord`]
//!
//! Builders return `None` when a header matched but nothing usable followed,
//! so an echoed object name never turns into a record.
//!
//! # Example
//!
//! ```
//! use lorebot_ingest::{ParsedBlock, extract_blocks, parse_block};
//!
//! let paste = "Object 'a ring'\nItem Type: jewelry\nWeight: 2\nAffects: strength by 2";
//! let blocks = extract_blocks(paste, "player#0001");
//! assert_eq!(blocks.len(), 1);
//!
//! match parse_block(&blocks[0]) {
//!     ParsedBlock::Lore(record) => {
//!         assert_eq!(record.object_name(), "a ring");
//!         assert_eq!(record.weight(), &Some(2));
//!     }
//!     other => panic!("unexpected {other:?}"),
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod affects;
mod attribute;
mod block;
mod equipment;
mod legacy;
mod lore;
mod splitter;

pub use affects::format_affects;
pub use attribute::{AttributePair, parse_attribute_line};
pub use block::{BlockKind, ParsedBlock, RawBlock, extract_blocks, parse_block};
pub use equipment::{EquipmentRecord, EquipmentRecordBuilder, LookInput, SlotFamily};
pub use legacy::{LegacyCommand, recognize_legacy_command};
pub use lore::{LoreRecord, LoreRecordBuilder};
pub use splitter::split_equipment_blocks;
