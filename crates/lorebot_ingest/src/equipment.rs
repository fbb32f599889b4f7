//! Character equipment records.

use crate::RawBlock;
use crate::lore::STORE_DATETIME_FORMAT;
use chrono::{DateTime, Utc};
use derive_getters::Getters;
use regex::Regex;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::LazyLock;
use tracing::{debug, instrument, warn};

/// `<Name> is using:` on a line of its own.
pub(crate) static EQUIPMENT_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Z][a-z]+) is using:$").expect("Valid equipment header regex")
});

/// `<slot phrase>   item description`.
static SLOT_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^<([a-z][a-z ,'-]*)>\s+(.+)$").expect("Valid slot line regex")
});

/// A group of equipment positions sharing one slot phrase.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    strum::Display,
    strum::EnumIter,
)]
#[strum(serialize_all = "snake_case")]
pub enum SlotFamily {
    /// Light source.
    Light,
    /// Rings, two positions.
    Finger,
    /// Neck items, two positions.
    Neck,
    /// Body armour.
    Body,
    /// Helmet.
    Head,
    /// Leggings.
    Legs,
    /// Boots.
    Feet,
    /// Sleeves.
    Arms,
    /// Gloves.
    Hands,
    /// Belt.
    Waist,
    /// Cloak worn about the body.
    About,
    /// Breastplate.
    Chest,
    /// Shield.
    Shield,
    /// Pouch.
    Pouch,
    /// Bracers, two positions.
    Wrist,
    /// Main-hand weapon.
    PrimaryWeapon,
    /// Off-hand weapon.
    SecondaryWeapon,
    /// Two-handed weapon.
    BothHands,
    /// Held item.
    Held,
}

impl SlotFamily {
    /// How many positions this family has.
    pub fn capacity(self) -> usize {
        match self {
            Self::Finger | Self::Neck | Self::Wrist => 2,
            _ => 1,
        }
    }
}

/// Slot phrases as printed by the game client.
const SLOT_PHRASES: &[(&str, SlotFamily)] = &[
    ("used as light", SlotFamily::Light),
    ("worn on finger", SlotFamily::Finger),
    ("worn around neck", SlotFamily::Neck),
    ("worn on body", SlotFamily::Body),
    ("worn on head", SlotFamily::Head),
    ("worn on legs", SlotFamily::Legs),
    ("worn on feet", SlotFamily::Feet),
    ("worn on arms", SlotFamily::Arms),
    ("worn on hands", SlotFamily::Hands),
    ("worn about waist", SlotFamily::Waist),
    ("worn about body", SlotFamily::About),
    ("worn on chest", SlotFamily::Chest),
    ("worn as shield", SlotFamily::Shield),
    ("worn as pouch", SlotFamily::Pouch),
    ("worn around wrist", SlotFamily::Wrist),
    ("wielded", SlotFamily::PrimaryWeapon),
    ("primary weapon", SlotFamily::PrimaryWeapon),
    ("secondary weapon", SlotFamily::SecondaryWeapon),
    ("wielded with both hands", SlotFamily::BothHands),
    ("both hands", SlotFamily::BothHands),
    ("held", SlotFamily::Held),
];

fn slot_family(phrase: &str) -> Option<SlotFamily> {
    SLOT_PHRASES
        .iter()
        .find(|(known, _)| *known == phrase)
        .map(|(_, family)| *family)
}

/// Canonical per-character equipment record.
///
/// Values within a slot family keep arrival order: the first `worn on finger`
/// line is ring 1, the second ring 2. Occurrences beyond a family's capacity
/// land in `overflow` instead of replacing anything.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct EquipmentRecord {
    character_name: String,
    submitter: String,
    created_at: DateTime<Utc>,
    slots: BTreeMap<SlotFamily, Vec<String>>,
    overflow: Vec<(SlotFamily, String)>,
}

impl EquipmentRecord {
    fn new(character_name: String, submitter: String, created_at: DateTime<Utc>) -> Self {
        Self {
            character_name,
            submitter,
            created_at,
            slots: BTreeMap::new(),
            overflow: Vec::new(),
        }
    }

    /// Value at `position` (0-based) within `family`.
    ///
    /// # Examples
    ///
    /// ```
    /// use lorebot_ingest::{BlockKind, EquipmentRecordBuilder, RawBlock, SlotFamily};
    ///
    /// let block = RawBlock::new(
    ///     BlockKind::Equipment,
    ///     "Drunoob is using:\n<worn on finger>   a gold ring\n<worn on finger>   a jade ring",
    ///     "player",
    /// );
    /// let record = EquipmentRecordBuilder::from_block(&block).unwrap();
    /// assert_eq!(record.slot(SlotFamily::Finger, 0), Some("a gold ring"));
    /// assert_eq!(record.slot(SlotFamily::Finger, 1), Some("a jade ring"));
    /// ```
    pub fn slot(&self, family: SlotFamily, position: usize) -> Option<&str> {
        self.slots
            .get(&family)
            .and_then(|values| values.get(position))
            .map(String::as_str)
    }

    /// Number of filled positions across all families.
    pub fn populated_slots(&self) -> usize {
        self.slots.values().map(Vec::len).sum()
    }

    fn place(&mut self, family: SlotFamily, value: &str) {
        let values = self.slots.entry(family).or_default();
        if values.len() < family.capacity() {
            values.push(value.to_string());
        } else {
            warn!(
                character = %self.character_name,
                slot = %family,
                value,
                "Slot family already full, keeping value as overflow"
            );
            self.overflow.push((family, value.to_string()));
        }
    }
}

/// Wire shape of an [`EquipmentRecord`] as the remote `LookInput`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[allow(missing_docs)]
pub struct LookInput {
    pub character_name: String,
    pub light: Option<String>,
    pub ring1: Option<String>,
    pub ring2: Option<String>,
    pub neck1: Option<String>,
    pub neck2: Option<String>,
    pub body: Option<String>,
    pub head: Option<String>,
    pub legs: Option<String>,
    pub feet: Option<String>,
    pub arms: Option<String>,
    pub hands: Option<String>,
    pub waist: Option<String>,
    pub about: Option<String>,
    pub chest: Option<String>,
    pub shield: Option<String>,
    pub pouch: Option<String>,
    pub wrist1: Option<String>,
    pub wrist2: Option<String>,
    pub primary_weapon: Option<String>,
    pub secondary_weapon: Option<String>,
    pub both_hands: Option<String>,
    pub held: Option<String>,
    pub submitter: String,
    pub create_date: String,
}

impl From<&EquipmentRecord> for LookInput {
    fn from(record: &EquipmentRecord) -> Self {
        let slot = |family, position| record.slot(family, position).map(str::to_string);
        Self {
            character_name: record.character_name.clone(),
            light: slot(SlotFamily::Light, 0),
            ring1: slot(SlotFamily::Finger, 0),
            ring2: slot(SlotFamily::Finger, 1),
            neck1: slot(SlotFamily::Neck, 0),
            neck2: slot(SlotFamily::Neck, 1),
            body: slot(SlotFamily::Body, 0),
            head: slot(SlotFamily::Head, 0),
            legs: slot(SlotFamily::Legs, 0),
            feet: slot(SlotFamily::Feet, 0),
            arms: slot(SlotFamily::Arms, 0),
            hands: slot(SlotFamily::Hands, 0),
            waist: slot(SlotFamily::Waist, 0),
            about: slot(SlotFamily::About, 0),
            chest: slot(SlotFamily::Chest, 0),
            shield: slot(SlotFamily::Shield, 0),
            pouch: slot(SlotFamily::Pouch, 0),
            wrist1: slot(SlotFamily::Wrist, 0),
            wrist2: slot(SlotFamily::Wrist, 1),
            primary_weapon: slot(SlotFamily::PrimaryWeapon, 0),
            secondary_weapon: slot(SlotFamily::SecondaryWeapon, 0),
            both_hands: slot(SlotFamily::BothHands, 0),
            held: slot(SlotFamily::Held, 0),
            submitter: record.submitter.clone(),
            create_date: record.created_at.format(STORE_DATETIME_FORMAT).to_string(),
        }
    }
}

/// Folds `<slot phrase> value` lines into an [`EquipmentRecord`].
#[derive(Debug, Clone)]
pub struct EquipmentRecordBuilder {
    record: EquipmentRecord,
}

impl EquipmentRecordBuilder {
    /// Start a record for `character_name` timestamped now.
    pub fn new(character_name: impl Into<String>, submitter: impl Into<String>) -> Self {
        Self::created_at(character_name, submitter, Utc::now())
    }

    /// Start a record with an explicit creation time.
    pub fn created_at(
        character_name: impl Into<String>,
        submitter: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            record: EquipmentRecord::new(character_name.into(), submitter.into(), created_at),
        }
    }

    /// Apply one slot phrase. Returns `false` for unrecognised phrases, which
    /// are ignored.
    pub fn apply(&mut self, phrase: &str, value: &str) -> bool {
        match slot_family(phrase) {
            Some(family) => {
                self.record.place(family, value.trim());
                true
            }
            None => {
                debug!(phrase, "Ignoring unknown slot phrase");
                false
            }
        }
    }

    /// Finish the record, or `None` when no slot was filled.
    pub fn finish(self) -> Option<EquipmentRecord> {
        if self.record.populated_slots() == 0 {
            debug!(character = %self.record.character_name, "Look block has no slots");
            return None;
        }
        Some(self.record)
    }

    /// Build a record from one character's look block.
    ///
    /// The first line must be the `<Name> is using:` header. Slot lines are
    /// read until the first line that is neither a header nor a slot line.
    #[instrument(skip(block), fields(submitter = %block.submitter()))]
    pub fn from_block(block: &RawBlock) -> Option<EquipmentRecord> {
        let mut lines = block.text().lines();
        let header = lines.next()?;
        let caps = EQUIPMENT_HEADER.captures(header.trim())?;

        let mut builder = Self::created_at(&caps[1], block.submitter(), *block.captured_at());
        for line in lines {
            let line = line.trim();
            if EQUIPMENT_HEADER.is_match(line) {
                continue;
            }
            let Some(slot) = SLOT_LINE.captures(line) else {
                debug!(line, "End of look block");
                break;
            };
            builder.apply(&slot[1], &slot[2]);
        }
        builder.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_every_family_has_a_phrase() {
        for family in SlotFamily::iter() {
            assert!(
                SLOT_PHRASES.iter().any(|(_, f)| *f == family),
                "no phrase for {family}"
            );
        }
    }

    #[test]
    fn test_single_position_family_keeps_first_value() {
        let mut builder = EquipmentRecordBuilder::new("Bob", "tester");
        builder.apply("worn on body", "a breastplate");
        builder.apply("worn on body", "a robe");
        let record = builder.finish().unwrap();
        assert_eq!(record.slot(SlotFamily::Body, 0), Some("a breastplate"));
        assert_eq!(record.overflow(), &vec![(SlotFamily::Body, "a robe".to_string())]);
    }

    #[test]
    fn test_third_ring_goes_to_overflow() {
        let mut builder = EquipmentRecordBuilder::new("Bob", "tester");
        for ring in ["a", "b", "c"] {
            builder.apply("worn on finger", ring);
        }
        let record = builder.finish().unwrap();
        assert_eq!(record.populated_slots(), 2);
        assert_eq!(record.overflow().len(), 1);
    }
}
