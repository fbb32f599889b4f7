//! Item lore records.

use crate::block::LORE_HEADER;
use crate::{AttributePair, RawBlock, parse_attribute_line};
use chrono::{DateTime, Utc};
use derive_getters::Getters;
use serde::Serialize;
use tracing::{debug, instrument};

/// Timestamp layout the lore store expects for `CREATE_DATE`.
pub(crate) const STORE_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Separator between accumulated `Affects` entries.
const AFFECTS_SEPARATOR: char = ',';

/// Canonical item record built from a lore paste.
///
/// Serializes to the remote `LoreInput` shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Getters)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct LoreRecord {
    object_name: String,
    submitter: String,
    #[serde(rename = "CREATE_DATE", serialize_with = "serialize_store_datetime")]
    created_at: DateTime<Utc>,
    item_type: Option<String>,
    item_is: Option<String>,
    mat_class: Option<String>,
    material: Option<String>,
    weight: Option<i64>,
    #[serde(rename = "ITEM_VALUE", serialize_with = "serialize_as_string")]
    value: Option<i64>,
    speed: Option<i64>,
    power: Option<i64>,
    accuracy: Option<i64>,
    charges: Option<i64>,
    apply: Option<i64>,
    container_size: Option<i64>,
    capacity: Option<i64>,
    effects: Option<String>,
    affects: Option<String>,
    restricts: Option<String>,
    immune: Option<String>,
    damage: Option<String>,
    #[serde(rename = "CLASS")]
    weapon_class: Option<String>,
    #[serde(rename = "ITEM_LEVEL")]
    level: Option<String>,
}

impl LoreRecord {
    fn empty(object_name: String, submitter: String, created_at: DateTime<Utc>) -> Self {
        Self {
            object_name,
            submitter,
            created_at,
            item_type: None,
            item_is: None,
            mat_class: None,
            material: None,
            weight: None,
            value: None,
            speed: None,
            power: None,
            accuracy: None,
            charges: None,
            apply: None,
            container_size: None,
            capacity: None,
            effects: None,
            affects: None,
            restricts: None,
            immune: None,
            damage: None,
            weapon_class: None,
            level: None,
        }
    }

    /// Number of optional attribute fields that carry a value.
    pub fn populated_fields(&self) -> usize {
        let numbers = [
            self.weight,
            self.value,
            self.speed,
            self.power,
            self.accuracy,
            self.charges,
            self.apply,
            self.container_size,
            self.capacity,
        ];
        let texts = [
            &self.item_type,
            &self.item_is,
            &self.mat_class,
            &self.material,
            &self.effects,
            &self.affects,
            &self.restricts,
            &self.immune,
            &self.damage,
            &self.weapon_class,
            &self.level,
        ];
        numbers.iter().filter(|n| n.is_some()).count()
            + texts.iter().filter(|t| t.is_some()).count()
    }

    fn push_affect(&mut self, value: &str) {
        match self.affects.as_mut() {
            Some(affects) => {
                affects.push(AFFECTS_SEPARATOR);
                affects.push_str(value);
            }
            None => self.affects = Some(value.to_string()),
        }
    }
}

fn serialize_store_datetime<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.collect_str(&value.format(STORE_DATETIME_FORMAT))
}

fn serialize_as_string<S>(value: &Option<i64>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    match value {
        Some(v) => serializer.collect_str(v),
        None => serializer.serialize_none(),
    }
}

/// Digits only, no sign.
fn parse_unsigned(value: &str) -> Option<i64> {
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    value.parse().ok()
}

/// Digits with an optional leading sign.
fn parse_signed(value: &str) -> Option<i64> {
    let digits = value.strip_prefix(['-', '+']).unwrap_or(value);
    parse_unsigned(digits)?;
    value.parse().ok()
}

type LoreSetter = fn(&mut LoreRecord, &str);

/// Recognised attribute names (lowercased) and the field each one fills.
const LORE_ATTRIBUTES: &[(&str, LoreSetter)] = &[
    ("item type", |r, v| r.item_type = Some(v.to_string())),
    ("item is", |r, v| r.item_is = Some(v.to_string())),
    ("mat class", |r, v| r.mat_class = Some(v.to_string())),
    ("material", |r, v| r.material = Some(v.to_string())),
    ("weight", |r, v| r.weight = parse_unsigned(v)),
    ("value", |r, v| r.value = parse_unsigned(v)),
    ("speed", |r, v| r.speed = parse_unsigned(v)),
    ("power", |r, v| r.power = parse_unsigned(v)),
    ("accuracy", |r, v| r.accuracy = parse_unsigned(v)),
    ("charges", |r, v| r.charges = parse_unsigned(v)),
    ("apply", |r, v| r.apply = parse_signed(v)),
    ("contains", |r, v| r.container_size = parse_unsigned(v)),
    ("capacity", |r, v| r.capacity = parse_unsigned(v)),
    ("effects", |r, v| r.effects = Some(v.to_string())),
    ("affects", |r, v| r.push_affect(v)),
    ("restricts", |r, v| r.restricts = Some(v.to_string())),
    ("immune", |r, v| r.immune = Some(v.to_string())),
    ("damage", |r, v| r.damage = Some(v.to_string())),
    ("class", |r, v| r.weapon_class = Some(v.to_string())),
    ("level", |r, v| r.level = Some(v.to_string())),
];

fn lore_setter(key: &str) -> Option<LoreSetter> {
    LORE_ATTRIBUTES
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, setter)| *setter)
}

/// Folds attribute pairs into a [`LoreRecord`].
///
/// Each builder owns its in-progress record, so concurrent pastes never
/// share state.
///
/// # Example
///
/// ```
/// use lorebot_ingest::{AttributePair, LoreRecordBuilder};
///
/// let mut builder = LoreRecordBuilder::new("a ring", "player");
/// builder.apply(&AttributePair::new("Affects", "strength by 2"));
/// builder.apply(&AttributePair::new("Affects", "hit points by 10"));
///
/// let record = builder.finish().expect("affects is populated");
/// assert_eq!(record.affects().as_deref(), Some("strength by 2,hit points by 10"));
/// ```
#[derive(Debug, Clone)]
pub struct LoreRecordBuilder {
    record: LoreRecord,
}

impl LoreRecordBuilder {
    /// Start a record for `object_name` timestamped now.
    pub fn new(object_name: impl Into<String>, submitter: impl Into<String>) -> Self {
        Self::created_at(object_name, submitter, Utc::now())
    }

    /// Start a record with an explicit creation time.
    pub fn created_at(
        object_name: impl Into<String>,
        submitter: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            record: LoreRecord::empty(object_name.into(), submitter.into(), created_at),
        }
    }

    /// Apply one attribute pair. Returns `false` for unknown attribute names,
    /// which are ignored.
    pub fn apply(&mut self, pair: &AttributePair) -> bool {
        let key = pair.key();
        match lore_setter(&key) {
            Some(setter) => {
                setter(&mut self.record, pair.value());
                true
            }
            None => {
                debug!(attribute = %key, "Ignoring unknown lore attribute");
                false
            }
        }
    }

    /// Finish the record, or `None` when no attribute was populated.
    pub fn finish(self) -> Option<LoreRecord> {
        if self.record.populated_fields() == 0 {
            debug!(object = %self.record.object_name, "Lore block has no attributes");
            return None;
        }
        Some(self.record)
    }

    /// Build a record from a lore block: an `Object '<name>'` header line
    /// followed by attribute lines. Blank and unparseable lines are skipped.
    #[instrument(skip(block), fields(submitter = %block.submitter()))]
    pub fn from_block(block: &RawBlock) -> Option<LoreRecord> {
        let mut lines = block.text().lines();
        let header = lines.next()?;
        let caps = LORE_HEADER.captures(header)?;

        let mut builder = Self::created_at(&caps[1], block.submitter(), *block.captured_at());
        for line in lines.filter(|line| !line.trim().is_empty()) {
            for pair in parse_attribute_line(line) {
                builder.apply(&pair);
            }
        }
        builder.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_unsigned_rejects_signs_and_words() {
        assert_eq!(parse_unsigned("12"), Some(12));
        assert_eq!(parse_unsigned("-12"), None);
        assert_eq!(parse_unsigned("12 lbs"), None);
        assert_eq!(parse_unsigned(""), None);
    }

    #[test]
    fn test_parse_signed_accepts_leading_sign() {
        assert_eq!(parse_signed("-3"), Some(-3));
        assert_eq!(parse_signed("+3"), Some(3));
        assert_eq!(parse_signed("3"), Some(3));
        assert_eq!(parse_signed("--3"), None);
        assert_eq!(parse_signed("-"), None);
    }

    #[test]
    fn test_every_table_entry_populates_one_field() {
        for (name, _) in LORE_ATTRIBUTES {
            let mut builder = LoreRecordBuilder::new("probe", "tester");
            assert!(builder.apply(&AttributePair::new(name, "7")), "{name}");
            let record = builder.finish().expect(name);
            assert_eq!(record.populated_fields(), 1, "{name}");
        }
    }
}
