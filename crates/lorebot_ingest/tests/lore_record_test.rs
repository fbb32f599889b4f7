//! Lore paste to record tests.

use chrono::{TimeZone, Utc};
use lorebot_ingest::{
    BlockKind, LoreRecordBuilder, ParsedBlock, RawBlock, extract_blocks, parse_block,
};

const RING_PASTE: &str = "Object 'a ring'
Item Type: jewelry    Mat Class: metal
Material: gold
Weight: 2    Value: 1200
Affects: strength by 2
Affects: hit points by 10
Affects: armor class by -1";

fn lore_block(text: &str) -> RawBlock {
    let at = Utc.with_ymd_and_hms(2024, 3, 9, 18, 4, 5).unwrap();
    RawBlock::captured(BlockKind::Lore, text, "player#0001", at)
}

#[test]
fn test_ring_paste_populates_every_attribute() {
    let record = LoreRecordBuilder::from_block(&lore_block(RING_PASTE)).unwrap();

    assert_eq!(record.object_name(), "a ring");
    assert_eq!(record.item_type().as_deref(), Some("jewelry"));
    assert_eq!(record.mat_class().as_deref(), Some("metal"));
    assert_eq!(record.material().as_deref(), Some("gold"));
    assert_eq!(record.weight(), &Some(2));
    assert_eq!(record.value(), &Some(1200));
    assert_eq!(
        record.affects().as_deref(),
        Some("strength by 2,hit points by 10,armor class by -1")
    );
    assert_eq!(record.populated_fields(), 6);
}

#[test]
fn test_distinct_attributes_each_fill_one_field() {
    let paste = "Object 'a staff'\nWeight: 7\nSpeed: 4\nPower: 3\nCharges: 9\nApply: -2";
    let record = LoreRecordBuilder::from_block(&lore_block(paste)).unwrap();

    assert_eq!(record.populated_fields(), 5);
    assert_eq!(record.apply(), &Some(-2));
    assert_eq!(record.charges(), &Some(9));
}

#[test]
fn test_zero_values_are_kept() {
    let paste = "Object 'a feather'\nWeight: 0\nValue: 0";
    let record = LoreRecordBuilder::from_block(&lore_block(paste)).unwrap();
    assert_eq!(record.weight(), &Some(0));
    assert_eq!(record.value(), &Some(0));
}

#[test]
fn test_header_alone_is_no_record() {
    assert!(LoreRecordBuilder::from_block(&lore_block("Object 'a ring'")).is_none());

    let blocks = extract_blocks("Object 'a ring'", "player#0001");
    assert_eq!(blocks.len(), 1);
    assert!(matches!(parse_block(&blocks[0]), ParsedBlock::Malformed(_)));
}

#[test]
fn test_unknown_and_unparseable_lines_are_skipped() {
    let paste = "Object 'a lamp'\nit glows softly\nSmell: smoky\nWeight: heavy\nCapacity: 5";
    let record = LoreRecordBuilder::from_block(&lore_block(paste)).unwrap();
    assert_eq!(record.weight(), &None);
    assert_eq!(record.capacity(), &Some(5));
    assert_eq!(record.populated_fields(), 1);
}

#[test]
fn test_level_and_contains_attributes() {
    let paste = "Object 'a scroll'\nLevel 30: sanctuary\nContains: 4\nClass: Slashing";
    let record = LoreRecordBuilder::from_block(&lore_block(paste)).unwrap();
    assert_eq!(record.level().as_deref(), Some("30 : sanctuary"));
    assert_eq!(record.container_size(), &Some(4));
    assert_eq!(record.weapon_class().as_deref(), Some("Slashing"));
}

#[test]
fn test_record_serializes_to_lore_input() {
    let record = LoreRecordBuilder::from_block(&lore_block(RING_PASTE)).unwrap();
    let json = serde_json::to_value(&record).unwrap();

    assert_eq!(json["OBJECT_NAME"], "a ring");
    assert_eq!(json["SUBMITTER"], "player#0001");
    assert_eq!(json["CREATE_DATE"], "2024-03-09 18:04:05");
    assert_eq!(json["ITEM_TYPE"], "jewelry");
    assert_eq!(json["ITEM_VALUE"], "1200");
    assert_eq!(json["WEIGHT"], 2);
    assert!(json["SPEED"].is_null());
}

#[test]
fn test_compound_lines_keep_both_values() {
    let paste = "Object 'a breastplate'\n\
                 Item Type: armor    Mat Class: metal\n\
                 Restricts: Anti Good Immune: fire";
    let record = LoreRecordBuilder::from_block(&lore_block(paste)).unwrap();

    assert_eq!(record.item_type().as_deref(), Some("armor"));
    assert_eq!(record.mat_class().as_deref(), Some("metal"));
    assert_eq!(record.restricts().as_deref(), Some("Anti Good"));
    assert_eq!(record.immune().as_deref(), Some("fire"));
    assert_eq!(record.populated_fields(), 4);
}
