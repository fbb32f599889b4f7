//! Message to block extraction tests.

use lorebot_ingest::{BlockKind, LegacyCommand, extract_blocks, recognize_legacy_command};

#[test]
fn test_plain_chat_has_no_blocks() {
    assert!(extract_blocks("anyone up for a run tonight?", "p").is_empty());
    assert!(extract_blocks("", "p").is_empty());
}

#[test]
fn test_leading_chatter_is_discarded() {
    let blocks = extract_blocks("found this today!\nObject 'a cap'\nWeight: 1", "p");
    assert_eq!(blocks.len(), 1);
    assert!(blocks[0].text().starts_with("Object 'a cap'"));
    assert!(!blocks[0].text().contains("found this"));
}

#[test]
fn test_lore_wins_over_look() {
    let message = "Object 'a cap'\nWeight: 1\nDrunoob is using:\n<held> a torch";
    let blocks = extract_blocks(message, "p");
    assert!(blocks.iter().all(|b| b.kind() == &BlockKind::Lore));
}

#[test]
fn test_several_lore_blocks_in_one_message() {
    let message = "Object 'a cap'\nWeight: 1\nObject 'a sword'\nWeight: 9";
    let blocks = extract_blocks(message, "p");
    assert_eq!(blocks.len(), 2);
    assert!(blocks[1].text().starts_with("Object 'a sword'"));
}

#[test]
fn test_look_trigger_at_message_start_is_ignored() {
    assert!(extract_blocks(" is using: nothing", "p").is_empty());
}

#[test]
fn test_submitter_is_recorded() {
    let blocks = extract_blocks("Object 'a cap'\nWeight: 1", "player#0001");
    assert_eq!(blocks[0].submitter(), "player#0001");
}

#[test]
fn test_legacy_commands() {
    assert_eq!(recognize_legacy_command("!who"), Some(LegacyCommand::Who));
    assert_eq!(recognize_legacy_command("!brief ring"), Some(LegacyCommand::Brief));
    assert_eq!(recognize_legacy_command("! who"), None);
    assert_eq!(
        LegacyCommand::Who.migration_notice(),
        "`!who` is deprecated. Please use `/who` instead."
    );
}
