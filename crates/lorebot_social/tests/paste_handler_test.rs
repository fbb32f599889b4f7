//! Paste pipeline tests against a scripted store.

mod common;

use common::ScriptedExecutor;
use lorebot_ingest::{BlockKind, LegacyCommand};
use lorebot_social::{ADD_OR_UPDATE_LOOK, ADD_OR_UPDATE_LORE, PasteHandler, PasteOutcome};
use serde_json::json;
use std::sync::Arc;

const RING_PASTE: &str = "Object 'a platinum ring'
Item Type: jewelry    Mat Class: metal
Material: platinum    Weight: 1
Value: 5000    Affects: strength by 2";

const LOOK_PASTE: &str = "Drunoob is using:
<worn on finger>      a platinum ring
<worn on finger>      a jade ring
<worn on body>        a suit of mithril chain";

fn handler(responses: Vec<serde_json::Value>) -> (PasteHandler, Arc<ScriptedExecutor>) {
    let executor = Arc::new(ScriptedExecutor::new(responses));
    (PasteHandler::new(executor.clone()), executor)
}

#[tokio::test]
async fn test_lore_paste_is_submitted() {
    let (handler, executor) = handler(vec![json!({
        "data": {"addOrUpdateLore": {"LORE_ID": 1, "OBJECT_NAME": "a platinum ring"}}
    })]);

    let outcomes = handler.handle(RING_PASTE, "player#0001").await;

    assert_eq!(
        outcomes,
        vec![PasteOutcome::LoreUpdated("a platinum ring".to_string())]
    );
    assert_eq!(outcomes[0].reply_text(), "Object 'a platinum ring' updated.");

    let calls = executor.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].document, ADD_OR_UPDATE_LORE);
    let input = &calls[0].variables["input"];
    assert_eq!(input["OBJECT_NAME"], "a platinum ring");
    assert_eq!(input["MATERIAL"], "platinum");
    assert_eq!(input["ITEM_VALUE"], "5000");
    assert_eq!(input["SUBMITTER"], "player#0001");
}

#[tokio::test]
async fn test_look_paste_is_submitted() {
    let (handler, executor) = handler(vec![json!({
        "data": {"addOrUpdateLook": {"LOOK_ID": 9, "CHARACTER_NAME": "Drunoob"}}
    })]);

    let outcomes = handler.handle(LOOK_PASTE, "player").await;

    assert_eq!(outcomes, vec![PasteOutcome::LookUpdated("Drunoob".to_string())]);
    assert_eq!(
        outcomes[0].reply_text(),
        "Look data updated successfully for Drunoob"
    );
    let calls = executor.calls();
    assert_eq!(calls[0].document, ADD_OR_UPDATE_LOOK);
    assert_eq!(calls[0].variables["input"]["RING1"], "a platinum ring");
    assert_eq!(calls[0].variables["input"]["RING2"], "a jade ring");
}

#[tokio::test]
async fn test_header_without_attributes_is_malformed() {
    let (handler, executor) = handler(vec![]);

    let outcomes = handler.handle("Object 'a ring'\nnothing to see", "player").await;

    assert_eq!(outcomes, vec![PasteOutcome::Malformed(BlockKind::Lore)]);
    assert_eq!(
        outcomes[0].reply_text(),
        "Unable to parse lore message data. Please check the format."
    );
    assert!(executor.calls().is_empty());
}

#[tokio::test]
async fn test_error_list_is_a_submission_failure() {
    let (handler, _) = handler(vec![json!({
        "data": null,
        "errors": [{"message": "database unavailable"}]
    })]);

    let outcomes = handler.handle(RING_PASTE, "player").await;

    assert_eq!(outcomes, vec![PasteOutcome::SubmissionFailed(BlockKind::Lore)]);
    assert_eq!(
        outcomes[0].reply_text(),
        "Failed to update lore data on the backend."
    );
}

#[tokio::test]
async fn test_null_stored_object_is_a_submission_failure() {
    let (handler, _) = handler(vec![json!({"data": {"addOrUpdateLook": null}})]);

    let outcomes = handler.handle(LOOK_PASTE, "player").await;

    assert_eq!(
        outcomes,
        vec![PasteOutcome::SubmissionFailed(BlockKind::Equipment)]
    );
}

#[tokio::test]
async fn test_legacy_command_gets_migration_notice() {
    let (handler, executor) = handler(vec![]);

    let outcomes = handler.handle("!brief ring", "player").await;

    assert_eq!(outcomes, vec![PasteOutcome::Deprecated(LegacyCommand::Brief)]);
    assert!(outcomes[0].reply_text().contains("/brief"));
    assert!(executor.calls().is_empty());
}

#[tokio::test]
async fn test_plain_chat_gets_no_reply() {
    let (handler, executor) = handler(vec![]);

    assert!(handler.handle("anyone up for a run tonight?", "player").await.is_empty());
    assert!(executor.calls().is_empty());
}

#[tokio::test]
async fn test_each_look_block_is_submitted_separately() {
    let (handler, executor) = handler(vec![
        json!({"data": {"addOrUpdateLook": {"LOOK_ID": 1}}}),
        json!({"data": null, "errors": [{"message": "duplicate"}]}),
    ]);
    let message = "Drunoob is using:\n<worn on head>   a helm\n\
                   Tarlan is using:\n<held>   a torch";

    let outcomes = handler.handle(message, "player").await;

    assert_eq!(
        outcomes,
        vec![
            PasteOutcome::LookUpdated("Drunoob".to_string()),
            PasteOutcome::SubmissionFailed(BlockKind::Equipment),
        ]
    );
    let calls = executor.calls();
    assert_eq!(calls[0].variables["input"]["CHARACTER_NAME"], "Drunoob");
    assert_eq!(calls[1].variables["input"]["CHARACTER_NAME"], "Tarlan");
    assert!(calls[1].variables["input"]["HEAD"].is_null());
}

#[tokio::test]
async fn test_paste_wins_over_legacy_prefix() {
    let (handler, executor) = handler(vec![json!({
        "data": {"addOrUpdateLore": {"LORE_ID": 3, "OBJECT_NAME": "a ring"}}
    })]);

    let outcomes = handler.handle("!brief\nObject 'a ring'\nWeight: 2", "player").await;

    assert_eq!(outcomes, vec![PasteOutcome::LoreUpdated("a ring".to_string())]);
    assert_eq!(executor.calls().len(), 1);
}
