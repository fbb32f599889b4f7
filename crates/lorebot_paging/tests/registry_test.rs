//! Session registry ownership and expiry tests.

use async_trait::async_trait;
use lorebot_error::LorebotResult;
use lorebot_paging::{
    ActorId, CursorPaginationSession, InteractionOutcome, NavigationAction,
    OffsetPaginationSession, Page, PageFetcher, ReplyId, SessionRegistry, SessionRegistryConfig,
};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

const OWNER: ActorId = ActorId(100);
const STRANGER: ActorId = ActorId(200);
const REPLY: ReplyId = ReplyId(1);

struct FailingFetcher;

#[async_trait]
impl PageFetcher for FailingFetcher {
    async fn fetch_after(&self, _cursor: &str) -> LorebotResult<Option<Page>> {
        Ok(None)
    }
}

fn letters() -> OffsetPaginationSession {
    OffsetPaginationSession::new(vec![json!("a"), json!("b"), json!("c")], 1)
}

fn registry() -> SessionRegistry {
    SessionRegistry::new(SessionRegistryConfig::default())
}

#[tokio::test(start_paused = true)]
async fn test_owner_drives_session() {
    let registry = registry();
    registry.register(REPLY, Box::new(letters()), OWNER);

    match registry.interact(REPLY, OWNER, NavigationAction::Next).await {
        InteractionOutcome::Updated(view) => {
            assert_eq!(view.content(), "b");
            assert!(*view.has_previous());
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[tokio::test(start_paused = true)]
async fn test_stranger_is_rejected_without_state_change() {
    let registry = registry();
    registry.register(REPLY, Box::new(letters()), OWNER);

    let outcome = registry.interact(REPLY, STRANGER, NavigationAction::Next).await;
    assert_eq!(outcome, InteractionOutcome::NotOwner);
    assert_eq!(outcome.notice(), Some("This pagination is not for you!"));

    let session = registry.get(REPLY).unwrap();
    assert_eq!(session.lock().await.view().content(), "a");
}

#[tokio::test(start_paused = true)]
async fn test_boundary_click_is_unchanged() {
    let registry = registry();
    registry.register(REPLY, Box::new(letters()), OWNER);

    let outcome = registry.interact(REPLY, OWNER, NavigationAction::Previous).await;
    assert!(matches!(outcome, InteractionOutcome::Unchanged(ref view) if view.content() == "a"));
    assert_eq!(outcome.notice(), Some("No more pages available!"));
}

#[tokio::test(start_paused = true)]
async fn test_fetch_failure_keeps_session() {
    let registry = registry();
    let session = CursorPaginationSession::builder()
        .fetcher(Arc::new(FailingFetcher))
        .first_page(Page::new(vec![json!("a")], Some("c1".into()), true, false))
        .build()
        .unwrap();
    registry.register(REPLY, Box::new(session), OWNER);

    let outcome = registry.interact(REPLY, OWNER, NavigationAction::Next).await;
    assert_eq!(outcome, InteractionOutcome::FetchFailed);
    assert_eq!(outcome.notice(), Some("No more pages available!"));
    assert!(registry.get(REPLY).is_some());
}

#[tokio::test(start_paused = true)]
async fn test_sessions_expire_after_registration_timeout() {
    let registry = registry();
    registry.register(REPLY, Box::new(letters()), OWNER);

    tokio::time::advance(Duration::from_secs(299)).await;
    assert!(registry.get(REPLY).is_some());
    assert!(registry.cleanup_expired().is_empty());

    tokio::time::advance(Duration::from_secs(2)).await;
    assert!(registry.get(REPLY).is_none());
    assert_eq!(
        registry.interact(REPLY, OWNER, NavigationAction::Next).await,
        InteractionOutcome::Expired
    );
    assert_eq!(registry.cleanup_expired(), vec![REPLY]);
    assert!(registry.is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_interaction_does_not_extend_lifetime() {
    let registry = registry();
    registry.register(REPLY, Box::new(letters()), OWNER);

    tokio::time::advance(Duration::from_secs(200)).await;
    registry.interact(REPLY, OWNER, NavigationAction::Next).await;
    tokio::time::advance(Duration::from_secs(150)).await;

    assert!(registry.get(REPLY).is_none());
}

#[tokio::test(start_paused = true)]
async fn test_evict_and_missing_reply() {
    let registry = registry();
    registry.register(REPLY, Box::new(letters()), OWNER);

    assert!(registry.evict(REPLY));
    assert!(!registry.evict(REPLY));
    assert_eq!(
        registry.interact(REPLY, OWNER, NavigationAction::Next).await,
        InteractionOutcome::Expired
    );
}

#[tokio::test(start_paused = true)]
async fn test_sessions_are_independent() {
    let registry = registry();
    registry.register(ReplyId(1), Box::new(letters()), OWNER);
    registry.register(ReplyId(2), Box::new(letters()), STRANGER);

    registry.interact(ReplyId(1), OWNER, NavigationAction::Next).await;

    let other = registry.get(ReplyId(2)).unwrap();
    assert_eq!(other.lock().await.view().content(), "a");
    assert_eq!(registry.owner(ReplyId(2)), Some(STRANGER));
}

#[tokio::test(start_paused = true)]
async fn test_background_sweep_reports_evicted_replies() {
    let registry = Arc::new(SessionRegistry::new(
        SessionRegistryConfig::default()
            .with_idle_timeout_secs(60)
            .with_sweep_interval_secs(10),
    ));
    registry.register(REPLY, Box::new(letters()), OWNER);

    let (handle, mut expired) = registry.spawn_expiry();
    assert_eq!(expired.recv().await, Some(REPLY));
    assert!(registry.is_empty());
    handle.abort();
}
