//! Registry binding live sessions to rendered replies.

use crate::{NavigationAction, NavigationOutcome, PageNavigator, PageView};
use derive_getters::Getters;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, Weak};
use std::time::Duration;
use tokio::sync::{Mutex, mpsc};
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, info, instrument, warn};

/// Identity of a rendered reply carrying navigation controls.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
    derive_more::Display, derive_more::From,
)]
pub struct ReplyId(pub u64);

/// Identity of a user interacting with a reply.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
    derive_more::Display, derive_more::From,
)]
pub struct ActorId(pub u64);

/// A session shared between the registry and an in-flight interaction.
pub type SharedSession = Arc<Mutex<Box<dyn PageNavigator>>>;

/// Configuration for [`SessionRegistry`].
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Getters,
    derive_setters::Setters,
    derive_builder::Builder,
)]
#[setters(prefix = "with_")]
pub struct SessionRegistryConfig {
    /// Seconds after registration before a session is evicted
    #[serde(default = "default_idle_timeout_secs")]
    #[builder(default = "default_idle_timeout_secs()")]
    idle_timeout_secs: u64,

    /// Seconds between background expiry sweeps
    #[serde(default = "default_sweep_interval_secs")]
    #[builder(default = "default_sweep_interval_secs()")]
    sweep_interval_secs: u64,
}

fn default_idle_timeout_secs() -> u64 {
    300
}

fn default_sweep_interval_secs() -> u64 {
    30
}

impl Default for SessionRegistryConfig {
    fn default() -> Self {
        Self {
            idle_timeout_secs: default_idle_timeout_secs(),
            sweep_interval_secs: default_sweep_interval_secs(),
        }
    }
}

impl SessionRegistryConfig {
    fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.idle_timeout_secs)
    }

    fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs.max(1))
    }
}

struct SessionEntry {
    session: SharedSession,
    owner: ActorId,
    registered_at: Instant,
}

/// What happened when a viewer clicked a navigation control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InteractionOutcome {
    /// The session moved; re-render with this view.
    Updated(PageView),
    /// The step was not possible; the view is unchanged.
    Unchanged(PageView),
    /// The actor does not own the session. Nothing changed.
    NotOwner,
    /// The page fetch failed. Nothing changed; the same click may be retried.
    FetchFailed,
    /// No live session is bound to the reply.
    Expired,
}

impl InteractionOutcome {
    /// Notice shown only to the clicking actor, if the outcome calls for one.
    pub fn notice(&self) -> Option<&'static str> {
        match self {
            Self::NotOwner => Some("This pagination is not for you!"),
            Self::Unchanged(_) | Self::FetchFailed | Self::Expired => {
                Some("No more pages available!")
            }
            Self::Updated(_) => None,
        }
    }
}

/// Live pagination sessions keyed by the reply that displays them.
///
/// Each entry records the one actor allowed to drive it. Entries expire a
/// fixed time after registration, whether or not they were used.
///
/// # Example
///
/// ```
/// use lorebot_paging::{
///     ActorId, InteractionOutcome, NavigationAction, OffsetPaginationSession, ReplyId,
///     SessionRegistry, SessionRegistryConfig,
/// };
/// use serde_json::json;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let registry = SessionRegistry::new(SessionRegistryConfig::default());
/// let session = OffsetPaginationSession::new(vec![json!("a"), json!("b")], 1);
/// registry.register(ReplyId(1), Box::new(session), ActorId(7));
///
/// let outcome = registry.interact(ReplyId(1), ActorId(8), NavigationAction::Next).await;
/// assert_eq!(outcome, InteractionOutcome::NotOwner);
/// # }
/// ```
pub struct SessionRegistry {
    config: SessionRegistryConfig,
    entries: RwLock<HashMap<ReplyId, SessionEntry>>,
}

impl SessionRegistry {
    /// Create an empty registry.
    pub fn new(config: SessionRegistryConfig) -> Self {
        debug!(
            idle_timeout_secs = config.idle_timeout_secs,
            sweep_interval_secs = config.sweep_interval_secs,
            "Creating new SessionRegistry"
        );
        Self {
            config,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Registry configuration.
    pub fn config(&self) -> &SessionRegistryConfig {
        &self.config
    }

    /// Bind `session` to `reply_id`, owned by `owner`.
    ///
    /// Replaces any session already bound to the reply.
    #[instrument(skip_all, fields(reply_id = %reply_id, owner_id = %owner))]
    pub fn register(&self, reply_id: ReplyId, session: Box<dyn PageNavigator>, owner: ActorId) {
        let entry = SessionEntry {
            session: Arc::new(Mutex::new(session)),
            owner,
            registered_at: Instant::now(),
        };
        if self.entries.write().insert(reply_id, entry).is_some() {
            warn!("Replaced a session already bound to this reply");
        } else {
            debug!("Registered session");
        }
    }

    /// Live session bound to `reply_id`.
    pub fn get(&self, reply_id: ReplyId) -> Option<SharedSession> {
        let entries = self.entries.read();
        entries
            .get(&reply_id)
            .filter(|entry| !self.is_expired(entry))
            .map(|entry| Arc::clone(&entry.session))
    }

    /// Owner of the live session bound to `reply_id`.
    pub fn owner(&self, reply_id: ReplyId) -> Option<ActorId> {
        let entries = self.entries.read();
        entries
            .get(&reply_id)
            .filter(|entry| !self.is_expired(entry))
            .map(|entry| entry.owner)
    }

    /// Remove the session bound to `reply_id`. Returns whether one was bound.
    #[instrument(skip_all, fields(reply_id = %reply_id))]
    pub fn evict(&self, reply_id: ReplyId) -> bool {
        let removed = self.entries.write().remove(&reply_id).is_some();
        if removed {
            debug!("Evicted session");
        }
        removed
    }

    /// Number of bound sessions, expired or not.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Whether no session is bound.
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Evict every expired session and return the replies they were bound to.
    pub fn cleanup_expired(&self) -> Vec<ReplyId> {
        let mut entries = self.entries.write();
        let expired: Vec<ReplyId> = entries
            .iter()
            .filter(|(_, entry)| self.is_expired(entry))
            .map(|(reply_id, _)| *reply_id)
            .collect();
        for reply_id in &expired {
            entries.remove(reply_id);
        }
        if !expired.is_empty() {
            info!(count = expired.len(), "Evicted expired sessions");
        }
        expired
    }

    fn is_expired(&self, entry: &SessionEntry) -> bool {
        entry.registered_at.elapsed() >= self.config.idle_timeout()
    }

    /// Apply a navigation click from `actor` to the session bound to
    /// `reply_id`.
    ///
    /// Ownership is checked before the session is touched. A failed fetch
    /// leaves the session as it was and keeps it registered.
    #[instrument(skip_all, fields(reply_id = %reply_id, actor_id = %actor, action = %action))]
    pub async fn interact(
        &self,
        reply_id: ReplyId,
        actor: ActorId,
        action: NavigationAction,
    ) -> InteractionOutcome {
        let Some(owner) = self.owner(reply_id) else {
            debug!("No live session for reply");
            return InteractionOutcome::Expired;
        };
        if owner != actor {
            warn!(owner_id = %owner, "Rejected interaction from non-owner");
            return InteractionOutcome::NotOwner;
        }
        let Some(session) = self.get(reply_id) else {
            return InteractionOutcome::Expired;
        };

        let mut session = session.lock().await;
        let step = match action {
            NavigationAction::Next => session.next().await,
            NavigationAction::Previous => session.previous().await,
        };
        match step {
            Ok(NavigationOutcome::Moved) => InteractionOutcome::Updated(session.view()),
            Ok(NavigationOutcome::AtBoundary) => InteractionOutcome::Unchanged(session.view()),
            Err(e) => {
                warn!(error = %e, "Navigation failed");
                InteractionOutcome::FetchFailed
            }
        }
    }

    /// Start a background task that sweeps expired sessions.
    ///
    /// Replies whose session was evicted are sent on the returned channel so
    /// the caller can disable their controls. The task stops once the
    /// registry is dropped.
    pub fn spawn_expiry(self: &Arc<Self>) -> (JoinHandle<()>, mpsc::UnboundedReceiver<ReplyId>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let registry: Weak<Self> = Arc::downgrade(self);
        let period = self.config.sweep_interval();

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            loop {
                ticker.tick().await;
                let Some(registry) = registry.upgrade() else {
                    debug!("Registry dropped, stopping expiry sweeps");
                    break;
                };
                for reply_id in registry.cleanup_expired() {
                    if tx.send(reply_id).is_err() {
                        debug!("Expiry receiver dropped");
                    }
                }
            }
        });
        (handle, rx)
    }
}
