use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::Mutex;
use uuid::Uuid;
use crate::dialogue::DialogueContext;

/// Dialogue context shared between the store and the request handling it
///
/// The mutex serializes turns within one session; different sessions never
/// contend.
pub type SharedContext = Arc<Mutex<DialogueContext>>;

/// Errors that can occur with session operations
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Session not found: {0}")]
    NotFound(Uuid),

    #[error("Profile incomplete, missing: {}", .0.join(", "))]
    IncompleteProfile(Vec<String>),
}

/// In-memory store of live conversations
///
/// Sessions are never persisted. Idle sessions expire after the configured
/// timeout and the oldest are evicted once capacity is reached.
#[derive(Clone)]
pub struct SessionStore {
    sessions: moka::future::Cache<Uuid, SharedContext>,
}

impl SessionStore {
    pub fn new(max_sessions: u64, idle_timeout_secs: u64) -> Self {
        let sessions = moka::future::CacheBuilder::new(max_sessions)
            .time_to_idle(Duration::from_secs(idle_timeout_secs))
            .build();

        Self { sessions }
    }

    /// Register a new conversation and return its id
    pub async fn create(&self, context: DialogueContext) -> (Uuid, SharedContext) {
        let id = Uuid::new_v4();
        let shared = Arc::new(Mutex::new(context));
        self.sessions.insert(id, shared.clone()).await;

        tracing::debug!("Session created: {}", id);
        (id, shared)
    }

    pub async fn get(&self, id: Uuid) -> Result<SharedContext, SessionError> {
        self.sessions.get(&id).await.ok_or(SessionError::NotFound(id))
    }

    /// End a conversation
    pub async fn remove(&self, id: Uuid) -> Result<(), SessionError> {
        match self.sessions.remove(&id).await {
            Some(_) => {
                tracing::debug!("Session removed: {}", id);
                Ok(())
            }
            None => Err(SessionError::NotFound(id)),
        }
    }

    /// Approximate number of live sessions
    pub fn len(&self) -> u64 {
        self.sessions.entry_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
