use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};
use tracing::debug;

use super::session::ChatSession;
use crate::llm::LanguageModel;
use crate::translation::Translator;

/// How long idle sessions are kept.
#[derive(Debug, Clone, Copy, Default)]
pub struct LifecyclePolicy {
    /// Sessions idle for at least this long are evicted by
    /// [`SessionRegistry::evict_expired`]. `None` keeps them until closed.
    pub ttl: Option<Duration>,
}

pub type SharedSession = Arc<tokio::sync::Mutex<ChatSession>>;

struct Entry {
    session: SharedSession,
    last_access: Instant,
}

/// Chat sessions keyed by an opaque session id, owned by the host.
///
/// Each session sits behind an async mutex; holding the guard for the life
/// of a `set_article` or `stream_query` stream serializes them per session.
pub struct SessionRegistry {
    translator: Arc<Translator>,
    model: Arc<dyn LanguageModel>,
    max_tokens: u32,
    policy: LifecyclePolicy,
    sessions: Mutex<HashMap<String, Entry>>,
}

impl SessionRegistry {
    pub fn new(
        translator: Arc<Translator>,
        model: Arc<dyn LanguageModel>,
        max_tokens: u32,
        policy: LifecyclePolicy,
    ) -> Self {
        Self {
            translator,
            model,
            max_tokens,
            policy,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the session for `id`, creating an empty one on first access.
    pub fn get_or_create(&self, id: &str) -> SharedSession {
        let mut sessions = self.sessions.lock().unwrap_or_else(PoisonError::into_inner);
        let entry = sessions.entry(id.to_string()).or_insert_with(|| {
            debug!(session = id, "creating chat session");
            Entry {
                session: Arc::new(tokio::sync::Mutex::new(ChatSession::new(
                    Arc::clone(&self.translator),
                    Arc::clone(&self.model),
                    self.max_tokens,
                ))),
                last_access: Instant::now(),
            }
        });
        entry.last_access = Instant::now();
        Arc::clone(&entry.session)
    }

    /// Removes a session. Returns `false` if it did not exist.
    pub fn close(&self, id: &str) -> bool {
        let removed = self
            .sessions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(id)
            .is_some();
        if removed {
            debug!(session = id, "closed chat session");
        }
        removed
    }

    /// Drops sessions idle past the policy's TTL, skipping any that are in
    /// use. Returns how many were evicted.
    pub fn evict_expired(&self) -> usize {
        let Some(ttl) = self.policy.ttl else {
            return 0;
        };

        let mut sessions = self.sessions.lock().unwrap_or_else(PoisonError::into_inner);
        let before = sessions.len();
        sessions.retain(|id, entry| {
            let expired =
                entry.last_access.elapsed() >= ttl && entry.session.try_lock().is_ok();
            if expired {
                debug!(session = %id, "evicting idle chat session");
            }
            !expired
        });
        before - sessions.len()
    }

    pub fn len(&self) -> usize {
        self.sessions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
