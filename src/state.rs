//! Application state: configuration and per-session phrase usage trackers.
//!
//! The scoring and sanitizing core is stateless; the only mutable state the
//! service owns is one `UsageTracker` per session id, so the no-repeat phrase
//! picker never relies on hidden globals. Session ids come from clients, so
//! the store is bounded: past `max_sessions` the least recently used tracker
//! is dropped.

use std::{collections::HashMap, sync::Arc};
use tokio::sync::RwLock;
use tracing::{debug, info, instrument};

use crate::config::{load_app_config_from_env, AppConfig};
use crate::phrases::{Language, PhraseCategory};
use crate::tracker::UsageTracker;

#[derive(Debug)]
struct SessionSlot {
    tracker: UsageTracker,
    last_used: u64,
}

/// Bounded map of session id to tracker, evicting least recently used.
#[derive(Debug)]
pub struct SessionStore {
    slots: HashMap<String, SessionSlot>,
    // logical clock, bumped on every access
    clock: u64,
    capacity: usize,
}

impl SessionStore {
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: HashMap::new(),
            clock: 0,
            capacity: capacity.max(1),
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn contains(&self, session: &str) -> bool {
        self.slots.contains_key(session)
    }

    /// The session's tracker, created on first use.
    pub fn tracker_mut(&mut self, session: &str) -> &mut UsageTracker {
        self.clock += 1;
        if !self.slots.contains_key(session) {
            while self.slots.len() >= self.capacity {
                self.evict_oldest();
            }
        }
        let clock = self.clock;
        let slot = self.slots.entry(session.to_string()).or_insert_with(|| SessionSlot {
            tracker: UsageTracker::new(),
            last_used: clock,
        });
        slot.last_used = clock;
        &mut slot.tracker
    }

    pub fn get_mut(&mut self, session: &str) -> Option<&mut UsageTracker> {
        self.slots.get_mut(session).map(|slot| &mut slot.tracker)
    }

    pub fn remove(&mut self, session: &str) -> bool {
        self.slots.remove(session).is_some()
    }

    fn evict_oldest(&mut self) {
        let oldest = self
            .slots
            .iter()
            .min_by_key(|(_, slot)| slot.last_used)
            .map(|(id, _)| id.clone());
        if let Some(id) = oldest {
            self.slots.remove(&id);
            debug!(target: "phrases", session = %id, "Evicted least recently used session");
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub sessions: Arc<RwLock<SessionStore>>,
}

impl AppState {
    /// Build state from env: load TOML config if present, otherwise defaults.
    #[instrument(level = "info", skip_all)]
    pub fn new() -> Self {
        let config = load_app_config_from_env().unwrap_or_default();
        Self::with_config(config)
    }

    pub fn with_config(config: AppConfig) -> Self {
        if Language::from_code(&config.content.default_language).is_none() {
            info!(
                target: "phrasecraft",
                default_language = %config.content.default_language,
                "Default language not in the phrase pool; content will be English"
            );
        }
        info!(
            target: "phrasecraft",
            pass = config.scoring.pass_threshold,
            perfect = config.scoring.perfect_threshold,
            default_language = %config.content.default_language,
            max_sessions = config.sessions.max_sessions,
            "Configuration ready"
        );
        let sessions = SessionStore::new(config.sessions.max_sessions);
        Self {
            config,
            sessions: Arc::new(RwLock::new(sessions)),
        }
    }

    /// Run `f` against the session's tracker, creating it on first use.
    #[instrument(level = "debug", skip(self, f))]
    pub async fn with_tracker<T>(&self, session: &str, f: impl FnOnce(&mut UsageTracker) -> T) -> T {
        let mut sessions = self.sessions.write().await;
        f(sessions.tracker_mut(session))
    }

    /// Forget what a session has seen: one category, or everything.
    #[instrument(level = "debug", skip(self))]
    pub async fn reset_tracker(&self, session: &str, category: Option<PhraseCategory>) {
        let mut sessions = self.sessions.write().await;
        match category {
            Some(c) => {
                if let Some(t) = sessions.get_mut(session) {
                    t.reset_category(c);
                }
            }
            None => {
                sessions.remove(session);
            }
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::with_config(AppConfig::default())
    }
}
