//! In-memory session store.
//!
//! Uses `DashMap` for concurrent access without external locks. Each
//! operation is a single map call; expiry is checked lazily on read.
//! Sessions are lost on restart.

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::time::{Duration, Instant};

use super::{SESSION_TTL, SessionRecord, SessionStore, generate_token};
use crate::types::SessionUser;

pub struct InMemoryStore {
    store: DashMap<String, SessionRecord>,
    ttl: Duration,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::with_ttl(SESSION_TTL)
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            store: DashMap::new(),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore for InMemoryStore {
    fn create(&self, user: SessionUser) -> String {
        let expires_at = Instant::now() + self.ttl;
        loop {
            let token = generate_token();
            if let Entry::Vacant(slot) = self.store.entry(token.clone()) {
                slot.insert(SessionRecord { user, expires_at });
                return token;
            }
        }
    }

    fn resolve(&self, token: &str) -> Option<SessionUser> {
        let entry = self.store.get(token)?;

        if entry.is_expired(Instant::now()) {
            drop(entry); // Release the read lock before removing
            self.store
                .remove_if(token, |_, record| record.is_expired(Instant::now()));
            return None;
        }

        Some(entry.user.clone())
    }

    fn invalidate(&self, token: &str) -> bool {
        self.store.remove(token).is_some()
    }

    fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let before = self.store.len();
        self.store.retain(|_, record| !record.is_expired(now));
        before.saturating_sub(self.store.len())
    }

    fn len(&self) -> usize {
        self.store.len()
    }
}
