//! Server-side session management.
//!
//! Provides the `SessionStore` trait, an in-memory store with lazy expiry,
//! the session cookie codec, and the Axum pieces that resolve a request's
//! cookie to a logged-in user.

pub mod cookie;
pub mod extract;
pub mod memory;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use std::time::{Duration, Instant};

use crate::types::SessionUser;

/// Name of the cookie carrying the session token.
pub const COOKIE_NAME: &str = "vos_sid";

/// Fixed session lifetime. Sessions are not extended on activity.
pub const SESSION_TTL: Duration = Duration::from_secs(8 * 3600);

/// A stored session: the user snapshot taken at login plus its deadline.
#[derive(Debug, Clone)]
pub struct SessionRecord {
    pub user: SessionUser,
    pub expires_at: Instant,
}

impl SessionRecord {
    pub fn is_expired(&self, now: Instant) -> bool {
        self.expires_at <= now
    }
}

/// Token-keyed session storage.
///
/// Absence is never an error: every lookup miss, expiry, or unknown token
/// is reported as `None` / no-op.
pub trait SessionStore: Send + Sync {
    /// Store a snapshot of `user` under a fresh token and return the token.
    fn create(&self, user: SessionUser) -> String;

    /// Look up the user for `token`. Expired entries are removed and
    /// reported as absent.
    fn resolve(&self, token: &str) -> Option<SessionUser>;

    /// Remove the session for `token`, if any. Returns whether one existed.
    fn invalidate(&self, token: &str) -> bool;

    /// Drop every expired entry, returning how many were removed.
    fn purge_expired(&self) -> usize;

    /// Number of stored entries, including expired ones not yet purged.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// 32 random bytes, base64url without padding (43 characters).
pub fn generate_token() -> String {
    use rand::Rng;
    let bytes: [u8; 32] = rand::thread_rng().r#gen();
    URL_SAFE_NO_PAD.encode(bytes)
}
