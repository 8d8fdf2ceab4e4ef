//! Server-side sessions.
//!
//! A session is created at login and addressed by an opaque token handed to
//! the client in a cookie (or as a Bearer token). Only the SHA-256 hash of
//! the token is kept as the cache key, so a dump of the store cannot be
//! replayed. Sessions live in a bounded in-process cache that evicts them
//! once their lifetime is over, and vanish on restart.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use chrono::{Duration, Utc};
use moka::future::Cache;
use sha2::{Digest, Sha256};
use taxi_core::types::{DbId, Timestamp};
use uuid::Uuid;

use crate::config::parse_flag;

const DEFAULT_COOKIE_NAME: &str = "sessionid";
/// Two weeks.
const DEFAULT_TTL_HOURS: i64 = 336;
/// Upper bound on live sessions; the least recently used are evicted first.
const MAX_SESSIONS: u64 = 100_000;

/// Session cookie and lifetime settings.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Name of the session cookie (default: `sessionid`).
    pub cookie_name: String,
    /// Whether the cookie carries the `Secure` attribute (default: `true`).
    pub cookie_secure: bool,
    /// Session lifetime in hours (default: `336`).
    pub ttl_hours: i64,
}

impl SessionConfig {
    /// Load session settings from environment variables.
    ///
    /// | Env Var                 | Default     |
    /// |-------------------------|-------------|
    /// | `SESSION_COOKIE_NAME`   | `sessionid` |
    /// | `SESSION_COOKIE_SECURE` | `true`      |
    /// | `SESSION_TTL_HOURS`     | `336`       |
    pub fn from_env() -> Self {
        let cookie_name =
            std::env::var("SESSION_COOKIE_NAME").unwrap_or_else(|_| DEFAULT_COOKIE_NAME.into());

        let cookie_secure = std::env::var("SESSION_COOKIE_SECURE")
            .map(|v| parse_flag(&v))
            .unwrap_or(true);

        let ttl_hours: i64 = std::env::var("SESSION_TTL_HOURS")
            .unwrap_or_else(|_| DEFAULT_TTL_HOURS.to_string())
            .parse()
            .expect("SESSION_TTL_HOURS must be a valid i64");
        assert!(ttl_hours > 0, "SESSION_TTL_HOURS must be positive");

        Self {
            cookie_name,
            cookie_secure,
            ttl_hours,
        }
    }

    pub fn ttl(&self) -> Duration {
        Duration::hours(self.ttl_hours)
    }

    /// Cookie that stores `token` in the browser for the session lifetime.
    pub fn session_cookie(&self, token: String) -> Cookie<'static> {
        self.cookie_builder(token)
            .max_age(cookie::time::Duration::seconds(self.ttl().num_seconds()))
            .build()
    }

    /// Cookie that tells the browser to drop the session cookie.
    pub fn removal_cookie(&self) -> Cookie<'static> {
        let mut cookie = self.cookie_builder(String::new()).build();
        cookie.make_removal();
        cookie
    }

    /// The session token carried by the request's cookies, if any.
    pub fn read_token(&self, jar: &CookieJar) -> Option<String> {
        jar.get(&self.cookie_name)
            .map(|cookie| cookie.value().to_string())
            .filter(|value| !value.is_empty())
    }

    fn cookie_builder(&self, value: String) -> cookie::CookieBuilder<'static> {
        Cookie::build((self.cookie_name.clone(), value))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(self.cookie_secure)
    }
}

/// Generate a fresh session token.
///
/// Returns `(plaintext_token, sha256_hex_hash)`. The plaintext goes to the
/// client; the hash is the store key.
pub fn generate_session_token() -> (String, String) {
    let plaintext = Uuid::new_v4().to_string();
    let hash = hash_session_token(&plaintext);
    (plaintext, hash)
}

/// SHA-256 hex digest of a session token.
pub fn hash_session_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Per-client session data.
#[derive(Debug)]
pub struct Session {
    pub user_id: DbId,
    pub created_at: Timestamp,
    pub expires_at: Timestamp,
    num_visits: AtomicU64,
}

impl Session {
    /// Dashboard views in this session.
    pub fn num_visits(&self) -> u64 {
        self.num_visits.load(Ordering::Relaxed)
    }

    fn is_expired(&self, now: Timestamp) -> bool {
        self.expires_at <= now
    }
}

/// All live sessions, keyed by token hash.
///
/// Entries expire `ttl` after login and are reclaimed by the cache's own
/// housekeeping; [`SessionStore::purge_expired`] forces a pass. Wrap in
/// `Arc` and share across the application.
pub struct SessionStore {
    sessions: Cache<String, Arc<Session>>,
    ttl: Duration,
}

impl SessionStore {
    /// Create an empty store whose sessions live for `ttl`.
    pub fn new(ttl: Duration) -> Self {
        let sessions = Cache::builder()
            .max_capacity(MAX_SESSIONS)
            .time_to_live(ttl.to_std().unwrap_or_default())
            .build();
        Self { sessions, ttl }
    }

    /// Start a session for `user_id` and return its plaintext token.
    pub async fn create(&self, user_id: DbId) -> String {
        let (token, hash) = generate_session_token();
        let now = Utc::now();
        let session = Session {
            user_id,
            created_at: now,
            expires_at: now + self.ttl,
            num_visits: AtomicU64::new(0),
        };
        self.sessions.insert(hash, Arc::new(session)).await;
        token
    }

    /// Look up a live session.
    pub async fn get(&self, token: &str) -> Option<Arc<Session>> {
        let hash = hash_session_token(token);
        let session = self.sessions.get(&hash).await?;
        if session.is_expired(Utc::now()) {
            self.sessions.invalidate(&hash).await;
            return None;
        }
        Some(session)
    }

    /// Add one to the session's visit counter and return the new value.
    ///
    /// Returns `None` if the session does not exist or has expired.
    pub async fn increment_visits(&self, token: &str) -> Option<u64> {
        let session = self.get(token).await?;
        Some(session.num_visits.fetch_add(1, Ordering::Relaxed) + 1)
    }

    /// End a session. Returns `true` if it existed.
    pub async fn destroy(&self, token: &str) -> bool {
        let hash = hash_session_token(token);
        self.sessions.remove(&hash).await.is_some()
    }

    /// End every session belonging to `user_id`. Returns how many were removed.
    pub async fn destroy_all_for_user(&self, user_id: DbId) -> usize {
        let keys: Vec<Arc<String>> = self
            .sessions
            .iter()
            .filter(|(_, session)| session.user_id == user_id)
            .map(|(key, _)| key)
            .collect();
        for key in &keys {
            self.sessions.invalidate(key.as_str()).await;
        }
        keys.len()
    }

    /// Reclaim expired and evicted sessions now instead of on the cache's
    /// next maintenance pass.
    pub async fn purge_expired(&self) {
        self.sessions.run_pending_tasks().await;
    }

    /// Number of stored sessions after a maintenance pass.
    pub async fn len(&self) -> u64 {
        self.sessions.run_pending_tasks().await;
        self.sessions.entry_count()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
