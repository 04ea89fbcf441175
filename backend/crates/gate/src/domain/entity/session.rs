//! Session Entity
//!
//! A server-side record minted by a successful signin and referenced by the
//! `auth_token` cookie.

use chrono::{DateTime, Duration, Utc};

pub use kernel::id::SessionId;

/// Session record, keyed by [`SessionId`] in the session store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// When the signin succeeded
    pub issued_at: DateTime<Utc>,
    /// Peer address of the signin request
    pub source_address: String,
    /// Username as submitted (exact, case-sensitive)
    pub username: String,
}

impl Session {
    pub fn new(
        username: impl Into<String>,
        source_address: impl Into<String>,
        issued_at: DateTime<Utc>,
    ) -> Self {
        Self {
            issued_at,
            source_address: source_address.into(),
            username: username.into(),
        }
    }

    pub fn expires_at(&self, ttl: Duration) -> DateTime<Utc> {
        self.issued_at + ttl
    }

    /// Valid iff `now < issued_at + ttl`. Use never extends a session.
    pub fn is_valid_at(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        now < self.expires_at(ttl)
    }
}

/// Identity attached to a request that passed the gate
///
/// Lives in the request extensions for the duration of that one request.
/// Downstream handlers take it as an extractor argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedSession {
    pub session_id: SessionId,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub source_address: String,
    pub username: String,
}

impl AuthenticatedSession {
    pub fn from_record(session_id: SessionId, session: Session, ttl: Duration) -> Self {
        Self {
            session_id,
            expires_at: session.expires_at(ttl),
            issued_at: session.issued_at,
            source_address: session.source_address,
            username: session.username,
        }
    }
}
