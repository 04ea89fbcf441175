//! Repository Traits
//!
//! Storage interfaces for credentials and sessions. Implementations are in
//! the infrastructure layer.
//!
//! Implementations must not hold a lock across anything slow. In particular
//! `find_hash` hands back a copy of the hash so verification happens after
//! the lock is released.

use chrono::{DateTime, Duration, Utc};
use platform::password::HashedPassword;

use crate::domain::entity::{
    credential::Credential,
    session::{Session, SessionId},
};
use crate::error::GateResult;

/// Credential repository trait
#[trait_variant::make(CredentialRepository: Send)]
pub trait LocalCredentialRepository {
    /// Insert or replace the credential stored under its username
    async fn upsert(&self, credential: Credential) -> GateResult<()>;

    /// Copy of the stored hash for a username
    async fn find_hash(&self, username: &str) -> GateResult<Option<HashedPassword>>;

    /// Number of stored credentials
    async fn count(&self) -> GateResult<usize>;
}

/// Session repository trait
#[trait_variant::make(SessionRepository: Send)]
pub trait LocalSessionRepository {
    /// Store a session under an unused id
    ///
    /// Returns `false` and leaves the store untouched if the id is taken.
    async fn insert(&self, session_id: SessionId, session: Session) -> GateResult<bool>;

    /// Find session by ID, expired or not
    async fn find(&self, session_id: SessionId) -> GateResult<Option<Session>>;

    /// Remove sessions with `now >= issued_at + ttl`, returning how many
    async fn purge_expired(&self, now: DateTime<Utc>, ttl: Duration) -> GateResult<u64>;

    /// Number of stored sessions, including expired ones not yet purged
    async fn count(&self) -> GateResult<usize>;
}
