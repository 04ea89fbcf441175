//! In-Memory Repository Implementations
//!
//! Each store is a single `RwLock<HashMap<..>>`. Lookups share the read
//! lock; inserts, upserts and purges take the write lock. No I/O and no
//! hashing happens while a lock is held.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use chrono::{DateTime, Duration, Utc};
use platform::password::HashedPassword;
use tokio::sync::RwLock;

use crate::domain::entity::{
    credential::Credential,
    session::{Session, SessionId},
};
use crate::domain::repository::{CredentialRepository, SessionRepository};
use crate::error::GateResult;

/// Username → password hash
#[derive(Debug, Default)]
pub struct InMemoryCredentialStore {
    users: RwLock<HashMap<String, HashedPassword>>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CredentialRepository for InMemoryCredentialStore {
    async fn upsert(&self, credential: Credential) -> GateResult<()> {
        let replaced = self
            .users
            .write()
            .await
            .insert(credential.username.clone(), credential.password_hash)
            .is_some();

        if replaced {
            tracing::debug!(username = %credential.username, "Credential replaced");
        }

        Ok(())
    }

    async fn find_hash(&self, username: &str) -> GateResult<Option<HashedPassword>> {
        Ok(self.users.read().await.get(username).cloned())
    }

    async fn count(&self) -> GateResult<usize> {
        Ok(self.users.read().await.len())
    }
}

/// Session id → session record
///
/// Nothing is removed on lookup. Expired records stay until
/// [`SessionRepository::purge_expired`] runs, which only the optional
/// sweeper does.
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<SessionId, Session>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionRepository for InMemorySessionStore {
    async fn insert(&self, session_id: SessionId, session: Session) -> GateResult<bool> {
        match self.sessions.write().await.entry(session_id) {
            Entry::Occupied(_) => Ok(false),
            Entry::Vacant(slot) => {
                slot.insert(session);
                Ok(true)
            }
        }
    }

    async fn find(&self, session_id: SessionId) -> GateResult<Option<Session>> {
        Ok(self.sessions.read().await.get(&session_id).cloned())
    }

    async fn purge_expired(&self, now: DateTime<Utc>, ttl: Duration) -> GateResult<u64> {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, session| session.is_valid_at(now, ttl));
        Ok((before - sessions.len()) as u64)
    }

    async fn count(&self) -> GateResult<usize> {
        Ok(self.sessions.read().await.len())
    }
}
