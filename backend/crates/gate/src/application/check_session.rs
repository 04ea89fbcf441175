//! Check Session Use Case
//!
//! Resolves a cookie value to a live session. Read-only: expired records
//! are reported invalid but left in the store.

use std::sync::Arc;

use crate::application::config::GateConfig;
use crate::domain::clock::Clock;
use crate::domain::entity::session::{AuthenticatedSession, SessionId};
use crate::domain::repository::SessionRepository;
use crate::error::{GateError, GateResult};

/// Check session use case
pub struct CheckSessionUseCase<S>
where
    S: SessionRepository,
{
    session_repo: Arc<S>,
    config: Arc<GateConfig>,
    clock: Arc<dyn Clock>,
}

impl<S> CheckSessionUseCase<S>
where
    S: SessionRepository,
{
    pub fn new(session_repo: Arc<S>, config: Arc<GateConfig>, clock: Arc<dyn Clock>) -> Self {
        Self {
            session_repo,
            config,
            clock,
        }
    }

    /// Validate a session token
    ///
    /// - `MalformedIdentifier` when the text is not a session id
    /// - `SessionInvalid` when no such session exists or
    ///   `now >= issued_at + ttl`
    pub async fn execute(&self, session_token: &str) -> GateResult<AuthenticatedSession> {
        let session_id: SessionId = session_token
            .parse()
            .map_err(|_| GateError::MalformedIdentifier)?;

        let session = self
            .session_repo
            .find(session_id)
            .await?
            .ok_or(GateError::SessionInvalid)?;

        if !session.is_valid_at(self.clock.now(), self.config.session_ttl) {
            tracing::debug!(username = %session.username, "Session expired");
            return Err(GateError::SessionInvalid);
        }

        Ok(AuthenticatedSession::from_record(
            session_id,
            session,
            self.config.session_ttl,
        ))
    }

    /// Just check if session is valid (returns bool)
    pub async fn is_valid(&self, session_token: &str) -> bool {
        self.execute(session_token).await.is_ok()
    }
}
