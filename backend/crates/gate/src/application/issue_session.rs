//! Issue Session Use Case
//!
//! Mints a new session for an already-authenticated user.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::application::config::GateConfig;
use crate::domain::clock::Clock;
use crate::domain::entity::session::{Session, SessionId};
use crate::domain::repository::SessionRepository;
use crate::error::{GateError, GateResult};

/// Draws before giving up on finding an unused id
const MAX_ID_DRAWS: usize = 8;

/// Freshly issued session
#[derive(Debug, Clone)]
pub struct IssuedSession {
    pub session_id: SessionId,
    pub session: Session,
    pub expires_at: DateTime<Utc>,
}

/// Issue session use case
pub struct IssueSessionUseCase<S>
where
    S: SessionRepository,
{
    session_repo: Arc<S>,
    config: Arc<GateConfig>,
    clock: Arc<dyn Clock>,
}

impl<S> IssueSessionUseCase<S>
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

    /// Record `{now, source_address, username}` under a never-used id
    pub async fn execute(&self, username: &str, source_address: &str) -> GateResult<IssuedSession> {
        let session = Session::new(username, source_address, self.clock.now());

        for _ in 0..MAX_ID_DRAWS {
            let session_id = SessionId::new();
            if self.session_repo.insert(session_id, session.clone()).await? {
                return Ok(IssuedSession {
                    session_id,
                    expires_at: session.expires_at(self.config.session_ttl),
                    session,
                });
            }
            tracing::warn!("Session id collision, drawing again");
        }

        Err(GateError::Internal(
            "Could not draw an unused session id".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::clock::ManualClock;
    use crate::infra::memory::InMemorySessionStore;
    use chrono::{Duration, TimeZone};

    #[tokio::test]
    async fn test_issue_records_session() {
        let now = Utc.with_ymd_and_hms(2026, 10, 19, 9, 0, 0).unwrap();
        let store = Arc::new(InMemorySessionStore::new());
        let use_case = IssueSessionUseCase::new(
            store.clone(),
            Arc::new(GateConfig::default()),
            Arc::new(ManualClock::new(now)),
        );

        let issued = use_case.execute("chris", "127.0.0.1:5000").await.unwrap();

        assert_eq!(issued.session.issued_at, now);
        assert_eq!(issued.expires_at, now + Duration::hours(24));
        let stored = store.find(issued.session_id).await.unwrap().unwrap();
        assert_eq!(stored, issued.session);
    }

    #[tokio::test]
    async fn test_each_issue_gets_new_id() {
        let store = Arc::new(InMemorySessionStore::new());
        let use_case = IssueSessionUseCase::new(
            store.clone(),
            Arc::new(GateConfig::default()),
            Arc::new(crate::domain::clock::SystemClock),
        );

        let a = use_case.execute("chris", "x").await.unwrap();
        let b = use_case.execute("chris", "x").await.unwrap();

        assert_ne!(a.session_id, b.session_id);
        assert_eq!(store.count().await.unwrap(), 2);
    }
}
