//! Sweep Sessions Use Case
//!
//! Optional reclamation of expired sessions. Without it the session map
//! only ever grows. Sweeping removes nothing that validation would still
//! accept, so enabling it never changes who gets through the gate.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::application::config::GateConfig;
use crate::domain::clock::Clock;
use crate::domain::repository::SessionRepository;
use crate::error::GateResult;

/// Sweep sessions use case
pub struct SweepSessionsUseCase<S>
where
    S: SessionRepository,
{
    session_repo: Arc<S>,
    config: Arc<GateConfig>,
    clock: Arc<dyn Clock>,
}

impl<S> SweepSessionsUseCase<S>
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

    /// Remove expired sessions, returning how many went
    pub async fn execute(&self) -> GateResult<u64> {
        self.session_repo
            .purge_expired(self.clock.now(), self.config.session_ttl)
            .await
    }
}

/// Start the sweeper if `sweep_interval` is configured
///
/// Returns `None` when sweeping is disabled. The task runs until the
/// handle is aborted or the runtime shuts down.
pub fn spawn_session_sweeper<S>(
    session_repo: Arc<S>,
    config: Arc<GateConfig>,
    clock: Arc<dyn Clock>,
) -> Option<JoinHandle<()>>
where
    S: SessionRepository + Send + Sync + 'static,
{
    let period = config.sweep_interval?;
    let use_case = SweepSessionsUseCase::new(session_repo, config, clock);

    tracing::info!(interval_secs = period.as_secs(), "Session sweeper started");

    Some(tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // First tick completes immediately
        ticker.tick().await;

        loop {
            ticker.tick().await;
            match use_case.execute().await {
                Ok(0) => {}
                Ok(removed) => {
                    tracing::info!(sessions_deleted = removed, "Expired sessions swept");
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Session sweep failed");
                }
            }
        }
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::clock::ManualClock;
    use crate::domain::entity::session::{Session, SessionId};
    use crate::infra::memory::InMemorySessionStore;
    use chrono::{Duration, TimeZone, Utc};

    #[tokio::test]
    async fn test_sweep_removes_only_expired() {
        let now = Utc.with_ymd_and_hms(2026, 10, 19, 0, 0, 0).unwrap();
        let store = Arc::new(InMemorySessionStore::new());
        let live = SessionId::new();
        store
            .insert(live, Session::new("fresh", "x", now - Duration::hours(2)))
            .await
            .unwrap();
        store
            .insert(SessionId::new(), Session::new("stale", "x", now - Duration::hours(48)))
            .await
            .unwrap();

        let use_case = SweepSessionsUseCase::new(
            store.clone(),
            Arc::new(GateConfig::default()),
            Arc::new(ManualClock::new(now)),
        );

        assert_eq!(use_case.execute().await.unwrap(), 1);
        assert_eq!(store.count().await.unwrap(), 1);
        assert!(store.find(live).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_sweeper_disabled_by_default() {
        let handle = spawn_session_sweeper(
            Arc::new(InMemorySessionStore::new()),
            Arc::new(GateConfig::default()),
            Arc::new(ManualClock::new(Utc::now())),
        );
        assert!(handle.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_sweeper_runs_on_interval() {
        let now = Utc.with_ymd_and_hms(2026, 10, 19, 0, 0, 0).unwrap();
        let store = Arc::new(InMemorySessionStore::new());
        store
            .insert(SessionId::new(), Session::new("stale", "x", now - Duration::hours(25)))
            .await
            .unwrap();

        let config = GateConfig {
            sweep_interval: Some(std::time::Duration::from_secs(60)),
            ..Default::default()
        };
        let handle = spawn_session_sweeper(
            store.clone(),
            Arc::new(config),
            Arc::new(ManualClock::new(now)),
        )
        .unwrap();

        // Let the sweeper reach its first wait, then move past one period
        tokio::task::yield_now().await;
        tokio::time::sleep(std::time::Duration::from_secs(61)).await;
        tokio::task::yield_now().await;

        assert_eq!(store.count().await.unwrap(), 0);
        handle.abort();
    }
}
