//! Sign In Use Case
//!
//! Authenticates a user and creates a session.

use std::sync::Arc;

use crate::application::config::GateConfig;
use crate::application::issue_session::{IssueSessionUseCase, IssuedSession};
use crate::application::verify_credentials::VerifyCredentialsUseCase;
use crate::domain::clock::Clock;
use crate::domain::repository::{CredentialRepository, SessionRepository};
use crate::error::{GateError, GateResult};

/// Sign in input
pub struct SignInInput {
    pub username: String,
    pub password: String,
    /// Where the signin request came from, recorded on the session
    pub source_address: String,
}

/// Sign in use case
pub struct SignInUseCase<C, S>
where
    C: CredentialRepository,
    S: SessionRepository,
{
    verify: VerifyCredentialsUseCase<C>,
    issue: IssueSessionUseCase<S>,
}

impl<C, S> SignInUseCase<C, S>
where
    C: CredentialRepository,
    S: SessionRepository,
{
    pub fn new(
        credential_repo: Arc<C>,
        session_repo: Arc<S>,
        config: Arc<GateConfig>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            verify: VerifyCredentialsUseCase::new(credential_repo),
            issue: IssueSessionUseCase::new(session_repo, config, clock),
        }
    }

    pub async fn execute(&self, input: SignInInput) -> GateResult<IssuedSession> {
        let SignInInput {
            username,
            password,
            source_address,
        } = input;

        // Empty fields never reach the store
        if username.is_empty() || password.is_empty() {
            tracing::debug!("Signin form with empty field");
            return Err(GateError::InvalidCredentials);
        }

        if let Err(e) = self.verify.execute(&username, password).await {
            if e.is_auth_failure() {
                tracing::info!(
                    username = %username,
                    source_address = %source_address,
                    "Signin rejected"
                );
            }
            return Err(e);
        }

        let issued = self.issue.execute(&username, &source_address).await?;

        tracing::info!(
            username = %username,
            source_address = %source_address,
            expires_at = %issued.expires_at,
            "User signed in"
        );

        Ok(issued)
    }
}
