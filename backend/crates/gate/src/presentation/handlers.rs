//! HTTP Handlers

use axum::extract::State;
use axum::extract::rejection::FormRejection;
use axum::http::{HeaderMap, header};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Form;
use std::sync::Arc;

use platform::client::source_address;
use platform::cookie::set_cookie_header;

use crate::application::config::{GateConfig, LANDING_PATH, SIGNIN_PATH};
use crate::application::{SignInInput, SignInUseCase};
use crate::domain::clock::{Clock, SystemClock};
use crate::domain::repository::{CredentialRepository, SessionRepository};
use crate::error::GateError;
use crate::presentation::dto::SignInForm;
use crate::presentation::extract::PeerAddr;

/// Shared state for the signin handlers and the gate middleware
pub struct GateState<C, S>
where
    C: CredentialRepository + Send + Sync + 'static,
    S: SessionRepository + Send + Sync + 'static,
{
    pub credentials: Arc<C>,
    pub sessions: Arc<S>,
    pub config: Arc<GateConfig>,
    pub clock: Arc<dyn Clock>,
}

impl<C, S> GateState<C, S>
where
    C: CredentialRepository + Send + Sync + 'static,
    S: SessionRepository + Send + Sync + 'static,
{
    pub fn new(credentials: Arc<C>, sessions: Arc<S>, config: GateConfig) -> Self {
        Self::with_clock(credentials, sessions, config, Arc::new(SystemClock))
    }

    pub fn with_clock(
        credentials: Arc<C>,
        sessions: Arc<S>,
        config: GateConfig,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            credentials,
            sessions,
            config: Arc::new(config),
            clock,
        }
    }
}

impl<C, S> Clone for GateState<C, S>
where
    C: CredentialRepository + Send + Sync + 'static,
    S: SessionRepository + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            credentials: self.credentials.clone(),
            sessions: self.sessions.clone(),
            config: self.config.clone(),
            clock: self.clock.clone(),
        }
    }
}

// ============================================================================
// Sign In
// ============================================================================

/// GET /signin
pub async fn signin_page() -> Html<&'static str> {
    Html(SIGNIN_PAGE)
}

/// POST /signin
///
/// Every failure, including an undecodable body, is the same 303 back to
/// the form with no cookie.
pub async fn sign_in<C, S>(
    State(state): State<GateState<C, S>>,
    PeerAddr(peer): PeerAddr,
    headers: HeaderMap,
    form: Result<Form<SignInForm>, FormRejection>,
) -> Response
where
    C: CredentialRepository + Send + Sync + 'static,
    S: SessionRepository + Send + Sync + 'static,
{
    let Form(form) = match form {
        Ok(form) => form,
        Err(rejection) => {
            tracing::debug!(error = %rejection, "Unreadable signin form");
            return Redirect::to(SIGNIN_PATH).into_response();
        }
    };

    let use_case = SignInUseCase::new(
        state.credentials.clone(),
        state.sessions.clone(),
        state.config.clone(),
        state.clock.clone(),
    );

    let input = SignInInput {
        username: form.username,
        password: form.password,
        source_address: source_address(&headers, peer, state.config.trust_forwarded_for),
    };

    match use_case.execute(input).await {
        Ok(issued) => match set_cookie_header(
            &state.config.cookie_config(),
            &issued.session_id.to_string(),
            Some(issued.expires_at),
        ) {
            Ok(cookie) => {
                ([(header::SET_COOKIE, cookie)], Redirect::to(LANDING_PATH)).into_response()
            }
            // The session stays unreachable and expires with its TTL
            Err(e) => GateError::from(e).into_response(),
        },
        Err(e) => e.into_response(),
    }
}

const SIGNIN_PAGE: &str = r#"<!doctype html>
<html lang="en">
	<head>
		<title>Sign in</title>
	</head>
	<body>
		<form action="/signin" method="post">
			<input id="username" name="username" autocomplete="username">
			<input id="password" type="password" name="password" autocomplete="current-password">
			<button type="submit">Login</button>
		</form>
	</body>
</html>
"#;
