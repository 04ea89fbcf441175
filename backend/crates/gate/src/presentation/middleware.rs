//! Gate Middleware
//!
//! Runs in front of every non-signin route. A request with a live session
//! cookie continues downstream carrying its `AuthenticatedSession`; anything
//! else gets a 303 to the signin page.

use axum::body::Body;
use axum::extract::State;
use axum::http::{Request, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use platform::cookie::{delete_cookie_header, extract_cookie};

use crate::application::config::SIGNIN_PATH;
use crate::application::CheckSessionUseCase;
use crate::domain::repository::{CredentialRepository, SessionRepository};
use crate::presentation::handlers::GateState;

/// Middleware that requires a valid session cookie
pub async fn require_session<C, S>(
    State(state): State<GateState<C, S>>,
    mut req: Request<Body>,
    next: Next,
) -> Response
where
    C: CredentialRepository + Send + Sync + 'static,
    S: SessionRepository + Send + Sync + 'static,
{
    let Some(token) = extract_cookie(req.headers(), &state.config.session_cookie_name) else {
        return Redirect::to(SIGNIN_PATH).into_response();
    };

    let use_case =
        CheckSessionUseCase::new(state.sessions.clone(), state.config.clone(), state.clock.clone());

    match use_case.execute(&token).await {
        Ok(session) => {
            req.extensions_mut().insert(session);
            next.run(req).await
        }
        Err(e) if e.is_auth_failure() && state.config.clear_stale_cookie => {
            let response = e.into_response();
            match delete_cookie_header(&state.config.cookie_config()) {
                Ok(clear) => ([(header::SET_COOKIE, clear)], response).into_response(),
                Err(e) => {
                    tracing::error!(error = %e, "Session cookie misconfigured, not clearing");
                    response
                }
            }
        }
        Err(e) => e.into_response(),
    }
}
