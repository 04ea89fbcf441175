//! Gate Router

use axum::{Router, middleware, routing::get};
use tower::Layer;

use crate::application::config::SIGNIN_PATH;
use crate::domain::repository::{CredentialRepository, SessionRepository};
use crate::presentation::handlers::{self, GateState};
use crate::presentation::middleware::require_session;

/// Put the gate in front of `downstream`
///
/// `/signin` is served by the gate itself. Every other request, whatever
/// its method or path, goes through [`require_session`] and on success
/// reaches `downstream` unchanged.
pub fn gate_router<C, S>(downstream: Router, state: GateState<C, S>) -> Router
where
    C: CredentialRepository + Send + Sync + 'static,
    S: SessionRepository + Send + Sync + 'static,
{
    let gated =
        middleware::from_fn_with_state(state.clone(), require_session::<C, S>).layer(downstream);

    Router::new()
        .route(
            SIGNIN_PATH,
            get(handlers::signin_page).post(handlers::sign_in::<C, S>),
        )
        .fallback_service(gated)
        .with_state(state)
}
