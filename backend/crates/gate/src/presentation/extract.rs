//! Request Extractors

use std::convert::Infallible;
use std::net::SocketAddr;

use axum::extract::{ConnectInfo, FromRequestParts};
use axum::http::request::Parts;
use kernel::error::app_error::AppError;

use crate::domain::entity::session::AuthenticatedSession;

/// Peer socket address, when the server was started with connect info
///
/// Unlike `ConnectInfo`, never rejects: requests built in tests or served
/// without `into_make_service_with_connect_info` yield `PeerAddr(None)`.
#[derive(Debug, Clone, Copy)]
pub struct PeerAddr(pub Option<SocketAddr>);

impl<S> FromRequestParts<S> for PeerAddr
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(PeerAddr(
            parts
                .extensions
                .get::<ConnectInfo<SocketAddr>>()
                .map(|info| info.0),
        ))
    }
}

/// Identity of the caller, for handlers behind the gate
///
/// ```ignore
/// async fn home(session: AuthenticatedSession) -> String {
///     format!("Hello, {}!", session.username)
/// }
/// ```
///
/// Rejects with 401 if the handler is mounted somewhere the gate does not
/// run.
impl<S> FromRequestParts<S> for AuthenticatedSession
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedSession>()
            .cloned()
            .ok_or_else(|| AppError::unauthorized("Not authenticated"))
    }
}
