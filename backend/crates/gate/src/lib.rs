//! Gate - cookie session authentication in front of any axum service
//!
//! Clean Architecture structure:
//! - `domain/` - Sessions, credentials, clock, repository traits
//! - `application/` - Use cases (load, verify, issue, check, sweep)
//! - `infra/` - In-memory lock-guarded stores
//! - `presentation/` - Signin handlers, gate middleware, extractors, router
//!
//! ## Flow
//! Every request except `/signin` passes through the gate middleware. A
//! request carrying a valid `auth_token` cookie is forwarded to the wrapped
//! service with an [`AuthenticatedSession`] in its extensions; anything else
//! is sent to `/signin` with a 303.
//!
//! ## Security Model
//! - Credentials are Argon2id PHC hashes loaded in bulk; nothing is hashed
//!   at load time
//! - Session ids are random UUIDs mapped to server-side records
//! - Sessions live for a fixed 24 hours from issue, with no sliding renewal
//! - Password verification runs on the blocking pool, never under a lock
//! - Failures on the authentication path all look the same to the client

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::GateConfig;
pub use application::sweep_sessions::spawn_session_sweeper;
pub use domain::entity::session::AuthenticatedSession;
pub use error::{GateError, GateResult};
pub use infra::memory::{InMemoryCredentialStore, InMemorySessionStore};
pub use presentation::handlers::GateState;
pub use presentation::router::gate_router;

// Re-export kernel error types for unified error handling
pub use kernel::error::{app_error::AppError, kind::ErrorKind};

pub mod config {
    pub use crate::application::config::*;
}

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::presentation::dto::*;
}

pub mod store {
    pub use crate::infra::memory::*;
}

pub mod middleware {
    pub use crate::presentation::middleware::*;
}
