//! Presentation Layer
//!
//! HTTP handlers, DTOs, extractors, middleware and router.

pub mod dto;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod router;

pub use extract::PeerAddr;
pub use handlers::GateState;
pub use middleware::require_session;
pub use router::gate_router;
