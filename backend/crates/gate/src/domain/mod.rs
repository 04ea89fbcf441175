//! Domain Layer
//!
//! Contains entities, the clock abstraction, and repository traits.

pub mod clock;
pub mod entity;
pub mod repository;

// Re-exports
pub use clock::{Clock, ManualClock, SystemClock};
pub use entity::{credential::Credential, session::Session};
pub use repository::{CredentialRepository, SessionRepository};
