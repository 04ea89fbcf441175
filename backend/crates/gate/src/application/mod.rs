//! Application Layer
//!
//! Use cases and application services.

pub mod check_session;
pub mod config;
pub mod issue_session;
pub mod load_credentials;
pub mod sign_in;
pub mod sweep_sessions;
pub mod verify_credentials;

// Re-exports
pub use check_session::CheckSessionUseCase;
pub use config::GateConfig;
pub use issue_session::{IssueSessionUseCase, IssuedSession};
pub use load_credentials::LoadCredentialsUseCase;
pub use sign_in::{SignInInput, SignInUseCase};
pub use sweep_sessions::{SweepSessionsUseCase, spawn_session_sweeper};
pub use verify_credentials::VerifyCredentialsUseCase;
