pub mod credential;
pub mod session;

pub use credential::{Credential, CredentialRecord};
pub use session::{AuthenticatedSession, Session, SessionId};
