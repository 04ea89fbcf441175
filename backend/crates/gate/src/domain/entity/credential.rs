//! Credential Entity
//!
//! A username bound to a pre-computed password hash. The gate never sees
//! or stores the clear text.

use platform::password::HashedPassword;
use serde::{Deserialize, Serialize};

/// Stored credential
#[derive(Debug, Clone)]
pub struct Credential {
    /// Exact, case-sensitive key
    pub username: String,
    pub password_hash: HashedPassword,
}

/// One entry of a credential file
///
/// The file is a JSON array of these. `password` holds an Argon2 PHC hash
/// string, never clear text:
///
/// ```json
/// [{ "username": "chris", "password": "$argon2id$v=19$m=19456,t=2,p=1$..." }]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialRecord {
    pub username: String,
    pub password: String,
}
