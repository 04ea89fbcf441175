//! Request DTOs

use serde::Deserialize;

/// `POST /signin` form body
///
/// Missing fields decode as empty strings and are rejected like empty ones.
#[derive(Deserialize)]
pub struct SignInForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}
