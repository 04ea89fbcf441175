//! Gate Error Types
//!
//! Gate-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.
//!
//! Authentication failures (`MalformedIdentifier`, `SessionInvalid`,
//! `InvalidCredentials`) never reach the client as errors. Their
//! `IntoResponse` is a bare 303 to the signin page, identical for every
//! cause, so a client cannot tell which check failed.

use axum::response::{IntoResponse, Redirect, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use platform::cookie::CookieError;
use platform::password::PasswordHashError;
use thiserror::Error;

use crate::application::config::SIGNIN_PATH;

/// Gate-specific result type alias
pub type GateResult<T> = Result<T, GateError>;

/// Gate-specific error variants
#[derive(Debug, Error)]
pub enum GateError {
    /// Cookie value is not a session identifier
    #[error("Malformed session identifier")]
    MalformedIdentifier,

    /// Session not found or expired
    #[error("Session not found or expired")]
    SessionInvalid,

    /// Unknown user, wrong password or empty form field
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Credential document is not a JSON array of `{username, password}`
    #[error("Malformed credential document: {0}")]
    Parse(#[from] serde_json::Error),

    /// A credential entry carries something that is not an Argon2 PHC hash
    #[error("Credential entry {index} ({username}) has an invalid password hash")]
    InvalidHashEntry {
        index: usize,
        username: String,
        #[source]
        source: PasswordHashError,
    },

    /// Reading credential input failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Session cookie could not be rendered from the configuration
    #[error("Session cookie misconfigured: {0}")]
    Cookie(#[from] CookieError),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl GateError {
    /// Failures that end in a redirect to the signin page
    pub fn is_auth_failure(&self) -> bool {
        matches!(
            self,
            GateError::MalformedIdentifier
                | GateError::SessionInvalid
                | GateError::InvalidCredentials
        )
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            GateError::MalformedIdentifier => ErrorKind::BadRequest,
            GateError::SessionInvalid | GateError::InvalidCredentials => ErrorKind::Unauthorized,
            GateError::Parse(_) => ErrorKind::BadRequest,
            GateError::InvalidHashEntry { .. } => ErrorKind::UnprocessableEntity,
            GateError::Io(e) => match e.kind() {
                std::io::ErrorKind::NotFound => ErrorKind::NotFound,
                std::io::ErrorKind::PermissionDenied => ErrorKind::Forbidden,
                _ => ErrorKind::InternalServerError,
            },
            GateError::Cookie(_) | GateError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        AppError::new(self.kind(), self.to_string())
    }

    /// Log the error with appropriate level
    pub(crate) fn log(&self) {
        match self {
            GateError::Internal(msg) => {
                tracing::error!(message = %msg, "Gate internal error");
            }
            GateError::Io(e) => {
                tracing::error!(error = %e, "Gate I/O error");
            }
            GateError::Cookie(e) => {
                tracing::error!(error = %e, "Session cookie misconfigured");
            }
            GateError::InvalidCredentials => {
                tracing::warn!("Invalid signin attempt");
            }
            GateError::MalformedIdentifier => {
                tracing::info!("Malformed session cookie");
            }
            _ => {
                tracing::debug!(error = %self, "Gate error");
            }
        }
    }
}

impl IntoResponse for GateError {
    fn into_response(self) -> Response {
        self.log();
        if self.is_auth_failure() {
            return Redirect::to(SIGNIN_PATH).into_response();
        }
        self.to_app_error().into_response()
    }
}

impl From<GateError> for AppError {
    fn from(err: GateError) -> Self {
        let kind = err.kind();
        let app_err = match &err {
            GateError::Parse(_) | GateError::InvalidHashEntry { .. } => {
                AppError::new(kind, err.to_string())
                    .with_action("Regenerate the credential file with hashgen")
            }
            _ => AppError::new(kind, err.to_string()),
        };
        app_err.with_source(err)
    }
}
