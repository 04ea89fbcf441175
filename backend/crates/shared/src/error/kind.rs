//! Error Kind - Classification of errors
//!
//! Defines the [`ErrorKind`] enum that maps to HTTP status codes.

/// Error classification shared by every gate crate.
///
/// Each variant maps onto exactly one HTTP status code. Authentication
/// failures on the request path never reach the client as one of these;
/// they are turned into redirects before that. The kinds matter for the
/// operational paths (credential loading, startup) and for logging.
///
/// ## Examples
/// ```rust
/// use kernel::error::kind::ErrorKind;
///
/// let kind = ErrorKind::Unauthorized;
/// assert_eq!(kind.status_code(), 401);
/// assert_eq!(kind.as_str(), "Unauthorized");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// 400 - malformed input (credential documents, identifiers)
    BadRequest,
    /// 401 - no valid session or credentials
    Unauthorized,
    /// 403 - permission denied (e.g. unreadable credential file)
    Forbidden,
    /// 404 - missing resource
    NotFound,
    /// 422 - well-formed input carrying unusable values (bad hash entry)
    UnprocessableEntity,
    /// 500 - internal failure
    InternalServerError,
}

impl ErrorKind {
    /// HTTP status code for this kind
    #[inline]
    pub const fn status_code(&self) -> u16 {
        match self {
            ErrorKind::BadRequest => 400,
            ErrorKind::Unauthorized => 401,
            ErrorKind::Forbidden => 403,
            ErrorKind::NotFound => 404,
            ErrorKind::UnprocessableEntity => 422,
            ErrorKind::InternalServerError => 500,
        }
    }

    /// Standard reason phrase
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::BadRequest => "Bad Request",
            ErrorKind::Unauthorized => "Unauthorized",
            ErrorKind::Forbidden => "Forbidden",
            ErrorKind::NotFound => "Not Found",
            ErrorKind::UnprocessableEntity => "Unprocessable Entity",
            ErrorKind::InternalServerError => "Internal Server Error",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(ErrorKind::BadRequest.status_code(), 400);
        assert_eq!(ErrorKind::Unauthorized.status_code(), 401);
        assert_eq!(ErrorKind::Forbidden.status_code(), 403);
        assert_eq!(ErrorKind::NotFound.status_code(), 404);
        assert_eq!(ErrorKind::UnprocessableEntity.status_code(), 422);
        assert_eq!(ErrorKind::InternalServerError.status_code(), 500);
    }

    #[test]
    fn test_display_is_reason_phrase() {
        assert_eq!(ErrorKind::UnprocessableEntity.to_string(), "Unprocessable Entity");
    }
}
