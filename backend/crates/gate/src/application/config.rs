//! Application Configuration
//!
//! Configuration for the gate application layer.

use chrono::Duration;
use platform::cookie::{CookieConfig, CookieError};

/// Re-export SameSite from platform
pub use platform::cookie::SameSite;

/// Path serving the signin form; the only path the gate does not guard
pub const SIGNIN_PATH: &str = "/signin";

/// Where a successful signin lands
pub const LANDING_PATH: &str = "/";

/// Gate configuration
#[derive(Debug, Clone)]
pub struct GateConfig {
    /// Session cookie name
    pub session_cookie_name: String,
    /// Fixed session lifetime, counted from issue (24 hours)
    pub session_ttl: Duration,
    /// Add `Secure` to the session cookie
    pub cookie_secure: bool,
    /// `SameSite` attribute; `None` leaves it off
    pub cookie_same_site: Option<SameSite>,
    /// Send a deleting `Set-Cookie` along with the redirect when the
    /// presented cookie is malformed, unknown or expired
    pub clear_stale_cookie: bool,
    /// Record the first `X-Forwarded-For` address instead of the peer address
    pub trust_forwarded_for: bool,
    /// Run the expired-session sweeper at this interval
    pub sweep_interval: Option<std::time::Duration>,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            session_cookie_name: "auth_token".to_string(),
            session_ttl: Duration::hours(24),
            cookie_secure: false,
            cookie_same_site: None,
            clear_stale_cookie: false,
            trust_forwarded_for: false,
            sweep_interval: None,
        }
    }
}

impl GateConfig {
    /// Defaults plus `Secure`, `SameSite=Lax`, stale cookie clearing and an
    /// hourly sweep. For deployments behind TLS.
    pub fn hardened() -> Self {
        Self {
            cookie_secure: true,
            cookie_same_site: Some(SameSite::Lax),
            clear_stale_cookie: true,
            sweep_interval: Some(std::time::Duration::from_secs(3600)),
            ..Default::default()
        }
    }

    /// Reject settings the session cookie cannot be built from
    pub fn validate(&self) -> Result<(), CookieError> {
        self.cookie_config().validate()
    }

    /// Cookie attributes for the session cookie
    pub fn cookie_config(&self) -> CookieConfig {
        CookieConfig {
            name: self.session_cookie_name.clone(),
            secure: self.cookie_secure,
            http_only: true,
            same_site: self.cookie_same_site,
            path: "/".to_string(),
        }
    }
}
