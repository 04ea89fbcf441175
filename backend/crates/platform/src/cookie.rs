//! Cookie Management Infrastructure
//!
//! Set-Cookie building and Cookie header parsing.

use axum::http::{HeaderMap, HeaderValue, header};
use chrono::{DateTime, Utc};
use thiserror::Error;

/// Cookie building errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CookieError {
    #[error("Invalid cookie name: {0:?}")]
    InvalidName(String),

    #[error("Cookie is not a valid header value")]
    InvalidHeaderValue,
}

/// SameSite policy for cookies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SameSite {
    Strict,
    #[default]
    Lax,
    None,
}

impl SameSite {
    pub fn as_str(&self) -> &'static str {
        match self {
            SameSite::Strict => "Strict",
            SameSite::Lax => "Lax",
            SameSite::None => "None",
        }
    }
}

impl std::str::FromStr for SameSite {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strict" => Ok(SameSite::Strict),
            "lax" => Ok(SameSite::Lax),
            "none" => Ok(SameSite::None),
            other => Err(format!("unknown SameSite policy: {other}")),
        }
    }
}

/// Cookie configuration
///
/// `same_site: None` omits the attribute entirely (browser default), which
/// is different from `Some(SameSite::None)`.
#[derive(Debug, Clone)]
pub struct CookieConfig {
    pub name: String,
    pub secure: bool,
    pub http_only: bool,
    pub same_site: Option<SameSite>,
    pub path: String,
}

impl Default for CookieConfig {
    fn default() -> Self {
        Self {
            name: "session".to_string(),
            secure: false,
            http_only: true,
            same_site: None,
            path: "/".to_string(),
        }
    }
}

impl CookieConfig {
    /// Check the name is an RFC 6265 cookie-name (an HTTP token)
    pub fn validate(&self) -> Result<(), CookieError> {
        let is_token = !self.name.is_empty()
            && self
                .name
                .bytes()
                .all(|b| b.is_ascii_graphic() && !b"()<>@,;:\\\"/[]?={}".contains(&b));

        if is_token {
            Ok(())
        } else {
            Err(CookieError::InvalidName(self.name.clone()))
        }
    }

    /// Build Set-Cookie header value
    pub fn build_set_cookie(&self, value: &str, expires: Option<DateTime<Utc>>) -> String {
        let mut cookie = format!("{}={}; Path={}", self.name, value, self.path);

        if let Some(expires) = expires {
            cookie.push_str(&format!("; Expires={}", http_date(expires)));
        }
        if self.http_only {
            cookie.push_str("; HttpOnly");
        }
        if self.secure {
            cookie.push_str("; Secure");
        }
        if let Some(same_site) = self.same_site {
            cookie.push_str(&format!("; SameSite={}", same_site.as_str()));
        }

        cookie
    }

    /// Build Set-Cookie header for deletion (expired)
    pub fn build_delete_cookie(&self) -> String {
        format!(
            "{}=; Path={}; Max-Age=0; Expires=Thu, 01 Jan 1970 00:00:00 GMT; HttpOnly",
            self.name, self.path
        )
    }
}

/// Format a timestamp as an IMF-fixdate (RFC 9110), the form `Expires` uses
pub fn http_date(at: DateTime<Utc>) -> String {
    at.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

/// Extract a cookie value from headers
///
/// Every `Cookie` header is scanned; HTTP/2 clients may split cookies
/// across several.
pub fn extract_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .find_map(|cookie| {
            let (key, value) = cookie.trim().split_once('=')?;

            if key == name {
                Some(value.trim_matches('"').to_string())
            } else {
                None
            }
        })
}

/// Create a Set-Cookie header value
pub fn set_cookie_header(
    config: &CookieConfig,
    value: &str,
    expires: Option<DateTime<Utc>>,
) -> Result<HeaderValue, CookieError> {
    config.validate()?;
    HeaderValue::from_str(&config.build_set_cookie(value, expires))
        .map_err(|_| CookieError::InvalidHeaderValue)
}

/// Create a Set-Cookie header value that deletes the cookie
pub fn delete_cookie_header(config: &CookieConfig) -> Result<HeaderValue, CookieError> {
    config.validate()?;
    HeaderValue::from_str(&config.build_delete_cookie())
        .map_err(|_| CookieError::InvalidHeaderValue)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_cookie_default_attributes() {
        let config = CookieConfig {
            name: "auth_token".to_string(),
            ..Default::default()
        };
        let expires = Utc.with_ymd_and_hms(2026, 10, 20, 8, 30, 0).unwrap();

        let cookie = config.build_set_cookie("abc", Some(expires));
        assert_eq!(
            cookie,
            "auth_token=abc; Path=/; Expires=Tue, 20 Oct 2026 08:30:00 GMT; HttpOnly"
        );
    }

    #[test]
    fn test_cookie_hardened_attributes() {
        let config = CookieConfig {
            name: "test".to_string(),
            secure: true,
            http_only: true,
            same_site: Some(SameSite::Strict),
            path: "/app".to_string(),
        };

        let cookie = config.build_set_cookie("value123", None);
        assert!(cookie.starts_with("test=value123; Path=/app"));
        assert!(cookie.contains("; HttpOnly"));
        assert!(cookie.contains("; Secure"));
        assert!(cookie.contains("; SameSite=Strict"));
        assert!(!cookie.contains("Expires"));
    }

    #[test]
    fn test_delete_cookie() {
        let config = CookieConfig {
            name: "auth_token".to_string(),
            ..Default::default()
        };
        let cookie = config.build_delete_cookie();
        assert!(cookie.starts_with("auth_token=;"));
        assert!(cookie.contains("Max-Age=0"));
    }

    #[test]
    fn test_invalid_name_is_an_error() {
        for name in ["", "bad name", "a;b", "line\nbreak", "caf\u{e9}"] {
            let config = CookieConfig {
                name: name.to_string(),
                ..Default::default()
            };
            assert_eq!(
                set_cookie_header(&config, "abc", None),
                Err(CookieError::InvalidName(name.to_string()))
            );
            assert!(delete_cookie_header(&config).is_err());
        }
    }

    #[test]
    fn test_control_characters_in_path_are_an_error() {
        let config = CookieConfig {
            path: "/\r\nX-Injected: 1".to_string(),
            ..Default::default()
        };
        assert_eq!(
            set_cookie_header(&config, "abc", None),
            Err(CookieError::InvalidHeaderValue)
        );
    }

    #[test]
    fn test_header_values() {
        let config = CookieConfig::default();
        let value = set_cookie_header(&config, "abc", None).unwrap();
        assert_eq!(value, "session=abc; Path=/; HttpOnly");
        assert!(delete_cookie_header(&config).is_ok());
    }

    #[test]
    fn test_extract_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("foo=bar; auth_token=abc123; other=xyz"),
        );

        assert_eq!(
            extract_cookie(&headers, "auth_token"),
            Some("abc123".to_string())
        );
        assert_eq!(extract_cookie(&headers, "foo"), Some("bar".to_string()));
        assert_eq!(extract_cookie(&headers, "missing"), None);
    }

    #[test]
    fn test_extract_cookie_across_headers() {
        let mut headers = HeaderMap::new();
        headers.append(header::COOKIE, HeaderValue::from_static("foo=bar"));
        headers.append(header::COOKIE, HeaderValue::from_static("auth_token=xyz"));

        assert_eq!(
            extract_cookie(&headers, "auth_token"),
            Some("xyz".to_string())
        );
    }

    #[test]
    fn test_same_site_from_str() {
        assert_eq!("strict".parse::<SameSite>(), Ok(SameSite::Strict));
        assert_eq!("Lax".parse::<SameSite>(), Ok(SameSite::Lax));
        assert!("sometimes".parse::<SameSite>().is_err());
    }
}
