//! Client identification utilities
//!
//! Works out where a request came from, for recording on sessions.

use axum::http::HeaderMap;
use std::net::{IpAddr, SocketAddr};

/// Placeholder recorded when no address can be determined
pub const UNKNOWN_ADDRESS: &str = "unknown";

/// Describe the source of a request as text
///
/// The peer socket address (`ip:port`) is used as-is. `X-Forwarded-For` is
/// only consulted when `trust_forwarded_for` is set, since any client can
/// send the header.
pub fn source_address(
    headers: &HeaderMap,
    peer: Option<SocketAddr>,
    trust_forwarded_for: bool,
) -> String {
    if trust_forwarded_for {
        if let Some(ip) = forwarded_for(headers) {
            return ip.to_string();
        }
    }

    peer.map(|addr| addr.to_string())
        .unwrap_or_else(|| UNKNOWN_ADDRESS.to_string())
}

/// First address in X-Forwarded-For, if it parses
fn forwarded_for(headers: &HeaderMap) -> Option<IpAddr> {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|xff| xff.split(',').next())
        .and_then(|first| first.trim().parse::<IpAddr>().ok())
}
