//! Client address derivation for inbound requests.

use std::net::SocketAddr;

use axum::http::HeaderMap;

use crate::config::FORWARDED_FOR_HEADER;

/// Returns the raw client address string for the gateway.
///
/// With `trust_proxy` set, a non-empty `X-Forwarded-For` header wins and is
/// passed through whole; the gateway picks its leftmost entry. Otherwise, or
/// when the header is absent or not valid text, the transport peer IP is
/// used. No peer information at all yields an empty string, which the
/// gateway denies.
pub fn client_address(headers: &HeaderMap, peer: Option<SocketAddr>, trust_proxy: bool) -> String {
    if trust_proxy {
        let forwarded = headers
            .get(FORWARDED_FOR_HEADER)
            .and_then(|value| value.to_str().ok())
            .filter(|value| !value.trim().is_empty());
        if let Some(forwarded) = forwarded {
            return forwarded.to_string();
        }
    }
    peer.map(|addr| addr.ip().to_string()).unwrap_or_default()
}
