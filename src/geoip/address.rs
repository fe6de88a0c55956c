//! Client address parsing shared by the resolvers.

use std::net::{IpAddr, SocketAddr};

/// Parses a client address into an IP.
///
/// Accepts bare IPv4/IPv6 addresses as well as `ip:port` / `[ipv6]:port`
/// forms, which some proxies write into forwarding headers. IPv4-mapped IPv6
/// addresses (`::ffff:a.b.c.d`) are unwrapped to IPv4. Anything else is `None`.
pub fn parse_client_ip(address: &str) -> Option<IpAddr> {
    let ip = match address.parse::<IpAddr>() {
        Ok(ip) => ip,
        Err(_) => address.parse::<SocketAddr>().ok()?.ip(),
    };
    Some(match ip {
        IpAddr::V6(v6) => v6
            .to_ipv4_mapped()
            .map(IpAddr::V4)
            .unwrap_or(IpAddr::V6(v6)),
        v4 => v4,
    })
}
