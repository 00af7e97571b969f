use std::net::{IpAddr, Ipv4Addr};

use crate::error::{ProbeError, ProbeResult};

/// Resolves `host` to its first IPv4 address. Literal addresses take the
/// same path. Resolution happens once per probe; there is no retry.
///
/// # Errors
///
/// Returns `ResolveFailed` when the lookup fails or yields no IPv4 address.
pub fn resolve_ipv4(host: &str) -> ProbeResult<Ipv4Addr> {
    let addresses = dns_lookup::lookup_host(host).map_err(|source| ProbeError::ResolveFailed {
        host: host.to_string(),
        source: Some(source),
    })?;
    addresses
        .into_iter()
        .find_map(|address| match address {
            IpAddr::V4(v4) => Some(v4),
            IpAddr::V6(_) => None,
        })
        .ok_or_else(|| ProbeError::ResolveFailed {
            host: host.to_string(),
            source: None,
        })
}
