use crate::domain::ResolutionError;
use crate::ports::HostResolver;
use std::io;
use std::net::{IpAddr, ToSocketAddrs};
use tracing::debug;

/// getaddrinfo texts meaning the name does not exist (`EAI_NONAME`,
/// `EAI_NODATA` and their platform spellings).
const HOST_NOT_FOUND: [&str; 4] = [
    "Name or service not known",
    "No address associated with hostname",
    "nodename nor servname provided, or not known",
    "No such host is known",
];

/// `WSAHOST_NOT_FOUND` / `WSANO_DATA`.
const WSA_HOST_NOT_FOUND: [i32; 2] = [11001, 11004];

// ============================================================================
// SystemDnsResolver - Clear-net DNS via the OS resolver
// ============================================================================

/// DNS resolver backed by `std::net::ToSocketAddrs`.
///
/// Blocking. The resolution algorithm performs at most one lookup per call,
/// so callers that need a deadline wrap the whole call (see
/// `AddressResolver::resolve_with_deadline`).
///
/// A name that does not exist is reported as `lookup <host>: no such host`;
/// other failures as `lookup <host>: <os error>`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemDnsResolver;

impl SystemDnsResolver {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl HostResolver for SystemDnsResolver {
    fn lookup_host(&self, host: &str) -> Result<Vec<IpAddr>, ResolutionError> {
        // ToSocketAddrs needs a port; it does not affect the lookup.
        let ips: Vec<IpAddr> = (host, 0u16)
            .to_socket_addrs()
            .map_err(|e| lookup_error(host, &e))?
            .map(|addr| addr.ip())
            .collect();

        debug!(host, count = ips.len(), "dns lookup complete");
        Ok(ips)
    }
}

fn lookup_error(host: &str, err: &io::Error) -> ResolutionError {
    if is_host_not_found(err) {
        ResolutionError::no_such_host(host)
    } else {
        ResolutionError(format!("lookup {host}: {err}"))
    }
}

fn is_host_not_found(err: &io::Error) -> bool {
    if err
        .raw_os_error()
        .is_some_and(|code| WSA_HOST_NOT_FOUND.contains(&code))
    {
        return true;
    }
    let text = err.to_string();
    HOST_NOT_FOUND.iter().any(|known| text.contains(known))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ip_literal_needs_no_dns() {
        let ips = SystemDnsResolver::new().lookup_host("127.0.0.1").unwrap();
        assert_eq!(ips, vec![IpAddr::from([127, 0, 0, 1])]);
    }

    #[test]
    fn test_invalid_octet_fails_lookup() {
        // Not an IPv4 literal, and never a valid DNS answer
        let err = SystemDnsResolver::new().lookup_host("500.0.0.0").unwrap_err();
        assert_eq!(err.message(), "lookup 500.0.0.0: no such host");
    }

    #[test]
    fn test_system_resolver_reports_no_such_host() {
        let err = crate::AddressResolver::system()
            .resolve("500.0.0.0", &crate::TransportBackend::ClearNet)
            .unwrap_err();
        assert_eq!(err.to_string(), "lookup 500.0.0.0: no such host");
    }

    #[test]
    fn test_host_not_found_texts_map_to_no_such_host() {
        for detail in HOST_NOT_FOUND {
            let err = io::Error::other(format!("failed to lookup address information: {detail}"));
            assert_eq!(
                lookup_error("gone.example", &err).message(),
                "lookup gone.example: no such host"
            );
        }
        assert_eq!(
            lookup_error("gone.example", &io::Error::from_raw_os_error(11001)).message(),
            "lookup gone.example: no such host"
        );
    }

    #[test]
    fn test_other_failures_keep_os_text() {
        let err = io::Error::other("failed to lookup address information: Temporary failure in name resolution");
        assert_eq!(
            lookup_error("flaky.example", &err).message(),
            "lookup flaky.example: failed to lookup address information: Temporary failure in name resolution"
        );
    }
}
