//! Dialable network endpoints and address-literal parsing.
//!
//! Pure functions only; anything that needs a lookup lives in the service
//! layer behind the `HostResolver`/`ProxyResolver` ports.

use super::errors::AddressFormatError;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

/// Suffix shared by every onion service name.
pub const ONION_SUFFIX: &str = ".onion";

/// Length of a v2 onion host (16 base32 chars + suffix).
pub const ONION_V2_LEN: usize = 16 + ONION_SUFFIX.len();

/// Length of a v3 onion host (56 base32 chars + suffix).
pub const ONION_V3_LEN: usize = 56 + ONION_SUFFIX.len();

/// Whether `host` is a syntactically valid v2 or v3 onion service name.
///
/// The label before the suffix must use the lowercase base32 alphabet
/// (`a-z`, `2-7`).
pub fn is_onion_host(host: &str) -> bool {
    if host.len() != ONION_V2_LEN && host.len() != ONION_V3_LEN {
        return false;
    }
    let Some(label) = host.strip_suffix(ONION_SUFFIX) else {
        return false;
    };
    label
        .bytes()
        .all(|b| b.is_ascii_lowercase() || (b'2'..=b'7').contains(&b))
}

/// Whether `host` names something under `.onion`, valid or not.
///
/// Case-insensitive and tolerant of a trailing root dot. Such names must
/// never reach clear-net DNS.
pub fn has_onion_suffix(host: &str) -> bool {
    let host = host.strip_suffix('.').unwrap_or(host).as_bytes();
    let suffix = ONION_SUFFIX.as_bytes();
    host.len() >= suffix.len() && host[host.len() - suffix.len()..].eq_ignore_ascii_case(suffix)
}

/// Onion service address.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OnionAddr {
    /// Full service name including the `.onion` suffix
    pub service: String,
    pub port: u16,
}

impl OnionAddr {
    pub fn new(service: impl Into<String>, port: u16) -> Self {
        Self {
            service: service.into(),
            port,
        }
    }

    /// True for 56-character v3 service names.
    pub fn is_v3(&self) -> bool {
        self.service.len() == ONION_V3_LEN
    }
}

impl fmt::Display for OnionAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.service, self.port)
    }
}

/// A resolved, dialable peer endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NetworkEndpoint {
    /// Direct TCP/IP endpoint
    Tcp(SocketAddr),
    /// Overlay-network endpoint, only reachable through the proxy
    Onion(OnionAddr),
}

impl NetworkEndpoint {
    /// Network kind used when dialing. Onion endpoints are TCP streams too.
    pub fn network(&self) -> &'static str {
        "tcp"
    }

    pub fn port(&self) -> u16 {
        match self {
            Self::Tcp(addr) => addr.port(),
            Self::Onion(addr) => addr.port,
        }
    }

    pub fn is_onion(&self) -> bool {
        matches!(self, Self::Onion(_))
    }

    pub fn as_socket_addr(&self) -> Option<SocketAddr> {
        match self {
            Self::Tcp(addr) => Some(*addr),
            Self::Onion(_) => None,
        }
    }
}

impl From<SocketAddr> for NetworkEndpoint {
    fn from(addr: SocketAddr) -> Self {
        Self::Tcp(addr)
    }
}

impl From<OnionAddr> for NetworkEndpoint {
    fn from(addr: OnionAddr) -> Self {
        Self::Onion(addr)
    }
}

impl fmt::Display for NetworkEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tcp(addr) => write!(f, "{addr}"),
            Self::Onion(addr) => write!(f, "{addr}"),
        }
    }
}

/// Host and port extracted from an address literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostPort<'a> {
    /// Host with any brackets removed
    pub host: &'a str,
    /// Explicit port, if the literal carried one
    pub port: Option<u16>,
}

impl HostPort<'_> {
    /// The literal IP, when the host is one.
    pub fn ip(&self) -> Option<IpAddr> {
        self.host.parse().ok()
    }
}

/// Split an address literal into host and optional port.
///
/// - `[host]` or `[host]:port` for bracketed hosts
/// - `host:port` when exactly one colon is present
/// - anything else (no colon, or a bare IPv6 literal) is host only
pub fn split_host_port(address: &str) -> Result<HostPort<'_>, AddressFormatError> {
    let address = address.trim();
    if address.is_empty() {
        return Err(AddressFormatError::Empty);
    }

    let (host, port) = if let Some(rest) = address.strip_prefix('[') {
        let (host, tail) = rest
            .split_once(']')
            .ok_or_else(|| AddressFormatError::MalformedBrackets(address.to_string()))?;
        match tail {
            "" => (host, None),
            _ => match tail.strip_prefix(':') {
                Some(port) => (host, Some(port)),
                None => return Err(AddressFormatError::MalformedBrackets(address.to_string())),
            },
        }
    } else if address.matches(':').count() == 1 {
        let (host, port) = address.split_once(':').unwrap_or((address, ""));
        (host, Some(port))
    } else {
        (address, None)
    };

    if host.is_empty() {
        return Err(AddressFormatError::MissingHost(address.to_string()));
    }
    if host.contains(['[', ']']) {
        return Err(AddressFormatError::MalformedBrackets(address.to_string()));
    }

    let port = port
        .map(|p| {
            p.parse::<u16>().map_err(|_| AddressFormatError::InvalidPort {
                address: address.to_string(),
                port: p.to_string(),
            })
        })
        .transpose()?;

    Ok(HostPort { host, port })
}

#[cfg(test)]
mod tests {
    use super::*;

    const V2: &str = "3g2upl4pq6kufc4m.onion";
    const V3: &str = "vww6ybal4bd7szmgncyruucpgfkqahzddi37ktceo3ah7ngmcopnpyyd.onion";

    #[test]
    fn test_onion_host_detection() {
        assert!(is_onion_host(V2));
        assert!(is_onion_host(V3));
        assert!(!is_onion_host("example.com"));
        assert!(!is_onion_host("3g2upl4pq6kufc4m.onio"));
        // '1' and '8' are outside the base32 alphabet
        assert!(!is_onion_host("3g2upl4pq6kufc41.onion"));
        assert!(!is_onion_host("3G2UPL4PQ6KUFC4M.onion"));
        assert!(!is_onion_host(".onion"));
    }

    #[test]
    fn test_onion_suffix_detection() {
        assert!(has_onion_suffix(V2));
        assert!(has_onion_suffix("3G2UPL4PQ6KUFC4M.ONION"));
        assert!(has_onion_suffix("short.onion"));
        assert!(has_onion_suffix("short.onion."));
        assert!(!has_onion_suffix("onion"));
        assert!(!has_onion_suffix("example.com"));
        assert!(!has_onion_suffix("myonion.com"));
        assert!(!has_onion_suffix("ü"));
    }

    #[test]
    fn test_split_bare_ipv4() {
        let hp = split_host_port("0.0.0.0").unwrap();
        assert_eq!(hp.host, "0.0.0.0");
        assert_eq!(hp.port, None);
    }

    #[test]
    fn test_split_ipv4_with_port() {
        let hp = split_host_port("127.0.0.1:1234").unwrap();
        assert_eq!(hp.host, "127.0.0.1");
        assert_eq!(hp.port, Some(1234));
    }

    #[test]
    fn test_split_bare_ipv6() {
        let hp = split_host_port("::1").unwrap();
        assert_eq!(hp.host, "::1");
        assert_eq!(hp.port, None);
        assert!(hp.ip().is_some());
    }

    #[test]
    fn test_split_bracketed_ipv6() {
        let hp = split_host_port("[2001:db8::1]:1234").unwrap();
        assert_eq!(hp.host, "2001:db8::1");
        assert_eq!(hp.port, Some(1234));

        let hp = split_host_port("[::1]").unwrap();
        assert_eq!(hp.host, "::1");
        assert_eq!(hp.port, None);
    }

    #[test]
    fn test_split_bracketed_onion() {
        let literal = format!("[{V3}]:9736");
        let hp = split_host_port(&literal).unwrap();
        assert_eq!(hp.host, V3);
        assert_eq!(hp.port, Some(9736));
    }

    #[test]
    fn test_split_rejects_bad_port() {
        assert!(matches!(
            split_host_port("127.0.0.1:notaport"),
            Err(AddressFormatError::InvalidPort { .. })
        ));
        assert!(matches!(
            split_host_port("127.0.0.1:70000"),
            Err(AddressFormatError::InvalidPort { .. })
        ));
        assert!(matches!(
            split_host_port("example.com:"),
            Err(AddressFormatError::InvalidPort { .. })
        ));
    }

    #[test]
    fn test_split_rejects_bad_brackets() {
        assert!(matches!(
            split_host_port("[::1"),
            Err(AddressFormatError::MalformedBrackets(_))
        ));
        assert!(matches!(
            split_host_port("[::1]1234"),
            Err(AddressFormatError::MalformedBrackets(_))
        ));
    }

    #[test]
    fn test_split_rejects_empty() {
        assert_eq!(split_host_port(""), Err(AddressFormatError::Empty));
        assert_eq!(split_host_port("   "), Err(AddressFormatError::Empty));
        assert!(matches!(
            split_host_port(":9735"),
            Err(AddressFormatError::MissingHost(_))
        ));
    }

    #[test]
    fn test_endpoint_display_and_network() {
        let tcp = NetworkEndpoint::Tcp("[::1]:9735".parse().unwrap());
        assert_eq!(tcp.to_string(), "[::1]:9735");
        assert_eq!(tcp.network(), "tcp");

        let onion = NetworkEndpoint::Onion(OnionAddr::new(V2, 9735));
        assert_eq!(onion.to_string(), format!("{V2}:9735"));
        assert_eq!(onion.network(), "tcp");
        assert!(onion.as_socket_addr().is_none());
    }
}
