//! Overlay DNS through a SOCKS5 proxy.
//!
//! Uses the Tor `RESOLVE` extension (command `0xF0`): the proxy performs the
//! lookup from the exit and returns one address, so the query never leaves
//! this host unencrypted.
//!
//! ```text
//! -> 05 01 00                         greeting, one method: no auth
//! <- 05 00                            method accepted
//! -> 05 F0 00 03 <len> <host> 00 00   RESOLVE, domain name, port 0
//! <- 05 <rep> 00 <atyp> <addr> <port>
//! ```

use crate::domain::{OverlayConfig, ResolutionError};
use crate::ports::ProxyResolver;
use std::io::{Read, Write};
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, TcpStream};
use tracing::debug;

const SOCKS_VERSION: u8 = 0x05;
const AUTH_NONE: u8 = 0x00;
const CMD_TOR_RESOLVE: u8 = 0xF0;
const ATYP_IPV4: u8 = 0x01;
const ATYP_DOMAIN: u8 = 0x03;
const ATYP_IPV6: u8 = 0x04;

/// Reply codes, indexed by the `rep` byte.
const REPLY_ERRORS: [&str; 9] = [
    "tor succeeded",
    "tor general error",
    "tor not allowed",
    "tor network is unreachable",
    "tor host is unreachable",
    "tor connection refused",
    "tor TTL expired",
    "tor command not supported",
    "tor address type not supported",
];

// ============================================================================
// SocksProxyResolver - Tor RESOLVE over SOCKS5
// ============================================================================

/// Resolves hostnames through the overlay daemon's SOCKS5 listener.
#[derive(Debug, Clone, Copy, Default)]
pub struct SocksProxyResolver;

impl SocksProxyResolver {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn resolve(proxy: &OverlayConfig, host: &str) -> Result<IpAddr, String> {
        let host_len = u8::try_from(host.len())
            .map_err(|_| format!("hostname too long for proxy resolution: {} bytes", host.len()))?;

        let mut stream = TcpStream::connect_timeout(&proxy.socks_addr, proxy.timeout)
            .map_err(|e| format!("dial proxy {}: {e}", proxy.socks_addr))?;
        stream.set_read_timeout(Some(proxy.timeout)).map_err(|e| e.to_string())?;
        stream.set_write_timeout(Some(proxy.timeout)).map_err(|e| e.to_string())?;

        stream
            .write_all(&[SOCKS_VERSION, 1, AUTH_NONE])
            .map_err(|e| e.to_string())?;
        let mut method = [0u8; 2];
        stream.read_exact(&mut method).map_err(|e| e.to_string())?;
        if method[0] != SOCKS_VERSION {
            return Err("invalid proxy response".to_string());
        }
        if method[1] != AUTH_NONE {
            return Err("invalid proxy authentication method".to_string());
        }

        let mut request = Vec::with_capacity(7 + host.len());
        request.extend_from_slice(&[SOCKS_VERSION, CMD_TOR_RESOLVE, 0x00, ATYP_DOMAIN, host_len]);
        request.extend_from_slice(host.as_bytes());
        request.extend_from_slice(&[0x00, 0x00]);
        stream.write_all(&request).map_err(|e| e.to_string())?;

        let mut header = [0u8; 4];
        stream.read_exact(&mut header).map_err(|e| e.to_string())?;
        if header[0] != SOCKS_VERSION {
            return Err("invalid proxy response".to_string());
        }
        if header[1] != 0 {
            return Err(REPLY_ERRORS
                .get(usize::from(header[1]))
                .map_or("invalid proxy response", |msg| *msg)
                .to_string());
        }

        match header[3] {
            ATYP_IPV4 => {
                let mut octets = [0u8; 4];
                stream
                    .read_exact(&mut octets)
                    .map_err(|_| "invalid address response".to_string())?;
                Ok(IpAddr::V4(Ipv4Addr::from(octets)))
            }
            ATYP_IPV6 => {
                let mut octets = [0u8; 16];
                stream
                    .read_exact(&mut octets)
                    .map_err(|_| "invalid address response".to_string())?;
                Ok(IpAddr::V6(Ipv6Addr::from(octets)))
            }
            _ => Err(REPLY_ERRORS[1].to_string()),
        }
    }
}

impl ProxyResolver for SocksProxyResolver {
    fn lookup_host(
        &self,
        proxy: &OverlayConfig,
        host: &str,
    ) -> Result<Vec<IpAddr>, ResolutionError> {
        let ip = Self::resolve(proxy, host).map_err(|e| ResolutionError(format!("lookup {host}: {e}")))?;
        debug!(host, proxy = %proxy.socks_addr, %ip, "proxy lookup complete");
        Ok(vec![ip])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::TcpListener;
    use std::thread;
    use std::time::Duration;

    /// Single-connection fake proxy answering RESOLVE with `reply`.
    fn spawn_proxy(reply: Vec<u8>) -> (OverlayConfig, thread::JoinHandle<Vec<u8>>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = thread::spawn(move || {
            let (mut conn, _) = listener.accept().unwrap();
            let mut greeting = [0u8; 3];
            conn.read_exact(&mut greeting).unwrap();
            conn.write_all(&[SOCKS_VERSION, AUTH_NONE]).unwrap();

            let mut head = [0u8; 5];
            conn.read_exact(&mut head).unwrap();
            let mut rest = vec![0u8; usize::from(head[4]) + 2];
            conn.read_exact(&mut rest).unwrap();
            conn.write_all(&reply).unwrap();

            let mut request = head.to_vec();
            request.extend_from_slice(&rest);
            request
        });
        let config = OverlayConfig::new(addr).with_timeout(Duration::from_secs(5));
        (config, handle)
    }

    #[test]
    fn test_resolve_ipv4_reply() {
        let (config, proxy) = spawn_proxy(vec![5, 0, 0, ATYP_IPV4, 93, 184, 216, 34, 0, 0]);

        let ips = SocksProxyResolver::new()
            .lookup_host(&config, "example.com")
            .unwrap();
        assert_eq!(ips, vec![IpAddr::from([93, 184, 216, 34])]);

        let request = proxy.join().unwrap();
        assert_eq!(&request[..5], &[5, CMD_TOR_RESOLVE, 0, ATYP_DOMAIN, 11]);
        assert_eq!(&request[5..16], b"example.com");
    }

    #[test]
    fn test_resolve_ipv6_reply() {
        let mut reply = vec![5, 0, 0, ATYP_IPV6];
        reply.extend_from_slice(&Ipv6Addr::LOCALHOST.octets());
        reply.extend_from_slice(&[0, 0]);
        let (config, proxy) = spawn_proxy(reply);

        let ips = SocksProxyResolver::new()
            .lookup_host(&config, "example.com")
            .unwrap();
        assert_eq!(ips, vec![IpAddr::V6(Ipv6Addr::LOCALHOST)]);
        proxy.join().unwrap();
    }

    #[test]
    fn test_proxy_error_reply() {
        let (config, proxy) = spawn_proxy(vec![5, 4, 0, ATYP_IPV4]);

        let err = SocksProxyResolver::new()
            .lookup_host(&config, "unknown.example")
            .unwrap_err();
        assert_eq!(err.message(), "lookup unknown.example: tor host is unreachable");
        proxy.join().unwrap();
    }

    #[test]
    fn test_unreachable_proxy() {
        // Bind then drop to get a port with nothing listening
        let addr = TcpListener::bind("127.0.0.1:0").unwrap().local_addr().unwrap();
        let config = OverlayConfig::new(addr).with_timeout(Duration::from_secs(1));

        let err = SocksProxyResolver::new()
            .lookup_host(&config, "example.com")
            .unwrap_err();
        assert!(err.message().starts_with("lookup example.com: dial proxy"), "{err}");
    }
}
