//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (timeouts, ports, wordlist, endpoints)
//! - CLI option types and parsing
//! - Target normalization helpers

mod constants;
mod types;

pub use constants::*;
pub use types::{Config, LogFormat, LogLevel, ScanModule};

use anyhow::{anyhow, Context, Result};
use url::Url;

/// Normalizes a raw target argument into `(url, domain)`.
///
/// Bare domains get an `https://` scheme; trailing slashes are stripped.
/// The domain component is what the DNS-facing modules operate on.
pub fn normalize_target(raw: &str) -> Result<(String, String)> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(anyhow!("target is empty"));
    }

    let with_scheme = if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    };

    let parsed = Url::parse(&with_scheme)
        .with_context(|| format!("invalid target {trimmed:?}"))?;
    let domain = parsed
        .host_str()
        .ok_or_else(|| anyhow!("target {trimmed:?} has no host component"))?
        .to_string();

    Ok((with_scheme.trim_end_matches('/').to_string(), domain))
}

/// Parses the `--dns-server` value, defaulting the port to 53.
pub fn parse_dns_server(raw: &str) -> Result<std::net::SocketAddr> {
    if let Ok(addr) = raw.parse() {
        return Ok(addr);
    }
    // Bare IP without a port
    if let Ok(ip) = raw.parse::<std::net::IpAddr>() {
        return Ok(std::net::SocketAddr::new(ip, 53));
    }
    Err(anyhow!(
        "invalid DNS server address {raw:?} (expected ip or ip:port)"
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_bare_domain() {
        let (url, domain) = normalize_target("example.com").unwrap();
        assert_eq!(url, "https://example.com");
        assert_eq!(domain, "example.com");
    }

    #[test]
    fn normalize_keeps_explicit_scheme() {
        let (url, domain) = normalize_target("http://example.com/").unwrap();
        assert_eq!(url, "http://example.com");
        assert_eq!(domain, "example.com");
    }

    #[test]
    fn normalize_rejects_empty_target() {
        assert!(normalize_target("   ").is_err());
    }

    #[test]
    fn dns_server_with_and_without_port() {
        assert_eq!(
            parse_dns_server("8.8.8.8:5353").unwrap(),
            "8.8.8.8:5353".parse().unwrap()
        );
        assert_eq!(
            parse_dns_server("9.9.9.9").unwrap(),
            "9.9.9.9:53".parse().unwrap()
        );
        assert!(parse_dns_server("not-an-ip").is_err());
    }
}
