//! Configuration constants.
//!
//! Defaults for timeouts, concurrency caps, upstream endpoints, and the
//! built-in subdomain wordlist.

/// Upstream nameserver queried when `--dns-server` is not given.
pub const DEFAULT_DNS_SERVER: &str = "1.1.1.1:53";

/// DNS query timeout per attempt, in seconds. Most queries complete well
/// under a second; 3s fails fast on unresponsive servers.
pub const DNS_TIMEOUT_SECS: u64 = 3;

/// Total DNS send attempts per query (first try + one retry).
pub const DNS_ATTEMPTS: u32 = 2;

/// HTTP request timeout in seconds (header scan, tech detection, Wayback,
/// crt.sh). Overridable via `-t/--timeout`.
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;

/// TCP connection timeout for the port scanner and TLS module, in seconds.
pub const TCP_CONNECT_TIMEOUT_SECS: u64 = 5;

/// TLS handshake timeout in seconds.
pub const TLS_HANDSHAKE_TIMEOUT_SECS: u64 = 5;

/// How long the port scanner waits for a service to volunteer a banner.
pub const BANNER_READ_TIMEOUT_SECS: u64 = 2;

/// Maximum banner bytes kept per port.
pub const MAX_BANNER_BYTES: usize = 128;

/// Bounded worker-pool size for the subdomain bruteforce and port scan.
pub const DEFAULT_CONCURRENCY: usize = 20;

/// Maximum historical URLs pulled from the Wayback CDX API.
pub const MAX_WAYBACK_URLS: usize = 500;

/// Wayback Machine CDX API endpoint.
pub const WAYBACK_CDX_URL: &str = "http://web.archive.org/cdx/search/cdx";

/// crt.sh certificate-transparency search endpoint.
pub const CRTSH_URL: &str = "https://crt.sh/";

/// User-Agent sent on all HTTP requests.
pub const DEFAULT_USER_AGENT: &str =
    concat!("webreconx/", env!("CARGO_PKG_VERSION"));

/// Ports probed by the port scanner: the usual remote-access, mail, web,
/// and database suspects.
pub const COMMON_PORTS: &[u16] = &[
    21, 22, 23, 25, 53, 80, 110, 143, 443, 465, 587, 993, 995, 3306, 3389, 5432, 6379, 8080, 8443,
    27017,
];

/// Built-in subdomain candidates used when `--wordlist` is not given.
pub const DEFAULT_SUBDOMAIN_WORDLIST: &[&str] = &[
    "www", "mail", "ftp", "webmail", "smtp", "pop", "imap", "ns1", "ns2", "mx", "mx1", "api",
    "dev", "staging", "test", "admin", "portal", "vpn", "cdn", "blog", "shop", "m", "app", "beta",
    "demo", "docs", "git", "intranet", "db", "backup", "monitor", "status", "static", "assets",
    "img", "media", "news", "support", "help", "forum", "wiki", "cloud", "proxy", "owa", "remote",
    "secure", "sso", "auth", "files", "download",
];
