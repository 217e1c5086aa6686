//! Raw DNS resolution engine.
//!
//! A self-contained stub resolver: wire-format query construction, UDP
//! transport with timeout and retry, and a bounds-checked response parser
//! that handles compressed names and type-specific payloads for A, AAAA,
//! MX, NS, TXT, CNAME, and SOA records. No DNS client library is involved;
//! the message layout is produced and consumed byte by byte, because the
//! response side of the conversation is untrusted input.
//!
//! The engine is stateless per call: each [`resolve`] owns its socket and
//! transaction ID and shares nothing with concurrent calls. Concurrency is
//! the caller's business (the subdomain bruteforcer fans out over a bounded
//! worker pool and feeds names through here one at a time).

mod error;
pub mod message;
mod name;
mod record;
pub mod transport;

pub use error::ResolveError;
pub use name::DomainName;
pub use record::{QueryResult, QueryType, RecordData, ResourceRecord, ResponseCode};

use std::net::SocketAddr;
use std::time::Duration;

use rand::Rng;

use crate::config::{DEFAULT_DNS_SERVER, DNS_ATTEMPTS, DNS_TIMEOUT_SECS};

/// Per-call resolver configuration.
///
/// Passed explicitly into [`resolve`] rather than living in process-wide
/// state, so concurrent callers with different servers or timeouts cannot
/// interfere with each other.
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    /// Upstream nameserver to query.
    pub server: SocketAddr,
    /// How long to wait for a response per attempt.
    pub timeout: Duration,
    /// Total send attempts before giving up (2 by policy).
    pub attempts: u32,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        ResolverConfig {
            server: DEFAULT_DNS_SERVER
                .parse()
                .expect("default DNS server address is a valid socket address"),
            timeout: Duration::from_secs(DNS_TIMEOUT_SECS),
            attempts: DNS_ATTEMPTS,
        }
    }
}

/// Resolves `name` for the given record type against the configured server.
///
/// Composes the engine end to end: encode the name, build the query with a
/// fresh random transaction ID, send with retry, parse the response, and
/// filter the answer section to the requested type.
///
/// A negative answer (NXDOMAIN and friends) is a successful return whose
/// [`QueryResult::response_code`] is nonzero and whose record list is empty.
/// Batch callers should treat `Timeout`/`NetworkError` as per-name failures
/// and keep going.
///
/// # Errors
///
/// See [`ResolveError`] for the full taxonomy.
pub async fn resolve(
    name: &str,
    qtype: QueryType,
    config: &ResolverConfig,
) -> Result<QueryResult, ResolveError> {
    let domain: DomainName = name.parse()?;
    // Unpredictable enough to make blind spoofing unattractive; this is a
    // best-effort stub resolver, not a hardened one.
    let id: u16 = rand::rng().random();
    let request = message::build_query(&domain, qtype, id);
    let response = transport::query(config.server, &request, config.timeout, config.attempts).await?;
    message::parse_response(&response, id, qtype)
}
