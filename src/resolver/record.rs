//! Typed DNS records and response codes.
//!
//! `QueryType` is a closed enum: adding a new record type is a compile error
//! until every `match` over it (most importantly the payload decoder in
//! `message.rs`) handles the new variant.

use std::fmt;
use std::net::{Ipv4Addr, Ipv6Addr};

use serde::{Serialize, Serializer};
use strum_macros::EnumIter;

use crate::resolver::name::DomainName;

/// DNS record types supported by the engine, with their wire codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, Serialize)]
pub enum QueryType {
    /// IPv4 address record.
    A,
    /// IPv6 address record.
    Aaaa,
    /// Mail exchanger record.
    Mx,
    /// Nameserver record.
    Ns,
    /// Text record.
    Txt,
    /// Canonical name record.
    Cname,
    /// Start-of-authority record.
    Soa,
}

impl QueryType {
    /// Numeric wire code (RFC 1035 / RFC 3596).
    pub fn code(self) -> u16 {
        match self {
            QueryType::A => 1,
            QueryType::Ns => 2,
            QueryType::Cname => 5,
            QueryType::Soa => 6,
            QueryType::Mx => 15,
            QueryType::Txt => 16,
            QueryType::Aaaa => 28,
        }
    }

    /// Maps a wire code back to a query type. Unknown codes return `None`;
    /// the parser skips records it has no decoder for.
    pub fn from_code(code: u16) -> Option<Self> {
        match code {
            1 => Some(QueryType::A),
            2 => Some(QueryType::Ns),
            5 => Some(QueryType::Cname),
            6 => Some(QueryType::Soa),
            15 => Some(QueryType::Mx),
            16 => Some(QueryType::Txt),
            28 => Some(QueryType::Aaaa),
            _ => None,
        }
    }
}

impl fmt::Display for QueryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            QueryType::A => "A",
            QueryType::Aaaa => "AAAA",
            QueryType::Mx => "MX",
            QueryType::Ns => "NS",
            QueryType::Txt => "TXT",
            QueryType::Cname => "CNAME",
            QueryType::Soa => "SOA",
        };
        f.write_str(name)
    }
}

/// The RCODE field of a response header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ResponseCode {
    /// Query completed successfully.
    NoError,
    /// Server could not interpret the query.
    FormatError,
    /// Server-side failure; may succeed on retry.
    ServerFailure,
    /// The queried name does not exist (NXDOMAIN).
    NxDomain,
    /// Server does not implement the requested operation.
    NotImplemented,
    /// Server refused the query for policy reasons.
    Refused,
    /// Any other code (extended RCODEs are not interpreted).
    Other(u8),
}

impl ResponseCode {
    /// Maps the 4-bit RCODE from the header flags.
    pub fn from_code(code: u8) -> Self {
        match code {
            0 => ResponseCode::NoError,
            1 => ResponseCode::FormatError,
            2 => ResponseCode::ServerFailure,
            3 => ResponseCode::NxDomain,
            4 => ResponseCode::NotImplemented,
            5 => ResponseCode::Refused,
            other => ResponseCode::Other(other),
        }
    }
}

impl fmt::Display for ResponseCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResponseCode::NoError => f.write_str("NOERROR"),
            ResponseCode::FormatError => f.write_str("FORMERR"),
            ResponseCode::ServerFailure => f.write_str("SERVFAIL"),
            ResponseCode::NxDomain => f.write_str("NXDOMAIN"),
            ResponseCode::NotImplemented => f.write_str("NOTIMP"),
            ResponseCode::Refused => f.write_str("REFUSED"),
            ResponseCode::Other(code) => write!(f, "RCODE{code}"),
        }
    }
}

/// Type-specific payload of a resource record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum RecordData {
    /// 4-byte IPv4 address.
    A(Ipv4Addr),
    /// 16-byte IPv6 address.
    Aaaa(Ipv6Addr),
    /// Mail exchanger: preference plus exchange host.
    Mx {
        /// Lower preference values are tried first.
        preference: u16,
        /// Exchange host name.
        exchange: DomainName,
    },
    /// Nameserver host name.
    Ns(DomainName),
    /// Canonical name target.
    Cname(DomainName),
    /// One or more character strings, each at most 255 bytes on the wire.
    /// TXT data carries arbitrary octets, so the raw bytes are kept;
    /// display and report output render them lossily as UTF-8.
    Txt(#[serde(serialize_with = "serialize_txt")] Vec<Vec<u8>>),
    /// Start-of-authority fields.
    Soa {
        /// Primary nameserver.
        mname: DomainName,
        /// Responsible mailbox, encoded as a name.
        rname: DomainName,
        /// Zone serial number.
        serial: u32,
        /// Refresh interval in seconds.
        refresh: u32,
        /// Retry interval in seconds.
        retry: u32,
        /// Expire limit in seconds.
        expire: u32,
        /// Minimum/negative-caching TTL in seconds.
        minimum: u32,
    },
}

impl fmt::Display for RecordData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordData::A(addr) => write!(f, "{addr}"),
            RecordData::Aaaa(addr) => write!(f, "{addr}"),
            RecordData::Mx {
                preference,
                exchange,
            } => write!(f, "{preference} {exchange}"),
            RecordData::Ns(name) => write!(f, "{name}"),
            RecordData::Cname(name) => write!(f, "{name}"),
            RecordData::Txt(strings) => {
                for string in strings {
                    f.write_str(&String::from_utf8_lossy(string))?;
                }
                Ok(())
            }
            RecordData::Soa {
                mname,
                rname,
                serial,
                refresh,
                retry,
                expire,
                minimum,
            } => write!(
                f,
                "{mname} {rname} {serial} {refresh} {retry} {expire} {minimum}"
            ),
        }
    }
}

/// Renders TXT character strings as lossy UTF-8 for report output.
fn serialize_txt<S: Serializer>(strings: &[Vec<u8>], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(strings.iter().map(|s| String::from_utf8_lossy(s)))
}

/// A single answer entry from a response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceRecord {
    /// Owner name the record belongs to.
    pub name: DomainName,
    /// Record type.
    pub rtype: QueryType,
    /// Time-to-live in seconds.
    pub ttl: u32,
    /// Type-specific payload.
    pub data: RecordData,
}

/// The caller-facing outcome of a single query.
///
/// A nonzero response code is surfaced here as data, paired with an empty
/// record list, rather than as a hard error.
#[derive(Debug, Clone, Serialize)]
pub struct QueryResult {
    /// Answer records matching the requested type, in response order.
    pub records: Vec<ResourceRecord>,
    /// RCODE from the response header.
    pub response_code: ResponseCode,
}

impl QueryResult {
    /// True when the server answered NOERROR, regardless of record count.
    pub fn is_success(&self) -> bool {
        self.response_code == ResponseCode::NoError
    }
}
