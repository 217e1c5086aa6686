//! Resolver error types.
//!
//! The taxonomy separates caller mistakes (`InvalidName`), response integrity
//! violations (`MalformedName`, `MalformedRecord`, `Truncated`), transport
//! failures (`Timeout`, `NetworkError`), and stray-datagram rejection
//! (`TransactionMismatch`). A nonzero RCODE is *not* an error: it is carried
//! as data inside [`crate::resolver::QueryResult`], since "no such domain" is
//! a normal outcome for a reconnaissance scan.

use std::io;

use thiserror::Error;

/// Errors produced by the DNS resolution engine.
#[derive(Error, Debug)]
pub enum ResolveError {
    /// The queried name violates domain name length rules. Caller error,
    /// never retried.
    #[error("invalid domain name: {0}")]
    InvalidName(String),

    /// A name inside a response could not be decoded (truncated labels,
    /// compression pointer cycle, or oversize name).
    #[error("malformed name in response: {0}")]
    MalformedName(String),

    /// A resource record's declared RDLENGTH disagrees with what its
    /// type-specific payload decoder consumed.
    #[error("malformed resource record: {0}")]
    MalformedRecord(String),

    /// The response buffer ends before a declared section does.
    #[error("truncated response: {0}")]
    Truncated(String),

    /// The response carries a different transaction ID than the query.
    /// The transport discards such datagrams and keeps listening; this only
    /// surfaces when a caller parses a captured buffer directly.
    #[error("transaction id mismatch: expected {expected:#06x}, got {actual:#06x}")]
    TransactionMismatch {
        /// ID the query was sent with.
        expected: u16,
        /// ID found in the response header.
        actual: u16,
    },

    /// No response arrived within the timeout window, across all attempts.
    #[error("query timed out after {attempts} attempt(s)")]
    Timeout {
        /// Number of send attempts made before giving up.
        attempts: u32,
    },

    /// Socket-level failure (unreachable network, refused port, bind error).
    #[error("network error: {0}")]
    NetworkError(#[from] io::Error),
}

impl ResolveError {
    /// Whether a batch caller may sensibly retry the whole query.
    ///
    /// Transport failures are transient; integrity violations may clear up
    /// against the same or a different server. Only `InvalidName` is
    /// permanent.
    pub fn is_retriable(&self) -> bool {
        !matches!(self, ResolveError::InvalidName(_))
    }
}
