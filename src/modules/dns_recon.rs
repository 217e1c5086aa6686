//! DNS record enumeration.
//!
//! One query per record type against the configured upstream server, all
//! through the built-in resolver. NXDOMAIN and empty answers are normal
//! outcomes here; only transport-level failures are recorded as lookup
//! errors, and even those never abort the other record types.

use std::collections::BTreeMap;

use log::{debug, info, warn};
use serde::Serialize;
use strum::IntoEnumIterator;

use crate::resolver::{resolve, QueryType, ResolverConfig};

/// A record rendered for the report.
#[derive(Debug, Clone, Serialize)]
pub struct DnsEntry {
    /// Record payload in zone-file style ("10 mail.example.com").
    pub value: String,
    /// Time-to-live from the response, in seconds.
    pub ttl: u32,
}

/// Per-record-type enumeration results.
#[derive(Debug, Clone, Serialize, Default)]
pub struct DnsReport {
    /// Records keyed by type name (A, AAAA, MX, ...). Types with no
    /// answers map to empty lists.
    pub records: BTreeMap<String, Vec<DnsEntry>>,
    /// Non-NOERROR response codes by type name (NXDOMAIN, SERVFAIL, ...).
    pub response_codes: BTreeMap<String, String>,
    /// Lookup failures by type name (timeouts, malformed responses).
    pub errors: BTreeMap<String, String>,
}

/// Queries every supported record type for `domain`.
///
/// Always returns a report; per-type failures land in `errors` rather than
/// failing the module.
pub async fn enumerate_records(domain: &str, config: &ResolverConfig) -> DnsReport {
    let mut report = DnsReport::default();

    for qtype in QueryType::iter() {
        let type_name = qtype.to_string();
        debug!("querying {type_name} records for {domain}");
        match resolve(domain, qtype, config).await {
            Ok(result) => {
                if !result.is_success() {
                    report
                        .response_codes
                        .insert(type_name.clone(), result.response_code.to_string());
                }
                let entries: Vec<DnsEntry> = result
                    .records
                    .iter()
                    .map(|record| DnsEntry {
                        value: record.data.to_string(),
                        ttl: record.ttl,
                    })
                    .collect();
                report.records.insert(type_name, entries);
            }
            Err(e) => {
                warn!("{type_name} lookup for {domain} failed: {e}");
                report.errors.insert(type_name, e.to_string());
            }
        }
    }

    let total: usize = report.records.values().map(Vec::len).sum();
    info!(
        "dns recon for {domain}: {total} record(s) across {} type(s), {} failure(s)",
        report.records.len(),
        report.errors.len()
    );
    report
}
