//! Subdomain discovery.
//!
//! Two sources merged: a wordlist bruteforce driven through the built-in
//! resolver (any A answer means the name exists) and a crt.sh
//! certificate-transparency search. The bruteforce fans out over a bounded
//! worker pool; a timeout or malformed response for one candidate skips
//! that candidate only.

use std::collections::BTreeMap;
use std::sync::Arc;

use anyhow::Result;
use futures::stream::FuturesUnordered;
use futures::StreamExt;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use tokio::sync::Semaphore;

use crate::config::CRTSH_URL;
use crate::resolver::{resolve, QueryType, RecordData, ResolverConfig};

/// A discovered subdomain.
#[derive(Debug, Clone, Serialize)]
pub struct SubdomainFinding {
    /// Fully qualified subdomain name.
    pub name: String,
    /// Resolved IPv4 addresses (bruteforce hits only; crt.sh entries are
    /// reported unresolved).
    pub addresses: Vec<String>,
    /// Where the name came from: "bruteforce" or "crt.sh".
    pub source: &'static str,
}

/// Combined discovery results.
#[derive(Debug, Clone, Serialize)]
pub struct SubdomainReport {
    /// Discovered names, sorted, merged across sources.
    pub discovered: Vec<SubdomainFinding>,
    /// Candidates attempted by the bruteforce.
    pub candidates_tried: usize,
}

/// One row of crt.sh's JSON output; only the name matters here.
#[derive(Debug, Deserialize)]
struct CrtShEntry {
    name_value: String,
}

/// Runs both discovery sources and merges their findings.
pub async fn enumerate(
    domain: &str,
    words: &[String],
    resolver_config: &ResolverConfig,
    client: &reqwest::Client,
    concurrency: usize,
) -> Result<SubdomainReport> {
    let mut merged: BTreeMap<String, SubdomainFinding> = BTreeMap::new();

    for finding in bruteforce(domain, words, resolver_config, concurrency).await {
        merged.insert(finding.name.clone(), finding);
    }

    match fetch_crtsh(client, domain).await {
        Ok(names) => {
            for name in names {
                merged.entry(name.clone()).or_insert(SubdomainFinding {
                    name,
                    addresses: Vec::new(),
                    source: "crt.sh",
                });
            }
        }
        // crt.sh is flaky; discovery still succeeds on bruteforce alone
        Err(e) => warn!("crt.sh lookup for {domain} failed: {e}"),
    }

    info!(
        "subdomain discovery for {domain}: {} name(s) from {} candidate(s)",
        merged.len(),
        words.len()
    );

    Ok(SubdomainReport {
        discovered: merged.into_values().collect(),
        candidates_tried: words.len(),
    })
}

/// Resolves `<word>.<domain>` for every candidate over a bounded pool.
///
/// Each worker owns its own socket and transaction ID via [`resolve`];
/// results are keyed by name, never by completion order. NXDOMAIN is the
/// expected negative; timeouts and network errors skip the candidate.
pub async fn bruteforce(
    domain: &str,
    words: &[String],
    config: &ResolverConfig,
    concurrency: usize,
) -> Vec<SubdomainFinding> {
    let semaphore = Arc::new(Semaphore::new(concurrency.max(1)));
    let config = Arc::new(config.clone());
    let mut tasks = FuturesUnordered::new();

    for word in words {
        let candidate = format!("{word}.{domain}");
        let semaphore = Arc::clone(&semaphore);
        let config = Arc::clone(&config);
        tasks.push(tokio::spawn(async move {
            let _permit = semaphore.acquire_owned().await.ok()?;
            match resolve(&candidate, QueryType::A, &config).await {
                Ok(result) if result.is_success() && !result.records.is_empty() => {
                    let addresses = result
                        .records
                        .iter()
                        .filter_map(|record| match &record.data {
                            RecordData::A(addr) => Some(addr.to_string()),
                            _ => None,
                        })
                        .collect();
                    Some(SubdomainFinding {
                        name: candidate,
                        addresses,
                        source: "bruteforce",
                    })
                }
                Ok(result) => {
                    debug!("{candidate}: {}", result.response_code);
                    None
                }
                Err(e) => {
                    debug!("{candidate}: skipped ({e})");
                    None
                }
            }
        }));
    }

    let mut findings = Vec::new();
    while let Some(joined) = tasks.next().await {
        match joined {
            Ok(Some(finding)) => findings.push(finding),
            Ok(None) => {}
            Err(e) => warn!("bruteforce task panicked: {e}"),
        }
    }
    findings.sort_unstable_by(|a, b| a.name.cmp(&b.name));
    findings
}

/// Queries crt.sh for certificates covering `*.domain`.
async fn fetch_crtsh(client: &reqwest::Client, domain: &str) -> Result<Vec<String>> {
    let entries: Vec<CrtShEntry> = client
        .get(CRTSH_URL)
        .query(&[("q", format!("%.{domain}")), ("output", "json".to_string())])
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;

    let suffix = format!(".{domain}");
    let mut names: Vec<String> = entries
        .iter()
        // name_value may hold several newline-separated names per entry
        .flat_map(|entry| entry.name_value.lines())
        .map(|name| name.trim().trim_start_matches("*.").to_lowercase())
        .filter(|name| name.ends_with(&suffix) && !name.contains('@'))
        .collect();
    names.sort_unstable();
    names.dedup();
    debug!("crt.sh returned {} unique name(s) for {domain}", names.len());
    Ok(names)
}
