//! HTTP security header inspection.
//!
//! Fetches the target once and reports which of the standard security
//! headers are present, which are missing, and which headers leak
//! implementation details (Server, X-Powered-By).

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use log::{debug, info};
use serde::Serialize;

/// Security headers a well-configured site is expected to send.
const SECURITY_HEADERS: &[&str] = &[
    "strict-transport-security",
    "content-security-policy",
    "x-frame-options",
    "x-content-type-options",
    "referrer-policy",
    "permissions-policy",
];

/// Headers that disclose server-side implementation details.
const DISCLOSURE_HEADERS: &[&str] = &["server", "x-powered-by", "x-aspnet-version", "via"];

/// Outcome of the header scan.
#[derive(Debug, Clone, Serialize)]
pub struct HeaderReport {
    /// HTTP status of the probe request.
    pub status: u16,
    /// Security headers found, with their values.
    pub present: BTreeMap<String, String>,
    /// Expected security headers the response lacked.
    pub missing: Vec<String>,
    /// Implementation-disclosing headers found, with their values.
    pub disclosure: BTreeMap<String, String>,
}

/// Probes `target_url` and classifies its response headers.
pub async fn scan_headers(client: &reqwest::Client, target_url: &str) -> Result<HeaderReport> {
    debug!("fetching {target_url} for header inspection");
    let response = client
        .get(target_url)
        .send()
        .await
        .with_context(|| format!("request to {target_url} failed"))?;

    let status = response.status().as_u16();
    let headers = response.headers();

    let mut present = BTreeMap::new();
    let mut missing = Vec::new();
    for &header in SECURITY_HEADERS {
        match headers.get(header) {
            Some(value) => {
                present.insert(
                    header.to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                );
            }
            None => missing.push(header.to_string()),
        }
    }

    let mut disclosure = BTreeMap::new();
    for &header in DISCLOSURE_HEADERS {
        if let Some(value) = headers.get(header) {
            disclosure.insert(
                header.to_string(),
                String::from_utf8_lossy(value.as_bytes()).into_owned(),
            );
        }
    }

    info!(
        "header scan: {} present, {} missing, {} disclosure header(s)",
        present.len(),
        missing.len(),
        disclosure.len()
    );

    Ok(HeaderReport {
        status,
        present,
        missing,
        disclosure,
    })
}
