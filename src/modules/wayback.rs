//! Wayback Machine historical URL fetch.
//!
//! Thin client over the CDX API: one request, de-duplicated URL list,
//! capped at a fixed maximum.

use anyhow::{Context, Result};
use log::{debug, info};
use serde::Serialize;

use crate::config::{MAX_WAYBACK_URLS, WAYBACK_CDX_URL};

/// Historical URLs known to the Wayback Machine.
#[derive(Debug, Clone, Serialize)]
pub struct WaybackReport {
    /// Unique archived URLs, in the API's (roughly chronological) order.
    pub urls: Vec<String>,
    /// Count after de-duplication.
    pub total: usize,
}

/// Fetches archived URLs for `domain` and everything under it.
pub async fn fetch_archived_urls(client: &reqwest::Client, domain: &str) -> Result<WaybackReport> {
    debug!("querying wayback CDX for {domain}");
    let body = client
        .get(WAYBACK_CDX_URL)
        .query(&[
            ("url", format!("{domain}/*")),
            ("output", "text".to_string()),
            ("fl", "original".to_string()),
            ("collapse", "urlkey".to_string()),
            ("limit", MAX_WAYBACK_URLS.to_string()),
        ])
        .send()
        .await
        .context("wayback CDX request failed")?
        .error_for_status()
        .context("wayback CDX returned an error status")?
        .text()
        .await
        .context("failed to read wayback CDX response body")?;

    let mut seen = std::collections::HashSet::new();
    let urls: Vec<String> = body
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter(|line| seen.insert(line.to_string()))
        .map(str::to_string)
        .take(MAX_WAYBACK_URLS)
        .collect();

    let total = urls.len();
    info!("wayback machine knows {total} unique URL(s) for {domain}");
    Ok(WaybackReport { urls, total })
}
