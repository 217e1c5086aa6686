//! Common-port connect scan with banner grabs.
//!
//! Plain TCP connects against a fixed port list, bounded by a semaphore so
//! the fan-out never overwhelms the local stack or the target. Services
//! that talk first (FTP, SSH, SMTP, POP3, IMAP) get a short banner read.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use futures::stream::FuturesUnordered;
use futures::StreamExt;
use log::{debug, info};
use serde::Serialize;
use tokio::io::AsyncReadExt;
use tokio::net::TcpStream;
use tokio::sync::Semaphore;

use crate::config::{
    BANNER_READ_TIMEOUT_SECS, COMMON_PORTS, MAX_BANNER_BYTES, TCP_CONNECT_TIMEOUT_SECS,
};

/// A single open port.
#[derive(Debug, Clone, Serialize)]
pub struct PortFinding {
    /// Port number.
    pub port: u16,
    /// Well-known service name for the port.
    pub service: &'static str,
    /// Greeting banner, when the service volunteered one.
    pub banner: Option<String>,
}

/// Scans the common-port list against `domain`.
///
/// Results come back sorted by port; closed/filtered ports are simply
/// absent. Individual connect failures never fail the scan.
pub async fn scan_ports(domain: &str, concurrency: usize) -> Result<Vec<PortFinding>> {
    let semaphore = Arc::new(Semaphore::new(concurrency.max(1)));
    let mut tasks = FuturesUnordered::new();

    for &port in COMMON_PORTS {
        let semaphore = Arc::clone(&semaphore);
        let host = domain.to_string();
        tasks.push(tokio::spawn(async move {
            let _permit = semaphore.acquire_owned().await.ok()?;
            probe_port(&host, port).await
        }));
    }

    let mut findings = Vec::new();
    while let Some(joined) = tasks.next().await {
        match joined {
            Ok(Some(finding)) => findings.push(finding),
            Ok(None) => {}
            Err(e) => log::warn!("port probe task panicked: {e}"),
        }
    }
    findings.sort_unstable_by_key(|f| f.port);

    info!(
        "port scan: {} of {} common ports open",
        findings.len(),
        COMMON_PORTS.len()
    );
    Ok(findings)
}

/// Connects to one port; `None` when closed, filtered, or timed out.
async fn probe_port(host: &str, port: u16) -> Option<PortFinding> {
    let stream = match tokio::time::timeout(
        Duration::from_secs(TCP_CONNECT_TIMEOUT_SECS),
        TcpStream::connect((host, port)),
    )
    .await
    {
        Ok(Ok(stream)) => stream,
        Ok(Err(e)) => {
            debug!("{host}:{port} closed: {e}");
            return None;
        }
        Err(_) => {
            debug!("{host}:{port} filtered (connect timeout)");
            return None;
        }
    };

    let banner = if service_talks_first(port) {
        read_banner(stream).await
    } else {
        None
    };

    Some(PortFinding {
        port,
        service: service_name(port),
        banner,
    })
}

/// Reads up to [`MAX_BANNER_BYTES`] of whatever the service sends first.
async fn read_banner(mut stream: TcpStream) -> Option<String> {
    let mut buf = vec![0u8; MAX_BANNER_BYTES];
    match tokio::time::timeout(
        Duration::from_secs(BANNER_READ_TIMEOUT_SECS),
        stream.read(&mut buf),
    )
    .await
    {
        Ok(Ok(len)) if len > 0 => {
            let banner = String::from_utf8_lossy(&buf[..len]).trim().to_string();
            if banner.is_empty() {
                None
            } else {
                Some(banner)
            }
        }
        _ => None,
    }
}

/// Services that send a greeting before the client speaks.
fn service_talks_first(port: u16) -> bool {
    matches!(port, 21 | 22 | 25 | 110 | 143 | 465 | 587 | 993 | 995)
}

/// Well-known service name for a port on the scan list.
fn service_name(port: u16) -> &'static str {
    match port {
        21 => "ftp",
        22 => "ssh",
        23 => "telnet",
        25 => "smtp",
        53 => "dns",
        80 => "http",
        110 => "pop3",
        143 => "imap",
        443 => "https",
        465 => "smtps",
        587 => "submission",
        993 => "imaps",
        995 => "pop3s",
        3306 => "mysql",
        3389 => "rdp",
        5432 => "postgresql",
        6379 => "redis",
        8080 => "http-alt",
        8443 => "https-alt",
        27017 => "mongodb",
        _ => "unknown",
    }
}
