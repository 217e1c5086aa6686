//! TLS certificate inspection.
//!
//! Connects to the target on port 443 with `tokio-rustls` (webpki roots),
//! pulls the peer certificate chain, and parses the leaf with `x509-parser`
//! for subject, issuer, validity window, and subject alternative names.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, Result};
use chrono::{DateTime, Utc};
use log::{debug, info};
use rustls::pki_types::ServerName;
use serde::Serialize;
use tokio::net::TcpStream;
use tokio_rustls::rustls::{ClientConfig, RootCertStore};
use tokio_rustls::TlsConnector;
use x509_parser::extensions::{GeneralName, ParsedExtension};

use crate::config::{TCP_CONNECT_TIMEOUT_SECS, TLS_HANDSHAKE_TIMEOUT_SECS};

/// Certificate details extracted from the leaf certificate.
#[derive(Debug, Clone, Serialize)]
pub struct CertificateReport {
    /// Negotiated TLS protocol version.
    pub tls_version: Option<String>,
    /// Certificate subject distinguished name.
    pub subject: String,
    /// Certificate issuer distinguished name.
    pub issuer: String,
    /// Start of the validity window.
    pub not_before: Option<DateTime<Utc>>,
    /// End of the validity window.
    pub not_after: Option<DateTime<Utc>>,
    /// Days until the certificate expires (negative once expired).
    pub days_until_expiry: Option<i64>,
    /// DNS names from the Subject Alternative Name extension.
    pub subject_alternative_names: Vec<String>,
}

/// Connects to `domain:443` and extracts leaf certificate details.
pub async fn inspect_certificate(domain: &str) -> Result<CertificateReport> {
    debug!("opening TLS connection to {domain}:443");

    let mut root_store = RootCertStore::empty();
    root_store.extend(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());
    let config = ClientConfig::builder()
        .with_root_certificates(root_store)
        .with_no_client_auth();

    let server_name = ServerName::try_from(domain.to_string())
        .map_err(|e| anyhow!("invalid server name {domain:?}: {e}"))?;

    let sock = tokio::time::timeout(
        Duration::from_secs(TCP_CONNECT_TIMEOUT_SECS),
        TcpStream::connect((domain, 443)),
    )
    .await
    .map_err(|_| anyhow!("TCP connection to {domain}:443 timed out"))?
    .map_err(|e| anyhow!("failed to connect to {domain}:443: {e}"))?;

    let connector = TlsConnector::from(Arc::new(config));
    let tls_stream = tokio::time::timeout(
        Duration::from_secs(TLS_HANDSHAKE_TIMEOUT_SECS),
        connector.connect(server_name, sock),
    )
    .await
    .map_err(|_| anyhow!("TLS handshake with {domain} timed out"))?
    .map_err(|e| anyhow!("TLS handshake with {domain} failed: {e}"))?;

    let (_, session) = tls_stream.get_ref();
    let tls_version = session.protocol_version().map(|v| format!("{v:?}"));

    let certs = session
        .peer_certificates()
        .ok_or_else(|| anyhow!("no peer certificates presented by {domain}"))?;
    let leaf = certs
        .first()
        .ok_or_else(|| anyhow!("empty certificate chain from {domain}"))?;

    let (_, cert) = x509_parser::parse_x509_certificate(leaf.as_ref())
        .map_err(|e| anyhow!("failed to parse certificate from {domain}: {e}"))?;
    let tbs = &cert.tbs_certificate;

    let subject = tbs.subject.to_string();
    let issuer = tbs.issuer.to_string();

    let not_before = DateTime::from_timestamp(tbs.validity.not_before.timestamp(), 0);
    let not_after = DateTime::from_timestamp(tbs.validity.not_after.timestamp(), 0);
    let days_until_expiry = not_after.map(|end| (end - Utc::now()).num_days());

    let subject_alternative_names = extract_sans(&cert);

    info!(
        "certificate for {domain}: issuer {issuer}, {} SAN(s), expires in {} day(s)",
        subject_alternative_names.len(),
        days_until_expiry.unwrap_or_default()
    );

    Ok(CertificateReport {
        tls_version,
        subject,
        issuer,
        not_before,
        not_after,
        days_until_expiry,
        subject_alternative_names,
    })
}

/// Pulls DNS names out of the Subject Alternative Name extension.
fn extract_sans(cert: &x509_parser::certificate::X509Certificate<'_>) -> Vec<String> {
    let mut sans = Vec::new();
    for ext in cert.extensions() {
        if let ParsedExtension::SubjectAlternativeName(san) = ext.parsed_extension() {
            for general_name in &san.general_names {
                if let GeneralName::DNSName(dns_name) = general_name {
                    sans.push(dns_name.to_string());
                }
            }
        }
    }
    sans
}
