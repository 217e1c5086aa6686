//! webreconx library: reconnaissance scanning against a single target.
//!
//! The interesting part of this crate is [`resolver`], a self-contained DNS
//! engine that builds and parses wire-format messages without a DNS client
//! library. The scanning modules in [`modules`] are thin clients over
//! existing stacks (reqwest, tokio-rustls, plain TCP) that consume the
//! resolver's output.
//!
//! # Example
//!
//! ```no_run
//! use webreconx::{run_scan, Config};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config {
//!     target: Some("example.com".to_string()),
//!     ..Default::default()
//! };
//! let summary = run_scan(config).await?;
//! println!("{} module(s) completed", summary.modules_completed);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

pub mod app;
pub mod config;
pub mod modules;
pub mod report;
pub mod resolver;

pub use config::{Config, LogFormat, LogLevel, ScanModule};
pub use run::{run_scan, ScanSummary};

mod run {
    use std::path::PathBuf;
    use std::time::Duration;

    use anyhow::{anyhow, Context, Result};
    use chrono::Utc;
    use log::{info, warn};
    use serde::Serialize;
    use strum::IntoEnumIterator;

    use crate::config::{
        normalize_target, parse_dns_server, Config, ScanModule, DEFAULT_SUBDOMAIN_WORDLIST,
        DEFAULT_USER_AGENT,
    };
    use crate::modules;
    use crate::report::{ModuleOutcome, Report};
    use crate::resolver::ResolverConfig;

    /// Summary statistics for a completed scan.
    #[derive(Debug, Clone)]
    pub struct ScanSummary {
        /// Normalized target URL.
        pub target: String,
        /// Domain the DNS-facing modules operated on.
        pub domain: String,
        /// Modules that ran to completion.
        pub modules_completed: usize,
        /// Modules that failed.
        pub modules_failed: usize,
        /// Wall-clock duration in seconds.
        pub elapsed_seconds: f64,
        /// Where the JSON report was written, if requested.
        pub report_path: Option<PathBuf>,
    }

    /// Runs the selected scanning modules against the configured target.
    ///
    /// Modules run one after another, in the order given (or the canonical
    /// order when none were selected). A failing module is recorded in the
    /// report and the scan continues; only setup problems (bad target, bad
    /// DNS server address, unreadable wordlist) abort the run.
    ///
    /// # Errors
    ///
    /// Returns an error if no target was given, the target or DNS server
    /// address cannot be parsed, the wordlist cannot be read, or the report
    /// cannot be written.
    pub async fn run_scan(config: Config) -> Result<ScanSummary> {
        let raw_target = config
            .target
            .as_deref()
            .ok_or_else(|| anyhow!("no target specified"))?;
        let (target_url, domain) = normalize_target(raw_target)?;

        let resolver_config = ResolverConfig {
            server: parse_dns_server(&config.dns_server)?,
            ..ResolverConfig::default()
        };

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .user_agent(DEFAULT_USER_AGENT)
            .build()
            .context("failed to build HTTP client")?;

        let selected: Vec<ScanModule> = if config.modules.is_empty() {
            ScanModule::iter().collect()
        } else {
            config.modules.clone()
        };

        let wordlist = load_wordlist(&config)?;

        let started_at = Utc::now();
        let start = std::time::Instant::now();
        info!(
            "scanning {target_url} (domain {domain}) with {} module(s)",
            selected.len()
        );

        let mut outcomes = std::collections::BTreeMap::new();
        for module in selected {
            info!("running module: {}", module.title());
            let outcome = run_module(
                module,
                &target_url,
                &domain,
                &client,
                &resolver_config,
                &wordlist,
                config.concurrency,
            )
            .await;
            if let ModuleOutcome::Failed { error, .. } = &outcome {
                warn!("module {} failed: {error}", module.key());
            }
            outcomes.insert(module.key(), outcome);
        }

        let finished_at = Utc::now();
        let elapsed_seconds = start.elapsed().as_secs_f64();

        let report = Report {
            tool: "webreconx",
            version: env!("CARGO_PKG_VERSION"),
            target: target_url.clone(),
            domain: domain.clone(),
            started_at,
            finished_at,
            duration_seconds: elapsed_seconds,
            modules: outcomes,
        };

        if let Some(path) = &config.output {
            report.save(path)?;
            info!("report saved to {}", path.display());
        }

        Ok(ScanSummary {
            target: target_url,
            domain,
            modules_completed: report.completed(),
            modules_failed: report.failed(),
            elapsed_seconds,
            report_path: config.output.clone(),
        })
    }

    /// Dispatches one module and converts its findings into an outcome.
    async fn run_module(
        module: ScanModule,
        target_url: &str,
        domain: &str,
        client: &reqwest::Client,
        resolver_config: &ResolverConfig,
        wordlist: &[String],
        concurrency: usize,
    ) -> ModuleOutcome {
        let result = match module {
            ScanModule::Headers => {
                to_value(modules::headers::scan_headers(client, target_url).await)
            }
            ScanModule::Tls => to_value(modules::tls::inspect_certificate(domain).await),
            ScanModule::Tech => {
                to_value(modules::tech::detect_technologies(client, target_url).await)
            }
            ScanModule::Ports => to_value(modules::ports::scan_ports(domain, concurrency).await),
            ScanModule::Dns => to_value(Ok::<_, anyhow::Error>(
                modules::dns_recon::enumerate_records(domain, resolver_config).await,
            )),
            ScanModule::Subdomains => to_value(
                modules::subdomains::enumerate(
                    domain,
                    wordlist,
                    resolver_config,
                    client,
                    concurrency,
                )
                .await,
            ),
            ScanModule::Wayback => {
                to_value(modules::wayback::fetch_archived_urls(client, domain).await)
            }
        };

        match result {
            Ok(data) => ModuleOutcome::Completed {
                name: module.title(),
                data,
            },
            Err(e) => ModuleOutcome::Failed {
                name: module.title(),
                error: format!("{e:#}"),
            },
        }
    }

    fn to_value<T: Serialize>(result: Result<T>) -> Result<serde_json::Value> {
        let findings = result?;
        serde_json::to_value(findings).context("failed to serialize module findings")
    }

    /// Loads the subdomain wordlist: `--wordlist` file if given, built-in
    /// candidates otherwise. Blank lines and `#` comments are skipped.
    fn load_wordlist(config: &Config) -> Result<Vec<String>> {
        match &config.wordlist {
            Some(path) => {
                let contents = std::fs::read_to_string(path)
                    .with_context(|| format!("failed to read wordlist {}", path.display()))?;
                let words: Vec<String> = contents
                    .lines()
                    .map(str::trim)
                    .filter(|line| !line.is_empty() && !line.starts_with('#'))
                    .map(str::to_string)
                    .collect();
                if words.is_empty() {
                    return Err(anyhow!("wordlist {} is empty", path.display()));
                }
                Ok(words)
            }
            None => Ok(DEFAULT_SUBDOMAIN_WORDLIST
                .iter()
                .map(|word| word.to_string())
                .collect()),
        }
    }

}
