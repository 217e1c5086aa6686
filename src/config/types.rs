//! Configuration types and CLI options.
//!
//! The `Config` struct doubles as the clap argument definition and the
//! library-facing configuration value; `run_scan` takes it by value and no
//! global state is involved.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use strum_macros::EnumIter;

use crate::config::constants::{DEFAULT_CONCURRENCY, DEFAULT_DNS_SERVER, DEFAULT_HTTP_TIMEOUT_SECS};

/// Logging level for the application.
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// The scanning modules the framework can run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, ValueEnum, EnumIter)]
pub enum ScanModule {
    /// HTTP security header inspection
    Headers,
    /// TLS certificate inspection
    Tls,
    /// Technology fingerprinting
    Tech,
    /// Common-port connect scan with banner grabs
    Ports,
    /// DNS record enumeration via the built-in resolver
    Dns,
    /// Subdomain discovery (wordlist bruteforce + crt.sh)
    Subdomains,
    /// Wayback Machine historical URL fetch
    Wayback,
}

impl ScanModule {
    /// Stable key used in reports and `-m` arguments.
    pub fn key(self) -> &'static str {
        match self {
            ScanModule::Headers => "headers",
            ScanModule::Tls => "tls",
            ScanModule::Tech => "tech",
            ScanModule::Ports => "ports",
            ScanModule::Dns => "dns",
            ScanModule::Subdomains => "subdomains",
            ScanModule::Wayback => "wayback",
        }
    }

    /// Human-readable module title.
    pub fn title(self) -> &'static str {
        match self {
            ScanModule::Headers => "Security Header Scanner",
            ScanModule::Tls => "TLS Certificate Analyzer",
            ScanModule::Tech => "Technology Detector",
            ScanModule::Ports => "Port Scanner",
            ScanModule::Dns => "DNS Reconnaissance",
            ScanModule::Subdomains => "Subdomain Finder",
            ScanModule::Wayback => "Wayback Machine Fetcher",
        }
    }

    /// One-line description shown by `--list-modules`.
    pub fn description(self) -> &'static str {
        match self {
            ScanModule::Headers => "Analyzes HTTP security headers and identifies misconfigurations",
            ScanModule::Tls => "Checks certificate validity, issuer, and subject alternative names",
            ScanModule::Tech => "Identifies web technologies, frameworks, and server software",
            ScanModule::Ports => "Scans common ports and identifies running services",
            ScanModule::Dns => "Enumerates DNS records (A, AAAA, MX, NS, TXT, CNAME, SOA)",
            ScanModule::Subdomains => "Discovers subdomains via wordlist bruteforce and crt.sh",
            ScanModule::Wayback => "Retrieves historical URLs from the Wayback Machine",
        }
    }
}

/// Command-line options and scan configuration.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "webreconx",
    version,
    about = "Web security reconnaissance framework",
    after_help = "Only scan targets you have permission to scan."
)]
pub struct Config {
    /// Target URL or domain to scan
    pub target: Option<String>,

    /// Specific modules to run (default: all)
    #[arg(short = 'm', long = "modules", value_enum, num_args = 1..)]
    pub modules: Vec<ScanModule>,

    /// Output file for the JSON report
    #[arg(short = 'o', long)]
    pub output: Option<PathBuf>,

    /// HTTP/port request timeout in seconds
    #[arg(short = 't', long, default_value_t = DEFAULT_HTTP_TIMEOUT_SECS)]
    pub timeout: u64,

    /// Worker-pool size for subdomain bruteforce and port scanning
    #[arg(long, default_value_t = DEFAULT_CONCURRENCY)]
    pub concurrency: usize,

    /// Upstream DNS server (host:port; port 53 assumed if omitted)
    #[arg(long, default_value = DEFAULT_DNS_SERVER)]
    pub dns_server: String,

    /// Subdomain wordlist file (one candidate prefix per line)
    #[arg(long)]
    pub wordlist: Option<PathBuf>,

    /// Log level
    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,

    /// Log format
    #[arg(long, value_enum, default_value = "plain")]
    pub log_format: LogFormat,

    /// List available modules and exit
    #[arg(long)]
    pub list_modules: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            target: None,
            modules: Vec::new(),
            output: None,
            timeout: DEFAULT_HTTP_TIMEOUT_SECS,
            concurrency: DEFAULT_CONCURRENCY,
            dns_server: DEFAULT_DNS_SERVER.to_string(),
            wordlist: None,
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
            list_modules: false,
        }
    }
}
