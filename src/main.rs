//! Main application entry point (CLI binary).
//!
//! A thin wrapper around the `webreconx` library: argument parsing, logger
//! initialization, and user-facing summary output. All scanning logic lives
//! in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use std::process;
use strum::IntoEnumIterator;

use webreconx::app::{init_crypto_provider, init_logger_with};
use webreconx::{run_scan, Config, ScanModule};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::parse();

    let log_level = config.log_level.clone();
    let log_format = config.log_format.clone();
    init_logger_with(log_level.into(), log_format).context("Failed to initialize logger")?;

    init_crypto_provider();

    if config.list_modules {
        println!("{}", "Available modules:".bold());
        for module in ScanModule::iter() {
            println!("  {:<12} {}", module.key().green(), module.description());
        }
        return Ok(());
    }

    if config.target.is_none() {
        eprintln!("{} no target specified (use --help for usage)", "error:".red());
        process::exit(1);
    }

    match run_scan(config).await {
        Ok(summary) => {
            println!(
                "Scanned {} ({}): {} module{} completed, {} failed in {:.1}s",
                summary.target,
                summary.domain,
                summary.modules_completed,
                if summary.modules_completed == 1 { "" } else { "s" },
                summary.modules_failed,
                summary.elapsed_seconds
            );
            if let Some(path) = summary.report_path {
                println!("Report saved to {}", path.display());
            }
            Ok(())
        }
        Err(e) => {
            eprintln!("webreconx error: {e:#}");
            process::exit(1);
        }
    }
}
