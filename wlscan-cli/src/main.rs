/*!
 * wlscan
 * Wireless network discovery from the command line
 * Onyx Digital Intelligence Development LLC
 */

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use wlscan_core::{decode_bss_list, process, system_scanner, Bssid, ScanOptions, ScanReport};

mod config;
mod render;

use config::{OutputFormat, WlscanConfig};

#[derive(Parser)]
#[command(name = "wlscan")]
#[command(about = "Discover nearby wireless networks")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Configuration file path
    #[arg(short, long, default_value = "wlscan.toml")]
    config: PathBuf,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan and list networks, strongest first
    Scan {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
        /// Read the OS cache without requesting a fresh scan
        #[arg(long)]
        cached: bool,
    },
    /// Scan and show every detail for one BSSID
    Show {
        bssid: Bssid,
        #[arg(long)]
        cached: bool,
    },
    /// List wireless interfaces
    Interfaces,
    /// Decode a raw BSS list dump
    Decode {
        file: PathBuf,
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("wlscan={log_level},wlscan_core={log_level}"))
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = WlscanConfig::load(&cli.config)?;
    debug!(?config, "configuration loaded");

    match cli.command.unwrap_or(Commands::Scan {
        json: false,
        cached: false,
    }) {
        Commands::Scan { json, cached } => {
            let report = run_scan(&config, cached).await?;
            let format = if json { OutputFormat::Json } else { config.output.format };
            match format {
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(&report.networks)?)
                }
                OutputFormat::Table => print!("{}", render::network_table(&report.networks)),
            }
            Ok(())
        }
        Commands::Show { bssid, cached } => {
            let report = run_scan(&config, cached).await?;
            let network = report
                .networks
                .iter()
                .find(|n| n.bssid == bssid)
                .ok_or_else(|| anyhow!("{} not found in scan results", bssid))?;
            print!("{}", render::network_details(network));
            Ok(())
        }
        Commands::Interfaces => {
            let options = config.scan_options();
            let interfaces =
                tokio::task::spawn_blocking(move || system_scanner(options).interfaces())
                    .await
                    .context("interface listing task failed")?;
            print!("{}", render::interface_list(&interfaces));
            Ok(())
        }
        Commands::Decode { file, json } => decode_file(&config, &file, json),
    }
}

/// Runs the blocking pipeline off the async runtime, bounded by the
/// configured timeout.
async fn run_scan(config: &WlscanConfig, cached: bool) -> Result<ScanReport> {
    let options = ScanOptions {
        trigger_scan: config.scan.trigger && !cached,
        ..config.scan_options()
    };
    let timeout = config.scan_timeout();
    info!(trigger = options.trigger_scan, "scanning for wireless networks...");

    let task = tokio::task::spawn_blocking(move || system_scanner(options).scan_report());
    let report = tokio::time::timeout(timeout, task)
        .await
        .map_err(|_| anyhow!("scan timed out after {}s", timeout.as_secs()))?
        .context("scan task failed")?;
    Ok(report)
}

fn decode_file(config: &WlscanConfig, path: &Path, json: bool) -> Result<()> {
    let bytes = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let decoded = decode_bss_list(&bytes, &config.decode_options())
        .with_context(|| format!("decoding {}", path.display()))?;
    if decoded.rejected > 0 {
        info!(rejected = decoded.rejected, "skipped malformed records");
    }

    let networks = process(decoded.records);
    if json || config.output.format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&networks)?);
    } else {
        print!("{}", render::network_table(&networks));
    }
    Ok(())
}
