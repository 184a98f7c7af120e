/*!
 * Output Rendering
 * Network table, per-BSSID details and interface listing
 */

use std::fmt::Write;
use wlscan_core::details::format_capabilities;
use wlscan_core::{WifiNetworkRecord, WirelessInterface};

pub const NO_NETWORKS: &str = "No networks found";

const SSID_WIDTH: usize = 32;

pub fn network_table(networks: &[WifiNetworkRecord]) -> String {
    if networks.is_empty() {
        return format!("{NO_NETWORKS}\n");
    }

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<SSID_WIDTH$}  {:<17}  {:>8}  {:>4}  {:<4}  {:>3}  {:<7}  {}",
        "SSID", "BSSID", "SIGNAL", "%", "", "CH", "BAND", "SECURITY"
    );
    for network in networks {
        let channel = network
            .channel()
            .map(|c| c.to_string())
            .unwrap_or_else(|| "-".to_string());
        let band = network
            .band()
            .map(|b| b.to_string())
            .unwrap_or_else(|| "-".to_string());
        let security = if network.is_secured() { "secured" } else { "open" };
        let _ = writeln!(
            out,
            "{:<SSID_WIDTH$}  {}  {:>4} dBm  {:>3}%  {:<4}  {:>3}  {:<7}  {}",
            truncate(&network.ssid, SSID_WIDTH),
            network.bssid,
            network.signal_dbm,
            network.signal_percent,
            network.signal_tier().bars(),
            channel,
            band,
            security
        );
    }
    let _ = writeln!(out, "\n{} network(s)", networks.len());
    out
}

pub fn network_details(network: &WifiNetworkRecord) -> String {
    let rates = if network.supported_rates.is_empty() {
        "-".to_string()
    } else {
        network
            .supported_rates
            .iter()
            .map(|r| r.to_string())
            .collect::<Vec<_>>()
            .join(" ")
    };
    let band = network
        .band()
        .map(|b| b.to_string())
        .unwrap_or_else(|| "unknown".to_string());
    let channel = network
        .channel()
        .map(|c| c.to_string())
        .unwrap_or_else(|| "unknown".to_string());

    let rows = [
        ("SSID", network.ssid.clone()),
        ("BSSID", network.bssid.to_string()),
        (
            "Signal",
            format!(
                "{} dBm ({}%, {})",
                network.signal_dbm,
                network.signal_percent,
                network.signal_tier()
            ),
        ),
        ("Link quality", format!("{}%", network.link_quality_percent)),
        ("BSS type", network.bss_type.to_string()),
        ("PHY type", network.phy_type.to_string()),
        (
            "Frequency",
            format!("{:.3} GHz", f64::from(network.center_frequency_khz) / 1_000_000.0),
        ),
        ("Band", band),
        ("Channel", channel),
        ("Capabilities", format_capabilities(network.capability_bits)),
        ("Rates (Mbps)", rates),
        ("Beacon interval", format!("{} TU", network.beacon_interval)),
        (
            "Regulatory domain",
            if network.in_regulatory_domain { "yes" } else { "no" }.to_string(),
        ),
        ("PHY id", network.interface_phy_id.to_string()),
        ("Last seen", network.last_seen.format("%Y-%m-%d %H:%M:%S").to_string()),
    ];

    let mut out = String::new();
    for (label, value) in rows {
        let _ = writeln!(out, "{:<18} {}", format!("{label}:"), value);
    }
    out
}

pub fn interface_list(interfaces: &[WirelessInterface]) -> String {
    if interfaces.is_empty() {
        return "No wireless interfaces found\n".to_string();
    }
    let mut out = String::new();
    for (i, interface) in interfaces.iter().enumerate() {
        let _ = writeln!(out, "{:>2}. {}", i + 1, interface);
    }
    out
}

fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        s.to_string()
    } else {
        let mut cut: String = s.chars().take(width - 1).collect();
        cut.push('…');
        cut
    }
}
