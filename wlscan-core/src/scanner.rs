/*!
 * Scan Pipeline
 * Session -> interfaces -> trigger, settle, retrieve, decode -> post-process
 */

use serde::Serialize;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::decode::{decode_bss_list, DecodeOptions};
use crate::error::ScanError;
use crate::network::WifiNetworkRecord;
use crate::process::process;
use crate::wlan::{Session, SystemWlan, WirelessInterface, WlanApi};

/// The default decoder check is exact: `total_size` must equal the record
/// area. Buffers from `WlanGetNetworkBssList` count their trailing IE data
/// in `total_size`, so scans of real adapters need
/// `decode.allow_trailing_data = true`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanOptions {
    /// Ask the OS for a fresh scan before reading its BSS list.
    pub trigger_scan: bool,
    /// Blocking wait after an accepted scan request.
    pub settle_delay: Duration,
    pub decode: DecodeOptions,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            trigger_scan: true,
            settle_delay: Duration::from_secs(3),
            decode: DecodeOptions::default(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ScanReport {
    pub networks: Vec<WifiNetworkRecord>,
    pub interfaces_seen: usize,
    /// Interfaces whose BSS list could not be retrieved or was corrupt.
    pub interfaces_failed: usize,
    pub records_rejected: usize,
}

/// Blocking scanner. Run it off any interactive thread; every interface
/// costs one settle delay.
pub struct Scanner<A: WlanApi> {
    api: A,
    options: ScanOptions,
}

impl<A: WlanApi> Scanner<A> {
    pub fn new(api: A, options: ScanOptions) -> Self {
        Self { api, options }
    }

    pub fn options(&self) -> &ScanOptions {
        &self.options
    }

    /// Discovered networks, deduplicated and strongest first. Failures
    /// degrade to an empty or partial list.
    pub fn scan(&self) -> Vec<WifiNetworkRecord> {
        self.scan_report().networks
    }

    pub fn scan_report(&self) -> ScanReport {
        let session = match Session::open(&self.api) {
            Ok(session) => session,
            Err(e) => {
                warn!("{}", e);
                return ScanReport::default();
            }
        };

        let interfaces = match session.interfaces() {
            Ok(interfaces) => interfaces,
            Err(e) => {
                warn!("{}; treating as no wireless hardware", e);
                return ScanReport::default();
            }
        };

        let mut report = ScanReport {
            interfaces_seen: interfaces.len(),
            ..Default::default()
        };
        let mut collected = Vec::new();

        for interface in &interfaces {
            match self.scan_interface(&session, interface) {
                Ok(decoded) => {
                    report.records_rejected += decoded.rejected;
                    collected.extend(decoded.records);
                }
                Err(e) => {
                    warn!(interface = %interface.id, "{}", e);
                    report.interfaces_failed += 1;
                }
            }
        }

        session.close();

        report.networks = process(collected);
        info!(
            interfaces = report.interfaces_seen,
            failed = report.interfaces_failed,
            rejected = report.records_rejected,
            networks = report.networks.len(),
            "scan complete"
        );
        report
    }

    /// Wireless adapters, or an empty list when none can be listed.
    pub fn interfaces(&self) -> Vec<WirelessInterface> {
        let result = Session::open(&self.api).and_then(|session| session.interfaces());
        result.unwrap_or_else(|e| {
            warn!("{}", e);
            Vec::new()
        })
    }

    fn scan_interface(
        &self,
        session: &Session<'_, A>,
        interface: &WirelessInterface,
    ) -> Result<crate::decode::DecodedList, ScanError> {
        if self.options.trigger_scan {
            debug!(interface = %interface.id, "requesting scan");
            match session.trigger_scan(interface) {
                Ok(()) => std::thread::sleep(self.options.settle_delay),
                Err(e) => warn!("{}; using cached results", e),
            }
        }

        let buffer = session.bss_buffer(interface)?;
        let decoded = decode_bss_list(buffer.bytes(), &self.options.decode)?;
        debug!(
            interface = %interface.id,
            records = decoded.records.len(),
            rejected = decoded.rejected,
            "BSS list decoded"
        );
        Ok(decoded)
    }
}

/// Scanner over the platform's WLAN service. See [`ScanOptions`] for the
/// decoder setting real OS buffers need.
pub fn system_scanner(options: ScanOptions) -> Scanner<SystemWlan> {
    Scanner::new(SystemWlan::new(), options)
}
