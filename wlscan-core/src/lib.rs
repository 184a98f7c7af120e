/*!
 * wlscan core
 * Wireless network discovery over the OS WLAN service
 *
 * A scan opens one WLAN session, asks every wireless interface for a
 * fresh scan, reads back each interface's BSS list, decodes the packed
 * records and returns one entry per BSSID, strongest signal first.
 */

pub mod decode;
pub mod details;
pub mod error;
pub mod network;
pub mod process;
pub mod scanner;
pub mod wlan;

#[cfg(test)]
mod testing;

pub use decode::{decode_bss_list, DecodeOptions, DecodedList};
pub use details::{Band, SignalTier};
pub use error::{BufferCorruption, OsStatus, RecordDecodeError, ScanError};
pub use network::{Bssid, BssType, PhyType, Rate, WifiNetworkRecord, HIDDEN_NETWORK};
pub use process::process;
pub use scanner::{system_scanner, ScanOptions, ScanReport, Scanner};
pub use wlan::{SystemWlan, WirelessInterface, WlanApi};
