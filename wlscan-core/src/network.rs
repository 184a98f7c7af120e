/*!
 * Discovered Network Records
 * Typed view of one access point reported by the WLAN service
 */

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// SSID shown for networks that do not broadcast one.
pub const HIDDEN_NETWORK: &str = "(Hidden Network)";

/// Accepted RSSI range in dBm.
pub const MIN_SIGNAL_DBM: i32 = -100;
pub const MAX_SIGNAL_DBM: i32 = 0;

/// `clamp(2 * (dbm + 100), 0, 100)`
pub fn signal_percent(dbm: i32) -> u8 {
    (2 * (i64::from(dbm) + 100)).clamp(0, 100) as u8
}

/// 6-byte station identifier of an access point.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Bssid(pub [u8; 6]);

impl Bssid {
    pub fn as_bytes(&self) -> &[u8; 6] {
        &self.0
    }
}

impl fmt::Display for Bssid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d, e, g] = self.0;
        write!(f, "{a:02X}:{b:02X}:{c:02X}:{d:02X}:{e:02X}:{g:02X}")
    }
}

impl fmt::Debug for Bssid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Bssid({self})")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseBssidError(pub String);

impl fmt::Display for ParseBssidError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid BSSID '{}': expected six hex octets", self.0)
    }
}

impl std::error::Error for ParseBssidError {}

impl FromStr for Bssid {
    type Err = ParseBssidError;

    /// Accepts colon- or hyphen-separated octets in either case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.trim().split([':', '-']).collect();
        if parts.len() != 6 {
            return Err(ParseBssidError(s.to_string()));
        }

        let mut bytes = [0u8; 6];
        for (slot, part) in bytes.iter_mut().zip(&parts) {
            if part.len() != 2 {
                return Err(ParseBssidError(s.to_string()));
            }
            *slot = u8::from_str_radix(part, 16).map_err(|_| ParseBssidError(s.to_string()))?;
        }
        Ok(Self(bytes))
    }
}

impl Serialize for Bssid {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Bssid {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// `DOT11_BSS_TYPE`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BssType {
    Infrastructure,
    Independent,
    Any,
}

impl BssType {
    pub fn from_raw(raw: u32) -> Option<Self> {
        match raw {
            1 => Some(Self::Infrastructure),
            2 => Some(Self::Independent),
            3 => Some(Self::Any),
            _ => None,
        }
    }
}

impl fmt::Display for BssType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Infrastructure => write!(f, "Infrastructure"),
            Self::Independent => write!(f, "Ad-hoc"),
            Self::Any => write!(f, "Any"),
        }
    }
}

/// `DOT11_PHY_TYPE`, with values this crate does not name kept raw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PhyType {
    Legacy,
    Ofdm,
    HrDsss,
    Erp,
    Ht,
    Vht,
    He,
    Unknown(u32),
}

impl PhyType {
    pub fn from_raw(raw: u32) -> Self {
        match raw {
            // FHSS, DSSS, infrared
            1..=3 => Self::Legacy,
            4 => Self::Ofdm,
            5 => Self::HrDsss,
            6 => Self::Erp,
            7 => Self::Ht,
            8 => Self::Vht,
            10 => Self::He,
            other => Self::Unknown(other),
        }
    }
}

impl fmt::Display for PhyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Legacy => write!(f, "802.11 (legacy)"),
            Self::Ofdm => write!(f, "802.11a"),
            Self::HrDsss => write!(f, "802.11b"),
            Self::Erp => write!(f, "802.11g"),
            Self::Ht => write!(f, "802.11n (Wi-Fi 4)"),
            Self::Vht => write!(f, "802.11ac (Wi-Fi 5)"),
            Self::He => write!(f, "802.11ax (Wi-Fi 6)"),
            Self::Unknown(raw) => write!(f, "unknown ({raw})"),
        }
    }
}

/// One entry of the supported rate set, in 500 kbps units with the
/// high bit marking a basic rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rate(pub u16);

impl Rate {
    const BASIC: u16 = 0x8000;

    pub fn mbps(&self) -> f64 {
        f64::from(self.0 & !Self::BASIC) * 0.5
    }

    pub fn is_basic(&self) -> bool {
        self.0 & Self::BASIC != 0
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.mbps())?;
        if self.is_basic() {
            write!(f, "(B)")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WifiNetworkRecord {
    pub ssid: String,
    pub bssid: Bssid,
    pub interface_phy_id: u32,
    pub bss_type: BssType,
    pub phy_type: PhyType,
    pub signal_dbm: i32,
    pub signal_percent: u8,
    pub link_quality_percent: u32,
    pub in_regulatory_domain: bool,
    /// Beacon period in time units (1 TU = 1024 µs).
    pub beacon_interval: u16,
    pub capability_bits: u16,
    pub center_frequency_khz: u32,
    pub supported_rates: Vec<Rate>,
    /// Beacon/probe-response TSF value.
    pub timestamp: u64,
    /// Location of the information-element blob, relative to the record start.
    pub ie_offset: u32,
    pub ie_size: u32,
    pub last_seen: DateTime<Local>,
}

impl WifiNetworkRecord {
    pub fn is_hidden(&self) -> bool {
        self.ssid == HIDDEN_NETWORK
    }
}
