/*!
 * Network Detail Helpers
 * Capability flag names, band and channel classification, signal tiers
 */

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::network::WifiNetworkRecord;

// IEEE Std 802.11-2016, 9.4.1.4
const CAPABILITY_FLAGS: [(u16, &str); 16] = [
    (1 << 0, "ESS"),
    (1 << 1, "IBSS"),
    (1 << 2, "CF-Pollable"),
    (1 << 3, "CF-Poll Request"),
    (1 << 4, "Privacy"),
    (1 << 5, "Short Preamble"),
    (1 << 6, "PBCC"),
    (1 << 7, "Channel Agility"),
    (1 << 8, "Spectrum Mgmt"),
    (1 << 9, "QoS"),
    (1 << 10, "Short Slot Time"),
    (1 << 11, "APSD"),
    (1 << 12, "Radio Measurement"),
    (1 << 13, "DSSS-OFDM"),
    (1 << 14, "Delayed BA"),
    (1 << 15, "Immediate BA"),
];

pub const PRIVACY: u16 = 1 << 4;

pub fn capability_names(bits: u16) -> Vec<&'static str> {
    CAPABILITY_FLAGS
        .iter()
        .filter(|(mask, _)| bits & mask != 0)
        .map(|(_, name)| *name)
        .collect()
}

/// Comma-separated flag names, or the raw hex value when no bit is set.
pub fn format_capabilities(bits: u16) -> String {
    let names = capability_names(bits);
    if names.is_empty() {
        format!("0x{bits:04X}")
    } else {
        names.join(", ")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Band {
    Band2_4GHz,
    Band5GHz,
    Band6GHz,
}

impl Band {
    pub fn from_frequency_khz(khz: u32) -> Option<Self> {
        match khz / 1000 {
            2412..=2484 => Some(Self::Band2_4GHz),
            5160..=5885 => Some(Self::Band5GHz),
            5955..=7115 => Some(Self::Band6GHz),
            _ => None,
        }
    }
}

impl fmt::Display for Band {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Band2_4GHz => write!(f, "2.4 GHz"),
            Self::Band5GHz => write!(f, "5 GHz"),
            Self::Band6GHz => write!(f, "6 GHz"),
        }
    }
}

pub fn channel_from_frequency_khz(khz: u32) -> Option<u8> {
    let mhz = khz / 1000;
    let channel = match mhz {
        2484 => 14,
        2412..=2472 => (mhz - 2407) / 5,
        5160..=5885 => (mhz - 5000) / 5,
        5955..=7115 => (mhz - 5950) / 5,
        _ => return None,
    };
    u8::try_from(channel).ok()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SignalTier {
    Weak,
    Fair,
    Good,
    Excellent,
}

impl SignalTier {
    pub fn from_percent(percent: u8) -> Self {
        match percent {
            75.. => Self::Excellent,
            50..=74 => Self::Good,
            25..=49 => Self::Fair,
            _ => Self::Weak,
        }
    }

    /// Four-step bar glyph for table output.
    pub fn bars(&self) -> &'static str {
        match self {
            Self::Excellent => "▂▄▆█",
            Self::Good => "▂▄▆_",
            Self::Fair => "▂▄__",
            Self::Weak => "▂___",
        }
    }
}

impl fmt::Display for SignalTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Excellent => write!(f, "excellent"),
            Self::Good => write!(f, "good"),
            Self::Fair => write!(f, "fair"),
            Self::Weak => write!(f, "weak"),
        }
    }
}

impl WifiNetworkRecord {
    pub fn is_secured(&self) -> bool {
        self.capability_bits & PRIVACY != 0
    }

    pub fn band(&self) -> Option<Band> {
        Band::from_frequency_khz(self.center_frequency_khz)
    }

    pub fn channel(&self) -> Option<u8> {
        channel_from_frequency_khz(self.center_frequency_khz)
    }

    pub fn signal_tier(&self) -> SignalTier {
        SignalTier::from_percent(self.signal_percent)
    }

    pub fn capability_names(&self) -> Vec<&'static str> {
        capability_names(self.capability_bits)
    }
}
