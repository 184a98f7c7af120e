/*!
 * Scan Error Taxonomy
 * Failures the pipeline absorbs or isolates instead of propagating
 */

use std::fmt;
use thiserror::Error;
use uuid::Uuid;

/// Win32 status code returned by the WLAN service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OsStatus(pub u32);

impl OsStatus {
    pub const INVALID_HANDLE: OsStatus = OsStatus(6);
    pub const NOT_ENOUGH_MEMORY: OsStatus = OsStatus(8);
    pub const NOT_SUPPORTED: OsStatus = OsStatus(50);
    pub const INVALID_PARAMETER: OsStatus = OsStatus(87);
    pub const NDIS_DOT11_POWER_STATE_INVALID: OsStatus = OsStatus(0x8034_2002);
    pub const SERVICE_NOT_ACTIVE: OsStatus = OsStatus(1062);
    pub const NOT_FOUND: OsStatus = OsStatus(1168);
    pub const REMOTE_SESSION_LIMIT_EXCEEDED: OsStatus = OsStatus(1220);

    fn describe(self) -> Option<&'static str> {
        match self {
            Self::INVALID_HANDLE => Some("invalid handle"),
            Self::NOT_ENOUGH_MEMORY => Some("not enough memory"),
            Self::NOT_SUPPORTED => Some("not supported"),
            Self::INVALID_PARAMETER => Some("invalid parameter"),
            Self::NDIS_DOT11_POWER_STATE_INVALID => Some("radio is powered off"),
            Self::SERVICE_NOT_ACTIVE => Some("WLAN service is not running"),
            Self::NOT_FOUND => Some("interface not found"),
            Self::REMOTE_SESSION_LIMIT_EXCEEDED => Some("too many open WLAN handles"),
            _ => None,
        }
    }
}

impl fmt::Display for OsStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.describe() {
            Some(text) => write!(f, "error {} ({})", self.0, text),
            None => write!(f, "error {}", self.0),
        }
    }
}

/// Interface- and session-level failures.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("cannot open WLAN session: {0}")]
    Session(OsStatus),

    #[error("cannot enumerate wireless interfaces: {0}")]
    Enumeration(OsStatus),

    #[error("scan request for {interface} was not accepted: {status}")]
    ScanTrigger { interface: Uuid, status: OsStatus },

    #[error("cannot retrieve BSS list for {interface}: {status}")]
    Retrieval { interface: Uuid, status: OsStatus },

    #[error("corrupt BSS list: {0}")]
    BufferCorruption(#[from] BufferCorruption),
}

/// Header-level sanity failures. Any of these drops the whole buffer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BufferCorruption {
    #[error("buffer holds {len} bytes, shorter than the {header}-byte header")]
    TooShort { len: usize, header: usize },

    #[error("record count {count} exceeds the limit of {max}")]
    TooManyRecords { count: u32, max: u32 },

    #[error("total size {total_size} does not match {expected} bytes for the declared records")]
    SizeMismatch { total_size: u32, expected: u64 },

    #[error("total size {total_size} exceeds the {len} bytes available")]
    Truncated { total_size: u32, len: usize },
}

/// Per-record failures. The record is dropped and decoding moves on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordDecodeError {
    #[error("read of {width} bytes at offset {offset} runs past the {len}-byte record")]
    OutOfBounds { offset: usize, width: usize, len: usize },

    #[error("SSID length {0} exceeds 32 bytes")]
    SsidTooLong(u32),

    #[error("signal {0} dBm is outside -100..=0")]
    SignalOutOfRange(i32),

    #[error("unknown BSS type {0}")]
    UnknownBssType(u32),
}
