/*!
 * BSS List Decoder
 * Walks the OS buffer as a header plus fixed-stride packed records
 */

pub mod layout;
pub mod reader;

use byteorder::{ByteOrder, LittleEndian};
use chrono::{DateTime, Local};
use tracing::{debug, warn};

use crate::error::{BufferCorruption, RecordDecodeError};
use crate::network::{
    signal_percent, BssType, Bssid, PhyType, Rate, WifiNetworkRecord, HIDDEN_NETWORK,
    MAX_SIGNAL_DBM, MIN_SIGNAL_DBM,
};
use layout::*;
pub use reader::ByteReader;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Upper bound on the declared record count; larger counts mark the
    /// buffer as corrupt.
    pub max_records: u32,
    /// Accept a `total_size` larger than the records need. The OS appends
    /// information-element blobs after the entries.
    pub allow_trailing_data: bool,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            max_records: 100,
            allow_trailing_data: false,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct DecodedList {
    pub records: Vec<WifiNetworkRecord>,
    /// Records dropped during field extraction.
    pub rejected: usize,
}

/// Decode a raw BSS list. Header problems reject the whole buffer; a bad
/// record is logged and skipped.
pub fn decode_bss_list(
    bytes: &[u8],
    options: &DecodeOptions,
) -> Result<DecodedList, BufferCorruption> {
    if bytes.len() < HEADER_SIZE {
        return Err(BufferCorruption::TooShort {
            len: bytes.len(),
            header: HEADER_SIZE,
        });
    }

    let total_size = LittleEndian::read_u32(&bytes[TOTAL_SIZE..]);
    let count = LittleEndian::read_u32(&bytes[RECORD_COUNT..]);

    if count > options.max_records {
        return Err(BufferCorruption::TooManyRecords {
            count,
            max: options.max_records,
        });
    }

    let expected = HEADER_SIZE as u64 + u64::from(count) * RECORD_STRIDE as u64;
    let consistent = if options.allow_trailing_data {
        u64::from(total_size) >= expected
    } else {
        u64::from(total_size) == expected
    };
    if !consistent {
        return Err(BufferCorruption::SizeMismatch {
            total_size,
            expected,
        });
    }

    if total_size as usize > bytes.len() {
        return Err(BufferCorruption::Truncated {
            total_size,
            len: bytes.len(),
        });
    }

    debug!(total_size, count, "decoding BSS list");

    let last_seen = Local::now();
    let mut decoded = DecodedList {
        records: Vec::with_capacity(count as usize),
        rejected: 0,
    };

    for index in 0..count as usize {
        let offset = record_offset(index);
        let result = bytes
            .get(offset..offset + RECORD_STRIDE)
            .ok_or(RecordDecodeError::OutOfBounds {
                offset,
                width: RECORD_STRIDE,
                len: bytes.len(),
            })
            .and_then(|record| decode_record(ByteReader::new(record), last_seen));

        match result {
            Ok(record) => {
                debug!(
                    index,
                    ssid = %record.ssid,
                    bssid = %record.bssid,
                    rssi = record.signal_dbm,
                    "decoded BSS entry"
                );
                decoded.records.push(record);
            }
            Err(e) => {
                warn!(index, offset, "skipping BSS entry: {}", e);
                decoded.rejected += 1;
            }
        }
    }

    Ok(decoded)
}

/// Extract one `WLAN_BSS_ENTRY`.
pub fn decode_record(
    reader: ByteReader<'_>,
    last_seen: DateTime<Local>,
) -> Result<WifiNetworkRecord, RecordDecodeError> {
    let ssid_len = reader.u32(SSID_LENGTH)?;
    if ssid_len as usize > SSID_CAPACITY {
        return Err(RecordDecodeError::SsidTooLong(ssid_len));
    }
    let ssid = decode_ssid(reader.slice(SSID, ssid_len as usize)?);

    let bssid = Bssid(reader.array::<6>(BSSID)?);

    let raw_bss_type = reader.u32(BSS_TYPE)?;
    let bss_type =
        BssType::from_raw(raw_bss_type).ok_or(RecordDecodeError::UnknownBssType(raw_bss_type))?;
    let phy_type = PhyType::from_raw(reader.u32(PHY_TYPE)?);

    let signal_dbm = reader.i32(RSSI)?;
    if !(MIN_SIGNAL_DBM..=MAX_SIGNAL_DBM).contains(&signal_dbm) {
        return Err(RecordDecodeError::SignalOutOfRange(signal_dbm));
    }

    Ok(WifiNetworkRecord {
        ssid,
        bssid,
        interface_phy_id: reader.u32(PHY_ID)?,
        bss_type,
        phy_type,
        signal_dbm,
        signal_percent: signal_percent(signal_dbm),
        link_quality_percent: reader.u32(LINK_QUALITY)?,
        in_regulatory_domain: reader.u8(IN_REG_DOMAIN)? != 0,
        beacon_interval: reader.u16(BEACON_PERIOD)?,
        capability_bits: reader.u16(CAPABILITY)?,
        center_frequency_khz: reader.u32(CENTER_FREQUENCY)?,
        supported_rates: decode_rates(&reader)?,
        timestamp: reader.u64(TIMESTAMP)?,
        ie_offset: reader.u32(IE_OFFSET)?,
        ie_size: reader.u32(IE_SIZE)?,
        last_seen,
    })
}

fn decode_ssid(raw: &[u8]) -> String {
    let text = String::from_utf8_lossy(raw);
    if text.trim().is_empty() {
        HIDDEN_NETWORK.to_string()
    } else {
        text.into_owned()
    }
}

// uRateSetLength counts bytes; stop at capacity or the first zero entry.
fn decode_rates(reader: &ByteReader<'_>) -> Result<Vec<Rate>, RecordDecodeError> {
    let declared = reader.u32(RATE_SET_LENGTH)? as usize / 2;
    let entries = declared.min(RATE_SET_CAPACITY);

    let mut rates = Vec::with_capacity(entries);
    for i in 0..entries {
        let raw = reader.u16(RATE_SET + i * 2)?;
        if raw == 0 {
            break;
        }
        rates.push(Rate(raw));
    }
    Ok(rates)
}
