// Byte layout of WLAN_BSS_LIST / WLAN_BSS_ENTRY (wlanapi.h), natural alignment.

/// dwTotalSize, dwNumberOfItems
pub const HEADER_SIZE: usize = 8;
pub const TOTAL_SIZE: usize = 0;
pub const RECORD_COUNT: usize = 4;

/// sizeof(WLAN_BSS_ENTRY)
pub const RECORD_STRIDE: usize = 360;

pub const SSID_LENGTH: usize = 0;
pub const SSID: usize = 4;
pub const SSID_CAPACITY: usize = 32;
pub const PHY_ID: usize = 36;
pub const BSSID: usize = 40;
// 2 bytes padding after the BSSID
pub const BSS_TYPE: usize = 48;
pub const PHY_TYPE: usize = 52;
pub const RSSI: usize = 56;
pub const LINK_QUALITY: usize = 60;
pub const IN_REG_DOMAIN: usize = 64;
// 1 byte padding
pub const BEACON_PERIOD: usize = 66;
// 4 bytes padding to align the 64-bit timestamps
pub const TIMESTAMP: usize = 72;
pub const HOST_TIMESTAMP: usize = 80;
pub const CAPABILITY: usize = 88;
// 2 bytes padding
pub const CENTER_FREQUENCY: usize = 92;
pub const RATE_SET_LENGTH: usize = 96;
pub const RATE_SET: usize = 100;
/// DOT11_RATE_SET_MAX_LENGTH
pub const RATE_SET_CAPACITY: usize = 126;
pub const IE_OFFSET: usize = 352;
pub const IE_SIZE: usize = 356;

const _: () = assert!(RATE_SET + RATE_SET_CAPACITY * 2 == IE_OFFSET);
const _: () = assert!(IE_SIZE + 4 == RECORD_STRIDE);

/// Byte offset of record `index` inside the list.
pub fn record_offset(index: usize) -> usize {
    HEADER_SIZE + index * RECORD_STRIDE
}
