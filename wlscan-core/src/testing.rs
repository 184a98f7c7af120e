// Synthetic WLAN_BSS_LIST buffers for tests.

use byteorder::{ByteOrder, LittleEndian};

use crate::decode::layout::*;

#[derive(Debug, Clone)]
pub struct EntryBuilder {
    bytes: Vec<u8>,
}

impl EntryBuilder {
    /// Infrastructure ERP entry at -60 dBm on channel 6.
    pub fn new(ssid: &str, bssid: [u8; 6]) -> Self {
        let mut entry = Self {
            bytes: vec![0u8; RECORD_STRIDE],
        };
        let raw = ssid.as_bytes();
        entry.bytes[SSID..SSID + raw.len()].copy_from_slice(raw);
        entry
            .ssid_len(raw.len() as u32)
            .bssid(bssid)
            .bss_type(1)
            .phy_type(6)
            .rssi(-60)
            .link_quality(80)
            .beacon_period(100)
            .capability(0x0001)
            .frequency_khz(2_437_000)
    }

    fn put_u32(mut self, offset: usize, value: u32) -> Self {
        LittleEndian::write_u32(&mut self.bytes[offset..], value);
        self
    }

    fn put_u16(mut self, offset: usize, value: u16) -> Self {
        LittleEndian::write_u16(&mut self.bytes[offset..], value);
        self
    }

    pub fn ssid_len(self, len: u32) -> Self {
        self.put_u32(SSID_LENGTH, len)
    }

    pub fn bssid(mut self, bssid: [u8; 6]) -> Self {
        self.bytes[BSSID..BSSID + 6].copy_from_slice(&bssid);
        self
    }

    pub fn phy_id(self, id: u32) -> Self {
        self.put_u32(PHY_ID, id)
    }

    pub fn bss_type(self, raw: u32) -> Self {
        self.put_u32(BSS_TYPE, raw)
    }

    pub fn phy_type(self, raw: u32) -> Self {
        self.put_u32(PHY_TYPE, raw)
    }

    pub fn rssi(self, dbm: i32) -> Self {
        self.put_u32(RSSI, dbm as u32)
    }

    pub fn link_quality(self, quality: u32) -> Self {
        self.put_u32(LINK_QUALITY, quality)
    }

    pub fn reg_domain(mut self, flag: bool) -> Self {
        self.bytes[IN_REG_DOMAIN] = u8::from(flag);
        self
    }

    pub fn beacon_period(self, tu: u16) -> Self {
        self.put_u16(BEACON_PERIOD, tu)
    }

    pub fn timestamp(mut self, tsf: u64) -> Self {
        LittleEndian::write_u64(&mut self.bytes[TIMESTAMP..], tsf);
        self
    }

    pub fn capability(self, bits: u16) -> Self {
        self.put_u16(CAPABILITY, bits)
    }

    pub fn frequency_khz(self, khz: u32) -> Self {
        self.put_u32(CENTER_FREQUENCY, khz)
    }

    pub fn rates(mut self, rates: &[u16]) -> Self {
        for (i, rate) in rates.iter().take(RATE_SET_CAPACITY).enumerate() {
            LittleEndian::write_u16(&mut self.bytes[RATE_SET + i * 2..], *rate);
        }
        self.rate_set_len((rates.len() * 2) as u32)
    }

    pub fn rate_set_len(self, bytes: u32) -> Self {
        self.put_u32(RATE_SET_LENGTH, bytes)
    }

    pub fn ie(self, offset: u32, size: u32) -> Self {
        self.put_u32(IE_OFFSET, offset).put_u32(IE_SIZE, size)
    }
}

#[derive(Debug, Clone, Default)]
pub struct ListBuilder {
    entries: Vec<EntryBuilder>,
    total_size: Option<u32>,
    record_count: Option<u32>,
}

impl ListBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entry(mut self, entry: EntryBuilder) -> Self {
        self.entries.push(entry);
        self
    }

    /// Override the header's total size.
    pub fn total_size(mut self, total: u32) -> Self {
        self.total_size = Some(total);
        self
    }

    /// Override the header's record count.
    pub fn record_count(mut self, count: u32) -> Self {
        self.record_count = Some(count);
        self
    }

    pub fn build(self) -> Vec<u8> {
        let natural = HEADER_SIZE + self.entries.len() * RECORD_STRIDE;
        let mut bytes = vec![0u8; HEADER_SIZE];
        LittleEndian::write_u32(
            &mut bytes[TOTAL_SIZE..],
            self.total_size.unwrap_or(natural as u32),
        );
        LittleEndian::write_u32(
            &mut bytes[RECORD_COUNT..],
            self.record_count.unwrap_or(self.entries.len() as u32),
        );
        for entry in self.entries {
            bytes.extend_from_slice(&entry.bytes);
        }
        bytes
    }
}
