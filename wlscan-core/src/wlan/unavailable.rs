/*!
 * Unavailable WLAN Service
 * Stand-in for targets without the native wireless API
 */

use super::{WirelessInterface, WlanApi};
use crate::error::OsStatus;

/// Every session open fails, so scans degrade to an empty result.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableWlan;

impl UnavailableWlan {
    pub fn new() -> Self {
        Self
    }
}

impl WlanApi for UnavailableWlan {
    type Handle = ();
    type Buffer = Vec<u8>;

    fn open_session(&self) -> Result<(), OsStatus> {
        Err(OsStatus::NOT_SUPPORTED)
    }

    fn close_session(&self, _handle: ()) {}

    fn enumerate_interfaces(&self, _handle: ()) -> Result<Vec<WirelessInterface>, OsStatus> {
        Err(OsStatus::NOT_SUPPORTED)
    }

    fn request_scan(&self, _handle: (), _interface: &WirelessInterface) -> Result<(), OsStatus> {
        Err(OsStatus::NOT_SUPPORTED)
    }

    fn get_bss_list(
        &self,
        _handle: (),
        _interface: &WirelessInterface,
    ) -> Result<Vec<u8>, OsStatus> {
        Err(OsStatus::NOT_SUPPORTED)
    }

    fn buffer_bytes<'b>(&self, buffer: &'b Vec<u8>) -> &'b [u8] {
        buffer
    }

    fn free_buffer(&self, _buffer: Vec<u8>) {}
}
