/*!
 * WLAN Service Boundary
 * Session, interface and buffer ownership over the native wireless API
 */

#[cfg(test)]
pub mod mock;
#[cfg(windows)]
pub mod native;
#[cfg(not(windows))]
pub mod unavailable;

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;
use uuid::Uuid;

use crate::error::{OsStatus, ScanError};

#[cfg(windows)]
pub type SystemWlan = native::NativeWlan;
#[cfg(not(windows))]
pub type SystemWlan = unavailable::UnavailableWlan;

/// One wireless adapter known to the WLAN service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WirelessInterface {
    pub id: Uuid,
    pub description: String,
}

impl fmt::Display for WirelessInterface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.description.is_empty() {
            write!(f, "{}", self.id)
        } else {
            write!(f, "{} ({})", self.description, self.id)
        }
    }
}

/// Raw operations of the OS wireless service. Callers go through
/// [`Session`] and [`BssBuffer`], which pair every open with a close and
/// every buffer with a free.
pub trait WlanApi {
    type Handle: Copy + fmt::Debug;
    type Buffer;

    fn open_session(&self) -> Result<Self::Handle, OsStatus>;
    fn close_session(&self, handle: Self::Handle);
    fn enumerate_interfaces(
        &self,
        handle: Self::Handle,
    ) -> Result<Vec<WirelessInterface>, OsStatus>;
    /// Fire-and-forget; success only means the request was accepted.
    fn request_scan(
        &self,
        handle: Self::Handle,
        interface: &WirelessInterface,
    ) -> Result<(), OsStatus>;
    fn get_bss_list(
        &self,
        handle: Self::Handle,
        interface: &WirelessInterface,
    ) -> Result<Self::Buffer, OsStatus>;
    fn buffer_bytes<'b>(&self, buffer: &'b Self::Buffer) -> &'b [u8];
    fn free_buffer(&self, buffer: Self::Buffer);
}

/// Open WLAN client handle, closed exactly once.
pub struct Session<'a, A: WlanApi> {
    api: &'a A,
    handle: A::Handle,
    open: bool,
}

impl<'a, A: WlanApi> Session<'a, A> {
    pub fn open(api: &'a A) -> Result<Self, ScanError> {
        let handle = api.open_session().map_err(ScanError::Session)?;
        debug!(?handle, "WLAN session opened");
        Ok(Self {
            api,
            handle,
            open: true,
        })
    }

    pub fn interfaces(&self) -> Result<Vec<WirelessInterface>, ScanError> {
        self.api
            .enumerate_interfaces(self.handle)
            .map_err(ScanError::Enumeration)
    }

    pub fn trigger_scan(&self, interface: &WirelessInterface) -> Result<(), ScanError> {
        self.api
            .request_scan(self.handle, interface)
            .map_err(|status| ScanError::ScanTrigger {
                interface: interface.id,
                status,
            })
    }

    pub fn bss_buffer(&self, interface: &WirelessInterface) -> Result<BssBuffer<'_, A>, ScanError> {
        let buffer = self
            .api
            .get_bss_list(self.handle, interface)
            .map_err(|status| ScanError::Retrieval {
                interface: interface.id,
                status,
            })?;
        Ok(BssBuffer {
            api: self.api,
            buffer: Some(buffer),
        })
    }

    pub fn close(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if self.open {
            self.open = false;
            self.api.close_session(self.handle);
            debug!(handle = ?self.handle, "WLAN session closed");
        }
    }
}

impl<A: WlanApi> Drop for Session<'_, A> {
    fn drop(&mut self) {
        self.release();
    }
}

/// OS-allocated BSS list, freed exactly once when dropped.
pub struct BssBuffer<'a, A: WlanApi> {
    api: &'a A,
    buffer: Option<A::Buffer>,
}

impl<A: WlanApi> BssBuffer<'_, A> {
    pub fn bytes(&self) -> &[u8] {
        match &self.buffer {
            Some(buffer) => self.api.buffer_bytes(buffer),
            None => &[],
        }
    }
}

impl<A: WlanApi> Drop for BssBuffer<'_, A> {
    fn drop(&mut self) {
        if let Some(buffer) = self.buffer.take() {
            self.api.free_buffer(buffer);
        }
    }
}
