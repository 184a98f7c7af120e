/*!
 * Native WiFi API Backend
 * wlanapi.dll session, enumeration, scan and BSS list calls
 */

use byteorder::{ByteOrder, LittleEndian};
use std::ffi::c_void;
use std::ptr::{self, NonNull};
use uuid::Uuid;

use super::{WirelessInterface, WlanApi};
use crate::decode::layout::{HEADER_SIZE, TOTAL_SIZE};
use crate::error::OsStatus;

const WLAN_CLIENT_VERSION_2: u32 = 2;
const DOT11_BSS_TYPE_ANY: u32 = 3;
const ERROR_SUCCESS: u32 = 0;

// WLAN_INTERFACE_INFO_LIST: dwNumberOfItems, dwIndex, then entries of
// { GUID, WCHAR[256] description, WLAN_INTERFACE_STATE }.
const INTERFACE_LIST_HEADER: usize = 8;
const INTERFACE_INFO_SIZE: usize = 532;
const GUID_SIZE: usize = 16;
const DESCRIPTION_UNITS: usize = 256;

type Handle = *mut c_void;

#[repr(C, align(4))]
struct RawGuid([u8; GUID_SIZE]);

impl RawGuid {
    fn from_uuid(id: &Uuid) -> Self {
        Self(id.to_bytes_le())
    }
}

#[link(name = "wlanapi")]
extern "system" {
    fn WlanOpenHandle(
        client_version: u32,
        reserved: *const c_void,
        negotiated_version: *mut u32,
        client_handle_out: *mut Handle,
    ) -> u32;

    fn WlanCloseHandle(client_handle: Handle, reserved: *const c_void) -> u32;

    fn WlanEnumInterfaces(
        client_handle: Handle,
        reserved: *const c_void,
        interface_list: *mut *mut u8,
    ) -> u32;

    fn WlanScan(
        client_handle: Handle,
        interface_guid: *const RawGuid,
        ssid: *const c_void,
        ie_data: *const c_void,
        reserved: *const c_void,
    ) -> u32;

    fn WlanGetNetworkBssList(
        client_handle: Handle,
        interface_guid: *const RawGuid,
        ssid: *const c_void,
        bss_type: u32,
        security_enabled: i32,
        reserved: *const c_void,
        bss_list: *mut *mut u8,
    ) -> u32;

    fn WlanFreeMemory(memory: *mut c_void);
}

fn check(status: u32) -> Result<(), OsStatus> {
    if status == ERROR_SUCCESS {
        Ok(())
    } else {
        Err(OsStatus(status))
    }
}

#[derive(Debug, Clone, Copy)]
pub struct NativeHandle(Handle);

/// BSS list allocated by `WlanGetNetworkBssList`.
#[derive(Debug)]
pub struct NativeBuffer {
    ptr: NonNull<u8>,
    len: usize,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NativeWlan;

impl NativeWlan {
    pub fn new() -> Self {
        Self
    }
}

impl WlanApi for NativeWlan {
    type Handle = NativeHandle;
    type Buffer = NativeBuffer;

    fn open_session(&self) -> Result<NativeHandle, OsStatus> {
        let mut negotiated = 0u32;
        let mut handle: Handle = ptr::null_mut();
        // SAFETY: out-pointers reference live locals.
        check(unsafe {
            WlanOpenHandle(WLAN_CLIENT_VERSION_2, ptr::null(), &mut negotiated, &mut handle)
        })?;
        tracing::debug!(negotiated, "wlanapi client version negotiated");
        Ok(NativeHandle(handle))
    }

    fn close_session(&self, handle: NativeHandle) {
        // SAFETY: the handle came from WlanOpenHandle and Session closes it once.
        let status = unsafe { WlanCloseHandle(handle.0, ptr::null()) };
        if let Err(status) = check(status) {
            tracing::warn!("WlanCloseHandle failed: {}", status);
        }
    }

    fn enumerate_interfaces(
        &self,
        handle: NativeHandle,
    ) -> Result<Vec<WirelessInterface>, OsStatus> {
        let mut list: *mut u8 = ptr::null_mut();
        // SAFETY: valid handle and out-pointer.
        check(unsafe { WlanEnumInterfaces(handle.0, ptr::null(), &mut list) })?;
        let list = NonNull::new(list).ok_or(OsStatus::NOT_ENOUGH_MEMORY)?;

        // SAFETY: the list starts with an 8-byte header followed by
        // dwNumberOfItems fixed-size entries, all owned by the OS until freed.
        let interfaces = unsafe {
            let header = std::slice::from_raw_parts(list.as_ptr(), INTERFACE_LIST_HEADER);
            let count = LittleEndian::read_u32(header) as usize;
            let len = INTERFACE_LIST_HEADER + count * INTERFACE_INFO_SIZE;
            let bytes = std::slice::from_raw_parts(list.as_ptr(), len);
            parse_interface_list(bytes, count)
        };

        // SAFETY: allocated by WlanEnumInterfaces, freed exactly once here.
        unsafe { WlanFreeMemory(list.as_ptr().cast()) };
        Ok(interfaces)
    }

    fn request_scan(
        &self,
        handle: NativeHandle,
        interface: &WirelessInterface,
    ) -> Result<(), OsStatus> {
        let guid = RawGuid::from_uuid(&interface.id);
        // SAFETY: guid outlives the call; optional SSID/IE pointers are null.
        check(unsafe { WlanScan(handle.0, &guid, ptr::null(), ptr::null(), ptr::null()) })
    }

    fn get_bss_list(
        &self,
        handle: NativeHandle,
        interface: &WirelessInterface,
    ) -> Result<NativeBuffer, OsStatus> {
        let guid = RawGuid::from_uuid(&interface.id);
        let mut list: *mut u8 = ptr::null_mut();
        // SAFETY: guid and out-pointer outlive the call.
        check(unsafe {
            WlanGetNetworkBssList(
                handle.0,
                &guid,
                ptr::null(),
                DOT11_BSS_TYPE_ANY,
                0,
                ptr::null(),
                &mut list,
            )
        })?;
        let ptr = NonNull::new(list).ok_or(OsStatus::NOT_ENOUGH_MEMORY)?;

        // SAFETY: WLAN_BSS_LIST always begins with dwTotalSize, which covers
        // the whole allocation.
        let total = unsafe {
            let header = std::slice::from_raw_parts(ptr.as_ptr(), HEADER_SIZE);
            LittleEndian::read_u32(&header[TOTAL_SIZE..]) as usize
        };
        Ok(NativeBuffer {
            ptr,
            len: total.max(HEADER_SIZE),
        })
    }

    fn buffer_bytes<'b>(&self, buffer: &'b NativeBuffer) -> &'b [u8] {
        // SAFETY: the allocation stays live until free_buffer consumes it.
        unsafe { std::slice::from_raw_parts(buffer.ptr.as_ptr(), buffer.len) }
    }

    fn free_buffer(&self, buffer: NativeBuffer) {
        // SAFETY: allocated by WlanGetNetworkBssList; BssBuffer frees it once.
        unsafe { WlanFreeMemory(buffer.ptr.as_ptr().cast()) };
    }
}

fn parse_interface_list(bytes: &[u8], count: usize) -> Vec<WirelessInterface> {
    (0..count)
        .filter_map(|i| {
            let start = INTERFACE_LIST_HEADER + i * INTERFACE_INFO_SIZE;
            let entry = bytes.get(start..start + INTERFACE_INFO_SIZE)?;
            let guid: [u8; GUID_SIZE] = entry[..GUID_SIZE].try_into().ok()?;
            let units: Vec<u16> = entry[GUID_SIZE..GUID_SIZE + DESCRIPTION_UNITS * 2]
                .chunks_exact(2)
                .map(LittleEndian::read_u16)
                .take_while(|&unit| unit != 0)
                .collect();
            Some(WirelessInterface {
                id: Uuid::from_bytes_le(guid),
                description: String::from_utf16_lossy(&units),
            })
        })
        .collect()
}
