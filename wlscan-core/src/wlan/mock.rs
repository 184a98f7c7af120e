// Scripted WLAN service that counts handle and buffer lifetimes.

use std::cell::{Cell, RefCell};
use std::collections::HashSet;
use uuid::Uuid;

use super::{WirelessInterface, WlanApi};
use crate::error::OsStatus;

#[derive(Debug, Clone)]
pub struct InterfaceScript {
    pub trigger: Result<(), OsStatus>,
    pub bss_list: Result<Vec<u8>, OsStatus>,
}

impl InterfaceScript {
    pub fn with_buffer(bytes: Vec<u8>) -> Self {
        Self {
            trigger: Ok(()),
            bss_list: Ok(bytes),
        }
    }

    pub fn failing_retrieval(status: OsStatus) -> Self {
        Self {
            trigger: Ok(()),
            bss_list: Err(status),
        }
    }

    pub fn trigger(mut self, result: Result<(), OsStatus>) -> Self {
        self.trigger = result;
        self
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Counts {
    pub opens: usize,
    pub closes: usize,
    pub allocs: usize,
    pub frees: usize,
    pub scans: usize,
}

impl Counts {
    pub fn balanced(&self) -> bool {
        self.opens == self.closes && self.allocs == self.frees
    }
}

#[derive(Debug)]
pub struct MockBuffer {
    id: usize,
    bytes: Vec<u8>,
}

#[derive(Debug, Default)]
pub struct MockWlan {
    open_error: Option<OsStatus>,
    enum_error: Option<OsStatus>,
    interfaces: Vec<(WirelessInterface, InterfaceScript)>,
    counts: Cell<Counts>,
    live_handles: RefCell<HashSet<u32>>,
    live_buffers: RefCell<HashSet<usize>>,
    next_id: Cell<usize>,
    /// Interface ids in the order their BSS list was requested.
    pub retrievals: RefCell<Vec<Uuid>>,
}

impl MockWlan {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_open(mut self, status: OsStatus) -> Self {
        self.open_error = Some(status);
        self
    }

    pub fn fail_enumeration(mut self, status: OsStatus) -> Self {
        self.enum_error = Some(status);
        self
    }

    pub fn interface(mut self, script: InterfaceScript) -> Self {
        let n = self.interfaces.len() as u128 + 1;
        let iface = WirelessInterface {
            id: Uuid::from_u128(n),
            description: format!("Mock Adapter {n}"),
        };
        self.interfaces.push((iface, script));
        self
    }

    pub fn counts(&self) -> Counts {
        self.counts.get()
    }

    fn bump(&self, f: impl FnOnce(&mut Counts)) {
        let mut counts = self.counts.get();
        f(&mut counts);
        self.counts.set(counts);
    }

    fn script(&self, interface: &WirelessInterface) -> Result<&InterfaceScript, OsStatus> {
        self.interfaces
            .iter()
            .find(|(iface, _)| iface.id == interface.id)
            .map(|(_, script)| script)
            .ok_or(OsStatus::NOT_FOUND)
    }

    fn check_handle(&self, handle: u32) {
        assert!(
            self.live_handles.borrow().contains(&handle),
            "handle {handle} used after close"
        );
    }
}

impl WlanApi for MockWlan {
    type Handle = u32;
    type Buffer = MockBuffer;

    fn open_session(&self) -> Result<u32, OsStatus> {
        if let Some(status) = self.open_error {
            return Err(status);
        }
        self.bump(|c| c.opens += 1);
        let handle = self.counts().opens as u32;
        self.live_handles.borrow_mut().insert(handle);
        Ok(handle)
    }

    fn close_session(&self, handle: u32) {
        assert!(
            self.live_handles.borrow_mut().remove(&handle),
            "handle {handle} closed twice"
        );
        self.bump(|c| c.closes += 1);
    }

    fn enumerate_interfaces(&self, handle: u32) -> Result<Vec<WirelessInterface>, OsStatus> {
        self.check_handle(handle);
        if let Some(status) = self.enum_error {
            return Err(status);
        }
        Ok(self.interfaces.iter().map(|(iface, _)| iface.clone()).collect())
    }

    fn request_scan(&self, handle: u32, interface: &WirelessInterface) -> Result<(), OsStatus> {
        self.check_handle(handle);
        self.bump(|c| c.scans += 1);
        self.script(interface)?.trigger
    }

    fn get_bss_list(
        &self,
        handle: u32,
        interface: &WirelessInterface,
    ) -> Result<MockBuffer, OsStatus> {
        self.check_handle(handle);
        self.retrievals.borrow_mut().push(interface.id);
        let bytes = self.script(interface)?.bss_list.clone()?;

        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.live_buffers.borrow_mut().insert(id);
        self.bump(|c| c.allocs += 1);
        Ok(MockBuffer { id, bytes })
    }

    fn buffer_bytes<'b>(&self, buffer: &'b MockBuffer) -> &'b [u8] {
        &buffer.bytes
    }

    fn free_buffer(&self, buffer: MockBuffer) {
        assert!(
            self.live_buffers.borrow_mut().remove(&buffer.id),
            "buffer {} freed twice",
            buffer.id
        );
        self.bump(|c| c.frees += 1);
    }
}
