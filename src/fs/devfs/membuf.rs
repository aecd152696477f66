//! Memory buffer character device

use alloc::vec::Vec;

use spin::Mutex;

use crate::error::{LxError, LxResult};
use crate::fs::{CharDev, OpenFlags};

/// Default store size of a memory buffer device, in bytes.
pub const MEMBUF_CAPACITY: usize = 1024;

/// Fixed-capacity in-memory buffer device.
///
/// The store does not exist until the first write allocates it; a
/// write-only open discards it again. Once allocated the whole
/// capacity is addressable, zero-filled where nothing was written.
/// All storage state changes and byte copies happen under one lock;
/// cursors live with each open context and stay outside it.
#[derive(Debug)]
pub struct MemBufDev {
    /// maximum addressable size, fixed for the device lifetime
    capacity: usize,
    /// backing storage, `None` until the first write
    data: Mutex<Option<Vec<u8>>>,
}

impl MemBufDev {
    /// create a device with the given store capacity
    pub fn new(capacity: usize) -> Self {
        MemBufDev {
            capacity,
            data: Mutex::new(None),
        }
    }

    /// whether backing storage currently exists
    pub fn is_allocated(&self) -> bool {
        self.data.lock().is_some()
    }

    /// Offset and length actually covered by an access of `requested`
    /// bytes at `offset`. A position at or past the end covers nothing
    /// rather than underflowing the remaining span.
    fn span_at(&self, offset: u64, requested: usize) -> (usize, usize) {
        if offset >= self.capacity as u64 {
            return (0, 0);
        }
        let pos = offset as usize;
        (pos, requested.min(self.capacity - pos))
    }
}

impl Default for MemBufDev {
    fn default() -> Self {
        Self::new(MEMBUF_CAPACITY)
    }
}

impl CharDev for MemBufDev {
    fn open(&self, flags: OpenFlags) -> LxResult {
        if flags.writable() && !flags.readable() {
            // a write-only open starts from an empty store
            *self.data.lock() = None;
        }
        info!("membuf open: flags={:?}", flags);
        Ok(())
    }

    fn read_at(&self, offset: u64, buf: &mut [u8]) -> LxResult<usize> {
        let guard = self.data.lock();
        let data = match guard.as_ref() {
            Some(data) => data,
            None => {
                info!("membuf read_at: offset={} len={} unallocated", offset, buf.len());
                return Ok(0);
            }
        };
        let (pos, len) = self.span_at(offset, buf.len());
        buf[..len].copy_from_slice(&data[pos..pos + len]);
        info!(
            "membuf read_at: offset={} len={} transferred={}",
            offset,
            buf.len(),
            len
        );
        Ok(len)
    }

    fn write_at(&self, offset: u64, buf: &[u8]) -> LxResult<usize> {
        let mut guard = self.data.lock();
        if guard.is_none() {
            let mut storage = Vec::new();
            storage.try_reserve_exact(self.capacity)?;
            storage.resize(self.capacity, 0);
            *guard = Some(storage);
            info!("membuf: allocated {} bytes", self.capacity);
        }
        let data = guard.as_mut().ok_or(LxError::ENOMEM)?;
        let (pos, len) = self.span_at(offset, buf.len());
        data[pos..pos + len].copy_from_slice(&buf[..len]);
        info!(
            "membuf write_at: offset={} len={} transferred={}",
            offset,
            buf.len(),
            len
        );
        Ok(len)
    }

    fn capacity(&self) -> usize {
        self.capacity
    }

    fn release(&self) -> LxResult {
        info!("membuf release");
        Ok(())
    }
}
