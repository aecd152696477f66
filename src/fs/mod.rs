//! Character devices and their open-file surface

use crate::error::*;
use downcast_rs::{impl_downcast, DowncastSync};

pub mod devfs;
mod file;

pub use self::file::*;

/// Character device operation set
///
/// The external registration layer dispatches open/read/write/release
/// calls into this trait. Offsets and transfer lengths are computed
/// here; moving bytes across an address-space boundary stays with the
/// caller, which hands in plain slices.
pub trait CharDev: DowncastSync + core::fmt::Debug {
    /// prepare the device for a new open context
    fn open(&self, flags: OpenFlags) -> LxResult;
    /// read from the device at given offset
    fn read_at(&self, offset: u64, buf: &mut [u8]) -> LxResult<usize>;
    /// write to the device at given offset
    fn write_at(&self, offset: u64, buf: &[u8]) -> LxResult<usize>;
    /// maximum addressable size in bytes, fixed for the device lifetime
    fn capacity(&self) -> usize;
    /// hook called when an open context is closed by its owner
    fn release(&self) -> LxResult {
        Ok(())
    }
}

impl_downcast!(sync CharDev);
