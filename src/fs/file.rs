//! File handle for an open character device

use alloc::string::String;
use alloc::sync::Arc;
use core::convert::TryFrom;

use spin::RwLock;

use super::CharDev;
use crate::error::{LxError, LxResult};

bitflags::bitflags! {
    /// File open flags
    pub struct OpenFlags: usize {
        /// read only
        const RDONLY = 0;
        /// write only
        const WRONLY = 1;
        /// read write
        const RDWR = 2;
    }
}

impl OpenFlags {
    /// check if the OpenFlags is readable
    pub fn readable(self) -> bool {
        let b = self.bits() & 0b11;
        b == Self::RDONLY.bits() || b == Self::RDWR.bits()
    }
    /// check if the OpenFlags is writable
    pub fn writable(self) -> bool {
        let b = self.bits() & 0b11;
        b == Self::WRONLY.bits() || b == Self::RDWR.bits()
    }
}

numeric_enum_macro::numeric_enum! {
    #[repr(u8)]
    #[derive(Eq, PartialEq, Debug, Copy, Clone)]
    /// Seek origin selector as delivered by the dispatch layer
    pub enum Whence {
        /// offset from the start of the device
        Set = 0,
        /// offset from the current cursor
        Cur = 1,
        /// offset from the device capacity
        End = 2,
    }
}

/// file seek type
#[derive(Debug, Eq, PartialEq, Copy, Clone)]
pub enum SeekFrom {
    /// seek from start point
    Start(u64),
    /// seek from end
    End(i64),
    /// seek from current
    Current(i64),
}

impl SeekFrom {
    /// Decode a raw `(offset, whence)` pair from the dispatch boundary.
    /// Anything but the three recognized origins is rejected.
    pub fn from_raw(offset: i64, whence: u8) -> LxResult<Self> {
        let pos = match Whence::try_from(whence).map_err(|_| LxError::EINVAL)? {
            Whence::Set => SeekFrom::Start(offset as u64),
            Whence::End => SeekFrom::End(offset),
            Whence::Cur => SeekFrom::Current(offset),
        };
        Ok(pos)
    }
}

/// file inner mut data struct
#[derive(Debug)]
struct FileInner {
    /// cursor position for read/write
    offset: i64,
    /// file open options
    flags: OpenFlags,
    /// backing device, shared with every other open on it
    dev: Arc<dyn CharDev>,
}

/// An open context on a character device.
///
/// Each open carries its own cursor; the device behind it is shared.
/// The access mode is consulted by the device's open hook only.
/// Per-call read/write permission checks belong to the dispatch
/// layer, so a write-only open can still observe a truncated device
/// through a 0-byte read.
#[derive(Debug)]
pub struct File {
    /// device node path
    path: String,
    /// file inner mut data
    inner: RwLock<FileInner>,
}

impl File {
    /// Create a file struct over `dev`, running its open hook.
    /// The cursor starts at 0.
    pub fn new(dev: Arc<dyn CharDev>, flags: OpenFlags, path: String) -> LxResult<Arc<Self>> {
        dev.open(flags)?;
        Ok(Arc::new(File {
            path,
            inner: RwLock::new(FileInner {
                offset: 0,
                flags,
                dev,
            }),
        }))
    }

    /// Returns the file path.
    pub fn path(&self) -> &String {
        &self.path
    }

    /// file open options
    pub fn flags(&self) -> OpenFlags {
        self.inner.read().flags
    }

    /// read from the device at the cursor, advancing it by the
    /// transferred length
    pub fn read(&self, buf: &mut [u8]) -> LxResult<usize> {
        let mut inner = self.inner.write();
        let len = inner.dev.read_at(inner.offset as u64, buf)?;
        inner.offset += len as i64;
        Ok(len)
    }

    /// write to the device at the cursor, advancing it by the
    /// transferred length
    pub fn write(&self, buf: &[u8]) -> LxResult<usize> {
        let mut inner = self.inner.write();
        let len = inner.dev.write_at(inner.offset as u64, buf)?;
        inner.offset += len as i64;
        Ok(len)
    }

    /// read from the device at given offset, cursor unchanged
    pub fn read_at(&self, offset: u64, buf: &mut [u8]) -> LxResult<usize> {
        self.inner.read().dev.read_at(offset, buf)
    }

    /// write to the device at given offset, cursor unchanged
    pub fn write_at(&self, offset: u64, buf: &[u8]) -> LxResult<usize> {
        self.inner.read().dev.write_at(offset, buf)
    }

    /// Seek from given type and offset.
    ///
    /// The candidate position must land in `[0, capacity]`; anything
    /// else is rejected and the cursor keeps its prior value.
    pub fn seek(&self, pos: SeekFrom) -> LxResult<i64> {
        let mut inner = self.inner.write();
        let capacity = inner.dev.capacity() as i64;
        let target = match pos {
            SeekFrom::Start(offset) => i64::try_from(offset).map_err(|_| LxError::EINVAL)?,
            SeekFrom::End(offset) => capacity.checked_add(offset).ok_or(LxError::EINVAL)?,
            SeekFrom::Current(offset) => {
                inner.offset.checked_add(offset).ok_or(LxError::EINVAL)?
            }
        };
        if target < 0 || target > capacity {
            return Err(LxError::EINVAL);
        }
        info!("lseek: path={:?}, pos={:?} -> {}", self.path, pos, target);
        inner.offset = target;
        Ok(target)
    }

    /// release hook, forwarded to the device
    pub fn release(&self) -> LxResult {
        info!("release: path={:?}", self.path);
        self.inner.read().dev.release()
    }
}
