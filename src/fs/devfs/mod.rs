//! Flat namespace of registered character devices

mod membuf;

pub use self::membuf::{MemBufDev, MEMBUF_CAPACITY};

use alloc::format;
use alloc::string::{String, ToString};
use alloc::sync::Arc;

use hashbrown::HashMap;
use spin::RwLock;

use super::{CharDev, File, OpenFlags};
use crate::error::{LxError, LxResult};

/// Name → device registry, standing in for the driver-framework node
/// table. Keys are unique; one entry per registered device identity,
/// each with its own store.
pub struct DevFs {
    devs: RwLock<HashMap<String, Arc<dyn CharDev>>>,
}

impl DevFs {
    /// create an empty namespace
    pub fn new() -> Self {
        DevFs {
            devs: RwLock::new(HashMap::new()),
        }
    }

    /// register a device under `name`
    pub fn add(&self, name: &str, dev: Arc<dyn CharDev>) -> LxResult {
        let mut devs = self.devs.write();
        if devs.contains_key(name) {
            return Err(LxError::EEXIST);
        }
        devs.insert(name.to_string(), dev);
        info!("devfs: registered {:?}", name);
        Ok(())
    }

    /// look up a registered device
    pub fn find(&self, name: &str) -> LxResult<Arc<dyn CharDev>> {
        self.devs.read().get(name).cloned().ok_or(LxError::ENOENT)
    }

    /// Unregister a device. Contexts already open on it keep the
    /// device alive until they are released.
    pub fn remove(&self, name: &str) -> LxResult {
        self.devs
            .write()
            .remove(name)
            .map(|_| ())
            .ok_or(LxError::ENOENT)
    }

    /// open a device node, yielding a context with a fresh cursor
    pub fn open(&self, name: &str, flags: OpenFlags) -> LxResult<Arc<File>> {
        let dev = self.find(name)?;
        File::new(dev, flags, name.to_string())
    }
}

impl Default for DevFs {
    fn default() -> Self {
        Self::new()
    }
}

/// Build a namespace of `count` independent memory buffer devices
/// named `membuf0..`, each owning its own `capacity`-byte store.
pub fn create_membuf_fs(count: usize, capacity: usize) -> LxResult<DevFs> {
    let devfs = DevFs::new();
    for i in 0..count {
        devfs.add(&format!("membuf{}", i), Arc::new(MemBufDev::new(capacity)))?;
    }
    Ok(devfs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_find_remove() {
        let devfs = DevFs::new();
        assert_eq!(devfs.add("membuf0", Arc::new(MemBufDev::default())), Ok(()));
        assert_eq!(
            devfs
                .add("membuf0", Arc::new(MemBufDev::default()))
                .unwrap_err(),
            LxError::EEXIST
        );
        assert!(devfs.find("membuf0").is_ok());
        assert_eq!(devfs.find("nosuch").unwrap_err(), LxError::ENOENT);
        assert_eq!(devfs.remove("membuf0"), Ok(()));
        assert_eq!(devfs.remove("membuf0"), Err(LxError::ENOENT));
    }

    #[test]
    fn open_yields_fresh_cursor() {
        let devfs = create_membuf_fs(1, 64).unwrap();
        let file = devfs.open("membuf0", OpenFlags::RDWR).unwrap();
        assert_eq!(file.write(b"abc"), Ok(3));
        let again = devfs.open("membuf0", OpenFlags::RDONLY).unwrap();
        let mut buf = [0u8; 3];
        assert_eq!(again.read(&mut buf), Ok(3));
        assert_eq!(&buf, b"abc");
        assert_eq!(
            devfs.open("membuf1", OpenFlags::RDWR).unwrap_err(),
            LxError::ENOENT
        );
    }

    #[test]
    fn devices_are_isolated() {
        let devfs = create_membuf_fs(2, 64).unwrap();
        let a = devfs.open("membuf0", OpenFlags::RDWR).unwrap();
        assert_eq!(a.write(b"only in zero"), Ok(12));
        // the sibling device was never written, so it has no store
        let b = devfs.open("membuf1", OpenFlags::RDWR).unwrap();
        let mut buf = [0u8; 12];
        assert_eq!(b.read(&mut buf), Ok(0));
    }

    #[test]
    fn removed_device_stays_open() {
        let devfs = create_membuf_fs(1, 64).unwrap();
        let file = devfs.open("membuf0", OpenFlags::RDWR).unwrap();
        assert_eq!(devfs.remove("membuf0"), Ok(()));
        assert_eq!(file.write(b"still here"), Ok(10));
        assert_eq!(file.release(), Ok(()));
    }

    #[test]
    fn downcasts_to_concrete_device() {
        let devfs = create_membuf_fs(1, 64).unwrap();
        let dev = devfs.find("membuf0").unwrap();
        let membuf = dev.downcast_arc::<MemBufDev>().ok().unwrap();
        assert!(!membuf.is_allocated());
    }
}
