//! Filesystem abstraction used when loading dictionary resources.
//!
//! The loader only needs to open a path and read it to the end, so a
//! [`Filesystem`] can be the real one ([`Fs`]) or an in-memory map
//! ([`memory::MemoryFs`]) standing in for it.
use std::fmt::Debug;
use std::io::{Read, Result};
use std::path::Path;

/// Opens named resources for reading.
pub trait Filesystem {
    /// Handle type returned by [`Filesystem::open`]
    type File: File;

    /// Opens `path` for reading.
    fn open<P: AsRef<Path>>(&self, path: P) -> Result<Self::File>;

    /// Whether `path` names an existing resource.
    fn exists<P: AsRef<Path>>(&self, path: P) -> bool;
}

/// A readable resource.
pub trait File: Read + Debug {}

impl File for std::fs::File {}

/// The operating system filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct Fs;

impl Filesystem for Fs {
    type File = std::fs::File;

    #[inline(always)]
    fn open<P: AsRef<Path>>(&self, path: P) -> Result<Self::File> {
        std::fs::File::open(&path)
    }

    #[inline(always)]
    fn exists<P: AsRef<Path>>(&self, path: P) -> bool {
        path.as_ref().is_file()
    }
}

pub mod memory {
    //! In-memory filesystem.
    use hashbrown::HashMap;
    use std::io::{Cursor, Read, Result};
    use std::path::{Path, PathBuf};
    use std::sync::Arc;

    /// A file held in memory.
    #[derive(Debug)]
    pub struct File(Cursor<Arc<[u8]>>);

    impl Read for File {
        fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
            self.0.read(buf)
        }
    }

    impl super::File for File {}

    /// Maps paths to byte contents.
    #[derive(Debug, Default, Clone)]
    pub struct MemoryFs {
        files: HashMap<PathBuf, Arc<[u8]>>,
    }

    impl MemoryFs {
        /// An empty filesystem.
        pub fn new() -> MemoryFs {
            MemoryFs::default()
        }

        /// Adds (or replaces) the file at `path`.
        pub fn insert<P: Into<PathBuf>, B: AsRef<[u8]>>(&mut self, path: P, contents: B) {
            self.files.insert(path.into(), Arc::from(contents.as_ref()));
        }

        /// Builder form of [`MemoryFs::insert`].
        pub fn with_file<P: Into<PathBuf>, B: AsRef<[u8]>>(mut self, path: P, contents: B) -> Self {
            self.insert(path, contents);
            self
        }
    }

    impl super::Filesystem for MemoryFs {
        type File = File;

        fn open<P: AsRef<Path>>(&self, path: P) -> Result<Self::File> {
            match self.files.get(path.as_ref()) {
                Some(bytes) => Ok(File(Cursor::new(Arc::clone(bytes)))),
                None => Err(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "not found",
                )),
            }
        }

        fn exists<P: AsRef<Path>>(&self, path: P) -> bool {
            self.files.contains_key(path.as_ref())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::memory::MemoryFs;
    use super::*;

    #[test]
    fn memory_roundtrip() {
        let fs = MemoryFs::new().with_file("dict.txt", "cat: k-ae1-t | nn\n");
        assert!(fs.exists("dict.txt"));
        assert!(!fs.exists("other.txt"));

        let mut s = String::new();
        fs.open("dict.txt").unwrap().read_to_string(&mut s).unwrap();
        assert_eq!(s, "cat: k-ae1-t | nn\n");

        let err = fs.open("other.txt").unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::NotFound);
    }
}
