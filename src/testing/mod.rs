//! In-memory test doubles. The fakes live behind the same ports the
//! production adapters implement, so entity tests never touch the disk.

mod memory_filesystem;

use std::sync::Arc;

pub use memory_filesystem::{MemoryFilesystem, StaticMimeLookup};

use crate::domain::{OsFamily, PathArg};
use crate::{Dir, File, Fs};

/// An [`Fs`] wired to in-memory fakes, with direct access to them for
/// seeding state and flipping permission flags.
pub struct TestFs {
    fs: Fs,
    filesystem: Arc<MemoryFilesystem>,
    mime: Arc<StaticMimeLookup>,
}

#[allow(dead_code)]
impl TestFs {
    pub fn file(&self, path: impl Into<PathArg>) -> File {
        self.fs.file(path)
    }

    pub fn dir(&self, path: impl Into<PathArg>) -> Dir {
        self.fs.dir(path)
    }

    pub fn root(&self) -> Dir {
        self.fs.root()
    }

    pub fn fs(&self) -> &Fs {
        &self.fs
    }

    pub fn filesystem_fake(&self) -> &MemoryFilesystem {
        &self.filesystem
    }

    pub fn mime_fake(&self) -> &StaticMimeLookup {
        &self.mime
    }
}

fn build(os: OsFamily, base: &str) -> TestFs {
    let filesystem = Arc::new(MemoryFilesystem::new(os.separator()));
    let mime = Arc::new(StaticMimeLookup::new());
    let fs = Fs::with_ports(base, os, filesystem.clone(), mime.clone());
    TestFs { fs, filesystem, mime }
}

/// A Unix-family context over fresh in-memory fakes.
pub fn memory_fs(base: &str) -> TestFs {
    build(OsFamily::Unix, base)
}

/// A Windows-family context over fresh in-memory fakes.
pub fn memory_fs_windows(base: &str) -> TestFs {
    build(OsFamily::Windows, base)
}
