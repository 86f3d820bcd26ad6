use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::time::SystemTime;

use crate::ports::Filesystem;

/// Filesystem adapter backed by `std::fs`.
///
/// Every operation opens, acts and closes around itself; no descriptors are
/// held across calls. Permission checks on Unix inspect the owner bits of
/// the on-disk mode, so a `0o444` file reports unwritable even for a
/// privileged process.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdFilesystem;

impl StdFilesystem {
    /// Create a new `StdFilesystem`.
    pub fn new() -> StdFilesystem {
        StdFilesystem
    }
}

#[cfg(unix)]
fn has_owner_bit(path: &Path, bit: u32) -> bool {
    use std::os::unix::fs::PermissionsExt;
    fs::metadata(path).map(|meta| meta.permissions().mode() & bit != 0).unwrap_or(false)
}

impl Filesystem for StdFilesystem {
    fn exists(&self, path: &Path) -> bool {
        fs::metadata(path).is_ok()
    }

    fn is_file(&self, path: &Path) -> bool {
        fs::metadata(path).map(|meta| meta.is_file()).unwrap_or(false)
    }

    fn is_dir(&self, path: &Path) -> bool {
        fs::metadata(path).map(|meta| meta.is_dir()).unwrap_or(false)
    }

    #[cfg(unix)]
    fn is_readable(&self, path: &Path) -> bool {
        has_owner_bit(path, 0o400)
    }

    #[cfg(not(unix))]
    fn is_readable(&self, path: &Path) -> bool {
        fs::metadata(path).is_ok()
    }

    #[cfg(unix)]
    fn is_writable(&self, path: &Path) -> bool {
        has_owner_bit(path, 0o200)
    }

    #[cfg(not(unix))]
    fn is_writable(&self, path: &Path) -> bool {
        fs::metadata(path).map(|meta| !meta.permissions().readonly()).unwrap_or(false)
    }

    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        fs::read(path)
    }

    fn write(&self, path: &Path, data: &[u8], append: bool) -> io::Result<()> {
        let mut options = OpenOptions::new();
        if append {
            options.append(true);
        } else {
            options.write(true).truncate(true);
        }
        let mut file = options.create(true).open(path)?;
        file.write_all(data)
    }

    fn touch_file(&self, path: &Path) -> io::Result<()> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        file.set_modified(SystemTime::now())
    }

    fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
        fs::rename(from, to)
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        fs::remove_file(path)
    }

    #[cfg(unix)]
    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        use std::os::unix::fs::DirBuilderExt;
        fs::DirBuilder::new().recursive(true).mode(0o775).create(path)
    }

    #[cfg(not(unix))]
    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        fs::create_dir_all(path)
    }

    fn remove_dir(&self, path: &Path) -> io::Result<()> {
        fs::remove_dir(path)
    }

    fn list_dir(&self, path: &Path) -> io::Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(path)? {
            names.push(entry?.file_name().to_string_lossy().into_owned());
        }
        names.sort();
        Ok(names)
    }

    fn file_size(&self, path: &Path) -> io::Result<u64> {
        Ok(fs::metadata(path)?.len())
    }

    fn modified(&self, path: &Path) -> io::Result<SystemTime> {
        fs::metadata(path)?.modified()
    }

    fn accessed(&self, path: &Path) -> io::Result<SystemTime> {
        fs::metadata(path)?.accessed()
    }
}
