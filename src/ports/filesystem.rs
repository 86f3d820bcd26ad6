//! OS filesystem capability.
//!
//! This port is the only way entities reach the real filesystem. It exposes
//! raw primitives and raw `io::Result`s; normalizing failures into the typed
//! error taxonomy is the entities' job, not the adapter's.

use std::io;
use std::path::Path;
use std::time::SystemTime;

/// Port for the OS filesystem primitives the entities consume.
///
/// All paths are absolute and separator-normalized. Implementations perform
/// no retries and hold no file descriptors across calls.
pub trait Filesystem {
    /// Whether anything exists at the path.
    fn exists(&self, path: &Path) -> bool;

    /// Whether the path is a regular file.
    fn is_file(&self, path: &Path) -> bool;

    /// Whether the path is a directory.
    fn is_dir(&self, path: &Path) -> bool;

    /// Whether the path grants read permission. Absent paths are unreadable.
    fn is_readable(&self, path: &Path) -> bool;

    /// Whether the path grants write permission. Absent paths are unwritable;
    /// inheritance from existing ancestors is decided above this port.
    fn is_writable(&self, path: &Path) -> bool;

    /// Read the whole file.
    fn read(&self, path: &Path) -> io::Result<Vec<u8>>;

    /// Write the whole file, appending or overwriting. Creates the file if
    /// absent; does not create parent directories.
    fn write(&self, path: &Path, data: &[u8], append: bool) -> io::Result<()>;

    /// Create the file if absent, otherwise stamp its modification time.
    fn touch_file(&self, path: &Path) -> io::Result<()>;

    /// Rename a file.
    fn rename(&self, from: &Path, to: &Path) -> io::Result<()>;

    /// Remove a file.
    fn remove_file(&self, path: &Path) -> io::Result<()>;

    /// Create a directory and all missing ancestors, group-writable but not
    /// world-writable where the platform distinguishes.
    fn create_dir_all(&self, path: &Path) -> io::Result<()>;

    /// Remove an empty directory.
    fn remove_dir(&self, path: &Path) -> io::Result<()>;

    /// Entry names directly inside a directory, in lexicographic order.
    fn list_dir(&self, path: &Path) -> io::Result<Vec<String>>;

    /// Size of a file in bytes.
    fn file_size(&self, path: &Path) -> io::Result<u64>;

    /// Last modification time.
    fn modified(&self, path: &Path) -> io::Result<SystemTime>;

    /// Last access time.
    fn accessed(&self, path: &Path) -> io::Result<SystemTime>;
}
