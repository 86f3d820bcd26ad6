use crate::domain::FsError;
use crate::{Dir, File};

/// The capability contract every concrete path entity supports.
///
/// State-checking operations type-guard: when the path exists on disk and
/// its kind disagrees with the handle's declared kind, they raise
/// [`FsError::NotAFile`] or [`FsError::NotADirectory`] instead of answering.
pub trait PathEntry {
    /// The canonical path: absolute, separator-normalized, with a trailing
    /// separator for directories and none for files.
    fn path(&self) -> &str;

    /// The final path segment.
    fn name(&self) -> String;

    /// The parent directory, or `None` at the filesystem root.
    fn parent(&self) -> Option<Dir>;

    /// Whether the path exists on the filesystem.
    fn exists(&self) -> Result<bool, FsError>;

    /// Whether the path is readable.
    fn is_readable(&self) -> Result<bool, FsError>;

    /// Whether the path is writable, or could be created under the nearest
    /// existing ancestor.
    fn is_writable(&self) -> Result<bool, FsError>;

    /// Create the path if absent. Idempotent; returns `self` for chaining.
    fn touch(&self) -> Result<&Self, FsError>;

    /// Delete the path from the filesystem.
    fn delete(&self) -> Result<(), FsError>;
}

/// A listed filesystem entry: either a file or a directory.
///
/// This is the closed set of kinds the library works with; operations that
/// accept "a file or a directory" take this enum and match exhaustively.
#[derive(Debug, Clone, PartialEq)]
pub enum Entry {
    /// A file handle.
    File(File),
    /// A directory handle.
    Dir(Dir),
}

impl Entry {
    /// The canonical path of the underlying entity.
    pub fn path(&self) -> &str {
        match self {
            Entry::File(file) => file.path(),
            Entry::Dir(dir) => dir.path(),
        }
    }

    /// The final path segment of the underlying entity.
    pub fn name(&self) -> String {
        match self {
            Entry::File(file) => file.name(),
            Entry::Dir(dir) => dir.name(),
        }
    }

    /// Whether the underlying entity exists.
    pub fn exists(&self) -> Result<bool, FsError> {
        match self {
            Entry::File(file) => file.exists(),
            Entry::Dir(dir) => dir.exists(),
        }
    }

    /// Delete the underlying entity; directories are removed recursively.
    pub fn delete(&self) -> Result<(), FsError> {
        match self {
            Entry::File(file) => file.delete(),
            Entry::Dir(dir) => dir.delete(),
        }
    }

    /// Borrow the file handle, if this entry is a file.
    pub fn as_file(&self) -> Option<&File> {
        match self {
            Entry::File(file) => Some(file),
            Entry::Dir(_) => None,
        }
    }

    /// Borrow the directory handle, if this entry is a directory.
    pub fn as_dir(&self) -> Option<&Dir> {
        match self {
            Entry::Dir(dir) => Some(dir),
            Entry::File(_) => None,
        }
    }
}

impl From<File> for Entry {
    fn from(value: File) -> Self {
        Entry::File(value)
    }
}

impl From<Dir> for Entry {
    fn from(value: Dir) -> Self {
        Entry::Dir(value)
    }
}
