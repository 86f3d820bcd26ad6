use std::io;

use thiserror::Error;

/// Library-wide error type for filesystem entity operations.
///
/// Every variant carries the path it concerns (or a description of the
/// offending argument). Errors are raised synchronously to the immediate
/// caller; nothing is retried or logged internally.
#[derive(Debug, Error)]
pub enum FsError {
    /// An operation received a value outside its accepted kind set.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A directory handle's path exists on disk but is not a directory.
    #[error("The supplied path `{0}` is not a directory.")]
    NotADirectory(String),

    /// A file handle's path exists on disk but is not a file.
    #[error("The supplied path `{0}` is not a file.")]
    NotAFile(String),

    /// The destination already exists and the overwrite policy forbids it.
    #[error("The supplied path `{0}` already exists.")]
    PathExists(String),

    /// An explicit must-exist check failed.
    #[error("The supplied path `{0}` was not found on the filesystem.")]
    PathNotFound(String),

    /// A read or list was attempted without read permission, or the
    /// underlying read call failed.
    #[error("The supplied path `{0}` is not readable.")]
    PathNotReadable(String),

    /// A write, touch, delete or move was attempted without write
    /// permission, or the underlying call failed.
    #[error("The supplied path `{0}` is not writable.")]
    PathNotWritable(String),

    /// The host OS identifier matched neither supported family.
    ///
    /// Practically unreachable: detection defaults to Unix. The kind exists
    /// so callers can branch exhaustively over the taxonomy.
    #[error("Unsupported OS as described with {0}")]
    UnsupportedOs(String),
}

impl FsError {
    /// Provide an `io::ErrorKind`-like view for callers expecting legacy behavior.
    pub fn kind(&self) -> io::ErrorKind {
        match self {
            FsError::InvalidArgument(_) | FsError::UnsupportedOs(_) => io::ErrorKind::InvalidInput,
            FsError::NotADirectory(_) => io::ErrorKind::NotADirectory,
            FsError::NotAFile(_) => io::ErrorKind::IsADirectory,
            FsError::PathExists(_) => io::ErrorKind::AlreadyExists,
            FsError::PathNotFound(_) => io::ErrorKind::NotFound,
            FsError::PathNotReadable(_) | FsError::PathNotWritable(_) => {
                io::ErrorKind::PermissionDenied
            }
        }
    }

    /// The path the error concerns, when one applies.
    pub fn path(&self) -> Option<&str> {
        match self {
            FsError::InvalidArgument(_) => None,
            FsError::NotADirectory(path)
            | FsError::NotAFile(path)
            | FsError::PathExists(path)
            | FsError::PathNotFound(path)
            | FsError::PathNotReadable(path)
            | FsError::PathNotWritable(path) => Some(path),
            FsError::UnsupportedOs(_) => None,
        }
    }
}
