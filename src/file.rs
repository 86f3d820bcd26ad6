//! File handles: whole-file I/O, lazy metadata and the copy/move protocol.

use std::fmt;
use std::path::Path;
use std::time::SystemTime;

use crate::Fs;
use crate::domain::{FsError, PathEntry};
use crate::ports::MimeLookup;
use crate::{Dir, PathArg};

/// Where a copy or move should land: a literal path, an existing file
/// handle, or a directory the source file name is placed inside.
#[derive(Debug, Clone)]
pub enum Destination {
    /// A raw path, resolved against the source handle's context.
    Path(PathArg),
    /// A concrete file handle.
    File(File),
    /// A directory; the destination file keeps the source's name.
    Dir(Dir),
}

impl From<&str> for Destination {
    fn from(value: &str) -> Self {
        Destination::Path(value.into())
    }
}

impl From<String> for Destination {
    fn from(value: String) -> Self {
        Destination::Path(value.into())
    }
}

impl From<&File> for Destination {
    fn from(value: &File) -> Self {
        Destination::File(value.clone())
    }
}

impl From<&Dir> for Destination {
    fn from(value: &Dir) -> Self {
        Destination::Dir(value.clone())
    }
}

/// Metadata loaded lazily from the filesystem and the MIME lookup.
///
/// Each field is independently absent: enrichment failures leave the field
/// unset instead of raising, so callers get partial metadata.
#[derive(Debug, Clone, Default)]
struct FileMeta {
    size: Option<u64>,
    mime_type: Option<String>,
    mime_extension: Option<String>,
}

/// A file on the filesystem, existing or not yet created.
///
/// The canonical path never carries a trailing separator. Each handle owns
/// its metadata cache exclusively; two handles for the same on-disk path can
/// disagree until reloaded.
#[derive(Debug, Clone)]
pub struct File {
    fs: Fs,
    path: String,
    meta: FileMeta,
}

impl File {
    pub(crate) fn from_canonical(fs: Fs, path: String) -> File {
        File { fs, path, meta: FileMeta::default() }
    }

    /// Re-point this handle at a new canonical path, dropping cached
    /// metadata. Used after copy and move.
    fn reinit(&mut self, path: String) {
        self.path = path;
        self.meta = FileMeta::default();
    }

    pub(crate) fn reinit_at(&mut self, path: String) {
        self.reinit(path);
    }

    /// The canonical path, without trailing separator.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The file name including extension.
    pub fn base_name(&self) -> String {
        let separator = self.fs.resolver().os().separator();
        self.path.rsplit(separator).next().unwrap_or_default().to_string()
    }

    /// The file name without extension.
    pub fn stem(&self) -> String {
        let base = self.base_name();
        match base.rsplit_once('.') {
            Some((stem, _)) if !stem.is_empty() => stem.to_string(),
            _ => base,
        }
    }

    /// The extension taken from the file name, if any. No I/O involved.
    pub fn extension(&self) -> Option<String> {
        match self.base_name().rsplit_once('.') {
            Some((stem, extension)) if !stem.is_empty() => Some(extension.to_string()),
            _ => None,
        }
    }

    /// The parent directory, or `None` in the degenerate root case.
    pub fn parent(&self) -> Option<Dir> {
        let parent = self.fs.resolver().parent_of(&self.path)?;
        Some(Dir::from_canonical(self.fs.clone(), parent))
    }

    fn sys_path(&self) -> &Path {
        Path::new(&self.path)
    }

    /// Type guard: the path must not exist as anything other than a file.
    fn assert_is_file(&self) -> Result<(), FsError> {
        let fs = self.fs.filesystem();
        if fs.exists(self.sys_path()) && !fs.is_file(self.sys_path()) {
            return Err(FsError::NotAFile(self.path.clone()));
        }
        Ok(())
    }

    /// Whether the file exists.
    pub fn exists(&self) -> Result<bool, FsError> {
        self.assert_is_file()?;
        Ok(self.fs.filesystem().is_file(self.sys_path()))
    }

    /// Whether the file is readable.
    pub fn is_readable(&self) -> Result<bool, FsError> {
        self.assert_is_file()?;
        Ok(self.fs.filesystem().is_readable(self.sys_path()))
    }

    /// Whether the file is writable, or could be created: a file that does
    /// not exist yet inherits writability from its nearest existing
    /// ancestor directory.
    pub fn is_writable(&self) -> Result<bool, FsError> {
        self.assert_is_file()?;
        let fs = self.fs.filesystem();
        if fs.is_writable(self.sys_path()) {
            return Ok(true);
        }
        if fs.is_file(self.sys_path()) {
            return Ok(false);
        }
        match self.parent() {
            Some(parent) => parent.is_writable(),
            None => Ok(false),
        }
    }

    /// Read the whole file.
    ///
    /// Any failure, including an OS-level read error on a file that looked
    /// readable, is reported as [`FsError::PathNotReadable`].
    pub fn read(&self) -> Result<Vec<u8>, FsError> {
        if !self.is_readable()? {
            return Err(FsError::PathNotReadable(self.path.clone()));
        }
        self.fs
            .filesystem()
            .read(self.sys_path())
            .map_err(|_| FsError::PathNotReadable(self.path.clone()))
    }

    /// Write data, replacing any existing content. Creates the file and its
    /// parent directories as needed.
    pub fn write(&self, data: impl AsRef<[u8]>) -> Result<(), FsError> {
        self.put(data.as_ref(), false)
    }

    /// Append data to the end of the file. Creates the file and its parent
    /// directories as needed.
    pub fn append(&self, data: impl AsRef<[u8]>) -> Result<(), FsError> {
        self.put(data.as_ref(), true)
    }

    fn put(&self, data: &[u8], append: bool) -> Result<(), FsError> {
        self.touch()?;
        if !self.is_writable()? {
            return Err(FsError::PathNotWritable(self.path.clone()));
        }
        self.fs
            .filesystem()
            .write(self.sys_path(), data, append)
            .map_err(|_| FsError::PathNotWritable(self.path.clone()))
    }

    /// Create the file if absent, otherwise stamp its modification time.
    /// Parent directories are created on demand. Idempotent.
    pub fn touch(&self) -> Result<&File, FsError> {
        self.assert_is_file()?;
        if !self.is_writable()? {
            return Err(FsError::PathNotWritable(self.path.clone()));
        }

        // A parent that turns out not to be a directory is tolerated here;
        // the stamp below fails on its own if the chain is unusable.
        if let Some(parent) = self.parent() {
            match parent.touch() {
                Ok(_) | Err(FsError::NotADirectory(_)) => {}
                Err(err) => return Err(err),
            }
        }

        self.fs
            .filesystem()
            .touch_file(self.sys_path())
            .map_err(|_| FsError::PathNotWritable(self.path.clone()))?;
        Ok(self)
    }

    /// Delete the file.
    ///
    /// A missing file and an unwritable file fail the same way, with
    /// [`FsError::PathNotWritable`].
    pub fn delete(&self) -> Result<(), FsError> {
        if self.exists()? && self.is_writable()? {
            self.fs
                .filesystem()
                .remove_file(self.sys_path())
                .map_err(|_| FsError::PathNotWritable(self.path.clone()))
        } else {
            Err(FsError::PathNotWritable(self.path.clone()))
        }
    }

    fn resolve_destination(&self, destination: Destination) -> File {
        match destination {
            Destination::Path(arg) => self.fs.file(arg),
            Destination::File(file) => file,
            Destination::Dir(dir) => {
                // Canonical directory paths end with the separator.
                self.fs.file(format!("{}{}", dir.path(), self.base_name()))
            }
        }
    }

    /// Copy the file to a destination.
    ///
    /// On success this handle is re-pointed at the destination: the same
    /// in-memory object now represents the copy, while the source stays on
    /// disk. Callers that need the old location should keep its path first.
    pub fn copy_to(
        &mut self,
        destination: impl Into<Destination>,
        overwrite: bool,
    ) -> Result<&mut File, FsError> {
        let destination = self.resolve_destination(destination.into());

        if !self.exists()? {
            return Err(FsError::NotAFile(self.path.clone()));
        }
        if destination.exists()? && !overwrite {
            return Err(FsError::PathExists(destination.path.clone()));
        }
        if !self.is_readable()? {
            return Err(FsError::PathNotReadable(self.path.clone()));
        }

        if let Some(parent) = destination.parent() {
            parent.touch()?;
        }
        if !destination.is_writable()? {
            return Err(FsError::PathNotWritable(destination.path.clone()));
        }

        destination.write(self.read()?)?;

        self.reinit(destination.path);
        Ok(self)
    }

    /// Move the file to a destination.
    ///
    /// Unlike copy there is no overwrite option: an existing destination is
    /// always [`FsError::PathExists`]. On success this handle is re-pointed
    /// at the destination and the old path no longer exists on disk.
    pub fn move_to(&mut self, destination: impl Into<Destination>) -> Result<&mut File, FsError> {
        self.assert_is_file()?;
        let destination = self.resolve_destination(destination.into());

        if !self.exists()? {
            return Err(FsError::NotAFile(self.path.clone()));
        }
        if destination.exists()? {
            return Err(FsError::PathExists(destination.path.clone()));
        }
        if !self.is_readable()? {
            return Err(FsError::PathNotReadable(self.path.clone()));
        }
        if !self.is_writable()? {
            return Err(FsError::PathNotWritable(self.path.clone()));
        }

        if let Some(parent) = destination.parent() {
            parent.touch()?;
        }
        if !destination.is_writable()? {
            return Err(FsError::PathNotWritable(destination.path.clone()));
        }

        self.fs
            .filesystem()
            .rename(self.sys_path(), destination.sys_path())
            .map_err(|_| FsError::PathNotWritable(destination.path.clone()))?;

        self.reinit(destination.path);
        Ok(self)
    }

    /// Load the stat- and MIME-derived metadata once, memoized until the
    /// handle is re-pointed. Enrichment failures leave fields unset.
    fn load(&mut self) {
        if self.meta.size.is_some()
            && self.meta.mime_type.is_some()
            && self.meta.mime_extension.is_some()
        {
            return;
        }
        if !matches!(self.exists(), Ok(true)) {
            return;
        }

        let size = self.fs.filesystem().file_size(self.sys_path()).ok();
        let mime_type = self.fs.mime().mime_for_path(self.sys_path()).map(normalize_sniffed_mime);
        let mime_extension = mime_type.as_deref().and_then(|mime| {
            File::validate_mime_extension(self.fs.mime(), mime, self.extension().as_deref())
        });

        self.meta.size = size;
        self.meta.mime_type = mime_type;
        self.meta.mime_extension = mime_extension;
    }

    /// The file size in bytes, or `None` while the file does not exist or
    /// the stat failed.
    pub fn size(&mut self) -> Option<u64> {
        self.load();
        self.meta.size
    }

    /// The detected MIME type, or `None` while undetectable.
    pub fn mime_type(&mut self) -> Option<String> {
        self.load();
        self.meta.mime_type.clone()
    }

    /// The extension derived from the detected MIME type, corrected for
    /// known sniffer false positives.
    pub fn extension_from_mime(&mut self) -> Option<String> {
        self.load();
        self.meta.mime_extension.clone()
    }

    /// Look up the canonical extension for a MIME type, keeping the named
    /// extension where the sniffer is known to misreport: SVG content
    /// detected as HTML stays `svg`.
    pub fn validate_mime_extension(
        lookup: &dyn MimeLookup,
        mime: &str,
        extension: Option<&str>,
    ) -> Option<String> {
        let mime_extension = lookup.extension_for_mime(mime)?;
        if let Some(named) = extension
            && named.eq_ignore_ascii_case("svg")
            && mime_extension.eq_ignore_ascii_case("html")
        {
            return Some(named.to_string());
        }
        Some(mime_extension)
    }

    /// The last modification time.
    pub fn last_modified(&self) -> Result<SystemTime, FsError> {
        self.fs
            .filesystem()
            .modified(self.sys_path())
            .map_err(|_| FsError::PathNotReadable(self.path.clone()))
    }

    /// The last access time.
    pub fn last_accessed(&self) -> Result<SystemTime, FsError> {
        self.fs
            .filesystem()
            .accessed(self.sys_path())
            .map_err(|_| FsError::PathNotReadable(self.path.clone()))
    }
}

/// Correct known sniffer quirks in a raw MIME answer.
fn normalize_sniffed_mime(mime: String) -> String {
    match mime.as_str() {
        "image/svg" => "image/svg+xml".to_string(),
        _ => mime,
    }
}

impl PathEntry for File {
    fn path(&self) -> &str {
        self.path()
    }

    fn name(&self) -> String {
        self.base_name()
    }

    fn parent(&self) -> Option<Dir> {
        self.parent()
    }

    fn exists(&self) -> Result<bool, FsError> {
        self.exists()
    }

    fn is_readable(&self) -> Result<bool, FsError> {
        self.is_readable()
    }

    fn is_writable(&self) -> Result<bool, FsError> {
        self.is_writable()
    }

    fn touch(&self) -> Result<&Self, FsError> {
        self.touch()
    }

    fn delete(&self) -> Result<(), FsError> {
        self.delete()
    }
}

impl fmt::Display for File {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)
    }
}

impl PartialEq for File {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path
    }
}
