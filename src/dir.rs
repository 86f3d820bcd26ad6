//! Directory handles: listing, recursive traversal, clearing and removal.

use std::fmt;
use std::path::Path;

use globset::{Glob, GlobMatcher};

use crate::Fs;
use crate::domain::{Entry, FsError, PathEntry};

/// A directory on the filesystem, existing or not yet created.
///
/// The canonical path always carries exactly one trailing separator. A
/// directory handle keeps no state beyond the path; every operation
/// re-queries the filesystem.
#[derive(Debug, Clone)]
pub struct Dir {
    fs: Fs,
    path: String,
}

/// Compile a brace-expansion-capable glob for matching entry names.
fn compile(pattern: &str) -> Result<GlobMatcher, FsError> {
    let glob = Glob::new(pattern)
        .map_err(|err| FsError::InvalidArgument(format!("bad glob pattern `{pattern}`: {err}")))?;
    Ok(glob.compile_matcher())
}

impl Dir {
    pub(crate) fn from_canonical(fs: Fs, path: String) -> Dir {
        Dir { fs, path }
    }

    /// The canonical path, with trailing separator.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The directory name: the final path segment.
    pub fn name(&self) -> String {
        let separator = self.fs.resolver().os().separator();
        let trimmed = self.path.trim_end_matches(separator);
        if trimmed.is_empty() {
            return self.path.clone();
        }
        trimmed.rsplit(separator).next().unwrap_or(trimmed).to_string()
    }

    /// The parent directory, or `None` at the filesystem root.
    pub fn parent(&self) -> Option<Dir> {
        let parent = self.fs.resolver().parent_of(&self.path)?;
        Some(Dir::from_canonical(self.fs.clone(), parent))
    }

    /// Whether this directory is the filesystem root for the current OS
    /// drive.
    pub fn is_root(&self) -> bool {
        self.fs.resolver().os().is_root_path(&self.path)
    }

    /// The path in the form handed to the OS: the trailing separator is
    /// dropped except at the root itself.
    fn sys_string(&self) -> String {
        if self.is_root() {
            return self.path.clone();
        }
        let separator = self.fs.resolver().os().separator();
        self.path.trim_end_matches(separator).to_string()
    }

    /// Type guard: the path must not exist as anything other than a
    /// directory.
    fn assert_is_dir(&self) -> Result<(), FsError> {
        let sys = self.sys_string();
        let fs = self.fs.filesystem();
        if fs.exists(Path::new(&sys)) && !fs.is_dir(Path::new(&sys)) {
            return Err(FsError::NotADirectory(self.path.clone()));
        }
        Ok(())
    }

    /// Whether the directory exists.
    pub fn exists(&self) -> Result<bool, FsError> {
        self.assert_is_dir()?;
        Ok(self.fs.filesystem().is_dir(Path::new(&self.sys_string())))
    }

    /// Whether the directory is readable.
    pub fn is_readable(&self) -> Result<bool, FsError> {
        self.assert_is_dir()?;
        Ok(self.fs.filesystem().is_readable(Path::new(&self.sys_string())))
    }

    /// Whether the directory is writable, or could be created: for a
    /// not-yet-existing path the nearest existing ancestor decides.
    pub fn is_writable(&self) -> Result<bool, FsError> {
        self.assert_is_dir()?;

        let mut current = self.clone();
        loop {
            if current.exists()? {
                return Ok(self.fs.filesystem().is_writable(Path::new(&current.sys_string())));
            }
            if current.is_root() {
                return Ok(false);
            }
            match current.parent() {
                Some(parent) => current = parent,
                None => return Ok(false),
            }
        }
    }

    /// Create the directory chain, parents included, if absent. Idempotent.
    pub fn touch(&self) -> Result<&Dir, FsError> {
        if !self.exists()? {
            if !self.is_writable()? {
                return Err(FsError::PathNotWritable(self.path.clone()));
            }
            self.fs
                .filesystem()
                .create_dir_all(Path::new(&self.sys_string()))
                .map_err(|_| FsError::PathNotWritable(self.path.clone()))?;
        }
        Ok(self)
    }

    /// Delete the directory and everything inside it.
    pub fn delete(&self) -> Result<(), FsError> {
        self.assert_is_dir()?;
        if !self.exists()? {
            return Err(FsError::NotADirectory(self.path.clone()));
        }
        if !self.is_writable()? {
            return Err(FsError::PathNotWritable(self.path.clone()));
        }

        self.clear(&[])?;
        self.fs
            .filesystem()
            .remove_dir(Path::new(&self.sys_string()))
            .map_err(|_| FsError::PathNotWritable(self.path.clone()))
    }

    /// All immediate children, in lexicographic order.
    pub fn list(&self) -> Result<Vec<Entry>, FsError> {
        self.find("*")
    }

    /// Immediate children whose names match the pattern, classified as
    /// files or directories by querying the filesystem.
    ///
    /// Patterns support `*`/`?` wildcards and `{a,b}` brace alternation.
    pub fn find(&self, pattern: &str) -> Result<Vec<Entry>, FsError> {
        self.assert_is_dir()?;
        if !self.is_readable()? {
            return Err(FsError::PathNotReadable(self.path.clone()));
        }

        let matcher = compile(pattern)?;
        let names = self
            .fs
            .filesystem()
            .list_dir(Path::new(&self.sys_string()))
            .map_err(|_| FsError::PathNotReadable(self.path.clone()))?;

        let separator = self.fs.resolver().os().separator();
        let mut entries = Vec::new();
        for name in names {
            if !matcher.is_match(&name) {
                continue;
            }
            let child = format!("{}{}", self.path, name);
            if self.fs.filesystem().is_dir(Path::new(&child)) {
                entries.push(Entry::Dir(Dir::from_canonical(
                    self.fs.clone(),
                    format!("{child}{separator}"),
                )));
            } else {
                entries.push(Entry::File(crate::File::from_canonical(self.fs.clone(), child)));
            }
        }
        Ok(entries)
    }

    /// Depth-first pre-order search: matches at this level come first, then
    /// each subdirectory is recursed in discovery order. The pattern is
    /// applied independently at every level, and a matching subdirectory is
    /// both listed and descended into.
    pub fn find_recursive(&self, pattern: &str) -> Result<Vec<Entry>, FsError> {
        let mut found = self.find(pattern)?;

        for child in self.list()? {
            if let Entry::Dir(subdir) = child {
                found.extend(subdir.find_recursive(pattern)?);
            }
        }
        Ok(found)
    }

    /// Delete the directory's contents but not the directory itself.
    ///
    /// A child whose name matches any exclude pattern is left in place;
    /// directories among the children are deleted recursively.
    pub fn clear(&self, exclude: &[&str]) -> Result<(), FsError> {
        let keep: Vec<GlobMatcher> =
            exclude.iter().map(|pattern| compile(pattern)).collect::<Result<_, _>>()?;

        for entry in self.list()? {
            if keep.iter().any(|matcher| matcher.is_match(entry.name())) {
                continue;
            }
            entry.delete()?;
        }
        Ok(())
    }

    /// Place an entry inside this directory.
    ///
    /// A file's bytes are copied to `self/<name>` and the given handle is
    /// re-pointed at the new location. Directory payloads are reserved for
    /// future work and rejected rather than silently ignored.
    pub fn write(&self, entry: &mut Entry, overwrite: bool) -> Result<&Dir, FsError> {
        if !self.is_writable()? {
            return Err(FsError::PathNotWritable(self.path.clone()));
        }

        match entry {
            Entry::File(file) => {
                self.touch()?;
                if !file.exists()? {
                    return Err(FsError::PathNotFound(file.path().to_string()));
                }

                let destination = format!("{}{}", self.path, file.base_name());
                if !overwrite && self.fs.filesystem().exists(Path::new(&destination)) {
                    return Err(FsError::PathExists(destination));
                }

                let data = file.read()?;
                self.fs
                    .filesystem()
                    .write(Path::new(&destination), &data, false)
                    .map_err(|_| FsError::PathNotWritable(destination.clone()))?;

                file.reinit_at(destination);
                Ok(self)
            }
            Entry::Dir(_) => Err(FsError::InvalidArgument(
                "writing a directory into a directory is not yet supported".to_string(),
            )),
        }
    }
}

impl PathEntry for Dir {
    fn path(&self) -> &str {
        self.path()
    }

    fn name(&self) -> String {
        self.name()
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

impl fmt::Display for Dir {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)
    }
}

impl PartialEq for Dir {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path
    }
}
