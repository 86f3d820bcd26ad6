use std::fmt;
use std::sync::Arc;

use crate::domain::{FsError, OsFamily, PathArg, PathResolver};
use crate::ports::{Filesystem, MimeLookup};
use crate::services::{MimeGuessLookup, StdFilesystem};
use crate::{Dir, File};

/// Entry point bundling the path resolver with the filesystem and MIME
/// collaborators. Cheap to clone; every entity handle carries one.
///
/// The base root for relative paths is an explicit constructor parameter —
/// the library never derives it from its own location.
#[derive(Clone)]
pub struct Fs {
    inner: Arc<Inner>,
}

struct Inner {
    resolver: PathResolver,
    filesystem: Arc<dyn Filesystem>,
    mime: Arc<dyn MimeLookup>,
}

impl Fs {
    /// Create a context for the host OS with the given base root, using the
    /// `std::fs` adapter and the extension-table MIME lookup.
    pub fn new(base: impl AsRef<str>) -> Fs {
        Fs::with_ports(
            base,
            OsFamily::detect(),
            Arc::new(StdFilesystem::new()),
            Arc::new(MimeGuessLookup::new()),
        )
    }

    /// Create a context rooted at the current working directory.
    pub fn current() -> Result<Fs, FsError> {
        let cwd = std::env::current_dir().map_err(|_| FsError::PathNotFound(".".to_string()))?;
        Ok(Fs::new(cwd.to_string_lossy()))
    }

    /// Create a context with explicit collaborators and OS family.
    pub fn with_ports(
        base: impl AsRef<str>,
        os: OsFamily,
        filesystem: Arc<dyn Filesystem>,
        mime: Arc<dyn MimeLookup>,
    ) -> Fs {
        let resolver = PathResolver::new(os, base);
        Fs { inner: Arc::new(Inner { resolver, filesystem, mime }) }
    }

    /// A file handle for the given path string or segment sequence.
    ///
    /// Construction only resolves the path; it never touches the filesystem.
    pub fn file(&self, path: impl Into<PathArg>) -> File {
        let canonical = self.inner.resolver.resolve(&path.into());
        File::from_canonical(self.clone(), canonical)
    }

    /// A directory handle for the given path string or segment sequence.
    pub fn dir(&self, path: impl Into<PathArg>) -> Dir {
        let canonical = self.inner.resolver.resolve_dir(&path.into());
        Dir::from_canonical(self.clone(), canonical)
    }

    /// The topmost directory for the current OS drive.
    pub fn root(&self) -> Dir {
        Dir::from_canonical(self.clone(), self.inner.resolver.root_path().to_string())
    }

    pub(crate) fn resolver(&self) -> &PathResolver {
        &self.inner.resolver
    }

    pub(crate) fn filesystem(&self) -> &dyn Filesystem {
        self.inner.filesystem.as_ref()
    }

    pub(crate) fn mime(&self) -> &dyn MimeLookup {
        self.inner.mime.as_ref()
    }
}

impl fmt::Debug for Fs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Fs")
            .field("os", &self.inner.resolver.os())
            .field("base", &self.inner.resolver.base())
            .finish_non_exhaustive()
    }
}
