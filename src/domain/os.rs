/// Path-separator convention of the host operating system.
///
/// Detection inspects the OS identifier for a Windows marker and defaults
/// to Unix for everything else, so every identifier resolves to a family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OsFamily {
    /// Unix-like systems: `/` separator, a single `/` root.
    Unix,
    /// Windows: `\` separator, per-drive `<letter>:\` roots.
    Windows,
}

impl OsFamily {
    /// Detect the family of the host OS.
    pub fn detect() -> OsFamily {
        Self::from_identifier(std::env::consts::OS)
    }

    /// Classify an OS identifier string such as `linux` or `windows`.
    pub fn from_identifier(identifier: &str) -> OsFamily {
        if identifier.to_ascii_lowercase().contains("win") {
            OsFamily::Windows
        } else {
            // Default to Unix
            OsFamily::Unix
        }
    }

    /// The directory separator character for this family.
    pub fn separator(self) -> char {
        match self {
            OsFamily::Unix => '/',
            OsFamily::Windows => '\\',
        }
    }

    /// Check whether a raw path string is absolute under this family's rules.
    ///
    /// Unix: the first character is the separator. Windows: a drive prefix
    /// of one or more letters followed by `:\`.
    pub fn is_absolute(self, path: &str) -> bool {
        match self {
            OsFamily::Unix => path.starts_with('/'),
            OsFamily::Windows => Self::drive_prefix(path).is_some(),
        }
    }

    /// Check whether a canonical directory path is a filesystem root.
    ///
    /// Unix: the bare separator. Windows: exactly `<letters>:\`.
    pub fn is_root_path(self, path: &str) -> bool {
        match self {
            OsFamily::Unix => path == "/",
            OsFamily::Windows => {
                Self::drive_prefix(path).is_some_and(|prefix| path.len() == prefix.len() + 1)
            }
        }
    }

    /// The `<letters>:` drive prefix of a Windows-absolute path, if present.
    ///
    /// Only recognizes prefixes immediately followed by the separator.
    pub fn drive_prefix(path: &str) -> Option<&str> {
        let colon = path.find(':')?;
        if colon == 0 || !path[..colon].chars().all(|c| c.is_ascii_alphabetic()) {
            return None;
        }
        if path[colon + 1..].starts_with('\\') {
            Some(&path[..=colon])
        } else {
            None
        }
    }
}
