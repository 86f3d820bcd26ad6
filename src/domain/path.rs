use crate::domain::OsFamily;

/// A raw, caller-supplied path: either a single string or an ordered
/// sequence of segments that is joined with the OS separator first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathArg {
    /// One path string, absolute or relative.
    Single(String),
    /// Path segments, joined before any absoluteness test.
    Segments(Vec<String>),
}

impl PathArg {
    /// Join into a single raw path string using the given separator.
    pub fn joined(&self, separator: char) -> String {
        match self {
            PathArg::Single(path) => path.clone(),
            PathArg::Segments(segments) => segments.join(&separator.to_string()),
        }
    }
}

impl From<&str> for PathArg {
    fn from(value: &str) -> Self {
        PathArg::Single(value.to_string())
    }
}

impl From<String> for PathArg {
    fn from(value: String) -> Self {
        PathArg::Single(value)
    }
}

impl From<&String> for PathArg {
    fn from(value: &String) -> Self {
        PathArg::Single(value.clone())
    }
}

impl From<Vec<String>> for PathArg {
    fn from(value: Vec<String>) -> Self {
        PathArg::Segments(value)
    }
}

impl From<Vec<&str>> for PathArg {
    fn from(value: Vec<&str>) -> Self {
        PathArg::Segments(value.into_iter().map(str::to_string).collect())
    }
}

impl<const N: usize> From<[&str; N]> for PathArg {
    fn from(value: [&str; N]) -> Self {
        PathArg::Segments(value.iter().map(|s| s.to_string()).collect())
    }
}

impl From<&[&str]> for PathArg {
    fn from(value: &[&str]) -> Self {
        PathArg::Segments(value.iter().map(|s| s.to_string()).collect())
    }
}

/// Canonicalizes raw paths into absolute, cleaned path strings.
///
/// The base root anchors relative inputs and is supplied explicitly at
/// construction; the resolver never derives it from its own location.
/// Canonical file paths carry no trailing separator; canonical directory
/// paths carry exactly one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathResolver {
    os: OsFamily,
    base: String,
    root: String,
}

impl PathResolver {
    /// Create a resolver for the given OS family and base root.
    ///
    /// A relative base is anchored at the family's default root. The
    /// filesystem root is derived once from the base (on Windows, its drive).
    pub fn new(os: OsFamily, base: impl AsRef<str>) -> PathResolver {
        let raw = base.as_ref();
        let default_root = match os {
            OsFamily::Unix => "/".to_string(),
            OsFamily::Windows => match OsFamily::drive_prefix(raw) {
                Some(prefix) => format!("{prefix}\\"),
                None => "C:\\".to_string(),
            },
        };
        let mut resolver = PathResolver { os, base: String::new(), root: default_root };
        let absolute = if os.is_absolute(raw) {
            raw.to_string()
        } else {
            format!("{}{}", resolver.root, raw)
        };
        resolver.base = resolver.clean(&absolute);
        resolver
    }

    /// The OS family this resolver normalizes for.
    pub fn os(&self) -> OsFamily {
        self.os
    }

    /// The base root used to anchor relative inputs, in canonical file form.
    pub fn base(&self) -> &str {
        &self.base
    }

    /// The topmost directory path for the current OS drive, with trailing
    /// separator.
    pub fn root_path(&self) -> &str {
        &self.root
    }

    /// Resolve a raw path into a canonical absolute path without a trailing
    /// separator. Empty input resolves to the base root.
    pub fn resolve(&self, arg: &PathArg) -> String {
        let separator = self.os.separator();
        let joined = arg.joined(separator);
        if joined.is_empty() {
            return self.base.clone();
        }
        let absolute = if self.os.is_absolute(&joined) {
            joined
        } else {
            format!("{}{}{}", self.base, separator, joined)
        };
        self.clean(&absolute)
    }

    /// Resolve a raw path into a canonical directory path, with exactly one
    /// trailing separator re-appended after the generic cleanup.
    pub fn resolve_dir(&self, arg: &PathArg) -> String {
        let resolved = self.resolve(arg);
        if resolved.ends_with(self.os.separator()) {
            resolved
        } else {
            format!("{}{}", resolved, self.os.separator())
        }
    }

    /// Canonical directory path of the parent, or `None` at the filesystem
    /// root. Accepts both file-form and directory-form canonical paths.
    pub fn parent_of(&self, path: &str) -> Option<String> {
        let separator = self.os.separator();
        let dir_form = if path.ends_with(separator) {
            path.to_string()
        } else {
            format!("{path}{separator}")
        };
        if self.os.is_root_path(&dir_form) {
            return None;
        }
        let trimmed = path.trim_end_matches(separator);
        let cut = trimmed.rfind(separator)?;
        Some(trimmed[..=cut].to_string())
    }

    /// Join path segments, trimming separators from both ends.
    pub fn join(&self, segments: &[&str]) -> String {
        let separator = self.os.separator();
        segments.join(&separator.to_string()).trim_matches(separator).to_string()
    }

    /// Join path segments onto the filesystem root, producing a canonical
    /// absolute path.
    pub fn join_absolute(&self, segments: &[&str]) -> String {
        let joined = self.join(segments);
        self.clean(&format!("{}{}", self.root, joined))
    }

    /// Segment-stack cleanup of an absolute path: drops empty and `.`
    /// segments, pops on `..`, collapses separator runs and strips the
    /// trailing separator. A fully popped path is the bare root.
    fn clean(&self, path: &str) -> String {
        let separator = self.os.separator();
        let (prefix, rest) = match self.os {
            OsFamily::Unix => ("", path),
            OsFamily::Windows => match OsFamily::drive_prefix(path) {
                Some(drive) => (drive, &path[drive.len()..]),
                None => (self.root.trim_end_matches(separator), path),
            },
        };

        let mut stack: Vec<&str> = Vec::new();
        for segment in rest.split(separator) {
            match segment {
                "" | "." => {}
                ".." => {
                    stack.pop();
                }
                other => stack.push(other),
            }
        }

        if stack.is_empty() {
            format!("{prefix}{separator}")
        } else {
            format!("{prefix}{separator}{}", stack.join(&separator.to_string()))
        }
    }
}
