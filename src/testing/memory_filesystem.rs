use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::io;
use std::path::Path;
use std::time::SystemTime;

use crate::ports::{Filesystem, MimeLookup};

#[derive(Clone)]
enum Node {
    File {
        data: Vec<u8>,
        readable: bool,
        writable: bool,
        modified: SystemTime,
        accessed: SystemTime,
    },
    Dir {
        readable: bool,
        writable: bool,
    },
}

impl Node {
    fn file(data: &[u8]) -> Node {
        Node::File {
            data: data.to_vec(),
            readable: true,
            writable: true,
            modified: SystemTime::now(),
            accessed: SystemTime::now(),
        }
    }

    fn dir() -> Node {
        Node::Dir { readable: true, writable: true }
    }
}

/// In-memory filesystem fake keyed by canonical path strings.
///
/// Permission flags are plain booleans, so permission scenarios do not
/// depend on the identity the test process runs as.
pub struct MemoryFilesystem {
    separator: char,
    nodes: RefCell<BTreeMap<String, Node>>,
}

#[allow(dead_code)]
impl MemoryFilesystem {
    pub fn new(separator: char) -> MemoryFilesystem {
        MemoryFilesystem { separator, nodes: RefCell::new(BTreeMap::new()) }
    }

    /// Insert a file node, creating missing ancestor directories.
    pub fn add_file(&self, path: &str, data: &[u8]) {
        self.add_ancestors(path);
        self.nodes.borrow_mut().insert(path.to_string(), Node::file(data));
    }

    /// Insert a directory node, creating missing ancestor directories.
    pub fn add_dir(&self, path: &str) {
        self.add_ancestors(path);
        self.nodes.borrow_mut().insert(path.to_string(), Node::dir());
    }

    /// Drop the write flag on a node.
    pub fn set_readonly(&self, path: &str) {
        if let Some(node) = self.nodes.borrow_mut().get_mut(path) {
            match node {
                Node::File { writable, .. } | Node::Dir { writable, .. } => *writable = false,
            }
        }
    }

    /// Drop the read flag on a node.
    pub fn set_unreadable(&self, path: &str) {
        if let Some(node) = self.nodes.borrow_mut().get_mut(path) {
            match node {
                Node::File { readable, .. } | Node::Dir { readable, .. } => *readable = false,
            }
        }
    }

    pub fn contains(&self, path: &str) -> bool {
        self.nodes.borrow().contains_key(path)
    }

    /// Parent key of a path, in the form entities hand to the port: no
    /// trailing separator except at a root. `None` above a root.
    fn parent_key(&self, path: &str) -> Option<String> {
        let trimmed = path.trim_end_matches(self.separator);
        let cut = trimmed.rfind(self.separator)?;
        if cut == 0 {
            return if trimmed.len() > 1 { Some(self.separator.to_string()) } else { None };
        }
        let parent = &trimmed[..cut];
        if parent.ends_with(':') {
            Some(format!("{parent}{}", self.separator))
        } else {
            Some(parent.to_string())
        }
    }

    fn is_root_key(&self, key: &str) -> bool {
        key == self.separator.to_string() || key.ends_with(':')
    }

    fn add_ancestors(&self, path: &str) {
        let mut chain = Vec::new();
        let mut current = self.parent_key(path);
        while let Some(key) = current {
            if self.is_root_key(&key) || self.nodes.borrow().contains_key(&key) {
                break;
            }
            current = self.parent_key(&key);
            chain.push(key);
        }
        let mut nodes = self.nodes.borrow_mut();
        for key in chain.into_iter().rev() {
            nodes.insert(key, Node::dir());
        }
    }

    fn key(path: &Path) -> String {
        path.to_string_lossy().into_owned()
    }

    fn parent_is_dir(&self, key: &str) -> bool {
        match self.parent_key(key) {
            Some(parent) => matches!(self.nodes.borrow().get(&parent), Some(Node::Dir { .. })),
            None => false,
        }
    }
}

fn not_found() -> io::Error {
    io::Error::new(io::ErrorKind::NotFound, "no such path")
}

fn denied() -> io::Error {
    io::Error::new(io::ErrorKind::PermissionDenied, "permission denied")
}

impl Filesystem for MemoryFilesystem {
    fn exists(&self, path: &Path) -> bool {
        self.nodes.borrow().contains_key(&Self::key(path))
    }

    fn is_file(&self, path: &Path) -> bool {
        matches!(self.nodes.borrow().get(&Self::key(path)), Some(Node::File { .. }))
    }

    fn is_dir(&self, path: &Path) -> bool {
        matches!(self.nodes.borrow().get(&Self::key(path)), Some(Node::Dir { .. }))
    }

    fn is_readable(&self, path: &Path) -> bool {
        match self.nodes.borrow().get(&Self::key(path)) {
            Some(Node::File { readable, .. }) | Some(Node::Dir { readable, .. }) => *readable,
            None => false,
        }
    }

    fn is_writable(&self, path: &Path) -> bool {
        match self.nodes.borrow().get(&Self::key(path)) {
            Some(Node::File { writable, .. }) | Some(Node::Dir { writable, .. }) => *writable,
            None => false,
        }
    }

    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        match self.nodes.borrow().get(&Self::key(path)) {
            Some(Node::File { data, readable: true, .. }) => Ok(data.clone()),
            Some(Node::File { .. }) => Err(denied()),
            _ => Err(not_found()),
        }
    }

    fn write(&self, path: &Path, data: &[u8], append: bool) -> io::Result<()> {
        let key = Self::key(path);
        let mut nodes = self.nodes.borrow_mut();
        match nodes.get_mut(&key) {
            Some(Node::File { data: existing, writable, modified, .. }) => {
                if !*writable {
                    return Err(denied());
                }
                if append {
                    existing.extend_from_slice(data);
                } else {
                    *existing = data.to_vec();
                }
                *modified = SystemTime::now();
                Ok(())
            }
            Some(Node::Dir { .. }) => Err(denied()),
            None => {
                drop(nodes);
                if !self.parent_is_dir(&key) {
                    return Err(not_found());
                }
                self.nodes.borrow_mut().insert(key, Node::file(data));
                Ok(())
            }
        }
    }

    fn touch_file(&self, path: &Path) -> io::Result<()> {
        let key = Self::key(path);
        let mut nodes = self.nodes.borrow_mut();
        match nodes.get_mut(&key) {
            Some(Node::File { modified, .. }) => {
                *modified = SystemTime::now();
                Ok(())
            }
            Some(Node::Dir { .. }) => Err(denied()),
            None => {
                drop(nodes);
                if !self.parent_is_dir(&key) {
                    return Err(not_found());
                }
                self.nodes.borrow_mut().insert(key, Node::file(b""));
                Ok(())
            }
        }
    }

    fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
        let mut nodes = self.nodes.borrow_mut();
        let node = nodes.remove(&Self::key(from)).ok_or_else(not_found)?;
        nodes.insert(Self::key(to), node);
        Ok(())
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        let key = Self::key(path);
        let mut nodes = self.nodes.borrow_mut();
        match nodes.get(&key) {
            Some(Node::File { .. }) => {
                nodes.remove(&key);
                Ok(())
            }
            _ => Err(not_found()),
        }
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        let key = Self::key(path);
        let mut chain = vec![key.clone()];
        let mut current = self.parent_key(&key);
        while let Some(parent) = current {
            if self.is_root_key(&parent) {
                break;
            }
            current = self.parent_key(&parent);
            chain.push(parent);
        }
        for component in chain.iter() {
            if matches!(self.nodes.borrow().get(component), Some(Node::File { .. })) {
                return Err(denied());
            }
        }
        let mut nodes = self.nodes.borrow_mut();
        for component in chain.into_iter().rev() {
            nodes.entry(component).or_insert_with(Node::dir);
        }
        Ok(())
    }

    fn remove_dir(&self, path: &Path) -> io::Result<()> {
        let key = Self::key(path);
        let prefix = format!("{key}{}", self.separator);
        let mut nodes = self.nodes.borrow_mut();
        if !matches!(nodes.get(&key), Some(Node::Dir { .. })) {
            return Err(not_found());
        }
        if nodes.keys().any(|other| other.starts_with(&prefix)) {
            return Err(io::Error::new(io::ErrorKind::DirectoryNotEmpty, "directory not empty"));
        }
        nodes.remove(&key);
        Ok(())
    }

    fn list_dir(&self, path: &Path) -> io::Result<Vec<String>> {
        let key = Self::key(path);
        let nodes = self.nodes.borrow();
        if !matches!(nodes.get(&key), Some(Node::Dir { .. })) {
            return Err(not_found());
        }
        let prefix =
            if key.ends_with(self.separator) { key } else { format!("{key}{}", self.separator) };
        let mut names = Vec::new();
        for candidate in nodes.keys() {
            if let Some(rest) = candidate.strip_prefix(&prefix)
                && !rest.is_empty()
                && !rest.contains(self.separator)
            {
                names.push(rest.to_string());
            }
        }
        Ok(names)
    }

    fn file_size(&self, path: &Path) -> io::Result<u64> {
        match self.nodes.borrow().get(&Self::key(path)) {
            Some(Node::File { data, .. }) => Ok(data.len() as u64),
            _ => Err(not_found()),
        }
    }

    fn modified(&self, path: &Path) -> io::Result<SystemTime> {
        match self.nodes.borrow().get(&Self::key(path)) {
            Some(Node::File { modified, .. }) => Ok(*modified),
            _ => Err(not_found()),
        }
    }

    fn accessed(&self, path: &Path) -> io::Result<SystemTime> {
        match self.nodes.borrow().get(&Self::key(path)) {
            Some(Node::File { accessed, .. }) => Ok(*accessed),
            _ => Err(not_found()),
        }
    }
}

/// Fixed-table MIME lookup fake.
pub struct StaticMimeLookup {
    by_extension: RefCell<HashMap<String, String>>,
    by_mime: RefCell<HashMap<String, String>>,
}

#[allow(dead_code)]
impl StaticMimeLookup {
    pub fn new() -> StaticMimeLookup {
        let lookup = StaticMimeLookup {
            by_extension: RefCell::new(HashMap::new()),
            by_mime: RefCell::new(HashMap::new()),
        };
        for (extension, mime) in [
            ("png", "image/png"),
            ("html", "text/html"),
            ("htm", "text/html"),
            ("txt", "text/plain"),
            ("svg", "image/svg+xml"),
        ] {
            lookup.by_extension.borrow_mut().insert(extension.to_string(), mime.to_string());
        }
        for (mime, extension) in [
            ("image/png", "png"),
            ("text/html", "html"),
            ("text/plain", "txt"),
            ("image/svg+xml", "svg"),
        ] {
            lookup.by_mime.borrow_mut().insert(mime.to_string(), extension.to_string());
        }
        lookup
    }

    /// Map an extension to a MIME answer, overriding the default table.
    pub fn set_mime(&self, extension: &str, mime: &str) {
        self.by_extension.borrow_mut().insert(extension.to_string(), mime.to_string());
    }

    /// Map a MIME type to a canonical extension.
    pub fn set_extension(&self, mime: &str, extension: &str) {
        self.by_mime.borrow_mut().insert(mime.to_string(), extension.to_string());
    }
}

impl MimeLookup for StaticMimeLookup {
    fn mime_for_path(&self, path: &Path) -> Option<String> {
        let raw = path.to_string_lossy();
        let name = raw.rsplit(['/', '\\']).next()?;
        let (_, extension) = name.rsplit_once('.')?;
        self.by_extension.borrow().get(&extension.to_ascii_lowercase()).cloned()
    }

    fn extension_for_mime(&self, mime: &str) -> Option<String> {
        self.by_mime.borrow().get(mime).cloned()
    }
}
