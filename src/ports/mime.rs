use std::path::Path;

/// Port for MIME classification of file content.
///
/// Consumed by the file entity during lazy metadata loading; lookup misses
/// are `None`, never errors.
pub trait MimeLookup {
    /// The MIME type for a path, from its extension or content.
    fn mime_for_path(&self, path: &Path) -> Option<String>;

    /// The canonical file extension for a MIME type.
    fn extension_for_mime(&self, mime: &str) -> Option<String>;
}
