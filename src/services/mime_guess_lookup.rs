use std::path::Path;

use crate::ports::MimeLookup;

/// MIME lookup backed by the `mime_guess` extension table.
#[derive(Debug, Clone, Copy, Default)]
pub struct MimeGuessLookup;

impl MimeGuessLookup {
    /// Create a new `MimeGuessLookup`.
    pub fn new() -> MimeGuessLookup {
        MimeGuessLookup
    }
}

impl MimeLookup for MimeGuessLookup {
    fn mime_for_path(&self, path: &Path) -> Option<String> {
        mime_guess::from_path(path).first().map(|mime| mime.essence_str().to_string())
    }

    fn extension_for_mime(&self, mime: &str) -> Option<String> {
        mime_guess::get_mime_extensions_str(mime)
            .and_then(|extensions| extensions.first())
            .map(|extension| extension.to_string())
    }
}
