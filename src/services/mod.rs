mod mime_guess_lookup;
mod std_filesystem;

pub use mime_guess_lookup::MimeGuessLookup;
pub use std_filesystem::StdFilesystem;
