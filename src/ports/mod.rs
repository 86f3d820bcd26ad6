mod filesystem;
mod mime;

pub use filesystem::Filesystem;
pub use mime::MimeLookup;
