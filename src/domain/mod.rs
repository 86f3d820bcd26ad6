mod entry;
mod error;
mod os;
mod path;

pub use entry::{Entry, PathEntry};
pub use error::FsError;
pub use os::OsFamily;
pub use path::{PathArg, PathResolver};
