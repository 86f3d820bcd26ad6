//! fskit: typed file and directory handles over a pluggable filesystem layer.
//!
//! An [`Fs`] context resolves every path against an explicit base root and
//! hands out [`File`] and [`Dir`] handles. Handles normalize their paths up
//! front (directories carry a trailing separator, files never do) and verify
//! on every filesystem operation that the on-disk entry matches the handle's
//! declared kind. All failures surface as [`FsError`].
//!
//! The filesystem and MIME collaborators sit behind the traits in [`ports`],
//! with `std::fs`-backed adapters in [`services`]; tests swap in in-memory
//! fakes through [`Fs::with_ports`].

pub mod domain;
pub mod ports;
pub mod services;

mod context;
mod dir;
mod file;

#[cfg(test)]
pub(crate) mod testing;

pub use context::Fs;
pub use dir::Dir;
pub use domain::{Entry, FsError, OsFamily, PathArg, PathEntry, PathResolver};
pub use file::{Destination, File};
