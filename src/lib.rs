//! # xattrctl
//!
//! Command-line front end for the [`fs_xattr`] crate: read, write, list,
//! remove and copy extended file attributes on Linux, macOS and FreeBSD.
//!
//! The binary is a thin wrapper around [`run`]; everything it does is also
//! reachable from this library so the commands can be driven in tests.

pub mod cli;
pub mod commands;
pub mod copy;
pub mod encoding;

pub use cli::Args;
pub use commands::run;
