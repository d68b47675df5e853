//! # fs-xattr
//!
//! Extended attributes (name/value pairs attached to files, directories and
//! symlinks) behind one API on Linux, macOS and FreeBSD:
//! - Path-based operations that follow symlinks ([`get`], [`set`], [`remove`], [`list`])
//! - Path-based operations on the symlink itself ([`lget`], [`lset`], [`lremove`], [`llist`])
//! - Descriptor-based operations through [`XattrOps`]
//!
//! Every call is a direct, blocking syscall. The crate keeps no state between
//! calls and is safe to use from any number of threads.
//!
//! ## Platform Differences
//!
//! - **Linux**: names include their namespace (`user.foo`); list buffers are
//!   NUL-separated.
//! - **macOS**: same naming; no-follow is an option flag rather than a
//!   separate syscall.
//! - **FreeBSD**: the user namespace is implied, so names are passed without
//!   a prefix (`foo`); list buffers are length-prefixed.
//!
//! ## Example
//!
//! ```rust,no_run
//! # fn example() -> fs_xattr::Result<()> {
//! fs_xattr::set("data.txt", "user.origin", b"https://example.com")?;
//! let origin = fs_xattr::get("data.txt", "user.origin")?;
//! assert_eq!(origin, b"https://example.com");
//!
//! for name in fs_xattr::list("data.txt")? {
//!     println!("{}", name.to_string_lossy());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! Errors carry the failing operation, target, attribute name and the
//! unmodified platform `errno`:
//!
//! ```rust,no_run
//! # fn example() {
//! match fs_xattr::get("data.txt", "user.missing") {
//!     Err(e) if e.is_unsupported() => eprintln!("no xattr support, skipping"),
//!     Err(e) if e.is_not_found() => eprintln!("not set"),
//!     Err(e) => eprintln!("{e} (errno {:?})", e.raw_os_error()),
//!     Ok(value) => println!("{value:?}"),
//! }
//! # }
//! ```

#[cfg(not(any(
    target_os = "linux",
    target_os = "android",
    target_os = "macos",
    target_os = "ios",
    target_os = "freebsd"
)))]
compile_error!("fs-xattr supports Linux, Android, macOS, iOS and FreeBSD only");

mod accessor;
pub mod error;
pub mod file;
pub mod mode;
pub mod names;
pub mod path;
mod sys;

// Re-export main types
pub use error::{ErrorKind, Operation, Result, Target, XattrError, ENOATTR};
pub use file::XattrOps;
pub use mode::{SetMode, XATTR_CREATE, XATTR_REPLACE};
pub use names::{decode_names, DecodeError, ListFormat};
pub use path::{get, lget, list, llist, lremove, lset, lset_with_mode, remove, set, set_with_mode};

/// Name list layout used by the platform this crate was built for
pub const NATIVE_LIST_FORMAT: ListFormat = <sys::Native as sys::Syscalls>::LIST_FORMAT;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
