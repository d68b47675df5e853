//! Extended attributes addressed by path
//!
//! Every operation comes in two forms. The plain form follows a final
//! symlink and operates on whatever it points to. The `l*` form operates on
//! the symlink itself.
//!
//! | Operation | Follows symlinks | Operates on symlink |
//! |---|---|---|
//! | read | [`get`] | [`lget`] |
//! | write | [`set`], [`set_with_mode`] | [`lset`], [`lset_with_mode`] |
//! | delete | [`remove`] | [`lremove`] |
//! | names | [`list`] | [`llist`] |
//!
//! Linux only allows `user.*` attributes on regular files and directories, so
//! [`lset`] on a symlink fails there with `EPERM`.

use crate::accessor::{self, Site};
use crate::error::Result;
use crate::mode::SetMode;
use std::ffi::{OsStr, OsString};
use std::path::Path;

/// Get an extended attribute value at the given path
///
/// A zero-length value is returned as an empty `Vec`; a missing attribute is
/// an error.
///
/// The size probe and the read are two separate syscalls. A concurrent writer
/// that grows the value in between makes this call fail with `ERANGE`.
///
/// # Errors
///
/// This function will return an error if:
/// - The path or the extended attribute doesn't exist
/// - Permission is denied
/// - The filesystem does not support extended attributes
pub fn get<P: AsRef<Path>, N: AsRef<OsStr>>(path: P, name: N) -> Result<Vec<u8>> {
    accessor::get(Site::Follow(path.as_ref()), name.as_ref())
}

/// Get an extended attribute value without following a final symlink
///
/// # Errors
///
/// As [`get`].
pub fn lget<P: AsRef<Path>, N: AsRef<OsStr>>(path: P, name: N) -> Result<Vec<u8>> {
    accessor::get(Site::NoFollow(path.as_ref()), name.as_ref())
}

/// Set an extended attribute value at the given path, creating or replacing it
///
/// # Errors
///
/// This function will return an error if:
/// - Permission is denied
/// - The name or value exceeds a filesystem limit
/// - The filesystem does not support extended attributes
pub fn set<P: AsRef<Path>, N: AsRef<OsStr>>(path: P, name: N, value: &[u8]) -> Result<()> {
    set_with_mode(path, name, value, SetMode::Upsert)
}

/// Set an extended attribute value with create-only or replace-only semantics
///
/// # Errors
///
/// As [`set`], plus `EEXIST` for [`SetMode::Create`] when the attribute
/// exists and `ENOATTR` for [`SetMode::Replace`] when it does not.
pub fn set_with_mode<P: AsRef<Path>, N: AsRef<OsStr>>(
    path: P,
    name: N,
    value: &[u8],
    mode: SetMode,
) -> Result<()> {
    accessor::set(Site::Follow(path.as_ref()), name.as_ref(), value, mode)
}

/// Set an extended attribute on the symlink itself
///
/// # Errors
///
/// As [`set`]; Linux rejects `user.*` attributes on symlinks with `EPERM`.
pub fn lset<P: AsRef<Path>, N: AsRef<OsStr>>(path: P, name: N, value: &[u8]) -> Result<()> {
    lset_with_mode(path, name, value, SetMode::Upsert)
}

/// [`set_with_mode`] without following a final symlink
///
/// # Errors
///
/// As [`set_with_mode`] and [`lset`].
pub fn lset_with_mode<P: AsRef<Path>, N: AsRef<OsStr>>(
    path: P,
    name: N,
    value: &[u8],
    mode: SetMode,
) -> Result<()> {
    accessor::set(Site::NoFollow(path.as_ref()), name.as_ref(), value, mode)
}

/// Remove an extended attribute
///
/// # Errors
///
/// This function will return an error if:
/// - The path or the extended attribute doesn't exist
/// - Permission is denied
pub fn remove<P: AsRef<Path>, N: AsRef<OsStr>>(path: P, name: N) -> Result<()> {
    accessor::remove(Site::Follow(path.as_ref()), name.as_ref())
}

/// Remove an extended attribute from the symlink itself
///
/// # Errors
///
/// As [`remove`].
pub fn lremove<P: AsRef<Path>, N: AsRef<OsStr>>(path: P, name: N) -> Result<()> {
    accessor::remove(Site::NoFollow(path.as_ref()), name.as_ref())
}

/// List all extended attribute names at the given path
///
/// Names are returned in the order the kernel reports them. A file with no
/// attributes yields an empty `Vec`, not an error.
///
/// # Errors
///
/// This function will return an error if:
/// - The path doesn't exist
/// - The filesystem does not support extended attributes
/// - The list grew between the size probe and the read (`ERANGE`)
pub fn list<P: AsRef<Path>>(path: P) -> Result<Vec<OsString>> {
    accessor::list(Site::Follow(path.as_ref()))
}

/// List extended attribute names on the symlink itself
///
/// # Errors
///
/// As [`list`].
pub fn llist<P: AsRef<Path>>(path: P) -> Result<Vec<OsString>> {
    accessor::list(Site::NoFollow(path.as_ref()))
}
