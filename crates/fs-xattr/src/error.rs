//! Error types for extended attribute operations
//!
//! Every failing call produces exactly one [`XattrError`]. The error records
//! which operation failed, what it was pointed at, the attribute name (empty
//! for list operations) and the platform error it came from. The platform
//! `errno` is never translated or renumbered: [`XattrError::raw_os_error`]
//! returns exactly what the kernel reported.
//!
//! For coarse branching, [`XattrError::kind`] maps the code onto a small
//! portable taxonomy ([`ErrorKind`]).

use crate::names::DecodeError;
use std::ffi::{OsStr, OsString};
use std::fmt;
use std::io;
use std::os::fd::RawFd;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type for extended attribute operations
pub type Result<T> = std::result::Result<T, XattrError>;

/// "No such attribute" on every supported platform.
///
/// Linux spells it `ENODATA`; Darwin and FreeBSD have a dedicated `ENOATTR`.
#[cfg(any(target_os = "linux", target_os = "android"))]
pub const ENOATTR: i32 = libc::ENODATA;

/// "No such attribute" on every supported platform.
///
/// Linux spells it `ENODATA`; Darwin and FreeBSD have a dedicated `ENOATTR`.
#[cfg(not(any(target_os = "linux", target_os = "android")))]
pub const ENOATTR: i32 = libc::ENOATTR;

/// The operation that failed
///
/// Path-following, non-following (`L*`) and descriptor-bound (`F*`) forms are
/// distinct operations, so an error always says which syscall family was used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Get,
    LGet,
    FGet,
    Set,
    LSet,
    FSet,
    Remove,
    LRemove,
    FRemove,
    List,
    LList,
    FList,
}

impl Operation {
    /// Symbolic name used in error messages
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "get",
            Self::LGet => "lget",
            Self::FGet => "fget",
            Self::Set => "set",
            Self::LSet => "lset",
            Self::FSet => "fset",
            Self::Remove => "remove",
            Self::LRemove => "lremove",
            Self::FRemove => "fremove",
            Self::List => "list",
            Self::LList => "llist",
            Self::FList => "flist",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What an operation was applied to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// A path whose final symlink (if any) was followed
    Path(PathBuf),
    /// A path whose final component was operated on directly
    Link(PathBuf),
    /// An already-open file descriptor
    Fd(RawFd),
}

impl Target {
    /// The path, if the target was addressed by path
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Path(path) | Self::Link(path) => Some(path),
            Self::Fd(_) => None,
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Path(path) | Self::Link(path) => write!(f, "{}", path.display()),
            Self::Fd(fd) => write!(f, "<fd {fd}>"),
        }
    }
}

/// Portable classification of a failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The target or the attribute does not exist
    NotFound,
    /// The filesystem or platform has no extended attribute support
    Unsupported,
    /// The caller may not read or modify this attribute
    PermissionDenied,
    /// The name or value exceeds a platform limit, or there is no room for it
    ArgumentTooLarge,
    /// The buffer was too small for the result, usually a size race
    RangeMismatch,
    /// A create-only set found the attribute already present
    AlreadyExists,
    /// The kernel returned a name list that could not be decoded
    Malformed,
    /// Any other platform code; see [`XattrError::raw_os_error`]
    Unknown,
}

impl ErrorKind {
    /// Classify a raw platform error code
    #[must_use]
    pub fn from_raw_os_error(code: i32) -> Self {
        if code == libc::ENOENT || code == ENOATTR {
            Self::NotFound
        } else if code == libc::ENOTSUP || code == libc::EOPNOTSUPP {
            Self::Unsupported
        } else if code == libc::EPERM || code == libc::EACCES {
            Self::PermissionDenied
        } else if code == libc::E2BIG || code == libc::ENAMETOOLONG || code == libc::ENOSPC {
            Self::ArgumentTooLarge
        } else if code == libc::ERANGE {
            Self::RangeMismatch
        } else if code == libc::EEXIST {
            Self::AlreadyExists
        } else {
            Self::Unknown
        }
    }
}

/// A failed extended attribute operation
#[derive(Debug, Error)]
#[error("{op} {target}{}: {error}", name_suffix(.name))]
pub struct XattrError {
    op: Operation,
    target: Target,
    name: OsString,
    // Part of the message, so not reported as `source()`
    error: io::Error,
}

fn name_suffix(name: &OsStr) -> String {
    if name.is_empty() {
        String::new()
    } else {
        format!(" {}", name.to_string_lossy())
    }
}

impl XattrError {
    /// Wrap a platform error code
    #[must_use]
    pub fn from_errno(op: Operation, target: Target, name: &OsStr, errno: i32) -> Self {
        Self {
            op,
            target,
            name: name.to_os_string(),
            error: io::Error::from_raw_os_error(errno),
        }
    }

    /// Wrap a name list the codec rejected
    pub(crate) fn malformed(op: Operation, target: Target, error: DecodeError) -> Self {
        Self {
            op,
            target,
            name: OsString::new(),
            error: io::Error::new(io::ErrorKind::InvalidData, error),
        }
    }

    /// The operation that failed
    #[must_use]
    pub const fn op(&self) -> Operation {
        self.op
    }

    /// What the operation was applied to
    #[must_use]
    pub const fn target(&self) -> &Target {
        &self.target
    }

    /// The attribute name; empty for list operations
    #[must_use]
    pub fn name(&self) -> &OsStr {
        &self.name
    }

    /// The unmodified platform error code, if the failure came from the kernel
    #[must_use]
    pub fn raw_os_error(&self) -> Option<i32> {
        self.error.raw_os_error()
    }

    /// The underlying I/O error
    #[must_use]
    pub const fn io_error(&self) -> &io::Error {
        &self.error
    }

    /// Portable classification of this failure
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self.raw_os_error() {
            Some(code) => ErrorKind::from_raw_os_error(code),
            None if self.error.kind() == io::ErrorKind::InvalidData => ErrorKind::Malformed,
            None => ErrorKind::Unknown,
        }
    }

    /// True when the target or attribute is absent
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }

    /// True when the filesystem does not support extended attributes
    ///
    /// Callers copying many files usually want to skip rather than fail on this.
    #[must_use]
    pub fn is_unsupported(&self) -> bool {
        self.kind() == ErrorKind::Unsupported
    }
}

impl From<XattrError> for io::Error {
    /// Keeps the full error as the payload; the original errno stays reachable
    /// through `get_ref()` and a downcast back to [`XattrError`].
    fn from(error: XattrError) -> Self {
        let kind = error.error.kind();
        Self::new(kind, error)
    }
}
