//! The size-then-read protocol and error normalization
//!
//! `get` and `list` cannot know the result size in advance, so each is two
//! syscalls: a probe with an empty buffer that returns the size, then the
//! real read into a buffer of that size. The attribute can change between
//! the two. If it grew, the read fails with `ERANGE` and that error is
//! returned as-is; there is no retry loop. If it shrank, the result is
//! truncated to what was actually read.

use crate::error::{Operation, Result, Target, XattrError};
use crate::mode::SetMode;
use crate::names::decode_names;
use crate::sys::{Handle, Native, Syscalls};
use nix::errno::Errno;
use std::ffi::{CString, OsStr, OsString};
use std::os::fd::{AsRawFd, BorrowedFd};
use std::os::unix::ffi::OsStrExt;
use std::path::Path;

/// Extra bytes allocated for list reads.
///
/// SMB1 mounts report a list size one byte short and then fail the read with
/// `ERANGE` on an exactly-sized buffer.
const LIST_SLACK: usize = 1;

/// Where one operation lands, borrowed for the duration of the call
#[derive(Debug, Clone, Copy)]
pub(crate) enum Site<'a> {
    Follow(&'a Path),
    NoFollow(&'a Path),
    Fd(BorrowedFd<'a>),
}

impl Site<'_> {
    /// Pick the operation name matching this addressing form
    const fn pick(self, follow: Operation, no_follow: Operation, fd: Operation) -> Operation {
        match self {
            Self::Follow(_) => follow,
            Self::NoFollow(_) => no_follow,
            Self::Fd(_) => fd,
        }
    }

    fn target(self) -> Target {
        match self {
            Self::Follow(path) => Target::Path(path.to_path_buf()),
            Self::NoFollow(path) => Target::Link(path.to_path_buf()),
            Self::Fd(fd) => Target::Fd(fd.as_raw_fd()),
        }
    }

    /// Resolve to a kernel handle and run `f` with it
    fn with_handle<T>(self, f: impl FnOnce(Handle<'_>) -> nix::Result<T>) -> nix::Result<T> {
        match self {
            Self::Follow(path) => f(Handle::Path(&c_string(path.as_os_str())?)),
            Self::NoFollow(path) => f(Handle::Link(&c_string(path.as_os_str())?)),
            Self::Fd(fd) => f(Handle::Fd(fd.as_raw_fd())),
        }
    }
}

/// NUL-terminate a path or name; interior NULs are `EINVAL`
fn c_string(s: &OsStr) -> nix::Result<CString> {
    CString::new(s.as_bytes()).map_err(|_| Errno::EINVAL)
}

/// Restart a syscall for as long as it is interrupted by a signal
pub(crate) fn retry_on_eintr<T>(mut call: impl FnMut() -> nix::Result<T>) -> nix::Result<T> {
    loop {
        match call() {
            Err(Errno::EINTR) => log::debug!("xattr syscall interrupted, restarting"),
            result => return result,
        }
    }
}

/// Probe for the result size, allocate, then read
///
/// `slack` extra bytes are allocated beyond the probed size. A probed size of
/// zero returns an empty buffer without a second call.
pub(crate) fn probe_then_read(
    slack: usize,
    mut call: impl FnMut(&mut [u8]) -> nix::Result<usize>,
) -> nix::Result<Vec<u8>> {
    let size = retry_on_eintr(|| call(&mut []))?;
    log::trace!("xattr probe reported {size} bytes");
    if size == 0 {
        return Ok(Vec::new());
    }

    let mut buf = vec![0u8; size + slack];
    let read = retry_on_eintr(|| call(&mut buf))?;
    log::trace!("xattr read returned {read} of {} bytes", buf.len());
    buf.truncate(read);
    Ok(buf)
}

pub(crate) fn get(site: Site<'_>, name: &OsStr) -> Result<Vec<u8>> {
    let op = site.pick(Operation::Get, Operation::LGet, Operation::FGet);
    site.with_handle(|handle| {
        let c_name = c_string(name)?;
        probe_then_read(0, |buf| Native::get(handle, &c_name, buf))
    })
    .map_err(|errno| XattrError::from_errno(op, site.target(), name, errno as i32))
}

pub(crate) fn set(site: Site<'_>, name: &OsStr, value: &[u8], mode: SetMode) -> Result<()> {
    let op = site.pick(Operation::Set, Operation::LSet, Operation::FSet);
    log::trace!("{op} {name:?}: {} bytes, {mode:?}", value.len());
    site.with_handle(|handle| {
        let c_name = c_string(name)?;
        retry_on_eintr(|| Native::set(handle, &c_name, value, mode))
    })
    .map_err(|errno| XattrError::from_errno(op, site.target(), name, errno as i32))
}

pub(crate) fn remove(site: Site<'_>, name: &OsStr) -> Result<()> {
    let op = site.pick(Operation::Remove, Operation::LRemove, Operation::FRemove);
    site.with_handle(|handle| {
        let c_name = c_string(name)?;
        retry_on_eintr(|| Native::remove(handle, &c_name))
    })
    .map_err(|errno| XattrError::from_errno(op, site.target(), name, errno as i32))
}

pub(crate) fn list(site: Site<'_>) -> Result<Vec<OsString>> {
    let op = site.pick(Operation::List, Operation::LList, Operation::FList);
    let raw = site
        .with_handle(|handle| probe_then_read(LIST_SLACK, |buf| Native::list(handle, buf)))
        .map_err(|errno| XattrError::from_errno(op, site.target(), OsStr::new(""), errno as i32))?;
    decode_names(Native::LIST_FORMAT, &raw)
        .map_err(|error| XattrError::malformed(op, site.target(), error))
}
