//! Darwin `*xattr(2)` family
//!
//! Darwin has one syscall per operation plus an `f*` descriptor form. The
//! no-follow variant is the same syscall with `XATTR_NOFOLLOW` in `options`.
//! `position` is only meaningful for resource forks and is always 0 here.

use super::{byte_count, in_ptr, out_ptr, Handle, Syscalls};
use crate::mode::SetMode;
use crate::names::ListFormat;
use nix::errno::Errno;
use std::ffi::CStr;

pub(crate) struct Native;

/// Resource fork offset; ordinary attributes always start at 0
const POSITION: u32 = 0;

const fn set_flags(mode: SetMode) -> libc::c_int {
    match mode {
        SetMode::Upsert => 0,
        SetMode::Create => libc::XATTR_CREATE,
        SetMode::Replace => libc::XATTR_REPLACE,
    }
}

impl Syscalls for Native {
    const LIST_FORMAT: ListFormat = ListFormat::NulTerminated;

    fn get(handle: Handle<'_>, name: &CStr, buf: &mut [u8]) -> nix::Result<usize> {
        let len = buf.len();
        let value = out_ptr(buf);
        // SAFETY: `value` is null or points to `len` writable bytes; both
        // strings are NUL-terminated and outlive the call.
        let ret = unsafe {
            match handle {
                Handle::Path(path) => {
                    libc::getxattr(path.as_ptr(), name.as_ptr(), value, len, POSITION, 0)
                }
                Handle::Link(path) => libc::getxattr(
                    path.as_ptr(),
                    name.as_ptr(),
                    value,
                    len,
                    POSITION,
                    libc::XATTR_NOFOLLOW,
                ),
                Handle::Fd(fd) => libc::fgetxattr(fd, name.as_ptr(), value, len, POSITION, 0),
            }
        };
        byte_count(ret)
    }

    fn set(handle: Handle<'_>, name: &CStr, value: &[u8], mode: SetMode) -> nix::Result<()> {
        let flags = set_flags(mode);
        let data = in_ptr(value);
        let len = value.len();
        // SAFETY: `data` is null or points to `len` readable bytes.
        let ret = unsafe {
            match handle {
                Handle::Path(path) => {
                    libc::setxattr(path.as_ptr(), name.as_ptr(), data, len, POSITION, flags)
                }
                Handle::Link(path) => libc::setxattr(
                    path.as_ptr(),
                    name.as_ptr(),
                    data,
                    len,
                    POSITION,
                    flags | libc::XATTR_NOFOLLOW,
                ),
                Handle::Fd(fd) => libc::fsetxattr(fd, name.as_ptr(), data, len, POSITION, flags),
            }
        };
        Errno::result(ret).map(drop)
    }

    fn remove(handle: Handle<'_>, name: &CStr) -> nix::Result<()> {
        // SAFETY: both strings are NUL-terminated and outlive the call.
        let ret = unsafe {
            match handle {
                Handle::Path(path) => libc::removexattr(path.as_ptr(), name.as_ptr(), 0),
                Handle::Link(path) => {
                    libc::removexattr(path.as_ptr(), name.as_ptr(), libc::XATTR_NOFOLLOW)
                }
                Handle::Fd(fd) => libc::fremovexattr(fd, name.as_ptr(), 0),
            }
        };
        Errno::result(ret).map(drop)
    }

    fn list(handle: Handle<'_>, buf: &mut [u8]) -> nix::Result<usize> {
        let len = buf.len();
        let names = out_ptr(buf).cast::<libc::c_char>();
        // SAFETY: `names` is null or points to `len` writable bytes.
        let ret = unsafe {
            match handle {
                Handle::Path(path) => libc::listxattr(path.as_ptr(), names, len, 0),
                Handle::Link(path) => {
                    libc::listxattr(path.as_ptr(), names, len, libc::XATTR_NOFOLLOW)
                }
                Handle::Fd(fd) => libc::flistxattr(fd, names, len, 0),
            }
        };
        byte_count(ret)
    }
}
