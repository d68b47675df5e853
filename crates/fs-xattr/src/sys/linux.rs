//! Linux `*xattr(2)` family
//!
//! Follow, no-follow and descriptor forms are separate syscalls
//! (`getxattr`/`lgetxattr`/`fgetxattr`, ...). Names carry their namespace
//! prefix (`user.`, `trusted.`, ...) and the list buffer is NUL-terminated.

use super::{byte_count, in_ptr, out_ptr, Handle, Syscalls};
use crate::mode::SetMode;
use crate::names::ListFormat;
use nix::errno::Errno;
use std::ffi::CStr;

pub(crate) struct Native;

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
                Handle::Path(path) => libc::getxattr(path.as_ptr(), name.as_ptr(), value, len),
                Handle::Link(path) => libc::lgetxattr(path.as_ptr(), name.as_ptr(), value, len),
                Handle::Fd(fd) => libc::fgetxattr(fd, name.as_ptr(), value, len),
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
                    libc::setxattr(path.as_ptr(), name.as_ptr(), data, len, flags)
                }
                Handle::Link(path) => {
                    libc::lsetxattr(path.as_ptr(), name.as_ptr(), data, len, flags)
                }
                Handle::Fd(fd) => libc::fsetxattr(fd, name.as_ptr(), data, len, flags),
            }
        };
        Errno::result(ret).map(drop)
    }

    fn remove(handle: Handle<'_>, name: &CStr) -> nix::Result<()> {
        // SAFETY: both strings are NUL-terminated and outlive the call.
        let ret = unsafe {
            match handle {
                Handle::Path(path) => libc::removexattr(path.as_ptr(), name.as_ptr()),
                Handle::Link(path) => libc::lremovexattr(path.as_ptr(), name.as_ptr()),
                Handle::Fd(fd) => libc::fremovexattr(fd, name.as_ptr()),
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
                Handle::Path(path) => libc::listxattr(path.as_ptr(), names, len),
                Handle::Link(path) => libc::llistxattr(path.as_ptr(), names, len),
                Handle::Fd(fd) => libc::flistxattr(fd, names, len),
            }
        };
        byte_count(ret)
    }
}
