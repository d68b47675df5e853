//! FreeBSD `extattr_*(2)` family
//!
//! The namespace is a separate argument rather than a name prefix; this
//! backend always uses the user namespace and passes the name through as-is.
//! List buffers are length-prefixed. There is no create/replace flag, so
//! those modes are checked with a lookup before writing.

use super::{byte_count, in_ptr, out_ptr, verify_accepted, Handle, Syscalls};
use crate::mode::SetMode;
use crate::names::ListFormat;
use nix::errno::Errno;
use std::ffi::CStr;

pub(crate) struct Native;

/// `EXTATTR_NAMESPACE_USER` from `<sys/extattr.h>`
const EXTATTR_NAMESPACE_USER: libc::c_int = 1;

impl Native {
    /// An `EINTR` here leaves `set` early and the whole call is restarted
    fn check_mode(handle: Handle<'_>, name: &CStr, mode: SetMode) -> nix::Result<()> {
        let exists = match Self::get(handle, name, &mut []) {
            Ok(_) => true,
            Err(Errno::ENOATTR) => false,
            Err(errno) => return Err(errno),
        };
        match (mode, exists) {
            (SetMode::Create, true) => Err(Errno::EEXIST),
            (SetMode::Replace, false) => Err(Errno::ENOATTR),
            _ => Ok(()),
        }
    }
}

impl Syscalls for Native {
    const LIST_FORMAT: ListFormat = ListFormat::LengthPrefixed;

    fn get(handle: Handle<'_>, name: &CStr, buf: &mut [u8]) -> nix::Result<usize> {
        let len = buf.len();
        let data = out_ptr(buf);
        let ns = EXTATTR_NAMESPACE_USER;
        // SAFETY: `data` is null or points to `len` writable bytes; both
        // strings are NUL-terminated and outlive the call.
        let ret = unsafe {
            match handle {
                Handle::Path(path) => {
                    libc::extattr_get_file(path.as_ptr(), ns, name.as_ptr(), data, len)
                }
                Handle::Link(path) => {
                    libc::extattr_get_link(path.as_ptr(), ns, name.as_ptr(), data, len)
                }
                Handle::Fd(fd) => libc::extattr_get_fd(fd, ns, name.as_ptr(), data, len),
            }
        };
        byte_count(ret)
    }

    fn set(handle: Handle<'_>, name: &CStr, value: &[u8], mode: SetMode) -> nix::Result<()> {
        if mode != SetMode::Upsert {
            log::debug!("emulating {mode:?} with an existence check");
            Self::check_mode(handle, name, mode)?;
        }

        let data = in_ptr(value);
        let len = value.len();
        let ns = EXTATTR_NAMESPACE_USER;
        // SAFETY: `data` is null or points to `len` readable bytes.
        let ret = unsafe {
            match handle {
                Handle::Path(path) => {
                    libc::extattr_set_file(path.as_ptr(), ns, name.as_ptr(), data, len)
                }
                Handle::Link(path) => {
                    libc::extattr_set_link(path.as_ptr(), ns, name.as_ptr(), data, len)
                }
                Handle::Fd(fd) => libc::extattr_set_fd(fd, ns, name.as_ptr(), data, len),
            }
        };
        verify_accepted(byte_count(ret)?, len)
    }

    fn remove(handle: Handle<'_>, name: &CStr) -> nix::Result<()> {
        let ns = EXTATTR_NAMESPACE_USER;
        // SAFETY: both strings are NUL-terminated and outlive the call.
        let ret = unsafe {
            match handle {
                Handle::Path(path) => libc::extattr_delete_file(path.as_ptr(), ns, name.as_ptr()),
                Handle::Link(path) => libc::extattr_delete_link(path.as_ptr(), ns, name.as_ptr()),
                Handle::Fd(fd) => libc::extattr_delete_fd(fd, ns, name.as_ptr()),
            }
        };
        Errno::result(ret).map(drop)
    }

    fn list(handle: Handle<'_>, buf: &mut [u8]) -> nix::Result<usize> {
        let len = buf.len();
        let data = out_ptr(buf);
        let ns = EXTATTR_NAMESPACE_USER;
        // SAFETY: `data` is null or points to `len` writable bytes.
        let ret = unsafe {
            match handle {
                Handle::Path(path) => libc::extattr_list_file(path.as_ptr(), ns, data, len),
                Handle::Link(path) => libc::extattr_list_link(path.as_ptr(), ns, data, len),
                Handle::Fd(fd) => libc::extattr_list_fd(fd, ns, data, len),
            }
        };
        byte_count(ret)
    }
}
