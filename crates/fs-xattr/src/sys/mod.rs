//! Per-platform syscall bindings
//!
//! Each supported OS gets one module implementing [`Syscalls`]; exactly one is
//! compiled in and re-exported as `Native`. Nothing above this module knows
//! which syscall family is in use.
//!
//! | | Linux | Darwin | FreeBSD |
//! |---|---|---|---|
//! | follow | `getxattr` | `getxattr(.., 0)` | `extattr_get_file` |
//! | no-follow | `lgetxattr` | `getxattr(.., XATTR_NOFOLLOW)` | `extattr_get_link` |
//! | descriptor | `fgetxattr` | `fgetxattr` | `extattr_get_fd` |
//!
//! A zero-length buffer is always passed as a null pointer so the kernel
//! treats the call as a size probe.

use crate::mode::SetMode;
use crate::names::ListFormat;
use nix::errno::Errno;
use std::ffi::CStr;
use std::os::fd::RawFd;

#[cfg(any(target_os = "linux", target_os = "android"))]
mod linux;
#[cfg(any(target_os = "linux", target_os = "android"))]
pub(crate) use linux::Native;

#[cfg(any(target_os = "macos", target_os = "ios"))]
mod apple;
#[cfg(any(target_os = "macos", target_os = "ios"))]
pub(crate) use apple::Native;

#[cfg(target_os = "freebsd")]
mod freebsd;
#[cfg(target_os = "freebsd")]
pub(crate) use freebsd::Native;

/// A resolved target, ready to hand to the kernel
#[derive(Debug, Clone, Copy)]
pub(crate) enum Handle<'a> {
    /// Path, final symlink followed
    Path(&'a CStr),
    /// Path, final symlink not followed
    Link(&'a CStr),
    /// Open descriptor
    Fd(RawFd),
}

/// The capability set every platform backend provides
///
/// Return values are raw byte counts; the size-then-read protocol and error
/// normalization live in `accessor`.
pub(crate) trait Syscalls {
    /// Layout of the buffer filled by [`Syscalls::list`]
    const LIST_FORMAT: ListFormat;

    /// Read a value into `buf`, or report its size when `buf` is empty
    fn get(handle: Handle<'_>, name: &CStr, buf: &mut [u8]) -> nix::Result<usize>;

    /// Write a value
    fn set(handle: Handle<'_>, name: &CStr, value: &[u8], mode: SetMode) -> nix::Result<()>;

    /// Delete an attribute
    fn remove(handle: Handle<'_>, name: &CStr) -> nix::Result<()>;

    /// Read the name list into `buf`, or report its size when `buf` is empty
    fn list(handle: Handle<'_>, buf: &mut [u8]) -> nix::Result<usize>;
}

/// Destination pointer for a possibly empty buffer
fn out_ptr(buf: &mut [u8]) -> *mut libc::c_void {
    if buf.is_empty() {
        std::ptr::null_mut()
    } else {
        buf.as_mut_ptr().cast()
    }
}

/// Source pointer for a possibly empty value
fn in_ptr(value: &[u8]) -> *const libc::c_void {
    if value.is_empty() {
        std::ptr::null()
    } else {
        value.as_ptr().cast()
    }
}

/// Convert a successful `ssize_t` return into a byte count
fn byte_count(ret: libc::ssize_t) -> nix::Result<usize> {
    Errno::result(ret).map(libc::ssize_t::unsigned_abs)
}

/// Check that a write accepted the whole value
///
/// Some filesystems truncate instead of failing; a short write is reported as
/// `E2BIG` even though the syscall itself succeeded.
#[cfg_attr(not(target_os = "freebsd"), allow(dead_code))]
fn verify_accepted(written: usize, expected: usize) -> nix::Result<()> {
    if written == expected {
        Ok(())
    } else {
        log::debug!("xattr write accepted {written} of {expected} bytes");
        Err(Errno::E2BIG)
    }
}
