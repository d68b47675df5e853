//! Extended attributes on open file descriptors
//!
//! Binding to a descriptor avoids resolving the path a second time, which
//! closes the window where the path could be swapped for a different file
//! between `open` and the xattr call. Prefer these over the path functions
//! when a handle is already open.

use crate::accessor::{self, Site};
use crate::error::Result;
use crate::mode::SetMode;
use std::ffi::{OsStr, OsString};
use std::os::fd::AsFd;

/// Trait for xattr operations on anything that owns or borrows a descriptor
///
/// Implemented for every [`AsFd`] type: `std::fs::File`, `OwnedFd`,
/// `BorrowedFd`, and references to them.
pub trait XattrOps {
    /// Get an extended attribute value
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// - The extended attribute doesn't exist (`ENOATTR`)
    /// - The filesystem does not support extended attributes
    /// - The value grew between the size probe and the read (`ERANGE`)
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use fs_xattr::XattrOps;
    /// use std::fs::File;
    ///
    /// # fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let file = File::open("file.txt")?;
    /// let value = file.get_xattr("user.custom")?;
    /// println!("xattr value: {:?}", value);
    /// # Ok(())
    /// # }
    /// ```
    fn get_xattr<N: AsRef<OsStr>>(&self, name: N) -> Result<Vec<u8>>;

    /// Set an extended attribute value, creating or replacing it
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// - Permission is denied
    /// - The name or value exceeds a filesystem limit
    fn set_xattr<N: AsRef<OsStr>>(&self, name: N, value: &[u8]) -> Result<()> {
        self.set_xattr_with_mode(name, value, SetMode::Upsert)
    }

    /// Set an extended attribute value with create-only or replace-only semantics
    ///
    /// # Errors
    ///
    /// As [`XattrOps::set_xattr`], plus `EEXIST` for [`SetMode::Create`] on an
    /// existing attribute and `ENOATTR` for [`SetMode::Replace`] on a missing one.
    fn set_xattr_with_mode<N: AsRef<OsStr>>(
        &self,
        name: N,
        value: &[u8],
        mode: SetMode,
    ) -> Result<()>;

    /// Remove an extended attribute
    ///
    /// # Errors
    ///
    /// Returns an error if the attribute does not exist or cannot be removed.
    fn remove_xattr<N: AsRef<OsStr>>(&self, name: N) -> Result<()>;

    /// List all extended attribute names
    ///
    /// # Errors
    ///
    /// Returns an error if the filesystem does not support extended attributes
    /// or the list changed size between probe and read.
    fn list_xattr(&self) -> Result<Vec<OsString>>;
}

impl<T: AsFd + ?Sized> XattrOps for T {
    fn get_xattr<N: AsRef<OsStr>>(&self, name: N) -> Result<Vec<u8>> {
        accessor::get(Site::Fd(self.as_fd()), name.as_ref())
    }

    fn set_xattr_with_mode<N: AsRef<OsStr>>(
        &self,
        name: N,
        value: &[u8],
        mode: SetMode,
    ) -> Result<()> {
        accessor::set(Site::Fd(self.as_fd()), name.as_ref(), value, mode)
    }

    fn remove_xattr<N: AsRef<OsStr>>(&self, name: N) -> Result<()> {
        accessor::remove(Site::Fd(self.as_fd()), name.as_ref())
    }

    fn list_xattr(&self) -> Result<Vec<OsString>> {
        accessor::list(Site::Fd(self.as_fd()))
    }
}
