//! Attribute copying between open files
//!
//! Both ends are driven through descriptors ([`XattrOps`]), so a rename of
//! either path while the copy runs cannot redirect reads or writes to a
//! different file.

use fs_xattr::{XattrError, XattrOps};
use std::ffi::OsStr;

/// Outcome of [`copy_xattrs`]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CopyReport {
    /// Attributes written to the destination
    pub copied: usize,
    /// Attributes that could not be read or written
    pub failed: usize,
    /// Attributes that disappeared from the source between list and read
    pub vanished: usize,
}

impl CopyReport {
    /// Whether no attribute failed to copy
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failed == 0
    }
}

/// Copy every extended attribute from `src` to `dst`
///
/// A failure on one attribute is logged and counted, and the remaining
/// attributes are still copied. With `skip_unsupported`, a source or
/// destination filesystem that has no attribute support ends the copy early
/// without an error.
///
/// # Errors
///
/// Returns an error if the source attribute names cannot be listed.
pub fn copy_xattrs<S, D>(src: &S, dst: &D, skip_unsupported: bool) -> Result<CopyReport, XattrError>
where
    S: XattrOps + ?Sized,
    D: XattrOps + ?Sized,
{
    let mut report = CopyReport::default();

    let names = match src.list_xattr() {
        Ok(names) => names,
        Err(e) if skip_unsupported && e.is_unsupported() => {
            tracing::debug!("source has no extended attribute support: {e}");
            return Ok(report);
        }
        Err(e) => return Err(e),
    };
    tracing::debug!("copying {} extended attributes", names.len());

    for name in names {
        let value = match src.get_xattr(&name) {
            Ok(value) => value,
            Err(e) if e.is_not_found() => {
                tracing::debug!("extended attribute '{}' vanished before read", lossy(&name));
                report.vanished += 1;
                continue;
            }
            Err(e) => {
                tracing::warn!("Failed to read extended attribute '{}': {}", lossy(&name), e);
                report.failed += 1;
                continue;
            }
        };

        match dst.set_xattr(&name, &value) {
            Ok(()) => {
                tracing::trace!("copied '{}' ({} bytes)", lossy(&name), value.len());
                report.copied += 1;
            }
            Err(e) if skip_unsupported && e.is_unsupported() => {
                tracing::warn!("destination does not support extended attributes: {e}");
                return Ok(report);
            }
            Err(e) => {
                // Log warning but continue with other xattrs
                tracing::warn!(
                    "Failed to preserve extended attribute '{}': {}",
                    lossy(&name),
                    e
                );
                report.failed += 1;
            }
        }
    }

    Ok(report)
}

fn lossy(name: &OsStr) -> std::borrow::Cow<'_, str> {
    name.to_string_lossy()
}
