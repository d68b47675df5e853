//! Decoding of attribute name lists
//!
//! The list syscalls fill a flat byte buffer with every attribute name. The
//! layout depends on the platform:
//!
//! - **NUL-terminated** (Linux, Darwin): `name\0name\0...`, every entry
//!   including the last one is terminated.
//! - **Length-prefixed** (FreeBSD `extattr_list_*`): one length byte followed
//!   by that many name bytes, no terminator.
//!
//! Names come back in kernel order. Duplicates are not removed.

use std::ffi::OsString;
use std::os::unix::ffi::OsStringExt;
use thiserror::Error;

/// Wire format of a name list buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListFormat {
    /// Each name is followed by a NUL byte
    NulTerminated,
    /// Each name is preceded by a single length byte (0-255)
    LengthPrefixed,
}

/// A name list buffer that does not follow its wire format
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// The buffer ends inside a name that has no NUL terminator
    #[error("unterminated attribute name at offset {offset}")]
    Unterminated {
        /// Start of the unterminated name
        offset: usize,
    },
    /// A length byte claims more bytes than the buffer holds
    #[error("attribute name at offset {offset} claims {len} bytes but only {remaining} remain")]
    Overrun {
        /// Position of the length byte
        offset: usize,
        /// The claimed name length
        len: usize,
        /// Bytes left after the length byte
        remaining: usize,
    },
}

/// Decode a list buffer in the given format
///
/// # Errors
///
/// Returns [`DecodeError`] if the buffer is truncated mid-entry.
pub fn decode_names(format: ListFormat, buf: &[u8]) -> Result<Vec<OsString>, DecodeError> {
    match format {
        ListFormat::NulTerminated => decode_nul_terminated(buf),
        ListFormat::LengthPrefixed => decode_length_prefixed(buf),
    }
}

/// Split `name\0name\0...` into names
///
/// A trailing fragment without a terminator is rejected rather than returned
/// or dropped.
///
/// # Errors
///
/// Returns [`DecodeError::Unterminated`] if the last byte is not NUL.
pub fn decode_nul_terminated(buf: &[u8]) -> Result<Vec<OsString>, DecodeError> {
    let Some(body) = buf.strip_suffix(&[0]) else {
        if buf.is_empty() {
            return Ok(Vec::new());
        }
        let offset = buf.iter().rposition(|&b| b == 0).map_or(0, |i| i + 1);
        return Err(DecodeError::Unterminated { offset });
    };

    Ok(body
        .split(|&b| b == 0)
        .map(|name| OsString::from_vec(name.to_vec()))
        .collect())
}

/// Split `[len]name[len]name...` into names
///
/// # Errors
///
/// Returns [`DecodeError::Overrun`] if a length byte points past the end of
/// the buffer.
pub fn decode_length_prefixed(buf: &[u8]) -> Result<Vec<OsString>, DecodeError> {
    let mut names = Vec::new();
    let mut offset = 0;

    while let Some(&len) = buf.get(offset) {
        let len = usize::from(len);
        let start = offset + 1;
        let Some(name) = buf.get(start..start + len) else {
            return Err(DecodeError::Overrun {
                offset,
                len,
                remaining: buf.len() - start,
            });
        };
        names.push(OsString::from_vec(name.to_vec()));
        offset = start + len;
    }

    Ok(names)
}
