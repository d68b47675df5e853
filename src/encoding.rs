//! Attribute value encodings for display and input
//!
//! Output follows the `getfattr -e` conventions:
//!
//! - **text**: `"..."`, with `\`, `"` and non-printable bytes written as
//!   three-digit octal escapes (`\012`)
//! - **hex**: `0x` followed by lowercase hex digits
//! - **base64**: `0s` followed by standard base64
//!
//! Input ([`decode_value`]) recognises the same prefixes; anything else is
//! taken as raw text.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use thiserror::Error;

/// How attribute values are printed
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Encoding {
    /// Quoted text with octal escapes
    #[default]
    Text,
    /// `0x`-prefixed hexadecimal
    Hex,
    /// `0s`-prefixed base64
    Base64,
}

/// A value given on the command line could not be decoded
#[derive(Debug, Error)]
pub enum ValueError {
    #[error("invalid hex value: {0}")]
    Hex(#[from] hex::FromHexError),
    #[error("invalid base64 value: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("invalid escape sequence at byte {position}")]
    Escape { position: usize },
    #[error("unterminated quoted value")]
    Unterminated,
}

/// Render a value in the given encoding
#[must_use]
pub fn encode_value(value: &[u8], encoding: Encoding) -> String {
    match encoding {
        Encoding::Text => quote(value),
        Encoding::Hex => format!("0x{}", hex::encode(value)),
        Encoding::Base64 => format!("0s{}", STANDARD.encode(value)),
    }
}

fn quote(value: &[u8]) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for &byte in value {
        match byte {
            b'\\' => out.push_str("\\\\"),
            b'"' => out.push_str("\\\""),
            0x20..=0x7e => out.push(char::from(byte)),
            _ => out.push_str(&format!("\\{byte:03o}")),
        }
    }
    out.push('"');
    out
}

/// Parse a value given on the command line
///
/// # Errors
///
/// Returns [`ValueError`] if a `0x`/`0s` payload is malformed, or a quoted
/// value has a bad escape or no closing quote.
pub fn decode_value(input: &str) -> Result<Vec<u8>, ValueError> {
    if let Some(digits) = input.strip_prefix("0x").or_else(|| input.strip_prefix("0X")) {
        return Ok(hex::decode(digits)?);
    }
    if let Some(data) = input.strip_prefix("0s").or_else(|| input.strip_prefix("0S")) {
        return Ok(STANDARD.decode(data)?);
    }
    if let Some(quoted) = input.strip_prefix('"') {
        let body = quoted.strip_suffix('"').ok_or(ValueError::Unterminated)?;
        return unquote(body);
    }
    Ok(input.as_bytes().to_vec())
}

fn unquote(body: &str) -> Result<Vec<u8>, ValueError> {
    let bytes = body.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] != b'\\' {
            out.push(bytes[i]);
            i += 1;
            continue;
        }
        match bytes.get(i + 1..i + 4) {
            Some(&[b'\\', ..]) => {
                out.push(b'\\');
                i += 2;
            }
            Some(&[b'"', ..]) => {
                out.push(b'"');
                i += 2;
            }
            Some(digits) if digits.iter().all(|d| (b'0'..=b'7').contains(d)) => {
                let text = std::str::from_utf8(digits)
                    .map_err(|_| ValueError::Escape { position: i })?;
                let byte =
                    u8::from_str_radix(text, 8).map_err(|_| ValueError::Escape { position: i })?;
                out.push(byte);
                i += 4;
            }
            _ => {
                // Two-byte escapes at the very end have fewer than three bytes after them
                match bytes.get(i + 1) {
                    Some(b'\\') => out.push(b'\\'),
                    Some(b'"') => out.push(b'"'),
                    _ => return Err(ValueError::Escape { position: i }),
                }
                i += 2;
            }
        }
    }
    Ok(out)
}
