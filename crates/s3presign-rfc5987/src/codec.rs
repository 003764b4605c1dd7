//! Byte-level RFC 5987 encoder and decoder.
//!
//! The encoder keeps `attr-char` bytes as they are and escapes everything else:
//!
//! ```text
//! attr-char = ALPHA / DIGIT
//!           / "!" / "#" / "$" / "&" / "+" / "-" / "."
//!           / "^" / "_" / "`" / "|" / "~"
//! ```
//!
//! The decoder reads the input as a sequence of `%XX` escapes (hex digits in
//! either case) and single non-whitespace characters. Whitespace between tokens
//! is skipped. A `%` that is not followed by two hex digits is an error.

use crate::error::Rfc5987Error;

const ATTR_CHARS: &[u8] =
    b"!#$&+-.0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ^_`abcdefghijklmnopqrstuvwxyz|~";

const HEX_DIGITS: &[u8; 16] = b"0123456789ABCDEF";

/// Membership table for [`ATTR_CHARS`], indexed by byte value.
const ATTR_CHAR_TABLE: [bool; 256] = {
    let mut table = [false; 256];
    let mut i = 0;
    while i < ATTR_CHARS.len() {
        table[ATTR_CHARS[i] as usize] = true;
        i += 1;
    }
    table
};

/// Whether `byte` may appear unescaped in an encoded value.
///
/// # Examples
///
/// ```
/// use s3presign_rfc5987::is_attr_char;
///
/// assert!(is_attr_char(b'~'));
/// assert!(!is_attr_char(b'%'));
/// assert!(!is_attr_char(b' '));
/// ```
#[must_use]
pub const fn is_attr_char(byte: u8) -> bool {
    ATTR_CHAR_TABLE[byte as usize]
}

/// Encode raw bytes.
///
/// # Examples
///
/// ```
/// use s3presign_rfc5987::encode;
///
/// assert_eq!(encode(b"100%"), "100%25");
/// assert_eq!(encode(&[0x00, 0xff]), "%00%FF");
/// ```
#[must_use]
pub fn encode(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 2);
    for &b in bytes {
        if is_attr_char(b) {
            out.push(char::from(b));
        } else {
            out.push('%');
            out.push(char::from(HEX_DIGITS[usize::from(b >> 4)]));
            out.push(char::from(HEX_DIGITS[usize::from(b & 0x0f)]));
        }
    }
    out
}

/// Encode the UTF-8 bytes of a string.
#[must_use]
pub fn encode_utf8(value: &str) -> String {
    encode(value.as_bytes())
}

/// Decode an encoded value back into raw bytes.
///
/// # Errors
///
/// Returns [`Rfc5987Error::MalformedEscape`] if a `%` is not followed by two
/// hex digits, including a `%` at the very end of the input.
///
/// # Examples
///
/// ```
/// use s3presign_rfc5987::{Rfc5987Error, decode};
///
/// assert_eq!(decode("a%20b").unwrap(), b"a b");
/// assert_eq!(decode("%e2%88%86").unwrap(), "∆".as_bytes());
/// assert_eq!(decode("abc%"), Err(Rfc5987Error::MalformedEscape { position: 3 }));
/// ```
pub fn decode(input: &str) -> Result<Vec<u8>, Rfc5987Error> {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'%' => {
                let hi = bytes.get(i + 1).copied().and_then(hex_value);
                let lo = bytes.get(i + 2).copied().and_then(hex_value);
                match (hi, lo) {
                    (Some(hi), Some(lo)) => out.push((hi << 4) | lo),
                    _ => return Err(Rfc5987Error::MalformedEscape { position: i }),
                }
                i += 3;
            }
            b if is_whitespace(b) => i += 1,
            b => {
                out.push(b);
                i += 1;
            }
        }
    }

    Ok(out)
}

/// Decode an encoded value and interpret the result as UTF-8.
///
/// # Errors
///
/// Returns [`Rfc5987Error::MalformedEscape`] on a bad escape, or
/// [`Rfc5987Error::InvalidUtf8`] if the decoded bytes are not UTF-8.
pub fn decode_utf8(input: &str) -> Result<String, Rfc5987Error> {
    String::from_utf8(decode(input)?).map_err(|_| Rfc5987Error::InvalidUtf8)
}

/// Build a `Content-Disposition` value carrying a UTF-8 `filename*` parameter.
///
/// `disposition` is the disposition type, usually `inline` or `attachment`.
///
/// # Examples
///
/// ```
/// use s3presign_rfc5987::content_disposition;
///
/// assert_eq!(
///     content_disposition("inline", "My Fåncy Nam∆.jpg"),
///     "inline;filename*=UTF-8''My%20F%C3%A5ncy%20Nam%E2%88%86.jpg"
/// );
/// ```
#[must_use]
pub fn content_disposition(disposition: &str, filename: &str) -> String {
    format!("{disposition};filename*=UTF-8''{}", encode_utf8(filename))
}

fn hex_value(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

/// ASCII whitespace, including vertical tab.
fn is_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\x0b' | b'\x0c' | b'\r')
}
