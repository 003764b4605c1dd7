//! RFC 5987 encoding of HTTP header parameter values.
//!
//! Header parameters such as the `filename*` of a `Content-Disposition` header
//! can only carry a small set of ASCII characters verbatim. Every other byte is
//! written as `%` followed by two uppercase hex digits:
//!
//! ```text
//! filename*=UTF-8''My%20F%C3%A5ncy%20Nam%E2%88%86.jpg
//! ```
//!
//! # Usage
//!
//! ```rust
//! use s3presign_rfc5987::{content_disposition, decode_utf8, encode_utf8};
//!
//! let encoded = encode_utf8("My Fåncy Nam∆.jpg");
//! assert_eq!(encoded, "My%20F%C3%A5ncy%20Nam%E2%88%86.jpg");
//! assert_eq!(decode_utf8(&encoded).unwrap(), "My Fåncy Nam∆.jpg");
//!
//! assert_eq!(
//!     content_disposition("attachment", "a b.txt"),
//!     "attachment;filename*=UTF-8''a%20b.txt"
//! );
//! ```
//!
//! # Modules
//!
//! - [`codec`] - Byte-level encoder and decoder
//! - [`error`] - Decoding error types

pub mod codec;
pub mod error;

pub use codec::{content_disposition, decode, decode_utf8, encode, encode_utf8, is_attr_char};
pub use error::Rfc5987Error;
