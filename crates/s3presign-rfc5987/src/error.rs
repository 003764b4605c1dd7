//! Error types for RFC 5987 decoding.

/// Errors that can occur while decoding an RFC 5987 value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Rfc5987Error {
    /// A `%` is not followed by two hex digits (including a trailing lone `%`).
    #[error("malformed percent escape at byte offset {position}")]
    MalformedEscape {
        /// Byte offset of the offending `%` in the input.
        position: usize,
    },

    /// The decoded bytes are not valid UTF-8.
    #[error("decoded value is not valid UTF-8")]
    InvalidUtf8,
}
