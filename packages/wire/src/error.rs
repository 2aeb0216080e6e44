//! Error types for the wire layer.

use xmessage_core::Kind;

/// Errors raised while encoding, decoding, or moving wire bytes.
///
/// None of these are retryable: they mean the caller tried to send something
/// that cannot leave the process, or the bytes are corrupt.
#[derive(thiserror::Error, Debug)]
pub enum WireError {
    /// The message holds a slot whose kind has no wire form.
    #[error("{kind} slot '{key}' cannot cross process boundaries")]
    NotTransferable { key: String, kind: Kind },

    /// The kind tag is unknown, or names a kind with no wire form.
    #[error("unsupported kind tag {tag}")]
    UnsupportedKind { tag: i32 },

    /// The input ended in the middle of a field.
    #[error("unexpected end of input at offset {offset}: {needed} more bytes needed")]
    Truncated { offset: usize, needed: usize },

    /// A slot or element count is negative or out of range.
    #[error("invalid {field} count {count}")]
    InvalidCount { field: &'static str, count: i32 },

    /// Key or string text is not UTF-8.
    #[error("text at offset {offset} is not valid UTF-8")]
    InvalidUtf8 { offset: usize },

    /// Key or string text contains a NUL byte and cannot be NUL-terminated.
    #[error("text {text:?} contains an interior NUL byte")]
    InteriorNul { text: String },

    /// Messages nest deeper than the codec accepts.
    #[error("messages nested deeper than {limit} levels")]
    NestingTooDeep { limit: usize },

    /// Bytes remain after the top-level message.
    #[error("{count} trailing bytes after message")]
    TrailingBytes { count: usize },

    /// The decoded message could not be rebuilt.
    #[error("store error: {0}")]
    Store(#[from] xmessage_core::Error),

    /// The transport failed to move the bytes.
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl From<std::io::Error> for WireError {
    fn from(e: std::io::Error) -> Self {
        WireError::Transport(Box::new(e))
    }
}
