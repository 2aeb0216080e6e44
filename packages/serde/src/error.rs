use xmessage_core::Kind;

/// Errors converting between messages and serde types.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The slot's kind has no JSON counterpart.
    #[error("{kind} slot '{key}' has no JSON form")]
    Unrepresentable { key: String, kind: Kind },

    /// The serialized value has no message counterpart.
    #[error("cannot store '{key}' in a message: {reason}")]
    Unsupported { key: String, reason: String },

    /// Only maps (structs) can become messages.
    #[error("expected a map at the top level, found {found}")]
    NotAMap { found: &'static str },

    #[error("store error: {0}")]
    Store(#[from] xmessage_core::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
