//! Error types for the store layer.
//!
//! Lookup misses are not errors (finders return `Option`). The only failure a
//! store can report is a violated precondition: too many slots, or messages
//! nested too deep.

/// Errors raised while mutating a [`Message`](crate::Message).
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A new key was inserted into a message that already holds the maximum
    /// number of slots.
    #[error("message is full: cannot add key '{key}' beyond {capacity} slots")]
    CapacityExceeded { key: String, capacity: usize },

    /// A nested message was stored that would push the chain of messages
    /// below this one past the nesting limit.
    #[error("cannot nest message under '{key}': more than {limit} levels deep")]
    NestingTooDeep { key: String, limit: usize },
}
