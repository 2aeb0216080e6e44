//! Serde Integration for XMessage
//!
//! This layer provides typed access to messages via serde. It adds:
//! - `from_message` / `to_message`: whole-message conversion
//! - `TypedMessage`: read and write Rust types as nested messages
//! - Message <-> `serde_json::Value` conversions
//!
//! # Example
//!
//! ```rust
//! use serde::{Deserialize, Serialize};
//! use xmessage_serde::{from_message, to_message};
//!
//! #[derive(Debug, PartialEq, Serialize, Deserialize)]
//! struct Open {
//!     path: String,
//!     flags: i32,
//! }
//!
//! let open = Open { path: "/data/a.mp4".into(), flags: 2 };
//! let msg = to_message(u32::from_be_bytes(*b"open"), &open).unwrap();
//! assert_eq!(msg.find_string("path"), Some("/data/a.mp4"));
//!
//! let back: Open = from_message(&msg).unwrap();
//! assert_eq!(back, open);
//! ```

mod convert;
mod error;
mod typed;

pub use convert::{from_message, json_to_message, message_to_json, to_message};
pub use error::Error;
pub use typed::TypedMessage;

// Re-export core types for convenience
pub use xmessage_core::{Item, Kind, Message};
