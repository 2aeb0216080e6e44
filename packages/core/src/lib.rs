//! XMessage Core: Typed Value Store
//!
//! A [`Message`] is a `what` tag plus at most sixteen named, typed slots. It is
//! the unit of parameter passing between components:
//! - Keys are interned [`Atom`]s, so lookup compares pointers, not text
//! - Payloads are a closed set of kinds ([`Kind`], [`Item`])
//! - Strings and vectors are owned; objects and nested messages are shared
//! - [`Message::dup`] copies deeply, except for objects
//!
//! Encoding a message for another process lives in `xmessage-wire`.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use xmessage_core::{Message, Rect};
//!
//! let mut format = Message::new(u32::from_be_bytes(*b"fmt "));
//! format.set_rect("crop", Rect::new(0, 0, 1280, 720)).unwrap();
//!
//! let mut msg = Message::new(u32::from_be_bytes(*b"cnfg"));
//! msg.set_message("format", Arc::new(format)).unwrap();
//! msg.set_reply_id(17).unwrap();
//!
//! assert_eq!(msg.sender_awaits_response(), Some(17));
//! let crop = msg.find_message("format").and_then(|f| f.find_rect("crop"));
//! assert_eq!(crop, Some(Rect::new(0, 0, 1280, 720)));
//! ```

mod debug;
mod error;
mod message;
mod object;
mod value;

pub use error::Error;
pub use message::{Message, MAX_ITEMS, MAX_NESTING_DEPTH, REPLY_ID_KEY};
pub use object::ObjectRef;
pub use value::{Item, Kind, Rect};

// Re-export the interner for convenience
pub use xmessage_atom::{atom_count, intern, Atom};
