//! XMessage: a small, fixed-capacity, typed key/value message.
//!
//! Messages carry structured parameters between components, and across a
//! process boundary when encoded with [`wire`]. This crate re-exports the
//! layers:
//! - [`atom`]: key interning
//! - [`message`]: the message, its kinds, duplication, and debug dump
//! - [`wire`]: the binary codec and transport seam
//! - [`typed`]: typed access through serde
//!
//! # Example
//!
//! ```rust
//! use xmessage::{decode, encode, Message};
//!
//! let mut msg = Message::new(0x4142_4344);
//! msg.set_int32("count", 5).unwrap();
//!
//! let back = decode(&encode(&msg).unwrap()).unwrap();
//! assert_eq!(back.to_string(), "Message(what = 'ABCD') = {\n  int32_t count = 5\n}");
//! ```

pub use xmessage_atom as atom;
pub use xmessage_core as message;
pub use xmessage_serde as typed;
pub use xmessage_wire as wire;

pub use xmessage_core::{
    Atom, Error, Item, Kind, Message, ObjectRef, Rect, MAX_ITEMS, MAX_NESTING_DEPTH,
    REPLY_ID_KEY,
};
pub use xmessage_serde::TypedMessage;
pub use xmessage_wire::{decode, encode, LoopbackTransport, Transport, WireError};
