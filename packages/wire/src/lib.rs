//! XMessage Wire: Cross-Process Encoding
//!
//! Turns a [`Message`] into a flat byte buffer and back, so it can be handed
//! to another process by some [`Transport`].
//!
//! Only kinds that mean something outside the producing process are encoded.
//! A message holding a raw pointer, a shared object, or a rectangle is
//! rejected with [`WireError::NotTransferable`] rather than sent with the
//! slot silently dropped.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use xmessage_core::Message;
//! use xmessage_wire::{decode, encode};
//!
//! let mut inner = Message::new(2);
//! inner.set_string("codec", "opus").unwrap();
//!
//! let mut msg = Message::new(1);
//! msg.set_int32_vector("channels", vec![0, 1]).unwrap();
//! msg.set_message("track", Arc::new(inner)).unwrap();
//!
//! let bytes = encode(&msg).unwrap();
//! let decoded = decode(&bytes).unwrap();
//! assert_eq!(decoded, msg);
//! ```

pub use bytes::Bytes;

mod buf;
mod codec;
mod error;
mod transport;

pub use buf::{WireReader, WireWriter};
pub use codec::{decode, encode, encode_into};
pub use error::WireError;
pub use transport::{recv_message, send_message, LoopbackTransport, Transport};

// Re-export core types for convenience
pub use xmessage_core::{Item, Kind, Message, MAX_NESTING_DEPTH};
