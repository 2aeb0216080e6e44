//! Message encoding and decoding.
//!
//! Layout of one message:
//!
//! ```text
//! what:  i32
//! count: i32
//! count times:
//!     key:  NUL-terminated text
//!     tag:  i32 (see Kind::tag)
//!     payload, by kind:
//!         Int32        i32
//!         Int64        i64
//!         Size         i32, truncated to 32 bits
//!         Float        f32
//!         Double       f64
//!         String       NUL-terminated text
//!         Int32Vector  i32 length, then that many i32
//!         Message      a nested message with this same layout
//! ```
//!
//! Nested messages carry no length prefix; the decoder follows the grammar.
//! `Pointer`, `Object` and `Rect` slots have no wire form.

use std::sync::Arc;

use bytes::{Bytes, BytesMut};
use xmessage_core::{Atom, Item, Kind, Message, MAX_ITEMS, MAX_NESTING_DEPTH};

use crate::buf::{WireReader, WireWriter};
use crate::WireError;

/// Encode `msg` into a new buffer.
///
/// # Errors
///
/// Fails with [`WireError::NotTransferable`] if `msg`, or any message nested
/// in it, holds a `Pointer`, `Object` or `Rect` slot.
pub fn encode(msg: &Message) -> Result<Bytes, WireError> {
    let mut buf = BytesMut::new();
    encode_into(msg, &mut buf)?;
    log::debug!(
        "encoded message {:#010x} with {} slots into {} bytes",
        msg.what(),
        msg.len(),
        buf.len()
    );
    Ok(buf.freeze())
}

/// Append the encoding of `msg` to `buf`.
///
/// On error `buf` is restored to its original length, so nothing of a
/// rejected message is left behind.
pub fn encode_into(msg: &Message, buf: &mut BytesMut) -> Result<(), WireError> {
    let start = buf.len();
    let result = write_message(&mut WireWriter::new(buf), msg);
    if result.is_err() {
        buf.truncate(start);
    }
    result
}

fn write_message(w: &mut WireWriter<'_>, msg: &Message) -> Result<(), WireError> {
    w.write_i32(msg.what() as i32);
    w.write_i32(msg.len() as i32);

    for (key, item) in msg.iter() {
        let kind = item.kind();
        w.write_cstr(key.as_str())?;
        w.write_i32(kind.tag());

        match item {
            Item::Int32(v) => w.write_i32(*v),
            Item::Int64(v) => w.write_i64(*v),
            Item::Size(v) => w.write_i32(*v as i32),
            Item::Float(v) => w.write_f32(*v),
            Item::Double(v) => w.write_f64(*v),
            Item::String(s) => w.write_cstr(s)?,
            Item::Int32Vector(values) => {
                w.write_i32(values.len() as i32);
                for v in values {
                    w.write_i32(*v);
                }
            }
            Item::Message(child) => write_message(w, child)?,
            Item::Pointer(_) | Item::Object(_) | Item::Rect(_) => {
                log::error!("{} slot '{}' cannot cross process boundaries", kind, key);
                return Err(WireError::NotTransferable {
                    key: key.to_string(),
                    kind,
                })
            }
        }
    }

    Ok(())
}

/// Decode a message from `bytes`.
///
/// The input must hold exactly one encoded message. Keys are interned as they
/// are read.
///
/// # Errors
///
/// Fails with [`WireError::UnsupportedKind`] on an unknown kind tag or on a
/// tag for a kind that has no wire form, and with the other [`WireError`]
/// variants on malformed input.
pub fn decode(bytes: &[u8]) -> Result<Message, WireError> {
    let mut r = WireReader::new(bytes);
    let msg = read_message(&mut r, 0)?;

    if r.remaining() > 0 {
        return Err(WireError::TrailingBytes {
            count: r.remaining(),
        });
    }

    log::debug!(
        "decoded message {:#010x} with {} slots from {} bytes",
        msg.what(),
        msg.len(),
        bytes.len()
    );
    Ok(msg)
}

// Messages cannot be built deeper than MAX_NESTING_DEPTH, so anything deeper
// on the wire is malformed.
fn read_message(r: &mut WireReader<'_>, depth: usize) -> Result<Message, WireError> {
    if depth > MAX_NESTING_DEPTH {
        return Err(WireError::NestingTooDeep {
            limit: MAX_NESTING_DEPTH,
        });
    }

    let what = r.read_i32()? as u32;
    let count = r.read_i32()?;
    if count < 0 || count as usize > MAX_ITEMS {
        return Err(WireError::InvalidCount {
            field: "slot",
            count,
        });
    }

    let mut msg = Message::new(what);
    for _ in 0..count {
        let key = Atom::intern(r.read_cstr()?);
        let tag = r.read_i32()?;

        let item = match Kind::from_tag(tag) {
            Some(Kind::Int32) => Item::Int32(r.read_i32()?),
            Some(Kind::Int64) => Item::Int64(r.read_i64()?),
            Some(Kind::Size) => Item::Size(r.read_i32()? as u32 as usize),
            Some(Kind::Float) => Item::Float(r.read_f32()?),
            Some(Kind::Double) => Item::Double(r.read_f64()?),
            Some(Kind::String) => Item::String(r.read_cstr()?.to_string()),
            Some(Kind::Int32Vector) => Item::Int32Vector(read_int32_vector(r)?),
            Some(Kind::Message) => Item::Message(Arc::new(read_message(r, depth + 1)?)),
            Some(Kind::Pointer) | Some(Kind::Object) | Some(Kind::Rect) | None => {
                log::error!("slot '{}' has kind tag {} which cannot be decoded", key, tag);
                return Err(WireError::UnsupportedKind { tag });
            }
        };

        msg.set(key, item)?;
    }

    Ok(msg)
}

fn read_int32_vector(r: &mut WireReader<'_>) -> Result<Vec<i32>, WireError> {
    let len = r.read_i32()?;
    if len < 0 {
        return Err(WireError::InvalidCount {
            field: "vector element",
            count: len,
        });
    }

    let len = len as usize;
    // Check the whole payload is present before allocating for it.
    if r.remaining() / 4 < len {
        return Err(WireError::Truncated {
            offset: r.offset(),
            needed: len.saturating_mul(4) - r.remaining(),
        });
    }

    (0..len).map(|_| r.read_i32()).collect()
}
