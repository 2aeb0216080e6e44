//! The message: a `what` tag plus a small ordered set of typed slots.

use std::sync::Arc;

use xmessage_atom::Atom;

use crate::{Error, Item, Kind, ObjectRef, Rect};

/// Maximum number of slots a message can hold.
pub const MAX_ITEMS: usize = 16;

/// Deepest chain of nested messages a message may hold below itself.
pub const MAX_NESTING_DEPTH: usize = 32;

/// Reserved key marking a message whose sender awaits a synchronous reply.
pub const REPLY_ID_KEY: &str = "replyID";

#[derive(Debug, PartialEq)]
struct Slot {
    key: Atom,
    item: Item,
}

/// A fixed-capacity typed key/value container.
///
/// Keys are interned [`Atom`]s and unique within a message: setting a key
/// that is already present replaces its payload in place. Slots keep their
/// insertion order, which is the order used by the debug formatter and the
/// wire codec.
///
/// Finders are kind-checked: a slot stored under one kind is invisible to the
/// finder of another.
///
/// # Example
///
/// ```rust
/// use xmessage_core::Message;
///
/// let mut msg = Message::new(u32::from_be_bytes(*b"strt"));
/// msg.set_int32("width", 640).unwrap();
/// msg.set_string("mime", "video/avc").unwrap();
///
/// assert_eq!(msg.find_int32("width"), Some(640));
/// assert_eq!(msg.find_int64("width"), None);
/// assert_eq!(msg.find_string("mime"), Some("video/avc"));
/// ```
#[derive(Debug, Default, PartialEq)]
pub struct Message {
    what: u32,
    slots: Vec<Slot>,
}

macro_rules! scalar_accessors {
    ($(($set:ident, $find:ident, $variant:ident, $ty:ty)),* $(,)?) => {
        $(
            #[doc = concat!("Store a `", stringify!($variant), "` under `key`.")]
            pub fn $set(&mut self, key: impl Into<Atom>, value: $ty) -> Result<(), Error> {
                self.set(key, Item::$variant(value))
            }

            #[doc = concat!("Find a `", stringify!($variant), "` stored under `key`.")]
            pub fn $find(&self, key: impl Into<Atom>) -> Option<$ty> {
                match self.get(key)? {
                    Item::$variant(value) => Some(*value),
                    _ => None,
                }
            }
        )*
    };
}

impl Message {
    /// Create an empty message.
    pub fn new(what: u32) -> Self {
        Message {
            what,
            slots: Vec::with_capacity(MAX_ITEMS),
        }
    }

    pub fn what(&self) -> u32 {
        self.what
    }

    pub fn set_what(&mut self, what: u32) {
        self.what = what;
    }

    /// Number of slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Length of the longest chain of messages nested below this one. A
    /// message with no nested messages has depth 0.
    pub fn nesting_depth(&self) -> usize {
        self.slots
            .iter()
            .filter_map(|slot| match &slot.item {
                Item::Message(child) => Some(child.nesting_depth() + 1),
                _ => None,
            })
            .max()
            .unwrap_or(0)
    }

    /// Release every slot. Calling it on an empty message does nothing.
    pub fn clear(&mut self) {
        self.slots.clear();
    }

    /// Store `item` under `key`.
    ///
    /// An existing slot for `key` is overwritten in place and its previous
    /// payload released. Otherwise a new slot is appended.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CapacityExceeded`] when `key` is new and the message
    /// already holds [`MAX_ITEMS`] slots, and [`Error::NestingTooDeep`] when
    /// `item` is a message whose own nesting would put this one past
    /// [`MAX_NESTING_DEPTH`]. The message is left unchanged.
    pub fn set(&mut self, key: impl Into<Atom>, item: Item) -> Result<(), Error> {
        let key = key.into();

        if let Item::Message(child) = &item {
            if child.nesting_depth() >= MAX_NESTING_DEPTH {
                log::error!(
                    "message {:#010x} cannot nest '{}' deeper than {} levels",
                    self.what,
                    key,
                    MAX_NESTING_DEPTH
                );
                return Err(Error::NestingTooDeep {
                    key: key.to_string(),
                    limit: MAX_NESTING_DEPTH,
                });
            }
        }

        if let Some(slot) = self.slots.iter_mut().find(|slot| slot.key == key) {
            slot.item = item;
            return Ok(());
        }

        if self.slots.len() >= MAX_ITEMS {
            log::error!(
                "message {:#010x} is full, rejecting key '{}'",
                self.what,
                key
            );
            return Err(Error::CapacityExceeded {
                key: key.to_string(),
                capacity: MAX_ITEMS,
            });
        }

        self.slots.push(Slot { key, item });
        Ok(())
    }

    /// The payload stored under `key`, whatever its kind.
    pub fn get(&self, key: impl Into<Atom>) -> Option<&Item> {
        let key = key.into();
        self.slots
            .iter()
            .find(|slot| slot.key == key)
            .map(|slot| &slot.item)
    }

    pub fn contains(&self, key: impl Into<Atom>) -> bool {
        self.get(key).is_some()
    }

    /// Kind of the slot stored under `key`.
    pub fn kind_of(&self, key: impl Into<Atom>) -> Option<Kind> {
        self.get(key).map(Item::kind)
    }

    /// Slots in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (Atom, &Item)> + '_ {
        self.slots.iter().map(|slot| (slot.key, &slot.item))
    }

    scalar_accessors! {
        (set_int32, find_int32, Int32, i32),
        (set_int64, find_int64, Int64, i64),
        (set_size, find_size, Size, usize),
        (set_float, find_float, Float, f32),
        (set_double, find_double, Double, f64),
        (set_rect, find_rect, Rect, Rect),
    }

    /// Store a `u32`, reinterpreted as an `Int32` slot.
    pub fn set_uint32(&mut self, key: impl Into<Atom>, value: u32) -> Result<(), Error> {
        self.set_int32(key, value as i32)
    }

    pub fn find_uint32(&self, key: impl Into<Atom>) -> Option<u32> {
        self.find_int32(key).map(|v| v as u32)
    }

    /// Store a `u64`, reinterpreted as an `Int64` slot.
    pub fn set_uint64(&mut self, key: impl Into<Atom>, value: u64) -> Result<(), Error> {
        self.set_int64(key, value as i64)
    }

    pub fn find_uint64(&self, key: impl Into<Atom>) -> Option<u64> {
        self.find_int64(key).map(|v| v as u64)
    }

    /// Store a raw address. It is never dereferenced by the message and
    /// cannot be encoded for another process.
    pub fn set_pointer<T>(&mut self, key: impl Into<Atom>, ptr: *const T) -> Result<(), Error> {
        self.set(key, Item::Pointer(ptr as usize))
    }

    pub fn find_pointer(&self, key: impl Into<Atom>) -> Option<*const ()> {
        match self.get(key)? {
            Item::Pointer(addr) => Some(*addr as *const ()),
            _ => None,
        }
    }

    pub fn set_string(&mut self, key: impl Into<Atom>, value: impl Into<String>) -> Result<(), Error> {
        self.set(key, Item::String(value.into()))
    }

    pub fn find_string(&self, key: impl Into<Atom>) -> Option<&str> {
        match self.get(key)? {
            Item::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Store a vector of 32-bit integers as a single slot.
    pub fn set_int32_vector(
        &mut self,
        key: impl Into<Atom>,
        values: impl Into<Vec<i32>>,
    ) -> Result<(), Error> {
        self.set(key, Item::Int32Vector(values.into()))
    }

    pub fn find_int32_vector(&self, key: impl Into<Atom>) -> Option<&[i32]> {
        match self.get(key)? {
            Item::Int32Vector(v) => Some(v.as_slice()),
            _ => None,
        }
    }

    /// Store a shared object. The message holds its own reference until the
    /// slot is overwritten or the message is cleared or dropped.
    pub fn set_object(&mut self, key: impl Into<Atom>, obj: &ObjectRef) -> Result<(), Error> {
        self.set(key, Item::Object(obj.clone()))
    }

    /// Acquire a new reference to the object stored under `key`.
    pub fn find_object(&self, key: impl Into<Atom>) -> Option<ObjectRef> {
        match self.get(key)? {
            Item::Object(obj) => Some(obj.clone()),
            _ => None,
        }
    }

    /// Store a nested message by shared reference.
    pub fn set_message(
        &mut self,
        key: impl Into<Atom>,
        msg: impl Into<Arc<Message>>,
    ) -> Result<(), Error> {
        self.set(key, Item::Message(msg.into()))
    }

    /// Acquire a new reference to the nested message stored under `key`.
    pub fn find_message(&self, key: impl Into<Atom>) -> Option<Arc<Message>> {
        match self.get(key)? {
            Item::Message(msg) => Some(Arc::clone(msg)),
            _ => None,
        }
    }

    /// Mark this message as awaiting a synchronous reply identified by
    /// `reply_id`.
    pub fn set_reply_id(&mut self, reply_id: u32) -> Result<(), Error> {
        self.set_uint32(REPLY_ID_KEY, reply_id)
    }

    /// The reply token, if the sender is waiting for a response.
    ///
    /// The message only carries the token. Delivering the reply is up to
    /// whoever dispatched the message.
    pub fn sender_awaits_response(&self) -> Option<u32> {
        self.find_uint32(REPLY_ID_KEY)
    }

    /// Duplicate the message.
    ///
    /// Strings, vectors and nested messages are copied deeply, so the
    /// duplicate shares no storage with `self` for them. Objects are the
    /// exception: the duplicate holds another reference to the same object.
    pub fn dup(&self) -> Message {
        Message {
            what: self.what,
            slots: self
                .slots
                .iter()
                .map(|slot| Slot {
                    key: slot.key,
                    item: slot.item.dup(),
                })
                .collect(),
        }
    }
}

impl Clone for Message {
    fn clone(&self) -> Self {
        self.dup()
    }
}
