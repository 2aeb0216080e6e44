//! Slot payloads: the closed set of value kinds a message can hold.

use std::fmt;
use std::sync::Arc;

use crate::{Message, ObjectRef};

/// The kind of a slot.
///
/// Every kind has a stable numeric tag used on the wire. Only the kinds for
/// which [`Kind::is_transferable`] holds can be encoded.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Kind {
    Int32,
    Int64,
    Size,
    Float,
    Double,
    Pointer,
    String,
    Object,
    Message,
    Rect,
    Int32Vector,
}

impl Kind {
    /// All kinds, in tag order.
    pub const ALL: [Kind; 11] = [
        Kind::Int32,
        Kind::Int64,
        Kind::Size,
        Kind::Float,
        Kind::Double,
        Kind::Pointer,
        Kind::String,
        Kind::Object,
        Kind::Message,
        Kind::Rect,
        Kind::Int32Vector,
    ];

    /// Numeric tag written on the wire.
    pub fn tag(self) -> i32 {
        match self {
            Kind::Int32 => 0,
            Kind::Int64 => 1,
            Kind::Size => 2,
            Kind::Float => 3,
            Kind::Double => 4,
            Kind::Pointer => 5,
            Kind::String => 6,
            Kind::Object => 7,
            Kind::Message => 8,
            Kind::Rect => 9,
            Kind::Int32Vector => 10,
        }
    }

    /// Inverse of [`Kind::tag`].
    pub fn from_tag(tag: i32) -> Option<Kind> {
        Kind::ALL.iter().copied().find(|k| k.tag() == tag)
    }

    /// Whether values of this kind can leave the producing process.
    ///
    /// Raw pointers and object references mean nothing in another address
    /// space. Rectangles have no wire encoding.
    pub fn is_transferable(self) -> bool {
        !matches!(self, Kind::Pointer | Kind::Object | Kind::Rect)
    }

    /// Name used by the debug formatter.
    pub fn type_name(self) -> &'static str {
        match self {
            Kind::Int32 => "int32_t",
            Kind::Int64 => "int64_t",
            Kind::Size => "size_t",
            Kind::Float => "float",
            Kind::Double => "double",
            Kind::Pointer => "void *",
            Kind::String => "string",
            Kind::Object => "object",
            Kind::Message => "Message",
            Kind::Rect => "Rect",
            Kind::Int32Vector => "vector<int32_t>",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Four packed integers stored under a single `Rect` slot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Rect {
    pub fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Rect {
            left,
            top,
            right,
            bottom,
        }
    }
}

/// A typed slot payload.
///
/// Scalars are held inline. `String` and `Int32Vector` own their buffers.
/// `Object` and `Message` hold shared references: the reference is acquired
/// when the item is built and released when it is dropped.
#[derive(Debug, PartialEq)]
pub enum Item {
    Int32(i32),
    Int64(i64),
    Size(usize),
    Float(f32),
    Double(f64),
    /// An address that is only meaningful inside this process.
    Pointer(usize),
    String(String),
    Object(ObjectRef),
    Message(Arc<Message>),
    Rect(Rect),
    Int32Vector(Vec<i32>),
}

impl Item {
    pub fn kind(&self) -> Kind {
        match self {
            Item::Int32(_) => Kind::Int32,
            Item::Int64(_) => Kind::Int64,
            Item::Size(_) => Kind::Size,
            Item::Float(_) => Kind::Float,
            Item::Double(_) => Kind::Double,
            Item::Pointer(_) => Kind::Pointer,
            Item::String(_) => Kind::String,
            Item::Object(_) => Kind::Object,
            Item::Message(_) => Kind::Message,
            Item::Rect(_) => Kind::Rect,
            Item::Int32Vector(_) => Kind::Int32Vector,
        }
    }

    /// Copy this payload for [`Message::dup`].
    ///
    /// Owned buffers are reallocated and nested messages are duplicated
    /// recursively, but objects are shared: the copy holds a new reference
    /// to the same object.
    pub fn dup(&self) -> Item {
        match self {
            Item::Int32(v) => Item::Int32(*v),
            Item::Int64(v) => Item::Int64(*v),
            Item::Size(v) => Item::Size(*v),
            Item::Float(v) => Item::Float(*v),
            Item::Double(v) => Item::Double(*v),
            Item::Pointer(v) => Item::Pointer(*v),
            Item::String(s) => Item::String(s.clone()),
            Item::Object(obj) => Item::Object(obj.clone()),
            Item::Message(msg) => Item::Message(Arc::new(msg.dup())),
            Item::Rect(r) => Item::Rect(*r),
            Item::Int32Vector(v) => Item::Int32Vector(v.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_round_trip() {
        for kind in Kind::ALL {
            assert_eq!(Kind::from_tag(kind.tag()), Some(kind));
        }
        assert_eq!(Kind::from_tag(11), None);
        assert_eq!(Kind::from_tag(-1), None);
    }

    #[test]
    fn tags_are_stable() {
        assert_eq!(Kind::Int32.tag(), 0);
        assert_eq!(Kind::String.tag(), 6);
        assert_eq!(Kind::Message.tag(), 8);
        assert_eq!(Kind::Int32Vector.tag(), 10);
    }

    #[test]
    fn only_local_kinds_are_untransferable() {
        let local: Vec<Kind> = Kind::ALL
            .iter()
            .copied()
            .filter(|k| !k.is_transferable())
            .collect();
        assert_eq!(local, vec![Kind::Pointer, Kind::Object, Kind::Rect]);
    }

    #[test]
    fn item_reports_its_kind() {
        assert_eq!(Item::Size(3).kind(), Kind::Size);
        assert_eq!(Item::Rect(Rect::default()).kind(), Kind::Rect);
        assert_eq!(Item::Int32Vector(vec![]).kind(), Kind::Int32Vector);
    }

    #[test]
    fn dup_shares_objects_but_copies_buffers() {
        let obj = ObjectRef::new(42u32);
        let original = Item::Object(obj.clone());
        let copy = original.dup();
        assert_eq!(original, copy);
        assert_eq!(ObjectRef::strong_count(&obj), 3);

        let text = Item::String("abc".to_string());
        match (&text, text.dup()) {
            (Item::String(a), Item::String(b)) => {
                assert_eq!(a, &b);
                assert_ne!(a.as_ptr(), b.as_ptr());
            }
            _ => unreachable!(),
        }
    }
}
