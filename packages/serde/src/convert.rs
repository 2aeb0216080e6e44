//! Conversions between messages and serde types.
//!
//! `serde_json::Value` is the intermediate form in both directions:
//!
//! | Message kind | JSON |
//! |---|---|
//! | Int32, Int64, Size | number |
//! | Float, Double | number (non-finite becomes null) |
//! | String | string |
//! | Int32Vector | array of numbers |
//! | Rect | `{"left", "top", "right", "bottom"}` |
//! | Message | object |
//!
//! Pointers and objects have no JSON form.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Number, Value};
use xmessage_core::{Item, Message};

use crate::Error;

/// Deserialize a Rust type from a message's slots.
pub fn from_message<T: DeserializeOwned>(msg: &Message) -> Result<T, Error> {
    let json = message_to_json(msg)?;
    Ok(serde_json::from_value(json)?)
}

/// Build a message from a Rust type that serializes as a map.
pub fn to_message<T: Serialize>(what: u32, data: &T) -> Result<Message, Error> {
    let json = serde_json::to_value(data)?;
    json_to_message(what, json)
}

fn float_to_json(f: f64) -> Value {
    Number::from_f64(f).map(Value::Number).unwrap_or(Value::Null)
}

/// Convert a message into a JSON object keyed by slot name.
pub fn message_to_json(msg: &Message) -> Result<Value, Error> {
    let mut map = Map::new();

    for (key, item) in msg.iter() {
        let value = match item {
            Item::Int32(v) => Value::from(*v),
            Item::Int64(v) => Value::from(*v),
            Item::Size(v) => Value::from(*v as u64),
            Item::Float(v) => float_to_json(f64::from(*v)),
            Item::Double(v) => float_to_json(*v),
            Item::String(s) => Value::String(s.clone()),
            Item::Int32Vector(v) => Value::Array(v.iter().map(|i| Value::from(*i)).collect()),
            Item::Rect(r) => serde_json::json!({
                "left": r.left,
                "top": r.top,
                "right": r.right,
                "bottom": r.bottom,
            }),
            Item::Message(child) => message_to_json(child)?,
            Item::Pointer(_) | Item::Object(_) => {
                return Err(Error::Unrepresentable {
                    key: key.to_string(),
                    kind: item.kind(),
                })
            }
        };
        map.insert(key.to_string(), value);
    }

    Ok(Value::Object(map))
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Convert a JSON object into a message.
///
/// Nulls are skipped. Integers become `Int32` when they fit, otherwise
/// `Int64`. Arrays must hold only `i32`-range integers.
pub fn json_to_message(what: u32, json: Value) -> Result<Message, Error> {
    let Value::Object(map) = json else {
        return Err(Error::NotAMap {
            found: json_type_name(&json),
        });
    };

    let mut msg = Message::new(what);
    for (key, value) in map {
        let unsupported = |reason: String| Error::Unsupported {
            key: key.clone(),
            reason,
        };

        let item = match value {
            Value::Null => continue,
            Value::Bool(_) => return Err(unsupported("messages have no boolean kind".into())),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    match i32::try_from(i) {
                        Ok(small) => Item::Int32(small),
                        Err(_) => Item::Int64(i),
                    }
                } else if n.is_u64() {
                    return Err(unsupported(format!("{} does not fit in 64 signed bits", n)));
                } else {
                    Item::Double(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            Value::String(s) => Item::String(s),
            Value::Array(values) => {
                let ints: Option<Vec<i32>> = values
                    .iter()
                    .map(|v| v.as_i64().and_then(|i| i32::try_from(i).ok()))
                    .collect();
                match ints {
                    Some(ints) => Item::Int32Vector(ints),
                    None => {
                        return Err(unsupported(
                            "only arrays of 32-bit integers can be stored".into(),
                        ))
                    }
                }
            }
            nested @ Value::Object(_) => Item::Message(Arc::new(json_to_message(0, nested)?)),
        };

        msg.set(key.as_str(), item)?;
    }

    Ok(msg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use xmessage_core::{ObjectRef, Rect};

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Track {
        id: i32,
        duration_us: i64,
        mime: String,
        sample_rate: f64,
        channels: Vec<i32>,
    }

    fn track() -> Track {
        Track {
            id: 2,
            duration_us: 10_000_000_000,
            mime: "audio/mp4a-latm".to_string(),
            sample_rate: 44100.5,
            channels: vec![0, 1],
        }
    }

    #[test]
    fn roundtrip_struct() {
        let original = track();
        let msg = to_message(7, &original).unwrap();
        assert_eq!(msg.what(), 7);

        let recovered: Track = from_message(&msg).unwrap();
        assert_eq!(original, recovered);
    }

    #[test]
    fn fields_keep_declaration_order() {
        let msg = to_message(0, &track()).unwrap();
        let keys: Vec<&str> = msg.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(
            keys,
            vec!["id", "duration_us", "mime", "sample_rate", "channels"]
        );

        let json = message_to_json(&msg).unwrap();
        let json_keys: Vec<&str> = json
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(json_keys, keys);
    }

    #[test]
    fn integers_pick_the_narrowest_kind() {
        let msg = to_message(0, &track()).unwrap();
        assert_eq!(msg.find_int32("id"), Some(2));
        assert_eq!(msg.find_int64("duration_us"), Some(10_000_000_000));
        assert_eq!(msg.find_double("sample_rate"), Some(44100.5));
        assert_eq!(msg.find_int32_vector("channels"), Some(&[0, 1][..]));
    }

    #[test]
    fn nested_structs_become_nested_messages() {
        #[derive(Debug, PartialEq, Serialize, Deserialize)]
        struct Outer {
            name: String,
            track: Track,
        }

        let original = Outer {
            name: "movie".to_string(),
            track: track(),
        };

        let msg = to_message(1, &original).unwrap();
        let child = msg.find_message("track").unwrap();
        assert_eq!(child.what(), 0);
        assert_eq!(child.find_string("mime"), Some("audio/mp4a-latm"));

        let recovered: Outer = from_message(&msg).unwrap();
        assert_eq!(original, recovered);
    }

    #[test]
    fn none_fields_are_skipped() {
        #[derive(Debug, PartialEq, Serialize, Deserialize)]
        struct Sparse {
            present: i32,
            absent: Option<i32>,
        }

        let msg = to_message(
            0,
            &Sparse {
                present: 1,
                absent: None,
            },
        )
        .unwrap();
        assert_eq!(msg.len(), 1);

        let recovered: Sparse = from_message(&msg).unwrap();
        assert_eq!(recovered.absent, None);
    }

    #[test]
    fn rect_and_size_render_as_json() {
        let mut msg = Message::new(0);
        msg.set_rect("crop", Rect::new(1, 2, 3, 4)).unwrap();
        msg.set_size("bytes", 512).unwrap();
        msg.set_float("nan", f32::NAN).unwrap();

        let json = message_to_json(&msg).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "crop": {"left": 1, "top": 2, "right": 3, "bottom": 4},
                "bytes": 512,
                "nan": null,
            })
        );
    }

    #[test]
    fn local_kinds_have_no_json_form() {
        let mut msg = Message::new(0);
        msg.set_object("obj", &ObjectRef::new(0u8)).unwrap();
        assert!(matches!(
            message_to_json(&msg),
            Err(Error::Unrepresentable { .. })
        ));
    }

    #[test]
    fn unsupported_values_are_rejected() {
        assert!(matches!(
            to_message(0, &serde_json::json!({"flag": true})),
            Err(Error::Unsupported { .. })
        ));
        assert!(matches!(
            to_message(0, &serde_json::json!({"names": ["a", "b"]})),
            Err(Error::Unsupported { .. })
        ));
        assert!(matches!(
            to_message(0, &serde_json::json!({"big": u64::MAX})),
            Err(Error::Unsupported { .. })
        ));
        assert!(matches!(
            to_message(0, &42),
            Err(Error::NotAMap { found: "number" })
        ));
    }

    #[test]
    fn too_many_fields_hit_capacity() {
        let wide: serde_json::Map<String, Value> = (0..17)
            .map(|i| (format!("f{:02}", i), Value::from(i)))
            .collect();
        assert!(matches!(
            json_to_message(0, Value::Object(wide)),
            Err(Error::Store(_))
        ));
    }
}
