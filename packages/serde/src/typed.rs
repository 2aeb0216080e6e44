//! Typed access to nested message slots.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use xmessage_core::{Atom, Message};

use crate::convert::{from_message, to_message};
use crate::Error;

/// Extension trait for reading and writing Rust types as nested messages.
///
/// # Example
///
/// ```rust
/// use serde::{Deserialize, Serialize};
/// use xmessage_core::Message;
/// use xmessage_serde::TypedMessage;
///
/// #[derive(Debug, PartialEq, Serialize, Deserialize)]
/// struct Size {
///     width: i32,
///     height: i32,
/// }
///
/// let mut msg = Message::new(1);
/// msg.write_as("size", &Size { width: 640, height: 480 }).unwrap();
///
/// let size: Option<Size> = msg.read_as("size").unwrap();
/// assert_eq!(size, Some(Size { width: 640, height: 480 }));
/// ```
pub trait TypedMessage {
    /// Deserialize the nested message stored under `key`.
    ///
    /// Returns `Ok(None)` if there is no `Message` slot under `key`.
    fn read_as<T: DeserializeOwned>(&self, key: impl Into<Atom>) -> Result<Option<T>, Error>;

    /// Serialize `value` into a nested message stored under `key`.
    fn write_as<T: Serialize>(&mut self, key: impl Into<Atom>, value: &T) -> Result<(), Error>;
}

impl TypedMessage for Message {
    fn read_as<T: DeserializeOwned>(&self, key: impl Into<Atom>) -> Result<Option<T>, Error> {
        let Some(child) = self.find_message(key) else {
            return Ok(None);
        };
        from_message(&child).map(Some)
    }

    fn write_as<T: Serialize>(&mut self, key: impl Into<Atom>, value: &T) -> Result<(), Error> {
        let child = to_message(0, value)?;
        self.set_message(key, Arc::new(child))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Gain {
        db: f64,
    }

    #[test]
    fn missing_or_mistyped_slot_reads_none() {
        let mut msg = Message::new(0);
        assert_eq!(msg.read_as::<Gain>("gain").unwrap(), None);

        msg.set_double("gain", 1.0).unwrap();
        assert_eq!(msg.read_as::<Gain>("gain").unwrap(), None);
    }

    #[test]
    fn write_overwrites_existing_slot() {
        let mut msg = Message::new(0);
        msg.set_int32("gain", 3).unwrap();
        msg.write_as("gain", &Gain { db: -6.0 }).unwrap();

        assert_eq!(msg.len(), 1);
        assert_eq!(msg.read_as("gain").unwrap(), Some(Gain { db: -6.0 }));
    }

    #[test]
    fn shape_mismatch_is_a_json_error() {
        let mut msg = Message::new(0);
        msg.write_as("gain", &serde_json::json!({"other": 1})).unwrap();
        assert!(matches!(msg.read_as::<Gain>("gain"), Err(Error::Json(_))));
    }
}
