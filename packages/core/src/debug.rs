//! Human-readable dump of a message, for logs and test failures.

use std::fmt;

use crate::{Item, Message};

fn is_fourcc(what: u32) -> bool {
    what.to_be_bytes().iter().all(|b| (0x20..=0x7e).contains(b))
}

fn push_indent(out: &mut String, indent: usize) {
    out.extend(std::iter::repeat(' ').take(indent));
}

impl Message {
    /// Render the message, one slot per line.
    ///
    /// `indent` is the column at which the body lines and the closing brace
    /// start. Nested messages are rendered recursively so that their closing
    /// brace lines up under their own header.
    ///
    /// ```rust
    /// use xmessage_core::Message;
    ///
    /// let mut msg = Message::new(0x4142_4344);
    /// msg.set_int32("count", 5).unwrap();
    ///
    /// assert_eq!(
    ///     msg.debug_string(0),
    ///     "Message(what = 'ABCD') = {\n  int32_t count = 5\n}"
    /// );
    /// ```
    pub fn debug_string(&self, indent: usize) -> String {
        let header = if is_fourcc(self.what()) {
            let [a, b, c, d] = self.what().to_be_bytes();
            format!(
                "Message(what = '{}{}{}{}') = {{\n",
                a as char, b as char, c as char, d as char
            )
        } else {
            format!("Message(what = {:#010x}) = {{\n", self.what())
        };

        let mut out = String::new();
        out.push_str(&header);

        for (key, item) in self.iter() {
            let name = item.kind().type_name();
            let line = match item {
                Item::Int32(v) => format!("{} {} = {}", name, key, v),
                Item::Int64(v) => format!("{} {} = {}", name, key, v),
                Item::Size(v) => format!("{} {} = {}", name, key, v),
                Item::Float(v) => format!("{} {} = {:.6}", name, key, v),
                Item::Double(v) => format!("{} {} = {:.6}", name, key, v),
                Item::Pointer(addr) => format!("{}{} = {:#x}", name, key, addr),
                Item::String(s) => format!("{} {} = \"{}\"", name, key, s),
                Item::Object(obj) => format!("{} {} = {:#x}", name, key, obj.addr()),
                Item::Message(child) => {
                    let prefix = format!("{} {} = ", name, key);
                    // Two columns of slot indentation precede the prefix.
                    let nested = child.debug_string(indent + 2 + prefix.len());
                    prefix + &nested
                }
                Item::Rect(r) => format!(
                    "{} {}({}, {}, {}, {})",
                    name, key, r.left, r.top, r.right, r.bottom
                ),
                Item::Int32Vector(v) => {
                    let values: Vec<String> = v.iter().map(i32::to_string).collect();
                    format!("{} {} = [{}]", name, key, values.join(", "))
                }
            };

            push_indent(&mut out, indent);
            out.push_str("  ");
            out.push_str(&line);
            out.push('\n');
        }

        push_indent(&mut out, indent);
        out.push('}');
        out
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.debug_string(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ObjectRef, Rect};
    use std::sync::Arc;

    #[test]
    fn fourcc_header_and_int_line() {
        let mut msg = Message::new(0x4142_4344);
        msg.set_int32("count", 5).unwrap();

        let dump = msg.debug_string(0);
        assert!(dump.starts_with("Message(what = 'ABCD') = {\n"));
        assert!(dump.contains("  int32_t count = 5\n"));
        assert!(dump.ends_with('}'));
    }

    #[test]
    fn non_printable_what_is_hex() {
        let msg = Message::new(0x0000_0102);
        assert_eq!(msg.debug_string(0), "Message(what = 0x00000102) = {\n}");
    }

    #[test]
    fn every_kind_renders() {
        let mut msg = Message::new(7);
        msg.set_int64("big", -3).unwrap();
        msg.set_size("n", 12).unwrap();
        msg.set_float("gain", 0.5).unwrap();
        msg.set_double("ratio", 1.25).unwrap();
        msg.set_pointer("ptr", 0x1000 as *const u8).unwrap();
        msg.set_string("mime", "audio/raw").unwrap();
        msg.set_object("obj", &ObjectRef::new(1u8)).unwrap();
        msg.set_rect("crop", Rect::new(1, 2, 3, 4)).unwrap();
        msg.set_int32_vector("layers", vec![1, 2, 3]).unwrap();

        let dump = msg.to_string();
        assert!(dump.contains("  int64_t big = -3\n"));
        assert!(dump.contains("  size_t n = 12\n"));
        assert!(dump.contains("  float gain = 0.500000\n"));
        assert!(dump.contains("  double ratio = 1.250000\n"));
        assert!(dump.contains("  void *ptr = 0x1000\n"));
        assert!(dump.contains("  string mime = \"audio/raw\"\n"));
        assert!(dump.contains("  object obj = 0x"));
        assert!(dump.contains("  Rect crop(1, 2, 3, 4)\n"));
        assert!(dump.contains("  vector<int32_t> layers = [1, 2, 3]\n"));
    }

    #[test]
    fn nested_messages_are_indented() {
        let mut grandchild = Message::new(0x6763_6864); // 'gchd'
        grandchild.set_int32("depth", 2).unwrap();

        let mut child = Message::new(0x6368_6c64); // 'chld'
        child.set_message("gc", Arc::new(grandchild)).unwrap();

        let mut root = Message::new(0x726f_6f74); // 'root'
        root.set_message("c", Arc::new(child)).unwrap();

        let expected = "\
Message(what = 'root') = {
  Message c = Message(what = 'chld') = {
                Message gc = Message(what = 'gchd') = {
                               int32_t depth = 2
                             }
              }
}";
        assert_eq!(root.debug_string(0), expected);
    }

    #[test]
    fn indent_applies_to_body_and_closing_brace() {
        let mut msg = Message::new(1);
        msg.set_int32("x", 1).unwrap();
        assert_eq!(
            msg.debug_string(4),
            "Message(what = 0x00000001) = {\n      int32_t x = 1\n    }"
        );
    }
}
