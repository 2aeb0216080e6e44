//! Primitive field readers and writers.
//!
//! All integers and floats are little-endian. Text is UTF-8 followed by a
//! single NUL byte. There is no padding or alignment between fields.

use bytes::{Buf, BufMut, BytesMut};

use crate::WireError;

/// Appends primitive fields to a buffer.
pub struct WireWriter<'a> {
    buf: &'a mut BytesMut,
}

impl<'a> WireWriter<'a> {
    pub fn new(buf: &'a mut BytesMut) -> Self {
        WireWriter { buf }
    }

    pub fn write_i32(&mut self, value: i32) {
        self.buf.put_i32_le(value);
    }

    pub fn write_i64(&mut self, value: i64) {
        self.buf.put_i64_le(value);
    }

    pub fn write_f32(&mut self, value: f32) {
        self.buf.put_f32_le(value);
    }

    pub fn write_f64(&mut self, value: f64) {
        self.buf.put_f64_le(value);
    }

    /// Write `text` followed by a NUL terminator.
    pub fn write_cstr(&mut self, text: &str) -> Result<(), WireError> {
        if text.as_bytes().contains(&0) {
            return Err(WireError::InteriorNul {
                text: text.to_string(),
            });
        }
        self.buf.put_slice(text.as_bytes());
        self.buf.put_u8(0);
        Ok(())
    }
}

/// Reads primitive fields from a byte slice, failing instead of panicking
/// when the input runs out.
pub struct WireReader<'a> {
    buf: &'a [u8],
    total: usize,
}

impl<'a> WireReader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        WireReader {
            buf,
            total: buf.len(),
        }
    }

    /// Bytes consumed so far.
    pub fn offset(&self) -> usize {
        self.total - self.buf.len()
    }

    pub fn remaining(&self) -> usize {
        self.buf.len()
    }

    fn ensure(&self, needed: usize) -> Result<(), WireError> {
        if self.buf.len() < needed {
            return Err(WireError::Truncated {
                offset: self.offset(),
                needed: needed - self.buf.len(),
            });
        }
        Ok(())
    }

    pub fn read_i32(&mut self) -> Result<i32, WireError> {
        self.ensure(4)?;
        Ok(self.buf.get_i32_le())
    }

    pub fn read_i64(&mut self) -> Result<i64, WireError> {
        self.ensure(8)?;
        Ok(self.buf.get_i64_le())
    }

    pub fn read_f32(&mut self) -> Result<f32, WireError> {
        self.ensure(4)?;
        Ok(self.buf.get_f32_le())
    }

    pub fn read_f64(&mut self) -> Result<f64, WireError> {
        self.ensure(8)?;
        Ok(self.buf.get_f64_le())
    }

    /// Read NUL-terminated text, borrowing it from the input.
    pub fn read_cstr(&mut self) -> Result<&'a str, WireError> {
        let data: &'a [u8] = self.buf;
        let offset = self.offset();
        let end = data
            .iter()
            .position(|&b| b == 0)
            .ok_or(WireError::Truncated {
                offset: offset + data.len(),
                needed: 1,
            })?;
        let text =
            std::str::from_utf8(&data[..end]).map_err(|_| WireError::InvalidUtf8 { offset })?;
        self.buf.advance(end + 1);
        Ok(text)
    }
}
