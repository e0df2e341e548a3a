//! Fixed-width big-endian primitives and length-prefixed strings.
//!
//! [`Reader`] is a bounds-checked cursor over a byte slice. Every read either
//! returns the requested value and advances the cursor, or fails with
//! [`Error::TruncatedInput`] (or [`Error::MalformedString`] for string
//! bodies) and leaves the cursor where it was.

use std::io::Write;

use byteorder::{BigEndian, ByteOrder, WriteBytesExt};

use crate::{Error, NbtString, Result, Tag};

/// A cursor over an in-memory NBT buffer.
#[derive(Clone, Debug)]
pub struct Reader<'a> {
    /// Bytes not yet consumed.
    buf: &'a [u8],
    consumed: usize,
}

impl<'a> Reader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, consumed: 0 }
    }

    /// Number of bytes consumed since the reader was created.
    pub fn position(&self) -> usize {
        self.consumed
    }

    pub fn remaining(&self) -> usize {
        self.buf.len()
    }

    /// The bytes that have not been consumed yet.
    pub fn rest(&self) -> &'a [u8] {
        self.buf
    }

    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8]> {
        if n > self.buf.len() {
            return Err(Error::TruncatedInput {
                needed: n,
                remaining: self.buf.len(),
            });
        }

        let (head, tail) = self.buf.split_at(n);
        self.buf = tail;
        self.consumed += n;
        Ok(head)
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.read_bytes(1)?[0])
    }

    pub fn read_i8(&mut self) -> Result<i8> {
        Ok(i8::from_be_bytes([self.read_u8()?]))
    }

    pub fn read_u16(&mut self) -> Result<u16> {
        Ok(BigEndian::read_u16(self.read_bytes(2)?))
    }

    pub fn read_i16(&mut self) -> Result<i16> {
        Ok(BigEndian::read_i16(self.read_bytes(2)?))
    }

    pub fn read_i32(&mut self) -> Result<i32> {
        Ok(BigEndian::read_i32(self.read_bytes(4)?))
    }

    pub fn read_i64(&mut self) -> Result<i64> {
        Ok(BigEndian::read_i64(self.read_bytes(8)?))
    }

    pub fn read_f32(&mut self) -> Result<f32> {
        Ok(BigEndian::read_f32(self.read_bytes(4)?))
    }

    pub fn read_f64(&mut self) -> Result<f64> {
        Ok(BigEndian::read_f64(self.read_bytes(8)?))
    }

    pub fn read_tag(&mut self) -> Result<Tag> {
        Tag::from_u8(self.read_u8()?)
    }

    /// Reads an unsigned 16-bit length followed by that many raw bytes.
    pub fn read_string(&mut self) -> Result<NbtString> {
        let declared = usize::from(self.read_u16()?);

        if declared > self.buf.len() {
            return Err(Error::MalformedString {
                declared,
                remaining: self.buf.len(),
            });
        }

        Ok(NbtString::from(self.read_bytes(declared)?))
    }

    /// Reads a signed 32-bit element count followed by `count * width` bytes.
    /// Non-positive counts read no elements.
    pub(crate) fn read_counted(&mut self, width: usize) -> Result<(usize, &'a [u8])> {
        let count = usize::try_from(self.read_i32()?).unwrap_or(0);

        let needed = count.checked_mul(width).ok_or(Error::TruncatedInput {
            needed: usize::MAX,
            remaining: self.buf.len(),
        })?;

        Ok((count, self.read_bytes(needed)?))
    }
}

/// Writes an unsigned 16-bit length followed by the raw bytes of `s`.
pub fn write_string<W: Write>(mut writer: W, s: &[u8]) -> Result<()> {
    match u16::try_from(s.len()) {
        Ok(len) => writer.write_u16::<BigEndian>(len)?,
        Err(_) => return Err(Error::StringTooLong(s.len())),
    }

    Ok(writer.write_all(s)?)
}

/// Writes the signed 32-bit length prefix of an array or list.
pub(crate) fn write_len<W: Write>(mut writer: W, tag: Tag, len: usize) -> Result<()> {
    match i32::try_from(len) {
        Ok(len) => Ok(writer.write_i32::<BigEndian>(len)?),
        Err(_) => Err(Error::LengthOverflow { tag, len }),
    }
}
