use std::mem;

use byteorder::{BigEndian, ByteOrder};

use super::primitive::Reader;
use crate::tag::Tag;
use crate::{Compound, Error, List, NbtString, Result, Value, MAX_DEPTH};

/// Decodes uncompressed NBT binary data from the provided slice.
///
/// The slice acts as the cursor: on success it is advanced past exactly the
/// bytes that made up the root compound, and anything after it is left in
/// place. The decoded compound is returned along with the name of the root.
///
/// Only compounds are permitted at the top level, so any other root kind
/// fails with [`Error::InvalidRootKind`].
pub fn from_binary(slice: &mut &[u8]) -> Result<(Compound, NbtString)> {
    let mut state = DecodeState {
        reader: Reader::new(*slice),
        depth: 0,
    };

    let root_tag = state.reader.read_tag()?;

    if root_tag != Tag::Compound {
        return Err(Error::InvalidRootKind(root_tag));
    }

    let root_name = state.reader.read_string()?;
    let root = state.read_compound()?;

    debug_assert_eq!(state.depth, 0);

    *slice = state.reader.rest();

    Ok((root, root_name))
}

struct DecodeState<'a> {
    reader: Reader<'a>,
    /// Current recursion depth.
    depth: usize,
}

impl DecodeState<'_> {
    #[inline]
    fn check_depth<T>(&mut self, f: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        if self.depth >= MAX_DEPTH {
            return Err(Error::DepthLimitExceeded);
        }

        self.depth += 1;
        let res = f(self);
        self.depth -= 1;
        res
    }

    /// Reads the payload of a value whose kind has already been read.
    fn read_value(&mut self, tag: Tag) -> Result<Value> {
        match tag {
            Tag::End => Err(Error::UnexpectedEnd),
            Tag::Byte => Ok(Value::Byte(self.reader.read_i8()?)),
            Tag::Short => Ok(Value::Short(self.reader.read_i16()?)),
            Tag::Int => Ok(Value::Int(self.reader.read_i32()?)),
            Tag::Long => Ok(Value::Long(self.reader.read_i64()?)),
            Tag::Float => Ok(Value::Float(self.reader.read_f32()?)),
            Tag::Double => Ok(Value::Double(self.reader.read_f64()?)),
            Tag::ByteArray => Ok(Value::ByteArray(self.read_byte_array()?)),
            Tag::String => Ok(Value::String(self.reader.read_string()?)),
            Tag::List => Ok(Value::List(self.check_depth(|st| st.read_any_list())?)),
            Tag::Compound => Ok(Value::Compound(
                self.check_depth(|st| st.read_compound())?,
            )),
            Tag::IntArray => Ok(Value::IntArray(self.read_int_array()?)),
            Tag::LongArray => Ok(Value::LongArray(self.read_long_array()?)),
        }
    }

    fn read_compound(&mut self) -> Result<Compound> {
        let mut compound = Compound::new();

        loop {
            let tag = self.reader.read_tag()?;

            if tag == Tag::End {
                return Ok(compound);
            }

            let name = self.reader.read_string()?;
            let value = self.read_value(tag)?;

            compound.insert(name, value);
        }
    }

    fn read_any_list(&mut self) -> Result<List> {
        match self.reader.read_tag()? {
            Tag::End => match self.reader.read_i32()? {
                len if len > 0 => Err(Error::NonEmptyEndList(len)),
                _ => Ok(List::End),
            },
            Tag::Byte => Ok(List::Byte(self.read_byte_array()?)),
            Tag::Short => Ok(List::Short(self.read_fixed(BigEndian::read_i16_into)?)),
            Tag::Int => Ok(List::Int(self.read_int_array()?)),
            Tag::Long => Ok(List::Long(self.read_long_array()?)),
            Tag::Float => Ok(List::Float(self.read_fixed(BigEndian::read_f32_into)?)),
            Tag::Double => Ok(List::Double(self.read_fixed(BigEndian::read_f64_into)?)),
            Tag::ByteArray => Ok(List::ByteArray(
                self.read_list(|st| st.read_byte_array())?,
            )),
            Tag::String => Ok(List::String(self.read_list(|st| st.reader.read_string())?)),
            Tag::List => Ok(List::List(
                self.read_list(|st| st.check_depth(|st| st.read_any_list()))?,
            )),
            Tag::Compound => Ok(List::Compound(
                self.read_list(|st| st.check_depth(|st| st.read_compound()))?,
            )),
            Tag::IntArray => Ok(List::IntArray(self.read_list(|st| st.read_int_array())?)),
            Tag::LongArray => Ok(List::LongArray(
                self.read_list(|st| st.read_long_array())?,
            )),
        }
    }

    /// Reads the length of a list with variable-width elements, then each
    /// element with `read_elem`.
    fn read_list<T, F>(&mut self, mut read_elem: F) -> Result<Vec<T>>
    where
        F: FnMut(&mut Self) -> Result<T>,
    {
        let len = usize::try_from(self.reader.read_i32()?).unwrap_or(0);

        // Every element occupies at least one byte, so this bounds the
        // allocation by the input size.
        let mut list = Vec::with_capacity(len.min(self.reader.remaining()));

        for _ in 0..len {
            list.push(read_elem(self)?);
        }

        Ok(list)
    }

    fn read_byte_array(&mut self) -> Result<Vec<i8>> {
        let (_, bytes) = self.reader.read_counted(1)?;

        Ok(bytes.iter().map(|&b| i8::from_be_bytes([b])).collect())
    }

    fn read_int_array(&mut self) -> Result<Vec<i32>> {
        self.read_fixed(BigEndian::read_i32_into)
    }

    fn read_long_array(&mut self) -> Result<Vec<i64>> {
        self.read_fixed(BigEndian::read_i64_into)
    }

    /// Reads a signed 32-bit count followed by that many big-endian elements.
    /// The wire width of each element is the in-memory size of `T`.
    fn read_fixed<T>(&mut self, read_into: fn(&[u8], &mut [T])) -> Result<Vec<T>>
    where
        T: Copy + Default,
    {
        let (count, bytes) = self.reader.read_counted(mem::size_of::<T>())?;

        let mut elems = vec![T::default(); count];
        read_into(bytes, &mut elems);

        Ok(elems)
    }
}
