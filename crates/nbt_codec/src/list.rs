use std::iter::FusedIterator;

use crate::tag::Tag;
use crate::value::ValueRef;
use crate::{Compound, Error, NbtString, Result, Value};

/// An NBT list value.
///
/// NBT lists are homogeneous, meaning each list element must be of the same
/// type. This is opposed to a format like JSON where lists can be
/// heterogeneous. Here, the element type is carried by the enum variant, so
/// an empty list still knows what it would hold.
#[derive(Clone, Default, PartialEq, Debug)]
pub enum List {
    /// The list with the element type of `TAG_End` and length of zero.
    #[default]
    End,
    Byte(Vec<i8>),
    Short(Vec<i16>),
    Int(Vec<i32>),
    Long(Vec<i64>),
    Float(Vec<f32>),
    Double(Vec<f64>),
    ByteArray(Vec<Vec<i8>>),
    String(Vec<NbtString>),
    List(Vec<List>),
    Compound(Vec<Compound>),
    IntArray(Vec<Vec<i32>>),
    LongArray(Vec<Vec<i64>>),
}

/// Expands `$body` once per non-end variant with `$v` bound to the vector.
macro_rules! for_each_vec {
    ($list:expr, $v:ident => $body:expr, End => $end:expr) => {
        match $list {
            List::End => $end,
            List::Byte($v) => $body,
            List::Short($v) => $body,
            List::Int($v) => $body,
            List::Long($v) => $body,
            List::Float($v) => $body,
            List::Double($v) => $body,
            List::ByteArray($v) => $body,
            List::String($v) => $body,
            List::List($v) => $body,
            List::Compound($v) => $body,
            List::IntArray($v) => $body,
            List::LongArray($v) => $body,
        }
    };
}

impl List {
    /// Creates an empty list whose elements will be of type `tag`.
    pub fn with_tag(tag: Tag) -> Self {
        match tag {
            Tag::End => List::End,
            Tag::Byte => List::Byte(vec![]),
            Tag::Short => List::Short(vec![]),
            Tag::Int => List::Int(vec![]),
            Tag::Long => List::Long(vec![]),
            Tag::Float => List::Float(vec![]),
            Tag::Double => List::Double(vec![]),
            Tag::ByteArray => List::ByteArray(vec![]),
            Tag::String => List::String(vec![]),
            Tag::List => List::List(vec![]),
            Tag::Compound => List::Compound(vec![]),
            Tag::IntArray => List::IntArray(vec![]),
            Tag::LongArray => List::LongArray(vec![]),
        }
    }

    /// Returns the length of this list.
    pub fn len(&self) -> usize {
        for_each_vec!(self, v => v.len(), End => 0)
    }

    /// Returns `true` if this list has no elements. `false` otherwise.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the element type of this list.
    pub fn element_tag(&self) -> Tag {
        match self {
            List::End => Tag::End,
            List::Byte(_) => Tag::Byte,
            List::Short(_) => Tag::Short,
            List::Int(_) => Tag::Int,
            List::Long(_) => Tag::Long,
            List::Float(_) => Tag::Float,
            List::Double(_) => Tag::Double,
            List::ByteArray(_) => Tag::ByteArray,
            List::String(_) => Tag::String,
            List::List(_) => Tag::List,
            List::Compound(_) => Tag::Compound,
            List::IntArray(_) => Tag::IntArray,
            List::LongArray(_) => Tag::LongArray,
        }
    }

    /// Appends a value to the end of the list.
    ///
    /// The value must have the same type as the list's elements. Pushing onto
    /// [`List::End`] turns it into a list of the value's type.
    pub fn try_push<V: Into<Value>>(&mut self, value: V) -> Result<()> {
        let value = value.into();

        if let List::End = self {
            *self = List::with_tag(value.tag());
        }

        match (self, value) {
            (List::Byte(l), Value::Byte(v)) => l.push(v),
            (List::Short(l), Value::Short(v)) => l.push(v),
            (List::Int(l), Value::Int(v)) => l.push(v),
            (List::Long(l), Value::Long(v)) => l.push(v),
            (List::Float(l), Value::Float(v)) => l.push(v),
            (List::Double(l), Value::Double(v)) => l.push(v),
            (List::ByteArray(l), Value::ByteArray(v)) => l.push(v),
            (List::String(l), Value::String(v)) => l.push(v),
            (List::List(l), Value::List(v)) => l.push(v),
            (List::Compound(l), Value::Compound(v)) => l.push(v),
            (List::IntArray(l), Value::IntArray(v)) => l.push(v),
            (List::LongArray(l), Value::LongArray(v)) => l.push(v),
            (list, value) => {
                return Err(Error::ListKindMismatch {
                    expected: list.element_tag(),
                    found: value.tag(),
                })
            }
        }

        Ok(())
    }

    /// Returns a reference to the element at `idx`, or `None` if it is out of
    /// bounds.
    pub fn get(&self, idx: usize) -> Option<ValueRef<'_>> {
        match self {
            List::End => None,
            List::Byte(v) => v.get(idx).map(ValueRef::Byte),
            List::Short(v) => v.get(idx).map(ValueRef::Short),
            List::Int(v) => v.get(idx).map(ValueRef::Int),
            List::Long(v) => v.get(idx).map(ValueRef::Long),
            List::Float(v) => v.get(idx).map(ValueRef::Float),
            List::Double(v) => v.get(idx).map(ValueRef::Double),
            List::ByteArray(v) => v.get(idx).map(|v| ValueRef::ByteArray(v)),
            List::String(v) => v.get(idx).map(ValueRef::String),
            List::List(v) => v.get(idx).map(ValueRef::List),
            List::Compound(v) => v.get(idx).map(ValueRef::Compound),
            List::IntArray(v) => v.get(idx).map(|v| ValueRef::IntArray(v)),
            List::LongArray(v) => v.get(idx).map(|v| ValueRef::LongArray(v)),
        }
    }

    /// Returns an iterator over the elements of this list.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            list: self,
            front: 0,
            back: self.len(),
        }
    }
}

/// An iterator over the elements of a [`List`].
#[derive(Clone, Debug)]
pub struct Iter<'a> {
    list: &'a List,
    front: usize,
    back: usize,
}

impl<'a> Iterator for Iter<'a> {
    type Item = ValueRef<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.front == self.back {
            return None;
        }

        let item = self.list.get(self.front);
        self.front += 1;
        item
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.back - self.front;
        (len, Some(len))
    }
}

impl DoubleEndedIterator for Iter<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front == self.back {
            return None;
        }

        self.back -= 1;
        self.list.get(self.back)
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl FusedIterator for Iter<'_> {}

impl<'a> IntoIterator for &'a List {
    type Item = ValueRef<'a>;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

macro_rules! impl_from_vec {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<Vec<$ty>> for List {
                fn from(v: Vec<$ty>) -> Self {
                    List::$variant(v)
                }
            }
        )*
    };
}

impl_from_vec! {
    i8 => Byte,
    i16 => Short,
    i32 => Int,
    i64 => Long,
    f32 => Float,
    f64 => Double,
    Vec<i8> => ByteArray,
    NbtString => String,
    List => List,
    Compound => Compound,
    Vec<i32> => IntArray,
    Vec<i64> => LongArray,
}

impl From<Vec<String>> for List {
    fn from(v: Vec<String>) -> Self {
        List::String(v.into_iter().map(NbtString::from).collect())
    }
}

impl From<Vec<&str>> for List {
    fn from(v: Vec<&str>) -> Self {
        List::String(v.into_iter().map(NbtString::from).collect())
    }
}
