use std::borrow::Cow;

use crate::tag::Tag;
use crate::{Compound, List, NbtString};

/// Represents an arbitrary NBT value.
///
/// There is no `End` variant: the end tag only terminates compounds on the
/// wire and is never a value of its own.
#[derive(Clone, PartialEq, Debug)]
pub enum Value {
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    ByteArray(Vec<i8>),
    String(NbtString),
    List(List),
    Compound(Compound),
    IntArray(Vec<i32>),
    LongArray(Vec<i64>),
}

/// Represents a reference to an arbitrary NBT value, where the tag is not part
/// of the reference.
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum ValueRef<'a> {
    Byte(&'a i8),
    Short(&'a i16),
    Int(&'a i32),
    Long(&'a i64),
    Float(&'a f32),
    Double(&'a f64),
    ByteArray(&'a [i8]),
    String(&'a NbtString),
    List(&'a List),
    Compound(&'a Compound),
    IntArray(&'a [i32]),
    LongArray(&'a [i64]),
}

impl ValueRef<'_> {
    /// Returns the type of the referenced value.
    pub fn tag(&self) -> Tag {
        match self {
            Self::Byte(_) => Tag::Byte,
            Self::Short(_) => Tag::Short,
            Self::Int(_) => Tag::Int,
            Self::Long(_) => Tag::Long,
            Self::Float(_) => Tag::Float,
            Self::Double(_) => Tag::Double,
            Self::ByteArray(_) => Tag::ByteArray,
            Self::String(_) => Tag::String,
            Self::List(_) => Tag::List,
            Self::Compound(_) => Tag::Compound,
            Self::IntArray(_) => Tag::IntArray,
            Self::LongArray(_) => Tag::LongArray,
        }
    }

    pub fn to_value(self) -> Value {
        match self {
            Self::Byte(v) => Value::Byte(*v),
            Self::Short(v) => Value::Short(*v),
            Self::Int(v) => Value::Int(*v),
            Self::Long(v) => Value::Long(*v),
            Self::Float(v) => Value::Float(*v),
            Self::Double(v) => Value::Double(*v),
            Self::ByteArray(v) => Value::ByteArray(v.to_vec()),
            Self::String(v) => Value::String(v.clone()),
            Self::List(v) => Value::List(v.clone()),
            Self::Compound(v) => Value::Compound(v.clone()),
            Self::IntArray(v) => Value::IntArray(v.to_vec()),
            Self::LongArray(v) => Value::LongArray(v.to_vec()),
        }
    }
}

impl<'a> From<&'a Value> for ValueRef<'a> {
    fn from(v: &'a Value) -> Self {
        match v {
            Value::Byte(v) => Self::Byte(v),
            Value::Short(v) => Self::Short(v),
            Value::Int(v) => Self::Int(v),
            Value::Long(v) => Self::Long(v),
            Value::Float(v) => Self::Float(v),
            Value::Double(v) => Self::Double(v),
            Value::ByteArray(v) => Self::ByteArray(v),
            Value::String(v) => Self::String(v),
            Value::List(v) => Self::List(v),
            Value::Compound(v) => Self::Compound(v),
            Value::IntArray(v) => Self::IntArray(v),
            Value::LongArray(v) => Self::LongArray(v),
        }
    }
}

macro_rules! accessors {
    ($($as_fn:ident, $variant:ident => $ty:ty, |$v:ident| $conv:expr;)*) => {
        $(
            #[doc = concat!("Returns the payload if this is a [`Value::", stringify!($variant), "`].")]
            pub fn $as_fn(&self) -> Option<$ty> {
                match self {
                    Self::$variant($v) => Some($conv),
                    _ => None,
                }
            }
        )*
    }
}

impl Value {
    /// Returns the type of this value.
    pub fn tag(&self) -> Tag {
        match self {
            Self::Byte(_) => Tag::Byte,
            Self::Short(_) => Tag::Short,
            Self::Int(_) => Tag::Int,
            Self::Long(_) => Tag::Long,
            Self::Float(_) => Tag::Float,
            Self::Double(_) => Tag::Double,
            Self::ByteArray(_) => Tag::ByteArray,
            Self::String(_) => Tag::String,
            Self::List(_) => Tag::List,
            Self::Compound(_) => Tag::Compound,
            Self::IntArray(_) => Tag::IntArray,
            Self::LongArray(_) => Tag::LongArray,
        }
    }

    accessors! {
        as_byte, Byte => i8, |v| *v;
        as_short, Short => i16, |v| *v;
        as_int, Int => i32, |v| *v;
        as_long, Long => i64, |v| *v;
        as_float, Float => f32, |v| *v;
        as_double, Double => f64, |v| *v;
        as_byte_array, ByteArray => &[i8], |v| v.as_slice();
        as_string, String => &NbtString, |v| v;
        as_list, List => &List, |v| v;
        as_compound, Compound => &Compound, |v| v;
        as_int_array, IntArray => &[i32], |v| v.as_slice();
        as_long_array, LongArray => &[i64], |v| v.as_slice();
    }

    pub fn as_compound_mut(&mut self) -> Option<&mut Compound> {
        match self {
            Self::Compound(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_list_mut(&mut self) -> Option<&mut List> {
        match self {
            Self::List(l) => Some(l),
            _ => None,
        }
    }
}

impl From<i8> for Value {
    fn from(v: i8) -> Self {
        Self::Byte(v)
    }
}

/// Bools are usually represented as `0` or `1` bytes in NBT.
impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Byte(i8::from(b))
    }
}

impl From<i16> for Value {
    fn from(v: i16) -> Self {
        Self::Short(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Int(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Long(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Self::Float(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Double(v)
    }
}

impl From<Vec<i8>> for Value {
    fn from(v: Vec<i8>) -> Self {
        Self::ByteArray(v)
    }
}

impl From<NbtString> for Value {
    fn from(v: NbtString) -> Self {
        Self::String(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v.into())
    }
}

impl From<&String> for Value {
    fn from(v: &String) -> Self {
        Self::String(v.into())
    }
}

impl<'a> From<&'a str> for Value {
    fn from(v: &'a str) -> Self {
        Self::String(v.into())
    }
}

impl<'a> From<Cow<'a, str>> for Value {
    fn from(v: Cow<'a, str>) -> Self {
        Self::String(v.into())
    }
}

impl From<List> for Value {
    fn from(v: List) -> Self {
        Self::List(v)
    }
}

impl From<Compound> for Value {
    fn from(v: Compound) -> Self {
        Self::Compound(v)
    }
}

impl From<Vec<i32>> for Value {
    fn from(v: Vec<i32>) -> Self {
        Self::IntArray(v)
    }
}

impl From<Vec<i64>> for Value {
    fn from(v: Vec<i64>) -> Self {
        Self::LongArray(v)
    }
}
