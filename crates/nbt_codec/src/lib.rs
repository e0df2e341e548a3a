#![doc = include_str!("../README.md")]
// Run locally with `RUSTDOCFLAGS="--cfg docsrs" cargo +nightly doc --all-features --open`
#![cfg_attr(docsrs, feature(doc_cfg))]

pub use binary::{from_binary, to_binary, written_size};
pub use compound::Compound;
pub use error::*;
pub use list::List;
#[cfg(feature = "compression")]
#[cfg_attr(docsrs, doc(cfg(feature = "compression")))]
pub use stream::{from_bytes, to_bytes};
pub use string::NbtString;
pub use tag::*;
pub use value::{Value, ValueRef};

pub mod binary;
pub mod compound;
mod error;
pub mod list;
#[cfg(feature = "compression")]
#[cfg_attr(docsrs, doc(cfg(feature = "compression")))]
pub mod stream;
pub mod string;
mod tag;
pub mod value;

/// Maximum nesting of lists and compounds accepted by the decoder and
/// encoder. Deeper data fails with [`Error::DepthLimitExceeded`] instead of
/// overflowing the call stack.
pub const MAX_DEPTH: usize = 512;

/// A convenience macro for constructing [`Compound`]s.
///
/// Key expressions must implement `Into<NbtString>` while value expressions
/// must implement `Into<Value>`.
///
/// # Examples
///
/// ```
/// use nbt_codec::{compound, List};
///
/// let c = compound! {
///     "byte" => 123_i8,
///     "list_of_int" => List::Int(vec![3, -7, 5]),
///     "list_of_string" => List::from(vec!["foo", "bar", "baz"]),
///     "string" => "aé日",
///     "compound" => compound! {
///         "foo" => 1,
///         "bar" => 2,
///         "baz" => 3,
///     },
///     "int_array" => vec![5, -9, i32::MIN, 0, i32::MAX],
///     "byte_array" => vec![0_i8, 2, 3],
///     "long_array" => vec![123_i64, 456, 789],
/// };
///
/// println!("{c:?}");
/// ```
#[macro_export]
macro_rules! compound {
    ($($key:expr => $value:expr),* $(,)?) => {
        <$crate::Compound as ::std::iter::FromIterator<($crate::NbtString, $crate::Value)>>::from_iter([
            $(
                (
                    ::std::convert::Into::<$crate::NbtString>::into($key),
                    ::std::convert::Into::<$crate::Value>::into($value)
                ),
            )*
        ])
    };
}
