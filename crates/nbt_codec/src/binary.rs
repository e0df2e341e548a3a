//! Support for serializing and deserializing compounds in the binary NBT
//! format.
//!
//! # Examples
//!
//! ```
//! use nbt_codec::{compound, to_binary, List};
//!
//! let c = compound! {
//!     "byte" => 5_i8,
//!     "string" => "hello",
//!     "list_of_float" => List::Float(vec![
//!         std::f32::consts::PI,
//!         std::f32::consts::E,
//!         1.4142
//!     ]),
//! };
//!
//! let mut buf = vec![];
//!
//! to_binary(&c, &mut buf, "").unwrap();
//! ```
//!
//! Decode NBT data from its binary form.
//!
//! ```
//! use nbt_codec::{compound, from_binary};
//!
//! let some_bytes = [10, 0, 0, 3, 0, 3, 105, 110, 116, 0, 0, 222, 173, 0];
//!
//! let expected_value = compound! {
//!     "int" => 0xdead
//! };
//!
//! let (nbt, root_name) = from_binary(&mut some_bytes.as_slice()).unwrap();
//!
//! assert_eq!(nbt, expected_value);
//! assert_eq!(root_name, "");
//! ```

mod decode;
mod encode;
pub mod primitive;
#[cfg(test)]
mod tests;

pub use decode::*;
pub use encode::*;
