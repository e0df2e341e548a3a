use std::io;

use thiserror::Error;

use crate::Tag;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors produced while decoding, encoding, or building NBT data.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error("unexpected end of input: needed {needed} bytes, {remaining} remaining")]
    TruncatedInput { needed: usize, remaining: usize },
    #[error("unknown tag kind {0:#04x}")]
    UnknownTagKind(u8),
    #[error("string of declared length {declared} overruns input ({remaining} bytes remaining)")]
    MalformedString { declared: usize, remaining: usize },
    #[error("corrupt compressed stream: {0}")]
    CorruptStream(#[source] io::Error),
    #[error("root value must be a compound, found `{0}`")]
    InvalidRootKind(Tag),
    #[error("reached maximum recursion depth of {}", crate::MAX_DEPTH)]
    DepthLimitExceeded,
    #[error("`end` tag in value position")]
    UnexpectedEnd,
    #[error("list of `end` declares {0} elements")]
    NonEmptyEndList(i32),
    #[error("string of length {0} exceeds maximum of u16::MAX")]
    StringTooLong(usize),
    #[error("{tag} of length {len} exceeds maximum of i32::MAX")]
    LengthOverflow { tag: Tag, len: usize },
    #[error("cannot add `{found}` to a list of `{expected}`")]
    ListKindMismatch { expected: Tag, found: Tag },
    #[error("an I/O error occurred: {0}")]
    Io(#[from] io::Error),
}
