//! Whole-buffer compression around the binary codec.
//!
//! NBT files are commonly stored gzip compressed. On decode the compression
//! is detected from the leading magic bytes, on encode it is opt-in.
//!
//! ```
//! use nbt_codec::{compound, from_bytes, to_bytes};
//!
//! let c = compound! { "hello" => "world" };
//!
//! let compressed = to_bytes(&c, "", true).unwrap();
//! assert_eq!(&compressed[..2], [0x1f, 0x8b]);
//!
//! let (decoded, _) = from_bytes(&compressed).unwrap();
//! assert_eq!(decoded, c);
//! ```

use std::io::{Read, Write};

use flate2::bufread::{GzDecoder, ZlibDecoder};
use flate2::write::{GzEncoder, ZlibEncoder};
use tracing::{debug, trace};

use crate::{from_binary, to_binary, written_size, Compound, Error, NbtString, Result};

/// A whole-buffer compression format.
pub trait Compressor {
    /// Returns `true` if `bytes` start with this format's signature.
    fn is_compressed(&self, bytes: &[u8]) -> bool;

    fn compress(&self, bytes: &[u8]) -> Result<Vec<u8>>;

    /// Fails with [`Error::CorruptStream`] if `bytes` are not valid
    /// compressed data.
    fn decompress(&self, bytes: &[u8]) -> Result<Vec<u8>>;
}

/// Gzip (RFC 1952) compression.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Gzip {
    pub level: flate2::Compression,
}

/// Zlib (RFC 1950) compression.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Zlib {
    pub level: flate2::Compression,
}

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

impl Compressor for Gzip {
    fn is_compressed(&self, bytes: &[u8]) -> bool {
        bytes.starts_with(&GZIP_MAGIC)
    }

    fn compress(&self, bytes: &[u8]) -> Result<Vec<u8>> {
        let mut z = GzEncoder::new(Vec::new(), self.level);
        z.write_all(bytes)?;
        Ok(z.finish()?)
    }

    fn decompress(&self, bytes: &[u8]) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        GzDecoder::new(bytes)
            .read_to_end(&mut buf)
            .map_err(Error::CorruptStream)?;
        Ok(buf)
    }
}

impl Compressor for Zlib {
    fn is_compressed(&self, bytes: &[u8]) -> bool {
        // Deflate with a 32K window, at one of the four standard levels.
        matches!(bytes, [0x78, 0x01 | 0x5e | 0x9c | 0xda, ..])
    }

    fn compress(&self, bytes: &[u8]) -> Result<Vec<u8>> {
        let mut z = ZlibEncoder::new(Vec::new(), self.level);
        z.write_all(bytes)?;
        Ok(z.finish()?)
    }

    fn decompress(&self, bytes: &[u8]) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        ZlibDecoder::new(bytes)
            .read_to_end(&mut buf)
            .map_err(Error::CorruptStream)?;
        Ok(buf)
    }
}

/// Decodes a root compound from `bytes`, decompressing them first if
/// `compressor` recognizes them.
///
/// Bytes following the root compound are ignored.
pub fn decode_stream<C>(bytes: &[u8], compressor: &C) -> Result<(Compound, NbtString)>
where
    C: Compressor + ?Sized,
{
    let decompressed;

    let mut slice = if compressor.is_compressed(bytes) {
        decompressed = compressor.decompress(bytes)?;
        debug!(
            compressed = bytes.len(),
            decompressed = decompressed.len(),
            "decompressed NBT stream"
        );
        decompressed.as_slice()
    } else {
        trace!(len = bytes.len(), "reading uncompressed NBT stream");
        bytes
    };

    let (root, root_name) = from_binary(&mut slice)?;

    if !slice.is_empty() {
        debug!(
            trailing = slice.len(),
            "ignoring trailing bytes after root compound"
        );
    }

    Ok((root, root_name))
}

/// Encodes `comp` under `root_name`, compressing the output with
/// `compressor` when `compressed` is set.
pub fn encode_stream<C, N>(
    comp: &Compound,
    root_name: &N,
    compressed: bool,
    compressor: &C,
) -> Result<Vec<u8>>
where
    C: Compressor + ?Sized,
    N: AsRef<[u8]> + ?Sized,
{
    let mut buf = Vec::with_capacity(written_size(comp, root_name));
    to_binary(comp, &mut buf, root_name)?;

    if !compressed {
        return Ok(buf);
    }

    let out = compressor.compress(&buf)?;

    debug!(
        uncompressed = buf.len(),
        compressed = out.len(),
        "compressed NBT stream"
    );

    Ok(out)
}

/// Decodes a root compound from a buffer that may be gzip or zlib
/// compressed.
pub fn from_bytes(bytes: &[u8]) -> Result<(Compound, NbtString)> {
    let zlib = Zlib::default();

    if zlib.is_compressed(bytes) {
        decode_stream(bytes, &zlib)
    } else {
        decode_stream(bytes, &Gzip::default())
    }
}

/// Encodes a root compound, gzip compressing the result if `compressed` is
/// set.
pub fn to_bytes<N>(comp: &Compound, root_name: &N, compressed: bool) -> Result<Vec<u8>>
where
    N: AsRef<[u8]> + ?Sized,
{
    encode_stream(comp, root_name, compressed, &Gzip::default())
}
