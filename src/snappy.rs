//! Adapter between [`Source`] windows and the Snappy block format.
//!
//! The `snap` crate's raw entry points are slice-based; this module bridges
//! them to the pull protocol. A window that is physically contiguous feeds
//! the encoder or decoder by borrow, with no copy at all; a window spanning
//! segment boundaries is folded into a single scratch gather first, so a
//! discontiguous window costs exactly one copy and never more.

use crate::error::{Error, Result};
use crate::source::Source;

/// Upper bound on the compressed size of `n` input bytes.
#[must_use]
pub fn max_compressed_length(n: usize) -> usize {
    snap::raw::max_compress_len(n)
}

/// Compress the whole window of `source` into `dest`.
///
/// `dest` must hold at least [`max_compressed_length`] of the window.
/// Returns the number of bytes written; on success the source is left fully
/// consumed.
pub fn compress<S: Source>(source: &mut S, dest: &mut [u8]) -> Result<usize> {
    let len = source.available();
    let run = source.peek();
    if run.len() == len {
        let written = snap::raw::Encoder::new()
            .compress(run, dest)
            .map_err(|e| Error::InvalidInput(e.to_string()))?;
        source.skip(len);
        return Ok(written);
    }
    let flat = gather(source);
    snap::raw::Encoder::new()
        .compress(&flat, dest)
        .map_err(|e| Error::InvalidInput(e.to_string()))
}

/// Recover the uncompressed length from the stream's varint prefix.
///
/// Consumes at most five bytes of the window, re-peeking across segment
/// boundaries when the varint straddles one.
///
/// # Errors
///
/// [`Error::MalformedHeader`] when the prefix is truncated or unparseable;
/// nothing about the stream size can be trusted in that case.
pub fn uncompressed_length<S: Source>(source: &mut S) -> Result<usize> {
    // A u32 length varint is at most 5 bytes.
    const MAX_PREFIX: usize = 5;
    let mut prefix = [0u8; MAX_PREFIX];
    let mut filled = 0;
    while filled < MAX_PREFIX && source.available() > 0 {
        let run = source.peek();
        let take = run.len().min(MAX_PREFIX - filled);
        prefix[filled..filled + take].copy_from_slice(&run[..take]);
        source.skip(take);
        filled += take;
    }
    snap::raw::decompress_len(&prefix[..filled])
        .map_err(|e| Error::MalformedHeader(e.to_string()))
}

/// Decode the whole window of `source` into `dest`.
///
/// `dest` must hold exactly the length recovered by
/// [`uncompressed_length`]. Returns the number of bytes produced; on
/// success the source is left fully consumed, so its position marks the end
/// of the compressed region.
///
/// # Errors
///
/// [`Error::CorruptedPayload`] when the payload does not decode despite a
/// parseable length prefix.
pub fn raw_uncompress<S: Source>(source: &mut S, dest: &mut [u8]) -> Result<usize> {
    let len = source.available();
    let run = source.peek();
    if run.len() == len {
        let written = snap::raw::Decoder::new()
            .decompress(run, dest)
            .map_err(|e| Error::CorruptedPayload(e.to_string()))?;
        source.skip(len);
        return Ok(written);
    }
    let flat = gather(source);
    snap::raw::Decoder::new()
        .decompress(&flat, dest)
        .map_err(|e| Error::CorruptedPayload(e.to_string()))
}

/// Fold a discontiguous window into one contiguous allocation, consuming
/// the source.
fn gather<S: Source>(source: &mut S) -> Vec<u8> {
    let mut flat = Vec::with_capacity(source.available());
    while source.available() > 0 {
        let run = source.peek();
        let take = run.len();
        flat.extend_from_slice(run);
        source.skip(take);
    }
    flat
}
