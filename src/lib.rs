//! Zero-copy Snappy compression over segmented storage buffers.
//!
//! Storage engines keep data in segmented buffers: one logical byte stream
//! physically scattered across many independently owned regions, the shape
//! left behind by network receive paths, page caches, and journal writes.
//! Byte-oriented compressors want the opposite, a single contiguous run.
//! This crate bridges the two without flattening the input up front: a
//! pull-based [`Source`] window walks the segments, the Snappy engine peeks
//! and skips its way through, and no byte is copied until the engine
//! actually needs it. A window that is already contiguous is never copied
//! at all.
//!
//! The positional [`Codec::decompress_at`] form advances the caller's
//! [`ReadCursor`] past exactly the consumed bytes, so a compressed payload
//! embedded in a larger stream (followed by a checksum trailer, the next
//! record) can be read in place.
//!
//! # Example
//!
//! ```
//! use segsnap::{Codec, SegmentedBuffer, SnappyCodec};
//!
//! let mut input = SegmentedBuffer::new();
//! input.push_segment(&b"hello "[..]);
//! input.push_segment(&b"segmented "[..]);
//! input.push_segment(&b"world"[..]);
//!
//! let codec = SnappyCodec::new();
//! let mut compressed = SegmentedBuffer::new();
//! codec.compress(&input, &mut compressed).unwrap();
//!
//! let mut recovered = SegmentedBuffer::new();
//! codec.decompress(&compressed, &mut recovered).unwrap();
//! assert_eq!(recovered.to_vec(), input.to_vec());
//! ```

#![deny(missing_docs)]
#![deny(clippy::panic)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

mod accel;
mod buffer;
mod codec;
mod error;
pub mod snappy;
mod source;

pub use accel::Accelerator;
pub use buffer::{ReadCursor, SegmentedBuffer};
pub use codec::{Codec, CodecBuilder, SnappyCodec};
pub use error::{Error, Result};
pub use source::{SegmentedSource, Source};

/// Algorithm identifiers used for codec selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Algorithm {
    /// Snappy block compression.
    #[default]
    Snappy,
}

impl Algorithm {
    /// Stable name used by configuration and codec registries.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Algorithm::Snappy => "snappy",
        }
    }
}

impl std::fmt::Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Algorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "snappy" => Ok(Algorithm::Snappy),
            other => Err(Error::InvalidInput(format!(
                "unknown compression algorithm: {other}"
            ))),
        }
    }
}
