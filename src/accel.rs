//! Offload backend seam for hardware-accelerated codecs.
//!
//! Acceleration is a runtime strategy chosen once at codec construction,
//! not a codec subtype: a backend that probes successfully receives every
//! subsequent call verbatim and must honor the same contract as the
//! software path, including cursor advancement for the positional
//! decompress. A failed probe is never fatal; the codec silently runs the
//! software path instead.

use crate::buffer::{ReadCursor, SegmentedBuffer};
use crate::error::Result;
use crate::Algorithm;

/// A hardware or offload compression backend.
pub trait Accelerator: Send + Sync {
    /// Probe and initialize the backend for `algorithm`.
    ///
    /// Called exactly once, at codec construction. Returning `false` makes
    /// the codec use the software path for its whole lifetime.
    fn init(&mut self, algorithm: Algorithm) -> bool;

    /// Accelerated counterpart of [`Codec::compress`](crate::Codec::compress).
    fn compress(&self, input: &SegmentedBuffer, output: &mut SegmentedBuffer) -> Result<()>;

    /// Accelerated counterpart of [`Codec::decompress`](crate::Codec::decompress).
    fn decompress(&self, input: &SegmentedBuffer, output: &mut SegmentedBuffer) -> Result<()>;

    /// Accelerated counterpart of
    /// [`Codec::decompress_at`](crate::Codec::decompress_at); must leave
    /// `cursor` exactly past the consumed bytes on success and untouched on
    /// failure.
    fn decompress_at(
        &self,
        cursor: &mut ReadCursor<'_>,
        compressed_len: usize,
        output: &mut SegmentedBuffer,
    ) -> Result<()>;
}
