//! The compress/decompress contract exposed to the compression framework.

use tracing::debug;

use crate::accel::Accelerator;
use crate::buffer::{ReadCursor, SegmentedBuffer};
use crate::error::Result;
use crate::snappy;
use crate::source::SegmentedSource;
use crate::Algorithm;

/// The contract a generic compression framework drives.
///
/// Implementations are stateless across calls apart from their immutable
/// identity, so a single instance may serve concurrent calls as long as
/// each call brings its own buffers and cursor.
pub trait Codec: Send + Sync {
    /// The algorithm this codec implements.
    fn algorithm(&self) -> Algorithm;

    /// Stable name used for codec selection.
    fn name(&self) -> &'static str;

    /// Compress all of `input`, appending the compressed stream to
    /// `output` as one segment.
    ///
    /// # Errors
    ///
    /// Returns an error only if the wrapped algorithm or a configured
    /// accelerator rejects the operation; nothing is appended in that case.
    fn compress(&self, input: &SegmentedBuffer, output: &mut SegmentedBuffer) -> Result<()>;

    /// Decompress all of `input`, appending the recovered bytes to
    /// `output`.
    ///
    /// # Errors
    ///
    /// [`Error::MalformedHeader`](crate::Error::MalformedHeader) or
    /// [`Error::CorruptedPayload`](crate::Error::CorruptedPayload); nothing
    /// is appended on failure.
    fn decompress(&self, input: &SegmentedBuffer, output: &mut SegmentedBuffer) -> Result<()>;

    /// Decompress `compressed_len` bytes starting at `cursor`.
    ///
    /// On success `cursor` is advanced past exactly the consumed bytes, so
    /// data embedded after the compressed region (a checksum trailer, the
    /// next record) can be read next.
    ///
    /// # Errors
    ///
    /// [`Error::MalformedHeader`](crate::Error::MalformedHeader) or
    /// [`Error::CorruptedPayload`](crate::Error::CorruptedPayload); on
    /// failure neither `cursor` nor `output` is touched.
    fn decompress_at(
        &self,
        cursor: &mut ReadCursor<'_>,
        compressed_len: usize,
        output: &mut SegmentedBuffer,
    ) -> Result<()>;
}

/// Builder for [`SnappyCodec`].
#[derive(Default)]
pub struct CodecBuilder {
    accelerator: Option<Box<dyn Accelerator>>,
}

impl CodecBuilder {
    /// Create a builder with no accelerator configured.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Offer an offload backend; it takes over the data path only if its
    /// probe succeeds.
    #[must_use]
    pub fn accelerator(mut self, accelerator: Box<dyn Accelerator>) -> Self {
        self.accelerator = Some(accelerator);
        self
    }

    /// Build the codec, probing the accelerator once.
    ///
    /// A failed probe is not an error; the codec runs the software path
    /// for its whole lifetime.
    #[must_use]
    pub fn build(self) -> SnappyCodec {
        let accelerator = self.accelerator.and_then(|mut accel| {
            if accel.init(Algorithm::Snappy) {
                Some(accel)
            } else {
                debug!("accelerator probe failed, using software snappy");
                None
            }
        });
        SnappyCodec { accelerator }
    }
}

/// Snappy codec over segmented buffers.
///
/// Identity is fixed at construction and the instance carries no mutable
/// state, so it is safe to share across threads; cursors and buffers
/// supplied to an in-flight call are not.
pub struct SnappyCodec {
    accelerator: Option<Box<dyn Accelerator>>,
}

impl SnappyCodec {
    /// Create a software-only codec.
    #[must_use]
    pub fn new() -> Self {
        Self { accelerator: None }
    }

    /// Start building a codec with optional acceleration.
    #[must_use]
    pub fn builder() -> CodecBuilder {
        CodecBuilder::new()
    }

    /// `true` when an offload backend passed its probe and owns the data
    /// path.
    #[must_use]
    pub fn accelerated(&self) -> bool {
        self.accelerator.is_some()
    }
}

impl Default for SnappyCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl Codec for SnappyCodec {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Snappy
    }

    fn name(&self) -> &'static str {
        Algorithm::Snappy.as_str()
    }

    fn compress(&self, input: &SegmentedBuffer, output: &mut SegmentedBuffer) -> Result<()> {
        if let Some(accel) = &self.accelerator {
            return accel.compress(input, output);
        }
        let mut source = SegmentedSource::new(input.cursor(), input.len());
        let mut region = vec![0u8; snappy::max_compressed_length(input.len())];
        let written = snappy::compress(&mut source, &mut region)?;
        // The bound is conservative; only the produced prefix is handed on.
        region.truncate(written);
        output.push_segment(region);
        Ok(())
    }

    fn decompress(&self, input: &SegmentedBuffer, output: &mut SegmentedBuffer) -> Result<()> {
        if let Some(accel) = &self.accelerator {
            return accel.decompress(input, output);
        }
        let mut cursor = input.cursor();
        self.decompress_at(&mut cursor, input.len(), output)
    }

    fn decompress_at(
        &self,
        cursor: &mut ReadCursor<'_>,
        compressed_len: usize,
        output: &mut SegmentedBuffer,
    ) -> Result<()> {
        if let Some(accel) = &self.accelerator {
            return accel.decompress_at(cursor, compressed_len, output);
        }
        // Pass one: recover the uncompressed length from the varint prefix.
        // The probe runs on a copy of the cursor, so a malformed stream
        // leaves the caller's position where it was.
        let mut probe = SegmentedSource::new(*cursor, compressed_len);
        let uncompressed_len = snappy::uncompressed_length(&mut probe)?;

        // Pass two: a fresh window over the same region for the decode. The
        // engine's pull protocol is forward-only, so the probe cannot be
        // rewound and reused.
        let mut source = SegmentedSource::new(*cursor, compressed_len);
        let mut region = vec![0u8; uncompressed_len];
        snappy::raw_uncompress(&mut source, &mut region)?;
        *cursor = source.position();
        output.push_segment(region);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity() {
        let codec = SnappyCodec::new();
        assert_eq!(codec.algorithm(), Algorithm::Snappy);
        assert_eq!(codec.name(), "snappy");
        assert!(!codec.accelerated());
    }

    #[test]
    fn test_compress_appends_one_segment() {
        let codec = SnappyCodec::new();
        let input = SegmentedBuffer::from_slice(&[0u8; 4096]);
        let mut output = SegmentedBuffer::new();
        codec.compress(&input, &mut output).unwrap();
        assert_eq!(output.segment_count(), 1);
        assert!(output.len() < input.len());
    }

    #[test]
    fn test_compressed_is_smaller_than_bound() {
        let codec = SnappyCodec::new();
        let input = SegmentedBuffer::from_slice(&[7u8; 10_000]);
        let mut output = SegmentedBuffer::new();
        codec.compress(&input, &mut output).unwrap();
        assert!(output.len() < snappy::max_compressed_length(input.len()));
    }

    #[test]
    fn test_roundtrip_multi_segment() {
        let codec = SnappyCodec::new();
        let mut input = SegmentedBuffer::new();
        input.push_segment(&b"storage engines keep "[..]);
        input.push_segment(&b"data in segmented buffers"[..]);

        let mut compressed = SegmentedBuffer::new();
        codec.compress(&input, &mut compressed).unwrap();
        let mut recovered = SegmentedBuffer::new();
        codec.decompress(&compressed, &mut recovered).unwrap();
        assert_eq!(recovered.to_vec(), input.to_vec());
    }

    #[test]
    fn test_decompress_failure_appends_nothing() {
        let codec = SnappyCodec::new();
        let garbage = SegmentedBuffer::from_slice(&[0xff]);
        let mut output = SegmentedBuffer::new();
        output.push_segment(&b"existing"[..]);
        assert!(codec.decompress(&garbage, &mut output).is_err());
        assert_eq!(output.len(), 8);
        assert_eq!(output.segment_count(), 1);
    }
}
