//! Pull-based byte sources over segmented buffers.

use crate::buffer::ReadCursor;

/// A bounded, forward-only pull stream.
///
/// This is the contract the compression engine drives: look ahead with
/// [`peek`](Source::peek), commit with [`skip`](Source::skip). There is no
/// random access and no rewind.
pub trait Source {
    /// Bytes left in the stream window.
    fn available(&self) -> usize;

    /// Borrow the next contiguous run without consuming it.
    ///
    /// Returns an empty slice exactly when the window is exhausted. The run
    /// may be shorter than [`available`](Source::available) when the
    /// underlying storage is discontiguous; consume it with `skip` and peek
    /// again to see the next run. Repeated peeks without an intervening
    /// skip return the same run.
    fn peek(&self) -> &[u8];

    /// Consume `n` bytes.
    ///
    /// # Panics
    ///
    /// Panics if `n` exceeds `available()`; over-consuming the window is a
    /// pull-protocol violation by the caller.
    fn skip(&mut self, n: usize);
}

/// A [`Source`] over a bounded window of a segmented buffer.
///
/// Holds a private copy of the caller's cursor, so driving the source never
/// moves a position the caller can see; the final position is handed back
/// explicitly through [`SegmentedSource::position`]. `peek` takes `&self`,
/// which makes the no-advance-on-lookahead rule structural rather than a
/// convention.
#[derive(Debug, Clone)]
pub struct SegmentedSource<'a> {
    cursor: ReadCursor<'a>,
    remaining: usize,
}

impl<'a> SegmentedSource<'a> {
    /// Open a window of `len` bytes starting at `cursor`.
    ///
    /// The window is clamped to the bytes the cursor can still reach, so a
    /// `len` beyond the end of the buffer yields a shorter window rather
    /// than an error.
    #[must_use]
    pub fn new(cursor: ReadCursor<'a>, len: usize) -> Self {
        let remaining = len.min(cursor.remaining());
        Self { cursor, remaining }
    }

    /// The cursor at the current position.
    ///
    /// Once the engine has drained the window this marks the first byte
    /// past the consumed region, which the owning codec reports back to
    /// callers whose compressed payload is embedded in a larger stream
    /// (e.g. followed by a checksum trailer).
    #[must_use]
    pub fn position(&self) -> ReadCursor<'a> {
        self.cursor
    }
}

impl Source for SegmentedSource<'_> {
    fn available(&self) -> usize {
        self.remaining
    }

    fn peek(&self) -> &[u8] {
        if self.remaining == 0 {
            return &[];
        }
        let run = self.cursor.chunk();
        &run[..run.len().min(self.remaining)]
    }

    fn skip(&mut self, n: usize) {
        assert!(
            n <= self.remaining,
            "skip past end of source window ({n} > {})",
            self.remaining
        );
        self.cursor.advance(n);
        self.remaining -= n;
    }
}
