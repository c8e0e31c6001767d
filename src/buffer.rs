//! Segmented buffer storage and read cursors.
//!
//! A [`SegmentedBuffer`] is one logical byte stream stored as an ordered
//! sequence of independently owned memory regions, the shape left behind by
//! network receive paths, page caches, and journal writes. Producers append
//! segments; readers walk the stream through copyable [`ReadCursor`]s
//! without ever flattening the segments into a single allocation.

use bytes::Bytes;

/// A logical byte stream stored as multiple independently owned segments.
///
/// Append-only from the producer's perspective. Read access goes through
/// [`ReadCursor`]s obtained from [`SegmentedBuffer::cursor`].
#[derive(Debug, Clone, Default)]
pub struct SegmentedBuffer {
    segments: Vec<Bytes>,
    len: usize,
}

impl SegmentedBuffer {
    /// Create an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a single-segment buffer holding a copy of `data`.
    #[must_use]
    pub fn from_slice(data: &[u8]) -> Self {
        let mut buf = Self::new();
        buf.push_segment(Bytes::copy_from_slice(data));
        buf
    }

    /// Append one segment to the end of the stream.
    ///
    /// Empty segments are dropped, so a cursor never rests on a zero-length
    /// run.
    pub fn push_segment(&mut self, segment: impl Into<Bytes>) {
        let segment = segment.into();
        if segment.is_empty() {
            return;
        }
        self.len += segment.len();
        self.segments.push(segment);
    }

    /// Total number of logical bytes across all segments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// `true` if the buffer holds no bytes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of physical segments.
    #[must_use]
    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    /// The underlying segments, in stream order.
    #[must_use]
    pub fn segments(&self) -> &[Bytes] {
        &self.segments
    }

    /// A cursor positioned at the start of the stream.
    #[must_use]
    pub fn cursor(&self) -> ReadCursor<'_> {
        ReadCursor {
            segments: &self.segments,
            seg: 0,
            off: 0,
            pos: 0,
            remaining: self.len,
        }
    }

    /// Flatten the stream into one contiguous allocation.
    #[must_use]
    pub fn to_vec(&self) -> Vec<u8> {
        let mut flat = Vec::with_capacity(self.len);
        for segment in &self.segments {
            flat.extend_from_slice(segment);
        }
        flat
    }
}

/// A resumable read position into a [`SegmentedBuffer`].
///
/// Copying a cursor yields an independent position over the same underlying
/// segments; advancing one copy does not move another. No segment bytes are
/// copied by either operation.
#[derive(Debug, Clone, Copy)]
pub struct ReadCursor<'a> {
    segments: &'a [Bytes],
    seg: usize,
    off: usize,
    pos: usize,
    remaining: usize,
}

impl<'a> ReadCursor<'a> {
    /// Bytes left between this position and the end of the buffer.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.remaining
    }

    /// Absolute byte offset from the start of the buffer.
    #[must_use]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// The longest contiguous run starting at the current position.
    ///
    /// Never crosses a segment boundary; empty exactly when the cursor is
    /// exhausted. The slice borrows the buffer, not the cursor, so it stays
    /// valid while the cursor moves on.
    #[must_use]
    pub fn chunk(&self) -> &'a [u8] {
        match self.segments.get(self.seg) {
            Some(segment) => &segment[self.off..],
            None => &[],
        }
    }

    /// Advance the position by `n` bytes, crossing segment boundaries
    /// transparently.
    ///
    /// # Panics
    ///
    /// Panics if `n` exceeds [`remaining`](ReadCursor::remaining); running
    /// off the end of the buffer is a caller bug, not an I/O condition.
    pub fn advance(&mut self, n: usize) {
        assert!(
            n <= self.remaining,
            "cursor advanced past end of buffer ({n} > {})",
            self.remaining
        );
        self.pos += n;
        self.remaining -= n;
        let mut left = n;
        while left > 0 {
            let run = self.segments[self.seg].len() - self.off;
            if left < run {
                self.off += left;
                break;
            }
            left -= run;
            self.seg += 1;
            self.off = 0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_segment_buffer() -> SegmentedBuffer {
        let mut buf = SegmentedBuffer::new();
        buf.push_segment(&b"abc"[..]);
        buf.push_segment(&b"defgh"[..]);
        buf.push_segment(&b"ij"[..]);
        buf
    }

    #[test]
    fn test_len_spans_segments() {
        let buf = three_segment_buffer();
        assert_eq!(buf.len(), 10);
        assert_eq!(buf.segment_count(), 3);
        assert_eq!(buf.to_vec(), b"abcdefghij");
    }

    #[test]
    fn test_empty_segment_dropped() {
        let mut buf = SegmentedBuffer::new();
        buf.push_segment(Bytes::new());
        assert!(buf.is_empty());
        assert_eq!(buf.segment_count(), 0);
    }

    #[test]
    fn test_chunk_stops_at_segment_boundary() {
        let buf = three_segment_buffer();
        let mut cursor = buf.cursor();
        assert_eq!(cursor.chunk(), b"abc");
        cursor.advance(1);
        assert_eq!(cursor.chunk(), b"bc");
        cursor.advance(2);
        assert_eq!(cursor.chunk(), b"defgh");
    }

    #[test]
    fn test_advance_across_boundaries() {
        let buf = three_segment_buffer();
        let mut cursor = buf.cursor();
        cursor.advance(7);
        assert_eq!(cursor.position(), 7);
        assert_eq!(cursor.remaining(), 3);
        assert_eq!(cursor.chunk(), b"fgh");
        cursor.advance(3);
        assert_eq!(cursor.remaining(), 0);
        assert!(cursor.chunk().is_empty());
    }

    #[test]
    fn test_cursor_copies_are_independent() {
        let buf = three_segment_buffer();
        let mut a = buf.cursor();
        let b = a;
        a.advance(5);
        assert_eq!(a.position(), 5);
        assert_eq!(b.position(), 0);
        assert_eq!(b.chunk(), b"abc");
    }

    #[test]
    fn test_chunk_outlives_cursor_moves() {
        let buf = three_segment_buffer();
        let mut cursor = buf.cursor();
        let run = cursor.chunk();
        cursor.advance(8);
        assert_eq!(run, b"abc");
    }

    #[test]
    #[should_panic(expected = "past end of buffer")]
    fn test_advance_past_end_panics() {
        let buf = three_segment_buffer();
        let mut cursor = buf.cursor();
        cursor.advance(11);
    }

    #[test]
    fn test_empty_buffer_cursor() {
        let buf = SegmentedBuffer::new();
        let cursor = buf.cursor();
        assert_eq!(cursor.remaining(), 0);
        assert!(cursor.chunk().is_empty());
    }
}
