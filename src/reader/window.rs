//! Byte-range window cache.
//!
//! The window is the single in-memory buffer backing all reads on a handle.
//! It caches a contiguous range `[start, end)` of file offsets and grows in
//! chunk-sized physical reads only when a requested range is not already
//! resident.
//!
//! ## Caching strategy
//!
//! For a requested range the window decides between three cases:
//!
//! 1. Fully resident: no physical read at all.
//! 2. Overlapping: the uncovered prefix is closed with chunk-sized reads
//!    ending exactly at the window start, the uncovered suffix with
//!    chunk-sized reads starting at the window end. Every byte already
//!    resident is reused.
//! 3. Fully disjoint (adjacency included): the window is discarded and
//!    rebuilt at the requested offset. Stale, non-adjacent data is never
//!    retained.
//!
//! A physical read that comes back short marks end of file; the window never
//! extends past it.

use std::ops::Range;

use crate::io::FileIo;
use crate::reader::position::Position;
use anyhow::Result;

/// Contiguous cached byte range of the underlying file
#[derive(Debug, Default)]
pub(crate) struct Window {
    start: u64,
    buf: Vec<u8>,
}

impl Window {
    pub fn new() -> Self {
        Self::default()
    }

    /// File offset one past the last cached byte
    fn end(&self) -> u64 {
        self.start + self.buf.len() as u64
    }

    /// Make `[start, end)` resident as far as the file allows.
    ///
    /// Issues the minimal number of chunk-sized physical reads needed to
    /// close the uncovered prefix and suffix, then returns the absolute
    /// offset range that is now resident and intersects the request. The
    /// result is shorter than the request only at end of file.
    pub async fn ensure<F: FileIo>(
        &mut self,
        io: &F,
        handle: &F::Handle,
        pos: &mut Position,
        start: u64,
        end: u64,
        chunk: u64,
    ) -> Result<Range<u64>> {
        // Requests past a known end of file are satisfied without any
        // physical read.
        let end = pos.size().map_or(end, |size| end.min(size));
        if start >= end {
            return Ok(start..start);
        }

        // A request with no overlap evicts the window entirely. Ranges that
        // merely touch (request ending at the window start or starting at
        // the window end) count as disjoint.
        if !self.buf.is_empty() && (end <= self.start || start >= self.end()) {
            self.buf.clear();
            self.start = start;
        }
        if self.buf.is_empty() {
            self.start = start;
        }

        // Close the gap in front of the window, one chunk at a time, each
        // read ending exactly where the window currently begins.
        while start < self.start {
            let len = chunk.min(self.start);
            let offset = self.start - len;
            let mut head = vec![0u8; len as usize];
            let n = io.read_at(handle, offset, &mut head).await?;
            if (n as u64) < len {
                // Cannot reach the window from here; should not happen for
                // a regular file above offset 0.
                break;
            }
            head.extend_from_slice(&self.buf);
            self.buf = head;
            self.start = offset;
        }

        // Extend past the window end until the request is covered or the
        // file runs out.
        while self.end() < end {
            if pos.size().is_some_and(|size| self.end() >= size) {
                break;
            }
            let mut tail = vec![0u8; chunk as usize];
            let n = io.read_at(handle, self.end(), &mut tail).await?;
            self.buf.extend_from_slice(&tail[..n]);
            if n < chunk as usize {
                // Short read: end of file is now known.
                pos.set_size(self.end());
                break;
            }
        }

        let lo = start.max(self.start);
        let hi = end.min(self.end());
        if lo >= hi {
            return Ok(start..start);
        }
        Ok(lo..hi)
    }

    /// Borrow the resident bytes for an absolute range returned by `ensure`
    pub fn view(&self, span: Range<u64>) -> &[u8] {
        if span.start >= span.end {
            return &[];
        }
        let lo = (span.start - self.start) as usize;
        let hi = (span.end - self.start) as usize;
        &self.buf[lo..hi]
    }
}
