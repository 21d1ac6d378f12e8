//! Buffered sequential reading with chained operations.
//!
//! This module provides the reading engine behind [`Reader`]: an ordered
//! queue of seek/read/close operations executed one at a time over a cached
//! byte window.
//!
//! ## Architecture
//!
//! The module is organized into four components:
//!
//! - [`window`]: the byte-range window cache — decides, per requested range,
//!   which physical reads are actually necessary
//! - [`position`]: the logical cursor and the lazily-discovered file size
//! - [`queue`]: strict FIFO execution of queued operations, including
//!   suspension and cancellation
//! - [`handle`]: the chainable builder handed to callers
//!
//! ## Reading strategy
//!
//! All bytes ever fetched for a handle live in one contiguous window of the
//! file. A read that lands inside the window costs nothing; a read next to it
//! extends it by whole chunks (the `chunk_size` option); a read far away
//! replaces it. Because the window extends in both directions, a
//! seek-backwards-then-read pattern reuses everything still cached instead of
//! re-fetching it.
//!
//! Physical I/O goes through the [`FileIo`](crate::io::FileIo) capability,
//! so the same engine drives local files and remote HTTP Range sources.

mod handle;
mod position;
mod queue;
mod window;

pub use handle::{DEFAULT_CHUNK_SIZE, Options, Reader};
pub use queue::{Control, OpContext, ResumeToken, Suspension};
