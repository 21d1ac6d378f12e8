//! # seekbuf
//!
//! A buffered file reader driven by a chain of seek/read operations.
//!
//! This library executes position-aware operations against a single open
//! file strictly in order while keeping the number of physical reads minimal:
//! every byte fetched lands in a contiguous in-memory window that later reads
//! extend or reuse instead of touching storage again. Physical I/O is a
//! capability trait, so the same engine reads local files and remote HTTP
//! sources via Range requests.
//!
//! ## Features
//!
//! - Chainable seek/read/close operations, executed one at a time
//! - Contiguous byte-range window cache with chunked extension in both
//!   directions
//! - Lazy descriptor acquisition: chains that need no bytes perform no I/O
//! - Deferred completion: a callback may park the queue and resume it later
//! - Cancellation from any callback, with or without an error
//! - Local filesystem and HTTP Range capabilities out of the box
//!
//! ## Example
//!
//! ```no_run
//! use seekbuf::{Control, Options, Reader};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     Reader::open_with("archive.bin", Options { chunk_size: 4096 })
//!         .seek(1024)
//!         .read(256, |ctx, n, bytes| {
//!             println!("read {} bytes, cursor at {}", n, ctx.tell());
//!             println!("{:02x?}", bytes);
//!             Control::Complete
//!         })
//!         .seek_end_with(0, |ctx| {
//!             println!("last byte sits at offset {}", ctx.tell());
//!             Control::Complete
//!         })
//!         .close()
//!         .run()
//!         .await
//! }
//! ```

pub mod cli;
pub mod io;
pub mod reader;

pub use cli::Cli;
pub use io::{FileIo, HttpFs, LocalFs};
pub use reader::{Control, DEFAULT_CHUNK_SIZE, OpContext, Options, Reader, ResumeToken, Suspension};
