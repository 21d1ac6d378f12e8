use std::collections::VecDeque;
use std::sync::Arc;

use anyhow::Result;

use crate::io::{FileIo, LocalFs};
use crate::reader::queue::{Control, Executor, Op, OpContext, Whence};

/// Default size in bytes of a single physical read chunk
pub const DEFAULT_CHUNK_SIZE: usize = 16 * 1024;

/// Reader configuration
#[derive(Debug, Clone, Copy)]
pub struct Options {
    /// Maximum size in bytes of a single physical read chunk.
    ///
    /// Every physical read the window cache issues is this large, except
    /// when clamped by offset 0 or end of file. A value of 0 is treated
    /// as 1.
    pub chunk_size: usize,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

/// Chainable buffered reader over a single target.
///
/// Building the chain performs no I/O: every call enqueues an operation, and
/// [`run`](Reader::run) executes them strictly in order. Byte ranges already
/// fetched are served from an in-memory window, so repeated reads over
/// nearby offsets cost no additional physical reads.
///
/// ## Example
///
/// ```no_run
/// use seekbuf::{Control, Reader};
///
/// #[tokio::main]
/// async fn main() -> anyhow::Result<()> {
///     Reader::open("data.bin")
///         .seek(128)
///         .read(16, |ctx, n, bytes| {
///             println!("{} bytes, cursor now at {}", n, ctx.tell());
///             println!("{:02x?}", bytes);
///             Control::Complete
///         })
///         .close()
///         .run()
///         .await
/// }
/// ```
///
/// The outcome of the whole chain is the return value of `run()`: `Ok(())`
/// when the chain closed, `Err` when opening or reading failed or a callback
/// cancelled with an error.
pub struct Reader<F: FileIo = LocalFs> {
    io: Arc<F>,
    target: String,
    options: Options,
    ops: VecDeque<Op>,
}

impl Reader<LocalFs> {
    /// Start a chain against a local file with default options
    pub fn open(target: impl Into<String>) -> Self {
        Self::with_io(Arc::new(LocalFs), target, Options::default())
    }

    /// Start a chain against a local file
    pub fn open_with(target: impl Into<String>, options: Options) -> Self {
        Self::with_io(Arc::new(LocalFs), target, options)
    }
}

impl<F: FileIo> Reader<F> {
    /// Start a chain against an injected physical I/O capability
    pub fn with_io(io: Arc<F>, target: impl Into<String>, options: Options) -> Self {
        Self {
            io,
            target: target.into(),
            options,
            ops: VecDeque::new(),
        }
    }

    /// Queue an absolute seek
    pub fn seek(mut self, offset: u64) -> Self {
        self.ops.push_back(Op::Seek {
            whence: Whence::Start(offset),
            callback: None,
        });
        self
    }

    /// Queue an absolute seek with a callback
    pub fn seek_with<C>(mut self, offset: u64, callback: C) -> Self
    where
        C: FnOnce(&mut OpContext) -> Control + Send + 'static,
    {
        self.ops.push_back(Op::Seek {
            whence: Whence::Start(offset),
            callback: Some(Box::new(callback)),
        });
        self
    }

    /// Queue a seek counting back from the last byte; `back == 0` lands on
    /// the final byte
    pub fn seek_end(mut self, back: u64) -> Self {
        self.ops.push_back(Op::Seek {
            whence: Whence::End(back),
            callback: None,
        });
        self
    }

    /// Queue a from-end seek with a callback
    pub fn seek_end_with<C>(mut self, back: u64, callback: C) -> Self
    where
        C: FnOnce(&mut OpContext) -> Control + Send + 'static,
    {
        self.ops.push_back(Op::Seek {
            whence: Whence::End(back),
            callback: Some(Box::new(callback)),
        });
        self
    }

    /// Queue a read of `length` bytes at the cursor.
    ///
    /// The callback receives the number of bytes actually read and the
    /// bytes themselves; fewer bytes than requested means the read ran into
    /// end of file. The cursor has already advanced past them.
    pub fn read<C>(mut self, length: usize, callback: C) -> Self
    where
        C: FnOnce(&mut OpContext, usize, &[u8]) -> Control + Send + 'static,
    {
        self.ops.push_back(Op::Read {
            length,
            callback: Box::new(callback),
        });
        self
    }

    /// Queue the release of the descriptor, ending the chain.
    ///
    /// Operations queued after `close` never execute. Closing twice, or
    /// closing a chain that never acquired a descriptor, performs no
    /// additional physical close.
    pub fn close(mut self) -> Self {
        self.ops.push_back(Op::Close);
        self
    }

    /// Execute the chain.
    ///
    /// Resolves once every queued operation ran, the chain was closed or
    /// cancelled, or a fault ended it. The descriptor is released on every
    /// path that acquired one.
    pub async fn run(self) -> Result<()> {
        let chunk = self.options.chunk_size.max(1) as u64;
        Executor::new(self.io, self.target, chunk)
            .drain(self.ops)
            .await
    }
}
