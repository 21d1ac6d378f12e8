//! Ordered execution of queued operations.
//!
//! Operations run strictly one at a time, in the order they were chained.
//! A callback decides how its operation completes: [`Control::Complete`]
//! finishes it synchronously, while [`Control::suspend`] hands out a
//! [`ResumeToken`] and parks the queue until the token is used. Nothing else
//! runs on the handle while an operation is parked.

use std::collections::VecDeque;
use std::sync::Arc;

use anyhow::Result;
use tokio::sync::oneshot;

use crate::io::FileIo;
use crate::reader::position::Position;
use crate::reader::window::Window;

pub(crate) type SeekCallback = Box<dyn FnOnce(&mut OpContext) -> Control + Send>;
pub(crate) type ReadCallback = Box<dyn FnOnce(&mut OpContext, usize, &[u8]) -> Control + Send>;

/// Seek anchoring
pub(crate) enum Whence {
    /// Absolute offset from the start of the file
    Start(u64),
    /// Distance back from the last byte of the file; 0 is the final byte
    End(u64),
}

/// A queued operation
pub(crate) enum Op {
    Seek {
        whence: Whence,
        callback: Option<SeekCallback>,
    },
    Read {
        length: usize,
        callback: ReadCallback,
    },
    Close,
}

/// How an operation callback completes.
///
/// Returning [`Control::Complete`] lets the queue move on immediately.
/// [`Control::suspend`] yields a token for deferred completion:
///
/// ```no_run
/// use seekbuf::{Control, Reader};
///
/// # async fn demo() -> anyhow::Result<()> {
/// Reader::open("data.bin")
///     .read(4, |_ctx, _n, bytes| {
///         let bytes = bytes.to_vec();
///         let (token, control) = Control::suspend();
///         tokio::spawn(async move {
///             println!("{} bytes arrived", bytes.len());
///             token.resume();
///         });
///         control
///     })
///     .close()
///     .run()
///     .await
/// # }
/// ```
pub enum Control {
    /// The operation is finished; run the next one
    Complete,
    /// Park the queue until the matching [`ResumeToken`] is used
    Suspend(Suspension),
}

impl Control {
    /// Create a linked token/control pair for deferred completion
    pub fn suspend() -> (ResumeToken, Control) {
        let (tx, rx) = oneshot::channel();
        (ResumeToken { tx }, Control::Suspend(Suspension { rx }))
    }
}

/// Receipt held by the queue while an operation is parked
pub struct Suspension {
    rx: oneshot::Receiver<Resolution>,
}

/// One-shot token that completes a suspended operation.
///
/// Every method consumes the token, so it cannot be used twice. Dropping the
/// token without calling anything resumes the queue as well; a token that is
/// leaked (never used, never dropped) stalls its handle forever, which is the
/// caller's contract to uphold.
pub struct ResumeToken {
    tx: oneshot::Sender<Resolution>,
}

impl ResumeToken {
    /// Finish the suspended operation and run the next one
    pub fn resume(self) {
        let _ = self.tx.send(Resolution::Resume);
    }

    /// Drop every remaining operation and end the chain as closed
    pub fn cancel(self) {
        let _ = self.tx.send(Resolution::Cancel(None));
    }

    /// Drop every remaining operation and end the chain with an error
    pub fn fail(self, error: anyhow::Error) {
        let _ = self.tx.send(Resolution::Cancel(Some(error)));
    }
}

enum Resolution {
    Resume,
    Cancel(Option<anyhow::Error>),
}

/// Cancellation requested from a callback
pub(crate) enum CancelRequest {
    Close,
    Fail(anyhow::Error),
}

/// Snapshot handed to an operation callback.
///
/// Valid only for the duration of the callback; it reflects the cursor and
/// size as they stand right after the operation applied.
pub struct OpContext {
    cursor: u64,
    size: u64,
    cancel: Option<CancelRequest>,
}

impl OpContext {
    fn new(cursor: u64, size: u64) -> Self {
        Self {
            cursor,
            size,
            cancel: None,
        }
    }

    /// Current cursor offset
    pub fn tell(&self) -> u64 {
        self.cursor
    }

    /// Total file size
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Whether the cursor sits at or past the end of file
    pub fn is_eof(&self) -> bool {
        self.cursor >= self.size
    }

    /// Skip every remaining operation and end the chain as closed
    pub fn cancel(&mut self) {
        self.cancel = Some(CancelRequest::Close);
    }

    /// Skip every remaining operation and end the chain with an error
    pub fn fail(&mut self, error: anyhow::Error) {
        self.cancel = Some(CancelRequest::Fail(error));
    }

    fn take_cancel(&mut self) -> Option<CancelRequest> {
        self.cancel.take()
    }
}

/// Drains a queue of operations against one open target.
///
/// The descriptor is acquired lazily: a chain that never needs bytes or the
/// file size (bare absolute seeks, close) performs no physical open at all.
pub(crate) struct Executor<F: FileIo> {
    io: Arc<F>,
    target: String,
    chunk: u64,
    fd: Option<F::Handle>,
    window: Window,
    pos: Position,
    cancelled: Option<CancelRequest>,
}

impl<F: FileIo> Executor<F> {
    pub fn new(io: Arc<F>, target: String, chunk: u64) -> Self {
        Self {
            io,
            target,
            chunk,
            fd: None,
            window: Window::new(),
            pos: Position::new(),
            cancelled: None,
        }
    }

    /// Run every queued operation in order and resolve the terminal outcome.
    ///
    /// `Ok(())` means the chain closed; `Err` carries the open fault, read
    /// fault, or error the chain was cancelled with. Either way the
    /// descriptor is released if it was ever acquired.
    pub async fn drain(mut self, mut ops: VecDeque<Op>) -> Result<()> {
        while let Some(op) = ops.pop_front() {
            if self.cancelled.is_some() {
                break;
            }
            let closed = match self.execute(op).await {
                Ok(closed) => closed,
                Err(error) => {
                    self.discard().await;
                    return Err(error);
                }
            };
            if closed {
                break;
            }
        }
        match self.cancelled.take() {
            Some(CancelRequest::Fail(error)) => {
                self.discard().await;
                Err(error)
            }
            _ => {
                self.release().await?;
                Ok(())
            }
        }
    }

    /// Execute one operation; returns true when the chain is closed
    async fn execute(&mut self, op: Op) -> Result<bool> {
        match op {
            Op::Seek { whence, callback } => {
                match whence {
                    Whence::Start(offset) => {
                        // The callback context reports the size, so a seek
                        // carrying one must acquire the descriptor first. A
                        // bare absolute seek touches nothing physical.
                        if callback.is_some() {
                            self.ensure_open().await?;
                        }
                        self.pos.seek_to(offset);
                    }
                    Whence::End(back) => {
                        self.ensure_open().await?;
                        self.pos.seek_back_from_end(back);
                    }
                }
                if let Some(callback) = callback {
                    let mut ctx = self.context();
                    let control = callback(&mut ctx);
                    self.settle(ctx, control).await;
                }
                Ok(false)
            }
            Op::Read { length, callback } => {
                self.ensure_open().await?;
                let start = self.pos.tell();
                let end = start.saturating_add(length as u64);
                let span = match &self.fd {
                    Some(fd) => {
                        self.window
                            .ensure(self.io.as_ref(), fd, &mut self.pos, start, end, self.chunk)
                            .await?
                    }
                    None => start..start,
                };
                let n = (span.end - span.start) as usize;
                self.pos.advance(n as u64);
                let mut ctx = self.context();
                let control = callback(&mut ctx, n, self.window.view(span));
                self.settle(ctx, control).await;
                Ok(false)
            }
            Op::Close => {
                self.release().await?;
                Ok(true)
            }
        }
    }

    /// Acquire the descriptor and stat the size, once
    async fn ensure_open(&mut self) -> Result<u64> {
        if self.fd.is_none() {
            let fd = self.io.open(&self.target).await?;
            let size = self.io.len(&fd).await?;
            self.pos.set_size(size);
            self.fd = Some(fd);
        }
        Ok(self.pos.size().unwrap_or(0))
    }

    fn context(&self) -> OpContext {
        OpContext::new(self.pos.tell(), self.pos.size().unwrap_or(0))
    }

    /// Apply the callback's verdict, waiting out a suspension if it asked
    /// for one
    async fn settle(&mut self, mut ctx: OpContext, control: Control) {
        if let Some(request) = ctx.take_cancel() {
            self.cancelled = Some(request);
            return;
        }
        match control {
            Control::Complete => {}
            Control::Suspend(suspension) => match suspension.rx.await {
                Ok(Resolution::Resume) | Err(_) => {}
                Ok(Resolution::Cancel(None)) => self.cancelled = Some(CancelRequest::Close),
                Ok(Resolution::Cancel(Some(error))) => {
                    self.cancelled = Some(CancelRequest::Fail(error))
                }
            },
        }
    }

    /// Release the descriptor exactly once; later calls are no-ops
    async fn release(&mut self) -> Result<()> {
        if let Some(fd) = self.fd.take() {
            self.io.close(fd).await?;
        }
        Ok(())
    }

    /// Release while already failing; a close fault cannot displace the
    /// original error
    async fn discard(&mut self) {
        if let Some(fd) = self.fd.take() {
            let _ = self.io.close(fd).await;
        }
    }
}
