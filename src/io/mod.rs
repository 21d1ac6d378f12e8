mod http;
mod local;

pub use http::HttpFs;
pub use local::LocalFs;

use anyhow::Result;
use async_trait::async_trait;

/// Trait for the physical open/stat/read/close capability a reader runs against
#[async_trait]
pub trait FileIo: Send + Sync {
    /// Descriptor produced by a successful open
    type Handle: Send + Sync;

    /// Open the target for reading
    async fn open(&self, target: &str) -> Result<Self::Handle>;

    /// Get the total size of the opened target in bytes
    async fn len(&self, handle: &Self::Handle) -> Result<u64>;

    /// Read into the buffer at the specified absolute offset
    ///
    /// Returns the number of bytes actually read, which is less than the
    /// buffer length only at end of file.
    async fn read_at(&self, handle: &Self::Handle, offset: u64, buf: &mut [u8]) -> Result<usize>;

    /// Release the descriptor
    async fn close(&self, handle: Self::Handle) -> Result<()>;
}
