use super::FileIo;
use anyhow::{bail, Result};
use async_trait::async_trait;
use std::path::Path;

/// Local filesystem capability with positional reads
pub struct LocalFs;

#[async_trait]
impl FileIo for LocalFs {
    type Handle = std::fs::File;

    async fn open(&self, target: &str) -> Result<Self::Handle> {
        let file = std::fs::File::open(Path::new(target))?;
        if !file.metadata()?.is_file() {
            bail!("{} is not a regular file", target);
        }
        Ok(file)
    }

    async fn len(&self, handle: &Self::Handle) -> Result<u64> {
        Ok(handle.metadata()?.len())
    }

    async fn read_at(&self, handle: &Self::Handle, offset: u64, buf: &mut [u8]) -> Result<usize> {
        #[cfg(unix)]
        {
            use std::os::unix::fs::FileExt;
            Ok(handle.read_at(buf, offset)?)
        }

        #[cfg(windows)]
        {
            use std::io::{Read, Seek, SeekFrom};
            // Windows doesn't have pread, need to seek and read
            // This is not thread-safe, but we're using it in async context
            let file = handle;
            let mut file = unsafe {
                // Create a new handle for this read operation
                use std::os::windows::io::AsRawHandle;
                use std::os::windows::io::FromRawHandle;
                std::fs::File::from_raw_handle(file.as_raw_handle())
            };
            file.seek(SeekFrom::Start(offset))?;
            let n = file.read(buf)?;
            std::mem::forget(file); // Don't close the handle
            Ok(n)
        }

        #[cfg(not(any(unix, windows)))]
        {
            use std::io::{Read, Seek, SeekFrom};
            let mut file = handle;
            file.seek(SeekFrom::Start(offset))?;
            Ok(file.read(buf)?)
        }
    }

    async fn close(&self, handle: Self::Handle) -> Result<()> {
        drop(handle);
        Ok(())
    }
}
