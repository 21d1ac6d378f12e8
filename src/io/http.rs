use async_trait::async_trait;
use reqwest::Client;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use super::FileIo;
use anyhow::{anyhow, bail, Result};

/// HTTP Range capability for remote files
///
/// Opening a target sends a HEAD request to verify Range support and capture
/// the size; each physical read is a single Range GET.
pub struct HttpFs {
    client: Client,
    transferred_bytes: AtomicU64,
    max_retry: u32,
}

/// Descriptor for an opened remote file
pub struct HttpFile {
    url: String,
    size: u64,
}

impl HttpFs {
    pub fn new() -> Result<Self> {
        let client = Client::builder().timeout(Duration::from_secs(30)).build()?;
        Ok(Self {
            client,
            transferred_bytes: AtomicU64::new(0),
            max_retry: 10,
        })
    }

    /// Get total bytes transferred from network
    pub fn transferred_bytes(&self) -> u64 {
        self.transferred_bytes.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl FileIo for HttpFs {
    type Handle = HttpFile;

    async fn open(&self, target: &str) -> Result<Self::Handle> {
        // Send HEAD request to check capabilities
        let resp = self.client.head(target).send().await?;

        if !resp.status().is_success() {
            bail!("HTTP request failed with status: {}", resp.status());
        }

        // Check if server supports Range requests
        let accept_ranges = resp
            .headers()
            .get("accept-ranges")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("none");

        if !accept_ranges.contains("bytes") {
            bail!("Remote server does not support Range requests");
        }

        // Get file size from Content-Length
        let size = resp
            .headers()
            .get("content-length")
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse().ok())
            .ok_or_else(|| anyhow!("Remote server did not return Content-Length"))?;

        Ok(HttpFile {
            url: target.to_string(),
            size,
        })
    }

    async fn len(&self, handle: &Self::Handle) -> Result<u64> {
        Ok(handle.size)
    }

    async fn read_at(&self, handle: &Self::Handle, offset: u64, buf: &mut [u8]) -> Result<usize> {
        if buf.is_empty() || offset >= handle.size {
            return Ok(0);
        }

        let end = offset + buf.len() as u64 - 1;
        let end = end.min(handle.size - 1);
        let expected_size = (end - offset + 1) as usize;

        let mut received = 0;
        let mut retry_count = 0;

        while received < expected_size {
            let current_start = offset + received as u64;
            let range = format!("bytes={}-{}", current_start, end);

            let result = self
                .client
                .get(&handle.url)
                .header("Range", &range)
                .send()
                .await;

            match result {
                Ok(resp) => {
                    if resp.status() != reqwest::StatusCode::PARTIAL_CONTENT {
                        bail!("HTTP request failed with status: {}", resp.status());
                    }

                    let bytes = resp.bytes().await?;
                    let chunk_len = bytes.len().min(expected_size - received);
                    buf[received..received + chunk_len].copy_from_slice(&bytes[..chunk_len]);
                    received += chunk_len;

                    self.transferred_bytes
                        .fetch_add(chunk_len as u64, Ordering::Relaxed);
                }
                Err(e) if e.is_timeout() || e.is_connect() => {
                    retry_count += 1;
                    if retry_count >= self.max_retry {
                        bail!("Max retries exceeded");
                    }
                    eprintln!(
                        "Connection error, retry {}/{}: {}",
                        retry_count, self.max_retry, e
                    );
                    tokio::time::sleep(Duration::from_millis(500 * retry_count as u64)).await;
                }
                Err(e) => return Err(e.into()),
            }
        }

        Ok(received)
    }

    async fn close(&self, handle: Self::Handle) -> Result<()> {
        drop(handle);
        Ok(())
    }
}
