//! Main entry point for the seekbuf CLI application.
//!
//! This binary dumps a byte range from a local file or a remote HTTP URL,
//! reading only the chunks the range actually needs.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::AsyncWriteExt;
use tokio::sync::mpsc;

use seekbuf::{Cli, Control, FileIo, HttpFs, LocalFs, Options, Reader, DEFAULT_CHUNK_SIZE};

/// Application entry point.
///
/// Parses command-line arguments and dispatches to the appropriate physical
/// I/O capability based on whether the target is a local file or HTTP URL.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let options = Options {
        chunk_size: cli.chunk_size.unwrap_or(DEFAULT_CHUNK_SIZE),
    };

    let (tx, rx) = mpsc::unbounded_channel();

    if cli.is_http_url() {
        // Remote target: read via HTTP Range requests
        let io = Arc::new(HttpFs::new()?);
        let transferred_before = io.transferred_bytes();

        dump(Reader::with_io(io.clone(), cli.target.clone(), options), &cli, tx).await?;
        emit(rx, &cli).await?;

        // Display network transfer statistics for HTTP sources
        if !cli.quiet {
            let transferred = io.transferred_bytes() - transferred_before;
            eprintln!("\nTotal bytes transferred: {}", format_size(transferred));
        }
    } else {
        // Local target
        dump(Reader::with_io(Arc::new(LocalFs), cli.target.clone(), options), &cli, tx).await?;
        emit(rx, &cli).await?;
    }

    Ok(())
}

/// Run the seek/read chain for the requested range.
///
/// The bytes (plus the absolute offset they start at) are handed out through
/// the channel; the chain itself only moves the cursor and fills the window.
///
/// # Arguments
///
/// * `reader` - A reader chain against the chosen capability
/// * `cli` - Parsed command-line arguments
/// * `tx` - Channel receiving `(start_offset, bytes)` once the read completes
async fn dump<F: FileIo + 'static>(
    reader: Reader<F>,
    cli: &Cli,
    tx: mpsc::UnboundedSender<(u64, Vec<u8>)>,
) -> Result<()> {
    let length = cli.length.unwrap_or(usize::MAX);

    let reader = if cli.from_end {
        reader.seek_end(cli.offset)
    } else {
        reader.seek(cli.offset)
    };

    reader
        .read(length, move |ctx, n, bytes| {
            let start = ctx.tell() - n as u64;
            let _ = tx.send((start, bytes.to_vec()));
            Control::Complete
        })
        .close()
        .run()
        .await
}

/// Write the collected range to the selected sink.
///
/// Supports three output modes:
/// - Default: hex dump with offsets and an ASCII column
/// - Raw (`-r`): bytes straight to stdout
/// - File (`-o`): bytes into the given file
async fn emit(mut rx: mpsc::UnboundedReceiver<(u64, Vec<u8>)>, cli: &Cli) -> Result<()> {
    let Some((start, bytes)) = rx.recv().await else {
        return Ok(());
    };

    if let Some(ref output) = cli.output {
        let path = PathBuf::from(output);
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        let mut file = tokio::fs::File::create(&path).await?;
        file.write_all(&bytes).await?;
        return Ok(());
    }

    if cli.raw {
        let mut stdout = tokio::io::stdout();
        stdout.write_all(&bytes).await?;
        stdout.flush().await?;
        return Ok(());
    }

    let mut stdout = tokio::io::stdout();
    stdout.write_all(hex_dump(start, &bytes).as_bytes()).await?;
    Ok(())
}

/// Format bytes as a hex dump, 16 per row, with offset and ASCII columns.
///
/// # Examples
///
/// ```ignore
/// // 00000400  68 65 6c 6c 6f                                   |hello|
/// print!("{}", hex_dump(1024, b"hello"));
/// ```
fn hex_dump(start: u64, bytes: &[u8]) -> String {
    let mut out = String::new();
    for (i, row) in bytes.chunks(16).enumerate() {
        let offset = start + (i * 16) as u64;
        let hex: Vec<String> = row.iter().map(|b| format!("{:02x}", b)).collect();
        let ascii: String = row
            .iter()
            .map(|b| {
                if b.is_ascii_graphic() || *b == b' ' {
                    *b as char
                } else {
                    '.'
                }
            })
            .collect();
        out.push_str(&format!("{:08x}  {:<47}  |{}|\n", offset, hex.join(" "), ascii));
    }
    out
}

/// Format a byte size into a human-readable string.
///
/// Automatically selects the appropriate unit (bytes, KB, MB, GB)
/// based on the size magnitude.
fn format_size(size: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if size >= GB {
        format!("{:.2} GB", size as f64 / GB as f64)
    } else if size >= MB {
        format!("{:.2} MB", size as f64 / MB as f64)
    } else if size >= KB {
        format!("{:.2} KB", size as f64 / KB as f64)
    } else {
        format!("{} bytes", size)
    }
}
