use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "seekbuf")]
#[command(version)]
#[command(about = "Dump a byte range from a local file or HTTP URL", long_about = None)]
#[command(after_help = "Examples:\n  \
  seekbuf data.bin -s 1024 -n 256        hex dump 256 bytes at offset 1024\n  \
  seekbuf data.bin -e -s 15 -n 16        dump the last 16 bytes\n  \
  seekbuf -r data.bin | wc -c            raw dump of the whole file\n  \
  seekbuf https://example.com/disk.img -n 512   dump the first sector without fetching the rest")]
pub struct Cli {
    /// File path or HTTP URL
    #[arg(value_name = "TARGET")]
    pub target: String,

    /// Offset to seek to before reading
    #[arg(short = 's', long = "seek", value_name = "OFFSET", default_value_t = 0)]
    pub offset: u64,

    /// Count the offset back from the last byte (0 = last byte)
    #[arg(short = 'e', long = "from-end")]
    pub from_end: bool,

    /// Number of bytes to read (default: to end of file)
    #[arg(short = 'n', long = "length", value_name = "LEN")]
    pub length: Option<usize>,

    /// Physical read chunk size in bytes
    #[arg(short = 'c', long = "chunk-size", value_name = "BYTES")]
    pub chunk_size: Option<usize>,

    /// Write raw bytes to stdout instead of a hex dump
    #[arg(short = 'r')]
    pub raw: bool,

    /// Write raw bytes into FILE
    #[arg(short = 'o', value_name = "FILE")]
    pub output: Option<String>,

    /// Quiet mode (no transfer summary)
    #[arg(short = 'q')]
    pub quiet: bool,
}

impl Cli {
    pub fn is_http_url(&self) -> bool {
        self.target.starts_with("http://") || self.target.starts_with("https://")
    }
}
