/// Command-line arguments, parsed with clap derive macros.
use clap::Parser;
use std::num::NonZeroU32;
use std::path::PathBuf;

/// Streaming filesystem scanner with per-node risk scoring
#[derive(Parser, Debug, Clone)]
#[command(
    name = "treesleuth",
    version,
    about = "Streaming filesystem scanner with per-node risk scoring",
    long_about = "Walks a directory tree depth-first, streaming one record per entry,\n\
                  and folds the records into a risk-weighted summary report.\n\n\
                  Hidden entries (names starting with '.') are skipped. A vanished\n\
                  path is treated as empty; unreadable branches are reported and\n\
                  skipped without aborting the scan.",
    after_help = "EXAMPLES:\n    \
        treesleuth /var/data\n    \
        treesleuth . --checksum --top 20\n    \
        treesleuth /srv --json > nodes.ndjson\n    \
        treesleuth /srv --compress gzip"
)]
pub struct CliArgs {
    /// Directory (or file) to scan
    #[arg(value_name = "PATH", default_value = ".")]
    pub root: PathBuf,

    /// Yield the scanner's timeslice every N depth levels
    #[arg(long, value_name = "N")]
    pub yield_every: Option<NonZeroU32>,

    /// Emit one JSON record per node on stdout instead of a summary
    #[arg(long)]
    pub json: bool,

    /// Compute a CRC32 digest for every file (reads file content)
    #[arg(long)]
    pub checksum: bool,

    /// Estimate compression savings with the given algorithm
    /// (gzip, zlib, or deflate; reads file content)
    #[arg(long, value_name = "ALGO")]
    pub compress: Option<String>,

    /// Number of largest files to list in the summary report
    #[arg(long, default_value_t = 10, value_name = "N")]
    pub top: usize,
}
