/// Application wiring — runs a scan and folds the node stream into
/// either a summary report or NDJSON records.
///
/// Everything meets here, explicitly owned by this function: the
/// `Scan` iterator produces records, the risk policy scales them, one
/// `RiskAccumulator` collects the contributions, and one `BufferPool`
/// stages the content reads. Nothing is process-global.
use crate::args::CliArgs;
use crate::report::{top_largest, CompressionEstimate, ScanReport};
use crate::risk;
use anyhow::Context;
use clap::Parser;
use std::collections::HashSet;
use std::fs::File;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::{Instant, SystemTime};
use tracing::{info, warn};
use treesleuth_core::adapters::{compress, crc32_file, Codec};
use treesleuth_core::model::{Node, NodeKind};
use treesleuth_core::pool::BufferPool;
use treesleuth_core::risk::RiskAccumulator;
use treesleuth_core::scanner::{Scan, ScanOptions};

/// Size of the pooled scratch block content reads are staged through.
const SCRATCH_LEN: usize = 64 * 1024;

/// Parse arguments from the process environment and execute.
pub fn run() -> anyhow::Result<()> {
    let args = CliArgs::parse();
    let stdout = io::stdout();
    execute(&args, &mut stdout.lock())
}

/// Execute one scan with the given arguments, writing output to `out`.
pub fn execute(args: &CliArgs, out: &mut impl Write) -> anyhow::Result<()> {
    let codec = args
        .compress
        .as_deref()
        .map(Codec::from_str)
        .transpose()
        .context("invalid --compress argument")?;

    let options = ScanOptions {
        base_depth: 0,
        yield_every: args.yield_every,
    };

    info!("Scanning {}", args.root.display());
    let start = Instant::now();

    let mut accumulator = RiskAccumulator::new();
    let mut pool = BufferPool::new();

    let mut files: u64 = 0;
    let mut dirs: u64 = 0;
    let mut total_bytes: u64 = 0;
    let mut error_count: u64 = 0;
    let mut sizes: Vec<(PathBuf, u64)> = Vec::new();
    let mut oldest: Option<(PathBuf, SystemTime)> = None;
    let mut digests: HashSet<String> = HashSet::new();
    let mut hashed: u64 = 0;
    let mut sampled_bytes: u64 = 0;
    let mut compressed_bytes: u64 = 0;

    let read_content = args.checksum || codec.is_some();
    let scratch = if read_content {
        pool.allocate("content-scratch", SCRATCH_LEN)
    } else {
        &mut []
    };

    for item in Scan::with_options(&args.root, options) {
        let node = match item {
            Ok(node) => node,
            Err(err) => {
                error_count += 1;
                warn!("{err}");
                continue;
            }
        };

        accumulator.accumulate(risk::contribution(&node));

        match node.kind {
            NodeKind::Directory => dirs += 1,
            NodeKind::File => {
                files += 1;
                total_bytes += node.size;
                sizes.push((node.path.clone(), node.size));
                if let Some(modified) = node.modified {
                    let is_older = oldest.as_ref().map_or(true, |(_, t)| modified < *t);
                    if is_older {
                        oldest = Some((node.path.clone(), modified));
                    }
                }
            }
        }

        let mut digest = None;
        if node.kind == NodeKind::File {
            if args.checksum {
                match crc32_file(&node.path, scratch) {
                    Ok(d) => {
                        hashed += 1;
                        digests.insert(d.clone());
                        digest = Some(d);
                    }
                    Err(err) => warn!("checksum failed for {}: {err}", node.path.display()),
                }
            }
            if let Some(codec) = codec {
                match sample_compression(&node.path, codec, scratch) {
                    Ok((raw, packed)) => {
                        sampled_bytes += raw;
                        compressed_bytes += packed;
                    }
                    Err(err) => warn!("sampling failed for {}: {err}", node.path.display()),
                }
            }
        }

        if args.json {
            write_record(out, &node, digest.as_deref())?;
        }
    }

    let elapsed = start.elapsed();
    let pool_stats = pool.stats();
    pool.clear();

    info!(
        "Scan finished: {} files, {} dirs, {} errors, risk {:.2} in {:.2?}",
        files,
        dirs,
        error_count,
        accumulator.total(),
        elapsed
    );

    if !args.json {
        let report = ScanReport {
            root: args.root.clone(),
            files,
            dirs,
            total_bytes,
            error_count,
            total_risk: accumulator.total(),
            elapsed,
            largest: top_largest(sizes, args.top),
            oldest,
            digests: args.checksum.then_some((hashed, digests.len() as u64)),
            compression: codec.map(|c| CompressionEstimate {
                algorithm: c.name(),
                sampled_bytes,
                compressed_bytes,
            }),
            pool: pool_stats,
        };
        write!(out, "{report}")?;
    }

    Ok(())
}

/// Compress the first scratch-full of a file and report
/// `(raw_len, compressed_len)` for the savings estimate.
fn sample_compression(
    path: &std::path::Path,
    codec: Codec,
    scratch: &mut [u8],
) -> anyhow::Result<(u64, u64)> {
    let mut file = File::open(path)?;
    let mut filled = 0;
    // A single read may return short; fill the block before sampling.
    loop {
        let n = file.read(&mut scratch[filled..])?;
        if n == 0 {
            break;
        }
        filled += n;
        if filled == scratch.len() {
            break;
        }
    }
    if filled == 0 {
        return Ok((0, 0));
    }
    let packed = compress(codec, &scratch[..filled])?;
    Ok((filled as u64, packed.len() as u64))
}

/// Emit one NDJSON record for a node, with the digest attached when
/// checksumming is on.
fn write_record(out: &mut impl Write, node: &Node, digest: Option<&str>) -> anyhow::Result<()> {
    let mut value = serde_json::to_value(node)?;
    value["risk_contribution"] = serde_json::json!(risk::contribution(node));
    if let Some(digest) = digest {
        value["crc32"] = serde_json::json!(digest);
    }
    writeln!(out, "{value}")?;
    Ok(())
}
