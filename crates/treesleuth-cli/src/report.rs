/// Report rendering — folds a finished scan into a terminal summary.
use chrono::{DateTime, Local};
use std::fmt;
use std::path::PathBuf;
use std::time::{Duration, SystemTime};
use treesleuth_core::model::size::{format_count, format_size};
use treesleuth_core::pool::PoolStats;

/// A single entry in the "largest files" listing.
#[derive(Debug)]
pub struct LargestFile {
    pub path: PathBuf,
    pub size: u64,
}

/// Outcome of sampling file content through the compression adapter.
#[derive(Debug)]
pub struct CompressionEstimate {
    pub algorithm: &'static str,
    pub sampled_bytes: u64,
    pub compressed_bytes: u64,
}

impl CompressionEstimate {
    /// Estimated savings over the sampled bytes, 0–100.
    pub fn savings_percent(&self) -> f64 {
        if self.sampled_bytes == 0 {
            return 0.0;
        }
        let saved = self.sampled_bytes.saturating_sub(self.compressed_bytes);
        saved as f64 / self.sampled_bytes as f64 * 100.0
    }
}

/// Everything the summary view needs, already aggregated.
#[derive(Debug)]
pub struct ScanReport {
    pub root: PathBuf,
    pub files: u64,
    pub dirs: u64,
    pub total_bytes: u64,
    pub error_count: u64,
    pub total_risk: f64,
    pub elapsed: Duration,
    pub largest: Vec<LargestFile>,
    pub oldest: Option<(PathBuf, SystemTime)>,
    /// (files digested, distinct digests) when `--checksum` ran.
    pub digests: Option<(u64, u64)>,
    pub compression: Option<CompressionEstimate>,
    pub pool: PoolStats,
}

/// Select the `n` largest files from the collected `(path, size)` pairs.
///
/// Partial selection: `select_nth_unstable_by` brings the top-n to the
/// front in O(n) average, then only that small slice is sorted. Much
/// cheaper than a full sort when the scan saw millions of files.
pub fn top_largest(mut files: Vec<(PathBuf, u64)>, n: usize) -> Vec<LargestFile> {
    if n == 0 || files.is_empty() {
        return Vec::new();
    }
    if files.len() > n {
        files.select_nth_unstable_by(n - 1, |a, b| b.1.cmp(&a.1));
        files.truncate(n);
    }
    files.sort_unstable_by(|a, b| b.1.cmp(&a.1));
    files
        .into_iter()
        .map(|(path, size)| LargestFile { path, size })
        .collect()
}

impl fmt::Display for ScanReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Scan of {}", self.root.display())?;
        writeln!(
            f,
            "  Files:        {} ({})",
            format_count(self.files),
            format_size(self.total_bytes)
        )?;
        writeln!(f, "  Directories:  {}", format_count(self.dirs))?;
        writeln!(f, "  Errors:       {}", format_count(self.error_count))?;
        writeln!(f, "  Risk total:   {:.2}", self.total_risk)?;
        writeln!(f, "  Elapsed:      {:.2?}", self.elapsed)?;
        writeln!(
            f,
            "  Scratch pool: {} allocated ({} of budget)",
            format_size(self.pool.allocated as u64),
            self.pool.utilization
        )?;

        if !self.largest.is_empty() {
            writeln!(f)?;
            writeln!(f, "Largest files:")?;
            for (i, entry) in self.largest.iter().enumerate() {
                writeln!(
                    f,
                    "  {:>2}. {:>10}  {}",
                    i + 1,
                    format_size(entry.size),
                    entry.path.display()
                )?;
            }
        }

        if let Some((path, modified)) = &self.oldest {
            let stamp: DateTime<Local> = (*modified).into();
            writeln!(f)?;
            writeln!(
                f,
                "Oldest file: {} ({})",
                path.display(),
                stamp.format("%Y-%m-%d %H:%M:%S")
            )?;
        }

        if let Some((hashed, distinct)) = self.digests {
            writeln!(f)?;
            writeln!(
                f,
                "Checksums: {} files, {} distinct CRC32s",
                format_count(hashed),
                format_count(distinct)
            )?;
        }

        if let Some(est) = &self.compression {
            writeln!(f)?;
            writeln!(
                f,
                "Compression ({}): {:.1}% estimated savings on {} sampled",
                est.algorithm,
                est.savings_percent(),
                format_size(est.sampled_bytes)
            )?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use treesleuth_core::pool::BufferPool;

    fn pathbuf(s: &str) -> PathBuf {
        PathBuf::from(s)
    }

    #[test]
    fn top_largest_selects_and_sorts_descending() {
        let files = vec![
            (pathbuf("/a"), 10),
            (pathbuf("/b"), 500),
            (pathbuf("/c"), 50),
            (pathbuf("/d"), 5_000),
            (pathbuf("/e"), 1),
        ];
        let top = top_largest(files, 3);
        let sizes: Vec<u64> = top.iter().map(|e| e.size).collect();
        assert_eq!(sizes, vec![5_000, 500, 50]);
    }

    #[test]
    fn top_largest_handles_short_and_empty_inputs() {
        assert!(top_largest(Vec::new(), 5).is_empty());
        assert!(top_largest(vec![(pathbuf("/a"), 1)], 0).is_empty());

        let top = top_largest(vec![(pathbuf("/a"), 1), (pathbuf("/b"), 2)], 10);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].size, 2);
    }

    #[test]
    fn savings_percent_is_sane() {
        let est = CompressionEstimate {
            algorithm: "gzip",
            sampled_bytes: 1_000,
            compressed_bytes: 250,
        };
        assert!((est.savings_percent() - 75.0).abs() < 1e-9);

        let empty = CompressionEstimate {
            algorithm: "gzip",
            sampled_bytes: 0,
            compressed_bytes: 0,
        };
        assert_eq!(empty.savings_percent(), 0.0);

        // Incompressible content can grow; savings clamp at zero.
        let grew = CompressionEstimate {
            algorithm: "gzip",
            sampled_bytes: 100,
            compressed_bytes: 120,
        };
        assert_eq!(grew.savings_percent(), 0.0);
    }

    #[test]
    fn display_includes_the_headline_numbers() {
        let report = ScanReport {
            root: pathbuf("/srv"),
            files: 1_234,
            dirs: 56,
            total_bytes: 1_048_576,
            error_count: 2,
            total_risk: 4321.5,
            elapsed: Duration::from_millis(1_500),
            largest: vec![LargestFile {
                path: pathbuf("/srv/big.iso"),
                size: 999,
            }],
            oldest: None,
            digests: Some((1_200, 1_180)),
            compression: None,
            pool: BufferPool::with_max_size(1 << 20).stats(),
        };
        let text = report.to_string();
        assert!(text.contains("Scan of /srv"));
        assert!(text.contains("1,234"));
        assert!(text.contains("1.0 MB"));
        assert!(text.contains("Risk total:   4321.50"));
        assert!(text.contains("big.iso"));
        assert!(text.contains("1,180 distinct"));
    }
}
