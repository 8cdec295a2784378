/// Scan progress reporting — lightweight messages sent from the scan
/// thread to the consumer via a crossbeam channel.

use std::time::Duration;

/// Progress updates sent from the scan thread.
///
/// The actual node records travel on the separate node channel; these
/// messages carry only counters and status flags.
#[derive(Debug)]
pub enum ScanProgress {
    /// Periodic update with running totals.
    Update {
        files_found: u64,
        dirs_found: u64,
        total_size: u64,
        current_path: String,
    },
    /// A branch failed (e.g. permission denied on one directory).
    /// The scan continues on sibling branches.
    Error { path: String, message: String },
    /// Scanning completed. All nodes have been sent.
    Complete {
        duration: Duration,
        error_count: u64,
    },
    /// Scan was cancelled by the consumer.
    Cancelled,
}
