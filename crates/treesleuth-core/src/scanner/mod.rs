/// Scanner module — lazy traversal and background orchestration.
///
/// Two ways to consume a scan:
/// - [`walk::Scan`] — the synchronous, pull-driven iterator. Laziness is
///   the cancellation mechanism: stop pulling and no further filesystem
///   work happens.
/// - [`start_scan`] — runs a `Scan` on a background thread and streams
///   the records over a bounded channel, with lightweight progress
///   messages and an explicit cancellation flag for consumers that
///   cannot pull synchronously.
pub mod progress;
pub mod walk;

use crate::model::Node;
use progress::ScanProgress;
pub use walk::{Scan, ScanError, ScanOptions};

use crossbeam_channel::Receiver;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Instant;
use tracing::{debug, info};

/// Capacity of the node channel.
///
/// The bounded channel is what keeps the background scan cooperative: a
/// consumer that stops receiving stalls the scan thread at `send` after
/// at most this many buffered records, rather than letting it race
/// ahead through the whole filesystem.
pub const NODE_CHANNEL_CAPACITY: usize = 4_096;

/// Capacity of the progress channel. Progress messages are rare (one
/// per `PROGRESS_INTERVAL` nodes, plus errors), so a small buffer is
/// plenty.
pub const PROGRESS_CHANNEL_CAPACITY: usize = 256;

/// How many nodes between `ScanProgress::Update` messages.
const PROGRESS_INTERVAL: u64 = 512;

/// Handle to a running or completed background scan. Allows
/// cancellation and receiving records and progress updates.
pub struct ScanHandle {
    /// Receiver for the streamed node records.
    pub nodes_rx: Receiver<Node>,
    /// Receiver for progress updates from the scan thread.
    pub progress_rx: Receiver<ScanProgress>,
    /// Flag to request cancellation.
    cancel_flag: Arc<AtomicBool>,
    /// Join handle for the scan thread.
    _thread: Option<thread::JoinHandle<()>>,
}

impl ScanHandle {
    /// Request the scan to stop as soon as possible.
    pub fn cancel(&self) {
        self.cancel_flag.store(true, Ordering::Relaxed);
    }

    /// Check whether cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.cancel_flag.load(Ordering::Relaxed)
    }
}

/// Start a scan on a background thread.
///
/// Returns a `ScanHandle` for receiving nodes and progress and for
/// requesting cancellation. Branch errors do not stop the scan; they
/// are forwarded as [`ScanProgress::Error`] and counted in the final
/// [`ScanProgress::Complete`].
pub fn start_scan(root_path: PathBuf, options: ScanOptions) -> ScanHandle {
    let (nodes_tx, nodes_rx) = crossbeam_channel::bounded::<Node>(NODE_CHANNEL_CAPACITY);
    let (progress_tx, progress_rx) =
        crossbeam_channel::bounded::<ScanProgress>(PROGRESS_CHANNEL_CAPACITY);
    let cancel_flag = Arc::new(AtomicBool::new(false));
    let cancel_clone = cancel_flag.clone();

    let thread = thread::Builder::new()
        .name("treesleuth-scanner".into())
        .spawn(move || {
            info!("Starting scan of {}", root_path.display());
            let start = Instant::now();

            let mut files_found: u64 = 0;
            let mut dirs_found: u64 = 0;
            let mut total_size: u64 = 0;
            let mut error_count: u64 = 0;
            let mut visited: u64 = 0;

            for item in Scan::with_options(root_path, options) {
                // Checked once per visit — the thread-based rendering of
                // "a consumer that stops requesting nodes halts the scan".
                if cancel_clone.load(Ordering::Relaxed) {
                    let _ = progress_tx.send(ScanProgress::Cancelled);
                    return;
                }

                let node = match item {
                    Ok(node) => node,
                    Err(err) => {
                        error_count += 1;
                        let _ = progress_tx.send(ScanProgress::Error {
                            path: err.path().display().to_string(),
                            message: format!("{err}"),
                        });
                        continue;
                    }
                };

                visited += 1;
                if node.is_dir() {
                    dirs_found += 1;
                } else {
                    files_found += 1;
                    total_size += node.size;
                }

                if visited % PROGRESS_INTERVAL == 0 {
                    let _ = progress_tx.send(ScanProgress::Update {
                        files_found,
                        dirs_found,
                        total_size,
                        current_path: node.path.display().to_string(),
                    });
                }

                // A closed receiver means the consumer went away; treat it
                // like cancellation and stop walking.
                if nodes_tx.send(node).is_err() {
                    debug!("node receiver dropped; stopping scan");
                    return;
                }
            }

            let duration = start.elapsed();
            debug!(
                "Scan complete: {} files, {} dirs, {} errors in {:?}",
                files_found, dirs_found, error_count, duration
            );
            let _ = progress_tx.send(ScanProgress::Complete {
                duration,
                error_count,
            });
        })
        .expect("failed to spawn scanner thread");

    ScanHandle {
        nodes_rx,
        progress_rx,
        cancel_flag,
        _thread: Some(thread),
    }
}
