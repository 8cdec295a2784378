/// Batched existence probes — "do these paths exist?", answered in bulk.
///
/// Probes are fired concurrently on a dedicated rayon pool and the
/// result vector always lines up with the input order, regardless of
/// which probe finishes first. A probe that fails for any reason
/// (permission denied, dangling mount) answers `false`; one bad path
/// can never fail the batch.
use rayon::prelude::*;
use std::fs;
use std::path::Path;

/// Upper bound on probe threads. Existence checks are metadata syscalls,
/// so a modest pool saturates the kernel long before CPU count matters.
const MAX_PROBE_THREADS: usize = 16;

/// Issues parallel lightweight existence probes.
pub struct ExistenceBatcher {
    pool: rayon::ThreadPool,
}

impl ExistenceBatcher {
    /// Build a batcher with its own probe pool.
    ///
    /// A dedicated pool keeps batch probing from competing with any
    /// rayon work the embedding application runs on the global pool.
    pub fn new() -> Self {
        let threads = num_cpus::get().min(MAX_PROBE_THREADS).max(1);
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("treesleuth-probe-{i}"))
            .build()
            .expect("failed to build probe thread pool");
        Self { pool }
    }

    /// Probe every path concurrently, returning booleans in input order.
    ///
    /// Uses `symlink_metadata` so a dangling symlink still counts as an
    /// existing entry — the question is "is something there", not "does
    /// it resolve".
    pub fn check_all<P: AsRef<Path> + Sync>(&self, paths: &[P]) -> Vec<bool> {
        self.pool.install(|| {
            paths
                .par_iter()
                .map(|p| fs::symlink_metadata(p.as_ref()).is_ok())
                .collect()
        })
    }
}

impl Default for ExistenceBatcher {
    fn default() -> Self {
        Self::new()
    }
}
