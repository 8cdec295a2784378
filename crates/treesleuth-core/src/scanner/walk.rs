/// Lazy depth-first traversal — the core walking engine.
///
/// `Scan` is a pull-driven iterator: each `next()` call performs at most
/// one directory listing (or one stat, for file roots) and yields at
/// most one node. Between calls no filesystem work happens at all, so a
/// consumer that stops pulling halts the scan with nothing to cancel.
///
/// Traversal is pre-order: a directory's own record is yielded before
/// any of its children, and children are visited left-to-right in the
/// order the filesystem listing returns them — the scanner never
/// resorts entries.
use crate::model::Node;
use std::fs;
use std::io;
use std::num::NonZeroU32;
use std::path::PathBuf;
use std::thread;
use thiserror::Error;

/// A traversal failure on one branch of the tree.
///
/// "Path vanished" and "path is actually a file" are *not* errors — the
/// walker absorbs those as normal branch outcomes. What surfaces here
/// is the rest: permission denied reading a listing, device errors, and
/// other I/O faults the caller must decide how to handle. Sibling
/// branches remain on the walker's stack, so the caller may keep
/// pulling after an `Err` to continue the scan elsewhere.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("failed to list directory '{path}'")]
    ListDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to stat '{path}'")]
    Stat {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ScanError {
    /// The path the failing operation targeted.
    pub fn path(&self) -> &PathBuf {
        match self {
            ScanError::ListDir { path, .. } => path,
            ScanError::Stat { path, .. } => path,
        }
    }
}

/// Traversal tuning knobs.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScanOptions {
    /// Depth assigned to the root node. Nested scans pass the depth at
    /// which the sub-root sits so the emitted records stay consistent.
    pub base_depth: u32,

    /// Cooperative-yield cadence: when set to N, the walker yields its
    /// timeslice to the OS scheduler once per visit at every depth that
    /// is a positive multiple of N. A pure scheduling hint — emitted
    /// nodes and their order are unaffected.
    pub yield_every: Option<NonZeroU32>,
}

/// One deferred visit. The walker's entire per-branch state.
struct Visit {
    path: PathBuf,
    depth: u32,
}

/// The lazy node stream over one filesystem subtree.
///
/// Finite (bounded by the subtree) and not restartable — build a fresh
/// `Scan` to traverse again.
pub struct Scan {
    /// Pending visits, LIFO. A visited directory pushes its children in
    /// reverse listing order so the first entry is popped next.
    stack: Vec<Visit>,
    options: ScanOptions,
}

impl Scan {
    /// Scan `root` at depth 0 with default options.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::with_options(root, ScanOptions::default())
    }

    /// Scan `root` with explicit options.
    pub fn with_options(root: impl Into<PathBuf>, options: ScanOptions) -> Self {
        Self {
            stack: vec![Visit {
                path: root.into(),
                depth: options.base_depth,
            }],
            options,
        }
    }

    /// Visit one pending path. Returns:
    /// - `Some(Ok(node))` — a record to yield (children were queued first
    ///   if the path listed as a directory);
    /// - `Some(Err(e))` — a hard branch failure to surface;
    /// - `None` — the branch evaporated (path vanished); try the next one.
    fn visit(&mut self, path: PathBuf, depth: u32) -> Option<Result<Node, ScanError>> {
        if let Some(n) = self.options.yield_every {
            if depth > 0 && depth % n.get() == 0 {
                thread::yield_now();
            }
        }

        match fs::read_dir(&path) {
            Ok(listing) => {
                let mut children = Vec::new();
                for entry in listing {
                    let entry = match entry {
                        Ok(e) => e,
                        Err(source) => {
                            return Some(Err(ScanError::ListDir { path, source }));
                        }
                    };
                    // Hidden entries are neither emitted nor recursed into.
                    if entry.file_name().to_string_lossy().starts_with('.') {
                        continue;
                    }
                    children.push(entry.path());
                }
                // Reverse push: the listing's first entry ends up on top
                // of the stack, keeping sibling order left-to-right.
                for child in children.into_iter().rev() {
                    self.stack.push(Visit {
                        path: child,
                        depth: depth + 1,
                    });
                }
                Some(Ok(Node::directory(path, depth)))
            }

            // The path vanished between discovery and visit. Normal on a
            // live filesystem; the branch simply yields nothing.
            Err(e) if e.kind() == io::ErrorKind::NotFound => None,

            // Not a directory after all — record it as the file it is.
            Err(e) if e.kind() == io::ErrorKind::NotADirectory => {
                match fs::symlink_metadata(&path) {
                    Ok(meta) => Some(Ok(Node::file(
                        path,
                        meta.len(),
                        meta.modified().ok(),
                        depth,
                    ))),
                    Err(e2) if e2.kind() == io::ErrorKind::NotFound => None,
                    Err(source) => Some(Err(ScanError::Stat { path, source })),
                }
            }

            Err(source) => Some(Err(ScanError::ListDir { path, source })),
        }
    }
}

impl Iterator for Scan {
    type Item = Result<Node, ScanError>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(Visit { path, depth }) = self.stack.pop() {
            if let Some(item) = self.visit(path, depth) {
                return Some(item);
            }
        }
        None
    }
}
