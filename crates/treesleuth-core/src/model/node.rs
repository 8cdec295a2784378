/// A single record describing one filesystem entry discovered during a scan.
///
/// Nodes are deliberately flat: no parent pointer, no child list. The
/// scanner streams them one at a time and never holds a resident tree,
/// which keeps a scan's working memory proportional to the tree *depth*
/// rather than its size. Consumers that want a tree can rebuild one from
/// `path`/`depth`; most just fold the stream into totals.
use compact_str::CompactString;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Discriminates the two entry kinds the scanner reports.
///
/// Symlinks, sockets, and other special entries are not distinguished —
/// whatever the directory listing resolves them to is what gets recorded.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum NodeKind {
    File,
    Directory,
}

/// One scanned entry, complete and immutable from the moment it is yielded.
#[derive(Debug, Clone, Serialize)]
pub struct Node {
    /// Full path as given to (or derived by) the scanner.
    /// Unique within a single scan.
    pub path: PathBuf,

    /// Final path segment. Derived from `path`, never set independently.
    pub name: CompactString,

    /// File or directory.
    pub kind: NodeKind,

    /// Logical size in bytes. Always 0 for directories — the scanner
    /// does not sum subtrees; that is a consumer's fold over the stream.
    pub size: u64,

    /// Last-modified timestamp, when the producing stat reported one.
    pub modified: Option<SystemTime>,

    /// Distance from the scan root. The root itself is depth 0 and each
    /// descent adds 1.
    pub depth: u32,

    /// Caller-assigned weight for downstream aggregation. The scanner
    /// treats this as opaque and defaults it to 1.0.
    pub risk_score: f64,
}

impl Node {
    /// Create a File node. `modified` comes from the same stat that
    /// probed the size, so both are either present or cheap to omit.
    pub fn file(path: PathBuf, size: u64, modified: Option<SystemTime>, depth: u32) -> Self {
        let name = segment_name(&path);
        Self {
            path,
            name,
            kind: NodeKind::File,
            size,
            modified,
            depth,
            risk_score: 1.0,
        }
    }

    /// Create a Directory node. Size is 0 by contract and the listing
    /// primitive does not stat directories, so `modified` is unset.
    pub fn directory(path: PathBuf, depth: u32) -> Self {
        let name = segment_name(&path);
        Self {
            path,
            name,
            kind: NodeKind::Directory,
            size: 0,
            modified: None,
            depth,
            risk_score: 1.0,
        }
    }

    /// Replace the default risk score. Meaning is up to the caller.
    pub fn with_risk(mut self, risk_score: f64) -> Self {
        self.risk_score = risk_score;
        self
    }

    /// `true` for Directory nodes.
    #[inline]
    pub fn is_dir(&self) -> bool {
        self.kind == NodeKind::Directory
    }
}

/// Derive the display name from the final path segment.
///
/// Paths like `/` or `C:\` have no final segment; the trimmed full path
/// stands in so the record is never nameless.
fn segment_name(path: &Path) -> CompactString {
    match path.file_name() {
        Some(name) => CompactString::new(name.to_string_lossy()),
        None => {
            let s = path.to_string_lossy();
            CompactString::new(s.trim_end_matches(['/', '\\']))
        }
    }
}
