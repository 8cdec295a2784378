/// Named scratch-buffer pool with a soft size budget.
///
/// The pool tracks fixed-lifetime memory blocks used while staging scan
/// output (read buffers for checksumming, compression scratch, etc.).
/// The budget is *soft*: `allocate` never rejects a request, it only
/// makes overruns observable — `stats()` reports negative free space and
/// an over-budget allocation is logged at warn level.
use std::collections::HashMap;
use tracing::warn;

/// Default soft budget when none is specified: 1 MiB of scratch space.
pub const DEFAULT_MAX_SIZE: usize = 1 << 20;

/// A snapshot of pool occupancy. Pure data, computed on demand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolStats {
    /// Sum of all current block sizes in bytes.
    pub allocated: usize,

    /// `total - allocated`. Negative when the soft budget is exceeded.
    pub free: i64,

    /// The configured soft budget in bytes.
    pub total: usize,

    /// `allocated / total` as a percentage string with two decimals,
    /// e.g. `"12.50%"`. `"0.00%"` when the budget is zero.
    pub utilization: String,
}

/// Bounded, named-allocation tracker handing out zero-initialised blocks.
///
/// One pool instance belongs to one owner — typically the composition
/// boundary creates it and threads it through explicitly. Nothing here
/// is shared ambient state.
#[derive(Debug)]
pub struct BufferPool {
    allocations: HashMap<String, Vec<u8>>,
    max_size: usize,
}

impl BufferPool {
    /// Create a pool with the default soft budget.
    pub fn new() -> Self {
        Self::with_max_size(DEFAULT_MAX_SIZE)
    }

    /// Create a pool with an explicit soft budget in bytes.
    pub fn with_max_size(max_size: usize) -> Self {
        Self {
            allocations: HashMap::new(),
            max_size,
        }
    }

    /// Create or replace the block named `id` and return it for writing.
    ///
    /// Replacement drops the old block first, so stats reflect only the
    /// new size. The request always succeeds; exceeding the soft budget
    /// is logged and left visible in `stats()` rather than refused.
    pub fn allocate(&mut self, id: &str, size: usize) -> &mut [u8] {
        self.allocations.insert(id.to_string(), vec![0u8; size]);

        let allocated = self.allocated_bytes();
        if allocated > self.max_size {
            warn!(
                id,
                allocated,
                budget = self.max_size,
                "buffer pool exceeds its soft budget"
            );
        }

        self.allocations
            .get_mut(id)
            .map(Vec::as_mut_slice)
            .unwrap_or(&mut [])
    }

    /// Borrow the block named `id`, if it exists.
    pub fn get(&self, id: &str) -> Option<&[u8]> {
        self.allocations.get(id).map(Vec::as_slice)
    }

    /// Remove the block named `id`. Returns `true` if one existed.
    pub fn free(&mut self, id: &str) -> bool {
        self.allocations.remove(id).is_some()
    }

    /// Remove all blocks.
    pub fn clear(&mut self) {
        self.allocations.clear();
    }

    /// Number of live blocks.
    pub fn len(&self) -> usize {
        self.allocations.len()
    }

    /// Returns `true` when the pool holds no blocks.
    pub fn is_empty(&self) -> bool {
        self.allocations.is_empty()
    }

    /// Compute a snapshot of current occupancy.
    pub fn stats(&self) -> PoolStats {
        let allocated = self.allocated_bytes();
        let total = self.max_size;
        let utilization = if total == 0 {
            "0.00%".to_string()
        } else {
            format!("{:.2}%", allocated as f64 / total as f64 * 100.0)
        };
        PoolStats {
            allocated,
            free: total as i64 - allocated as i64,
            total,
            utilization,
        }
    }

    fn allocated_bytes(&self) -> usize {
        self.allocations.values().map(Vec::len).sum()
    }
}

impl Default for BufferPool {
    fn default() -> Self {
        Self::new()
    }
}
