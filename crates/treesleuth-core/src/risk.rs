/// Risk-score accumulator — a growable numeric buffer for fold-free
/// aggregation of per-node scores during a scan.
///
/// The backing store is an owned slice managed by hand rather than a
/// `Vec<f64>` so that growth is explicit: capacity doubles when full,
/// existing values are copied across, and nothing is ever dropped. The
/// accumulator is single-writer by contract — each scan owns its own
/// instance, so no locking is involved anywhere.

/// Initial backing capacity. Power of two so doubling stays a power of two.
pub const DEFAULT_CAPACITY: usize = 16;

/// Collects risk scores emitted during a scan and reports their sum.
#[derive(Debug)]
pub struct RiskAccumulator {
    /// Backing buffer. Slots at `count..` hold stale values from before
    /// the last reset and are logically unreachable.
    values: Box<[f64]>,

    /// Number of live values. Invariant: `count <= values.len()`.
    count: usize,
}

impl RiskAccumulator {
    /// Create an accumulator with the default initial capacity.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Create an accumulator with at least `capacity` slots.
    ///
    /// The requested capacity is rounded up to the next power of two so
    /// the doubling-growth invariant holds from the start.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1).next_power_of_two();
        Self {
            values: vec![0.0; capacity].into_boxed_slice(),
            count: 0,
        }
    }

    /// Append a value, doubling the backing buffer first if it is full.
    ///
    /// Amortized O(1). Growth reallocates and copies; an allocation
    /// failure aborts like any other fatal OOM — there is no recoverable
    /// error path here.
    pub fn accumulate(&mut self, value: f64) {
        if self.count == self.values.len() {
            self.grow();
        }
        self.values[self.count] = value;
        self.count += 1;
    }

    /// Sum of all values accumulated since creation or the last reset.
    ///
    /// O(n) over the live values. Standard floating-point addition in
    /// insertion order — callers should compare within tolerance.
    pub fn total(&self) -> f64 {
        self.values[..self.count].iter().sum()
    }

    /// Forget all accumulated values.
    ///
    /// The backing buffer is kept at its grown capacity for reuse across
    /// scans. Old slots are not zeroed — `total()` never reads past
    /// `count`, so they cannot leak into a post-reset sum.
    pub fn reset(&mut self) {
        self.count = 0;
    }

    /// Current backing capacity in slots.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.values.len()
    }

    /// Number of values accumulated so far.
    #[inline]
    pub fn len(&self) -> usize {
        self.count
    }

    /// Returns `true` if nothing has been accumulated since the last reset.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Double the backing buffer, copying the live prefix across.
    fn grow(&mut self) {
        let mut bigger = vec![0.0; self.values.len() * 2].into_boxed_slice();
        bigger[..self.count].copy_from_slice(&self.values[..self.count]);
        self.values = bigger;
    }
}

impl Default for RiskAccumulator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_matches_sum_of_inputs() {
        let mut acc = RiskAccumulator::new();
        for v in [1.0, 2.5, 0.25, 4.0] {
            acc.accumulate(v);
        }
        assert!((acc.total() - 7.75).abs() < 1e-9);
        assert_eq!(acc.len(), 4);
    }

    #[test]
    fn reset_empties_the_total() {
        let mut acc = RiskAccumulator::new();
        acc.accumulate(5.0);
        acc.reset();
        assert_eq!(acc.total(), 0.0);
        assert!(acc.is_empty());

        // Values accumulated after a reset must not mix with pre-reset ones.
        acc.accumulate(2.0);
        assert!((acc.total() - 2.0).abs() < 1e-9);
    }

    #[test]
    fn growth_preserves_all_prior_values() {
        // Push past two doublings: 2 × initial capacity + 1 values.
        let mut acc = RiskAccumulator::new();
        let n = 2 * DEFAULT_CAPACITY + 1;
        for i in 0..n {
            acc.accumulate(i as f64);
        }
        let expected: f64 = (0..n).map(|i| i as f64).sum();
        assert!((acc.total() - expected).abs() < 1e-6);
        assert_eq!(acc.len(), n);
        assert!(acc.capacity() >= n);
    }

    #[test]
    fn capacity_doubles_from_initial() {
        let mut acc = RiskAccumulator::with_capacity(4);
        assert_eq!(acc.capacity(), 4);
        for _ in 0..5 {
            acc.accumulate(1.0);
        }
        assert_eq!(acc.capacity(), 8);
    }

    #[test]
    fn with_capacity_rounds_up_to_power_of_two() {
        let acc = RiskAccumulator::with_capacity(20);
        assert_eq!(acc.capacity(), 32);
    }
}
