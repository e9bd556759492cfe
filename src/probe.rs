//! Quadratic probe sequence shared by insertion and lookup.
//!
//! The step depends only on the previous index, so a lookup that starts from
//! the same home slot replays exactly the candidates an insert examined.

/// Next candidate after `prev`: `(prev + prev^2) mod slots`.
///
/// Computed in 128-bit arithmetic so any table size is safe. Note that 0 is a
/// fixed point, and `slots - 1` steps to 0.
#[inline]
pub fn step(prev: usize, slots: usize) -> usize {
    debug_assert!(slots > 0);
    let m = slots as u128;
    let p = prev as u128 % m;
    ((p + p * p) % m) as usize
}

/// Number of steps after which probing gives up: `ceil((slots + 1) / 2)`.
#[inline]
pub fn probe_bound(slots: usize) -> usize {
    (slots + 1).div_ceil(2)
}

/// Bounded walk over the candidates following `start`.
///
/// Yields at most `probe_bound(slots)` indices; `start` itself is not
/// yielded. Indices may repeat once the sequence cycles.
#[derive(Clone, Debug)]
pub struct Probe {
    current: usize,
    slots: usize,
    remaining: usize,
}

impl Probe {
    pub fn new(start: usize, slots: usize) -> Self {
        Self::with_bound(start, slots, probe_bound(slots))
    }

    pub fn with_bound(start: usize, slots: usize, bound: usize) -> Self {
        Self {
            current: start,
            slots,
            remaining: bound,
        }
    }
}

impl Iterator for Probe {
    type Item = usize;

    #[inline]
    fn next(&mut self) -> Option<usize> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        self.current = step(self.current, self.slots);
        Some(self.current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Probe {}
