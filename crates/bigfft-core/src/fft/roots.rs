//! Roots-of-unity cache (C3): lazily computed, process-wide, safe for
//! concurrent readers.
//!
//! Each cache slot is an [`OnceLock`] — a reader either observes a
//! fully-initialised root set or computes (and may redundantly recompute,
//! cheaply) its own. There is no teardown; the caches live for the process.

use std::f64::consts::{FRAC_1_SQRT_2, PI};
use std::sync::{Arc, OnceLock};

use num_complex::Complex64;

use crate::config::cache_sizes::{ROOTS_CACHE2_SIZE, ROOTS3_CACHE_SIZE};

/// Computes `roots[j] = (cos θⱼ, sin θⱼ)` for `θⱼ = π·j / (2n)`, `j = 0..n`,
/// covering the first quadrant only. Uses exact values at `j = 0` and,
/// when `n` is even, at `j = n/2`; elsewhere exploits the symmetry
/// `roots[n−j] = (sin θⱼ, cos θⱼ)` so only the lower half of the quadrant is
/// ever evaluated through `sin_cos`.
fn calc_roots(n: usize) -> Vec<Complex64> {
    if n <= 1 {
        return vec![Complex64::new(1.0, 0.0)];
    }
    let mut roots = vec![Complex64::new(0.0, 0.0); n];
    roots[0] = Complex64::new(1.0, 0.0);
    if n % 2 == 0 {
        roots[n / 2] = Complex64::new(FRAC_1_SQRT_2, FRAC_1_SQRT_2);
    }
    for j in 1..=(n - 1) / 2 {
        let theta = PI * j as f64 / (2.0 * n as f64);
        let (sin, cos) = theta.sin_cos();
        roots[j] = Complex64::new(cos, sin);
        roots[n - j] = Complex64::new(sin, cos);
    }
    roots
}

/// A fixed-size bank of lazily-published root sets, indexed by a small
/// integer (`log_n` for the radix-2 cache, `log_n` again for the radix-3
/// cache). Indices beyond the bank's size are recomputed on every call
/// instead of cached.
struct RootsCache {
    slots: Vec<OnceLock<Arc<Vec<Complex64>>>>,
}

impl RootsCache {
    fn new(size: usize) -> Self {
        let mut slots = Vec::with_capacity(size);
        slots.resize_with(size, OnceLock::new);
        RootsCache { slots }
    }

    fn get_or_compute(&self, index: usize, len: usize) -> Arc<Vec<Complex64>> {
        match self.slots.get(index) {
            Some(slot) => slot.get_or_init(|| Arc::new(calc_roots(len))).clone(),
            None => Arc::new(calc_roots(len)),
        }
    }
}

static ROOTS2_CACHE: OnceLock<RootsCache> = OnceLock::new();
static ROOTS3_CACHE: OnceLock<RootsCache> = OnceLock::new();

/// Returns a set of `2^k` roots appropriate for the stage-`k` radix-4
/// butterfly, memoised for `k < ROOTS_CACHE2_SIZE`.
pub(crate) fn roots2(k: usize) -> Arc<Vec<Complex64>> {
    let cache = ROOTS2_CACHE.get_or_init(|| RootsCache::new(ROOTS_CACHE2_SIZE));
    cache.get_or_compute(k, 1usize << k)
}

/// Returns a set of `3 · 2^k` roots for the mixed-radix transform, memoised
/// for `k < ROOTS3_CACHE_SIZE`.
pub(crate) fn roots3(k: usize) -> Arc<Vec<Complex64>> {
    let cache = ROOTS3_CACHE.get_or_init(|| RootsCache::new(ROOTS3_CACHE_SIZE));
    cache.get_or_compute(k, 3usize << k)
}
