//! Configuration constants and tuning parameters for the multiplication and
//! digit-ingestion pipelines.
//!
//! This module centralizes every tunable named by the design so that the
//! crossover points between algorithms live in one place.

/// Bit-length thresholds that drive multiplier dispatch (see [`crate::multiply`]).
pub mod thresholds {
    /// Below this many bits, schoolbook multiplication is used.
    ///
    /// Matches the `240 * 8` byte/bit threshold used by `java.math.BigInteger`,
    /// below which Toom-Cook-3's extra splitting and evaluation/interpolation
    /// overhead is not repaid.
    pub const TOOM_COOK_THRESHOLD: usize = 240 * 8;

    /// Above this many bits (with both operands already past
    /// [`TOOM_COOK_THRESHOLD`]), FFT multiplication is used instead of
    /// Toom-Cook-3.
    pub const FFT_THRESHOLD: usize = 3400 * 8;
}

/// Sizes of the process-wide roots-of-unity caches (C3).
pub mod cache_sizes {
    /// Radix-2 roots cache covers lengths `2^0 ..= 2^(ROOTS_CACHE2_SIZE - 1)`.
    pub const ROOTS_CACHE2_SIZE: usize = 18;

    /// Radix-3 (mixed, `3 * 2^k`) roots cache covers `k < ROOTS3_CACHE_SIZE`.
    pub const ROOTS3_CACHE_SIZE: usize = 15;
}

/// Tuning parameters for the decimal digit-ingestion pipeline (C6/C7).
pub mod digits {
    /// Digit count below which a single 64-bit Horner-loop scalar parse is used.
    pub const SCALAR_BASE_CASE_LEN: usize = 18;

    /// Digit count below which the divide-and-conquer split is skipped in favor
    /// of repeated 18-digit-chunk accumulation.
    ///
    /// Chosen so the recursion's constant overhead (allocating a `BigUint`,
    /// looking up a power of ten) is amortized only once inputs are large
    /// enough that a single multiply-by-pow10-and-add loop would otherwise
    /// dominate.
    pub const RECURSION_THRESHOLD: usize = 400;

    /// Digit count above which the two recursive halves of a split are handed
    /// to `rayon::join` instead of run sequentially.
    ///
    /// Set well above [`RECURSION_THRESHOLD`] so task-spawn overhead is only
    /// paid once the halves are themselves large enough to dominate it.
    pub const PARALLEL_SPLIT_THRESHOLD: usize = 1 << 16;

    /// Longest decimal digit string this crate will parse.
    ///
    /// `1,292,782,622` digits is the largest magnitude whose limb count and
    /// FFT length selection stay inside `u32`/`usize` index space on a
    /// 64-bit host.
    pub const MAX_DIGIT_LEN: usize = 1_292_782_622;
}

/// Safety caps on internal allocation sizes, so a pathological input is
/// reported as [`crate::error::BigIntError::NumericOverflow`] rather than
/// overflowing index arithmetic or exhausting memory silently.
pub mod limits {
    /// Largest `u32` limb count this crate will allocate for a single
    /// magnitude. Chosen comfortably above what [`super::digits::MAX_DIGIT_LEN`]
    /// digits can produce (~1.29e9 digits is under 2^31 bits, i.e. under 2^26
    /// limbs), while staying far enough below `usize` overflow on a 64-bit
    /// host that length arithmetic (`2 * fft_len`, `fft_len + 1`, ...) cannot
    /// wrap.
    pub const MAX_LIMB_COUNT: usize = 1 << 28;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thresholds_are_ordered() {
        assert!(
            thresholds::TOOM_COOK_THRESHOLD < thresholds::FFT_THRESHOLD,
            "TOOM_COOK_THRESHOLD must be less than FFT_THRESHOLD"
        );
    }

    #[test]
    fn cache_sizes_are_positive() {
        assert!(cache_sizes::ROOTS_CACHE2_SIZE > 0);
        assert!(cache_sizes::ROOTS3_CACHE_SIZE > 0);
    }

    #[test]
    fn digit_thresholds_are_ordered() {
        assert!(digits::SCALAR_BASE_CASE_LEN < digits::RECURSION_THRESHOLD);
        assert!(digits::RECURSION_THRESHOLD < digits::PARALLEL_SPLIT_THRESHOLD);
        assert!(digits::PARALLEL_SPLIT_THRESHOLD < digits::MAX_DIGIT_LEN);
    }

    #[test]
    fn max_limb_count_covers_max_digit_len() {
        // MAX_DIGIT_LEN digits need at most ceil(MAX_DIGIT_LEN * log2(10) / 32) limbs.
        let bits_needed = (digits::MAX_DIGIT_LEN as f64) * std::f64::consts::LOG2_10;
        let limbs_needed = (bits_needed / 32.0).ceil() as usize;
        assert!(limbs_needed < limits::MAX_LIMB_COUNT);
    }
}
