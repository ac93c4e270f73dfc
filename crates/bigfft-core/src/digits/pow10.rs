//! Powers-of-ten cache (C7): memoised `10^(k·2^i)` big integers, `k` fixed at
//! [`crate::config::digits::SCALAR_BASE_CASE_LEN`], used as the multiplier in
//! the digit pipeline's combine step. Each level beyond the first is computed
//! by squaring the previous level, so large powers of ten are themselves
//! produced by repeated squaring and dispatch into the FFT multiplier once
//! they're wide enough.
//!
//! Cache slots follow the same lazy single-writer publication rule as the
//! roots-of-unity cache in [`crate::fft::roots`]: any caller may compute and
//! publish a slot, double computation is acceptable (the result is
//! idempotent), and a reader either observes a fully-populated slot or falls
//! through to compute its own.

use std::sync::{Arc, OnceLock};

use crate::bigint::BigInt;
use crate::config::digits::SCALAR_BASE_CASE_LEN;
use crate::error::BigIntError;
use crate::multiply::square;

/// Memoised levels `10^(SCALAR_BASE_CASE_LEN · 2^i)` for `i < CACHE_SIZE`.
/// Beyond this, levels are recomputed on every call rather than cached,
/// mirroring the roots-of-unity cache's treatment of out-of-range indices.
const CACHE_SIZE: usize = 40;

struct PowerCache {
    slots: Vec<OnceLock<Arc<BigInt>>>,
}

impl PowerCache {
    fn new() -> Self {
        let mut slots = Vec::with_capacity(CACHE_SIZE);
        slots.resize_with(CACHE_SIZE, OnceLock::new);
        PowerCache { slots }
    }
}

static POW10_CACHE: OnceLock<PowerCache> = OnceLock::new();

fn ten_pow_base() -> BigInt {
    BigInt::from_u64(10u64.pow(SCALAR_BASE_CASE_LEN as u32))
}

/// `10^(SCALAR_BASE_CASE_LEN · 2^i)`, computed by repeated squaring from
/// `10^SCALAR_BASE_CASE_LEN` and memoised for `i < CACHE_SIZE`.
fn pow10_level(i: usize) -> Result<Arc<BigInt>, BigIntError> {
    if i == 0 {
        return Ok(Arc::new(ten_pow_base()));
    }

    let cache = POW10_CACHE.get_or_init(PowerCache::new);
    if let Some(slot) = cache.slots.get(i) {
        if let Some(v) = slot.get() {
            return Ok(v.clone());
        }
        let prev = pow10_level(i - 1)?;
        let value = Arc::new(square(&prev)?);
        // Another thread may have raced us; both computations are the same
        // value, so it's fine if `set` loses the race.
        let _ = slot.set(value.clone());
        Ok(value)
    } else {
        let prev = pow10_level(i - 1)?;
        Ok(Arc::new(square(&prev)?))
    }
}

/// `10^e` for `e` of the form `SCALAR_BASE_CASE_LEN · 2^i` (the only shape
/// the digit-pipeline's recursive split in [`super::parse`] ever requests) or
/// `e == 0`.
pub(crate) fn pow10(e: usize) -> Result<BigInt, BigIntError> {
    if e == 0 {
        return Ok(BigInt::from_u64(1));
    }
    debug_assert_eq!(
        e % SCALAR_BASE_CASE_LEN,
        0,
        "pow10 is only memoised for multiples of SCALAR_BASE_CASE_LEN"
    );
    let mult = e / SCALAR_BASE_CASE_LEN;
    debug_assert!(
        mult.is_power_of_two(),
        "pow10 is only memoised for power-of-two multiples of SCALAR_BASE_CASE_LEN"
    );
    let i = mult.trailing_zeros() as usize;
    Ok((*pow10_level(i)?).clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pow10_zero_is_one() {
        assert_eq!(pow10(0).unwrap(), BigInt::from_u64(1));
    }

    #[test]
    fn pow10_base_level_matches_u64_pow() {
        let got = pow10(SCALAR_BASE_CASE_LEN).unwrap();
        assert_eq!(got, BigInt::from_u64(10u64.pow(SCALAR_BASE_CASE_LEN as u32)));
    }

    #[test]
    fn pow10_next_level_is_square_of_base() {
        let base = pow10(SCALAR_BASE_CASE_LEN).unwrap();
        let doubled = pow10(SCALAR_BASE_CASE_LEN * 2).unwrap();
        assert_eq!(doubled, square(&base).unwrap());
    }

    #[test]
    fn pow10_is_memoised_and_consistent() {
        let a = pow10(SCALAR_BASE_CASE_LEN * 4).unwrap();
        let b = pow10(SCALAR_BASE_CASE_LEN * 4).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn pow10_several_levels_each_square_the_last() {
        let mut prev = pow10(SCALAR_BASE_CASE_LEN).unwrap();
        for i in 1..6 {
            let e = SCALAR_BASE_CASE_LEN * (1usize << i);
            let got = pow10(e).unwrap();
            assert_eq!(got, square(&prev).unwrap());
            prev = got;
        }
    }
}
