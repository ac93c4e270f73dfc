//! Multiplier dispatch: chooses schoolbook, Toom-Cook-3, or FFT based on
//! operand bit-lengths and exposes the three public multiplication entry
//! points.
//!
//! Large-integer arithmetic here cannot fail except when an internal
//! allocation request would exceed the limb-array cap. That one failure mode
//! is surfaced as `Result` rather than a panic or a silent truncation,
//! matching this workspace's convention of avoiding `unwrap`/`expect` outside
//! tests — see `DESIGN.md`'s "Open Questions" entry for this decision.

use crate::bigint::{multiply_schoolbook, multiply_toom_cook_3, BigInt};
use crate::config::thresholds::{FFT_THRESHOLD, TOOM_COOK_THRESHOLD};
use crate::error::BigIntError;
use crate::fft;

/// Multiplies two big integers. Dispatches to FFT only once both operands
/// are past [`TOOM_COOK_THRESHOLD`] and at least one is past
/// [`FFT_THRESHOLD`]; otherwise delegates to schoolbook/Toom-Cook-3.
pub fn multiply(a: &BigInt, b: &BigInt, parallel: bool) -> Result<BigInt, BigIntError> {
    if a.is_zero() || b.is_zero() {
        return Ok(BigInt::zero());
    }
    if should_use_fft(a.bit_length(), b.bit_length()) {
        multiply_fft(a, b, parallel)
    } else {
        Ok(multiply_below_fft(a, b))
    }
}

/// Squares a big integer, using the FFT squaring specialization (one forward
/// transform instead of two) once `a` is large enough to cross the FFT
/// threshold against itself.
pub fn square(a: &BigInt) -> Result<BigInt, BigIntError> {
    if a.is_zero() {
        return Ok(BigInt::zero());
    }
    let bits = a.bit_length();
    if should_use_fft(bits, bits) {
        let mag = fft::square_fft_mag(a.get_magnitude())?;
        Ok(BigInt::from_signum_and_mag(1, &mag))
    } else {
        Ok(multiply_below_fft(a, a))
    }
}

/// Multiplies two big integers via the FFT path explicitly, bypassing the
/// bit-length gate `multiply` applies. Used directly by [`multiply`]'s FFT
/// branch and exposed publicly for callers (and tests) that want to force
/// the FFT path regardless of operand size, e.g. to cross-check it against
/// the schoolbook/Toom-Cook-3 path at sizes too small to reach FFT naturally.
pub fn multiply_fft(a: &BigInt, b: &BigInt, parallel: bool) -> Result<BigInt, BigIntError> {
    if a.is_zero() || b.is_zero() {
        return Ok(BigInt::zero());
    }
    let mag = fft::multiply_fft_mag(a.get_magnitude(), b.get_magnitude(), parallel)?;
    let signum = a.signum() * b.signum();
    Ok(BigInt::from_signum_and_mag(signum, &mag))
}

fn should_use_fft(bits_a: usize, bits_b: usize) -> bool {
    bits_a > TOOM_COOK_THRESHOLD
        && bits_b > TOOM_COOK_THRESHOLD
        && (bits_a > FFT_THRESHOLD || bits_b > FFT_THRESHOLD)
}

fn multiply_below_fft(a: &BigInt, b: &BigInt) -> BigInt {
    let bits = a.bit_length().max(b.bit_length());
    if bits < TOOM_COOK_THRESHOLD {
        multiply_schoolbook(a, b)
    } else {
        multiply_toom_cook_3(a, b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wide_bigint(limbs: usize, seed: u32) -> BigInt {
        let mag: Vec<u32> = (0..limbs)
            .map(|i| 0x1234_5678u32.wrapping_mul(seed).wrapping_add(i as u32))
            .collect();
        BigInt::from_signum_and_mag(1, &mag)
    }

    #[test]
    fn multiply_zero_annihilates() {
        let a = wide_bigint(200, 7);
        assert!(multiply(&a, &BigInt::zero(), false).unwrap().is_zero());
        assert!(multiply(&BigInt::zero(), &a, false).unwrap().is_zero());
    }

    #[test]
    fn multiply_matches_schoolbook_below_thresholds() {
        let a = BigInt::from_u64(123456789);
        let b = BigInt::from_u64(987654321);
        let got = multiply(&a, &b, false).unwrap();
        let want = multiply_schoolbook(&a, &b);
        assert_eq!(got, want);
    }

    #[test]
    fn multiply_fft_matches_schoolbook_at_modest_size() {
        // A few hundred limbs each: small enough to check against schoolbook
        // directly.
        let a = wide_bigint(120, 3);
        let b = wide_bigint(90, 5);
        let fft_result = multiply_fft(&a, &b, false).unwrap();
        let schoolbook_result = multiply_schoolbook(&a, &b);
        assert_eq!(fft_result, schoolbook_result);
    }

    #[test]
    fn multiply_fft_commutative() {
        let a = wide_bigint(150, 11);
        let b = wide_bigint(80, 13);
        assert_eq!(
            multiply_fft(&a, &b, false).unwrap(),
            multiply_fft(&b, &a, false).unwrap()
        );
    }

    #[test]
    fn multiply_fft_parallel_matches_sequential() {
        let a = wide_bigint(150, 17);
        let b = wide_bigint(150, 19);
        assert_eq!(
            multiply_fft(&a, &b, false).unwrap(),
            multiply_fft(&a, &b, true).unwrap()
        );
    }

    #[test]
    fn square_matches_multiply_self() {
        let a = wide_bigint(100, 23);
        assert_eq!(square(&a).unwrap(), multiply(&a, &a, false).unwrap());
    }

    #[test]
    fn square_fft_matches_multiply_fft_self() {
        let a = wide_bigint(120, 29);
        assert_eq!(
            square(&a).unwrap(),
            multiply_fft(&a, &a, false).unwrap()
        );
    }

    #[test]
    fn signum_law_holds_for_fft_path() {
        let a = wide_bigint(120, 31).negate();
        let b = wide_bigint(90, 37);
        let product = multiply_fft(&a, &b, false).unwrap();
        assert_eq!(product.signum(), -1);
    }
}
