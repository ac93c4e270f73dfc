//! Multiplier dispatch (C5): packs big-integer magnitudes into right-angle
//! weighted FFT vectors, runs the forward/pointwise/inverse pipeline of
//! [`crate::fft::engine`], and unpacks the result — including the squaring
//! specialization that halves the transform count.
//!
//! The pipeline shape is the usual one for FFT-based multiplication: convert
//! to a digit vector in some base, transform, multiply pointwise, inverse
//! transform, round and carry-propagate back. Two choices sharpen it here: a
//! *weighted* (right-angle) convolution rather than a zero-padded one, so the
//! transform length is `n` instead of `2n`, and a balanced (not
//! non-negative) digit representation, which is what buys the tighter
//! Percival error bound this module's bits-per-point table depends on.

use num_complex::Complex64;

use crate::config::limits::MAX_LIMB_COUNT;
use crate::error::BigIntError;

use super::complex::ComplexOps;
use super::engine;
use super::roots;

/// The largest payload width per FFT bin such that the Percival error bound
/// guarantees the rounded inverse transform recovers the exact integer
/// convolution, as a function of `bitLen = max(bit_length(a), bit_length(b))`.
fn bits_per_point(bit_len: usize) -> u32 {
    const TABLE: [(usize, u32); 11] = [
        (19 << 9, 19),
        (18 << 10, 18),
        (17 << 12, 17),
        (16 << 14, 16),
        (15 << 16, 15),
        (14 << 18, 14),
        (13 << 20, 13),
        (12 << 21, 12),
        (11 << 23, 11),
        (10 << 25, 10),
        (9 << 27, 9),
    ];
    for &(max_bits, bpp) in &TABLE {
        if bit_len <= max_bits {
            return bpp;
        }
    }
    8
}

/// Chooses the FFT transform length for a convolution covering `bit_len` bits
/// at `bpp` bits per point: round `fftLen` (plus one reserved carry slot) up
/// to a power of two, or down to three-quarters of that power of two when
/// `fftLen` already fits there, since `3·2ⁿ` is the smaller of the two
/// lengths covering `fftLen` points.
fn choose_fft_len(bit_len: usize, bpp: u32) -> usize {
    let fft_len = bit_len.div_ceil(bpp as usize) + 1;
    let l2 = fft_len.next_power_of_two();
    let l3 = (3 * l2) / 4;
    if fft_len < l3 {
        l3
    } else {
        l2
    }
}

/// The first-quadrant right-angle weight set `e^(iπj/(2·fft_len))`,
/// `j = 0..fft_len`, for either transform family: `roots2(log2 fft_len)` when
/// `fft_len` is a power of two, `roots3(log2(fft_len/3))` when it is
/// `3·2ⁿ` — both resolve to the same underlying root computation, just
/// fetched from whichever cache already holds a set of that length.
fn weights_for(fft_len: usize) -> std::sync::Arc<Vec<Complex64>> {
    if fft_len.is_power_of_two() {
        roots::roots2(fft_len.trailing_zeros() as usize)
    } else {
        debug_assert_eq!(fft_len % 3, 0);
        roots::roots3((fft_len / 3).trailing_zeros() as usize)
    }
}

fn run_forward(v: &mut [Complex64]) {
    if v.len().is_power_of_two() {
        engine::fft_radix2(v);
    } else {
        engine::fft_mixed(v);
    }
}

fn run_inverse(v: &mut [Complex64]) {
    if v.len().is_power_of_two() {
        engine::ifft_radix2(v);
    } else {
        engine::ifft_mixed(v);
    }
}

/// Reads the `num_bits` bits of `mag` (a big-endian `u32` limb magnitude)
/// starting at bit `start`, where bit 0 is the least-significant bit of the
/// whole magnitude (little-endian bit order).
fn extract_bits(mag: &[u32], start: usize, num_bits: u32) -> u64 {
    let get_bit = |i: usize| -> u64 {
        let limb_from_lsb = i / 32;
        if limb_from_lsb >= mag.len() {
            return 0;
        }
        let limb = mag[mag.len() - 1 - limb_from_lsb];
        ((limb >> (i % 32)) & 1) as u64
    };
    let mut out = 0u64;
    for k in 0..num_bits {
        out |= get_bit(start + k as usize) << k;
    }
    out
}

/// Packs `mag`'s bits, `bpp` at a time, little-endian, into `fft_len` points,
/// then balances each packed digit into `(-base/2, base/2]` by carrying into
/// its higher neighbor.
fn to_fft_vector(mag: &[u32], fft_len: usize, bpp: u32) -> Vec<Complex64> {
    let mut coeffs: Vec<i64> = (0..fft_len)
        .map(|j| extract_bits(mag, j * bpp as usize, bpp) as i64)
        .collect();

    let base = 1i64 << bpp;
    let half = base / 2;
    for j in 0..coeffs.len().saturating_sub(1) {
        if coeffs[j] > half {
            coeffs[j] -= base;
            coeffs[j + 1] += 1;
        }
    }
    // The final point has no higher neighbor to carry into; it absorbs
    // whatever residual the packing (plus the reserved carry slot of
    // `choose_fft_len`) leaves it with.

    coeffs
        .into_iter()
        .map(|c| Complex64::new(c as f64, 0.0))
        .collect()
}

/// The right-angle property leaves the low half of the `2·fft_len`-coefficient
/// convolution in the real parts and the high half in the imaginary parts.
/// Rounds each to the nearest integer, carry-propagates low-then-high as one
/// combined stream, and reassembles the `bpp`-bit digits into big-endian
/// `u32` limbs.
fn from_fft_vector(v: &[Complex64], bpp: u32) -> Result<Vec<u32>, BigIntError> {
    let fft_len = v.len();
    let total = fft_len
        .checked_mul(2)
        .ok_or_else(|| BigIntError::NumericOverflow {
            detail: format!("fft_len {fft_len} doubled overflows usize"),
        })?;
    if total > MAX_LIMB_COUNT {
        return Err(BigIntError::AllocationFailure {
            requested_limbs: total,
        });
    }

    let base = 1i64 << bpp;
    let mut digits: Vec<u32> = Vec::with_capacity(total + 1);
    let mut carry: i64 = 0;
    for i in 0..total {
        let raw = if i < fft_len { v[i].re } else { v[i - fft_len].im };
        let val = raw.round() as i64 + carry;
        digits.push(val.rem_euclid(base) as u32);
        carry = val.div_euclid(base);
    }
    while carry != 0 {
        if digits.len() >= MAX_LIMB_COUNT {
            return Err(BigIntError::AllocationFailure {
                requested_limbs: digits.len() + 1,
            });
        }
        digits.push((carry.rem_euclid(base)) as u32);
        carry = carry.div_euclid(base);
    }

    Ok(digits_to_be_limbs(&digits, bpp))
}

/// Reassembles a little-endian stream of `bpp`-bit digits into big-endian
/// `u32` limbs (32 bits at a time), trimming leading (here: trailing-in-LE)
/// zero limbs.
fn digits_to_be_limbs(digits: &[u32], bpp: u32) -> Vec<u32> {
    let mut le_limbs: Vec<u32> = Vec::with_capacity(digits.len() * bpp as usize / 32 + 2);
    let mut acc: u64 = 0;
    let mut acc_bits: u32 = 0;
    for &d in digits {
        acc |= (d as u64) << acc_bits;
        acc_bits += bpp;
        while acc_bits >= 32 {
            le_limbs.push(acc as u32);
            acc >>= 32;
            acc_bits -= 32;
        }
    }
    if acc_bits > 0 {
        le_limbs.push(acc as u32);
    }
    while le_limbs.last() == Some(&0) {
        le_limbs.pop();
    }
    le_limbs.reverse();
    le_limbs
}

fn apply_weights_forward(points: &mut [Complex64], weights: &[Complex64]) {
    for (p, &w) in points.iter_mut().zip(weights.iter()) {
        *p *= w;
    }
}

fn apply_weights_inverse(points: &mut [Complex64], weights: &[Complex64]) {
    for (p, &w) in points.iter_mut().zip(weights.iter()) {
        *p = p.mul_conj(w);
    }
}

/// Packs one magnitude, applies the right-angle weights, and runs the
/// forward transform — the shared first half of both [`multiply_fft_mag`] and
/// [`square_fft_mag`].
fn forward(mag: &[u32], fft_len: usize, bpp: u32, weights: &[Complex64]) -> Vec<Complex64> {
    let mut v = to_fft_vector(mag, fft_len, bpp);
    apply_weights_forward(&mut v, weights);
    run_forward(&mut v);
    v
}

fn inverse_and_unpack(
    mut v: Vec<Complex64>,
    weights: &[Complex64],
    bpp: u32,
) -> Result<Vec<u32>, BigIntError> {
    run_inverse(&mut v);
    apply_weights_inverse(&mut v, weights);
    from_fft_vector(&v, bpp)
}

/// Multiplies two magnitudes via the FFT engine. When `parallel` is set, the
/// two operands' forward transforms run concurrently via `rayon::join`.
pub(crate) fn multiply_fft_mag(
    a: &[u32],
    b: &[u32],
    parallel: bool,
) -> Result<Vec<u32>, BigIntError> {
    let bit_len = crate::bigint::bit_length_of(a).max(crate::bigint::bit_length_of(b));
    let bpp = bits_per_point(bit_len);
    let fft_len = choose_fft_len(bit_len, bpp);
    let weights = weights_for(fft_len);

    let (mut fa, fb) = if parallel {
        rayon::join(
            || forward(a, fft_len, bpp, &weights),
            || forward(b, fft_len, bpp, &weights),
        )
    } else {
        (forward(a, fft_len, bpp, &weights), forward(b, fft_len, bpp, &weights))
    };

    engine::mul_pointwise(&mut fa, &fb);
    inverse_and_unpack(fa, &weights, bpp)
}

/// Squares one magnitude via the FFT engine's squaring specialization: a
/// single forward transform and `square_pointwise` instead of two forward
/// transforms and a pointwise multiply.
pub(crate) fn square_fft_mag(a: &[u32]) -> Result<Vec<u32>, BigIntError> {
    let bit_len = crate::bigint::bit_length_of(a);
    let bpp = bits_per_point(bit_len);
    let fft_len = choose_fft_len(bit_len, bpp);
    let weights = weights_for(fft_len);

    let mut fa = forward(a, fft_len, bpp, &weights);
    engine::square_pointwise(&mut fa);
    inverse_and_unpack(fa, &weights, bpp)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bits_per_point_table_boundaries() {
        assert_eq!(bits_per_point(19 << 9), 19);
        assert_eq!(bits_per_point((19 << 9) + 1), 18);
        assert_eq!(bits_per_point(9 << 27), 9);
        assert_eq!(bits_per_point((9 << 27) + 1), 8);
        assert_eq!(bits_per_point(usize::MAX / 2), 8);
    }

    #[test]
    fn choose_fft_len_is_pow2_or_mixed() {
        for bit_len in [100usize, 10_000, 1_000_000, 50_000_000] {
            let bpp = bits_per_point(bit_len);
            let len = choose_fft_len(bit_len, bpp);
            assert!(len.is_power_of_two() || len % 3 == 0);
            assert!(len * (bpp as usize) + (bpp as usize) >= bit_len);
        }
    }

    #[test]
    fn extract_bits_reads_little_endian() {
        // mag = [0x0000_0001] big-endian single limb == the integer 1.
        let mag = [1u32];
        assert_eq!(extract_bits(&mag, 0, 4), 1);
        assert_eq!(extract_bits(&mag, 4, 4), 0);

        // mag = [0x0000_0002, 0x0000_0001] big-endian == 2^32 + 1.
        let mag = [2u32, 1u32];
        assert_eq!(extract_bits(&mag, 0, 32), 1);
        assert_eq!(extract_bits(&mag, 32, 32), 2);
    }

    #[test]
    fn round_trip_small_value_through_fft_vector() {
        let mag = [0x1234_5678u32, 0x9abc_def0u32];
        let bpp = 16;
        let fft_len = choose_fft_len(crate::bigint::bit_length_of(&mag), bpp);
        let packed = to_fft_vector(&mag, fft_len, bpp);
        // Balanced packing with no convolution applied: re-unpacking the raw
        // (unweighted, untransformed) points directly should recover `mag`.
        let limbs = digits_to_be_limbs(
            &packed
                .iter()
                .map(|c| {
                    let base = 1i64 << bpp;
                    let v = c.re.round() as i64;
                    (v.rem_euclid(base)) as u32
                })
                .collect::<Vec<_>>(),
            bpp,
        );
        assert_eq!(limbs, vec![0x1234_5678, 0x9abc_def0]);
    }

    #[test]
    fn multiply_fft_mag_matches_schoolbook_small() {
        let a = [0xFFFF_FFFFu32, 0xFFFF_FFFFu32];
        let b = [0x1234_5678u32];
        let got = multiply_fft_mag(&a, &b, false).unwrap();
        let want = crate::bigint::multiply_schoolbook(
            &crate::BigInt::from_signum_and_mag(1, &a),
            &crate::BigInt::from_signum_and_mag(1, &b),
        );
        assert_eq!(
            crate::BigInt::from_signum_and_mag(1, &got),
            want
        );
    }

    #[test]
    fn square_fft_mag_matches_multiply_fft_mag_self() {
        let a = [0xABCD_1234u32, 0x5678_9abcu32];
        let squared = square_fft_mag(&a).unwrap();
        let multiplied = multiply_fft_mag(&a, &a, false).unwrap();
        assert_eq!(squared, multiplied);
    }
}
