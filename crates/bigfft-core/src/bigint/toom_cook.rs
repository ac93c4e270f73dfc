use crate::config::thresholds::TOOM_COOK_THRESHOLD;

use super::magnitude::{bit_length_of, trim_leading_zeros, BigInt};
use super::schoolbook::multiply_mag_schoolbook;

/// Toom-Cook-3 multiplication, used between [`TOOM_COOK_THRESHOLD`] and
/// [`crate::config::thresholds::FFT_THRESHOLD`] bits.
///
/// Splits each operand into three limb-aligned parts `a2, a1, a0` (so that
/// `|a| = a2·B^2k + a1·B^k + a0` for `B = 2^32`), evaluates the two degree-2
/// polynomials at `x = 0, 1, -1, 2, ∞`, multiplies pointwise (recursing into
/// schoolbook or another round of Toom-Cook-3 for the five sub-products), and
/// interpolates the degree-4 product polynomial back from those five points.
pub(crate) fn multiply_toom_cook_3(a: &BigInt, b: &BigInt) -> BigInt {
    if a.is_zero() || b.is_zero() {
        return BigInt::zero();
    }
    let mag = multiply_mag_toom_cook_3(a.get_magnitude(), b.get_magnitude());
    let signum = a.signum() * b.signum();
    BigInt::from_signum_and_mag(signum, &mag)
}

fn multiply_mag_toom_cook_3(a: &[u32], b: &[u32]) -> Vec<u32> {
    let k = (a.len().max(b.len()) + 2) / 3;
    if k == 0 {
        return multiply_mag_schoolbook(a, b);
    }

    let (a2, a1, a0) = split3(a, k);
    let (b2, b1, b0) = split3(b, k);

    // Evaluate both operand polynomials at x = 1, -1, 2 (x = 0 and x = ∞ are
    // just a0/b0 and a2/b2, no evaluation needed).
    let da1 = add(&add(&a0, &a1), &a2); // p_a(1)
    let dam1 = sub(&add(&a0, &a2), &a1); // p_a(-1)
    let da2 = add(&add(&a0, &shl_bits(&a1, 1)), &shl_bits(&a2, 2)); // p_a(2)

    let db1 = add(&add(&b0, &b1), &b2);
    let dbm1 = sub(&add(&b0, &b2), &b1);
    let db2 = add(&add(&b0, &shl_bits(&b1, 1)), &shl_bits(&b2, 2));

    // Five pointwise products, each recursing back into this module's own
    // dispatch (not the crate-level FFT dispatch: sub-products are a third of
    // the operand size, so schoolbook/Toom-Cook-3 alone carries them).
    let v0 = recurse(&a0, &b0);
    let v1 = recurse(&da1, &db1);
    let vm1 = recurse(&dam1, &dbm1);
    let v2 = recurse(&da2, &db2);
    let vinf = recurse(&a2, &b2);

    // Interpolate c0..c4 of p(x) = c0 + c1 x + c2 x^2 + c3 x^3 + c4 x^4 from
    // p(0) = v0, p(1) = v1, p(-1) = vm1, p(2) = v2, p(∞) leading coeff = vinf.
    let c0 = v0.clone();
    let c4 = vinf.clone();

    // c2 = (v1 + vm1)/2 - c0 - c4
    let c2 = sub(&sub(&div_exact_small(&add(&v1, &vm1), 2), &c0), &c4);

    // c1 + c3 = (v1 - vm1)/2
    let sum13 = div_exact_small(&sub(&v1, &vm1), 2);

    // c1 + 4c3 = (v2 - c0 - 4c2 - 16c4)/2
    let rhs = sub(
        &sub(&v2, &c0),
        &add(&shl_bits(&c2, 2), &shl_bits(&c4, 4)),
    );
    let sum1_4_3 = div_exact_small(&rhs, 2);

    // 3c3 = sum1_4_3 - sum13
    let c3 = div_exact_small(&sub(&sum1_4_3, &sum13), 3);
    let c1 = sub(&sum13, &c3);

    // Recombine: c0 + c1·B^k + c2·B^2k + c3·B^3k + c4·B^4k.
    let mut total = c0;
    total = add(&total, &shl_limbs(&c1, k));
    total = add(&total, &shl_limbs(&c2, 2 * k));
    total = add(&total, &shl_limbs(&c3, 3 * k));
    total = add(&total, &shl_limbs(&c4, 4 * k));

    trim_leading_zeros(&to_unsigned_mag(total)).to_vec()
}

fn recurse(a: &SignedMag, b: &SignedMag) -> SignedMag {
    let bits = bit_length_of(&a.mag).max(bit_length_of(&b.mag));
    let mag = if bits < TOOM_COOK_THRESHOLD {
        multiply_mag_schoolbook(&a.mag, &b.mag)
    } else {
        multiply_mag_toom_cook_3(&a.mag, &b.mag)
    };
    SignedMag {
        negative: a.negative != b.negative && !mag.is_empty(),
        mag,
    }
}

fn unsigned(mag: Vec<u32>) -> SignedMag {
    SignedMag {
        negative: false,
        mag,
    }
}

/// Splits a big-endian magnitude into three limb-aligned chunks of at most
/// `k` limbs each, most significant first: `(a2, a1, a0)`.
fn split3(mag: &[u32], k: usize) -> (SignedMag, SignedMag, SignedMag) {
    let n = mag.len();
    let split_point = n.saturating_sub(k);
    let (rest, a0) = mag.split_at(split_point);
    let rest_split = rest.len().saturating_sub(k);
    let (a2, a1) = rest.split_at(rest_split);
    (
        unsigned(trim_leading_zeros(a2).to_vec()),
        unsigned(trim_leading_zeros(a1).to_vec()),
        unsigned(trim_leading_zeros(a0).to_vec()),
    )
}

/// A magnitude that may be conceptually negative, used only for the
/// intermediate evaluation/interpolation arithmetic inside this module (these
/// values never escape `multiply_mag_toom_cook_3`).
#[derive(Clone)]
struct SignedMag {
    negative: bool,
    mag: Vec<u32>,
}

fn zero_signed() -> SignedMag {
    SignedMag {
        negative: false,
        mag: Vec::new(),
    }
}

fn is_zero_signed(v: &SignedMag) -> bool {
    v.mag.iter().all(|&limb| limb == 0)
}

fn add(x: &SignedMag, y: &SignedMag) -> SignedMag {
    if is_zero_signed(x) {
        return y.clone();
    }
    if is_zero_signed(y) {
        return x.clone();
    }
    if x.negative == y.negative {
        return SignedMag {
            negative: x.negative,
            mag: super::magnitude::add_mag(&x.mag, &y.mag),
        };
    }
    match super::magnitude::cmp_mag(&x.mag, &y.mag) {
        std::cmp::Ordering::Equal => zero_signed(),
        std::cmp::Ordering::Greater => SignedMag {
            negative: x.negative,
            mag: super::magnitude::sub_mag(&x.mag, &y.mag),
        },
        std::cmp::Ordering::Less => SignedMag {
            negative: y.negative,
            mag: super::magnitude::sub_mag(&y.mag, &x.mag),
        },
    }
}

fn sub(x: &SignedMag, y: &SignedMag) -> SignedMag {
    add(
        x,
        &SignedMag {
            negative: !y.negative,
            mag: y.mag.clone(),
        },
    )
}

/// Multiplies by `2^bits` (`bits` small, at most a couple of bits — used only
/// for the `2a1`/`4a2` terms of the `x = 2` evaluation point).
fn shl_bits(v: &SignedMag, bits: u32) -> SignedMag {
    if is_zero_signed(v) {
        return zero_signed();
    }
    let mut carry: u64 = 0;
    let mut out = vec![0u32; v.mag.len() + 1];
    for (i, &limb) in v.mag.iter().enumerate().rev() {
        let shifted = ((limb as u64) << bits) | carry;
        out[i + 1] = shifted as u32;
        carry = shifted >> 32;
    }
    out[0] = carry as u32;
    SignedMag {
        negative: v.negative,
        mag: trim_leading_zeros(&out).to_vec(),
    }
}

/// Multiplies by `2^(32 * limbs)`, i.e. appends `limbs` zero limbs.
fn shl_limbs(v: &SignedMag, limbs: usize) -> SignedMag {
    if is_zero_signed(v) || limbs == 0 {
        return v.clone();
    }
    let mut mag = v.mag.clone();
    mag.extend(std::iter::repeat(0u32).take(limbs));
    SignedMag {
        negative: v.negative,
        mag,
    }
}

/// Divides by a small constant divisor that is known (by construction of the
/// interpolation formulas) to divide the magnitude exactly.
fn div_exact_small(v: &SignedMag, divisor: u32) -> SignedMag {
    if is_zero_signed(v) {
        return zero_signed();
    }
    let divisor = divisor as u64;
    let mut out = vec![0u32; v.mag.len()];
    let mut rem: u64 = 0;
    for (i, &limb) in v.mag.iter().enumerate() {
        let acc = (rem << 32) | limb as u64;
        out[i] = (acc / divisor) as u32;
        rem = acc % divisor;
    }
    debug_assert_eq!(rem, 0, "Toom-Cook interpolation divisor must divide exactly");
    SignedMag {
        negative: v.negative,
        mag: trim_leading_zeros(&out).to_vec(),
    }
}

/// Converts the final (always non-negative, by construction) interpolated
/// total into a plain big-endian magnitude.
fn to_unsigned_mag(v: SignedMag) -> Vec<u32> {
    debug_assert!(
        !v.negative || is_zero_signed(&v),
        "Toom-Cook-3 recombination must be non-negative"
    );
    v.mag
}
