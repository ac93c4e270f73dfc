use std::cmp::Ordering;
use std::fmt;

/// Sign of a [`BigInt`]. Zero magnitude implies (and is only represented by)
/// `Sign::Zero`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sign {
    Negative,
    Zero,
    Positive,
}

impl Sign {
    pub fn as_i8(self) -> i8 {
        match self {
            Sign::Negative => -1,
            Sign::Zero => 0,
            Sign::Positive => 1,
        }
    }

    fn negate(self) -> Sign {
        match self {
            Sign::Negative => Sign::Positive,
            Sign::Zero => Sign::Zero,
            Sign::Positive => Sign::Negative,
        }
    }
}

/// An immutable arbitrary-precision integer: a [`Sign`] plus a big-endian
/// magnitude of 32-bit limbs in base 2³².
///
/// Invariants (enforced by every constructor in this module):
/// - `mag` carries no leading (most-significant) zero limb, except that the
///   canonical zero is represented by an empty `mag` with `sign ==
///   Sign::Zero`.
/// - `sign == Sign::Zero` if and only if `mag.is_empty()`.
#[derive(Clone, PartialEq, Eq)]
pub struct BigInt {
    sign: Sign,
    mag: Vec<u32>,
}

impl BigInt {
    /// The canonical zero value.
    pub fn zero() -> Self {
        BigInt {
            sign: Sign::Zero,
            mag: Vec::new(),
        }
    }

    /// Builds a `BigInt` from an explicit sign and a big-endian magnitude
    /// slice, stripping any leading zero limbs and normalizing an all-zero
    /// magnitude to the canonical zero regardless of the requested sign.
    pub fn from_signum_and_mag(signum: i8, limbs: &[u32]) -> Self {
        let trimmed = trim_leading_zeros(limbs);
        if trimmed.is_empty() {
            return Self::zero();
        }
        let sign = match signum.cmp(&0) {
            Ordering::Less => Sign::Negative,
            Ordering::Equal => Sign::Positive, // non-empty magnitude can't be signless
            Ordering::Greater => Sign::Positive,
        };
        BigInt {
            sign,
            mag: trimmed.to_vec(),
        }
    }

    /// Big-endian view of the magnitude limbs (highest-order limb first).
    /// Empty for zero.
    pub fn get_magnitude(&self) -> &[u32] {
        &self.mag
    }

    pub fn sign(&self) -> Sign {
        self.sign
    }

    /// `-1`, `0`, or `1`.
    pub fn signum(&self) -> i8 {
        self.sign.as_i8()
    }

    pub fn is_zero(&self) -> bool {
        matches!(self.sign, Sign::Zero)
    }

    /// Position of the highest set bit, plus one. Zero for the zero value.
    pub fn bit_length(&self) -> usize {
        bit_length_of(&self.mag)
    }

    pub fn negate(&self) -> Self {
        BigInt {
            sign: self.sign.negate(),
            mag: self.mag.clone(),
        }
    }

    pub fn from_u64(v: u64) -> Self {
        if v == 0 {
            return Self::zero();
        }
        let hi = (v >> 32) as u32;
        let lo = (v & 0xFFFF_FFFF) as u32;
        let limbs: Vec<u32> = if hi == 0 { vec![lo] } else { vec![hi, lo] };
        BigInt {
            sign: Sign::Positive,
            mag: limbs,
        }
    }

    pub fn from_u32(v: u32) -> Self {
        Self::from_u64(v as u64)
    }

    /// Adds two magnitudes and returns the sum with the correct resulting
    /// sign, implementing the schoolbook rules for combining same-sign and
    /// opposite-sign operands.
    pub fn add(&self, other: &BigInt) -> BigInt {
        if self.is_zero() {
            return other.clone();
        }
        if other.is_zero() {
            return self.clone();
        }
        if self.sign == other.sign {
            let mag = add_mag(&self.mag, &other.mag);
            return BigInt {
                sign: self.sign,
                mag,
            };
        }
        // Opposite signs: subtract the smaller magnitude from the larger one.
        match cmp_mag(&self.mag, &other.mag) {
            Ordering::Equal => Self::zero(),
            Ordering::Greater => {
                let mag = sub_mag(&self.mag, &other.mag);
                BigInt {
                    sign: self.sign,
                    mag,
                }
            }
            Ordering::Less => {
                let mag = sub_mag(&other.mag, &self.mag);
                BigInt {
                    sign: other.sign,
                    mag,
                }
            }
        }
    }

    pub fn sub(&self, other: &BigInt) -> BigInt {
        self.add(&other.negate())
    }

    /// Compares magnitudes only, ignoring sign. Used by the digit-ingestion
    /// combine step, which always operates on non-negative values.
    pub fn cmp_magnitude(&self, other: &BigInt) -> Ordering {
        cmp_mag(&self.mag, &other.mag)
    }
}

impl PartialOrd for BigInt {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for BigInt {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.signum(), other.signum()) {
            (a, b) if a != b => a.cmp(&b),
            (0, 0) => Ordering::Equal,
            (1, _) => cmp_mag(&self.mag, &other.mag),
            (-1, _) => cmp_mag(&other.mag, &self.mag),
            _ => unreachable!(),
        }
    }
}

impl fmt::Debug for BigInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = match self.sign {
            Sign::Negative => "-",
            Sign::Zero => "",
            Sign::Positive => "+",
        };
        write!(f, "BigInt({}{:?} limbs, {} bits)", sign, self.mag, self.bit_length())
    }
}

/// Position of the highest set bit in a big-endian magnitude, plus one.
pub(crate) fn bit_length_of(mag: &[u32]) -> usize {
    match mag.first() {
        None => 0,
        Some(&top) => (mag.len() - 1) * 32 + (32 - top.leading_zeros() as usize),
    }
}

pub(crate) fn trim_leading_zeros(mag: &[u32]) -> &[u32] {
    let first_nonzero = mag.iter().position(|&limb| limb != 0);
    match first_nonzero {
        Some(idx) => &mag[idx..],
        None => &[],
    }
}

pub(crate) fn trim_leading_zeros_vec(mut mag: Vec<u32>) -> Vec<u32> {
    let keep_from = mag.iter().position(|&limb| limb != 0).unwrap_or(mag.len());
    if keep_from > 0 {
        mag.drain(0..keep_from);
    }
    mag
}

pub(crate) fn cmp_mag(a: &[u32], b: &[u32]) -> Ordering {
    let a = trim_leading_zeros(a);
    let b = trim_leading_zeros(b);
    if a.len() != b.len() {
        return a.len().cmp(&b.len());
    }
    a.cmp(b)
}

/// Adds two big-endian magnitudes, returning a normalized big-endian result.
pub(crate) fn add_mag(a: &[u32], b: &[u32]) -> Vec<u32> {
    let (long, short) = if a.len() >= b.len() { (a, b) } else { (b, a) };
    let mut result = vec![0u32; long.len() + 1];
    let mut carry: u64 = 0;

    let mut li = long.len();
    let mut si = short.len();
    let mut ri = result.len();

    while li > 0 {
        ri -= 1;
        li -= 1;
        let mut sum = long[li] as u64 + carry;
        if si > 0 {
            si -= 1;
            sum += short[si] as u64;
        }
        result[ri] = sum as u32;
        carry = sum >> 32;
    }
    if carry > 0 {
        result[0] = carry as u32;
    }
    trim_leading_zeros_vec(result)
}

/// Subtracts `b` from `a` (both big-endian magnitudes); requires `a >= b`.
pub(crate) fn sub_mag(a: &[u32], b: &[u32]) -> Vec<u32> {
    debug_assert_ne!(cmp_mag(a, b), Ordering::Less, "sub_mag requires a >= b");
    let mut result = vec![0u32; a.len()];
    let mut borrow: i64 = 0;

    let mut ai = a.len();
    let mut bi = b.len();
    let mut ri = result.len();

    while ai > 0 {
        ai -= 1;
        ri -= 1;
        let mut diff = a[ai] as i64 - borrow;
        if bi > 0 {
            bi -= 1;
            diff -= b[bi] as i64;
        }
        if diff < 0 {
            diff += 1i64 << 32;
            borrow = 1;
        } else {
            borrow = 0;
        }
        result[ri] = diff as u32;
    }
    trim_leading_zeros_vec(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_is_canonical() {
        let z = BigInt::zero();
        assert!(z.is_zero());
        assert_eq!(z.signum(), 0);
        assert_eq!(z.bit_length(), 0);
        assert!(z.get_magnitude().is_empty());
    }

    #[test]
    fn from_signum_and_mag_strips_leading_zeros() {
        let v = BigInt::from_signum_and_mag(1, &[0, 0, 5, 7]);
        assert_eq!(v.get_magnitude(), &[5, 7]);
    }

    #[test]
    fn from_signum_and_mag_all_zero_is_canonical_zero() {
        let v = BigInt::from_signum_and_mag(1, &[0, 0, 0]);
        assert!(v.is_zero());
        assert_eq!(v.signum(), 0);
    }

    #[test]
    fn bit_length_examples() {
        assert_eq!(BigInt::from_u32(0).bit_length(), 0);
        assert_eq!(BigInt::from_u32(1).bit_length(), 1);
        assert_eq!(BigInt::from_u32(2).bit_length(), 2);
        assert_eq!(BigInt::from_u32(3).bit_length(), 2);
        assert_eq!(BigInt::from_u64(1u64 << 32).bit_length(), 33);
    }

    #[test]
    fn add_same_sign() {
        let a = BigInt::from_u64(u32::MAX as u64);
        let b = BigInt::from_u64(1);
        let sum = a.add(&b);
        assert_eq!(sum, BigInt::from_u64(1u64 << 32));
    }

    #[test]
    fn add_opposite_signs_cancel() {
        let a = BigInt::from_u64(42);
        let b = a.negate();
        assert!(a.add(&b).is_zero());
    }

    #[test]
    fn sub_gives_correct_sign() {
        let a = BigInt::from_u64(5);
        let b = BigInt::from_u64(10);
        let diff = a.sub(&b);
        assert_eq!(diff.signum(), -1);
        assert_eq!(diff.get_magnitude(), BigInt::from_u64(5).get_magnitude());
    }

    #[test]
    fn ordering_respects_sign_and_magnitude() {
        let neg = BigInt::from_u64(5).negate();
        let zero = BigInt::zero();
        let pos = BigInt::from_u64(5);
        assert!(neg < zero);
        assert!(zero < pos);
        assert!(neg < pos);
        assert_eq!(BigInt::from_u64(5), BigInt::from_u64(5));
    }

    #[test]
    fn cmp_magnitude_ignores_sign() {
        let neg = BigInt::from_u64(5).negate();
        let pos = BigInt::from_u64(5);
        assert_eq!(neg.cmp_magnitude(&pos), Ordering::Equal);
    }
}
