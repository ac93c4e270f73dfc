use super::magnitude::{trim_leading_zeros_vec, BigInt};

/// O(n·m) long multiplication, used below [`crate::config::thresholds::TOOM_COOK_THRESHOLD`].
pub(crate) fn multiply_schoolbook(a: &BigInt, b: &BigInt) -> BigInt {
    if a.is_zero() || b.is_zero() {
        return BigInt::zero();
    }
    let mag = multiply_mag_schoolbook(a.get_magnitude(), b.get_magnitude());
    let signum = a.signum() * b.signum();
    BigInt::from_signum_and_mag(signum, &mag)
}

/// Multiplies two big-endian magnitudes, returning a (possibly
/// leading-zero-padded) big-endian result.
pub(crate) fn multiply_mag_schoolbook(a: &[u32], b: &[u32]) -> Vec<u32> {
    if a.is_empty() || b.is_empty() {
        return Vec::new();
    }
    let mut result = vec![0u32; a.len() + b.len()];

    for (i, &ai) in a.iter().rev().enumerate() {
        let mut carry: u64 = 0;
        let ri_base = result.len() - 1 - i;
        for (j, &bj) in b.iter().rev().enumerate() {
            let idx = ri_base - j;
            let product = ai as u64 * bj as u64 + result[idx] as u64 + carry;
            result[idx] = product as u32;
            carry = product >> 32;
        }
        let mut k = ri_base - b.len();
        while carry > 0 {
            let sum = result[k] as u64 + carry;
            result[k] = sum as u32;
            carry = sum >> 32;
            if k == 0 {
                break;
            }
            k -= 1;
        }
    }

    trim_leading_zeros_vec(result)
}
