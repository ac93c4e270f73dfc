//! Recursive divide-and-conquer decimal parsing (C6): turns a window of
//! decimal digits into a [`BigInt`] by splitting the window in half,
//! recursively parsing each half, and combining them as
//! `left · 10^|right| + right`. The split point is always chosen so
//! `|right|` is a multiple of [`SCALAR_BASE_CASE_LEN`] times a power of two,
//! which is exactly the set of exponents [`super::pow10::pow10`] memoises.
//!
//! Below [`SCALAR_BASE_CASE_LEN`] digits the window is parsed directly into a
//! `u64` via a Horner loop; between that and [`RECURSION_THRESHOLD`] digits
//! it's accumulated as a sequence of base-`10^18` chunks without recursing.

use crate::bigint::BigInt;
use crate::config::digits::{
    MAX_DIGIT_LEN, PARALLEL_SPLIT_THRESHOLD, RECURSION_THRESHOLD, SCALAR_BASE_CASE_LEN,
};
use crate::error::BigIntError;
use crate::multiply::multiply;

use super::pow10::pow10;
use super::source::{ByteDigits, CharDigits, DigitSource, Utf16Digits};

/// Parses `len` digits starting at `offset`, all of which fit in a `u64`
/// (`len <= SCALAR_BASE_CASE_LEN`), via a plain Horner loop.
fn parse_scalar<S: DigitSource>(src: &S, offset: usize, len: usize) -> u64 {
    let mut acc: u64 = 0;
    for i in 0..len {
        acc = acc * 10 + u64::from(src.digit_unchecked(offset + i));
    }
    acc
}

/// Parses `len` digits (`SCALAR_BASE_CASE_LEN < len <= RECURSION_THRESHOLD`)
/// as a sequence of base-`10^SCALAR_BASE_CASE_LEN` chunks, accumulated
/// left-to-right without recursing.
fn parse_chunked_scalar<S: DigitSource>(
    src: &S,
    offset: usize,
    len: usize,
) -> Result<BigInt, BigIntError> {
    let first_chunk_len = len % SCALAR_BASE_CASE_LEN;
    let first_chunk_len = if first_chunk_len == 0 {
        SCALAR_BASE_CASE_LEN
    } else {
        first_chunk_len
    };

    let mut acc = BigInt::from_u64(parse_scalar(src, offset, first_chunk_len));
    let base = BigInt::from_u64(10u64.pow(SCALAR_BASE_CASE_LEN as u32));

    let mut pos = offset + first_chunk_len;
    let end = offset + len;
    while pos < end {
        let chunk = parse_scalar(src, pos, SCALAR_BASE_CASE_LEN);
        acc = multiply(&acc, &base, false)?.add(&BigInt::from_u64(chunk));
        pos += SCALAR_BASE_CASE_LEN;
    }
    Ok(acc)
}

/// Splits a window of `len` digits into `(left_len, right_len)` such that
/// `right_len` is `SCALAR_BASE_CASE_LEN · 2^i` for some `i >= 0`, and
/// `right_len` is the largest such value not exceeding `len / 2`. This
/// guarantees every `combine` call below can look up `pow10(right_len)` from
/// the memoised cache instead of computing an arbitrary power of ten.
fn split_lengths(len: usize) -> (usize, usize) {
    debug_assert!(len > SCALAR_BASE_CASE_LEN);
    let half = len / 2;
    let mut right_len = SCALAR_BASE_CASE_LEN;
    while right_len * 2 <= half {
        right_len *= 2;
    }
    (len - right_len, right_len)
}

fn combine(left: BigInt, right: BigInt, right_len: usize) -> Result<BigInt, BigIntError> {
    let shift = pow10(right_len)?;
    let shifted = multiply(&left, &shift, false)?;
    Ok(shifted.add(&right))
}

/// Shared recursive parse routine over any [`DigitSource`], dispatching the
/// scalar base case, the chunked-scalar mid case, or a recursive split
/// (optionally run in parallel via `rayon::join` once the window is wide
/// enough to be worth the thread hop, per [`PARALLEL_SPLIT_THRESHOLD`]).
fn parse_window<S>(src: &S, offset: usize, len: usize, parallel: bool) -> Result<BigInt, BigIntError>
where
    S: DigitSource,
{
    if len <= SCALAR_BASE_CASE_LEN {
        return Ok(BigInt::from_u64(parse_scalar(src, offset, len)));
    }
    if len <= RECURSION_THRESHOLD {
        return parse_chunked_scalar(src, offset, len);
    }

    let (left_len, right_len) = split_lengths(len);

    if parallel && len >= PARALLEL_SPLIT_THRESHOLD {
        let (left, right) = rayon::join(
            || parse_window(src, offset, left_len, parallel),
            || parse_window(src, offset + left_len, right_len, parallel),
        );
        combine(left?, right?, right_len)
    } else {
        let left = parse_window(src, offset, left_len, parallel)?;
        let right = parse_window(src, offset + left_len, right_len, parallel)?;
        combine(left, right, right_len)
    }
}

fn check_length(length: usize) -> Result<(), BigIntError> {
    if length > MAX_DIGIT_LEN {
        return Err(BigIntError::LengthExceeded {
            len: length,
            max: MAX_DIGIT_LEN,
        });
    }
    Ok(())
}

/// Parses `length` decimal digits starting at `offset` within `input`,
/// returning their value as a non-negative [`BigInt`].
pub fn parse_big_integer_bytes(
    input: &[u8],
    offset: usize,
    length: usize,
) -> Result<BigInt, BigIntError> {
    check_length(length)?;
    let window = &input[offset..offset + length];
    let src = ByteDigits::new(window);
    src.validate()?;
    parse_window(&src, 0, length, true)
}

/// UTF-16 counterpart of [`parse_big_integer_bytes`].
pub fn parse_big_integer_utf16(
    input: &[u16],
    offset: usize,
    length: usize,
) -> Result<BigInt, BigIntError> {
    check_length(length)?;
    let window = &input[offset..offset + length];
    let src = Utf16Digits::new(window);
    src.validate()?;
    parse_window(&src, 0, length, true)
}

/// `char`-slice counterpart of [`parse_big_integer_bytes`].
pub fn parse_big_integer_chars(
    input: &[char],
    offset: usize,
    length: usize,
) -> Result<BigInt, BigIntError> {
    check_length(length)?;
    let window = &input[offset..offset + length];
    let src = CharDigits::new(window);
    src.validate()?;
    parse_window(&src, 0, length, true)
}
