//! Decimal digit-block ingestion (C6) and the powers-of-ten cache that backs
//! it (C7): recursive divide-and-conquer parsing of a decimal digit string
//! into a [`crate::BigInt`] magnitude, dispatching the large multiplications
//! at the top of the recursion tree into [`crate::multiply`].
//!
//! The three input representations (bytes, UTF-16 units, chars) share one
//! inner parse routine over a minimal capability set rather than each
//! getting an independent parser. [`source`] supplies that capability trait
//! (monomorphized per adapter, so there is no runtime dispatch inside the
//! recursive hot loop); [`parse`] supplies the shared routine and the three
//! public entry points.

mod parse;
mod pow10;
mod source;

pub use parse::{parse_big_integer_bytes, parse_big_integer_chars, parse_big_integer_utf16};
