//! # bigfft-core
//!
//! Arbitrary-precision big-integer multiplication backed by a right-angle
//! (weighted) FFT convolution, with schoolbook and Toom-Cook-3 fallbacks
//! below the sizes where the transform pays for itself, plus a recursive
//! decimal digit-ingestion pipeline for building [`BigInt`] values directly
//! from digit text without an intermediate `&str`/`String` allocation.
//!
//! ## Multiplication
//!
//! [`multiply`] picks schoolbook, Toom-Cook-3, or FFT automatically based on
//! operand bit-length; [`square`] specializes the FFT path to a single
//! forward transform; [`multiply_fft`] forces the FFT path directly.
//!
//! ```
//! use bigfft_core::{multiply, BigInt};
//!
//! let a = BigInt::from_u64(123456789);
//! let b = BigInt::from_u64(987654321);
//! let product = multiply(&a, &b, false).unwrap();
//! assert_eq!(product, BigInt::from_u64(121932631112635269));
//! ```
//!
//! ## Digit ingestion
//!
//! [`parse_big_integer_bytes`], [`parse_big_integer_utf16`], and
//! [`parse_big_integer_chars`] parse a window of decimal digits directly into
//! a [`BigInt`], using the same FFT multiplier internally once the input is
//! wide enough to need it.

mod bigint;
pub mod config;
mod digits;
mod error;
mod fft;
mod multiply;

pub use bigint::{BigInt, Sign};
pub use digits::{parse_big_integer_bytes, parse_big_integer_chars, parse_big_integer_utf16};
pub use error::BigIntError;
pub use multiply::{multiply, multiply_fft, square};
