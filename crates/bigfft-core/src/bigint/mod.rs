//! The big-integer magnitude primitive (C1): an immutable sign + big-endian
//! `u32`-limb magnitude, with schoolbook and Toom-Cook-3 multiplication as
//! fallbacks below the FFT threshold.
//!
//! Internal limb storage mirrors `java.math.BigInteger`'s `int[] mag` layout
//! (most-significant limb first, no leading zero limb except for canonical
//! zero) because the FFT packing/unpacking algorithm in [`crate::fft`] is
//! defined in terms of that layout.

mod magnitude;
mod schoolbook;
mod toom_cook;

pub use magnitude::{BigInt, Sign};
pub(crate) use magnitude::bit_length_of;
pub(crate) use schoolbook::multiply_schoolbook;
pub(crate) use toom_cook::multiply_toom_cook_3;
