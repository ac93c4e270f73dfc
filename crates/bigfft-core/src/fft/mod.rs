//! FFT-based multiplication: the complex vector kernel (C2), the
//! roots-of-unity cache (C3), the FFT engine (C4), and the multiplier
//! dispatch that packs magnitudes into FFT vectors and back (C5).

mod complex;
mod dispatch;
mod engine;
mod roots;

pub(crate) use dispatch::{multiply_fft_mag, square_fft_mag};
