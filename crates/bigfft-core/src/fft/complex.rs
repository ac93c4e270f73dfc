//! In-place complex arithmetic kernel (C2).
//!
//! Every operation here is straight-line real arithmetic with no unexpected
//! re-association: the FFT's accuracy proof depends on these being exactly
//! the textbook formulas for complex multiply/add, not an algebraically
//! equivalent but differently-rounded rewrite.

use num_complex::Complex64;

/// Extension trait adding the fused operations the FFT butterflies need to
/// [`Complex64`], so the engine can read as straight-line butterfly math
/// instead of manual `(re, im)` tuple bookkeeping.
pub(crate) trait ComplexOps {
    fn copy_to(self, dst: &mut Complex64);
    fn add(self, other: Complex64) -> Complex64;
    fn sub(self, other: Complex64) -> Complex64;
    /// `self · conj(other)`.
    fn mul_conj(self, other: Complex64) -> Complex64;
    /// `self · conj(other) · i`.
    fn mul_conj_i(self, other: Complex64) -> Complex64;
    /// `self · other · i`.
    fn mul_by_i_and(self, other: Complex64) -> Complex64;
    /// `self + other · i`.
    fn add_times_i(self, other: Complex64) -> Complex64;
    /// `self − other · i`.
    fn sub_times_i(self, other: Complex64) -> Complex64;
    fn square(self) -> Complex64;
    /// Multiplies both components by `2^n` exactly (via exponent adjustment,
    /// never by repeated floating multiplication).
    fn scale_by_pow2(self, n: i32) -> Complex64;
}

impl ComplexOps for Complex64 {
    #[inline]
    fn copy_to(self, dst: &mut Complex64) {
        dst.re = self.re;
        dst.im = self.im;
    }

    #[inline]
    fn add(self, other: Complex64) -> Complex64 {
        Complex64::new(self.re + other.re, self.im + other.im)
    }

    #[inline]
    fn sub(self, other: Complex64) -> Complex64 {
        Complex64::new(self.re - other.re, self.im - other.im)
    }

    #[inline]
    fn mul_conj(self, other: Complex64) -> Complex64 {
        // self * conj(other) = (a+bi)(c-di) = (ac+bd) + (bc-ad)i
        Complex64::new(
            self.re * other.re + self.im * other.im,
            self.im * other.re - self.re * other.im,
        )
    }

    #[inline]
    fn mul_conj_i(self, other: Complex64) -> Complex64 {
        // (self * conj(other)) * i = rotate the mul_conj result by +90deg.
        let z = self.mul_conj(other);
        Complex64::new(-z.im, z.re)
    }

    #[inline]
    fn mul_by_i_and(self, other: Complex64) -> Complex64 {
        // self * other * i.
        let z = self * other;
        Complex64::new(-z.im, z.re)
    }

    #[inline]
    fn add_times_i(self, other: Complex64) -> Complex64 {
        // self + other * i = (a - d) + (b + c)i for self=a+bi, other=c+di.
        Complex64::new(self.re - other.im, self.im + other.re)
    }

    #[inline]
    fn sub_times_i(self, other: Complex64) -> Complex64 {
        Complex64::new(self.re + other.im, self.im - other.re)
    }

    #[inline]
    fn square(self) -> Complex64 {
        Complex64::new(
            self.re * self.re - self.im * self.im,
            2.0 * self.re * self.im,
        )
    }

    #[inline]
    fn scale_by_pow2(self, n: i32) -> Complex64 {
        let factor = f64::from_bits(((1023 + n) as u64) << 52);
        Complex64::new(self.re * factor, self.im * factor)
    }
}
