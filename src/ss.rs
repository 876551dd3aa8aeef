//! Transfer-function to state-space conversion.

use nalgebra::{DMatrix, DVector};
use num::complex::Complex64;

use crate::{Error, Poly, Result};

/// A single-input single-output state-space model
///
/// ```text
/// x' = A x + B u
/// y  = C x + D u
/// ```
///
/// in controllable canonical form, where `n` is the denominator degree.
/// The output row `C` is stored as a vector. Built once per conversion,
/// never mutated.
#[derive(Clone, Debug, PartialEq)]
pub struct StateSpace {
    pub a: DMatrix<f64>,
    pub b: DVector<f64>,
    pub c: DVector<f64>,
    /// Direct feedthrough, nonzero only for biproper transfer functions.
    pub d: f64,
}

impl StateSpace {
    /// Build the controllable canonical realization of `N(s)/D(s)`.
    ///
    /// With the denominator normalized to
    /// `D(s) = s^n + a_1 s^(n-1) + ... + a_n` and the numerator left-padded
    /// to `[b_0, ..., b_n]`:
    ///
    /// - `A` has 1s on the superdiagonal and `[-a_n, ..., -a_1]` as its
    ///   last row,
    /// - `B = [0, ..., 0, 1]^T`,
    /// - `D = b_0`,
    /// - `C_j = b_(n-j) - a_(n-j) * D`.
    ///
    /// So `C (sI - A)^-1 B + D` reproduces `N(s)/D(s)` exactly (see
    /// [`transfer_at`](Self::transfer_at)).
    ///
    /// The transfer function must be proper: `deg(N) <= deg(D)`.
    ///
    /// # Errors
    /// [`Error::InvalidOrder`] when the denominator has degree 0.
    pub fn from_tf(num: &Poly, den: &Poly) -> Result<Self> {
        let n = den.degree();
        if n < 1 {
            return Err(Error::InvalidOrder(n));
        }
        debug_assert!(num.degree() <= n, "improper transfer function");

        // normalize so the denominator is monic
        let d0 = den.coeffs()[0];
        let den: Vec<f64> = den.coeffs().iter().map(|c| c / d0).collect();
        let num: Vec<f64> = num.coeffs().iter().map(|c| c / d0).collect();

        // left-pad the numerator so it aligns with powers s^n .. s^0
        let mut padded = vec![0.0; n + 1];
        padded[n + 1 - num.len()..].copy_from_slice(&num);

        let d_ff = padded[0];

        let mut a = DMatrix::zeros(n, n);
        for i in 0..n - 1 {
            a[(i, i + 1)] = 1.0;
        }
        for j in 0..n {
            a[(n - 1, j)] = -den[n - j];
        }

        let mut b = DVector::zeros(n);
        b[n - 1] = 1.0;

        let mut c = DVector::zeros(n);
        for j in 0..n {
            c[j] = padded[n - j] - den[n - j] * d_ff;
        }

        Ok(Self { a, b, c, d: d_ff })
    }

    /// The state dimension `n`.
    #[must_use]
    pub fn order(&self) -> usize {
        self.a.nrows()
    }

    /// Evaluate the model's transfer function `C (sI - A)^-1 B + D` at a
    /// complex point.
    ///
    /// Returns `None` when `sI - A` is singular, i.e. when `s` is a pole.
    #[must_use]
    pub fn transfer_at(&self, s: Complex64) -> Option<Complex64> {
        let n = self.order();
        let mut m = DMatrix::from_fn(n, n, |i, j| Complex64::new(-self.a[(i, j)], 0.0));
        for i in 0..n {
            m[(i, i)] += s;
        }
        let resolvent = m.try_inverse()?;
        let x = resolvent * self.b.map(|v| Complex64::new(v, 0.0));

        let mut y = Complex64::new(self.d, 0.0);
        for i in 0..n {
            y += self.c[i] * x[i];
        }
        Some(y)
    }
}
