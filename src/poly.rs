use std::fmt::{self, Display};
use std::ops::{Add, Mul};
use std::str::FromStr;

use num::complex::Complex64;

use crate::{Error, COEFF_EPSILON};

pub mod roots;

/// A real polynomial as a list of coefficients of terms of descending degree.
///
/// Index 0 holds the coefficient of the highest power, so
/// `Poly::new(&[1.0, 2.0, 1.0])` is `s^2 + 2s + 1`. Constructors normalize:
/// leading coefficients with an absolute value below [`COEFF_EPSILON`] are
/// dropped, always leaving at least one coefficient. The zero polynomial is
/// the single coefficient `[0.0]`.
///
/// The API is value-style: every transform returns a new polynomial.
///
/// # Examples
///
/// ```
/// use loopscope::Poly;
///
/// let p = Poly::new(&[0.0, 0.0, 1.0, 2.0]);
/// assert_eq!(p.coeffs(), &[1.0, 2.0]);
/// assert_eq!(p.degree(), 1);
/// assert_eq!(p.to_string(), "s + 2");
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Poly(Vec<f64>);

impl Poly {
    /// Create a new polynomial from coefficients of descending degree.
    ///
    /// An empty slice yields the zero polynomial.
    #[must_use]
    pub fn new(coeffs: &[f64]) -> Self {
        Self(coeffs.to_owned()).normalize()
    }

    pub(crate) fn from_vec(coeffs: Vec<f64>) -> Self {
        Self(coeffs).normalize()
    }

    /// The coefficients, highest power first.
    ///
    /// Never empty: the zero polynomial is `&[0.0]`.
    #[must_use]
    pub fn coeffs(&self) -> &[f64] {
        &self.0
    }

    /// The degree of the polynomial.
    ///
    /// The zero polynomial has degree 0 by this crate's convention, as it is
    /// stored as a single zero coefficient.
    #[must_use]
    pub fn degree(&self) -> usize {
        debug_assert!(self.is_normalized());
        self.0.len() - 1
    }

    #[must_use]
    pub fn is_zero(&self) -> bool {
        debug_assert!(self.is_normalized());
        self.0.len() == 1 && self.0[0].abs() < COEFF_EPSILON
    }

    /// Checks the trimming invariant: at least one coefficient, and no
    /// leading coefficient below the threshold unless it is the only one.
    fn is_normalized(&self) -> bool {
        match self.0.len() {
            0 => false,
            1 => true,
            _ => self.0[0].abs() >= COEFF_EPSILON,
        }
    }

    /// Removes leading almost-zero coefficients.
    fn normalize(self) -> Self {
        if self.0.is_empty() {
            return Self(vec![0.0]);
        }
        if self.is_normalized() {
            return self;
        }
        let first = self
            .0
            .iter()
            .position(|c| c.abs() >= COEFF_EPSILON)
            .unwrap_or(self.0.len() - 1);
        let ret = Self(self.0[first..].to_vec());

        // post-condition: polynomial is now normalized
        debug_assert!(ret.is_normalized());
        ret
    }

    /// Evaluate the polynomial at a complex point using Horner's method.
    ///
    /// ```
    /// use loopscope::Poly;
    /// use num::complex::Complex64;
    ///
    /// let p = Poly::new(&[1.0, 2.0, 1.0]);
    /// assert_eq!(p.eval(Complex64::new(1.0, 0.0)), Complex64::new(4.0, 0.0));
    /// ```
    #[must_use]
    pub fn eval(&self, x: Complex64) -> Complex64 {
        let mut acc = Complex64::new(0.0, 0.0);
        for &c in &self.0 {
            acc = acc * x + c;
        }
        acc
    }
}

impl Add<&Poly> for &Poly {
    type Output = Poly;

    /// Polynomial addition, aligning the constant terms.
    ///
    /// The shorter operand is conceptually padded with leading zeros; the
    /// sum is trimmed.
    fn add(self, rhs: &Poly) -> Poly {
        let len = self.0.len().max(rhs.0.len());
        let mut out = vec![0.0; len];
        for (slot, c) in out.iter_mut().rev().zip(self.0.iter().rev()) {
            *slot += c;
        }
        for (slot, c) in out.iter_mut().rev().zip(rhs.0.iter().rev()) {
            *slot += c;
        }
        Poly::from_vec(out)
    }
}

impl Add for Poly {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        &self + &rhs
    }
}

impl Mul<f64> for &Poly {
    type Output = Poly;

    /// Scale every coefficient by a real scalar.
    fn mul(self, rhs: f64) -> Poly {
        Poly::from_vec(self.0.iter().map(|c| c * rhs).collect())
    }
}

impl Mul<f64> for Poly {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        &self * rhs
    }
}

/// Renders the polynomial in `s` with signed terms, e.g. `s^2 - 2s + 1`.
///
/// A term is dropped iff its coefficient's absolute value is below
/// [`COEFF_EPSILON`]; a unit coefficient is omitted unless the exponent is 0;
/// exponent 1 renders as a bare `s`. An empty term list renders as `0`.
/// Typesetting (superscripts, fraction bars) is the presentation layer's job.
impl Display for Poly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = self.0.len() - 1;
        let mut first = true;
        for (i, &a) in self.0.iter().enumerate() {
            if a.abs() < COEFF_EPSILON {
                continue;
            }
            let pow = n - i;
            let abs = a.abs();

            let coeff = if pow != 0 && (abs - 1.0).abs() < COEFF_EPSILON {
                String::new()
            } else {
                format!("{abs}")
            };
            let var = match pow {
                0 => String::new(),
                1 => "s".to_owned(),
                _ => format!("s^{pow}"),
            };

            if first {
                write!(f, "{}{coeff}{var}", if a < 0.0 { "-" } else { "" })?;
                first = false;
            } else {
                write!(f, " {} {coeff}{var}", if a < 0.0 { "-" } else { "+" })?;
            }
        }
        if first {
            write!(f, "0")?;
        }
        Ok(())
    }
}

/// Parse a bracketed or bare comma-separated coefficient list.
///
/// Accepts `"[1, 2, 1]"` and `"1, 2, 1"` alike. Empty tokens are skipped, so
/// a trailing comma is tolerated. An all-whitespace body parses to an empty
/// sequence, which callers must reject before constructing a [`Poly`] (the
/// [`FromStr`] impl does exactly that).
///
/// # Errors
/// [`Error::Parse`] if any token is not a finite real number.
pub fn parse_coefficients(text: &str) -> crate::Result<Vec<f64>> {
    let t = text.trim();
    let body = t
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .unwrap_or(t);
    if body.trim().is_empty() {
        return Ok(vec![]);
    }
    body.split(',')
        .map(str::trim)
        .filter(|tok| !tok.is_empty())
        .map(|tok| {
            tok.parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| Error::Parse(tok.to_owned()))
        })
        .collect()
}

impl FromStr for Poly {
    type Err = Error;

    /// Parse a polynomial from a coefficient list such as `"[1, 2, 1]"`.
    ///
    /// # Errors
    /// [`Error::Parse`] for non-finite tokens, [`Error::EmptyInput`] when
    /// the list has no coefficients at all.
    fn from_str(s: &str) -> crate::Result<Self> {
        let coeffs = parse_coefficients(s)?;
        if coeffs.is_empty() {
            return Err(Error::EmptyInput("polynomial"));
        }
        Ok(Self::new(&coeffs))
    }
}

#[cfg(test)]
mod test {
    use num::complex::Complex64;

    use super::*;

    #[test]
    fn new_trims_leading_zeros() {
        let p = Poly::new(&[0.0, 1e-15, 3.0, 4.0]);
        assert_eq!(p.coeffs(), &[3.0, 4.0]);
    }

    #[test]
    fn trim_is_idempotent() {
        let p = Poly::new(&[0.0, 0.0, 5.0]);
        assert_eq!(Poly::new(p.coeffs()), p);
    }

    #[test]
    fn zero_poly_is_single_coefficient() {
        assert_eq!(Poly::new(&[]).coeffs(), &[0.0]);
        assert_eq!(Poly::new(&[0.0, 0.0]).coeffs(), &[0.0]);
        assert!(Poly::new(&[0.0]).is_zero());
    }

    #[test]
    fn add_aligns_by_constant_term() {
        let a = Poly::new(&[1.0, 2.0, 3.0]);
        let b = Poly::new(&[1.0, 1.0]);
        assert_eq!(&a + &b, Poly::new(&[1.0, 3.0, 4.0]));
    }

    #[test]
    fn add_cancellation_trims() {
        let a = Poly::new(&[1.0, 2.0]);
        let b = Poly::new(&[-1.0, 0.0]);
        assert_eq!((&a + &b).coeffs(), &[2.0]);
    }

    #[test]
    fn scale_distributes_over_eval() {
        let p = Poly::new(&[2.0, -1.0, 0.5]);
        let z = Complex64::new(1.5, -2.0);
        let lhs = (&p * 3.0).eval(z);
        let rhs = p.eval(z) * 3.0;
        assert!((lhs - rhs).norm() < 1e-12);
    }

    #[test]
    fn add_distributes_over_eval() {
        let a = Poly::new(&[1.0, 0.0, 2.0]);
        let b = Poly::new(&[3.0, -1.0]);
        let z = Complex64::new(-0.5, 1.0);
        let lhs = (&a + &b).eval(z);
        let rhs = a.eval(z) + b.eval(z);
        assert!((lhs - rhs).norm() < 1e-12);
    }

    #[test]
    fn eval_horner() {
        // (s + 1)^2 at s = i: (i + 1)^2 = 2i
        let p = Poly::new(&[1.0, 2.0, 1.0]);
        let y = p.eval(Complex64::new(0.0, 1.0));
        assert!((y - Complex64::new(0.0, 2.0)).norm() < 1e-12);
    }

    #[test]
    fn display_signed_terms() {
        assert_eq!(Poly::new(&[1.0, 2.0, 1.0]).to_string(), "s^2 + 2s + 1");
        assert_eq!(Poly::new(&[-1.0, 0.0, 3.0]).to_string(), "-s^2 + 3");
        assert_eq!(Poly::new(&[2.5, -1.0]).to_string(), "2.5s - 1");
        assert_eq!(Poly::new(&[1.0]).to_string(), "1");
        assert_eq!(Poly::new(&[0.0]).to_string(), "0");
    }

    #[test]
    fn display_drops_tiny_terms() {
        assert_eq!(Poly::new(&[1.0, 1e-15, 2.0]).to_string(), "s^2 + 2");
    }

    #[test]
    fn parse_bracketed_and_bare() {
        assert_eq!(parse_coefficients("[1, 2, 1]").unwrap(), vec![1.0, 2.0, 1.0]);
        assert_eq!(parse_coefficients("1,2,1").unwrap(), vec![1.0, 2.0, 1.0]);
        assert_eq!(parse_coefficients(" [ -3.5 , 1e2 ] ").unwrap(), vec![-3.5, 100.0]);
    }

    #[test]
    fn parse_empty_body() {
        assert!(parse_coefficients("").unwrap().is_empty());
        assert!(parse_coefficients("[ ]").unwrap().is_empty());
        assert!(matches!(
            "[]".parse::<Poly>(),
            Err(Error::EmptyInput("polynomial"))
        ));
    }

    #[test]
    fn parse_rejects_non_finite_tokens() {
        assert!(matches!(parse_coefficients("[1, x, 3]"), Err(Error::Parse(_))));
        assert!(matches!(parse_coefficients("[1, inf]"), Err(Error::Parse(_))));
        assert!(matches!(parse_coefficients("[NaN]"), Err(Error::Parse(_))));
    }

    #[test]
    fn parse_roundtrip() {
        let p: Poly = "[1, 2, 1]".parse().unwrap();
        assert_eq!(p.coeffs(), &[1.0, 2.0, 1.0]);
    }
}
