//! Unity-feedback closed-loop composition.

use crate::Poly;

/// A closed-loop transfer function as a numerator/denominator pair.
#[derive(Clone, Debug, PartialEq)]
pub struct ClosedLoop {
    pub num: Poly,
    pub den: Poly,
}

/// Compose the unity-feedback closed-loop transfer function for plant
/// `N(s)/D(s)` with loop gain `K`:
///
/// ```text
/// T(s) = K N(s) / (D(s) + K N(s))
/// ```
///
/// Both polynomials come back trimmed. The denominator is the
/// characteristic polynomial, so its roots are the closed-loop poles.
///
/// # Examples
///
/// ```
/// use loopscope::{closed_loop, Poly};
///
/// let cl = closed_loop(&Poly::new(&[1.0]), &Poly::new(&[1.0, 2.0, 1.0]), 10.0);
/// assert_eq!(cl.num, Poly::new(&[10.0]));
/// assert_eq!(cl.den, Poly::new(&[1.0, 2.0, 11.0]));
/// ```
#[must_use]
pub fn closed_loop(num: &Poly, den: &Poly, k: f64) -> ClosedLoop {
    ClosedLoop {
        num: num * k,
        den: characteristic(num, den, k),
    }
}

/// The characteristic polynomial `D(s) + K N(s)` of the unity-feedback loop.
///
/// This is the polynomial the root-locus sweep extracts poles from at every
/// gain sample, and the cheap "poles at the current gain only" path an
/// interactive caller can run on every input change.
#[must_use]
pub fn characteristic(num: &Poly, den: &Poly, k: f64) -> Poly {
    den + &(num * k)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn zero_gain_leaves_open_loop_denominator() {
        let num = Poly::new(&[1.0, 3.0]);
        let den = Poly::new(&[1.0, 2.0, 1.0]);
        let cl = closed_loop(&num, &den, 0.0);
        assert!(cl.num.is_zero());
        assert_eq!(cl.den, den);
    }

    #[test]
    fn characteristic_matches_denominator() {
        let num = Poly::new(&[2.0]);
        let den = Poly::new(&[1.0, 0.0, -1.0]);
        let cl = closed_loop(&num, &den, 3.0);
        assert_eq!(cl.den, characteristic(&num, &den, 3.0));
        assert_eq!(cl.den, Poly::new(&[1.0, 0.0, 5.0]));
    }
}
