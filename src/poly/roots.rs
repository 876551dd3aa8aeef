//! Simultaneous root extraction via the Durand–Kerner method.

use std::f64::consts::{FRAC_PI_2, TAU};

use itertools::Itertools;
use num::complex::Complex64;

use crate::{Poly, MAX_ROOT_ITER, ROOT_EPSILON};

/// The outcome of a root-finding run.
///
/// Non-convergence is a soft failure: `roots` always holds the best
/// available estimates, and `converged` tells the caller whether the
/// iteration settled within its budget. Root order is an implementation
/// artifact, not a contract; callers that need stable ordering across calls
/// must impose it themselves (the root-locus tracker does).
#[derive(Clone, Debug)]
pub struct RootSet {
    pub roots: Vec<Complex64>,
    pub converged: bool,
    /// Iterations actually performed.
    pub iterations: usize,
}

impl Poly {
    /// Find all complex roots of the polynomial with the default tolerances
    /// ([`ROOT_EPSILON`], [`MAX_ROOT_ITER`]).
    ///
    /// Use [`durand_kerner`] directly for control over the tolerances.
    ///
    /// # Examples
    ///
    /// ```
    /// use loopscope::Poly;
    ///
    /// // s^2 + 3s + 2 = (s + 1)(s + 2)
    /// let set = Poly::new(&[1.0, 3.0, 2.0]).roots();
    /// assert!(set.converged);
    /// assert_eq!(set.roots.len(), 2);
    /// ```
    #[must_use]
    pub fn roots(&self) -> RootSet {
        durand_kerner(self, ROOT_EPSILON, MAX_ROOT_ITER)
    }
}

/// Find all roots of a polynomial of degree `n` at once by Durand–Kerner
/// simultaneous fixed-point iteration.
///
/// The polynomial is normalized to monic and `n` guesses are seeded
/// uniformly on a circle of radius `1 + max|coefficient|` (over the
/// non-leading monic coefficients). Each iteration updates every estimate
/// from the previous iteration's full root set; the run stops once the
/// largest per-root update falls below `epsilon`, or after `max_iter`
/// iterations with [`RootSet::converged`] cleared.
///
/// The seed angles are rotated off the real axis by `π/(2n)`: a seed set
/// that is exactly real (as uniform spacing produces for even `n`) would
/// keep the whole iteration pinned to the real line for real polynomials
/// with no real roots.
///
/// A degree-0 polynomial yields an empty, converged root set.
///
/// Should two estimates ever coincide exactly, the update divides by a
/// zero complex value and the affected estimates degrade to NaN; the run
/// then ends non-converged. The rotated seeds make this unreachable for
/// polynomials with distinct roots, and it is tolerated rather than
/// checked, in line with the crate's soft-failure policy.
#[must_use]
pub fn durand_kerner(p: &Poly, epsilon: f64, max_iter: usize) -> RootSet {
    let n = p.degree();
    if n == 0 {
        return RootSet {
            roots: vec![],
            converged: true,
            iterations: 0,
        };
    }

    let lead = p.coeffs()[0];
    let monic = Poly::new(&p.coeffs().iter().map(|c| c / lead).collect_vec());

    let radius = 1.0
        + monic.coeffs()[1..]
            .iter()
            .fold(0.0_f64, |acc, c| acc.max(c.abs()));
    let offset = FRAC_PI_2 / n as f64;
    let mut roots = (0..n)
        .map(|k| Complex64::from_polar(radius, TAU * k as f64 / n as f64 + offset))
        .collect_vec();

    let mut converged = false;
    let mut iterations = max_iter;
    for it in 0..max_iter {
        let mut max_delta = 0.0_f64;
        let next = (0..n)
            .map(|i| {
                let mut denom = Complex64::new(1.0, 0.0);
                for j in 0..n {
                    if i != j {
                        denom *= roots[i] - roots[j];
                    }
                }
                let delta = monic.eval(roots[i]) / denom;
                max_delta = max_delta.max(delta.norm());
                roots[i] - delta
            })
            .collect_vec();
        roots = next;
        if max_delta < epsilon {
            converged = true;
            iterations = it + 1;
            break;
        }
    }

    if converged {
        log::debug!("durand-kerner settled after {iterations} iterations");
    } else {
        log::warn!("durand-kerner did not converge within {max_iter} iterations, returning best estimate");
    }
    RootSet {
        roots,
        converged,
        iterations,
    }
}
