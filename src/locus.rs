//! Root-locus computation: sweep the loop gain and stitch the closed-loop
//! poles into continuous branches.

use std::cmp::Ordering;

use num::complex::Complex64;

use crate::{characteristic, Poly};

/// Branches of a root locus.
///
/// `branches[b][k]` is the pole tracked by branch `b` at gain `gains[k]`.
/// Every branch has exactly one entry per gain sample. `converged` is the
/// AND over the per-sample root extractions; a cleared flag means at least
/// one sample carries best-effort estimates (see
/// [`RootSet`](crate::RootSet)).
#[derive(Clone, Debug)]
pub struct RootLocus {
    pub gains: Vec<f64>,
    pub branches: Vec<Vec<Complex64>>,
    pub converged: bool,
}

/// Sweep the loop gain linearly over `[0, k_max]` with `samples` inclusive
/// samples (`samples >= 2`) and track the roots of the characteristic
/// polynomial `D + K N` across the sweep.
///
/// A sweep of `k_max = 100` with 140 samples is a reasonable default for
/// interactive use.
///
/// At gain 0 the roots are the open-loop poles; they are sorted by
/// ascending real part and assigned one per branch. At every later sample,
/// each branch (in branch order) greedily claims the unclaimed root nearest
/// to its most recent pole. This first-come-first-served matching is an
/// accepted approximation: two roots crossing near-coincidentally between
/// samples can swap branches. A minimum-weight bipartite assignment would
/// be stronger, but branch identity is cosmetic for plotting.
///
/// The caller must uphold `deg(N) < deg(D)` so the characteristic
/// polynomial keeps degree `deg(D)` at every sample; this is not validated.
#[must_use]
pub fn root_locus(num: &Poly, den: &Poly, k_max: f64, samples: usize) -> RootLocus {
    debug_assert!(samples >= 2, "a sweep needs at least 2 gain samples");
    debug_assert!(k_max >= 0.0);

    let mut gains = Vec::with_capacity(samples);
    let mut branches: Vec<Vec<Complex64>> = Vec::new();
    let mut converged = true;

    for i in 0..samples {
        let k = k_max * i as f64 / (samples - 1) as f64;
        gains.push(k);

        let set = characteristic(num, den, k).roots();
        converged &= set.converged;
        let mut unused = set.roots;

        if i == 0 {
            unused.sort_by(|a, b| a.re.partial_cmp(&b.re).unwrap_or(Ordering::Equal));
            branches = unused
                .into_iter()
                .map(|r| {
                    let mut branch = Vec::with_capacity(samples);
                    branch.push(r);
                    branch
                })
                .collect();
        } else {
            debug_assert_eq!(
                unused.len(),
                branches.len(),
                "characteristic polynomial changed degree mid-sweep"
            );
            for branch in &mut branches {
                let prev = *branch.last().expect("branches are never empty");
                // greedy nearest-neighbor; ties go to the first candidate
                let mut best_j = 0;
                let mut best_d = f64::INFINITY;
                for (j, r) in unused.iter().enumerate() {
                    let d = (r - prev).norm();
                    if d < best_d {
                        best_d = d;
                        best_j = j;
                    }
                }
                branch.push(unused.remove(best_j));
            }
        }
    }

    log::debug!(
        "root locus: {} branches over {} gain samples, converged: {converged}",
        branches.len(),
        gains.len()
    );
    RootLocus {
        gains,
        branches,
        converged,
    }
}
