#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

//! Numerical engine for interactive closed-loop control-system analysis.
//!
//! Given a plant transfer function `N(s)/D(s)` and a scalar loop gain `K`,
//! this crate derives everything an interactive visualizer needs to draw:
//!
//! - the unity-feedback closed-loop transfer function ([`closed_loop`]),
//! - the paths traced by the closed-loop poles as the gain sweeps from zero
//!   ([`root_locus`]),
//! - the time response to step, ramp and impulse inputs ([`simulate`] on a
//!   [`StateSpace`] realization),
//! - and the frequency response along the imaginary axis ([`bode`]).
//!
//! Everything is a pure function from inputs to output arrays; there is no
//! shared state, no I/O and no caching, so concurrent use is safe by
//! construction. Rendering, typesetting and input collection are external
//! collaborators that consume the arrays produced here.
//!
//! # Degraded results instead of errors
//!
//! Numerical trouble is reported as data, never as a panic or an `Err`: the
//! root finder returns its best estimate with [`RootSet::converged`] cleared
//! when the iteration budget runs out, and the simulator keeps integrating
//! through overflow and sets [`Trace::diverged`]. The only hard errors are
//! malformed input: see [`Error`].
//!
//! # Example
//!
//! ```
//! use loopscope::{bode, closed_loop, root_locus, Poly};
//!
//! // plant 1/(s^2 + 2s + 1), gain 10
//! let num = Poly::new(&[1.0]);
//! let den = Poly::new(&[1.0, 2.0, 1.0]);
//!
//! let cl = closed_loop(&num, &den, 10.0);
//! assert_eq!(cl.den, Poly::new(&[1.0, 2.0, 11.0]));
//!
//! let locus = root_locus(&num, &den, 100.0, 140);
//! assert_eq!(locus.branches.len(), 2);
//!
//! let fr = bode(&num, &den, 1e-2, 1e2, 250);
//! assert_eq!(fr.frequencies.len(), 250);
//! ```

mod error;
pub use error::{Error, Result};

mod poly;
pub use poly::roots::{durand_kerner, RootSet};
pub use poly::{parse_coefficients, Poly};

mod tf;
pub use tf::{characteristic, closed_loop, ClosedLoop};

mod locus;
pub use locus::{root_locus, RootLocus};

mod ss;
pub use ss::StateSpace;

mod sim;
pub use sim::{simulate, InputKind, Trace};

mod bode;
pub use bode::{bode, BodeTrace};

/// Leading (and displayed) coefficients with an absolute value below this
/// threshold are treated as zero.
pub const COEFF_EPSILON: f64 = 1e-14;

/// The root finder stops once the largest per-root update in an iteration
/// falls below this magnitude.
pub const ROOT_EPSILON: f64 = 1e-10;

/// Iteration budget of the root finder; exhausting it is a soft failure.
pub const MAX_ROOT_ITER: usize = 200;

/// Floor applied to `|H(jw)|` before taking the logarithm, so an exact zero
/// response yields a large negative decibel value instead of `-inf`.
pub const MAG_FLOOR: f64 = 1e-16;

/// Default integration step for [`simulate`].
pub const DEFAULT_DT: f64 = 0.002;
