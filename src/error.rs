use thiserror::Error;

/// The top-level error type for this crate.
///
/// Only malformed input is an error. Numerical non-convergence and
/// divergence are reported as degraded results instead, see
/// [`RootSet::converged`](crate::RootSet) and
/// [`Trace::diverged`](crate::Trace).
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// Coefficient text contained a token that is not a finite real number.
    #[error("invalid coefficient list: {0:?} is not a finite number")]
    Parse(String),

    /// State-space conversion needs a denominator of degree at least 1.
    #[error("denominator degree must be at least 1, got {0}")]
    InvalidOrder(usize),

    /// An empty coefficient list was supplied where a polynomial is required.
    #[error("{0} must have at least one coefficient")]
    EmptyInput(&'static str),
}

pub type Result<T> = std::result::Result<T, Error>;
