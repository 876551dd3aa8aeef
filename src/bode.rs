//! Frequency-response evaluation along the imaginary axis.

use num::complex::Complex64;

use crate::{Poly, MAG_FLOOR};

/// A frequency-response trace: three same-length series.
#[derive(Clone, Debug)]
pub struct BodeTrace {
    /// Angular frequencies, log-spaced over the requested range.
    pub frequencies: Vec<f64>,
    /// `20 log10 |H(jw)|`, floored at [`MAG_FLOOR`] before the logarithm.
    pub magnitudes_db: Vec<f64>,
    /// `arg H(jw)` in degrees, range `(-180, 180]`.
    pub phases_deg: Vec<f64>,
}

/// Evaluate `H(jw) = N(jw)/D(jw)` over a log-spaced grid of `samples`
/// frequencies (`samples >= 2`) between `w_min` and `w_max`
/// (`0 < w_min < w_max`).
///
/// A sweep over `w_min = 1e-2`, `w_max = 1e2` with 250 samples is a
/// reasonable default for interactive use.
///
/// A frequency that is exactly a root of `D` makes `H` overflow through the
/// complex division; the magnitude floor only guards the zero-response
/// direction.
///
/// # Examples
///
/// ```
/// use loopscope::{bode, Poly};
///
/// // 1/(s + 1) at its corner frequency: -3 dB, -45 degrees
/// let fr = bode(&Poly::new(&[1.0]), &Poly::new(&[1.0, 1.0]), 1.0, 10.0, 2);
/// assert!((fr.magnitudes_db[0] + 3.01).abs() < 0.01);
/// assert!((fr.phases_deg[0] + 45.0).abs() < 0.01);
/// ```
#[must_use]
pub fn bode(num: &Poly, den: &Poly, w_min: f64, w_max: f64, samples: usize) -> BodeTrace {
    debug_assert!(samples >= 2, "a sweep needs at least 2 frequency samples");
    debug_assert!(w_min > 0.0 && w_max > w_min);

    let log_min = w_min.log10();
    let log_max = w_max.log10();

    let mut frequencies = Vec::with_capacity(samples);
    let mut magnitudes_db = Vec::with_capacity(samples);
    let mut phases_deg = Vec::with_capacity(samples);

    for i in 0..samples {
        let w = 10.0_f64.powf(log_min + (log_max - log_min) * i as f64 / (samples - 1) as f64);
        let s = Complex64::new(0.0, w);
        let h = num.eval(s) / den.eval(s);

        frequencies.push(w);
        magnitudes_db.push(20.0 * h.norm().max(MAG_FLOOR).log10());
        phases_deg.push(h.arg().to_degrees());
    }

    BodeTrace {
        frequencies,
        magnitudes_db,
        phases_deg,
    }
}
