//! Fixed-step time-domain simulation of state-space models.

use nalgebra::DVector;

use crate::StateSpace;

/// The standard test inputs the simulator can drive a model with.
///
/// A closed enumeration instead of input-kind strings, so an unrecognized
/// kind cannot silently fall back to anything.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputKind {
    /// `u(t) = 1` for all `t`.
    Step,
    /// `u(t) = t`.
    Ramp,
    /// `u(t) = 0` with an initial-state jump `x(0) += B`. This is the
    /// unit-area approximation of a Dirac impulse, exact only in the limit
    /// of the step size.
    Impulse,
}

impl InputKind {
    fn amplitude(self, t: f64) -> f64 {
        match self {
            Self::Step => 1.0,
            Self::Ramp => t,
            Self::Impulse => 0.0,
        }
    }
}

/// A simulation trace: output samples against time samples, same length.
///
/// `diverged` is set when any output sample is non-finite. The trace still
/// carries every sample; whether divergence is fatal is the caller's call.
#[derive(Clone, Debug)]
pub struct Trace {
    pub times: Vec<f64>,
    pub outputs: Vec<f64>,
    pub diverged: bool,
}

/// One classic 4th-order Runge-Kutta step for `x' = f(x, t)`.
///
/// Stage times `t, t + h/2, t + h/2, t + h`, weights `1/6, 1/3, 1/3, 1/6`.
fn rk4_step<F>(f: &F, x: &DVector<f64>, t: f64, h: f64) -> DVector<f64>
where
    F: Fn(&DVector<f64>, f64) -> DVector<f64>,
{
    let k1 = f(x, t);
    let k2 = f(&(x + &k1 * (h / 2.0)), t + h / 2.0);
    let k3 = f(&(x + &k2 * (h / 2.0)), t + h / 2.0);
    let k4 = f(&(x + &k3 * h), t + h);
    x + (k1 + k2 * 2.0 + k3 * 2.0 + k4) * (h / 6.0)
}

/// Simulate `x' = A x + B u(t)`, `y = C x + D u(t)` from a zero initial
/// state under one of the standard test inputs, with a fixed step `dt`
/// (commonly [`DEFAULT_DT`](crate::DEFAULT_DT)).
///
/// Samples are recorded at `t = k * dt` for `k = 0..=max(2, floor(t_final / dt))`,
/// each before the state advances past it.
///
/// There is no stability check and no adaptive stepping: a stiff or
/// unstable model diverges silently, flagged on [`Trace::diverged`] and
/// logged, never raised.
#[must_use]
pub fn simulate(model: &StateSpace, input: InputKind, t_final: f64, dt: f64) -> Trace {
    debug_assert!(t_final > 0.0);
    debug_assert!(dt > 0.0);

    let mut x = DVector::zeros(model.order());
    if input == InputKind::Impulse {
        x += &model.b;
    }

    let f = |x: &DVector<f64>, t: f64| &model.a * x + &model.b * input.amplitude(t);

    let steps = ((t_final / dt).floor() as usize).max(2);
    let mut times = Vec::with_capacity(steps + 1);
    let mut outputs = Vec::with_capacity(steps + 1);
    let mut diverged = false;

    for k in 0..=steps {
        let t = k as f64 * dt;
        let y = model.c.dot(&x) + model.d * input.amplitude(t);
        if !diverged && !y.is_finite() {
            diverged = true;
            log::warn!("simulation diverged at t = {t}");
        }
        times.push(t);
        outputs.push(y);
        x = rk4_step(&f, &x, t, dt);
    }

    Trace {
        times,
        outputs,
        diverged,
    }
}

#[cfg(test)]
mod test {
    use approx::assert_relative_eq;

    use super::*;
    use crate::Poly;

    fn first_order() -> StateSpace {
        // 1/(s + 1)
        StateSpace::from_tf(&Poly::new(&[1.0]), &Poly::new(&[1.0, 1.0])).unwrap()
    }

    #[test]
    fn step_response_of_first_order_lag() {
        // y(t) = 1 - exp(-t)
        let trace = simulate(&first_order(), InputKind::Step, 5.0, 0.002);
        assert!(!trace.diverged);
        assert_eq!(trace.times.len(), trace.outputs.len());
        assert_eq!(trace.times[0], 0.0);
        assert_eq!(trace.outputs[0], 0.0);

        let last = *trace.outputs.last().unwrap();
        assert_relative_eq!(last, 1.0 - (-5.0_f64).exp(), epsilon = 1e-6);
        assert!((last - 1.0).abs() < 0.01);
    }

    #[test]
    fn ramp_response_tracks_with_lag() {
        // y(t) = t - 1 + exp(-t)
        let trace = simulate(&first_order(), InputKind::Ramp, 4.0, 0.002);
        let last = *trace.outputs.last().unwrap();
        assert_relative_eq!(last, 4.0 - 1.0 + (-4.0_f64).exp(), epsilon = 1e-6);
    }

    #[test]
    fn impulse_response_decays_from_unity() {
        // y(t) = exp(-t), via the initial-state jump
        let trace = simulate(&first_order(), InputKind::Impulse, 3.0, 0.002);
        assert_relative_eq!(trace.outputs[0], 1.0, epsilon = 1e-12);
        let last = *trace.outputs.last().unwrap();
        assert_relative_eq!(last, (-3.0_f64).exp(), epsilon = 1e-6);
    }

    #[test]
    fn harmonic_oscillator_holds_amplitude_over_one_period() {
        // 1/(s^2 + 1) driven by an impulse: y(t) = sin(t)
        let model = StateSpace::from_tf(&Poly::new(&[1.0]), &Poly::new(&[1.0, 0.0, 1.0])).unwrap();
        let period = 2.0 * std::f64::consts::PI;
        let trace = simulate(&model, InputKind::Impulse, period, 0.002);
        for (t, y) in trace.times.iter().zip(&trace.outputs) {
            assert_relative_eq!(*y, t.sin(), epsilon = 1e-6);
        }
    }

    #[test]
    fn short_horizons_still_produce_at_least_three_samples() {
        let trace = simulate(&first_order(), InputKind::Step, 0.001, 0.002);
        assert_eq!(trace.times.len(), 3);
    }

    #[test]
    fn unstable_model_diverges_without_panicking() {
        let _ = simple_logger::init_with_level(log::Level::Debug);
        // 1/(s - 30): fast exponential growth overflows within the horizon
        let model = StateSpace::from_tf(&Poly::new(&[1.0]), &Poly::new(&[1.0, -30.0])).unwrap();
        let trace = simulate(&model, InputKind::Step, 30.0, 0.002);
        assert!(trace.diverged);
        assert_eq!(trace.times.len(), trace.outputs.len());
    }
}
