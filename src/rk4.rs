//! Classical fourth-order Runge-Kutta marching.
//!
//! The beam equation `EI·y'''' = w(x)` is rewritten as a first-order system in
//! the state `(y, y', y'', y''')` and advanced across the span in fixed steps:
//!
//! ```text
//! k1 = f(x, Y)
//! k2 = f(x + h/2, Y + h·k1/2)
//! k3 = f(x + h/2, Y + h·k2/2)
//! k4 = f(x + h, Y + h·k3)
//! Y' = Y + h/6·(k1 + 2k2 + 2k3 + k4)
//! ```
//!
//! There is no error control. The step is the only accuracy knob.

use log::{debug, info};
use nalgebra::{Matrix2, SVector, Vector2, Vector4};

use crate::curve::{DeflectionCurve, Sample};
use crate::errors::{IntegrationError, SolverError};
use crate::load::DistributedLoad;
use crate::parameters::{BeamParameters, InitialCondition};

/// Deflection and its first three derivatives, `(y, y', y'', y''')`.
pub type StateVector = Vector4<f64>;

/// Relative slack used when deciding whether the step divides the span.
const STEP_FIT_TOLERANCE: f64 = 1.0e-9;

/// Advance `state` by one Runge-Kutta step of size `h` starting at `x`.
#[must_use]
pub fn rk4_step<const N: usize, F>(
    ode: &F,
    x: f64,
    state: &SVector<f64, N>,
    h: f64,
) -> SVector<f64, N>
where
    F: Fn(f64, &SVector<f64, N>) -> SVector<f64, N>,
{
    let half = 0.5 * h;
    let k1 = ode(x, state);
    let k2 = ode(x + half, &(state + k1 * half));
    let k3 = ode(x + half, &(state + k2 * half));
    let k4 = ode(x + h, &(state + k3 * h));
    state + (k1 + k2 * 2.0 + k3 * 2.0 + k4) * (h / 6.0)
}

/// Largest number of steps a single march will take.
const MAX_STEPS: usize = 10_000_000;

/// Number of steps needed to cover `[start, end]` with steps no longer than `step`.
///
/// A span that is a whole multiple of `step` up to rounding noise takes exactly
/// that many steps; otherwise the count is rounded up. Any non-empty span takes
/// at least one step.
fn step_count(start: f64, end: f64, step: f64) -> Result<usize, IntegrationError> {
    let ratio = (end - start) / step;
    let nearest = ratio.round();
    let steps = if nearest >= 1.0 && (ratio - nearest).abs() <= STEP_FIT_TOLERANCE * nearest {
        nearest
    } else {
        ratio.ceil()
    };
    if !(steps <= MAX_STEPS as f64) {
        return Err(IntegrationError::TooManySteps { steps });
    }
    Ok(steps as usize)
}

/// March `initial` from `start` to `end` and return every sampled state.
///
/// Samples sit at `start + i·step`, and the final step is shortened so the last
/// sample lands exactly on `end`. The first entry is `(start, initial)`.
///
/// # Errors
///
/// Returns [`IntegrationError::NonPositiveStep`] when `step` is zero, negative
/// or not finite, and [`IntegrationError::InvalidSpan`] when `end < start` or
/// either bound is not finite. Returns [`IntegrationError::TooManySteps`] when
/// `step` is so small against the span that the march would not finish.
pub fn march<const N: usize, F>(
    initial: SVector<f64, N>,
    ode: F,
    start: f64,
    end: f64,
    step: f64,
) -> Result<Vec<(f64, SVector<f64, N>)>, IntegrationError>
where
    F: Fn(f64, &SVector<f64, N>) -> SVector<f64, N>,
{
    if !(step.is_finite() && step > 0.0) {
        return Err(IntegrationError::NonPositiveStep { step });
    }
    if !(start.is_finite() && end.is_finite()) || end < start {
        return Err(IntegrationError::InvalidSpan { start, end });
    }

    let steps = step_count(start, end, step)?;
    debug!("marching over [{start}, {end}] in {steps} steps of {step}");

    let mut trajectory = Vec::with_capacity(steps + 1);
    let mut state = initial;
    let mut x = start;
    trajectory.push((x, state));
    for i in 1..=steps {
        let next = if i == steps {
            end
        } else {
            start + i as f64 * step
        };
        state = rk4_step(&ode, x, &state, next - x);
        x = next;
        trajectory.push((x, state));
    }
    Ok(trajectory)
}

/// Integrate a first-order system and record its first component.
///
/// This is the deflection for the beam system. The returned curve has
/// `⌈(end − start)/step⌉ + 1` samples in increasing position order.
///
/// # Errors
///
/// Returns [`IntegrationError`] under the same conditions as [`march`].
///
/// # Examples
/// ```
/// use beamx::{integrate, StateVector};
///
/// // y'''' = 24 with a resting start gives y = x⁴, which RK4 reproduces.
/// let ode = |_x: f64, y: &StateVector| StateVector::new(y[1], y[2], y[3], 24.0);
/// let curve = integrate(StateVector::zeros(), ode, 0.0, 1.0, 0.25).expect("valid span");
/// assert_eq!(curve.len(), 5);
/// let tip = curve.last().expect("non-empty");
/// assert!((tip.deflection - 1.0).abs() < 1.0e-12);
/// ```
pub fn integrate<const N: usize, F>(
    initial: SVector<f64, N>,
    ode: F,
    start: f64,
    end: f64,
    step: f64,
) -> Result<DeflectionCurve, IntegrationError>
where
    F: Fn(f64, &SVector<f64, N>) -> SVector<f64, N>,
{
    let trajectory = march(initial, ode, start, end, step)?;
    Ok(trajectory
        .into_iter()
        .map(|(x, state)| Sample::new(x, state[0]))
        .collect())
}

/// Final state of a march, used by the shooting correction.
fn end_state<F>(
    initial: StateVector,
    ode: F,
    length: f64,
    step: f64,
) -> Result<StateVector, SolverError>
where
    F: Fn(f64, &StateVector) -> StateVector,
{
    let trajectory = march(initial, ode, 0.0, length, step)?;
    Ok(trajectory.last().map_or(initial, |&(_, state)| state))
}

/// Starting state with zero deflection and moment that also leaves zero
/// deflection and moment at the far support.
///
/// The beam system is linear, so the far-end state is the loaded response from
/// rest plus the unloaded responses to a unit slope and a unit shear. Solving
/// the resulting 2×2 system gives the slope and shear at the left support.
fn simply_supported_start<L>(
    beam: &BeamParameters,
    load: &L,
    step: f64,
) -> Result<StateVector, SolverError>
where
    L: DistributedLoad + ?Sized,
{
    let loaded = |x: f64, y: &StateVector| euler_bernoulli(beam, load, x, y);
    let unloaded = |_x: f64, y: &StateVector| StateVector::new(y[1], y[2], y[3], 0.0);

    let from_rest = end_state(StateVector::zeros(), loaded, beam.length, step)?;
    let slope = StateVector::new(0.0, 1.0, 0.0, 0.0);
    let shear = StateVector::new(0.0, 0.0, 0.0, 1.0);
    let unit_slope = end_state(slope, &unloaded, beam.length, step)?;
    let unit_shear = end_state(shear, &unloaded, beam.length, step)?;

    let influence = Matrix2::new(unit_slope[0], unit_shear[0], unit_slope[2], unit_shear[2]);
    let residual = Vector2::new(-from_rest[0], -from_rest[2]);
    let correction = influence
        .lu()
        .solve(&residual)
        .ok_or(SolverError::SingularMatrix)?;
    debug!(
        "shooting correction: slope {:+.6e}, shear {:+.6e}",
        correction[0], correction[1]
    );
    Ok(StateVector::new(0.0, correction[0], 0.0, correction[1]))
}

/// Right-hand side of the beam system, `(y', y'', y''', w(x)/EI)`.
fn euler_bernoulli<L>(beam: &BeamParameters, load: &L, x: f64, y: &StateVector) -> StateVector
where
    L: DistributedLoad + ?Sized,
{
    StateVector::new(y[1], y[2], y[3], load.intensity(x) / beam.flexural_rigidity)
}

/// Deflection curve of the beam by Runge-Kutta marching from the left support.
///
/// With [`InitialCondition::AtRest`] the march starts from `(0, 0, 0, 0)`, so
/// nothing pins the deflection at the right support.
///
/// # Errors
///
/// Returns [`SolverError::Parameters`] for an invalid beam,
/// [`SolverError::Integration`] for an invalid step and
/// [`SolverError::SingularMatrix`] when the shooting correction cannot be
/// solved.
pub fn solve_runge_kutta<L>(
    beam: &BeamParameters,
    load: &L,
    step: f64,
    initial_condition: InitialCondition,
) -> Result<DeflectionCurve, SolverError>
where
    L: DistributedLoad + ?Sized,
{
    beam.validate()?;
    let initial = match initial_condition {
        InitialCondition::AtRest => StateVector::zeros(),
        InitialCondition::SimplySupported => simply_supported_start(beam, load, step)?,
    };
    let curve = integrate(
        initial,
        |x: f64, y: &StateVector| euler_bernoulli(beam, load, x, y),
        0.0,
        beam.length,
        step,
    )?;
    info!(
        "runge-kutta: {} samples, peak {:?}",
        curve.len(),
        curve.peak().map(|sample| sample.deflection)
    );
    Ok(curve)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::load::{GaussianLoad, UniformLoad};

    #[test]
    fn step_count_handles_rounding_noise() {
        assert_eq!(step_count(0.0, 10.0, 0.1), Ok(100));
        assert_eq!(step_count(0.0, 1.0, 0.3), Ok(4));
        assert_eq!(step_count(2.0, 2.0, 0.5), Ok(0));
    }

    #[test]
    fn span_shorter_than_the_step_takes_one_step() {
        assert_eq!(step_count(0.0, 1.0e-12, 1.0), Ok(1));

        let ode = |_x: f64, _y: &SVector<f64, 1>| SVector::<f64, 1>::new(1.0);
        let curve =
            integrate(SVector::<f64, 1>::zeros(), ode, 0.0, 1.0e-12, 1.0).expect("valid span");
        assert_eq!(curve.len(), 2);
        assert_eq!(curve.last().expect("non-empty").position, 1.0e-12);
    }

    #[test]
    fn final_step_is_clamped_to_the_span() {
        let ode = |_x: f64, _y: &SVector<f64, 1>| SVector::<f64, 1>::new(1.0);
        let curve =
            integrate(SVector::<f64, 1>::zeros(), ode, 0.0, 1.0, 0.3).expect("valid span");
        let positions: Vec<f64> = curve.positions().collect();
        assert_eq!(positions.len(), 5);
        assert_eq!(positions[4], 1.0);
        assert_relative_eq!(curve.last().expect("non-empty").deflection, 1.0, epsilon = 1.0e-12);
    }

    #[test]
    fn exponential_growth_is_fourth_order_accurate() {
        let ode = |_x: f64, y: &SVector<f64, 1>| *y;
        let error = |step: f64| {
            let curve =
                integrate(SVector::<f64, 1>::new(1.0), ode, 0.0, 1.0, step).expect("valid span");
            (curve.last().expect("non-empty").deflection - 1.0_f64.exp()).abs()
        };
        let ratio = error(0.1) / error(0.05);
        assert!(ratio > 14.0 && ratio < 18.0, "observed ratio {ratio}");
    }

    #[test]
    fn invalid_inputs_are_rejected() {
        let ode = |_x: f64, y: &SVector<f64, 1>| *y;
        let zero = SVector::<f64, 1>::zeros();
        assert_eq!(
            integrate(zero, ode, 0.0, 1.0, 0.0),
            Err(IntegrationError::NonPositiveStep { step: 0.0 })
        );
        assert_eq!(
            integrate(zero, ode, 1.0, 0.0, 0.1),
            Err(IntegrationError::InvalidSpan { start: 1.0, end: 0.0 })
        );
    }

    #[test]
    fn tiny_steps_are_rejected_instead_of_overflowing() {
        let ode = |_x: f64, y: &SVector<f64, 1>| *y;
        let zero = SVector::<f64, 1>::zeros();
        assert!(matches!(
            integrate(zero, ode, 0.0, 1.0, 1.0e-300),
            Err(IntegrationError::TooManySteps { .. })
        ));

        let beam = BeamParameters::default();
        let load = UniformLoad { intensity: 100.0 };
        assert!(matches!(
            solve_runge_kutta(&beam, &load, 1.0e-12, InitialCondition::AtRest),
            Err(SolverError::Integration(IntegrationError::TooManySteps { .. }))
        ));
    }

    #[test]
    fn uniform_load_from_rest_is_a_quartic() {
        let beam = BeamParameters::default();
        let load = UniformLoad { intensity: 100.0 };
        let curve =
            solve_runge_kutta(&beam, &load, 0.5, InitialCondition::AtRest).expect("solves");
        for sample in curve.samples() {
            let expected = 100.0 * sample.position.powi(4) / (24.0 * beam.flexural_rigidity);
            assert_relative_eq!(
                sample.deflection,
                expected,
                epsilon = 1.0e-12,
                max_relative = 1.0e-9
            );
        }
    }

    #[test]
    fn shooting_pins_both_supports() {
        let beam = BeamParameters::default();
        let load = GaussianLoad::new(beam.load_magnitude, beam.load_position, 0.05)
            .expect("valid spread");
        let curve = solve_runge_kutta(&beam, &load, 0.1, InitialCondition::SimplySupported)
            .expect("solves");
        let peak = curve.peak().expect("non-empty");
        assert_eq!(curve.first().expect("non-empty").deflection, 0.0);
        assert!(curve.last().expect("non-empty").deflection.abs() < 1.0e-9 * peak.deflection.abs());
        assert!((peak.position - 5.0).abs() < 0.11);

        // PL³/48EI for a point load at midspan.
        let closed_form = 1_000.0 * 10.0_f64.powi(3) / (48.0 * beam.flexural_rigidity);
        assert_relative_eq!(peak.deflection.abs(), closed_form, max_relative = 0.01);
    }
}
