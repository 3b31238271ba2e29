//! Beam solver tying the load model to both numerical methods.

use log::{info, warn};
use serde::Serialize;

use crate::central_difference::solve_central_difference_with;
use crate::curve::DeflectionCurve;
use crate::errors::SolverError;
use crate::load::{GaussianLoad, LoadModel};
use crate::parameters::{BeamConfig, BeamParameters, SolverSettings};
use crate::rk4::solve_runge_kutta;

/// Series label for the Runge-Kutta curve.
pub const RUNGE_KUTTA_LABEL: &str = "Runge-Kutta Method";

/// Series label for the central-difference curve.
pub const CENTRAL_DIFFERENCE_LABEL: &str = "Central Difference Method";

/// Axis label for positions along the span.
pub const POSITION_AXIS_LABEL: &str = "Beam Length (m)";

/// Axis label for deflections.
pub const DEFLECTION_AXIS_LABEL: &str = "Deflection (m)";

/// Independent results of both methods for one beam.
///
/// Each method fails on its own. Nothing here reconciles the two curves.
#[derive(Clone, Debug, PartialEq)]
pub struct DeflectionComparison {
    /// Curve from Runge-Kutta marching.
    pub runge_kutta: Result<DeflectionCurve, SolverError>,
    /// Curve from the central-difference system.
    pub central_difference: Result<DeflectionCurve, SolverError>,
}

/// A labelled curve ready for plotting or export.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct Series<'a> {
    /// Legend label.
    pub label: &'static str,
    /// The sampled curve.
    pub curve: &'a DeflectionCurve,
}

impl DeflectionComparison {
    /// Labelled series for every method that succeeded, Runge-Kutta first.
    #[must_use]
    pub fn series(&self) -> Vec<Series<'_>> {
        [
            (RUNGE_KUTTA_LABEL, &self.runge_kutta),
            (CENTRAL_DIFFERENCE_LABEL, &self.central_difference),
        ]
        .into_iter()
        .filter_map(|(label, result)| result.as_ref().ok().map(|curve| Series { label, curve }))
        .collect()
    }
}

/// Computes beam deflection curves with both numerical methods.
///
/// # Examples
/// ```
/// use beamx::BeamSolver;
///
/// let solver = BeamSolver::default();
/// let curve = solver.solve_runge_kutta().expect("default beam solves");
/// assert_eq!(curve.len(), 101);
/// assert_eq!(curve.first().map(|sample| sample.deflection), Some(0.0));
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BeamSolver {
    /// Beam and load description.
    beam: BeamParameters,
    /// Numerical settings for both methods.
    settings: SolverSettings,
}

impl BeamSolver {
    /// Create a solver after validating the beam and the settings.
    ///
    /// # Errors
    ///
    /// Returns [`SolverError::Parameters`] when either input is out of range.
    pub fn new(beam: BeamParameters, settings: SolverSettings) -> Result<Self, SolverError> {
        beam.validate()?;
        settings.validate()?;
        Ok(Self { beam, settings })
    }

    /// Create a solver from a loaded configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SolverError::Parameters`] when the configuration is out of range.
    pub fn from_config(config: &BeamConfig) -> Result<Self, SolverError> {
        Self::new(config.beam, config.settings)
    }

    /// Beam and load description.
    #[must_use]
    pub fn beam(&self) -> &BeamParameters {
        &self.beam
    }

    /// Numerical settings.
    #[must_use]
    pub fn settings(&self) -> &SolverSettings {
        &self.settings
    }

    /// Gaussian point load of the given spread at the configured position.
    ///
    /// # Errors
    ///
    /// Returns [`SolverError::Load`] when `spread` is not strictly positive.
    pub fn point_load(&self, spread: f64) -> Result<LoadModel, SolverError> {
        let load = GaussianLoad::new(self.beam.load_magnitude, self.beam.load_position, spread)?;
        Ok(load.into())
    }

    /// Deflection curve by Runge-Kutta marching.
    ///
    /// # Errors
    ///
    /// Returns [`SolverError`] when the load or step is invalid or the
    /// shooting correction is singular.
    pub fn solve_runge_kutta(&self) -> Result<DeflectionCurve, SolverError> {
        let load = self.point_load(self.settings.rk4_spread)?;
        solve_runge_kutta(
            &self.beam,
            &load,
            self.settings.rk4_step,
            self.settings.initial_condition,
        )
    }

    /// Deflection curve by the central-difference system.
    ///
    /// # Errors
    ///
    /// Returns [`SolverError`] when the grid is too coarse, the load is invalid
    /// or the system is singular.
    pub fn solve_central_difference(&self) -> Result<DeflectionCurve, SolverError> {
        let load = self.point_load(self.settings.central_spread)?;
        solve_central_difference_with(
            self.settings.grid_points,
            self.beam.length,
            &load,
            self.beam.flexural_rigidity,
            self.settings.strategy,
        )
    }

    /// Run both methods independently.
    #[must_use]
    pub fn compare(&self) -> DeflectionComparison {
        info!(
            "solving {} m beam, EI = {:e} N·m², P = {} N at {} m",
            self.beam.length,
            self.beam.flexural_rigidity,
            self.beam.load_magnitude,
            self.beam.load_position
        );
        let runge_kutta = self.solve_runge_kutta();
        if let Err(error) = &runge_kutta {
            warn!("{RUNGE_KUTTA_LABEL} failed: {error}");
        }
        let central_difference = self.solve_central_difference();
        if let Err(error) = &central_difference {
            warn!("{CENTRAL_DIFFERENCE_LABEL} failed: {error}");
        }
        DeflectionComparison {
            runge_kutta,
            central_difference,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ParameterError;

    #[test]
    fn invalid_inputs_are_rejected_up_front() {
        let beam = BeamParameters {
            length: -1.0,
            ..BeamParameters::default()
        };
        let error = BeamSolver::new(beam, SolverSettings::default()).expect_err("rejected");
        assert!(matches!(
            error,
            SolverError::Parameters(ParameterError::NonPositiveLength { .. })
        ));

        let settings = SolverSettings {
            rk4_spread: 0.0,
            ..SolverSettings::default()
        };
        let error = BeamSolver::new(BeamParameters::default(), settings).expect_err("rejected");
        assert!(matches!(
            error,
            SolverError::Parameters(ParameterError::InvalidSetting {
                name: "rk4_spread",
                ..
            })
        ));
    }

    #[test]
    fn one_failing_method_leaves_the_other_intact() {
        let settings = SolverSettings {
            grid_points: 4,
            ..SolverSettings::default()
        };
        let solver = BeamSolver::new(BeamParameters::default(), settings).expect("valid inputs");
        let comparison = solver.compare();
        assert_eq!(
            comparison.central_difference,
            Err(SolverError::TooFewPoints { points: 4 })
        );
        assert!(comparison.runge_kutta.is_ok());

        let series = comparison.series();
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].label, RUNGE_KUTTA_LABEL);
    }

    #[test]
    fn series_are_labelled_in_method_order() {
        let comparison = BeamSolver::default().compare();
        let labels: Vec<&str> = comparison.series().iter().map(|series| series.label).collect();
        assert_eq!(labels, vec![RUNGE_KUTTA_LABEL, CENTRAL_DIFFERENCE_LABEL]);
    }
}
