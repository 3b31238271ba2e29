//! Beam, load and solver parameters.

use serde::{Deserialize, Serialize};

use crate::errors::{ConfigError, ParameterError};

/// Physical description of a simply supported beam carrying one point load.
///
/// Values are in SI units. The defaults describe a 10 m steel beam with a
/// 100 mm square section and a 1 kN load at midspan.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BeamParameters {
    /// Span in metres.
    pub length: f64,
    /// Flexural rigidity `E·I` in newton square metres.
    pub flexural_rigidity: f64,
    /// Point load magnitude in newtons.
    pub load_magnitude: f64,
    /// Distance of the load from the left support in metres.
    pub load_position: f64,
}

impl Default for BeamParameters {
    fn default() -> Self {
        Self {
            length: 10.0,
            flexural_rigidity: 2.0e11 * 8.333e-6,
            load_magnitude: 1_000.0,
            load_position: 5.0,
        }
    }
}

impl BeamParameters {
    /// Check that the parameters describe a physical beam.
    ///
    /// # Errors
    ///
    /// Returns the first [`ParameterError`] found, checking the span, the
    /// rigidity, the load magnitude and the load position in that order.
    ///
    /// # Examples
    /// ```
    /// use beamx::{BeamParameters, ParameterError};
    ///
    /// let beam = BeamParameters { load_position: 12.0, ..BeamParameters::default() };
    /// assert!(matches!(beam.validate(), Err(ParameterError::LoadOutsideSpan { .. })));
    /// ```
    pub fn validate(&self) -> Result<(), ParameterError> {
        if !(self.length.is_finite() && self.length > 0.0) {
            return Err(ParameterError::NonPositiveLength {
                length: self.length,
            });
        }
        if !(self.flexural_rigidity.is_finite() && self.flexural_rigidity > 0.0) {
            return Err(ParameterError::NonPositiveRigidity {
                flexural_rigidity: self.flexural_rigidity,
            });
        }
        if !self.load_magnitude.is_finite() {
            return Err(ParameterError::NonFiniteLoad {
                magnitude: self.load_magnitude,
            });
        }
        if !(0.0..=self.length).contains(&self.load_position) {
            return Err(ParameterError::LoadOutsideSpan {
                position: self.load_position,
                length: self.length,
            });
        }
        Ok(())
    }

    /// Flexural rigidity of a solid rectangular section, `E·b·h³/12`.
    ///
    /// # Examples
    /// ```
    /// use beamx::BeamParameters;
    ///
    /// let ei = BeamParameters::rectangular_section(2.0e11, 0.1, 0.1);
    /// assert!((ei - 2.0e11 * 8.333e-6).abs() / ei < 1.0e-4);
    /// ```
    #[must_use]
    pub fn rectangular_section(elastic_modulus: f64, width: f64, height: f64) -> f64 {
        elastic_modulus * width * height.powi(3) / 12.0
    }
}

/// Initial state used by the Runge-Kutta solver at the left support.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InitialCondition {
    /// All four state components start at zero.
    ///
    /// This pins the slope and shear at the left support as well as the
    /// deflection and moment, so the far end is free to deflect. It reproduces
    /// the reference curve and is a known approximation of simple supports.
    #[default]
    AtRest,
    /// Deflection and moment vanish at both supports.
    ///
    /// The free slope and shear at the left support are found by shooting.
    SimplySupported,
}

/// Linear solver used for the central-difference system.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SolveStrategy {
    /// Dense LU factorisation with partial pivoting.
    #[default]
    Dense,
    /// Gaussian elimination restricted to the five-diagonal band.
    Banded,
}

/// Numerical settings for both solvers.
///
/// The two methods take independent load spreads. They only converge to the
/// same curve when the spreads agree.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SolverSettings {
    /// Gaussian spread used by the Runge-Kutta solver in metres.
    pub rk4_spread: f64,
    /// Runge-Kutta step size in metres.
    pub rk4_step: f64,
    /// Runge-Kutta starting state.
    pub initial_condition: InitialCondition,
    /// Gaussian spread used by the central-difference solver in metres.
    pub central_spread: f64,
    /// Number of central-difference grid points, including both ends.
    pub grid_points: usize,
    /// Linear solver for the central-difference system.
    pub strategy: SolveStrategy,
}

impl Default for SolverSettings {
    fn default() -> Self {
        Self {
            rk4_spread: 0.05,
            rk4_step: 0.1,
            initial_condition: InitialCondition::AtRest,
            central_spread: 0.1,
            grid_points: 101,
            strategy: SolveStrategy::Dense,
        }
    }
}

impl SolverSettings {
    /// Check the spreads and the step size.
    ///
    /// The grid size is left to the central-difference solver, which reports
    /// a coarse grid as a solver error.
    ///
    /// # Errors
    ///
    /// Returns [`ParameterError::InvalidSetting`] naming the first setting that
    /// is zero, negative or not finite.
    pub fn validate(&self) -> Result<(), ParameterError> {
        let checks = [
            ("rk4_spread", self.rk4_spread),
            ("rk4_step", self.rk4_step),
            ("central_spread", self.central_spread),
        ];
        for (name, value) in checks {
            if !(value.is_finite() && value > 0.0) {
                return Err(ParameterError::InvalidSetting { name, value });
            }
        }
        Ok(())
    }
}

/// Complete input for one run: the beam and the solver settings.
///
/// Every field is optional in JSON and falls back to its default.
///
/// # Examples
/// ```
/// use beamx::BeamConfig;
///
/// let config = BeamConfig::from_json(r#"{ "beam": { "load_position": 2.5 } }"#)
///     .expect("valid configuration");
/// assert_eq!(config.beam.load_position, 2.5);
/// assert_eq!(config.beam.length, 10.0);
/// assert_eq!(config.settings.grid_points, 101);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BeamConfig {
    /// Beam and load description.
    pub beam: BeamParameters,
    /// Numerical settings.
    pub settings: SolverSettings,
}

impl BeamConfig {
    /// Parse and validate a JSON configuration document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON or unknown fields and
    /// [`ConfigError::Invalid`] when the values fail validation.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate both the beam and the settings.
    ///
    /// # Errors
    ///
    /// Returns the first [`ParameterError`] found.
    pub fn validate(&self) -> Result<(), ParameterError> {
        self.beam.validate()?;
        self.settings.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        BeamConfig::default()
            .validate()
            .expect("default configuration is valid");
    }

    #[test]
    fn invalid_beam_values_are_rejected() {
        let beam = BeamParameters {
            length: 0.0,
            ..BeamParameters::default()
        };
        assert_eq!(
            beam.validate(),
            Err(ParameterError::NonPositiveLength { length: 0.0 })
        );

        let beam = BeamParameters {
            flexural_rigidity: -1.0,
            ..BeamParameters::default()
        };
        assert_eq!(
            beam.validate(),
            Err(ParameterError::NonPositiveRigidity {
                flexural_rigidity: -1.0
            })
        );

        let beam = BeamParameters {
            load_magnitude: f64::NAN,
            ..BeamParameters::default()
        };
        assert!(matches!(
            beam.validate(),
            Err(ParameterError::NonFiniteLoad { .. })
        ));

        let beam = BeamParameters {
            load_position: -0.1,
            ..BeamParameters::default()
        };
        assert!(matches!(
            beam.validate(),
            Err(ParameterError::LoadOutsideSpan { .. })
        ));
    }

    #[test]
    fn load_at_either_support_is_allowed() {
        for load_position in [0.0, 10.0] {
            let beam = BeamParameters {
                load_position,
                ..BeamParameters::default()
            };
            beam.validate().expect("load on a support is valid");
        }
    }

    #[test]
    fn settings_name_the_offending_value() {
        let settings = SolverSettings {
            rk4_step: 0.0,
            ..SolverSettings::default()
        };
        assert_eq!(
            settings.validate(),
            Err(ParameterError::InvalidSetting {
                name: "rk4_step",
                value: 0.0
            })
        );
    }

    #[test]
    fn config_parses_enums_and_rejects_unknown_fields() {
        let config = BeamConfig::from_json(
            r#"{ "settings": { "initial_condition": "simply_supported", "strategy": "banded" } }"#,
        )
        .expect("valid configuration");
        assert_eq!(
            config.settings.initial_condition,
            InitialCondition::SimplySupported
        );
        assert_eq!(config.settings.strategy, SolveStrategy::Banded);

        let error = BeamConfig::from_json(r#"{ "beam": { "span": 3.0 } }"#)
            .expect_err("unknown field rejected");
        assert!(matches!(error, ConfigError::Parse(_)));

        let error = BeamConfig::from_json(r#"{ "settings": { "central_spread": -0.1 } }"#)
            .expect_err("negative spread rejected");
        assert!(matches!(
            error,
            ConfigError::Invalid(ParameterError::InvalidSetting {
                name: "central_spread",
                ..
            })
        ));
    }
}
