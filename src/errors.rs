//! Error types produced while configuring or solving a beam.

use thiserror::Error;

/// Error returned when beam or solver parameters are not physically meaningful.
#[derive(Clone, Copy, Debug, Error, PartialEq)]
pub enum ParameterError {
    /// Returned when the beam span is zero, negative or not finite.
    #[error("beam length must be positive (received {length})")]
    NonPositiveLength {
        /// Rejected span in metres.
        length: f64,
    },
    /// Returned when the flexural rigidity is zero, negative or not finite.
    #[error("flexural rigidity must be positive (received {flexural_rigidity})")]
    NonPositiveRigidity {
        /// Rejected flexural rigidity in newton square metres.
        flexural_rigidity: f64,
    },
    /// Returned when the load magnitude is not a finite number.
    #[error("load magnitude must be finite (received {magnitude})")]
    NonFiniteLoad {
        /// Rejected load magnitude in newtons.
        magnitude: f64,
    },
    /// Returned when the load sits outside the span.
    #[error("load position {position} lies outside the span [0, {length}]")]
    LoadOutsideSpan {
        /// Rejected load position in metres.
        position: f64,
        /// Beam span in metres.
        length: f64,
    },
    /// Returned when a named solver setting is out of range.
    #[error("solver setting `{name}` is invalid (received {value})")]
    InvalidSetting {
        /// Name of the offending setting.
        name: &'static str,
        /// Rejected value.
        value: f64,
    },
}

/// Error returned when a load model cannot be evaluated.
#[derive(Clone, Copy, Debug, Error, PartialEq)]
pub enum LoadError {
    /// Returned when the Gaussian spread is zero, negative or not finite.
    #[error("load spread must be positive (received {spread})")]
    NonPositiveSpread {
        /// Rejected spread in metres.
        spread: f64,
    },
    /// Returned when a load integral is requested over zero intervals.
    #[error("load integration needs at least one interval")]
    NoIntervals,
}

/// Error returned when the fixed-step integrator cannot march over a span.
#[derive(Clone, Copy, Debug, Error, PartialEq)]
pub enum IntegrationError {
    /// Returned when the step size is zero, negative or not finite.
    #[error("step size must be positive (received {step})")]
    NonPositiveStep {
        /// Rejected step size.
        step: f64,
    },
    /// Returned when the span runs backwards or has non-finite bounds.
    #[error("integration span [{start}, {end}] is invalid")]
    InvalidSpan {
        /// Start of the span.
        start: f64,
        /// End of the span.
        end: f64,
    },
    /// Returned when the step is too small for the span to be marched.
    #[error("span needs {steps:e} steps, which is more than a march will take")]
    TooManySteps {
        /// Step count the span would need.
        steps: f64,
    },
}

/// Error returned when a deflection curve cannot be produced.
#[derive(Clone, Copy, Debug, Error, PartialEq)]
pub enum SolverError {
    /// Returned when the grid is too coarse for the five-point stencil.
    #[error("central difference grid needs at least 5 points (received {points})")]
    TooFewPoints {
        /// Number of grid points requested.
        points: usize,
    },
    /// Returned when the assembled system cannot be solved.
    #[error("assembled system is singular; check boundary rows and grid size")]
    SingularMatrix,
    /// Returned when the beam or solver parameters are invalid.
    #[error(transparent)]
    Parameters(#[from] ParameterError),
    /// Returned when the load model is invalid.
    #[error(transparent)]
    Load(#[from] LoadError),
    /// Returned when the step integrator rejects its inputs.
    #[error(transparent)]
    Integration(#[from] IntegrationError),
}

/// Error returned when a configuration document cannot be used.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Returned when the document is not valid JSON or has unknown fields.
    #[error("malformed configuration: {0}")]
    Parse(#[from] serde_json::Error),
    /// Returned when the parsed values are out of range.
    #[error("invalid configuration: {0}")]
    Invalid(#[from] ParameterError),
}
