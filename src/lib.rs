#![warn(clippy::all)]
#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]
#![warn(rustdoc::missing_doc_code_examples)]
#![doc = include_str!("../README.md")]

mod beam;
mod central_difference;
mod curve;
mod errors;
mod load;
mod parameters;
mod rk4;

pub use beam::{
    BeamSolver, DeflectionComparison, Series, CENTRAL_DIFFERENCE_LABEL, DEFLECTION_AXIS_LABEL,
    POSITION_AXIS_LABEL, RUNGE_KUTTA_LABEL,
};
pub use central_difference::{
    solve_central_difference, solve_central_difference_with, LinearSystem, MIN_POINTS, STENCIL,
};
pub use curve::{DeflectionCurve, Sample};
pub use errors::{ConfigError, IntegrationError, LoadError, ParameterError, SolverError};
pub use load::{gaussian_load, total_load, DistributedLoad, GaussianLoad, LoadModel, UniformLoad};
pub use parameters::{BeamConfig, BeamParameters, InitialCondition, SolveStrategy, SolverSettings};
pub use rk4::{integrate, march, rk4_step, solve_runge_kutta, StateVector};
