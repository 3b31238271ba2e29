use beamx::{BeamConfig, BeamSolver, DeflectionComparison, SolverError};

/// Everything the report needs: the inputs and both independent results.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisSummary {
    /// Inputs that generated the results, exposed for reporting.
    pub config: BeamConfig,
    /// Curves from both methods.
    pub comparison: DeflectionComparison,
}

/// Run both deflection methods for the configured beam.
///
/// The Runge-Kutta march follows
/// <https://en.wikipedia.org/wiki/Runge%E2%80%93Kutta_methods> and the direct
/// solve follows <https://en.wikipedia.org/wiki/Finite_difference_coefficient>.
/// A failure in one method is carried in the summary rather than returned.
pub fn run_analysis(config: &BeamConfig) -> Result<AnalysisSummary, SolverError> {
    let solver = BeamSolver::from_config(config)?;
    Ok(AnalysisSummary {
        config: *config,
        comparison: solver.compare(),
    })
}
