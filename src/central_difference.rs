//! Direct solution of the discretised beam equation.
//!
//! On a uniform grid the fourth derivative is approximated by the five-point
//! stencil `(y[i-2] − 4y[i-1] + 6y[i] − 4y[i+1] + y[i+2]) / dx⁴`, which turns
//! `EI·y'''' = w` into one banded linear system `A·y = b` with
//! `b = w·dx⁴/EI`.
//!
//! Rows 0, 1, N−2 and N−1 are replaced by identity rows with a zero right-hand
//! side. This forces zero deflection at both supports and at their neighbours,
//! which over-constrains the beam compared with a two-condition simply
//! supported formulation. The reference curves depend on it, so it is kept.

use log::{debug, info};
use nalgebra::{DMatrix, DVector};

use crate::curve::DeflectionCurve;
use crate::errors::{ParameterError, SolverError};
use crate::load::DistributedLoad;
use crate::parameters::SolveStrategy;

/// Coefficients of the fourth-difference stencil.
pub const STENCIL: [f64; 5] = [1.0, -4.0, 6.0, -4.0, 1.0];

/// Smallest grid that leaves at least one interior stencil row.
pub const MIN_POINTS: usize = 5;

/// Number of diagonals on each side of the main diagonal.
const HALF_BANDWIDTH: usize = 2;

/// Assembled central-difference system for one beam and load.
///
/// # Examples
/// ```
/// use beamx::{LinearSystem, UniformLoad};
///
/// let system = LinearSystem::assemble(7, 6.0, &UniformLoad { intensity: 1.0 }, 1.0)
///     .expect("valid grid");
/// assert_eq!(system.matrix().row(3).iter().sum::<f64>(), 0.0);
/// assert_eq!(system.rhs()[0], 0.0);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct LinearSystem {
    /// Grid positions in metres.
    grid: Vec<f64>,
    /// Pentadiagonal coefficient matrix with identity boundary rows.
    matrix: DMatrix<f64>,
    /// Scaled load samples with zeroed boundary entries.
    rhs: DVector<f64>,
}

impl LinearSystem {
    /// Assemble the system on `points` evenly spaced nodes over `[0, length]`.
    ///
    /// # Errors
    ///
    /// Returns [`SolverError::TooFewPoints`] when `points < 5` and
    /// [`SolverError::Parameters`] when `length` or `flexural_rigidity` is not
    /// strictly positive.
    pub fn assemble<L>(
        points: usize,
        length: f64,
        load: &L,
        flexural_rigidity: f64,
    ) -> Result<Self, SolverError>
    where
        L: DistributedLoad + ?Sized,
    {
        if points < MIN_POINTS {
            return Err(SolverError::TooFewPoints { points });
        }
        if !(length.is_finite() && length > 0.0) {
            return Err(ParameterError::NonPositiveLength { length }.into());
        }
        if !(flexural_rigidity.is_finite() && flexural_rigidity > 0.0) {
            return Err(ParameterError::NonPositiveRigidity { flexural_rigidity }.into());
        }

        let last = points - 1;
        let dx = length / last as f64;
        let grid: Vec<f64> = (0..points)
            .map(|i| if i == last { length } else { i as f64 * dx })
            .collect();
        let scale = dx.powi(4) / flexural_rigidity;
        let mut rhs =
            DVector::from_iterator(points, grid.iter().map(|&x| load.intensity(x) * scale));

        let mut matrix = DMatrix::zeros(points, points);
        for row in HALF_BANDWIDTH..points - HALF_BANDWIDTH {
            for (offset, coefficient) in STENCIL.iter().enumerate() {
                matrix[(row, row + offset - HALF_BANDWIDTH)] = *coefficient;
            }
        }
        for row in Self::boundary_rows(points) {
            matrix.row_mut(row).fill(0.0);
            matrix[(row, row)] = 1.0;
            rhs[row] = 0.0;
        }
        debug!("assembled {points}x{points} central-difference system, dx = {dx}");

        Ok(Self { grid, matrix, rhs })
    }

    /// Rows replaced by the boundary conditions.
    fn boundary_rows(points: usize) -> [usize; 4] {
        [0, 1, points - 2, points - 1]
    }

    /// Grid positions in metres.
    #[must_use]
    pub fn grid(&self) -> &[f64] {
        &self.grid
    }

    /// Coefficient matrix `A`.
    #[must_use]
    pub fn matrix(&self) -> &DMatrix<f64> {
        &self.matrix
    }

    /// Right-hand side `b`.
    #[must_use]
    pub fn rhs(&self) -> &DVector<f64> {
        &self.rhs
    }

    /// Solve `A·y = b` for the deflection at every grid point.
    ///
    /// The boundary rows fix their unknowns at zero, so only the interior
    /// block is factorised and the boundary entries of the result are exactly
    /// zero.
    ///
    /// # Errors
    ///
    /// Returns [`SolverError::SingularMatrix`] when the interior block cannot
    /// be factorised.
    pub fn solve(&self, strategy: SolveStrategy) -> Result<DVector<f64>, SolverError> {
        let points = self.rhs.len();
        let free: Vec<usize> = (HALF_BANDWIDTH..points - HALF_BANDWIDTH).collect();
        let mut k_ff = DMatrix::zeros(free.len(), free.len());
        let mut f_f = DVector::zeros(free.len());
        for (row_idx, &row) in free.iter().enumerate() {
            f_f[row_idx] = self.rhs[row];
            for (col_idx, &col) in free.iter().enumerate() {
                k_ff[(row_idx, col_idx)] = self.matrix[(row, col)];
            }
        }

        let solution = match strategy {
            SolveStrategy::Dense => k_ff.lu().solve(&f_f).ok_or(SolverError::SingularMatrix)?,
            SolveStrategy::Banded => solve_banded(k_ff, f_f, HALF_BANDWIDTH)?,
        };

        let mut deflection = DVector::zeros(points);
        for (idx, &dof) in free.iter().enumerate() {
            deflection[dof] = solution[idx];
        }
        Ok(deflection)
    }
}

/// Gaussian elimination without pivoting restricted to a band.
///
/// Fill-in stays inside the band when no rows are exchanged, so only
/// `half_bandwidth` rows below each pivot are touched.
fn solve_banded(
    mut matrix: DMatrix<f64>,
    mut rhs: DVector<f64>,
    half_bandwidth: usize,
) -> Result<DVector<f64>, SolverError> {
    let n = rhs.len();
    let scale = matrix.amax();
    if scale == 0.0 {
        return Err(SolverError::SingularMatrix);
    }
    let tolerance = f64::EPSILON * scale;

    for k in 0..n {
        let pivot = matrix[(k, k)];
        if !pivot.is_finite() || pivot.abs() <= tolerance {
            return Err(SolverError::SingularMatrix);
        }
        let band_end = (k + half_bandwidth + 1).min(n);
        for i in k + 1..band_end {
            let factor = matrix[(i, k)] / pivot;
            if factor == 0.0 {
                continue;
            }
            for j in k..band_end {
                matrix[(i, j)] -= factor * matrix[(k, j)];
            }
            rhs[i] -= factor * rhs[k];
        }
    }

    let mut solution = DVector::zeros(n);
    for k in (0..n).rev() {
        let band_end = (k + half_bandwidth + 1).min(n);
        let upper: f64 = (k + 1..band_end)
            .map(|j| matrix[(k, j)] * solution[j])
            .sum();
        solution[k] = (rhs[k] - upper) / matrix[(k, k)];
    }
    Ok(solution)
}

/// Deflection curve of the beam by the central-difference method.
///
/// Uses a dense LU factorisation of the interior block.
///
/// # Errors
///
/// Returns [`SolverError`] under the same conditions as
/// [`LinearSystem::assemble`] and [`LinearSystem::solve`].
pub fn solve_central_difference<L>(
    points: usize,
    length: f64,
    load: &L,
    flexural_rigidity: f64,
) -> Result<DeflectionCurve, SolverError>
where
    L: DistributedLoad + ?Sized,
{
    solve_central_difference_with(points, length, load, flexural_rigidity, SolveStrategy::Dense)
}

/// Deflection curve of the beam by the central-difference method with an
/// explicit linear solver.
///
/// # Errors
///
/// Returns [`SolverError`] under the same conditions as
/// [`LinearSystem::assemble`] and [`LinearSystem::solve`].
pub fn solve_central_difference_with<L>(
    points: usize,
    length: f64,
    load: &L,
    flexural_rigidity: f64,
    strategy: SolveStrategy,
) -> Result<DeflectionCurve, SolverError>
where
    L: DistributedLoad + ?Sized,
{
    let system = LinearSystem::assemble(points, length, load, flexural_rigidity)?;
    let deflection = system.solve(strategy)?;
    let curve = DeflectionCurve::from_parts(system.grid(), deflection.as_slice());
    info!(
        "central difference ({strategy:?}): {} samples, peak {:?}",
        curve.len(),
        curve.peak().map(|sample| sample.deflection)
    );
    Ok(curve)
}
