//! Linear solvers for [`ScalarMatrix`] systems.

mod gauss_seidel;

use std::fmt;

use thiserror::Error;

pub use gauss_seidel::{GaussSeidel, SolverControls};

use super::ScalarMatrix;

/// Solves an assembled scalar system in place.
///
/// The `tag` names the equation for solver-control lookup (for example `"Yi"`
/// for all species mass-fraction equations), independently of the field name.
pub trait LinearSolver {
    /// Solves `matrix` for `psi`, starting from the current values of `psi`.
    ///
    /// Failing to reach the tolerance is not an error: it is reported through
    /// [`SolverPerformance::converged`].
    ///
    /// # Errors
    ///
    /// Returns a [`LinearSolveError`] if the system cannot be solved at all.
    fn solve(
        &self,
        matrix: &ScalarMatrix,
        psi: &mut [f64],
        tag: &str,
    ) -> Result<SolverPerformance, LinearSolveError>;
}

/// Convergence summary for a single linear solve.
#[derive(Debug, Clone, PartialEq)]
pub struct SolverPerformance {
    pub solver: &'static str,
    pub initial_residual: f64,
    pub final_residual: f64,
    pub iterations: usize,
    pub converged: bool,
}

impl fmt::Display for SolverPerformance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: Initial residual = {:e}, Final residual = {:e}, No Iterations {}",
            self.solver, self.initial_residual, self.final_residual, self.iterations
        )
    }
}

/// Errors that prevent a linear solve from producing a solution.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LinearSolveError {
    /// The field does not have one value per matrix cell.
    #[error("field has {found} values but the matrix has {expected} cells")]
    DimensionMismatch { expected: usize, found: usize },

    /// A cell has a zero diagonal coefficient.
    #[error("zero diagonal coefficient in cell {cell}")]
    ZeroDiagonal { cell: usize },

    /// The iteration produced non-finite values.
    #[error("solution diverged after {iterations} iterations")]
    Diverged { iterations: usize },
}
