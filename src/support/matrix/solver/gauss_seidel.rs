use std::collections::HashMap;

use log::debug;
use serde::{Deserialize, Serialize};

use super::{LinearSolveError, LinearSolver, SolverPerformance};
use crate::support::{
    constraint::{ConstraintError, ConstraintResult, NonNegative},
    matrix::ScalarMatrix,
};

/// Iteration controls for a linear solve.
///
/// Deserialized controls go through [`SolverControls::new`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawSolverControls", into = "RawSolverControls")]
pub struct SolverControls {
    /// Maximum number of sweeps.
    pub max_iter: usize,

    /// Absolute tolerance on the normalised residual.
    pub tolerance: f64,

    /// Tolerance relative to the initial residual. Zero disables it.
    pub rel_tol: f64,
}

impl SolverControls {
    /// Creates validated controls.
    ///
    /// # Errors
    ///
    /// Returns an error if either tolerance is negative or NaN.
    pub fn new(max_iter: usize, tolerance: f64, rel_tol: f64) -> ConstraintResult<Self> {
        Ok(Self {
            max_iter,
            tolerance: NonNegative::new(tolerance)?.into_inner(),
            rel_tol: NonNegative::new(rel_tol)?.into_inner(),
        })
    }
}

impl Default for SolverControls {
    fn default() -> Self {
        Self {
            max_iter: 1000,
            tolerance: 1e-10,
            rel_tol: 0.0,
        }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct RawSolverControls {
    max_iter: usize,
    tolerance: f64,
    rel_tol: f64,
}

impl Default for RawSolverControls {
    fn default() -> Self {
        SolverControls::default().into()
    }
}

impl TryFrom<RawSolverControls> for SolverControls {
    type Error = ConstraintError;

    fn try_from(raw: RawSolverControls) -> Result<Self, Self::Error> {
        Self::new(raw.max_iter, raw.tolerance, raw.rel_tol)
    }
}

impl From<SolverControls> for RawSolverControls {
    fn from(controls: SolverControls) -> Self {
        Self {
            max_iter: controls.max_iter,
            tolerance: controls.tolerance,
            rel_tol: controls.rel_tol,
        }
    }
}

/// Gauss-Seidel smoother used as a standalone solver.
///
/// Controls are looked up by equation tag, falling back to the default
/// controls for untagged equations.
#[derive(Debug, Clone, Default)]
pub struct GaussSeidel {
    default: SolverControls,
    by_tag: HashMap<String, SolverControls>,
}

impl GaussSeidel {
    #[must_use]
    pub fn new(default: SolverControls) -> Self {
        Self {
            default,
            by_tag: HashMap::new(),
        }
    }

    /// Uses `controls` for equations solved under `tag`.
    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>, controls: SolverControls) -> Self {
        self.by_tag.insert(tag.into(), controls);
        self
    }

    /// Returns the controls that apply to `tag`.
    #[must_use]
    pub fn controls(&self, tag: &str) -> SolverControls {
        self.by_tag.get(tag).copied().unwrap_or(self.default)
    }
}

/// Normalised residual `Σ|b - Ax| / (Σ|A_d x| + Σ|b|)`.
fn normalised_residual(matrix: &ScalarMatrix, psi: &[f64]) -> Result<f64, LinearSolveError> {
    let residual = matrix
        .residual(psi)
        .map_err(|_| LinearSolveError::DimensionMismatch {
            expected: matrix.n_cells(),
            found: psi.len(),
        })?;

    let sum_residual: f64 = residual.iter().map(|r| r.abs()).sum();
    let normalisation: f64 = matrix
        .diag()
        .iter()
        .zip(psi)
        .map(|(d, x)| (d * x).abs())
        .chain(matrix.source().iter().map(|b| b.abs()))
        .sum();

    Ok(sum_residual / normalisation.max(f64::MIN_POSITIVE))
}

impl LinearSolver for GaussSeidel {
    fn solve(
        &self,
        matrix: &ScalarMatrix,
        psi: &mut [f64],
        tag: &str,
    ) -> Result<SolverPerformance, LinearSolveError> {
        if psi.len() != matrix.n_cells() {
            return Err(LinearSolveError::DimensionMismatch {
                expected: matrix.n_cells(),
                found: psi.len(),
            });
        }
        if let Some(cell) = matrix.diag().iter().position(|&d| d == 0.0) {
            return Err(LinearSolveError::ZeroDiagonal { cell });
        }

        let controls = self.controls(tag);
        let rows = matrix.neighbour_rows();

        let initial_residual = normalised_residual(matrix, psi)?;
        let mut final_residual = initial_residual;
        let mut iterations = 0;

        let converged = |residual: f64| {
            residual <= controls.tolerance || residual <= controls.rel_tol * initial_residual
        };

        while !converged(final_residual) && iterations < controls.max_iter {
            for (cell, row) in rows.iter().enumerate() {
                let off_diag: f64 = row.iter().map(|&(j, a)| a * psi[j]).sum();
                psi[cell] = (matrix.source()[cell] - off_diag) / matrix.diag()[cell];
            }
            iterations += 1;

            final_residual = normalised_residual(matrix, psi)?;
            if !final_residual.is_finite() {
                return Err(LinearSolveError::Diverged { iterations });
            }
        }

        let performance = SolverPerformance {
            solver: "GaussSeidel",
            initial_residual,
            final_residual,
            iterations,
            converged: converged(final_residual),
        };
        debug!("{tag}: {performance}");

        Ok(performance)
    }
}
