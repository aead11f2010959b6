use crate::support::{
    field::FieldStats,
    matrix::{LinearSolveError, SolverPerformance},
};

/// Outcome of solving one species equation.
#[derive(Debug, Clone, PartialEq)]
pub struct SpecieSolve {
    pub phase: String,
    pub specie: String,

    /// Solver performance, or the reason the solve failed.
    ///
    /// A failed solve leaves the field at its previous value.
    pub outcome: Result<SolverPerformance, LinearSolveError>,

    /// Min/mean/max of the field after the solve, before closure.
    pub stats: Option<FieldStats>,
}

impl SpecieSolve {
    /// Whether the solve succeeded and met its tolerance.
    #[must_use]
    pub fn converged(&self) -> bool {
        self.outcome.as_ref().is_ok_and(|performance| performance.converged)
    }
}

/// Per-species outcomes of one species transport step, in solve order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpeciesReport {
    pub solves: Vec<SpecieSolve>,
}

impl SpeciesReport {
    /// Whether every species equation converged.
    #[must_use]
    pub fn all_converged(&self) -> bool {
        self.solves.iter().all(SpecieSolve::converged)
    }

    /// Outcome for `specie` of `phase`, if it was solved.
    #[must_use]
    pub fn get(&self, phase: &str, specie: &str) -> Option<&SpecieSolve> {
        self.solves
            .iter()
            .find(|solve| solve.phase == phase && solve.specie == specie)
    }

    /// Solves that failed or did not converge.
    pub fn unconverged(&self) -> impl Iterator<Item = &SpecieSolve> {
        self.solves.iter().filter(|solve| !solve.converged())
    }
}
