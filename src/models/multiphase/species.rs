//! Species mass-fraction transport for multiphase reacting systems.
//!
//! Once per outer iteration, [`SpeciesTransport::advance_species`] solves the
//! transport equation of every active species of every multi-component phase:
//!
//! 1. Check that the interphase transfer table covers every active species.
//! 2. Refresh the reaction rates.
//! 3. For each active species, in insertion order: assemble its equation,
//!    add the interphase transfer and extra sources, under-relax, solve, and
//!    log min/mean/max of the result.
//! 4. Restore mass-fraction closure.
//!
//! Pure phases are skipped entirely. A failed or unconverged linear solve is
//! logged and recorded in the [`SpeciesReport`]; the step carries on with
//! the next species.

mod error;
mod phase;
mod relaxation;
mod report;
mod system;
mod transfer;

#[cfg(test)]
mod test_support;

use log::{info, warn};

pub use error::{CouplingError, PhaseError};
pub use phase::Phase;
pub use relaxation::RelaxationFactors;
pub use report::{SpecieSolve, SpeciesReport};
pub use system::{NoSources, ReactingPhaseSystem, SourceOptions};
pub use transfer::{InterphaseTransfer, InterphaseTransferTable, SpecieTransfer};

use crate::support::{
    field::ScalarField,
    matrix::{LinearSolver, MatrixError, ScalarMatrix},
};

/// Advances species mass fractions with a linear solver.
#[derive(Debug, Clone)]
pub struct SpeciesTransport<S> {
    solver: S,
    tag: String,
}

impl<S: LinearSolver> SpeciesTransport<S> {
    /// Equation tag shared by all species equations.
    pub const DEFAULT_TAG: &'static str = "Yi";

    #[must_use]
    pub fn new(solver: S) -> Self {
        Self {
            solver,
            tag: Self::DEFAULT_TAG.to_owned(),
        }
    }

    /// Solves species equations under `tag` instead of [`DEFAULT_TAG`](Self::DEFAULT_TAG).
    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    #[must_use]
    pub fn solver(&self) -> &S {
        &self.solver
    }

    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Runs one full species step against fresh interphase transfer rates.
    ///
    /// # Errors
    ///
    /// See [`SpeciesTransport::advance_species`].
    pub fn correct(
        &self,
        fluid: &mut impl ReactingPhaseSystem,
        transfer_model: &mut impl InterphaseTransfer,
        options: &impl SourceOptions,
    ) -> Result<SpeciesReport, CouplingError> {
        let transfer = transfer_model.specie_transfer(fluid.phases());
        self.advance_species(fluid, &transfer.table(), options)
    }

    /// Solves every active species of every multi-component phase.
    ///
    /// # Errors
    ///
    /// Returns [`CouplingError::MissingSpecies`] or [`CouplingError::TransferSize`]
    /// if `table` does not cover an active species, before anything is
    /// modified. Returns [`CouplingError::Matrix`] if an equation cannot be
    /// combined with its sources; species already solved in this step are
    /// then restored, so every mass fraction is left as it was.
    pub fn advance_species(
        &self,
        fluid: &mut impl ReactingPhaseSystem,
        table: &InterphaseTransferTable<'_>,
        options: &impl SourceOptions,
    ) -> Result<SpeciesReport, CouplingError> {
        let plan = plan_solves(fluid.phases(), table)?;

        fluid.correct_reactions();

        let before: Vec<Vec<ScalarField>> = fluid
            .phases()
            .iter()
            .map(|phase| phase.species().to_vec())
            .collect();

        let mut report = SpeciesReport::default();
        for planned in &plan {
            match self.solve_specie(fluid, planned, options) {
                Ok(solve) => report.solves.push(solve),
                Err(err) => {
                    for (phase, species) in fluid.phases_mut().iter_mut().zip(&before) {
                        phase.species_mut().clone_from_slice(species);
                    }
                    return Err(err);
                }
            }
        }

        fluid.correct_species();

        Ok(report)
    }

    fn solve_specie(
        &self,
        fluid: &mut impl ReactingPhaseSystem,
        planned: &PlannedSolve<'_>,
        options: &impl SourceOptions,
    ) -> Result<SpecieSolve, CouplingError> {
        let phase = &fluid.phases()[planned.phase_index];
        let specie = &phase.species()[planned.specie_index];
        let phase_name = phase.name().to_owned();
        let specie_name = specie.name().to_owned();

        let matrix = self
            .assemble(&*fluid, planned, options)
            .map_err(|source| CouplingError::Matrix {
                phase: phase_name.clone(),
                species: specie_name.clone(),
                source,
            })?;

        let mut psi = specie.values().to_vec();
        let outcome = self.solver.solve(&matrix, &mut psi, &self.tag);

        let phase = &mut fluid.phases_mut()[planned.phase_index];
        let field = &mut phase.species_mut()[planned.specie_index];
        match &outcome {
            Ok(performance) => {
                field.values_mut().copy_from_slice(&psi);
                if !performance.converged {
                    warn!("{phase_name} {specie_name}: not converged, {performance}");
                }
            }
            Err(err) => warn!("{phase_name} {specie_name}: linear solve failed: {err}"),
        }

        let stats = field.stats();
        if let Some(stats) = &stats {
            info!("{phase_name} {specie_name}: {stats}");
        }

        Ok(SpecieSolve {
            phase: phase_name,
            specie: specie_name,
            outcome,
            stats,
        })
    }

    /// Species equation with interphase transfer, extra sources and relaxation.
    fn assemble(
        &self,
        fluid: &impl ReactingPhaseSystem,
        planned: &PlannedSolve<'_>,
        options: &impl SourceOptions,
    ) -> Result<ScalarMatrix, MatrixError> {
        let phase = &fluid.phases()[planned.phase_index];
        let specie = &phase.species()[planned.specie_index];

        let mut matrix = fluid.yi_eqn(phase, specie);
        matrix.add_explicit_source(planned.rates)?;
        matrix.equate(&options.source(phase.alpha(), phase.rho(), specie))?;

        if let Some(factor) = phase.relaxation_factor(specie.name(), &self.tag) {
            matrix.relax(specie.values(), factor)?;
        }

        Ok(matrix)
    }
}

/// One species equation of a step and its interphase transfer rates.
#[derive(Debug)]
struct PlannedSolve<'a> {
    phase_index: usize,
    specie_index: usize,
    rates: &'a [f64],
}

/// Pairs every active species of every multi-component phase, in solve
/// order, with a full-size entry of `table`.
fn plan_solves<'a>(
    phases: &[Phase],
    table: &InterphaseTransferTable<'a>,
) -> Result<Vec<PlannedSolve<'a>>, CouplingError> {
    let mut plan = Vec::new();

    for (phase_index, phase) in phases.iter().enumerate() {
        if phase.is_pure() {
            continue;
        }

        for specie_index in phase.active_indices() {
            let specie = &phase.species()[specie_index];
            let Some(rates) = table.get(specie.name()) else {
                return Err(CouplingError::MissingSpecies {
                    phase: phase.name().to_owned(),
                    species: specie.name().to_owned(),
                });
            };
            if rates.len() != phase.n_cells() {
                return Err(CouplingError::TransferSize {
                    phase: phase.name().to_owned(),
                    species: specie.name().to_owned(),
                    expected: phase.n_cells(),
                    found: rates.len(),
                });
            }

            plan.push(PlannedSolve {
                phase_index,
                specie_index,
                rates,
            });
        }
    }

    Ok(plan)
}
