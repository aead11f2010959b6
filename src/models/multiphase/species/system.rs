use super::Phase;
use crate::support::{
    field::ScalarField,
    matrix::{ScalarMatrix, SourceTerm},
};

/// The multiphase system whose species are transported.
///
/// Owns the phases and assembles the transport equations. Discretisation of
/// the time derivative, convection, diffusion and reaction terms lives
/// behind [`yi_eqn`](Self::yi_eqn).
pub trait ReactingPhaseSystem {
    fn phases(&self) -> &[Phase];

    fn phases_mut(&mut self) -> &mut [Phase];

    /// Assembles the transport equation of `specie` in `phase`.
    ///
    /// Interphase transfer and extra sources are added by the caller.
    fn yi_eqn(&self, phase: &Phase, specie: &ScalarField) -> ScalarMatrix;

    /// Refreshes the reaction rates used by [`yi_eqn`](Self::yi_eqn).
    fn correct_reactions(&mut self);

    /// Restores mass-fraction closure after the species have been solved.
    fn correct_species(&mut self) {
        for phase in self.phases_mut() {
            phase.correct_species();
        }
    }
}

/// Run-time selectable extra sources for species equations.
pub trait SourceOptions {
    /// Source for the mass fraction `specie` of a phase with volume fraction
    /// `alpha` and density `rho`.
    fn source(&self, alpha: &ScalarField, rho: &ScalarField, specie: &ScalarField) -> SourceTerm;
}

/// No extra sources.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSources;

impl SourceOptions for NoSources {
    fn source(
        &self,
        _alpha: &ScalarField,
        _rho: &ScalarField,
        specie: &ScalarField,
    ) -> SourceTerm {
        SourceTerm::zero(specie.len())
    }
}
