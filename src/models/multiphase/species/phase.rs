use std::collections::HashSet;

use super::{PhaseError, RelaxationFactors};
use crate::support::{field::ScalarField, matrix::RelaxationFactor};

/// A phase of a multiphase mixture and its species mass fractions.
///
/// A pure phase carries a single species and transports none. A
/// multi-component phase transports every species except its inert one,
/// which closes the mixture as `1 - Σ active`.
#[derive(Debug, Clone, PartialEq)]
pub struct Phase {
    name: String,
    alpha: ScalarField,
    rho: ScalarField,
    species: Vec<ScalarField>,
    inert: Option<usize>,
    relaxation: RelaxationFactors,
}

impl Phase {
    /// Creates a single-species phase.
    ///
    /// # Errors
    ///
    /// Returns [`PhaseError::FieldSize`] if the fields differ in size.
    pub fn pure(
        name: impl Into<String>,
        alpha: ScalarField,
        rho: ScalarField,
        specie: ScalarField,
    ) -> Result<Self, PhaseError> {
        Self::build(name.into(), alpha, rho, vec![specie], None)
    }

    /// Creates a multi-component phase whose `inert` species closes the mixture.
    ///
    /// Active species are transported in the order given.
    ///
    /// # Errors
    ///
    /// Returns a [`PhaseError`] if there are fewer than two species, species
    /// names repeat, `inert` is not one of the species, or fields differ in size.
    pub fn multi_component(
        name: impl Into<String>,
        alpha: ScalarField,
        rho: ScalarField,
        species: Vec<ScalarField>,
        inert: &str,
    ) -> Result<Self, PhaseError> {
        let name = name.into();

        if species.len() < 2 {
            return Err(PhaseError::TooFewSpecies {
                phase: name,
                found: species.len(),
            });
        }

        let Some(inert) = species.iter().position(|y| y.name() == inert) else {
            return Err(PhaseError::UnknownInert {
                phase: name,
                species: inert.to_owned(),
            });
        };

        Self::build(name, alpha, rho, species, Some(inert))
    }

    fn build(
        name: String,
        alpha: ScalarField,
        rho: ScalarField,
        species: Vec<ScalarField>,
        inert: Option<usize>,
    ) -> Result<Self, PhaseError> {
        if let Some(duplicate) = first_duplicate(&species) {
            return Err(PhaseError::DuplicateSpecies {
                phase: name,
                species: duplicate,
            });
        }

        let n_cells = alpha.len();
        for field in std::iter::once(&rho).chain(&species) {
            if field.len() != n_cells {
                return Err(PhaseError::FieldSize {
                    phase: name,
                    field: field.name().to_owned(),
                    expected: n_cells,
                    found: field.len(),
                });
            }
        }

        Ok(Self {
            name,
            alpha,
            rho,
            species,
            inert,
            relaxation: RelaxationFactors::default(),
        })
    }

    /// Uses `relaxation` for this phase's species equations.
    #[must_use]
    pub fn with_relaxation(mut self, relaxation: RelaxationFactors) -> Self {
        self.relaxation = relaxation;
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Volume fraction.
    #[must_use]
    pub fn alpha(&self) -> &ScalarField {
        &self.alpha
    }

    /// Density.
    #[must_use]
    pub fn rho(&self) -> &ScalarField {
        &self.rho
    }

    #[must_use]
    pub fn n_cells(&self) -> usize {
        self.alpha.len()
    }

    /// Whether the phase has a single species.
    #[must_use]
    pub fn is_pure(&self) -> bool {
        self.inert.is_none()
    }

    /// All species, active and inert, in insertion order.
    #[must_use]
    pub fn species(&self) -> &[ScalarField] {
        &self.species
    }

    pub fn species_mut(&mut self) -> &mut [ScalarField] {
        &mut self.species
    }

    /// Positions in [`species`](Self::species) of the transported species.
    #[must_use]
    pub fn active_indices(&self) -> Vec<usize> {
        match self.inert {
            Some(inert) => (0..self.species.len()).filter(|&i| i != inert).collect(),
            None => Vec::new(),
        }
    }

    /// Transported species in insertion order.
    pub fn active_species(&self) -> impl Iterator<Item = &ScalarField> {
        self.active_indices()
            .into_iter()
            .map(move |index| &self.species[index])
    }

    /// The species that closes the mixture, if the phase is multi-component.
    #[must_use]
    pub fn inert(&self) -> Option<&ScalarField> {
        self.inert.map(|index| &self.species[index])
    }

    /// Mass fraction field of `specie`.
    #[must_use]
    pub fn y(&self, specie: &str) -> Option<&ScalarField> {
        self.species.iter().find(|y| y.name() == specie)
    }

    pub fn y_mut(&mut self, specie: &str) -> Option<&mut ScalarField> {
        self.species.iter_mut().find(|y| y.name() == specie)
    }

    /// Under-relaxation factor for the equation of `field` solved under `tag`.
    #[must_use]
    pub fn relaxation_factor(&self, field: &str, tag: &str) -> Option<RelaxationFactor> {
        self.relaxation.factor(field, tag)
    }

    /// Enforces mass-fraction closure in every cell.
    ///
    /// Active fractions are clipped to `[0, 1]` (NaN becomes zero). If they
    /// sum to more than one they are rescaled to sum to one and the inert
    /// fraction is zero; otherwise the inert fraction is `1 - Σ active`.
    pub fn correct_species(&mut self) {
        let Some(inert) = self.inert else {
            return;
        };

        for cell in 0..self.n_cells() {
            let mut sum = 0.0;
            for (index, field) in self.species.iter_mut().enumerate() {
                if index == inert {
                    continue;
                }
                let y = &mut field.values_mut()[cell];
                *y = if y.is_nan() { 0.0 } else { y.clamp(0.0, 1.0) };
                sum += *y;
            }

            if sum > 1.0 {
                for (index, field) in self.species.iter_mut().enumerate() {
                    if index != inert {
                        field.values_mut()[cell] /= sum;
                    }
                }
                self.species[inert].values_mut()[cell] = 0.0;
            } else {
                self.species[inert].values_mut()[cell] = 1.0 - sum;
            }
        }
    }
}

fn first_duplicate(species: &[ScalarField]) -> Option<String> {
    let mut seen = HashSet::new();
    species
        .iter()
        .find(|y| !seen.insert(y.name()))
        .map(|y| y.name().to_owned())
}
