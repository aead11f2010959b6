use thiserror::Error;

use crate::support::matrix::MatrixError;

/// Errors raised while building a [`Phase`](super::Phase).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PhaseError {
    /// A multi-component phase needs an inert species and at least one active one.
    #[error("phase `{phase}` has {found} species, a multi-component phase needs at least 2")]
    TooFewSpecies { phase: String, found: usize },

    /// Two species share a name.
    #[error("phase `{phase}` has more than one species named `{species}`")]
    DuplicateSpecies { phase: String, species: String },

    /// The inert species is not one of the phase's species.
    #[error("inert species `{species}` is not a species of phase `{phase}`")]
    UnknownInert { phase: String, species: String },

    /// A field does not have one value per cell.
    #[error("phase `{phase}`: field `{field}` has {found} values, expected {expected}")]
    FieldSize {
        phase: String,
        field: String,
        expected: usize,
        found: usize,
    },
}

/// Errors that abort a species transport step.
///
/// These indicate a wiring fault between collaborators, not a numerical
/// condition. Solver failures are not errors; they are recorded in the
/// [`SpeciesReport`](super::SpeciesReport).
#[derive(Debug, Error)]
pub enum CouplingError {
    /// The interphase transfer table has no entry for an active species.
    #[error("no interphase transfer for species `{species}` of phase `{phase}`")]
    MissingSpecies { phase: String, species: String },

    /// A transfer entry does not have one value per cell.
    #[error(
        "interphase transfer for species `{species}` of phase `{phase}` has {found} values, expected {expected}"
    )]
    TransferSize {
        phase: String,
        species: String,
        expected: usize,
        found: usize,
    },

    /// The species equation could not be assembled.
    #[error("failed to assemble equation for species `{species}` of phase `{phase}`")]
    Matrix {
        phase: String,
        species: String,
        #[source]
        source: MatrixError,
    },
}
