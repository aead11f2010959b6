use thiserror::Error;

use crate::support::constraint::ConstraintError;

/// Errors raised while reading a wall function's patch configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The `type` entry does not name a known wall function.
    #[error("unknown alphat wall function type `{type_name}`")]
    UnknownType { type_name: String },

    /// A model coefficient violates its constraint.
    #[error("invalid coefficient `{name}`")]
    InvalidCoefficient {
        name: &'static str,
        #[source]
        source: ConstraintError,
    },

    /// The `value` entry does not have one value per face.
    #[error("`value` has {found} entries but the patch has {expected} faces")]
    ValueSize { expected: usize, found: usize },

    /// The entry is not valid JSON for a patch configuration.
    #[error("malformed patch entry")]
    Json(#[from] serde_json::Error),
}

/// Errors raised while updating or writing a patch field.
#[derive(Debug, Error)]
pub enum PatchError {
    /// A collaborator returned the wrong number of face values.
    #[error("patch `{patch}`: {quantity} has {found} values, expected {expected}")]
    FaceCount {
        patch: String,
        quantity: &'static str,
        expected: usize,
        found: usize,
    },

    /// The patch entry could not be written.
    #[error("failed to write patch `{patch}`")]
    Write {
        patch: String,
        #[source]
        source: serde_json::Error,
    },
}
