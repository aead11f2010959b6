use thiserror::Error;

/// Errors raised by matrix assembly operations.
///
/// These indicate a wiring fault between the matrix and the fields or sources
/// combined with it, never a numerical condition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatrixError {
    /// An operand does not have one value per matrix cell.
    #[error("{operand} has {found} values but the matrix has {expected} cells")]
    SizeMismatch {
        operand: &'static str,
        expected: usize,
        found: usize,
    },

    /// A coupling references a cell outside the matrix or couples a cell to itself.
    #[error("invalid coupling {owner} -> {neighbour} in a matrix of {n_cells} cells")]
    InvalidCoupling {
        owner: usize,
        neighbour: usize,
        n_cells: usize,
    },
}

impl MatrixError {
    pub(super) fn check_size(
        operand: &'static str,
        expected: usize,
        found: usize,
    ) -> Result<(), Self> {
        if expected == found {
            Ok(())
        } else {
            Err(Self::SizeMismatch {
                operand,
                expected,
                found,
            })
        }
    }
}
