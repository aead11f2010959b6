use super::MatrixError;

/// Linearised volume-integrated source `su + sp * x`, one entry per cell.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceTerm {
    explicit: Vec<f64>,
    implicit: Vec<f64>,
}

impl SourceTerm {
    /// Creates a source from its explicit (`su`) and implicit (`sp`) parts.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::SizeMismatch`] if the two parts differ in length.
    pub fn new(explicit: Vec<f64>, implicit: Vec<f64>) -> Result<Self, MatrixError> {
        MatrixError::check_size("implicit source", explicit.len(), implicit.len())?;
        Ok(Self { explicit, implicit })
    }

    /// A purely explicit source.
    #[must_use]
    pub fn explicit_only(explicit: Vec<f64>) -> Self {
        let implicit = vec![0.0; explicit.len()];
        Self { explicit, implicit }
    }

    /// A source that contributes nothing to any of `n_cells` cells.
    #[must_use]
    pub fn zero(n_cells: usize) -> Self {
        Self {
            explicit: vec![0.0; n_cells],
            implicit: vec![0.0; n_cells],
        }
    }

    #[must_use]
    pub fn explicit(&self) -> &[f64] {
        &self.explicit
    }

    #[must_use]
    pub fn implicit(&self) -> &[f64] {
        &self.implicit
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.explicit.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.explicit.is_empty()
    }
}
