//! Cell-wise scalar transport matrices.
//!
//! A [`ScalarMatrix`] stores the assembled linear system `A x = b` for one
//! scalar field: a diagonal coefficient per cell, an explicit source per cell,
//! and off-diagonal couplings between pairs of cells. Discretisation of the
//! transport terms is the job of whoever assembles the matrix; this module
//! only provides the algebra the species update needs on top of it:
//!
//! - equating the matrix to explicit or linearised sources,
//! - under-relaxation against the current field values,
//! - residual evaluation,
//! - solving through the [`LinearSolver`] trait.

mod error;
mod relaxation;
mod solver;
mod source;

pub use error::MatrixError;
pub use relaxation::RelaxationFactor;
pub use solver::{GaussSeidel, LinearSolveError, LinearSolver, SolverControls, SolverPerformance};
pub use source::SourceTerm;

/// Off-diagonal coupling between two cells.
///
/// `upper` multiplies the neighbour value in the owner's row and `lower`
/// multiplies the owner value in the neighbour's row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaceCoupling {
    pub owner: usize,
    pub neighbour: usize,
    pub lower: f64,
    pub upper: f64,
}

/// Assembled linear system for a single scalar field.
#[derive(Debug, Clone, PartialEq)]
pub struct ScalarMatrix {
    diag: Vec<f64>,
    source: Vec<f64>,
    faces: Vec<FaceCoupling>,
}

impl ScalarMatrix {
    /// Creates a matrix with the given diagonal and source and no couplings.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::SizeMismatch`] if `diag` and `source` differ in length.
    pub fn new(diag: Vec<f64>, source: Vec<f64>) -> Result<Self, MatrixError> {
        MatrixError::check_size("source", diag.len(), source.len())?;
        Ok(Self {
            diag,
            source,
            faces: Vec::new(),
        })
    }

    /// Adds a coupling between `owner` and `neighbour`.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::InvalidCoupling`] if either cell is out of range
    /// or the two cells coincide.
    pub fn with_coupling(
        mut self,
        owner: usize,
        neighbour: usize,
        lower: f64,
        upper: f64,
    ) -> Result<Self, MatrixError> {
        let n_cells = self.n_cells();
        if owner >= n_cells || neighbour >= n_cells || owner == neighbour {
            return Err(MatrixError::InvalidCoupling {
                owner,
                neighbour,
                n_cells,
            });
        }
        self.faces.push(FaceCoupling {
            owner,
            neighbour,
            lower,
            upper,
        });
        Ok(self)
    }

    #[must_use]
    pub fn n_cells(&self) -> usize {
        self.diag.len()
    }

    #[must_use]
    pub fn diag(&self) -> &[f64] {
        &self.diag
    }

    #[must_use]
    pub fn source(&self) -> &[f64] {
        &self.source
    }

    #[must_use]
    pub fn faces(&self) -> &[FaceCoupling] {
        &self.faces
    }

    /// Equates the matrix to an explicit source: `A x = b + su`.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::SizeMismatch`] if `su` does not have one value per cell.
    pub fn add_explicit_source(&mut self, su: &[f64]) -> Result<(), MatrixError> {
        MatrixError::check_size("explicit source", self.n_cells(), su.len())?;
        for (b, s) in self.source.iter_mut().zip(su) {
            *b += s;
        }
        Ok(())
    }

    /// Equates the matrix to a linearised source `su + sp x`.
    ///
    /// The implicit part moves to the diagonal and the explicit part to the source.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::SizeMismatch`] if the source term does not have
    /// one value per cell.
    pub fn equate(&mut self, term: &SourceTerm) -> Result<(), MatrixError> {
        MatrixError::check_size("source term", self.n_cells(), term.len())?;
        self.add_explicit_source(term.explicit())?;
        for (d, sp) in self.diag.iter_mut().zip(term.implicit()) {
            *d -= sp;
        }
        Ok(())
    }

    /// Under-relaxes the matrix against the current field values `psi`.
    ///
    /// The diagonal is first made at least as large as the summed magnitude of
    /// the row's off-diagonal coefficients, then divided by the factor. The
    /// source absorbs the change so that `psi` still satisfies the relaxed
    /// system whenever it satisfies the unrelaxed one.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::SizeMismatch`] if `psi` does not have one value per cell.
    pub fn relax(&mut self, psi: &[f64], factor: RelaxationFactor) -> Result<(), MatrixError> {
        MatrixError::check_size("field", self.n_cells(), psi.len())?;

        let mut sum_mag_off_diag = vec![0.0; self.n_cells()];
        for face in &self.faces {
            sum_mag_off_diag[face.owner] += face.upper.abs();
            sum_mag_off_diag[face.neighbour] += face.lower.abs();
        }

        let alpha = factor.get();
        for (cell, d) in self.diag.iter_mut().enumerate() {
            let dominant = d.abs().max(sum_mag_off_diag[cell]).copysign(*d);
            let relaxed = dominant / alpha;
            self.source[cell] += (relaxed - *d) * psi[cell];
            *d = relaxed;
        }
        Ok(())
    }

    /// Returns `b - A x` for each cell.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::SizeMismatch`] if `psi` does not have one value per cell.
    pub fn residual(&self, psi: &[f64]) -> Result<Vec<f64>, MatrixError> {
        MatrixError::check_size("field", self.n_cells(), psi.len())?;

        let mut residual: Vec<f64> = self
            .source
            .iter()
            .zip(&self.diag)
            .zip(psi)
            .map(|((b, d), x)| b - d * x)
            .collect();

        for face in &self.faces {
            residual[face.owner] -= face.upper * psi[face.neighbour];
            residual[face.neighbour] -= face.lower * psi[face.owner];
        }
        Ok(residual)
    }

    /// Row-wise off-diagonal coefficients, indexed by cell.
    pub(crate) fn neighbour_rows(&self) -> Vec<Vec<(usize, f64)>> {
        let mut rows = vec![Vec::new(); self.n_cells()];
        for face in &self.faces {
            rows[face.owner].push((face.neighbour, face.upper));
            rows[face.neighbour].push((face.owner, face.lower));
        }
        rows
    }
}
