use crate::support::constraint::{Constrained, ConstraintResult, StrictlyPositive};

/// Numerical parameters shared by the per-face root solve.
///
/// Owned by each wall-function instance so that instances with different
/// parameters can coexist.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolutionParams {
    max_exp: f64,
    tolerance: Constrained<f64, StrictlyPositive>,
    max_iters: Constrained<usize, StrictlyPositive>,
}

impl SolutionParams {
    pub const DEFAULT_MAX_EXP: f64 = 50.0;
    pub const DEFAULT_TOLERANCE: f64 = 1e-4;
    pub const DEFAULT_MAX_ITERS: usize = 10;

    /// Creates validated solution parameters.
    ///
    /// # Errors
    ///
    /// Returns an error if the tolerance or iteration cap is not strictly positive.
    pub fn new(max_exp: f64, tolerance: f64, max_iters: usize) -> ConstraintResult<Self> {
        Ok(Self {
            max_exp,
            tolerance: StrictlyPositive::new(tolerance)?,
            max_iters: StrictlyPositive::new(max_iters)?,
        })
    }

    /// Upper bound applied to every exponent argument before `exp`.
    #[must_use]
    pub fn max_exp(&self) -> f64 {
        self.max_exp
    }

    /// Newton step size below which the root solve is converged.
    #[must_use]
    pub fn tolerance(&self) -> f64 {
        self.tolerance.get()
    }

    #[must_use]
    pub fn max_iters(&self) -> usize {
        self.max_iters.get()
    }

    /// Caps an exponent argument at [`max_exp`](Self::max_exp) and exponentiates.
    #[must_use]
    pub(crate) fn capped_exp(&self, arg: f64) -> f64 {
        arg.min(self.max_exp).exp()
    }
}

impl Default for SolutionParams {
    fn default() -> Self {
        Self::new(
            Self::DEFAULT_MAX_EXP,
            Self::DEFAULT_TOLERANCE,
            Self::DEFAULT_MAX_ITERS,
        )
        .expect("default solution parameters are valid")
    }
}
