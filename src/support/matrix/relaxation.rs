use crate::support::constraint::{Constrained, ConstraintResult, UnitIntervalLowerOpen};

/// Under-relaxation factor applied to an assembled equation.
///
/// The factor must lie in `(0, 1]`; a factor of one leaves the equation unchanged.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct RelaxationFactor(Constrained<f64, UnitIntervalLowerOpen>);

impl RelaxationFactor {
    /// Creates a [`RelaxationFactor`] from a scalar value.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the value lies outside the interval `(0, 1]`.
    pub fn new(value: f64) -> ConstraintResult<Self> {
        Ok(Self(UnitIntervalLowerOpen::new(value)?))
    }

    /// Returns the factor as a plain scalar.
    #[must_use]
    pub fn get(&self) -> f64 {
        self.0.get()
    }
}
