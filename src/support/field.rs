//! Named cell-centred scalar fields.

use std::fmt;

/// A named scalar field holding one value per cell (or per face on a patch).
///
/// The name identifies the field to collaborators: species fields are looked
/// up in interphase transfer tables and relaxation policies by name.
#[derive(Debug, Clone, PartialEq)]
pub struct ScalarField {
    name: String,
    values: Vec<f64>,
}

impl ScalarField {
    /// Creates a field from its name and values.
    #[must_use]
    pub fn new(name: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    /// Creates a field with the same value in every one of `size` cells.
    #[must_use]
    pub fn uniform(name: impl Into<String>, size: usize, value: f64) -> Self {
        Self::new(name, vec![value; size])
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn values_mut(&mut self) -> &mut [f64] {
        &mut self.values
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns the min/mean/max of the field values, or `None` if the field is empty.
    #[must_use]
    pub fn stats(&self) -> Option<FieldStats> {
        FieldStats::of(&self.values)
    }
}

/// Summary statistics over the values of a field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldStats {
    pub min: f64,
    pub mean: f64,
    pub max: f64,
}

impl FieldStats {
    /// Computes min/mean/max over `values`, or `None` if `values` is empty.
    #[must_use]
    pub fn of(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }

        let (min, max, sum) = values.iter().fold(
            (f64::INFINITY, f64::NEG_INFINITY, 0.0),
            |(min, max, sum), &v| (min.min(v), max.max(v), sum + v),
        );

        #[allow(clippy::cast_precision_loss)]
        let mean = sum / values.len() as f64;

        Some(Self { min, mean, max })
    }
}

impl fmt::Display for FieldStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "min = {}, mean = {}, max = {}",
            self.min, self.mean, self.max
        )
    }
}
