use serde::{Deserialize, Serialize};

use super::{ConfigError, WallCoefficients, core::RawCoefficients};

/// Per-patch entry of an alphat wall function boundary condition.
///
/// Coefficient keys that are absent take their default values:
/// `Prt` 0.85, `Cmu` 0.09, `kappa` 0.41, `E` 9.8.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatchConfig {
    /// Boundary condition type name.
    #[serde(rename = "type")]
    pub type_name: String,

    #[serde(flatten)]
    coefficients: RawCoefficients,

    /// Initial face values.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<PatchValue>,
}

/// Face values of a patch entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PatchValue {
    Uniform(f64),
    NonUniform(Vec<f64>),
}

impl PatchConfig {
    /// Creates an entry with default coefficients and no value.
    #[must_use]
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            coefficients: RawCoefficients::default(),
            value: None,
        }
    }

    #[must_use]
    pub fn with_coefficients(mut self, coefficients: WallCoefficients) -> Self {
        self.coefficients = coefficients.into();
        self
    }

    #[must_use]
    pub fn with_value(mut self, value: PatchValue) -> Self {
        self.value = Some(value);
        self
    }

    /// Parses a JSON patch entry.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Json`] if the entry is malformed.
    pub fn from_json(entry: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(entry)?)
    }

    /// Validated wall function coefficients.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidCoefficient`] if a coefficient is not
    /// strictly positive.
    pub fn coefficients(&self) -> Result<WallCoefficients, ConfigError> {
        self.coefficients.try_into()
    }
}

impl PatchValue {
    /// Expands to one value per face.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ValueSize`] if a non-uniform value does not
    /// have exactly `n_faces` entries.
    pub fn expand(&self, n_faces: usize) -> Result<Vec<f64>, ConfigError> {
        match self {
            Self::Uniform(value) => Ok(vec![*value; n_faces]),
            Self::NonUniform(values) if values.len() == n_faces => Ok(values.clone()),
            Self::NonUniform(values) => Err(ConfigError::ValueSize {
                expected: n_faces,
                found: values.len(),
            }),
        }
    }
}
