use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::support::{constraint::ConstraintError, matrix::RelaxationFactor};

/// Equation under-relaxation policy of a phase.
///
/// A factor is looked up by field name first, then by equation tag, then
/// falls back to the default. Without any match the equation is not relaxed.
///
/// Reads and writes as
///
/// ```json
/// { "default": 1.0, "equations": { "Yi": 0.9, "H2O": 0.7 } }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawRelaxationFactors", into = "RawRelaxationFactors")]
pub struct RelaxationFactors {
    default: Option<RelaxationFactor>,
    equations: HashMap<String, RelaxationFactor>,
}

impl RelaxationFactors {
    /// Applies `factor` to every equation without a specific entry.
    #[must_use]
    pub fn with_default(mut self, factor: RelaxationFactor) -> Self {
        self.default = Some(factor);
        self
    }

    /// Applies `factor` to the equation of `name`, a field name or an equation tag.
    #[must_use]
    pub fn with_equation(mut self, name: impl Into<String>, factor: RelaxationFactor) -> Self {
        self.equations.insert(name.into(), factor);
        self
    }

    /// Factor for the equation of `field`, solved under `tag`.
    #[must_use]
    pub fn factor(&self, field: &str, tag: &str) -> Option<RelaxationFactor> {
        self.equations
            .get(field)
            .or_else(|| self.equations.get(tag))
            .copied()
            .or(self.default)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct RawRelaxationFactors {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    default: Option<f64>,
    #[serde(default)]
    equations: HashMap<String, f64>,
}

impl TryFrom<RawRelaxationFactors> for RelaxationFactors {
    type Error = ConstraintError;

    fn try_from(raw: RawRelaxationFactors) -> Result<Self, Self::Error> {
        Ok(Self {
            default: raw.default.map(RelaxationFactor::new).transpose()?,
            equations: raw
                .equations
                .into_iter()
                .map(|(name, value)| Ok((name, RelaxationFactor::new(value)?)))
                .collect::<Result<_, ConstraintError>>()?,
        })
    }
}

impl From<RelaxationFactors> for RawRelaxationFactors {
    fn from(factors: RelaxationFactors) -> Self {
        Self {
            default: factors.default.map(|f| f.get()),
            equations: factors
                .equations
                .into_iter()
                .map(|(name, factor)| (name, factor.get()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    fn factor(value: f64) -> RelaxationFactor {
        RelaxationFactor::new(value).unwrap()
    }

    #[test]
    fn field_entry_wins_over_tag_and_default() {
        let factors = RelaxationFactors::default()
            .with_default(factor(1.0))
            .with_equation("Yi", factor(0.9))
            .with_equation("H2O", factor(0.7));

        assert_relative_eq!(factors.factor("H2O", "Yi").unwrap().get(), 0.7);
        assert_relative_eq!(factors.factor("O2", "Yi").unwrap().get(), 0.9);
        assert_relative_eq!(factors.factor("T", "h").unwrap().get(), 1.0);
    }

    #[test]
    fn no_policy_means_no_relaxation() {
        assert!(RelaxationFactors::default().factor("H2O", "Yi").is_none());
    }

    #[test]
    fn reads_json_policy() {
        let factors: RelaxationFactors =
            serde_json::from_str(r#"{ "equations": { "Yi": 0.8 } }"#).unwrap();

        assert_relative_eq!(factors.factor("CO2", "Yi").unwrap().get(), 0.8);
        assert!(factors.factor("CO2", "h").is_none());
    }

    #[test]
    fn rejects_factor_outside_unit_interval() {
        let result: Result<RelaxationFactors, _> =
            serde_json::from_str(r#"{ "default": 0.0 }"#);
        assert!(result.is_err());

        let result: Result<RelaxationFactors, _> =
            serde_json::from_str(r#"{ "equations": { "Yi": 1.5 } }"#);
        assert!(result.is_err());
    }
}
