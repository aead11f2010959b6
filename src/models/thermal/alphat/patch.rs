use std::io;

use super::{
    AlphatWallFunction, BoundaryFaceSample, ConfigError, PatchConfig, PatchError, PatchValue,
};

/// Near-wall turbulence quantities on a boundary patch.
pub trait WallTurbulence {
    /// Turbulent kinematic viscosity at each face, m²/s.
    fn nut(&self, patch: &str) -> Vec<f64>;

    /// Dimensionless wall distance of each face's near-wall cell.
    fn y_plus(&self, patch: &str) -> Vec<f64>;

    /// Friction velocity at each face, m/s.
    fn u_tau(&self, patch: &str) -> Vec<f64>;
}

/// Thermophysical properties of a phase on a boundary patch.
pub trait WallThermo {
    /// Laminar kinematic viscosity, m²/s.
    fn nu(&self, patch: &str) -> Vec<f64>;

    /// Laminar thermal diffusivity, m²/s.
    fn alpha(&self, patch: &str) -> Vec<f64>;

    /// Density, kg/m³.
    fn rho(&self, patch: &str) -> Vec<f64>;

    /// Specific heat capacity at constant pressure, J/(kg·K).
    fn cp(&self, patch: &str) -> Vec<f64>;
}

/// Turbulent thermal diffusivity boundary field on one wall patch.
///
/// The stored value is refreshed at most once per iteration:
/// [`update_coeffs`](Self::update_coeffs) is a no-op until
/// [`evaluate`](Self::evaluate) marks the field stale again.
#[derive(Debug, Clone, PartialEq)]
pub struct AlphatPatchField {
    patch: String,
    type_name: String,
    wall_function: AlphatWallFunction,
    value: Vec<f64>,
    updated: bool,
}

impl AlphatPatchField {
    /// Creates the field for `patch` from its configuration entry.
    ///
    /// Without a `value` entry every face starts at zero.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the entry names an unknown type, has an
    /// invalid coefficient, or has a value of the wrong size.
    pub fn new(
        patch: impl Into<String>,
        n_faces: usize,
        config: &PatchConfig,
    ) -> Result<Self, ConfigError> {
        let wall_function = AlphatWallFunction::from_config(config)?;
        let value = match &config.value {
            Some(value) => value.expand(n_faces)?,
            None => vec![0.0; n_faces],
        };

        Ok(Self {
            patch: patch.into(),
            type_name: config.type_name.clone(),
            wall_function,
            value,
            updated: false,
        })
    }

    #[must_use]
    pub fn patch(&self) -> &str {
        &self.patch
    }

    #[must_use]
    pub fn wall_function(&self) -> &AlphatWallFunction {
        &self.wall_function
    }

    #[must_use]
    pub fn value(&self) -> &[f64] {
        &self.value
    }

    /// Whether the value has been refreshed since the last [`evaluate`](Self::evaluate).
    #[must_use]
    pub fn updated(&self) -> bool {
        self.updated
    }

    /// Recomputes the face values from the current wall state.
    ///
    /// The previous face values are the per-face fallback for faces that
    /// cannot be evaluated.
    ///
    /// # Errors
    ///
    /// Returns [`PatchError::FaceCount`] if a collaborator does not return one
    /// value per face. The stored value is left untouched in that case.
    pub fn update_coeffs(
        &mut self,
        turbulence: &impl WallTurbulence,
        thermo: &impl WallThermo,
    ) -> Result<(), PatchError> {
        if self.updated {
            return Ok(());
        }

        let nut = self.face_values("nut", turbulence.nut(&self.patch))?;
        let y_plus = self.face_values("yPlus", turbulence.y_plus(&self.patch))?;
        let u_tau = self.face_values("uTau", turbulence.u_tau(&self.patch))?;
        let nu = self.face_values("nu", thermo.nu(&self.patch))?;
        let alpha = self.face_values("alpha", thermo.alpha(&self.patch))?;
        let rho = self.face_values("rho", thermo.rho(&self.patch))?;
        let cp = self.face_values("Cp", thermo.cp(&self.patch))?;

        let samples: Vec<BoundaryFaceSample> = (0..self.value.len())
            .map(|face| BoundaryFaceSample {
                nu_w: nu[face],
                nut_w: nut[face],
                y_plus: y_plus[face],
                u_tau: u_tau[face],
                rho: rho[face],
                cp: cp[face],
                alpha: alpha[face],
                prev_alphat: self.value[face],
            })
            .collect();

        self.value = self.wall_function.calc_alphat(&samples);
        self.updated = true;
        Ok(())
    }

    /// Finishes the iteration for this patch.
    pub fn evaluate(&mut self) {
        self.updated = false;
    }

    /// Configuration entry describing the current state of the field.
    #[must_use]
    pub fn to_config(&self) -> PatchConfig {
        PatchConfig::new(self.type_name.clone())
            .with_coefficients(*self.wall_function.coefficients())
            .with_value(PatchValue::NonUniform(self.value.clone()))
    }

    /// Writes the patch entry as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`PatchError::Write`] if serialisation or the sink fails.
    pub fn write(&self, sink: impl io::Write) -> Result<(), PatchError> {
        serde_json::to_writer_pretty(sink, &self.to_config()).map_err(|source| {
            PatchError::Write {
                patch: self.patch.clone(),
                source,
            }
        })
    }

    fn face_values(
        &self,
        quantity: &'static str,
        values: Vec<f64>,
    ) -> Result<Vec<f64>, PatchError> {
        if values.len() == self.value.len() {
            Ok(values)
        } else {
            Err(PatchError::FaceCount {
                patch: self.patch.clone(),
                quantity,
                expected: self.value.len(),
                found: values.len(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::models::thermal::alphat::WallCoefficients;

    const NU: f64 = 1.5e-5;

    struct Wall {
        nut: Vec<f64>,
        y_plus: Vec<f64>,
    }

    impl WallTurbulence for Wall {
        fn nut(&self, _patch: &str) -> Vec<f64> {
            self.nut.clone()
        }

        fn y_plus(&self, _patch: &str) -> Vec<f64> {
            self.y_plus.clone()
        }

        fn u_tau(&self, _patch: &str) -> Vec<f64> {
            vec![0.1; self.nut.len()]
        }
    }

    struct Air {
        faces: usize,
        alpha: f64,
    }

    impl WallThermo for Air {
        fn nu(&self, _patch: &str) -> Vec<f64> {
            vec![NU; self.faces]
        }

        fn alpha(&self, _patch: &str) -> Vec<f64> {
            vec![self.alpha; self.faces]
        }

        fn rho(&self, _patch: &str) -> Vec<f64> {
            vec![1.2; self.faces]
        }

        fn cp(&self, _patch: &str) -> Vec<f64> {
            vec![1005.0; self.faces]
        }
    }

    fn air(faces: usize) -> Air {
        Air {
            faces,
            alpha: NU / 0.7,
        }
    }

    fn wall_field(faces: usize) -> AlphatPatchField {
        let config = PatchConfig::new("compressible::alphatPhaseJayatillekeWallFunction");
        AlphatPatchField::new("walls", faces, &config).unwrap()
    }

    #[test]
    fn update_refreshes_value_once_per_iteration() {
        let mut field = wall_field(2);
        let near = Wall {
            nut: vec![4.0 * NU; 2],
            y_plus: vec![2.0, 50.0],
        };
        let far = Wall {
            nut: vec![4.0 * NU; 2],
            y_plus: vec![200.0, 200.0],
        };

        field.update_coeffs(&near, &air(2)).unwrap();
        let first = field.value().to_vec();
        assert!(field.updated());
        assert_relative_eq!(first[0], 0.0);
        assert!(first[1] > 0.0);

        field.update_coeffs(&far, &air(2)).unwrap();
        assert_eq!(field.value(), first.as_slice());

        field.evaluate();
        field.update_coeffs(&far, &air(2)).unwrap();
        assert!(field.value()[0] > first[1]);
    }

    #[test]
    fn wrong_face_count_is_an_error() {
        let mut field = wall_field(3);
        let wall = Wall {
            nut: vec![NU; 2],
            y_plus: vec![30.0; 2],
        };

        let err = field.update_coeffs(&wall, &air(3)).unwrap_err();

        assert!(matches!(
            err,
            PatchError::FaceCount {
                quantity: "nut",
                expected: 3,
                found: 2,
                ..
            }
        ));
        assert!(!field.updated());
        assert_eq!(field.value(), &[0.0; 3]);
    }

    #[test]
    fn faces_that_cannot_be_evaluated_keep_previous_value() {
        let config = PatchConfig::new("alphatPhaseJayatillekeWallFunction")
            .with_value(PatchValue::Uniform(2e-5));
        let mut field = AlphatPatchField::new("walls", 1, &config).unwrap();
        let wall = Wall {
            nut: vec![NU],
            y_plus: vec![30.0],
        };
        let no_conduction = Air {
            faces: 1,
            alpha: 0.0,
        };

        field.update_coeffs(&wall, &no_conduction).unwrap();

        assert_relative_eq!(field.value()[0], 2e-5);
    }

    #[test]
    fn written_entry_round_trips() {
        let coeffs = WallCoefficients::new(0.7, 0.09, 0.41, 9.8).unwrap();
        let config =
            PatchConfig::new("alphatPhaseJayatillekeWallFunction").with_coefficients(coeffs);
        let mut field = AlphatPatchField::new("walls", 2, &config).unwrap();
        let wall = Wall {
            nut: vec![4.0 * NU; 2],
            y_plus: vec![30.0, 60.0],
        };
        field.update_coeffs(&wall, &air(2)).unwrap();

        let mut sink = Vec::new();
        field.write(&mut sink).unwrap();
        let entry = String::from_utf8(sink).unwrap();

        let read_back = PatchConfig::from_json(&entry).unwrap();
        assert_eq!(read_back.type_name, "alphatPhaseJayatillekeWallFunction");
        assert_relative_eq!(read_back.coefficients().unwrap().prt(), 0.7);

        let restored = AlphatPatchField::new("walls", 2, &read_back).unwrap();
        for (restored, written) in restored.value().iter().zip(field.value()) {
            assert_relative_eq!(*restored, *written, max_relative = 1e-15);
        }
        assert!(matches!(
            restored.wall_function(),
            AlphatWallFunction::Jayatilleke(_)
        ));
    }

    #[test]
    fn value_size_is_checked_at_construction() {
        let config = PatchConfig::new("alphatWallFunction")
            .with_value(PatchValue::NonUniform(vec![0.0; 4]));
        assert!(matches!(
            AlphatPatchField::new("walls", 3, &config),
            Err(ConfigError::ValueSize { .. })
        ));
    }
}
