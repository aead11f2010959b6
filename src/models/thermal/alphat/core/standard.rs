use super::{BoundaryFaceSample, WallCoefficients};

/// Reynolds-analogy wall function: `alphat = nut / Prt`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StandardWallFunction {
    coeffs: WallCoefficients,
}

impl StandardWallFunction {
    #[must_use]
    pub fn new(coeffs: WallCoefficients) -> Self {
        Self { coeffs }
    }

    #[must_use]
    pub fn coefficients(&self) -> &WallCoefficients {
        &self.coeffs
    }

    /// Turbulent thermal diffusivity at a single face.
    ///
    /// Non-finite turbulent viscosity falls back to the previous value.
    #[must_use]
    pub fn face_alphat(&self, sample: &BoundaryFaceSample) -> f64 {
        let alphat = sample.nut_w / self.coeffs.prt();
        if alphat.is_finite() {
            alphat
        } else {
            sample.prev_alphat
        }
    }

    #[must_use]
    pub fn calc_alphat(&self, samples: &[BoundaryFaceSample]) -> Vec<f64> {
        samples
            .iter()
            .map(|sample| self.face_alphat(sample))
            .collect()
    }
}
