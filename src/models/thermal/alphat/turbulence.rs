use std::collections::HashMap;

use uom::si::{f64::Velocity, velocity::meter_per_second};

use super::{PatchError, WallCoefficients, WallTurbulence};

/// Fixed-point sweeps used to locate the laminar sublayer edge.
const Y_PLUS_LAM_SWEEPS: usize = 10;

#[derive(Debug, Clone, PartialEq)]
struct WallPatch {
    k: Vec<f64>,
    y: Vec<f64>,
    nu: Vec<f64>,
}

/// Wall turbulence from a k-epsilon model with a log-law viscosity wall function.
///
/// Per face, with turbulent kinetic energy `k` in the near-wall cell at wall
/// distance `y`:
///
/// ```text
/// u_tau = Cmu^0.25 sqrt(k)
/// y+    = u_tau y / nu
/// nut   = nu (y+ kappa / ln(E y+) - 1)    if y+ > y+_lam, else 0
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct KEpsilonWall {
    coeffs: WallCoefficients,
    y_plus_lam: f64,
    patches: HashMap<String, WallPatch>,
}

impl KEpsilonWall {
    #[must_use]
    pub fn new(coeffs: WallCoefficients) -> Self {
        Self {
            y_plus_lam: y_plus_lam(coeffs.kappa(), coeffs.e()),
            coeffs,
            patches: HashMap::new(),
        }
    }

    /// Adds the near-wall state of `patch`.
    ///
    /// # Errors
    ///
    /// Returns [`PatchError::FaceCount`] if `y` or `nu` does not have one
    /// value per entry of `k`.
    pub fn with_patch(
        mut self,
        patch: impl Into<String>,
        k: Vec<f64>,
        y: Vec<f64>,
        nu: Vec<f64>,
    ) -> Result<Self, PatchError> {
        let patch = patch.into();
        for (quantity, found) in [("y", y.len()), ("nu", nu.len())] {
            if found != k.len() {
                return Err(PatchError::FaceCount {
                    patch,
                    quantity,
                    expected: k.len(),
                    found,
                });
            }
        }

        self.patches.insert(patch, WallPatch { k, y, nu });
        Ok(self)
    }

    #[must_use]
    pub fn coefficients(&self) -> &WallCoefficients {
        &self.coeffs
    }

    /// `y+` at the intersection of the viscous sublayer and the log law.
    #[must_use]
    pub fn y_plus_lam(&self) -> f64 {
        self.y_plus_lam
    }

    /// Friction velocity from turbulent kinetic energy in m²/s².
    #[must_use]
    pub fn friction_velocity(&self, k: f64) -> Velocity {
        Velocity::new::<meter_per_second>(self.coeffs.cmu25() * k.max(0.0).sqrt())
    }

    fn per_face(&self, patch: &str, f: impl Fn(f64, f64, f64) -> f64) -> Vec<f64> {
        self.patches.get(patch).map_or_else(Vec::new, |wall| {
            wall.k
                .iter()
                .zip(&wall.y)
                .zip(&wall.nu)
                .map(|((&k, &y), &nu)| f(k, y, nu))
                .collect()
        })
    }

    fn face_u_tau(&self, k: f64) -> f64 {
        self.friction_velocity(k).get::<meter_per_second>()
    }
}

impl WallTurbulence for KEpsilonWall {
    fn nut(&self, patch: &str) -> Vec<f64> {
        let kappa = self.coeffs.kappa();
        let e = self.coeffs.e();

        self.per_face(patch, |k, y, nu| {
            let y_plus = self.face_u_tau(k) * y / nu;
            if y_plus > self.y_plus_lam {
                nu * (y_plus * kappa / (e * y_plus).ln() - 1.0)
            } else {
                0.0
            }
        })
    }

    fn y_plus(&self, patch: &str) -> Vec<f64> {
        self.per_face(patch, |k, y, nu| self.face_u_tau(k) * y / nu)
    }

    fn u_tau(&self, patch: &str) -> Vec<f64> {
        self.per_face(patch, |k, _, _| self.face_u_tau(k))
    }
}

/// Fixed point of `y+ = ln(E y+) / kappa` starting from 11.
fn y_plus_lam(kappa: f64, e: f64) -> f64 {
    (0..Y_PLUS_LAM_SWEEPS).fold(11.0, |ypl: f64, _| (e * ypl).max(1.0).ln() / kappa)
}
