/// Per-face inputs to a turbulent thermal diffusivity wall function.
///
/// Samples are rebuilt from the current field values every time the patch
/// coefficients are refreshed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundaryFaceSample {
    /// Laminar kinematic viscosity at the wall, m²/s.
    pub nu_w: f64,

    /// Turbulent kinematic viscosity from the wall turbulence model, m²/s.
    pub nut_w: f64,

    /// Dimensionless distance of the near-wall cell centre.
    pub y_plus: f64,

    /// Friction velocity, m/s.
    pub u_tau: f64,

    /// Density, kg/m³.
    pub rho: f64,

    /// Specific heat capacity at constant pressure, J/(kg·K).
    pub cp: f64,

    /// Laminar thermal diffusivity `kappa / (rho * cp)`, m²/s.
    pub alpha: f64,

    /// Turbulent thermal diffusivity from the previous evaluation, m²/s.
    ///
    /// Returned unchanged when the face cannot be evaluated.
    pub prev_alphat: f64,
}

impl BoundaryFaceSample {
    /// Molecular Prandtl number `nu / alpha`.
    #[must_use]
    pub fn prandtl(&self) -> f64 {
        self.nu_w / self.alpha
    }
}
