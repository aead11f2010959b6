//! Turbulent thermal diffusivity wall functions.
//!
//! This module provides the [`twine_core::Model`] adapter [`AlphatWallFunction`]
//! over the per-face closures in the internal `core` module, and the boundary
//! patch field [`AlphatPatchField`] that refreshes its value from wall
//! turbulence and thermophysical collaborators once per iteration.
//!
//! # Example
//!
//! ```
//! use reacting_euler_models::models::thermal::alphat::{
//!     AlphatWallFunction, BoundaryFaceSample, PatchConfig,
//! };
//!
//! let config = PatchConfig::from_json(
//!     r#"{ "type": "compressible::alphatPhaseJayatillekeWallFunction", "Prt": 0.85 }"#,
//! )
//! .unwrap();
//! let wall_function = AlphatWallFunction::from_config(&config).unwrap();
//!
//! let face = BoundaryFaceSample {
//!     nu_w: 1.5e-5,
//!     nut_w: 7.5e-5,
//!     y_plus: 100.0,
//!     u_tau: 0.1,
//!     rho: 1.2,
//!     cp: 1005.0,
//!     alpha: 2.1e-5,
//!     prev_alphat: 0.0,
//! };
//! let alphat = wall_function.calc_alphat(&[face]);
//!
//! assert_eq!(alphat.len(), 1);
//! assert!(alphat[0] > 0.0);
//! ```

mod config;
mod core;
mod error;
mod patch;
mod turbulence;

use std::convert::Infallible;

use twine_core::Model;

pub use config::{PatchConfig, PatchValue};
pub use self::core::{
    BoundaryFaceSample, Jayatilleke, SolutionParams, StandardWallFunction, ThermalSublayer,
    WallCoefficients, YPlusTherm, p_smooth, y_plus_therm,
};
pub use error::{ConfigError, PatchError};
pub use patch::{AlphatPatchField, WallThermo, WallTurbulence};
pub use turbulence::KEpsilonWall;

/// Boundary condition type names resolved to the Jayatilleke wall function.
pub const JAYATILLEKE_TYPE_NAMES: [&str; 2] = [
    "compressible::alphatPhaseJayatillekeWallFunction",
    "alphatPhaseJayatillekeWallFunction",
];

/// Boundary condition type names resolved to the standard wall function.
pub const STANDARD_TYPE_NAMES: [&str; 2] =
    ["compressible::alphatWallFunction", "alphatWallFunction"];

/// A turbulent thermal diffusivity wall function selected by configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AlphatWallFunction {
    /// Sublayer-resolving Jayatilleke wall function.
    Jayatilleke(Jayatilleke),

    /// `alphat = nut / Prt`.
    Standard(StandardWallFunction),
}

impl AlphatWallFunction {
    /// Builds the wall function named by `config` with default solution parameters.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownType`] for an unrecognised `type` and
    /// [`ConfigError::InvalidCoefficient`] for a coefficient that is not
    /// strictly positive.
    pub fn from_config(config: &PatchConfig) -> Result<Self, ConfigError> {
        Self::from_config_with(config, SolutionParams::default())
    }

    /// Builds the wall function named by `config` with the given solution parameters.
    ///
    /// # Errors
    ///
    /// See [`AlphatWallFunction::from_config`].
    pub fn from_config_with(
        config: &PatchConfig,
        params: SolutionParams,
    ) -> Result<Self, ConfigError> {
        let type_name = config.type_name.as_str();

        if JAYATILLEKE_TYPE_NAMES.contains(&type_name) {
            let coeffs = config.coefficients()?;
            return Ok(Self::Jayatilleke(Jayatilleke::new(coeffs, params)));
        }
        if STANDARD_TYPE_NAMES.contains(&type_name) {
            let coeffs = config.coefficients()?;
            return Ok(Self::Standard(StandardWallFunction::new(coeffs)));
        }

        Err(ConfigError::UnknownType {
            type_name: config.type_name.clone(),
        })
    }

    /// Canonical boundary condition type name of this wall function.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Jayatilleke(_) => JAYATILLEKE_TYPE_NAMES[0],
            Self::Standard(_) => STANDARD_TYPE_NAMES[0],
        }
    }

    #[must_use]
    pub fn coefficients(&self) -> &WallCoefficients {
        match self {
            Self::Jayatilleke(model) => model.coefficients(),
            Self::Standard(model) => model.coefficients(),
        }
    }

    /// Turbulent thermal diffusivity for every face, in input order.
    #[must_use]
    pub fn calc_alphat(&self, samples: &[BoundaryFaceSample]) -> Vec<f64> {
        match self {
            Self::Jayatilleke(model) => model.calc_alphat(samples),
            Self::Standard(model) => model.calc_alphat(samples),
        }
    }
}

impl Model for AlphatWallFunction {
    type Input = Vec<BoundaryFaceSample>;
    type Output = Vec<f64>;
    type Error = Infallible;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        Ok(self.calc_alphat(input))
    }
}
