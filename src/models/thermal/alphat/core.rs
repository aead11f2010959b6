//! Per-face turbulent thermal diffusivity closures.
//!
//! Everything here is a pure function of per-face scalars: no face depends
//! on any other, and no state survives between calls except the previous
//! diffusivity carried in each [`BoundaryFaceSample`] as a fallback.

mod coefficients;
mod jayatilleke;
mod sample;
mod solution;
mod standard;
mod y_plus_therm;

pub(crate) use coefficients::RawCoefficients;
pub use coefficients::WallCoefficients;
pub use jayatilleke::{Jayatilleke, ThermalSublayer, p_smooth};
pub use sample::BoundaryFaceSample;
pub use solution::SolutionParams;
pub use standard::StandardWallFunction;
pub use y_plus_therm::{YPlusTherm, y_plus_therm};
