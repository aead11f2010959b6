//! # Reacting Euler Models
//!
//! Near-wall thermal closures and multiphase species transport for Eulerian
//! multiphase reacting-flow solvers.
//!
//! ## Crate layout
//!
//! - [`models`]: Domain-specific models.
//!   - [`models::thermal::alphat`]: turbulent thermal diffusivity wall functions.
//!   - [`models::multiphase::species`]: per-iteration species mass-fraction transport.
//! - [`support`]: Supporting utilities used by models.
//!
//! ## Utility code lifecycle
//!
//! Modules in [`support`] are part of the public API because they're useful,
//! but their APIs are not stable. Breaking changes may occur as needed.
//!
//! Utility code starts in a model's internal modules and moves to [`support`]
//! once it is useful across models.
//!
//! ## Logging
//!
//! Diagnostics go through the [`log`] facade. Install any logger to see them.

pub mod models;
pub mod support;
