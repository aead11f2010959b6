//! Public models.
//!
//! Models are the primary public interface of this crate.
//!
//! # Organization
//!
//! Models are organized into domain-specific submodules (`thermal`,
//! `multiphase`). This organization may evolve as more models are added.
//!
//! # Model structure
//!
//! Each model lives in its own module. Closures that are pure functions of
//! their inputs keep their computation in an internal `core` submodule and
//! expose it through a thin [`twine_core::Model`] adapter. Models that mutate
//! solver state in place (species transport) expose their operations
//! directly and reach the rest of the solver through collaborator traits.

pub mod multiphase;
pub mod thermal;
