//! Multiphase models.

pub mod species;
