//! Thermal models.
//!
//! This module contains near-wall closures for turbulent heat transfer.

pub mod alphat;
