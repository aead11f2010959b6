use std::collections::HashMap;

use super::Phase;

/// Per-species interphase transfer rates owned by the transfer model.
///
/// Rates are net mass-fraction sources per cell, keyed by species name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpecieTransfer {
    rates: HashMap<String, Vec<f64>>,
}

impl SpecieTransfer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the rates of `specie`, replacing any previous entry.
    #[must_use]
    pub fn with(mut self, specie: impl Into<String>, rates: Vec<f64>) -> Self {
        self.insert(specie, rates);
        self
    }

    /// Sets the rates of `specie`, replacing any previous entry.
    pub fn insert(&mut self, specie: impl Into<String>, rates: Vec<f64>) {
        self.rates.insert(specie.into(), rates);
    }

    /// Borrows every entry as a lookup table for one coupling step.
    #[must_use]
    pub fn table(&self) -> InterphaseTransferTable<'_> {
        self.rates
            .iter()
            .map(|(name, rates)| (name.as_str(), rates.as_slice()))
            .collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rates.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

/// Read-only view of interphase transfer rates, keyed by species name.
///
/// The table borrows the rates it points at and cannot outlive them; it is
/// built for a single species transport step and dropped afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InterphaseTransferTable<'a> {
    rates: HashMap<&'a str, &'a [f64]>,
}

impl<'a> InterphaseTransferTable<'a> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, specie: &'a str, rates: &'a [f64]) {
        self.rates.insert(specie, rates);
    }

    /// Rates of `specie`, if present.
    #[must_use]
    pub fn get(&self, specie: &str) -> Option<&'a [f64]> {
        self.rates.get(specie).copied()
    }

    #[must_use]
    pub fn contains(&self, specie: &str) -> bool {
        self.rates.contains_key(specie)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rates.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

impl<'a> FromIterator<(&'a str, &'a [f64])> for InterphaseTransferTable<'a> {
    fn from_iter<I: IntoIterator<Item = (&'a str, &'a [f64])>>(iter: I) -> Self {
        Self {
            rates: iter.into_iter().collect(),
        }
    }
}

/// Interphase mass transfer model.
///
/// Produces fresh transfer rates for the current state of the phases. The
/// result must cover every active species of every multi-component phase.
pub trait InterphaseTransfer {
    fn specie_transfer(&mut self, phases: &[Phase]) -> SpecieTransfer;
}
