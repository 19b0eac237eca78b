// ==============================================================================
// population.rs - Population Genetics Table
// ==============================================================================
// Description: Carrier base rates per population, direct or Hardy-Weinberg derived
// Author: Matt Barham
// Created: 2026-10-16
// Modified: 2026-10-16
// Version: 1.0.0
// ==============================================================================
// Hardy-Weinberg derivation (X-linked model):
//   Incidence in males q² = 1/N
//   Allele frequency    q  = sqrt(1/N),  p = 1 - q
//   Carrier frequency      = 2pq
// ==============================================================================

use std::collections::BTreeMap;
use tracing::debug;

use crate::error::RiskError;
use crate::models::Population;

/// Derive the carrier rate from a "1 in N" disease incidence.
///
/// The result is not rounded.
///
/// # Examples
/// ```
/// use hereditary_risk::population::derive_carrier_rate;
///
/// let rate = derive_carrier_rate(5000.0).unwrap();
/// assert!((rate - 0.027884).abs() < 1e-6);
/// ```
pub fn derive_carrier_rate(incidence_one_in_n: f64) -> Result<f64, RiskError> {
    if !(incidence_one_in_n.is_finite() && incidence_one_in_n > 1.0) {
        return Err(RiskError::InvalidIncidence(incidence_one_in_n));
    }

    let q = allele_frequency(incidence_one_in_n);
    let p = 1.0 - q;
    Ok(2.0 * p * q)
}

/// Mutant allele frequency q = sqrt(1/N)
pub fn allele_frequency(incidence_one_in_n: f64) -> f64 {
    (1.0 / incidence_one_in_n).sqrt()
}

/// Immutable population -> carrier probability mapping
#[derive(Debug, Clone, PartialEq)]
pub struct PopulationTable {
    rates: BTreeMap<Population, f64>,
}

impl PopulationTable {
    /// Table of directly configured empirical carrier rates
    pub fn from_rates(rates: BTreeMap<Population, f64>) -> Self {
        Self { rates }
    }

    /// Table derived once from per-population incidence figures
    pub fn from_incidence(incidence: &BTreeMap<Population, f64>) -> Result<Self, RiskError> {
        let mut rates = BTreeMap::new();
        for (population, one_in_n) in incidence {
            let rate = derive_carrier_rate(*one_in_n)?;
            debug!(
                "Derived carrier rate for {}: 1 in {} -> {:.6}",
                population, one_in_n, rate
            );
            rates.insert(*population, rate);
        }

        Ok(Self { rates })
    }

    /// Carrier probability for a population
    pub fn carrier_rate(&self, population: Population) -> Result<f64, RiskError> {
        self.rates
            .get(&population)
            .copied()
            .ok_or_else(|| RiskError::unrecognized("population", population.as_str()))
    }

    pub fn populations(&self) -> impl Iterator<Item = Population> + '_ {
        self.rates.keys().copied()
    }
}
