// ==============================================================================
// config.rs - Engine Configuration
// ==============================================================================
// Description: Immutable rate tables, weights and test accuracies for the engine
// Author: Matt Barham
// Created: 2026-10-16
// Modified: 2026-10-16
// Version: 1.0.0
// ==============================================================================
// Defaults:
//   Autosomal carrier rates : south_asian 0.08, african 0.05, european 0.02
//   Relatedness             : unrelated 0.0, second_cousins 0.03, first_cousins 0.125
//   Weights                 : population 2.5, history 1.8, relation 3.0
//   X-linked incidence      : 1 in 3000 / 2500 / 5000 males
//   Test accuracy           : confirmed (0.99, 0.99), suspected (0.60, 0.80)
// ==============================================================================

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;
use tracing::info;

use crate::models::{Population, Relatedness};

/// Errors that can occur while loading or validating configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Coefficients scaling each evidence term of the autosomal linear score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutosomalWeights {
    pub population: f64,
    pub history: f64,
    pub relation: f64,
}

impl Default for AutosomalWeights {
    fn default() -> Self {
        Self {
            population: 2.5,
            history: 1.8,
            relation: 3.0,
        }
    }
}

/// Sensitivity/specificity pair of a carrier test
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TestAccuracy {
    pub sensitivity: f64,
    pub specificity: f64,
}

impl TestAccuracy {
    pub fn new(sensitivity: f64, specificity: f64) -> Self {
        Self {
            sensitivity,
            specificity,
        }
    }

    /// Positive likelihood ratio: sensitivity / (1 - specificity)
    pub fn positive_likelihood_ratio(&self) -> f64 {
        self.sensitivity / (1.0 - self.specificity)
    }
}

/// Complete engine configuration.
///
/// Constructed once at startup and shared read-only by every calculator.
/// A JSON file is merged over the defaults at every level, so it only needs
/// the entries it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub autosomal_carrier_rates: BTreeMap<Population, f64>,
    pub relatedness: BTreeMap<Relatedness, f64>,
    pub weights: AutosomalWeights,
    pub relatedness_scale: f64,
    /// Disease incidence as "1 in N males", per population
    pub xlinked_incidence: BTreeMap<Population, f64>,
    pub confirmed_test: TestAccuracy,
    pub suspected_test: TestAccuracy,
    /// Carrier prior for a mother with affected relatives in her lineage
    pub family_history_prior: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            autosomal_carrier_rates: BTreeMap::from([
                (Population::SouthAsian, 0.08),
                (Population::African, 0.05),
                (Population::European, 0.02),
            ]),
            relatedness: BTreeMap::from([
                (Relatedness::Unrelated, 0.0),
                (Relatedness::SecondCousins, 0.03),
                (Relatedness::FirstCousins, 0.125),
            ]),
            weights: AutosomalWeights::default(),
            relatedness_scale: 10.0,
            xlinked_incidence: BTreeMap::from([
                (Population::SouthAsian, 3000.0),
                (Population::African, 2500.0),
                (Population::European, 5000.0),
            ]),
            confirmed_test: TestAccuracy::new(0.99, 0.99),
            suspected_test: TestAccuracy::new(0.60, 0.80),
            family_history_prior: 0.5,
        }
    }
}

impl EngineConfig {
    /// Load a configuration file and validate it
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_json_str(&contents)?;

        info!("Loaded engine configuration from {:?}", path.as_ref());
        Ok(config)
    }

    /// Merge a JSON override document over the defaults and validate it
    pub fn from_json_str(contents: &str) -> Result<Self, ConfigError> {
        let overrides: Value = serde_json::from_str(contents)?;
        let mut merged = serde_json::to_value(EngineConfig::default())?;
        merge_json(&mut merged, overrides);

        let config: EngineConfig = serde_json::from_value(merged)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every table entry and constant before any calculator is built
    pub fn validate(&self) -> Result<(), ConfigError> {
        for population in Population::ALL {
            if !self.autosomal_carrier_rates.contains_key(population) {
                return Err(ConfigError::Invalid(format!(
                    "autosomal_carrier_rates is missing {}",
                    population
                )));
            }
            if !self.xlinked_incidence.contains_key(population) {
                return Err(ConfigError::Invalid(format!(
                    "xlinked_incidence is missing {}",
                    population
                )));
            }
        }

        for relation in Relatedness::ALL {
            if !self.relatedness.contains_key(relation) {
                return Err(ConfigError::Invalid(format!("relatedness is missing {}", relation)));
            }
        }

        for (population, rate) in &self.autosomal_carrier_rates {
            if !(rate.is_finite() && *rate > 0.0 && *rate < 1.0) {
                return Err(ConfigError::Invalid(format!(
                    "carrier rate for {} must lie strictly in (0, 1), got {}",
                    population, rate
                )));
            }
        }

        for (relation, coefficient) in &self.relatedness {
            if !(coefficient.is_finite() && (0.0..=0.25).contains(coefficient)) {
                return Err(ConfigError::Invalid(format!(
                    "relatedness coefficient for {} must lie in [0, 0.25], got {}",
                    relation, coefficient
                )));
            }
        }

        for (population, incidence) in &self.xlinked_incidence {
            if !(incidence.is_finite() && *incidence > 1.0) {
                return Err(ConfigError::Invalid(format!(
                    "incidence for {} must be greater than 1, got {}",
                    population, incidence
                )));
            }
        }

        let weights = [
            ("weights.population", self.weights.population),
            ("weights.history", self.weights.history),
            ("weights.relation", self.weights.relation),
            ("relatedness_scale", self.relatedness_scale),
        ];
        if let Some((name, value)) = weights.iter().find(|(_, v)| !v.is_finite()) {
            return Err(ConfigError::Invalid(format!("{} must be finite, got {}", name, value)));
        }

        // History and relatedness terms must push the score up
        if let Some((name, value)) = weights[1..].iter().find(|(_, v)| *v <= 0.0) {
            return Err(ConfigError::Invalid(format!("{} must be positive, got {}", name, value)));
        }

        // Closer relation, larger coefficient (Relatedness::ALL is ordered)
        for pair in Relatedness::ALL.windows(2) {
            let (looser, closer) = (pair[0], pair[1]);
            if self.relatedness[&looser] >= self.relatedness[&closer] {
                return Err(ConfigError::Invalid(format!(
                    "relatedness coefficient for {} must exceed {}",
                    closer, looser
                )));
            }
        }

        for (name, test) in [
            ("confirmed_test", &self.confirmed_test),
            ("suspected_test", &self.suspected_test),
        ] {
            if !(test.sensitivity > 0.0 && test.sensitivity <= 1.0) {
                return Err(ConfigError::Invalid(format!(
                    "{}.sensitivity must lie in (0, 1], got {}",
                    name, test.sensitivity
                )));
            }
            if !(test.specificity >= 0.0 && test.specificity < 1.0) {
                return Err(ConfigError::Invalid(format!(
                    "{}.specificity must lie in [0, 1), got {}",
                    name, test.specificity
                )));
            }
        }

        if self.confirmed_test.positive_likelihood_ratio()
            < self.suspected_test.positive_likelihood_ratio()
        {
            return Err(ConfigError::Invalid(
                "confirmed test evidence must be at least as strong as suspected".to_string(),
            ));
        }

        if !(self.family_history_prior > 0.0 && self.family_history_prior < 1.0) {
            return Err(ConfigError::Invalid(format!(
                "family_history_prior must lie strictly in (0, 1), got {}",
                self.family_history_prior
            )));
        }

        Ok(())
    }
}

/// Recursively overlay `overlay` onto `base`; objects merge key by key
fn merge_json(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Object(base), Value::Object(overlay)) => {
            for (key, value) in overlay {
                match base.get_mut(&key) {
                    Some(existing) => merge_json(existing, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (base, overlay) => *base = overlay,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config_is_valid() {
        assert!(EngineConfig::default().validate().is_ok());
    }

    #[test]
    fn test_likelihood_ratios() {
        let config = EngineConfig::default();
        assert!((config.confirmed_test.positive_likelihood_ratio() - 99.0).abs() < 1e-9);
        assert!((config.suspected_test.positive_likelihood_ratio() - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_rejects_bad_carrier_rate() {
        let mut config = EngineConfig::default();
        config.autosomal_carrier_rates.insert(Population::African, 1.0);
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_rejects_bad_relatedness() {
        let mut config = EngineConfig::default();
        config.relatedness.insert(Relatedness::FirstCousins, 0.5);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_perfect_specificity() {
        let mut config = EngineConfig::default();
        config.confirmed_test.specificity = 1.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_weaker_confirmed_test() {
        let mut config = EngineConfig::default();
        config.confirmed_test = TestAccuracy::new(0.5, 0.5);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_negative_history_weight() {
        let mut config = EngineConfig::default();
        config.weights.history = -1.8;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = EngineConfig::default();
        config.weights.relation = 0.0;
        assert!(config.validate().is_err());

        let mut config = EngineConfig::default();
        config.relatedness_scale = -10.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_non_monotone_relatedness() {
        let mut config = EngineConfig::default();
        config.relatedness.insert(Relatedness::SecondCousins, 0.2);
        config.relatedness.insert(Relatedness::FirstCousins, 0.1);
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = EngineConfig::default();
        config.relatedness.insert(Relatedness::SecondCousins, 0.0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_missing_population() {
        let mut config = EngineConfig::default();
        config.xlinked_incidence.remove(&Population::SouthAsian);
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_load_partial_json() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(
            temp_file,
            r#"{{ "weights": {{ "history": 1.0 }},
                 "xlinked_incidence": {{ "european": 10000 }} }}"#
        )
        .unwrap();
        temp_file.flush().unwrap();

        let config = EngineConfig::from_json_file(temp_file.path()).unwrap();
        assert_eq!(config.weights.history, 1.0);
        assert_eq!(config.weights.population, 2.5);
        assert_eq!(config.weights.relation, 3.0);

        // The override replaces one entry; the other populations survive
        assert_eq!(config.xlinked_incidence.len(), 3);
        assert_eq!(config.xlinked_incidence[&Population::European], 10000.0);
        assert_eq!(config.xlinked_incidence[&Population::SouthAsian], 3000.0);
        assert_eq!(config.relatedness[&Relatedness::FirstCousins], 0.125);
    }

    #[test]
    fn test_partial_test_accuracy() {
        let config =
            EngineConfig::from_json_str(r#"{ "suspected_test": { "specificity": 0.9 } }"#).unwrap();
        assert_eq!(config.suspected_test, TestAccuracy::new(0.60, 0.9));
        assert_eq!(config.confirmed_test, TestAccuracy::new(0.99, 0.99));
    }

    #[test]
    fn test_load_invalid_json() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, r#"{{ "family_history_prior": 1.5 }}"#).unwrap();
        temp_file.flush().unwrap();

        assert!(matches!(
            EngineConfig::from_json_file(temp_file.path()),
            Err(ConfigError::Invalid(_))
        ));
    }
}
