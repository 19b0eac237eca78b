// ==============================================================================
// evidence.rs - Bayesian Evidence Updater
// ==============================================================================
// Description: Revises a carrier prior with the likelihood ratio of a test result
// Author: Matt Barham
// Created: 2026-10-16
// Modified: 2026-10-16
// Version: 1.0.0
// ==============================================================================
// Algorithm:
//   odds      = p / (1 - p)              (p >= 1.0 short-circuits to 1.0)
//   LR+       = sensitivity / (1 - specificity)
//   posterior = odds * LR+ / (1 + odds * LR+)
// ==============================================================================

use crate::config::TestAccuracy;
use crate::models::CarrierEvidence;

/// Bayesian odds updater keyed by evidence strength
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EvidenceUpdater {
    confirmed: TestAccuracy,
    suspected: TestAccuracy,
}

impl EvidenceUpdater {
    pub fn new(confirmed: TestAccuracy, suspected: TestAccuracy) -> Self {
        Self {
            confirmed,
            suspected,
        }
    }

    /// Test accuracy for an evidence strength, `None` when there is no evidence
    pub fn accuracy(&self, evidence: CarrierEvidence) -> Option<TestAccuracy> {
        match evidence {
            CarrierEvidence::None => None,
            CarrierEvidence::Suspected => Some(self.suspected),
            CarrierEvidence::Confirmed => Some(self.confirmed),
        }
    }

    /// Posterior carrier probability given the evidence.
    ///
    /// `CarrierEvidence::None` returns the prior unchanged. A prior of 1.0 or
    /// more is already certain and returns 1.0.
    ///
    /// # Examples
    /// ```
    /// use hereditary_risk::config::TestAccuracy;
    /// use hereditary_risk::evidence::EvidenceUpdater;
    /// use hereditary_risk::models::CarrierEvidence;
    ///
    /// let updater = EvidenceUpdater::new(
    ///     TestAccuracy::new(0.99, 0.99),
    ///     TestAccuracy::new(0.60, 0.80),
    /// );
    ///
    /// // LR+ = 0.60 / 0.20 = 3, so even odds become 3:1
    /// let posterior = updater.update(0.5, CarrierEvidence::Suspected);
    /// assert!((posterior - 0.75).abs() < 1e-12);
    /// ```
    pub fn update(&self, prior_probability: f64, evidence: CarrierEvidence) -> f64 {
        let Some(accuracy) = self.accuracy(evidence) else {
            return prior_probability;
        };

        if prior_probability >= 1.0 {
            return 1.0;
        }

        let prior_odds = prior_probability / (1.0 - prior_probability);
        let posterior_odds = prior_odds * accuracy.positive_likelihood_ratio();
        posterior_odds / (1.0 + posterior_odds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn updater() -> EvidenceUpdater {
        EvidenceUpdater::new(TestAccuracy::new(0.99, 0.99), TestAccuracy::new(0.60, 0.80))
    }

    #[test]
    fn test_identity_without_evidence() {
        let updater = updater();
        for prior in [0.0, 0.0392, 0.25, 0.5, 0.999, 1.0] {
            assert_eq!(updater.update(prior, CarrierEvidence::None), prior);
        }
    }

    #[test]
    fn test_certain_prior_short_circuits() {
        let updater = updater();
        assert_eq!(updater.update(1.0, CarrierEvidence::Suspected), 1.0);
        assert_eq!(updater.update(1.0, CarrierEvidence::Confirmed), 1.0);
    }

    #[test]
    fn test_zero_prior_stays_zero() {
        assert_eq!(updater().update(0.0, CarrierEvidence::Confirmed), 0.0);
    }

    #[test]
    fn test_confirmed_posterior() {
        // Even odds * 99 -> 0.99
        let posterior = updater().update(0.5, CarrierEvidence::Confirmed);
        assert!((posterior - 0.99).abs() < 1e-9);
    }

    #[test]
    fn test_confirmed_at_least_as_strong_as_suspected() {
        let updater = updater();
        for i in 1..1000 {
            let prior = i as f64 / 1000.0;
            let confirmed = updater.update(prior, CarrierEvidence::Confirmed);
            let suspected = updater.update(prior, CarrierEvidence::Suspected);
            assert!(
                confirmed >= suspected,
                "prior={} confirmed={} suspected={}",
                prior,
                confirmed,
                suspected
            );
            assert!(suspected >= prior);
            assert!((0.0..=1.0).contains(&confirmed));
        }
    }

    #[test]
    fn test_accuracy_lookup() {
        let updater = updater();
        assert_eq!(updater.accuracy(CarrierEvidence::None), None);
        assert_eq!(
            updater.accuracy(CarrierEvidence::Suspected),
            Some(TestAccuracy::new(0.60, 0.80))
        );
    }
}
