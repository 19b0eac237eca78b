// ==============================================================================
// xlinked.rs - X-linked Recessive Transmission Calculator
// ==============================================================================
// Description: Mendelian segregation of an X-linked allele, split by sex
// Author: Matt Barham
// Created: 2026-10-16
// Modified: 2026-10-16
// Version: 1.0.0
// ==============================================================================
// Segregation (m = maternal carrier probability):
//   Son            : affected = 0.5 * m        (single X, always maternal)
//   Daughter, father affected:
//                    affected = 0.5 * m,  carrier = 1 - affected
//   Daughter, father unaffected:
//                    affected = 0.0,      carrier = 0.5 * m
// ==============================================================================

use tracing::debug;

use crate::error::{check_input_probability, ensure_probability, RiskError};
use crate::evidence::EvidenceUpdater;
use crate::models::{FatherStatus, MaternalHistory, Population, XLinkedQuery, XLinkedRisk};
use crate::population::PopulationTable;

/// Offspring outcome probabilities for one pairing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transmission {
    pub boy_affected: f64,
    pub girl_carrier: f64,
    pub girl_affected: f64,
}

/// Exact Mendelian transmission of an X-linked recessive allele.
///
/// `maternal_carrier_probability` must already be a valid probability; it is
/// not clamped here.
///
/// # Examples
/// ```
/// use hereditary_risk::models::FatherStatus;
/// use hereditary_risk::xlinked::transmit;
///
/// let t = transmit(1.0, FatherStatus::Affected);
/// assert_eq!(t.boy_affected, 0.5);
/// assert_eq!(t.girl_affected, 0.5);
/// assert_eq!(t.girl_carrier, 0.5);
/// ```
pub fn transmit(maternal_carrier_probability: f64, father: FatherStatus) -> Transmission {
    let maternal_transmission = 0.5 * maternal_carrier_probability;

    let (girl_carrier, girl_affected) = if father.affected_probability() == 1.0 {
        // Every daughter gets the father's mutant X
        (1.0 - maternal_transmission, maternal_transmission)
    } else {
        (maternal_transmission, 0.0)
    };

    Transmission {
        boy_affected: maternal_transmission,
        girl_carrier,
        girl_affected,
    }
}

/// Resolves the maternal carrier prior and applies transmission
#[derive(Debug, Clone)]
pub struct XLinkedCalculator {
    carrier_rates: PopulationTable,
    updater: EvidenceUpdater,
    family_history_prior: f64,
}

impl XLinkedCalculator {
    pub fn new(
        carrier_rates: PopulationTable,
        updater: EvidenceUpdater,
        family_history_prior: f64,
    ) -> Self {
        Self {
            carrier_rates,
            updater,
            family_history_prior,
        }
    }

    /// Maternal carrier prior before test evidence.
    ///
    /// Affected relatives in the direct maternal lineage override the
    /// population base rate with the Mendelian prior.
    pub fn maternal_prior(
        &self,
        population: Population,
        history: MaternalHistory,
    ) -> Result<f64, RiskError> {
        let base_rate = self.carrier_rates.carrier_rate(population)?;

        if history.has_affected_relatives() {
            Ok(self.family_history_prior)
        } else {
            Ok(base_rate)
        }
    }

    /// Posterior maternal carrier probability
    pub fn maternal_carrier_probability(&self, query: &XLinkedQuery) -> Result<f64, RiskError> {
        let prior = self.maternal_prior(query.mother_population, query.mother_history)?;
        let posterior = self.updater.update(prior, query.mother_carrier_evidence);
        ensure_probability("maternal carrier probability", posterior)
    }

    /// Sex-specific offspring risk for a query
    pub fn assess(&self, query: &XLinkedQuery) -> Result<XLinkedRisk, RiskError> {
        let maternal = self.maternal_carrier_probability(query)?;
        let risk = self.assess_with_probability(maternal, query.father_affected)?;

        debug!(
            "X-linked risk: population={} history={} evidence={} father={} mother_p={:.6} boy={:.6} girl_carrier={:.6} girl_affected={:.6}",
            query.mother_population,
            query.mother_history,
            query.mother_carrier_evidence,
            query.father_affected,
            maternal,
            risk.boy_affected,
            risk.girl_carrier,
            risk.girl_affected
        );

        Ok(risk)
    }

    /// Offspring risk for an already-known maternal carrier probability
    pub fn assess_with_probability(
        &self,
        maternal_carrier_probability: f64,
        father: FatherStatus,
    ) -> Result<XLinkedRisk, RiskError> {
        let maternal =
            check_input_probability("maternal carrier probability", maternal_carrier_probability)?;
        let t = transmit(maternal, father);

        ensure_probability("girl carrier + girl affected", t.girl_carrier + t.girl_affected)?;

        Ok(XLinkedRisk {
            maternal_carrier_probability: maternal,
            boy_affected: ensure_probability("boy affected", t.boy_affected)?,
            girl_carrier: ensure_probability("girl carrier", t.girl_carrier)?,
            girl_affected: ensure_probability("girl affected", t.girl_affected)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{EngineConfig, TestAccuracy};
    use crate::models::CarrierEvidence;

    fn calculator() -> XLinkedCalculator {
        let config = EngineConfig::default();
        XLinkedCalculator::new(
            PopulationTable::from_incidence(&config.xlinked_incidence).unwrap(),
            EvidenceUpdater::new(config.confirmed_test, config.suspected_test),
            config.family_history_prior,
        )
    }

    fn query(
        evidence: CarrierEvidence,
        history: MaternalHistory,
        population: Population,
        father: FatherStatus,
    ) -> XLinkedQuery {
        XLinkedQuery {
            mother_carrier_evidence: evidence,
            mother_history: history,
            mother_population: population,
            father_affected: father,
        }
    }

    #[test]
    fn test_transmission_father_unaffected() {
        let t = transmit(0.8, FatherStatus::NotAffected);
        assert!((t.boy_affected - 0.4).abs() < 1e-12);
        assert!((t.girl_carrier - 0.4).abs() < 1e-12);
        assert_eq!(t.girl_affected, 0.0);
    }

    #[test]
    fn test_transmission_father_affected() {
        let t = transmit(0.8, FatherStatus::Affected);
        assert!((t.boy_affected - 0.4).abs() < 1e-12);
        assert!((t.girl_affected - 0.4).abs() < 1e-12);
        assert!((t.girl_carrier - 0.6).abs() < 1e-12);

        // Non-carrier mother, affected father: every daughter is a carrier
        let t = transmit(0.0, FatherStatus::Affected);
        assert_eq!(t.boy_affected, 0.0);
        assert_eq!(t.girl_carrier, 1.0);
        assert_eq!(t.girl_affected, 0.0);
    }

    #[test]
    fn test_transmission_invariants() {
        for i in 0..=100 {
            let m = i as f64 / 100.0;
            for father in FatherStatus::ALL {
                let t = transmit(m, *father);
                assert_eq!(t.boy_affected, 0.5 * m);
                assert!(t.girl_carrier + t.girl_affected <= 1.0 + 1e-12);
                assert!(t.girl_affected <= t.girl_carrier + t.girl_affected);
            }
        }
    }

    #[test]
    fn test_population_prior() {
        let calculator = calculator();
        let prior = calculator
            .maternal_prior(Population::African, MaternalHistory::None)
            .unwrap();
        assert!((prior - 0.0392).abs() < 1e-12);
    }

    #[test]
    fn test_history_overrides_population_prior() {
        let calculator = calculator();
        for population in Population::ALL {
            for history in [MaternalHistory::OneGeneration, MaternalHistory::MultipleGenerations] {
                assert_eq!(calculator.maternal_prior(*population, history).unwrap(), 0.5);
            }
        }
    }

    #[test]
    fn test_confirmed_evidence_raises_boy_risk() {
        let calculator = calculator();
        let confirmed = calculator
            .assess(&query(
                CarrierEvidence::Confirmed,
                MaternalHistory::None,
                Population::African,
                FatherStatus::Affected,
            ))
            .unwrap();
        let none = calculator
            .assess(&query(
                CarrierEvidence::None,
                MaternalHistory::None,
                Population::African,
                FatherStatus::Affected,
            ))
            .unwrap();

        assert!(confirmed.boy_affected > none.boy_affected);
        assert!((none.boy_affected - 0.0196).abs() < 1e-12);
        assert!((none.girl_carrier - 0.9804).abs() < 1e-12);
        assert!((confirmed.maternal_carrier_probability - 0.8015532055518835).abs() < 1e-9);
    }

    #[test]
    fn test_suspected_with_family_history() {
        let risk = calculator()
            .assess(&query(
                CarrierEvidence::Suspected,
                MaternalHistory::OneGeneration,
                Population::African,
                FatherStatus::Affected,
            ))
            .unwrap();

        assert!((risk.maternal_carrier_probability - 0.75).abs() < 1e-12);
        assert!((risk.boy_affected - 0.375).abs() < 1e-12);
        assert!((risk.girl_affected - 0.375).abs() < 1e-12);
        assert!((risk.girl_carrier - 0.625).abs() < 1e-12);
        assert!(risk.girl_unaffected().abs() < 1e-12);
    }

    #[test]
    fn test_all_queries_respect_bounds() {
        let calculator = calculator();
        for evidence in CarrierEvidence::ALL {
            for history in MaternalHistory::ALL {
                for population in Population::ALL {
                    for father in FatherStatus::ALL {
                        let risk = calculator
                            .assess(&query(*evidence, *history, *population, *father))
                            .unwrap();
                        assert_eq!(risk.boy_affected, 0.5 * risk.maternal_carrier_probability);
                        assert!(risk.girl_carrier + risk.girl_affected <= 1.0);
                    }
                }
            }
        }
    }

    #[test]
    fn test_rejects_invalid_maternal_probability() {
        let err = calculator()
            .assess_with_probability(1.5, FatherStatus::NotAffected)
            .unwrap_err();
        assert!(matches!(err, RiskError::InvalidProbability { .. }));
    }

    #[test]
    fn test_missing_population() {
        let calculator = XLinkedCalculator::new(
            PopulationTable::from_rates(Default::default()),
            EvidenceUpdater::new(TestAccuracy::new(0.99, 0.99), TestAccuracy::new(0.6, 0.8)),
            0.5,
        );
        let err = calculator
            .assess(&query(
                CarrierEvidence::None,
                MaternalHistory::OneGeneration,
                Population::European,
                FatherStatus::NotAffected,
            ))
            .unwrap_err();
        assert!(matches!(err, RiskError::UnrecognizedCategory { .. }));
    }
}
