// ==============================================================================
// engine.rs - Risk Engine
// ==============================================================================
// Description: Builds both disorder models once from a validated configuration
// Author: Matt Barham
// Created: 2026-10-16
// Modified: 2026-10-16
// Version: 1.0.0
// ==============================================================================

use anyhow::{Context, Result};
use tracing::info;

use crate::autosomal::AutosomalScorer;
use crate::config::EngineConfig;
use crate::error::RiskError;
use crate::evidence::EvidenceUpdater;
use crate::models::{AutosomalQuery, AutosomalRisk, XLinkedQuery, XLinkedRisk};
use crate::population::PopulationTable;
use crate::xlinked::XLinkedCalculator;

/// Read-only engine shared by every query.
///
/// Holds no mutable state, so one instance can serve concurrent callers.
///
/// # Examples
/// ```
/// use hereditary_risk::engine::RiskEngine;
/// use hereditary_risk::models::*;
///
/// let engine = RiskEngine::with_defaults().unwrap();
/// let risk = engine
///     .xlinked(&XLinkedQuery {
///         mother_carrier_evidence: CarrierEvidence::None,
///         mother_history: MaternalHistory::OneGeneration,
///         mother_population: Population::European,
///         father_affected: FatherStatus::NotAffected,
///     })
///     .unwrap();
///
/// assert_eq!(risk.boy_affected, 0.25);
/// assert_eq!(risk.girl_affected, 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct RiskEngine {
    autosomal: AutosomalScorer,
    xlinked: XLinkedCalculator,
}

impl RiskEngine {
    pub fn new(config: &EngineConfig) -> Result<Self> {
        config.validate().context("Engine configuration validation failed")?;

        let autosomal = AutosomalScorer::new(
            PopulationTable::from_rates(config.autosomal_carrier_rates.clone()),
            config.relatedness.clone(),
            config.weights,
            config.relatedness_scale,
        );

        let xlinked_rates = PopulationTable::from_incidence(&config.xlinked_incidence)
            .context("Failed to derive X-linked carrier rates")?;

        let xlinked = XLinkedCalculator::new(
            xlinked_rates,
            EvidenceUpdater::new(config.confirmed_test, config.suspected_test),
            config.family_history_prior,
        );

        info!(
            "Risk engine ready: {} autosomal populations, {} X-linked populations",
            config.autosomal_carrier_rates.len(),
            config.xlinked_incidence.len()
        );

        Ok(Self { autosomal, xlinked })
    }

    pub fn with_defaults() -> Result<Self> {
        Self::new(&EngineConfig::default())
    }

    pub fn autosomal(&self, query: &AutosomalQuery) -> Result<AutosomalRisk, RiskError> {
        self.autosomal.score(query)
    }

    pub fn xlinked(&self, query: &XLinkedQuery) -> Result<XLinkedRisk, RiskError> {
        self.xlinked.assess(query)
    }

    pub fn autosomal_scorer(&self) -> &AutosomalScorer {
        &self.autosomal
    }

    pub fn xlinked_calculator(&self) -> &XLinkedCalculator {
        &self.xlinked
    }
}
