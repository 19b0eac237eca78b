// ==============================================================================
// autosomal.rs - Autosomal Recessive Risk Scorer
// ==============================================================================
// Description: Logistic combination of carrier, relatedness and history evidence
// Author: Matt Barham
// Created: 2026-10-16
// Modified: 2026-10-16
// Version: 1.0.0
// ==============================================================================
// Algorithm:
//   carrier_score  = ln(P_mother) + ln(P_father)
//   history_score  = ordinal(history)                 (0, 1, 2)
//   relation_score = coefficient(relation) * scale     (scale = 10)
//   S              = W_pop * carrier + W_hist * history + W_rel * relation
//   probability    = 1 / (1 + e^-S)
// ==============================================================================

use std::collections::BTreeMap;
use tracing::debug;

use crate::config::AutosomalWeights;
use crate::error::{ensure_probability, RiskError};
use crate::models::{AutosomalHistory, AutosomalQuery, AutosomalRisk, Population, Relatedness};
use crate::population::PopulationTable;

/// Logistic function
pub fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// Individual evidence terms before weighting
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EvidenceTerms {
    pub carrier_score: f64,
    pub history_score: f64,
    pub relation_score: f64,
}

/// Autosomal recessive scorer (e.g., thalassemia).
///
/// The result does not depend on the child's sex.
#[derive(Debug, Clone)]
pub struct AutosomalScorer {
    carrier_rates: PopulationTable,
    relatedness: BTreeMap<Relatedness, f64>,
    weights: AutosomalWeights,
    relatedness_scale: f64,
}

impl AutosomalScorer {
    pub fn new(
        carrier_rates: PopulationTable,
        relatedness: BTreeMap<Relatedness, f64>,
        weights: AutosomalWeights,
        relatedness_scale: f64,
    ) -> Self {
        Self {
            carrier_rates,
            relatedness,
            weights,
            relatedness_scale,
        }
    }

    pub fn relatedness_coefficient(&self, relation: Relatedness) -> Result<f64, RiskError> {
        self.relatedness
            .get(&relation)
            .copied()
            .ok_or_else(|| RiskError::unrecognized("relation", relation.as_str()))
    }

    /// Resolve the unweighted evidence terms for a query
    pub fn terms(&self, query: &AutosomalQuery) -> Result<EvidenceTerms, RiskError> {
        let p_mother = self.carrier_rates.carrier_rate(query.mother_population)?;
        let p_father = self.carrier_rates.carrier_rate(query.father_population)?;

        Ok(EvidenceTerms {
            carrier_score: p_mother.ln() + p_father.ln(),
            history_score: f64::from(query.history.ordinal()),
            relation_score: self.relatedness_coefficient(query.relation)? * self.relatedness_scale,
        })
    }

    /// Weighted linear score S before the logistic transform
    pub fn linear_score(&self, query: &AutosomalQuery) -> Result<f64, RiskError> {
        let terms = self.terms(query)?;

        Ok(self.weights.population * terms.carrier_score
            + self.weights.history * terms.history_score
            + self.weights.relation * terms.relation_score)
    }

    /// Probability that a child of these parents is affected
    pub fn score(&self, query: &AutosomalQuery) -> Result<AutosomalRisk, RiskError> {
        let s = self.linear_score(query)?;
        let probability = ensure_probability("autosomal probability", sigmoid(s))?;

        debug!(
            "Autosomal score: mother={} father={} relation={} history={} S={:.6} p={:.6e}",
            query.mother_population, query.father_population, query.relation, query.history, s,
            probability
        );

        Ok(AutosomalRisk { probability })
    }

    /// Positional convenience over [`AutosomalScorer::score`]
    pub fn score_parts(
        &self,
        mother_population: Population,
        father_population: Population,
        relation: Relatedness,
        history: AutosomalHistory,
    ) -> Result<AutosomalRisk, RiskError> {
        self.score(&AutosomalQuery {
            mother_population,
            father_population,
            relation,
            history,
        })
    }
}
