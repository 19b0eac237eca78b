// ==============================================================================
// report.rs - Risk Presentation
// ==============================================================================
// Description: Percentage conversion and risk-level bucketing for display
// Author: Matt Barham
// Created: 2026-10-16
// Modified: 2026-10-16
// Version: 1.0.0
// ==============================================================================
// Presentation only. Thresholds are a product decision, not engine behavior:
//   Low    : < 5 %
//   Medium : < 15 %
//   High   : otherwise
// ==============================================================================

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::{AutosomalRisk, Sex, XLinkedRisk};
use crate::simulation::SimulationReport;

pub const DEFAULT_PRECISION: u32 = 3;

/// Beyond this many decimals an f64 percentage has nothing left to round
pub const MAX_PRECISION: u32 = 15;

/// Convert a probability to a percentage rounded to `precision` decimals
pub fn to_percent(probability: f64, precision: u32) -> f64 {
    let factor = 10f64.powi(precision.min(MAX_PRECISION) as i32);
    (probability * 100.0 * factor).round() / factor
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn from_percent(percent: f64) -> Self {
        if percent < 5.0 {
            RiskLevel::Low
        } else if percent < 15.0 {
            RiskLevel::Medium
        } else {
            RiskLevel::High
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskLevel::Low => write!(f, "Low"),
            RiskLevel::Medium => write!(f, "Medium"),
            RiskLevel::High => write!(f, "High"),
        }
    }
}

/// Display form of an autosomal result
#[derive(Debug, Clone, Serialize)]
pub struct AutosomalReport {
    pub boy: f64,
    pub girl: f64,
    pub risk_level: RiskLevel,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub simulation: Option<SimulationReport>,
}

impl AutosomalReport {
    pub fn new(risk: &AutosomalRisk, precision: u32) -> Self {
        let boy = to_percent(risk.for_sex(Sex::Boy), precision);
        let girl = to_percent(risk.for_sex(Sex::Girl), precision);

        Self {
            boy,
            girl,
            risk_level: RiskLevel::from_percent((boy + girl) / 2.0),
            simulation: None,
        }
    }
}

impl fmt::Display for AutosomalReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Risk if BOY  : {}%", self.boy)?;
        writeln!(f, "Risk if GIRL : {}%", self.girl)?;
        write!(f, "Risk level   : {}", self.risk_level)?;
        if let Some(sim) = &self.simulation {
            write!(f, "\n{}", SimulationLine(sim))?;
        }
        Ok(())
    }
}

/// Display form of an X-linked result
#[derive(Debug, Clone, Serialize)]
pub struct XLinkedReport {
    pub maternal_carrier: f64,
    pub boy_affected: f64,
    pub girl_carrier: f64,
    pub girl_affected: f64,
    pub girl_unaffected: f64,
    pub risk_level: RiskLevel,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub simulation: Option<SimulationReport>,
}

impl XLinkedReport {
    pub fn new(risk: &XLinkedRisk, precision: u32) -> Self {
        let boy_affected = to_percent(risk.boy_affected, precision);

        Self {
            maternal_carrier: to_percent(risk.maternal_carrier_probability, precision),
            boy_affected,
            girl_carrier: to_percent(risk.girl_carrier, precision),
            girl_affected: to_percent(risk.girl_affected, precision),
            girl_unaffected: to_percent(risk.girl_unaffected(), precision),
            risk_level: RiskLevel::from_percent(boy_affected),
            simulation: None,
        }
    }
}

impl fmt::Display for XLinkedReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Mom carrier probability : {}%", self.maternal_carrier)?;
        writeln!(f, "Risk if BOY (affected)  : {}%", self.boy_affected)?;
        writeln!(f, "Risk if GIRL (carrier)  : {}%", self.girl_carrier)?;
        writeln!(f, "Risk if GIRL (affected) : {}%", self.girl_affected)?;
        writeln!(f, "GIRL unaffected         : {}%", self.girl_unaffected)?;
        write!(f, "Risk level              : {}", self.risk_level)?;
        if let Some(sim) = &self.simulation {
            write!(f, "\n{}", SimulationLine(sim))?;
        }
        Ok(())
    }
}

struct SimulationLine<'a>(&'a SimulationReport);

impl fmt::Display for SimulationLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Simulated (n={}, seed={}) : {:.4} vs {:.4}, error {:.5}",
            self.0.trials, self.0.seed, self.0.observed, self.0.expected, self.0.absolute_error
        )
    }
}
