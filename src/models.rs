// ==============================================================================
// models.rs - Risk Query Data Models
// ==============================================================================
// Description: Categorical inputs, queries and results for both disorder models
// Author: Matt Barham
// Created: 2026-10-16
// Modified: 2026-10-16
// Version: 1.0.0
// ==============================================================================

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::RiskError;

/// Labels are matched case-insensitively after trimming
fn normalize(label: &str) -> String {
    label.trim().to_lowercase()
}

/// Population of the parents, used to resolve carrier base rates
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Population {
    SouthAsian,
    African,
    European,
}

impl Population {
    pub const ALL: &'static [Population] = &[
        Population::SouthAsian,
        Population::African,
        Population::European,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Population::SouthAsian => "south_asian",
            Population::African => "african",
            Population::European => "european",
        }
    }
}

impl FromStr for Population {
    type Err = RiskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "south_asian" => Ok(Population::SouthAsian),
            "african" => Ok(Population::African),
            "european" => Ok(Population::European),
            _ => Err(RiskError::unrecognized("population", s)),
        }
    }
}

impl fmt::Display for Population {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Relationship between the prospective parents
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Relatedness {
    Unrelated,
    SecondCousins,
    FirstCousins,
}

impl Relatedness {
    pub const ALL: &'static [Relatedness] = &[
        Relatedness::Unrelated,
        Relatedness::SecondCousins,
        Relatedness::FirstCousins,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Relatedness::Unrelated => "unrelated",
            Relatedness::SecondCousins => "second_cousins",
            Relatedness::FirstCousins => "first_cousins",
        }
    }
}

impl FromStr for Relatedness {
    type Err = RiskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "unrelated" => Ok(Relatedness::Unrelated),
            "second_cousins" => Ok(Relatedness::SecondCousins),
            "first_cousins" => Ok(Relatedness::FirstCousins),
            _ => Err(RiskError::unrecognized("relation", s)),
        }
    }
}

impl fmt::Display for Relatedness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Family history of an autosomal recessive disorder
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AutosomalHistory {
    None,
    OneParent,
    BothParents,
}

impl AutosomalHistory {
    pub const ALL: &'static [AutosomalHistory] = &[
        AutosomalHistory::None,
        AutosomalHistory::OneParent,
        AutosomalHistory::BothParents,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AutosomalHistory::None => "none",
            AutosomalHistory::OneParent => "one_parent",
            AutosomalHistory::BothParents => "both_parents",
        }
    }
}

impl FromStr for AutosomalHistory {
    type Err = RiskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "none" => Ok(AutosomalHistory::None),
            "one_parent" => Ok(AutosomalHistory::OneParent),
            "both_parents" => Ok(AutosomalHistory::BothParents),
            _ => Err(RiskError::unrecognized("history", s)),
        }
    }
}

impl fmt::Display for AutosomalHistory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Affected relatives in the mother's direct lineage (X-linked model)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaternalHistory {
    None,
    OneGeneration,
    MultipleGenerations,
}

impl MaternalHistory {
    pub const ALL: &'static [MaternalHistory] = &[
        MaternalHistory::None,
        MaternalHistory::OneGeneration,
        MaternalHistory::MultipleGenerations,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MaternalHistory::None => "none",
            MaternalHistory::OneGeneration => "one_generation",
            MaternalHistory::MultipleGenerations => "multiple_generations",
        }
    }
}

impl FromStr for MaternalHistory {
    type Err = RiskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "none" => Ok(MaternalHistory::None),
            "one_generation" => Ok(MaternalHistory::OneGeneration),
            "multiple_generations" => Ok(MaternalHistory::MultipleGenerations),
            _ => Err(RiskError::unrecognized("mother_history", s)),
        }
    }
}

impl fmt::Display for MaternalHistory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Strength of clinical test evidence that the mother is a carrier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CarrierEvidence {
    None,
    Suspected,
    Confirmed,
}

impl CarrierEvidence {
    pub const ALL: &'static [CarrierEvidence] = &[
        CarrierEvidence::None,
        CarrierEvidence::Suspected,
        CarrierEvidence::Confirmed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CarrierEvidence::None => "none",
            CarrierEvidence::Suspected => "suspected",
            CarrierEvidence::Confirmed => "confirmed",
        }
    }
}

impl FromStr for CarrierEvidence {
    type Err = RiskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "none" => Ok(CarrierEvidence::None),
            "suspected" => Ok(CarrierEvidence::Suspected),
            "confirmed" => Ok(CarrierEvidence::Confirmed),
            _ => Err(RiskError::unrecognized("mother_carrier_evidence", s)),
        }
    }
}

impl fmt::Display for CarrierEvidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Observed phenotype of the father
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FatherStatus {
    Affected,
    NotAffected,
}

impl FatherStatus {
    pub const ALL: &'static [FatherStatus] = &[
        FatherStatus::Affected,
        FatherStatus::NotAffected,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FatherStatus::Affected => "affected",
            FatherStatus::NotAffected => "not_affected",
        }
    }
}

impl FromStr for FatherStatus {
    type Err = RiskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "affected" => Ok(FatherStatus::Affected),
            "not_affected" => Ok(FatherStatus::NotAffected),
            _ => Err(RiskError::unrecognized("father_affected", s)),
        }
    }
}

impl fmt::Display for FatherStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sex of the prospective child
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sex {
    Boy,
    Girl,
}

impl Sex {
    pub const ALL: &'static [Sex] = &[
        Sex::Boy,
        Sex::Girl,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Sex::Boy => "boy",
            Sex::Girl => "girl",
        }
    }
}

impl FromStr for Sex {
    type Err = RiskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "boy" => Ok(Sex::Boy),
            "girl" => Ok(Sex::Girl),
            _ => Err(RiskError::unrecognized("sex", s)),
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AutosomalHistory {
    /// Ordinal evidence weight: none=0, one_parent=1, both_parents=2
    pub fn ordinal(&self) -> u8 {
        match self {
            AutosomalHistory::None => 0,
            AutosomalHistory::OneParent => 1,
            AutosomalHistory::BothParents => 2,
        }
    }

    /// Derive the history category from a simple pedigree.
    ///
    /// Affected parents take precedence. Without an affected parent, two or
    /// more affected grandparents count as `BothParents` and a single one as
    /// `OneParent`.
    pub fn from_pedigree(
        mother_affected: bool,
        father_affected: bool,
        affected_grandparents: usize,
    ) -> Self {
        match (mother_affected, father_affected) {
            (true, true) => AutosomalHistory::BothParents,
            (true, false) | (false, true) => AutosomalHistory::OneParent,
            (false, false) => match affected_grandparents {
                0 => AutosomalHistory::None,
                1 => AutosomalHistory::OneParent,
                _ => AutosomalHistory::BothParents,
            },
        }
    }
}

impl MaternalHistory {
    pub fn has_affected_relatives(&self) -> bool {
        !matches!(self, MaternalHistory::None)
    }
}

impl FatherStatus {
    /// The father's phenotype is observed directly, so this is 1.0 or 0.0
    pub fn affected_probability(&self) -> f64 {
        match self {
            FatherStatus::Affected => 1.0,
            FatherStatus::NotAffected => 0.0,
        }
    }
}

/// Autosomal recessive query (e.g., thalassemia)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AutosomalQuery {
    pub mother_population: Population,
    pub father_population: Population,
    pub relation: Relatedness,
    pub history: AutosomalHistory,
}

/// Autosomal recessive result, valid for either sex
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AutosomalRisk {
    /// Probability the child is affected (0.0 to 1.0)
    pub probability: f64,
}

impl AutosomalRisk {
    /// Risk for a child of the given sex.
    ///
    /// The allele is not sex-linked, so `sex` is accepted for symmetry with
    /// the X-linked model and ignored.
    pub fn for_sex(&self, _sex: Sex) -> f64 {
        self.probability
    }
}

/// X-linked recessive query (e.g., hemophilia)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct XLinkedQuery {
    pub mother_carrier_evidence: CarrierEvidence,
    pub mother_history: MaternalHistory,
    pub mother_population: Population,
    pub father_affected: FatherStatus,
}

/// X-linked recessive result, split by sex
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct XLinkedRisk {
    /// Posterior probability the mother is a carrier, exposed for auditing
    pub maternal_carrier_probability: f64,
    pub boy_affected: f64,
    pub girl_carrier: f64,
    pub girl_affected: f64,
}

impl XLinkedRisk {
    pub fn boy_unaffected(&self) -> f64 {
        1.0 - self.boy_affected
    }

    /// Daughter neither affected nor a carrier
    pub fn girl_unaffected(&self) -> f64 {
        (1.0 - self.girl_carrier - self.girl_affected).max(0.0)
    }
}
