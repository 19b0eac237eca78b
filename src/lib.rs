// ==============================================================================
// lib.rs - Hereditary Risk Engine Library
// ==============================================================================
// Description: Library interface for inherited-disease risk estimation modules
// Author: Matt Barham
// Created: 2026-10-16
// Modified: 2026-10-16
// Version: 1.0.0
// ==============================================================================

pub mod error;
pub mod models;
pub mod config;
pub mod population;
pub mod evidence;
pub mod autosomal;
pub mod xlinked;
pub mod simulation;
pub mod engine;
pub mod report;
pub mod audit;

pub use config::EngineConfig;
pub use engine::RiskEngine;
pub use error::RiskError;
