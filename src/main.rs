// ==============================================================================
// main.rs - Hereditary Risk Engine Entry Point
// ==============================================================================
// Description: Command line front end for autosomal and X-linked risk queries
// Author: Matt Barham
// Created: 2026-10-16
// Modified: 2026-10-16
// Version: 1.0.0
// ==============================================================================

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::str::FromStr;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use hereditary_risk::audit::{self, AuditEventType};
use hereditary_risk::models::{
    AutosomalHistory, AutosomalQuery, CarrierEvidence, FatherStatus, MaternalHistory, Population,
    Relatedness, XLinkedQuery,
};
use hereditary_risk::report::{AutosomalReport, XLinkedReport, DEFAULT_PRECISION};
use hereditary_risk::simulation::MonteCarloValidator;
use hereditary_risk::{EngineConfig, RiskEngine};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON configuration overriding the built-in rate tables
    #[arg(long, env = "RISK_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Decimal places for percentages
    #[arg(long, default_value_t = DEFAULT_PRECISION, global = true)]
    precision: u32,

    /// Corroborate the result with a Monte Carlo run of this many trials
    #[arg(long, global = true)]
    validate: Option<u64>,

    /// Seed for the Monte Carlo run
    #[arg(long, default_value_t = 42, global = true)]
    seed: u64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Autosomal recessive risk (e.g., thalassemia)
    Autosomal {
        /// south_asian, african or european
        #[arg(long)]
        mother_population: String,

        #[arg(long)]
        father_population: String,

        /// unrelated, second_cousins or first_cousins
        #[arg(long, default_value = "unrelated")]
        relation: String,

        /// none, one_parent or both_parents
        #[arg(long, default_value = "none")]
        history: String,
    },

    /// X-linked recessive risk (e.g., hemophilia)
    XLinked {
        /// Mother's carrier test evidence: none, suspected or confirmed
        #[arg(long, default_value = "none")]
        evidence: String,

        /// Mother's lineage: none, one_generation or multiple_generations
        #[arg(long, default_value = "none")]
        history: String,

        #[arg(long)]
        mother_population: String,

        /// affected or not_affected
        #[arg(long, default_value = "not_affected")]
        father: String,
    },
}

/// Parse a categorical flag, auditing rejected input
fn parse_category<T>(model: &str, value: &str) -> Result<T>
where
    T: FromStr<Err = hereditary_risk::RiskError>,
{
    value.parse::<T>().map_err(|e| {
        audit::log_event(
            AuditEventType::InvalidInput,
            Some(model),
            serde_json::json!({ "input": value, "error": e.to_string() }),
        );
        anyhow::Error::new(e)
    })
}

fn load_config(path: Option<&PathBuf>) -> Result<EngineConfig> {
    let Some(path) = path else {
        return Ok(EngineConfig::default());
    };

    match EngineConfig::from_json_file(path) {
        Ok(config) => {
            audit::log_event(
                AuditEventType::ConfigurationLoaded,
                None,
                serde_json::json!({ "path": path }),
            );
            Ok(config)
        }
        Err(e) => {
            audit::log_event(
                AuditEventType::ConfigurationRejected,
                None,
                serde_json::json!({ "path": path, "error": e.to_string() }),
            );
            Err(e).with_context(|| format!("Failed to load configuration {:?}", path))
        }
    }
}

fn main() -> Result<()> {
    // Initialize tracing (stderr, so stdout only carries results)
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hereditary_risk=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    let config = load_config(args.config.as_ref())?;
    let engine = RiskEngine::new(&config)?;
    let validator = MonteCarloValidator::new(args.seed);
    if let Some(trials) = args.validate {
        info!("Monte Carlo validation enabled: {} trials, seed {}", trials, validator.seed());
    }

    let output = match &args.command {
        Command::Autosomal {
            mother_population,
            father_population,
            relation,
            history,
        } => {
            let query = AutosomalQuery {
                mother_population: parse_category::<Population>("autosomal", mother_population)?,
                father_population: parse_category::<Population>("autosomal", father_population)?,
                relation: parse_category::<Relatedness>("autosomal", relation)?,
                history: parse_category::<AutosomalHistory>("autosomal", history)?,
            };

            info!("Computing autosomal recessive risk");
            let risk = engine.autosomal(&query).context("Autosomal risk calculation failed")?;

            let mut report = AutosomalReport::new(&risk, args.precision);
            if let Some(trials) = args.validate {
                let sim = validator.validate(risk.probability, trials)?;
                audit::log_event(
                    AuditEventType::SimulationCompleted,
                    Some("autosomal"),
                    serde_json::json!(sim),
                );
                report.simulation = Some(sim);
            }

            audit::log_event(
                AuditEventType::AssessmentCompleted,
                Some("autosomal"),
                serde_json::json!({ "query": query, "result": risk }),
            );

            if args.json {
                serde_json::to_string_pretty(&report)?
            } else {
                report.to_string()
            }
        }

        Command::XLinked {
            evidence,
            history,
            mother_population,
            father,
        } => {
            let query = XLinkedQuery {
                mother_carrier_evidence: parse_category::<CarrierEvidence>("x_linked", evidence)?,
                mother_history: parse_category::<MaternalHistory>("x_linked", history)?,
                mother_population: parse_category::<Population>("x_linked", mother_population)?,
                father_affected: parse_category::<FatherStatus>("x_linked", father)?,
            };

            info!("Computing X-linked recessive risk");
            let risk = engine.xlinked(&query).context("X-linked risk calculation failed")?;

            let mut report = XLinkedReport::new(&risk, args.precision);
            if let Some(trials) = args.validate {
                // Girl-affected depends on both parents, so it is the one worth checking
                let sim = validator.validate(risk.girl_affected, trials)?;
                audit::log_event(
                    AuditEventType::SimulationCompleted,
                    Some("x_linked"),
                    serde_json::json!(sim),
                );
                report.simulation = Some(sim);
            }

            audit::log_event(
                AuditEventType::AssessmentCompleted,
                Some("x_linked"),
                serde_json::json!({ "query": query, "result": risk }),
            );

            if args.json {
                serde_json::to_string_pretty(&report)?
            } else {
                report.to_string()
            }
        }
    };

    println!("{}", output);
    Ok(())
}
