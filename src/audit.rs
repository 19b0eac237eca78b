// ==============================================================================
// audit.rs - Audit Trail for Risk Assessments
// ==============================================================================
// Description: Structured audit record of every assessment, emitted via tracing
// Author: Matt Barham
// Created: 2026-10-16
// Modified: 2026-10-16
// Version: 1.0.0
// ==============================================================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AuditEventType {
    AssessmentCompleted,
    SimulationCompleted,
    InvalidInput,
    ConfigurationLoaded,
    ConfigurationRejected,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogSeverity {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AuditEvent {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub event_type: AuditEventType,
    /// Disorder model the event belongs to ("autosomal", "x_linked")
    pub model: Option<String>,
    pub details: serde_json::Value,
    pub severity: LogSeverity,
}

impl AuditEvent {
    pub fn new(
        event_type: AuditEventType,
        model: Option<String>,
        details: serde_json::Value,
    ) -> Self {
        let severity = match event_type {
            AuditEventType::InvalidInput => LogSeverity::Warning,
            AuditEventType::ConfigurationRejected => LogSeverity::Error,
            _ => LogSeverity::Info,
        };

        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            event_type,
            model,
            details,
            severity,
        }
    }

    /// Emit the event as a single JSON line at its severity
    pub fn log(&self) {
        let line = match serde_json::to_string(self) {
            Ok(line) => line,
            Err(e) => {
                error!("Failed to serialize audit event {}: {}", self.id, e);
                return;
            }
        };

        match self.severity {
            LogSeverity::Info => info!(target: "hereditary_risk::audit", "{}", line),
            LogSeverity::Warning => warn!(target: "hereditary_risk::audit", "{}", line),
            LogSeverity::Error => error!(target: "hereditary_risk::audit", "{}", line),
        }
    }
}

/// Convenience function to log an audit event
pub fn log_event(
    event_type: AuditEventType,
    model: Option<&str>,
    details: serde_json::Value,
) -> AuditEvent {
    let event = AuditEvent::new(event_type, model.map(str::to_string), details);
    event.log();
    event
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_audit_event_creation() {
        let event = AuditEvent::new(
            AuditEventType::AssessmentCompleted,
            Some("x_linked".to_string()),
            serde_json::json!({
                "boy_affected": 0.375,
                "maternal_carrier_probability": 0.75
            }),
        );

        assert_eq!(event.model, Some("x_linked".to_string()));
        assert_eq!(event.details["boy_affected"], 0.375);
        assert!(matches!(event.severity, LogSeverity::Info));
    }

    #[test]
    fn test_invalid_input_severity() {
        let event = log_event(
            AuditEventType::InvalidInput,
            Some("autosomal"),
            serde_json::json!({ "error": "Unrecognized population: 'martian'" }),
        );

        assert!(matches!(event.severity, LogSeverity::Warning));
    }

    #[test]
    fn test_event_serialization() {
        let event = AuditEvent::new(
            AuditEventType::ConfigurationRejected,
            None,
            serde_json::json!({}),
        );
        let json = serde_json::to_value(&event).unwrap();

        assert_eq!(json["event_type"], "configuration_rejected");
        assert_eq!(json["severity"], "error");
    }
}
