//! Read-only view of one completed analysis, as handed over by the host
//! analysis engine.
//!
//! The host builds a snapshot per analysis-completion event and passes it to
//! [`crate::notification::dispatch_analysis`]. Nothing here is mutated by the
//! notifier; every dispatch starts from a fresh snapshot.

use std::collections::HashMap;
use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Overall verdict of a quality gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GateStatus {
    Ok,
    Warn,
    Error,
    None,
}

impl GateStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            GateStatus::Ok => "OK",
            GateStatus::Warn => "WARN",
            GateStatus::Error => "ERROR",
            GateStatus::None => "NONE",
        }
    }

    /// Only `OK` counts as a passing gate.
    pub fn is_ok(&self) -> bool {
        matches!(self, GateStatus::Ok)
    }
}

impl fmt::Display for GateStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Evaluation outcome of a single metric condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EvaluationStatus {
    Ok,
    Warn,
    Error,
    NoValue,
}

impl EvaluationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EvaluationStatus::Ok => "OK",
            EvaluationStatus::Warn => "WARN",
            EvaluationStatus::Error => "ERROR",
            EvaluationStatus::NoValue => "NO_VALUE",
        }
    }
}

impl fmt::Display for EvaluationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Comparison operator a condition's thresholds are evaluated with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GateOperator {
    Equals,
    NotEquals,
    GreaterThan,
    LessThan,
}

impl GateOperator {
    /// Rendering used in notification text.
    pub fn symbol(&self) -> &'static str {
        match self {
            GateOperator::Equals => "==",
            GateOperator::NotEquals => "!=",
            GateOperator::GreaterThan => ">",
            GateOperator::LessThan => "<",
        }
    }
}

/// One metric's evaluation against its warning/error thresholds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Condition {
    pub metric_key: String,
    pub status: EvaluationStatus,
    /// Measured value as the engine reports it. May be empty.
    #[serde(default)]
    pub value: String,
    /// Absent when the engine supplied an operator outside the known set.
    #[serde(default)]
    pub operator: Option<GateOperator>,
    #[serde(default)]
    pub warning_threshold: Option<String>,
    #[serde(default)]
    pub error_threshold: Option<String>,
}

/// Pass/fail verdict of an analysis run, with its per-metric conditions in
/// the order the engine evaluated them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QualityGate {
    pub name: String,
    pub status: GateStatus,
    #[serde(default)]
    pub conditions: Vec<Condition>,
}

/// Branch the analysis ran on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Branch {
    #[serde(default)]
    pub name: Option<String>,
    /// True for the project's main/default branch.
    pub is_main: bool,
}

/// Snapshot of one completed project analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisSnapshot {
    pub project_key: String,
    pub project_name: String,
    /// Absent when no gate was evaluated for this analysis.
    #[serde(default)]
    pub quality_gate: Option<QualityGate>,
    #[serde(default)]
    pub branch: Option<Branch>,
    /// SCM revision the analysis ran against.
    pub revision_id: String,
    /// Analysis timestamp. Rendered as-is, no timezone conversion.
    pub date: NaiveDateTime,
    /// Scanner-side properties scoped to this analysis event (webhook URL,
    /// fail-only flag, commit URL and author overrides travel here).
    #[serde(default)]
    pub properties: HashMap<String, String>,
}
