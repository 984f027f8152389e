//! Tool Argument Types
//!
//! Validated input structs for every MCP tool the server exposes. Each type
//! derives [`schemars::JsonSchema`] for tool schema generation and
//! [`validator::Validate`] for the trim/validate step every handler runs
//! before touching a service.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Alert/runbook severity, shared across every tool that accepts one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum SeverityArg {
    /// Critical: active, customer-facing outage
    Critical,
    /// High: significant degradation
    High,
    /// Medium: limited impact
    Medium,
    /// Low: minor or cosmetic
    Low,
    /// Info: no impact, informational only
    Info,
}

/// Outcome of a resolution attempt, recorded as feedback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionOutcome {
    /// The incident was fully resolved by the runbook/procedure
    Resolved,
    /// The runbook helped but the incident required escalation
    Escalated,
    /// The runbook/procedure did not resolve the incident
    Failed,
    /// Partially resolved; some steps worked, some did not
    PartiallyResolved,
}

fn validate_max_results(value: u32) -> Result<(), validator::ValidationError> {
    if value == 0 || value > 100 {
        return Err(validator::ValidationError::new("max_results must be between 1 and 100"));
    }
    Ok(())
}

/// Arguments for `search_knowledge_base`
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema, Validate)]
pub struct SearchKnowledgeBaseArgs {
    /// Free-text search query
    #[validate(length(min = 2, max = 500, message = "query must be between 2 and 500 characters"))]
    pub query: String,

    /// Restrict results to these document categories
    #[serde(default)]
    pub categories: Vec<String>,

    /// Only return documents updated within this many days
    pub max_age_days: Option<u32>,

    /// Maximum number of results to return, clamped to [1, 100]
    #[validate(custom(function = "validate_max_results_opt"))]
    pub max_results: Option<u32>,
}

fn validate_max_results_opt(value: &Option<u32>) -> Result<(), validator::ValidationError> {
    match value {
        Some(v) => validate_max_results(*v),
        None => Ok(()),
    }
}

/// Arguments for `search_runbooks`
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema, Validate)]
pub struct SearchRunbooksArgs {
    /// Alert type/category, e.g. "disk_space", "high_latency"
    #[validate(length(min = 1, max = 200, message = "alert_type must not be empty"))]
    pub alert_type: String,

    /// Severity of the triggering alert
    pub severity: SeverityArg,

    /// Systems affected by the alert
    #[serde(default)]
    pub affected_systems: Vec<String>,

    /// Free-text additional context
    pub context: Option<String>,
}

/// Arguments for `get_decision_tree`
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema, Validate)]
pub struct GetDecisionTreeArgs {
    /// Description of the alert/incident driving the lookup
    #[validate(length(min = 2, max = 500, message = "alert_context must be between 2 and 500 characters"))]
    pub alert_context: String,

    /// Id of the decision-tree node the caller is currently at, if mid-traversal
    pub current_agent_state: Option<String>,
}

/// Arguments for `get_procedure`
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema, Validate)]
pub struct GetProcedureArgs {
    /// Id of the runbook (document) the procedure belongs to
    #[validate(length(min = 1, message = "runbook_id must not be empty"))]
    pub runbook_id: String,

    /// Name of the step/procedure to retrieve
    #[validate(length(min = 1, message = "step_name must not be empty"))]
    pub step_name: String,

    /// Free-text context carried over from a prior tool call
    pub current_context: Option<String>,
}

/// Arguments for `get_escalation_path`
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema, Validate)]
pub struct GetEscalationPathArgs {
    /// Severity driving how aggressively the chain escalates
    pub severity: SeverityArg,

    /// Whether the request falls within business hours
    pub business_hours: bool,

    /// Contacts already attempted and exhausted, skipped in the returned chain
    #[serde(default)]
    pub failed_attempts: Vec<String>,
}

/// Arguments for `list_sources`
#[derive(Debug, Clone, Default, Deserialize, Serialize, JsonSchema, Validate)]
pub struct ListSourcesArgs {
    /// Include a live health check per source
    #[serde(default)]
    pub include_health: Option<bool>,
}

/// Arguments for `record_resolution_feedback`
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema, Validate)]
pub struct RecordResolutionFeedbackArgs {
    /// Runbook the feedback applies to
    #[validate(length(min = 1, message = "runbook_id must not be empty"))]
    pub runbook_id: String,

    /// Procedure within the runbook the feedback applies to
    #[validate(length(min = 1, message = "procedure_id must not be empty"))]
    pub procedure_id: String,

    /// How the resolution attempt went
    pub outcome: ResolutionOutcome,

    /// Minutes spent resolving, end to end
    pub resolution_time_minutes: u32,

    /// Free-text notes from the responder
    pub notes: Option<String>,
}
