//! Application Service Port Interfaces
//!
//! Defines the contracts application services must implement. These sit
//! between the MCP/HTTP handlers in `runbook-server` and the source
//! adapters, cache, and embedding provider in `runbook-providers` /
//! `runbook-infrastructure`.

use async_trait::async_trait;
use runbook_domain::error::Result;
use runbook_domain::value_objects::{
    AdapterHealth, DecisionTree, Document, EscalationPath, ProcedureWithSuccessors, SearchResult,
};

/// Search Service Interface
///
/// Orchestrates the hybrid search pipeline: fan out to every healthy
/// adapter, generate or reuse a cached query embedding, score candidates,
/// and return a ranked, deduplicated result set.
#[async_trait]
pub trait SearchServiceInterface: Send + Sync {
    /// General-purpose search across every configured source
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<SearchResult>>;

    /// Search restricted to documents classified as runbooks, refined by
    /// the structured fields of an alert: a derived query is built from
    /// `alert_type`/`severity`/`affected_systems`, results are filtered to
    /// the runbook category, and matches whose triggers/severity mapping
    /// line up with the alert are boosted.
    async fn search_runbooks(
        &self,
        alert_type: &str,
        severity: &str,
        affected_systems: &[String],
        context: Option<&str>,
        limit: usize,
    ) -> Result<Vec<SearchResult>>;

    /// Combined runbook + general knowledge-base search, intent-classified
    async fn search_knowledge_base(&self, query: &str, limit: usize) -> Result<Vec<SearchResult>>;
}

/// Runbook Service Interface
///
/// Resolves the structural parts of a runbook document: its decision tree,
/// individual procedures, and escalation path.
#[async_trait]
pub trait RunbookServiceInterface: Send + Sync {
    /// Fetch a runbook's diagnostic decision tree
    async fn get_decision_tree(&self, runbook_id: &str) -> Result<DecisionTree>;

    /// Fetch a single named procedure/step out of a runbook, plus its
    /// immediate successor(s) in the runbook's procedure sequence
    async fn get_procedure(
        &self,
        runbook_id: &str,
        step_name: &str,
    ) -> Result<ProcedureWithSuccessors>;

    /// Fetch a runbook's escalation path
    async fn get_escalation_path(&self, runbook_id: &str) -> Result<EscalationPath>;

    /// Fetch the raw document behind a runbook id, across all adapters
    async fn get_document(&self, document_id: &str) -> Result<Document>;
}

/// Feedback Service Interface
///
/// Records whether a runbook or procedure actually resolved an incident,
/// feeding future ranking boosts.
#[async_trait]
pub trait FeedbackServiceInterface: Send + Sync {
    /// Record how a resolution attempt against a runbook procedure went
    async fn record_resolution_feedback(&self, feedback: ResolutionFeedback) -> Result<()>;
}

/// Feedback recorded for a single resolution attempt
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ResolutionFeedback {
    /// Runbook the feedback applies to
    pub runbook_id: String,
    /// Procedure within the runbook the feedback applies to
    pub procedure_id: String,
    /// Whether the attempt resolved the incident
    pub resolved: bool,
    /// Minutes spent resolving, end to end
    pub resolution_time_minutes: u32,
    /// Free-text notes from the responder
    pub notes: Option<String>,
}

/// Sources Service Interface
///
/// Surfaces configured source adapters and their health, for the
/// `list_sources` tool and the `/sources` HTTP endpoint.
#[async_trait]
pub trait SourcesServiceInterface: Send + Sync {
    /// List every configured source adapter and its current health
    async fn list_sources(&self) -> Result<Vec<AdapterHealth>>;
}
