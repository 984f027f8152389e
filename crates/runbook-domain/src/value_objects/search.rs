//! Search-Related Value Objects
//!
//! Value objects representing search queries, intent classification, and
//! ranked results for the hybrid search pipeline.

use crate::value_objects::document::Category;
use serde::{Deserialize, Serialize};

/// Intent classification applied to an incoming query
///
/// Used to bias the hybrid scorer's metadata boosts and to derive the
/// recommended filter set and result-limit target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Intent {
    /// Query describes an active, urgent incident
    EmergencyResponse,
    /// Query is looking for the runbook applicable to a described situation
    FindRunbook,
    /// Query is asking who to escalate to
    EscalationPath,
    /// Query is asking for the next step of a known procedure
    ProcedureLookup,
    /// General knowledge-base lookup, not incident-specific
    GeneralSearch,
}

/// Optional operational context supplied alongside a raw query string
///
/// Mirrors the fields a caller already knows about an alert (from
/// `search_runbooks`, or a structured monitoring integration) so the query
/// processor does not have to re-derive them from free text.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QueryContext {
    /// Alert type/category, e.g. "disk_space"
    pub alert_type: Option<String>,
    /// Severity of the triggering alert, lower-cased (e.g. "critical")
    pub severity: Option<String>,
    /// Systems named as affected
    pub systems: Vec<String>,
    /// Whether the caller has already determined this is urgent
    pub urgent: bool,
    /// Free-form additional context
    pub metadata: std::collections::HashMap<String, String>,
}

/// Entities extracted from a query, either supplied via [`QueryContext`] or
/// inferred from the query text itself
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ExtractedEntities {
    /// Systems referenced by the query
    pub systems: Vec<String>,
    /// Severity referenced by the query, if any
    pub severity: Option<String>,
    /// Alert type referenced by the query, if any
    pub alert_type: Option<String>,
}

/// Filters the query processor recommends the caller apply
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RecommendedFilters {
    /// Category the search should be restricted to, if the intent implies one
    pub category: Option<Category>,
}

/// A query after normalization, tokenization, entity extraction, and intent
/// classification
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProcessedQuery {
    /// Original query text as supplied by the caller
    pub raw: String,
    /// Lower-cased, whitespace-normalized text used for lexical matching
    pub normalized: String,
    /// Individual tokens, used for fuzzy/lexical overlap scoring
    pub tokens: Vec<String>,
    /// Classified intent
    pub intent: Intent,
    /// Entities extracted from the query/context
    pub entities: ExtractedEntities,
    /// Query text enriched with extracted entity hints, used for retrieval
    pub enhanced_query: String,
    /// Filters the caller should apply given the classified intent
    pub recommended_filters: RecommendedFilters,
    /// Suggested result-limit cap for this intent
    pub result_limit_target: usize,
    /// Whether the raw query matched a suspicious-pattern heuristic
    /// (script injection, path traversal, SQL-injection-style tokens).
    /// Advisory only: the request is not blocked, but cache TTL is reduced
    /// and the occurrence is logged.
    pub suspicious: bool,
}

/// Value Object: Ranked Search Result
///
/// Represents a single result from the hybrid search pipeline. Results are
/// ranked by a combined relevance score and record which scoring components
/// contributed to it, for explainability.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchResult {
    /// Id of the matched document
    pub document_id: String,
    /// Adapter the document was retrieved from
    pub source_id: String,
    /// Document title
    pub title: String,
    /// Snippet of matched content
    pub snippet: String,
    /// Document category
    pub category: Category,
    /// Combined relevance score, clamped to `[0.0, 1.0]`
    pub score: f64,
    /// Dense-vector similarity component, if embeddings were available
    pub dense_score: Option<f64>,
    /// Lexical/fuzzy overlap component
    pub lexical_score: f64,
    /// Human-readable reasons the result matched (e.g. "title_match", "category_match")
    pub match_reasons: Vec<String>,
}

impl SearchResult {
    /// Clamp `score` into `[0.0, 1.0]`, as required by the scoring contract
    pub fn clamp_score(mut self) -> Self {
        self.score = self.score.clamp(0.0, 1.0);
        self
    }
}
