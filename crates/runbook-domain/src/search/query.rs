//! Query normalization, entity extraction, and intent classification.

use crate::error::{Error, Result};
use crate::value_objects::document::Category;
use crate::value_objects::{ExtractedEntities, Intent, ProcessedQuery, QueryContext, RecommendedFilters};

/// Minimum accepted query length, in characters
const MIN_QUERY_LEN: usize = 2;
/// Maximum accepted query length, in characters
const MAX_QUERY_LEN: usize = 500;

/// Keywords that bias classification toward an active-incident query
const INCIDENT_KEYWORDS: &[&str] = &[
    "down", "outage", "error", "failing", "timeout", "latency", "5xx", "crash", "degraded",
    "alert", "paging", "incident",
];

/// Keywords that bias classification toward an escalation-path query
const ESCALATION_KEYWORDS: &[&str] = &["escalate", "escalation", "escalating", "who", "contact", "page"];

/// Keywords that bias classification toward a procedure-lookup query
const PROCEDURE_KEYWORDS: &[&str] = &["procedure", "step", "steps", "next"];

/// Recognized severity words, used both for entity extraction and to detect
/// a severity mention inside free text
const SEVERITY_WORDS: &[&str] = &["critical", "high", "medium", "low", "info"];

/// Substrings that flag a query as suspicious (advisory only; never blocks
/// the request, but reduces cache TTL and is logged)
const SUSPICIOUS_SUBSTRINGS: &[&str] = &[
    "<script", "javascript:", "onerror=", "onload=", "../", "..\\", "drop table", "union select",
    "or 1=1", "; --", "/etc/passwd",
];

/// Tokenize and normalize a raw query string, without validation or
/// context-aware enrichment.
///
/// Used internally by source adapters for lexical overlap scoring; the
/// resulting `ProcessedQuery` has no operational context, so entities are
/// empty and `suspicious`/intent reflect the text alone. Callers at the
/// service boundary should use [`process_query_validated`] instead, which
/// additionally enforces the length contract and applies a supplied
/// [`QueryContext`].
pub fn process_query(raw: &str) -> ProcessedQuery {
    build_processed_query(raw, &QueryContext::default())
}

/// Validate, tokenize, classify, and enrich a raw query with an optional
/// operational context.
///
/// Rejects queries shorter than 2 characters or longer than 500
/// (`VALIDATION`). Never rejects on suspicious-pattern content: that is
/// advisory only (see [`ProcessedQuery::suspicious`]).
pub fn process_query_validated(raw: &str, context: &QueryContext) -> Result<ProcessedQuery> {
    let len = raw.trim().chars().count();
    if len < MIN_QUERY_LEN || len > MAX_QUERY_LEN {
        return Err(Error::validation(format!(
            "query must be between {MIN_QUERY_LEN} and {MAX_QUERY_LEN} characters, got {len}"
        )));
    }
    Ok(build_processed_query(raw, context))
}

fn build_processed_query(raw: &str, context: &QueryContext) -> ProcessedQuery {
    let normalized = raw.trim().to_lowercase();
    let tokens: Vec<String> = normalized
        .split_whitespace()
        .map(|t| t.trim_matches(|c: char| !c.is_alphanumeric()).to_string())
        .filter(|t| !t.is_empty())
        .collect();

    let entities = extract_entities(&tokens, context);
    let intent = classify_intent(&tokens, context, &entities);
    let recommended_filters = recommended_filters(intent);
    let result_limit_target = result_limit_target(intent);
    let enhanced_query = enhance_query(&normalized, context);
    let suspicious = is_suspicious(raw);

    ProcessedQuery {
        raw: raw.to_string(),
        normalized,
        tokens,
        intent,
        entities,
        enhanced_query,
        recommended_filters,
        result_limit_target,
        suspicious,
    }
}

fn extract_entities(tokens: &[String], context: &QueryContext) -> ExtractedEntities {
    let severity = context
        .severity
        .clone()
        .or_else(|| tokens.iter().find(|t| SEVERITY_WORDS.contains(&t.as_str())).cloned());

    ExtractedEntities {
        systems: context.systems.clone(),
        severity,
        alert_type: context.alert_type.clone(),
    }
}

fn classify_intent(tokens: &[String], context: &QueryContext, entities: &ExtractedEntities) -> Intent {
    let urgent = context.urgent || matches!(entities.severity.as_deref(), Some("critical") | Some("high"));
    if urgent {
        return Intent::EmergencyResponse;
    }
    if tokens.iter().any(|t| ESCALATION_KEYWORDS.contains(&t.as_str())) {
        return Intent::EscalationPath;
    }
    if tokens.iter().any(|t| PROCEDURE_KEYWORDS.contains(&t.as_str())) {
        return Intent::ProcedureLookup;
    }
    if entities.alert_type.is_some() || tokens.iter().any(|t| INCIDENT_KEYWORDS.contains(&t.as_str())) {
        return Intent::FindRunbook;
    }
    Intent::GeneralSearch
}

fn recommended_filters(intent: Intent) -> RecommendedFilters {
    let category = match intent {
        Intent::EmergencyResponse | Intent::FindRunbook | Intent::ProcedureLookup | Intent::EscalationPath => {
            Some(Category::Runbook)
        }
        Intent::GeneralSearch => None,
    };
    RecommendedFilters { category }
}

fn result_limit_target(intent: Intent) -> usize {
    match intent {
        Intent::EmergencyResponse => 5,
        Intent::FindRunbook | Intent::ProcedureLookup | Intent::EscalationPath => 10,
        Intent::GeneralSearch => 20,
    }
}

fn enhance_query(normalized: &str, context: &QueryContext) -> String {
    let mut enhanced = normalized.to_string();
    if let Some(alert_type) = &context.alert_type {
        enhanced.push_str(&format!(" alert_type:{alert_type}"));
    }
    if let Some(severity) = &context.severity {
        enhanced.push_str(&format!(" severity:{severity}"));
    }
    for system in &context.systems {
        enhanced.push_str(&format!(" system:{system}"));
    }
    enhanced
}

fn is_suspicious(raw: &str) -> bool {
    let lower = raw.to_lowercase();
    SUSPICIOUS_SUBSTRINGS.iter().any(|p| lower.contains(p))
}

/// Fraction of `query.tokens` that appear in `content`, a cheap lexical
/// overlap signal used when no embedding comparison is available
pub fn lexical_overlap(query: &ProcessedQuery, content: &str) -> f64 {
    if query.tokens.is_empty() {
        return 0.0;
    }
    let content_lower = content.to_lowercase();
    let hits = query
        .tokens
        .iter()
        .filter(|t| content_lower.contains(t.as_str()))
        .count();
    hits as f64 / query.tokens.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_incident_language_as_find_runbook() {
        let q = process_query("database connection timeout on prod");
        assert_eq!(q.intent, Intent::FindRunbook);
    }

    #[test]
    fn classifies_general_knowledge() {
        let q = process_query("how to rotate logging credentials");
        assert_eq!(q.intent, Intent::GeneralSearch);
    }

    #[test]
    fn critical_severity_context_forces_emergency_response() {
        let context = QueryContext {
            severity: Some("critical".to_string()),
            ..Default::default()
        };
        let q = build_processed_query("disk space low", &context);
        assert_eq!(q.intent, Intent::EmergencyResponse);
    }

    #[test]
    fn escalation_language_is_classified() {
        let q = process_query("who do I escalate this incident to");
        assert_eq!(q.intent, Intent::EscalationPath);
    }

    #[test]
    fn rejects_too_short_query() {
        assert!(process_query_validated("a", &QueryContext::default()).is_err());
    }

    #[test]
    fn rejects_too_long_query() {
        let long = "a".repeat(501);
        assert!(process_query_validated(&long, &QueryContext::default()).is_err());
    }

    #[test]
    fn flags_suspicious_patterns_without_rejecting() {
        let q = process_query_validated("search <script>alert(1)</script>", &QueryContext::default()).unwrap();
        assert!(q.suspicious);
    }

    #[test]
    fn overlap_counts_matching_tokens() {
        let q = process_query("database latency spike");
        let overlap = lexical_overlap(&q, "Runbook: investigating database latency issues");
        assert!(overlap > 0.5);
    }
}
