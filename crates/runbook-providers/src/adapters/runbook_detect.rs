//! Multi-signal runbook detection heuristic
//!
//! Shared by every adapter that ingests loosely-structured content (file,
//! HTTP, repo, wiki, database) to decide whether a document should be
//! classified as [`Category::Runbook`] rather than [`Category::KnowledgeBase`].
//!
//! Combines title keywords, content keywords (ordered steps, incident and
//! escalation terms), structural cues (numbered lists, decision language),
//! and explicit metadata into a single weighted score in `[0.0, 1.0]`.
//! Documents scoring at or above [`RUNBOOK_MATCH_THRESHOLD`] are classified
//! as runbooks.

use regex::Regex;
use runbook_domain::constants::RUNBOOK_MATCH_THRESHOLD;
use runbook_domain::value_objects::Category;
use std::sync::LazyLock;

const TITLE_KEYWORDS: &[&str] = &[
    "runbook", "playbook", "procedure", "sop", "incident response", "escalation",
];

const CONTENT_KEYWORDS: &[&str] = &[
    "incident",
    "emergency",
    "escalate",
    "escalation",
    "on-call",
    "oncall",
    "rollback",
    "mitigate",
    "remediation",
    "step 1",
    "first,",
    "then,",
];

static NUMBERED_STEP: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^\s*\d+[.)]\s+\S").unwrap());
static BULLET_LIST: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^\s*[-*]\s+\S").unwrap());
static DECISION_LANGUAGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bif\b.{0,40}\bthen\b|\bwhen\b.{0,40}\boccurs?\b").unwrap());

/// Score inputs for the runbook-detection heuristic
#[derive(Debug, Default)]
pub struct RunbookSignals<'a> {
    /// Document title
    pub title: &'a str,
    /// Document body
    pub content: &'a str,
    /// Whether the source already tagged this document's category as "runbook"
    pub source_category_runbook: bool,
    /// Explicit tags carried from the source, if any
    pub tags: &'a [String],
}

/// Compute a weighted runbook-likelihood score in `[0.0, 1.0]`
pub fn score(signals: &RunbookSignals<'_>) -> f64 {
    let title_lower = signals.title.to_lowercase();
    let content_lower = signals.content.to_lowercase();

    let mut score = 0.0_f64;

    if TITLE_KEYWORDS.iter().any(|k| title_lower.contains(k)) {
        score += 0.35;
    }

    let content_hits = CONTENT_KEYWORDS.iter().filter(|k| content_lower.contains(*k)).count();
    score += (content_hits as f64 * 0.08).min(0.25);

    if NUMBERED_STEP.is_match(signals.content) {
        score += 0.15;
    }
    if BULLET_LIST.is_match(signals.content) {
        score += 0.05;
    }
    if DECISION_LANGUAGE.is_match(signals.content) {
        score += 0.1;
    }

    if signals.source_category_runbook {
        score += 0.3;
    }
    if signals.tags.iter().any(|t| t.eq_ignore_ascii_case("runbook")) {
        score += 0.2;
    }

    score.clamp(0.0, 1.0)
}

/// Classify a document as [`Category::Runbook`] when its score clears the
/// configured threshold, otherwise [`Category::KnowledgeBase`]
pub fn classify(signals: &RunbookSignals<'_>) -> Category {
    if score(signals) >= RUNBOOK_MATCH_THRESHOLD {
        Category::Runbook
    } else {
        Category::KnowledgeBase
    }
}

/// Finer-grained runbook subtype, recorded as document metadata rather than
/// as a [`Category`] variant since the domain's category scheme only
/// distinguishes runbook/knowledge-base/unclassified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunbookSubtype {
    /// Addresses an active production incident
    Incident,
    /// Scheduled or routine maintenance procedure
    Maintenance,
    /// Diagnostic/investigative procedure
    Troubleshooting,
    /// General step-by-step procedure not tied to an incident
    Procedure,
}

impl RunbookSubtype {
    /// Lowercase label, suitable for storing as document metadata
    pub fn as_str(self) -> &'static str {
        match self {
            RunbookSubtype::Incident => "incident",
            RunbookSubtype::Maintenance => "maintenance",
            RunbookSubtype::Troubleshooting => "troubleshooting",
            RunbookSubtype::Procedure => "procedure",
        }
    }
}

/// Classify a runbook into a subtype by keyword signal, for documents that
/// already cleared the [`classify`] threshold
pub fn classify_subtype(signals: &RunbookSignals<'_>) -> RunbookSubtype {
    let haystack = format!("{} {}", signals.title, signals.content).to_lowercase();

    const INCIDENT_WORDS: &[&str] = &["incident", "outage", "emergency", "down", "sev1", "sev2", "p1", "p0"];
    const MAINTENANCE_WORDS: &[&str] = &["maintenance", "upgrade", "migration", "scheduled", "patching"];
    const TROUBLESHOOTING_WORDS: &[&str] = &["troubleshoot", "diagnos", "investigat", "debug"];

    if INCIDENT_WORDS.iter().any(|w| haystack.contains(w)) {
        RunbookSubtype::Incident
    } else if MAINTENANCE_WORDS.iter().any(|w| haystack.contains(w)) {
        RunbookSubtype::Maintenance
    } else if TROUBLESHOOTING_WORDS.iter().any(|w| haystack.contains(w)) {
        RunbookSubtype::Troubleshooting
    } else {
        RunbookSubtype::Procedure
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strong_signals_classify_as_runbook() {
        let signals = RunbookSignals {
            title: "Database Outage Runbook",
            content: "1. Check connection pool\n2. Escalate to on-call\n3. If errors persist then page the DBA team",
            source_category_runbook: true,
            tags: &[],
        };
        assert_eq!(classify(&signals), Category::Runbook);
    }

    #[test]
    fn subtype_detects_incident_keywords() {
        let signals = RunbookSignals {
            title: "Production Outage Response",
            content: "Steps to follow during a sev1 incident",
            source_category_runbook: true,
            tags: &[],
        };
        assert_eq!(classify_subtype(&signals), RunbookSubtype::Incident);
    }

    #[test]
    fn plain_article_classifies_as_knowledge_base() {
        let signals = RunbookSignals {
            title: "Architecture overview",
            content: "This document describes the overall system architecture and design goals.",
            source_category_runbook: false,
            tags: &[],
        };
        assert_eq!(classify(&signals), Category::KnowledgeBase);
    }
}
