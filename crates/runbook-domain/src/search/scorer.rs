//! Three-way weighted hybrid score (semantic, fuzzy, metadata), a fixed
//! post-boost table, and the standalone metadata-relevance score that feeds
//! the combiner's `metadata` term.

/// Facts about a single candidate needed to evaluate the fixed boost table
#[derive(Debug, Clone, Copy)]
pub struct BoostFacts<'a> {
    /// Raw query text, compared case-insensitively against title/content
    pub query: &'a str,
    /// Document title
    pub title: &'a str,
    /// Document content
    pub content: &'a str,
    /// Whether the document's category is `runbook`
    pub is_runbook_category: bool,
    /// Document age in days, when `updated_at` could be resolved
    pub document_age_days: Option<i64>,
    /// Document's existing confidence score, if any
    pub confidence_score: Option<f64>,
}

/// Inputs to the combined score for a single candidate document
#[derive(Debug, Clone, Copy)]
pub struct ScoreInputs<'a> {
    /// Semantic (dense-vector) similarity, when an embedding comparison was made
    pub semantic_score: Option<f64>,
    /// Fuzzy/lexical token-overlap score, always computed
    pub fuzzy_score: f64,
    /// Metadata-relevance score, see [`metadata_score`]
    pub metadata_score: f64,
    /// Weight applied to `semantic_score` before normalization
    pub semantic_weight: f64,
    /// Weight applied to `fuzzy_score` before normalization
    pub fuzzy_weight: f64,
    /// Weight applied to `metadata_score` before normalization
    pub metadata_weight: f64,
    /// Candidates below both this and `min_fuzzy_threshold` are discarded
    pub min_semantic_threshold: f64,
    /// Candidates below both this and `min_semantic_threshold` are discarded
    pub min_fuzzy_threshold: f64,
    /// Facts the fixed boost table is evaluated against
    pub facts: BoostFacts<'a>,
}

/// Combine semantic similarity, fuzzy overlap, and metadata relevance into a
/// single score: weights are normalized to sum to 1, then the fixed boost
/// table is applied multiplicatively, then the result is clamped to
/// `[0.0, 1.0]`.
///
/// Returns `None` when the candidate scores below both `min_semantic_threshold`
/// and `min_fuzzy_threshold` — such candidates are discarded before boosting,
/// never reaching the table.
pub fn score_result(inputs: &ScoreInputs) -> Option<(f64, Vec<&'static str>)> {
    let semantic = inputs.semantic_score.unwrap_or(0.0);
    if semantic < inputs.min_semantic_threshold && inputs.fuzzy_score < inputs.min_fuzzy_threshold {
        return None;
    }

    let (w_s, w_f, w_m) = normalize_weights(
        inputs.semantic_weight,
        inputs.fuzzy_weight,
        inputs.metadata_weight,
    );
    let base = semantic * w_s + inputs.fuzzy_score * w_f + inputs.metadata_score * w_m;

    let mut score = base;
    let mut reasons = Vec::new();
    for (applies, factor, reason) in fixed_boosts(&inputs.facts) {
        if applies {
            score *= factor;
            reasons.push(reason);
        }
    }

    Some((score.clamp(0.0, 1.0), reasons))
}

fn normalize_weights(semantic: f64, fuzzy: f64, metadata: f64) -> (f64, f64, f64) {
    let sum = semantic + fuzzy + metadata;
    if sum <= 0.0 {
        return (0.0, 0.0, 0.0);
    }
    (semantic / sum, fuzzy / sum, metadata / sum)
}

/// The fixed boost table: condition, multiplicative factor, reason tag
fn fixed_boosts(facts: &BoostFacts) -> [(bool, f64, &'static str); 5] {
    let query_lower = facts.query.to_lowercase();
    let title_match = !query_lower.is_empty() && facts.title.to_lowercase().contains(&query_lower);
    let content_match = !query_lower.is_empty() && facts.content.to_lowercase().contains(&query_lower);
    let recent = facts.document_age_days.is_some_and(|d| d <= 7);
    let mentions_runbook = query_lower.contains("runbook") || query_lower.contains("procedure");
    let high_confidence = facts.confidence_score.is_some_and(|c| c >= 0.8);

    [
        (title_match, 1.5, "title_match"),
        (content_match, 1.3, "content_match"),
        (recent, 1.2, "recent_document"),
        (facts.is_runbook_category && mentions_runbook, 1.1, "category_match"),
        (high_confidence, 1.1, "high_confidence"),
    ]
}

/// Inputs to the standalone metadata-relevance score
#[derive(Debug, Clone, Copy, Default)]
pub struct MetadataInputs {
    /// Whether the document's category matches the search's category filter
    pub category_filter_match: bool,
    /// Declared priority, 1 (highest) through 5 (lowest), if present
    pub priority: Option<u8>,
    /// Document age in days, if resolvable
    pub age_days: Option<i64>,
    /// Historical resolution success rate in `[0.0, 1.0]`, if tracked
    pub success_rate: Option<f64>,
    /// Content size in bytes
    pub content_bytes: usize,
}

/// Metadata-relevance score: base `0.5`, plus category/priority/recency/
/// success-rate/content-length bonuses, capped at `1.0`.
pub fn metadata_score(inputs: &MetadataInputs) -> f64 {
    let mut score = 0.5;

    if inputs.category_filter_match {
        score += 0.2;
    }

    if let Some(priority) = inputs.priority {
        if (1..=5).contains(&priority) {
            score += 0.1 * f64::from(6 - priority);
        }
    }

    match inputs.age_days {
        Some(d) if d <= 7 => score += 0.15,
        Some(d) if d <= 30 => score += 0.10,
        Some(d) if d <= 90 => score += 0.05,
        _ => {}
    }

    if let Some(rate) = inputs.success_rate {
        score += 0.2 * rate.clamp(0.0, 1.0);
    }

    match inputs.content_bytes {
        100..=5000 => score += 0.1,
        5001..=10000 => score += 0.05,
        _ => {}
    }

    score.min(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn facts<'a>(query: &'a str, title: &'a str, content: &'a str) -> BoostFacts<'a> {
        BoostFacts {
            query,
            title,
            content,
            is_runbook_category: false,
            document_age_days: None,
            confidence_score: None,
        }
    }

    #[test]
    fn combines_three_normalized_terms() {
        let inputs = ScoreInputs {
            semantic_score: Some(0.8),
            fuzzy_score: 0.5,
            metadata_score: 0.6,
            semantic_weight: 0.5,
            fuzzy_weight: 0.3,
            metadata_weight: 0.2,
            min_semantic_threshold: 0.0,
            min_fuzzy_threshold: 0.0,
            facts: facts("disk space", "unrelated", "unrelated"),
        };
        let (score, reasons) = score_result(&inputs).unwrap();
        assert!((score - (0.8 * 0.5 + 0.5 * 0.3 + 0.6 * 0.2)).abs() < 1e-9);
        assert!(reasons.is_empty());
    }

    #[test]
    fn unnormalized_weights_are_normalized_to_sum_one() {
        let inputs = ScoreInputs {
            semantic_score: Some(1.0),
            fuzzy_score: 1.0,
            metadata_score: 1.0,
            semantic_weight: 2.0,
            fuzzy_weight: 2.0,
            metadata_weight: 2.0,
            min_semantic_threshold: 0.0,
            min_fuzzy_threshold: 0.0,
            facts: facts("", "", ""),
        };
        let (score, _) = score_result(&inputs).unwrap();
        assert!((score - 1.0).abs() < 1e-9);
    }

    #[test]
    fn title_and_category_boosts_apply_and_tag() {
        let mut f = facts("runbook disk", "Disk Space Recovery Runbook", "steps to recover disk space");
        f.is_runbook_category = true;
        let inputs = ScoreInputs {
            semantic_score: Some(0.5),
            fuzzy_score: 0.5,
            metadata_score: 0.5,
            semantic_weight: 0.5,
            fuzzy_weight: 0.3,
            metadata_weight: 0.2,
            min_semantic_threshold: 0.0,
            min_fuzzy_threshold: 0.0,
            facts: f,
        };
        let (_, reasons) = score_result(&inputs).unwrap();
        assert!(reasons.contains(&"category_match"));
    }

    #[test]
    fn below_both_thresholds_is_discarded() {
        let inputs = ScoreInputs {
            semantic_score: Some(0.01),
            fuzzy_score: 0.01,
            metadata_score: 0.9,
            semantic_weight: 0.5,
            fuzzy_weight: 0.3,
            metadata_weight: 0.2,
            min_semantic_threshold: 0.15,
            min_fuzzy_threshold: 0.15,
            facts: facts("", "", ""),
        };
        assert!(score_result(&inputs).is_none());
    }

    #[test]
    fn above_one_threshold_survives() {
        let inputs = ScoreInputs {
            semantic_score: Some(0.2),
            fuzzy_score: 0.0,
            metadata_score: 0.5,
            semantic_weight: 0.5,
            fuzzy_weight: 0.3,
            metadata_weight: 0.2,
            min_semantic_threshold: 0.15,
            min_fuzzy_threshold: 0.15,
            facts: facts("", "", ""),
        };
        assert!(score_result(&inputs).is_some());
    }

    #[test]
    fn metadata_score_base_and_caps() {
        let base = metadata_score(&MetadataInputs::default());
        assert!((base - 0.5).abs() < 1e-9);

        let maxed = metadata_score(&MetadataInputs {
            category_filter_match: true,
            priority: Some(1),
            age_days: Some(1),
            success_rate: Some(1.0),
            content_bytes: 1000,
        });
        assert_eq!(maxed, 1.0);
    }

    #[test]
    fn metadata_score_recency_buckets() {
        let recent = metadata_score(&MetadataInputs { age_days: Some(7), ..Default::default() });
        let mid = metadata_score(&MetadataInputs { age_days: Some(30), ..Default::default() });
        let old = metadata_score(&MetadataInputs { age_days: Some(90), ..Default::default() });
        let ancient = metadata_score(&MetadataInputs { age_days: Some(365), ..Default::default() });
        assert!(recent > mid);
        assert!(mid > old);
        assert!(old > ancient);
    }
}
