//! Search Service Use Case
//!
//! Orchestrates the hybrid search pipeline described in the external
//! interface contract: fan out to every healthy adapter, score candidates
//! by combining semantic similarity, fuzzy/lexical overlap, and a
//! metadata-relevance term, then apply a fixed post-boost table. Repeat
//! queries are served from cache, keyed off the normalized query text so
//! that rewording a query without changing its meaning stays a cache hit.

use crate::ports::registry::AdapterRegistry;
use crate::ports::services::SearchServiceInterface;
use crate::ports::EmbeddingStore;
use async_trait::async_trait;
use runbook_domain::constants::{
    DEFAULT_FUZZY_WEIGHT, DEFAULT_METADATA_WEIGHT, DEFAULT_MIN_FUZZY_THRESHOLD,
    DEFAULT_MIN_SCORE, DEFAULT_MIN_SEMANTIC_THRESHOLD, DEFAULT_SEMANTIC_WEIGHT,
    SUSPICIOUS_QUERY_CACHE_TTL_SECS,
};
use runbook_domain::error::Result;
use runbook_domain::ports::providers::cache::{CacheEntryConfig, DEFAULT_CACHE_TTL_SECS};
use runbook_domain::ports::CacheProvider;
use runbook_domain::search::{
    lexical_overlap, metadata_score, process_query_validated, score_result, BoostFacts,
    MetadataInputs, ScoreInputs,
};
use runbook_domain::value_objects::{Category, Document, ProcessedQuery, QueryContext, SearchResult};
use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Stopwords dropped during cache-key normalization. Anything 2 characters
/// or shorter is also dropped; this list covers common longer filler words.
const STOPWORDS: &[&str] = &["the", "and", "for", "with", "from", "that", "this"];

/// Search service implementation
pub struct SearchServiceImpl {
    registry: Arc<dyn AdapterRegistry>,
    embeddings: Arc<dyn EmbeddingStore>,
    cache: Arc<dyn CacheProvider>,
}

impl SearchServiceImpl {
    /// Construct a new search service over an adapter registry, embedding
    /// store, and cache
    pub fn new(
        registry: Arc<dyn AdapterRegistry>,
        embeddings: Arc<dyn EmbeddingStore>,
        cache: Arc<dyn CacheProvider>,
    ) -> Self {
        Self {
            registry,
            embeddings,
            cache,
        }
    }

    /// Normalize a query to its sorted, stopword-free token form so that
    /// queries differing only in case, punctuation, whitespace, or token
    /// order share a cache key.
    fn normalize_for_cache(query: &str) -> String {
        let mut tokens: Vec<String> = query
            .to_lowercase()
            .split(|c: char| !c.is_alphanumeric())
            .filter(|t| !t.is_empty() && t.len() > 2 && !STOPWORDS.contains(t))
            .map(str::to_string)
            .collect();
        tokens.sort();
        tokens.join(" ")
    }

    fn hash_filters(filters: &[(&str, &str)]) -> u64 {
        let mut sorted = filters.to_vec();
        sorted.sort_unstable();
        let mut hasher = DefaultHasher::new();
        for (k, v) in sorted {
            k.hash(&mut hasher);
            v.hash(&mut hasher);
        }
        hasher.finish()
    }

    fn cache_key(prefix: &str, query: &str, filters: &[(&str, &str)], limit: usize) -> String {
        let normalized = Self::normalize_for_cache(query);
        let filter_hash = Self::hash_filters(filters);
        format!("{prefix}:{normalized}:{filter_hash:x}:{limit}")
    }

    async fn cached<F, Fut>(&self, key: &str, ttl: Duration, compute: F) -> Result<Vec<SearchResult>>
    where
        F: FnOnce() -> Fut,
        Fut: std::future::Future<Output = Result<Vec<SearchResult>>>,
    {
        if let Ok(Some(cached)) = self.cache.get_json(key).await {
            if let Ok(results) = serde_json::from_str::<Vec<SearchResult>>(&cached) {
                debug!(key, "search cache hit");
                return Ok(results);
            }
        }

        let results = compute().await?;
        if let Ok(json) = serde_json::to_string(&results) {
            let _ = self
                .cache
                .set_json(key, &json, CacheEntryConfig::new().with_ttl(ttl))
                .await;
        }
        Ok(results)
    }

    /// Score and rank a candidate document set against an already-processed
    /// query, restricted to `category` when set.
    async fn rank(
        &self,
        processed: &ProcessedQuery,
        documents: Vec<Document>,
        category: Option<Category>,
        limit: usize,
    ) -> Vec<SearchResult> {
        let query_vector = match self.embeddings.embed_query(&processed.raw).await {
            Ok(v) => Some(v),
            Err(err) => {
                warn!(%err, "query embedding failed, falling back to lexical-only ranking");
                None
            }
        };

        let mut scored = Vec::with_capacity(documents.len());
        for doc in documents {
            if let Some(want) = category {
                if doc.category != want {
                    continue;
                }
            }

            let fuzzy = lexical_overlap(processed, &doc.content);
            let semantic = if let Some(ref qv) = query_vector {
                match self.embeddings.get_or_compute(&doc).await {
                    Ok(record) => Some(cosine(qv, &record.embedding.vector)),
                    Err(_) => None,
                }
            } else {
                None
            };

            let age_days = age_in_days(doc.updated_at);
            let metadata = metadata_score(&MetadataInputs {
                category_filter_match: category.is_some() && doc.category == Category::Runbook,
                priority: doc.metadata.get("priority").and_then(|v| v.parse().ok()),
                age_days,
                success_rate: doc.metadata.get("success_rate").and_then(|v| v.parse().ok()),
                content_bytes: doc.content_bytes(),
            });

            let facts = BoostFacts {
                query: &processed.normalized,
                title: &doc.title,
                content: &doc.content,
                is_runbook_category: doc.category == Category::Runbook,
                document_age_days: age_days,
                confidence_score: doc.metadata.get("confidence_score").and_then(|v| v.parse().ok()),
            };

            let inputs = ScoreInputs {
                semantic_score: semantic,
                fuzzy_score: fuzzy,
                metadata_score: metadata,
                semantic_weight: DEFAULT_SEMANTIC_WEIGHT,
                fuzzy_weight: DEFAULT_FUZZY_WEIGHT,
                metadata_weight: DEFAULT_METADATA_WEIGHT,
                min_semantic_threshold: DEFAULT_MIN_SEMANTIC_THRESHOLD,
                min_fuzzy_threshold: DEFAULT_MIN_FUZZY_THRESHOLD,
                facts,
            };

            let Some((score, reasons)) = score_result(&inputs) else {
                continue;
            };

            scored.push(SearchResult {
                document_id: doc.id.clone(),
                source_id: doc.source_id.clone(),
                title: doc.title.clone(),
                snippet: snippet(&doc.content),
                category: doc.category,
                score,
                dense_score: semantic,
                lexical_score: fuzzy,
                match_reasons: reasons.into_iter().map(str::to_string).collect(),
            });
        }

        scored.retain(|r| r.score >= DEFAULT_MIN_SCORE);
        scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(limit);
        scored
    }

    /// Boost runbook results whose triggers/severity mapping line up with
    /// the alert that produced this search, re-sorting afterward.
    fn apply_runbook_refinement(
        results: &mut Vec<SearchResult>,
        documents_by_id: &HashMap<String, Document>,
        alert_type: &str,
        severity: &str,
        affected_systems: &[String],
    ) {
        for result in results.iter_mut() {
            let Some(doc) = documents_by_id.get(&result.document_id) else {
                continue;
            };
            let triggers: Vec<String> = doc
                .metadata
                .get("triggers")
                .map(|v| v.split(',').map(|t| t.trim().to_lowercase()).collect())
                .unwrap_or_default();
            let severity_mapping: HashMap<String, String> = doc
                .metadata
                .get("severity_mapping")
                .map(|v| {
                    v.split(',')
                        .filter_map(|pair| {
                            let (k, v) = pair.split_once(':')?;
                            Some((k.trim().to_lowercase(), v.trim().to_lowercase()))
                        })
                        .collect()
                })
                .unwrap_or_default();

            if affected_systems
                .iter()
                .any(|sys| triggers.iter().any(|t| t.contains(&sys.to_lowercase())))
            {
                result.score += 0.30;
                result.match_reasons.push("triggers_system".to_string());
            }
            if severity_mapping
                .get(&severity.to_lowercase())
                .is_some()
            {
                result.score += 0.20;
                result.match_reasons.push("severity_mapped".to_string());
            }
            if !alert_type.is_empty()
                && triggers.iter().any(|t| t.contains(&alert_type.to_lowercase()))
            {
                result.score += 0.20;
                result.match_reasons.push("alert_type_trigger".to_string());
            }
            result.score = result.score.clamp(0.0, 1.0);
        }
        results.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
    }
}

fn cosine(a: &[f32], b: &[f32]) -> f64 {
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|v| v * v).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|v| v * v).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    (dot / (norm_a * norm_b)) as f64
}

fn age_in_days(updated_at: i64) -> Option<i64> {
    let now = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0);
    Some((now - updated_at).max(0) / 86_400)
}

fn snippet(content: &str) -> String {
    const MAX_LEN: usize = 280;
    if content.len() <= MAX_LEN {
        content.to_string()
    } else {
        format!("{}…", &content[..MAX_LEN])
    }
}

#[async_trait]
impl SearchServiceInterface for SearchServiceImpl {
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<SearchResult>> {
        let processed = process_query_validated(query, &QueryContext::default())?;
        if processed.suspicious {
            warn!(query, "suspicious query pattern detected");
        }
        let ttl_secs = if processed.suspicious {
            SUSPICIOUS_QUERY_CACHE_TTL_SECS
        } else {
            DEFAULT_CACHE_TTL_SECS
        };
        let key = Self::cache_key("search", query, &[], limit);
        self.cached(&key, Duration::from_secs(ttl_secs), || async {
            let outcomes = self.registry.search_all(query, limit * 2).await;
            let documents: Vec<Document> = outcomes.into_iter().flat_map(|o| o.documents).collect();
            Ok(self.rank(&processed, documents, None, limit).await)
        })
        .await
    }

    async fn search_runbooks(
        &self,
        alert_type: &str,
        severity: &str,
        affected_systems: &[String],
        context: Option<&str>,
        limit: usize,
    ) -> Result<Vec<SearchResult>> {
        let mut derived_query = format!("runbook for {alert_type} severity {severity}");
        for system in affected_systems {
            derived_query.push_str(" system ");
            derived_query.push_str(system);
        }
        if let Some(extra) = context {
            derived_query.push(' ');
            derived_query.push_str(extra);
        }

        let query_context = QueryContext {
            alert_type: Some(alert_type.to_string()),
            severity: Some(severity.to_lowercase()),
            systems: affected_systems.to_vec(),
            urgent: matches!(severity.to_lowercase().as_str(), "critical" | "high"),
            metadata: HashMap::new(),
        };
        let processed = process_query_validated(&derived_query, &query_context)?;
        if processed.suspicious {
            warn!(query = %derived_query, "suspicious query pattern detected");
        }
        let ttl_secs = if processed.suspicious {
            SUSPICIOUS_QUERY_CACHE_TTL_SECS
        } else {
            DEFAULT_CACHE_TTL_SECS
        };

        let filters: Vec<(&str, &str)> = vec![("category", "runbook"), ("severity", severity), ("alert_type", alert_type)];
        let key = Self::cache_key("search_runbooks", &derived_query, &filters, limit);
        self.cached(&key, Duration::from_secs(ttl_secs), || async {
            let outcomes = self
                .registry
                .search_runbooks_all(&derived_query, limit * 2)
                .await;
            let documents: Vec<Document> = outcomes.into_iter().flat_map(|o| o.documents).collect();
            let documents_by_id: HashMap<String, Document> =
                documents.iter().map(|d| (d.id.clone(), d.clone())).collect();

            let mut results = self
                .rank(&processed, documents, Some(Category::Runbook), limit * 2)
                .await;
            Self::apply_runbook_refinement(
                &mut results,
                &documents_by_id,
                alert_type,
                severity,
                affected_systems,
            );
            results.truncate(limit);
            Ok(results)
        })
        .await
    }

    async fn search_knowledge_base(&self, query: &str, limit: usize) -> Result<Vec<SearchResult>> {
        self.search(query, limit).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalization_is_order_and_case_insensitive() {
        let a = SearchServiceImpl::normalize_for_cache("database timeout");
        let b = SearchServiceImpl::normalize_for_cache("Timeout  Database!");
        assert_eq!(a, b);
    }

    #[test]
    fn normalization_drops_stopwords_and_short_tokens() {
        let normalized = SearchServiceImpl::normalize_for_cache("a the of timeout");
        assert_eq!(normalized, "timeout");
    }

    #[test]
    fn filter_hash_is_order_independent() {
        let a = SearchServiceImpl::hash_filters(&[("category", "runbook"), ("severity", "high")]);
        let b = SearchServiceImpl::hash_filters(&[("severity", "high"), ("category", "runbook")]);
        assert_eq!(a, b);
    }

    #[test]
    fn cache_key_is_stable_across_equivalent_queries() {
        let k1 = SearchServiceImpl::cache_key("search", "database timeout", &[], 10);
        let k2 = SearchServiceImpl::cache_key("search", "timeout  database!", &[], 10);
        assert_eq!(k1, k2);
    }
}
