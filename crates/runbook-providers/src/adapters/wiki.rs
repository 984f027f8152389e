//! Wiki (Confluence-style) Adapter
//!
//! Wraps a Confluence-like wiki REST API, optionally scoped to a single
//! space. Shares the repo adapter's conservative local quota and minimum
//! inter-request interval contract (§4.4), since both wrap third-party REST
//! surfaces this service must be a polite, bounded consumer of.

use async_trait::async_trait;
use dashmap::DashMap;
use runbook_domain::error::{Error, Result};
use runbook_domain::ports::providers::SourceAdapter;
use runbook_domain::ports::providers::adapter::RefreshOutcome;
use runbook_domain::search::query::{lexical_overlap, process_query};
use runbook_domain::value_objects::{AdapterConfig, AdapterHealth, AdapterHealthStatus, Category, Document};
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU32, AtomicU64, Ordering};
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

use super::CredentialResolver;
use super::runbook_detect::{self, RunbookSignals};
use crate::constants::{ADAPTER_MAX_DOCUMENT_BYTES, ADAPTER_MIN_REQUEST_INTERVAL_MS, ADAPTER_QUOTA_FRACTION};

const DEFAULT_UPSTREAM_QUOTA_PER_HOUR: u32 = 5000;
const DEFAULT_PAGE_SIZE: u32 = 25;
const SYSTEM_LABELS: &[&str] = &["archived", "template", "generated", "draft"];

/// Options not carried by [`AdapterConfig::Wiki`] itself
#[derive(Debug, Clone)]
pub struct WikiAdapterOptions {
    /// Must be `true` before a scan with no `space` restriction is permitted
    pub user_consent_given: bool,
    /// Include pages labeled with [`SYSTEM_LABELS`]
    pub include_system_pages: bool,
    /// Requests per hour assumed to be the upstream's real quota
    pub upstream_quota_per_hour: u32,
}

impl Default for WikiAdapterOptions {
    fn default() -> Self {
        Self {
            user_consent_given: false,
            include_system_pages: false,
            upstream_quota_per_hour: DEFAULT_UPSTREAM_QUOTA_PER_HOUR,
        }
    }
}

struct QuotaState {
    remaining: u32,
    window_started_at: Instant,
}

/// REST-API-backed adapter over a Confluence-style wiki
pub struct WikiAdapter {
    name: String,
    base_url: String,
    space: Option<String>,
    credential_ref: Option<String>,
    client: reqwest::Client,
    credentials: Option<Arc<CredentialResolver>>,
    options: WikiAdapterOptions,
    quota: Mutex<QuotaState>,
    last_request_at: Mutex<Option<Instant>>,
    index: DashMap<String, Document>,
    refresh_lock: Mutex<()>,
    refresh_in_progress: AtomicBool,
    consecutive_failures: AtomicU32,
    last_error: Mutex<Option<String>>,
    last_indexed_at: AtomicU64,
}

impl WikiAdapter {
    /// Build an adapter for the wiki described by `config`
    pub fn new(config: &AdapterConfig, credentials: Option<Arc<CredentialResolver>>, options: WikiAdapterOptions) -> Result<Self> {
        let (name, base_url, space, credential_ref) = match config {
            AdapterConfig::Wiki {
                name,
                base_url,
                space,
                credential_ref,
            } => (name.clone(), base_url.clone(), space.clone(), credential_ref.clone()),
            other => {
                return Err(Error::config(format!(
                    "WikiAdapter requires an AdapterConfig::Wiki, got kind '{}'",
                    other.kind()
                )));
            }
        };

        if space.is_none() && !options.user_consent_given {
            return Err(Error::config(format!(
                "wiki adapter '{name}' requests an unscoped (all-spaces) scan without user_consent_given"
            )));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(crate::constants::ADAPTER_DEFAULT_TIMEOUT_MS))
            .build()
            .map_err(|e| Error::config(format!("failed to build http client for '{name}': {e}")))?;

        let quota_per_hour = ((options.upstream_quota_per_hour as f64) * ADAPTER_QUOTA_FRACTION).floor() as u32;

        Ok(Self {
            name,
            base_url,
            space,
            credential_ref,
            client,
            credentials,
            options,
            quota: Mutex::new(QuotaState {
                remaining: quota_per_hour.max(1),
                window_started_at: Instant::now(),
            }),
            last_request_at: Mutex::new(None),
            index: DashMap::new(),
            refresh_lock: Mutex::new(()),
            refresh_in_progress: AtomicBool::new(false),
            consecutive_failures: AtomicU32::new(0),
            last_error: Mutex::new(None),
            last_indexed_at: AtomicU64::new(0),
        })
    }

    async fn authenticated_request(&self, url: &str) -> Result<reqwest::RequestBuilder> {
        let mut builder = self.client.get(url);
        if let (Some(resolver), Some(credential_ref)) = (&self.credentials, &self.credential_ref) {
            let token = resolver.resolve(credential_ref).await?;
            builder = builder.bearer_auth(token);
        }
        Ok(builder)
    }

    async fn enforce_quota(&self) -> Result<()> {
        {
            let mut state = self.quota.lock().await;
            if state.window_started_at.elapsed() >= Duration::from_secs(3600) {
                let per_hour = ((self.options.upstream_quota_per_hour as f64) * ADAPTER_QUOTA_FRACTION).floor() as u32;
                state.remaining = per_hour.max(1);
                state.window_started_at = Instant::now();
            }
            if state.remaining == 0 {
                let reset_in_ms = Duration::from_secs(3600)
                    .saturating_sub(state.window_started_at.elapsed())
                    .as_millis() as u64;
                return Err(Error::rate_limit(reset_in_ms));
            }
            state.remaining -= 1;
        }

        let mut last = self.last_request_at.lock().await;
        if let Some(previous) = *last {
            let elapsed = previous.elapsed();
            let min_interval = Duration::from_millis(ADAPTER_MIN_REQUEST_INTERVAL_MS);
            if elapsed < min_interval {
                tokio::time::sleep(min_interval - elapsed).await;
            }
        }
        *last = Some(Instant::now());
        Ok(())
    }

    async fn verify_identity(&self) -> Result<()> {
        self.enforce_quota().await?;
        let url = format!("{}/rest/api/user/current", self.base_url.trim_end_matches('/'));
        let request = self.authenticated_request(&url).await?;
        let response = request
            .send()
            .await
            .map_err(|e| Error::auth(format!("wiki adapter '{}' failed to reach upstream: {e}", self.name)))?;
        match response.status().as_u16() {
            200..=299 => Ok(()),
            401 | 403 => Err(Error::auth(format!(
                "wiki adapter '{}' was rejected by upstream (HTTP {})",
                self.name,
                response.status()
            ))),
            status => Err(Error::source_adapter(&self.name, format!("upstream returned HTTP {status} during identity check"))),
        }
    }

    fn is_system_page(&self, labels: &[String]) -> bool {
        !self.options.include_system_pages
            && labels.iter().any(|l| SYSTEM_LABELS.contains(&l.to_lowercase().as_str()))
    }

    async fn list_pages(&self) -> Result<Vec<(String, String)>> {
        self.enforce_quota().await?;
        let mut cql = "type=page".to_string();
        if let Some(space) = &self.space {
            cql.push_str(&format!(" and space=\"{space}\""));
        }
        let url = format!(
            "{}/rest/api/content/search?cql={}&limit={}&expand=metadata.labels",
            self.base_url.trim_end_matches('/'),
            urlencoding_light(&cql),
            DEFAULT_PAGE_SIZE
        );
        let request = self.authenticated_request(&url).await?;
        let response = request
            .send()
            .await
            .map_err(|e| Error::source_adapter(&self.name, format!("page search failed: {e}")))?;
        if !response.status().is_success() {
            return Err(Error::source_adapter(&self.name, format!("page search returned HTTP {}", response.status())));
        }
        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| Error::source_adapter(&self.name, format!("page search returned invalid JSON: {e}")))?;

        let mut pages = Vec::new();
        for result in body.get("results").and_then(|v| v.as_array()).into_iter().flatten() {
            let id = result.get("id").and_then(|v| v.as_str()).unwrap_or_default().to_string();
            let title = result.get("title").and_then(|v| v.as_str()).unwrap_or_default().to_string();
            let labels: Vec<String> = result
                .get("metadata")
                .and_then(|m| m.get("labels"))
                .and_then(|l| l.get("results"))
                .and_then(|r| r.as_array())
                .into_iter()
                .flatten()
                .filter_map(|l| l.get("name").and_then(|n| n.as_str()).map(str::to_string))
                .collect();
            if id.is_empty() || self.is_system_page(&labels) {
                continue;
            }
            pages.push((id, title));
        }
        Ok(pages)
    }

    async fn fetch_page(&self, page_id: &str, title: &str) -> Result<Document> {
        self.enforce_quota().await?;
        let url = format!(
            "{}/rest/api/content/{page_id}?expand=body.storage",
            self.base_url.trim_end_matches('/')
        );
        let request = self.authenticated_request(&url).await?;
        let response = request
            .send()
            .await
            .map_err(|e| Error::source_adapter(&self.name, format!("fetching page '{page_id}' failed: {e}")))?;
        if !response.status().is_success() {
            return Err(Error::source_adapter(&self.name, format!("fetching page '{page_id}' returned HTTP {}", response.status())));
        }
        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| Error::source_adapter(&self.name, format!("page '{page_id}' returned invalid JSON: {e}")))?;

        let raw_html = body
            .get("body")
            .and_then(|b| b.get("storage"))
            .and_then(|s| s.get("value"))
            .and_then(|v| v.as_str())
            .unwrap_or_default();
        if raw_html.len() as u64 > ADAPTER_MAX_DOCUMENT_BYTES {
            return Err(Error::oversized_payload(raw_html.len() as u64, ADAPTER_MAX_DOCUMENT_BYTES));
        }

        let content = strip_html_tags(raw_html);

        let signals = RunbookSignals {
            title,
            content: &content,
            source_category_runbook: false,
            tags: &[],
        };
        let category = runbook_detect::classify(&signals);

        let mut metadata = HashMap::new();
        metadata.insert("source_adapter".to_string(), self.name.clone());
        metadata.insert("page_id".to_string(), page_id.to_string());
        if let Some(space) = &self.space {
            metadata.insert("space".to_string(), space.clone());
        }
        if matches!(category, Category::Runbook) {
            metadata.insert("runbook_subtype".to_string(), runbook_detect::classify_subtype(&signals).as_str().to_string());
        }

        Ok(Document {
            id: Document::hash_content(&format!("{}::{page_id}", self.name)),
            source_id: self.name.clone(),
            title: title.to_string(),
            content: content.clone(),
            category,
            tags: Vec::new(),
            content_hash: Document::hash_content(&content),
            updated_at: now_unix_i64(),
            metadata,
        })
    }
}

/// Minimal tag stripping for Confluence storage-format XHTML: not a full
/// HTML-to-text pipeline, just enough to make stored page bodies searchable
/// plain text.
fn strip_html_tags(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut in_tag = false;
    for c in html.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => out.push(c),
            _ => {}
        }
    }
    out.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn urlencoding_light(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            ' ' => "%20".to_string(),
            '"' => "%22".to_string(),
            '=' => "%3D".to_string(),
            other => other.to_string(),
        })
        .collect()
}

fn now_unix_i64() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

fn now_unix() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

#[async_trait]
impl SourceAdapter for WikiAdapter {
    fn name(&self) -> &str {
        &self.name
    }

    async fn initialize(&self, _config: &AdapterConfig) -> Result<()> {
        self.verify_identity().await?;
        self.refresh_index().await.map(|_| ())
    }

    async fn search(&self, query: &str, limit: usize) -> Result<Vec<Document>> {
        let processed = process_query(query);
        let mut scored: Vec<(f64, Document)> = self
            .index
            .iter()
            .map(|entry| {
                let doc = entry.value();
                let score = lexical_overlap(&processed, &doc.title) * 0.4 + lexical_overlap(&processed, &doc.content) * 0.6;
                (score, doc.clone())
            })
            .filter(|(score, _)| *score > 0.0)
            .collect();
        scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
        Ok(scored.into_iter().take(limit).map(|(_, doc)| doc).collect())
    }

    async fn search_runbooks(&self, query: &str, limit: usize) -> Result<Vec<Document>> {
        let results = self.search(query, usize::MAX).await?;
        Ok(results.into_iter().filter(|d| matches!(d.category, Category::Runbook)).take(limit).collect())
    }

    async fn get_document(&self, document_id: &str) -> Result<Option<Document>> {
        Ok(self.index.get(document_id).map(|e| e.value().clone()))
    }

    async fn health_check(&self) -> Result<AdapterHealth> {
        let failures = self.consecutive_failures.load(Ordering::SeqCst);
        let status = if failures == 0 {
            AdapterHealthStatus::Healthy
        } else if failures < 3 {
            AdapterHealthStatus::Degraded
        } else {
            AdapterHealthStatus::Unhealthy
        };
        let mut details = HashMap::new();
        if let Some(space) = &self.space {
            details.insert("space".to_string(), space.clone());
        }
        details.insert("indexed_documents".to_string(), self.index.len().to_string());
        Ok(AdapterHealth {
            name: self.name.clone(),
            status,
            consecutive_failures: failures,
            last_error: self.last_error.lock().await.clone(),
            details,
        })
    }

    async fn refresh_index(&self) -> Result<RefreshOutcome> {
        if self.refresh_in_progress.swap(true, Ordering::SeqCst) {
            return Ok(RefreshOutcome::default());
        }
        let _guard = self.refresh_lock.lock().await;

        let mut outcome = RefreshOutcome::default();
        let pages = match self.list_pages().await {
            Ok(pages) => pages,
            Err(e) => {
                self.consecutive_failures.fetch_add(1, Ordering::SeqCst);
                *self.last_error.lock().await = Some(e.to_string());
                self.refresh_in_progress.store(false, Ordering::SeqCst);
                return Err(e);
            }
        };

        let mut seen_ids = std::collections::HashSet::new();
        let mut any_failure = false;
        for (page_id, title) in pages {
            let id = Document::hash_content(&format!("{}::{page_id}", self.name));
            seen_ids.insert(id.clone());
            match self.fetch_page(&page_id, &title).await {
                Ok(doc) => {
                    let existed = self.index.contains_key(&id);
                    self.index.insert(id, doc);
                    if existed {
                        outcome.modified += 1;
                    } else {
                        outcome.added += 1;
                    }
                }
                Err(e) => {
                    any_failure = true;
                    *self.last_error.lock().await = Some(e.to_string());
                }
            }
        }

        let stale: Vec<String> = self.index.iter().map(|e| e.key().clone()).filter(|k| !seen_ids.contains(k)).collect();
        for key in stale {
            self.index.remove(&key);
            outcome.removed += 1;
        }

        if any_failure {
            self.consecutive_failures.fetch_add(1, Ordering::SeqCst);
        } else {
            self.consecutive_failures.store(0, Ordering::SeqCst);
        }
        self.last_indexed_at.store(now_unix(), Ordering::SeqCst);
        self.refresh_in_progress.store(false, Ordering::SeqCst);
        Ok(outcome)
    }

    async fn get_metadata(&self) -> Result<HashMap<String, String>> {
        let mut metadata = HashMap::new();
        metadata.insert("base_url".to_string(), self.base_url.clone());
        metadata.insert("space".to_string(), self.space.clone().unwrap_or_default());
        metadata.insert("indexed_documents".to_string(), self.index.len().to_string());
        Ok(metadata)
    }

    async fn configure(&self, config: &AdapterConfig) -> Result<()> {
        match config {
            AdapterConfig::Wiki { .. } => Ok(()),
            other => Err(Error::config(format!("WikiAdapter cannot reconfigure from kind '{}'", other.kind()))),
        }
    }

    async fn cleanup(&self) -> Result<()> {
        self.index.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wiki_config(space: Option<&str>) -> AdapterConfig {
        AdapterConfig::Wiki {
            name: "team-wiki".to_string(),
            base_url: "https://wiki.example.invalid".to_string(),
            space: space.map(str::to_string),
            credential_ref: None,
        }
    }

    #[test]
    fn unscoped_scan_requires_consent() {
        let result = WikiAdapter::new(&wiki_config(None), None, WikiAdapterOptions::default());
        assert!(result.is_err());
    }

    #[test]
    fn scoped_scan_does_not_require_consent() {
        let result = WikiAdapter::new(&wiki_config(Some("OPS")), None, WikiAdapterOptions::default());
        assert!(result.is_ok());
    }

    #[test]
    fn strip_html_tags_keeps_text_content() {
        let html = "<p>Restart the <strong>service</strong> then check logs</p>";
        assert_eq!(strip_html_tags(html), "Restart the service then check logs");
    }

    #[test]
    fn system_labeled_pages_are_excluded_by_default() {
        let adapter = WikiAdapter::new(&wiki_config(Some("OPS")), None, WikiAdapterOptions::default()).unwrap();
        assert!(adapter.is_system_page(&["archived".to_string()]));
        assert!(!adapter.is_system_page(&["runbook".to_string()]));
    }
}
