//! Git Repository (Docs-as-Code) Adapter
//!
//! Wraps a REST API exposing a git repository's contents (e.g. the GitHub
//! Contents API) and indexes the markdown/text files it finds under a
//! configured path prefix. Enforces a conservative local request quota
//! independent of whatever limits the upstream itself reports, since the
//! upstream's real quota is shared with other consumers this service does
//! not control.

use async_trait::async_trait;
use base64::Engine;
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
const SYSTEM_PATH_PREFIXES: &[&str] = &[".git/", ".github/", "node_modules/", "dist/", "target/", "vendor/"];
const INCLUDED_EXTENSIONS: &[&str] = &["md", "markdown", "txt", "rst", "adoc"];

/// Options that do not belong to [`AdapterConfig::Repo`] itself: consent and
/// content-shape policy supplied once by the composition root
#[derive(Debug, Clone)]
pub struct RepoAdapterOptions {
    /// Must be `true` before an org-wide (no `path_prefix`) scan is permitted
    pub user_consent_given: bool,
    /// Include files under recognized system/generated paths
    pub include_system_pages: bool,
    /// Requests per hour assumed to be the upstream's real quota; the
    /// adapter enforces `ADAPTER_QUOTA_FRACTION` of this locally
    pub upstream_quota_per_hour: u32,
}

impl Default for RepoAdapterOptions {
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

/// REST-API-backed adapter over a single git repository's contents
pub struct RepoAdapter {
    name: String,
    api_base: String,
    branch: String,
    path_prefix: Option<String>,
    credential_ref: Option<String>,
    client: reqwest::Client,
    credentials: Option<Arc<CredentialResolver>>,
    options: RepoAdapterOptions,
    quota: Mutex<QuotaState>,
    last_request_at: Mutex<Option<Instant>>,
    index: DashMap<String, Document>,
    refresh_lock: Mutex<()>,
    refresh_in_progress: AtomicBool,
    consecutive_failures: AtomicU32,
    last_error: Mutex<Option<String>>,
    last_indexed_at: AtomicU64,
}

impl RepoAdapter {
    /// Build an adapter for the repository described by `config`
    pub fn new(
        config: &AdapterConfig,
        credentials: Option<Arc<CredentialResolver>>,
        options: RepoAdapterOptions,
    ) -> Result<Self> {
        let (name, api_base, branch, path_prefix, credential_ref) = match config {
            AdapterConfig::Repo {
                name,
                url,
                branch,
                path_prefix,
            } => (name.clone(), url.clone(), branch.clone(), path_prefix.clone(), None),
            other => {
                return Err(Error::config(format!(
                    "RepoAdapter requires an AdapterConfig::Repo, got kind '{}'",
                    other.kind()
                )));
            }
        };

        if path_prefix.is_none() && !options.user_consent_given {
            return Err(Error::config(format!(
                "repo adapter '{name}' requests an organization-wide scan without user_consent_given"
            )));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(crate::constants::ADAPTER_DEFAULT_TIMEOUT_MS))
            .build()
            .map_err(|e| Error::config(format!("failed to build http client for '{name}': {e}")))?;

        let quota_per_hour = ((options.upstream_quota_per_hour as f64) * ADAPTER_QUOTA_FRACTION).floor() as u32;

        Ok(Self {
            name,
            api_base,
            branch,
            path_prefix,
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

    fn is_system_path(&self, path: &str) -> bool {
        !self.options.include_system_pages && SYSTEM_PATH_PREFIXES.iter().any(|p| path.starts_with(p))
    }

    fn is_included_file(&self, path: &str) -> bool {
        path.rsplit('.')
            .next()
            .map(|ext| INCLUDED_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
            .unwrap_or(false)
    }

    /// Verify the adapter can authenticate against the upstream API
    async fn verify_identity(&self) -> Result<()> {
        self.enforce_quota().await?;
        let request = self.authenticated_request(&self.api_base).await?;
        let response = request
            .send()
            .await
            .map_err(|e| Error::auth(format!("repo adapter '{}' failed to reach upstream: {e}", self.name)))?;

        match response.status().as_u16() {
            200..=299 => Ok(()),
            401 | 403 => Err(Error::auth(format!(
                "repo adapter '{}' was rejected by upstream (HTTP {})",
                self.name,
                response.status()
            ))),
            status => Err(Error::source_adapter(&self.name, format!("upstream returned HTTP {status} during identity check"))),
        }
    }

    async fn list_contents(&self, path: &str, entries: &mut Vec<(String, u64)>) -> Result<()> {
        self.enforce_quota().await?;
        let url = format!(
            "{}/contents/{}?ref={}",
            self.api_base.trim_end_matches('/'),
            path,
            self.branch
        );
        let request = self.authenticated_request(&url).await?;
        let response = request
            .send()
            .await
            .map_err(|e| Error::source_adapter(&self.name, format!("listing '{path}' failed: {e}")))?;
        if !response.status().is_success() {
            return Err(Error::source_adapter(&self.name, format!("listing '{path}' returned HTTP {}", response.status())));
        }
        let items: Vec<serde_json::Value> = response
            .json()
            .await
            .map_err(|e| Error::source_adapter(&self.name, format!("listing '{path}' returned invalid JSON: {e}")))?;

        for item in items {
            let item_path = item.get("path").and_then(|v| v.as_str()).unwrap_or_default().to_string();
            let kind = item.get("type").and_then(|v| v.as_str()).unwrap_or_default();
            if self.is_system_path(&item_path) {
                continue;
            }
            if kind == "dir" {
                Box::pin(self.list_contents(&item_path, entries)).await?;
            } else if kind == "file" && self.is_included_file(&item_path) {
                let size = item.get("size").and_then(|v| v.as_u64()).unwrap_or(0);
                entries.push((item_path, size));
            }
        }
        Ok(())
    }

    async fn fetch_file(&self, path: &str) -> Result<Document> {
        self.enforce_quota().await?;
        let url = format!(
            "{}/contents/{}?ref={}",
            self.api_base.trim_end_matches('/'),
            path,
            self.branch
        );
        let request = self.authenticated_request(&url).await?;
        let response = request
            .send()
            .await
            .map_err(|e| Error::source_adapter(&self.name, format!("fetching '{path}' failed: {e}")))?;
        if !response.status().is_success() {
            return Err(Error::source_adapter(&self.name, format!("fetching '{path}' returned HTTP {}", response.status())));
        }
        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| Error::source_adapter(&self.name, format!("'{path}' returned invalid JSON: {e}")))?;

        let encoded = body.get("content").and_then(|v| v.as_str()).unwrap_or_default();
        let decoded = base64::engine::general_purpose::STANDARD
            .decode(encoded.replace('\n', ""))
            .map_err(|e| Error::source_adapter(&self.name, format!("'{path}' has malformed base64 content: {e}")))?;
        if decoded.len() as u64 > ADAPTER_MAX_DOCUMENT_BYTES {
            return Err(Error::oversized_payload(decoded.len() as u64, ADAPTER_MAX_DOCUMENT_BYTES));
        }
        let content = String::from_utf8_lossy(&decoded).into_owned();

        let title = path
            .rsplit('/')
            .next()
            .unwrap_or(path)
            .trim_end_matches(".md")
            .trim_end_matches(".markdown")
            .replace(['-', '_'], " ");

        let signals = RunbookSignals {
            title: &title,
            content: &content,
            source_category_runbook: false,
            tags: &[],
        };
        let category = runbook_detect::classify(&signals);

        let mut metadata = HashMap::new();
        metadata.insert("source_adapter".to_string(), self.name.clone());
        metadata.insert("repo_path".to_string(), path.to_string());
        metadata.insert("branch".to_string(), self.branch.clone());
        if matches!(category, Category::Runbook) {
            metadata.insert("runbook_subtype".to_string(), runbook_detect::classify_subtype(&signals).as_str().to_string());
        }

        Ok(Document {
            id: Document::hash_content(&format!("{}::{path}", self.name)),
            source_id: self.name.clone(),
            title,
            content: content.clone(),
            category,
            tags: Vec::new(),
            content_hash: Document::hash_content(&content),
            updated_at: now_unix_i64(),
            metadata,
        })
    }
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
impl SourceAdapter for RepoAdapter {
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
        details.insert("branch".to_string(), self.branch.clone());
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
        let root = self.path_prefix.clone().unwrap_or_default();
        let mut entries = Vec::new();

        let walk_result = self.list_contents(&root, &mut entries).await;
        if let Err(e) = walk_result {
            self.consecutive_failures.fetch_add(1, Ordering::SeqCst);
            *self.last_error.lock().await = Some(e.to_string());
            self.refresh_in_progress.store(false, Ordering::SeqCst);
            return Err(e);
        }

        let mut seen_ids = std::collections::HashSet::new();
        let mut any_failure = false;
        for (path, size) in entries {
            if size > ADAPTER_MAX_DOCUMENT_BYTES {
                continue;
            }
            let id = Document::hash_content(&format!("{}::{path}", self.name));
            seen_ids.insert(id.clone());
            match self.fetch_file(&path).await {
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
        metadata.insert("branch".to_string(), self.branch.clone());
        metadata.insert("path_prefix".to_string(), self.path_prefix.clone().unwrap_or_default());
        metadata.insert("indexed_documents".to_string(), self.index.len().to_string());
        Ok(metadata)
    }

    async fn configure(&self, config: &AdapterConfig) -> Result<()> {
        match config {
            AdapterConfig::Repo { .. } => Ok(()),
            other => Err(Error::config(format!("RepoAdapter cannot reconfigure from kind '{}'", other.kind()))),
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

    fn repo_config(path_prefix: Option<&str>) -> AdapterConfig {
        AdapterConfig::Repo {
            name: "docs-repo".to_string(),
            url: "https://api.github.com/repos/example/docs".to_string(),
            branch: "main".to_string(),
            path_prefix: path_prefix.map(str::to_string),
        }
    }

    #[test]
    fn org_wide_scan_requires_consent() {
        let result = RepoAdapter::new(&repo_config(None), None, RepoAdapterOptions::default());
        assert!(result.is_err());
    }

    #[test]
    fn scoped_scan_does_not_require_consent() {
        let result = RepoAdapter::new(&repo_config(Some("docs/runbooks")), None, RepoAdapterOptions::default());
        assert!(result.is_ok());
    }

    #[test]
    fn system_paths_are_excluded_by_default() {
        let adapter = RepoAdapter::new(&repo_config(Some("docs")), None, RepoAdapterOptions::default()).unwrap();
        assert!(adapter.is_system_path(".github/workflows/ci.yml"));
        assert!(!adapter.is_system_path("docs/runbooks/outage.md"));
    }

    #[test]
    fn only_recognized_extensions_are_included() {
        let adapter = RepoAdapter::new(&repo_config(Some("docs")), None, RepoAdapterOptions::default()).unwrap();
        assert!(adapter.is_included_file("docs/runbooks/outage.md"));
        assert!(!adapter.is_included_file("docs/logo.png"));
    }
}
