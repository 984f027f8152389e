//! Generic HTTP(S) API Adapter
//!
//! Polls a set of configured endpoints on an upstream API and indexes the
//! documents each one returns. Every endpoint declares its own HTTP method,
//! content type (`html` or `json`), extraction rules, rate limit, timeout
//! and cache TTL, and moves through a small per-endpoint state machine
//! (idle → scheduled → in-flight → succeeded | timed-out | rate-limited |
//! error) as `refresh_index` drives it.

use async_trait::async_trait;
use dashmap::DashMap;
use jsonpath_rust::JsonPathQuery;
use runbook_domain::error::{Error, Result};
use runbook_domain::ports::providers::SourceAdapter;
use runbook_domain::ports::providers::adapter::RefreshOutcome;
use runbook_domain::search::query::{lexical_overlap, process_query};
use runbook_domain::value_objects::{AdapterConfig, AdapterHealth, AdapterHealthStatus, Category, Document};
use scraper::{Html, Selector};
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU32, AtomicU64, Ordering};
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

use super::env_var;
use super::runbook_detect::{self, RunbookSignals};

const DEFAULT_MAX_CONTENT_SIZE_MB: u64 = 10;
const DEFAULT_RATE_LIMIT_PER_MIN: u32 = 60;
const DEFAULT_TIMEOUT_MS: u64 = 3000;
const MAX_BACKOFF_ATTEMPTS: u32 = 4;

/// Content type an endpoint returns, determining which extraction path runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndpointContentType {
    /// HTML page, extracted via CSS selectors
    Html,
    /// JSON body, projected via JSON-path expressions
    Json,
}

/// CSS selectors used to pull title/content out of an HTML response
#[derive(Debug, Clone, Default)]
pub struct HtmlSelectors {
    /// Selector for the title, falls back to the document `<title>`
    pub title: Option<String>,
    /// Selector for the main content block
    pub content: Option<String>,
    /// Selectors whose matched subtrees are stripped before extraction
    pub exclude: Vec<String>,
}

/// JSON-path expressions used to project a JSON body into a document
#[derive(Debug, Clone, Default)]
pub struct JsonProjections {
    /// JSON-path to the title field
    pub title_path: Option<String>,
    /// JSON-path to the content field
    pub content_path: Option<String>,
}

/// How an endpoint authenticates against the upstream API
#[derive(Debug, Clone)]
pub enum AuthConfig {
    /// No authentication
    None,
    /// API key placed in a named header, read from a named environment variable
    ApiKey {
        /// Header name the key is sent under
        header: String,
        /// Environment variable holding the key value
        env_var: String,
    },
    /// Bearer token read from a named environment variable
    BearerToken {
        /// Environment variable holding the token
        env_var: String,
    },
    /// HTTP Basic auth, username and password each read from an environment variable
    Basic {
        /// Environment variable holding the username
        username_env: String,
        /// Environment variable holding the password
        password_env: String,
    },
}

/// Configuration for a single polled endpoint
#[derive(Debug, Clone)]
pub struct EndpointConfig {
    /// Logical name for this endpoint, used to key the state machine and index
    pub name: String,
    /// HTTP method
    pub method: reqwest::Method,
    /// Path appended to the adapter's base URL
    pub path: String,
    /// Response content type
    pub content_type: EndpointContentType,
    /// HTML extraction rules, used when `content_type` is `Html`
    pub html_selectors: HtmlSelectors,
    /// JSON extraction rules, used when `content_type` is `Json`
    pub json_projections: JsonProjections,
    /// Requests per minute permitted against this endpoint
    pub rate_limit_per_min: u32,
    /// Per-request timeout
    pub timeout_ms: u64,
    /// How long a successful fetch may be served from cache before re-polling
    pub cache_ttl_secs: u64,
    /// Whether HTTP redirects are followed for this endpoint
    pub follow_redirects: bool,
}

impl EndpointConfig {
    /// Build an endpoint config with sensible defaults for everything but name/path
    pub fn new(name: impl Into<String>, path: impl Into<String>, content_type: EndpointContentType) -> Self {
        Self {
            name: name.into(),
            method: reqwest::Method::GET,
            path: path.into(),
            content_type,
            html_selectors: HtmlSelectors::default(),
            json_projections: JsonProjections::default(),
            rate_limit_per_min: DEFAULT_RATE_LIMIT_PER_MIN,
            timeout_ms: DEFAULT_TIMEOUT_MS,
            cache_ttl_secs: 300,
            follow_redirects: true,
        }
    }
}

/// State of a single endpoint's fetch lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndpointState {
    /// Not yet scheduled this cycle
    Idle,
    /// Scheduled, waiting for a rate-limit slot
    Scheduled,
    /// Request in flight
    InFlight,
    /// Last fetch succeeded
    Succeeded,
    /// Last fetch exceeded its timeout
    TimedOut,
    /// Last fetch was rate-limited by the upstream (HTTP 429)
    RateLimited,
    /// Last fetch failed for another reason
    Error,
}

struct TokenBucket {
    capacity: u32,
    tokens: Mutex<(u32, Instant)>,
}

impl TokenBucket {
    fn new(per_minute: u32) -> Self {
        Self {
            capacity: per_minute.max(1),
            tokens: Mutex::new((per_minute.max(1), Instant::now())),
        }
    }

    async fn acquire(&self) -> bool {
        let mut guard = self.tokens.lock().await;
        let (tokens, last_refill) = &mut *guard;
        let elapsed = last_refill.elapsed();
        if elapsed >= Duration::from_secs(60) {
            *tokens = self.capacity;
            *last_refill = Instant::now();
        }
        if *tokens > 0 {
            *tokens -= 1;
            true
        } else {
            false
        }
    }
}

/// Generic HTTP(S) API source adapter
pub struct HttpAdapter {
    name: String,
    base_url: String,
    endpoints: Vec<EndpointConfig>,
    auth: AuthConfig,
    client_redirects: reqwest::Client,
    client_no_redirects: reqwest::Client,
    max_content_size_bytes: u64,
    index: DashMap<String, Document>,
    states: DashMap<String, EndpointState>,
    buckets: DashMap<String, Arc<TokenBucket>>,
    refresh_lock: Mutex<()>,
    refresh_in_progress: AtomicBool,
    consecutive_failures: AtomicU32,
    last_error: Mutex<Option<String>>,
    last_indexed_at: AtomicU64,
}

impl HttpAdapter {
    /// Build an adapter over the given endpoint set and auth policy
    ///
    /// `config` must be [`AdapterConfig::Http`]; endpoint declarations are
    /// not part of the domain's adapter configuration surface, so they are
    /// supplied directly by the composition root alongside it.
    pub fn new(config: &AdapterConfig, endpoints: Vec<EndpointConfig>, auth: AuthConfig) -> Result<Self> {
        let (name, base_url) = match config {
            AdapterConfig::Http { name, base_url, .. } => (name.clone(), base_url.clone()),
            other => {
                return Err(Error::config(format!(
                    "HttpAdapter requires an AdapterConfig::Http, got kind '{}'",
                    other.kind()
                )));
            }
        };
        if endpoints.is_empty() {
            return Err(Error::config(format!("http adapter '{name}' has no endpoints configured")));
        }

        let client_redirects = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()
            .map_err(|e| Error::config(format!("failed to build http client for '{name}': {e}")))?;
        let client_no_redirects = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| Error::config(format!("failed to build http client for '{name}': {e}")))?;

        let buckets = DashMap::new();
        let states = DashMap::new();
        for endpoint in &endpoints {
            buckets.insert(endpoint.name.clone(), Arc::new(TokenBucket::new(endpoint.rate_limit_per_min)));
            states.insert(endpoint.name.clone(), EndpointState::Idle);
        }

        Ok(Self {
            name,
            base_url,
            endpoints,
            auth,
            client_redirects,
            client_no_redirects,
            max_content_size_bytes: DEFAULT_MAX_CONTENT_SIZE_MB * 1024 * 1024,
            index: DashMap::new(),
            states,
            buckets,
            refresh_lock: Mutex::new(()),
            refresh_in_progress: AtomicBool::new(false),
            consecutive_failures: AtomicU32::new(0),
            last_error: Mutex::new(None),
            last_indexed_at: AtomicU64::new(0),
        })
    }

    /// Override the max content size, in megabytes, oversized payloads are rejected beyond
    pub fn with_max_content_size_mb(mut self, mb: u64) -> Self {
        self.max_content_size_bytes = mb * 1024 * 1024;
        self
    }

    fn document_id(&self, endpoint_name: &str) -> String {
        Document::hash_content(&format!("{}::{}", self.name, endpoint_name))
    }

    fn client_for(&self, endpoint: &EndpointConfig) -> &reqwest::Client {
        if endpoint.follow_redirects {
            &self.client_redirects
        } else {
            &self.client_no_redirects
        }
    }

    async fn apply_auth(&self, builder: reqwest::RequestBuilder) -> Result<reqwest::RequestBuilder> {
        Ok(match &self.auth {
            AuthConfig::None => builder,
            AuthConfig::ApiKey { header, env_var: var } => builder.header(header.as_str(), env_var(var)?),
            AuthConfig::BearerToken { env_var: var } => builder.bearer_auth(env_var(var)?),
            AuthConfig::Basic {
                username_env,
                password_env,
            } => builder.basic_auth(env_var(username_env)?, Some(env_var(password_env)?)),
        })
    }

    async fn fetch_endpoint(&self, endpoint: &EndpointConfig) -> Result<Document> {
        let bucket = self
            .buckets
            .get(&endpoint.name)
            .map(|b| b.clone())
            .ok_or_else(|| Error::config(format!("unknown endpoint '{}'", endpoint.name)))?;

        self.states.insert(endpoint.name.clone(), EndpointState::Scheduled);
        if !bucket.acquire().await {
            self.states.insert(endpoint.name.clone(), EndpointState::RateLimited);
            return Err(Error::rate_limit(1000));
        }

        self.states.insert(endpoint.name.clone(), EndpointState::InFlight);

        let url = format!("{}{}", self.base_url.trim_end_matches('/'), endpoint.path);
        let mut attempt = 0u32;
        loop {
            let builder = self.client_for(endpoint).request(endpoint.method.clone(), &url);
            let builder = self.apply_auth(builder).await?;
            let timeout = Duration::from_millis(endpoint.timeout_ms);

            let response = tokio::time::timeout(timeout, builder.send()).await;
            let response = match response {
                Ok(Ok(r)) => r,
                Ok(Err(e)) => {
                    self.states.insert(endpoint.name.clone(), EndpointState::Error);
                    return Err(Error::source_adapter(&self.name, format!("request to '{url}' failed: {e}")));
                }
                Err(_) => {
                    self.states.insert(endpoint.name.clone(), EndpointState::TimedOut);
                    return Err(Error::timeout(format!("http fetch '{}'", endpoint.name), None));
                }
            };

            if response.status().as_u16() == 429 {
                attempt += 1;
                if attempt >= MAX_BACKOFF_ATTEMPTS {
                    self.states.insert(endpoint.name.clone(), EndpointState::RateLimited);
                    return Err(Error::rate_limit(backoff_ms(attempt)));
                }
                self.states.insert(endpoint.name.clone(), EndpointState::RateLimited);
                tokio::time::sleep(Duration::from_millis(backoff_ms(attempt))).await;
                continue;
            }

            if !response.status().is_success() {
                self.states.insert(endpoint.name.clone(), EndpointState::Error);
                return Err(Error::source_adapter(
                    &self.name,
                    format!("'{}' returned HTTP {}", endpoint.name, response.status()),
                ));
            }

            if let Some(len) = response.content_length() {
                if len > self.max_content_size_bytes {
                    self.states.insert(endpoint.name.clone(), EndpointState::Error);
                    return Err(Error::oversized_payload(len, self.max_content_size_bytes));
                }
            }

            let body = response
                .bytes()
                .await
                .map_err(|e| Error::source_adapter(&self.name, format!("failed reading body for '{}': {e}", endpoint.name)))?;
            if body.len() as u64 > self.max_content_size_bytes {
                self.states.insert(endpoint.name.clone(), EndpointState::Error);
                return Err(Error::oversized_payload(body.len() as u64, self.max_content_size_bytes));
            }

            let text = String::from_utf8_lossy(&body).into_owned();
            let doc = match endpoint.content_type {
                EndpointContentType::Html => self.extract_html(endpoint, &text)?,
                EndpointContentType::Json => self.extract_json(endpoint, &text)?,
            };

            self.states.insert(endpoint.name.clone(), EndpointState::Succeeded);
            return Ok(doc);
        }
    }

    fn extract_html(&self, endpoint: &EndpointConfig, body: &str) -> Result<Document> {
        let document = Html::parse_document(body);

        let title = endpoint
            .html_selectors
            .title
            .as_deref()
            .and_then(|sel| Selector::parse(sel).ok())
            .and_then(|sel| document.select(&sel).next())
            .map(|el| el.text().collect::<Vec<_>>().join(" ").trim().to_string())
            .filter(|s| !s.is_empty())
            .or_else(|| {
                Selector::parse("title")
                    .ok()
                    .and_then(|sel| document.select(&sel).next())
                    .map(|el| el.text().collect::<String>())
            })
            .unwrap_or_else(|| endpoint.name.clone());

        let content_selector = endpoint
            .html_selectors
            .content
            .as_deref()
            .and_then(|sel| Selector::parse(sel).ok())
            .or_else(|| Selector::parse("body").ok());

        // Text belonging to excluded subtrees (nav, ads, scripts) is collected
        // up front and stripped back out of the joined content text, since
        // scraper has no "select minus subtree" primitive.
        let excluded_text: Vec<String> = endpoint
            .html_selectors
            .exclude
            .iter()
            .filter_map(|s| Selector::parse(s).ok())
            .flat_map(|sel| document.select(&sel))
            .map(|el| el.text().collect::<Vec<_>>().join(" ").trim().to_string())
            .filter(|t| !t.is_empty())
            .collect();

        let content = content_selector
            .and_then(|sel| document.select(&sel).next())
            .map(|root| {
                let mut lines: Vec<String> = root
                    .text()
                    .map(str::trim)
                    .filter(|t| !t.is_empty())
                    .map(str::to_string)
                    .collect();
                lines.retain(|line| !excluded_text.iter().any(|ex| ex == line));
                lines.join("\n")
            })
            .unwrap_or_default();

        self.build_document(endpoint, title, content)
    }

    fn extract_json(&self, endpoint: &EndpointConfig, body: &str) -> Result<Document> {
        let value: serde_json::Value = serde_json::from_str(body)?;

        let title = endpoint
            .json_projections
            .title_path
            .as_deref()
            .and_then(|path| json_path_first(&value, path))
            .or_else(|| json_field_str(&value, &["title", "name", "subject"]))
            .unwrap_or_else(|| endpoint.name.clone());

        let content = endpoint
            .json_projections
            .content_path
            .as_deref()
            .and_then(|path| json_path_first(&value, path))
            .or_else(|| json_field_str(&value, &["content", "body", "text", "description"]))
            .unwrap_or_else(|| value.to_string());

        self.build_document(endpoint, title, content)
    }

    fn build_document(&self, endpoint: &EndpointConfig, title: String, content: String) -> Result<Document> {
        let signals = RunbookSignals {
            title: &title,
            content: &content,
            source_category_runbook: false,
            tags: &[],
        };
        let category = runbook_detect::classify(&signals);

        let mut metadata = HashMap::new();
        metadata.insert("source_adapter".to_string(), self.name.clone());
        metadata.insert("endpoint".to_string(), endpoint.name.clone());

        Ok(Document {
            id: self.document_id(&endpoint.name),
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

    fn fuzzy_score(&self, query: &runbook_domain::value_objects::search::ProcessedQuery, doc: &Document) -> f64 {
        let title_overlap = lexical_overlap(query, &doc.title);
        let content_overlap = lexical_overlap(query, &doc.content);
        let category_overlap = if matches!(doc.category, Category::Runbook) && query.tokens.iter().any(|t| t.contains("runbook")) {
            1.0
        } else {
            0.0
        };
        title_overlap * 0.4 + content_overlap * 0.6 + category_overlap * 0.2
    }
}

fn backoff_ms(attempt: u32) -> u64 {
    let base = 500u64 * 2u64.saturating_pow(attempt);
    let jitter = (attempt as u64 * 137) % 250;
    base.min(30_000) + jitter
}

fn json_path_first(value: &serde_json::Value, path: &str) -> Option<String> {
    let result = value.clone().path(path).ok()?;
    match result {
        serde_json::Value::Array(items) => items.into_iter().next(),
        other => Some(other),
    }
    .map(|v| match v {
        serde_json::Value::String(s) => s,
        other => other.to_string(),
    })
}

fn json_field_str(value: &serde_json::Value, keys: &[&str]) -> Option<String> {
    let obj = value.as_object()?;
    for key in keys {
        if let Some(v) = obj.get(*key) {
            return Some(match v {
                serde_json::Value::String(s) => s.clone(),
                other => other.to_string(),
            });
        }
    }
    None
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
impl SourceAdapter for HttpAdapter {
    fn name(&self) -> &str {
        &self.name
    }

    async fn initialize(&self, _config: &AdapterConfig) -> Result<()> {
        self.refresh_index().await.map(|_| ())
    }

    async fn search(&self, query: &str, limit: usize) -> Result<Vec<Document>> {
        let processed = process_query(query);
        let mut scored: Vec<(f64, Document)> = self
            .index
            .iter()
            .map(|entry| (self.fuzzy_score(&processed, entry.value()), entry.value().clone()))
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
        details.insert("endpoints".to_string(), self.endpoints.len().to_string());
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
        let mut seen_failure = false;
        for endpoint in &self.endpoints {
            let key = self.document_id(&endpoint.name);
            let existed = self.index.contains_key(&key);
            match self.fetch_endpoint(endpoint).await {
                Ok(doc) => {
                    self.index.insert(key, doc);
                    if existed {
                        outcome.modified += 1;
                    } else {
                        outcome.added += 1;
                    }
                }
                Err(e) => {
                    seen_failure = true;
                    *self.last_error.lock().await = Some(e.to_string());
                }
            }
        }

        if seen_failure {
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
        metadata.insert("endpoint_count".to_string(), self.endpoints.len().to_string());
        metadata.insert("indexed_documents".to_string(), self.index.len().to_string());
        Ok(metadata)
    }

    async fn configure(&self, config: &AdapterConfig) -> Result<()> {
        match config {
            AdapterConfig::Http { .. } => Ok(()),
            other => Err(Error::config(format!(
                "HttpAdapter cannot reconfigure from kind '{}'",
                other.kind()
            ))),
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

    fn http_config() -> AdapterConfig {
        AdapterConfig::Http {
            name: "test-api".to_string(),
            base_url: "https://example.invalid".to_string(),
            credential_ref: None,
        }
    }

    #[test]
    fn rejects_config_without_endpoints() {
        let result = HttpAdapter::new(&http_config(), Vec::new(), AuthConfig::None);
        assert!(result.is_err());
    }

    #[test]
    fn rejects_non_http_config() {
        let config = AdapterConfig::File {
            name: "x".to_string(),
            root: "/tmp".to_string(),
            include: Vec::new(),
            exclude: Vec::new(),
        };
        let endpoints = vec![EndpointConfig::new("items", "/items", EndpointContentType::Json)];
        let result = HttpAdapter::new(&config, endpoints, AuthConfig::None);
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn json_extraction_uses_declared_fields() {
        let adapter = HttpAdapter::new(
            &http_config(),
            vec![EndpointConfig::new("items", "/items", EndpointContentType::Json)],
            AuthConfig::None,
        )
        .unwrap();
        let endpoint = &adapter.endpoints[0];
        let doc = adapter
            .extract_json(endpoint, r#"{"title": "Outage Runbook", "content": "1. Check logs\n2. Escalate"}"#)
            .unwrap();
        assert_eq!(doc.title, "Outage Runbook");
        assert!(doc.content.contains("Escalate"));
    }

    #[test]
    fn backoff_grows_with_attempt() {
        assert!(backoff_ms(2) > backoff_ms(1));
    }
}
