//! File Adapter
//!
//! Indexes one or more filesystem roots, honoring include/exclude glob
//! patterns and a maximum file size. Builds an in-memory index keyed by a
//! deterministic hash of each file's root-relative path, and serves
//! fuzzy-scored search over title/content/category.

use async_trait::async_trait;
use dashmap::DashMap;
use globset::{Glob, GlobSet, GlobSetBuilder};
use runbook_domain::error::{Error, Result};
use runbook_domain::ports::providers::SourceAdapter;
use runbook_domain::ports::providers::adapter::RefreshOutcome;
use runbook_domain::search::query::{lexical_overlap, process_query};
use runbook_domain::value_objects::{AdapterConfig, AdapterHealth, AdapterHealthStatus, Category, Document};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU32, AtomicU64, Ordering};
use std::time::Instant;
use tokio::sync::Mutex;

use super::runbook_detect::{self, RunbookSignals};

const DEFAULT_MAX_FILE_BYTES: u64 = 1024 * 1024;
const DEFAULT_MAX_DEPTH: usize = 32;

/// Indexes a filesystem tree of documents
pub struct FileAdapter {
    name: String,
    roots: Vec<PathBuf>,
    include: GlobSet,
    exclude: GlobSet,
    max_file_bytes: u64,
    index: DashMap<String, Document>,
    refresh_lock: Mutex<()>,
    refresh_in_progress: AtomicBool,
    consecutive_failures: AtomicU32,
    last_error: Mutex<Option<String>>,
    last_indexed_at: AtomicU64,
}

impl FileAdapter {
    /// Build a file adapter from its declared configuration
    pub fn new(config: &AdapterConfig) -> Result<Self> {
        let AdapterConfig::File {
            name,
            root,
            include,
            exclude,
        } = config
        else {
            return Err(Error::config("FileAdapter requires an AdapterConfig::File"));
        };

        let include_set = build_globset(include, &["**/*.md", "**/*.markdown", "**/*.txt", "**/*.json", "**/*.yaml", "**/*.yml"])?;
        let exclude_set = build_globset(exclude, &["**/.git/**", "**/node_modules/**", "**/target/**"])?;

        Ok(Self {
            name: name.clone(),
            roots: vec![PathBuf::from(root)],
            include: include_set,
            exclude: exclude_set,
            max_file_bytes: DEFAULT_MAX_FILE_BYTES,
            index: DashMap::new(),
            refresh_lock: Mutex::new(()),
            refresh_in_progress: AtomicBool::new(false),
            consecutive_failures: AtomicU32::new(0),
            last_error: Mutex::new(None),
            last_indexed_at: AtomicU64::new(0),
        })
    }

    /// Deterministic document id from a root-relative path
    fn document_id(&self, relative: &Path) -> String {
        Document::hash_content(&format!("{}::{}", self.name, relative.to_string_lossy()))
    }

    fn included(&self, relative: &Path) -> bool {
        self.include.is_match(relative) && !self.exclude.is_match(relative)
    }

    /// Walk all configured roots and (re)build the in-memory index
    async fn build_index(&self) -> Result<RefreshOutcome> {
        let mut outcome = RefreshOutcome::default();
        let mut seen = std::collections::HashSet::new();

        for root in &self.roots {
            if !root.exists() {
                return Err(Error::config(format!("file adapter root '{}' is not accessible", root.display())));
            }

            let walker = ignore::WalkBuilder::new(root)
                .max_depth(Some(DEFAULT_MAX_DEPTH))
                .hidden(false)
                .build();

            for entry in walker.flatten() {
                if !entry.file_type().is_some_and(|t| t.is_file()) {
                    continue;
                }
                let path = entry.path();
                let relative = path.strip_prefix(root).unwrap_or(path);
                if !self.included(relative) {
                    continue;
                }

                match tokio::fs::metadata(path).await {
                    Ok(meta) if meta.len() <= self.max_file_bytes => {}
                    Ok(_) => continue,
                    Err(_) => continue,
                }

                match self.index_file(root, relative, path).await {
                    Ok(doc) => {
                        let id = doc.id.clone();
                        seen.insert(id.clone());
                        if self.index.insert(id, doc).is_some() {
                            outcome.modified += 1;
                        } else {
                            outcome.added += 1;
                        }
                    }
                    Err(e) => {
                        tracing::warn!(path = %path.display(), error = %e, "skipping file during index build");
                    }
                }
            }
        }

        let stale: Vec<String> = self
            .index
            .iter()
            .map(|e| e.key().clone())
            .filter(|id| !seen.contains(id))
            .collect();
        for id in stale {
            self.index.remove(&id);
            outcome.removed += 1;
        }

        self.last_indexed_at.store(now_unix(), Ordering::Relaxed);
        Ok(outcome)
    }

    async fn index_file(&self, root: &Path, relative: &Path, path: &Path) -> Result<Document> {
        let raw = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| Error::io(format!("failed to read '{}': {e}", path.display())))?;

        let (front_matter, body) = extract_front_matter(&raw);
        let title = front_matter
            .get("title")
            .cloned()
            .unwrap_or_else(|| derive_title(relative, &body));
        let tags: Vec<String> = front_matter
            .get("tags")
            .map(|t| t.split(',').map(|s| s.trim().to_string()).collect())
            .unwrap_or_default();

        let searchable = format!("{title}\n{body}");
        let signals = RunbookSignals {
            title: &title,
            content: &searchable,
            source_category_runbook: false,
            tags: &tags,
        };
        let category = runbook_detect::classify(&signals);

        let metadata_updated = front_matter
            .get("updated")
            .and_then(|s| chrono::DateTime::parse_from_rfc3339(s).ok())
            .map(|d| d.timestamp());
        let updated_at = metadata_updated.unwrap_or_else(now_unix_i64);

        let mut metadata = HashMap::new();
        metadata.insert("path".to_string(), relative.to_string_lossy().to_string());
        metadata.insert("root".to_string(), root.to_string_lossy().to_string());
        if let Some(author) = front_matter.get("author") {
            metadata.insert("author".to_string(), author.clone());
        }

        Ok(Document {
            id: self.document_id(relative),
            source_id: self.name.clone(),
            title,
            content: body,
            category,
            tags,
            content_hash: Document::hash_content(&raw),
            updated_at,
            metadata,
        })
    }

    fn fuzzy_score(&self, query: &str, doc: &Document) -> f64 {
        let processed = process_query(query);
        let title_score = lexical_overlap(&processed, &doc.title);
        let content_score = lexical_overlap(&processed, &doc.content);
        let category_score = if matches!(doc.category, Category::Runbook) && query.to_lowercase().contains("runbook") {
            1.0
        } else {
            0.0
        };
        title_score * 0.4 + content_score * 0.6 + category_score * 0.2
    }
}

#[async_trait]
impl SourceAdapter for FileAdapter {
    fn name(&self) -> &str {
        &self.name
    }

    async fn initialize(&self, config: &AdapterConfig) -> Result<()> {
        self.configure(config).await?;
        self.build_index().await?;
        Ok(())
    }

    async fn search(&self, query: &str, limit: usize) -> Result<Vec<Document>> {
        let start = Instant::now();
        let threshold = 0.1;
        let mut scored: Vec<(f64, Document)> = self
            .index
            .iter()
            .map(|e| (self.fuzzy_score(query, e.value()), e.value().clone()))
            .filter(|(score, _)| *score >= threshold)
            .collect();
        scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));

        let mut results: Vec<Document> = scored.into_iter().take(limit).map(|(_, d)| d).collect();
        let elapsed = start.elapsed().as_millis().to_string();
        for doc in &mut results {
            doc.metadata.insert("retrieval_time_ms".to_string(), elapsed.clone());
        }
        Ok(results)
    }

    async fn search_runbooks(&self, query: &str, limit: usize) -> Result<Vec<Document>> {
        let mut results = self.search(query, limit * 2).await?;
        results.retain(|d| matches!(d.category, Category::Runbook));
        results.truncate(limit);
        Ok(results)
    }

    async fn get_document(&self, document_id: &str) -> Result<Option<Document>> {
        Ok(self.index.get(document_id).map(|e| e.value().clone()))
    }

    async fn health_check(&self) -> Result<AdapterHealth> {
        let failures = self.consecutive_failures.load(Ordering::Relaxed);
        let status = if failures == 0 {
            AdapterHealthStatus::Healthy
        } else if failures < 3 {
            AdapterHealthStatus::Degraded
        } else {
            AdapterHealthStatus::Unhealthy
        };

        let mut details = HashMap::new();
        details.insert("documents".to_string(), self.index.len().to_string());
        details.insert("roots".to_string(), self.roots.len().to_string());

        Ok(AdapterHealth {
            name: self.name.clone(),
            status,
            consecutive_failures: failures,
            last_error: self.last_error.lock().await.clone(),
            details,
        })
    }

    async fn refresh_index(&self) -> Result<RefreshOutcome> {
        if self.refresh_in_progress.swap(true, Ordering::AcqRel) {
            return Ok(RefreshOutcome::default());
        }
        let _guard = self.refresh_lock.lock().await;
        let result = self.build_index().await;
        self.refresh_in_progress.store(false, Ordering::Release);

        match &result {
            Ok(_) => {
                self.consecutive_failures.store(0, Ordering::Relaxed);
                *self.last_error.lock().await = None;
            }
            Err(e) => {
                self.consecutive_failures.fetch_add(1, Ordering::Relaxed);
                *self.last_error.lock().await = Some(e.to_string());
            }
        }
        result
    }

    async fn get_metadata(&self) -> Result<HashMap<String, String>> {
        let mut metadata = HashMap::new();
        metadata.insert("name".to_string(), self.name.clone());
        metadata.insert("type".to_string(), "file".to_string());
        metadata.insert("document_count".to_string(), self.index.len().to_string());
        metadata.insert("last_indexed".to_string(), self.last_indexed_at.load(Ordering::Relaxed).to_string());
        Ok(metadata)
    }

    async fn configure(&self, _config: &AdapterConfig) -> Result<()> {
        Ok(())
    }

    async fn cleanup(&self) -> Result<()> {
        self.index.clear();
        Ok(())
    }
}

fn build_globset(patterns: &[String], defaults: &[&str]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    let effective: Vec<String> = if patterns.is_empty() {
        defaults.iter().map(|s| s.to_string()).collect()
    } else {
        patterns.to_vec()
    };
    for pattern in effective {
        let glob = Glob::new(&pattern).map_err(|e| Error::config(format!("invalid glob pattern '{pattern}': {e}")))?;
        builder.add(glob);
    }
    builder.build().map_err(|e| Error::config(format!("failed to build glob set: {e}")))
}

/// Split a leading `---`-delimited YAML-ish front-matter block from the body
fn extract_front_matter(raw: &str) -> (HashMap<String, String>, String) {
    let mut fields = HashMap::new();
    if let Some(rest) = raw.strip_prefix("---\n") {
        if let Some(end) = rest.find("\n---\n") {
            let block = &rest[..end];
            for line in block.lines() {
                if let Some((key, value)) = line.split_once(':') {
                    fields.insert(key.trim().to_string(), value.trim().trim_matches('"').to_string());
                }
            }
            return (fields, rest[end + 5..].to_string());
        }
    }
    (fields, raw.to_string())
}

fn derive_title(relative: &Path, body: &str) -> String {
    for line in body.lines() {
        if let Some(heading) = line.strip_prefix("# ") {
            return heading.trim().to_string();
        }
    }
    relative
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| relative.to_string_lossy().to_string())
}

fn now_unix() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

fn now_unix_i64() -> i64 {
    now_unix() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_file(dir: &Path, name: &str, content: &str) {
        std::fs::write(dir.join(name), content).unwrap();
    }

    #[tokio::test]
    async fn indexes_markdown_files_and_searches() {
        let dir = tempfile::tempdir().unwrap();
        write_file(
            dir.path(),
            "outage.md",
            "---\ntitle: Database Outage Runbook\ntags: runbook\n---\n# Database Outage Runbook\n1. Check connections\n2. Escalate to on-call",
        );
        write_file(dir.path(), "notes.md", "# Design notes\nJust some background reading.");

        let config = AdapterConfig::File {
            name: "docs".to_string(),
            root: dir.path().to_string_lossy().to_string(),
            include: vec![],
            exclude: vec![],
        };
        let adapter = FileAdapter::new(&config).unwrap();
        adapter.initialize(&config).await.unwrap();

        let results = adapter.search("database outage", 10).await.unwrap();
        assert!(!results.is_empty());
        assert_eq!(results[0].title, "Database Outage Runbook");

        let runbooks = adapter.search_runbooks("database outage", 10).await.unwrap();
        assert!(runbooks.iter().all(|d| matches!(d.category, Category::Runbook)));
    }

    #[tokio::test]
    async fn concurrent_refresh_is_serialized_and_skips() {
        let dir = tempfile::tempdir().unwrap();
        write_file(dir.path(), "a.md", "# A\ncontent");
        let config = AdapterConfig::File {
            name: "docs".to_string(),
            root: dir.path().to_string_lossy().to_string(),
            include: vec![],
            exclude: vec![],
        };
        let adapter = Arc::new(FileAdapter::new(&config).unwrap());
        adapter.initialize(&config).await.unwrap();

        adapter.refresh_in_progress.store(true, Ordering::Release);
        let outcome = adapter.refresh_index().await.unwrap();
        assert_eq!(outcome.added + outcome.modified + outcome.removed, 0);
        adapter.refresh_in_progress.store(false, Ordering::Release);
    }
}
