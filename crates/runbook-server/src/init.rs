//! Server Initialization
//!
//! The composition root: loads configuration, constructs every concrete
//! adapter/provider the configuration names, wires them into the
//! application service implementations, and starts the configured
//! transport.
//!
//! # Transport Modes
//!
//! `ServerConfig.transport` selects between `Stdio` (MCP over stdin/stdout,
//! for CLI tools and IDE integrations) and `Http` (the REST API).

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use runbook_application::ports::registry::AdapterRegistry;
use runbook_application::use_cases::{
    FeedbackServiceImpl, RunbookServiceImpl, SearchServiceImpl, SourcesServiceImpl,
};
use runbook_domain::error::Result as DomainResult;
use runbook_domain::ports::providers::{CacheProvider, EmbeddingProvider, SourceAdapter};
use runbook_domain::ports::infrastructure::StateStoreProvider;
use runbook_domain::value_objects::AdapterConfig;
use runbook_infrastructure::config::{AppConfig, ConfigLoader, TransportMode};
use runbook_infrastructure::crypto::CryptoService;
use runbook_infrastructure::infrastructure::{
    AtomicPerformanceMetrics, EmbeddingStoreImpl, FileStateStoreProvider,
};
use runbook_providers::adapters::{
    CredentialResolver, DatabaseAdapter, FileAdapter, HttpAdapter, RepoAdapter, WikiAdapter,
    DefaultAdapterRegistry,
};
use runbook_providers::adapters::database::connection::ConnectionManagerOptions;
use runbook_providers::adapters::http::{AuthConfig as HttpAuthConfig, EndpointConfig, EndpointContentType};
use runbook_providers::adapters::repo::RepoAdapterOptions;
use runbook_providers::adapters::wiki::WikiAdapterOptions;
use runbook_providers::cache::{MokaCacheProvider, NullCacheProvider, RedisCacheProvider};
use runbook_providers::embedding::{
    GeminiEmbeddingProvider, NullEmbeddingProvider, OllamaEmbeddingProvider, OpenAIEmbeddingProvider,
    VoyageAIEmbeddingProvider,
};
use runbook_providers::events::TokioEventBusProvider;
use tracing::{error, info, warn};

use crate::transport::http::{HttpTransport, HttpTransportConfig};
use crate::transport::stdio::StdioServerExt;
use crate::McpServer;
use crate::McpServerBuilder;

/// Run the operational knowledge retrieval service
///
/// Loads configuration, builds the MCP server, and serves it over the
/// configured transport until shutdown.
pub async fn run_server(config_path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(config_path)?;
    runbook_infrastructure::logging::init_logging(config.logging.clone())?;

    info!(
        transport = ?config.server.transport,
        host = %config.server.network.host,
        port = %config.server.network.port,
        "starting operational knowledge retrieval service"
    );

    let transport = config.server.transport;
    let host = config.server.network.host.clone();
    let port = config.server.network.port;

    let server = create_mcp_server(&config).await?;
    info!("MCP server initialized");

    match transport {
        TransportMode::Stdio => {
            info!("starting stdio transport");
            server.serve_stdio().await
        }
        TransportMode::Http => {
            info!(%host, port, "starting HTTP transport");
            let http_config = HttpTransportConfig { host, port };
            HttpTransport::new(http_config, Arc::new(server))
                .start()
                .await
                .map_err(|e| -> Box<dyn std::error::Error> { e })
        }
    }
}

fn load_config(config_path: Option<&Path>) -> Result<AppConfig, Box<dyn std::error::Error>> {
    let loader = match config_path {
        Some(path) => ConfigLoader::new().with_config_path(path),
        None => ConfigLoader::new(),
    };
    Ok(loader.load()?)
}

/// Build every adapter named in `config.adapters`, skipping (and logging)
/// any that fail to construct rather than aborting startup: a single
/// misconfigured source should not take the whole service down.
async fn build_adapters(
    config: &AppConfig,
    credentials: Arc<CredentialResolver>,
) -> Vec<Arc<dyn SourceAdapter>> {
    let mut adapters: Vec<Arc<dyn SourceAdapter>> = Vec::new();

    for adapter_config in &config.adapters {
        let built = build_one_adapter(adapter_config, Arc::clone(&credentials)).await;
        match built {
            Ok(adapter) => adapters.push(adapter),
            Err(e) => {
                warn!(
                    adapter = adapter_config.name(),
                    kind = adapter_config.kind(),
                    error = %e,
                    "skipping adapter that failed to construct"
                );
            }
        }
    }

    adapters
}

async fn build_one_adapter(
    adapter_config: &AdapterConfig,
    credentials: Arc<CredentialResolver>,
) -> DomainResult<Arc<dyn SourceAdapter>> {
    match adapter_config {
        AdapterConfig::File { .. } => {
            Ok(Arc::new(FileAdapter::new(adapter_config)?) as Arc<dyn SourceAdapter>)
        }
        AdapterConfig::Http { credential_ref, .. } => {
            let auth = match credential_ref {
                Some(env_var) => HttpAuthConfig::BearerToken {
                    env_var: env_var.clone(),
                },
                None => HttpAuthConfig::None,
            };
            let endpoints = vec![EndpointConfig::new("root", "/", EndpointContentType::Json)];
            Ok(Arc::new(HttpAdapter::new(adapter_config, endpoints, auth)?) as Arc<dyn SourceAdapter>)
        }
        AdapterConfig::Repo { path_prefix, .. } => {
            let options = RepoAdapterOptions {
                user_consent_given: path_prefix.is_some() || broad_scan_allowed(),
                ..Default::default()
            };
            Ok(Arc::new(RepoAdapter::new(adapter_config, Some(credentials), options)?)
                as Arc<dyn SourceAdapter>)
        }
        AdapterConfig::Wiki { space, .. } => {
            let options = WikiAdapterOptions {
                user_consent_given: space.is_some() || broad_scan_allowed(),
                ..Default::default()
            };
            Ok(Arc::new(WikiAdapter::new(adapter_config, Some(credentials), options)?)
                as Arc<dyn SourceAdapter>)
        }
        AdapterConfig::Database { .. } => {
            let adapter = DatabaseAdapter::new(
                adapter_config,
                credentials,
                ConnectionManagerOptions::default(),
            )
            .await?;
            Ok(Arc::new(adapter) as Arc<dyn SourceAdapter>)
        }
    }
}

/// Org-wide Repo/Wiki scans with no `path_prefix`/`space` restriction are
/// opt-in, per the adapters' own consent gate. Set to allow broad scans
/// without restricting every source to a subdirectory or space.
fn broad_scan_allowed() -> bool {
    std::env::var("RUNBOOK_ALLOW_BROAD_SOURCE_SCAN").is_ok()
}

fn build_embedding_provider(config: &AppConfig) -> Arc<dyn EmbeddingProvider> {
    let embedding = &config.embedding;
    match embedding.provider.as_str() {
        "ollama" => {
            let base_url = std::env::var("OLLAMA_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:11434".to_string());
            Arc::new(OllamaEmbeddingProvider::new(
                base_url,
                embedding.model.clone(),
                Duration::from_secs(30),
                reqwest::Client::new(),
            ))
        }
        "openai" => {
            let api_key = std::env::var("OPENAI_API_KEY").unwrap_or_default();
            Arc::new(OpenAIEmbeddingProvider::new(
                api_key,
                None,
                embedding.model.clone(),
                Duration::from_secs(30),
                reqwest::Client::new(),
            ))
        }
        "voyageai" => {
            let api_key = std::env::var("VOYAGEAI_API_KEY").unwrap_or_default();
            Arc::new(VoyageAIEmbeddingProvider::new(
                api_key,
                None,
                embedding.model.clone(),
                reqwest::Client::new(),
            ))
        }
        "gemini" => {
            let api_key = std::env::var("GEMINI_API_KEY").unwrap_or_default();
            Arc::new(GeminiEmbeddingProvider::new(
                api_key,
                None,
                embedding.model.clone(),
                Duration::from_secs(30),
                reqwest::Client::new(),
            ))
        }
        #[cfg(feature = "fastembed")]
        "fastembed" => match runbook_providers::embedding::FastEmbedProvider::new() {
            Ok(provider) => Arc::new(provider),
            Err(e) => {
                error!(error = %e, "failed to initialize fastembed, falling back to null embedding provider");
                Arc::new(NullEmbeddingProvider::new())
            }
        },
        _ => Arc::new(NullEmbeddingProvider::new()),
    }
}

fn build_cache_provider(config: &AppConfig) -> Arc<dyn CacheProvider> {
    use runbook_infrastructure::config::types::cache::CacheProvider as CacheProviderKind;

    if !config.cache.enabled {
        return Arc::new(NullCacheProvider::new());
    }

    match config.cache.provider {
        CacheProviderKind::Moka => Arc::new(MokaCacheProvider::new()),
        CacheProviderKind::Redis => match RedisCacheProvider::new(&config.cache.redis_url) {
            Ok(provider) => Arc::new(provider),
            Err(e) => {
                error!(error = %e, "failed to connect to redis, falling back to in-memory cache");
                Arc::new(MokaCacheProvider::new())
            }
        },
    }
}

async fn create_crypto_service(config: &AppConfig) -> DomainResult<CryptoService> {
    let master_key = if config.auth.jwt.secret.len() >= 32 {
        config.auth.jwt.secret.as_bytes()[..32].to_vec()
    } else {
        CryptoService::generate_master_key()
    };
    CryptoService::new(master_key)
}

fn state_store_directory(config: &AppConfig) -> std::path::PathBuf {
    if config.snapshot.directory.as_os_str().is_empty() {
        std::path::PathBuf::from("./state")
    } else {
        config.snapshot.directory.join("state")
    }
}

/// Construct the MCP server with every application service wired to its
/// concrete adapters/providers
async fn create_mcp_server(config: &AppConfig) -> Result<McpServer, Box<dyn std::error::Error>> {
    let crypto = Arc::new(create_crypto_service(config).await?);

    let state_store: Arc<dyn StateStoreProvider> = {
        let store = FileStateStoreProvider::new(state_store_directory(config));
        store.ensure_directory().await.map_err(|e| -> Box<dyn std::error::Error> { Box::new(e) })?;
        Arc::new(store)
    };

    let credentials = Arc::new(CredentialResolver::new(Arc::clone(&state_store), crypto.clone()));

    let adapters = build_adapters(config, credentials).await;
    if adapters.is_empty() {
        warn!("no source adapters configured or all failed to construct; search will return no results");
    }
    let registry = Arc::new(DefaultAdapterRegistry::from_adapters(adapters));

    let embedding_provider = build_embedding_provider(config);
    let embeddings = Arc::new(EmbeddingStoreImpl::new(embedding_provider));
    let cache = build_cache_provider(config);

    let event_bus = TokioEventBusProvider::new_shared();

    let search_service = Arc::new(SearchServiceImpl::new(
        registry.clone() as Arc<dyn AdapterRegistry>,
        embeddings,
        cache,
    ));
    let runbook_service = Arc::new(RunbookServiceImpl::new(registry.clone() as Arc<dyn AdapterRegistry>));
    let feedback_service = Arc::new(FeedbackServiceImpl::new(state_store, event_bus));
    let sources_service = Arc::new(SourcesServiceImpl::new(registry as Arc<dyn AdapterRegistry>));
    let metrics = AtomicPerformanceMetrics::new_shared();

    McpServerBuilder::new()
        .with_search_service(search_service)
        .with_runbook_service(runbook_service)
        .with_feedback_service(feedback_service)
        .with_sources_service(sources_service)
        .with_metrics(metrics)
        .try_build()
        .map_err(|e| -> Box<dyn std::error::Error> { Box::new(e) })
}
