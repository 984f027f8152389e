//! MCP Server Builder
//!
//! Builder pattern for constructing MCP servers with dependency injection.
//! Ensures all required dependencies are provided before server construction.

use crate::McpServer;
use runbook_application::ports::services::{
    FeedbackServiceInterface, RunbookServiceInterface, SearchServiceInterface,
    SourcesServiceInterface,
};
use runbook_domain::ports::admin::PerformanceMetricsInterface;
use runbook_infrastructure::infrastructure::NullPerformanceMetrics;
use std::sync::Arc;

/// Builder for MCP Server with dependency injection
///
/// Ensures all required application services are provided before server
/// construction. Follows the builder pattern to make server construction
/// explicit and testable.
#[derive(Default)]
pub struct McpServerBuilder {
    search_service: Option<Arc<dyn SearchServiceInterface>>,
    runbook_service: Option<Arc<dyn RunbookServiceInterface>>,
    feedback_service: Option<Arc<dyn FeedbackServiceInterface>>,
    sources_service: Option<Arc<dyn SourcesServiceInterface>>,
    metrics: Option<Arc<dyn PerformanceMetricsInterface>>,
}

impl McpServerBuilder {
    /// Create a new server builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the search service
    ///
    /// # Arguments
    /// * `service` - Implementation of the search service port
    pub fn with_search_service(mut self, service: Arc<dyn SearchServiceInterface>) -> Self {
        self.search_service = Some(service);
        self
    }

    /// Set the runbook service
    ///
    /// # Arguments
    /// * `service` - Implementation of the runbook service port
    pub fn with_runbook_service(mut self, service: Arc<dyn RunbookServiceInterface>) -> Self {
        self.runbook_service = Some(service);
        self
    }

    /// Set the feedback service
    ///
    /// # Arguments
    /// * `service` - Implementation of the feedback service port
    pub fn with_feedback_service(mut self, service: Arc<dyn FeedbackServiceInterface>) -> Self {
        self.feedback_service = Some(service);
        self
    }

    /// Set the sources service
    ///
    /// # Arguments
    /// * `service` - Implementation of the sources service port
    pub fn with_sources_service(mut self, service: Arc<dyn SourcesServiceInterface>) -> Self {
        self.sources_service = Some(service);
        self
    }

    /// Set the performance metrics tracker
    ///
    /// Optional; defaults to a no-op tracker if not provided.
    pub fn with_metrics(mut self, metrics: Arc<dyn PerformanceMetricsInterface>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Build the MCP server
    ///
    /// # Returns
    /// A Result containing the McpServer or an error if dependencies are missing
    ///
    /// # Errors
    /// Returns `BuilderError::MissingDependency` if any required service is not provided
    pub fn build(self) -> Result<McpServer, BuilderError> {
        self.try_build()
    }

    /// Try to build the MCP server (alias for `build`)
    ///
    /// This method is kept for API compatibility.
    ///
    /// # Returns
    /// A Result containing the McpServer or an error if dependencies are missing
    pub fn try_build(self) -> Result<McpServer, BuilderError> {
        let search_service = self
            .search_service
            .ok_or(BuilderError::MissingDependency("search service"))?;
        let runbook_service = self
            .runbook_service
            .ok_or(BuilderError::MissingDependency("runbook service"))?;
        let feedback_service = self
            .feedback_service
            .ok_or(BuilderError::MissingDependency("feedback service"))?;
        let sources_service = self
            .sources_service
            .ok_or(BuilderError::MissingDependency("sources service"))?;
        let metrics = self
            .metrics
            .unwrap_or_else(|| Arc::new(NullPerformanceMetrics));

        Ok(McpServer::new(
            search_service,
            runbook_service,
            feedback_service,
            sources_service,
            metrics,
        ))
    }
}

/// Errors that can occur during server building
#[derive(Debug, thiserror::Error)]
pub enum BuilderError {
    /// A required dependency was not provided
    #[error("Missing required dependency: {0}")]
    MissingDependency(&'static str),
}
