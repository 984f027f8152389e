//! MCP Server Implementation
//!
//! Core MCP protocol server that exposes the operational knowledge
//! retrieval tools. Follows Clean Architecture principles with dependency
//! injection.

use std::sync::Arc;

use rmcp::ErrorData as McpError;
use rmcp::ServerHandler;
use rmcp::model::{
    CallToolResult, Implementation, ListToolsResult, PaginatedRequestParam, ProtocolVersion,
    ServerCapabilities, ServerInfo,
};

use runbook_application::ports::services::{
    FeedbackServiceInterface, RunbookServiceInterface, SearchServiceInterface,
    SourcesServiceInterface,
};
use runbook_domain::ports::admin::PerformanceMetricsInterface;

use crate::handlers::{
    GetDecisionTreeHandler, GetEscalationPathHandler, GetProcedureHandler, ListSourcesHandler,
    RecordResolutionFeedbackHandler, SearchKnowledgeBaseHandler, SearchRunbooksHandler,
};
use crate::tools::{ToolHandlers, create_tool_list, route_tool_call};

/// Core MCP server implementation
///
/// Depends only on application services and receives all dependencies
/// through constructor injection following Clean Architecture principles.
#[derive(Clone)]
pub struct McpServer {
    search_service: Arc<dyn SearchServiceInterface>,
    runbook_service: Arc<dyn RunbookServiceInterface>,
    feedback_service: Arc<dyn FeedbackServiceInterface>,
    sources_service: Arc<dyn SourcesServiceInterface>,
    metrics: Arc<dyn PerformanceMetricsInterface>,
    search_knowledge_base_handler: Arc<SearchKnowledgeBaseHandler>,
    search_runbooks_handler: Arc<SearchRunbooksHandler>,
    get_decision_tree_handler: Arc<GetDecisionTreeHandler>,
    get_procedure_handler: Arc<GetProcedureHandler>,
    get_escalation_path_handler: Arc<GetEscalationPathHandler>,
    list_sources_handler: Arc<ListSourcesHandler>,
    record_resolution_feedback_handler: Arc<RecordResolutionFeedbackHandler>,
}

impl McpServer {
    /// Create a new MCP server with injected dependencies
    pub fn new(
        search_service: Arc<dyn SearchServiceInterface>,
        runbook_service: Arc<dyn RunbookServiceInterface>,
        feedback_service: Arc<dyn FeedbackServiceInterface>,
        sources_service: Arc<dyn SourcesServiceInterface>,
        metrics: Arc<dyn PerformanceMetricsInterface>,
    ) -> Self {
        let search_knowledge_base_handler =
            Arc::new(SearchKnowledgeBaseHandler::new(search_service.clone()));
        let search_runbooks_handler = Arc::new(SearchRunbooksHandler::new(
            search_service.clone(),
            runbook_service.clone(),
        ));
        let get_decision_tree_handler = Arc::new(GetDecisionTreeHandler::new(
            search_service.clone(),
            runbook_service.clone(),
        ));
        let get_procedure_handler = Arc::new(GetProcedureHandler::new(runbook_service.clone()));
        let get_escalation_path_handler =
            Arc::new(GetEscalationPathHandler::new(runbook_service.clone()));
        let list_sources_handler = Arc::new(ListSourcesHandler::new(sources_service.clone()));
        let record_resolution_feedback_handler =
            Arc::new(RecordResolutionFeedbackHandler::new(feedback_service.clone()));

        Self {
            search_service,
            runbook_service,
            feedback_service,
            sources_service,
            metrics,
            search_knowledge_base_handler,
            search_runbooks_handler,
            get_decision_tree_handler,
            get_procedure_handler,
            get_escalation_path_handler,
            list_sources_handler,
            record_resolution_feedback_handler,
        }
    }

    /// Access to the search service
    pub fn search_service(&self) -> Arc<dyn SearchServiceInterface> {
        Arc::clone(&self.search_service)
    }

    /// Access to the runbook service
    pub fn runbook_service(&self) -> Arc<dyn RunbookServiceInterface> {
        Arc::clone(&self.runbook_service)
    }

    /// Access to the feedback service
    pub fn feedback_service(&self) -> Arc<dyn FeedbackServiceInterface> {
        Arc::clone(&self.feedback_service)
    }

    /// Access to the sources service
    pub fn sources_service(&self) -> Arc<dyn SourcesServiceInterface> {
        Arc::clone(&self.sources_service)
    }

    /// Access to the performance metrics tracker (for HTTP transport)
    pub fn metrics(&self) -> Arc<dyn PerformanceMetricsInterface> {
        Arc::clone(&self.metrics)
    }

    /// Access to the search_knowledge_base handler (for HTTP transport)
    pub fn search_knowledge_base_handler(&self) -> Arc<SearchKnowledgeBaseHandler> {
        Arc::clone(&self.search_knowledge_base_handler)
    }

    /// Access to the search_runbooks handler (for HTTP transport)
    pub fn search_runbooks_handler(&self) -> Arc<SearchRunbooksHandler> {
        Arc::clone(&self.search_runbooks_handler)
    }

    /// Access to the get_decision_tree handler (for HTTP transport)
    pub fn get_decision_tree_handler(&self) -> Arc<GetDecisionTreeHandler> {
        Arc::clone(&self.get_decision_tree_handler)
    }

    /// Access to the get_procedure handler (for HTTP transport)
    pub fn get_procedure_handler(&self) -> Arc<GetProcedureHandler> {
        Arc::clone(&self.get_procedure_handler)
    }

    /// Access to the get_escalation_path handler (for HTTP transport)
    pub fn get_escalation_path_handler(&self) -> Arc<GetEscalationPathHandler> {
        Arc::clone(&self.get_escalation_path_handler)
    }

    /// Access to the list_sources handler (for HTTP transport)
    pub fn list_sources_handler(&self) -> Arc<ListSourcesHandler> {
        Arc::clone(&self.list_sources_handler)
    }

    /// Access to the record_resolution_feedback handler (for HTTP transport)
    pub fn record_resolution_feedback_handler(&self) -> Arc<RecordResolutionFeedbackHandler> {
        Arc::clone(&self.record_resolution_feedback_handler)
    }
}

impl ServerHandler for McpServer {
    /// Get server information and capabilities
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "Operational Knowledge Retrieval Service".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Default::default()
            },
            instructions: Some(
                "Operational knowledge retrieval for incident response.\n\n\
                 Finds runbooks, procedures, decision trees, and escalation paths\n\
                 across configured knowledge sources, and records feedback on whether\n\
                 a procedure actually resolved an incident.\n\n\
                 Tools:\n\
                 - search_knowledge_base: search all configured sources\n\
                 - search_runbooks: find runbooks for an alert\n\
                 - get_decision_tree: fetch the diagnostic tree for an alert context\n\
                 - get_procedure: fetch a named step of a runbook\n\
                 - get_escalation_path: fetch the on-call chain for a severity\n\
                 - list_sources: list configured adapters and their health\n\
                 - record_resolution_feedback: record whether a procedure resolved an incident\n"
                    .to_string(),
            ),
        }
    }

    /// List available tools
    async fn list_tools(
        &self,
        _pagination: Option<PaginatedRequestParam>,
        _context: rmcp::service::RequestContext<rmcp::RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        let tools = create_tool_list()?;
        Ok(ListToolsResult {
            tools,
            meta: Default::default(),
            next_cursor: None,
        })
    }

    /// Call a tool
    async fn call_tool(
        &self,
        request: rmcp::model::CallToolRequestParam,
        _context: rmcp::service::RequestContext<rmcp::RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        let handlers = ToolHandlers {
            search_knowledge_base: Arc::clone(&self.search_knowledge_base_handler),
            search_runbooks: Arc::clone(&self.search_runbooks_handler),
            get_decision_tree: Arc::clone(&self.get_decision_tree_handler),
            get_procedure: Arc::clone(&self.get_procedure_handler),
            get_escalation_path: Arc::clone(&self.get_escalation_path_handler),
            list_sources: Arc::clone(&self.list_sources_handler),
            record_resolution_feedback: Arc::clone(&self.record_resolution_feedback_handler),
        };
        route_tool_call(request, &handlers).await
    }
}
