//! Tool Router Module
//!
//! Routes incoming tool call requests to the appropriate handlers.
//! This module provides a centralized dispatch mechanism for MCP tool calls.

use rmcp::ErrorData as McpError;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{CallToolRequestParam, CallToolResult};
use std::sync::Arc;

use crate::args::{
    GetDecisionTreeArgs, GetEscalationPathArgs, GetProcedureArgs, ListSourcesArgs,
    RecordResolutionFeedbackArgs, SearchKnowledgeBaseArgs, SearchRunbooksArgs,
};
use crate::handlers::{
    GetDecisionTreeHandler, GetEscalationPathHandler, GetProcedureHandler, ListSourcesHandler,
    RecordResolutionFeedbackHandler, SearchKnowledgeBaseHandler, SearchRunbooksHandler,
};

/// Handler references for tool routing
pub struct ToolHandlers {
    /// Handler for the search_knowledge_base tool
    pub search_knowledge_base: Arc<SearchKnowledgeBaseHandler>,
    /// Handler for the search_runbooks tool
    pub search_runbooks: Arc<SearchRunbooksHandler>,
    /// Handler for the get_decision_tree tool
    pub get_decision_tree: Arc<GetDecisionTreeHandler>,
    /// Handler for the get_procedure tool
    pub get_procedure: Arc<GetProcedureHandler>,
    /// Handler for the get_escalation_path tool
    pub get_escalation_path: Arc<GetEscalationPathHandler>,
    /// Handler for the list_sources tool
    pub list_sources: Arc<ListSourcesHandler>,
    /// Handler for the record_resolution_feedback tool
    pub record_resolution_feedback: Arc<RecordResolutionFeedbackHandler>,
}

/// Route a tool call request to the appropriate handler
///
/// Parses the request arguments and delegates to the matching handler.
pub async fn route_tool_call(
    request: CallToolRequestParam,
    handlers: &ToolHandlers,
) -> Result<CallToolResult, McpError> {
    match request.name.as_ref() {
        "search_knowledge_base" => {
            let args = parse_args::<SearchKnowledgeBaseArgs>(&request)?;
            handlers.search_knowledge_base.handle(Parameters(args)).await
        }
        "search_runbooks" => {
            let args = parse_args::<SearchRunbooksArgs>(&request)?;
            handlers.search_runbooks.handle(Parameters(args)).await
        }
        "get_decision_tree" => {
            let args = parse_args::<GetDecisionTreeArgs>(&request)?;
            handlers.get_decision_tree.handle(Parameters(args)).await
        }
        "get_procedure" => {
            let args = parse_args::<GetProcedureArgs>(&request)?;
            handlers.get_procedure.handle(Parameters(args)).await
        }
        "get_escalation_path" => {
            let args = parse_args::<GetEscalationPathArgs>(&request)?;
            handlers.get_escalation_path.handle(Parameters(args)).await
        }
        "list_sources" => {
            let args = parse_args::<ListSourcesArgs>(&request)?;
            handlers.list_sources.handle(Parameters(args)).await
        }
        "record_resolution_feedback" => {
            let args = parse_args::<RecordResolutionFeedbackArgs>(&request)?;
            handlers.record_resolution_feedback.handle(Parameters(args)).await
        }
        _ => Err(McpError::invalid_params(
            format!("Unknown tool: {}", request.name),
            None,
        )),
    }
}

/// Parse request arguments into the expected type
fn parse_args<T: serde::de::DeserializeOwned>(
    request: &CallToolRequestParam,
) -> Result<T, McpError> {
    let args_value = serde_json::Value::Object(request.arguments.clone().unwrap_or_default());
    serde_json::from_value(args_value)
        .map_err(|e| McpError::invalid_params(format!("Invalid arguments: {}", e), None))
}
