//! Tool Registry Module
//!
//! Manages tool definitions and schema generation for the MCP protocol.
//! This module centralizes all tool metadata to enable consistent tool listing.

use rmcp::ErrorData as McpError;
use rmcp::model::Tool;
use std::borrow::Cow;
use std::sync::Arc;

use crate::args::{
    GetDecisionTreeArgs, GetEscalationPathArgs, GetProcedureArgs, ListSourcesArgs,
    RecordResolutionFeedbackArgs, SearchKnowledgeBaseArgs, SearchRunbooksArgs,
};

/// Tool definitions for MCP protocol
pub struct ToolDefinitions;

impl ToolDefinitions {
    /// Get the search_knowledge_base tool definition
    pub fn search_knowledge_base() -> Result<Tool, McpError> {
        Self::create_tool(
            "search_knowledge_base",
            "Search all configured knowledge sources with a natural-language query",
            schemars::schema_for!(SearchKnowledgeBaseArgs),
        )
    }

    /// Get the search_runbooks tool definition
    pub fn search_runbooks() -> Result<Tool, McpError> {
        Self::create_tool(
            "search_runbooks",
            "Find operational runbooks matching an alert type, severity, and affected systems",
            schemars::schema_for!(SearchRunbooksArgs),
        )
    }

    /// Get the get_decision_tree tool definition
    pub fn get_decision_tree() -> Result<Tool, McpError> {
        Self::create_tool(
            "get_decision_tree",
            "Fetch the diagnostic decision tree most relevant to an alert context",
            schemars::schema_for!(GetDecisionTreeArgs),
        )
    }

    /// Get the get_procedure tool definition
    pub fn get_procedure() -> Result<Tool, McpError> {
        Self::create_tool(
            "get_procedure",
            "Fetch a single named step out of a runbook's procedure",
            schemars::schema_for!(GetProcedureArgs),
        )
    }

    /// Get the get_escalation_path tool definition
    pub fn get_escalation_path() -> Result<Tool, McpError> {
        Self::create_tool(
            "get_escalation_path",
            "Fetch the ordered on-call escalation chain for a severity",
            schemars::schema_for!(GetEscalationPathArgs),
        )
    }

    /// Get the list_sources tool definition
    pub fn list_sources() -> Result<Tool, McpError> {
        Self::create_tool(
            "list_sources",
            "List every configured source adapter and, optionally, its live health",
            schemars::schema_for!(ListSourcesArgs),
        )
    }

    /// Get the record_resolution_feedback tool definition
    pub fn record_resolution_feedback() -> Result<Tool, McpError> {
        Self::create_tool(
            "record_resolution_feedback",
            "Record whether a runbook procedure actually resolved an incident",
            schemars::schema_for!(RecordResolutionFeedbackArgs),
        )
    }

    /// Create a tool from schema
    fn create_tool(
        name: &'static str,
        description: &'static str,
        schema: schemars::Schema,
    ) -> Result<Tool, McpError> {
        let schema_value = serde_json::to_value(schema)
            .map_err(|e| McpError::internal_error(e.to_string(), None))?;

        let input_schema = schema_value
            .as_object()
            .ok_or_else(|| {
                McpError::internal_error(format!("Schema for {} is not an object", name), None)
            })?
            .clone();

        Ok(Tool {
            name: Cow::Borrowed(name),
            title: None,
            description: Some(Cow::Borrowed(description)),
            input_schema: Arc::new(input_schema),
            output_schema: None,
            annotations: None,
            icons: None,
            meta: Default::default(),
        })
    }
}

/// Create the complete list of available tools
///
/// Returns all tool definitions for the MCP list_tools response.
pub fn create_tool_list() -> Result<Vec<Tool>, McpError> {
    Ok(vec![
        ToolDefinitions::search_knowledge_base()?,
        ToolDefinitions::search_runbooks()?,
        ToolDefinitions::get_decision_tree()?,
        ToolDefinitions::get_procedure()?,
        ToolDefinitions::get_escalation_path()?,
        ToolDefinitions::list_sources()?,
        ToolDefinitions::record_resolution_feedback()?,
    ])
}
