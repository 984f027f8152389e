//! `get_decision_tree` Tool Handler

use rmcp::ErrorData as McpError;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::CallToolResult;
use std::sync::Arc;
use std::time::Instant;
use validator::Validate;

use runbook_application::ports::services::{RunbookServiceInterface, SearchServiceInterface};
use runbook_domain::error::Error;

use crate::args::GetDecisionTreeArgs;
use crate::formatter::ResponseFormatter;

/// Handler for the `get_decision_tree` tool
pub struct GetDecisionTreeHandler {
    search_service: Arc<dyn SearchServiceInterface>,
    runbook_service: Arc<dyn RunbookServiceInterface>,
}

impl GetDecisionTreeHandler {
    /// Create a new handler over the given search and runbook services
    pub fn new(
        search_service: Arc<dyn SearchServiceInterface>,
        runbook_service: Arc<dyn RunbookServiceInterface>,
    ) -> Self {
        Self {
            search_service,
            runbook_service,
        }
    }

    /// Handle a `get_decision_tree` tool call
    ///
    /// The tool takes a free-text `alert_context` rather than a runbook id,
    /// so the handler first resolves the most relevant runbook via search,
    /// then fetches its decision tree.
    pub async fn handle(
        &self,
        Parameters(args): Parameters<GetDecisionTreeArgs>,
    ) -> Result<CallToolResult, McpError> {
        if let Err(e) = args.validate() {
            return Err(McpError::invalid_params(format!("invalid arguments: {e}"), None));
        }

        let timer = Instant::now();
        let result = self.resolve(&args).await;
        match result {
            Ok(tree) => ResponseFormatter::success(tree, timer.elapsed(), false, None, None),
            Err(e) => ResponseFormatter::failure(&e, timer.elapsed()),
        }
    }

    async fn resolve(
        &self,
        args: &GetDecisionTreeArgs,
    ) -> runbook_domain::error::Result<runbook_domain::value_objects::DecisionTree> {
        let candidates = self
            .search_service
            .search_runbooks(&args.alert_context, "", &[], None, 1)
            .await?;
        let runbook_id = candidates
            .first()
            .map(|r| r.document_id.clone())
            .ok_or_else(|| Error::not_found(format!("decision_tree:{}", args.alert_context)))?;
        self.runbook_service.get_decision_tree(&runbook_id).await
    }
}
