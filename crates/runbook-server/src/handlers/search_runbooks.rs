//! `search_runbooks` Tool Handler

use rmcp::ErrorData as McpError;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::CallToolResult;
use std::sync::Arc;
use std::time::Instant;
use validator::Validate;

use runbook_application::ports::services::{RunbookServiceInterface, SearchServiceInterface};

use crate::args::SearchRunbooksArgs;
use crate::formatter::{enrich_search_result, ResponseFormatter};

/// Handler for the `search_runbooks` tool
pub struct SearchRunbooksHandler {
    search_service: Arc<dyn SearchServiceInterface>,
    runbook_service: Arc<dyn RunbookServiceInterface>,
}

impl SearchRunbooksHandler {
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

    /// Handle a `search_runbooks` tool call
    pub async fn handle(
        &self,
        Parameters(args): Parameters<SearchRunbooksArgs>,
    ) -> Result<CallToolResult, McpError> {
        if let Err(e) = args.validate() {
            return Err(McpError::invalid_params(format!("invalid arguments: {e}"), None));
        }

        let severity = format!("{:?}", args.severity).to_lowercase();
        let timer = Instant::now();

        let result = self
            .search_service
            .search_runbooks(
                &args.alert_type,
                &severity,
                &args.affected_systems,
                args.context.as_deref(),
                10,
            )
            .await;
        match result {
            Ok(results) => {
                let top_score = results.first().map(|r| r.score);
                let mut enriched = Vec::with_capacity(results.len());
                for result in results {
                    let procedure_ids = match self.runbook_service.get_decision_tree(&result.document_id).await {
                        Ok(tree) => tree
                            .nodes
                            .iter()
                            .filter_map(|n| n.procedure_id.clone())
                            .collect(),
                        Err(_) => Vec::new(),
                    };
                    enriched.push(enrich_search_result(result, &procedure_ids));
                }
                ResponseFormatter::success(enriched, timer.elapsed(), false, Some(args.severity), top_score)
            }
            Err(e) => ResponseFormatter::failure(&e, timer.elapsed()),
        }
    }
}
