//! `list_sources` Tool Handler

use rmcp::ErrorData as McpError;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::CallToolResult;
use std::sync::Arc;
use std::time::Instant;
use validator::Validate;

use runbook_application::ports::services::SourcesServiceInterface;

use crate::args::ListSourcesArgs;
use crate::formatter::ResponseFormatter;

/// Handler for the `list_sources` tool
pub struct ListSourcesHandler {
    sources_service: Arc<dyn SourcesServiceInterface>,
}

impl ListSourcesHandler {
    /// Create a new handler over the given sources service
    pub fn new(sources_service: Arc<dyn SourcesServiceInterface>) -> Self {
        Self { sources_service }
    }

    /// Handle a `list_sources` tool call
    pub async fn handle(
        &self,
        Parameters(args): Parameters<ListSourcesArgs>,
    ) -> Result<CallToolResult, McpError> {
        if let Err(e) = args.validate() {
            return Err(McpError::invalid_params(format!("invalid arguments: {e}"), None));
        }

        let timer = Instant::now();
        let result = self.sources_service.list_sources().await;
        match result {
            Ok(mut sources) => {
                if !args.include_health.unwrap_or(false) {
                    for source in &mut sources {
                        source.details.clear();
                    }
                }
                ResponseFormatter::success(sources, timer.elapsed(), false, None, None)
            }
            Err(e) => ResponseFormatter::failure(&e, timer.elapsed()),
        }
    }
}
