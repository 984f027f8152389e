//! `get_procedure` Tool Handler

use rmcp::ErrorData as McpError;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::CallToolResult;
use std::sync::Arc;
use std::time::Instant;
use validator::Validate;

use runbook_application::ports::services::RunbookServiceInterface;

use crate::args::GetProcedureArgs;
use crate::formatter::{enrich_procedure, ResponseFormatter};

/// Handler for the `get_procedure` tool
pub struct GetProcedureHandler {
    runbook_service: Arc<dyn RunbookServiceInterface>,
}

impl GetProcedureHandler {
    /// Create a new handler over the given runbook service
    pub fn new(runbook_service: Arc<dyn RunbookServiceInterface>) -> Self {
        Self { runbook_service }
    }

    /// Handle a `get_procedure` tool call
    pub async fn handle(
        &self,
        Parameters(args): Parameters<GetProcedureArgs>,
    ) -> Result<CallToolResult, McpError> {
        if let Err(e) = args.validate() {
            return Err(McpError::invalid_params(format!("invalid arguments: {e}"), None));
        }

        let timer = Instant::now();
        let result = self
            .runbook_service
            .get_procedure(&args.runbook_id, &args.step_name)
            .await;
        match result {
            Ok(procedure) => ResponseFormatter::success(enrich_procedure(procedure), timer.elapsed(), false, None, None),
            Err(e) => ResponseFormatter::failure(&e, timer.elapsed()),
        }
    }
}
