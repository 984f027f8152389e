//! `get_escalation_path` Tool Handler

use rmcp::ErrorData as McpError;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::CallToolResult;
use std::sync::Arc;
use std::time::Instant;
use validator::Validate;

use runbook_application::ports::services::RunbookServiceInterface;

use crate::args::{GetEscalationPathArgs, SeverityArg};
use crate::formatter::{enrich_escalation_path, ResponseFormatter};

/// Handler for the `get_escalation_path` tool
///
/// The tool is keyed by severity alone, not by a specific runbook, so the
/// handler resolves a synthetic document id (`escalation:<severity>`)
/// holding the severity's on-call roster.
pub struct GetEscalationPathHandler {
    runbook_service: Arc<dyn RunbookServiceInterface>,
}

impl GetEscalationPathHandler {
    /// Create a new handler over the given runbook service
    pub fn new(runbook_service: Arc<dyn RunbookServiceInterface>) -> Self {
        Self { runbook_service }
    }

    fn severity_key(severity: SeverityArg) -> String {
        format!("escalation:{severity:?}").to_lowercase()
    }

    /// Handle a `get_escalation_path` tool call
    pub async fn handle(
        &self,
        Parameters(args): Parameters<GetEscalationPathArgs>,
    ) -> Result<CallToolResult, McpError> {
        if let Err(e) = args.validate() {
            return Err(McpError::invalid_params(format!("invalid arguments: {e}"), None));
        }

        let timer = Instant::now();
        let key = Self::severity_key(args.severity);
        let result = self.runbook_service.get_escalation_path(&key).await;
        match result {
            Ok(mut path) => {
                if !args.failed_attempts.is_empty() {
                    path.contacts
                        .retain(|c| !args.failed_attempts.iter().any(|a| a == &c.role));
                }
                let enriched = enrich_escalation_path(&path);
                ResponseFormatter::success(enriched, timer.elapsed(), false, Some(args.severity), None)
            }
            Err(e) => ResponseFormatter::failure(&e, timer.elapsed()),
        }
    }
}
