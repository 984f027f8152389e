//! `record_resolution_feedback` Tool Handler

use rmcp::ErrorData as McpError;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::CallToolResult;
use std::sync::Arc;
use std::time::Instant;
use validator::Validate;

use runbook_application::ports::services::{FeedbackServiceInterface, ResolutionFeedback};

use crate::args::{RecordResolutionFeedbackArgs, ResolutionOutcome};
use crate::formatter::ResponseFormatter;

/// Handler for the `record_resolution_feedback` tool
pub struct RecordResolutionFeedbackHandler {
    feedback_service: Arc<dyn FeedbackServiceInterface>,
}

impl RecordResolutionFeedbackHandler {
    /// Create a new handler over the given feedback service
    pub fn new(feedback_service: Arc<dyn FeedbackServiceInterface>) -> Self {
        Self { feedback_service }
    }

    fn resolved(outcome: ResolutionOutcome) -> bool {
        matches!(outcome, ResolutionOutcome::Resolved | ResolutionOutcome::PartiallyResolved)
    }

    /// Handle a `record_resolution_feedback` tool call
    pub async fn handle(
        &self,
        Parameters(args): Parameters<RecordResolutionFeedbackArgs>,
    ) -> Result<CallToolResult, McpError> {
        if let Err(e) = args.validate() {
            return Err(McpError::invalid_params(format!("invalid arguments: {e}"), None));
        }

        let timer = Instant::now();
        let feedback = ResolutionFeedback {
            runbook_id: args.runbook_id,
            procedure_id: args.procedure_id,
            resolved: Self::resolved(args.outcome),
            resolution_time_minutes: args.resolution_time_minutes,
            notes: args.notes,
        };

        let result = self.feedback_service.record_resolution_feedback(feedback).await;
        match result {
            Ok(()) => ResponseFormatter::success((), timer.elapsed(), false, None, None),
            Err(e) => ResponseFormatter::failure(&e, timer.elapsed()),
        }
    }
}
