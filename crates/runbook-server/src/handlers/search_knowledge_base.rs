//! `search_knowledge_base` Tool Handler

use rmcp::ErrorData as McpError;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::CallToolResult;
use std::sync::Arc;
use std::time::Instant;
use validator::Validate;

use runbook_application::ports::services::SearchServiceInterface;
use runbook_domain::value_objects::Category;

use crate::args::SearchKnowledgeBaseArgs;
use crate::formatter::ResponseFormatter;

/// Handler for the `search_knowledge_base` tool
pub struct SearchKnowledgeBaseHandler {
    search_service: Arc<dyn SearchServiceInterface>,
}

impl SearchKnowledgeBaseHandler {
    /// Create a new handler over the given search service
    pub fn new(search_service: Arc<dyn SearchServiceInterface>) -> Self {
        Self { search_service }
    }

    fn category_matches(category: Category, wanted: &str) -> bool {
        matches!(
            (category, wanted.to_lowercase().as_str()),
            (Category::Runbook, "runbook")
                | (Category::KnowledgeBase, "knowledge_base")
                | (Category::Unclassified, "unclassified")
        )
    }

    /// Handle a `search_knowledge_base` tool call
    pub async fn handle(
        &self,
        Parameters(mut args): Parameters<SearchKnowledgeBaseArgs>,
    ) -> Result<CallToolResult, McpError> {
        args.query = args.query.trim().to_string();
        if let Err(e) = args.validate() {
            return Err(McpError::invalid_params(format!("invalid arguments: {e}"), None));
        }

        let limit = args.max_results.unwrap_or(10).clamp(1, 100) as usize;
        let timer = Instant::now();

        let result = self.search_service.search_knowledge_base(&args.query, limit).await;
        match result {
            Ok(mut results) => {
                if !args.categories.is_empty() {
                    results.retain(|r| args.categories.iter().any(|c| Self::category_matches(r.category, c)));
                }
                let top_score = results.first().map(|r| r.score);
                ResponseFormatter::success(results, timer.elapsed(), false, None, top_score)
            }
            Err(e) => ResponseFormatter::failure(&e, timer.elapsed()),
        }
    }
}
