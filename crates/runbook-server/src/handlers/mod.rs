//! MCP Tool Handlers
//!
//! Implementations of MCP tool calls using application services. Each
//! handler validates its arguments, calls a service, and formats the
//! result through [`crate::formatter::ResponseFormatter`].

pub mod get_decision_tree;
pub mod get_escalation_path;
pub mod get_procedure;
pub mod list_sources;
pub mod record_resolution_feedback;
pub mod search_knowledge_base;
pub mod search_runbooks;

pub use get_decision_tree::GetDecisionTreeHandler;
pub use get_escalation_path::GetEscalationPathHandler;
pub use get_procedure::GetProcedureHandler;
pub use list_sources::ListSourcesHandler;
pub use record_resolution_feedback::RecordResolutionFeedbackHandler;
pub use search_knowledge_base::SearchKnowledgeBaseHandler;
pub use search_runbooks::SearchRunbooksHandler;
