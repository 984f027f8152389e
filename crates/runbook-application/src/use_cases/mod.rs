//! Application Use Cases
//!
//! Concrete implementations of the `ports::services` interfaces, wired
//! against the adapter registry, embedding store, cache, and infrastructure
//! ports. These are the classes the composition root in `runbook` actually
//! instantiates.

mod feedback_service;
mod runbook_service;
mod search_service;
mod sources_service;

pub use feedback_service::FeedbackServiceImpl;
pub use runbook_service::RunbookServiceImpl;
pub use search_service::SearchServiceImpl;
pub use sources_service::SourcesServiceImpl;
