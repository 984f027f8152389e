//! Feedback Service Use Case
//!
//! Records whether a runbook or procedure actually resolved an incident.
//! Feedback is persisted so future ranking passes can favor
//! previously-successful resources, and published as a domain event so
//! other interested subscribers (e.g. a metrics exporter) can react.

use crate::ports::services::{FeedbackServiceInterface, ResolutionFeedback};
use async_trait::async_trait;
use runbook_domain::error::Result;
use runbook_domain::events::{DomainEvent, SharedEventPublisher};
use runbook_domain::ports::StateStoreProvider;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Serialize, Deserialize)]
struct FeedbackRecord {
    runbook_id: String,
    procedure_id: String,
    resolved: bool,
    resolution_time_minutes: u32,
    notes: Option<String>,
    recorded_at: i64,
}

/// Feedback service implementation
pub struct FeedbackServiceImpl {
    state_store: Arc<dyn StateStoreProvider>,
    events: SharedEventPublisher,
}

impl FeedbackServiceImpl {
    /// Construct a new feedback service over a state store and event publisher
    pub fn new(state_store: Arc<dyn StateStoreProvider>, events: SharedEventPublisher) -> Self {
        Self {
            state_store,
            events,
        }
    }

    fn key(resource_id: &str) -> String {
        format!("feedback:{resource_id}")
    }
}

#[async_trait]
impl FeedbackServiceInterface for FeedbackServiceImpl {
    async fn record_resolution_feedback(&self, feedback: ResolutionFeedback) -> Result<()> {
        let resource_id = format!("{}:{}", feedback.runbook_id, feedback.procedure_id);
        let record = FeedbackRecord {
            runbook_id: feedback.runbook_id,
            procedure_id: feedback.procedure_id,
            resolved: feedback.resolved,
            resolution_time_minutes: feedback.resolution_time_minutes,
            notes: feedback.notes,
            recorded_at: chrono_now_secs(),
        };
        let payload = serde_json::to_vec(&record)?;
        self.state_store.save(&Self::key(&resource_id), &payload).await?;

        info!(resource_id = %resource_id, resolved = record.resolved, "resolution feedback recorded");

        if self.events.has_subscribers() {
            self.events
                .publish(DomainEvent::FeedbackRecorded {
                    resource_id,
                    resolved: record.resolved,
                })
                .await?;
        }
        Ok(())
    }
}

fn chrono_now_secs() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}
