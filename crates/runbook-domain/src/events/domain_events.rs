//! Event Publisher Domain Port
//!
//! Defines the business contract for publishing system events. This abstraction
//! enables services to publish events without coupling to specific implementations
//! (tokio broadcast, NATS, etc.).

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// System-wide event types for decoupled service communication
///
/// These events represent domain-level occurrences that services can publish
/// and subscribe to without direct coupling.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum DomainEvent {
    /// A document was added, updated or removed from an adapter's index
    DocumentIndexed {
        /// Adapter that produced the change
        adapter: String,
        /// Document id affected
        document_id: String,
    },
    /// An adapter's `refreshIndex` completed
    IndexRefreshed {
        /// Adapter that was refreshed
        adapter: String,
        /// Number of documents touched
        document_count: usize,
    },
    /// Cache invalidation requested
    CacheInvalidate {
        /// Tag to invalidate (None = all)
        tag: Option<String>,
    },
    /// An adapter transitioned health state
    AdapterHealthChanged {
        /// Adapter name
        adapter: String,
        /// New health status, as a short label ("healthy", "degraded", "unhealthy")
        status: String,
    },
    /// Resolution feedback was recorded against a runbook or procedure
    FeedbackRecorded {
        /// The resource the feedback was recorded against
        resource_id: String,
        /// Whether the resolution was reported successful
        resolved: bool,
    },
}

/// Domain Port for Publishing System Events
///
/// This trait defines the contract for event publishing without coupling to
/// specific implementations. Services use this trait to publish events that
/// other parts of the system can react to.
///
/// # Example
///
/// ```rust,no_run
/// use runbook_domain::events::{EventPublisher, DomainEvent};
///
/// async fn notify_refresh(
///     publisher: &dyn EventPublisher,
///     adapter: String,
///     document_count: usize,
/// ) -> runbook_domain::Result<()> {
///     publisher.publish(DomainEvent::IndexRefreshed { adapter, document_count }).await?;
///     Ok(())
/// }
/// ```
#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// Publish an event to all subscribers
    ///
    /// Returns Ok(()) if the event was successfully published.
    /// Note: "successfully published" means the event was sent, not necessarily
    /// that subscribers received it (depends on implementation guarantees).
    async fn publish(&self, event: DomainEvent) -> Result<()>;

    /// Check if there are any active subscribers
    ///
    /// Returns true if at least one subscriber is listening for events.
    /// Useful for avoiding unnecessary event creation if no one is listening.
    fn has_subscribers(&self) -> bool;
}

/// Shared event publisher for dependency injection
pub type SharedEventPublisher = Arc<dyn EventPublisher>;
