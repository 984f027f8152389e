//! Shutdown coordination
//!
//! The composition root registers every long-lived component (source
//! adapter connections, the cache backend, the embedding client) as a
//! [`LifecycleManaged`] in startup order. On shutdown, [`DefaultShutdownCoordinator`]
//! stops them in the reverse of that order, bounded by an overall timeout,
//! so that components other components depend on at runtime outlive their
//! dependents.

use runbook_domain::error::{Error, Result};
use runbook_domain::ports::admin::{LifecycleManaged, ShutdownCoordinator};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::{info, warn};

/// Coordinates graceful shutdown of registered components in reverse-registration order
pub struct DefaultShutdownCoordinator {
    components: Mutex<Vec<Arc<dyn LifecycleManaged>>>,
}

impl DefaultShutdownCoordinator {
    /// Create an empty coordinator
    pub fn new() -> Self {
        Self {
            components: Mutex::new(Vec::new()),
        }
    }

    /// Register a component for lifecycle management
    ///
    /// Components are stopped in the reverse of the order they are
    /// registered in, so register dependencies before their dependents.
    pub fn register(&self, component: Arc<dyn LifecycleManaged>) {
        info!(component = component.component_name(), "registering lifecycle component");
        self.components
            .lock()
            .expect("shutdown coordinator lock poisoned")
            .push(component);
    }

    /// Number of registered components
    pub fn count(&self) -> usize {
        self.components
            .lock()
            .expect("shutdown coordinator lock poisoned")
            .len()
    }
}

impl Default for DefaultShutdownCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for DefaultShutdownCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self
            .components
            .lock()
            .map(|guard| guard.iter().map(|c| c.component_name()).collect())
            .unwrap_or_default();
        f.debug_struct("DefaultShutdownCoordinator")
            .field("components", &names)
            .finish()
    }
}

#[async_trait::async_trait]
impl ShutdownCoordinator for DefaultShutdownCoordinator {
    async fn shutdown_all(&self, timeout: Duration) -> Result<()> {
        let components: Vec<Arc<dyn LifecycleManaged>> = {
            let guard = self
                .components
                .lock()
                .expect("shutdown coordinator lock poisoned");
            guard.iter().cloned().rev().collect()
        };

        let run = async {
            for component in components {
                let name = component.component_name().to_string();
                match component.stop().await {
                    Ok(()) => info!(component = %name, "component stopped"),
                    Err(e) => warn!(component = %name, error = %e, "component failed to stop cleanly"),
                }
            }
        };

        tokio::time::timeout(timeout, run)
            .await
            .map_err(|_| Error::timeout("shutdown_all", None))
    }
}
