//! Chooses how account removal reaches the files side.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, warn};

use filedesk_core::events::{AccountEvent, DomainEvent};

use super::bus::EventPublisher;
use super::local::LocalCascade;

/// What a cascade attempt did. Informational only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CascadeReport {
    pub user_id: String,
    pub files_found: usize,
    pub bytes_deleted: usize,
    pub records_deleted: u64,
    /// Steps that failed and were skipped.
    pub failures: usize,
    /// Cleanup was handed to another process.
    pub published: bool,
    /// No file store is reachable from this process.
    pub skipped: bool,
}

impl CascadeReport {
    pub fn new(user_id: &str) -> Self {
        Self {
            user_id: user_id.to_string(),
            ..Self::default()
        }
    }

    pub fn is_complete(&self) -> bool {
        self.failures == 0
    }
}

#[derive(Debug, Clone)]
enum Target {
    Local(LocalCascade),
    Publish(Arc<dyn EventPublisher>),
    Unregistered,
}

/// Runs before an account row is removed. Every failure is logged and
/// swallowed; `cascade` cannot fail.
#[derive(Debug, Clone)]
pub struct CascadingDeleteCoordinator {
    target: Target,
}

impl CascadingDeleteCoordinator {
    /// File records and bytes are reachable in this process.
    pub fn local(cascade: LocalCascade) -> Self {
        Self {
            target: Target::Local(cascade),
        }
    }

    /// Publish an account-deleted event for a remote listener.
    pub fn publishing(publisher: Arc<dyn EventPublisher>) -> Self {
        Self {
            target: Target::Publish(publisher),
        }
    }

    /// No file store here; cleanup is a no-op.
    pub fn unregistered() -> Self {
        Self {
            target: Target::Unregistered,
        }
    }

    pub async fn cascade(&self, user_id: &str, username: &str, actor: Option<&str>) -> CascadeReport {
        match &self.target {
            Target::Local(local) => local.run(user_id).await,
            Target::Publish(publisher) => {
                let mut report = CascadeReport::new(user_id);
                let event = DomainEvent::new(
                    actor.map(str::to_string),
                    AccountEvent::Deleted {
                        user_id: user_id.to_string(),
                        username: username.to_string(),
                    },
                );
                match publisher.publish(&event).await {
                    Ok(()) => {
                        info!(user_id, event_id = %event.id, "Published account deletion");
                        report.published = true;
                    }
                    Err(e) => {
                        warn!(user_id, error = %e, "Failed to publish account deletion");
                        report.failures += 1;
                    }
                }
                report
            }
            Target::Unregistered => {
                debug!(user_id, "No file store registered; skipping cascade");
                CascadeReport {
                    skipped: true,
                    ..CascadeReport::new(user_id)
                }
            }
        }
    }
}
