//! Files-side consumer of account-deleted events.

use tokio::sync::broadcast;
use tokio::sync::broadcast::error::RecvError;
use tracing::{info, warn};

use filedesk_core::events::{AccountEvent, DomainEvent};

use super::coordinator::CascadeReport;
use super::local::LocalCascade;

/// Runs the local cleanup for every account-deleted event it receives.
#[derive(Debug, Clone)]
pub struct CascadeListener {
    cascade: LocalCascade,
}

impl CascadeListener {
    pub fn new(cascade: LocalCascade) -> Self {
        Self { cascade }
    }

    pub async fn handle(&self, event: &DomainEvent) -> CascadeReport {
        match &event.payload {
            AccountEvent::Deleted { user_id, username } => {
                info!(user_id, username, event_id = %event.id, "Received account deletion");
                self.cascade.run(user_id).await
            }
        }
    }

    /// Consume events until the bus closes.
    pub async fn run(self, mut events: broadcast::Receiver<DomainEvent>) {
        loop {
            match events.recv().await {
                Ok(event) => {
                    self.handle(&event).await;
                }
                Err(RecvError::Lagged(missed)) => {
                    warn!(missed, "Cascade listener lagged; some deletions were not cleaned up");
                }
                Err(RecvError::Closed) => {
                    info!("Event bus closed; cascade listener stopping");
                    break;
                }
            }
        }
    }

    /// Spawn [`run`](Self::run) onto the runtime.
    pub fn spawn(self, events: broadcast::Receiver<DomainEvent>) -> tokio::task::JoinHandle<()> {
        tokio::spawn(self.run(events))
    }
}
