//! Event transport between the users side and the files side.

use async_trait::async_trait;
use tokio::sync::broadcast;
use tracing::debug;

use filedesk_core::error::AppError;
use filedesk_core::events::DomainEvent;
use filedesk_core::result::AppResult;

/// Publishes domain events to whoever is listening.
#[async_trait]
pub trait EventPublisher: Send + Sync + std::fmt::Debug + 'static {
    async fn publish(&self, event: &DomainEvent) -> AppResult<()>;
}

/// In-process bus for single-node deployments.
#[derive(Debug, Clone)]
pub struct MemoryEventBus {
    sender: broadcast::Sender<DomainEvent>,
}

impl MemoryEventBus {
    pub fn new(buffer_size: usize) -> Self {
        let (sender, _) = broadcast::channel(buffer_size.max(1));
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<DomainEvent> {
        self.sender.subscribe()
    }
}

#[async_trait]
impl EventPublisher for MemoryEventBus {
    /// Fails when nothing is subscribed, since the event would be lost.
    async fn publish(&self, event: &DomainEvent) -> AppResult<()> {
        let receivers = self
            .sender
            .send(event.clone())
            .map_err(|_| AppError::internal("No cascade listener is subscribed"))?;
        debug!(event_id = %event.id, receivers, "Event published in-process");
        Ok(())
    }
}
