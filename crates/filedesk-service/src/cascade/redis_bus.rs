//! Redis pub/sub transport for deployments where users and files run in
//! separate processes.

use async_trait::async_trait;
use futures::StreamExt;
use tracing::{error, info, warn};

use filedesk_core::error::{AppError, ErrorKind};
use filedesk_core::events::DomainEvent;
use filedesk_core::result::AppResult;

use super::bus::{EventPublisher, MemoryEventBus};

/// Publishes events as JSON onto a Redis channel.
#[derive(Debug, Clone)]
pub struct RedisEventBus {
    client: redis::Client,
    channel: String,
}

impl RedisEventBus {
    pub fn new(url: &str, channel: &str) -> AppResult<Self> {
        let client = redis::Client::open(url).map_err(|e| {
            AppError::with_source(ErrorKind::Configuration, "Invalid Redis URL", e)
        })?;
        Ok(Self {
            client,
            channel: channel.to_string(),
        })
    }

    /// Relay every event on the Redis channel onto `local` until the
    /// subscription ends.
    pub async fn forward_to(self, local: MemoryEventBus) -> AppResult<()> {
        let mut pubsub = self
            .client
            .get_async_pubsub()
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Internal, "Redis subscribe failed", e))?;
        pubsub
            .subscribe(&self.channel)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Internal, "Redis subscribe failed", e))?;
        info!(channel = %self.channel, "Subscribed to account events");

        let mut messages = pubsub.on_message();
        while let Some(message) = messages.next().await {
            let payload: String = match message.get_payload() {
                Ok(payload) => payload,
                Err(e) => {
                    warn!(error = %e, "Unreadable Redis event payload");
                    continue;
                }
            };
            match serde_json::from_str::<DomainEvent>(&payload) {
                Ok(event) => {
                    if let Err(e) = local.publish(&event).await {
                        warn!(event_id = %event.id, error = %e, "Dropped relayed event");
                    }
                }
                Err(e) => warn!(error = %e, "Malformed account event"),
            }
        }

        error!(channel = %self.channel, "Redis subscription ended");
        Ok(())
    }
}

#[async_trait]
impl EventPublisher for RedisEventBus {
    async fn publish(&self, event: &DomainEvent) -> AppResult<()> {
        let payload = serde_json::to_string(event)?;
        let mut conn = self
            .client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Internal, "Redis connection failed", e))?;

        redis::cmd("PUBLISH")
            .arg(&self.channel)
            .arg(payload)
            .query_async::<i64>(&mut conn)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Internal, "Redis PUBLISH failed", e))?;
        Ok(())
    }
}
