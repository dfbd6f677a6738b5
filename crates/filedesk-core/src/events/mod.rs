//! Domain events emitted by FileDesk operations.
//!
//! Events cross process boundaries as JSON, so every payload is plain
//! serializable data.

pub mod account;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub use account::AccountEvent;

/// Wrapper for domain events with delivery metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainEvent {
    /// Unique event ID.
    pub id: Uuid,
    /// When the event occurred.
    pub timestamp: DateTime<Utc>,
    /// The external id of the principal that caused the event.
    pub actor_id: Option<String>,
    /// The event payload.
    pub payload: AccountEvent,
}

impl DomainEvent {
    /// Create a new domain event.
    pub fn new(actor_id: Option<String>, payload: AccountEvent) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            actor_id,
            payload,
        }
    }
}
