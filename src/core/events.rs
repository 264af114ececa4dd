//! Lifecycle notifications for link records
//!
//! [`LinkManager`] publishes a [`LinkEvent`] after each successful write or
//! delete. The bus uses `tokio::sync::broadcast`, so any number of listeners
//! (cache invalidation, search indexing, audit) can subscribe without the
//! manager knowing about them.
//!
//! ```rust,ignore
//! let bus = EventBus::new(256);
//! let mut rx = bus.subscribe();
//!
//! let manager = LinkManager::new(store, resolver).with_event_bus(bus.clone());
//! manager.save(LinkRecord::url("https://example.com")).await?;
//!
//! let envelope = rx.recv().await?;
//! assert_eq!(envelope.event.action(), "created");
//! ```
//!
//! [`LinkManager`]: crate::links::manager::LinkManager

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use uuid::Uuid;

/// Events related to link record mutations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum LinkEvent {
    /// A record was stored for the first time
    Created {
        link_id: u64,
        link_type: Option<String>,
    },
    /// An existing record was rewritten
    Updated {
        link_id: u64,
        link_type: Option<String>,
    },
    /// An empty title was filled in after a write
    TitleBackfilled { link_id: u64, title: String },
    /// A record was deleted
    Deleted { link_id: u64 },
}

impl LinkEvent {
    /// The id of the record this event relates to
    pub fn link_id(&self) -> u64 {
        match self {
            LinkEvent::Created { link_id, .. }
            | LinkEvent::Updated { link_id, .. }
            | LinkEvent::TitleBackfilled { link_id, .. }
            | LinkEvent::Deleted { link_id } => *link_id,
        }
    }

    /// Get the action name
    pub fn action(&self) -> &str {
        match self {
            LinkEvent::Created { .. } => "created",
            LinkEvent::Updated { .. } => "updated",
            LinkEvent::TitleBackfilled { .. } => "title_backfilled",
            LinkEvent::Deleted { .. } => "deleted",
        }
    }
}

/// Envelope wrapping an event with metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventEnvelope {
    /// Unique event ID
    pub id: Uuid,
    /// When the event occurred
    pub timestamp: DateTime<Utc>,
    pub event: LinkEvent,
}

impl EventEnvelope {
    pub fn new(event: LinkEvent) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            event,
        }
    }
}

/// Broadcast-based event bus
///
/// Cheap to clone; all clones share the same channel.
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<EventEnvelope>,
}

impl EventBus {
    /// Create a new EventBus with the given channel capacity
    ///
    /// Slow receivers start losing events (lagged) once `capacity` events
    /// are buffered.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to all subscribers
    ///
    /// Never fails. Returns the number of receivers that will see the event.
    pub fn publish(&self, event: LinkEvent) -> usize {
        let envelope = EventEnvelope::new(event);
        // send() returns Err only if there are no receivers
        self.sender.send(envelope).unwrap_or(0)
    }

    /// Subscribe to future events
    pub fn subscribe(&self) -> broadcast::Receiver<EventEnvelope> {
        self.sender.subscribe()
    }

    pub fn receiver_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(1024)
    }
}
