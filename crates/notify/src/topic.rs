//! Topic-keyed broadcast hub for event notifications.
//!
//! Every event id maps to its own `tokio::sync::broadcast` channel (its
//! *topic*). Subscribers attach with [`TopicHub::subscribe`]; publishing is
//! fire-and-forget, so a topic with zero subscribers is a trivially
//! successful publish. [`TopicHub`] is designed to be shared via
//! `Arc<TopicHub>` across the application.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use quad_core::types::DbId;
use tokio::sync::{broadcast, RwLock};

use crate::message::EventNotification;

/// Default buffer capacity per topic channel.
const DEFAULT_TOPIC_CAPACITY: usize = 256;

/// Why a publish attempt failed.
///
/// A failure here never changes the outcome of the update that triggered
/// the notification; the caller records it and moves on.
#[derive(Debug, thiserror::Error)]
pub enum BroadcastError {
    /// The publish did not complete within the configured bound.
    #[error("broadcast timed out after {0:?}")]
    Timeout(Duration),

    /// The underlying transport rejected the message.
    #[error("broadcast transport failed: {0}")]
    Transport(String),
}

/// Publishes typed notifications to the topic of one event.
///
/// [`TopicHub`] is the in-process implementation; tests substitute doubles
/// to exercise failure paths.
#[async_trait]
pub trait Broadcaster: Send + Sync {
    /// Deliver `message` to every current subscriber of `event_id`'s topic.
    ///
    /// Returns the number of subscribers reached; `Ok(0)` when nobody is
    /// listening.
    async fn publish(
        &self,
        event_id: DbId,
        message: EventNotification,
    ) -> Result<usize, BroadcastError>;
}

/// In-process fan-out hub with one broadcast channel per event.
///
/// Topics are created lazily on first subscribe and pruned on publish once
/// their last receiver is gone. Slow subscribers that fall more than the
/// channel capacity behind observe `RecvError::Lagged` and skip ahead.
pub struct TopicHub {
    topics: RwLock<HashMap<DbId, broadcast::Sender<EventNotification>>>,
    capacity: usize,
}

impl TopicHub {
    /// Create a hub whose topics buffer `capacity` messages each.
    pub fn new(capacity: usize) -> Self {
        Self {
            topics: RwLock::new(HashMap::new()),
            capacity,
        }
    }

    /// Attach a subscriber to the topic for `event_id`, creating the topic
    /// on first use.
    pub async fn subscribe(&self, event_id: DbId) -> broadcast::Receiver<EventNotification> {
        let mut topics = self.topics.write().await;
        topics
            .entry(event_id)
            .or_insert_with(|| broadcast::channel(self.capacity).0)
            .subscribe()
    }

    /// Number of subscribers currently attached to `event_id`'s topic.
    pub async fn subscriber_count(&self, event_id: DbId) -> usize {
        let topics = self.topics.read().await;
        topics
            .get(&event_id)
            .map(|sender| sender.receiver_count())
            .unwrap_or(0)
    }

    /// Number of live topics.
    pub async fn topic_count(&self) -> usize {
        self.topics.read().await.len()
    }

    /// Drop every topic so attached receivers observe channel close.
    /// Called during graceful shutdown.
    pub async fn shutdown(&self) {
        let mut topics = self.topics.write().await;
        let dropped = topics.len();
        topics.clear();
        if dropped > 0 {
            tracing::debug!(topics = dropped, "Notification topics closed");
        }
    }
}

impl Default for TopicHub {
    fn default() -> Self {
        Self::new(DEFAULT_TOPIC_CAPACITY)
    }
}

#[async_trait]
impl Broadcaster for TopicHub {
    async fn publish(
        &self,
        event_id: DbId,
        message: EventNotification,
    ) -> Result<usize, BroadcastError> {
        let delivered = {
            let topics = self.topics.read().await;
            match topics.get(&event_id) {
                // A send error only means zero receivers remain.
                Some(sender) => sender.send(message).unwrap_or(0),
                None => return Ok(0),
            }
        };

        if delivered == 0 {
            // The topic's last receiver is gone. Re-check under the write
            // lock so a subscriber arriving in between is not thrown away.
            let mut topics = self.topics.write().await;
            if topics
                .get(&event_id)
                .is_some_and(|sender| sender.receiver_count() == 0)
            {
                topics.remove(&event_id);
                tracing::trace!(event_id, "Pruned subscriber-less topic");
            }
        }

        Ok(delivered)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
