//! The event update flow, end to end.
//!
//! [`UpdateOrchestrator`] ties together credential verification, the
//! ownership-scoped lookup, the partial write, change detection, and the
//! notification broadcasts. The write is the commit point: any failure
//! before it aborts the whole operation, while the broadcasts after it are
//! best-effort and can never fail the request or roll the write back.

use std::sync::Arc;
use std::time::Duration;

use quad_core::change::{detect_changes, EventPatch};
use quad_core::error::CoreError;
use quad_core::types::DbId;
use quad_db::models::event::Event;
use quad_db::EventStore;
use quad_notify::{BroadcastError, Broadcaster, EventNotification};

use crate::auth::jwt::TokenVerifier;
use crate::error::{AppError, AppResult};

/// Drives one event update from bearer credential to subscriber
/// notification. Shared via `Arc` in [`AppState`](crate::state::AppState).
pub struct UpdateOrchestrator {
    verifier: TokenVerifier,
    store: Arc<dyn EventStore>,
    broadcaster: Arc<dyn Broadcaster>,
    /// Upper bound for each broadcast attempt.
    broadcast_timeout: Duration,
}

impl UpdateOrchestrator {
    pub fn new(
        verifier: TokenVerifier,
        store: Arc<dyn EventStore>,
        broadcaster: Arc<dyn Broadcaster>,
        broadcast_timeout: Duration,
    ) -> Self {
        Self {
            verifier,
            store,
            broadcaster,
            broadcast_timeout,
        }
    }

    /// Update an event's date and/or location and notify its subscribers.
    ///
    /// Steps, in order:
    /// 1. verify the bearer credential;
    /// 2. reject a patch that carries no fields;
    /// 3. load the event scoped to the caller (a missing event and someone
    ///    else's event are the same `NotFound`);
    /// 4. apply the partial write -- the commit point;
    /// 5. diff the patch against the pre-write snapshot;
    /// 6. broadcast `date-changed` if the date moved, then `generic-update`
    ///    always, both bounded by the timeout and neither able to fail the
    ///    call.
    ///
    /// Returns the updated row as stored.
    pub async fn update_event(
        &self,
        bearer: Option<&str>,
        event_id: DbId,
        patch: EventPatch,
    ) -> AppResult<Event> {
        let token = bearer
            .ok_or_else(|| CoreError::Unauthenticated("Missing bearer credential".into()))?;
        let caller = self.verifier.verify(token)?;

        if patch.is_empty() {
            return Err(AppError::Core(CoreError::Validation(
                "At least one of event_date or location must be provided".into(),
            )));
        }

        let current = self
            .store
            .find_by_id_and_owner(event_id, caller)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "Event",
                id: event_id,
            }))?;
        let snapshot = current.snapshot();

        // Commit point. From here on the update is durable.
        let updated = self.store.partial_update(event_id, &patch).await?;

        let changes = detect_changes(event_id, &snapshot, &patch);
        tracing::debug!(
            event_id,
            caller,
            changed = changes.changes.len(),
            "Event updated"
        );

        if let Some(message) = EventNotification::date_changed(&changes) {
            self.broadcast(event_id, message).await;
        }
        self.broadcast(event_id, EventNotification::generic_update(&changes))
            .await;

        Ok(updated)
    }

    /// Publish one message with a bounded wait, logging the outcome.
    ///
    /// The write has already committed; a slow, failed, or timed-out
    /// publish is recorded and swallowed.
    async fn broadcast(&self, event_id: DbId, message: EventNotification) {
        let kind = message.kind();
        let result = match tokio::time::timeout(
            self.broadcast_timeout,
            self.broadcaster.publish(event_id, message),
        )
        .await
        {
            Ok(result) => result,
            Err(_) => Err(BroadcastError::Timeout(self.broadcast_timeout)),
        };

        match result {
            Ok(subscribers) => {
                tracing::debug!(event_id, kind, subscribers, "Notification broadcast");
            }
            Err(e) => {
                tracing::warn!(
                    event_id,
                    kind,
                    error = %e,
                    "Notification broadcast failed; update already committed"
                );
            }
        }
    }
}
