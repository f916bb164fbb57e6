//! Storage port for the event update flow.
//!
//! The orchestrator sees persistence only through [`EventStore`], which
//! keeps the ownership-scoped lookup contract explicit and lets tests
//! substitute an in-memory implementation.

use async_trait::async_trait;
use quad_core::change::EventPatch;
use quad_core::types::DbId;

use crate::models::event::Event;
use crate::repositories::EventRepo;
use crate::DbPool;

/// The read and write operations an event update needs from storage.
#[async_trait]
pub trait EventStore: Send + Sync {
    /// Look up an event by id alone.
    async fn find_by_id(&self, id: DbId) -> Result<Option<Event>, sqlx::Error>;

    /// Combined ownership-scoped lookup. `None` covers both a missing
    /// event and an event owned by someone else; callers must not be able
    /// to tell the two apart.
    async fn find_by_id_and_owner(
        &self,
        id: DbId,
        owner_id: DbId,
    ) -> Result<Option<Event>, sqlx::Error>;

    /// Apply only the fields present in `patch`. Once this returns `Ok`
    /// the change is durable; everything after it is best-effort.
    async fn partial_update(&self, id: DbId, patch: &EventPatch) -> Result<Event, sqlx::Error>;
}

/// Production [`EventStore`] backed by the Postgres pool.
pub struct PgEventStore {
    pool: DbPool,
}

impl PgEventStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EventStore for PgEventStore {
    async fn find_by_id(&self, id: DbId) -> Result<Option<Event>, sqlx::Error> {
        EventRepo::find_by_id(&self.pool, id).await
    }

    async fn find_by_id_and_owner(
        &self,
        id: DbId,
        owner_id: DbId,
    ) -> Result<Option<Event>, sqlx::Error> {
        EventRepo::find_by_id_and_owner(&self.pool, id, owner_id).await
    }

    async fn partial_update(&self, id: DbId, patch: &EventPatch) -> Result<Event, sqlx::Error> {
        EventRepo::partial_update(&self.pool, id, patch).await
    }
}
