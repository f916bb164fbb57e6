//! Repository for the `events` table.

use quad_core::change::EventPatch;
use quad_core::types::DbId;
use sqlx::PgPool;

use crate::models::event::{CreateEvent, Event, EventSearchFilters};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, title, description, event_date, location, \
    category, speaker, poster_url, created_at, updated_at";

/// Default row cap for search results.
const DEFAULT_LIMIT: i64 = 50;

/// Hard row cap for search results.
const MAX_LIMIT: i64 = 200;

/// Provides CRUD operations for campus events.
pub struct EventRepo;

impl EventRepo {
    /// Insert a new event owned by `owner_id`, returning the created row.
    pub async fn create(
        pool: &PgPool,
        owner_id: DbId,
        input: &CreateEvent,
    ) -> Result<Event, sqlx::Error> {
        let query = format!(
            "INSERT INTO events
                (user_id, title, description, event_date, location, category, speaker, poster_url)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Event>(&query)
            .bind(owner_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.event_date)
            .bind(&input.location)
            .bind(&input.category)
            .bind(&input.speaker)
            .bind(&input.poster_url)
            .fetch_one(pool)
            .await
    }

    /// Find an event by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Event>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM events WHERE id = $1");
        sqlx::query_as::<_, Event>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Ownership-scoped lookup. Returns `None` both when no event with
    /// `id` exists and when it exists but belongs to a different owner, so
    /// callers cannot probe for other users' events.
    pub async fn find_by_id_and_owner(
        pool: &PgPool,
        id: DbId,
        owner_id: DbId,
    ) -> Result<Option<Event>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM events WHERE id = $1 AND user_id = $2");
        sqlx::query_as::<_, Event>(&query)
            .bind(id)
            .bind(owner_id)
            .fetch_optional(pool)
            .await
    }

    /// List all events, soonest first.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Event>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM events ORDER BY event_date ASC");
        sqlx::query_as::<_, Event>(&query).fetch_all(pool).await
    }

    /// List the events owned by `owner_id`, soonest first.
    pub async fn list_by_owner(pool: &PgPool, owner_id: DbId) -> Result<Vec<Event>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM events
             WHERE user_id = $1
             ORDER BY event_date ASC"
        );
        sqlx::query_as::<_, Event>(&query)
            .bind(owner_id)
            .fetch_all(pool)
            .await
    }

    /// Apply the fields present in `patch` as a single partial update.
    ///
    /// One atomic statement; concurrent updates resolve last-writer-wins at
    /// the row level. Fails with `RowNotFound` if the event vanished between
    /// lookup and write.
    pub async fn partial_update(
        pool: &PgPool,
        id: DbId,
        patch: &EventPatch,
    ) -> Result<Event, sqlx::Error> {
        let query = format!(
            "UPDATE events SET
                event_date = COALESCE($2, event_date),
                location = COALESCE($3, location),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Event>(&query)
            .bind(id)
            .bind(patch.event_date)
            .bind(&patch.location)
            .fetch_one(pool)
            .await
    }

    /// Search events with optional filters.
    pub async fn search(
        pool: &PgPool,
        filters: &EventSearchFilters,
    ) -> Result<Vec<Event>, sqlx::Error> {
        let limit = filters.limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT);

        // Build dynamic WHERE clauses.
        let mut conditions = Vec::new();
        let mut bind_idx = 1u32;

        if filters.title.is_some() {
            conditions.push(format!("title ILIKE ${bind_idx}"));
            bind_idx += 1;
        }
        if filters.description.is_some() {
            conditions.push(format!("description ILIKE ${bind_idx}"));
            bind_idx += 1;
        }
        if filters.event_date.is_some() {
            conditions.push(format!("event_date = ${bind_idx}"));
            bind_idx += 1;
        }
        if filters.location.is_some() {
            conditions.push(format!("location ILIKE ${bind_idx}"));
            bind_idx += 1;
        }
        if filters.category.is_some() {
            conditions.push(format!("category ILIKE ${bind_idx}"));
            bind_idx += 1;
        }
        if filters.speaker.is_some() {
            conditions.push(format!("speaker ILIKE ${bind_idx}"));
            bind_idx += 1;
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let query = format!(
            "SELECT {COLUMNS} FROM events {where_clause}
             ORDER BY event_date ASC
             LIMIT ${bind_idx}"
        );

        let mut q = sqlx::query_as::<_, Event>(&query);

        // Bind dynamic parameters in order.
        if let Some(ref title) = filters.title {
            q = q.bind(format!("%{title}%"));
        }
        if let Some(ref description) = filters.description {
            q = q.bind(format!("%{description}%"));
        }
        if let Some(event_date) = filters.event_date {
            q = q.bind(event_date);
        }
        if let Some(ref location) = filters.location {
            q = q.bind(format!("%{location}%"));
        }
        if let Some(ref category) = filters.category {
            q = q.bind(format!("%{category}%"));
        }
        if let Some(ref speaker) = filters.speaker {
            q = q.bind(format!("%{speaker}%"));
        }

        q = q.bind(limit);
        q.fetch_all(pool).await
    }
}
