//! Repository for the `event_registrations` table.

use quad_core::types::DbId;
use sqlx::PgPool;

use crate::models::registration::{Registration, RegistrationWithEvent};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, event_id, user_id, created_at";

/// Provides registration operations (sign up for an event, history).
pub struct RegistrationRepo;

impl RegistrationRepo {
    /// Register `user_id` for `event_id`, idempotently.
    ///
    /// Returns the row plus `true` when it was newly inserted. When the
    /// pair already exists (`uq_event_registrations_event_user`), the
    /// existing row is returned with `false` instead of a conflict error.
    pub async fn register(
        pool: &PgPool,
        event_id: DbId,
        user_id: DbId,
    ) -> Result<(Registration, bool), sqlx::Error> {
        let query = format!(
            "INSERT INTO event_registrations (event_id, user_id)
             VALUES ($1, $2)
             ON CONFLICT (event_id, user_id) DO NOTHING
             RETURNING {COLUMNS}"
        );
        let inserted = sqlx::query_as::<_, Registration>(&query)
            .bind(event_id)
            .bind(user_id)
            .fetch_optional(pool)
            .await?;

        match inserted {
            Some(row) => Ok((row, true)),
            None => {
                let existing = Self::find(pool, event_id, user_id)
                    .await?
                    .ok_or(sqlx::Error::RowNotFound)?;
                Ok((existing, false))
            }
        }
    }

    /// Find the registration for a (event, user) pair.
    pub async fn find(
        pool: &PgPool,
        event_id: DbId,
        user_id: DbId,
    ) -> Result<Option<Registration>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM event_registrations WHERE event_id = $1 AND user_id = $2");
        sqlx::query_as::<_, Registration>(&query)
            .bind(event_id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Whether `user_id` is registered for `event_id`.
    pub async fn is_registered(
        pool: &PgPool,
        event_id: DbId,
        user_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let (exists,): (bool,) = sqlx::query_as(
            "SELECT EXISTS(
                SELECT 1 FROM event_registrations WHERE event_id = $1 AND user_id = $2
             )",
        )
        .bind(event_id)
        .bind(user_id)
        .fetch_one(pool)
        .await?;
        Ok(exists)
    }

    /// The caller's attendance history, most recent registration first.
    pub async fn list_history_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<RegistrationWithEvent>, sqlx::Error> {
        sqlx::query_as::<_, RegistrationWithEvent>(
            "SELECT
                r.id, r.event_id, r.created_at AS registered_at,
                e.title, e.event_date, e.location, e.category, e.poster_url
             FROM event_registrations r
             JOIN events e ON e.id = r.event_id
             WHERE r.user_id = $1
             ORDER BY r.created_at DESC",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }
}
