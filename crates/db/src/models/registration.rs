//! Event registration entity: user X attends event Y.

use quad_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `event_registrations` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Registration {
    pub id: DbId,
    pub event_id: DbId,
    pub user_id: DbId,
    pub created_at: Timestamp,
}

/// A registration joined with the event it belongs to, for the caller's
/// attendance history.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RegistrationWithEvent {
    pub id: DbId,
    pub event_id: DbId,
    pub registered_at: Timestamp,
    pub title: String,
    pub event_date: Timestamp,
    pub location: String,
    pub category: String,
    pub poster_url: String,
}
