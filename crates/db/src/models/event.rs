//! Campus event entity and DTOs.

use quad_core::change::EventSnapshot;
use quad_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `events` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Event {
    pub id: DbId,
    /// Owning user. Set at creation, never changed by updates.
    pub user_id: DbId,
    pub title: String,
    pub description: String,
    /// When the event takes place. Mutable.
    pub event_date: Timestamp,
    /// Where the event takes place. Mutable, free text.
    pub location: String,
    pub category: String,
    pub speaker: Option<String>,
    /// Opaque URI of the poster image; upload and storage live elsewhere.
    pub poster_url: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Event {
    /// Capture the mutable fields for change detection.
    pub fn snapshot(&self) -> EventSnapshot {
        EventSnapshot {
            event_date: self.event_date,
            location: self.location.clone(),
        }
    }
}

/// DTO for creating a new event. The owner comes from the verified
/// credential, never from the body.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateEvent {
    pub title: String,
    pub description: String,
    pub event_date: Timestamp,
    pub location: String,
    pub category: String,
    pub speaker: Option<String>,
    pub poster_url: String,
}

/// Optional filters for event search. All filters combine with AND;
/// text filters are case-insensitive substring matches, the date filter
/// is an exact match.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventSearchFilters {
    pub title: Option<String>,
    pub description: Option<String>,
    pub event_date: Option<Timestamp>,
    pub location: Option<String>,
    pub category: Option<String>,
    pub speaker: Option<String>,
    /// Maximum rows to return (default 50, capped at 200).
    pub limit: Option<i64>,
}
