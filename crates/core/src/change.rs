//! Field-level change detection for event updates.
//!
//! After an update is written, [`detect_changes`] compares the pre-write
//! snapshot against the requested patch and yields the minimal
//! [`ChangeSet`]: only fields that were present in the patch *and* differ
//! from the stored value. Pure and synchronous; no storage access.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::{DbId, Timestamp};

/// Partial update to an event's mutable fields.
///
/// Both fields optional; a patch carrying neither is invalid and must be
/// rejected before any storage access.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventPatch {
    pub event_date: Option<Timestamp>,
    pub location: Option<String>,
}

impl EventPatch {
    /// `true` when the patch requests nothing at all.
    pub fn is_empty(&self) -> bool {
        self.event_date.is_none() && self.location.is_none()
    }
}

/// Pre-update values of the mutable fields, captured before the write.
#[derive(Debug, Clone, PartialEq)]
pub struct EventSnapshot {
    pub event_date: Timestamp,
    pub location: String,
}

/// One field that actually changed, with its before/after values.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldChange {
    Date { old: Timestamp, new: Timestamp },
    Location { old: String, new: String },
}

impl FieldChange {
    /// Wire name of the field (`"date"` or `"location"`).
    pub fn field_name(&self) -> &'static str {
        match self {
            Self::Date { .. } => "date",
            Self::Location { .. } => "location",
        }
    }
}

/// Before/after value pair for one field, as carried in notification
/// payloads. Values are pre-serialized so the pair is field-type agnostic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDelta {
    pub old: serde_json::Value,
    pub new: serde_json::Value,
}

/// The set of fields one update actually changed.
///
/// Ephemeral: produced after the write, consumed to build notifications,
/// never persisted. Empty when every requested value matched what was
/// already stored.
#[derive(Debug, Clone, PartialEq)]
pub struct ChangeSet {
    pub event_id: DbId,
    /// Changed fields in fixed order: date first, then location.
    pub changes: Vec<FieldChange>,
}

impl ChangeSet {
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// The `(old, new)` date pair, when the date actually changed.
    pub fn date_change(&self) -> Option<(Timestamp, Timestamp)> {
        self.changes.iter().find_map(|change| match change {
            FieldChange::Date { old, new } => Some((*old, *new)),
            FieldChange::Location { .. } => None,
        })
    }

    /// Map of field name to before/after pair for the generic update
    /// payload. Empty when nothing changed.
    pub fn field_map(&self) -> BTreeMap<String, FieldDelta> {
        self.changes
            .iter()
            .map(|change| {
                let delta = match change {
                    FieldChange::Date { old, new } => FieldDelta {
                        old: serde_json::json!(old),
                        new: serde_json::json!(new),
                    },
                    FieldChange::Location { old, new } => FieldDelta {
                        old: serde_json::Value::String(old.clone()),
                        new: serde_json::Value::String(new.clone()),
                    },
                };
                (change.field_name().to_owned(), delta)
            })
            .collect()
    }
}

/// Compare the pre-write snapshot against the patch.
///
/// A field enters the change set iff the patch carries it *and* its value
/// differs from the snapshot. Equality is exact; requesting a value equal
/// to the stored one produces no entry for that field.
pub fn detect_changes(event_id: DbId, old: &EventSnapshot, patch: &EventPatch) -> ChangeSet {
    let mut changes = Vec::new();

    if let Some(new_date) = patch.event_date {
        if new_date != old.event_date {
            changes.push(FieldChange::Date {
                old: old.event_date,
                new: new_date,
            });
        }
    }

    if let Some(ref new_location) = patch.location {
        if *new_location != old.location {
            changes.push(FieldChange::Location {
                old: old.location.clone(),
                new: new_location.clone(),
            });
        }
    }

    ChangeSet { event_id, changes }
}
