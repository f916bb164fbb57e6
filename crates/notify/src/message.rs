//! Typed notification messages delivered to event subscribers.

use std::collections::BTreeMap;

use quad_core::change::{ChangeSet, FieldDelta};
use quad_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};

/// A notification published to one event's topic.
///
/// `date-changed` carries the before/after date pair for subscribers that
/// only care about scheduling. `generic-update` carries the full map of
/// fields the update actually changed; the map is empty when the caller
/// requested values identical to what was already stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum EventNotification {
    DateChanged {
        event_id: DbId,
        old_date: Timestamp,
        new_date: Timestamp,
    },
    GenericUpdate {
        event_id: DbId,
        changes: BTreeMap<String, FieldDelta>,
    },
}

impl EventNotification {
    /// The `date-changed` message for a change set, when the date moved.
    pub fn date_changed(changes: &ChangeSet) -> Option<Self> {
        changes.date_change().map(|(old, new)| Self::DateChanged {
            event_id: changes.event_id,
            old_date: old,
            new_date: new,
        })
    }

    /// The `generic-update` message for a change set. Always constructible,
    /// even when the change set is empty.
    pub fn generic_update(changes: &ChangeSet) -> Self {
        Self::GenericUpdate {
            event_id: changes.event_id,
            changes: changes.field_map(),
        }
    }

    /// The event whose topic this message belongs to.
    pub fn event_id(&self) -> DbId {
        match self {
            Self::DateChanged { event_id, .. } | Self::GenericUpdate { event_id, .. } => *event_id,
        }
    }

    /// Wire name of the message kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::DateChanged { .. } => "date-changed",
            Self::GenericUpdate { .. } => "generic-update",
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use quad_core::change::{detect_changes, EventPatch, EventSnapshot};

    use super::*;

    fn ts(day: u32) -> Timestamp {
        Utc.with_ymd_and_hms(2025, 3, day, 18, 30, 0).unwrap()
    }

    fn change_set(patch: EventPatch) -> ChangeSet {
        let old = EventSnapshot {
            event_date: ts(1),
            location: "Auditorium".to_owned(),
        };
        detect_changes(9, &old, &patch)
    }

    #[test]
    fn date_changed_serializes_with_kebab_case_kind() {
        let msg = EventNotification::DateChanged {
            event_id: 9,
            old_date: ts(1),
            new_date: ts(2),
        };
        let value = serde_json::to_value(&msg).unwrap();
        assert_eq!(value["kind"], "date-changed");
        assert_eq!(value["event_id"], 9);
        assert_eq!(value["old_date"], "2025-03-01T18:30:00Z");
        assert_eq!(value["new_date"], "2025-03-02T18:30:00Z");
    }

    #[test]
    fn generic_update_serializes_changed_fields() {
        let changes = change_set(EventPatch {
            event_date: None,
            location: Some("Lab 4".to_owned()),
        });
        let msg = EventNotification::generic_update(&changes);
        let value = serde_json::to_value(&msg).unwrap();
        assert_eq!(value["kind"], "generic-update");
        assert_eq!(value["changes"]["location"]["old"], "Auditorium");
        assert_eq!(value["changes"]["location"]["new"], "Lab 4");
        assert!(value["changes"].get("date").is_none());
    }

    #[test]
    fn date_changed_is_absent_when_date_did_not_move() {
        let changes = change_set(EventPatch {
            event_date: Some(ts(1)),
            location: Some("Lab 4".to_owned()),
        });
        assert!(EventNotification::date_changed(&changes).is_none());
    }

    #[test]
    fn date_changed_carries_old_and_new_values() {
        let changes = change_set(EventPatch {
            event_date: Some(ts(5)),
            location: None,
        });
        let msg = EventNotification::date_changed(&changes).unwrap();
        assert_eq!(
            msg,
            EventNotification::DateChanged {
                event_id: 9,
                old_date: ts(1),
                new_date: ts(5),
            }
        );
        assert_eq!(msg.kind(), "date-changed");
        assert_eq!(msg.event_id(), 9);
    }

    #[test]
    fn generic_update_with_no_changes_has_empty_map() {
        let changes = change_set(EventPatch::default());
        let msg = EventNotification::generic_update(&changes);
        let value = serde_json::to_value(&msg).unwrap();
        assert_eq!(value["kind"], "generic-update");
        assert!(value["changes"].as_object().unwrap().is_empty());
    }

    #[test]
    fn serde_roundtrip() {
        let changes = change_set(EventPatch {
            event_date: Some(ts(7)),
            location: Some("Lab 4".to_owned()),
        });
        let msg = EventNotification::generic_update(&changes);
        let json = serde_json::to_string(&msg).unwrap();
        let parsed: EventNotification = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, msg);
    }
}
