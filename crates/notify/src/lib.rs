//! Real-time notification plumbing for event subscribers.
//!
//! [`EventNotification`] is the typed message set (`date-changed`,
//! `generic-update`), [`TopicHub`] fans messages out to per-event topics,
//! and [`Broadcaster`] is the publish seam the update flow consumes.

pub mod message;
pub mod topic;

pub use message::EventNotification;
pub use topic::{BroadcastError, Broadcaster, TopicHub};
