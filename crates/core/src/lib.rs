//! Shared domain types for the Quad campus events platform.
//!
//! This crate is dependency-light on purpose: it holds the ID and timestamp
//! aliases, the error taxonomy shared by every layer, and the pure
//! change-detection logic that the update flow runs between its storage
//! write and its notification broadcasts.

pub mod change;
pub mod error;
pub mod types;
