//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - The `Deserialize` DTOs the API layer accepts for that entity

pub mod event;
pub mod registration;
pub mod user;
