//! Request handlers.
//!
//! Each submodule provides async handler functions for a single resource.
//! Handlers delegate to the repositories in `quad_db` (or, for updates, to
//! the [`UpdateOrchestrator`](crate::updates::UpdateOrchestrator)) and map
//! errors via [`AppError`](crate::error::AppError).

pub mod auth;
pub mod event;
pub mod registration;
