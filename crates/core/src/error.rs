use crate::types::DbId;

/// Domain error taxonomy shared by every crate in the workspace.
///
/// The API layer maps each variant onto an HTTP status; nothing below the
/// API layer knows about HTTP.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The entity does not exist, or the caller is not allowed to see that
    /// it exists. Ownership-scoped lookups fold both cases into this one.
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    /// Missing, malformed, expired, or otherwise unverifiable credential.
    #[error("Unauthenticated: {0}")]
    Unauthenticated(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
