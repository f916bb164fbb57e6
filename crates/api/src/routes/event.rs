//! Route definitions for the `/events` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{event, registration};
use crate::state::AppState;
use crate::ws;

/// Routes mounted at `/events`.
///
/// ```text
/// GET  /               -> list (public)
/// POST /               -> create (requires auth)
/// GET  /search         -> search (public)
/// GET  /mine           -> caller's events (requires auth)
/// GET  /mine/{id}      -> owner-scoped detail (requires auth)
/// GET  /history        -> caller's registrations (requires auth)
/// GET  /{id}           -> detail + is_registered (optional auth)
/// PUT  /{id}           -> update date/location, notify subscribers
/// POST /{id}/register  -> register caller (requires auth)
/// GET  /{id}/ws        -> subscribe to the event's notification topic
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(event::list).post(event::create))
        .route("/search", get(event::search))
        .route("/mine", get(event::list_mine))
        .route("/mine/{id}", get(event::get_mine))
        .route("/history", get(registration::history))
        .route("/{id}", get(event::get_by_id).put(event::update))
        .route("/{id}/register", post(registration::register))
        .route("/{id}/ws", get(ws::event_ws_handler))
}
