pub mod auth;
pub mod event;
pub mod health;

use axum::routing::get;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register           register account (public)
/// /auth/login              login (public)
///
/// /users/me                caller profile (requires auth)
///
/// /events                  list (GET), create (POST, auth)
/// /events/search           filtered search (GET)
/// /events/mine             caller's events (GET, auth)
/// /events/mine/{id}        owner-scoped detail (GET, auth)
/// /events/history          caller's registrations (GET, auth)
/// /events/{id}             detail (GET), update + notify (PUT)
/// /events/{id}/register    register caller (POST, auth)
/// /events/{id}/ws          notification topic WebSocket (GET)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Authentication routes (register, login).
        .nest("/auth", auth::router())
        // Caller profile.
        .route("/users/me", get(handlers::auth::me))
        // Events, registrations, and per-event notification topics.
        .nest("/events", event::router())
}
