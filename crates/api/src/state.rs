use std::sync::Arc;

use quad_notify::TopicHub;

use crate::auth::jwt::TokenVerifier;
use crate::config::ServerConfig;
use crate::updates::UpdateOrchestrator;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: quad_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Per-event notification topics; WebSocket subscribers attach here.
    pub hub: Arc<TopicHub>,
    /// Bearer credential verification, shared by extractors and the
    /// update orchestrator.
    pub verifier: TokenVerifier,
    /// The event update flow: verify, write, diff, notify.
    pub updates: Arc<UpdateOrchestrator>,
}
