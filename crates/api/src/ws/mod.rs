//! WebSocket subscription endpoint for per-event notifications.

mod handler;

pub use handler::event_ws_handler;
