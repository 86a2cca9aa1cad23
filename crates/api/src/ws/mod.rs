//! WebSocket infrastructure for real-time notifications.
//!
//! Provides connection management, heartbeat monitoring, and the HTTP
//! upgrade handler used by Axum routes. Clients may authenticate by passing
//! a valid access token via the `?token=` query parameter; authenticated
//! connections receive user-targeted notifications in addition to broadcasts.

mod handler;
mod heartbeat;
pub mod manager;

pub use handler::ws_handler;
pub use heartbeat::start_heartbeat;
pub use manager::WsManager;
