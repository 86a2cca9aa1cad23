use std::sync::Arc;

use crate::config::ServerConfig;
use crate::locks::DraftLocks;
use crate::ws::WsManager;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: homehni_db::DbPool,
    /// Server configuration (accessed by middleware and handlers).
    pub config: Arc<ServerConfig>,
    /// WebSocket connection manager (browser clients).
    pub ws_manager: Arc<WsManager>,
    /// Centralized event bus for publishing platform events.
    pub event_bus: Arc<homehni_events::EventBus>,
    /// Per-user locks serializing draft-wizard writes.
    pub draft_locks: Arc<DraftLocks>,
}
