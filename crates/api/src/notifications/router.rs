//! Event-to-notification routing engine.
//!
//! [`NotificationRouter`] subscribes to the platform event bus and routes
//! each event to the affected users: moderation outcomes go to the listing
//! owner, new submissions and leads go to the admin back-office.

use std::sync::Arc;

use axum::extract::ws::Message;
use homehni_core::types::DbId;
use homehni_db::repositories::UserRepo;
use homehni_db::DbPool;
use homehni_events::bus::{
    EVENT_LEAD_CREATED, EVENT_LISTING_APPROVED, EVENT_LISTING_REJECTED, EVENT_LISTING_SUBMITTED,
};
use homehni_events::PlatformEvent;
use tokio::sync::broadcast;

use crate::ws::WsManager;

/// Routes platform events to user notifications.
///
/// Consumes events from the broadcast channel and, for each event,
/// determines the target users and pushes a WebSocket message to each.
pub struct NotificationRouter {
    pool: DbPool,
    ws_manager: Arc<WsManager>,
}

impl NotificationRouter {
    /// Create a new router with the given database pool and WebSocket manager.
    pub fn new(pool: DbPool, ws_manager: Arc<WsManager>) -> Self {
        Self { pool, ws_manager }
    }

    /// Run the main routing loop.
    ///
    /// Subscribes to the event bus via `receiver` and processes each event.
    /// The loop exits when the channel is closed (i.e. the
    /// [`EventBus`](homehni_events::EventBus) is dropped).
    pub async fn run(self, mut receiver: broadcast::Receiver<PlatformEvent>) {
        loop {
            match receiver.recv().await {
                Ok(event) => {
                    if let Err(e) = self.route_event(&event).await {
                        tracing::error!(
                            error = %e,
                            event_type = %event.event_type,
                            "Failed to route event"
                        );
                    }
                }
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(skipped = n, "Notification router lagged");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::info!("Event bus closed, notification router shutting down");
                    break;
                }
            }
        }
    }

    /// Route a single event to all affected users.
    async fn route_event(&self, event: &PlatformEvent) -> Result<(), sqlx::Error> {
        let target_users = self.determine_targets(event).await?;

        for user_id in target_users {
            self.deliver(user_id, event).await;
        }

        Ok(())
    }

    /// Determine which users should receive a notification for the event.
    async fn determine_targets(&self, event: &PlatformEvent) -> Result<Vec<DbId>, sqlx::Error> {
        match event.event_type.as_str() {
            // Moderation outcomes: notify the listing owner.
            EVENT_LISTING_APPROVED | EVENT_LISTING_REJECTED => {
                let owner_id = event
                    .payload
                    .get("owner_id")
                    .and_then(|v| serde_json::from_value::<DbId>(v.clone()).ok());
                Ok(owner_id.into_iter().collect())
            }

            // New submissions and leads: notify the admin back-office.
            EVENT_LISTING_SUBMITTED | EVENT_LEAD_CREATED => {
                UserRepo::list_admin_ids(&self.pool).await
            }

            _ => Ok(vec![]),
        }
    }

    /// Push a notification message to all of a user's WebSocket connections.
    async fn deliver(&self, user_id: DbId, event: &PlatformEvent) {
        let msg = serde_json::json!({
            "type": "notification",
            "event_type": event.event_type,
            "payload": event.payload,
            "timestamp": event.timestamp,
        });
        let ws_msg = Message::Text(msg.to_string().into());
        let sent = self.ws_manager.send_to_user(user_id, ws_msg).await;
        tracing::debug!(
            user_id,
            event_type = %event.event_type,
            connections = sent,
            "Notification delivered"
        );
    }
}
