//! Notification routing infrastructure.
//!
//! The [`NotificationRouter`] subscribes to the event bus and pushes
//! real-time notifications to the relevant users over WebSocket.

pub mod router;

pub use router::NotificationRouter;
