//! # Delivery Channels
//!
//! The delivery transport is an external collaborator. Two channels ship
//! with the crate: [`LogChannel`] writes each notification as a structured
//! `tracing` event, and [`MemoryChannel`] keeps an outbox for tests and
//! scenario replay.

use std::sync::Arc;

use parking_lot::Mutex;
use thiserror::Error;

use crate::notification::{Notification, Recipient};

/// Delivery failure reported by a channel.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DeliveryError {
    /// The transport could not be reached.
    #[error("delivery channel unavailable: {0}")]
    Unavailable(String),

    /// The transport refused this notification.
    #[error("delivery to {recipient} rejected: {reason}")]
    Rejected { recipient: Recipient, reason: String },
}

/// Hands a notification to a transport.
pub trait NotificationChannel: Send + Sync {
    fn send(&self, notification: &Notification) -> Result<(), DeliveryError>;
}

impl<C: NotificationChannel + ?Sized> NotificationChannel for Arc<C> {
    fn send(&self, notification: &Notification) -> Result<(), DeliveryError> {
        (**self).send(notification)
    }
}

impl<C: NotificationChannel + ?Sized> NotificationChannel for Box<C> {
    fn send(&self, notification: &Notification) -> Result<(), DeliveryError> {
        (**self).send(notification)
    }
}

/// Emits every notification as an `info` event on the `foodshare::notify`
/// target.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogChannel;

impl NotificationChannel for LogChannel {
    fn send(&self, n: &Notification) -> Result<(), DeliveryError> {
        tracing::info!(
            target: "foodshare::notify",
            notification_id = %n.id,
            recipient = %n.recipient,
            donation_id = %n.donation_id,
            status = %n.status,
            "{}",
            n.message
        );
        Ok(())
    }
}

/// In-memory outbox. Clones share the same outbox.
#[derive(Debug, Clone, Default)]
pub struct MemoryChannel {
    outbox: Arc<Mutex<Vec<Notification>>>,
}

impl MemoryChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything delivered so far.
    pub fn sent(&self) -> Vec<Notification> {
        self.outbox.lock().clone()
    }

    /// Remove and return everything delivered so far.
    pub fn drain(&self) -> Vec<Notification> {
        std::mem::take(&mut *self.outbox.lock())
    }

    pub fn len(&self) -> usize {
        self.outbox.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl NotificationChannel for MemoryChannel {
    fn send(&self, notification: &Notification) -> Result<(), DeliveryError> {
        self.outbox.lock().push(notification.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use foodshare_core::{ActorId, DonationId, Role, Timestamp};
    use foodshare_state::{DonationStatus, StatusChangeEvent};

    fn sample() -> Notification {
        let event = StatusChangeEvent {
            donation_id: DonationId::new(),
            from_status: DonationStatus::Pending,
            to_status: DonationStatus::Accepted,
            actor_id: ActorId::new("n1").unwrap(),
            actor_role: Role::Ngo,
            timestamp: Timestamp::now(),
            donor_id: ActorId::new("u1").unwrap(),
            associated_ngo: None,
            reason: None,
        };
        Notification::for_event(&event, Recipient::Actor(event.donor_id.clone()))
    }

    #[test]
    fn test_memory_channel_records_and_drains() {
        let channel = MemoryChannel::new();
        let shared = channel.clone();
        channel.send(&sample()).unwrap();
        channel.send(&sample()).unwrap();
        assert_eq!(shared.len(), 2);
        assert_eq!(shared.drain().len(), 2);
        assert!(channel.is_empty());
    }

    #[test]
    fn test_log_channel_never_fails() {
        assert!(LogChannel.send(&sample()).is_ok());
    }

    #[test]
    fn test_arc_channel_delegates() {
        let inner = MemoryChannel::new();
        let boxed: Arc<dyn NotificationChannel> = Arc::new(inner.clone());
        boxed.send(&sample()).unwrap();
        assert_eq!(inner.len(), 1);
    }
}
