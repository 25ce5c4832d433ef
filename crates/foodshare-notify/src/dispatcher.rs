//! # Notification Dispatcher
//!
//! Consumes committed status-change events. Dispatch is best-effort: a
//! delivery failure for one recipient does not stop delivery to the others
//! and is never turned into an error for the transition caller.

use foodshare_state::StatusChangeEvent;

use crate::channel::{DeliveryError, NotificationChannel};
use crate::notification::{Notification, Recipient};
use crate::policy::recipients_for;

/// What happened to each recipient of one event.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchReport {
    pub delivered: Vec<Notification>,
    pub failed: Vec<(Recipient, DeliveryError)>,
}

impl DispatchReport {
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }

    /// Number of notifications produced, delivered or not.
    pub fn attempted(&self) -> usize {
        self.delivered.len() + self.failed.len()
    }
}

/// Fans events out to the configured channel.
#[derive(Debug, Clone)]
pub struct NotificationDispatcher<C> {
    channel: C,
}

impl<C: NotificationChannel> NotificationDispatcher<C> {
    pub fn new(channel: C) -> Self {
        Self { channel }
    }

    pub fn channel(&self) -> &C {
        &self.channel
    }

    /// Produce and send one notification per recipient of `event`.
    pub fn on_status_change(&self, event: &StatusChangeEvent) -> DispatchReport {
        let mut report = DispatchReport::default();
        for recipient in recipients_for(event) {
            let notification = Notification::for_event(event, recipient.clone());
            match self.channel.send(&notification) {
                Ok(()) => report.delivered.push(notification),
                Err(err) => {
                    tracing::warn!(
                        donation_id = %event.donation_id,
                        status = %event.to_status,
                        recipient = %recipient,
                        error = %err,
                        "notification delivery failed"
                    );
                    metrics::counter!("foodshare_notifications_failed_total").increment(1);
                    report.failed.push((recipient, err));
                }
            }
        }
        tracing::debug!(
            donation_id = %event.donation_id,
            delivered = report.delivered.len(),
            failed = report.failed.len(),
            "status change dispatched"
        );
        report
    }
}
