//! # Donation Service
//!
//! One entry point for everything a caller does to a donation. Transitions
//! go through the [`LifecycleEngine`]; committed transitions are then handed
//! to the [`NotificationDispatcher`]. Gate and visibility queries read the
//! donation's current status and defer to the pure functions in
//! `foodshare-state`.

use foodshare_core::{Actor, DonationId};
use foodshare_notify::{DispatchReport, NotificationChannel, NotificationDispatcher};
use foodshare_state::{
    gates_for, location_visible, Donation, DonationStatus, DonationStore, LifecycleEngine,
    LifecycleError, LocationUpdate, NewDonation, SideEffectGates, StatusChangeEvent,
    TransitionOutcome,
};

use crate::config::{ConfigError, ServiceConfig};
use crate::payment::{PaymentBridge, PaymentSucceeded};

/// A committed transition together with what dispatch did with it.
#[derive(Debug, Clone)]
pub struct TransitionReceipt {
    pub donation: Donation,
    pub event: StatusChangeEvent,
    /// Empty when notifications are disabled.
    pub dispatch: DispatchReport,
}

pub struct DonationService<S, C> {
    engine: LifecycleEngine<S>,
    dispatcher: NotificationDispatcher<C>,
    payments: PaymentBridge,
    notifications_enabled: bool,
}

impl<S: DonationStore, C: NotificationChannel> DonationService<S, C> {
    pub fn new(store: S, channel: C, config: &ServiceConfig) -> Result<Self, ConfigError> {
        let settlement = config.payment.settlement_actor()?;
        Ok(Self {
            engine: LifecycleEngine::new(store),
            dispatcher: NotificationDispatcher::new(channel),
            payments: PaymentBridge::new(settlement),
            notifications_enabled: config.notifications.enabled,
        })
    }

    pub fn engine(&self) -> &LifecycleEngine<S> {
        &self.engine
    }

    pub fn submit_donation(
        &self,
        draft: NewDonation,
        donor: &Actor,
    ) -> Result<Donation, LifecycleError> {
        self.engine.create(draft, donor)
    }

    pub fn get(&self, id: &DonationId) -> Result<Donation, LifecycleError> {
        self.engine.get(id)
    }

    pub fn available_transitions(
        &self,
        id: &DonationId,
        actor: &Actor,
    ) -> Result<Vec<DonationStatus>, LifecycleError> {
        self.engine.available_transitions(id, actor)
    }

    /// Request a transition and, once committed, dispatch its notifications.
    pub fn transition(
        &self,
        id: &DonationId,
        target: DonationStatus,
        actor: &Actor,
        reason: Option<String>,
    ) -> Result<TransitionReceipt, LifecycleError> {
        let outcome = self
            .engine
            .request_transition_with_reason(id, target, actor, reason)?;
        Ok(self.dispatch(outcome))
    }

    /// Apply a payment confirmation from the payment collaborator.
    pub fn on_payment_succeeded(
        &self,
        event: &PaymentSucceeded,
    ) -> Result<TransitionReceipt, LifecycleError> {
        let outcome = self.payments.apply(&self.engine, event)?;
        Ok(self.dispatch(outcome))
    }

    /// Side-effect gates for `actor` against the donation's current status.
    pub fn gates(&self, id: &DonationId, actor: &Actor) -> Result<SideEffectGates, LifecycleError> {
        let donation = self.engine.get(id)?;
        Ok(gates_for(donation.status(), actor.role))
    }

    /// Whether `viewer` may see `update`, judged against the donation's
    /// current status.
    pub fn location_visible(
        &self,
        update: &LocationUpdate,
        viewer: &Actor,
    ) -> Result<bool, LifecycleError> {
        let donation = self.engine.get(&update.donation_id)?;
        Ok(location_visible(update, viewer, donation.status()))
    }

    fn dispatch(&self, outcome: TransitionOutcome) -> TransitionReceipt {
        let dispatch = if self.notifications_enabled {
            self.dispatcher.on_status_change(&outcome.event)
        } else {
            DispatchReport::default()
        };
        TransitionReceipt {
            donation: outcome.donation,
            event: outcome.event,
            dispatch,
        }
    }
}
