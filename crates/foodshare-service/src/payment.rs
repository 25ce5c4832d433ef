//! # Payment Bridge
//!
//! The payment provider reports a successful logistics payment as a single
//! event. The bridge translates it into an ordinary `pending → accepted`
//! transition request, made by the configured settlement actor. It does not
//! bypass the authorization table: if the settlement actor's role is not
//! granted the edge, the request is refused like any other.

use serde::{Deserialize, Serialize};

use foodshare_core::{Actor, DonationId};
use foodshare_state::{
    DonationStatus, DonationStore, LifecycleEngine, LifecycleError, TransitionOutcome,
};

/// External confirmation that a logistics payment settled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentSucceeded {
    pub donation_id: DonationId,
    pub transaction_id: String,
}

#[derive(Debug, Clone)]
pub struct PaymentBridge {
    settlement: Actor,
}

impl PaymentBridge {
    pub fn new(settlement: Actor) -> Self {
        Self { settlement }
    }

    pub fn settlement_actor(&self) -> &Actor {
        &self.settlement
    }

    /// Apply `event` through `engine`.
    pub fn apply<S: DonationStore>(
        &self,
        engine: &LifecycleEngine<S>,
        event: &PaymentSucceeded,
    ) -> Result<TransitionOutcome, LifecycleError> {
        let tx = event.transaction_id.trim();
        if tx.is_empty() {
            return Err(LifecycleError::Validation(
                "payment transaction id must not be empty".to_string(),
            ));
        }
        tracing::info!(
            donation_id = %event.donation_id,
            transaction_id = tx,
            "payment confirmed; requesting acceptance"
        );
        engine.request_transition_with_reason(
            &event.donation_id,
            DonationStatus::Accepted,
            &self.settlement,
            Some(format!("payment {tx}")),
        )
    }
}
