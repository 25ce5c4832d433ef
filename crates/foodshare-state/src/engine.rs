//! # Donation Lifecycle Engine
//!
//! Owns the only side-effecting path of the core. A transition request is
//! processed in a fixed order, and every check completes before anything is
//! written:
//!
//! 1. load the donation (`NotFound`)
//! 2. check the edge `(current, target)` (`InvalidTransition`)
//! 3. consult the authorization table (`Unauthorized`)
//! 4. apply to a private copy and build exactly one [`StatusChangeEvent`]
//! 5. save against the observed status (`Conflict`)
//!
//! Re-issuing a request that already committed fails at step 2 because the
//! originating edge no longer exists from the new status. The engine never
//! retries a conflicting save.

use foodshare_core::{Actor, DonationId, Timestamp};

use crate::authorization::{AuthorizationTable, Decision};
use crate::donation::{Donation, NewDonation};
use crate::error::LifecycleError;
use crate::event::StatusChangeEvent;
use crate::status::DonationStatus;
use crate::store::DonationStore;

/// Result of a committed transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionOutcome {
    pub donation: Donation,
    pub event: StatusChangeEvent,
}

/// The donation state machine, bound to a persistence collaborator.
#[derive(Debug, Clone)]
pub struct LifecycleEngine<S> {
    store: S,
    table: AuthorizationTable,
}

impl<S: DonationStore> LifecycleEngine<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            table: AuthorizationTable,
        }
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Create a `Pending` donation owned by `donor`.
    pub fn create(&self, draft: NewDonation, donor: &Actor) -> Result<Donation, LifecycleError> {
        let donation = Donation::create(draft, donor, Timestamp::now())?;
        self.store.insert(donation.clone())?;
        tracing::info!(
            donation_id = %donation.id(),
            donor = %donor,
            food = %donation.food_name,
            "donation created"
        );
        metrics::counter!("foodshare_donations_created_total").increment(1);
        Ok(donation)
    }

    /// Fetch a donation.
    pub fn get(&self, id: &DonationId) -> Result<Donation, LifecycleError> {
        Ok(self.store.load(id)?)
    }

    /// Target statuses `actor` may currently request for donation `id`.
    pub fn available_transitions(
        &self,
        id: &DonationId,
        actor: &Actor,
    ) -> Result<Vec<DonationStatus>, LifecycleError> {
        let donation = self.store.load(id)?;
        Ok(self
            .table
            .permitted_targets(donation.status(), actor, donation.donor_id()))
    }

    /// Move donation `id` to `target` on behalf of `actor`.
    pub fn request_transition(
        &self,
        id: &DonationId,
        target: DonationStatus,
        actor: &Actor,
    ) -> Result<TransitionOutcome, LifecycleError> {
        self.request_transition_with_reason(id, target, actor, None)
    }

    /// As [`request_transition`](Self::request_transition), recording
    /// `reason` in the transition history and the emitted event.
    pub fn request_transition_with_reason(
        &self,
        id: &DonationId,
        target: DonationStatus,
        actor: &Actor,
        reason: Option<String>,
    ) -> Result<TransitionOutcome, LifecycleError> {
        let result = self.try_transition(id, target, actor, reason);
        match &result {
            Ok(outcome) => {
                tracing::info!(
                    donation_id = %id,
                    from = %outcome.event.from_status,
                    to = %target,
                    actor = %actor,
                    "donation transition committed"
                );
                metrics::counter!("foodshare_transitions_total", "to" => target.as_str())
                    .increment(1);
            }
            Err(err @ LifecycleError::Conflict { .. }) => {
                tracing::warn!(donation_id = %id, to = %target, actor = %actor, error = %err, "donation transition lost a race");
                metrics::counter!("foodshare_transitions_rejected_total", "reason" => err.kind())
                    .increment(1);
            }
            Err(err) => {
                tracing::debug!(donation_id = %id, to = %target, actor = %actor, reason = %err, "donation transition rejected");
                metrics::counter!("foodshare_transitions_rejected_total", "reason" => err.kind())
                    .increment(1);
            }
        }
        result
    }

    fn try_transition(
        &self,
        id: &DonationId,
        target: DonationStatus,
        actor: &Actor,
        reason: Option<String>,
    ) -> Result<TransitionOutcome, LifecycleError> {
        let mut donation = self.store.load(id)?;
        let observed = donation.status();

        if !observed.can_transition_to(target) {
            return Err(LifecycleError::InvalidTransition {
                donation_id: *id,
                from: observed,
                to: target,
            });
        }

        match self
            .table
            .authorize(observed, target, actor, donation.donor_id())
        {
            Decision::Allowed => {}
            Decision::Denied { not_owner } => {
                let reason = if not_owner {
                    "only the owning donor may do this".to_string()
                } else {
                    format!("role {} is not permitted on this edge", actor.role)
                };
                return Err(LifecycleError::Unauthorized {
                    donation_id: *id,
                    from: observed,
                    to: target,
                    role: actor.role,
                    reason,
                });
            }
            // The graph and the table are kept in lockstep; a missing row is
            // still a hard denial.
            Decision::NoSuchEdge => {
                return Err(LifecycleError::Unauthorized {
                    donation_id: *id,
                    from: observed,
                    to: target,
                    role: actor.role,
                    reason: "edge has no authorization entry".to_string(),
                });
            }
        }

        donation.apply(target, actor, Timestamp::now(), reason);
        let event = StatusChangeEvent::for_latest(&donation).ok_or_else(|| {
            LifecycleError::Validation(format!("donation {id} has no transition history"))
        })?;
        self.store.save(&donation, observed)?;

        Ok(TransitionOutcome { donation, event })
    }
}
