//! # Lifecycle Errors
//!
//! Every rejection carries the donation, the observed status, and the
//! requested status so the caller can explain the refusal. `NotFound` and
//! `Unauthorized` are distinct variants; callers decide how much of the
//! distinction to surface.

use foodshare_core::{DonationId, Role};
use thiserror::Error;

use crate::status::DonationStatus;

/// Errors returned by the lifecycle engine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LifecycleError {
    /// The referenced donation does not exist.
    #[error("donation {donation_id} not found")]
    NotFound { donation_id: DonationId },

    /// `(from, to)` is not an edge of the lifecycle graph.
    #[error("invalid transition for {donation_id}: {from} -> {to}")]
    InvalidTransition {
        donation_id: DonationId,
        from: DonationStatus,
        to: DonationStatus,
    },

    /// The edge exists but the actor is not permitted to take it.
    #[error("{role} may not move {donation_id} from {from} to {to}: {reason}")]
    Unauthorized {
        donation_id: DonationId,
        from: DonationStatus,
        to: DonationStatus,
        role: Role,
        reason: String,
    },

    /// The stored status changed between load and save. Refresh and retry.
    #[error("conflicting update on {donation_id}: expected {expected}, found {actual}")]
    Conflict {
        donation_id: DonationId,
        expected: DonationStatus,
        actual: DonationStatus,
    },

    /// Caller input failed validation.
    #[error("validation error: {0}")]
    Validation(String),
}

impl LifecycleError {
    /// Short machine-readable label, used as a metrics label.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "not_found",
            Self::InvalidTransition { .. } => "invalid_transition",
            Self::Unauthorized { .. } => "unauthorized",
            Self::Conflict { .. } => "conflict",
            Self::Validation(_) => "validation",
        }
    }
}

/// Errors reported by a [`DonationStore`](crate::store::DonationStore).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("donation {0} not found")]
    NotFound(DonationId),

    /// Optimistic-concurrency check failed.
    #[error("stale write on {donation_id}: expected {expected}, found {actual}")]
    Conflict {
        donation_id: DonationId,
        expected: DonationStatus,
        actual: DonationStatus,
    },

    #[error("donation {0} already exists")]
    AlreadyExists(DonationId),

    /// The write would change an immutable attribute.
    #[error("donation {0}: immutable attributes may not change")]
    ImmutableField(DonationId),
}

impl From<StoreError> for LifecycleError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(donation_id) => Self::NotFound { donation_id },
            StoreError::Conflict {
                donation_id,
                expected,
                actual,
            } => Self::Conflict {
                donation_id,
                expected,
                actual,
            },
            other => Self::Validation(other.to_string()),
        }
    }
}
