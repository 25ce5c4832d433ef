//! # Persistence Collaborator
//!
//! The engine owns no lock. Concurrent requests against one donation are
//! serialized by the store through an optimistic check: `save` succeeds
//! only if the stored status still equals the status the caller observed
//! at load time. The loser of a race gets [`StoreError::Conflict`].

use std::collections::HashMap;
use std::sync::Arc;

use foodshare_core::DonationId;
use parking_lot::RwLock;

use crate::donation::Donation;
use crate::error::StoreError;
use crate::status::DonationStatus;

/// Load/save contract the lifecycle engine requires from storage.
pub trait DonationStore: Send + Sync {
    /// Fetch the current record.
    fn load(&self, id: &DonationId) -> Result<Donation, StoreError>;

    /// Persist `donation` only if the stored status equals `expected_prior`.
    fn save(&self, donation: &Donation, expected_prior: DonationStatus) -> Result<(), StoreError>;

    /// Persist a newly created record.
    fn insert(&self, donation: Donation) -> Result<(), StoreError>;
}

impl<S: DonationStore + ?Sized> DonationStore for Arc<S> {
    fn load(&self, id: &DonationId) -> Result<Donation, StoreError> {
        (**self).load(id)
    }

    fn save(&self, donation: &Donation, expected_prior: DonationStatus) -> Result<(), StoreError> {
        (**self).save(donation, expected_prior)
    }

    fn insert(&self, donation: Donation) -> Result<(), StoreError> {
        (**self).insert(donation)
    }
}

/// Thread-safe, cloneable in-memory store.
///
/// Clones share the same map. The lock is `parking_lot` and is never held
/// across a call back into caller code, so it cannot be poisoned and cannot
/// deadlock against the engine.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDonationStore {
    data: Arc<RwLock<HashMap<DonationId, Donation>>>,
}

impl InMemoryDonationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored donations.
    pub fn len(&self) -> usize {
        self.data.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl DonationStore for InMemoryDonationStore {
    fn load(&self, id: &DonationId) -> Result<Donation, StoreError> {
        self.data
            .read()
            .get(id)
            .cloned()
            .ok_or(StoreError::NotFound(*id))
    }

    fn save(&self, donation: &Donation, expected_prior: DonationStatus) -> Result<(), StoreError> {
        let mut guard = self.data.write();
        let stored = guard
            .get_mut(&donation.id())
            .ok_or(StoreError::NotFound(donation.id()))?;
        if stored.status() != expected_prior {
            return Err(StoreError::Conflict {
                donation_id: donation.id(),
                expected: expected_prior,
                actual: stored.status(),
            });
        }
        if !stored.same_identity(donation) {
            return Err(StoreError::ImmutableField(donation.id()));
        }
        *stored = donation.clone();
        Ok(())
    }

    fn insert(&self, donation: Donation) -> Result<(), StoreError> {
        let mut guard = self.data.write();
        if guard.contains_key(&donation.id()) {
            return Err(StoreError::AlreadyExists(donation.id()));
        }
        guard.insert(donation.id(), donation);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::donation::fixtures::{actor, draft, now};
    use foodshare_core::Role;

    fn stored() -> (InMemoryDonationStore, Donation) {
        let store = InMemoryDonationStore::new();
        let d = Donation::create(draft(), &actor("u1", Role::Donor), now()).unwrap();
        store.insert(d.clone()).unwrap();
        (store, d)
    }

    #[test]
    fn test_load_missing_is_not_found() {
        let store = InMemoryDonationStore::new();
        let id = DonationId::new();
        assert_eq!(store.load(&id), Err(StoreError::NotFound(id)));
    }

    #[test]
    fn test_insert_twice_rejected() {
        let (store, d) = stored();
        assert_eq!(store.insert(d.clone()), Err(StoreError::AlreadyExists(d.id())));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_save_with_matching_prior_succeeds() {
        let (store, mut d) = stored();
        d.apply(DonationStatus::Accepted, &actor("n1", Role::Ngo), now(), None);
        store.save(&d, DonationStatus::Pending).unwrap();
        assert_eq!(store.load(&d.id()).unwrap().status(), DonationStatus::Accepted);
    }

    #[test]
    fn test_save_with_stale_prior_conflicts() {
        let (store, d) = stored();
        let mut first = d.clone();
        first.apply(DonationStatus::Accepted, &actor("n1", Role::Ngo), now(), None);
        store.save(&first, DonationStatus::Pending).unwrap();

        let mut second = d;
        second.apply(DonationStatus::Cancelled, &actor("u1", Role::Donor), now(), None);
        let err = store.save(&second, DonationStatus::Pending).unwrap_err();
        assert_eq!(
            err,
            StoreError::Conflict {
                donation_id: second.id(),
                expected: DonationStatus::Pending,
                actual: DonationStatus::Accepted,
            }
        );
        assert_eq!(store.load(&second.id()).unwrap().status(), DonationStatus::Accepted);
    }

    #[test]
    fn test_save_rejects_changed_attributes() {
        let (store, mut d) = stored();
        d.food_name = "Something else".to_string();
        assert_eq!(
            store.save(&d, DonationStatus::Pending),
            Err(StoreError::ImmutableField(d.id()))
        );
    }

    #[test]
    fn test_clones_share_data() {
        let (store, d) = stored();
        let other = store.clone();
        assert_eq!(other.load(&d.id()).unwrap(), d);
    }
}
