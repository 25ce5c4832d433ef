//! # Donation Lifecycle End-to-End
//!
//! Drives donations through the service layer the way a UI would and checks
//! status, history, and notifications together.

use chrono::{Duration, Utc};

use foodshare_core::{Actor, ActorId, Role};
use foodshare_notify::{MemoryChannel, Recipient};
use foodshare_service::{DonationService, ServiceConfig};
use foodshare_state::{DonationStatus, InMemoryDonationStore, LifecycleError, NewDonation};

type Service = DonationService<InMemoryDonationStore, MemoryChannel>;

fn actor(id: &str, role: Role) -> Actor {
    Actor::new(ActorId::new(id).expect("test actor id"), role)
}

fn bread() -> NewDonation {
    NewDonation {
        food_name: "Fresh Bread".to_string(),
        quantity: 20,
        quantity_unit: "loaves".to_string(),
        expiry_date: (Utc::now() + Duration::days(2)).date_naive(),
        pickup_location: "123 Main St, City".to_string(),
        description: Some("Whole wheat bread from our bakery".to_string()),
    }
}

fn service() -> (Service, MemoryChannel) {
    let outbox = MemoryChannel::new();
    let svc = DonationService::new(
        InMemoryDonationStore::new(),
        outbox.clone(),
        &ServiceConfig::default(),
    )
    .expect("default config is valid");
    (svc, outbox)
}

fn to(id: &str) -> Recipient {
    Recipient::Actor(ActorId::new(id).unwrap())
}

#[test]
fn accept_pickup_then_cancel_is_invalid() {
    let (svc, outbox) = service();
    let donor = actor("u1", Role::Donor);
    let d = svc.submit_donation(bread(), &donor).unwrap();
    assert_eq!(d.status(), DonationStatus::Pending);
    assert_eq!(d.donor_id().as_str(), "u1");

    let accepted = svc
        .transition(&d.id(), DonationStatus::Accepted, &actor("n1", Role::Ngo), None)
        .unwrap();
    assert_eq!(accepted.donation.status(), DonationStatus::Accepted);
    let sent = outbox.drain();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].recipient, to("u1"));
    assert_eq!(sent[0].status, DonationStatus::Accepted);

    let picked = svc
        .transition(&d.id(), DonationStatus::PickedUp, &actor("v1", Role::Volunteer), None)
        .unwrap();
    assert_eq!(picked.donation.status(), DonationStatus::PickedUp);
    let recipients: Vec<Recipient> = outbox.drain().into_iter().map(|n| n.recipient).collect();
    assert_eq!(recipients, vec![to("u1"), to("n1")]);

    let err = svc
        .transition(&d.id(), DonationStatus::Cancelled, &donor, None)
        .unwrap_err();
    match err {
        LifecycleError::InvalidTransition { from, to, .. } => {
            assert_eq!(from, DonationStatus::PickedUp);
            assert_eq!(to, DonationStatus::Cancelled);
        }
        other => panic!("expected InvalidTransition, got {other:?}"),
    }
    assert!(outbox.is_empty());

    let stored = svc.get(&d.id()).unwrap();
    assert_eq!(stored.status(), DonationStatus::PickedUp);
    assert_eq!(stored.transitions().len(), 2);
}

#[test]
fn non_owner_cancel_unauthorized_then_owner_succeeds() {
    let (svc, outbox) = service();
    let owner = actor("u1", Role::Donor);
    let d = svc.submit_donation(bread(), &owner).unwrap();

    let err = svc
        .transition(&d.id(), DonationStatus::Cancelled, &actor("u2", Role::Donor), None)
        .unwrap_err();
    assert!(matches!(err, LifecycleError::Unauthorized { .. }), "{err:?}");
    assert_eq!(svc.get(&d.id()).unwrap().status(), DonationStatus::Pending);
    assert!(outbox.is_empty());

    let receipt = svc
        .transition(&d.id(), DonationStatus::Cancelled, &owner, Some("no longer available".into()))
        .unwrap();
    assert_eq!(receipt.donation.status(), DonationStatus::Cancelled);
    assert_eq!(receipt.event.reason.as_deref(), Some("no longer available"));
    assert_eq!(outbox.drain().iter().map(|n| n.recipient.clone()).collect::<Vec<_>>(), vec![to("u1")]);
}

#[test]
fn full_delivery_notifies_donor_ngo_and_admins() {
    let (svc, outbox) = service();
    let d = svc.submit_donation(bread(), &actor("u1", Role::Donor)).unwrap();
    svc.transition(&d.id(), DonationStatus::Accepted, &actor("n7", Role::Ngo), None)
        .unwrap();
    svc.transition(&d.id(), DonationStatus::PickedUp, &actor("v1", Role::Volunteer), None)
        .unwrap();
    outbox.drain();

    let receipt = svc
        .transition(&d.id(), DonationStatus::Delivered, &actor("v1", Role::Volunteer), None)
        .unwrap();
    assert!(receipt.donation.is_terminal());
    let recipients: Vec<Recipient> = outbox.drain().into_iter().map(|n| n.recipient).collect();
    assert_eq!(recipients, vec![to("u1"), to("n7"), Recipient::Role(Role::Admin)]);
}

#[test]
fn admin_accept_leaves_ngo_addressed_by_role() {
    let (svc, outbox) = service();
    let d = svc.submit_donation(bread(), &actor("u1", Role::Donor)).unwrap();
    svc.transition(&d.id(), DonationStatus::Accepted, &actor("a1", Role::Admin), None)
        .unwrap();
    svc.transition(&d.id(), DonationStatus::PickedUp, &actor("a1", Role::Admin), None)
        .unwrap();
    let last = outbox.sent().into_iter().last().unwrap();
    assert_eq!(last.recipient, Recipient::Role(Role::Ngo));
}

#[test]
fn donor_acting_as_accepting_ngo_is_notified_once() {
    let (svc, outbox) = service();
    let d = svc.submit_donation(bread(), &actor("u1", Role::Donor)).unwrap();
    svc.transition(&d.id(), DonationStatus::Accepted, &actor("u1", Role::Ngo), None)
        .unwrap();
    outbox.drain();

    let receipt = svc
        .transition(&d.id(), DonationStatus::PickedUp, &actor("v1", Role::Volunteer), None)
        .unwrap();
    assert_eq!(receipt.dispatch.attempted(), 1);
    let recipients: Vec<Recipient> = outbox.drain().into_iter().map(|n| n.recipient).collect();
    assert_eq!(recipients, vec![to("u1")]);
}

#[test]
fn history_records_actor_and_order() {
    let (svc, _) = service();
    let d = svc.submit_donation(bread(), &actor("u1", Role::Donor)).unwrap();
    svc.transition(&d.id(), DonationStatus::Accepted, &actor("n1", Role::Ngo), None)
        .unwrap();
    svc.transition(&d.id(), DonationStatus::PickedUp, &actor("v9", Role::Volunteer), None)
        .unwrap();

    let stored = svc.get(&d.id()).unwrap();
    let steps: Vec<(DonationStatus, DonationStatus, &str)> = stored
        .transitions()
        .iter()
        .map(|t| (t.from, t.to, t.actor_id.as_str()))
        .collect();
    assert_eq!(
        steps,
        vec![
            (DonationStatus::Pending, DonationStatus::Accepted, "n1"),
            (DonationStatus::Accepted, DonationStatus::PickedUp, "v9"),
        ]
    );
    assert!(stored.updated_at() >= stored.created_at());
    assert_eq!(stored.associated_ngo().map(|id| id.as_str()), Some("n1"));
}

#[test]
fn invalid_draft_is_rejected_before_storage() {
    let (svc, _) = service();
    let mut draft = bread();
    draft.quantity = 0;
    draft.expiry_date = (Utc::now() - Duration::days(1)).date_naive();
    let err = svc.submit_donation(draft, &actor("u1", Role::Donor)).unwrap_err();
    match err {
        LifecycleError::Validation(msg) => {
            assert!(msg.contains("quantity"), "{msg}");
            assert!(msg.contains("expiry"), "{msg}");
        }
        other => panic!("expected Validation, got {other:?}"),
    }
    assert!(svc.engine().store().is_empty());
}
