//! # foodshare-state: Donation Lifecycle State Machine
//!
//! The core of FoodShare. A donation moves from `Pending` to one of two
//! terminal statuses along a fixed graph, and every step is checked against
//! a role authorization table before it is committed.
//!
//! ## Modules
//!
//! - **Status** (`status.rs`): the five statuses and the four edges.
//! - **Authorization** (`authorization.rs`): `(from, to)` → permitted grants,
//!   including the ownership-scoped donor-cancel rule.
//! - **Donation** (`donation.rs`): the record, creation validation, and the
//!   append-only transition log.
//! - **Engine** (`engine.rs`): validate-then-commit transitions through a
//!   [`DonationStore`] with optimistic concurrency; emits one
//!   [`StatusChangeEvent`] per commit.
//! - **Gate** (`gate.rs`): payment/tracking visibility per status and role.
//! - **Location** (`location.rs`): per-viewer visibility of location updates.
//!
//! ## Design
//!
//! The status is an enum with runtime-validated transitions rather than a
//! typestate chain: the target status arrives as data from the caller, and
//! the engine must reject it with a structured error rather than at compile
//! time.

pub mod authorization;
pub mod donation;
pub mod engine;
pub mod error;
pub mod event;
pub mod gate;
pub mod location;
pub mod status;
pub mod store;

pub use authorization::{AuthorizationTable, Decision, Grant, TransitionRule};
pub use donation::{Donation, NewDonation, TransitionRecord};
pub use engine::{LifecycleEngine, TransitionOutcome};
pub use error::{LifecycleError, StoreError};
pub use event::StatusChangeEvent;
pub use gate::{gates_for, SideEffectGates};
pub use location::{location_visible, LocationUpdate, TrackingSide};
pub use status::{DonationStatus, EDGES};
pub use store::{DonationStore, InMemoryDonationStore};
