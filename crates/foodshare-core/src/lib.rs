//! # foodshare-core: Foundational Types
//!
//! The leaf of the FoodShare crate graph. Defines the identifier newtypes,
//! the actor role enumeration, and the UTC timestamp type that every other
//! crate builds on. It depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Newtype identifiers.** `DonationId` and `ActorId` are distinct types;
//!    a donor identity cannot be passed where a donation identity is expected.
//!
//! 2. **Flat roles.** `Role` has no ordering. Permission is always an explicit
//!    allow-list lookup, never a `>=` comparison.
//!
//! 3. **UTC-only timestamps** with seconds precision.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `foodshare-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod error;
pub mod identity;
pub mod role;
pub mod temporal;

pub use error::FoodshareError;
pub use identity::{ActorId, DonationId};
pub use role::{Actor, Role};
pub use temporal::Timestamp;
