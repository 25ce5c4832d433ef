//! # foodshare-cli: FoodShare Command-Line Interface
//!
//! ## Subcommands
//!
//! - `graph`: print the lifecycle edges and who may take them
//! - `gates`: evaluate the side-effect gates for a status and role
//! - `replay`: run a YAML scenario through the service and print one JSON
//!   line per step
//!
//! Argument parsing lives here; every decision is delegated to the domain
//! crates.

pub mod inspect;
pub mod replay;
