//! # Inspection Subcommands
//!
//! `graph` and `gates` are read-only and need no store.

use anyhow::Result;
use clap::Args;

use foodshare_core::Role;
use foodshare_state::{gates_for, AuthorizationTable, DonationStatus, SideEffectGates};

/// Arguments for `foodshare graph`.
#[derive(Args, Debug)]
pub struct GraphArgs {
    /// Emit JSON instead of a table.
    #[arg(long)]
    pub json: bool,
}

/// Arguments for `foodshare gates`.
#[derive(Args, Debug)]
pub struct GatesArgs {
    /// Donation status (pending, accepted, picked_up, delivered, cancelled).
    #[arg(long)]
    pub status: DonationStatus,
    /// Viewer role (admin, ngo, volunteer, donor, user).
    #[arg(long)]
    pub role: Role,
}

/// One edge with its grants rendered for display.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct EdgeView {
    pub from: DonationStatus,
    pub to: DonationStatus,
    pub allowed: Vec<String>,
}

pub fn graph_view() -> Vec<EdgeView> {
    AuthorizationTable
        .rules()
        .iter()
        .map(|rule| EdgeView {
            from: rule.from,
            to: rule.to,
            allowed: rule.grants.iter().map(ToString::to_string).collect(),
        })
        .collect()
}

pub fn run_graph(args: &GraphArgs) -> Result<u8> {
    let edges = graph_view();
    if args.json {
        println!("{}", serde_json::to_string_pretty(&edges)?);
        return Ok(0);
    }
    println!("Lifecycle edges ({}):", edges.len());
    for edge in &edges {
        println!("  {} → {}: {}", edge.from, edge.to, edge.allowed.join(", "));
    }
    let terminal: Vec<&str> = DonationStatus::ALL
        .iter()
        .filter(|s| s.is_terminal())
        .map(|s| s.as_str())
        .collect();
    println!("Terminal: {}", terminal.join(", "));
    Ok(0)
}

pub fn gates_view(args: &GatesArgs) -> SideEffectGates {
    gates_for(args.status, args.role)
}

pub fn run_gates(args: &GatesArgs) -> Result<u8> {
    println!("{}", serde_json::to_string(&gates_view(args))?);
    Ok(0)
}
