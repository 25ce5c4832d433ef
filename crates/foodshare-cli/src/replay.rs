//! # Scenario Replay
//!
//! Runs a YAML scenario against a fresh in-memory store and prints one JSON
//! line per step. Donations are referred to by a label chosen in the
//! `create` step.
//!
//! ```yaml
//! steps:
//!   - op: create
//!     label: bread
//!     donor: { id: u1, role: donor }
//!     donation:
//!       food_name: Fresh Bread
//!       quantity: 20
//!       quantity_unit: loaves
//!       expiry_date: 2099-01-01
//!       pickup_location: 123 Main St
//!   - op: transition
//!     donation: bread
//!     to: accepted
//!     actor: { id: n1, role: ngo }
//! ```
//!
//! A rejected step is reported and the replay continues. A reference to an
//! unknown label aborts the replay.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::Args;
use serde::{Deserialize, Serialize};

use foodshare_core::{Actor, DonationId};
use foodshare_notify::NotificationChannel;
use foodshare_service::{
    DonationService, PaymentSucceeded, ServiceConfig, TransitionReceipt,
};
use foodshare_state::{
    DonationStatus, InMemoryDonationStore, LifecycleError, NewDonation, SideEffectGates,
};

/// Arguments for `foodshare replay`.
#[derive(Args, Debug)]
pub struct ReplayArgs {
    /// Scenario file (YAML).
    pub file: PathBuf,
    /// Exit with status 2 if any step was rejected.
    #[arg(long)]
    pub strict: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scenario {
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Step {
    Create {
        label: String,
        donor: Actor,
        donation: NewDonation,
    },
    Transition {
        donation: String,
        to: DonationStatus,
        actor: Actor,
        #[serde(default)]
        reason: Option<String>,
    },
    Payment {
        donation: String,
        transaction_id: String,
    },
    Gates {
        donation: String,
        actor: Actor,
    },
    Available {
        donation: String,
        actor: Actor,
    },
}

impl Step {
    fn op(&self) -> &'static str {
        match self {
            Self::Create { .. } => "create",
            Self::Transition { .. } => "transition",
            Self::Payment { .. } => "payment",
            Self::Gates { .. } => "gates",
            Self::Available { .. } => "available",
        }
    }

    fn label(&self) -> &str {
        match self {
            Self::Create { label, .. } => label,
            Self::Transition { donation, .. }
            | Self::Payment { donation, .. }
            | Self::Gates { donation, .. }
            | Self::Available { donation, .. } => donation,
        }
    }
}

/// One output line.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StepReport {
    pub step: usize,
    pub op: &'static str,
    pub donation: String,
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<DonationStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub notified: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gates: Option<SideEffectGates>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available: Option<Vec<DonationStatus>>,
}

type ReplayService = DonationService<InMemoryDonationStore, Arc<dyn NotificationChannel>>;

pub fn load_scenario(path: &Path) -> Result<Scenario> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read scenario {}", path.display()))?;
    serde_yaml::from_str(&raw)
        .with_context(|| format!("failed to parse scenario {}", path.display()))
}

/// Replay `scenario` against a fresh service built from `config`.
pub fn replay(scenario: &Scenario, config: &ServiceConfig) -> Result<Vec<StepReport>> {
    let service: ReplayService = DonationService::new(
        InMemoryDonationStore::new(),
        config.notifications.build_channel(),
        config,
    )?;
    let mut labels: HashMap<String, DonationId> = HashMap::new();
    let mut reports = Vec::with_capacity(scenario.steps.len());

    for (index, step) in scenario.steps.iter().enumerate() {
        let mut report = StepReport {
            step: index,
            op: step.op(),
            donation: step.label().to_string(),
            ..StepReport::default()
        };

        if let Step::Create { label, donor, donation } = step {
            if labels.contains_key(label) {
                bail!("step {index}: label {label:?} already used");
            }
            match service.submit_donation(donation.clone(), donor) {
                Ok(created) => {
                    labels.insert(label.clone(), created.id());
                    report.ok = true;
                    report.status = Some(created.status());
                }
                Err(err) => record_error(&mut report, &err),
            }
            reports.push(report);
            continue;
        }

        let id = match labels.get(step.label()) {
            Some(id) => *id,
            None => bail!("step {index}: unknown donation label {:?}", step.label()),
        };
        tracing::debug!(step = index, op = step.op(), donation_id = %id, "replaying step");

        match step {
            Step::Create { .. } => {}
            Step::Transition { to, actor, reason, .. } => {
                let result = service.transition(&id, *to, actor, reason.clone());
                record_receipt(&mut report, result);
            }
            Step::Payment { transaction_id, .. } => {
                let result = service.on_payment_succeeded(&PaymentSucceeded {
                    donation_id: id,
                    transaction_id: transaction_id.clone(),
                });
                record_receipt(&mut report, result);
            }
            Step::Gates { actor, .. } => match service.gates(&id, actor) {
                Ok(gates) => {
                    report.ok = true;
                    report.gates = Some(gates);
                }
                Err(err) => record_error(&mut report, &err),
            },
            Step::Available { actor, .. } => match service.available_transitions(&id, actor) {
                Ok(targets) => {
                    report.ok = true;
                    report.available = Some(targets);
                }
                Err(err) => record_error(&mut report, &err),
            },
        }
        reports.push(report);
    }
    Ok(reports)
}

fn record_receipt(report: &mut StepReport, result: Result<TransitionReceipt, LifecycleError>) {
    match result {
        Ok(receipt) => {
            report.ok = true;
            report.status = Some(receipt.donation.status());
            report.notified = receipt
                .dispatch
                .delivered
                .iter()
                .map(|n| n.recipient.to_string())
                .collect();
        }
        Err(err) => record_error(report, &err),
    }
}

fn record_error(report: &mut StepReport, err: &LifecycleError) {
    report.ok = false;
    report.error = Some(err.kind());
    report.message = Some(err.to_string());
}

/// Execute `foodshare replay`.
pub fn run_replay(args: &ReplayArgs, config: &ServiceConfig) -> Result<u8> {
    let scenario = load_scenario(&args.file)?;
    let reports = replay(&scenario, config)?;
    for report in &reports {
        println!("{}", serde_json::to_string(report)?);
    }
    let rejected = reports.iter().filter(|r| !r.ok).count();
    if rejected > 0 {
        tracing::info!(rejected, total = reports.len(), "replay finished with rejected steps");
    }
    Ok(if args.strict && rejected > 0 { 2 } else { 0 })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const BREAD: &str = r#"
steps:
  - op: create
    label: bread
    donor: { id: u1, role: donor }
    donation:
      food_name: Fresh Bread
      quantity: 20
      quantity_unit: loaves
      expiry_date: 2099-01-01
      pickup_location: 123 Main St, City
  - op: gates
    donation: bread
    actor: { id: u1, role: donor }
  - op: transition
    donation: bread
    to: accepted
    actor: { id: n1, role: ngo }
  - op: transition
    donation: bread
    to: picked_up
    actor: { id: v1, role: volunteer }
  - op: transition
    donation: bread
    to: cancelled
    actor: { id: u1, role: donor }
  - op: available
    donation: bread
    actor: { id: n1, role: ngo }
"#;

    fn run(yaml: &str) -> Result<Vec<StepReport>> {
        let scenario: Scenario = serde_yaml::from_str(yaml).unwrap();
        replay(&scenario, &ServiceConfig::default())
    }

    #[test]
    fn replay_happy_path_then_rejected_cancel() {
        let reports = run(BREAD).unwrap();
        assert_eq!(reports.len(), 6);
        assert!(reports[0].ok);
        assert_eq!(reports[0].status, Some(DonationStatus::Pending));

        let gates = reports[1].gates.unwrap();
        assert!(gates.payment_offered);

        assert_eq!(reports[2].status, Some(DonationStatus::Accepted));
        assert_eq!(reports[2].notified, vec!["actor:u1".to_string()]);
        assert_eq!(
            reports[3].notified,
            vec!["actor:u1".to_string(), "actor:n1".to_string()]
        );

        assert!(!reports[4].ok);
        assert_eq!(reports[4].error, Some("invalid_transition"));

        assert_eq!(
            reports[5].available,
            Some(vec![DonationStatus::Delivered])
        );
    }

    #[test]
    fn replay_payment_step() {
        let yaml = r#"
steps:
  - op: create
    label: cans
    donor: { id: u1, role: donor }
    donation:
      food_name: Canned Food
      quantity: 30
      quantity_unit: cans
      expiry_date: 2099-06-01
      pickup_location: 789 Pine St
  - op: payment
    donation: cans
    transaction_id: pay_7
"#;
        let reports = run(yaml).unwrap();
        assert!(reports[1].ok);
        assert_eq!(reports[1].status, Some(DonationStatus::Accepted));
    }

    #[test]
    fn replay_invalid_create_is_reported_and_label_unbound() {
        let yaml = r#"
steps:
  - op: create
    label: bad
    donor: { id: u1, role: donor }
    donation:
      food_name: ""
      quantity: 0
      quantity_unit: kg
      expiry_date: 2099-01-01
      pickup_location: somewhere
  - op: gates
    donation: bad
    actor: { id: u1, role: donor }
"#;
        let err = run(yaml).unwrap_err();
        assert!(err.to_string().contains("unknown donation label"));
    }

    #[test]
    fn replay_rejects_duplicate_label() {
        let one = r#"
  - op: create
    label: x
    donor: { id: u1, role: donor }
    donation:
      food_name: Rice
      quantity: 5
      quantity_unit: kg
      expiry_date: 2099-01-01
      pickup_location: Depot
"#;
        let yaml = format!("steps:{one}{one}");
        assert!(run(&yaml).is_err());
    }

    #[test]
    fn run_replay_strict_exit_code() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(BREAD.as_bytes()).unwrap();
        let lenient = ReplayArgs {
            file: file.path().to_path_buf(),
            strict: false,
        };
        assert_eq!(run_replay(&lenient, &ServiceConfig::default()).unwrap(), 0);
        let strict = ReplayArgs {
            file: file.path().to_path_buf(),
            strict: true,
        };
        assert_eq!(run_replay(&strict, &ServiceConfig::default()).unwrap(), 2);
    }
}
