//! # foodshare-service: Lifecycle Service Layer
//!
//! The layer a UI or API sits on. It composes the lifecycle engine, the
//! notification dispatcher, and the payment bridge behind one
//! [`DonationService`], and loads their settings from YAML.
//!
//! ## Ordering
//!
//! A transition is committed by the engine first; only a committed
//! transition is dispatched. Dispatch results travel back in the
//! [`TransitionReceipt`] and never turn a committed transition into an
//! error.

pub mod config;
pub mod orchestration;
pub mod payment;

pub use config::{ChannelKind, ConfigError, NotificationConfig, PaymentConfig, ServiceConfig};
pub use orchestration::{DonationService, TransitionReceipt};
pub use payment::{PaymentBridge, PaymentSucceeded};
