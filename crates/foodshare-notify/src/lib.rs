//! # foodshare-notify: Notification Dispatch
//!
//! Turns a committed [`StatusChangeEvent`](foodshare_state::StatusChangeEvent)
//! into one [`Notification`] per interested recipient and hands each to an
//! injected [`NotificationChannel`].
//!
//! ## Architecture
//!
//! - **Notification** (`notification.rs`): recipient addressing and the
//!   notification value.
//! - **Policy** (`policy.rs`): fixed `to_status` → recipient-set mapping.
//! - **Channel** (`channel.rs`): delivery trait plus the log and in-memory
//!   channels.
//! - **Dispatcher** (`dispatcher.rs`): best-effort fan-out. Delivery
//!   failures are logged and reported, never raised; the status change has
//!   already committed by the time dispatch runs.

pub mod channel;
pub mod dispatcher;
pub mod notification;
pub mod policy;

pub use channel::{DeliveryError, LogChannel, MemoryChannel, NotificationChannel};
pub use dispatcher::{DispatchReport, NotificationDispatcher};
pub use notification::{Notification, Recipient};
pub use policy::recipients_for;
