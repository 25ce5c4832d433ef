//! # Service Configuration
//!
//! Loaded from YAML. Every field has a default, so an empty file (or no
//! file at all) yields a working configuration.
//!
//! Resolution order:
//! - explicit path argument;
//! - `FOODSHARE_CONFIG` environment variable;
//! - built-in defaults.
//!
//! `FOODSHARE_LOG` overrides `log_filter` after loading.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use foodshare_core::{Actor, ActorId, Role};
use foodshare_notify::{LogChannel, MemoryChannel, NotificationChannel};

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServiceConfig {
    /// `tracing_subscriber::EnvFilter` directive used when `RUST_LOG` is unset.
    pub log_filter: String,
    pub payment: PaymentConfig,
    pub notifications: NotificationConfig,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            log_filter: "info".to_string(),
            payment: PaymentConfig::default(),
            notifications: NotificationConfig::default(),
        }
    }
}

/// Identity under which payment confirmations are applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PaymentConfig {
    pub settlement_actor_id: String,
    pub settlement_role: Role,
}

impl Default for PaymentConfig {
    fn default() -> Self {
        Self {
            settlement_actor_id: "payment-service".to_string(),
            settlement_role: Role::Admin,
        }
    }
}

impl PaymentConfig {
    /// The settlement actor, validating the configured id.
    pub fn settlement_actor(&self) -> Result<Actor, ConfigError> {
        let id = ActorId::new(self.settlement_actor_id.clone()).map_err(|e| {
            ConfigError::Invalid(format!("payment.settlement_actor_id: {e}"))
        })?;
        Ok(Actor::new(id, self.settlement_role))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChannelKind {
    /// Structured `tracing` events.
    Log,
    /// In-process outbox.
    Memory,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NotificationConfig {
    pub enabled: bool,
    pub channel: ChannelKind,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            channel: ChannelKind::Log,
        }
    }
}

impl NotificationConfig {
    /// Construct the configured channel. A memory channel starts empty.
    pub fn build_channel(&self) -> Arc<dyn NotificationChannel> {
        match self.channel {
            ChannelKind::Log => Arc::new(LogChannel),
            ChannelKind::Memory => Arc::new(MemoryChannel::new()),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

impl ServiceConfig {
    /// Load using the resolution order described in the module docs.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_with(path, |key| std::env::var(key).ok())
    }

    /// As [`load`](Self::load), reading variables through `env`.
    pub fn load_with(
        path: Option<&Path>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let from_env = env("FOODSHARE_CONFIG").map(PathBuf::from);
        let mut config = match path.map(Path::to_path_buf).or(from_env) {
            Some(p) => Self::from_file(&p)?,
            None => Self::default(),
        };
        if let Some(filter) = env("FOODSHARE_LOG") {
            config.log_filter = filter;
        }
        config.validate()?;
        Ok(config)
    }

    /// Parse a YAML file without consulting the environment.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parse YAML text. Blank input yields the defaults.
    pub fn from_yaml_str(raw: &str) -> Result<Self, serde_yaml::Error> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(raw)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.log_filter.trim().is_empty() {
            return Err(ConfigError::Invalid("log_filter must not be empty".to_string()));
        }
        self.payment.settlement_actor()?;
        Ok(())
    }
}
