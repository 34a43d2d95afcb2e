use std::time::Duration;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::views::ViewMode;

use super::defaults;

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub general: GeneralConfig,
    pub logging: LoggingConfig,
    pub api: ApiConfig,
    pub console: ConsoleConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        super::loader::load()
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneralConfig {
    pub host: String,
    pub port: u16,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            host: defaults::DEFAULT_HOST.to_string(),
            port: defaults::DEFAULT_PORT as u16,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    pub rust_log: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            rust_log: defaults::DEFAULT_RUST_LOG.to_string(),
        }
    }
}

/// Where the REST layer lives and how writes ask it to reply.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct ApiConfig {
    pub base_url: String,
    /// Send `Prefer: return=representation` on create and update.
    pub prefer_representation: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::DEFAULT_API_BASE_URL.to_string(),
            prefer_representation: defaults::DEFAULT_PREFER_REPRESENTATION,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConsoleConfig {
    pub status_decay_ms: u64,
    pub default_view: ViewMode,
    pub submit_policy: SubmitPolicy,
}

impl ConsoleConfig {
    pub fn status_decay(&self) -> Duration {
        Duration::from_millis(self.status_decay_ms)
    }
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            status_decay_ms: defaults::DEFAULT_STATUS_DECAY_MS as u64,
            default_view: ViewMode::Table,
            submit_policy: SubmitPolicy::AllowDuplicates,
        }
    }
}

/// What happens when an identical write is submitted while one is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SubmitPolicy {
    #[default]
    AllowDuplicates,
    DisableWhilePending,
}

impl SubmitPolicy {
    pub fn disables_while_pending(self) -> bool {
        matches!(self, Self::DisableWhilePending)
    }
}
