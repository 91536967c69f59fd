use serde::{Deserialize, Serialize};

fn default_check_for_updates() -> bool {
    true
}

fn default_idle_ms() -> u64 {
    250
}

fn default_idle_timeout_ms() -> u64 {
    4000
}

/// Scheduling of the update check issued after startup
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct StartupConfig {
    #[serde(default = "default_check_for_updates")]
    pub check_for_updates: bool,
    /// Quiet period (no worker traffic) that counts as idle
    #[serde(default = "default_idle_ms")]
    pub idle_ms: u64,
    /// Upper bound: the check is sent by then even if never idle
    #[serde(default = "default_idle_timeout_ms")]
    pub idle_timeout_ms: u64,
}

impl Default for StartupConfig {
    fn default() -> Self {
        Self {
            check_for_updates: default_check_for_updates(),
            idle_ms: default_idle_ms(),
            idle_timeout_ms: default_idle_timeout_ms(),
        }
    }
}
