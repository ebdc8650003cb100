use serde::Deserialize;

pub const MIN_MAX_ATTEMPTS: u32 = 1;
pub const DEFAULT_MAX_ATTEMPTS: u32 = 100;

pub const MIN_INTERVAL_MS: u64 = 1;
pub const DEFAULT_INTERVAL_MS: u64 = 1000;

/// How long to wait for the translation server to come up.
///
/// Total wait is bounded by `max_attempts * interval_ms`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StartupConfig {
    /// Number of readiness probes before giving up
    pub max_attempts: u32,
    /// Delay between failed probes in milliseconds
    pub interval_ms: u64,
}

impl Default for StartupConfig {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            interval_ms: DEFAULT_INTERVAL_MS,
        }
    }
}

impl StartupConfig {
    /// Returns a description of the first invalid value, if any.
    pub(crate) fn invalid_reason(&self) -> Option<String> {
        if self.max_attempts < MIN_MAX_ATTEMPTS {
            return Some(format!(
                "startup.max_attempts must be >= {}, got {}",
                MIN_MAX_ATTEMPTS, self.max_attempts
            ));
        }

        if self.interval_ms < MIN_INTERVAL_MS {
            return Some(format!(
                "startup.interval_ms must be >= {}, got {}",
                MIN_INTERVAL_MS, self.interval_ms
            ));
        }

        None
    }
}
