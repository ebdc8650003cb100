use serde::Serialize;

/// Where the readiness wait currently stands.
///
/// `Ready`, `Failed` and `Aborted` are terminal for one `await_ready` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SupervisionState {
    /// No readiness wait has begun
    NotStarted,
    /// Probing; `attempt` failed probes so far
    Polling { attempt: u32 },
    /// Server answered 200
    Ready,
    /// Startup abandoned
    Failed { reason: String },
    /// Operator cancelled
    Aborted,
}

impl SupervisionState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Ready | Self::Failed { .. } | Self::Aborted)
    }
}
