use serde::Serialize;

/// Incremental status emitted while waiting for readiness.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ProgressEvent {
    /// `current` failed probes out of `max`
    Attempt { current: u32, max: u32 },
    Completed,
    AbortedByUser,
    Failed { message: String },
}

impl ProgressEvent {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Attempt { .. })
    }
}

/// Consumer of progress events, typically a splash window.
pub trait ProgressSink: Send + Sync {
    fn report(&self, event: ProgressEvent);
}

/// Discards everything.
impl ProgressSink for () {
    fn report(&self, _event: ProgressEvent) {}
}
